pub mod errors;
pub mod pagination;
pub mod paging;
pub mod response;
pub mod shutdown;

pub use errors::*;
pub use pagination::*;
pub use paging::*;
pub use response::*;
