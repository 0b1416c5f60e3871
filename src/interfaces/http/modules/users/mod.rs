//! Users module: staff accounts and their assignments

pub mod handlers;

pub use handlers::*;
