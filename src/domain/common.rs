//! Enumerations shared across aggregates.
//!
//! Stored and serialized by variant name; parsed case-insensitively.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                Self::ALL.iter().copied().find(|v| v.as_str().eq_ignore_ascii_case(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum! {
    /// Office an entity belongs to; every list is scoped to one.
    Location { HaNoi, HoChiMinh, DaNang }
}

impl Default for Location {
    fn default() -> Self {
        Self::HaNoi
    }
}

named_enum! {
    Gender { Unknown, Male, Female }
}

named_enum! {
    Role { Admin, Staff }
}

named_enum! {
    AssetState { Available, NotAvailable, Assigned, WaitingForRecycling, Recycled }
}

named_enum! {
    AssignmentState {
        WaitingForAcceptance,
        Accepted,
        Declined,
    }
}

named_enum! {
    ReturnRequestState { WaitingForReturning, Completed }
}
