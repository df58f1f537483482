//! # Identity Newtypes
//!
//! The backend identifies every record with a positive integer primary key.
//! Each resource gets its own newtype so ids cannot be mixed up across
//! collections. All of them serialize transparently as bare integers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw backend primary key.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw backend primary key.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

record_id!(
    /// Primary key of a [`Project`](crate::Project).
    ProjectId
);

record_id!(
    /// Primary key of an [`EquipmentSale`](crate::EquipmentSale).
    EquipmentSaleId
);

record_id!(
    /// Primary key of a [`MilestoneStructure`](crate::MilestoneStructure).
    MilestoneStructureId
);

record_id!(
    /// Primary key of a single [`PaymentMilestone`](crate::PaymentMilestone)
    /// inside a structure.
    MilestoneId
);
