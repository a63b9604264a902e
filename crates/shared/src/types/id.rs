//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `ContractId` where an `EmployeeId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(
    PartyId,
    "Unique identifier for an external party (payables counterparty)."
);
typed_id!(ContractId, "Unique identifier for an employment contract.");
typed_id!(PayslipId, "Unique identifier for a payslip.");
typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(JournalId, "Unique identifier for an accounting journal.");
typed_id!(
    LedgerEntryId,
    "Opaque reference to a ledger entry created by the accounting service."
);
typed_id!(DeclarationId, "Unique identifier for an income declaration.");
