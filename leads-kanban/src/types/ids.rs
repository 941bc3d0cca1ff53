//! Newtype identifiers for board entities

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Opaque identifier of a lead, assigned by the Leads Store
    LeadId
);

define_id!(
    /// Identifier of a user-defined column
    CustomColumnId
);

define_id!(
    /// Identifier of an activity log entry (ULID)
    LogEntryId
);

/// Prefix for generated custom column ids. No status value starts with it.
pub const CUSTOM_COLUMN_PREFIX: &str = "custom-";

impl CustomColumnId {
    /// Generate a fresh id: prefix plus a ULID (timestamp + random suffix)
    pub fn generate() -> Self {
        Self(format!(
            "{CUSTOM_COLUMN_PREFIX}{}",
            ulid::Ulid::new().to_string().to_lowercase()
        ))
    }
}

impl LogEntryId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }
}
