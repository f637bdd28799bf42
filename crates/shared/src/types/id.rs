//! Typed IDs for type-safe entity references.
//!
//! A `LetterId` can never be passed where a `DusunId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

typed_id!(AdminId, "Unique identifier for an admin account.");
typed_id!(BudgetPlanId, "Unique identifier for a yearly APBDes document.");
typed_id!(DemographicId, "Unique identifier for a yearly population snapshot.");
typed_id!(UmkmId, "Unique identifier for a UMKM listing.");
typed_id!(DusunId, "Unique identifier for a hamlet profile.");
typed_id!(LetterId, "Unique identifier for a citizen letter request.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_v7() {
        let id = LetterId::new();
        assert_eq!(id.into_inner().get_version_num(), 7);
        assert_ne!(id, LetterId::new());
    }

    #[test]
    fn test_parse_and_display() {
        let raw = "0190f5a4-7c1e-7000-8000-000000000001";
        let id: UmkmId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
        assert!("bukan-uuid".parse::<DusunId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = DusunId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
