//! Opaque identifiers for matches and player profiles.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a single played game.
    MatchId
);

string_id!(
    /// AoE II profile id of a player. Keys the `players` map of a match.
    ProfileId
);

impl From<u64> for ProfileId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_profile_id_from_number() {
        let id = ProfileId::from(199325u64);
        assert_eq!(id.as_str(), "199325");
        assert_eq!(id, ProfileId::from("199325"));
    }

    #[test]
    fn test_id_display_and_debug() {
        let id = MatchId::new("abc-123");
        assert_eq!(format!("{}", id), "abc-123");
        assert_eq!(format!("{:?}", id), "MatchId(abc-123)");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = MatchId::from("m-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m-1\"");
    }

    #[test]
    fn test_profile_id_as_map_key() {
        let mut map = HashMap::new();
        map.insert(ProfileId::from("42"), 1u32);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"42":1}"#);

        let back: HashMap<ProfileId, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&ProfileId::from(42u64)), Some(&1));
    }
}
