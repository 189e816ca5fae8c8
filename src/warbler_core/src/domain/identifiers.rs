use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Folder every profile picture is uploaded under.
pub const PROFILE_IMAGES_PREFIX: &str = "profile_images";

/// Identifier the account store hands back for a newly created account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object store key, `profile_images/<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn generate() -> Self {
        Self(format!("{PROFILE_IMAGES_PREFIX}/{}", Uuid::new_v4()))
    }

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to an object the store has acknowledged. Only a store can mint one
/// for real data, which is what makes it safe to hand back to `delete`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    key: ObjectKey,
    size: u64,
}

impl ObjectHandle {
    pub fn new(key: ObjectKey, size: u64) -> Self {
        Self { key, size }
    }

    pub fn key(&self) -> &ObjectKey {
        &self.key
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_unique_and_prefixed() {
        let first = ObjectKey::generate();
        let second = ObjectKey::generate();

        assert_ne!(first, second);
        assert!(first.as_str().starts_with("profile_images/"));
        assert!(Uuid::parse_str(&first.as_str()["profile_images/".len()..]).is_ok());
    }
}
