use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for questions and options.
///
/// Assigned once at creation and never rewritten; duplicating or importing a
/// question always allocates new ids instead of reusing the source ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Allocate a fresh random identifier
    pub fn fresh() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_ids_are_unique() {
        let ids: HashSet<ItemId> = (0..500).map(|_| ItemId::fresh()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ItemId::from("q-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"q-1\"");
    }
}
