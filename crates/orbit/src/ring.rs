use crate::LayoutError;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Category(String);

crate::impl_string_newtype!(Category);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub category: Category,
    #[serde(default)]
    pub items: Vec<ItemId>,
}

impl RingSpec {
    pub fn new(category: &str, items: &[&str]) -> Self {
        Self {
            category: Category::from(category),
            items: items.iter().copied().map(ItemId::from).collect(),
        }
    }
}

/// Concentric rings, innermost first. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RingSpec>", into = "Vec<RingSpec>")]
pub struct RingSet(pub(crate) Vec<RingSpec>);

impl RingSet {
    pub fn new(rings: Vec<RingSpec>) -> Result<Self, LayoutError> {
        if rings.is_empty() {
            return Err(LayoutError::EmptyRingSet);
        }
        Ok(Self(rings))
    }

    pub fn rings(&self) -> &[RingSpec] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RingSpec> {
        self.0.iter()
    }
}

impl TryFrom<Vec<RingSpec>> for RingSet {
    type Error = LayoutError;

    fn try_from(rings: Vec<RingSpec>) -> Result<Self, Self::Error> {
        Self::new(rings)
    }
}

impl From<RingSet> for Vec<RingSpec> {
    fn from(set: RingSet) -> Self {
        set.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring_set_is_rejected() {
        assert_eq!(RingSet::new(Vec::new()), Err(LayoutError::EmptyRingSet));
    }

    #[test]
    fn test_ring_set_deserialization() {
        let json = r#"[
            {"category": "Core", "items": ["HTML", "CSS"]},
            {"category": "Empty"}
        ]"#;
        let set: RingSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rings()[0], RingSpec::new("Core", &["HTML", "CSS"]));
        assert!(set.rings()[1].items.is_empty());

        assert!(serde_json::from_str::<RingSet>("[]").is_err());
    }
}
