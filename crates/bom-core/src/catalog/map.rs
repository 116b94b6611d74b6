//! Ordered category map
//!
//! JSON object order is meaningful here (it is the display order), so the
//! map is an `IndexMap` filled by a visitor that keeps entries in document
//! order.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One category as sent by the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Display name; missing or null degrades to ""
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default)]
    pub children: CategoryMap,
}

impl CategoryNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: CategoryMap::new(),
        }
    }

    pub fn with_child(mut self, id: impl Into<String>, child: CategoryNode) -> Self {
        self.children.insert(id, child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Category ID -> node, in insertion order
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    entries: IndexMap<String, CategoryNode>,
}

// Order is part of the value: two maps with the same entries in a different
// order display differently.
impl PartialEq for CategoryMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for CategoryMap {}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced entry keeps its original position
    pub fn insert(&mut self, id: impl Into<String>, node: CategoryNode) {
        self.entries.insert(id.into(), node);
    }

    pub fn with(mut self, id: impl Into<String>, node: CategoryNode) -> Self {
        self.insert(id, node);
        self
    }

    pub fn get(&self, id: &str) -> Option<&CategoryNode> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryNode)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, CategoryNode)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (K, CategoryNode)>>(iter: I) -> Self {
        let mut map = CategoryMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct CategoryMapVisitor;

impl<'de> Visitor<'de> for CategoryMapVisitor {
    type Value = CategoryMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of categories keyed by id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = CategoryMap {
            entries: IndexMap::with_capacity(access.size_hint().unwrap_or(0).min(4096)),
        };
        while let Some((id, node)) = access.next_entry::<String, CategoryNode>()? {
            map.insert(id, node);
        }
        Ok(map)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CategoryMap::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CategoryMap::new())
    }

    // Some backends encode an empty object as `[]`
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_type(de::Unexpected::Seq, &self));
        }
        Ok(CategoryMap::new())
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CategoryMapVisitor)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_document_order() {
        let map: CategoryMap =
            serde_json::from_str(r#"{"9":{"text":"Z"},"1":{"text":"A"},"5":{"text":"M"}}"#).unwrap();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["9", "1", "5"]);
    }

    #[test]
    fn test_missing_fields_degrade() {
        let map: CategoryMap = serde_json::from_str(
            r#"{"1":{},"2":{"text":null,"children":null},"3":{"text":"X","children":[]}}"#,
        )
        .unwrap();
        assert_eq!(map.get("1").unwrap().text, "");
        assert!(map.get("2").unwrap().is_leaf());
        assert!(map.get("3").unwrap().is_leaf());
    }

    #[test]
    fn test_rejects_non_object_children() {
        let result: Result<CategoryMap, _> =
            serde_json::from_str(r#"{"1":{"text":"A","children":[{"text":"B"}]}}"#);
        assert!(result.is_err());
        let result: Result<CategoryMap, _> = serde_json::from_str(r#"{"1":{"text":"A","children":7}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trips_order() {
        let map = CategoryMap::new()
            .with("b", CategoryNode::new("Second"))
            .with("a", CategoryNode::new("First"));
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = CategoryMap::new()
            .with("1", CategoryNode::new("One"))
            .with("2", CategoryNode::new("Two"));
        map.insert("1", CategoryNode::new("Uno"));
        let items: Vec<_> = map.iter().map(|(k, n)| (k, n.text.as_str())).collect();
        assert_eq!(items, vec![("1", "Uno"), ("2", "Two")]);
    }

    #[test]
    fn test_wide_level_decodes_in_order() {
        let n = 50_000;
        let body: Vec<String> = (0..n).rev().map(|i| format!(r#""{}":{{"text":"Part {}"}}"#, i, i)).collect();
        let json = format!("{{{}}}", body.join(","));

        let map: CategoryMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map.len(), n);
        assert_eq!(map.keys().next(), Some("49999"));
        assert_eq!(map.keys().last(), Some("0"));
        assert_eq!(map.get("1234").unwrap().text, "Part 1234");
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab = CategoryMap::new().with("a", CategoryNode::new("A")).with("b", CategoryNode::new("B"));
        let ba = CategoryMap::new().with("b", CategoryNode::new("B")).with("a", CategoryNode::new("A"));
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_duplicate_key_in_payload_keeps_first_position() {
        let map: CategoryMap =
            serde_json::from_str(r#"{"1":{"text":"A"},"2":{"text":"B"},"1":{"text":"C"}}"#).unwrap();
        let items: Vec<_> = map.iter().map(|(k, n)| (k, n.text.as_str())).collect();
        assert_eq!(items, vec![("1", "C"), ("2", "B")]);
    }
}
