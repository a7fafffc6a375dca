//! Insertion-ordered parameter bags.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// An ordered string-to-string parameter map.
///
/// Keys keep their insertion position, so two maps built with the same
/// sequence of inserts serialize identically. Re-inserting an existing key
/// overwrites its value in place without moving it. Dotted keys such as
/// `uniform_pixel_renderer.samples` are treated as plain strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, String)>,
}

impl ParamMap {
    /// An empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, consuming and returning the map so calls
    /// can be chained when building literals.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert a key/value pair in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParamMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let params = ParamMap::new()
            .insert("color_space", "srgb")
            .insert("multiplier", "30.0");
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color_space", "multiplier"]);
        assert_eq!(params.get("multiplier"), Some("30.0"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn reinsert_overwrites_without_moving() {
        let params = ParamMap::new()
            .insert("a", "1")
            .insert("b", "2")
            .insert("a", "3");
        let entries: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn serializes_as_ordered_map() {
        let params = ParamMap::new()
            .insert("zeta", "1")
            .insert("alpha", "2");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn empty_map_serializes_as_empty_object() {
        let json = serde_json::to_string(&ParamMap::new()).unwrap();
        assert_eq!(json, "{}");
        assert!(ParamMap::new().is_empty());
    }
}
