//! Document tree
//!
//! A [`Document`] maps keys to [`Value`]s; groups nest further documents through
//! [`Value::Group`]. Entries keep insertion order. Inserting an existing key replaces
//! its value in place (last write wins, original position kept).

use crate::odl::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, Value)>,
    positions: HashMap<String, usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.positions
            .get(key)
            .map(|&position| &self.entries[position].1)
    }

    /// Look up a value through nested groups with a dotted path, e.g. `"IMAGE.LINES"`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_group()?.get(segment)?;
        }
        Some(current)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Drop for Document {
    // Nested groups are released from a worklist so deep trees do not exhaust the stack.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        drain_groups(&mut self.entries, &mut pending);
        while let Some(mut group) = pending.pop() {
            drain_groups(&mut group.entries, &mut pending);
        }
    }
}

fn drain_groups(entries: &mut Vec<(String, Value)>, pending: &mut Vec<Document>) {
    for (_, value) in entries.drain(..) {
        if let Value::Group(group) = value {
            pending.push(group);
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
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
    fn test_insert_keeps_order() {
        let mut doc = Document::new();
        doc.insert("B", Value::Integer(1));
        doc.insert("A", Value::Integer(2));

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert!(doc.contains_key("A"));
        assert!(!doc.contains_key("C"));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut doc = Document::new();
        doc.insert("A", Value::Integer(1));
        doc.insert("B", Value::Integer(2));
        let previous = doc.insert("A", Value::Integer(3));

        assert_eq!(previous, Some(Value::Integer(1)));
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(doc.get("A"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_get_path() {
        let mut inner = Document::new();
        inner.insert("LINES", Value::Integer(1024));
        let mut doc = Document::new();
        doc.insert("IMAGE", Value::Group(inner));

        assert_eq!(doc.get_path("IMAGE.LINES"), Some(&Value::Integer(1024)));
        assert_eq!(doc.get_path("IMAGE.SAMPLES"), None);
        assert_eq!(doc.get_path("IMAGE.LINES.X"), None);
        assert!(doc.get_path("IMAGE").map_or(false, Value::is_group));
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mut doc = Document::new();
        doc.insert("Z", Value::Integer(1));
        doc.insert("A", Value::String("x".to_string()));

        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"Z":1,"A":"x"}"#);
    }
}
