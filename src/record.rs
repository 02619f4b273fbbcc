//! Record - the read interface the cursor engine works against.
//!
//! A record is an ordered mapping from a fixed key set to values. The engine
//! only needs two things from it: the key enumeration (snapshotted once per
//! cursor) and a point lookup (done lazily on every step).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::keys::{assert_key, Key};

pub trait Record {
    type Value;

    /// Keys in the record's own enumeration order.
    fn key_snapshot(&self) -> Vec<Key>;

    fn lookup(&self, key: &str) -> Option<&Self::Value>;

    fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Sorted key order.
impl<V> Record for BTreeMap<String, V> {
    type Value = V;

    fn key_snapshot(&self) -> Vec<Key> {
        self.keys().map(|k| assert_key(k.as_str(), self)).collect()
    }

    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

// Order follows serde_json's map (sorted unless "preserve_order" is enabled).
impl Record for Map<String, Value> {
    type Value = Value;

    fn key_snapshot(&self) -> Vec<Key> {
        self.keys().map(|k| assert_key(k.as_str(), self)).collect()
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Map::contains_key(self, key)
    }

    fn len(&self) -> usize {
        Map::len(self)
    }
}
