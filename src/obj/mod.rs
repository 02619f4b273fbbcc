//! Obj - insertion-ordered record with O(1) key lookup.
//!
//! - Key order is the order of first insertion; re-inserting a key keeps its slot.
//! - `remove` is order preserving (shifts the tail, reindexes).
//! - Equality is structural: same key set, equal values, order ignored.
//!
//! The facade methods (entries/keys/values, reduce, clone_*, defaults, ...)
//! are thin wrappers over `iterate`, `assign` and `clone`.

mod codec;

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::assign;
use crate::clone::{self, Frozen};
use crate::iterate::{self, Entries, Keys, Values, Window};
use crate::keys::{self, Key};
use crate::record::Record;

pub struct Obj<V> {
    slots: Vec<(Key, V)>,
    index: HashMap<Key, usize>,
}

impl<V> Default for Obj<V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Clone> Clone for Obj<V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            index: self.index.clone(),
        }
    }
}

impl<V> Obj<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
            index: HashMap::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.slots[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.slots[i].1),
            None => None,
        }
    }

    /// Insert or replace. A replaced key keeps its position; returns the old value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(&i) = self.index.get(key.as_str()) {
            return Some(std::mem::replace(&mut self.slots[i].1, value));
        }
        let key = keys::assert_key(key, &*self);
        self.index.insert(key.clone(), self.slots.len());
        self.slots.push((key, value));
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let i = self.index.remove(key)?;
        let (_, v) = self.slots.remove(i);
        for (pos, (k, _)) in self.slots.iter().enumerate().skip(i) {
            if let Some(slot) = self.index.get_mut(k.as_str()) {
                *slot = pos;
            }
        }
        Some(v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &V)> + '_ {
        self.slots.iter().map(|(k, v)| (k, v))
    }

    // ----- iterate facade -----

    pub fn entries(&self) -> Entries<'_, Self> {
        iterate::entries(self, Window::default())
    }

    pub fn keys(&self) -> Keys<'_, Self> {
        iterate::keys(self, Window::default())
    }

    pub fn values(&self) -> Values<'_, Self> {
        iterate::values(self, Window::default())
    }

    pub fn entries_in(&self, window: Window) -> Entries<'_, Self> {
        iterate::entries(self, window)
    }

    pub fn keys_in(&self, window: Window) -> Keys<'_, Self> {
        iterate::keys(self, window)
    }

    pub fn values_in(&self, window: Window) -> Values<'_, Self> {
        iterate::values(self, window)
    }

    pub fn reduce<'a, A, F>(&'a self, init: A, reducer: F) -> A
    where
        F: FnMut(A, Key, &'a V) -> A,
    {
        iterate::reduce_record(self, init, reducer)
    }

    pub fn reduce_obj<'a, U, F>(&'a self, reducer: F) -> Obj<U>
    where
        F: FnMut(Obj<U>, Key, &'a V) -> Obj<U>,
    {
        iterate::reduce_obj(self, reducer)
    }

    pub fn map<'a, U, F>(&'a self, mapper: F) -> Vec<U>
    where
        F: FnMut(Key, &'a V) -> U,
    {
        iterate::map_record(self, mapper)
    }

    // ----- keys facade -----

    pub fn has_key(&self, k: &str) -> bool {
        keys::is_key_of(k, self)
    }

    pub fn key_of(&self, k: &str) -> Option<Key> {
        keys::try_key_of(k, self)
    }

    /// Unchecked; see [`keys::assert_key`].
    pub fn key(&self, k: &str) -> Key {
        keys::assert_key(k, self)
    }

    pub fn freeze(self) -> Frozen<V> {
        Frozen::new(self)
    }
}

impl<V: Clone> Obj<V> {
    /// Merge `overrides` into self (later wins, new keys allowed).
    pub fn assign_prop<P>(&mut self, overrides: &P) -> &mut Self
    where
        P: Record<Value = V> + ?Sized,
    {
        assign::override_with(self, &[overrides])
    }

    pub fn override_with<P>(&mut self, patches: &[&P]) -> &mut Self
    where
        P: Record<Value = V> + ?Sized,
    {
        assign::override_with(self, patches)
    }

    pub fn map_values<F>(&mut self, mapper: F) -> &mut Self
    where
        F: FnMut(&Key, &V) -> V,
    {
        assign::map_values(self, mapper)
    }

    pub fn clone_shallow(&self, defaults: Option<&Obj<V>>, overrides: Option<&Obj<V>>) -> Obj<V> {
        clone::shallow_clone(self, defaults, overrides)
    }
}

impl<V: Clone + Serialize + DeserializeOwned> Obj<V> {
    pub fn clone_deep(&self, defaults: Option<&Obj<V>>, overrides: Option<&Obj<V>>) -> Result<Obj<V>> {
        clone::deep_clone(self, defaults, overrides)
    }

    pub fn clone_writable(&self, defaults: Option<&Obj<V>>, overrides: Option<&Obj<V>>) -> Result<Obj<V>> {
        clone::writable_clone(self, defaults, overrides)
    }

    pub fn clone_readonly(&self, defaults: Option<&Obj<V>>, overrides: Option<&Obj<V>>) -> Result<Frozen<V>> {
        clone::readonly_clone(self, defaults, overrides)
    }

    pub fn clone_immutable(
        &self,
        defaults: Option<&Obj<V>>,
        overrides: Option<&Obj<V>>,
    ) -> Result<Arc<Frozen<V>>> {
        clone::immutable_clone(self, defaults, overrides)
    }
}

impl<V: Clone> Obj<Option<V>> {
    /// Fill absent (`None`) values from `fallback`.
    pub fn defaults<F>(&mut self, fallback: &F) -> &mut Self
    where
        F: Record<Value = Option<V>> + ?Sized,
    {
        assign::defaults(self, fallback)
    }
}

impl<V> Record for Obj<V> {
    type Value = V;

    fn key_snapshot(&self) -> Vec<Key> {
        self.slots.iter().map(|(k, _)| k.clone()).collect()
    }

    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Obj::contains_key(self, key)
    }

    fn len(&self) -> usize {
        Obj::len(self)
    }
}

impl<V: PartialEq> PartialEq for Obj<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.slots.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<V: Eq> Eq for Obj<V> {}

impl<V: fmt::Debug> fmt::Debug for Obj<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.slots.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl<V> Index<&str> for Obj<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key '{}' not found in Obj", key),
        }
    }
}

impl<K: Into<String>, V, const N: usize> From<[(K, V); N]> for Obj<V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Obj<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Obj::new();
        obj.extend(iter);
        obj
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for Obj<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<V> IntoIterator for Obj<V> {
    type Item = (Key, V);
    type IntoIter = std::vec::IntoIter<(Key, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}
