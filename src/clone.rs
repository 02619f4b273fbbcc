//! clone - copy variants for records.
//!
//! Every variant assembles `defaults ⊕ source ⊕ overrides` (later wins) into a
//! new record. They differ only in how `source` is copied and what wrapper the
//! result gets:
//!
//! | variant   | copy                       | result             |
//! |-----------|----------------------------|--------------------|
//! | shallow   | `Clone` (shared handles stay shared) | `Obj<V>`   |
//! | deep      | structured (serde_json::Value) | `Obj<V>`       |
//! | writable  | deep                       | `Obj<V>`           |
//! | readonly  | deep                       | `Frozen<V>`        |
//! | immutable | deep                       | `Arc<Frozen<V>>`   |
//!
//! The structured copy goes through serialization, so `Arc`/`Rc` handles come
//! back detached (serde "rc" feature).

use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ops::Deref;
use std::sync::Arc;

use crate::assign::override_with;
use crate::keys::Key;
use crate::obj::Obj;
use crate::record::Record;

/// Read-only record: no `&mut` access to the inner `Obj`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Frozen<V>(Obj<V>);

impl<V> Frozen<V> {
    pub fn new(obj: Obj<V>) -> Self {
        Frozen(obj)
    }
}

impl<V: Clone> Frozen<V> {
    /// Mutable copy.
    pub fn thaw(&self) -> Obj<V> {
        self.0.clone()
    }
}

impl<V> Deref for Frozen<V> {
    type Target = Obj<V>;
    fn deref(&self) -> &Obj<V> {
        &self.0
    }
}

impl<V> Record for Frozen<V> {
    type Value = V;

    fn key_snapshot(&self) -> Vec<Key> {
        self.0.key_snapshot()
    }

    fn lookup(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

fn assemble<V: Clone>(base: Obj<V>, source: &Obj<V>, overrides: Option<&Obj<V>>) -> Obj<V> {
    let mut out = base;
    override_with(&mut out, &[source]);
    if let Some(o) = overrides {
        override_with(&mut out, &[o]);
    }
    out
}

fn structured_copy<V: Serialize + DeserializeOwned>(obj: &Obj<V>) -> Result<Obj<V>> {
    let tree = serde_json::to_value(obj).context("structured clone: serialize record")?;
    let copy = serde_json::from_value(tree).context("structured clone: rebuild record")?;
    Ok(copy)
}

pub fn shallow_clone<V: Clone>(
    obj: &Obj<V>,
    defaults: Option<&Obj<V>>,
    overrides: Option<&Obj<V>>,
) -> Obj<V> {
    let base = defaults.cloned().unwrap_or_default();
    assemble(base, obj, overrides)
}

pub fn deep_clone<V>(obj: &Obj<V>, defaults: Option<&Obj<V>>, overrides: Option<&Obj<V>>) -> Result<Obj<V>>
where
    V: Clone + Serialize + DeserializeOwned,
{
    let copy = structured_copy(obj).map_err(|e| {
        debug!("deep_clone: {:#}", e);
        e
    })?;
    if defaults.is_none() && overrides.is_none() {
        return Ok(copy);
    }
    let base = defaults.cloned().unwrap_or_default();
    Ok(assemble(base, &copy, overrides))
}

pub fn writable_clone<V>(
    obj: &Obj<V>,
    defaults: Option<&Obj<V>>,
    overrides: Option<&Obj<V>>,
) -> Result<Obj<V>>
where
    V: Clone + Serialize + DeserializeOwned,
{
    deep_clone(obj, defaults, overrides)
}

pub fn readonly_clone<V>(
    obj: &Obj<V>,
    defaults: Option<&Obj<V>>,
    overrides: Option<&Obj<V>>,
) -> Result<Frozen<V>>
where
    V: Clone + Serialize + DeserializeOwned,
{
    deep_clone(obj, defaults, overrides).map(Frozen::new)
}

pub fn immutable_clone<V>(
    obj: &Obj<V>,
    defaults: Option<&Obj<V>>,
    overrides: Option<&Obj<V>>,
) -> Result<Arc<Frozen<V>>>
where
    V: Clone + Serialize + DeserializeOwned,
{
    readonly_clone(obj, defaults, overrides).map(Arc::new)
}
