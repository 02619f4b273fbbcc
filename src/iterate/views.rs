//! Derived views: cursors with a fixed projection (entries / keys / values).
//!
//! All windowing combinators and the halting rules come from `Cursor` unchanged.

use std::fmt;

use crate::keys::Key;
use crate::record::Record;

use super::cursor::{Cursor, Window};

/// One step of an entries view: (key, value, index).
pub struct Entry<'r, V: ?Sized> {
    pub key: Key,
    pub value: &'r V,
    pub index: usize,
}

impl<'r, V: ?Sized> Entry<'r, V> {
    pub fn into_pair(self) -> (Key, &'r V) {
        (self.key, self.value)
    }
}

impl<'r, V: ?Sized> Clone for Entry<'r, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value,
            index: self.index,
        }
    }
}

impl<'r, V: ?Sized + PartialEq> PartialEq for Entry<'r, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value && self.index == other.index
    }
}

impl<'r, V: ?Sized + fmt::Debug> fmt::Debug for Entry<'r, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(&self.key)
            .field(&self.value)
            .field(&self.index)
            .finish()
    }
}

pub type EntryProjector<'r, R> =
    fn(&'r R, &Key, &'r <R as Record>::Value, usize) -> Entry<'r, <R as Record>::Value>;
pub type KeyProjector<'r, R> = fn(&'r R, &Key, &'r <R as Record>::Value, usize) -> Key;
pub type ValueProjector<'r, R> =
    fn(&'r R, &Key, &'r <R as Record>::Value, usize) -> &'r <R as Record>::Value;

pub type Entries<'r, R> = Cursor<'r, R, Entry<'r, <R as Record>::Value>, EntryProjector<'r, R>>;
pub type Keys<'r, R> = Cursor<'r, R, Key, KeyProjector<'r, R>>;
pub type Values<'r, R> = Cursor<'r, R, &'r <R as Record>::Value, ValueProjector<'r, R>>;

fn project_entry<'r, R: Record + ?Sized>(
    _record: &'r R,
    key: &Key,
    value: &'r R::Value,
    index: usize,
) -> Entry<'r, R::Value> {
    Entry {
        key: key.clone(),
        value,
        index,
    }
}

fn project_key<'r, R: Record + ?Sized>(_record: &'r R, key: &Key, _value: &'r R::Value, _index: usize) -> Key {
    key.clone()
}

fn project_value<'r, R: Record + ?Sized>(
    _record: &'r R,
    _key: &Key,
    value: &'r R::Value,
    _index: usize,
) -> &'r R::Value {
    value
}

/// (key, value, index) triples.
pub fn entries<'r, R: Record + ?Sized>(record: &'r R, window: Window) -> Entries<'r, R> {
    Cursor::new(record, project_entry::<R> as EntryProjector<'r, R>, window)
}

/// Keys only.
pub fn keys<'r, R: Record + ?Sized>(record: &'r R, window: Window) -> Keys<'r, R> {
    Cursor::new(record, project_key::<R> as KeyProjector<'r, R>, window)
}

/// Values only.
pub fn values<'r, R: Record + ?Sized>(record: &'r R, window: Window) -> Values<'r, R> {
    Cursor::new(record, project_value::<R> as ValueProjector<'r, R>, window)
}

/// Cursor with a caller-supplied projection.
pub fn project<'r, R, T, P>(record: &'r R, projector: P, window: Window) -> Cursor<'r, R, T, P>
where
    R: Record + ?Sized,
    P: FnMut(&'r R, &Key, &'r R::Value, usize) -> T,
{
    Cursor::new(record, projector, window)
}
