//! iterate - keyed traversal over records.
//!
//! Layout:
//! - cursor:  the resumable cursor (windowing, halting, Iterator impl)
//! - views:   entries / keys / values constructors
//! - consume: terminal consumers (for_each, map, flat_map, reduce, ...)
//!
//! Plus record-level shortcuts that drain a default entries view:
//! reduce_record / reduce_obj / map_record.

pub mod consume;
pub mod cursor;
pub mod views;

pub use consume::{
    flat_map, flat_map_all, for_each, map, map_all, reduce, reduce_into_record, Spread,
};
pub use cursor::{Cursor, Traverse, Window};
pub use views::{entries, keys, project, values, Entries, Entry, Keys, Values};

use crate::keys::Key;
use crate::obj::Obj;
use crate::record::Record;

/// Fold `reducer(acc, key, value)` over every entry of `record`.
pub fn reduce_record<'r, R, A, F>(record: &'r R, init: A, mut reducer: F) -> A
where
    R: Record + ?Sized,
    F: FnMut(A, Key, &'r R::Value) -> A,
{
    reduce(entries(record, Window::default()), init, |acc, e, _| {
        reducer(acc, e.key, e.value)
    })
}

/// `reduce_record` starting from an empty `Obj`.
pub fn reduce_obj<'r, R, U, F>(record: &'r R, reducer: F) -> Obj<U>
where
    R: Record + ?Sized,
    F: FnMut(Obj<U>, Key, &'r R::Value) -> Obj<U>,
{
    reduce_into_record(entries(record, Window::default()), reducer)
}

/// `mapper(key, value)` for every entry, collected in order.
pub fn map_record<'r, R, U, F>(record: &'r R, mut mapper: F) -> Vec<U>
where
    R: Record + ?Sized,
    F: FnMut(Key, &'r R::Value) -> U,
{
    map(entries(record, Window::default()), |e, _, _| Some(mapper(e.key, e.value)))
}
