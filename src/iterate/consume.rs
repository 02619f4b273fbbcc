//! Terminal consumers: drain a cursor into an eager result.
//!
//! Every consumer takes anything `Traverse` (a cursor by value, or `&mut cursor`
//! to keep the instance). An already-halted cursor drains to an empty result;
//! draining the same instance twice gives the full result once and then nothing.
//!
//! The `index` passed to callbacks is the record index of the input value,
//! not the position in the output.

use std::ops::ControlFlow;

use crate::keys::Key;
use crate::obj::Obj;

use super::cursor::Traverse;
use super::views::Entry;

/// Result of a flat_map mapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Spread<U> {
    Absent,
    One(U),
    Many(Vec<U>),
}

impl<U> From<Option<U>> for Spread<U> {
    fn from(v: Option<U>) -> Self {
        match v {
            Some(u) => Spread::One(u),
            None => Spread::Absent,
        }
    }
}

impl<U> From<Vec<U>> for Spread<U> {
    fn from(v: Vec<U>) -> Self {
        Spread::Many(v)
    }
}

/// Call `callback(value, index)` for every produced value.
/// `ControlFlow::Break(())` halts the cursor and ends the drain.
pub fn for_each<C, F>(mut cursor: C, mut callback: F)
where
    C: Traverse,
    F: FnMut(C::Item, usize) -> ControlFlow<()>,
{
    while let Some((index, item)) = cursor.next_indexed() {
        if callback(item, index).is_break() {
            cursor.halt();
            return;
        }
    }
}

/// Map every value; `None` results are dropped from the output.
pub fn map<C, U, F>(mut cursor: C, mut mapper: F) -> Vec<U>
where
    C: Traverse,
    F: FnMut(C::Item, usize, &[U]) -> Option<U>,
{
    let mut out = Vec::new();
    while let Some((index, item)) = cursor.next_indexed() {
        if let Some(u) = mapper(item, index, &out) {
            out.push(u);
        }
    }
    out
}

/// Map every value, keeping `None` results in place.
pub fn map_all<C, U, F>(mut cursor: C, mut mapper: F) -> Vec<Option<U>>
where
    C: Traverse,
    F: FnMut(C::Item, usize, &[Option<U>]) -> Option<U>,
{
    let mut out = Vec::new();
    while let Some((index, item)) = cursor.next_indexed() {
        let u = mapper(item, index, &out);
        out.push(u);
    }
    out
}

/// Like `map`, but `Spread::Many` results are spliced in element by element.
pub fn flat_map<C, U, F>(mut cursor: C, mut mapper: F) -> Vec<U>
where
    C: Traverse,
    F: FnMut(C::Item, usize, &[U]) -> Spread<U>,
{
    let mut out = Vec::new();
    while let Some((index, item)) = cursor.next_indexed() {
        match mapper(item, index, &out) {
            Spread::Absent => {}
            Spread::One(u) => out.push(u),
            Spread::Many(us) => out.extend(us),
        }
    }
    out
}

/// `flat_map` that keeps absent results as `None`.
pub fn flat_map_all<C, U, F>(mut cursor: C, mut mapper: F) -> Vec<Option<U>>
where
    C: Traverse,
    F: FnMut(C::Item, usize, &[Option<U>]) -> Spread<U>,
{
    let mut out = Vec::new();
    while let Some((index, item)) = cursor.next_indexed() {
        match mapper(item, index, &out) {
            Spread::Absent => out.push(None),
            Spread::One(u) => out.push(Some(u)),
            Spread::Many(us) => out.extend(us.into_iter().map(Some)),
        }
    }
    out
}

/// Left fold in traversal order.
pub fn reduce<C, A, F>(mut cursor: C, init: A, mut reducer: F) -> A
where
    C: Traverse,
    F: FnMut(A, C::Item, usize) -> A,
{
    let mut acc = init;
    while let Some((index, item)) = cursor.next_indexed() {
        acc = reducer(acc, item, index);
    }
    acc
}

/// Fold an entries view into a fresh, empty record.
pub fn reduce_into_record<'r, C, V, U, F>(cursor: C, mut reducer: F) -> Obj<U>
where
    C: Traverse<Item = Entry<'r, V>>,
    V: ?Sized + 'r,
    F: FnMut(Obj<U>, Key, &'r V) -> Obj<U>,
{
    reduce(cursor, Obj::new(), |acc, entry, _| reducer(acc, entry.key, entry.value))
}
