//! assign - in-place record merges built on the entries view.
//!
//! - override_with(): patches applied left to right, later wins, new keys appended.
//! - defaults(): fill `None` slots from a fallback record; present values are never touched.
//! - map_values(): rewrite every value through a mapper.
//!
//! All three first drain an entries view into a plan, then write the plan back:
//! the view borrows the record, so reads and writes can't interleave.

use crate::iterate::{entries, map, Window};
use crate::keys::Key;
use crate::obj::Obj;
use crate::record::Record;

/// Merge `patches` into `record` in order; later patches win on conflicts.
pub fn override_with<'o, V, P>(record: &'o mut Obj<V>, patches: &[&P]) -> &'o mut Obj<V>
where
    V: Clone,
    P: Record<Value = V> + ?Sized,
{
    for patch in patches {
        for e in entries(*patch, Window::default()) {
            record.insert(e.key, e.value.clone());
        }
    }
    record
}

/// For every key of `record` holding `None`, take `fallback`'s value if it has one.
/// Keys absent from `record` are not introduced.
pub fn defaults<'o, V, F>(record: &'o mut Obj<Option<V>>, fallback: &F) -> &'o mut Obj<Option<V>>
where
    V: Clone,
    F: Record<Value = Option<V>> + ?Sized,
{
    let fills: Vec<(Key, V)> = map(entries(&*record, Window::default()), |e, _, _| {
        match (e.value, fallback.lookup(&e.key)) {
            (None, Some(Some(v))) => Some((e.key, v.clone())),
            _ => None,
        }
    });
    for (k, v) in fills {
        record.insert(k, Some(v));
    }
    record
}

/// Replace every value with `mapper(key, value)`.
pub fn map_values<V, F>(record: &mut Obj<V>, mut mapper: F) -> &mut Obj<V>
where
    F: FnMut(&Key, &V) -> V,
{
    let next: Vec<(Key, V)> = map(entries(&*record, Window::default()), |e, _, _| {
        let v = mapper(&e.key, e.value);
        Some((e.key, v))
    });
    for (k, v) in next {
        record.insert(k, v);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skips_keys_missing_everywhere() {
        let mut rec: Obj<Option<i32>> = Obj::from([("a", None), ("b", None)]);
        let fb: Obj<Option<i32>> = Obj::from([("a", Some(1)), ("b", None)]);
        defaults(&mut rec, &fb);
        assert_eq!(rec, Obj::from([("a", Some(1)), ("b", None)]));
    }

    #[test]
    fn map_values_keeps_order() {
        let mut rec = Obj::from([("x", 1), ("y", 2)]);
        map_values(&mut rec, |k, v| if k == "x" { v + 100 } else { v * 2 });
        let vals: Vec<i32> = rec.values().copied().collect();
        assert_eq!(vals, vec![101, 4]);
    }
}
