//! serde for Obj: a JSON-style map, key order preserved in both directions.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

use super::Obj;

impl<V: Serialize> Serialize for Obj<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k.as_str(), v)?;
        }
        map.end()
    }
}

struct ObjVisitor<V> {
    _v: PhantomData<fn() -> V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for ObjVisitor<V> {
    type Value = Obj<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Obj<V>, A::Error> {
        let mut obj = Obj::with_capacity(access.size_hint().unwrap_or(0));
        // Повтор ключа: последнее значение побеждает, позиция от первого вхождения.
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            obj.insert(k, v);
        }
        Ok(obj)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Obj<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ObjVisitor { _v: PhantomData })
    }
}
