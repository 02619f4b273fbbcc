//! keys - key membership checks and key narrowing.
//!
//! Three operations:
//! - is_key_of(): membership test against a record's key set.
//! - try_key_of(): same test, but returns the validated `Key` (or None).
//! - assert_key(): unchecked narrowing. No runtime validation is done;
//!   the caller vouches that the key exists. A bogus key only shows up later,
//!   as a `None` from `Record::lookup`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::record::Record;

/// A key of some record.
///
/// Keys only come out of this module (or a record's key snapshot), so holding
/// a `Key` means someone checked it or explicitly asserted it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    #[inline]
    pub(crate) fn unchecked(s: String) -> Self {
        Key(s)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Key {
    type Target = str;
    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Key {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

impl From<Key> for String {
    fn from(k: Key) -> String {
        k.0
    }
}

/// True iff `candidate` names an existing field of `record`.
#[inline]
pub fn is_key_of<R: Record + ?Sized>(candidate: &str, record: &R) -> bool {
    record.contains_key(candidate)
}

/// Treat `candidate` as a key of `record` without checking.
///
/// Identity at runtime. Validate with [`is_key_of`] / [`try_key_of`] first
/// if the key comes from outside; otherwise a later lookup simply yields None.
#[inline]
pub fn assert_key<R: Record + ?Sized>(candidate: impl Into<String>, _record: &R) -> Key {
    Key::unchecked(candidate.into())
}

/// `Some(key)` if `candidate` is a key of `record`, else None.
#[inline]
pub fn try_key_of<R: Record + ?Sized>(candidate: &str, record: &R) -> Option<Key> {
    if is_key_of(candidate, record) {
        Some(assert_key(candidate, record))
    } else {
        None
    }
}
