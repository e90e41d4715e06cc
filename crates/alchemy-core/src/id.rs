use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Index of an era in the ordered era sequence. Era 0 is the first.
pub type Era = u32;

/// Identifies an item in the catalog. Stable across catalog reloads and
/// safe to persist in player progress.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Dense index of an item inside one built [`Catalog`](crate::catalog::Catalog).
/// Cheap to copy and compare. Only meaningful for the catalog that issued it.
///
/// Keys are only issued by a catalog; callers outside this crate obtain them
/// through [`Catalog::key_of`](crate::catalog::Catalog::key_of).
///
/// ```compile_fail
/// let key = alchemy_core::ItemKey(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(pub(crate) u32);

impl ItemKey {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
