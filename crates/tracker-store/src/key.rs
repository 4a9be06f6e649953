use std::fmt;

/// Opaque store identity assigned at insertion.
///
/// Unrelated to a record's `id` field, which many entities may share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(u64);

impl Key {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record:{}", self.0)
    }
}
