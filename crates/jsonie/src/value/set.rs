//! JsonicSet: insertion-ordered collection of distinct values.

use std::collections::HashMap;
use std::fmt;

use super::{fingerprint, JsonicValue};

/// A set of converted values.
///
/// Items keep their insertion order for iteration and rendering; equality
/// ignores order. Lookups go through a hash index, so building a set of `n`
/// items is linear.
#[derive(Clone, Default)]
pub struct JsonicSet {
    items: Vec<JsonicValue>,
    /// Item hash to positions in `items` with that hash.
    index: HashMap<u64, Vec<usize>>,
}

impl JsonicSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless an equal item is already present.
    ///
    /// Returns `Err(index)` with the position of the equal item on a duplicate.
    pub fn insert(&mut self, value: JsonicValue) -> Result<(), usize> {
        let bucket = self.index.entry(fingerprint(&value)).or_default();
        if let Some(&index) = bucket.iter().find(|&&i| self.items.get(i) == Some(&value)) {
            return Err(index);
        }
        bucket.push(self.items.len());
        self.items.push(value);
        Ok(())
    }

    pub fn position(&self, value: &JsonicValue) -> Option<usize> {
        self.index
            .get(&fingerprint(value))?
            .iter()
            .copied()
            .find(|&i| self.items.get(i) == Some(value))
    }

    pub fn contains(&self, value: &JsonicValue) -> bool {
        self.position(value).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JsonicValue> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<JsonicValue> {
        self.items
    }
}

impl fmt::Debug for JsonicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.items).finish()
    }
}

impl PartialEq for JsonicSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|item| other.contains(item))
    }
}

impl<'a> IntoIterator for &'a JsonicSet {
    type Item = &'a JsonicValue;
    type IntoIter = std::slice::Iter<'a, JsonicValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<JsonicValue> for JsonicSet {
    /// Collects distinct items; later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = JsonicValue>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            let _ = set.insert(item);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_prior_index() {
        let mut set = JsonicSet::new();
        assert_eq!(set.insert(JsonicValue::Int(1)), Ok(()));
        assert_eq!(set.insert(JsonicValue::Int(2)), Ok(()));
        assert_eq!(set.insert(JsonicValue::Int(2)), Err(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: JsonicSet = [1, 2, 3].into_iter().map(JsonicValue::Int).collect();
        let b: JsonicSet = [3, 1, 2].into_iter().map(JsonicValue::Int).collect();
        let c: JsonicSet = [1, 2].into_iter().map(JsonicValue::Int).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_large_set_keeps_positions() {
        let mut set: JsonicSet = (0..50_000).map(JsonicValue::Int).collect();
        assert_eq!(set.len(), 50_000);
        assert_eq!(set.position(&JsonicValue::Int(49_999)), Some(49_999));
        assert_eq!(set.insert(JsonicValue::Int(12_345)), Err(12_345));
        assert!(!set.contains(&JsonicValue::Int(50_000)));
    }

    #[test]
    fn test_nan_is_never_a_duplicate() {
        let mut set = JsonicSet::new();
        assert_eq!(set.insert(JsonicValue::Float(f64::NAN)), Ok(()));
        assert_eq!(set.insert(JsonicValue::Float(f64::NAN)), Ok(()));
        assert_eq!(set.len(), 2);
    }
}
