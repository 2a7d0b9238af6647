use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Row labels attached to a Series
///
/// Labels are informational only; every operation in this crate addresses
/// rows by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Index<T>
where
    T: Debug + Clone + Eq + Hash + Display,
{
    values: Vec<T>,

    /// label -> position
    map: HashMap<T, usize>,

    name: Option<String>,
}

impl<T> Index<T>
where
    T: Debug + Clone + Eq + Hash + Display,
{
    pub fn new(values: Vec<T>) -> Result<Self> {
        Self::with_name(values, None)
    }

    pub fn with_name(values: Vec<T>, name: Option<String>) -> Result<Self> {
        let mut map = HashMap::with_capacity(values.len());

        for (i, value) in values.iter().enumerate() {
            if map.insert(value.clone(), i).is_some() {
                return Err(Error::Config(format!(
                    "index label '{}' is duplicated",
                    value
                )));
            }
        }

        Ok(Index { values, map, name })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of a label
    pub fn get_loc(&self, key: &T) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Label at a position
    pub fn get_value(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Labels at the given positions, in that order
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        let mut values = Vec::with_capacity(positions.len());
        for &pos in positions {
            let label = self.values.get(pos).ok_or(Error::IndexOutOfBounds {
                index: pos,
                size: self.values.len(),
            })?;
            values.push(label.clone());
        }

        // Repeated positions repeat labels; lookups resolve to the first copy
        let mut map = HashMap::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            map.entry(value.clone()).or_insert(i);
        }

        Ok(Index {
            values,
            map,
            name: self.name.clone(),
        })
    }
}

/// String index alias
pub type StringIndex = Index<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup() {
        let idx = StringIndex::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.get_loc(&"b".to_string()), Some(1));
        assert_eq!(idx.get_value(2).map(String::as_str), Some("c"));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let result = StringIndex::new(vec!["a".into(), "a".into()]);
        assert!(result.unwrap_err().is_config_error());
    }

    #[test]
    fn test_take_preserves_name() {
        let idx = StringIndex::with_name(
            vec!["x".into(), "y".into(), "z".into()],
            Some("label".into()),
        )
        .unwrap();
        let taken = idx.take(&[2, 0]).unwrap();
        assert_eq!(taken.values(), &["z".to_string(), "x".to_string()]);
        assert_eq!(taken.name().map(String::as_str), Some("label"));
        assert!(idx.take(&[5]).is_err());
    }

    #[test]
    fn test_take_repeated_positions() {
        let idx = StringIndex::new(vec!["a".into(), "b".into()]).unwrap();
        let taken = idx.take(&[1, 0, 1]).unwrap();
        assert_eq!(
            taken.values(),
            &["b".to_string(), "a".to_string(), "b".to_string()]
        );
        assert_eq!(taken.get_loc(&"b".to_string()), Some(0));
        assert_eq!(taken.get_loc(&"a".to_string()), Some(1));
    }
}
