//! Path component type.

use std::fmt;

/// A single step in a [`JsonPointer`](crate::JsonPointer).
///
/// Can be either an object key or an integer (array or tuple position).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathComponent {
    Index(i64),
    Key(String),
}

impl PathComponent {
    /// Build a component from text, turning integer literals into [`PathComponent::Index`].
    ///
    /// # Example
    ///
    /// ```
    /// use jsonie_pointer::PathComponent;
    ///
    /// assert_eq!(PathComponent::parse("12"), PathComponent::Index(12));
    /// assert_eq!(PathComponent::parse("-3"), PathComponent::Index(-3));
    /// assert_eq!(PathComponent::parse("foo"), PathComponent::Key("foo".to_string()));
    /// ```
    pub fn parse(text: &str) -> Self {
        match text.parse::<i64>() {
            Ok(i) => Self::Index(i),
            Err(_) => Self::Key(text.to_string()),
        }
    }

    pub fn as_index(&self) -> Option<i64> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            Self::Index(_) => None,
        }
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl From<&str> for PathComponent {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for PathComponent {
    fn from(text: String) -> Self {
        match text.parse::<i64>() {
            Ok(i) => Self::Index(i),
            Err(_) => Self::Key(text),
        }
    }
}

impl From<&String> for PathComponent {
    fn from(text: &String) -> Self {
        Self::parse(text)
    }
}

impl From<i64> for PathComponent {
    fn from(i: i64) -> Self {
        Self::Index(i)
    }
}

impl From<usize> for PathComponent {
    fn from(i: usize) -> Self {
        // Positions beyond i64::MAX cannot come from an in-memory sequence.
        Self::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}
