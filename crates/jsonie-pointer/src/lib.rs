//! Immutable paths into decoded JSON values.
//!
//! A [`JsonPointer`] is an ordered sequence of [`PathComponent`]s (object keys or
//! integer positions). Descending into a structure never mutates a pointer;
//! [`JsonPointer::append`] returns a new one.
//!
//! Unlike RFC 6901 pointers, components are not escaped: rendering joins the
//! raw components with `/`, and parsing turns every integer literal back into
//! an integer component.
//!
//! # Example
//!
//! ```
//! use jsonie_pointer::JsonPointer;
//!
//! let pointer = JsonPointer::parse("/a/b/0");
//! assert_eq!(pointer.to_string(), "/a/b/0");
//!
//! let built = JsonPointer::root().append("a").append(0usize);
//! assert_eq!(built.to_string(), "/a/0");
//!
//! let doc = serde_json::json!({"a": [10, 20]});
//! assert_eq!(built.get(&doc), Some(&serde_json::json!(10)));
//! ```

use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod types;
pub use types::PathComponent;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("NO_PARENT")]
    NoParent,
}

/// An immutable location inside a JSON value tree.
///
/// Equality and hashing are structural over the component sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPointer {
    path: Vec<PathComponent>,
}

impl JsonPointer {
    /// The empty pointer, addressing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_components<I, C>(components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<PathComponent>,
    {
        Self {
            path: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a slash-separated pointer.
    ///
    /// A leading `/` and a single trailing `/` are ignored, and each remaining
    /// segment that is an integer literal becomes an integer component.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonie_pointer::{JsonPointer, PathComponent};
    ///
    /// assert!(JsonPointer::parse("").is_root());
    /// assert!(JsonPointer::parse("/").is_root());
    /// assert_eq!(
    ///     JsonPointer::parse("/a/1/").components(),
    ///     &[PathComponent::Key("a".into()), PathComponent::Index(1)]
    /// );
    /// assert_eq!(JsonPointer::parse("a/b"), JsonPointer::parse("/a/b"));
    /// ```
    pub fn parse(pointer: &str) -> Self {
        let mut segments: Vec<&str> = pointer.split('/').collect();
        if segments.first() == Some(&"") {
            segments.remove(0);
        }
        if segments.last() == Some(&"") {
            segments.pop();
        }
        Self::from_components(segments)
    }

    /// Return a new pointer with `component` appended. `self` is left untouched.
    pub fn append(&self, component: impl Into<PathComponent>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(component.into());
        Self { path }
    }

    /// Return a new pointer with every component of `other` appended.
    pub fn join(&self, other: &JsonPointer) -> Self {
        let mut path = self.path.clone();
        path.extend_from_slice(&other.path);
        Self { path }
    }

    /// Render as `/` followed by the components joined with `/`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.path
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathComponent> {
        self.path.iter()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Check if the pointer addresses the root value.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn last(&self) -> Option<&PathComponent> {
        self.path.last()
    }

    /// Get the pointer of the containing value.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::NoParent`] for the root pointer.
    pub fn parent(&self) -> Result<JsonPointer, PointerError> {
        match self.path.split_last() {
            Some((_, init)) => Ok(Self {
                path: init.to_vec(),
            }),
            None => Err(PointerError::NoParent),
        }
    }

    /// Check if `self` is a strict prefix of `other`.
    pub fn is_parent_of(&self, other: &JsonPointer) -> bool {
        self.path.len() < other.path.len() && other.path.starts_with(&self.path)
    }

    /// Look the pointer up inside a decoded document.
    ///
    /// Integer components index arrays (negative positions count from the
    /// end) and also match object keys spelled the same way; key components
    /// only index objects.
    pub fn get<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        let mut current = doc;
        for component in &self.path {
            current = match (current, component) {
                (Value::Array(arr), PathComponent::Index(i)) => {
                    let idx = if *i < 0 {
                        let back = usize::try_from(i.unsigned_abs()).ok()?;
                        arr.len().checked_sub(back)?
                    } else {
                        usize::try_from(*i).ok()?
                    };
                    arr.get(idx)?
                }
                (Value::Object(map), PathComponent::Index(i)) => map.get(&i.to_string())?,
                (Value::Object(map), PathComponent::Key(k)) => map.get(k)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return f.write_str("/");
        }
        for component in &self.path {
            write!(f, "/{component}")?;
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for JsonPointer {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Vec<PathComponent>> for JsonPointer {
    fn from(path: Vec<PathComponent>) -> Self {
        Self { path }
    }
}

impl<'a> IntoIterator for &'a JsonPointer {
    type Item = &'a PathComponent;
    type IntoIter = std::slice::Iter<'a, PathComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.iter()
    }
}
