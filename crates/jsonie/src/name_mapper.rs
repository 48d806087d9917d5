//! Field name mapping between internal member names and external keys.

use heck::{ToLowerCamelCase, ToSnakeCase};

use crate::type_def::TypeNode;

/// Translates member names of a descriptor.
///
/// `reverse_resolve` maps an internal member name to the external key to read
/// from the input; `resolve` maps an external key to the internal name to
/// produce. Returning `None` means "no such key": the member is skipped or the
/// mapping entry dropped.
pub trait NameMapper: Send + Sync {
    fn resolve(&self, type_: &TypeNode, name: &str) -> Option<String>;
    fn reverse_resolve(&self, type_: &TypeNode, name: &str) -> Option<String>;
}

/// Returns names unchanged in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNameMapper;

impl NameMapper for IdentityNameMapper {
    fn resolve(&self, _type_: &TypeNode, name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn reverse_resolve(&self, _type_: &TypeNode, name: &str) -> Option<String> {
        Some(name.to_string())
    }
}

/// Internal `snake_case` members read from external `lowerCamelCase` keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseNameMapper;

impl NameMapper for CamelCaseNameMapper {
    fn resolve(&self, _type_: &TypeNode, name: &str) -> Option<String> {
        Some(name.to_snake_case())
    }

    fn reverse_resolve(&self, _type_: &TypeNode, name: &str) -> Option<String> {
        Some(name.to_lower_camel_case())
    }
}

/// Closure-backed mapper.
pub struct NameMapperFn<R, V> {
    resolve: R,
    reverse_resolve: V,
}

impl<R, V> NameMapperFn<R, V>
where
    R: Fn(&TypeNode, &str) -> Option<String> + Send + Sync,
    V: Fn(&TypeNode, &str) -> Option<String> + Send + Sync,
{
    pub fn new(resolve: R, reverse_resolve: V) -> Self {
        Self {
            resolve,
            reverse_resolve,
        }
    }
}

impl<R, V> NameMapper for NameMapperFn<R, V>
where
    R: Fn(&TypeNode, &str) -> Option<String> + Send + Sync,
    V: Fn(&TypeNode, &str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, type_: &TypeNode, name: &str) -> Option<String> {
        (self.resolve)(type_, name)
    }

    fn reverse_resolve(&self, type_: &TypeNode, name: &str) -> Option<String> {
        (self.reverse_resolve)(type_, name)
    }
}

/// What a registered mapper applies to. Lookup tries the exact type first,
/// then `AnyRecord` for record-like descriptors, then `AnyType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapperScope {
    /// Descriptor whose `type_id()` equals the given string.
    Type(String),
    AnyRecord,
    AnyType,
}

impl MapperScope {
    pub fn type_(type_: &TypeNode) -> Self {
        Self::Type(type_.type_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_def::TypeBuilder;

    #[test]
    fn test_camel_case_round_trip() {
        let node = TypeBuilder::new().any();
        let mapper = CamelCaseNameMapper;
        assert_eq!(mapper.reverse_resolve(&node, "first_name"), Some("firstName".into()));
        assert_eq!(mapper.resolve(&node, "firstName"), Some("first_name".into()));
    }

    #[test]
    fn test_closure_mapper_can_hide_members() {
        let node = TypeBuilder::new().any();
        let mapper = NameMapperFn::new(
            |_: &TypeNode, name: &str| Some(name.to_uppercase()),
            |_: &TypeNode, name: &str| (name != "secret").then(|| name.to_string()),
        );
        assert_eq!(mapper.resolve(&node, "a"), Some("A".into()));
        assert_eq!(mapper.reverse_resolve(&node, "secret"), None);
    }
}
