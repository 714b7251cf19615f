use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Type-safe identifier wrapper around the backend's integer keys. The phantom
/// type parameter `T` prevents mixing IDs from different entity types (e.g.,
/// Person ID vs Meeting ID).
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub value: i64,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Parse from user input such as `42`.
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self::new(s.trim().parse()?))
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    #[test]
    fn ids_with_same_value_are_equal() {
        assert_eq!(Id::<Foo>::new(7), Id::<Foo>::new(7));
        assert_ne!(Id::<Foo>::new(7), Id::<Foo>::new(8));
    }

    #[test]
    fn parse_trims_input() {
        assert_eq!(Id::<Foo>::parse(" 42 ").unwrap(), Id::new(42));
        assert!(Id::<Foo>::parse("abc").is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = Id::<Foo>::new(15);
        assert_eq!(serde_json::to_string(&id).unwrap(), "15");
        let back: Id<Foo> = serde_json::from_str("15").unwrap();
        assert_eq!(back, id);
    }
}
