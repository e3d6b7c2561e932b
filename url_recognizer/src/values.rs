use crate::{error::ValueError, FromValue, Value};
use std::borrow::Cow;

// Implemented with a `Vec`, as `n` is small enough that O(n) iteration
// over a vectorized map is (*probably*) more space- and time-efficient
// than hashing. It also keeps insertion order, which `build_url` relies on.
type ValuesInner = Vec<(Cow<'static, str>, Value)>;

/// An insertion-ordered map of names to typed [`Value`]s.
///
/// Order is kept for iteration, but two maps with the same entries compare
/// equal regardless of order.
#[derive(Debug, Default, Clone)]
pub struct Values(ValuesInner);

impl PartialEq for Values {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Values {
    /// Creates an empty map.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with the given capacity.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Inserts a value, replacing any existing value for that key in place.
    pub fn insert(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(prev) = self.0.iter_mut().find(|(k, _)| k == &key) {
            Some(std::mem::replace(&mut prev.1, value))
        } else {
            self.0.push((key, value));
            None
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|(k, v)| if k == key { Some(v) } else { None })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Reads a value as a concrete type.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<T, ValueError> {
        T::from_value(self.get(key), key)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for Values {
    type Item = (Cow<'static, str>, Value);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The typed result of successfully matching a URL against a
/// [`Template`](crate::Template).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueBag {
    /// One entry per capture in the template's path.
    pub path: Values,
    /// Required query parameters, plus any optional ones that were present
    /// and well-typed.
    pub query: Values,
    /// The URL's fragment, verbatim.
    pub fragment: Option<String>,
}

/// Constructs a typed object from a [`ValueBag`]. `Self` should typically be
/// a struct in which each field's type implements [`FromValue`].
pub trait FromValueBag
where
    Self: Sized,
{
    /// Attempts to read the bag into the given type.
    fn from_bag(bag: &ValueBag) -> Result<Self, ValueError>;
}

impl FromValueBag for () {
    #[inline(always)]
    fn from_bag(_bag: &ValueBag) -> Result<Self, ValueError> {
        Ok(())
    }
}

impl FromValueBag for ValueBag {
    fn from_bag(bag: &ValueBag) -> Result<Self, ValueError> {
        Ok(bag.clone())
    }
}
