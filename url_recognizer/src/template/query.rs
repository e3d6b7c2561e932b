use crate::{error::TemplateError, Kind};
use std::{borrow::Cow, fmt};

/// A named, typed key expected in a URL's query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParameter {
    pub(crate) name: Cow<'static, str>,
    pub(crate) kind: Kind,
    pub(crate) required: bool,
}

impl QueryParameter {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        kind: Kind,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
        }
    }

    pub fn required(name: impl Into<Cow<'static, str>>, kind: Kind) -> Self {
        Self::new(name, kind, true)
    }

    pub fn optional(name: impl Into<Cow<'static, str>>, kind: Kind) -> Self {
        Self::new(name, kind, false)
    }

    pub fn required_int(name: impl Into<Cow<'static, str>>) -> Self {
        Self::required(name, Kind::Int)
    }

    pub fn required_double(name: impl Into<Cow<'static, str>>) -> Self {
        Self::required(name, Kind::Double)
    }

    pub fn required_bool(name: impl Into<Cow<'static, str>>) -> Self {
        Self::required(name, Kind::Bool)
    }

    pub fn required_string(name: impl Into<Cow<'static, str>>) -> Self {
        Self::required(name, Kind::String)
    }

    pub fn optional_int(name: impl Into<Cow<'static, str>>) -> Self {
        Self::optional(name, Kind::Int)
    }

    pub fn optional_double(name: impl Into<Cow<'static, str>>) -> Self {
        Self::optional(name, Kind::Double)
    }

    pub fn optional_bool(name: impl Into<Cow<'static, str>>) -> Self {
        Self::optional(name, Kind::Bool)
    }

    pub fn optional_string(name: impl Into<Cow<'static, str>>) -> Self {
        Self::optional(name, Kind::String)
    }

    /// The parameter's identity within a [`QueryParameters`] set.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl fmt::Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.kind != Kind::String {
            write!(f, "<{}>", self.kind)?;
        }
        if !self.required {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// A set of [`QueryParameter`]s, keyed by name alone.
///
/// Two parameters with the same name collide regardless of kind or
/// requiredness. [`insert`](Self::insert) and [`FromIterator`] keep the last
/// one; use [`try_from_iter`](Self::try_from_iter) to reject duplicates
/// instead.
#[derive(Debug, Default, Clone)]
pub struct QueryParameters(Vec<QueryParameter>);

// Sets compare without regard to declaration order.
impl PartialEq for QueryParameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|p| other.get(p.name()) == Some(p))
    }
}

impl Eq for QueryParameters {}

impl QueryParameters {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects parameters, failing if any name appears more than once.
    pub fn try_from_iter(
        iter: impl IntoIterator<Item = QueryParameter>,
    ) -> Result<Self, TemplateError> {
        let mut set = Self::new();
        for param in iter {
            if set.contains(param.name()) {
                return Err(TemplateError::DuplicateQueryParameter(
                    param.name,
                ));
            }
            set.0.push(param);
        }
        Ok(set)
    }

    /// Adds a parameter, replacing and returning any parameter with the same
    /// name. The replacement keeps the original position.
    pub fn insert(&mut self, param: QueryParameter) -> Option<QueryParameter> {
        match self.0.iter_mut().find(|p| p.name() == param.name()) {
            Some(prev) => Some(std::mem::replace(prev, param)),
            None => {
                self.0.push(param);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&QueryParameter> {
        self.0.iter().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryParameter> {
        self.0.iter()
    }

    pub fn required(&self) -> impl Iterator<Item = &QueryParameter> {
        self.0.iter().filter(|p| p.required)
    }

    pub fn optional(&self) -> impl Iterator<Item = &QueryParameter> {
        self.0.iter().filter(|p| !p.required)
    }
}

impl FromIterator<QueryParameter> for QueryParameters {
    fn from_iter<T: IntoIterator<Item = QueryParameter>>(iter: T) -> Self {
        let mut set = Self::new();
        for param in iter {
            set.insert(param);
        }
        set
    }
}

impl<const N: usize> From<[QueryParameter; N]> for QueryParameters {
    fn from(params: [QueryParameter; N]) -> Self {
        params.into_iter().collect()
    }
}
