use crate::Kind;
use std::{borrow::Cow, fmt, iter, sync::Arc};

mod build;
mod parse;
mod path_part;
mod query;
pub use path_part::*;
pub use query::*;

/// A declarative description of a URL's expected shape: an ordered sequence
/// of [`PathPart`]s and an unordered set of [`QueryParameter`]s.
///
/// Templates are immutable. Every builder method leaves `self` untouched and
/// returns a new template, so one template can be used as the base of
/// several others.
///
/// If the URL has a host, it counts as the first path segment. A template for
/// `https://example.com/users/42` is therefore
///
/// ```rust
/// use url_recognizer::{QueryParameter, Template};
///
/// let users = Template::empty()
///     .term("example.com")
///     .term("users")
///     .int("id")
///     .with_query_parameters([QueryParameter::optional_string("tab")]);
///
/// // or, from a pattern
/// let parsed = "example.com/users/:id<int>?tab?".parse::<Template>()?;
/// assert_eq!(users, parsed);
/// # Ok::<(), url_recognizer::TemplateError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    parts: Arc<[PathPart]>,
    query: QueryParameters,
}

impl Template {
    /// A template with no path parts and no query parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a literal segment.
    pub fn term(&self, symbol: impl Into<Cow<'static, str>>) -> Self {
        self.append(PathPart::Literal(symbol.into()))
    }

    /// Appends a typed capture.
    pub fn capture(
        &self,
        name: impl Into<Cow<'static, str>>,
        kind: Kind,
    ) -> Self {
        self.append(PathPart::Capture {
            name: name.into(),
            kind,
        })
    }

    pub fn string(&self, name: impl Into<Cow<'static, str>>) -> Self {
        self.capture(name, Kind::String)
    }

    pub fn int(&self, name: impl Into<Cow<'static, str>>) -> Self {
        self.capture(name, Kind::Int)
    }

    pub fn double(&self, name: impl Into<Cow<'static, str>>) -> Self {
        self.capture(name, Kind::Double)
    }

    pub fn bool(&self, name: impl Into<Cow<'static, str>>) -> Self {
        self.capture(name, Kind::Bool)
    }

    /// Replaces the query parameter set wholesale. Path parts are kept.
    pub fn with_query_parameters(
        &self,
        params: impl Into<QueryParameters>,
    ) -> Self {
        Self {
            parts: Arc::clone(&self.parts),
            query: params.into(),
        }
    }

    pub fn path_parts(&self) -> &[PathPart] {
        &self.parts
    }

    pub fn query_parameters(&self) -> &QueryParameters {
        &self.query
    }

    fn append(&self, part: PathPart) -> Self {
        Self {
            parts: self.parts.iter().cloned().chain(iter::once(part)).collect(),
            query: self.query.clone(),
        }
    }
}

/// Renders the template as a pattern string.
///
/// The result parses back to the same template only when
/// [`check_pattern`](Template::check_pattern) succeeds.
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, part) in self.parts.iter().enumerate() {
            if idx > 0 {
                f.write_str("/")?;
            }
            write!(f, "{part}")?;
        }
        for (idx, param) in self.query.iter().enumerate() {
            f.write_str(if idx == 0 { "?" } else { "&" })?;
            write!(f, "{param}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_do_not_mutate_the_base() {
        let base = Template::empty().term("users");
        let by_id = base.int("id");
        let by_name = base.string("name");
        assert_eq!(base.path_parts().len(), 1);
        assert_eq!(by_id.path_parts().len(), 2);
        assert_eq!(
            by_name.path_parts()[1],
            PathPart::Capture {
                name: "name".into(),
                kind: Kind::String
            }
        );
    }

    #[test]
    fn with_query_parameters_replaces_the_set() {
        let first = Template::empty()
            .term("search")
            .with_query_parameters([QueryParameter::required_string("q")]);
        let second =
            first.with_query_parameters([QueryParameter::optional_int("page")]);
        assert!(first.query_parameters().contains("q"));
        assert!(!second.query_parameters().contains("q"));
        assert!(second.query_parameters().contains("page"));
        assert_eq!(first.path_parts(), second.path_parts());
    }

    #[test]
    fn structurally_identical_templates_are_equal() {
        let a = Template::empty()
            .term("a")
            .bool("flag")
            .with_query_parameters([
                QueryParameter::required_int("x"),
                QueryParameter::optional_double("y"),
            ]);
        let b = Template::empty()
            .term("a")
            .bool("flag")
            .with_query_parameters([
                QueryParameter::optional_double("y"),
                QueryParameter::required_int("x"),
            ]);
        assert_eq!(a, b);
    }

    #[test]
    fn displays_as_pattern() {
        let template = Template::empty()
            .term("x")
            .term("users")
            .int("id")
            .string("slug")
            .with_query_parameters([
                QueryParameter::required_bool("draft"),
                QueryParameter::optional_string("tab"),
            ]);
        assert_eq!(
            template.to_string(),
            "x/users/:id<int>/:slug?draft<bool>&tab?"
        );
    }
}
