use crate::Kind;
use std::borrow::Cow;
use thiserror::Error;

/// Reasons a URL fails to match a [`Template`](crate::Template).
///
/// None of these are exceptional: a recognizer treats every variant as
/// "try the next template".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The URL had a different number of segments than the template has
    /// path parts.
    #[error("expected {expected} path segments, found {found}")]
    PathArityMismatch { expected: usize, found: usize },
    /// A literal part did not equal its segment.
    #[error("expected literal segment {expected:?}, found {found:?}")]
    LiteralMismatch {
        expected: Cow<'static, str>,
        found: String,
    },
    /// A capture segment could not be parsed as its declared kind.
    #[error("path segment {segment:?} for {name} is not a valid {kind}")]
    PathTypeMismatch {
        name: Cow<'static, str>,
        kind: Kind,
        segment: String,
    },
    /// The template declares no query parameters, but the URL has a query.
    #[error("template declares no query parameters, but URL has a query")]
    UnexpectedQueryString,
    /// A required query parameter was absent.
    #[error("missing required query parameter {0}")]
    MissingRequiredQueryParameter(Cow<'static, str>),
    /// A required query parameter could not be parsed as its declared kind.
    #[error("query parameter {name}={value:?} is not a valid {kind}")]
    QueryParameterTypeMismatch {
        name: Cow<'static, str>,
        kind: Kind,
        value: String,
    },
    /// No registered template matched the URL.
    #[error("no template matched the URL")]
    NoTemplateMatched,
}

/// Errors that can occur in [`Template::build_url`](crate::Template::build_url).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("no value supplied for path capture {0}")]
    MissingPathValue(Cow<'static, str>),
    #[error("no value supplied for required query parameter {0}")]
    MissingRequiredQueryValue(Cow<'static, str>),
    #[error("built string {url:?} is not a valid URL")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The URL parser rewrote the first segment, which is the URL's host, so
    /// the built URL would no longer match its template.
    #[error("host {host:?} was normalized to {normalized:?} in {url:?}")]
    HostNormalized {
        url: String,
        host: String,
        normalized: String,
    },
}

/// Errors that can occur while parsing a template pattern, or while
/// assembling a set of query parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("consecutive '/' is not allowed in {0:?}")]
    EmptySegment(String),
    #[error("invalid segment: {0}")]
    InvalidSegment(String),
    #[error("unknown value kind: {0}")]
    UnknownKind(String),
    #[error("capture or parameter name is empty in {0:?}")]
    EmptyParameterName(String),
    #[error("query parameter {0} is declared more than once")]
    DuplicateQueryParameter(Cow<'static, str>),
}

/// Errors that can occur while reading typed values out of a
/// [`ValueBag`](crate::ValueBag), using [`FromValue`](crate::FromValue).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A value was missing from the bag.
    #[error("could not find value {0}")]
    Missing(String),
    /// The bag holds a different kind than the caller asked for.
    #[error("value {name} is a {found}, expected {expected}")]
    KindMismatch {
        name: String,
        expected: Kind,
        found: Kind,
    },
}
