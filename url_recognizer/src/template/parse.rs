use super::{PathPart, QueryParameter, QueryParameters, Template};
use crate::{error::TemplateError, Kind};
use std::{str::FromStr, sync::Arc};

const RFC3986_UNRESERVED: [char; 4] = ['-', '.', '_', '~'];
const RFC3986_PCHAR_OTHER: [char; 1] = ['@'];

/// Parses a template pattern of the form
/// `segment/segment/...?param&param...`.
///
/// - `:name` captures a string, `:name<kind>` captures the given kind
///   (`int`, `double`, `bool` or `string`); anything else is a literal.
/// - Query parameters use the same `name<kind>` form and are required unless
///   followed by `?`.
impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let (path, query) = match pattern.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (pattern, None),
        };

        if path.contains("//") {
            return Err(TemplateError::EmptySegment(pattern.to_string()));
        }
        let path = path.trim_start_matches('/').trim_end_matches('/');
        let parts: Arc<[PathPart]> = if path.is_empty() {
            Arc::from([])
        } else {
            path.split('/')
                .map(parse_segment)
                .collect::<Result<Arc<[PathPart]>, _>>()?
        };

        let query = match query {
            None => QueryParameters::new(),
            Some(query) => QueryParameters::try_from_iter(
                query
                    .split('&')
                    .map(parse_query_parameter)
                    .collect::<Result<Vec<_>, _>>()?,
            )?,
        };

        Ok(Template { parts, query })
    }
}

fn parse_segment(segment: &str) -> Result<PathPart, TemplateError> {
    if let Some(capture) = segment.strip_prefix(':') {
        let (name, kind) = parse_typed_name(capture, segment)?;
        Ok(PathPart::Capture {
            name: name.to_string().into(),
            kind,
        })
    } else if is_valid(segment) {
        Ok(PathPart::Literal(segment.to_string().into()))
    } else {
        Err(TemplateError::InvalidSegment(segment.to_string()))
    }
}

fn parse_query_parameter(
    param: &str,
) -> Result<QueryParameter, TemplateError> {
    let (typed, required) = match param.strip_suffix('?') {
        Some(typed) => (typed, false),
        None => (param, true),
    };
    let (name, kind) = parse_typed_name(typed, param)?;
    Ok(QueryParameter::new(name.to_string(), kind, required))
}

/// Splits `name<kind>` into its parts; a bare `name` is a string.
fn parse_typed_name<'a>(
    input: &'a str,
    source: &str,
) -> Result<(&'a str, Kind), TemplateError> {
    let (name, kind) = match input.strip_suffix('>') {
        Some(rest) => match rest.split_once('<') {
            Some((name, kind)) => (name, kind.parse()?),
            None => {
                return Err(TemplateError::InvalidSegment(source.to_string()))
            }
        },
        None => (input, Kind::String),
    };
    if name.is_empty() {
        return Err(TemplateError::EmptyParameterName(source.to_string()));
    }
    if !is_valid(name) {
        return Err(TemplateError::InvalidSegment(source.to_string()));
    }
    Ok((name, kind))
}

fn is_valid(segment: &str) -> bool {
    !segment.is_empty()
        && segment.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || RFC3986_UNRESERVED.contains(&c)
                || RFC3986_PCHAR_OTHER.contains(&c)
        })
}

impl Template {
    /// Checks that [`Display`](std::fmt::Display) renders this template as a
    /// pattern that parses back to the same template.
    ///
    /// The builders accept any literal or name, but the pattern grammar does
    /// not: a literal `:id` would read back as a capture, and `a b` would not
    /// read back at all.
    pub fn check_pattern(&self) -> Result<(), TemplateError> {
        if let Some(part) =
            self.parts.iter().find(|part| !is_valid(part.as_raw_str()))
        {
            return Err(TemplateError::InvalidSegment(part.to_string()));
        }
        match self.query.iter().find(|param| !is_valid(param.name())) {
            Some(param) => {
                Err(TemplateError::InvalidSegment(param.to_string()))
            }
            None => Ok(()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Template {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.check_pattern().map_err(serde::ser::Error::custom)?;
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Template {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let pattern = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        pattern.parse().map_err(serde::de::Error::custom)
    }
}
