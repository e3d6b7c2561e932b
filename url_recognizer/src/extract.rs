use crate::{
    error::MatchError, PathPart, QueryParameters, Template, Value, ValueBag,
    Values,
};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// The parts of a parsed URL that matching looks at.
///
/// Implemented for [`url::Url`]; implement it for another URL type to match
/// against it directly.
pub trait UrlParts {
    /// The host, if any. It is treated as the first path segment.
    fn host(&self) -> Option<&str>;

    /// The path, with segments separated by `/`.
    fn path(&self) -> &str;

    /// The raw query string, without the leading `?`. A URL ending in a bare
    /// `?` has `Some("")`, which is distinct from `None`.
    fn query(&self) -> Option<&str>;

    /// The raw fragment, without the leading `#`.
    fn fragment(&self) -> Option<&str>;
}

impl UrlParts for url::Url {
    fn host(&self) -> Option<&str> {
        self.host_str()
    }

    fn path(&self) -> &str {
        url::Url::path(self)
    }

    fn query(&self) -> Option<&str> {
        url::Url::query(self)
    }

    fn fragment(&self) -> Option<&str> {
        url::Url::fragment(self)
    }
}

/// Matches `url` against `template`, returning the extracted values.
///
/// See [`try_extract`] for the reason a match failed.
pub fn extract(template: &Template, url: &impl UrlParts) -> Option<ValueBag> {
    try_extract(template, url).ok()
}

/// Matches `url` against `template`, returning the extracted values or the
/// first reason the URL does not fit.
///
/// Path and query are checked independently and both must succeed. The
/// fragment is passed through unchanged.
pub fn try_extract(
    template: &Template,
    url: &impl UrlParts,
) -> Result<ValueBag, MatchError> {
    let path = extract_path(template.path_parts(), url)?;
    let query = extract_query(template.query_parameters(), url.query())?;
    Ok(ValueBag {
        path,
        query,
        fragment: url.fragment().map(str::to_string),
    })
}

fn extract_path(
    parts: &[PathPart],
    url: &impl UrlParts,
) -> Result<Values, MatchError> {
    let segments = segments(url);
    if segments.len() != parts.len() {
        return Err(MatchError::PathArityMismatch {
            expected: parts.len(),
            found: segments.len(),
        });
    }

    let mut values = Values::with_capacity(parts.len());
    for (part, segment) in parts.iter().zip(segments) {
        match part {
            PathPart::Literal(symbol) => {
                if *symbol != segment {
                    return Err(MatchError::LiteralMismatch {
                        expected: symbol.clone(),
                        found: segment.into_owned(),
                    });
                }
            }
            PathPart::Capture { name, kind } => {
                let value = Value::parse(*kind, &segment).ok_or_else(|| {
                    MatchError::PathTypeMismatch {
                        name: name.clone(),
                        kind: *kind,
                        segment: segment.to_string(),
                    }
                })?;
                values.insert(name.clone(), value);
            }
        }
    }
    Ok(values)
}

/// The host (if any) followed by the non-empty path segments, each
/// percent-decoded. A segment that does not decode to UTF-8 becomes empty.
fn segments(url: &impl UrlParts) -> Vec<Cow<'_, str>> {
    url.host()
        .into_iter()
        .chain(url.path().split('/'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .unwrap_or_default()
        })
        .collect()
}

fn extract_query(
    params: &QueryParameters,
    query: Option<&str>,
) -> Result<Values, MatchError> {
    if params.is_empty() {
        return match query {
            None => Ok(Values::new()),
            Some(_) => Err(MatchError::UnexpectedQueryString),
        };
    }

    let Some(query) = query else {
        return match params.required().next() {
            None => Ok(Values::new()),
            Some(param) => Err(MatchError::MissingRequiredQueryParameter(
                param.name.clone(),
            )),
        };
    };

    let pairs = parse_query_string(query);
    let mut values = Values::with_capacity(params.len());
    for param in params.iter() {
        let raw = lookup(&pairs, param.name());
        let value = raw.and_then(|raw| Value::parse(param.kind, raw));
        match (value, raw) {
            (Some(value), _) => {
                values.insert(param.name.clone(), value);
            }
            (None, _) if !param.required => {}
            (None, None) => {
                return Err(MatchError::MissingRequiredQueryParameter(
                    param.name.clone(),
                ))
            }
            (None, Some(raw)) => {
                return Err(MatchError::QueryParameterTypeMismatch {
                    name: param.name.clone(),
                    kind: param.kind,
                    value: raw.to_string(),
                })
            }
        }
    }
    Ok(values)
}

/// Splits a raw query string into `(name, value)` pairs.
///
/// Only pairs with exactly one `=` and a non-empty name and value are kept;
/// anything else is dropped. Names and values are not percent-decoded.
///
/// ```rust
/// use url_recognizer::parse_query_string;
///
/// assert_eq!(parse_query_string("a=1&bad&c=3"), [("a", "1"), ("c", "3")]);
/// ```
pub fn parse_query_string(query: &str) -> Vec<(&str, &str)> {
    query
        .split('&')
        .filter_map(|pair| {
            let mut split = pair.split('=');
            match (split.next(), split.next(), split.next()) {
                (Some(name), Some(value), None)
                    if !name.is_empty() && !value.is_empty() =>
                {
                    Some((name, value))
                }
                _ => None,
            }
        })
        .collect()
}

// on duplicate names, the last pair wins
fn lookup<'a>(pairs: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find_map(|(k, v)| (*k == name).then_some(*v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Kind, QueryParameter};
    use url::Url;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn users() -> Template {
        Template::empty()
            .term("x")
            .term("users")
            .int("id")
            .with_query_parameters([QueryParameter::optional_string("tab")])
    }

    #[test]
    fn host_is_the_first_segment() {
        let bag = extract(&users(), &url("https://x/users/42?tab=profile"))
            .expect("should match");
        assert_eq!(bag.path, Values::new().with("id", 42));
        assert_eq!(bag.query, Values::new().with("tab", "profile"));
        assert_eq!(bag.fragment, None);
    }

    #[test]
    fn custom_scheme_host_is_a_segment() {
        let template = Template::empty().term("users").int("id");
        let bag = extract(&template, &url("myapp://users/7")).unwrap();
        assert_eq!(bag.path.get("id"), Some(&Value::Int(7)));
    }

    #[test]
    fn type_mismatch_fails() {
        assert_eq!(
            try_extract(&users(), &url("https://x/users/abc")),
            Err(MatchError::PathTypeMismatch {
                name: "id".into(),
                kind: Kind::Int,
                segment: "abc".into(),
            })
        );
    }

    #[test]
    fn arity_mismatch_fails() {
        assert_eq!(
            try_extract(&users(), &url("https://x/users/42/extra")),
            Err(MatchError::PathArityMismatch {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            try_extract(&users(), &url("https://x/users")),
            Err(MatchError::PathArityMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn literal_mismatch_is_case_sensitive() {
        assert_eq!(
            try_extract(&users(), &url("https://x/Users/42")),
            Err(MatchError::LiteralMismatch {
                expected: "users".into(),
                found: "Users".into(),
            })
        );
    }

    #[test]
    fn empty_segments_are_ignored() {
        assert!(extract(&users(), &url("https://x//users/42/")).is_some());
    }

    #[test]
    fn segments_are_percent_decoded() {
        let template = Template::empty().term("h").term("a b").string("name");
        let bag =
            extract(&template, &url("https://h/a%20b/caf%C3%A9")).unwrap();
        assert_eq!(bag.path.get("name"), Some(&Value::from("café")));
    }

    #[test]
    fn invalid_utf8_decodes_to_empty_string() {
        let template = Template::empty().term("h").string("name");
        let bag = extract(&template, &url("https://h/%FF")).unwrap();
        assert_eq!(bag.path.get("name"), Some(&Value::from("")));
    }

    #[test]
    fn fragment_is_passed_through_verbatim() {
        let template = Template::empty().term("h");
        let bag = extract(&template, &url("https://h#top%20section")).unwrap();
        assert_eq!(bag.fragment.as_deref(), Some("top%20section"));
    }

    #[test]
    fn no_declared_parameters_rejects_any_query() {
        let template = Template::empty().term("h");
        assert!(extract(&template, &url("https://h")).is_some());
        assert_eq!(
            try_extract(&template, &url("https://h?a=1")),
            Err(MatchError::UnexpectedQueryString)
        );
        assert_eq!(
            try_extract(&template, &url("https://h?")),
            Err(MatchError::UnexpectedQueryString)
        );
    }

    #[test]
    fn absent_query_only_needs_no_required_parameters() {
        let optional = Template::empty()
            .term("h")
            .with_query_parameters([QueryParameter::optional_int("page")]);
        let bag = extract(&optional, &url("https://h")).unwrap();
        assert!(bag.query.is_empty());

        let required = Template::empty()
            .term("h")
            .with_query_parameters([QueryParameter::required_int("page")]);
        assert_eq!(
            try_extract(&required, &url("https://h")),
            Err(MatchError::MissingRequiredQueryParameter("page".into()))
        );
    }

    #[test]
    fn required_and_optional_parameters() {
        let template = Template::empty().term("h").with_query_parameters([
            QueryParameter::required_int("page"),
            QueryParameter::optional_bool("draft"),
        ]);

        let bag = extract(&template, &url("https://h?page=2&draft=true"))
            .unwrap();
        assert_eq!(
            bag.query,
            Values::new().with("page", 2).with("draft", true)
        );

        // a mistyped optional parameter is simply left out
        let bag =
            extract(&template, &url("https://h?page=2&draft=maybe")).unwrap();
        assert_eq!(bag.query, Values::new().with("page", 2));

        assert_eq!(
            try_extract(&template, &url("https://h?draft=true")),
            Err(MatchError::MissingRequiredQueryParameter("page".into()))
        );
        assert_eq!(
            try_extract(&template, &url("https://h?page=two")),
            Err(MatchError::QueryParameterTypeMismatch {
                name: "page".into(),
                kind: Kind::Int,
                value: "two".into(),
            })
        );
    }

    #[test]
    fn undeclared_parameters_are_ignored_when_some_are_declared() {
        let template = Template::empty()
            .term("h")
            .with_query_parameters([QueryParameter::required_int("page")]);
        let bag = extract(&template, &url("https://h?page=1&utm=x")).unwrap();
        assert_eq!(bag.query, Values::new().with("page", 1));
    }

    #[test]
    fn malformed_pairs_are_dropped() {
        assert_eq!(parse_query_string("a=1&bad&c=3"), [("a", "1"), ("c", "3")]);
        assert_eq!(parse_query_string("a=1=2&=3&b=&&c=4"), [("c", "4")]);
        assert!(parse_query_string("").is_empty());
    }

    #[test]
    fn last_duplicate_pair_wins() {
        let template = Template::empty()
            .term("h")
            .with_query_parameters([QueryParameter::required_int("page")]);
        let bag = extract(&template, &url("https://h?page=1&page=3")).unwrap();
        assert_eq!(bag.query.get("page"), Some(&Value::Int(3)));
    }
}
