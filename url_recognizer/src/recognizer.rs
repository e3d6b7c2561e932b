use crate::{
    error::MatchError,
    extract::{try_extract, UrlParts},
    FromValueBag, Template, ValueBag,
};
use std::{fmt, sync::Arc};

type Factory<T> = Arc<dyn Fn(ValueBag) -> T + Send + Sync>;

/// A [`Template`] paired with the function that turns its extracted values
/// into an application object.
pub struct Registration<T> {
    template: Template,
    factory: Factory<T>,
}

impl<T> Registration<T> {
    pub fn new(
        template: Template,
        factory: impl Fn(ValueBag) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            template,
            factory: Arc::new(factory),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

impl<P> Registration<Result<P, crate::ValueError>>
where
    P: FromValueBag + 'static,
{
    /// Registers a type that reads itself out of the bag.
    pub fn from_bag(template: Template) -> Self {
        Self::new(template, |bag| P::from_bag(&bag))
    }
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            template: self.template.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Registration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// An ordered list of [`Registration`]s.
///
/// Templates are tried in the order they were registered, and the first one
/// that matches the URL wins, even if a later one would also match. The
/// winning factory is always called; there is no backtracking if its values
/// turn out to be unusable.
///
/// ```rust
/// use url_recognizer::{QueryParameter, Recognizer, Template};
///
/// #[derive(Debug, PartialEq)]
/// enum Link {
///     User { id: i64, tab: Option<String> },
///     Home,
/// }
///
/// let recognizer = Recognizer::default()
///     .route(
///         Template::empty()
///             .term("x")
///             .term("users")
///             .int("id")
///             .with_query_parameters([QueryParameter::optional_string("tab")]),
///         |bag| Link::User {
///             id: bag.path.get_as("id").unwrap_or_default(),
///             tab: bag.query.get_as("tab").unwrap_or_default(),
///         },
///     )
///     .route(Template::empty().term("x"), |_| Link::Home);
///
/// assert_eq!(
///     recognizer.recognize_str("https://x/users/42?tab=profile")?,
///     Some(Link::User {
///         id: 42,
///         tab: Some("profile".into())
///     })
/// );
/// assert_eq!(recognizer.recognize_str("https://x")?, Some(Link::Home));
/// assert_eq!(recognizer.recognize_str("https://x/users/abc")?, None);
/// # Ok::<(), url::ParseError>(())
/// ```
pub struct Recognizer<T> {
    registrations: Vec<Registration<T>>,
}

impl<T> Recognizer<T> {
    pub fn new(registrations: Vec<Registration<T>>) -> Self {
        Self { registrations }
    }

    /// Appends a registration, returning the extended recognizer.
    pub fn route(
        mut self,
        template: Template,
        factory: impl Fn(ValueBag) -> T + Send + Sync + 'static,
    ) -> Self {
        self.registrations.push(Registration::new(template, factory));
        self
    }

    pub fn registrations(&self) -> &[Registration<T>] {
        &self.registrations
    }

    /// Returns the object built by the first registration whose template
    /// matches `url`, or `None` if no template matches.
    pub fn recognize(&self, url: &impl UrlParts) -> Option<T> {
        self.try_recognize(url).ok()
    }

    /// Like [`recognize`](Self::recognize), but reports
    /// [`MatchError::NoTemplateMatched`] when nothing matches.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all)
    )]
    pub fn try_recognize(&self, url: &impl UrlParts) -> Result<T, MatchError> {
        for registration in &self.registrations {
            match try_extract(&registration.template, url) {
                Ok(bag) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        template = %registration.template,
                        "matched"
                    );
                    return Ok((registration.factory)(bag));
                }
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        template = %registration.template,
                        "{_e}"
                    );
                }
            }
        }
        Err(MatchError::NoTemplateMatched)
    }

    /// Parses `url` and then [`recognize`](Self::recognize)s it.
    pub fn recognize_str(
        &self,
        url: &str,
    ) -> Result<Option<T>, url::ParseError> {
        let url = url::Url::parse(url)?;
        Ok(self.recognize(&url))
    }
}

impl<T> Default for Recognizer<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Clone for Recognizer<T> {
    fn clone(&self) -> Self {
        Self {
            registrations: self.registrations.clone(),
        }
    }
}

impl<T> fmt::Debug for Recognizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("registrations", &self.registrations)
            .finish()
    }
}

impl<T> FromIterator<Registration<T>> for Recognizer<T> {
    fn from_iter<I: IntoIterator<Item = Registration<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
