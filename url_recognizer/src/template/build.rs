use super::{PathPart, Template};
use crate::{error::BuildError, Values};
use url::Url;

impl Template {
    /// Builds a concrete URL of the form
    /// `scheme://seg1/seg2/.../segN?k1=v1&k2=v2` from this template.
    ///
    /// Literal parts are emitted verbatim and captures are looked up by name
    /// in `path_values`. Every required query parameter must have an entry in
    /// `query_values`; all of `query_values` is then appended in insertion
    /// order, including names the template does not declare.
    ///
    /// **No escaping is performed**, on either path or query values. A value
    /// containing `/`, `?`, `&`, `=`, `#` or non-ASCII text produces a URL
    /// that is either rejected or means something else. Callers must supply
    /// URL-safe values.
    ///
    /// The first segment becomes the URL's host. Under special schemes such
    /// as `https` the parser normalizes hosts, so `42` would become
    /// `0.0.0.42` and `Example` would become `example`. Rather than return a
    /// URL that no longer matches this template, this fails with
    /// [`BuildError::HostNormalized`].
    ///
    /// ```rust
    /// use url_recognizer::{QueryParameter, Template, Values};
    ///
    /// let template = Template::empty()
    ///     .term("x")
    ///     .term("users")
    ///     .int("id")
    ///     .with_query_parameters([QueryParameter::optional_string("tab")]);
    /// let url = template.build_url(
    ///     "https",
    ///     &Values::new().with("id", 42),
    ///     &Values::new().with("tab", "profile"),
    /// )?;
    /// assert_eq!(url.as_str(), "https://x/users/42?tab=profile");
    /// # Ok::<(), url_recognizer::BuildError>(())
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(template = %self))
    )]
    pub fn build_url(
        &self,
        scheme: &str,
        path_values: &Values,
        query_values: &Values,
    ) -> Result<Url, BuildError> {
        let result = self.try_build(scheme, path_values, query_values);
        #[cfg(feature = "tracing")]
        if let Err(e) = &result {
            tracing::debug!("{e}");
        }
        result
    }

    fn try_build(
        &self,
        scheme: &str,
        path_values: &Values,
        query_values: &Values,
    ) -> Result<Url, BuildError> {
        let mut buf = format!("{scheme}://");
        let host_start = buf.len();
        let mut host_end = host_start;
        for (idx, part) in self.parts.iter().enumerate() {
            if idx > 0 {
                buf.push('/');
            }
            match part {
                PathPart::Literal(symbol) => buf.push_str(symbol),
                PathPart::Capture { name, .. } => {
                    let value = path_values.get(name).ok_or_else(|| {
                        BuildError::MissingPathValue(name.clone())
                    })?;
                    buf.push_str(&value.to_string());
                }
            }
            if idx == 0 {
                host_end = buf.len();
            }
        }

        if let Some(missing) = self
            .query
            .required()
            .find(|param| !query_values.contains_key(param.name()))
        {
            return Err(BuildError::MissingRequiredQueryValue(
                missing.name.clone(),
            ));
        }

        if !query_values.is_empty() {
            buf.push('?');
            for (idx, (key, value)) in query_values.iter().enumerate() {
                if idx > 0 {
                    buf.push('&');
                }
                buf.push_str(key);
                buf.push('=');
                buf.push_str(&value.to_string());
            }
        }

        let url = Url::parse(&buf).map_err(|source| BuildError::InvalidUrl {
            url: buf.clone(),
            source,
        })?;

        // special schemes lowercase hosts and read numbers as IPv4 addresses
        let host = &buf[host_start..host_end];
        if !self.parts.is_empty() && url.host_str() != Some(host) {
            return Err(BuildError::HostNormalized {
                host: host.to_string(),
                normalized: url.host_str().unwrap_or_default().to_string(),
                url: buf,
            });
        }
        Ok(url)
    }
}
