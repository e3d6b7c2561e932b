//! Declarative URL templates.
//!
//! A [`Template`] describes the shape of a URL: an ordered list of literal or
//! typed path segments, and a set of typed, required or optional query
//! parameters. A template can be used in both directions:
//!
//! - [`extract`] matches a URL against a template and returns the typed
//!   [`ValueBag`] it carries.
//! - [`Template::build_url`] builds a concrete URL back from a set of values.
//!
//! A [`Recognizer`] holds an ordered list of templates, each with a factory
//! that turns its values into an application object, and returns the object
//! for the first template that matches.
//!
//! ```rust
//! use url_recognizer::{extract, Template, Value};
//!
//! let template = "x/users/:id<int>?tab?".parse::<Template>()?;
//! let url = url::Url::parse("https://x/users/42?tab=profile#bio").unwrap();
//!
//! let bag = extract(&template, &url).expect("should match");
//! assert_eq!(bag.path.get("id"), Some(&Value::Int(42)));
//! assert_eq!(bag.query.get("tab"), Some(&Value::from("profile")));
//! assert_eq!(bag.fragment.as_deref(), Some("bio"));
//! # Ok::<(), url_recognizer::TemplateError>(())
//! ```
//!
//! The host of a URL, if it has one, counts as the first path segment, so
//! `myapp://users/42` and `https://example.com/users/42` have two and three
//! segments respectively.
//!
//! # Features
//!
//! - `tracing`: emits `tracing` spans and events while recognizing and
//!   building URLs.
//! - `serde`: (de)serializes templates as their pattern string, and values
//!   and kinds as plain data, so templates can be declared in configuration.

#![forbid(unsafe_code)]

mod error;
mod extract;
mod recognizer;
mod template;
mod value;
mod values;

pub use error::*;
pub use extract::*;
pub use recognizer::*;
pub use template::*;
pub use value::*;
pub use values::*;
