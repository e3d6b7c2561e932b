use crate::Kind;
use std::{borrow::Cow, fmt};

/// One segment of a template's path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathPart {
    /// Must equal the URL segment exactly.
    Literal(Cow<'static, str>),
    /// Captures the URL segment as a typed value under `name`.
    Capture {
        name: Cow<'static, str>,
        kind: Kind,
    },
}

impl PathPart {
    pub fn as_raw_str(&self) -> &str {
        match self {
            PathPart::Literal(symbol) => symbol,
            PathPart::Capture { name, .. } => name,
        }
    }
}

impl fmt::Display for PathPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPart::Literal(symbol) => f.write_str(symbol),
            PathPart::Capture {
                name,
                kind: Kind::String,
            } => write!(f, ":{name}"),
            PathPart::Capture { name, kind } => write!(f, ":{name}<{kind}>"),
        }
    }
}
