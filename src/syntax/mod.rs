use std::error;
use std::fmt;

use serde_json;

pub mod dependency;
pub mod extract;
pub mod head;
pub mod order;

pub use self::dependency::{Dependency, Direction, Relation};
pub use self::extract::{DependencyExtractor, Diagnostic, Extraction, ExtractorConfig};
pub use self::head::{AuxiliaryHook, CoordinationHook, HeadFinder, HeadHook, HeadRules, RuleGroup};

#[derive(Debug)]
pub enum Error {
    LeafHasNoHead { value: String },
    NoHead { category: String, tree: String },
    MissingIndex { value: String },
    InvalidRule(String),
    Json(serde_json::Error),
}

impl Error {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::LeafHasNoHead { .. } => "leaf has no head",
            Error::NoHead { .. } => "no head found",
            Error::MissingIndex { .. } => "leaf without index",
            Error::InvalidRule(..) => "invalid head rule",
            Error::Json(..) => "malformed rule table",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::LeafHasNoHead { ref value } => write!(f, "{}: `{}`", self.as_str(), value),
            Error::NoHead {
                ref category,
                ref tree,
            } => write!(f, "{} for category `{}` in {}", self.as_str(), category, tree),
            Error::MissingIndex { ref value } => write!(f, "{}: `{}`", self.as_str(), value),
            Error::InvalidRule(ref msg) => write!(f, "{}: {}", self.as_str(), msg),
            Error::Json(ref e) => write!(f, "{}: {}", self.as_str(), e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Json(ref e) => Some(e),
            _ => None,
        }
    }
}
