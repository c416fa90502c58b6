use std::fmt;

use lang::Symbol;

/// Node payload: category or word text, plus an optional word position and
/// an optional score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    value: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

impl Label {
    pub fn new<S: Into<Symbol>>(value: S) -> Self {
        Label {
            value: value.into(),
            index: None,
            score: None,
        }
    }

    pub fn with_index<S: Into<Symbol>>(value: S, index: usize) -> Self {
        Label::new(value).indexed(index)
    }

    pub fn indexed(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn scored(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Copies the position and score onto a new text.
    pub fn relabel<S: Into<Symbol>>(&self, value: S) -> Self {
        Label {
            value: value.into(),
            index: self.index,
            score: self.score,
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn symbol(&self) -> &Symbol {
        &self.value
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[inline]
    pub fn score(&self) -> Option<f64> {
        self.score
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}-{}", self.value, index),
            None => write!(f, "{}", self.value),
        }
    }
}
