use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LandscapeError;

static DIMENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid dimension regex"));

/// Where datasets and assets are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Deployed,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Deployed => write!(f, "deployed"),
        }
    }
}

/// A classification view: a dimension (`category`, `maturity`, ...) and one of
/// its values. Renders as `{dimension}_{value}`, which is also the cache key.
///
/// Dimensions may not contain `_`, so the rendered key always splits back at
/// its first underscore and two different views never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewKey {
    classify_by: String,
    key: String,
}

impl ViewKey {
    pub fn new(classify_by: &str, key: &str) -> Result<Self, LandscapeError> {
        let classify_by = classify_by.trim();
        let key = key.trim();
        if !DIMENSION_RE.is_match(classify_by) || key.is_empty() {
            return Err(LandscapeError::InvalidView(format!("{classify_by}_{key}")));
        }
        Ok(Self {
            classify_by: classify_by.to_string(),
            key: key.to_string(),
        })
    }

    pub fn classify_by(&self) -> &str {
        &self.classify_by
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.classify_by, self.key)
    }
}

impl FromStr for ViewKey {
    type Err = LandscapeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (classify_by, key) = value
            .trim()
            .split_once('_')
            .ok_or_else(|| LandscapeError::InvalidView(value.to_string()))?;
        Self::new(classify_by, key)
    }
}
