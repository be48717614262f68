use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LandscapeError {
    #[error("invalid view name: {0}")]
    #[diagnostic(help("views are written as <dimension>_<value>, e.g. category_networking"))]
    InvalidView(String),

    #[error("missing config file landscape.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("dataset request failed: {0}")]
    Http(String),

    #[error("dataset server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse dataset: {0}")]
    Parse(String),

    #[error("no views to load")]
    #[diagnostic(help("pass views such as category_networking, or list them in landscape.json"))]
    NoViews,

    #[error("deployed mode needs a base path")]
    #[diagnostic(help("pass --base-path or set base_path in landscape.json"))]
    MissingBasePath,

    #[error("item not found: {0}")]
    ItemNotFound(String),
}

impl LandscapeError {
    /// Transport and parse failures, as opposed to caller mistakes.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            LandscapeError::Http(_) | LandscapeError::Status { .. } | LandscapeError::Parse(_)
        )
    }
}
