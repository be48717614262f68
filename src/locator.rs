use crate::domain::Mode;

pub const DEFAULT_DEV_SERVER: &str = "http://localhost:8000";

const DEPLOYED_ASSET_PREFIX: &str = "../";

/// Computes where dataset files and static assets live for a given mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    mode: Mode,
    dev_server: String,
}

impl ResourceLocator {
    pub fn new(mode: Mode) -> Self {
        Self::with_dev_server(mode, DEFAULT_DEV_SERVER)
    }

    pub fn with_dev_server(mode: Mode, dev_server: &str) -> Self {
        Self {
            mode,
            dev_server: dev_server.trim_end_matches('/').to_string(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// URL of the dataset backing the `classify_by`/`key` view.
    ///
    /// A non-empty `categories` filter spans several views, so the full
    /// dataset is requested instead of the per-view one.
    pub fn dataset_url(
        &self,
        classify_by: &str,
        key: &str,
        base_path: &str,
        categories: &[String],
    ) -> String {
        let file = if categories.is_empty() {
            format!("data/embed_full_{classify_by}_{key}.json")
        } else {
            "data/full.json".to_string()
        };
        match self.mode {
            Mode::Development => format!("{}/{file}", self.dev_server),
            Mode::Deployed => format!("{}/{file}", base_path.trim_end_matches('/')),
        }
    }

    /// Resolves a logo or report image path. Already resolved references are
    /// returned unchanged.
    pub fn asset_url(&self, path: &str) -> String {
        if path.is_empty() || path.contains("://") {
            return path.to_string();
        }
        match self.mode {
            Mode::Development => {
                // Only reachable for dev servers configured without a scheme.
                if path.starts_with(&self.dev_server) {
                    return path.to_string();
                }
                format!("{}/{}", self.dev_server, path.trim_start_matches('/'))
            }
            Mode::Deployed => {
                // Wire paths already starting with `../` are taken as resolved.
                if path.starts_with(DEPLOYED_ASSET_PREFIX) {
                    return path.to_string();
                }
                format!("{DEPLOYED_ASSET_PREFIX}{}", path.trim_start_matches('/'))
            }
        }
    }
}

impl Default for ResourceLocator {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
