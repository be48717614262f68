use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{Mode, ViewKey};
use crate::error::LandscapeError;
use crate::locator::DEFAULT_DEV_SERVER;

pub const DEFAULT_CONFIG_FILE: &str = "landscape.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub dev_server: Option<String>,
    #[serde(default)]
    pub views: Vec<ViewEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ViewEntry {
    Shorthand(String),
    Detailed(ViewEntryObject),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ViewEntryObject {
    pub classify_by: String,
    pub key: String,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

/// One view to load, with the optional category filter that widens the fetch
/// to the full dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub view: ViewKey,
    pub categories: Vec<String>,
}

impl ViewRequest {
    pub fn new(view: ViewKey) -> Self {
        Self {
            view,
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub mode: Mode,
    pub base_path: Option<String>,
    pub dev_server: String,
    pub views: Vec<ViewRequest>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads `path`, or `landscape.json` in the working directory when no
    /// path is given. Only the implicit default may be absent.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, LandscapeError> {
        let config_path = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(err) if path.is_none() && err.kind() == ErrorKind::NotFound => {
                return Err(LandscapeError::MissingConfig);
            }
            Err(_) => return Err(LandscapeError::ConfigRead(config_path)),
        };
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<ResolvedConfig, LandscapeError> {
        serde_json::from_str::<Config>(content)
            .map_err(|err| LandscapeError::ConfigParse(err.to_string()))
            .and_then(Self::resolve_config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, LandscapeError> {
        let schema_version = config.schema_version.unwrap_or(1);

        let views = config
            .views
            .into_iter()
            .map(|entry| match entry {
                ViewEntry::Shorthand(value) => Ok(ViewRequest::new(value.parse()?)),
                ViewEntry::Detailed(obj) => Ok(ViewRequest {
                    view: ViewKey::new(&obj.classify_by, &obj.key)?,
                    categories: obj.categories.unwrap_or_default(),
                }),
            })
            .collect::<Result<Vec<_>, LandscapeError>>()?;

        Ok(ResolvedConfig {
            schema_version,
            mode: config.mode.unwrap_or_default(),
            base_path: config.base_path.filter(|path| !path.trim().is_empty()),
            dev_server: config
                .dev_server
                .unwrap_or_else(|| DEFAULT_DEV_SERVER.to_string()),
            views,
        })
    }
}
