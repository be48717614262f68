//! Command line settings shared by the `landscape-items` subcommands.

use clap::Args;

use crate::config::{Config, ConfigLoader, ResolvedConfig, ViewRequest};
use crate::domain::Mode;
use crate::error::LandscapeError;

#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub mode: Option<Mode>,

    #[arg(long)]
    pub base_path: Option<String>,

    #[arg(long)]
    pub dev_server: Option<String>,

    /// Category filter; when set the full dataset is fetched.
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,
}

pub fn exit_code(error: &LandscapeError) -> u8 {
    match error {
        LandscapeError::ItemNotFound(_) => 2,
        LandscapeError::MissingConfig => 2,
        LandscapeError::Http(_) | LandscapeError::Status { .. } | LandscapeError::Parse(_) => 3,
        _ => 1,
    }
}

/// Config file values overridden by command line flags. A missing default
/// config file is fine; an explicitly named one must exist.
pub fn resolve_settings(args: &SourceArgs) -> Result<ResolvedConfig, LandscapeError> {
    let mut settings = match ConfigLoader::resolve(args.config.as_deref()) {
        Err(LandscapeError::MissingConfig) => ConfigLoader::resolve_config(Config::default())?,
        other => other?,
    };
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if let Some(base_path) = &args.base_path {
        settings.base_path = Some(base_path.clone());
    }
    if let Some(dev_server) = &args.dev_server {
        settings.dev_server = dev_server.clone();
    }
    Ok(settings)
}

/// Views named on the command line, or the configured ones. `--categories`
/// applies to every view.
pub fn requested_views(
    views: &[String],
    args: &SourceArgs,
    settings: &ResolvedConfig,
) -> Result<Vec<ViewRequest>, LandscapeError> {
    let mut requests = if views.is_empty() {
        settings.views.clone()
    } else {
        views
            .iter()
            .map(|view| Ok(ViewRequest::new(view.parse()?)))
            .collect::<Result<Vec<_>, LandscapeError>>()?
    };
    if requests.is_empty() {
        return Err(LandscapeError::NoViews);
    }
    if !args.categories.is_empty() {
        for request in &mut requests {
            request.categories = args.categories.clone();
        }
    }
    Ok(requests)
}

/// Base path datasets are fetched from. Development mode serves from the dev
/// server and does not need one.
pub fn base_path(settings: &ResolvedConfig) -> Result<String, LandscapeError> {
    match (settings.mode, &settings.base_path) {
        (Mode::Deployed, Some(base_path)) => Ok(base_path.clone()),
        (Mode::Deployed, None) => Err(LandscapeError::MissingBasePath),
        (Mode::Development, base_path) => Ok(base_path.clone().unwrap_or_default()),
    }
}
