use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use landscape_items::app::App;
use landscape_items::cache::DatasetCache;
use landscape_items::cli::{self, SourceArgs};
use landscape_items::config::ResolvedConfig;
use landscape_items::domain::ViewKey;
use landscape_items::error::LandscapeError;
use landscape_items::locator::ResourceLocator;
use landscape_items::output::{JsonOutput, KeysReport, LoadReport, OutputMode, StatusLines};
use landscape_items::source::HttpBundleSource;

#[derive(Parser)]
#[command(name = "landscape-items")]
#[command(about = "Fetch, enrich and inspect landscape items per classification view")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    non_interactive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Load views (e.g. category_networking) and print a summary")]
    Load(LoadArgs),
    #[command(about = "Load a view and print one enriched item")]
    Item(ItemArgs),
    #[command(about = "Load the configured views and print the ready keys")]
    Keys(SourceArgs),
}

#[derive(Args)]
struct LoadArgs {
    views: Vec<String>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct ItemArgs {
    view: String,

    id: String,

    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<LandscapeError>() {
            return ExitCode::from(cli::exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    match cli.command {
        Commands::Load(args) => run_load(args, output_mode),
        Commands::Item(args) => run_item(args, output_mode),
        Commands::Keys(args) => run_keys(args, output_mode),
    }
}

fn run_load(args: LoadArgs, output_mode: OutputMode) -> miette::Result<()> {
    let settings = cli::resolve_settings(&args.source)?;
    let views = cli::requested_views(&args.views, &args.source, &settings)?;
    let (app, base_path) = build_app(&settings, output_mode)?;

    let report = LoadReport {
        views: app.load_all(&views, &base_path),
    };
    JsonOutput::print_load(&report).into_diagnostic()?;

    match report.failures() {
        0 => Ok(()),
        failed => Err(miette::Report::msg(format!(
            "{failed} of {} views failed to load",
            report.views.len()
        ))),
    }
}

fn run_item(args: ItemArgs, output_mode: OutputMode) -> miette::Result<()> {
    let settings = cli::resolve_settings(&args.source)?;
    let view: ViewKey = args.view.parse()?;
    let (app, base_path) = build_app(&settings, output_mode)?;

    app.load(view.classify_by(), view.key(), &base_path, &args.source.categories)?;
    let item = app
        .item_by_id(view.classify_by(), view.key(), &args.id)
        .ok_or_else(|| LandscapeError::ItemNotFound(format!("{view}/{}", args.id)))?;
    JsonOutput::print_item(&item).into_diagnostic()?;
    Ok(())
}

fn run_keys(args: SourceArgs, output_mode: OutputMode) -> miette::Result<()> {
    let settings = cli::resolve_settings(&args)?;
    let views = cli::requested_views(&[], &args, &settings)?;
    let (app, base_path) = build_app(&settings, output_mode)?;

    app.load_all(&views, &base_path);
    JsonOutput::print_keys(&KeysReport {
        keys: app.available_keys(),
    })
    .into_diagnostic()?;
    Ok(())
}

fn build_app(
    settings: &ResolvedConfig,
    output_mode: OutputMode,
) -> miette::Result<(App<HttpBundleSource>, String)> {
    let base_path = cli::base_path(settings)?;

    let locator = ResourceLocator::with_dev_server(settings.mode, &settings.dev_server);
    let source = HttpBundleSource::new()?;
    let app = App::new(locator, source, Arc::new(DatasetCache::new()));
    if matches!(output_mode, OutputMode::Interactive) {
        app.subscribe(Arc::new(StatusLines));
    }
    Ok((app, base_path))
}
