use std::fs;
use std::path::Path;

use assert_matches::assert_matches;

use landscape_items::cli::{SourceArgs, base_path, exit_code, requested_views, resolve_settings};
use landscape_items::domain::Mode;
use landscape_items::error::LandscapeError;

fn write_config(dir: &Path, content: &str) -> String {
    let path = dir.join("landscape.json");
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn flags_override_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(
        temp.path(),
        r#"{
            "mode": "deployed",
            "base_path": "https://landscape.example",
            "dev_server": "http://127.0.0.1:9000",
            "views": ["category_db"]
        }"#,
    );

    let args = SourceArgs {
        config: Some(config.clone()),
        mode: Some(Mode::Development),
        dev_server: Some("http://localhost:7000".to_string()),
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();
    assert_eq!(settings.mode, Mode::Development);
    assert_eq!(settings.dev_server, "http://localhost:7000");
    assert_eq!(settings.base_path.as_deref(), Some("https://landscape.example"));

    let args = SourceArgs {
        config: Some(config),
        base_path: Some("/embed".to_string()),
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();
    assert_eq!(settings.mode, Mode::Deployed);
    assert_eq!(settings.dev_server, "http://127.0.0.1:9000");
    assert_eq!(base_path(&settings).unwrap(), "/embed");
}

#[test]
fn explicit_missing_config_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let args = SourceArgs {
        config: Some(temp.path().join("absent.json").to_str().unwrap().to_string()),
        ..Default::default()
    };

    let err = resolve_settings(&args).unwrap_err();
    assert_matches!(err, LandscapeError::ConfigRead(_));
    assert_eq!(exit_code(&err), 1);
}

#[test]
fn categories_apply_to_every_view() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(
        temp.path(),
        r#"{
            "views": [
                "category_db",
                {"classify_by": "maturity", "key": "graduated", "categories": ["Runtime"]}
            ]
        }"#,
    );
    let args = SourceArgs {
        config: Some(config),
        categories: vec!["Provisioning".to_string(), "Streaming".to_string()],
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();

    let views = requested_views(&[], &args, &settings).unwrap();
    assert_eq!(views.len(), 2);
    for view in &views {
        assert_eq!(view.categories, args.categories);
    }

    let views = requested_views(&["category_networking".to_string()], &args, &settings).unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].view.cache_key(), "category_networking");
    assert_eq!(views[0].categories, args.categories);
}

#[test]
fn config_categories_kept_without_flag() {
    let temp = tempfile::tempdir().unwrap();
    let config = write_config(
        temp.path(),
        r#"{"views": [{"classify_by": "maturity", "key": "graduated", "categories": ["Runtime"]}]}"#,
    );
    let args = SourceArgs {
        config: Some(config),
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();

    let views = requested_views(&[], &args, &settings).unwrap();
    assert_eq!(views[0].categories, vec!["Runtime".to_string()]);
}

#[test]
fn no_views_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let args = SourceArgs {
        config: Some(write_config(temp.path(), "{}")),
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();

    let err = requested_views(&[], &args, &settings).unwrap_err();
    assert_matches!(err, LandscapeError::NoViews);
    assert_eq!(exit_code(&err), 1);
}

#[test]
fn bad_view_argument_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let args = SourceArgs {
        config: Some(write_config(temp.path(), "{}")),
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();

    let err = requested_views(&["networking".to_string()], &args, &settings).unwrap_err();
    assert_matches!(err, LandscapeError::InvalidView(_));
}

#[test]
fn deployed_without_base_path_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let args = SourceArgs {
        config: Some(write_config(temp.path(), r#"{"mode": "deployed"}"#)),
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();

    let err = base_path(&settings).unwrap_err();
    assert_matches!(err, LandscapeError::MissingBasePath);

    let args = SourceArgs {
        mode: Some(Mode::Development),
        ..args
    };
    let settings = resolve_settings(&args).unwrap();
    assert_eq!(base_path(&settings).unwrap(), "");
}

#[test]
fn fetch_failures_exit_with_three() {
    for err in [
        LandscapeError::Http("connection refused".to_string()),
        LandscapeError::Status {
            status: 503,
            message: "down".to_string(),
        },
        LandscapeError::Parse("EOF while parsing".to_string()),
    ] {
        assert_eq!(exit_code(&err), 3, "{err}");
    }
    assert_eq!(exit_code(&LandscapeError::ItemNotFound("category_db/a1".to_string())), 2);
    assert_eq!(exit_code(&LandscapeError::MissingConfig), 2);
}
