use std::fs;

use pagewire_types::{Language, Theme};
use tempfile::TempDir;

use super::*;

#[test]
fn defaults_are_valid() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.cms.base_url.as_str(), DEFAULT_CMS_BASE_URL);
    assert_eq!(settings.cms.request_timeout, None);
    assert_eq!(settings.cache.ttl_ms.get(), 300_000);
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert_eq!(settings.logging.format, LogFormat::Compact);
    assert_eq!(
        settings.preferences.path,
        PathBuf::from(DEFAULT_PREFERENCES_PATH)
    );
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.cache.ttl_ms = Some(1_000);
    raw.logging.level = Some("info".to_string());

    let overrides = SettingsOverrides {
        cache_ttl_ms: Some(2_500),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.cache.ttl_ms.get(), 2_500);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn zero_ttl_is_rejected() {
    let mut raw = RawSettings::default();
    raw.cache.ttl_ms = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero ttl");
    assert!(matches!(err, LoadError::Invalid { key: "cache.ttl_ms", .. }));
}

#[test]
fn zero_request_timeout_is_rejected() {
    let mut raw = RawSettings::default();
    raw.cms.request_timeout_seconds = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero timeout");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "cms.request_timeout_seconds",
            ..
        }
    ));
}

#[test]
fn base_url_must_be_http() {
    let mut raw = RawSettings::default();
    raw.cms.base_url = Some("ftp://cms.example.com/".to_string());
    assert!(Settings::from_raw(raw).is_err());

    let mut raw = RawSettings::default();
    raw.cms.base_url = Some("not a url".to_string());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid { key: "cms.base_url", .. })
    ));
}

#[test]
fn unknown_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid { key: "logging.level", .. })
    ));
}

#[test]
fn config_file_feeds_settings() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("pagewire.toml");
    fs::write(
        &path,
        "[cms]\nbase_url = \"https://cms.example.com/content\"\nrequest_timeout_seconds = 5\n\n[cache]\nttl_ms = 60000\n",
    )
    .expect("write config");

    let file = path.to_str().expect("utf-8 path");
    let args = CliArgs::parse_from(["pagewire", "--config-file", file, "prefs", "show"]);
    let settings = load(&args).expect("settings");

    assert_eq!(
        settings.cms.base_url.as_str(),
        "https://cms.example.com/content"
    );
    assert_eq!(settings.cms.request_timeout, Some(Duration::from_secs(5)));
    assert_eq!(settings.cache.ttl_ms.get(), 60_000);
}

#[test]
fn missing_explicit_config_file_fails() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let file = path.to_str().expect("utf-8 path");

    let args = CliArgs::parse_from(["pagewire", "--config-file", file, "prefs", "show"]);
    assert!(matches!(load(&args), Err(LoadError::Build(_))));
}

#[test]
fn parse_page_arguments() {
    let args = CliArgs::parse_from(["pagewire", "page", "/about", "--language", "dk"]);

    match args.command {
        Command::Page(page) => {
            assert_eq!(page.path, "/about");
            assert_eq!(page.language, Some(Language::Dk));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_resource_arguments_with_global_override() {
    let args = CliArgs::parse_from([
        "pagewire",
        "resource",
        "header.json",
        "--raw",
        "--cache-ttl-ms",
        "10",
    ]);

    assert_eq!(args.overrides.cache_ttl_ms, Some(10));
    match args.command {
        Command::Resource(resource) => {
            assert_eq!(resource.name, "header.json");
            assert!(resource.raw);
            assert_eq!(resource.language, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_prefs_subcommands() {
    let args = CliArgs::parse_from(["pagewire", "prefs", "set-theme", "ocean"]);
    assert!(matches!(
        args.command,
        Command::Prefs(PrefsArgs {
            command: PrefsCommand::SetTheme {
                theme: Theme::Ocean
            }
        })
    ));

    let args = CliArgs::parse_from(["pagewire", "prefs", "action", "onThemeChangeClick"]);
    assert!(matches!(
        args.command,
        Command::Prefs(PrefsArgs {
            command: PrefsCommand::Action { ref name }
        }) if name == "onThemeChangeClick"
    ));
}

#[test]
fn unsupported_language_is_rejected_by_parser() {
    let result = CliArgs::try_parse_from(["pagewire", "chrome", "--language", "fr"]);
    assert!(result.is_err());
}
