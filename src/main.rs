use std::{process, sync::Arc};

use pagewire::{
    cache::{CacheConfig, ContentCache},
    client::{CmsClient, FetchOptions},
    config::{self, Command, PrefsCommand, Settings},
    error::AppError,
    preferences::{FilePreferenceStore, Preferences, UserPreferences},
    resolver::{PageResolver, PageState, Resolution},
    shell::ShellLoader,
    telemetry,
    types::{Language, ResourceName},
};
use serde::Serialize;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let preferences = Preferences::new(Arc::new(FilePreferenceStore::new(
        settings.preferences.path.clone(),
    )));

    match cli_args.command {
        Command::Page(args) => {
            let language = resolve_language(&preferences, args.language)?;
            run_page(&settings, &args.path, language).await
        }
        Command::Resource(args) => {
            let language = resolve_language(&preferences, args.language)?;
            let client = build_client(&settings)?;
            let options = FetchOptions {
                skip_normalization: args.raw,
            };
            let payload = client
                .fetch_resource(&ResourceName::new(args.name), language, options)
                .await?;
            print_json(&*payload)
        }
        Command::Chrome(args) => {
            let language = resolve_language(&preferences, args.language)?;
            let loader = ShellLoader::new(Arc::new(build_client(&settings)?));
            print_json(&loader.load(language).await)
        }
        Command::Prefs(args) => run_prefs(&preferences, args.command),
    }
}

async fn run_page(settings: &Settings, path: &str, language: Language) -> Result<(), AppError> {
    let resolver = PageResolver::new(Arc::new(build_client(settings)?));

    let state = match resolver.navigate(path, language).await {
        Resolution::Settled(state) => state,
        Resolution::Superseded { generation } => {
            return Err(AppError::unexpected(format!(
                "navigation {generation} was superseded"
            )));
        }
    };

    print_json(&state)?;
    match state {
        PageState::Error { page_id, reason } => Err(AppError::Resolution(format!(
            "{page_id}: {reason}"
        ))),
        _ => Ok(()),
    }
}

fn run_prefs(preferences: &Preferences, command: PrefsCommand) -> Result<(), AppError> {
    let updated: UserPreferences = match command {
        PrefsCommand::Show => preferences.load()?,
        PrefsCommand::SetLanguage { language } => preferences.set_language(language)?,
        PrefsCommand::SetTheme { theme } => preferences.set_theme(theme)?,
        PrefsCommand::ToggleTheme => preferences.toggle_theme()?,
        PrefsCommand::Action { name } => preferences.dispatch(&name)?,
    };
    print_json(&updated)
}

fn build_client(settings: &Settings) -> Result<CmsClient, AppError> {
    let cache = Arc::new(ContentCache::new(&CacheConfig::from(&settings.cache)));
    info!(
        base_url = %settings.cms.base_url,
        ttl_ms = settings.cache.ttl_ms.get(),
        "Using CMS backend"
    );
    Ok(CmsClient::new(&settings.cms, cache)?)
}

fn resolve_language(
    preferences: &Preferences,
    requested: Option<Language>,
) -> Result<Language, AppError> {
    match requested {
        Some(language) => Ok(language),
        None => Ok(preferences.language()?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?;
    println!("{text}");
    Ok(())
}
