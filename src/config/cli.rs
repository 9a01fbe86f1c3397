use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use pagewire_types::{Language, Theme};

/// Command-line arguments for the pagewire binary.
#[derive(Debug, Parser)]
#[command(name = "pagewire", version, about = "Fetch and resolve CMS content")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "PAGEWIRE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Resolve a route to its page sections, falling back to the not-found page.
    Page(PageArgs),
    /// Fetch a single CMS resource.
    Resource(ResourceArgs),
    /// Load the header and footer.
    Chrome(ChromeArgs),
    /// Inspect or change stored preferences.
    Prefs(PrefsArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PageArgs {
    /// Route path, for example `/about`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Content language; defaults to the stored preference.
    #[arg(long, value_name = "LANG")]
    pub language: Option<Language>,
}

#[derive(Debug, Args, Clone)]
pub struct ResourceArgs {
    /// Resource file name, for example `header.json`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Content language; defaults to the stored preference.
    #[arg(long, value_name = "LANG")]
    pub language: Option<Language>,

    /// Print the payload as served, without normalization.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub raw: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ChromeArgs {
    /// Content language; defaults to the stored preference.
    #[arg(long, value_name = "LANG")]
    pub language: Option<Language>,
}

#[derive(Debug, Args, Clone)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum PrefsCommand {
    /// Print the stored language and theme.
    Show,
    /// Store the preferred content language.
    SetLanguage {
        #[arg(value_name = "LANG")]
        language: Language,
    },
    /// Store the preferred theme.
    SetTheme {
        #[arg(value_name = "THEME")]
        theme: Theme,
    },
    /// Advance to the next theme.
    ToggleTheme,
    /// Run a named shell handler such as `onThemeChangeClick`.
    Action {
        #[arg(value_name = "HANDLER")]
        name: String,
    },
}

/// Per-invocation overrides; these win over files and environment.
#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Override the CMS base URL.
    #[arg(long = "cms-base-url", value_name = "URL", global = true)]
    pub cms_base_url: Option<String>,

    /// Override the per-request timeout.
    #[arg(long = "cms-request-timeout-seconds", value_name = "SECONDS", global = true)]
    pub cms_request_timeout_seconds: Option<u64>,

    /// Override the content cache time-to-live.
    #[arg(long = "cache-ttl-ms", value_name = "MS", global = true)]
    pub cache_ttl_ms: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the preference file location.
    #[arg(
        long = "preferences-path",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub preferences_path: Option<PathBuf>,
}
