//! Persisted language and theme choices.

mod actions;
mod store;

use std::sync::Arc;

use pagewire_types::{Language, Theme};
use serde::Serialize;
use tracing::{info, warn};

pub use actions::ShellAction;
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};

pub const LANGUAGE_KEY: &str = "app-language";
pub const THEME_KEY: &str = "app-theme";

const SOURCE: &str = "preferences";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UserPreferences {
    pub language: Language,
    pub theme: Theme,
}

/// Typed view over a [`PreferenceStore`].
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Current preferences. Missing or unrecognised stored values read as the
    /// defaults.
    pub fn load(&self) -> Result<UserPreferences, PreferenceError> {
        Ok(UserPreferences {
            language: self.language()?,
            theme: self.theme()?,
        })
    }

    pub fn language(&self) -> Result<Language, PreferenceError> {
        Ok(self.read_parsed(LANGUAGE_KEY)?.unwrap_or_default())
    }

    pub fn theme(&self) -> Result<Theme, PreferenceError> {
        Ok(self.read_parsed(THEME_KEY)?.unwrap_or_default())
    }

    pub fn set_language(&self, language: Language) -> Result<UserPreferences, PreferenceError> {
        self.store.set(LANGUAGE_KEY, language.as_str())?;
        info!(target = SOURCE, language = %language, "Language preference updated");
        self.load()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<UserPreferences, PreferenceError> {
        self.store.set(THEME_KEY, theme.as_str())?;
        info!(target = SOURCE, theme = %theme, "Theme preference updated");
        self.load()
    }

    /// Advance to the next theme. Nothing stored counts as the default
    /// theme; a stored value that is not a known theme restarts the cycle at
    /// the first one.
    pub fn toggle_theme(&self) -> Result<UserPreferences, PreferenceError> {
        let next = match self.store.get(THEME_KEY)? {
            None => Theme::default().next(),
            Some(raw) => raw.parse::<Theme>().map_or(Theme::ALL[0], Theme::next),
        };
        self.set_theme(next)
    }

    pub fn apply(&self, action: ShellAction) -> Result<UserPreferences, PreferenceError> {
        match action {
            ShellAction::ToggleTheme => self.toggle_theme(),
            ShellAction::SetLanguage(language) => self.set_language(language),
        }
    }

    /// Run the shell action registered under `handler`.
    pub fn dispatch(&self, handler: &str) -> Result<UserPreferences, PreferenceError> {
        self.apply(handler.parse()?)
    }

    fn read_parsed<T>(&self, key: &str) -> Result<Option<T>, PreferenceError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match raw.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(target = SOURCE, key, error = %err, "Ignoring unrecognised preference value");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> (Arc<MemoryPreferenceStore>, Preferences) {
        let store = Arc::new(MemoryPreferenceStore::default());
        let prefs = Preferences::new(store.clone());
        (store, prefs)
    }

    #[test]
    fn empty_store_yields_defaults() {
        let (_, prefs) = memory();
        assert_eq!(prefs.load().expect("load"), UserPreferences::default());
    }

    #[test]
    fn language_is_persisted_under_its_key() {
        let (store, prefs) = memory();
        let updated = prefs.set_language(Language::Dk).expect("set");
        assert_eq!(updated.language, Language::Dk);
        assert_eq!(
            store.get(LANGUAGE_KEY).expect("get"),
            Some("dk".to_string())
        );
    }

    #[test]
    fn toggle_walks_the_theme_cycle() {
        let (_, prefs) = memory();
        assert_eq!(prefs.toggle_theme().expect("toggle").theme, Theme::Dark);
        assert_eq!(prefs.toggle_theme().expect("toggle").theme, Theme::Lavender);

        prefs.set_theme(Theme::Desert).expect("set");
        assert_eq!(prefs.toggle_theme().expect("toggle").theme, Theme::Light);
    }

    #[test]
    fn unknown_stored_theme_toggles_to_light() {
        let (store, prefs) = memory();
        store.set(THEME_KEY, "neon").expect("seed");
        assert_eq!(prefs.theme().expect("theme"), Theme::Light);
        assert_eq!(prefs.toggle_theme().expect("toggle").theme, Theme::Light);
    }

    #[test]
    fn dispatch_runs_named_handlers() {
        let (_, prefs) = memory();
        let after = prefs.dispatch("onLanguageChangeToDk").expect("dk");
        assert_eq!(after.language, Language::Dk);

        let after = prefs.dispatch("onThemeChangeClick").expect("toggle");
        assert_eq!(after.theme, Theme::Dark);

        assert!(matches!(
            prefs.dispatch("onSomethingElse"),
            Err(PreferenceError::UnknownAction(_))
        ));
    }

    #[test]
    fn unknown_stored_language_reads_as_default() {
        let (store, prefs) = memory();
        store.set(LANGUAGE_KEY, "fr").expect("seed");
        assert_eq!(prefs.language().expect("language"), Language::En);
    }
}
