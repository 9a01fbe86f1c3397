//! Named handlers the renderer wires to header and footer controls.

use std::fmt;
use std::str::FromStr;

use pagewire_types::Language;

use super::PreferenceError;

/// A user action exposed to rendered chrome under a fixed handler name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    ToggleTheme,
    SetLanguage(Language),
}

impl ShellAction {
    pub const ALL: [ShellAction; 3] = [
        ShellAction::ToggleTheme,
        ShellAction::SetLanguage(Language::En),
        ShellAction::SetLanguage(Language::Dk),
    ];

    pub fn handler_name(self) -> &'static str {
        match self {
            ShellAction::ToggleTheme => "onThemeChangeClick",
            ShellAction::SetLanguage(Language::En) => "onLanguageChangeToEn",
            ShellAction::SetLanguage(Language::Dk) => "onLanguageChangeToDk",
            ShellAction::SetLanguage(Language::De) => "onLanguageChangeToDe",
        }
    }
}

impl fmt::Display for ShellAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

impl FromStr for ShellAction {
    type Err = PreferenceError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ShellAction::ALL
            .into_iter()
            .find(|action| action.handler_name() == name)
            .ok_or_else(|| PreferenceError::UnknownAction(name.to_string()))
    }
}
