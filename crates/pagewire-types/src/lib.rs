//! Value types shared by the pagewire client and its command-line shell.
//!
//! These are deliberately small: a closed set of languages and themes, the
//! page identifier derived from a route, and the resource file names the CMS
//! backend serves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when parsing a shared value type from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unsupported language `{0}`")]
    Language(String),
    #[error("unknown theme `{0}`")]
    Theme(String),
}

/// Content language served by the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Dk,
    De,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Dk, Language::De];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Dk => "dk",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str() == value)
            .ok_or_else(|| ParseError::Language(value.to_string()))
    }
}

/// Colour theme, cycled in declaration order by the shell's theme toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Lavender,
    Slate,
    Fire,
    Jungle,
    Ocean,
    Desert,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Light,
        Theme::Dark,
        Theme::Lavender,
        Theme::Slate,
        Theme::Fire,
        Theme::Jungle,
        Theme::Ocean,
        Theme::Desert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Lavender => "lavender",
            Theme::Slate => "slate",
            Theme::Fire => "fire",
            Theme::Jungle => "jungle",
            Theme::Ocean => "ocean",
            Theme::Desert => "desert",
        }
    }

    /// The theme after `self`, wrapping back to the first one.
    pub fn next(self) -> Theme {
        let index = Theme::ALL
            .iter()
            .position(|theme| *theme == self)
            .unwrap_or_default();
        Theme::ALL[(index + 1) % Theme::ALL.len()]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == value)
            .ok_or_else(|| ParseError::Theme(value.to_string()))
    }
}

/// Lowercase slug naming a CMS page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub const HOME: &'static str = "home";
    pub const NOT_FOUND: &'static str = "not-found";

    pub fn new(slug: impl AsRef<str>) -> Self {
        Self(slug.as_ref().to_lowercase())
    }

    pub fn home() -> Self {
        Self(Self::HOME.to_string())
    }

    /// The reserved page served when another page cannot be loaded.
    pub fn not_found() -> Self {
        Self(Self::NOT_FOUND.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        self.0 == Self::NOT_FOUND
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File-like token addressing one document under a language directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    pub const HEADER: &'static str = "header.json";
    pub const FOOTER: &'static str = "footer.json";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn header() -> Self {
        Self(Self::HEADER.to_string())
    }

    pub fn footer() -> Self {
        Self(Self::FOOTER.to_string())
    }

    pub fn page(page_id: &PageId) -> Self {
        Self(format!("{}.json", page_id.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_known_codes_only() {
        assert_eq!("dk".parse::<Language>(), Ok(Language::Dk));
        assert_eq!(
            "fr".parse::<Language>(),
            Err(ParseError::Language("fr".to_string()))
        );
    }

    #[test]
    fn language_serializes_lowercase() {
        let json = serde_json::to_string(&Language::De).expect("serialize language");
        assert_eq!(json, "\"de\"");
    }

    #[test]
    fn theme_cycle_wraps_to_light() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Ocean.next(), Theme::Desert);
        assert_eq!(Theme::Desert.next(), Theme::Light);
    }

    #[test]
    fn page_id_is_lowercased() {
        let id = PageId::new("About-Us");
        assert_eq!(id.as_str(), "about-us");
        assert!(!id.is_not_found());
        assert!(PageId::new("Not-Found").is_not_found());
    }

    #[test]
    fn page_resource_appends_json_extension() {
        let name = ResourceName::page(&PageId::new("Services"));
        assert_eq!(name.as_str(), "services.json");
        assert_eq!(ResourceName::header().as_str(), "header.json");
    }
}
