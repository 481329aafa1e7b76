//! Locale handling and bilingual text
//!
//! The platform serves English and Spanish speakers; every human-readable
//! catalog string is carried in both languages and resolved per request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// BCP 47 style language tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// English name of the language, used in provider prompts.
    pub fn language_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Spanish",
        }
    }

    /// The other supported language.
    pub fn other(&self) -> Locale {
        match self {
            Locale::En => Locale::Es,
            Locale::Es => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept region-qualified tags like "es-MX".
        match s.split(['-', '_']).next().unwrap_or(s).to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// Error returned when parsing an unsupported language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale: {}", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

/// A string carried in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub es: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            es: es.into(),
        }
    }

    /// Resolve to the requested language.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }
}

/// Shorthand constructor used by the seed data.
pub fn tr(en: &str, es: &str) -> Localized {
    Localized::new(en, es)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_tags() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("es-MX".parse::<Locale>().unwrap(), Locale::Es);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn localized_resolves_per_language() {
        let text = tr("Hello", "Hola");
        assert_eq!(text.get(Locale::En), "Hello");
        assert_eq!(text.get(Locale::Es), "Hola");
    }

    #[test]
    fn other_flips_language() {
        assert_eq!(Locale::En.other(), Locale::Es);
        assert_eq!(Locale::Es.other(), Locale::En);
    }
}
