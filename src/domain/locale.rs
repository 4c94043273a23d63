//! Supported UI locales and per-locale text

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ka,
    En,
    Ru,
    De,
    Tr,
    Ar,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::Ka,
        Locale::En,
        Locale::Ru,
        Locale::De,
        Locale::Tr,
        Locale::Ar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ka => "ka",
            Self::En => "en",
            Self::Ru => "ru",
            Self::De => "de",
            Self::Tr => "tr",
            Self::Ar => "ar",
        }
    }

    /// Unknown codes fall back to Georgian, the marketplace default.
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "en" => Self::En,
            "ru" => Self::Ru,
            "de" => Self::De,
            "tr" => Self::Tr,
            "ar" => Self::Ar,
            _ => Self::Ka,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::Ka
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One string in every supported locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub ka: String,
    pub en: String,
    pub ru: String,
    pub de: String,
    pub tr: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn from_fn(mut f: impl FnMut(Locale) -> String) -> Self {
        Self {
            ka: f(Locale::Ka),
            en: f(Locale::En),
            ru: f(Locale::Ru),
            de: f(Locale::De),
            tr: f(Locale::Tr),
            ar: f(Locale::Ar),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ka => &self.ka,
            Locale::En => &self.en,
            Locale::Ru => &self.ru,
            Locale::De => &self.de,
            Locale::Tr => &self.tr,
            Locale::Ar => &self.ar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_fills_every_locale() {
        let text = LocalizedText::from_fn(|l| format!("hi-{l}"));
        for locale in Locale::ALL {
            assert_eq!(text.get(locale), format!("hi-{}", locale.as_str()));
        }
    }

    #[test]
    fn unknown_locale_defaults_to_georgian() {
        assert_eq!(Locale::from_str("EN"), Locale::En);
        assert_eq!(Locale::from_str("fr"), Locale::Ka);
    }
}
