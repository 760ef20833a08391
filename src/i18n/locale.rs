//! Locale type: the closed set of language codes DeepL translates between.

use std::fmt;
use std::str::FromStr;

use crate::i18n::{LocaleRegistry, UnsupportedLocaleError};

/// A language code supported by the DeepL API.
///
/// The string tag returned by [`Locale::code`] is exactly what the API expects
/// in `source_lang` / `target_lang` and what the result cache uses in its keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    Bg,
    Cs,
    Da,
    De,
    El,
    EnGb,
    EnUs,
    /// Unspecified English, kept for backward compatibility. Prefer `EnGb` or `EnUs`.
    En,
    Es,
    Et,
    Fi,
    Fr,
    Hu,
    Id,
    It,
    Ja,
    Lt,
    Lv,
    Nl,
    Pl,
    /// All Portuguese varieties excluding Brazilian Portuguese.
    PtPt,
    PtBr,
    /// Unspecified Portuguese, kept for backward compatibility. Prefer `PtPt` or `PtBr`.
    Pt,
    Ro,
    Ru,
    Sk,
    Sl,
    Sv,
    Tr,
    Uk,
    Zh,
}

impl Locale {
    /// Every supported locale, in registry order.
    pub const ALL: [Locale; 31] = [
        Locale::Bg,
        Locale::Cs,
        Locale::Da,
        Locale::De,
        Locale::El,
        Locale::EnGb,
        Locale::EnUs,
        Locale::En,
        Locale::Es,
        Locale::Et,
        Locale::Fi,
        Locale::Fr,
        Locale::Hu,
        Locale::Id,
        Locale::It,
        Locale::Ja,
        Locale::Lt,
        Locale::Lv,
        Locale::Nl,
        Locale::Pl,
        Locale::PtPt,
        Locale::PtBr,
        Locale::Pt,
        Locale::Ro,
        Locale::Ru,
        Locale::Sk,
        Locale::Sl,
        Locale::Sv,
        Locale::Tr,
        Locale::Uk,
        Locale::Zh,
    ];

    /// Uppercase tag sent to the API (e.g. "DE", "EN-GB").
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Bg => "BG",
            Locale::Cs => "CS",
            Locale::Da => "DA",
            Locale::De => "DE",
            Locale::El => "EL",
            Locale::EnGb => "EN-GB",
            Locale::EnUs => "EN-US",
            Locale::En => "EN",
            Locale::Es => "ES",
            Locale::Et => "ET",
            Locale::Fi => "FI",
            Locale::Fr => "FR",
            Locale::Hu => "HU",
            Locale::Id => "ID",
            Locale::It => "IT",
            Locale::Ja => "JA",
            Locale::Lt => "LT",
            Locale::Lv => "LV",
            Locale::Nl => "NL",
            Locale::Pl => "PL",
            Locale::PtPt => "PT-PT",
            Locale::PtBr => "PT-BR",
            Locale::Pt => "PT",
            Locale::Ro => "RO",
            Locale::Ru => "RU",
            Locale::Sk => "SK",
            Locale::Sl => "SL",
            Locale::Sv => "SV",
            Locale::Tr => "TR",
            Locale::Uk => "UK",
            Locale::Zh => "ZH",
        }
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Locale::Bg => "Bulgarian",
            Locale::Cs => "Czech",
            Locale::Da => "Danish",
            Locale::De => "German",
            Locale::El => "Greek",
            Locale::EnGb => "English (British)",
            Locale::EnUs => "English (American)",
            Locale::En => "English",
            Locale::Es => "Spanish",
            Locale::Et => "Estonian",
            Locale::Fi => "Finnish",
            Locale::Fr => "French",
            Locale::Hu => "Hungarian",
            Locale::Id => "Indonesian",
            Locale::It => "Italian",
            Locale::Ja => "Japanese",
            Locale::Lt => "Lithuanian",
            Locale::Lv => "Latvian",
            Locale::Nl => "Dutch",
            Locale::Pl => "Polish",
            Locale::PtPt => "Portuguese",
            Locale::PtBr => "Portuguese (Brazilian)",
            Locale::Pt => "Portuguese",
            Locale::Ro => "Romanian",
            Locale::Ru => "Russian",
            Locale::Sk => "Slovak",
            Locale::Sl => "Slovenian",
            Locale::Sv => "Swedish",
            Locale::Tr => "Turkish",
            Locale::Uk => "Ukrainian",
            Locale::Zh => "Chinese",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocaleRegistry::get().normalize(s)
    }
}
