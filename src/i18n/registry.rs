//! Locale registry: single source of truth for the codes DeepL accepts.
//!
//! The registry is a lazily initialized singleton (`OnceLock`), built once from
//! [`Locale::ALL`] and immutable afterwards. All user-supplied locale strings
//! pass through [`LocaleRegistry::normalize`], so validation happens in one place.

use std::sync::OnceLock;

use crate::i18n::Locale;

/// Returned when a locale string does not match any supported code.
///
/// The message lists every supported code so the caller can correct the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Locale is not supported now, because \"{given}\" given. Did you mean \"{}\"?",
    .supported.join("\", \"")
)]
pub struct UnsupportedLocaleError {
    /// The trimmed, uppercased input.
    pub given: String,
    /// Every supported code, in registry order.
    pub supported: Vec<&'static str>,
}

/// Global locale registry.
pub struct LocaleRegistry {
    locales: Vec<Locale>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global registry instance, initializing it on first call.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: Locale::ALL.to_vec(),
        })
    }

    /// Look up a locale by its exact uppercase code.
    pub fn get_by_code(&self, code: &str) -> Option<Locale> {
        self.locales.iter().copied().find(|l| l.code() == code)
    }

    /// All supported locales.
    pub fn list_all(&self) -> &[Locale] {
        &self.locales
    }

    /// All supported codes, in registry order.
    pub fn supported_codes(&self) -> Vec<&'static str> {
        self.locales.iter().map(Locale::code).collect()
    }

    /// Validate a user-supplied locale string.
    ///
    /// Input is trimmed and uppercased before lookup, so `" en-gb "` and
    /// `"EN-GB"` both resolve to [`Locale::EnGb`].
    ///
    /// # Errors
    /// Returns [`UnsupportedLocaleError`] if no registered code matches.
    pub fn normalize(&self, input: &str) -> Result<Locale, UnsupportedLocaleError> {
        let code = input.trim().to_uppercase();
        self.get_by_code(&code)
            .ok_or_else(|| UnsupportedLocaleError {
                given: code,
                supported: self.supported_codes(),
            })
    }
}

/// Anything that can stand in for a locale: a raw string or a typed [`Locale`].
///
/// Typed values pass through without re-validation.
pub trait IntoLocale {
    fn into_locale(self) -> Result<Locale, UnsupportedLocaleError>;
}

impl IntoLocale for Locale {
    fn into_locale(self) -> Result<Locale, UnsupportedLocaleError> {
        Ok(self)
    }
}

impl IntoLocale for &str {
    fn into_locale(self) -> Result<Locale, UnsupportedLocaleError> {
        LocaleRegistry::get().normalize(self)
    }
}

impl IntoLocale for String {
    fn into_locale(self) -> Result<Locale, UnsupportedLocaleError> {
        LocaleRegistry::get().normalize(&self)
    }
}

impl IntoLocale for &String {
    fn into_locale(self) -> Result<Locale, UnsupportedLocaleError> {
        LocaleRegistry::get().normalize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_exact() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.get_by_code("CS"), Some(Locale::Cs));
        assert_eq!(registry.get_by_code("EN-GB"), Some(Locale::EnGb));
        assert_eq!(registry.get_by_code("cs"), None);
        assert_eq!(registry.get_by_code("XX"), None);
    }

    #[test]
    fn test_list_all_matches_enum() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.list_all().len(), 31);
        assert_eq!(registry.list_all(), &Locale::ALL[..]);
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.normalize("cs").unwrap(), Locale::Cs);
        assert_eq!(registry.normalize("  De\t").unwrap(), Locale::De);
        assert_eq!(registry.normalize("pt-br").unwrap(), Locale::PtBr);
    }

    #[test]
    fn test_normalize_rejects_unknown() {
        let err = LocaleRegistry::get().normalize(" xx ").unwrap_err();
        assert_eq!(err.given, "XX");

        let message = err.to_string();
        assert!(message.contains("\"XX\" given"));
        assert!(message.contains("\"BG\", \"CS\""));
        assert!(message.ends_with("\"ZH\"?"));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(LocaleRegistry::get().normalize("   ").is_err());
    }

    #[test]
    fn test_normalize_rejects_underscore_variant() {
        // The enum-style name is not a valid tag
        assert!(LocaleRegistry::get().normalize("EN_GB").is_err());
    }

    #[test]
    fn test_into_locale_typed_passthrough() {
        assert_eq!(Locale::Ja.into_locale().unwrap(), Locale::Ja);
    }

    #[test]
    fn test_into_locale_strings() {
        assert_eq!("sv".into_locale().unwrap(), Locale::Sv);
        assert_eq!(String::from("uk").into_locale().unwrap(), Locale::Uk);
        let owned = String::from("zh");
        assert_eq!((&owned).into_locale().unwrap(), Locale::Zh);
    }

    proptest! {
        #[test]
        fn normalize_ignores_case_and_padding(
            index in 0usize..31,
            lower in any::<bool>(),
            left in "[ \t\n]{0,3}",
            right in "[ \t\n]{0,3}",
        ) {
            let locale = Locale::ALL[index];
            let code = if lower { locale.code().to_lowercase() } else { locale.code().to_string() };
            let input = format!("{left}{code}{right}");

            let registry = LocaleRegistry::get();
            let direct = registry.normalize(&input).unwrap();
            let pre_normalized = registry.normalize(&input.trim().to_uppercase()).unwrap();
            prop_assert_eq!(direct, locale);
            prop_assert_eq!(direct, pre_normalized);
        }

        #[test]
        fn unsupported_error_lists_every_code(input in "[A-Z]{3,6}[0-9]") {
            let err = LocaleRegistry::get().normalize(&input).unwrap_err();
            let message = err.to_string();
            for code in LocaleRegistry::get().supported_codes() {
                let quoted = format!("\"{}\"", code);
                prop_assert!(message.contains(&quoted));
            }
        }
    }
}
