//! Locale handling for the DeepL API.
//!
//! This module owns the closed set of language codes the provider accepts and
//! the single normalization boundary that turns user input into a [`Locale`].
//!
//! # Architecture
//!
//! - `locale`: The `Locale` enumeration and its string-tag projection
//! - `registry`: Lookup and normalization of user-supplied locale strings
//!
//! # Example
//!
//! ```rust,ignore
//! use deepl_translate::i18n::{Locale, LocaleRegistry};
//!
//! let czech = LocaleRegistry::get().normalize(" cs ")?;
//! assert_eq!(czech, Locale::Cs);
//! ```

mod locale;
mod registry;

pub use locale::Locale;
pub use registry::{IntoLocale, LocaleRegistry, UnsupportedLocaleError};
