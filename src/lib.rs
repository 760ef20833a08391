//! DeepL translation client with a persistent result cache.
//!
//! ```rust,ignore
//! use deepl_translate::{config::Config, TranslationClient};
//!
//! let client = TranslationClient::from_config(&Config::from_env()?)?;
//! let german = client.translate("Hello world", "DE", None::<&str>).await?;
//! let smoothed = client.fix_grammarly("Dobrý den, jak se máte?", "CS").await?;
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod i18n;
pub mod logger;
pub mod transport;

pub use cache::{CacheError, FileResultCache, ResultCache};
pub use client::{TranslateError, TranslationClient};
pub use i18n::{IntoLocale, Locale, LocaleRegistry, UnsupportedLocaleError};
pub use logger::{Logger, Severity, TracingLogger};
pub use transport::{HttpTransport, ReqwestTransport, TransportError, TransportResponse};
