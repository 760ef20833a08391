//! DeepL translation client.
//!
//! [`TranslationClient`] ties locale normalization, the result cache and the
//! HTTP transport together, and turns provider failures into [`TranslateError`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{FileResultCache, ResultCache};
use crate::config::Config;
use crate::i18n::{IntoLocale, Locale, UnsupportedLocaleError};
use crate::logger::{Logger, TracingLogger};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Cache-key stand-in for an absent source locale. Never sent to the API.
pub const AUTO_DETECT_SOURCE: &str = "NULL";

const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
const PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

const AUTH_HELP_URL: &str =
    "https://support.deepl.com/hc/en-us/articles/360020031840-Error-code-403";

/// Errors surfaced to callers of [`TranslationClient`].
///
/// Cache failures never appear here; they are absorbed and logged.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    UnsupportedLocale(#[from] UnsupportedLocaleError),

    /// Any failed interaction with the provider: transport failure, non-200
    /// status, malformed body or a provider-reported message.
    #[error("DeepL API request failed: {message}")]
    RemoteApi {
        /// HTTP status, if a response was received at all.
        status: Option<u16>,
        message: String,
    },
}

impl TranslateError {
    fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        TranslateError::RemoteApi {
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<TranslatedText>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: Option<String>,
}

/// DeepL client with a persistent result cache.
///
/// Each call runs one linear path: normalize locales, consult the cache, call
/// the API on a miss, store the result. Collaborators are shared handles, so a
/// client can be used from many tasks at once; concurrent misses on the same
/// key may both reach the API.
#[derive(Clone)]
pub struct TranslationClient {
    api_key: String,
    free: bool,
    uri: String,
    cache: Arc<dyn ResultCache>,
    transport: Arc<dyn HttpTransport>,
    logger: Option<Arc<dyn Logger>>,
}

impl TranslationClient {
    /// Create a client. The endpoint is derived from `free` and can be
    /// replaced later with [`TranslationClient::set_uri`].
    pub fn new(
        api_key: &str,
        free: bool,
        cache: Arc<dyn ResultCache>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            api_key: api_key.trim().to_string(),
            free,
            uri: default_endpoint(free).to_string(),
            cache,
            transport,
            logger: None,
        }
    }

    /// Wire a client from environment-derived configuration: file cache,
    /// reqwest transport and a tracing-backed logger.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        use anyhow::Context;

        let cache = FileResultCache::new(config.cache_dir.clone())
            .context("Failed to open translation cache")?;
        let transport =
            ReqwestTransport::new(config.timeout).context("Failed to build HTTP client")?;

        let mut client = Self::new(
            &config.api_key,
            config.free,
            Arc::new(cache),
            Arc::new(transport),
        )
        .with_logger(Arc::new(TracingLogger));

        if let Some(uri) = &config.api_url {
            client.set_uri(uri);
        }

        Ok(client)
    }

    /// Attach the sink that receives cache-write failures.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: &str) {
        self.uri = uri.to_string();
    }

    /// Translate `text` into `target`, letting the provider detect the source
    /// language when `source` is `None`.
    pub async fn translate<T, S>(
        &self,
        text: &str,
        target: T,
        source: Option<S>,
    ) -> Result<String, TranslateError>
    where
        T: IntoLocale,
        S: IntoLocale,
    {
        self.translate_with_args(text, target, source, &BTreeMap::new())
            .await
    }

    /// Like [`TranslationClient::translate`], forwarding extra API parameters
    /// (e.g. `formality`, `tag_handling`).
    ///
    /// `text`, `target_lang` and `source_lang` always win over same-named
    /// entries in `args`. Extra parameters are not part of the cache key.
    pub async fn translate_with_args<T, S>(
        &self,
        text: &str,
        target: T,
        source: Option<S>,
        args: &BTreeMap<String, String>,
    ) -> Result<String, TranslateError>
    where
        T: IntoLocale,
        S: IntoLocale,
    {
        let source = source.map(IntoLocale::into_locale).transpose()?;
        let target = target.into_locale()?;
        let text = text.trim();

        let source_tag = source.map_or(AUTO_DETECT_SOURCE, |l| l.code());
        if let Some(cached) = self.cache.load(text, source_tag, target.code()) {
            debug!("Cache hit for {} -> {}", source_tag, target);
            return Ok(cached);
        }
        debug!("Cache miss for {} -> {}, calling DeepL API", source_tag, target);

        let fields = build_form(text, target, source, args);
        let translated = self.process_api(&fields).await?;

        if let Err(e) = self
            .cache
            .save(text, &translated, source_tag, target.code())
        {
            let context = [
                ("exception", e.to_string()),
                ("source", source_tag.to_string()),
                ("target", target.code().to_string()),
            ];
            match &self.logger {
                Some(logger) => logger.critical(&e.to_string(), &context),
                None => warn!("Failed to cache translation: {}", e),
            }
        }

        Ok(translated)
    }

    /// Normalize phrasing by translating to a helper language and back.
    ///
    /// The helper is British English for Czech text and German for everything
    /// else. Each hop is cached under its own key.
    pub async fn fix_grammarly<L: IntoLocale>(
        &self,
        text: &str,
        locale: L,
    ) -> Result<String, TranslateError> {
        let locale = locale.into_locale()?;
        let helper = helper_locale(locale);

        let there = self.translate(text, helper, Some(locale)).await?;
        self.translate(&there, locale, Some(helper)).await
    }

    async fn process_api(&self, fields: &[(String, String)]) -> Result<String, TranslateError> {
        let authorization = format!("DeepL-Auth-Key {}", self.api_key);
        let response = self
            .transport
            .post_form(&self.uri, &authorization, fields)
            .await
            .map_err(|e| {
                let detail = if e.timed_out {
                    format!("{} (timed out)", e.message)
                } else {
                    e.message
                };
                TranslateError::remote(None, detail)
            })?;

        if response.status != 200 {
            return Err(TranslateError::remote(
                Some(response.status),
                describe_http_failure(response.status, &response.body, self.free),
            ));
        }

        let data: TranslateResponse = serde_json::from_str(&response.body).map_err(|e| {
            TranslateError::remote(
                Some(response.status),
                format!("DeepL API response is malformed: {}", e),
            )
        })?;

        if let Some(text) = data.translations.into_iter().next().and_then(|t| t.text) {
            return Ok(text);
        }
        if let Some(message) = data.message {
            return Err(TranslateError::remote(Some(response.status), message));
        }
        Err(TranslateError::remote(
            Some(response.status),
            "DeepL API response is broken.",
        ))
    }
}

impl fmt::Debug for TranslationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationClient")
            .field("api_key", &"<redacted>")
            .field("free", &self.free)
            .field("uri", &self.uri)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

fn default_endpoint(free: bool) -> &'static str {
    if free {
        FREE_ENDPOINT
    } else {
        PRO_ENDPOINT
    }
}

fn helper_locale(locale: Locale) -> Locale {
    if locale == Locale::Cs {
        Locale::EnGb
    } else {
        Locale::De
    }
}

/// Caller arguments first, then the mandatory fields on top of them.
fn build_form(
    text: &str,
    target: Locale,
    source: Option<Locale>,
    args: &BTreeMap<String, String>,
) -> Vec<(String, String)> {
    let mut form = args.clone();
    form.insert("text".to_string(), text.to_string());
    form.insert("target_lang".to_string(), target.code().to_string());
    match source {
        Some(source) => {
            form.insert("source_lang".to_string(), source.code().to_string());
        }
        None => {
            form.remove("source_lang");
        }
    }
    form.into_iter().collect()
}

/// Actionable error text for a non-200 response.
fn describe_http_failure(status: u16, body: &str, free: bool) -> String {
    let mut message = format!("[HTTP CODE {}]", status);

    let provider_message = serde_json::from_str::<TranslateResponse>(body)
        .ok()
        .and_then(|r| r.message);
    match provider_message {
        Some(detail) => message.push_str(&format!(" {}", detail)),
        None if !body.trim().is_empty() => message.push_str(&format!(" {}", body.trim())),
        None => {}
    }

    if status == 403 {
        message.push_str(
            "\nError 403: Authorization failed. Please supply a valid auth_key parameter",
        );
        message.push_str(&format!("\nMore info: {}", AUTH_HELP_URL));
    }
    if status == 456 {
        message.push_str("\nQuota exceeded. The character limit has been reached");
    }
    if free {
        message.push_str(
            "\nNote for free accounts: DeepL requires credit card verification for newly created accounts. \
             If your account has not been verified, it may disable API query processing.",
        );
    }

    message
}
