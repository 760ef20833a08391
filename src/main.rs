//! Translate stdin with DeepL.
//!
//! Usage:
//!   echo "Hello" | deepl-translate DE            # auto-detect source
//!   echo "Hello" | deepl-translate DE EN         # explicit source
//!   echo "Ahoj" | deepl-translate CS --fix       # round-trip grammar fix
//!
//! Required environment variables:
//! - DEEPL_API_KEY
//!
//! Optional:
//! - DEEPL_FREE (defaults to false)
//! - DEEPL_API_URL (defaults to the endpoint for the account tier)
//! - DEEPL_CACHE_DIR (defaults to a directory under the system temp dir)
//! - DEEPL_TIMEOUT_SECS (defaults to 5)

use anyhow::{bail, Context, Result};
use deepl_translate::{config::Config, TranslationClient};
use std::io::Read;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deepl_translate=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut fix = false;
    let mut locales = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fix" => fix = true,
            _ => locales.push(arg),
        }
    }

    let (target, source) = match locales.as_slice() {
        [target] => (target.clone(), None),
        [target, source] if !fix => (target.clone(), Some(source.clone())),
        _ => bail!("Usage: deepl-translate <TARGET> [SOURCE] [--fix] < text"),
    };

    let config = Config::from_env()?;
    let client = TranslationClient::from_config(&config)?;

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;

    let output = if fix {
        info!("Fixing {} text via round-trip translation", target);
        client.fix_grammarly(&text, target.as_str()).await?
    } else {
        info!("Translating to {}", target);
        client.translate(&text, target.as_str(), source.as_deref()).await?
    };

    println!("{}", output);
    Ok(())
}
