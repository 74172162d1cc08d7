use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub fn build_client(timeout_secs: u64) -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetches the published CSV. Direct fetch first; if that fails, exactly one
/// fallback attempt through the passthrough proxy. No automatic retries.
pub fn fetch_csv(client: &Client, config: &Config) -> Result<String, FetchError> {
    let target = cache_busted(&config.sheet_url);

    match get_text(client, &target) {
        Ok(text) => Ok(text),
        Err(direct_err) => {
            eprintln!(
                "Warning: Direct fetch failed ({}), trying proxy",
                direct_err
            );
            get_text(client, &proxy_url(&config.proxy_url, &target))
        }
    }
}

fn get_text(client: &Client, url: &str) -> Result<String, FetchError> {
    let text = client.get(url).send()?.error_for_status()?.text()?;
    Ok(text)
}

/// The sheet endpoint caches aggressively; a timestamp plus a random value
/// keeps every load distinct.
fn cache_busted(sheet_url: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000);
    let separator = if sheet_url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}&r={}", sheet_url, separator, timestamp, random)
}

/// The relay takes the full target URL percent-encoded into its query.
fn proxy_url(proxy: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{}{}", proxy, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_busting_extends_query() {
        let busted = cache_busted("https://example.com/pub?output=csv");
        assert!(busted.starts_with("https://example.com/pub?output=csv&t="));
        assert!(busted.contains("&r="));
    }

    #[test]
    fn test_cache_busting_without_existing_query() {
        let busted = cache_busted("https://example.com/sheet.csv");
        assert!(busted.starts_with("https://example.com/sheet.csv?t="));
    }

    #[test]
    fn test_proxy_url_percent_encodes_target() {
        let url = proxy_url(
            "https://relay.invalid/raw?url=",
            "https://example.com/pub?output=csv&t=1",
        );
        assert_eq!(
            url,
            "https://relay.invalid/raw?url=https%3A%2F%2Fexample.com%2Fpub%3Foutput%3Dcsv%26t%3D1"
        );
    }
}
