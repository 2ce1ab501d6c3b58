//! Environment helpers: centralized dotenv loading and ergonomic getters.
//! Call `init_env()` once early in each binary (or rely on lazy Once).
use std::str::FromStr;
use std::sync::Once;

static INIT: Once = Once::new();

/// Published spreadsheet export used when FEED_URL is not set.
const DEFAULT_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTRzxK2v6S7Nuv5ANm4czSpdHhpyWNzTvpzIear47a5fH0lZSGu5psAXig2xCwegSJZuVdrH9N9PGgK/pub?output=csv";

/// Load .env if present, exactly once. Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Get required env var; error if missing.
pub fn env_req(key: &str) -> anyhow::Result<String> {
    init_env();
    std::env::var(key).map_err(|_| anyhow::anyhow!("missing env var {key}"))
}

/// Get optional env var (None if unset or empty).
pub fn env_opt(key: &str) -> Option<String> {
    init_env();
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Get parsed value with default fallback.
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Clone,
{
    init_env();
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Boolean flag; accepts 1/true/on/yes (case-insensitive) as true.
pub fn env_flag(key: &str, default: bool) -> bool {
    init_env();
    match std::env::var(key) {
        Ok(raw) => {
            let v = raw.trim().to_ascii_lowercase();
            matches!(v.as_str(), "1" | "true" | "on" | "yes")
        }
        Err(_) => default,
    }
}

/// The CSV feed endpoint (published spreadsheet export).
pub fn feed_url() -> String {
    env_opt("FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string())
}

/// Outbound WhatsApp deep link, with the prefilled enquiry text encoded.
pub fn whatsapp_url() -> String {
    if let Some(v) = env_opt("WHATSAPP_URL") {
        return v;
    }
    let number = env_opt("WHATSAPP_NUMBER").unwrap_or_else(|| "919204613635".into());
    let text = env_opt("WHATSAPP_TEXT")
        .unwrap_or_else(|| "Hi MOMCHIC! I saw your collection and want to know more.".into());
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(&text))
}

/// Outbound store-directions (map) link.
pub fn directions_url() -> String {
    env_opt("DIRECTIONS_URL")
        .unwrap_or_else(|| "https://maps.google.com/?q=MOMCHIC+Boutique+Daltonganj".into())
}

/// Outbound tel: link for the store phone.
pub fn phone_url() -> String {
    let number = env_opt("STORE_PHONE").unwrap_or_else(|| "+919204613635".into());
    format!("tel:{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_url_encodes_prefill_text() {
        // Default text contains spaces and '!' which must be percent-encoded.
        let url = whatsapp_url();
        assert!(url.starts_with("https://wa.me/"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn phone_url_is_tel_scheme() {
        assert!(phone_url().starts_with("tel:"));
    }
}
