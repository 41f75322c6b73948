use std::collections::BTreeMap;
use std::env;

/// Keeps the first five characters of a key for log correlation.
pub fn mask_api_key(key: &str) -> String {
    let visible: String = key.chars().take(5).collect();
    let hidden = key.chars().count().saturating_sub(5);
    format!("{}{}", visible, "*".repeat(hidden))
}

/// Environment snapshot safe to log: the provider key is partially masked,
/// anything else that looks like a secret is fully hidden.
pub fn masked_environment() -> BTreeMap<String, String> {
    env::vars()
        .map(|(key, value)| {
            let shown = if key == crate::config::API_KEY_VAR {
                mask_api_key(&value)
            } else if is_secret(&key) {
                "*".repeat(8)
            } else {
                value
            };
            (key, shown)
        })
        .collect()
}

fn is_secret(key: &str) -> bool {
    let upper = key.to_uppercase();
    ["KEY", "SECRET", "TOKEN", "PASSWORD"]
        .iter()
        .any(|marker| upper.contains(marker))
}

pub fn request_id() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S%f").to_string()
}
