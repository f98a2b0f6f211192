//! Fragment helpers shared by initial-tab detection and history sync.

/// Normalizes a `location.hash` value: strips the leading `#` and
/// percent-decodes it. Empty fragments are `None`.
pub fn normalize(hash: &str) -> Option<String> {
    let raw = hash.strip_prefix('#').unwrap_or(hash);
    if raw.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(decoded)
}

/// `#`-prefixed, percent-encoded form suitable for `location.hash`.
pub fn to_hash(fragment: &str) -> String {
    format!("#{}", urlencoding::encode(fragment))
}
