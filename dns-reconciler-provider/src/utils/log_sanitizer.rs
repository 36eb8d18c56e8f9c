//! Keeps secrets and oversized payloads out of log lines.

/// Longest body excerpt written to a log line, in bytes.
const LOG_EXCERPT_BYTES: usize = 256;

/// Leading characters of a secret left readable.
const SECRET_PREFIX_CHARS: usize = 4;

/// Cuts `s` to at most `LOG_EXCERPT_BYTES` bytes on a char boundary and
/// notes the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_EXCERPT_BYTES {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= LOG_EXCERPT_BYTES)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Masks a credential, keeping a short prefix for correlation.
///
/// Secrets too short to keep a prefix safely are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() < SECRET_PREFIX_CHARS * 2 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(SECRET_PREFIX_CHARS).collect();
    format!("{prefix}****")
}
