use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

fn unsafe_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex"))
}

fn dot_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.{2,}").expect("static regex"))
}

/// Reduces a user-supplied file name to characters safe for an object key.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let cleaned = unsafe_chars().replace_all(base, "_");
    let cleaned = dot_runs().replace_all(&cleaned, ".");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `<unix-millis>_<random hex>_<sanitized name>`.
///
/// The random part keeps keys distinct when the same name is uploaded twice
/// within one millisecond.
pub fn derive_storage_key(file_name: &str, now: DateTime<Utc>) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}",
        now.timestamp_millis(),
        &nonce[..12],
        sanitize_file_name(file_name)
    )
}

pub fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Inline `data:` URI used only for the local preview, never as a record URL.
pub fn preview_data_uri(file_name: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        content_type_for(file_name),
        STANDARD.encode(bytes)
    )
}
