use regex::Regex;
use std::sync::OnceLock;

/// Slot holding the photo collection.
pub const DEFAULT_SLOT_NAME: &str = "photos";

/// Bucket receiving uploaded images.
pub const DEFAULT_BUCKET: &str = "uploads";

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("static regex"))
}

/// Slot and bucket names must be a single path segment.
pub fn is_valid_slot_name(name: &str) -> bool {
    name_pattern().is_match(name) && !name.contains("..")
}

/// Object keys follow the same rule as slot names.
pub fn is_valid_object_key(key: &str) -> bool {
    is_valid_slot_name(key)
}
