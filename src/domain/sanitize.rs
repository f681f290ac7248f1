use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile the markup tag pattern"));

/// Strips markup-like substrings and surrounding whitespace from a
/// user-supplied field. Applied before validation and before the value is
/// interpolated anywhere.
pub fn sanitize(input: &str) -> String {
    MARKUP_TAG.replace_all(input, "").trim().to_owned()
}
