/// Builds the cache filename for a rendered skin. The identifier tail is the
/// last sixteen characters with the final one dropped; existing caches were
/// written with that slice, so it must not change.
pub fn derive_cache_key(identifier: &str, overlay: bool, margin: u32, upscale: u32) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let end = chars.len().saturating_sub(1);
    let start = chars.len().saturating_sub(16);
    let tail: String = chars[start..end].iter().collect();

    let stem = match tail.rfind('.') {
        Some(index) => &tail[..index],
        None => tail.as_str(),
    };

    let mut key = stem.to_string();
    if overlay {
        key.push('o');
    }
    if margin > 0 {
        key.push_str(&format!("m{margin}"));
    }
    if upscale > 1 {
        key.push_str(&format!("u{upscale}"));
    }
    key.push_str(".png");
    key
}
