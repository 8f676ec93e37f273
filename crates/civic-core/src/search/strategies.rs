//! Substring strategies
//!
//! Platform-specific implementations:
//! - simd feature: memchr's memmem finder
//! - default: pure Rust `str::find`

/// Case-insensitive containment. `needle_lower` must already be lowercase.
#[inline]
pub(crate) fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    if haystack.len() < needle_lower.len() && haystack.is_ascii() {
        return false;
    }
    let haystack_lower = haystack.to_lowercase();
    find(&haystack_lower, needle_lower).is_some()
}

#[cfg(feature = "simd")]
#[inline]
fn find(haystack: &str, needle: &str) -> Option<usize> {
    memchr::memmem::find(haystack.as_bytes(), needle.as_bytes())
}

#[cfg(not(feature = "simd"))]
#[inline]
fn find(haystack: &str, needle: &str) -> Option<usize> {
    haystack.find(needle)
}
