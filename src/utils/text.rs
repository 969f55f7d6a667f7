//! Text helpers for length-limited form inputs

/// Truncate to at most `max` Unicode code points.
///
/// Mirrors an input's `maxlength`: the excess is dropped, never rejected.
pub fn truncate_code_points(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value.to_string(),
    }
}
