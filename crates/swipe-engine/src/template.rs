//! Ideal swipe paths for dictionary words.

use crate::error::{SwipeError, SwipeResult};
use crate::gesture::NormalizedPath;
use crate::keyboard::{get_word_path, simplify_path, KeyboardLayout};
use crate::types::Point;

/// Key centres a perfect swipe of `word` visits, with repeated letters
/// collapsed to one waypoint.
pub fn ideal_waypoints(word: &str, layout: &KeyboardLayout) -> SwipeResult<Vec<Point>> {
    let raw = get_word_path(word, layout)?;
    if raw.is_empty() {
        return Err(SwipeError::InvalidInput("empty word".to_string()));
    }
    Ok(simplify_path(&raw))
}

/// The ideal path of `word`, resampled to `n` points so it lines up
/// index-for-index with a normalized input.
pub fn ideal_path(word: &str, layout: &KeyboardLayout, n: usize) -> SwipeResult<NormalizedPath> {
    let waypoints = ideal_waypoints(word, layout)?;
    NormalizedPath::resample(&waypoints, n.max(1))
        .ok_or_else(|| SwipeError::InvalidInput(format!("cannot resample {:?}", word)))
}
