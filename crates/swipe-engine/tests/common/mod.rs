#![allow(dead_code)]

use swipe_engine::gesture::resample_path;
use swipe_engine::template::ideal_waypoints;
use swipe_engine::types::gesture_from_coords;
use swipe_engine::{GesturePoint, KeyboardLayout, SwipeEngine};

pub const WORD_FREQ: &str = include_str!("../../../../data/word_freq.txt");

/// Densely sampled ideal path of `word`, as a finger would draw it.
pub fn trace(word: &str) -> Vec<GesturePoint> {
    let layout = KeyboardLayout::qwerty();
    let waypoints = ideal_waypoints(word, &layout).expect("word must be on the layout");
    let coords: Vec<(f64, f64)> = resample_path(&waypoints, 150)
        .iter()
        .map(|p| (p.x, p.y))
        .collect();
    gesture_from_coords(&coords)
}

/// `trace` with deterministic jitter of up to `amplitude` key widths.
pub fn jittered_trace(word: &str, amplitude: f64, seed: u64) -> Vec<GesturePoint> {
    let mut rng = fastrand::Rng::with_seed(seed);
    trace(word)
        .into_iter()
        .map(|p| GesturePoint {
            x: p.x + (rng.f64() - 0.5) * 2.0 * amplitude,
            y: p.y + (rng.f64() - 0.5) * 2.0 * amplitude,
            t: p.t,
        })
        .collect()
}

pub fn engine_with(text: &str) -> SwipeEngine {
    let engine = SwipeEngine::new();
    engine.load_dictionary(text).expect("dictionary must load");
    engine
}

pub fn bundled_engine() -> SwipeEngine {
    engine_with(WORD_FREQ)
}
