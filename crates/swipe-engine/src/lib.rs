//! Swipe typing prediction engine.
//!
//! A continuous gesture over a soft keyboard is smoothed, resampled to a fixed
//! number of arc-length-uniform points and compared point-for-point against
//! the ideal path of each plausible dictionary word. Geometric cost is blended
//! with word popularity to produce a ranked candidate list.

pub mod config;
pub mod dictionary;
pub mod error;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod gesture;
pub mod keyboard;
pub mod predict;
pub mod scorer;
pub mod template;
pub mod types;

pub use config::ScoringConfig;
pub use dictionary::{Dictionary, DictionaryEntry};
pub use error::{ErrorKind, SwipeError, SwipeResult};
pub use gesture::{Gesture, NormalizedPath};
pub use keyboard::{euclidean_dist as euclidean_distance, KeyboardLayout};
pub use types::{GesturePoint, Point, Prediction, PredictionResponse, ScoreBreakdown};

use predict::RankContext;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

#[derive(Clone)]
struct EngineState {
    dictionary: Arc<Dictionary>,
    pop_weight: f64,
}

/// Shared decoding context: the installed dictionary plus the popularity
/// blend factor, behind a read-mostly lock.
///
/// Predictions take a snapshot (an `Arc` to the dictionary and the current
/// blend) and never hold the lock while scoring, so a reload that lands
/// mid-prediction is invisible to it.
pub struct SwipeEngine {
    state: RwLock<EngineState>,
    layout: KeyboardLayout,
    config: ScoringConfig,
}

impl SwipeEngine {
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self::with_layout(KeyboardLayout::qwerty(), config)
    }

    pub fn with_layout(layout: KeyboardLayout, config: ScoringConfig) -> Self {
        let config = config.sanitized();
        Self {
            state: RwLock::new(EngineState {
                dictionary: Arc::new(Dictionary::new()),
                pop_weight: config.default_pop_weight,
            }),
            layout,
            config,
        }
    }

    fn snapshot(&self) -> EngineState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set the popularity blend factor. Out-of-range values are clamped;
    /// the applied value is returned.
    pub fn set_pop_weight(&self, weight: f64) -> f64 {
        let clamped = config::clamp_pop_weight(weight);
        if clamped != weight {
            warn!("Pop weight {} out of range, clamped to {}", weight, clamped);
        }
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_weight = clamped;
        clamped
    }

    pub fn pop_weight(&self) -> f64 {
        self.snapshot().pop_weight
    }

    /// Parse `freq_text` and install it, replacing the current dictionary.
    /// On error the previous dictionary stays in place.
    pub fn load_dictionary(&self, freq_text: &str) -> SwipeResult<usize> {
        let dict = Dictionary::from_text(freq_text).map_err(|e| {
            warn!("Dictionary load rejected: {}", e);
            e
        })?;
        Ok(self.install(dict))
    }

    pub fn load_dictionary_from_path<P: AsRef<Path>>(&self, path: P) -> SwipeResult<usize> {
        let path = path.as_ref();
        let dict = Dictionary::from_path(path).map_err(|e| {
            warn!("Dictionary load from {:?} rejected: {}", path, e);
            e
        })?;
        info!("Loaded dictionary from {:?}", path);
        Ok(self.install(dict))
    }

    /// Swap in a fully built dictionary.
    pub fn install(&self, dictionary: Dictionary) -> usize {
        let count = dictionary.len();
        let skipped = dictionary.skipped_lines();
        let dictionary = Arc::new(dictionary);
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .dictionary = dictionary;
        info!(
            "Installed dictionary with {} words ({} malformed lines skipped)",
            count, skipped
        );
        count
    }

    pub fn word_count(&self) -> usize {
        self.snapshot().dictionary.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.snapshot().dictionary.contains(word)
    }

    pub fn dictionary(&self) -> Arc<Dictionary> {
        self.snapshot().dictionary
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn normalize(&self, raw: &[GesturePoint]) -> SwipeResult<Gesture> {
        gesture::normalize(
            raw,
            &self.layout,
            self.config.sample_points,
            self.config.smoothing_window,
        )
    }

    /// Rank dictionary words against a raw gesture, best first.
    /// `limit == 0` returns every scored candidate.
    pub fn predict(&self, raw: &[GesturePoint], limit: usize) -> SwipeResult<Vec<Prediction>> {
        let gesture = self.normalize(raw)?;
        let state = self.snapshot();
        Ok(self.context(&state).predict(&gesture, limit))
    }

    /// Same as [`SwipeEngine::predict`] but scores every word, without
    /// first-letter pruning.
    pub fn predict_unpruned(
        &self,
        raw: &[GesturePoint],
        limit: usize,
    ) -> SwipeResult<Vec<Prediction>> {
        let gesture = self.normalize(raw)?;
        let state = self.snapshot();
        Ok(self.context(&state).predict_unpruned(&gesture, limit))
    }

    pub fn predict_from_path(
        &self,
        raw_path: &[(f64, f64)],
        limit: usize,
    ) -> SwipeResult<Vec<Prediction>> {
        self.predict(&types::gesture_from_coords(raw_path), limit)
    }

    /// Decode `"x1,y1;x2,y2;..."` and return the JSON wire document.
    /// A non-positive `limit` means no limit.
    pub fn predict_json(&self, input: &str, limit: i64) -> SwipeResult<String> {
        let raw = gesture::parse_path(input)?;
        let limit = usize::try_from(limit).unwrap_or(0);
        let predictions = self.predict(&raw, limit)?;
        Ok(PredictionResponse::new(&predictions).to_json()?)
    }

    fn context<'a>(&'a self, state: &'a EngineState) -> RankContext<'a> {
        RankContext {
            dictionary: &state.dictionary,
            layout: &self.layout,
            config: &self.config,
            blend: state.pop_weight,
        }
    }
}

impl Default for SwipeEngine {
    fn default() -> Self {
        Self::new()
    }
}
