//! Geometric + popularity scoring of a single candidate word.
//!
//! score = (1 - blend) * squash(shape_weight * shape + location_weight * location)
//!       + blend * 1 / (1 + popularity)
//!
//! `squash(g) = g / (1 + g)` maps the unbounded geometric cost into [0, 1) so
//! it sits on the same scale as the popularity term. Lower is better.

use crate::config::ScoringConfig;
use crate::dictionary::DictionaryEntry;
use crate::error::{SwipeError, SwipeResult};
use crate::gesture::Gesture;
use crate::keyboard::{euclidean_dist, KeyboardLayout};
use crate::template::ideal_path;
use crate::types::{Prediction, ScoreBreakdown};
use std::cmp::Ordering;

const BOUND_SLACK: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Candidate {
    pub word: String,
    pub popularity: f64,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl Candidate {
    pub fn into_prediction(self) -> Prediction {
        Prediction {
            word: self.word,
            score: self.score,
            popularity: self.popularity,
            breakdown: self.breakdown,
        }
    }
}

// Ascending score, ties broken by word.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

pub fn popularity_cost(weight: f64) -> f64 {
    1.0 / (1.0 + weight.max(0.0))
}

pub fn squash(cost: f64) -> f64 {
    cost / (1.0 + cost)
}

fn unsquash(t: f64) -> f64 {
    t / (1.0 - t)
}

pub struct Scorer<'a> {
    gesture: &'a Gesture,
    layout: &'a KeyboardLayout,
    config: &'a ScoringConfig,
    blend: f64,
}

impl<'a> Scorer<'a> {
    pub fn new(
        gesture: &'a Gesture,
        layout: &'a KeyboardLayout,
        config: &'a ScoringConfig,
        blend: f64,
    ) -> Self {
        Self {
            gesture,
            layout,
            config,
            blend: crate::config::clamp_pop_weight(blend),
        }
    }

    pub fn score(&self, entry: &DictionaryEntry) -> SwipeResult<Candidate> {
        self.score_within(entry, None)?
            .ok_or_else(|| SwipeError::InvalidInput(format!("{:?} has no finite score", entry.word)))
    }

    /// Score `entry`, giving up early (`Ok(None)`) once it provably ranks
    /// after `worst`.
    pub fn score_within(
        &self,
        entry: &DictionaryEntry,
        worst: Option<&Candidate>,
    ) -> SwipeResult<Option<Candidate>> {
        let location = self.location_cost(&entry.word)?;
        let pop = popularity_cost(entry.weight);
        let b = self.blend;
        let wl = self.config.location_weight;
        let ws = self.config.shape_weight;

        let mut shape_budget = f64::INFINITY;
        if let Some(worst) = worst {
            let lower = (1.0 - b) * squash(wl * location) + b * pop;
            if lower > worst.score + BOUND_SLACK {
                return Ok(None);
            }
            if b < 1.0 && ws > 0.0 {
                let t = (worst.score + BOUND_SLACK - b * pop) / (1.0 - b);
                if t < 1.0 {
                    shape_budget = (unsquash(t.max(0.0)) - wl * location) / ws;
                }
            }
        }

        let input = self.gesture.path.points();
        let n = input.len();
        let template = ideal_path(&entry.word, self.layout, n)?;

        let sum_budget = shape_budget * n as f64;
        let mut sum = 0.0;
        for (p, q) in input.iter().zip(template.points()) {
            sum += euclidean_dist(p, q);
            if sum > sum_budget {
                return Ok(None);
            }
        }

        let shape = sum / n as f64;
        let normalized = squash(ws * shape + wl * location);
        let score = (1.0 - b) * normalized + b * pop;
        if !score.is_finite() {
            return Ok(None);
        }

        Ok(Some(Candidate {
            word: entry.word.clone(),
            popularity: entry.weight,
            score,
            breakdown: ScoreBreakdown {
                shape,
                location,
                normalized,
            },
        }))
    }

    /// Mean distance between the gesture's first/last landmarks and the
    /// word's first/last letters.
    fn location_cost(&self, word: &str) -> SwipeResult<f64> {
        let mut chars = word.chars();
        let first = chars
            .next()
            .ok_or_else(|| SwipeError::InvalidInput("empty word".to_string()))?;
        let last = chars.next_back().unwrap_or(first);

        let first_center = self.layout.key_center(first)?;
        let last_center = self.layout.key_center(last)?;

        let start = euclidean_dist(&self.gesture.first_landmark().point, &first_center);
        let end = euclidean_dist(&self.gesture.last_landmark().point, &last_center);
        Ok((start + end) / 2.0)
    }
}
