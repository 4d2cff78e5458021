//! Candidate pruning, scoring and top-K selection.

use crate::config::ScoringConfig;
use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::gesture::Gesture;
use crate::keyboard::KeyboardLayout;
use crate::scorer::{Candidate, Scorer};
use crate::types::Prediction;
use std::collections::BinaryHeap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RankStats {
    pub considered: usize,
    pub abandoned: usize,
    pub skipped: usize,
}

/// Everything a single ranking pass reads. Borrowed from an engine snapshot.
pub struct RankContext<'a> {
    pub dictionary: &'a Dictionary,
    pub layout: &'a KeyboardLayout,
    pub config: &'a ScoringConfig,
    pub blend: f64,
}

impl<'a> RankContext<'a> {
    /// Rank words whose first letter is on or near the gesture's start key
    /// (or every word when pruning is disabled). `limit == 0` returns all
    /// scored candidates.
    pub fn predict(&self, gesture: &Gesture, limit: usize) -> Vec<Prediction> {
        if !self.config.prune {
            return self.predict_unpruned(gesture, limit);
        }
        let start_keys = self
            .layout
            .start_keys(&gesture.start(), self.config.start_tolerance);
        let entries = start_keys
            .iter()
            .flat_map(|&c| self.dictionary.candidates_by_first_letter(c));
        self.run(entries, gesture, limit)
    }

    /// Brute-force ranking over the whole dictionary.
    pub fn predict_unpruned(&self, gesture: &Gesture, limit: usize) -> Vec<Prediction> {
        self.run(self.dictionary.iter(), gesture, limit)
    }

    fn run<'d, I>(&self, entries: I, gesture: &Gesture, limit: usize) -> Vec<Prediction>
    where
        I: Iterator<Item = &'d DictionaryEntry>,
    {
        let started = Instant::now();
        let scorer = Scorer::new(gesture, self.layout, self.config, self.blend);
        let (ranked, stats) = select(entries, &scorer, limit);

        debug!(
            "Ranked {} candidates for a {:.2}-key gesture ({} abandoned, {} skipped) in {:?}",
            stats.considered,
            gesture.arc_length,
            stats.abandoned,
            stats.skipped,
            started.elapsed()
        );

        ranked.into_iter().map(Candidate::into_prediction).collect()
    }
}

/// Score `entries` and keep the best `limit` (all when `limit == 0`),
/// sorted best-first.
pub fn select<'d, I>(entries: I, scorer: &Scorer<'_>, limit: usize) -> (Vec<Candidate>, RankStats)
where
    I: Iterator<Item = &'d DictionaryEntry>,
{
    let mut stats = RankStats::default();

    if limit == 0 {
        let mut all: Vec<Candidate> = Vec::new();
        for entry in entries {
            stats.considered += 1;
            match scorer.score_within(entry, None) {
                Ok(Some(c)) => all.push(c),
                Ok(None) => stats.skipped += 1,
                Err(e) => {
                    debug!("Skipping candidate {:?}: {}", entry.word, e);
                    stats.skipped += 1;
                }
            }
        }
        all.sort();
        return (all, stats);
    }

    // Max-heap: the current worst of the kept candidates sits on top.
    // Grows with what is kept; `limit` may be far larger than the input.
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::new();
    for entry in entries {
        stats.considered += 1;
        let worst = if heap.len() == limit { heap.peek() } else { None };
        match scorer.score_within(entry, worst) {
            Ok(Some(c)) => {
                if heap.len() < limit {
                    heap.push(c);
                } else if heap.peek().is_some_and(|w| c < *w) {
                    heap.pop();
                    heap.push(c);
                }
            }
            Ok(None) => stats.abandoned += 1,
            Err(e) => {
                debug!("Skipping candidate {:?}: {}", entry.word, e);
                stats.skipped += 1;
            }
        }
    }

    (heap.into_sorted_vec(), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{normalize, resample_path};
    use crate::template::ideal_waypoints;
    use crate::types::gesture_from_coords;

    fn trace(word: &str, layout: &KeyboardLayout) -> Gesture {
        let waypoints = ideal_waypoints(word, layout).unwrap();
        let coords: Vec<(f64, f64)> = resample_path(&waypoints, 120)
            .iter()
            .map(|p| (p.x, p.y))
            .collect();
        normalize(&gesture_from_coords(&coords), layout, 64, 3).unwrap()
    }

    #[test]
    fn test_prediction() {
        let dict = Dictionary::from_text("hello\t1000\nhelp\t800\nhell\t600\nworld\t900\n").unwrap();
        let layout = KeyboardLayout::qwerty();
        let config = ScoringConfig::default();
        let ctx = RankContext {
            dictionary: &dict,
            layout: &layout,
            config: &config,
            blend: 0.25,
        };

        let predictions = ctx.predict(&trace("hello", &layout), 5);
        assert!(!predictions.is_empty());
        assert_eq!(predictions[0].word, "hello");
        assert!(predictions.iter().all(|p| p.word != "world"));
    }

    #[test]
    fn test_limit_zero_returns_everything_scored() {
        let dict = Dictionary::from_text("cat\ncar\ncab\nc-t\n").unwrap();
        let layout = KeyboardLayout::qwerty();
        let config = ScoringConfig::default();
        let ctx = RankContext {
            dictionary: &dict,
            layout: &layout,
            config: &config,
            blend: 0.0,
        };
        let gesture = trace("cat", &layout);

        let all = ctx.predict(&gesture, 0);
        assert_eq!(all.len(), 3);
        assert_eq!(ctx.predict(&gesture, 2).len(), 2);
        assert_eq!(ctx.predict(&gesture, 2)[..], all[..2]);
    }

    #[test]
    fn test_huge_limit_returns_everything_scored() {
        let dict = Dictionary::from_text("cat\ncar\ncab\n").unwrap();
        let layout = KeyboardLayout::qwerty();
        let config = ScoringConfig::default();
        let gesture = trace("cat", &layout);
        let scorer = Scorer::new(&gesture, &layout, &config, 0.25);

        let (ranked, stats) = select(dict.iter(), &scorer, usize::MAX);
        assert_eq!(ranked.len(), 3);
        assert_eq!(stats.considered, 3);
        assert_eq!(ranked[0].word, "cat");
    }

    #[test]
    fn test_select_reports_skips() {
        let dict = Dictionary::from_text("cat\nc'at\n").unwrap();
        let layout = KeyboardLayout::qwerty();
        let config = ScoringConfig::default();
        let gesture = trace("cat", &layout);
        let scorer = Scorer::new(&gesture, &layout, &config, 0.0);

        let (ranked, stats) = select(dict.iter(), &scorer, 0);
        assert_eq!(ranked.len(), 1);
        assert_eq!(stats.considered, 2);
        assert_eq!(stats.skipped, 1);
    }
}
