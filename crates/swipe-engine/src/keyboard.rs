//! Static keyboard geometry.
//!
//! Coordinates are in key units: every key is 1.0 wide and 1.0 tall, the
//! top-left key centre sits at the origin and rows grow downwards.

use crate::error::{SwipeError, SwipeResult};
use crate::types::Point;
use std::collections::HashMap;

const QWERTY_ROWS: [(&str, f64); 3] = [("qwertyuiop", 0.0), ("asdfghjkl", 0.5), ("zxcvbnm", 1.0)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub ch: char,
    pub center: Point,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    keys: Vec<Key>,
    index: HashMap<char, usize>,
}

impl KeyboardLayout {
    pub fn from_keys(keys: Vec<Key>) -> Self {
        let index = keys.iter().enumerate().map(|(i, k)| (k.ch, i)).collect();
        Self { keys, index }
    }

    /// Standard staggered QWERTY letter block.
    pub fn qwerty() -> Self {
        let mut keys = Vec::with_capacity(26);
        for (row, (chars, offset)) in QWERTY_ROWS.iter().enumerate() {
            for (col, ch) in chars.chars().enumerate() {
                keys.push(Key {
                    ch,
                    center: Point::new(col as f64 + offset, row as f64),
                    width: 1.0,
                    height: 1.0,
                });
            }
        }
        Self::from_keys(keys)
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key(&self, ch: char) -> Option<&Key> {
        self.index
            .get(&ch.to_ascii_lowercase())
            .map(|&i| &self.keys[i])
    }

    pub fn contains(&self, ch: char) -> bool {
        self.key(ch).is_some()
    }

    pub fn key_center(&self, ch: char) -> SwipeResult<Point> {
        self.key(ch)
            .map(|k| k.center)
            .ok_or(SwipeError::UnknownKey(ch))
    }

    /// The key whose centre is closest to `point`. Ties go to the key listed
    /// first in the layout.
    pub fn nearest_key(&self, point: &Point) -> char {
        self.nearest(point).map(|(k, _)| k.ch).unwrap_or(' ')
    }

    fn nearest(&self, point: &Point) -> Option<(&Key, f64)> {
        let mut best: Option<(&Key, f64)> = None;
        for key in &self.keys {
            let d = euclidean_dist(point, &key.center);
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((key, d)),
            }
        }
        best
    }

    /// Characters whose key centre lies within `radius` of `point`.
    pub fn keys_within(&self, point: &Point, radius: f64) -> Vec<char> {
        self.keys
            .iter()
            .filter(|k| euclidean_dist(point, &k.center) <= radius)
            .map(|k| k.ch)
            .collect()
    }

    /// The nearest key plus every key no more than `tolerance` further away
    /// than it. Never empty for a non-empty layout.
    pub fn start_keys(&self, point: &Point, tolerance: f64) -> Vec<char> {
        match self.nearest(point) {
            Some((_, d)) => self.keys_within(point, d + tolerance.max(0.0)),
            None => vec![],
        }
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::qwerty()
    }
}

pub fn euclidean_dist(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Key centres of `word`'s letters, in order.
pub fn get_word_path(word: &str, layout: &KeyboardLayout) -> SwipeResult<Vec<Point>> {
    word.chars().map(|c| layout.key_center(c)).collect()
}

/// Drop consecutive duplicate points; a swipe never backtracks onto the key
/// it is already on.
pub fn simplify_path(path: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(path.len());
    for p in path {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qwerty_has_all_letters() {
        let layout = KeyboardLayout::qwerty();
        assert_eq!(layout.keys().len(), 26);
        for c in 'a'..='z' {
            assert!(layout.contains(c), "missing {}", c);
        }
    }

    #[test]
    fn test_key_center_is_case_insensitive() {
        let layout = KeyboardLayout::qwerty();
        assert_eq!(layout.key_center('Q').unwrap(), Point::new(0.0, 0.0));
        assert_eq!(layout.key_center('a').unwrap(), Point::new(0.5, 1.0));
        assert_eq!(layout.key_center('m').unwrap(), Point::new(7.0, 2.0));
    }

    #[test]
    fn test_unknown_key() {
        let layout = KeyboardLayout::qwerty();
        assert!(matches!(layout.key_center(' '), Err(SwipeError::UnknownKey(' '))));
        assert!(layout.key_center('\'').is_err());
    }

    #[test]
    fn test_nearest_key() {
        let layout = KeyboardLayout::qwerty();
        assert_eq!(layout.nearest_key(&Point::new(0.1, -0.2)), 'q');
        assert_eq!(layout.nearest_key(&Point::new(4.6, 1.1)), 'g');
        assert_eq!(layout.nearest_key(&Point::new(7.2, 5.0)), 'm');
    }

    #[test]
    fn test_start_keys_tolerance() {
        let layout = KeyboardLayout::qwerty();
        let on_s = layout.key_center('s').unwrap();
        assert_eq!(layout.start_keys(&on_s, 0.1), vec!['s']);

        let between = Point::new(2.0, 1.0);
        let keys = layout.start_keys(&between, 0.1);
        assert!(keys.contains(&'s'));
        assert!(keys.contains(&'d'));
    }

    #[test]
    fn test_simplify_path_collapses_repeats() {
        let layout = KeyboardLayout::qwerty();
        let path = get_word_path("hello", &layout).unwrap();
        assert_eq!(simplify_path(&path).len(), 4);
    }
}
