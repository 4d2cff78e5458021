//! Turning raw touch samples into fixed-size, arc-length-uniform paths.

use crate::error::{SwipeError, SwipeResult};
use crate::keyboard::{euclidean_dist, KeyboardLayout};
use crate::types::{GesturePoint, Point};

/// A path with exactly the configured number of points.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPath {
    points: Vec<Point>,
}

impl NormalizedPath {
    /// Resample `path` to `n` points spaced uniformly along its arc length.
    /// A single point (or a zero-length path) is replicated `n` times.
    pub fn resample(path: &[Point], n: usize) -> Option<Self> {
        if path.is_empty() || n == 0 {
            return None;
        }
        Some(Self {
            points: resample_path(path, n),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

/// The raw sample closest to the centre of a key the finger passed over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub key: char,
    pub point: Point,
    pub distance: f64,
}

/// A normalized input gesture, ready for scoring.
#[derive(Debug, Clone)]
pub struct Gesture {
    pub path: NormalizedPath,
    pub landmarks: Vec<Landmark>,
    /// Length of the smoothed raw path, in key widths.
    pub arc_length: f64,
}

impl Gesture {
    pub fn start(&self) -> Point {
        self.path.first()
    }

    pub fn first_landmark(&self) -> &Landmark {
        &self.landmarks[0]
    }

    pub fn last_landmark(&self) -> &Landmark {
        &self.landmarks[self.landmarks.len() - 1]
    }
}

/// Parse `"x1,y1;x2,y2;..."`. Whitespace and a trailing `;` are allowed.
pub fn parse_path(text: &str) -> SwipeResult<Vec<GesturePoint>> {
    let mut points = Vec::new();

    for (i, pair) in text.split(';').enumerate() {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (xs, ys) = pair
            .split_once(',')
            .ok_or_else(|| SwipeError::Parse(format!("point {} has no ',': {:?}", i, pair)))?;
        let x = parse_coord(xs, i)?;
        let y = parse_coord(ys, i)?;
        points.push(GesturePoint {
            x,
            y,
            t: points.len() as u32,
        });
    }

    if points.len() < 2 {
        return Err(SwipeError::InvalidInput(format!(
            "a gesture needs at least 2 points, got {}",
            points.len()
        )));
    }
    Ok(points)
}

fn parse_coord(s: &str, i: usize) -> SwipeResult<f64> {
    let v = s
        .trim()
        .parse::<f64>()
        .map_err(|_| SwipeError::Parse(format!("point {} has a bad coordinate: {:?}", i, s)))?;
    if !v.is_finite() {
        return Err(SwipeError::Parse(format!("point {} is not finite", i)));
    }
    Ok(v)
}

/// Smooth, measure, resample and extract landmarks from a raw gesture.
pub fn normalize(
    raw: &[GesturePoint],
    layout: &KeyboardLayout,
    n: usize,
    smoothing_window: usize,
) -> SwipeResult<Gesture> {
    if raw.len() < 2 {
        return Err(SwipeError::InvalidInput(format!(
            "a gesture needs at least 2 points, got {}",
            raw.len()
        )));
    }

    let points: Vec<Point> = raw.iter().map(GesturePoint::point).collect();
    if path_length(&points) < 1e-9 {
        return Err(SwipeError::InvalidInput(
            "gesture has zero extent".to_string(),
        ));
    }

    let smoothed = smooth_path(&points, smoothing_window);
    let arc_length = path_length(&smoothed);
    if arc_length < 1e-9 {
        return Err(SwipeError::InvalidInput(
            "gesture collapses to a point after smoothing".to_string(),
        ));
    }

    let path = NormalizedPath {
        points: resample_path(&smoothed, n.max(2)),
    };
    let landmarks = extract_landmarks(&smoothed, layout);

    Ok(Gesture {
        path,
        landmarks,
        arc_length,
    })
}

pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| euclidean_dist(&w[0], &w[1])).sum()
}

/// Centred moving average. Endpoints are kept fixed so the gesture still
/// starts and ends where the finger did.
pub fn smooth_path(path: &[Point], window: usize) -> Vec<Point> {
    if window <= 1 || path.len() < 3 {
        return path.to_vec();
    }
    let half = window / 2;
    let last = path.len() - 1;

    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for i in 1..last {
        let lo = i.saturating_sub(half);
        let hi = (i + half).min(last);
        let span = &path[lo..=hi];
        let n = span.len() as f64;
        out.push(Point {
            x: span.iter().map(|p| p.x).sum::<f64>() / n,
            y: span.iter().map(|p| p.y).sum::<f64>() / n,
        });
    }
    out.push(path[last]);
    out
}

/// Uniform arc-length resampling to exactly `n` points.
pub fn resample_path(path: &[Point], n: usize) -> Vec<Point> {
    if path.is_empty() || n == 0 {
        return vec![];
    }
    if path.len() == 1 || n == 1 {
        return vec![path[0]; n];
    }

    let mut dists: Vec<f64> = Vec::with_capacity(path.len());
    dists.push(0.0);
    for i in 1..path.len() {
        let prev = dists[i - 1];
        dists.push(prev + euclidean_dist(&path[i - 1], &path[i]));
    }
    let total_len = dists[dists.len() - 1];
    if total_len < 1e-9 {
        return vec![path[0]; n];
    }

    let mut out: Vec<Point> = Vec::with_capacity(n);
    let mut j = 1;
    for i in 0..n {
        let target = (i as f64 / (n - 1) as f64) * total_len;
        while j < dists.len() - 1 && dists[j] < target {
            j += 1;
        }
        let denom = (dists[j] - dists[j - 1]).max(1e-12);
        let t = ((target - dists[j - 1]) / denom).clamp(0.0, 1.0);
        out.push(path[j - 1].lerp(&path[j], t));
    }
    out[n - 1] = path[path.len() - 1];
    out
}

/// One landmark per run of consecutive samples sharing a nearest key.
pub fn extract_landmarks(path: &[Point], layout: &KeyboardLayout) -> Vec<Landmark> {
    let mut landmarks: Vec<Landmark> = Vec::new();
    let mut current: Option<Landmark> = None;

    for p in path {
        let key = layout.nearest_key(p);
        let center = match layout.key(key) {
            Some(k) => k.center,
            None => continue,
        };
        let distance = euclidean_dist(p, &center);

        match current.as_mut() {
            Some(lm) if lm.key == key => {
                if distance < lm.distance {
                    lm.point = *p;
                    lm.distance = distance;
                }
            }
            _ => {
                landmarks.extend(current.take());
                current = Some(Landmark {
                    key,
                    point: *p,
                    distance,
                });
            }
        }
    }
    landmarks.extend(current);
    landmarks
}
