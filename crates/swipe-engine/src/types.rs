use serde::{Deserialize, Serialize};

/// A 2D coordinate in keyboard units (one key is 1.0 wide).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// One raw touch sample. `t` is the sample's ordinal in the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePoint {
    pub x: f64,
    pub y: f64,
    pub t: u32,
}

impl GesturePoint {
    pub fn point(&self) -> Point {
        Point { x: self.x, y: self.y }
    }
}

/// Build a raw gesture from plain coordinates, numbering samples in order.
pub fn gesture_from_coords(coords: &[(f64, f64)]) -> Vec<GesturePoint> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| GesturePoint { x, y, t: i as u32 })
        .collect()
}

/// Components of a candidate's geometric cost, before blending.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Mean point-wise distance between input and ideal path.
    pub shape: f64,
    /// Mean distance between the input's end landmarks and the word's end letters.
    pub location: f64,
    /// Weighted geometric cost squashed into [0, 1).
    pub normalized: f64,
}

/// A ranked word candidate. Lower `score` is better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub word: String,
    pub score: f64,
    /// Dictionary weight of `word`; hosts read it as `freq`.
    #[serde(rename = "freq")]
    pub popularity: f64,
    #[serde(skip_serializing)]
    pub breakdown: ScoreBreakdown,
}

/// Wire shape: `{"predictions": [{"word": ..., "score": ..., "freq": ...}, ...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse<'a> {
    pub predictions: &'a [Prediction],
}

impl<'a> PredictionResponse<'a> {
    pub fn new(predictions: &'a [Prediction]) -> Self {
        Self { predictions }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
