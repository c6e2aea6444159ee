use std::str::FromStr;

use crate::foundation::core::{Line, Point};
use crate::foundation::error::{TernError, TernResult};

/// Grid levels drawn for every axis (interior only).
pub const GRID_LEVELS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Tick levels drawn along every edge (corners included).
pub const TICK_LEVELS: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

const BAND_STARTS: [f64; 5] = [0.0, 0.2, 0.4, 0.6, 0.8];
const BAND_OPACITIES: [f64; 5] = [0.1, 0.05, 0.03, 0.01, 0.005];

/// Barycentric weights of a ternary point.
///
/// Components are expected to sum to 1 but nothing enforces it; weights that do not sum to 1
/// project outside of the triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Weights {
    pub bio: f64,
    pub elec: f64,
    pub foss: f64,
}

impl Weights {
    pub const fn new(bio: f64, elec: f64, foss: f64) -> Self {
        Self { bio, elec, foss }
    }

    /// Build weights from percentages (0..=100).
    pub fn from_pct(bio_pct: f64, elec_pct: f64, foss_pct: f64) -> Self {
        Self::new(bio_pct / 100.0, elec_pct / 100.0, foss_pct / 100.0)
    }

    pub fn sum(self) -> f64 {
        self.bio + self.elec + self.foss
    }

    pub fn component(self, axis: Axis) -> f64 {
        match axis {
            Axis::Bio => self.bio,
            Axis::Elec => self.elec,
            Axis::Foss => self.foss,
        }
    }

    /// Component-wise arithmetic mean. Returns `None` for an empty slice.
    pub fn mean(items: &[Weights]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let n = items.len() as f64;
        let (b, e, f) = items.iter().fold((0.0, 0.0, 0.0), |(b, e, f), w| {
            (b + w.bio, e + w.elec, f + w.foss)
        });
        Some(Self::new(b / n, e / n, f / n))
    }
}

/// One of the three chart axes, named after the corner where its weight is 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Bio,
    Elec,
    Foss,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Bio, Axis::Elec, Axis::Foss];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bio => "bio",
            Self::Elec => "elec",
            Self::Foss => "foss",
        }
    }
}

impl FromStr for Axis {
    type Err = TernError;

    fn from_str(s: &str) -> TernResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bio" => Ok(Self::Bio),
            "elec" | "electrons" => Ok(Self::Elec),
            "foss" | "fossil" => Ok(Self::Foss),
            other => Err(TernError::validation(format!("unknown axis '{other}'"))),
        }
    }
}

/// A tick anchor on a triangle edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Tick {
    pub axis: Axis,
    pub pos: Point,
    /// Integer percent shown next to the anchor.
    pub pct: u32,
}

/// A translucent strip shown while an axis is hovered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Band {
    pub corners: [Point; 4],
    pub opacity: f64,
}

/// Equilateral triangle in plot space, pointing down.
///
/// Bio sits top-left, electrons top-right and fossil at the bottom apex.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Triangle {
    pub bio: Point,
    pub elec: Point,
    pub foss: Point,
}

impl Triangle {
    /// Triangle with side `width`, its top edge on `y = 0` starting at the origin.
    pub fn from_width(width: f64) -> Self {
        let height = width * 3f64.sqrt() / 2.0;
        Self {
            bio: Point::new(0.0, 0.0),
            elec: Point::new(width, 0.0),
            foss: Point::new(width / 2.0, height),
        }
    }

    pub fn width(&self) -> f64 {
        self.elec.x - self.bio.x
    }

    pub fn height(&self) -> f64 {
        self.foss.y - self.bio.y
    }

    pub fn corner(&self, axis: Axis) -> Point {
        match axis {
            Axis::Bio => self.bio,
            Axis::Elec => self.elec,
            Axis::Foss => self.foss,
        }
    }

    /// Weighted sum of the corners. No normalization is applied.
    pub fn project(&self, w: Weights) -> Point {
        Point::new(
            w.bio * self.bio.x + w.elec * self.elec.x + w.foss * self.foss.x,
            w.bio * self.bio.y + w.elec * self.elec.y + w.foss * self.foss.y,
        )
    }

    /// Inverse of [`Triangle::project`] for weights summing to 1.
    pub fn unproject(&self, p: Point) -> Weights {
        let v0 = self.elec - self.bio;
        let v1 = self.foss - self.bio;
        let v2 = p - self.bio;
        let den = v0.cross(v1);
        if den == 0.0 {
            return Weights::default();
        }
        let elec = v2.cross(v1) / den;
        let foss = v0.cross(v2) / den;
        Weights::new(1.0 - elec - foss, elec, foss)
    }

    /// Boundary-inclusive containment with a small tolerance for rounding.
    pub fn contains(&self, p: Point) -> bool {
        let eps = 1e-9;
        let w = self.unproject(p);
        w.bio >= -eps && w.elec >= -eps && w.foss >= -eps
    }

    /// The edge along which `axis` is read.
    pub fn edge(&self, axis: Axis) -> Line {
        match axis {
            Axis::Bio => Line::new(self.bio, self.foss),
            Axis::Foss => Line::new(self.elec, self.foss),
            Axis::Elec => Line::new(self.bio, self.elec),
        }
    }

    /// Interior iso-lines of `axis` at [`GRID_LEVELS`].
    pub fn grid_lines(&self, axis: Axis) -> Vec<Line> {
        GRID_LEVELS
            .iter()
            .map(|&t| {
                let (a, b) = match axis {
                    Axis::Bio => (Weights::new(t, 1.0 - t, 0.0), Weights::new(t, 0.0, 1.0 - t)),
                    Axis::Elec => (Weights::new(0.0, t, 1.0 - t), Weights::new(1.0 - t, t, 0.0)),
                    Axis::Foss => (Weights::new(0.0, 1.0 - t, t), Weights::new(1.0 - t, 0.0, t)),
                };
                Line::new(self.project(a), self.project(b))
            })
            .collect()
    }

    /// Tick anchors along the edge where `axis` is read.
    pub fn ticks(&self, axis: Axis) -> Vec<Tick> {
        TICK_LEVELS
            .iter()
            .map(|&t| {
                let w = match axis {
                    Axis::Bio => Weights::new(t, 0.0, 1.0 - t),
                    Axis::Foss => Weights::new(0.0, 1.0 - t, t),
                    Axis::Elec => Weights::new(1.0 - t, t, 0.0),
                };
                Tick {
                    axis,
                    pos: self.project(w),
                    pct: (t * 100.0).round() as u32,
                }
            })
            .collect()
    }

    /// Strips between consecutive levels of `axis`, darkest where `axis` approaches 1.
    pub fn highlight_bands(&self, axis: Axis) -> Vec<Band> {
        let n = BAND_STARTS.len();
        (0..n)
            .map(|i| {
                let t = BAND_STARTS[i];
                let t2 = BAND_STARTS.get(i + 1).copied().unwrap_or(1.0);
                let ws = match axis {
                    Axis::Bio => [
                        Weights::new(t, 1.0 - t, 0.0),
                        Weights::new(t, 0.0, 1.0 - t),
                        Weights::new(t2, 0.0, 1.0 - t2),
                        Weights::new(t2, 1.0 - t2, 0.0),
                    ],
                    Axis::Elec => [
                        Weights::new(0.0, t, 1.0 - t),
                        Weights::new(1.0 - t, t, 0.0),
                        Weights::new(1.0 - t2, t2, 0.0),
                        Weights::new(0.0, t2, 1.0 - t2),
                    ],
                    Axis::Foss => [
                        Weights::new(0.0, 1.0 - t, t),
                        Weights::new(1.0 - t, 0.0, t),
                        Weights::new(1.0 - t2, 0.0, t2),
                        Weights::new(0.0, 1.0 - t2, t2),
                    ],
                };
                Band {
                    corners: ws.map(|w| self.project(w)),
                    opacity: BAND_OPACITIES[n - 1 - i],
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ternary.rs"]
mod tests;
