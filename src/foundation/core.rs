use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{TernError, TernResult};

pub use kurbo::{BezPath, Line, Point, Rect, Vec2};

/// Calendar year of a data record.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Year(pub i32);

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive year interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct YearRange {
    pub start: Year,
    pub end: Year, // inclusive
}

impl YearRange {
    pub fn new(start: Year, end: Year) -> TernResult<Self> {
        if start.0 > end.0 {
            return Err(TernError::validation("YearRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn contains(self, y: Year) -> bool {
        self.start.0 <= y.0 && y.0 <= self.end.0
    }

    pub fn clamp(self, y: Year) -> Year {
        Year(y.0.clamp(self.start.0, self.end.0))
    }

    pub fn len_years(self) -> u32 {
        (self.end.0 - self.start.0) as u32 + 1
    }

    pub fn iter(self) -> impl Iterator<Item = Year> {
        (self.start.0..=self.end.0).map(Year)
    }
}

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Padding edges in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

/// Chart surface configuration.
///
/// The triangle is laid out inside the canvas minus `margin`; its side equals the inner width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    #[serde(default = "default_margin")]
    pub margin: Edges,
    /// Radius of a plotted point.
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    /// Background fill for raster output (straight RGBA8).
    #[serde(default = "default_background")]
    pub background_rgba: [u8; 4],
}

fn default_canvas() -> Canvas {
    Canvas {
        width: 800,
        height: 700,
    }
}

fn default_margin() -> Edges {
    Edges {
        top: 60.0,
        right: 80.0,
        bottom: 80.0,
        left: 80.0,
    }
}

fn default_point_radius() -> f64 {
    6.0
}

fn default_background() -> [u8; 4] {
    [255, 255, 255, 255]
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas: default_canvas(),
            margin: default_margin(),
            point_radius: default_point_radius(),
            background_rgba: default_background(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_path(path: &Path) -> TernResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read chart config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| TernError::serde(format!("chart config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> TernResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(TernError::validation("canvas width/height must be > 0"));
        }
        let m = self.margin;
        for v in [m.top, m.right, m.bottom, m.left] {
            if !v.is_finite() || v < 0.0 {
                return Err(TernError::validation("margins must be finite and >= 0"));
            }
        }
        if self.inner_width() <= 0.0 {
            return Err(TernError::validation(
                "horizontal margins leave no room for the triangle",
            ));
        }
        if !self.point_radius.is_finite() || self.point_radius <= 0.0 {
            return Err(TernError::validation("point_radius must be finite and > 0"));
        }
        Ok(())
    }

    pub fn inner_width(&self) -> f64 {
        f64::from(self.canvas.width) - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        f64::from(self.canvas.height) - self.margin.top - self.margin.bottom
    }

    /// Offset of the plot origin inside the canvas.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.margin.left, self.margin.top)
    }
}

/// Straight (non-premultiplied) RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn from_hex(s: &str) -> TernResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| TernError::validation(format!("color '{s}' must start with '#'")))?;
        let bad = || TernError::validation(format!("invalid hex color '{s}'"));
        let nibble = |c: u8| -> TernResult<u8> {
            (c as char).to_digit(16).map(|d| d as u8).ok_or_else(bad)
        };
        let b = hex.as_bytes();
        match b.len() {
            6 => Ok(Self::new(
                nibble(b[0])? << 4 | nibble(b[1])?,
                nibble(b[2])? << 4 | nibble(b[3])?,
                nibble(b[4])? << 4 | nibble(b[5])?,
            )),
            3 => {
                let (r, g, bl) = (nibble(b[0])?, nibble(b[1])?, nibble(b[2])?);
                Ok(Self::new(r << 4 | r, g << 4 | g, bl << 4 | bl))
            }
            _ => Err(bad()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
