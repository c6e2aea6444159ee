//! ternplot draws ternary energy-mix charts.
//!
//! Each entity (a country or region) is placed inside an equilateral triangle from the shares of
//! bio/other, electricity and fossil energy in its mix, and leaves a trail through the years.
//!
//! - Load a [`Dataset`] once (see [`load_dataset`])
//! - Describe what to show with a [`ViewState`]
//! - Select a [`Frame`] with [`select_frame`], or let a [`ChartSession`] build SVG and PNG output
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod dataset;
pub(crate) mod geometry;
pub(crate) mod render;
pub(crate) mod select;
pub(crate) mod session;
pub(crate) mod view;

pub use crate::foundation::core::{
    BezPath, Canvas, ChartConfig, Edges, Line, Point, Rect, Rgb8, Vec2, Year, YearRange,
};
pub use crate::foundation::error::{TernError, TernResult};

pub use crate::dataset::catalog::{Catalog, EntityInfo, EntityKind, FALLBACK_COLOR};
pub use crate::dataset::load::{dataset_from_json_str, dataset_from_reader, load_dataset};
pub use crate::dataset::model::{
    ConsumptionRecord, Dataset, EntitySeries, ModeRecord, PowerRecord, YearRecord,
};
pub use crate::geometry::ternary::{Axis, Band, Tick, Triangle, Weights};
pub use crate::render::curve::basis_spline;
pub use crate::render::raster::{FrameRgba, Rasterizer};
pub use crate::render::scene::Scene;
pub use crate::render::svg::{Anchor, Document, Element, Style};
pub use crate::render::tooltip::{Tooltip, hit_test};
pub use crate::select::frame::{Frame, FrameEntry, PlotPoint, select_frame, select_year};
pub use crate::select::smooth::{SMOOTHING_WINDOW, Smoothing, trailing_mean};
pub use crate::session::chart_session::{ChartSession, PlayStats};
pub use crate::view::mode::{EnergyMode, LAST_YEAR, ModeLabels};
pub use crate::view::playback::{MIN_SPEED, Playback};
pub use crate::view::state::ViewState;
