use std::path::Path;

use crate::{
    dataset::{catalog::Catalog, model::Dataset},
    foundation::core::{ChartConfig, Year},
    foundation::error::{TernError, TernResult},
    render::{
        raster::{FrameRgba, Rasterizer},
        scene::Scene,
        svg::Document,
    },
    select::frame::{Frame, select_frame},
    view::state::ViewState,
};

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub frames: u64,
    /// Frames where the year wrapped back to the mode's first year.
    pub wraps: u64,
}

/// Loaded chart inputs plus a reusable rasterizer.
///
/// The dataset is read once and never mutated; every call takes the view to render.
pub struct ChartSession {
    dataset: Dataset,
    catalog: Catalog,
    config: ChartConfig,
    rasterizer: Rasterizer,
}

impl ChartSession {
    pub fn new(
        dataset: Dataset,
        catalog: Catalog,
        config: ChartConfig,
        font_dir: Option<&Path>,
    ) -> TernResult<Self> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self {
            dataset,
            catalog,
            config,
            rasterizer: Rasterizer::new(font_dir),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    fn scene(&self) -> TernResult<Scene<'_>> {
        Scene::new(&self.config, &self.catalog)
    }

    /// Select markers and trails for `view`, in display order.
    pub fn frame(&self, view: &ViewState) -> TernResult<Frame> {
        let scene = self.scene()?;
        let frame = select_frame(&self.dataset, view, scene.triangle());
        Ok(frame.into_display_order(&self.catalog))
    }

    pub fn document(&self, view: &ViewState) -> TernResult<Document> {
        let scene = self.scene()?;
        let frame = select_frame(&self.dataset, view, scene.triangle());
        Ok(scene.build(&frame, view))
    }

    pub fn svg(&self, view: &ViewState) -> TernResult<String> {
        Ok(self.document(view)?.to_svg_string())
    }

    /// Rasterize `view`. The pixmap is pre-filled with the configured background, so the SVG
    /// background rect is left out to keep a translucent background from being applied twice.
    pub fn render(&self, view: &ViewState) -> TernResult<FrameRgba> {
        let mut doc = self.document(view)?;
        doc.background = None;
        self.rasterizer.rasterize(
            &doc.to_svg_string(),
            self.config.canvas,
            self.config.background_rgba,
        )
    }

    /// Render every year from `start.year` through `to`, advancing like playback does.
    ///
    /// `to` must lie in the mode's year range. A `to` before the start year plays through the
    /// wrap-around.
    #[tracing::instrument(skip(self, start, sink), fields(from = start.year.0, to = to.0))]
    pub fn play<F>(&self, start: ViewState, to: Year, mut sink: F) -> TernResult<PlayStats>
    where
        F: FnMut(&ViewState, FrameRgba) -> TernResult<()>,
    {
        let range = start.mode.year_range();
        if !range.contains(to) {
            return Err(TernError::validation(format!(
                "end year {to} outside {}..={} for mode {}",
                range.start, range.end, start.mode
            )));
        }

        let mut stats = PlayStats::default();
        let year = start.year;
        let mut view = start.with_year(year);
        loop {
            let px = self.render(&view)?;
            sink(&view, px)?;
            stats.frames += 1;
            if view.year == to || stats.frames > u64::from(range.len_years()) {
                break;
            }
            let next = view.clone().advance();
            if next.year < view.year {
                stats.wraps += 1;
            }
            view = next;
        }
        tracing::info!(frames = stats.frames, wraps = stats.wraps, "playback rendered");
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/chart_session.rs"]
mod tests;
