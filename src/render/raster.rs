use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{TernError, TernResult};

const MAX_DIM: u32 = 16_384;

/// Straight (non-premultiplied) RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Pixel at `(x, y)`; `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn save_png(&self, path: &Path) -> TernResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// SVG to pixel converter with a font database built once and reused for every frame.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Rasterizer {
    /// System fonts plus every `.ttf`/`.otf`/`.ttc` file directly inside `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.faces().count(), "font database ready");
        Self {
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    pub fn face_count(&self) -> usize {
        self.options.fontdb.faces().count()
    }

    /// Render `svg` onto a `canvas` sized pixmap pre-filled with `background`.
    pub fn rasterize(&self, svg: &str, canvas: Canvas, background: [u8; 4]) -> TernResult<FrameRgba> {
        let Canvas { width, height } = canvas;
        if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
            return Err(TernError::render(format!(
                "raster size {width}x{height} outside 1..={MAX_DIM}"
            )));
        }

        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| TernError::render(format!("parse svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| TernError::render("failed to allocate pixmap"))?;
        let [r, g, b, a] = background;
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));

        let sx = width as f32 / tree.size().width();
        let sy = height as f32 / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let mut data = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(FrameRgba {
            width,
            height,
            data,
        })
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
