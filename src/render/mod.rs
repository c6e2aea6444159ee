pub(crate) mod curve;
pub(crate) mod raster;
pub(crate) mod scene;
pub(crate) mod svg;
pub(crate) mod tooltip;
