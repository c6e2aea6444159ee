pub(crate) mod mode;
pub(crate) mod playback;
pub(crate) mod state;
