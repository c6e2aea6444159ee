pub(crate) mod catalog;
pub(crate) mod load;
pub(crate) mod model;
