pub(crate) mod batch;
pub(crate) mod keyframes;
pub(crate) mod orientation;
pub(crate) mod plan;
pub(crate) mod segment;
