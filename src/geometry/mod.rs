pub(crate) mod aspect;
pub(crate) mod bezier;
pub(crate) mod primitives;
