pub(crate) mod builder;
pub(crate) mod document;
pub(crate) mod memory;
