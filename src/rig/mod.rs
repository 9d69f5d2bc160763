pub(crate) mod chain;
pub(crate) mod host;
pub(crate) mod model;
pub(crate) mod pose;
pub(crate) mod selection;
