pub(crate) mod factory;
pub(crate) mod model;
pub(crate) mod physics;
