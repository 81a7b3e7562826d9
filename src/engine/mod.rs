pub(crate) mod ambient;
pub(crate) mod burst;
pub(crate) mod lifecycle;
pub(crate) mod scheduler;
pub(crate) mod trigger;
