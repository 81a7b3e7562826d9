pub(crate) mod backend;
pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod painter;
pub(crate) mod recording;
pub(crate) mod shapes;
