pub(crate) mod canvas;
pub(crate) mod cpu;
pub(crate) mod frame;
