pub mod composite;
pub mod cpu;
pub mod reveal;
pub mod target;
