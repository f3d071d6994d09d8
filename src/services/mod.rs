//! Bank and hospital services visited between days.
pub mod bank;
pub mod hospital;
pub mod plugin;
pub mod systems;

pub use plugin::ServicesPlugin;
