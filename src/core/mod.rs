//! Core wiring: settings, the shared random stream and turn ordering.
pub mod plugin;
pub mod rng;
pub mod settings;
pub mod turn;

pub use plugin::CorePlugin;
