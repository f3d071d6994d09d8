//! Command execution, game-over detection and the session journal.
pub mod commands;
pub mod journal;
pub mod plugin;
pub mod scoring;
pub mod systems;

pub use commands::CommandQueue;
pub use plugin::SessionPlugin;
