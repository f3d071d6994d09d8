//! Goods catalog and the daily price engine.
pub mod components;
pub mod data;
pub mod plugin;
pub mod resources;
pub mod systems;

pub use plugin::MarketPlugin;
pub use resources::MarketBoard;
