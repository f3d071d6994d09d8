//! Random daily events and the dispatcher that applies them.
pub mod catalog;
pub mod dispatcher;
pub mod plugin;
pub mod reports;
pub mod systems;

pub use plugin::EventsPlugin;
