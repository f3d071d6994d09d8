//! Player ledger: money, calendar, inventory and the trades that move them.
pub mod components;
pub mod inventory;
pub mod trade;

pub use components::Player;
