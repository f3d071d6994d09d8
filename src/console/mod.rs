//! Line-oriented text front-end: input parsing, screens and the per-turn feed.
pub mod feed;
pub mod parser;
pub mod plugin;
pub mod render;

pub use feed::ConsoleFeed;
pub use parser::{parse_line, ConsoleInput, View};
pub use plugin::ConsolePlugin;
