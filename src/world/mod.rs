//! Cities, their subway stops and the trips between them.
pub mod locations;
pub mod travel;

pub use locations::LocationAtlas;
