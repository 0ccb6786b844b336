pub mod exchange;
pub mod strategy;

pub use exchange::*;
pub use strategy::*;
