pub mod quoting;
pub mod valuation;

pub use quoting::*;
pub use valuation::*;
