pub mod info;
pub mod inventory;
pub mod order;
pub mod symbol;
pub mod ticker;
pub mod values;

pub use info::*;
pub use inventory::*;
pub use order::*;
pub use symbol::*;
pub use ticker::*;
pub use values::*;
