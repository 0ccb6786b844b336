pub mod backpack;
