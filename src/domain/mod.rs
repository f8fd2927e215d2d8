pub mod item;
pub mod types;
