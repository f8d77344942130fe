pub mod body;
pub mod grid;
