pub mod aabb;
pub mod bounds;
pub mod collision;
pub mod time;
