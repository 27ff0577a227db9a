pub mod model;
pub mod mojang;
