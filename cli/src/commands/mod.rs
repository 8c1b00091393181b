pub mod extract;
pub mod render;
pub mod scan;
