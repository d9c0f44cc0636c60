pub mod cursor;
pub mod glyph;
pub mod render;
pub mod scenario;
pub mod simulator;
pub mod world;
