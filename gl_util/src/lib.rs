pub mod buffer;
pub mod program;
pub mod renderer;
pub mod texture;
