use std::path::PathBuf;

use clap::Parser;

/// Draws one textured quad in a window, forever.
#[derive(Debug, Default, Parser)]
pub struct Args {
    /// Path to the texture image (PNG)
    pub texture: Option<PathBuf>,
    /// Window width in pixels
    #[arg(long)]
    pub width: Option<u32>,
    /// Window height in pixels
    #[arg(long)]
    pub height: Option<u32>,
    /// Window title
    #[arg(long)]
    pub title: Option<String>,
    /// Stop after this many frames (0 runs until the window is closed)
    #[arg(long)]
    pub frames: Option<u64>,
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
