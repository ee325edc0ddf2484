use std::path::PathBuf;

use clap::Parser;

use crate::TILE_SCALING;
use crate::level::Level;
use crate::tilemap::LevelError;

#[derive(Debug, Clone, Parser)]
#[command(name = "platformer", about = "Run, jump, collect coins")]
pub struct Config {
    /// Tiled JSON map to play instead of the built-in level
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Directory holding coin1.wav and jump1.wav
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Frame limit; the game advances one tick per frame
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Show the frame timing window
    #[arg(long)]
    pub show_info: bool,
}

impl Config {
    pub fn level(&self) -> Result<Level, LevelError> {
        match &self.map {
            Some(path) => Level::from_tilemap(path, TILE_SCALING),
            None => Ok(Level::grassland()),
        }
    }
}
