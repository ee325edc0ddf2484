use std::path::Path;

use glam::DVec2;

use crate::components::SpriteKind;
use crate::physics::WorldBounds;
use crate::tilemap::{self, LevelError};
use crate::{
    COIN_SCALING, PLAYER_START, TILE_SCALING, TILE_SOURCE_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH,
};

/// A static sprite placed in the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub center: DVec2,
    pub size: DVec2,
    pub kind: SpriteKind,
    /// Lower layers are drawn first.
    pub layer: usize,
}

impl Tile {
    pub fn new(center: DVec2, size: DVec2, kind: SpriteKind) -> Self {
        Self {
            center,
            size,
            kind,
            layer: 0,
        }
    }

    pub fn on_layer(self, layer: usize) -> Self {
        Self { layer, ..self }
    }
}

/// Everything a session is built from. Sessions never modify it, so a
/// restart rebuilds exactly the same world.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub name: String,
    pub bounds: WorldBounds,
    pub spawn: DVec2,
    pub walls: Vec<Tile>,
    pub coins: Vec<Tile>,
    pub scenery: Vec<Tile>,
}

impl Level {
    /// A row of grass along the bottom, three crates and five coins.
    pub fn grassland() -> Self {
        let tile_size = DVec2::splat(TILE_SOURCE_SIZE * TILE_SCALING);
        let coin_size = DVec2::splat(TILE_SOURCE_SIZE * COIN_SCALING);

        let mut walls: Vec<Tile> = (0..1250)
            .step_by(64)
            .map(|x| Tile::new(DVec2::new(x as f64, 32.0), tile_size, SpriteKind::Grass))
            .collect();

        walls.extend(
            [[512.0, 96.0], [256.0, 96.0], [768.0, 96.0]]
                .into_iter()
                .map(|p| Tile::new(DVec2::from_array(p), tile_size, SpriteKind::Crate)),
        );

        let coins = (128..1250)
            .step_by(256)
            .map(|x| {
                Tile::new(DVec2::new(x as f64, 96.0), coin_size, SpriteKind::Coin).on_layer(1)
            })
            .collect();

        Self {
            name: "grassland".to_owned(),
            bounds: WorldBounds::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64),
            spawn: PLAYER_START,
            walls,
            coins,
            scenery: vec![],
        }
    }

    pub fn from_tilemap(path: impl AsRef<Path>, scaling: f64) -> Result<Self, LevelError> {
        tilemap::load(path.as_ref(), scaling)
    }
}
