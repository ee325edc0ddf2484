//! Levels from Tiled JSON maps.
//!
//! Only orthogonal, finite maps with tile layers stored as plain arrays are
//! understood. The "Platforms" layer becomes walls, "Coins" becomes coins and
//! every other visible tile layer is drawn as scenery.

use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::components::SpriteKind;
use crate::level::{Level, Tile};
use crate::physics::WorldBounds;
use crate::{PLAYER_START, WINDOW_HEIGHT, WINDOW_WIDTH};

pub const PLATFORMS_LAYER: &str = "Platforms";
pub const COINS_LAYER: &str = "Coins";

/// Tiled keeps flip/rotation flags in the top bits of a gid.
const GID_FLAGS: u32 = 0xF000_0000;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tile map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tile map has no \"{0}\" layer")]
    MissingLayer(String),

    #[error("layer \"{0}\" is not a tile layer")]
    NotTileLayer(String),

    #[error("infinite tile maps are not supported")]
    InfiniteMap,

    #[error("layer \"{layer}\" has {found} tiles, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Deserialize)]
struct TiledMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    infinite: bool,
    layers: Vec<TiledLayer>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default = "visible_by_default")]
    visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl TiledLayer {
    fn is_tiles(&self) -> bool {
        self.kind == "tilelayer"
    }
}

pub fn load(path: &Path, scaling: f64) -> Result<Level, LevelError> {
    let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_owned(),
        source,
    })?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tile map".to_owned());

    let level = parse(&name, &json, scaling)?;

    info!(
        level = %level.name,
        walls = level.walls.len(),
        coins = level.coins.len(),
        scenery = level.scenery.len(),
        "loaded tile map"
    );

    Ok(level)
}

pub fn parse(name: &str, json: &str, scaling: f64) -> Result<Level, LevelError> {
    let map: TiledMap = serde_json::from_str(json)?;

    if map.infinite {
        return Err(LevelError::InfiniteMap);
    }

    let tile_size = DVec2::new(map.tilewidth as f64, map.tileheight as f64) * scaling;
    let extent = DVec2::new(map.width as f64, map.height as f64) * tile_size;

    let (index, platforms) = required_layer(&map, PLATFORMS_LAYER)?;
    let walls = tiles(&map, platforms, tile_size, SpriteKind::Tile)?;
    let walls = walls.into_iter().map(|t| t.on_layer(index)).collect();

    let (index, coin_layer) = required_layer(&map, COINS_LAYER)?;
    let coins = tiles(&map, coin_layer, tile_size, |_| SpriteKind::Coin)?;
    let coins = coins.into_iter().map(|t| t.on_layer(index)).collect();

    // every layer keeps its place in the map's stacking order
    let mut scenery = vec![];
    for (index, layer) in map.layers.iter().enumerate().filter(|(_, l)| {
        l.is_tiles() && l.visible && l.name != PLATFORMS_LAYER && l.name != COINS_LAYER
    }) {
        debug!(layer = %layer.name, index, "scenery layer");
        let layer_tiles = tiles(&map, layer, tile_size, SpriteKind::Tile)?;
        scenery.extend(layer_tiles.into_iter().map(|t| t.on_layer(index)));
    }

    Ok(Level {
        name: name.to_owned(),
        bounds: WorldBounds::new(
            extent.x.max(WINDOW_WIDTH as f64),
            extent.y.max(WINDOW_HEIGHT as f64),
        ),
        spawn: PLAYER_START,
        walls,
        coins,
        scenery,
    })
}

fn required_layer<'a>(
    map: &'a TiledMap,
    name: &str,
) -> Result<(usize, &'a TiledLayer), LevelError> {
    let (index, layer) = map
        .layers
        .iter()
        .enumerate()
        .find(|(_, l)| l.name == name)
        .ok_or_else(|| LevelError::MissingLayer(name.to_owned()))?;

    if !layer.is_tiles() {
        return Err(LevelError::NotTileLayer(name.to_owned()));
    }

    Ok((index, layer))
}

/// Rows are stored top to bottom, the world has y pointing up.
fn tiles(
    map: &TiledMap,
    layer: &TiledLayer,
    tile_size: DVec2,
    kind: impl Fn(u32) -> SpriteKind,
) -> Result<Vec<Tile>, LevelError> {
    let columns = map.width as usize;
    let rows = map.height as usize;

    if layer.data.len() != columns * rows {
        return Err(LevelError::LayerSize {
            layer: layer.name.clone(),
            expected: columns * rows,
            found: layer.data.len(),
        });
    }

    let tiles = layer
        .data
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| {
            let gid = raw & !GID_FLAGS;
            if gid == 0 {
                return None;
            }

            let (col, row) = (i % columns, i / columns);
            let center = DVec2::new(
                (col as f64 + 0.5) * tile_size.x,
                ((rows - row) as f64 - 0.5) * tile_size.y,
            );

            Some(Tile::new(center, tile_size, kind(gid)))
        })
        .collect();

    Ok(tiles)
}
