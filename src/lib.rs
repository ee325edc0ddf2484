//! A small side-scrolling platformer.
//!
//! The simulation (input, physics, coins, score) runs headless on a legion
//! world; the SFML window, sounds and HUD sit behind the `window` feature.

use glam::DVec2;

pub mod audio;
pub mod collision;
pub mod components;
pub mod config;
pub mod events;
pub mod game;
pub mod input;
pub mod level;
pub mod physics;
pub mod quadtree;
pub mod session;
pub mod snapshot;
pub mod systems;
pub mod tilemap;

#[cfg(feature = "window")]
pub mod engine;
#[cfg(feature = "window")]
pub mod renderer;

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;
pub const WINDOW_TITLE: &str = "Platformer";
pub const GAME_TITLE: &str = "Platformer Game";

/// pixels per tick
pub const PLAYER_MOVEMENT_SPEED: f64 = 5.0;
/// pixels per tick
pub const PLAYER_JUMP_SPEED: f64 = 20.0;
/// pixels per tick, per tick
pub const GRAVITY: f64 = 1.0;

pub const TILE_SCALING: f64 = 0.5;
pub const COIN_SCALING: f64 = 0.5;

/// Size of the source tile art before scaling.
pub const TILE_SOURCE_SIZE: f64 = 128.0;

/// Size of the idle adventurer sprite.
pub const PLAYER_SIZE: DVec2 = DVec2::new(96.0, 128.0);
pub const PLAYER_START: DVec2 = DVec2::new(64.0, 128.0);

/// How far below the feet we look for something to stand on.
pub const GROUND_PROBE_DISTANCE: f64 = 5.0;
