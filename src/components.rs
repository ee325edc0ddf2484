use glam::DVec2;

use crate::collision::Aabb;

/// Centre of the entity, world pixels, y pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position(pub DVec2);

/// Pixels per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity(pub DVec2);

/// Full width and height of the collision box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox(pub DVec2);

impl Hitbox {
    pub fn at(&self, Position(centre): &Position) -> Aabb {
        Aabb::from_center(*centre, self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coin;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scenery;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Grass,
    Crate,
    Coin,
    /// A tile from a tile map, by global tile id.
    Tile(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance(pub SpriteKind);

/// Draw order of a level tile. The player is always drawn last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DrawLayer(pub usize);

// resources

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    value: u32,
    text: String,
}

impl Score {
    pub fn new() -> Self {
        Self {
            value: 0,
            text: Self::format(0),
        }
    }

    fn format(value: u32) -> String {
        format!("Score: {value}")
    }

    pub fn add(&mut self, points: u32) {
        self.value += points;
        self.text = Self::format(self.value);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// What the HUD shows.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub position: DVec2,
}
