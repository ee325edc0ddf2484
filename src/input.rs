//! Held-key bookkeeping and the key-to-velocity mapping.

use glam::DVec2;

use crate::{PLAYER_JUMP_SPEED, PLAYER_MOVEMENT_SPEED};

/// The keys the game reacts to. Everything else never makes it past the frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
}

#[cfg(feature = "window")]
impl Key {
    /// Keys the game does not use map to `None` and are dropped.
    pub fn from_sfml(code: sfml::window::Key) -> Option<Key> {
        use sfml::window::Key as SfKey;

        match code {
            SfKey::Up => Some(Key::Up),
            SfKey::Down => Some(Key::Down),
            SfKey::Left => Some(Key::Left),
            SfKey::Right => Some(Key::Right),
            SfKey::Escape => Some(Key::Escape),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    fn flag_mut(&mut self, key: Key) -> Option<&mut bool> {
        match key {
            Key::Up => Some(&mut self.up),
            Key::Down => Some(&mut self.down),
            Key::Left => Some(&mut self.left),
            Key::Right => Some(&mut self.right),
            Key::Escape => None,
        }
    }

    /// Marks `key` as held. Returns false for keys without a flag.
    pub fn press(&mut self, key: Key) -> bool {
        match self.flag_mut(key) {
            Some(flag) => {
                *flag = true;
                true
            }
            None => false,
        }
    }

    /// Marks `key` as released. Returns false if it was not held.
    pub fn release(&mut self, key: Key) -> bool {
        match self.flag_mut(key) {
            Some(flag) if *flag => {
                *flag = false;
                true
            }
            _ => false,
        }
    }

    pub fn velocity(&self) -> DVec2 {
        resolve_velocity(self)
    }
}

/// Opposing keys on one axis cancel out. Up jumps, down only moves.
pub fn resolve_velocity(input: &InputState) -> DVec2 {
    let mut velocity = DVec2::ZERO;

    if input.up && !input.down {
        velocity.y = PLAYER_JUMP_SPEED;
    } else if input.down && !input.up {
        velocity.y = -PLAYER_MOVEMENT_SPEED;
    }

    if input.left && !input.right {
        velocity.x = -PLAYER_MOVEMENT_SPEED;
    } else if input.right && !input.left {
        velocity.x = PLAYER_MOVEMENT_SPEED;
    }

    velocity
}


#[cfg(all(test, feature = "window"))]
mod sfml_tests {
    use sfml::window::Key as SfKey;

    use super::*;

    #[test]
    fn arrows_and_escape_are_bound() {
        assert_eq!(Key::from_sfml(SfKey::Up), Some(Key::Up));
        assert_eq!(Key::from_sfml(SfKey::Down), Some(Key::Down));
        assert_eq!(Key::from_sfml(SfKey::Left), Some(Key::Left));
        assert_eq!(Key::from_sfml(SfKey::Right), Some(Key::Right));
        assert_eq!(Key::from_sfml(SfKey::Escape), Some(Key::Escape));
    }

    #[test]
    fn other_keys_are_ignored() {
        for code in [SfKey::Space, SfKey::W, SfKey::Enter, SfKey::LShift] {
            assert_eq!(Key::from_sfml(code), None);
        }
    }
}
