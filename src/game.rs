use tracing::{debug, info, trace};

use crate::audio::{AudioSink, Silent};
use crate::events::FrameEvent;
use crate::input::{InputState, Key};
use crate::level::Level;
use crate::session::Session;

/// What the frontend drives: key events in, ticks, and a session to draw.
///
/// The held keys live here rather than in the session because they mirror
/// the physical keyboard and so survive a restart.
pub struct Game<A: AudioSink = Silent> {
    level: Level,
    session: Session,
    input: InputState,
    audio: A,
}

impl<A: AudioSink> Game<A> {
    pub fn new(level: Level, audio: A) -> Self {
        let session = Session::new(&level);
        Self {
            level,
            session,
            input: InputState::default(),
            audio,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Up only counts while standing on something.
    pub fn key_pressed(&mut self, key: Key) -> Option<FrameEvent> {
        match key {
            Key::Escape => {
                self.restart();
                Some(FrameEvent::Restarted)
            }
            Key::Up => {
                if !self.session.can_jump() {
                    trace!("jump ignored while airborne");
                    return None;
                }

                self.input.press(Key::Up);
                self.apply_input();

                // up and down together cancel out, so nothing leaves the ground
                if self.input.down {
                    return None;
                }

                debug!(position = ?self.session.player_position(), "jump");
                self.dispatch(FrameEvent::Jumped);
                Some(FrameEvent::Jumped)
            }
            Key::Down | Key::Left | Key::Right => {
                self.input.press(key);
                self.apply_input();
                None
            }
        }
    }

    pub fn key_released(&mut self, key: Key) {
        if self.input.release(key) {
            self.apply_input();
        } else {
            trace!(?key, "release of a key that was not held");
        }
    }

    /// One fixed step of the session.
    pub fn update(&mut self) -> Vec<FrameEvent> {
        let events = self.session.tick();
        for event in &events {
            self.dispatch(*event);
        }
        events
    }

    /// Throws the session away and builds it again from the level.
    pub fn restart(&mut self) {
        info!(
            level = %self.level.name,
            score = self.session.score(),
            ticks = self.session.ticks(),
            "restarting"
        );
        self.session = Session::new(&self.level);
    }

    fn apply_input(&mut self) {
        self.session.set_player_velocity(self.input.velocity());
    }

    fn dispatch(&mut self, event: FrameEvent) {
        if let Some(effect) = event.sound() {
            self.audio.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::audio::SoundEffect;
    use crate::physics::Footing;
    use crate::{PLAYER_JUMP_SPEED, PLAYER_START};

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn game() -> Game<Recorder> {
        Game::new(Level::grassland(), Recorder::default())
    }

    #[test]
    fn jump_from_the_ground() {
        let mut game = game();

        assert_eq!(game.key_pressed(Key::Up), Some(FrameEvent::Jumped));
        assert_eq!(game.session().player_velocity(), DVec2::new(0.0, PLAYER_JUMP_SPEED));
        assert_eq!(game.audio().0, vec![SoundEffect::Jump]);

        game.update();

        assert_eq!(game.session().player_position(), PLAYER_START + DVec2::new(0.0, 20.0));
        assert_eq!(game.session().footing(), Footing::Airborne);
    }

    #[test]
    fn no_jump_while_airborne() {
        let mut game = game();
        game.key_pressed(Key::Up);
        game.update();
        game.update();
        assert_eq!(game.session().footing(), Footing::Airborne);
        let before = game.session().player_velocity();

        assert_eq!(game.key_pressed(Key::Up), None);
        assert_eq!(game.session().player_velocity(), before);

        let jumps = game
            .audio()
            .0
            .iter()
            .filter(|e| **e == SoundEffect::Jump)
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn up_with_down_held_stays_put() {
        let mut game = game();
        game.key_pressed(Key::Down);

        assert_eq!(game.key_pressed(Key::Up), None);
        assert_eq!(game.session().player_velocity(), DVec2::ZERO);
        assert!(game.audio().0.is_empty());
    }

    #[test]
    fn arrows_set_and_clear_velocity() {
        let mut game = game();

        game.key_pressed(Key::Right);
        assert_eq!(game.session().player_velocity(), DVec2::new(5.0, 0.0));

        game.key_pressed(Key::Left);
        assert_eq!(game.session().player_velocity(), DVec2::ZERO);

        game.key_released(Key::Right);
        assert_eq!(game.session().player_velocity(), DVec2::new(-5.0, 0.0));

        game.key_released(Key::Left);
        assert_eq!(game.session().player_velocity(), DVec2::ZERO);
    }

    #[test]
    fn releasing_an_unheld_key_keeps_falling_speed() {
        let mut game = game();
        game.key_pressed(Key::Up);
        for _ in 0..30 {
            game.update();
        }
        let falling = game.session().player_velocity();
        assert!(falling.y < 0.0);

        game.key_released(Key::Left);

        assert_eq!(game.session().player_velocity(), falling);
    }

    #[test]
    fn coin_pickup_plays_a_sound() {
        let mut game = game();
        // the first grassland coin overlaps the spawn
        let events = game.update();

        assert_eq!(events, vec![FrameEvent::CoinCollected { score: 1 }]);
        assert_eq!(game.audio().0, vec![SoundEffect::Collect]);
    }

    #[test]
    fn escape_rebuilds_the_session() {
        let mut level = Level::grassland();
        level.coins.insert(0, level.coins[0]);
        level.coins.insert(0, level.coins[0]);
        let mut game = Game::new(level, Recorder::default());

        // three coins stacked on the spawn
        game.key_pressed(Key::Right);
        game.update();
        for _ in 0..10 {
            game.update();
        }
        assert_eq!(game.session().score(), 3);
        assert_eq!(game.session().coins_remaining(), 4);

        assert_eq!(game.key_pressed(Key::Escape), Some(FrameEvent::Restarted));

        let session = game.session();
        assert_eq!(session.score(), 0);
        assert_eq!(session.score_text(), "Score: 0");
        assert_eq!(session.player_position(), PLAYER_START);
        assert_eq!(session.camera(), PLAYER_START);
        assert_eq!(session.coins_remaining(), 7);
        assert_eq!(session.coin_positions().len(), game.level().coins.len());
        assert_eq!(session.ticks(), 0);

        // the right arrow is still physically held
        assert!(game.input().right);
    }
}
