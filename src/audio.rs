//! One-shot sound effects.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Collect,
    Jump,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Collect, SoundEffect::Jump];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Collect => "coin1.wav",
            SoundEffect::Jump => "jump1.wav",
        }
    }
}

/// Fire and forget: `play` never blocks and reports nothing back.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Drops every sound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(feature = "window")]
pub use sfml_audio::SfmlAudio;

#[cfg(feature = "window")]
mod sfml_audio {
    use std::collections::HashMap;
    use std::path::Path;

    use sfml::audio::{Sound, SoundBuffer};
    use tracing::{info, warn};

    use super::{AudioSink, SoundEffect};

    /// Overlapping plays of the same effect.
    const VOICES: usize = 4;

    struct Voices {
        sounds: Vec<Sound<'static>>,
        next: usize,
    }

    /// Sounds are loaded once and kept for the whole run; a restart does not
    /// reload them.
    pub struct SfmlAudio {
        effects: HashMap<SoundEffect, Voices>,
    }

    impl SfmlAudio {
        /// Missing or broken files leave that effect silent.
        pub fn load(directory: impl AsRef<Path>) -> Self {
            let directory = directory.as_ref();
            let mut effects = HashMap::new();

            for effect in SoundEffect::ALL {
                let path = directory.join(effect.file_name());
                let Some(path_str) = path.to_str() else {
                    warn!(path = %path.display(), "sound path is not valid UTF-8");
                    continue;
                };

                let buffer = match SoundBuffer::from_file(path_str) {
                    Ok(buffer) => buffer,
                    Err(err) => {
                        warn!(path = %path.display(), %err, "could not load sound, it will stay silent");
                        continue;
                    }
                };

                // lives as long as the process, like the sounds borrowing it
                let buffer: &'static SoundBuffer = Box::leak(Box::new(buffer));
                let sounds: Vec<_> = (0..VOICES)
                    .filter_map(|_| Sound::with_buffer(buffer).ok())
                    .collect();
                if sounds.is_empty() {
                    warn!(?effect, "could not create a voice, it will stay silent");
                    continue;
                }

                info!(?effect, path = %path.display(), "loaded sound");
                effects.insert(effect, Voices { sounds, next: 0 });
            }

            Self { effects }
        }
    }

    impl AudioSink for SfmlAudio {
        fn play(&mut self, effect: SoundEffect) {
            let Some(voices) = self.effects.get_mut(&effect) else {
                return;
            };

            let i = voices.next;
            voices.next = (i + 1) % voices.sounds.len();
            voices.sounds[i].play();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_map_to_their_files() {
        assert_eq!(SoundEffect::Collect.file_name(), "coin1.wav");
        assert_eq!(SoundEffect::Jump.file_name(), "jump1.wav");
    }
}
