use crate::audio::SoundEffect;

/// Something that happened during a tick or while handling a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    CoinCollected { score: u32 },
    Jumped,
    Restarted,
}

impl FrameEvent {
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            FrameEvent::CoinCollected { .. } => Some(SoundEffect::Collect),
            FrameEvent::Jumped => Some(SoundEffect::Jump),
            FrameEvent::Restarted => None,
        }
    }
}

/// Events raised by systems during one tick, drained by the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents(Vec<FrameEvent>);

impl FrameEvents {
    pub fn push(&mut self, event: FrameEvent) {
        self.0.push(event);
    }

    pub fn drain(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.0)
    }
}
