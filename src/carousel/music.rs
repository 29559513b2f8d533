//! Background music button state.
//!
//! The button label only flips to "pause" after the audio element's `play()`
//! promise resolves, so a blocked autoplay leaves it on "play".

pub const PLAY_LABEL: &str = "🎵 Play Our Song";
pub const PAUSE_LABEL: &str = "⏸ Pause Music";
pub const PLAYING_CLASS: &str = "playing";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicAction {
    RequestPlay,
    Pause,
}

#[derive(Debug, Default)]
pub struct MusicToggle {
    playing: bool,
}

impl MusicToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what a click does, given whether the audio element is paused.
    pub fn click(&mut self, audio_paused: bool) -> MusicAction {
        if audio_paused {
            MusicAction::RequestPlay
        } else {
            self.playing = false;
            MusicAction::Pause
        }
    }

    pub fn play_started(&mut self) {
        self.playing = true;
    }

    /// Natural end of the track.
    pub fn ended(&mut self) {
        self.playing = false;
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn label(&self) -> &'static str {
        if self.playing { PAUSE_LABEL } else { PLAY_LABEL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_follows_playback() {
        let mut m = MusicToggle::new();
        assert_eq!(m.label(), PLAY_LABEL);
        assert_eq!(m.click(true), MusicAction::RequestPlay);
        // still "play" until the promise resolves
        assert_eq!(m.label(), PLAY_LABEL);
        m.play_started();
        assert_eq!(m.label(), PAUSE_LABEL);
        assert_eq!(m.click(false), MusicAction::Pause);
        assert!(!m.playing());
    }

    #[test]
    fn test_ended_resets_label() {
        let mut m = MusicToggle::new();
        m.click(true);
        m.play_started();
        m.ended();
        assert_eq!(m.label(), PLAY_LABEL);
    }
}
