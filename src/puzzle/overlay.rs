//! Two-stage click gate on the unlock overlay.
//!
//! The first click pulses the heart, reveals the message after
//! [`REVEAL_DELAY_MS`] and navigates [`NAVIGATE_DELAY_MS`] later. Any click
//! once the message is shown navigates straight away. Navigation is emitted at
//! most once, whichever path gets there first.

pub const REWARD_PATH: &str = "/reward";
pub const SHOW_DELAY_MS: u32 = 50;
pub const REVEAL_DELAY_MS: u32 = 600;
pub const NAVIGATE_DELAY_MS: u32 = 2500;

pub const SHOW_CLASS: &str = "show";
pub const PULSE_CLASS: &str = "heart-clicked-pulse";
pub const VISIBLE_CLASS: &str = "visible";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Idle,
    MessageShown,
    Navigated,
}

/// Follow-up steps that the page runs after a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayStep {
    Reveal,
    Navigate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEffect {
    PulseHeart,
    RevealMessage,
    After { ms: u32, step: OverlayStep },
    Navigate(&'static str),
}

#[derive(Debug)]
pub struct UnlockOverlay {
    state: OverlayState,
}

impl Default for UnlockOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl UnlockOverlay {
    pub fn new() -> Self {
        Self { state: OverlayState::Idle }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn click(&mut self) -> Vec<OverlayEffect> {
        match self.state {
            OverlayState::Idle => {
                self.state = OverlayState::MessageShown;
                vec![
                    OverlayEffect::PulseHeart,
                    OverlayEffect::After { ms: REVEAL_DELAY_MS, step: OverlayStep::Reveal },
                ]
            }
            OverlayState::MessageShown => self.navigate(),
            OverlayState::Navigated => Vec::new(),
        }
    }

    /// A scheduled step came due.
    pub fn step(&mut self, step: OverlayStep) -> Vec<OverlayEffect> {
        match (step, self.state) {
            (OverlayStep::Reveal, OverlayState::MessageShown) => vec![
                OverlayEffect::RevealMessage,
                OverlayEffect::After { ms: NAVIGATE_DELAY_MS, step: OverlayStep::Navigate },
            ],
            (OverlayStep::Navigate, OverlayState::MessageShown) => self.navigate(),
            _ => Vec::new(),
        }
    }

    fn navigate(&mut self) -> Vec<OverlayEffect> {
        self.state = OverlayState::Navigated;
        vec![OverlayEffect::Navigate(REWARD_PATH)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_click_does_not_navigate() {
        let mut o = UnlockOverlay::new();
        let fx = o.click();
        assert!(!fx.iter().any(|e| matches!(e, OverlayEffect::Navigate(_))));
        assert_eq!(o.state(), OverlayState::MessageShown);
    }

    #[test]
    fn test_staged_reveal_then_navigate() {
        let mut o = UnlockOverlay::new();
        o.click();
        let fx = o.step(OverlayStep::Reveal);
        assert_eq!(
            fx,
            vec![
                OverlayEffect::RevealMessage,
                OverlayEffect::After { ms: 2500, step: OverlayStep::Navigate }
            ]
        );
        assert_eq!(o.step(OverlayStep::Navigate), vec![OverlayEffect::Navigate("/reward")]);
        assert_eq!(o.state(), OverlayState::Navigated);
    }

    #[test]
    fn test_second_click_navigates_once() {
        let mut o = UnlockOverlay::new();
        o.click();
        assert_eq!(o.click(), vec![OverlayEffect::Navigate(REWARD_PATH)]);
        // the pending timers find nothing left to do
        assert!(o.step(OverlayStep::Reveal).is_empty());
        assert!(o.step(OverlayStep::Navigate).is_empty());
        assert!(o.click().is_empty());
    }

    #[test]
    fn test_steps_before_click_are_ignored() {
        let mut o = UnlockOverlay::new();
        assert!(o.step(OverlayStep::Navigate).is_empty());
        assert_eq!(o.state(), OverlayState::Idle);
    }
}
