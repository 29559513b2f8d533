//! Photo / video carousel with background music toggle.
//!
//! The slide-advance logic lives in [`CarouselController`], a plain state
//! machine fed with [`CarouselEvent`]s. It never touches the DOM; instead it
//! returns an ordered list of [`CarouselCommand`]s which `dom.rs` executes
//! (class toggles, video playback, the auto-advance interval). This keeps the
//! "at most one timer" rule checkable on the host.

use serde::Deserialize;

mod dom;
pub mod music;

pub use dom::mount;
pub use music::MusicToggle;

/// Default auto-advance period for photo slides.
pub const SLIDE_INTERVAL_MS: u32 = 4000;

// --- Slides / Modes ----------------------------------------------------------

/// What a slide panel holds. Only videos get special treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideKind {
    Photo,
    Video,
}

/// How the carousel decides when to move on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvanceMode {
    /// A fixed interval always drives advancement; videos are not waited on.
    FixedInterval,
    /// Photos advance on the interval, videos advance when playback ends.
    #[default]
    VideoAware,
}

/// Who currently owns "advance to next slide".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,         // nothing scheduled (not started, hovered, or empty)
    TimerRunning, // exactly one interval is live
    VideoPlaying, // waiting for the active video's `ended`
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    Tick,
    VideoEnded(usize),
    Next,
    Prev,
    GoTo(usize),
    HoverEnter,
    HoverExit,
}

/// Side effects requested by the controller, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselCommand {
    /// Deactivate every slide, rewind every video, activate slide `i` and its dot.
    ShowSlide(usize),
    StartTimer,
    StopTimer,
    PlayVideo(usize),
}

/// Runtime options passed from the page (`start_carousel({ ... })`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselOptions {
    pub interval_ms: u32,
    pub mode: AdvanceMode,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self { interval_ms: SLIDE_INTERVAL_MS, mode: AdvanceMode::default() }
    }
}

impl CarouselOptions {
    /// Parse the JSON form of the options object. Empty input or `null` means defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed)
    }
}

// --- Controller ----------------------------------------------------------------

pub struct CarouselController {
    slides: Vec<SlideKind>,
    current: usize,
    phase: Phase,
    mode: AdvanceMode,
}

impl CarouselController {
    pub fn new(slides: Vec<SlideKind>, mode: AdvanceMode) -> Self {
        Self { slides, current: 0, phase: Phase::Idle, mode }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timer_live(&self) -> bool {
        self.phase == Phase::TimerRunning
    }

    fn current_is_video(&self) -> bool {
        self.slides.get(self.current) == Some(&SlideKind::Video)
    }

    /// Initial render at page load.
    pub fn start(&mut self) -> Vec<CarouselCommand> {
        let mut out = Vec::new();
        if self.slides.is_empty() {
            return out;
        }
        match self.mode {
            AdvanceMode::FixedInterval => {
                out.push(CarouselCommand::ShowSlide(self.current));
                self.start_timer(&mut out);
            }
            AdvanceMode::VideoAware => self.render(&mut out),
        }
        out
    }

    pub fn handle(&mut self, event: CarouselEvent) -> Vec<CarouselCommand> {
        let mut out = Vec::new();
        let n = self.slides.len();
        if n == 0 {
            return out;
        }
        match event {
            CarouselEvent::Tick => {
                // A tick that raced a stop is stale.
                if self.phase != Phase::TimerRunning {
                    return out;
                }
                self.current = (self.current + 1) % n;
                self.render(&mut out);
            }
            CarouselEvent::VideoEnded(i) => {
                if self.phase != Phase::VideoPlaying || i != self.current {
                    return out;
                }
                self.phase = Phase::Idle;
                self.current = (self.current + 1) % n;
                self.render(&mut out);
            }
            CarouselEvent::Next => {
                self.current = (self.current + 1) % n;
                self.render(&mut out);
                self.reset_after_manual(&mut out);
            }
            CarouselEvent::Prev => {
                self.current = (self.current + n - 1) % n;
                self.render(&mut out);
                self.reset_after_manual(&mut out);
            }
            CarouselEvent::GoTo(i) => {
                if i >= n {
                    return out;
                }
                self.current = i;
                self.render(&mut out);
                self.reset_after_manual(&mut out);
            }
            CarouselEvent::HoverEnter => {
                if self.mode == AdvanceMode::VideoAware && self.current_is_video() {
                    return out;
                }
                self.stop_timer(&mut out);
            }
            CarouselEvent::HoverExit => {
                if self.mode == AdvanceMode::VideoAware && self.current_is_video() {
                    return out;
                }
                if self.phase != Phase::TimerRunning {
                    self.start_timer(&mut out);
                }
            }
        }
        out
    }

    fn render(&mut self, out: &mut Vec<CarouselCommand>) {
        match self.mode {
            AdvanceMode::FixedInterval => out.push(CarouselCommand::ShowSlide(self.current)),
            AdvanceMode::VideoAware => {
                self.stop_timer(out);
                out.push(CarouselCommand::ShowSlide(self.current));
                if self.current_is_video() {
                    out.push(CarouselCommand::PlayVideo(self.current));
                    self.phase = Phase::VideoPlaying;
                } else {
                    self.start_timer(out);
                }
            }
        }
    }

    // Fixed-interval mode restarts the interval after manual navigation; the video-aware
    // render already did whatever the new slide needs.
    fn reset_after_manual(&mut self, out: &mut Vec<CarouselCommand>) {
        if self.mode == AdvanceMode::FixedInterval {
            self.start_timer(out);
        }
    }

    fn start_timer(&mut self, out: &mut Vec<CarouselCommand>) {
        self.stop_timer(out);
        out.push(CarouselCommand::StartTimer);
        self.phase = Phase::TimerRunning;
    }

    fn stop_timer(&mut self, out: &mut Vec<CarouselCommand>) {
        if self.phase == Phase::TimerRunning {
            out.push(CarouselCommand::StopTimer);
        }
        self.phase = Phase::Idle;
    }
}
