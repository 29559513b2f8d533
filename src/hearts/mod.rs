//! Floating hearts backdrop.
//!
//! Each heart is a `div.heart.<size>` whose motion is entirely CSS; we only pick
//! the randomized size, start column, duration and delay once at startup.

mod dom;

pub use dom::mount;

pub const HEART_COUNT: usize = 15;
pub const MIN_DURATION_S: f64 = 8.0;
pub const DURATION_SPREAD_S: f64 = 6.0;
pub const MAX_DELAY_S: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeartSize {
    Small,
    Medium,
    Large,
}

impl HeartSize {
    pub const ALL: [HeartSize; 3] = [HeartSize::Small, HeartSize::Medium, HeartSize::Large];

    pub fn class_name(self) -> &'static str {
        match self {
            HeartSize::Small => "small",
            HeartSize::Medium => "medium",
            HeartSize::Large => "large",
        }
    }
}

/// Uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartSpec {
    pub size: HeartSize,
    pub left_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl HeartSpec {
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R, viewport_width: f64) -> Self {
        let pick = (rng.next_f64() * HeartSize::ALL.len() as f64) as usize;
        let size = HeartSize::ALL[pick.min(HeartSize::ALL.len() - 1)];
        Self {
            size,
            left_px: rng.next_f64() * viewport_width.max(0.0),
            duration_s: MIN_DURATION_S + rng.next_f64() * DURATION_SPREAD_S,
            delay_s: rng.next_f64() * MAX_DELAY_S,
        }
    }

    pub fn left_css(&self) -> String {
        format!("{}px", self.left_px)
    }

    pub fn duration_css(&self) -> String {
        format!("{}s", self.duration_s)
    }

    pub fn delay_css(&self) -> String {
        format!("{}s", self.delay_s)
    }
}

pub fn generate_hearts<R: RandomSource + ?Sized>(
    count: usize,
    viewport_width: f64,
    rng: &mut R,
) -> Vec<HeartSpec> {
    (0..count).map(|_| HeartSpec::random(rng, viewport_width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Vec<f64>, usize);

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v
        }
    }

    #[test]
    fn test_spec_from_scripted_values() {
        let mut rng = Scripted(vec![0.5, 0.25, 0.5, 0.2], 0);
        let h = HeartSpec::random(&mut rng, 800.0);
        assert_eq!(h.size, HeartSize::Medium);
        assert_eq!(h.left_px, 200.0);
        assert_eq!(h.duration_s, 11.0);
        assert_eq!(h.delay_s, 1.0);
        assert_eq!(h.left_css(), "200px");
        assert_eq!(h.duration_css(), "11s");
    }

    #[test]
    fn test_ranges_hold_at_extremes() {
        let mut rng = Scripted(vec![0.0, 0.999_999], 0);
        for h in generate_hearts(HEART_COUNT, 1024.0, &mut rng) {
            assert!(h.left_px >= 0.0 && h.left_px < 1024.0);
            assert!(h.duration_s >= 8.0 && h.duration_s < 14.0);
            assert!(h.delay_s >= 0.0 && h.delay_s < 5.0);
        }
    }

    #[test]
    fn test_generates_requested_count() {
        let mut rng = Scripted(vec![0.1, 0.9, 0.4], 0);
        assert_eq!(generate_hearts(HEART_COUNT, 500.0, &mut rng).len(), 15);
    }
}
