//! Banner animation as a pure function of elapsed time
//!
//! Two overlapping segments share one clock:
//! - zoom: both text layers scale up with an ease-out quadratic curve over
//!   the whole run
//! - fade: both text layers go from opaque to invisible, linearly, over the
//!   last half second
//!
//! The banner closes once the fade has finished.

use std::time::Duration;

/// Where the banner is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    FadingOut,
    Closed,
}

/// Animated values for one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub elapsed: f32,
    pub phase: Phase,
    pub back_scale: f32,
    pub front_scale: f32,
    pub opacity: f32,
}

/// Start and end value of an animated scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub from: f32,
    pub to: f32,
}

impl ScaleRange {
    pub fn new(from: f32, to: f32) -> Self {
        ScaleRange { from, to }
    }

    fn at(&self, progress: f32) -> f32 {
        self.from + (self.to - self.from) * progress
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    total: Duration,
    fade: Duration,
    back: ScaleRange,
    front: ScaleRange,
}

impl Default for Timeline {
    fn default() -> Self {
        Timeline::new(ScaleRange::new(0.9, 1.2), ScaleRange::new(0.85, 1.0))
    }
}

impl Timeline {
    pub const TOTAL: Duration = Duration::from_millis(3000);
    pub const FADE: Duration = Duration::from_millis(500);

    pub fn new(back: ScaleRange, front: ScaleRange) -> Self {
        Timeline {
            total: Self::TOTAL,
            fade: Self::FADE,
            back,
            front,
        }
    }

    /// Moment the fade starts, measured from the start of the run
    pub fn fade_start(&self) -> Duration {
        self.total - self.fade
    }

    pub fn phase(&self, elapsed: Duration) -> Phase {
        if elapsed >= self.total {
            Phase::Closed
        } else if elapsed >= self.fade_start() {
            Phase::FadingOut
        } else {
            Phase::Entering
        }
    }

    /// Sample every animated value at `elapsed` since the banner was loaded
    pub fn sample(&self, elapsed: Duration) -> Frame {
        let t = elapsed.as_secs_f32();
        let zoom = ease_out_quad(t / self.total.as_secs_f32());

        let fade_start = self.fade_start().as_secs_f32();
        let fade = ((t - fade_start) / self.fade.as_secs_f32()).clamp(0.0, 1.0);

        Frame {
            elapsed: t,
            phase: self.phase(elapsed),
            back_scale: self.back.at(zoom),
            front_scale: self.front.at(zoom),
            opacity: 1.0 - fade,
        }
    }
}

/// Fast start, decelerating to the end value
pub fn ease_out_quad(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}
