use crate::{foundation::core::Fps, scene::model::Easing};

/// Residual displacement below which a spring counts as settled.
const SETTLE_EPSILON: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Mass-spring-damper released from displacement 1 with zero velocity.
pub struct SpringConfig {
    pub mass: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    /// Critically damped: no overshoot.
    pub const MODERATE: SpringConfig = SpringConfig {
        mass: 1.0,
        stiffness: 100.0,
        damping: 20.0,
    };
    pub const STEADY: SpringConfig = SpringConfig {
        mass: 1.0,
        stiffness: 100.0,
        damping: 26.0,
    };
    pub const GENTLE: SpringConfig = SpringConfig {
        mass: 1.0,
        stiffness: 60.0,
        damping: 16.0,
    };
    pub const BOUNCY: SpringConfig = SpringConfig {
        mass: 1.0,
        stiffness: 180.0,
        damping: 8.0,
    };
    pub const SNAPPY: SpringConfig = SpringConfig {
        mass: 1.0,
        stiffness: 150.0,
        damping: 12.0,
    };

    pub fn for_easing(easing: Easing) -> Self {
        match easing {
            Easing::Linear => Self::STEADY,
            Easing::EaseIn => Self::GENTLE,
            Easing::EaseOut | Easing::EaseInOut | Easing::Unknown => Self::MODERATE,
            Easing::BackOut => Self::BOUNCY,
            Easing::Anticipate => Self::SNAPPY,
        }
    }

    fn omega0(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    fn zeta(&self) -> f64 {
        (self.damping / (2.0 * (self.stiffness * self.mass).sqrt())).max(0.05)
    }

    fn is_degenerate(&self) -> bool {
        !(self.mass > 0.0 && self.stiffness > 0.0) || !self.damping.is_finite()
    }

    /// Signed distance from the target at `t` seconds.
    pub fn displacement(&self, t: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let w0 = self.omega0();
        let z = self.zeta();
        if (z - 1.0).abs() < 1e-9 {
            (-w0 * t).exp() * (1.0 + w0 * t)
        } else if z < 1.0 {
            let wd = w0 * (1.0 - z * z).sqrt();
            (-z * w0 * t).exp() * ((wd * t).cos() + (z * w0 / wd) * (wd * t).sin())
        } else {
            let s = (z * z - 1.0).sqrt();
            let r1 = -w0 * (z - s);
            let r2 = -w0 * (z + s);
            (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }

    /// Upper bound on `|displacement(t)|`, non-increasing in `t`.
    fn envelope(&self, t: f64) -> f64 {
        let w0 = self.omega0();
        let z = self.zeta();
        if z < 1.0 && (z - 1.0).abs() >= 1e-9 {
            let wd = w0 * (1.0 - z * z).sqrt();
            (-z * w0 * t).exp() * (1.0 + (z * w0 / wd).powi(2)).sqrt()
        } else {
            self.displacement(t).abs()
        }
    }

    /// Seconds until the envelope drops below the settle threshold.
    pub fn settle_secs(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let mut hi = 0.1;
        while self.envelope(hi) > SETTLE_EPSILON && hi < 3600.0 {
            hi *= 2.0;
        }
        let mut lo = 0.0;
        for _ in 0..48 {
            let mid = 0.5 * (lo + hi);
            if self.envelope(mid) > SETTLE_EPSILON {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        hi
    }
}

/// Spring progress `frame` frames after release, clamped to `[0, 1]`.
///
/// With `duration_frames`, the natural settle time is stretched onto that many frames and
/// progress is exactly 1 from the last frame on.
pub fn spring_progress(
    frame: u64,
    fps: Fps,
    config: SpringConfig,
    duration_frames: Option<u64>,
) -> f64 {
    if config.is_degenerate() {
        return 1.0;
    }
    let t = match duration_frames {
        Some(0) => return 1.0,
        Some(d) if frame >= d => return 1.0,
        Some(d) => (frame as f64 / d as f64) * config.settle_secs(),
        None => fps.frames_to_secs(frame),
    };
    let p = 1.0 - config.displacement(t);
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 1.0 }
}

/// Maps `input` from `[in_lo, in_hi]` to `[out_lo, out_hi]`, clamping outside the input range.
pub fn interpolate(input: f64, (in_lo, in_hi): (f64, f64), (out_lo, out_hi): (f64, f64)) -> f64 {
    if in_hi == in_lo {
        return if input < in_lo { out_lo } else { out_hi };
    }
    let t = ((input - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + (out_hi - out_lo) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
