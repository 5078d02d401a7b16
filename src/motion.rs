//! Critically-damped motion primitives.
//!
//! Every moving UI element (selection highlight, menu slide, page
//! slide, text scroll) is a [`Follower`]: a scalar that chases a target
//! with a velocity computed by a discrete PID step each frame tick.
//! The integral term is clamped to prevent windup; gains come from
//! [`crate::config::AppConfig`] so they can be edited at runtime.

use libm::fabsf;

use crate::config::PidGains;

/// Default clamp for the integral accumulator.
pub const DEFAULT_INTEGRAL_LIMIT: f32 = 20.0;

/// A follower is considered settled once both its position error and
/// its velocity drop below this threshold.
pub const SETTLE_EPSILON: f32 = 0.1;

/// Discrete PID controller used as an animation velocity source.
#[derive(Clone, Copy, Debug)]
pub struct Pid {
    gains: PidGains,
    integral: f32,
    last_error: f32,
    integral_limit: f32,
}

impl Pid {
    pub fn new(gains: PidGains) -> Self {
        Self::with_integral_limit(gains, DEFAULT_INTEGRAL_LIMIT)
    }

    pub fn with_integral_limit(gains: PidGains, integral_limit: f32) -> Self {
        Self {
            gains,
            integral: 0.0,
            last_error: 0.0,
            integral_limit,
        }
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Replace the coefficients, keeping the accumulated state.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    /// One PID step: returns the velocity to apply this tick.
    pub fn update(&mut self, target: f32, current: f32) -> f32 {
        let error = target - current;
        self.integral += error;
        self.integral = self
            .integral
            .clamp(-self.integral_limit, self.integral_limit);
        let derivative = error - self.last_error;
        let output =
            self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative;
        self.last_error = error;
        output
    }

    /// Zero the integral accumulator and the stored error.
    ///
    /// Must be called when gains change between animations so stale
    /// accumulated state does not bleed into the next one.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
    }

    #[cfg(test)]
    pub fn integral(&self) -> f32 {
        self.integral
    }
}

/// A PID-driven scalar chasing a target.
///
/// Call [`Follower::step`] once per frame tick. While unsettled the
/// position integrates the PID output as a velocity; once both error
/// and velocity fall below [`SETTLE_EPSILON`] the follower snaps to the
/// target and resets its controller.
#[derive(Clone, Copy, Debug)]
pub struct Follower {
    current: f32,
    velocity: f32,
    pid: Pid,
}

impl Follower {
    pub fn new(start: f32, gains: PidGains) -> Self {
        Self {
            current: start,
            velocity: 0.0,
            pid: Pid::new(gains),
        }
    }

    pub fn with_integral_limit(start: f32, gains: PidGains, integral_limit: f32) -> Self {
        Self {
            current: start,
            velocity: 0.0,
            pid: Pid::with_integral_limit(gains, integral_limit),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_settled_at(&self, target: f32) -> bool {
        fabsf(target - self.current) <= SETTLE_EPSILON && fabsf(self.velocity) <= SETTLE_EPSILON
    }

    /// Advance one tick toward `target`. Returns `true` once settled.
    pub fn step(&mut self, target: f32) -> bool {
        if self.is_settled_at(target) {
            self.current = target;
            self.velocity = 0.0;
            self.pid.reset();
            return true;
        }
        self.velocity = self.pid.update(target, self.current);
        self.current += self.velocity;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gains(kp: f32, ki: f32, kd: f32) -> PidGains {
        PidGains { kp, ki, kd }
    }

    #[test]
    fn update_at_target_with_clean_state_is_identity() {
        let mut pid = Pid::new(gains(0.25, 0.1, 0.15));
        let out = pid.update(5.0, 5.0);
        assert_eq!(out, 0.0);
        assert_eq!(pid.integral(), 0.0);
    }

    #[test]
    fn integral_stays_within_limit() {
        let mut pid = Pid::new(gains(0.0, 1.0, 0.0));
        for _ in 0..100 {
            pid.update(100.0, 0.0);
            assert!(pid.integral().abs() <= DEFAULT_INTEGRAL_LIMIT);
        }
        assert_eq!(pid.integral(), DEFAULT_INTEGRAL_LIMIT);

        for _ in 0..200 {
            pid.update(-100.0, 0.0);
        }
        assert_eq!(pid.integral(), -DEFAULT_INTEGRAL_LIMIT);
    }

    #[test]
    fn reset_clears_accumulated_state() {
        let mut pid = Pid::new(gains(0.5, 0.5, 0.5));
        pid.update(10.0, 0.0);
        pid.reset();
        // With target == current the next update must be a no-op again.
        assert_eq!(pid.update(3.0, 3.0), 0.0);
    }

    #[test]
    fn set_gains_keeps_state_until_reset() {
        let mut pid = Pid::new(gains(0.0, 1.0, 0.0));
        pid.update(10.0, 0.0);
        pid.set_gains(gains(1.0, 0.0, 0.0));
        // Old integral is still there; only reset() clears it.
        assert!(pid.integral() > 0.0);
    }

    #[test]
    fn follower_converges_and_snaps() {
        let mut f = Follower::new(0.0, gains(0.25, 0.0, 0.15));
        let mut settled = false;
        for _ in 0..500 {
            if f.step(64.0) {
                settled = true;
                break;
            }
        }
        assert!(settled, "follower never settled");
        assert_eq!(f.current(), 64.0);
        assert_eq!(f.velocity(), 0.0);
    }

    #[test]
    fn follower_tracks_moving_target() {
        let mut f = Follower::new(0.0, gains(0.2, 0.0, 0.1));
        for _ in 0..300 {
            f.step(12.0);
        }
        assert_eq!(f.current(), 12.0);
        for _ in 0..300 {
            f.step(48.0);
        }
        assert_eq!(f.current(), 48.0);
    }

    #[test]
    fn settled_follower_reports_immediately() {
        let f = Follower::new(30.0, gains(0.25, 0.0, 0.15));
        assert!(f.is_settled_at(30.0));
        assert!(!f.is_settled_at(31.0));
    }
}
