//! Ball physics: translation, friction, spin and kicks

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::REFERENCE_FPS;
use crate::tuning::Tuning;
use crate::{normalize_degrees, sign_or_positive};

/// Kick sources closer than this to the ball center are ignored
const MIN_KICK_DISTANCE: f32 = 1e-4;

/// Rescale a per-frame factor (calibrated at 60 Hz) to an arbitrary dt
#[inline]
pub fn frame_factor(per_frame: f32, dt: f32) -> f32 {
    per_frame.powf(dt * REFERENCE_FPS)
}

/// The match ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    pub vel: Vec2,
    /// Diameter
    pub size: f32,
    /// Rotation angle in degrees, [0, 360)
    pub angle: f32,
    /// Rotation rate in degrees/s
    pub spin: f32,
}

impl Ball {
    /// A stationary ball centered on the field
    pub fn new(field_size: Vec2, size: f32) -> Self {
        Self {
            pos: field_size / 2.0 - Vec2::splat(size / 2.0),
            vel: Vec2::ZERO,
            size,
            angle: 0.0,
            spin: 0.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Move the ball so its center sits at `center`
    #[inline]
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - Vec2::splat(self.size / 2.0);
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance position, friction and spin by `dt` seconds
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) {
        self.pos += self.vel * dt;

        let friction = frame_factor(tuning.friction_per_sec, dt);
        self.vel *= friction;

        // Snap residue to zero so the ball actually stops
        if self.vel.x.abs() < tuning.stop_speed {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < tuning.stop_speed {
            self.vel.y = 0.0;
        }

        let target_spin = sign_or_positive(self.vel.x) * self.speed() * tuning.spin_coeff;
        let smooth = frame_factor(tuning.spin_smooth, dt);
        self.spin = self.spin * smooth + target_spin * (1.0 - smooth);
        self.spin *= friction;

        self.angle = normalize_degrees(self.angle + self.spin * dt);
    }

    /// Kick the ball away from `from` with the given force.
    ///
    /// Returns false (and leaves the ball untouched) when `from` coincides
    /// with the ball center, since there is no direction to kick in.
    pub fn kick(&mut self, from: Vec2, force: f32, spin_impulse: f32) -> bool {
        let offset = self.center() - from;
        let dist = offset.length();
        if dist <= MIN_KICK_DISTANCE {
            return false;
        }

        let dir = offset / dist;
        self.vel += dir * force;
        self.spin += sign_or_positive(dir.x) * spin_impulse;
        true
    }

    /// Re-center for kick-off, heading left or right with a little vertical jitter
    pub fn reset<R: Rng>(&mut self, field_size: Vec2, toward_left: bool, tuning: &Tuning, rng: &mut R) {
        self.set_center(field_size / 2.0);
        let dir = if toward_left { -1.0 } else { 1.0 };
        let jitter = tuning.kickoff_jitter * (rng.random::<f32>() - 0.5);
        self.vel = Vec2::new(dir * tuning.kickoff_speed, jitter);
        self.spin = 0.0;
        self.angle = 0.0;
    }

    /// Proportionally rescale the velocity so its magnitude is at most `max_speed`
    pub fn clamp_speed(&mut self, max_speed: f32) {
        let speed = self.speed();
        if speed > max_speed {
            self.vel *= max_speed / speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Vec2 {
        Vec2::new(1300.0, 800.0)
    }

    #[test]
    fn test_new_ball_centered_and_still() {
        let ball = Ball::new(field(), 20.0);
        assert_eq!(ball.center(), Vec2::new(650.0, 400.0));
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_kick_from_left_is_horizontal() {
        let mut ball = Ball::new(field(), 20.0);
        let from = ball.center() - Vec2::new(30.0, 0.0);
        assert!(ball.kick(from, 450.0, 250.0));
        assert!((ball.vel.x - 450.0).abs() < 1e-3);
        assert!(ball.vel.y.abs() < 1e-3);
        assert_eq!(ball.spin, 250.0);
    }

    #[test]
    fn test_kick_from_right_spins_backwards() {
        let mut ball = Ball::new(field(), 20.0);
        let from = ball.center() + Vec2::new(10.0, 0.0);
        ball.kick(from, 400.0, 250.0);
        assert!((ball.vel.x + 400.0).abs() < 1e-3);
        assert_eq!(ball.spin, -250.0);
    }

    #[test]
    fn test_kick_from_center_is_noop() {
        let mut ball = Ball::new(field(), 20.0);
        let before = ball.clone();
        assert!(!ball.kick(ball.center(), 450.0, 250.0));
        assert_eq!(ball, before);
    }

    #[test]
    fn test_kicks_accumulate() {
        let mut ball = Ball::new(field(), 20.0);
        let from = ball.center() - Vec2::new(0.0, 20.0);
        ball.kick(from, 100.0, 0.0);
        ball.kick(from, 100.0, 0.0);
        assert!((ball.vel.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_friction_matches_per_frame_factor_at_60hz() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(field(), 20.0);
        ball.vel = Vec2::new(500.0, 0.0);
        ball.integrate(1.0 / 60.0, &tuning);
        assert!((ball.vel.x - 500.0 * 0.98).abs() < 1e-2);
    }

    #[test]
    fn test_friction_independent_of_frame_rate() {
        let tuning = Tuning::default();
        let mut coarse = Ball::new(field(), 20.0);
        let mut fine = coarse.clone();
        coarse.vel = Vec2::new(600.0, 300.0);
        fine.vel = coarse.vel;

        coarse.integrate(1.0 / 30.0, &tuning);
        fine.integrate(1.0 / 60.0, &tuning);
        fine.integrate(1.0 / 60.0, &tuning);

        assert!((coarse.vel - fine.vel).length() < 1e-2);
    }

    #[test]
    fn test_slow_components_snap_to_zero() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(field(), 20.0);
        ball.vel = Vec2::new(300.0, 9.0);
        ball.integrate(1.0 / 60.0, &tuning);
        assert!(ball.vel.x > 0.0);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_spin_follows_direction() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(field(), 20.0);
        ball.vel = Vec2::new(-400.0, 0.0);
        ball.integrate(1.0 / 60.0, &tuning);
        assert!(ball.spin < 0.0);
        assert!((0.0..360.0).contains(&ball.angle));
    }

    #[test]
    fn test_reset_heads_requested_way() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::new(field(), 20.0);
        ball.pos = Vec2::new(5.0, 5.0);
        ball.spin = 99.0;

        ball.reset(field(), true, &tuning, &mut rng);
        assert_eq!(ball.center(), Vec2::new(650.0, 400.0));
        assert_eq!(ball.vel.x, -280.0);
        assert!(ball.vel.y.abs() <= 40.0);
        assert_eq!(ball.spin, 0.0);

        ball.reset(field(), false, &tuning, &mut rng);
        assert_eq!(ball.vel.x, 280.0);
    }

    #[test]
    fn test_clamp_speed_keeps_direction() {
        let mut ball = Ball::new(field(), 20.0);
        ball.vel = Vec2::new(1200.0, 900.0);
        ball.clamp_speed(900.0);
        assert!((ball.speed() - 900.0).abs() < 1e-2);
        assert!((ball.vel.y / ball.vel.x - 0.75).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_speed_decays_to_exact_zero(
            vx in -900.0f32..900.0,
            vy in -900.0f32..900.0,
            dts in proptest::collection::vec(0.001f32..0.1, 1..400),
        ) {
            let tuning = Tuning::default();
            let mut ball = Ball::new(field(), 20.0);
            ball.vel = Vec2::new(vx, vy);
            let mut last = ball.speed();
            for dt in dts {
                ball.integrate(dt, &tuning);
                let speed = ball.speed();
                prop_assert!(speed <= last);
                last = speed;
            }
            // Enough time at any rate to stop completely
            for _ in 0..2000 {
                ball.integrate(1.0 / 60.0, &tuning);
            }
            prop_assert_eq!(ball.vel, Vec2::ZERO);
        }

        #[test]
        fn prop_angle_stays_normalized(
            spin in -5000.0f32..5000.0,
            dt in 0.001f32..0.1,
        ) {
            let tuning = Tuning::default();
            let mut ball = Ball::new(field(), 20.0);
            ball.spin = spin;
            ball.vel = Vec2::new(spin / 10.0, 0.0);
            for _ in 0..50 {
                ball.integrate(dt, &tuning);
                prop_assert!(ball.angle >= 0.0 && ball.angle < 360.0);
            }
        }
    }
}
