//! Collision detection and response for axis-aligned boxes
//!
//! The ball and every player are treated as rectangles. Ball-player contacts
//! push the ball clear of the player and deflect it by where it struck the
//! player's box, like a paddle in classic Pong.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::player::Player;
use crate::sign_or_positive;
use crate::tuning::Tuning;

/// Push-out is skipped when the centers are closer than this
const MIN_PUSH_DISTANCE: f32 = 0.1;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Overlap test; rectangles that only touch along an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        !(a_max.x <= b_min.x || b_max.x <= a_min.x || a_max.y <= b_min.y || b_max.y <= a_min.y)
    }
}

/// Bounce the ball off the top and bottom touchlines
///
/// Returns true if either line was hit.
pub fn ball_wall_collision(ball: &mut Ball, field_height: f32) -> bool {
    let mut hit = false;
    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = -ball.vel.y;
        hit = true;
    }
    if ball.pos.y + ball.size >= field_height {
        ball.pos.y = field_height - ball.size;
        ball.vel.y = -ball.vel.y;
        hit = true;
    }
    hit
}

/// Distance from the player center along `dir` at which the ball box is
/// clear of the player box
fn exit_distance(dir: Vec2, half_extents: Vec2) -> f32 {
    let along_x = if dir.x.abs() > f32::EPSILON {
        half_extents.x / dir.x.abs()
    } else {
        f32::INFINITY
    };
    let along_y = if dir.y.abs() > f32::EPSILON {
        half_extents.y / dir.y.abs()
    } else {
        f32::INFINITY
    };
    along_x.min(along_y)
}

/// True when a ball centered at `center` lies within the touchlines and
/// strictly between the two goal lines
fn in_play(center: Vec2, ball_size: f32, tuning: &Tuning) -> bool {
    let min = center - Vec2::splat(ball_size / 2.0);
    min.x > tuning.goal_line_inset
        && min.x + ball_size < tuning.field_width - tuning.goal_line_inset
        && min.y >= 0.0
        && min.y + ball_size <= tuning.field_height
}

/// Pick a push-out center the field accepts
///
/// A player standing on a touchline or goal line can send the ball out of
/// play along the contact direction. Then the ball exits through a side of
/// the player box instead, trying the nearer horizontal side first.
fn keep_in_play(
    pushed: Vec2,
    player_center: Vec2,
    half_extents: Vec2,
    ball_size: f32,
    tuning: &Tuning,
) -> Vec2 {
    if in_play(pushed, ball_size, tuning) {
        return pushed;
    }

    let eps = tuning.collision_epsilon;
    let half_ball = ball_size / 2.0;
    let y_in_field = pushed
        .y
        .max(half_ball)
        .min(tuning.field_height - half_ball);
    let x_in_play = pushed
        .x
        .max(tuning.goal_line_inset + half_ball + eps)
        .min(tuning.field_width - tuning.goal_line_inset - half_ball - eps);
    let side = sign_or_positive(pushed.x - player_center.x);
    let vertical = sign_or_positive(pushed.y - player_center.y);
    let exit_x = half_extents.x + eps;
    let exit_y = half_extents.y + eps;

    [
        Vec2::new(player_center.x + side * exit_x, y_in_field),
        Vec2::new(player_center.x - side * exit_x, y_in_field),
        Vec2::new(x_in_play, player_center.y + vertical * exit_y),
        Vec2::new(x_in_play, player_center.y - vertical * exit_y),
    ]
    .into_iter()
    .find(|&center| in_play(center, ball_size, tuning))
    .unwrap_or(pushed)
}

/// Deflect the ball off a player's box based on where it struck
///
/// Hits near the top of the box send the ball upward, near the bottom
/// downward, up to `max_deflection_deg` either way.
pub fn reflect_ball_off_player(ball: &mut Ball, player: &Rect, tuning: &Tuning) {
    let relative_y = (ball.center().y - player.pos.y) / player.size.y;
    let hit_pos = ((relative_y - 0.5) * 2.0).clamp(-1.0, 1.0);

    ball.vel.x = -ball.vel.x;
    let speed = ball.speed();
    let angle = hit_pos * tuning.max_deflection_deg.to_radians();
    let dir = if ball.vel.x > 0.0 { 1.0 } else { -1.0 };

    ball.vel = Vec2::new(angle.cos() * speed * dir, angle.sin() * speed) * tuning.deflection_boost;
}

/// Resolve the first player (in roster order) the ball overlaps
///
/// Only one contact is resolved per tick. Returns the roster index of the
/// player that was hit.
pub fn ball_player_collision(ball: &mut Ball, players: &[Player], tuning: &Tuning) -> Option<usize> {
    let ball_rect = ball.rect();
    let (index, player) = players
        .iter()
        .enumerate()
        .find(|(_, p)| ball_rect.intersects(&p.rect()))?;

    let player_rect = player.rect();
    let player_center = player_rect.center();
    let offset = ball.center() - player_center;
    let distance = offset.length();

    if distance > MIN_PUSH_DISTANCE {
        let dir = offset / distance;
        let min_dist = (ball.size + player_rect.size.x.max(player_rect.size.y)) / 2.0
            + tuning.collision_epsilon;
        let half_extents = (player_rect.size + Vec2::splat(ball.size)) / 2.0;
        let clear_dist = exit_distance(dir, half_extents) + tuning.collision_epsilon;
        let pushed = player_center + dir * min_dist.max(clear_dist);
        ball.set_center(keep_in_play(pushed, player_center, half_extents, ball.size, tuning));
    }

    reflect_ball_off_player(ball, &player_rect, tuning);
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ControlScheme, Team};
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32) -> Player {
        let tuning = Tuning::default();
        Player::new(Team::Blue, Vec2::new(x, y), ControlScheme::PRIMARY, &tuning)
    }

    fn ball_at(center: Vec2) -> Ball {
        let mut ball = Ball::new(Vec2::new(1300.0, 800.0), 20.0);
        ball.set_center(center);
        ball
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(a.intersects(&Rect::new(Vec2::splat(5.0), Vec2::splat(10.0))));
        // Touching edges only
        assert!(!a.intersects(&Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0))));
        // Separated on one axis only
        assert!(!a.intersects(&Rect::new(Vec2::new(5.0, 20.0), Vec2::splat(10.0))));
    }

    #[test]
    fn test_wall_collision_top_and_bottom() {
        let mut ball = ball_at(Vec2::new(400.0, 5.0));
        ball.vel = Vec2::new(100.0, -200.0);
        assert!(ball_wall_collision(&mut ball, 800.0));
        assert_eq!(ball.pos.y, 0.0);
        assert_eq!(ball.vel.y, 200.0);

        let mut ball = ball_at(Vec2::new(400.0, 795.0));
        ball.vel = Vec2::new(0.0, 150.0);
        assert!(ball_wall_collision(&mut ball, 800.0));
        assert_eq!(ball.pos.y, 780.0);
        assert_eq!(ball.vel.y, -150.0);

        let mut ball = ball_at(Vec2::new(400.0, 400.0));
        assert!(!ball_wall_collision(&mut ball, 800.0));
    }

    #[test]
    fn test_center_hit_reflects_straight_back() {
        let player = player_at(400.0, 200.0);
        let mut ball = ball_at(player.center() - Vec2::new(15.0, 0.0));
        ball.vel = Vec2::new(300.0, 0.0);

        let hit = ball_player_collision(&mut ball, std::slice::from_ref(&player), &Tuning::default());
        assert_eq!(hit, Some(0));
        assert!((ball.vel.x + 300.0 * 1.05).abs() < 1e-2);
        assert!(ball.vel.y.abs() < 1e-2);
        assert!(!ball.rect().intersects(&player.rect()));
    }

    #[test]
    fn test_edge_hit_deflects() {
        let player = player_at(400.0, 200.0);
        // Ball center near the bottom of the player box
        let mut ball = ball_at(Vec2::new(player.pos.x - 8.0, player.pos.y + 30.0));
        ball.vel = Vec2::new(200.0, 0.0);
        ball_player_collision(&mut ball, std::slice::from_ref(&player), &Tuning::default());
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y > 0.0);
        assert!((ball.speed() - 200.0 * 1.05).abs() < 0.1);
    }

    #[test]
    fn test_first_overlap_wins() {
        let players = vec![player_at(100.0, 100.0), player_at(105.0, 100.0)];
        let mut ball = ball_at(players[1].center());
        ball.pos.x += 1.0;
        let hit = ball_player_collision(&mut ball, &players, &Tuning::default());
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn test_coincident_centers_skip_push_out() {
        let player = player_at(400.0, 200.0);
        let mut ball = ball_at(player.center());
        ball.vel = Vec2::new(100.0, 0.0);
        let before = ball.pos;
        ball_player_collision(&mut ball, std::slice::from_ref(&player), &Tuning::default());
        assert_eq!(ball.pos, before);
        assert!(ball.vel.x.is_finite() && ball.vel.y.is_finite());
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_no_overlap_no_change() {
        let player = player_at(400.0, 200.0);
        let mut ball = ball_at(Vec2::new(400.0, 400.0));
        ball.vel = Vec2::new(10.0, 10.0);
        let before = ball.clone();
        assert_eq!(
            ball_player_collision(&mut ball, std::slice::from_ref(&player), &Tuning::default()),
            None
        );
        assert_eq!(ball, before);
    }

    #[test]
    fn test_touchline_push_out_exits_sideways() {
        let tuning = Tuning::default();
        let player = player_at(300.0, 0.0);
        // Contact from above would push the ball past the top touchline
        let mut ball = ball_at(player.center() + Vec2::new(1.6, -5.5));
        ball.pos.y = 0.0;
        ball.vel = Vec2::new(100.0, 200.0);

        assert_eq!(
            ball_player_collision(&mut ball, std::slice::from_ref(&player), &tuning),
            Some(0)
        );
        assert!(!ball.rect().intersects(&player.rect()));
        assert!(ball.pos.y >= 0.0);
        assert!(ball.pos.x >= player.rect().max().x);
    }

    #[test]
    fn test_goal_line_push_out_stays_on_field() {
        let tuning = Tuning::default();
        // Blue column straddles the left goal line
        let player = player_at(60.0, 200.0);
        let mut ball = ball_at(player.center() + Vec2::new(-3.0, -20.0));
        ball.vel = Vec2::new(-100.0, 300.0);

        ball_player_collision(&mut ball, std::slice::from_ref(&player), &tuning);
        assert!(!ball.rect().intersects(&player.rect()));
        assert!(ball.pos.x > tuning.goal_line_inset);
    }

    proptest! {
        #[test]
        fn prop_resolved_ball_clears_player(
            dx in -20.0f32..20.0,
            dy in -25.0f32..25.0,
            vx in -800.0f32..800.0,
            vy in -800.0f32..800.0,
        ) {
            prop_assume!(dx.hypot(dy) > 0.5);
            let player = player_at(300.0, 300.0);
            let mut ball = ball_at(player.center() + Vec2::new(dx, dy));
            ball.vel = Vec2::new(vx, vy);
            if ball_player_collision(&mut ball, std::slice::from_ref(&player), &Tuning::default()).is_some() {
                prop_assert!(!ball.rect().intersects(&player.rect()));
            }
        }
    }
}
