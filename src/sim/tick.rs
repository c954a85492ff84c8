//! Per-frame simulation tick
//!
//! Fixed pipeline: control events, kicks, player movement, ball physics,
//! wall and player collisions, goal lines, then the global speed cap.

use super::collision::{ball_player_collision, ball_wall_collision};
use super::input::{ControlEvent, TickInput};
use super::player::Team;
use super::roster;
use super::state::{MatchEvent, MatchState};

/// Advance the match by `dt` seconds of wall-clock time.
///
/// Control events are always applied. Physics is skipped when the match has
/// been quit or `dt` is not a positive, finite interval.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) -> Vec<MatchEvent> {
    let mut events = Vec::new();

    for event in &input.events {
        apply_event(state, *event, &mut events);
    }

    if !state.running || !(dt > 0.0 && dt.is_finite()) {
        return events;
    }

    state.time_ticks += 1;
    let field = state.field_size();
    let MatchState {
        tuning,
        ball,
        players,
        ..
    } = &mut *state;

    // Kicks read the held kick signal of each manually controlled player
    for player in players.iter().filter(|p| p.is_manual()) {
        if input.controls.get(player.scheme).kick {
            player.kick(ball, tuning);
        }
    }

    for player in players.iter_mut() {
        let controls = input.controls.get(player.scheme);
        player.update_manual(&controls, dt, field);
    }
    for player in players.iter_mut() {
        if player.ai {
            player.update_ai(ball, dt, field, tuning);
        } else if !player.active {
            player.idle();
        }
        player.update_presentation(dt, tuning.display_smooth);
    }

    ball.integrate(dt, tuning);
    ball_wall_collision(ball, field.y);
    ball_player_collision(ball, players, tuning);

    match resolve_goal_lines(state) {
        Some(LineContact::Goal(scorer)) => {
            state.score.record_goal(scorer);
            log::info!(
                "GOAL for {}! Blue {} - {} Red",
                scorer,
                state.score.blue,
                state.score.red
            );
            events.push(MatchEvent::Goal {
                scorer,
                score: state.score,
            });
        }
        Some(LineContact::Bounce) => {
            // Clamping to the line can put the ball inside a player standing on it
            ball_player_collision(&mut state.ball, &state.players, &state.tuning);
        }
        None => {}
    }

    let max_speed = state.tuning.max_ball_speed;
    state.ball.clamp_speed(max_speed);

    events
}

fn apply_event(state: &mut MatchState, event: ControlEvent, events: &mut Vec<MatchEvent>) {
    match event {
        ControlEvent::Quit => {
            if state.running {
                log::info!("Quit requested");
                state.running = false;
                events.push(MatchEvent::QuitRequested);
            }
        }
        ControlEvent::ToggleDebugOverlay => {
            state.show_debug = !state.show_debug;
            events.push(MatchEvent::DebugOverlay(state.show_debug));
        }
        ControlEvent::ToggleAi(index) => {
            roster::toggle_ai(&mut state.players, index);
        }
        ControlEvent::Cycle(team) => {
            roster::cycle(&mut state.players, team);
        }
        ControlEvent::DirectSelect(index) => {
            roster::direct_select(&mut state.players, index);
        }
        ControlEvent::SetAi(index, ai) => {
            roster::set_ai(&mut state.players, index, ai);
        }
    }
}

/// What happened at a goal line this tick
enum LineContact {
    Goal(Team),
    Bounce,
}

/// Handle the ball reaching either goal line.
///
/// Inside the goal mouth it is a goal: the ball is re-centered and kicked
/// off toward the conceding side's opponent half. Outside the mouth the
/// line acts as a wall.
fn resolve_goal_lines(state: &mut MatchState) -> Option<LineContact> {
    let field = state.field_size();
    let tuning = &state.tuning;
    let ball = &mut state.ball;

    let (band_top, band_bottom) = tuning.goal_band();
    let in_mouth = ball.pos.y + ball.size >= band_top && ball.pos.y <= band_bottom;
    let left_line = tuning.goal_line_inset;
    let right_line = field.x - tuning.goal_line_inset;

    if ball.pos.x <= left_line {
        if in_mouth {
            ball.reset(field, false, tuning, &mut state.rng);
            return Some(LineContact::Goal(Team::Red));
        }
        ball.pos.x = left_line;
        ball.vel.x = ball.vel.x.abs();
        Some(LineContact::Bounce)
    } else if ball.pos.x + ball.size >= right_line {
        if in_mouth {
            ball.reset(field, true, tuning, &mut state.rng);
            return Some(LineContact::Goal(Team::Blue));
        }
        ball.pos.x = right_line - ball.size;
        ball.vel.x = -ball.vel.x.abs();
        Some(LineContact::Bounce)
    } else {
        None
    }
}
