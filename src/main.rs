//! Tiny Football headless runner
//!
//! Plays an attract-mode match against the simulation core: a scripted pad
//! drives the blue side, the red side is AI-controlled. Goals are logged and
//! the final snapshot can be dumped as JSON.
//!
//! Usage: tiny-football [--seconds N] [--seed N] [--tuning FILE] [--realtime] [--snapshot]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;
    use std::time::{Duration, Instant};

    use glam::Vec2;
    use tiny_football::Tuning;
    use tiny_football::consts::{MAX_FRAME_DT, REFERENCE_FPS};
    use tiny_football::sim::{
        ControlEvent, Controls, InputSnapshot, MatchEvent, MatchSnapshot, MatchState, Team,
        TickInput, tick,
    };

    /// How close the pad tries to get behind the ball before kicking
    const APPROACH_OFFSET: f32 = 25.0;
    const PAD_DEAD_ZONE: f32 = 4.0;
    /// Seconds between the pad's player-switch checks
    const SWITCH_INTERVAL: f32 = 2.0;

    struct Options {
        seconds: f32,
        seed: u64,
        tuning_path: Option<String>,
        realtime: bool,
        dump_snapshot: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                seconds: 60.0,
                seed: 0x5eed,
                tuning_path: None,
                realtime: false,
                dump_snapshot: false,
            }
        }
    }

    fn parse_args() -> Result<Options, String> {
        let mut opts = Options::default();
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seconds" => {
                    let value = args.next().ok_or("--seconds needs a value")?;
                    opts.seconds = value.parse().map_err(|e| format!("bad --seconds: {e}"))?;
                }
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a value")?;
                    opts.seed = value.parse().map_err(|e| format!("bad --seed: {e}"))?;
                }
                "--tuning" => {
                    opts.tuning_path = Some(args.next().ok_or("--tuning needs a path")?);
                }
                "--realtime" => opts.realtime = true,
                "--snapshot" => opts.dump_snapshot = true,
                other => return Err(format!("unknown argument `{other}`")),
            }
        }
        Ok(opts)
    }

    fn load_tuning(path: Option<&str>) -> Result<Tuning, String> {
        let tuning = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
                let tuning = Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))?;
                log::info!("Loaded tuning from {path}");
                tuning
            }
            None => Tuning::default(),
        };
        tuning.validate().map_err(|e| e.to_string())?;
        Ok(tuning)
    }

    /// Steer the team's active player behind the ball and kick toward the
    /// opponent's goal
    fn pad_controls(snap: &MatchSnapshot, team: Team) -> Controls {
        let Some(player) = snap.players.iter().find(|p| p.team == team && p.active) else {
            return Controls::default();
        };

        let attack_dir = match team {
            Team::Blue => 1.0,
            Team::Red => -1.0,
        };
        let ball_center = snap.ball.pos + Vec2::splat(snap.ball.size / 2.0);
        let player_center = player.pos + player.size / 2.0;
        let target = ball_center - Vec2::new(APPROACH_OFFSET * attack_dir, 0.0);
        let to_target = target - player_center;

        Controls {
            left: to_target.x < -PAD_DEAD_ZONE,
            right: to_target.x > PAD_DEAD_ZONE,
            up: to_target.y < -PAD_DEAD_ZONE,
            down: to_target.y > PAD_DEAD_ZONE,
            kick: player.can_kick && (ball_center.x - player_center.x) * attack_dir > 0.0,
        }
    }

    /// Switch to the team's player nearest the ball if it isn't active already
    fn switch_event(snap: &MatchSnapshot, team: Team) -> Option<ControlEvent> {
        let ball_center = snap.ball.pos + Vec2::splat(snap.ball.size / 2.0);
        let nearest = snap
            .players
            .iter()
            .filter(|p| p.team == team)
            .min_by(|a, b| {
                let da = (a.pos + a.size / 2.0).distance(ball_center);
                let db = (b.pos + b.size / 2.0).distance(ball_center);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })?;
        (!nearest.active).then_some(ControlEvent::Cycle(team))
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let opts = match parse_args() {
            Ok(opts) => opts,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };
        let tuning = match load_tuning(opts.tuning_path.as_deref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Invalid tuning: {e}");
                return ExitCode::FAILURE;
            }
        };

        let mut state = MatchState::with_tuning(opts.seed, tuning);
        let blue_scheme = state
            .players
            .iter()
            .find(|p| p.team == Team::Blue && p.active)
            .map(|p| p.scheme);
        // Red plays itself
        let mut pending: Vec<ControlEvent> = state
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.team == Team::Red)
            .map(|(i, _)| ControlEvent::SetAi(i, true))
            .collect();

        log::info!("Tiny Football (headless) running for {}s", opts.seconds);

        let fixed_dt = 1.0 / REFERENCE_FPS;
        let mut elapsed = 0.0;
        let mut since_switch = 0.0;
        let mut last_frame = Instant::now();

        while state.running && elapsed < opts.seconds {
            let dt = if opts.realtime {
                std::thread::sleep(Duration::from_secs_f32(fixed_dt));
                let now = Instant::now();
                let measured = (now - last_frame).as_secs_f32();
                last_frame = now;
                measured.min(MAX_FRAME_DT)
            } else {
                fixed_dt
            };

            let snap = state.snapshot();
            since_switch += dt;
            if since_switch >= SWITCH_INTERVAL {
                since_switch = 0.0;
                pending.extend(switch_event(&snap, Team::Blue));
            }

            let mut controls = InputSnapshot::new();
            if let Some(scheme) = blue_scheme {
                controls.set(scheme, pad_controls(&snap, Team::Blue));
            }
            let input = TickInput {
                controls,
                events: std::mem::take(&mut pending),
            };

            for event in tick(&mut state, &input, dt) {
                if let MatchEvent::Goal { scorer, score } = event {
                    let conceding = scorer.opponent();
                    log::info!(
                        "[{:6.2}s] {} scores, {} {} - {} {}",
                        elapsed,
                        scorer,
                        scorer,
                        score.get(scorer),
                        score.get(conceding),
                        conceding
                    );
                }
            }
            elapsed += dt;
        }

        log::info!(
            "Full time after {} ticks: Blue {} - {} Red",
            state.time_ticks,
            state.score.blue,
            state.score.red
        );

        if opts.dump_snapshot {
            match serde_json::to_string_pretty(&state.snapshot()) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    log::error!("Could not serialize snapshot: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host page; there is no standalone web runner
}
