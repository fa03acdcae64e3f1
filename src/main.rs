//! Bunny Runner entry point
//!
//! Runs the game headless with the autopilot tapping, restarting after every
//! crash, and prints a JSON summary of the session.
//!
//! Usage: `bunny-runner [tuning.json|-] [seconds] [scene.json]`

use anyhow::Context;

use bunny_runner::host::{Game, autopilot};
use bunny_runner::sim::ButtonState;
use bunny_runner::{SceneDescription, Tuning};

/// Frames to linger on the game-over screen before tapping restart
const RESTART_DELAY_FRAMES: u32 = 30;
/// Longest session the binary will simulate (one day)
const MAX_SECONDS: f64 = 86_400.0;

/// Session length in seconds: finite, not negative, at most a day
fn parse_duration(arg: &str) -> anyhow::Result<f64> {
    let seconds: f64 = arg
        .parse()
        .with_context(|| format!("invalid duration `{arg}`"))?;
    anyhow::ensure!(
        seconds.is_finite() && (0.0..=MAX_SECONDS).contains(&seconds),
        "duration `{arg}` must be between 0 and {MAX_SECONDS} seconds"
    );
    Ok(seconds)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Bunny Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next().as_deref() {
        None | Some("-") => Tuning::default(),
        Some(path) => {
            Tuning::load(path).with_context(|| format!("loading tuning from {path}"))?
        }
    };
    let seconds = match args.next() {
        Some(arg) => parse_duration(&arg)?,
        None => 60.0,
    };
    let scene = match args.next() {
        Some(path) => {
            SceneDescription::load(&path).with_context(|| format!("loading scene from {path}"))?
        }
        None => SceneDescription::default(),
    };

    let registry = scene.resolve()?;
    let seed: u64 = rand::random();
    log::info!("Session seed: {}", seed);

    let mut game = Game::new(registry, tuning, seed)?;
    let dt = f64::from(game.tuning().fixed_dt);
    let frames = (seconds / dt).ceil() as u64;

    let mut time = 0.0;
    let mut waiting = 0;
    for _ in 0..frames {
        if game.hud.restart_button == ButtonState::Active {
            waiting += 1;
            if waiting >= RESTART_DELAY_FRAMES {
                game.press_restart();
                waiting = 0;
            }
        } else if autopilot(&game.sim) {
            game.touch();
        }
        game.frame(time);
        time += dt;
    }

    let summary = game.summary();
    log::info!(
        "Played {} runs, best score {}",
        summary.scores.len(),
        summary.best_score
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_accepts_plain_seconds() {
        assert_eq!(parse_duration("90").unwrap(), 90.0);
        assert_eq!(parse_duration("0").unwrap(), 0.0);
        assert_eq!(parse_duration("2.5").unwrap(), 2.5);
    }

    #[test]
    fn test_parse_duration_rejects_unbounded_values() {
        for arg in ["inf", "-inf", "NaN", "-1", "1e300", "soon"] {
            assert!(parse_duration(arg).is_err(), "accepted `{arg}`");
        }
    }
}
