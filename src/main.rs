//! Dino Dash headless driver
//!
//! Plays unattended demo runs with the autopilot on a simulated 60 Hz clock
//! and reports the score of each run. Rendering and live input belong to a
//! host front end.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dino_dash::{Tuning, TuningError};
    use dino_dash::platform::{FixedRateClock, FrameClock};
    use dino_dash::sim::{Session, autopilot};

    const USAGE: &str = "usage: dino-dash [--seed N] [--runs N] [--frames N] [--tuning FILE] [--print-tuning]";

    /// Command-line options
    #[derive(Debug)]
    pub struct Options {
        seed: u64,
        runs: u32,
        frames: u64,
        tuning_path: Option<String>,
        print_tuning: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                seed: 1,
                runs: 3,
                // Ten minutes of play at 60 Hz
                frames: 60 * 60 * 10,
                tuning_path: None,
                print_tuning: false,
            }
        }
    }

    fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
        let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
        value
            .parse()
            .map_err(|_| format!("invalid value for {}: {}", flag, value))
    }

    pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => options.seed = parse_value(&arg, args.next())?,
                "--runs" => options.runs = parse_value(&arg, args.next())?,
                "--frames" => options.frames = parse_value(&arg, args.next())?,
                "--tuning" => options.tuning_path = Some(parse_value(&arg, args.next())?),
                "--print-tuning" => options.print_tuning = true,
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown argument: {}\n{}", other, USAGE)),
            }
        }
        Ok(options)
    }

    /// Play the requested runs; returns each run's displayed score
    pub fn play(options: &Options, tuning: Tuning) -> Result<Vec<u64>, TuningError> {
        let mut clock = FixedRateClock::default();
        let mut session = Session::new(tuning, options.seed)?;
        let mut scores = Vec::new();

        for _ in 0..options.runs {
            if !session.handle_start_input() {
                log::warn!("Session not idle, stopping");
                break;
            }

            let mut frames = 0;
            while session.wants_frame() && frames < options.frames {
                if autopilot::should_jump(&session) {
                    session.handle_jump_input();
                }
                session.frame(clock.now());
                frames += 1;

                for event in session.drain_events() {
                    log::debug!("{:.0} ms: {:?}", clock.peek(), event);
                }
            }

            scores.push(session.display_score());
            if session.wants_frame() {
                log::info!(
                    "Run {} still alive after {} frames, stopping",
                    session.runs_started(),
                    frames
                );
                break;
            }

            if log::log_enabled!(log::Level::Trace)
                && let Ok(json) = serde_json::to_string(&session.snapshot())
            {
                log::trace!("Final frame: {}", json);
            }

            // Sit out the lose cooldown before the next start
            if let Some(deadline) = session.cooldown_deadline() {
                clock.skip(deadline - clock.peek());
                session.poll_cooldown(clock.peek());
            }
        }

        Ok(scores)
    }

    /// Tuning from `--tuning`, or the built-in defaults
    fn resolve_tuning(path: Option<&str>) -> Result<Tuning, TuningError> {
        match path {
            Some(path) => Tuning::load(path),
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> i32 {
        match parse_args(std::env::args().skip(1)) {
            Ok(options) => run_with(&options),
            Err(message) => {
                eprintln!("{}", message);
                2
            }
        }
    }

    /// Exit code: 0 on success, 1 on a bad tuning file
    fn run_with(options: &Options) -> i32 {
        let tuning = match resolve_tuning(options.tuning_path.as_deref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("{}", e);
                return 1;
            }
        };

        if options.print_tuning {
            match tuning.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("{}", e);
                    return 1;
                }
            }
            return 0;
        }

        log::info!("Dino Dash (headless) seed {}, {} runs", options.seed, options.runs);
        let scores = match play(options, tuning) {
            Ok(scores) => scores,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("{}", e);
                return 1;
            }
        };
        for (i, score) in scores.iter().enumerate() {
            println!("run {:>3}: {}", i + 1, score);
        }
        if let Some(best) = scores.iter().max() {
            println!("best: {}", best);
        }
        0
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    std::process::exit(headless::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Session` directly through the library
}
