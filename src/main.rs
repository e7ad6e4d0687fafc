//! Gravity Flip entry point
//!
//! On the web the game is driven from JavaScript through
//! `gravity_flip::platform::web::WebGame`. Natively this binary runs
//! headless sessions on a fixed-rate clock, optionally with the autopilot at
//! the controls, and reports how each run went.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::Parser;

    use gravity_flip::highscores::{HighScoreStore, JsonFileStore, MemoryStore};
    use gravity_flip::platform::{Clock, ManualClock, SystemClock};
    use gravity_flip::sim::{Autopilot, Command, CrashCause, GameEvent, RunStatus};
    use gravity_flip::{Session, Tuning};

    #[derive(Debug, Parser)]
    #[command(name = "gravity-flip", about = "Headless Gravity Flip runner")]
    pub struct Args {
        /// RNG seed (random when omitted)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Number of runs to play
        #[arg(long, default_value_t = 3)]
        pub runs: u32,
        /// Give up on a run after this many simulated seconds
        #[arg(long, default_value_t = 120.0)]
        pub max_seconds: f32,
        /// Simulated frame rate
        #[arg(long, default_value_t = 60)]
        pub fps: u32,
        /// JSON tuning file
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Persist the high score to this JSON file
        #[arg(long)]
        pub high_score_file: Option<PathBuf>,
        /// Never flip (the run ends at the first pillar)
        #[arg(long)]
        pub manual: bool,
        /// Pace frames against the wall clock instead of simulating them
        #[arg(long)]
        pub realtime: bool,
    }

    /// How a single run ended
    struct RunReport {
        score: u64,
        seconds: f32,
        flips: u32,
        pillars_cleared: usize,
        cause: Option<CrashCause>,
    }

    fn play_run<S: HighScoreStore, C: Clock>(
        session: &mut Session<S>,
        clock: &mut C,
        mut pilot: Option<&mut Autopilot>,
        max_seconds: f32,
        pause: Option<Duration>,
    ) -> RunReport {
        if let Some(p) = pilot.as_deref_mut() {
            p.reset();
        }
        session.push(Command::Reset);

        let mut report = RunReport {
            score: 0,
            seconds: 0.0,
            flips: 0,
            pillars_cleared: 0,
            cause: None,
        };
        let mut dt = 0.0;

        loop {
            if let Some(p) = pilot.as_deref_mut() {
                if p.decide(session.state(), dt) {
                    session.push(Command::Flip);
                }
            }
            dt = session.frame(clock.now_ms());

            for event in session.drain_events() {
                match event {
                    GameEvent::Flipped { .. } => report.flips += 1,
                    GameEvent::PillarsCleared { count } => report.pillars_cleared += count,
                    GameEvent::Crashed { cause, .. } => report.cause = Some(cause),
                    _ => {}
                }
            }

            let state = session.state();
            report.seconds = state.run_time;
            report.score = state.display_score();
            if state.status == RunStatus::Crashed || state.run_time >= max_seconds {
                return report;
            }
            if let Some(pause) = pause {
                std::thread::sleep(pause);
            }
        }
    }

    fn run_all<S: HighScoreStore>(args: &Args, tuning: Tuning, seed: u64, store: S) {
        if args.realtime {
            let pause = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
            run_with_clock(args, tuning, seed, store, SystemClock::new(), Some(pause));
        } else {
            let clock = ManualClock::at_fps(args.fps);
            run_with_clock(args, tuning, seed, store, clock, None);
        }
    }

    fn run_with_clock<S: HighScoreStore, C: Clock>(
        args: &Args,
        tuning: Tuning,
        seed: u64,
        store: S,
        mut clock: C,
        pause: Option<Duration>,
    ) {
        let mut session = Session::new(seed, tuning, store);
        let mut pilot = (!args.manual).then(Autopilot::default);

        println!(
            "Seed {} | best so far {} | {} run(s)",
            seed,
            session.state().high_score,
            args.runs
        );

        for run in 1..=args.runs {
            let report = play_run(
                &mut session,
                &mut clock,
                pilot.as_mut(),
                args.max_seconds,
                pause,
            );
            let ending = match report.cause {
                Some(CrashCause::Pillar) => "hit a pillar",
                Some(CrashCause::OutOfBounds) => "left the world",
                None => "time limit",
            };
            println!(
                "Run {:>3}: score {:>5} in {:>6.1}s, {:>4} flips, {:>4} pillars cleared ({})",
                run, report.score, report.seconds, report.flips, report.pillars_cleared, ending
            );
        }

        println!("High score: {}", session.state().high_score);
    }

    pub fn main() {
        env_logger::init();
        let args = Args::parse();
        log::info!("Gravity Flip (headless) starting...");

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path),
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(rand::random);

        match &args.high_score_file {
            Some(path) => run_all(&args, tuning, seed, JsonFileStore::new(path)),
            None => run_all(&args, tuning, seed, MemoryStore::new()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `WebGame`, this is just to satisfy the compiler
}
