//! Flappy Clone entry point
//!
//! Plays a handful of rounds on the headless host with the autopilot and
//! logs how they went. Usage: `flappy-clone [settings.json] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use flappy_clone::autopilot;
    use flappy_clone::consts::*;
    use flappy_clone::platform::HeadlessScene;
    use flappy_clone::sim::{GameEvent, RoundController, TickInput, tick};
    use flappy_clone::{HighScores, Settings};

    /// Rounds played per run
    const ROUNDS: u32 = 5;
    /// Simulated seconds before a round is abandoned
    const ROUND_TIME_LIMIT: f32 = 120.0;
    /// Frame time fed to the accumulator (a 30 Hz host)
    const FRAME_DT: f32 = 1.0 / 30.0;

    struct Game {
        round: RoundController,
        scene: HeadlessScene,
        high_scores: HighScores,
        accumulator: f32,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let mut scene = HeadlessScene::new(&settings);
            let high_scores = HighScores::with_capacity(settings.scoring.high_score_slots);
            let mut round = RoundController::new(settings, seed);
            round.setup(&mut scene);
            Self {
                round,
                scene,
                high_scores,
                accumulator: 0.0,
            }
        }

        /// Run fixed simulation steps for one host frame
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    tap: autopilot::should_tap(&self.round, &self.scene),
                };
                tick(&mut self.round, &mut self.scene, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in self.round.drain_events() {
                    self.on_event(event);
                }
            }
        }

        fn on_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::GameOver { score } => {
                    let at = self.scene.time();
                    match self.high_scores.add_score(score, self.round.round(), at) {
                        Some(rank) => log::info!("Score {score} ranks #{rank} this session"),
                        None => log::info!("Score {score} did not place"),
                    }
                }
                GameEvent::DuplicateGap { gap } => {
                    log::debug!("Ignored repeat contact with gap {:?}", gap)
                }
                _ => {}
            }
        }

        /// Play until the round ends or the time limit passes
        fn play_round(&mut self) {
            let mut elapsed = 0.0;
            while !self.round.is_over() && elapsed < ROUND_TIME_LIMIT {
                self.update(FRAME_DT);
                elapsed += FRAME_DT;
            }
            if !self.round.is_over() {
                log::info!(
                    "Round {} still alive after {ROUND_TIME_LIMIT}s with score {}",
                    self.round.round(),
                    self.round.score()
                );
            }
        }

        fn restart(&mut self) {
            self.round.handle_tap(&mut self.scene);
            for event in self.round.drain_events() {
                self.on_event(event);
            }
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Flappy Clone (headless) starting...");

        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0)
            });
        log::info!("Game initialized with seed: {}", seed);

        let mut game = Game::new(settings, seed);
        for i in 0..ROUNDS {
            game.play_round();
            if i + 1 < ROUNDS {
                if game.round.is_over() {
                    game.restart();
                } else {
                    break;
                }
            }
        }

        if game.high_scores.is_empty() {
            log::info!("No scoring rounds this session");
        }
        for (i, entry) in game.high_scores.entries.iter().enumerate() {
            log::info!(
                "#{:<2} score {:>3}  round {}  at {:.1}s",
                i + 1,
                entry.score,
                entry.round,
                entry.at_secs
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
