//! Round controller
//!
//! Owns the round state, the spawn timer and the ids of everything it placed
//! in the scene. The host calls [`RoundController::handle_tap`] on input,
//! [`RoundController::handle_contact`] for every contact it reports and
//! [`RoundController::update`] once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::category::{CollisionFilter, ContactEvent, ContactKind};
use super::region::{Label, LabelKind, MotionScript, RegionId, RegionKind, RegionSpec};
use super::scene::Scene;
use super::spawner::{SpawnLayout, SpawnTimer, draw_offset};
use super::state::{GameEvent, RoundPhase, RoundState, SpawnedPair};
use crate::Settings;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct RoundController {
    settings: Settings,
    rng: Pcg32,
    state: RoundState,
    phase: RoundPhase,
    timer: SpawnTimer,
    player: Option<RegionId>,
    /// Pairs spawned this round that the host has not removed yet
    obstacles: Vec<SpawnedPair>,
    /// Newest gap that has scored this round
    last_scored_gap: Option<RegionId>,
    /// Rounds started so far (1-based once set up)
    round: u32,
    events: Vec<GameEvent>,
}

impl RoundController {
    /// Create a controller; call [`setup`](Self::setup) before the first frame
    pub fn new(settings: Settings, seed: u64) -> Self {
        let timer = SpawnTimer::new(settings.obstacles.spawn_period);
        Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            state: RoundState::default(),
            phase: RoundPhase::Idle,
            timer,
            player: None,
            obstacles: Vec::new(),
            last_scored_gap: None,
            round: 0,
            events: Vec::new(),
        }
    }

    /// Populate a fresh scene: backdrop, player, ground and score label
    pub fn setup<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        let view = self.settings.viewport;

        let backdrop = &self.settings.backdrop;
        let tile_size = Vec2::new(backdrop.tile_width, view.height());
        let tile_script = MotionScript::LoopShift {
            delta: Vec2::new(-backdrop.tile_width, 0.0),
            duration: backdrop.loop_secs,
        };
        for i in 0..backdrop.tiles {
            let position = Vec2::new(backdrop.tile_width * i as f32, view.mid_y());
            let tile = scene.add_region(
                RegionSpec::rect(RegionKind::Backdrop, position, tile_size).with_z(-2.0),
            );
            scene.run_script(tile, tile_script);
        }

        let radius = self.settings.player.sprite_size.y / 2.0;
        let player = scene.add_region(RegionSpec::circle(RegionKind::Player, view.center, radius));
        scene.set_filter(player, CollisionFilter::PLAYER);
        self.player = Some(player);

        let ground = scene.add_region(RegionSpec::rect(
            RegionKind::Ground,
            Vec2::new(view.mid_x(), view.bottom()),
            Vec2::new(view.width(), 1.0),
        ));
        scene.set_filter(ground, CollisionFilter::OBSTACLE);

        scene.set_label(Label {
            kind: LabelKind::Score,
            text: "0".to_string(),
            position: Vec2::new(view.mid_x(), view.top() - SCORE_TOP_MARGIN),
            font_name: FONT_NAME.to_string(),
            font_size: SCORE_FONT_SIZE,
        });

        self.phase = RoundPhase::Idle;
        self.round += 1;
        log::info!("Round {} ready", self.round);
    }

    /// Player input. Activates, flaps or restarts depending on the phase.
    pub fn handle_tap<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        match self.phase {
            RoundPhase::Idle => {
                if let Some(player) = self.player {
                    scene.set_dynamic(player, true);
                }
                self.flap(scene);
                self.timer.start();
                self.phase = RoundPhase::Active;
                self.events.push(GameEvent::Activated);
                log::info!("Round {} started", self.round);
            }
            RoundPhase::Active => {
                self.flap(scene);
                self.events.push(GameEvent::Flapped);
            }
            RoundPhase::Over => self.restart(scene),
        }
    }

    /// Zero the player's velocity, then kick it upward
    fn flap<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(player) = self.player {
            scene.set_velocity(player, Vec2::ZERO);
            scene.apply_impulse(player, Vec2::new(0.0, self.settings.player.flap_impulse));
        }
    }

    /// Route one reported contact
    pub fn handle_contact<S: Scene + ?Sized>(&mut self, scene: &mut S, contact: ContactEvent) {
        if self.state.is_over {
            return;
        }

        match ContactKind::classify(&contact) {
            Some(ContactKind::Score { gap }) => self.score_gap(scene, gap),
            Some(ContactKind::Crash) => self.game_over(scene),
            None => log::debug!("Ignoring contact outside the allowed table: {contact:?}"),
        }
    }

    fn score_gap<S: Scene + ?Sized>(&mut self, scene: &mut S, gap: RegionId) {
        if self.settings.scoring.dedupe_gap_contacts
            && self.last_scored_gap.is_some_and(|last| gap <= last)
        {
            log::debug!("Gap {:?} already scored", gap);
            self.events.push(GameEvent::DuplicateGap { gap });
            return;
        }

        if !self.state.add_point() {
            return;
        }
        self.last_scored_gap = Some(self.last_scored_gap.map_or(gap, |last| last.max(gap)));
        self.update_score_label(scene);
        self.events.push(GameEvent::Scored {
            score: self.state.score,
        });
        log::debug!("Score {}", self.state.score);
    }

    fn game_over<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if !self.state.finish() {
            return;
        }
        scene.set_paused(true);
        self.timer.cancel();
        self.phase = RoundPhase::Over;

        scene.set_label(Label {
            kind: LabelKind::GameOver,
            text: GAME_OVER_TEXT.to_string(),
            position: self.settings.viewport.center,
            font_name: FONT_NAME.to_string(),
            font_size: GAME_OVER_FONT_SIZE,
        });
        self.update_score_label(scene);

        self.events.push(GameEvent::GameOver {
            score: self.state.score,
        });
        log::info!("Round {} over with score {}", self.round, self.state.score);
    }

    fn update_score_label<S: Scene + ?Sized>(&self, scene: &mut S) {
        let view = self.settings.viewport;
        scene.set_label(Label {
            kind: LabelKind::Score,
            text: self.state.score.to_string(),
            position: Vec2::new(view.mid_x(), view.top() - SCORE_TOP_MARGIN),
            font_name: FONT_NAME.to_string(),
            font_size: SCORE_FONT_SIZE,
        });
    }

    /// Clear everything and return to Idle with a zero score
    fn restart<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.state.reset();
        self.timer.cancel();
        self.obstacles.clear();
        self.last_scored_gap = None;
        self.player = None;

        scene.set_paused(false);
        scene.clear();
        self.setup(scene);
        self.events.push(GameEvent::Restarted);
    }

    /// Advance the spawn timer, spawning once per elapsed period
    pub fn update<S: Scene + ?Sized>(&mut self, scene: &mut S, dt: f32) {
        self.obstacles.retain(|pair| scene.position(pair.gap).is_some());

        for _ in 0..self.timer.advance(dt) {
            self.spawn(scene);
        }
    }

    /// Spawn one obstacle pair at a random offset
    pub fn spawn<S: Scene + ?Sized>(&mut self, scene: &mut S) -> SpawnedPair {
        let offset = draw_offset(&mut self.rng, self.settings.viewport.height());
        let pair = SpawnLayout::new(&self.settings, offset).spawn(scene);
        self.obstacles.push(pair);
        self.events.push(GameEvent::Spawned { pair, offset });
        log::debug!("Spawned {:?} at offset {offset}", pair);
        pair
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn player(&self) -> Option<RegionId> {
        self.player
    }

    /// Obstacle pairs still in the scene, oldest first
    pub fn active_obstacles(&self) -> &[SpawnedPair] {
        &self.obstacles
    }

    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.timer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessScene;
    use crate::sim::category::{Category, ContactBody};

    fn setup() -> (RoundController, HeadlessScene) {
        let settings = Settings::default();
        let mut scene = HeadlessScene::new(&settings);
        let mut round = RoundController::new(settings, 7);
        round.setup(&mut scene);
        (round, scene)
    }

    fn contact(player: RegionId, other: RegionId, category: Category) -> ContactEvent {
        ContactEvent::new(
            ContactBody {
                region: player,
                category: Category::Player,
            },
            ContactBody {
                region: other,
                category,
            },
        )
    }

    #[test]
    fn setup_leaves_player_inert_and_no_obstacles() {
        let (round, scene) = setup();
        let player = round.player().unwrap();
        assert_eq!(round.phase(), RoundPhase::Idle);
        assert!(!scene.region(player).unwrap().dynamic);
        assert_eq!(scene.count_kind(RegionKind::UpperObstacle), 0);
        assert_eq!(scene.count_kind(RegionKind::Ground), 1);
        assert_eq!(scene.count_kind(RegionKind::Backdrop), 3);
        assert_eq!(scene.label(LabelKind::Score).unwrap().text, "0");
        assert!(!round.spawn_timer().is_running());
    }

    #[test]
    fn first_tap_activates_once() {
        let (mut round, mut scene) = setup();
        let player = round.player().unwrap();

        round.handle_tap(&mut scene);
        assert_eq!(round.phase(), RoundPhase::Active);
        assert!(scene.region(player).unwrap().dynamic);
        assert!(round.spawn_timer().is_running());

        round.handle_tap(&mut scene);
        let events = round.drain_events();
        assert_eq!(events, vec![GameEvent::Activated, GameEvent::Flapped]);
    }

    #[test]
    fn tap_discards_previous_velocity() {
        let (mut round, mut scene) = setup();
        let player = round.player().unwrap();
        round.handle_tap(&mut scene);

        scene.set_velocity(player, Vec2::new(12.0, -300.0));
        round.handle_tap(&mut scene);

        let mass = round.settings().player.mass;
        let expected = Vec2::new(0.0, FLAP_IMPULSE / mass);
        let velocity = scene.region(player).unwrap().velocity;
        assert!((velocity - expected).length() < 1e-3, "{velocity:?}");
    }

    #[test]
    fn gap_contact_scores_without_ending() {
        let (mut round, mut scene) = setup();
        round.handle_tap(&mut scene);
        let player = round.player().unwrap();
        let pair = round.spawn(&mut scene);

        round.handle_contact(&mut scene, contact(player, pair.gap, Category::Gap));
        assert_eq!(round.score(), 1);
        assert!(!round.is_over());
        assert_eq!(round.phase(), RoundPhase::Active);
        assert_eq!(scene.label(LabelKind::Score).unwrap().text, "1");
    }

    #[test]
    fn obstacle_contact_ends_round_and_freezes() {
        let (mut round, mut scene) = setup();
        round.handle_tap(&mut scene);
        let player = round.player().unwrap();
        let pair = round.spawn(&mut scene);
        round.handle_contact(&mut scene, contact(player, pair.gap, Category::Gap));

        round.handle_contact(&mut scene, contact(player, pair.upper, Category::Obstacle));
        assert!(round.is_over());
        assert_eq!(round.phase(), RoundPhase::Over);
        assert!(scene.is_paused());
        assert!(!round.spawn_timer().is_running());
        assert_eq!(scene.label(LabelKind::GameOver).unwrap().text, GAME_OVER_TEXT);

        let before = round.state();
        round.handle_contact(&mut scene, contact(player, pair.lower, Category::Obstacle));
        round.handle_contact(&mut scene, contact(player, pair.gap, Category::Gap));
        assert_eq!(round.state(), before);
        assert_eq!(round.score(), 1);
    }

    #[test]
    fn tap_after_game_over_resets_to_idle() {
        let (mut round, mut scene) = setup();
        round.handle_tap(&mut scene);
        let player = round.player().unwrap();
        let pair = round.spawn(&mut scene);
        round.handle_contact(&mut scene, contact(player, pair.gap, Category::Gap));
        round.handle_contact(&mut scene, contact(player, pair.lower, Category::Obstacle));

        round.handle_tap(&mut scene);
        assert_eq!(round.score(), 0);
        assert!(!round.is_over());
        assert_eq!(round.phase(), RoundPhase::Idle);
        assert!(!scene.is_paused());
        assert!(scene.label(LabelKind::GameOver).is_none());
        assert_eq!(scene.label(LabelKind::Score).unwrap().text, "0");
        assert_eq!(scene.count_kind(RegionKind::Gap), 0);
        assert!(round.active_obstacles().is_empty());
        assert_eq!(round.round(), 2);

        let new_player = round.player().unwrap();
        assert_ne!(new_player, player);
        assert!(!scene.region(new_player).unwrap().dynamic);
    }

    #[test]
    fn first_tap_after_restart_activates_again() {
        let (mut round, mut scene) = setup();
        round.handle_tap(&mut scene);
        let player = round.player().unwrap();
        let pair = round.spawn(&mut scene);
        round.handle_contact(&mut scene, contact(player, pair.upper, Category::Obstacle));
        round.handle_tap(&mut scene);
        round.drain_events();

        round.handle_tap(&mut scene);
        let player = round.player().unwrap();
        assert_eq!(round.phase(), RoundPhase::Active);
        assert!(scene.region(player).unwrap().dynamic);
        assert!(round.spawn_timer().is_running());

        round.handle_tap(&mut scene);
        let activations = round
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::Activated)
            .count();
        assert_eq!(activations, 1);
    }

    #[test]
    fn backdrop_tiles_start_at_multiples_of_tile_width() {
        let mut settings = Settings::default();
        settings.viewport.center = Vec2::new(200.0, 0.0);
        let tile_width = settings.backdrop.tile_width;
        let mut scene = HeadlessScene::new(&settings);
        let mut round = RoundController::new(settings, 7);
        round.setup(&mut scene);

        let xs: Vec<f32> = scene
            .regions()
            .filter(|b| b.kind == RegionKind::Backdrop)
            .map(|b| b.position.x)
            .collect();
        assert_eq!(xs, vec![0.0, tile_width, 2.0 * tile_width]);
    }

    #[test]
    fn repeated_gap_contact_scores_once() {
        let (mut round, mut scene) = setup();
        round.handle_tap(&mut scene);
        let player = round.player().unwrap();
        let first = round.spawn(&mut scene);
        let second = round.spawn(&mut scene);

        let event = contact(player, first.gap, Category::Gap);
        round.handle_contact(&mut scene, event);
        round.handle_contact(&mut scene, event.swapped());
        assert_eq!(round.score(), 1);

        round.handle_contact(&mut scene, contact(player, second.gap, Category::Gap));
        assert_eq!(round.score(), 2);
        assert!(
            round
                .drain_events()
                .contains(&GameEvent::DuplicateGap { gap: first.gap })
        );
    }

    #[test]
    fn legacy_scoring_counts_every_gap_contact() {
        let mut settings = Settings::default();
        settings.scoring.dedupe_gap_contacts = false;
        let mut scene = HeadlessScene::new(&settings);
        let mut round = RoundController::new(settings, 7);
        round.setup(&mut scene);
        round.handle_tap(&mut scene);
        let player = round.player().unwrap();
        let pair = round.spawn(&mut scene);

        let event = contact(player, pair.gap, Category::Gap);
        round.handle_contact(&mut scene, event);
        round.handle_contact(&mut scene, event.swapped());
        assert_eq!(round.score(), 2);
    }

    #[test]
    fn timer_spawns_one_pair_per_period() {
        let (mut round, mut scene) = setup();
        round.update(&mut scene, 10.0);
        assert!(round.active_obstacles().is_empty(), "idle never spawns");

        round.handle_tap(&mut scene);
        round.update(&mut scene, 2.5);
        assert!(round.active_obstacles().is_empty());
        round.update(&mut scene, 0.5);
        assert_eq!(round.active_obstacles().len(), 1);
        assert_eq!(scene.count_kind(RegionKind::UpperObstacle), 1);
        assert_eq!(scene.count_kind(RegionKind::LowerObstacle), 1);
        assert_eq!(scene.count_kind(RegionKind::Gap), 1);
    }
}
