//! The alien: perception, priority overrides and per-state behavior
//!
//! Each tick runs, in order: clocks, perception, heading and gaze, the
//! priority override (kill, rush, hiss), exactly one state handler and
//! footstep sounds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use stalker_map::GameMap;
use stalker_math::{bearing, Vec2};
use stalker_nav::{Path, DEFAULT_SAMPLE_ATTEMPTS};

use crate::config::AlienConfig;
use crate::error::Result;
use crate::follow::{PathFollower, PathStep};
use crate::interfaces::{NullSink, PlayerHandle, SoundEffect, SoundSink};
use crate::motion::{AngularTracker, Body};
use crate::state::{AlienEvent, AlienState};
use crate::timers::AlienTimers;
use crate::visibility::SightCone;

/// Footsteps only sound when an axis moved more than this in one tick
const STEP_THRESHOLD: f32 = 0.5;

/// Orders the director can give
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AlienCommand {
    /// Retreat into the vent network
    EnterVents,
    /// Leave the vent network
    ExitVents,
    /// Patrol near this point
    PatrolHint(Vec2),
}

/// Read-only view of the alien for renderers and the director
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlienSnapshot {
    pub position: Vec2,
    pub size: f32,
    /// Body heading, degrees
    pub orientation: f32,
    /// Gaze heading, degrees
    pub gaze: f32,
    pub state: AlienState,
    pub previous: AlienState,
    /// Remaining waypoints in travel order
    pub waypoints: Vec<Vec2>,
    pub objective: Option<Vec2>,
    pub frontstage: bool,
    pub sees_player: bool,
}

/// The hunting agent
#[derive(Debug, Clone)]
pub struct Alien {
    config: AlienConfig,
    body: Body,
    state: AlienState,
    previous: AlienState,
    heading: AngularTracker,
    gaze: AngularTracker,
    /// Body heading goal: movement direction or the player's bearing
    heading_goal: f32,
    /// Gaze goal while patrolling or looking around
    look_target: f32,
    follower: PathFollower,
    frontstage: bool,
    timers: AlienTimers,
    current_speed: f32,
    rng: StdRng,
    sees_player: bool,
    patrol_hint: Option<Vec2>,
}

impl Alien {
    /// Alien at `position`, patrolling the vents
    pub fn new(position: Vec2, config: AlienConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut timers = AlienTimers::default();
        timers.glance_period = duration(&mut rng, config.glance_mean, config.glance_std_dev);

        Ok(Self {
            body: Body::new(position, config.size),
            state: AlienState::ComputeVentPatrol,
            previous: AlienState::ComputeVentPatrol,
            heading: AngularTracker::new(0.0, config.body_turn_cap, config.body_turn_accel, config.turn_settle),
            gaze: AngularTracker::new(0.0, config.gaze_turn_cap, config.gaze_turn_accel, config.turn_settle),
            heading_goal: 0.0,
            look_target: 0.0,
            follower: PathFollower::default(),
            frontstage: false,
            timers,
            current_speed: config.base_speed,
            rng,
            sees_player: false,
            patrol_hint: None,
            config,
        })
    }

    /// Start in `state` instead of vent patrol
    pub fn with_state(mut self, state: AlienState) -> Self {
        self.state = state;
        self.previous = state;
        self
    }

    pub fn with_frontstage(mut self, frontstage: bool) -> Self {
        self.frontstage = frontstage;
        self
    }

    /// Start facing `angle`
    pub fn with_heading(mut self, angle: f32) -> Self {
        self.heading.angle = angle;
        self.gaze.angle = angle;
        self.heading_goal = angle;
        self.look_target = angle;
        self
    }

    pub fn config(&self) -> &AlienConfig {
        &self.config
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn state(&self) -> AlienState {
        self.state
    }

    pub fn previous_state(&self) -> AlienState {
        self.previous
    }

    pub fn orientation(&self) -> f32 {
        self.heading.angle
    }

    pub fn gaze(&self) -> f32 {
        self.gaze.angle
    }

    pub fn is_frontstage(&self) -> bool {
        self.frontstage
    }

    /// Player perceived during the last tick
    pub fn sees_player(&self) -> bool {
        self.sees_player
    }

    pub fn follower(&self) -> &PathFollower {
        &self.follower
    }

    pub fn timers(&self) -> &AlienTimers {
        &self.timers
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn snapshot(&self) -> AlienSnapshot {
        AlienSnapshot {
            position: self.body.position,
            size: self.body.size,
            orientation: self.heading.angle,
            gaze: self.gaze.angle,
            state: self.state,
            previous: self.previous,
            waypoints: self.follower.waypoints(),
            objective: self.follower.objective(),
            frontstage: self.frontstage,
            sees_player: self.sees_player,
        }
    }

    /// Perception check: frontstage, player alive, inside the gaze cone and unoccluded
    pub fn perceives<P: PlayerHandle + ?Sized>(&self, map: &GameMap, player: &P) -> bool {
        self.frontstage
            && player.is_alive()
            && SightCone::new(self.config.fov, self.config.sight_range).perceives(
                map,
                self.body.position,
                self.gaze.angle,
                player.position(),
            )
    }

    /// Apply a director order. Orders that make no sense in the current
    /// state are ignored.
    pub fn command(&mut self, command: AlienCommand) {
        let event = match command {
            AlienCommand::EnterVents => AlienEvent::EnterVentsOrdered,
            AlienCommand::ExitVents => AlienEvent::ExitVentsOrdered,
            AlienCommand::PatrolHint(_) => AlienEvent::HintReceived,
        };
        let Some(next) = self.state.on(event) else {
            return;
        };
        if let AlienCommand::PatrolHint(point) = command {
            self.patrol_hint = Some(point);
        }
        self.enter(next, &mut NullSink);
    }

    /// Jump to `next` regardless of the transition table
    pub fn force_transition(&mut self, next: AlienState) {
        self.enter(next, &mut NullSink);
    }

    /// Advance one tick
    pub fn update<P, S>(&mut self, dt: f32, map: &GameMap, player: &mut P, sound: &mut S)
    where
        P: PlayerHandle + ?Sized,
        S: SoundSink + ?Sized,
    {
        let start = self.body.position;
        let target = player.position();
        let distance = start.distance(target);

        self.timers.tick(dt);
        self.current_speed = self.config.base_speed;

        self.sees_player = self.perceives(map, &*player);
        if self.sees_player {
            self.timers.last_seen.reset();
            self.heading_goal = bearing(start, target);
        }
        self.turn(dt, target);

        if self.sees_player {
            let event = if distance < self.config.kill_range {
                AlienEvent::PlayerInKillRange
            } else if distance < self.config.rush_range {
                AlienEvent::PlayerInRushRange
            } else {
                AlienEvent::PlayerSpotted
            };
            self.fire(event, sound);
        }

        self.run_state(dt, map, player, sound);

        let moved = self.body.position - start;
        if !self.sees_player && moved != Vec2::ZERO {
            self.heading_goal = bearing(start, self.body.position);
        }
        self.footsteps(moved, distance, sound);
    }

    fn turn(&mut self, dt: f32, target: Vec2) {
        self.heading.step(self.heading_goal, dt);

        let gaze_goal = if self.sees_player {
            bearing(self.body.position, target)
        } else {
            match self.state {
                AlienState::LookAround | AlienState::Patrol => self.look_target,
                _ => self.heading_goal,
            }
        };
        self.gaze.step(gaze_goal, dt);
    }

    fn fire<S: SoundSink + ?Sized>(&mut self, event: AlienEvent, sound: &mut S) {
        if let Some(next) = self.state.on(event) {
            self.enter(next, sound);
        }
    }

    fn enter<S: SoundSink + ?Sized>(&mut self, next: AlienState, sound: &mut S) {
        use AlienState::*;

        let previous = self.state;
        log::debug!("alien {previous} -> {next}");
        self.previous = previous;
        self.state = next;

        if matches!(next, ComputeChase | ComputeSearch | ComputePatrol | Hiss) && previous != LookAround {
            self.timers.hiss.reset();
            self.timers.search.reset();
        }
        if next == ComputeChase && previous != Chase {
            self.timers.chase.reset();
        }

        match next {
            LookAround => {
                self.gaze.halt();
                self.timers.look_around.reset();
                self.timers.look_turn.reset();
                self.timers.look_turn_period = 0.0;
                self.timers.look_around_duration =
                    duration(&mut self.rng, self.config.look_around_mean, self.config.look_around_std_dev);
            }
            Hiss => sound.play(SoundEffect::Hiss, None),
            Kill => sound.play(SoundEffect::Kill, None),
            EnterVent => {
                self.frontstage = false;
                sound.play(SoundEffect::EnterVent, None);
            }
            ExitVent => {
                self.frontstage = true;
                sound.play(SoundEffect::ExitVent, None);
            }
            _ => {}
        }
    }

    fn run_state<P, S>(&mut self, dt: f32, map: &GameMap, player: &mut P, sound: &mut S)
    where
        P: PlayerHandle + ?Sized,
        S: SoundSink + ?Sized,
    {
        use AlienState::*;

        let target = player.position();
        match self.state {
            Hiss => {
                if !self.sees_player {
                    self.fire(AlienEvent::PlayerLost, sound);
                } else if self.timers.hiss.exceeds(self.config.hiss_duration) {
                    self.fire(AlienEvent::HissElapsed, sound);
                }
            }
            Rush => {
                self.current_speed = self.config.rush_speed;
                if self.sees_player {
                    self.body.go_to(target, self.config.rush_speed, dt, map.walls());
                } else {
                    self.fire(AlienEvent::PlayerLost, sound);
                }
            }
            ComputeChase => {
                self.plan_on_mesh(map, target, sound);
            }
            Chase => self.update_chase(dt, map, sound),
            ComputePatrol => {
                let (reference, band) = match self.patrol_hint {
                    Some(hint) => (hint, self.config.search_range),
                    None => (self.body.position, self.config.patrol_range),
                };
                match map.nav_mesh().random_tile(&mut self.rng, reference, band, DEFAULT_SAMPLE_ATTEMPTS) {
                    Some(goal) => {
                        if self.plan_on_mesh(map, goal, sound) {
                            self.patrol_hint = None;
                        }
                    }
                    None => self.plan_failed("patrol"),
                }
            }
            Patrol => {
                if self.timers.glance.exceeds(self.timers.glance_period) {
                    self.timers.glance.reset();
                    self.timers.glance_period =
                        duration(&mut self.rng, self.config.glance_mean, self.config.glance_std_dev);
                    self.look_target = self.heading_goal + gaussian(&mut self.rng, 0.0, self.config.glance_spread);
                }
                self.follow(dt, map, self.config.base_speed, sound);
            }
            ComputeSearch => {
                let reference = self.body.position;
                match map.nav_mesh().random_tile(
                    &mut self.rng,
                    reference,
                    self.config.search_range,
                    DEFAULT_SAMPLE_ATTEMPTS,
                ) {
                    Some(goal) => {
                        self.plan_on_mesh(map, goal, sound);
                    }
                    None => self.plan_failed("search"),
                }
            }
            Search => {
                self.current_speed = self.config.search_speed;
                if self.timers.search.exceeds(self.config.search_duration) {
                    self.fire(AlienEvent::SearchExpired, sound);
                } else {
                    self.follow(dt, map, self.config.search_speed, sound);
                }
            }
            LookAround => {
                if self.timers.look_turn.exceeds(self.timers.look_turn_period) {
                    self.timers.look_turn.reset();
                    self.timers.look_turn_period =
                        duration(&mut self.rng, self.config.look_turn_mean, self.config.look_turn_std_dev);
                    self.look_target = self.rng.gen_range(0.0..360.0);
                    self.heading_goal = self.look_target;
                }
                if self.timers.look_around.exceeds(self.timers.look_around_duration) {
                    self.fire(AlienEvent::Resume(self.previous), sound);
                }
            }
            ComputeVentPatrol => {
                let vents = map.vents();
                let plan = vents
                    .random_point(&mut self.rng)
                    .and_then(|goal| vents.compute_path(self.body.position, goal));
                match plan {
                    Some(path) => {
                        self.follower.adopt_vent(path);
                        self.fire(AlienEvent::PathPlanned, sound);
                    }
                    None => self.plan_failed("vent patrol"),
                }
            }
            VentPatrol => self.follow_vent(dt, sound),
            ComputeNearestVentEntry => {
                let access = map
                    .vents()
                    .closest_vent_access(self.body.position)
                    .unwrap_or(self.body.position);
                self.plan_on_mesh(map, access, sound);
            }
            GoToNearestVentEntry => self.follow(dt, map, self.config.base_speed, sound),
            EnterVent => self.fire(AlienEvent::VentEntered, sound),
            ComputeNearestVentExit => {
                let here = self.body.position;
                let vents = map.vents();
                let access = vents.closest_vent_access(here).unwrap_or(here);
                let path = vents.compute_path(here, access).unwrap_or_else(|| {
                    log::debug!("no vent route to exit at {access:?}, heading straight for it");
                    Path::from_goal_first(vec![access])
                });
                self.follower.adopt_vent(path);
                self.fire(AlienEvent::PathPlanned, sound);
            }
            GoToNearestVentExit => self.follow_vent(dt, sound),
            ExitVent => self.fire(AlienEvent::VentExited, sound),
            Kill => {
                if player.is_alive() {
                    log::info!("player killed at {:?}", target);
                    player.kill();
                }
            }
        }
    }

    fn update_chase<S: SoundSink + ?Sized>(&mut self, dt: f32, map: &GameMap, sound: &mut S) {
        let speed = self.config.sprint_speed;
        self.current_speed = speed;

        if self.sees_player && self.timers.path_refresh.exceeds(self.config.path_refresh) {
            self.fire(AlienEvent::RefreshDue, sound);
            return;
        }

        let pursuing = self.sees_player
            || !self.timers.last_seen.exceeds(self.config.lost_sight_grace)
            || !self.timers.chase.exceeds(self.config.chase_duration);
        if pursuing {
            self.follow(dt, map, speed, sound);
        } else {
            self.fire(AlienEvent::ChaseExpired, sound);
        }
    }

    /// Plan a mesh path to `goal` and hand over to the action state.
    /// Returns whether a plan was found.
    fn plan_on_mesh<S: SoundSink + ?Sized>(&mut self, map: &GameMap, goal: Vec2, sound: &mut S) -> bool {
        self.timers.path_refresh.reset();
        match map.nav_mesh().compute_path(self.body.position, goal) {
            Some(plan) => {
                self.follower.adopt(plan);
                self.follower.set_objective(goal);
                self.fire(AlienEvent::PathPlanned, sound);
                true
            }
            None => {
                self.plan_failed("mesh");
                false
            }
        }
    }

    fn plan_failed(&mut self, what: &str) {
        self.timers.path_refresh.reset();
        log::debug!("alien in {} found no {what} plan, retrying", self.state);
    }

    fn follow<S: SoundSink + ?Sized>(&mut self, dt: f32, map: &GameMap, speed: f32, sound: &mut S) {
        if self.follower.follow(&mut self.body, speed, dt, map, &self.config) == PathStep::Arrived {
            self.fire(AlienEvent::PathExhausted, sound);
        }
    }

    fn follow_vent<S: SoundSink + ?Sized>(&mut self, dt: f32, sound: &mut S) {
        let speed = self.config.base_speed;
        if self.follower.follow_vent(&mut self.body, speed, dt, &self.config) == PathStep::Arrived {
            self.fire(AlienEvent::PathExhausted, sound);
        }
    }

    fn footsteps<S: SoundSink + ?Sized>(&mut self, moved: Vec2, distance: f32, sound: &mut S) {
        if moved.x.abs() <= STEP_THRESHOLD && moved.y.abs() <= STEP_THRESHOLD {
            return;
        }
        let delay = if self.current_speed >= self.config.sprint_speed {
            self.config.run_step_delay
        } else if self.current_speed == self.config.base_speed {
            self.config.walk_step_delay
        } else {
            return;
        };
        if self.timers.step.exceeds(delay) {
            let volume = self.config.step_attenuation / (distance + 1e-6);
            sound.play(SoundEffect::AlienStep, Some(volume));
            self.timers.step.reset();
        }
    }
}

fn gaussian(rng: &mut StdRng, mean: f32, std_dev: f32) -> f32 {
    Normal::new(mean, std_dev)
        .map(|normal| normal.sample(rng))
        .unwrap_or(mean)
}

/// Gaussian draw clamped at zero
fn duration(rng: &mut StdRng, mean: f32, std_dev: f32) -> f32 {
    gaussian(rng, mean, std_dev).max(0.0)
}
