//! Multi-tick behavior of the alien and director on small maps

use stalker_ai::prelude::*;
use stalker_map::{GameMap, MapSettings};
use stalker_math::{Rect, Vec2};
use stalker_nav::{Tile, VentGraph};

const DT: f32 = 1.0 / 60.0;

struct Target {
    position: Vec2,
    alive: bool,
}

impl Target {
    fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            alive: true,
        }
    }
}

impl PlayerHandle for Target {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

fn settings() -> MapSettings {
    MapSettings {
        player_spawn: Vec2::new(400.0, 250.0),
        enemy_spawn: Vec2::new(100.0, 250.0),
        density: 25.0,
        edge_tolerance: 2.0,
        map_size: Some(Vec2::new(500.0, 500.0)),
    }
}

/// Open room split by a wall in the middle
fn walled_map() -> GameMap {
    let walls = vec![Rect::new(250.0, 100.0, 25.0, 300.0)];
    GameMap::build("walled", walls, settings(), VentGraph::new(25.0)).unwrap()
}

fn vent_map() -> GameMap {
    let mut vents = VentGraph::new(25.0);
    vents
        .add_node(Tile::new(2, 2))
        .add_node(Tile::new(10, 2))
        .add_node(Tile::new(17, 17))
        .connect(Tile::new(2, 2), Tile::new(10, 2))
        .connect(Tile::new(10, 2), Tile::new(17, 17))
        .add_exit(Tile::new(17, 17));
    GameMap::build("vents", Vec::new(), settings(), vents).unwrap()
}

#[test]
fn test_chase_outlasts_lost_sight_grace() {
    let map = walled_map();
    // Slow sprint so the chase cannot end by reaching the player
    let config = AlienConfig::default().with_seed(3).with_speeds(1.0, 2.0, 0.25, 9.0);
    let mut alien = Alien::new(map.settings().enemy_spawn, config)
        .unwrap()
        .with_state(AlienState::Patrol)
        .with_frontstage(true);
    alien.force_transition(AlienState::ComputeChase);

    // Seen once in the open, then hidden behind the wall
    let mut player = Target::at(210.0, 250.0);
    alien.update(DT, &map, &mut player, &mut NullSink);
    assert!(alien.sees_player());
    assert_eq!(alien.state(), AlienState::Chase);
    player.position = Vec2::new(400.0, 250.0);

    let mut elapsed = DT;
    while elapsed < 6.0 {
        alien.update(DT, &map, &mut player, &mut NullSink);
        assert!(!alien.sees_player());
        elapsed += DT;
    }
    assert!(alien.timers().last_seen.exceeds(alien.config().lost_sight_grace));
    assert!(matches!(alien.state(), AlienState::Chase | AlienState::ComputeChase));

    while matches!(alien.state(), AlienState::Chase | AlienState::ComputeChase) && elapsed < 20.0 {
        alien.update(DT, &map, &mut player, &mut NullSink);
        elapsed += DT;
    }
    assert_eq!(alien.state(), AlienState::ComputeSearch);
    assert!(elapsed > 9.9 && elapsed < 10.5, "chase ended after {elapsed}s");
}

#[test]
fn test_director_brings_alien_out_of_vents() {
    let map = vent_map();
    let mut alien = Alien::new(Vec2::new(62.5, 62.5), AlienConfig::default().with_seed(11)).unwrap();
    let mut director = Director::new(DirectorConfig::default()).unwrap();
    let mut player = Target::at(62.5, 450.0);
    let mut sounds = Vec::new();

    let mut emerged_at = None;
    for tick in 0..(60.0 / DT) as usize {
        alien.update(DT, &map, &mut player, &mut sounds);
        if let Some(command) = director.update(DT, &alien.snapshot(), player.position) {
            alien.command(command);
        }
        if alien.is_frontstage() {
            emerged_at = Some(tick as f32 * DT);
            break;
        }
    }

    let emerged_at = emerged_at.expect("alien never left the vents");
    // Aggression crosses the high threshold after 16s of hiding
    assert!(emerged_at > 16.0);
    assert!(sounds.iter().any(|(effect, _)| *effect == SoundEffect::ExitVent));
    // Left through the only exit
    assert!(alien.position().distance(Vec2::new(437.5, 437.5)) < alien.config().arrive_radius + 1.0);
}

#[test]
fn test_fog_fan_around_visible_corner() {
    let wall = Rect::new(60.0, 60.0, 40.0, 40.0);
    let caster = RayCaster::new(Rect::new(-300.0, -300.0, 600.0, 600.0)).with_step(0.5);
    // Facing the wall's near corner, which sits in the middle of the view
    let triangles = caster.cast_rays(Vec2::ZERO, 45.0, 90.0, &[wall], &wall.corners());

    assert!(triangles.len() >= 3);
    for pair in triangles.windows(2) {
        assert_eq!(pair[0].c, pair[1].b);
    }
    let vertices: Vec<Vec2> = triangles.iter().flat_map(|t| [t.b, t.c]).collect();
    assert!(vertices.contains(&Vec2::new(60.0, 60.0)));
    assert!(!vertices.contains(&Vec2::new(100.0, 100.0)));
}

#[test]
fn test_sighting_snaps_director_aggression() {
    let map = walled_map();
    let mut alien = Alien::new(Vec2::new(100.0, 50.0), AlienConfig::default().with_seed(5))
        .unwrap()
        .with_state(AlienState::Patrol)
        .with_frontstage(true);
    let mut director = Director::new(DirectorConfig::default()).unwrap();
    let mut player = Target::at(450.0, 50.0);

    alien.update(DT, &map, &mut player, &mut NullSink);
    assert!(alien.sees_player());
    director.update(DT, &alien.snapshot(), player.position);
    assert_eq!(director.aggression(), MAX_AGGRESSION);
}
