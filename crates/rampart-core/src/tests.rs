//! Tests for core geometry, route expansion, stat tables, and serialization.

use crate::commands::PlayerCommand;
use crate::constants::*;
use crate::enums::*;
use crate::errors::CommandError;
use crate::grid::{GridCell, GridSpec, Path};
use crate::state::{health_fraction, GameStateSnapshot};
use crate::types::{cooldown_ready, Position, SimTime, Velocity};

// ---- Geometry ----

#[test]
fn test_distance_and_step() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);

    let stepped = a.step_toward(&b, 1.0);
    assert!((stepped.x - 0.6).abs() < 1e-12);
    assert!((stepped.y - 0.8).abs() < 1e-12);

    // A step longer than the gap lands exactly on the target.
    assert_eq!(a.step_toward(&b, 10.0), b);
}

#[test]
fn test_velocity_toward_has_requested_speed() {
    let v = Velocity::toward(&Position::new(10.0, 10.0), &Position::new(40.0, 50.0), 5.0);
    assert!((v.speed() - 5.0).abs() < 1e-12);

    let zero = Velocity::toward(&Position::new(1.0, 1.0), &Position::new(1.0, 1.0), 5.0);
    assert_eq!(zero.speed(), 0.0);
}

#[test]
fn test_sim_time_ms() {
    let mut time = SimTime::default();
    assert_eq!(time.elapsed_ms(), 0);
    for _ in 0..TICK_RATE {
        time.advance();
    }
    assert_eq!(time.elapsed_ms(), 1000);
    assert!((time.elapsed_secs() - 1.0).abs() < 1e-12);
}

#[test]
fn test_cooldown_ready() {
    assert!(cooldown_ready(None, 0, 1000));
    assert!(!cooldown_ready(Some(0), 999, 1000));
    assert!(cooldown_ready(Some(0), 1000, 1000));
}

// ---- Grid ----

#[test]
fn test_pixel_grid_conversion() {
    let grid = GridSpec::default();
    assert_eq!(grid.cell_width, 40.0);
    assert_eq!(grid.cell_height, 30.0);

    assert_eq!(grid.pixel_to_grid(0.0, 0.0), GridCell::new(0, 0));
    assert_eq!(grid.pixel_to_grid(39.9, 29.9), GridCell::new(0, 0));
    assert_eq!(grid.pixel_to_grid(40.0, 30.0), GridCell::new(1, 1));
    assert_eq!(grid.pixel_to_grid(-1.0, 5.0), GridCell::new(-1, 0));

    assert_eq!(grid.grid_to_pixel(GridCell::new(2, 3)), Position::new(80.0, 90.0));
    assert_eq!(grid.cell_center(GridCell::new(2, 3)), Position::new(100.0, 105.0));
}

#[test]
fn test_in_bounds() {
    let grid = GridSpec::default();
    assert!(grid.in_bounds(GridCell::new(0, 0)));
    assert!(grid.in_bounds(GridCell::new(19, 19)));
    assert!(!grid.in_bounds(GridCell::new(20, 0)));
    assert!(!grid.in_bounds(GridCell::new(0, -1)));
}

#[test]
fn test_path_expands_corners() {
    let grid = GridSpec::default();
    let path = Path::from_corners(
        &grid,
        &[GridCell::new(0, 0), GridCell::new(3, 0), GridCell::new(3, 2)],
    );
    assert_eq!(
        path.cells(),
        &[
            GridCell::new(0, 0),
            GridCell::new(1, 0),
            GridCell::new(2, 0),
            GridCell::new(3, 0),
            GridCell::new(3, 1),
            GridCell::new(3, 2),
        ]
    );
    assert_eq!(path.last_index(), 5);
    assert_eq!(path.waypoint(5), Some(grid.cell_center(GridCell::new(3, 2))));
    assert_eq!(path.waypoint(6), None);
    assert!(path.contains(GridCell::new(2, 0)));
    assert!(!path.contains(GridCell::new(2, 1)));
}

#[test]
fn test_default_path_is_contiguous_and_in_bounds() {
    let grid = GridSpec::default();
    let path = Path::default();
    assert!(!path.is_empty());
    for cell in path.cells() {
        assert!(grid.in_bounds(*cell), "{cell:?} out of bounds");
    }
    for pair in path.cells().windows(2) {
        let step = (pair[1].x - pair[0].x).abs() + (pair[1].y - pair[0].y).abs();
        assert_eq!(step, 1, "route jumps between {:?} and {:?}", pair[0], pair[1]);
    }
    assert_eq!(path.cells()[0], DEFAULT_PATH_CORNERS[0]);
    assert_eq!(
        path.cells()[path.last_index()],
        DEFAULT_PATH_CORNERS[DEFAULT_PATH_CORNERS.len() - 1]
    );
}

// ---- Stat tables ----

#[test]
fn test_enemy_base_stats() {
    let basic = EnemyKind::Basic.stats(0);
    assert_eq!(basic.health, 50);
    assert_eq!(basic.speed, 1.0);
    assert_eq!(basic.reward, 10);
    let attack = basic.attack.unwrap();
    assert_eq!((attack.damage, attack.range, attack.rate_ms), (8, 35.0, 1200));

    let fast = EnemyKind::Fast.stats(0);
    assert_eq!((fast.health, fast.speed, fast.reward), (30, 2.0, 15));

    let tank = EnemyKind::Tank.stats(0);
    assert_eq!((tank.health, tank.reward), (100, 25));
    assert!((tank.speed - 0.5).abs() < 1e-12);
}

#[test]
fn test_enemy_stats_scale_and_floor() {
    let basic = EnemyKind::Basic.stats(1);
    assert_eq!(basic.health, 62); // 62.5 floored
    assert_eq!(basic.reward, 12);
    assert!((basic.speed - 1.05).abs() < 1e-12);

    let fast = EnemyKind::Fast.stats(1);
    assert_eq!(fast.health, 36);
    assert_eq!(fast.reward, 19); // 19.5 floored
}

#[test]
fn test_tank_speed_floor() {
    assert!((EnemyKind::Tank.stats(10).speed - 0.3).abs() < 1e-12);
    assert!((EnemyKind::Tank.stats(15).speed - 0.2).abs() < 1e-12);
    assert_eq!(EnemyKind::Tank.stats(40).speed, 0.2);
}

#[test]
fn test_tower_table() {
    let basic = TowerKind::Basic.stats();
    assert_eq!((basic.damage, basic.range, basic.fire_rate_ms), (10, 100.0, 1000));
    assert_eq!((basic.cost, basic.health, basic.splash_radius), (50, 100, 0.0));

    let sniper = TowerKind::Sniper.stats();
    assert_eq!((sniper.damage, sniper.range, sniper.fire_rate_ms), (40, 200.0, 2000));
    assert_eq!((sniper.cost, sniper.health), (100, 150));

    let splash = TowerKind::Splash.stats();
    assert_eq!((splash.damage, splash.range, splash.fire_rate_ms), (15, 80.0, 1500));
    assert_eq!((splash.cost, splash.health, splash.splash_radius), (120, 120, 50.0));

    for kind in TowerKind::ALL {
        assert!(kind.stats().fire_rate_ms > 0);
    }
}

// ---- Snapshot helpers ----

#[test]
fn test_health_fraction_clamped() {
    assert_eq!(health_fraction(50, 100), 0.5);
    assert_eq!(health_fraction(-10, 100), 0.0);
    assert_eq!(health_fraction(10, 0), 0.0);
}

#[test]
fn test_phase_terminal() {
    assert!(!GamePhase::Paused.is_terminal());
    assert!(!GamePhase::Running.is_terminal());
    assert!(GamePhase::GameOver.is_terminal());
    assert!(GamePhase::Victory.is_terminal());
}

// ---- Serialization ----

#[test]
fn test_command_json_shape() {
    let json = r#"{"type":"PlaceTower","x":4,"y":7}"#;
    let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
    assert_eq!(
        cmd,
        PlayerCommand::PlaceTower {
            x: 4,
            y: 7,
            kind: None
        }
    );

    let json = serde_json::to_string(&PlayerCommand::SetRunning { running: true }).unwrap();
    assert_eq!(json, r#"{"type":"SetRunning","running":true}"#);
}

#[test]
fn test_default_snapshot_serializes() {
    let snapshot = GameStateSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"phase\":\"Paused\""));
}

#[test]
fn test_command_error_messages() {
    let err = CommandError::InsufficientFunds {
        cost: 100,
        available: 90,
    };
    assert_eq!(err.to_string(), "insufficient funds: need 100, have 90");

    let err = CommandError::InvalidPlacement {
        x: 1,
        y: 3,
        reason: PlacementIssue::OnPath,
    };
    assert_eq!(
        err.to_string(),
        "cannot place tower at (1, 3): cell is on the enemy path"
    );
}
