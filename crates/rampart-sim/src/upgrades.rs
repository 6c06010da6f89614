//! Tower upgrade formula.
//!
//! Each level multiplies the tower's stats and floors the result, so two
//! upgrades floor twice rather than once on the combined factor.

use rampart_core::components::{Health, Tower};
use rampart_core::constants::*;
use rampart_core::types::floor_scaled;

/// Raise a tower by one level. The caller pays `tower.upgrade_cost` first.
pub fn apply_upgrade(tower: &mut Tower, health: &mut Health) {
    tower.level += 1;
    tower.damage = floor_scaled(tower.damage as f64, UPGRADE_DAMAGE_FACTOR) as u32;
    tower.range = floor_scaled(tower.range, UPGRADE_RANGE_FACTOR);
    tower.fire_rate_ms =
        (floor_scaled(tower.fire_rate_ms as f64, UPGRADE_FIRE_RATE_FACTOR) as u32).max(1);
    tower.upgrade_cost = floor_scaled(tower.upgrade_cost as f64, UPGRADE_COST_FACTOR) as u32;

    health.max = floor_scaled(health.max as f64, UPGRADE_HEALTH_FACTOR) as i32;
    health.current = health.max;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::enums::TowerKind;
    use rampart_core::grid::GridCell;

    fn basic_tower() -> (Tower, Health) {
        let stats = TowerKind::Basic.stats();
        (
            Tower {
                id: 0,
                kind: TowerKind::Basic,
                cell: GridCell::new(0, 0),
                damage: stats.damage,
                range: stats.range,
                fire_rate_ms: stats.fire_rate_ms,
                level: 1,
                upgrade_cost: stats.cost,
                splash_radius: stats.splash_radius,
                last_fire_ms: None,
            },
            Health {
                current: 40,
                max: stats.health,
            },
        )
    }

    #[test]
    fn single_upgrade() {
        let (mut tower, mut health) = basic_tower();
        apply_upgrade(&mut tower, &mut health);
        assert_eq!(tower.level, 2);
        assert_eq!(tower.damage, 13);
        assert_eq!(tower.range, 110.0);
        assert_eq!(tower.fire_rate_ms, 900);
        assert_eq!(tower.upgrade_cost, 75);
        assert_eq!(health.max, 120);
        assert_eq!(health.current, 120, "upgrade restores full health");
    }

    #[test]
    fn floors_at_each_step() {
        let (mut tower, mut health) = basic_tower();
        apply_upgrade(&mut tower, &mut health);
        apply_upgrade(&mut tower, &mut health);
        assert_eq!(tower.damage, 16);
        assert_eq!(tower.range, 121.0);
        assert_eq!(tower.fire_rate_ms, 810);
        assert_eq!(tower.upgrade_cost, 112);
        assert_eq!(health.max, 144);
    }

    #[test]
    fn splash_damage_floors_per_level() {
        let (mut tower, mut health) = basic_tower();
        tower.damage = TowerKind::Splash.stats().damage;
        apply_upgrade(&mut tower, &mut health);
        apply_upgrade(&mut tower, &mut health);
        // 15 -> 19 -> 24; flooring once on 15 * 1.69 would give 25.
        assert_eq!(tower.damage, 24);
    }

    #[test]
    fn stats_never_decrease() {
        let (mut tower, mut health) = basic_tower();
        for _ in 0..20 {
            let before = (tower.damage, tower.range, health.max);
            apply_upgrade(&mut tower, &mut health);
            assert!(tower.damage >= before.0);
            assert!(tower.range >= before.1);
            assert!(health.max >= before.2);
            assert!(tower.fire_rate_ms > 0);
        }
    }
}
