//! Per-tick collision resolution.
//!
//! `resolve` runs exactly once per active tick and is the only place enemies
//! and projectiles are destroyed by contact.  It reports what happened and
//! leaves every phase/lives/round decision to the round controller.

use crate::entities::{Projectile, Ship};
use crate::fleet::FleetGrid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemies destroyed by projectiles this tick, one point each.
    pub score_increments: u32,
    /// At most one hit per tick, whatever caused it.
    pub ship_hit: bool,
}

/// Resolve this tick's contacts in a fixed order:
///
/// 1. projectile ↔ enemy: each projectile claims the first live enemy it
///    overlaps (fleet order); both are removed and one point is reported.
///    An enemy already claimed this tick cannot be claimed again.
/// 2. ship ↔ enemy: any overlap with a surviving enemy is a ship hit.
/// 3. enemy ↔ bottom edge: any surviving enemy whose bottom reaches
///    `screen_h` is also a ship hit.
pub fn resolve(
    ship: &Ship,
    fleet: &mut FleetGrid,
    projectiles: &mut Vec<Projectile>,
    screen_h: f32,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    // 1. single pass over projectiles; claims are recorded, removal happens after
    let mut enemy_destroyed = vec![false; fleet.enemies.len()];
    let mut projectile_spent = vec![false; projectiles.len()];
    for (pi, projectile) in projectiles.iter().enumerate() {
        let target = fleet
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !enemy_destroyed[*ei] && projectile.rect.intersects(&enemy.rect))
            .map(|(ei, _)| ei);
        if let Some(ei) = target {
            enemy_destroyed[ei] = true;
            projectile_spent[pi] = true;
            report.score_increments += 1;
        }
    }

    if report.score_increments > 0 {
        let mut i = 0;
        projectiles.retain(|_| {
            let keep = !projectile_spent[i];
            i += 1;
            keep
        });
        let mut i = 0;
        fleet.enemies.retain(|_| {
            let keep = !enemy_destroyed[i];
            i += 1;
            keep
        });
    }

    // 2.
    let rammed = fleet
        .enemies
        .iter()
        .any(|enemy| enemy.rect.intersects(&ship.rect));

    // 3.
    let landed = fleet
        .enemies
        .iter()
        .any(|enemy| enemy.rect.bottom() >= screen_h);

    report.ship_hit = rammed || landed;
    report
}
