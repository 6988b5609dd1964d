//! Everything that moves on screen, owned in one place for the tick driver.

use tracing::debug;

use crate::entities::{Projectile, Ship};
use crate::fleet::FleetGrid;
use crate::settings::{Bounds, Settings};

#[derive(Clone, Debug)]
pub struct Playfield {
    pub bounds: Bounds,
    pub ship: Ship,
    pub fleet: FleetGrid,
    pub projectiles: Vec<Projectile>,
    next_projectile_id: u64,
    projectile_width: f32,
    projectile_height: f32,
    projectile_speed: f32,
    ship_bottom_margin: f32,
    bullets_allowed: usize,
}

impl Playfield {
    /// A centred ship facing a freshly populated fleet.
    pub fn new(settings: &Settings, bounds: Bounds) -> Self {
        let ship = Ship::new(
            settings.ship_width,
            settings.ship_height,
            settings.ship_speed,
            bounds.width,
            bounds.height,
            settings.ship_bottom_margin,
        );
        let mut fleet = FleetGrid::new(settings);
        fleet.populate(bounds.width, bounds.height, ship.rect.h);
        Playfield {
            bounds,
            ship,
            fleet,
            projectiles: Vec::new(),
            next_projectile_id: 0,
            projectile_width: settings.projectile_width,
            projectile_height: settings.projectile_height,
            projectile_speed: settings.projectile_speed,
            ship_bottom_margin: settings.ship_bottom_margin,
            bullets_allowed: settings.bullets_allowed,
        }
    }

    /// Fire from the ship if fewer than `bullets_allowed` projectiles are in
    /// flight.  Returns whether a projectile was admitted.
    pub fn fire(&mut self, tick: u64) -> bool {
        if self.projectiles.len() >= self.bullets_allowed {
            debug!(in_flight = self.projectiles.len(), "fire ignored at projectile cap");
            return false;
        }
        let projectile = Projectile::from_ship(
            self.next_projectile_id,
            &self.ship,
            self.projectile_width,
            self.projectile_height,
            self.projectile_speed,
            tick,
        );
        self.next_projectile_id += 1;
        self.projectiles.push(projectile);
        true
    }

    /// Move projectiles up and drop those past the top edge.
    pub fn advance_projectiles(&mut self, dt: f32) {
        for projectile in &mut self.projectiles {
            projectile.advance(dt);
        }
        self.projectiles.retain(|p| !p.is_off_screen());
    }

    pub fn clear_projectiles(&mut self) {
        self.projectiles.clear();
    }

    /// Wipe and repopulate the fleet.
    pub fn respawn_fleet(&mut self) {
        self.fleet.wipe();
        self.fleet
            .populate(self.bounds.width, self.bounds.height, self.ship.rect.h);
    }

    pub fn center_ship(&mut self) {
        self.ship
            .center_ship(self.bounds.width, self.bounds.height, self.ship_bottom_margin);
    }
}
