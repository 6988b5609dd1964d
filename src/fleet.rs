//! The enemy fleet: grid layout, lockstep movement and the shared
//! drop-and-reverse manoeuvre.

use tracing::debug;

use crate::entities::{Enemy, Rect};
use crate::settings::{Bounds, Settings};

// ── Layout ────────────────────────────────────────────────────────────────────

/// Grid dimensions for one fleet, derived purely from screen and sprite sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FleetLayout {
    pub rows: usize,
    pub cols: usize,
}

impl FleetLayout {
    /// `cols = floor((W - 2ew) / 2ew)`, `rows = floor((H - 3eh - sh) / 2eh)`,
    /// each clamped to zero when the screen is too small.
    pub fn new(screen_w: f32, screen_h: f32, ship_h: f32, enemy_w: f32, enemy_h: f32) -> Self {
        FleetLayout {
            rows: whole_fit(screen_h - 3.0 * enemy_h - ship_h, 2.0 * enemy_h),
            cols: whole_fit(screen_w - 2.0 * enemy_w, 2.0 * enemy_w),
        }
    }

    pub fn compute(settings: &Settings, bounds: Bounds) -> Self {
        FleetLayout::new(
            bounds.width,
            bounds.height,
            settings.ship_height,
            settings.enemy_width,
            settings.enemy_height,
        )
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

fn whole_fit(space: f32, cell: f32) -> usize {
    if cell <= 0.0 || !space.is_finite() {
        return 0;
    }
    (space / cell).floor().max(0.0) as usize
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FleetGrid {
    pub enemies: Vec<Enemy>,
    /// Shared horizontal direction, always -1 or +1.
    pub direction: i8,
    pub speed: f32,
    pub drop_step: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Number of populations so far; stamped onto every enemy created.
    pub generation: u32,
}

impl FleetGrid {
    /// An empty fleet heading right.
    pub fn new(settings: &Settings) -> Self {
        FleetGrid {
            enemies: Vec::new(),
            direction: 1,
            speed: settings.fleet_speed,
            drop_step: settings.drop_step,
            enemy_width: settings.enemy_width,
            enemy_height: settings.enemy_height,
            generation: 0,
        }
    }

    /// Replace the fleet with a fresh, deterministic grid.  The shared
    /// direction carries over from the previous fleet.
    pub fn populate(&mut self, screen_w: f32, screen_h: f32, ship_height: f32) {
        let layout = FleetLayout::new(
            screen_w,
            screen_h,
            ship_height,
            self.enemy_width,
            self.enemy_height,
        );
        self.generation += 1;
        self.enemies.clear();
        self.enemies.reserve(layout.capacity());
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let x = self.enemy_width * (1 + 2 * col) as f32;
                let y = self.enemy_height * (1 + 2 * row) as f32;
                self.enemies.push(Enemy {
                    rect: Rect::new(x, y, self.enemy_width, self.enemy_height),
                    generation: self.generation,
                });
            }
        }
    }

    /// Move every enemy by `direction * speed * dt`, then reverse once if any
    /// enemy touches the edge it is heading toward.  Returns whether the
    /// fleet reversed this tick.
    pub fn advance(&mut self, dt: f32, screen_w: f32) -> bool {
        let step = f32::from(self.direction) * self.speed * dt;
        for enemy in &mut self.enemies {
            enemy.rect.x += step;
        }
        if self.touches_edge(screen_w) {
            self.reverse();
            true
        } else {
            false
        }
    }

    /// Edge contact in the current direction of travel.  An enemy resting on
    /// the opposite edge does not count, so one contact yields one reversal.
    pub fn touches_edge(&self, screen_w: f32) -> bool {
        self.enemies.iter().any(|e| {
            (self.direction > 0 && e.rect.right() >= screen_w)
                || (self.direction < 0 && e.rect.left() <= 0.0)
        })
    }

    /// Flip the shared direction and drop the whole fleet in the same tick.
    pub fn reverse(&mut self) {
        self.direction = -self.direction;
        for enemy in &mut self.enemies {
            enemy.rect.y += self.drop_step;
        }
        debug!(direction = self.direction, "fleet reversed");
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn wipe(&mut self) {
        self.enemies.clear();
    }
}
