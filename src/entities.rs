//! Game entity types: the ship, its projectiles and the enemies of a fleet.
//!
//! Positions are in world units with the origin at the top-left corner and
//! `y` growing downward.  Every entity carries its own bounding box.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Inclusive overlap test: boxes that merely touch along an edge count
    /// as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }
}

// ── Presentation handles ──────────────────────────────────────────────────────

/// Which sprite a renderer should use for an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Projectile,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(230, 40, 40);
    pub const YELLOW: Rgb = Rgb(240, 220, 60);
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub rect: Rect,
    /// Horizontal move intent: -1, 0 or +1.
    pub direction: i8,
    pub speed: f32,
}

impl Ship {
    /// Build a ship already centred above the bottom margin.
    pub fn new(w: f32, h: f32, speed: f32, screen_w: f32, screen_h: f32, margin: f32) -> Self {
        let mut ship = Ship {
            rect: Rect::new(0.0, 0.0, w, h),
            direction: 0,
            speed,
        };
        ship.center_ship(screen_w, screen_h, margin);
        ship
    }

    /// Record move intent; any value is reduced to its sign.
    pub fn set_move_intent(&mut self, direction: i8) {
        self.direction = direction.signum();
    }

    /// Move by `speed * direction * dt`, clamped so the box stays on screen.
    pub fn advance(&mut self, dt: f32, screen_w: f32) {
        let step = self.speed * f32::from(self.direction) * dt;
        let max_x = (screen_w - self.rect.w).max(0.0);
        self.rect.x = (self.rect.x + step).clamp(0.0, max_x);
    }

    /// Back to horizontal centre, sitting just above the bottom margin.
    pub fn center_ship(&mut self, screen_w: f32, screen_h: f32, margin: f32) {
        self.rect.x = ((screen_w - self.rect.w) / 2.0).max(0.0);
        self.rect.y = (screen_h - margin - self.rect.h).max(0.0);
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    /// Unique within one game; gives the projectile set its identity.
    pub id: u64,
    pub rect: Rect,
    pub speed: f32,
    /// Tick on which the projectile was fired.
    pub fired_at: u64,
}

impl Projectile {
    /// Spawn a projectile whose bottom edge sits on the ship's top edge,
    /// horizontally centred on it.
    pub fn from_ship(id: u64, ship: &Ship, w: f32, h: f32, speed: f32, tick: u64) -> Self {
        Projectile {
            id,
            rect: Rect::new(ship.rect.center_x() - w / 2.0, ship.rect.top() - h, w, h),
            speed,
            fired_at: tick,
        }
    }

    /// Projectiles only ever travel upward.
    pub fn advance(&mut self, dt: f32) {
        self.rect.y -= self.speed * dt;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0.0
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// A fleet member.  Velocity lives on the owning `FleetGrid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Index of the fleet population this enemy was created by.
    pub generation: u32,
}
