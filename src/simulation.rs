//! The fixed-tick driver.
//!
//! One call to [`Simulation::frame`] is one tick: drain input, advance the
//! playfield, resolve collisions, let the round controller react, then draw.
//! Physics only runs while the phase is `Active`; drawing happens every tick.

use tracing::info;

use crate::collision;
use crate::entities::{Rgb, Sprite};
use crate::interfaces::{InputEvent, InputSource, Key, Renderer};
use crate::playfield::Playfield;
use crate::round::{Phase, RoundController, RoundOutcome, RoundState};
use crate::settings::{Bounds, Settings, SettingsError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Clone, Debug)]
pub struct Simulation {
    settings: Settings,
    field: Playfield,
    round: RoundController,
    /// Ticks simulated so far in this game; frozen during `GameOver`.
    tick: u64,
    left_held: bool,
    right_held: bool,
}

impl Simulation {
    pub fn new(settings: Settings, bounds: Bounds) -> Result<Self, SettingsError> {
        settings.validate(bounds)?;
        let field = Playfield::new(&settings, bounds);
        let round = RoundController::new(&settings);
        info!(
            width = bounds.width,
            height = bounds.height,
            enemies = field.fleet.len(),
            "new game"
        );
        Ok(Simulation {
            settings,
            field,
            round,
            tick: 0,
            left_held: false,
            right_held: false,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    pub fn round_state(&self) -> &RoundState {
        &self.round.state
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Run one full tick and draw the result.  A quit skips the draw.
    pub fn frame<I, R>(&mut self, input: &mut I, renderer: &mut R) -> Result<Control, R::Error>
    where
        I: InputSource,
        R: Renderer,
    {
        if self.step(input) == Control::Quit {
            return Ok(Control::Quit);
        }
        self.render(renderer)?;
        Ok(Control::Continue)
    }

    /// Drain input then advance the simulation by one tick.
    pub fn step<I: InputSource>(&mut self, input: &mut I) -> Control {
        for event in input.poll() {
            if self.handle_event(event) == Control::Quit {
                info!(tick = self.tick, "quit");
                return Control::Quit;
            }
        }
        self.advance();
        Control::Continue
    }

    /// Apply one input event.  Quit is honoured in every phase; fire only
    /// while `Active`; restart only after `GameOver`.
    pub fn handle_event(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Quit => return Control::Quit,
            InputEvent::KeyDown(Key::Left) => self.left_held = true,
            InputEvent::KeyUp(Key::Left) => self.left_held = false,
            InputEvent::KeyDown(Key::Right) => self.right_held = true,
            InputEvent::KeyUp(Key::Right) => self.right_held = false,
            InputEvent::KeyDown(Key::Fire) => {
                if self.round.is_active() {
                    self.field.fire(self.tick);
                }
            }
            InputEvent::KeyDown(Key::Restart) => {
                if self.round.is_game_over() {
                    self.restart();
                }
            }
            InputEvent::KeyUp(Key::Fire | Key::Restart) => {}
        }
        let intent = i8::from(self.right_held) - i8::from(self.left_held);
        self.field.ship.set_move_intent(intent);
        Control::Continue
    }

    /// Advance physics by one fixed tick according to the current phase.
    pub fn advance(&mut self) -> RoundOutcome {
        match self.round.phase() {
            Phase::Active => {
                self.tick += 1;
                let dt = self.settings.tick_seconds();
                let width = self.field.bounds.width;
                let height = self.field.bounds.height;

                self.field.ship.advance(dt, width);
                self.field.advance_projectiles(dt);
                self.field.fleet.advance(dt, width);

                let field = &mut self.field;
                let report = collision::resolve(
                    &field.ship,
                    &mut field.fleet,
                    &mut field.projectiles,
                    height,
                );
                self.round.apply(report, &mut self.field)
            }
            Phase::HitPause { .. } => {
                self.tick += 1;
                self.round.tick_pause();
                RoundOutcome::Continue
            }
            Phase::GameOver => RoundOutcome::Continue,
        }
    }

    /// Start a brand-new game on the same screen.
    pub fn restart(&mut self) {
        self.field = Playfield::new(&self.settings, self.field.bounds);
        self.round = RoundController::new(&self.settings);
        self.tick = 0;
        info!("game restarted");
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        renderer.clear(Rgb::BLACK)?;
        if self.round.is_game_over() {
            self.draw_game_over(renderer)?;
        } else {
            self.draw_field(renderer)?;
            self.draw_hud(renderer)?;
            if let Phase::HitPause { .. } = self.round.phase() {
                let banner = "SHIP HIT!!";
                let row = (self.text_rows() / 2.0).floor();
                renderer.draw_text(banner, self.text_at(self.centred(banner), row), Rgb::RED)?;
            }
        }
        renderer.present()
    }

    fn draw_field<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        renderer.draw_entity(&self.field.ship.rect, Sprite::Ship)?;
        for projectile in &self.field.projectiles {
            renderer.draw_entity(&projectile.rect, Sprite::Projectile)?;
        }
        for enemy in &self.field.fleet.enemies {
            renderer.draw_entity(&enemy.rect, Sprite::Enemy)?;
        }
        Ok(())
    }

    fn draw_hud<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        let state = &self.round.state;
        let bottom = (self.text_rows() - 1.0).max(0.0);

        let score = format!("Score: {}", state.score);
        renderer.draw_text(&score, self.text_at(1.0, 0.0), Rgb::WHITE)?;

        let round = format!("Round: {}", state.round_number);
        renderer.draw_text(&round, self.text_at(self.right_aligned(&round), 0.0), Rgb::WHITE)?;

        let lives = format!("Remaining Lives: {}", state.lives_remaining);
        renderer.draw_text(&lives, self.text_at(self.right_aligned(&lives), bottom), Rgb::WHITE)?;
        Ok(())
    }

    fn draw_game_over<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        let state = &self.round.state;
        let lines = [
            ("GAME OVER! Press 'q' to quit".to_string(), Rgb::RED),
            (format!("Score: {}", state.score), Rgb::YELLOW),
            (format!("Round: {}", state.round_number), Rgb::WHITE),
            ("Press 'r' to play again".to_string(), Rgb::WHITE),
        ];
        let top = (self.text_rows() / 2.0 - lines.len() as f32).max(0.0).floor();
        for (i, (text, color)) in lines.iter().enumerate() {
            let row = top + 2.0 * i as f32;
            renderer.draw_text(text, self.text_at(self.centred(text), row), *color)?;
        }
        Ok(())
    }

    // ── Text layout, in character cells ──────────────────────────────────────

    fn text_columns(&self) -> f32 {
        (self.field.bounds.width / self.settings.glyph_width).floor()
    }

    fn text_rows(&self) -> f32 {
        (self.field.bounds.height / self.settings.glyph_height).floor()
    }

    fn centred(&self, text: &str) -> f32 {
        ((self.text_columns() - text.chars().count() as f32) / 2.0)
            .max(0.0)
            .floor()
    }

    fn right_aligned(&self, text: &str) -> f32 {
        (self.text_columns() - text.chars().count() as f32 - 1.0).max(0.0)
    }

    /// World position of a character cell.
    fn text_at(&self, column: f32, row: f32) -> (f32, f32) {
        (
            column * self.settings.glyph_width,
            row * self.settings.glyph_height,
        )
    }
}
