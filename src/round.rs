//! Lives, rounds and score, and the phase machine that moves between them.

use tracing::info;

use crate::collision::CollisionReport;
use crate::playfield::Playfield;
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Ship and fleet simulate normally.
    Active,
    /// Frozen after losing a ship; counts down whole ticks, then resumes.
    HitPause { ticks_left: u32 },
    /// Terminal.  Only quit or restart are honoured.
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub lives_remaining: u32,
    pub round_number: u32,
    pub score: u32,
    pub phase: Phase,
}

impl RoundState {
    pub fn new(lives: u32) -> Self {
        RoundState {
            lives_remaining: lives,
            round_number: 1,
            score: 0,
            phase: Phase::Active,
        }
    }
}

/// What a call to [`RoundController::apply`] decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    RoundCleared { round: u32 },
    ShipLost { lives_remaining: u32 },
    GameOver,
}

#[derive(Clone, Debug)]
pub struct RoundController {
    pub state: RoundState,
    hit_pause_ticks: u32,
}

impl RoundController {
    pub fn new(settings: &Settings) -> Self {
        RoundController {
            state: RoundState::new(settings.starting_lives),
            hit_pause_ticks: settings.hit_pause_ticks(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_active(&self) -> bool {
        self.state.phase == Phase::Active
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    /// Fold one tick's collision report into the round state, re-seeding the
    /// playfield when the fleet is cleared or the ship is lost.
    ///
    /// Score always grows by the reported increments.  A ship hit takes
    /// precedence over a cleared fleet in the same tick.  Nothing but the
    /// score changes outside `Active`.
    pub fn apply(&mut self, report: CollisionReport, field: &mut Playfield) -> RoundOutcome {
        self.state.score += report.score_increments;

        if self.state.phase != Phase::Active {
            return RoundOutcome::Continue;
        }

        if report.ship_hit {
            return self.ship_hit(field);
        }

        if field.fleet.is_empty() {
            field.clear_projectiles();
            field.respawn_fleet();
            self.state.round_number += 1;
            info!(
                round = self.state.round_number,
                score = self.state.score,
                "fleet cleared"
            );
            return RoundOutcome::RoundCleared {
                round: self.state.round_number,
            };
        }

        RoundOutcome::Continue
    }

    fn ship_hit(&mut self, field: &mut Playfield) -> RoundOutcome {
        self.state.lives_remaining = self.state.lives_remaining.saturating_sub(1);

        if self.state.lives_remaining == 0 {
            self.state.phase = Phase::GameOver;
            info!(
                score = self.state.score,
                round = self.state.round_number,
                "game over"
            );
            return RoundOutcome::GameOver;
        }

        field.clear_projectiles();
        field.respawn_fleet();
        field.center_ship();
        self.state.phase = Phase::HitPause {
            ticks_left: self.hit_pause_ticks,
        };
        info!(lives = self.state.lives_remaining, "ship lost");
        RoundOutcome::ShipLost {
            lives_remaining: self.state.lives_remaining,
        }
    }

    /// Count down one tick of the hit pause.  Returns `true` on the tick the
    /// pause ends and play resumes.
    pub fn tick_pause(&mut self) -> bool {
        match self.state.phase {
            Phase::HitPause { ticks_left } if ticks_left <= 1 => {
                self.state.phase = Phase::Active;
                true
            }
            Phase::HitPause { ticks_left } => {
                self.state.phase = Phase::HitPause {
                    ticks_left: ticks_left - 1,
                };
                false
            }
            _ => false,
        }
    }
}
