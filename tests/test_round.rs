use alien_invasion::collision::CollisionReport;
use alien_invasion::entities::Rect;
use alien_invasion::playfield::Playfield;
use alien_invasion::round::*;
use alien_invasion::settings::{Bounds, Settings};

fn make_settings() -> Settings {
    Settings {
        ship_width: 10.0,
        ship_height: 10.0,
        ship_speed: 20.0,
        ship_bottom_margin: 0.0,
        projectile_width: 2.0,
        projectile_height: 4.0,
        projectile_speed: 40.0,
        bullets_allowed: 3,
        enemy_width: 10.0,
        enemy_height: 10.0,
        fleet_speed: 4.0,
        drop_step: 5.0,
        starting_lives: 3,
        hit_pause_secs: 0.5,
        tick_rate: 4,
        glyph_width: 1.0,
        glyph_height: 1.0,
    }
}

fn make_field() -> Playfield {
    // 4 columns × 3 rows of enemies on 100×100
    Playfield::new(&make_settings(), Bounds::new(100.0, 100.0))
}

fn report(score_increments: u32, ship_hit: bool) -> CollisionReport {
    CollisionReport {
        score_increments,
        ship_hit,
    }
}

// ── Initial state ─────────────────────────────────────────────────────────────

#[test]
fn new_round_state() {
    let rc = RoundController::new(&make_settings());
    assert_eq!(rc.state.lives_remaining, 3);
    assert_eq!(rc.state.round_number, 1);
    assert_eq!(rc.state.score, 0);
    assert_eq!(rc.phase(), Phase::Active);
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[test]
fn score_grows_by_reported_increments() {
    let mut rc = RoundController::new(&make_settings());
    let mut field = make_field();
    assert_eq!(rc.apply(report(2, false), &mut field), RoundOutcome::Continue);
    assert_eq!(rc.apply(report(0, false), &mut field), RoundOutcome::Continue);
    assert_eq!(rc.apply(report(1, false), &mut field), RoundOutcome::Continue);
    assert_eq!(rc.state.score, 3);
}

#[test]
fn score_counts_even_on_a_hit_tick() {
    let mut rc = RoundController::new(&make_settings());
    let mut field = make_field();
    rc.apply(report(2, true), &mut field);
    assert_eq!(rc.state.score, 2);
    assert_eq!(rc.state.lives_remaining, 2);
}

// ── Fleet cleared ─────────────────────────────────────────────────────────────

#[test]
fn cleared_fleet_respawns_and_advances_round() {
    let mut rc = RoundController::new(&make_settings());
    let mut field = make_field();
    field.fire(0);
    field.fleet.wipe();

    let outcome = rc.apply(report(1, false), &mut field);
    assert_eq!(outcome, RoundOutcome::RoundCleared { round: 2 });
    assert_eq!(rc.state.round_number, 2);
    assert_eq!(field.fleet.len(), 12);
    assert!(field.projectiles.is_empty());
    assert_eq!(rc.phase(), Phase::Active);
    assert_eq!(rc.state.lives_remaining, 3);
}

#[test]
fn live_fleet_does_not_advance_round() {
    let mut rc = RoundController::new(&make_settings());
    let mut field = make_field();
    field.fleet.enemies.truncate(1);
    rc.apply(report(0, false), &mut field);
    assert_eq!(rc.state.round_number, 1);
    assert_eq!(field.fleet.len(), 1);
}

// ── Ship hit ──────────────────────────────────────────────────────────────────

#[test]
fn ship_hit_with_lives_left_respawns_and_pauses() {
    let settings = make_settings();
    let mut rc = RoundController::new(&settings);
    let mut field = make_field();
    field.fire(0);
    field.fleet.enemies.truncate(2);
    field.ship.rect.x = 3.0;

    let outcome = rc.apply(report(0, true), &mut field);
    assert_eq!(outcome, RoundOutcome::ShipLost { lives_remaining: 2 });
    assert_eq!(rc.state.lives_remaining, 2);
    assert_eq!(
        rc.phase(),
        Phase::HitPause {
            ticks_left: settings.hit_pause_ticks()
        }
    );
    assert_eq!(field.fleet.len(), 12);
    assert!(field.projectiles.is_empty());
    assert_eq!(field.ship.rect, Rect::new(45.0, 90.0, 10.0, 10.0));
    // losing a ship is not a new round
    assert_eq!(rc.state.round_number, 1);
}

#[test]
fn hit_takes_precedence_over_empty_fleet() {
    let mut rc = RoundController::new(&make_settings());
    let mut field = make_field();
    field.fleet.wipe();
    let outcome = rc.apply(report(0, true), &mut field);
    assert_eq!(outcome, RoundOutcome::ShipLost { lives_remaining: 2 });
    assert_eq!(rc.state.round_number, 1);
}

#[test]
fn last_life_ends_the_game_without_clearing() {
    let settings = Settings {
        starting_lives: 1,
        ..make_settings()
    };
    let mut rc = RoundController::new(&settings);
    let mut field = Playfield::new(&settings, Bounds::new(100.0, 100.0));
    field.fire(0);
    field.fleet.enemies.truncate(5);

    let outcome = rc.apply(report(0, true), &mut field);
    assert_eq!(outcome, RoundOutcome::GameOver);
    assert_eq!(rc.state.lives_remaining, 0);
    assert_eq!(rc.phase(), Phase::GameOver);
    assert!(rc.is_game_over());
    assert_eq!(field.fleet.len(), 5);
    assert_eq!(field.projectiles.len(), 1);
}

#[test]
fn no_transitions_outside_active() {
    let settings = Settings {
        starting_lives: 1,
        ..make_settings()
    };
    let mut rc = RoundController::new(&settings);
    let mut field = Playfield::new(&settings, Bounds::new(100.0, 100.0));
    rc.apply(report(0, true), &mut field);

    field.fleet.wipe();
    assert_eq!(rc.apply(report(0, true), &mut field), RoundOutcome::Continue);
    assert_eq!(rc.state.lives_remaining, 0);
    assert_eq!(rc.state.round_number, 1);
    assert!(field.fleet.is_empty());
}

// ── Hit pause ─────────────────────────────────────────────────────────────────

#[test]
fn pause_counts_down_then_resumes() {
    let settings = make_settings(); // 0.5 s at 4 ticks/s → 2 ticks
    assert_eq!(settings.hit_pause_ticks(), 2);
    let mut rc = RoundController::new(&settings);
    let mut field = make_field();
    rc.apply(report(0, true), &mut field);

    assert!(!rc.tick_pause());
    assert_eq!(rc.phase(), Phase::HitPause { ticks_left: 1 });
    assert!(rc.tick_pause());
    assert_eq!(rc.phase(), Phase::Active);
    // nothing to count down once active
    assert!(!rc.tick_pause());
    assert_eq!(rc.phase(), Phase::Active);
}

#[test]
fn lives_run_out_across_successive_hits() {
    let mut rc = RoundController::new(&make_settings());
    let mut field = make_field();
    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(rc.apply(report(0, true), &mut field));
        while !rc.tick_pause() && !rc.is_game_over() {}
    }
    assert_eq!(
        seen,
        vec![
            RoundOutcome::ShipLost { lives_remaining: 2 },
            RoundOutcome::ShipLost { lives_remaining: 1 },
            RoundOutcome::GameOver,
        ]
    );
    assert_eq!(rc.state.lives_remaining, 0);
}
