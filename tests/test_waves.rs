use alien_invasion::compute::{init_state, GameState, GameStatus};
use alien_invasion::config::Viewport;
use alien_invasion::entities::*;
use alien_invasion::waves::*;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Every draw is the bottom of its range: reloaded aliens always fire.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn make_state() -> GameState {
    let mut s = init_state(viewport(), &mut seeded_rng());
    s.status = GameStatus::Playing;
    s
}

fn alien_at(x: f32, y: f32, cooldown: u32) -> Alien {
    Alien {
        x,
        y,
        width: ALIEN_WIDTH,
        height: ALIEN_HEIGHT,
        kind: AlienKind::Scout,
        shoot_cooldown: cooldown,
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[test]
fn grid_grows_with_level() {
    assert_eq!(grid_dimensions(1), (3, 6));
    assert_eq!(grid_dimensions(2), (4, 6));
    assert_eq!(grid_dimensions(3), (4, 7));
    assert_eq!(grid_dimensions(6), (6, 8));
}

#[test]
fn level_one_grid_is_centred_with_row_tiers() {
    let aliens = spawn_aliens(1, &viewport(), &mut seeded_rng());
    assert_eq!(aliens.len(), 18);

    // (800 - 6 * 60) / 2 = 220
    assert_eq!((aliens[0].x, aliens[0].y), (220.0, 50.0));
    assert_eq!((aliens[5].x, aliens[5].y), (520.0, 50.0));
    assert_eq!((aliens[6].x, aliens[6].y), (220.0, 110.0));
    assert_eq!((aliens[17].x, aliens[17].y), (520.0, 170.0));

    assert!(aliens[..6].iter().all(|a| a.kind == AlienKind::Scout));
    assert!(aliens[6..12].iter().all(|a| a.kind == AlienKind::Warrior));
    assert!(aliens[12..].iter().all(|a| a.kind == AlienKind::Elite));
}

#[test]
fn fourth_row_wraps_back_to_first_tier() {
    let aliens = spawn_aliens(2, &viewport(), &mut seeded_rng());
    assert_eq!(aliens.len(), 24);
    assert_eq!(aliens[18].kind, AlienKind::Scout);
    assert_eq!(aliens[18].y, 230.0);
}

#[test]
fn odd_width_start_is_floored() {
    let aliens = spawn_aliens(1, &Viewport::new(801.0, 600.0), &mut seeded_rng());
    assert_eq!(aliens[0].x, 220.0);
}

// ── Flock motion ──────────────────────────────────────────────────────────────

#[test]
fn flock_moves_together_without_dropping() {
    let mut aliens = vec![alien_at(100.0, 50.0, 500), alien_at(160.0, 50.0, 500)];
    let mut flock = Flock {
        direction: 1.0,
        speed: 2.0,
    };
    let fired = step_flock(&mut aliens, &mut flock, &viewport(), &mut seeded_rng());

    assert!(fired.is_empty());
    assert_eq!(aliens[0].x, 102.0);
    assert_eq!(aliens[1].x, 162.0);
    assert!(aliens.iter().all(|a| a.y == 50.0));
    assert_eq!(flock.direction, 1.0);
}

#[test]
fn right_edge_flips_and_drops_once() {
    // 800 - 35 = 765 is the right edge
    let mut aliens = vec![
        alien_at(500.0, 50.0, 500),
        alien_at(764.5, 50.0, 500),
        alien_at(770.0, 110.0, 500),
    ];
    let mut flock = Flock::default();
    step_flock(&mut aliens, &mut flock, &viewport(), &mut seeded_rng());

    assert_eq!(flock.direction, -1.0);
    assert_eq!(aliens[0].y, 70.0);
    assert_eq!(aliens[1].y, 70.0);
    assert_eq!(aliens[2].y, 130.0);
    assert_eq!(aliens[0].x, 501.0);
}

#[test]
fn left_edge_flips_back_right() {
    let mut aliens = vec![alien_at(0.5, 50.0, 500)];
    let mut flock = Flock {
        direction: -1.0,
        speed: 1.0,
    };
    step_flock(&mut aliens, &mut flock, &viewport(), &mut seeded_rng());
    assert_eq!(flock.direction, 1.0);
    assert_eq!(aliens[0].y, 70.0);
}

#[test]
fn reloaded_aliens_fire_from_their_new_position() {
    let mut aliens = vec![alien_at(100.0, 50.0, 0), alien_at(200.0, 50.0, 500)];
    let mut flock = Flock::default();
    let fired = step_flock(&mut aliens, &mut flock, &viewport(), &mut ZeroRng);

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].x, 118.0);
    assert_eq!(fired[0].y, 50.0 + ALIEN_HEIGHT);
    assert!(fired[0].speed > 0.0);
    assert_eq!(aliens[0].shoot_cooldown, 60);
}

#[test]
fn bounce_repeats_across_frames() {
    let mut aliens = spawn_aliens(1, &viewport(), &mut seeded_rng());
    for a in &mut aliens {
        a.shoot_cooldown = 10_000;
    }
    let mut flock = Flock::default();
    let mut drops = 0;
    let mut last_y = aliens[0].y;
    for _ in 0..3000 {
        step_flock(&mut aliens, &mut flock, &viewport(), &mut seeded_rng());
        if aliens[0].y != last_y {
            assert_eq!(aliens[0].y - last_y, DROP_STEP);
            drops += 1;
            last_y = aliens[0].y;
        }
        assert!(aliens.iter().all(|a| a.x > -2.0 && a.x < 800.0 - 33.0));
    }
    assert!(drops >= 4, "drops = {drops}");
}

// ── Progression ───────────────────────────────────────────────────────────────

#[test]
fn no_advance_while_aliens_remain() {
    let mut s = make_state();
    let before = s.clone();
    assert!(!advance_wave(&mut s, &mut seeded_rng()));
    assert_eq!(s, before);
}

#[test]
fn clearing_the_grid_advances_exactly_once() {
    let mut s = make_state();
    s.aliens.clear();
    let speed = s.flock.speed;

    assert!(advance_wave(&mut s, &mut seeded_rng()));
    assert_eq!(s.level, 2);
    assert_eq!(s.wave, 2);
    assert!((s.flock.speed - (speed + 0.3)).abs() < 1e-6);
    assert_eq!(s.aliens.len(), 4 * 6);

    assert!(!advance_wave(&mut s, &mut seeded_rng()));
    assert_eq!(s.level, 2);
}

#[test]
fn speed_keeps_climbing() {
    let mut s = make_state();
    for _ in 0..10 {
        s.aliens.clear();
        advance_wave(&mut s, &mut seeded_rng());
    }
    assert_eq!(s.level, 11);
    assert!((s.flock.speed - 4.0).abs() < 1e-4);
    let (rows, cols) = grid_dimensions(11);
    assert_eq!(s.aliens.len(), rows * cols);
}

// ── Loss condition ────────────────────────────────────────────────────────────

#[test]
fn alien_reaching_player_row_loses_anywhere_horizontally() {
    let mut s = make_state();
    s.aliens = vec![alien_at(10.0, s.player.y - ALIEN_HEIGHT, 500)];
    assert!(loss_reached(&s));

    s.aliens[0].y -= 0.5;
    assert!(!loss_reached(&s));
}

#[test]
fn zero_health_loses() {
    let mut s = make_state();
    assert!(!loss_reached(&s));
    s.player.health = 0;
    assert!(loss_reached(&s));
}
