//! Game-state transitions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::collision::resolve_collisions;
use crate::config::Viewport;
use crate::entities::{Alien, Bullet, Particle, Player, PowerUp};
use crate::input::{Action, HeldActions, InputFrame};
use crate::waves::{advance_wave, loss_reached, spawn_aliens, step_flock, Flock};

/// Player spawn offset from the bottom of the viewport.
const PLAYER_BOTTOM_OFFSET: f32 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    Paused,
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One complete session snapshot.  Cloneable so transitions can return a
/// new copy without touching the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Player shots, travelling up.
    pub bullets: Vec<Bullet>,
    /// Alien shots, travelling down.
    pub alien_bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Best score seen in this process; survives resets, never persisted.
    pub high_score: u32,
    pub level: u32,
    pub wave: u32,
    pub flock: Flock,
    pub status: GameStatus,
    /// Frames simulated since the last reset.
    pub frame: u64,
    pub viewport: Viewport,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session sitting on the menu screen with the level-1 grid spawned.
pub fn init_state(viewport: Viewport, rng: &mut impl Rng) -> GameState {
    let player = Player::new(
        (viewport.width / 2.0).floor() - 20.0,
        viewport.height - PLAYER_BOTTOM_OFFSET,
    );
    GameState {
        player,
        bullets: Vec::new(),
        alien_bullets: Vec::new(),
        aliens: spawn_aliens(1, &viewport, rng),
        powerups: Vec::new(),
        particles: Vec::new(),
        score: 0,
        high_score: 0,
        level: 1,
        wave: 1,
        flock: Flock::default(),
        status: GameStatus::Menu,
        frame: 0,
        viewport,
    }
}

/// Full reset back to the menu, keeping only the viewport and high score.
pub fn reset(state: &GameState, rng: &mut impl Rng) -> GameState {
    GameState {
        high_score: state.high_score.max(state.score),
        ..init_state(state.viewport, rng)
    }
}

// ── Screen state machine ─────────────────────────────────────────────────────

fn with_status(state: &GameState, status: GameStatus) -> GameState {
    tracing::debug!(from = ?state.status, to = ?status, "status change");
    GameState {
        status,
        ..state.clone()
    }
}

/// Apply one discrete action.  Actions with no meaning in the current
/// status leave the state unchanged.
pub fn apply_action(state: &GameState, action: Action, rng: &mut impl Rng) -> GameState {
    use GameStatus::*;

    match (state.status, action) {
        (Menu, Action::Start) => with_status(state, Playing),
        (Playing, Action::Pause) => with_status(state, Paused),
        (Paused, Action::Pause) => with_status(state, Playing),
        (Playing, Action::Cancel) => with_status(state, Menu),
        (GameOver, Action::Cancel) => reset(state, rng),
        (GameOver, Action::Start) => with_status(&reset(state, rng), Playing),
        _ => state.clone(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.move_by(-1.0, state.viewport.width);
    GameState {
        player,
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.move_by(1.0, state.viewport.width);
    GameState {
        player,
        ..state.clone()
    }
}

/// Fire if the player's cooldown allows it; otherwise nothing changes.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    if !player.shoot() {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::from_player(&player));
    GameState {
        player,
        bullets,
        ..state.clone()
    }
}

/// Apply this frame's held actions.  Ignored outside of play.
pub fn apply_held(state: &GameState, held: HeldActions) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    if held.left {
        next = move_player_left(&next);
    }
    if held.right {
        next = move_player_right(&next);
    }
    if held.shoot {
        next = player_shoot(&next);
    }
    next
}

// ── Per-frame tick (RNG is injected) ───────────────────────────────────────

/// Advance the simulation by one frame.  Outside of `Playing` the snapshot
/// is frozen and returned as-is.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    let height = next.viewport.height;
    next.frame += 1;

    // ── 1. Player timers ─────────────────────────────────────────────────────
    next.player.update();

    // ── 2. Bullets ───────────────────────────────────────────────────────────
    for bullet in next.bullets.iter_mut().chain(next.alien_bullets.iter_mut()) {
        bullet.update(height);
    }
    next.bullets.retain(|b| b.active);
    next.alien_bullets.retain(|b| b.active);

    // ── 3. Alien formation ───────────────────────────────────────────────────
    let fired = step_flock(&mut next.aliens, &mut next.flock, &next.viewport, rng);
    next.alien_bullets.extend(fired);

    // ── 4. Power-ups & particles ─────────────────────────────────────────────
    for powerup in next.powerups.iter_mut() {
        powerup.update(height);
    }
    next.powerups.retain(|p| p.active);

    for particle in next.particles.iter_mut() {
        particle.update();
    }
    next.particles.retain(Particle::is_alive);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    resolve_collisions(&mut next, rng);
    next.high_score = next.high_score.max(next.score);

    // ── 6. Wave progression & loss ───────────────────────────────────────────
    advance_wave(&mut next, rng);

    if loss_reached(&next) {
        tracing::info!(
            score = next.score,
            level = next.level,
            wave = next.wave,
            "game over"
        );
        next.status = GameStatus::GameOver;
    }

    next
}

/// One whole frame: discrete actions in arrival order, then held actions,
/// then the simulation tick.
pub fn step(state: &GameState, input: &InputFrame, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    for &action in &input.pressed {
        next = apply_action(&next, action, rng);
    }
    next = apply_held(&next, input.held);
    tick(&next, rng)
}
