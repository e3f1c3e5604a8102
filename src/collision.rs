//! Axis-aligned bounding-box collisions and their consequences.
//!
//! Each pass scans the current lists, records which indices were consumed,
//! and filters them out afterwards, so nothing is removed mid-iteration.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::compute::GameState;
use crate::entities::{
    explosion, Alien, Bullet, Particle, Player, PowerUp, PowerUpKind, RED,
};

/// Particles per explosion.
pub const EXPLOSION_PARTICLES: usize = 20;
/// Chance that a destroyed alien leaves a power-up behind.
pub const POWERUP_DROP_CHANCE: f64 = 0.15;

// ── Geometry ──────────────────────────────────────────────────────────────────

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

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Anything with a collision box.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

macro_rules! impl_bounded {
    ($($ty:ty),*) => {
        $(impl Bounded for $ty {
            fn bounds(&self) -> Rect {
                Rect::new(self.x, self.y, self.width, self.height)
            }
        })*
    };
}

impl_bounded!(Player, Bullet, Alien, PowerUp);

pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}

// ── Passes ────────────────────────────────────────────────────────────────────

/// Run all three collision passes for one frame.
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl Rng) {
    player_bullets_vs_aliens(state, rng);
    alien_bullets_vs_player(state, rng);
    powerups_vs_player(state);
}

/// Each player bullet destroys at most one alien: the first it overlaps.
/// Returns the number of aliens destroyed.
pub fn player_bullets_vs_aliens(state: &mut GameState, rng: &mut impl Rng) -> usize {
    let mut hits: Vec<(usize, usize)> = Vec::new();
    let mut killed = vec![false; state.aliens.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let target = state
            .aliens
            .iter()
            .enumerate()
            .find(|(ai, alien)| !killed[*ai] && collides(bullet, *alien));
        if let Some((ai, _)) = target {
            killed[ai] = true;
            hits.push((bi, ai));
        }
    }

    if hits.is_empty() {
        return 0;
    }

    for &(_, ai) in &hits {
        let alien = &state.aliens[ai];
        state.score += alien.points();

        let (cx, cy) = alien.center();
        state
            .particles
            .extend(explosion(cx, cy, alien.color(), EXPLOSION_PARTICLES, rng));

        if rng.gen::<f64>() < POWERUP_DROP_CHANCE {
            let kind = *PowerUpKind::ALL
                .choose(rng)
                .unwrap_or(&PowerUpKind::Health);
            state.powerups.push(PowerUp::new(alien.x, alien.y, kind));
        }
    }

    let used: Vec<usize> = hits.iter().map(|&(bi, _)| bi).collect();
    state.bullets = retain_unused(&state.bullets, &used);
    state.aliens = state
        .aliens
        .iter()
        .zip(&killed)
        .filter(|(_, dead)| !**dead)
        .map(|(a, _)| a.clone())
        .collect();

    hits.len()
}

/// Every overlapping alien bullet is consumed; only an unshielded player
/// takes damage.
pub fn alien_bullets_vs_player(state: &mut GameState, rng: &mut impl Rng) {
    let used: Vec<usize> = state
        .alien_bullets
        .iter()
        .enumerate()
        .filter(|(_, b)| collides(*b, &state.player))
        .map(|(i, _)| i)
        .collect();

    for _ in &used {
        if state.player.shield_active {
            continue;
        }
        state.player.take_hit();
        let (cx, cy) = state.player.center();
        let burst: Vec<Particle> = explosion(cx, cy, RED, EXPLOSION_PARTICLES, rng);
        state.particles.extend(burst);
        tracing::debug!(health = state.player.health, "player hit");
    }

    state.alien_bullets = retain_unused(&state.alien_bullets, &used);
}

pub fn powerups_vs_player(state: &mut GameState) {
    let (taken, kept): (Vec<PowerUp>, Vec<PowerUp>) = state
        .powerups
        .iter()
        .cloned()
        .partition(|p| collides(p, &state.player));

    for powerup in &taken {
        apply_powerup(&mut state.player, powerup.kind);
    }
    state.powerups = kept;
}

pub fn apply_powerup(player: &mut Player, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Health => player.heal(),
        PowerUpKind::Shield => player.grant_shield(),
        PowerUpKind::RapidFire => player.grant_rapid_fire(),
    }
    tracing::debug!(?kind, "power-up collected");
}

fn retain_unused<T: Clone>(items: &[T], used: &[usize]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| !used.contains(i))
        .map(|(_, item)| item.clone())
        .collect()
}
