//! Alien formation: grid spawning, flock motion and wave progression.

use rand::Rng;

use crate::compute::GameState;
use crate::config::Viewport;
use crate::entities::{Alien, AlienKind, Bullet};

pub const GRID_SPACING: f32 = 60.0;
pub const GRID_TOP: f32 = 50.0;
/// How far the whole formation drops each time it bounces off an edge.
pub const DROP_STEP: f32 = 20.0;
pub const INITIAL_ALIEN_SPEED: f32 = 1.0;
/// Added to the flock speed each time a wave is cleared.
pub const SPEED_STEP: f32 = 0.3;

/// Motion shared by every alien in the formation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flock {
    /// +1 moving right, −1 moving left.
    pub direction: f32,
    pub speed: f32,
}

impl Default for Flock {
    fn default() -> Self {
        Flock {
            direction: 1.0,
            speed: INITIAL_ALIEN_SPEED,
        }
    }
}

/// `(rows, columns)` of the grid for `level`.
pub fn grid_dimensions(level: u32) -> (usize, usize) {
    (3 + (level / 2) as usize, 6 + (level / 3) as usize)
}

/// Build a horizontally centred grid.  The alien tier cycles by row.
pub fn spawn_aliens(level: u32, viewport: &Viewport, rng: &mut impl Rng) -> Vec<Alien> {
    let (rows, cols) = grid_dimensions(level);
    let start_x = ((viewport.width - cols as f32 * GRID_SPACING) / 2.0).floor();

    let mut aliens = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            aliens.push(Alien::new(
                start_x + col as f32 * GRID_SPACING,
                GRID_TOP + row as f32 * GRID_SPACING,
                AlienKind::from_index(row),
                rng,
            ));
        }
    }
    aliens
}

/// True when the alien touches (or has crossed) either side of the viewport.
pub fn at_edge(alien: &Alien, viewport: &Viewport) -> bool {
    alien.x <= 0.0 || alien.x >= viewport.width - alien.width
}

/// Advance the formation by one frame and return any bullets it fired.
///
/// Every alien moves first and may shoot from its new position.  If any of
/// them touched an edge the flock reverses and the whole grid drops one step,
/// once per frame no matter how many aliens were at the edge.
pub fn step_flock(
    aliens: &mut [Alien],
    flock: &mut Flock,
    viewport: &Viewport,
    rng: &mut impl Rng,
) -> Vec<Bullet> {
    let mut fired = Vec::new();
    let mut edge_reached = false;

    for alien in aliens.iter_mut() {
        alien.update(flock.direction, flock.speed);
        if at_edge(alien, viewport) {
            edge_reached = true;
        }
        if alien.can_shoot(rng) {
            fired.push(alien.shoot(rng));
        }
    }

    if edge_reached {
        flock.direction = -flock.direction;
        for alien in aliens.iter_mut() {
            alien.y += DROP_STEP;
        }
    }

    fired
}

/// Start the next wave if the current one is cleared.  Returns whether it did.
pub fn advance_wave(state: &mut GameState, rng: &mut impl Rng) -> bool {
    if !state.aliens.is_empty() {
        return false;
    }
    state.level += 1;
    state.wave += 1;
    state.flock.speed += SPEED_STEP;
    state.aliens = spawn_aliens(state.level, &state.viewport, rng);
    tracing::info!(
        level = state.level,
        wave = state.wave,
        speed = state.flock.speed,
        aliens = state.aliens.len(),
        "wave cleared"
    );
    true
}

/// The session is lost once any alien's bottom edge reaches the player's top
/// edge, or the player is out of health.  Horizontal position is ignored.
pub fn loss_reached(state: &GameState) -> bool {
    state.player.health == 0
        || state
            .aliens
            .iter()
            .any(|alien| alien.bottom() >= state.player.y)
}
