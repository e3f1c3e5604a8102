//! Abstract drawing.
//!
//! `render_frame` turns a `GameState` into a deterministic sequence of
//! primitives and hands each one to a [`Surface`].  No game logic is
//! performed here and nothing backend-specific is known; a surface decides
//! how a primitive actually ends up on screen.

use crate::collision::Rect;
use crate::compute::{GameState, GameStatus};
use crate::entities::{
    Alien, Player, PowerUp, Rgb, BLACK, CYAN, GREEN, RED, WHITE, YELLOW,
};

/// Frames per second the buff timers are expressed in.
pub const TICKS_PER_SECOND: u32 = 60;

const STAR_COUNT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Large,
    Small,
}

/// Which point of the text box `(x, y)` refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear(Rgb),
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    StrokeRect {
        rect: Rect,
        color: Rgb,
        thickness: f32,
    },
    FillPolygon {
        points: Vec<(f32, f32)>,
        color: Rgb,
    },
    FillCircle {
        center: (f32, f32),
        radius: f32,
        color: Rgb,
    },
    StrokeCircle {
        center: (f32, f32),
        radius: f32,
        color: Rgb,
        thickness: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        thickness: f32,
    },
    Text {
        pos: (f32, f32),
        text: String,
        color: Rgb,
        size: TextSize,
        anchor: Anchor,
    },
    /// Darken everything drawn so far by `alpha / 255` toward `color`.
    Overlay {
        color: Rgb,
        alpha: u8,
    },
}

/// Something primitives can be drawn onto.
pub trait Surface {
    fn draw(&mut self, cmd: DrawCmd);
}

/// A surface that just records what it was asked to draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DrawList {
    fn draw(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.draw(DrawCmd::Clear(BLACK));
    draw_stars(surface, state);

    match state.status {
        GameStatus::Menu => draw_menu(surface, state),
        GameStatus::Playing => draw_game(surface, state),
        GameStatus::Paused => {
            draw_game(surface, state);
            draw_paused(surface, state);
        }
        GameStatus::GameOver => {
            draw_game(surface, state);
            draw_game_over(surface, state);
        }
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Fixed pseudo-random starfield, identical every frame.
fn draw_stars<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let w = state.viewport.width.max(1.0) as u32;
    let h = state.viewport.height.max(1.0) as u32;
    for i in 0..STAR_COUNT {
        let x = (i * 123) % w;
        let y = (i * 456) % h;
        let b = (100 + (i * 17) % 156) as u8;
        surface.draw(DrawCmd::FillCircle {
            center: (x as f32, y as f32),
            radius: 1.0,
            color: Rgb(b, b, b),
        });
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_game<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    draw_player(surface, &state.player);

    for bullet in state.bullets.iter().chain(&state.alien_bullets) {
        surface.draw(DrawCmd::FillRect {
            rect: Rect::new(bullet.x, bullet.y, bullet.width, bullet.height),
            color: bullet.color,
        });
    }
    for alien in &state.aliens {
        draw_alien(surface, alien);
    }
    for powerup in &state.powerups {
        draw_powerup(surface, powerup);
    }
    for particle in state.particles.iter().filter(|p| p.is_alive()) {
        surface.draw(DrawCmd::FillCircle {
            center: (particle.x.trunc(), particle.y.trunc()),
            radius: particle.size.trunc(),
            color: particle.faded_color(),
        });
    }

    draw_hud(surface, state);
}

fn draw_player<S: Surface + ?Sized>(surface: &mut S, p: &Player) {
    if p.shield_active {
        surface.draw(DrawCmd::StrokeCircle {
            center: p.center(),
            radius: 35.0,
            color: CYAN,
            thickness: 3.0,
        });
    }

    // Ship body
    surface.draw(DrawCmd::FillPolygon {
        points: vec![
            (p.x + p.width / 2.0, p.y),
            (p.x, p.y + p.height),
            (p.x + p.width, p.y + p.height),
        ],
        color: GREEN,
    });

    // Engines
    for ex in [p.x + 8.0, p.x + p.width - 16.0] {
        surface.draw(DrawCmd::FillRect {
            rect: Rect::new(ex, p.y + p.height - 10.0, 8.0, 15.0),
            color: RED,
        });
    }
}

fn draw_alien<S: Surface + ?Sized>(surface: &mut S, a: &Alien) {
    let color = a.color();
    surface.draw(DrawCmd::FillRect {
        rect: Rect::new(a.x + 5.0, a.y + 5.0, a.width - 10.0, a.height - 10.0),
        color,
    });

    for ex in [a.x + 12.0, a.x + 23.0] {
        surface.draw(DrawCmd::FillCircle {
            center: (ex, a.y + 15.0),
            radius: 5.0,
            color: WHITE,
        });
        surface.draw(DrawCmd::FillCircle {
            center: (ex, a.y + 15.0),
            radius: 3.0,
            color: BLACK,
        });
    }

    // Antennae
    for (base, tip) in [(a.x + 10.0, a.x + 5.0), (a.x + 25.0, a.x + 30.0)] {
        surface.draw(DrawCmd::Line {
            from: (base, a.y + 5.0),
            to: (tip, a.y - 5.0),
            color,
            thickness: 2.0,
        });
    }
}

fn draw_powerup<S: Surface + ?Sized>(surface: &mut S, p: &PowerUp) {
    let rect = Rect::new(p.x, p.y, p.width, p.height);
    surface.draw(DrawCmd::FillRect {
        rect,
        color: p.kind.color(),
    });
    surface.draw(DrawCmd::StrokeRect {
        rect,
        color: WHITE,
        thickness: 2.0,
    });
    surface.draw(DrawCmd::Text {
        pos: (p.x + 8.0, p.y + 6.0),
        text: p.kind.icon().to_string(),
        color: WHITE,
        size: TextSize::Small,
        anchor: Anchor::TopLeft,
    });
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn small_text<S: Surface + ?Sized>(surface: &mut S, x: f32, y: f32, text: String, color: Rgb) {
    surface.draw(DrawCmd::Text {
        pos: (x, y),
        text,
        color,
        size: TextSize::Small,
        anchor: Anchor::TopLeft,
    });
}

fn draw_hud<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    small_text(surface, 10.0, 10.0, format!("Score: {}", state.score), WHITE);
    small_text(surface, 10.0, 40.0, format!("Level: {}", state.level), WHITE);

    // Health, one triangle per point, right-aligned
    let w = state.viewport.width;
    for i in 0..state.player.health {
        let off = i as f32 * 35.0;
        surface.draw(DrawCmd::FillPolygon {
            points: vec![
                (w - 40.0 - off, 20.0),
                (w - 50.0 - off, 35.0),
                (w - 30.0 - off, 35.0),
            ],
            color: RED,
        });
    }

    let mut y = 70.0;
    if state.player.shield_active {
        let secs = state.player.shield_timer / TICKS_PER_SECOND;
        small_text(surface, 10.0, y, format!("Shield: {secs}s"), CYAN);
        y += 25.0;
    }
    if state.player.rapid_fire {
        let secs = state.player.rapid_fire_timer / TICKS_PER_SECOND;
        small_text(surface, 10.0, y, format!("Rapid Fire: {secs}s"), YELLOW);
    }
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn centered<S: Surface + ?Sized>(
    surface: &mut S,
    y: f32,
    text: &str,
    color: Rgb,
    size: TextSize,
    state: &GameState,
) {
    surface.draw(DrawCmd::Text {
        pos: (state.viewport.width / 2.0, y),
        text: text.to_string(),
        color,
        size,
        anchor: Anchor::Center,
    });
}

const MENU_LINES: &[&str] = &[
    "Press SPACE to Start",
    "",
    "Controls:",
    "Arrow Keys / A,D - Move",
    "SPACE - Shoot",
    "P - Pause",
    "ESC - Menu",
    "",
    "Power-ups:",
    "H - Extra Health",
    "S - Shield",
    "R - Rapid Fire",
];

fn draw_menu<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let h = state.viewport.height;
    centered(surface, h / 3.0, "ALIEN INVASION", GREEN, TextSize::Large, state);

    if state.high_score > 0 {
        let best = format!("High Score: {}", state.high_score);
        centered(surface, h / 3.0 + 40.0, &best, YELLOW, TextSize::Small, state);
    }

    let mut y = h / 2.0;
    for line in MENU_LINES {
        if !line.is_empty() {
            centered(surface, y, line, WHITE, TextSize::Small, state);
        }
        y += 30.0;
    }
}

fn draw_paused<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let h = state.viewport.height;
    surface.draw(DrawCmd::Overlay {
        color: BLACK,
        alpha: 128,
    });
    centered(surface, h / 2.0, "PAUSED", YELLOW, TextSize::Large, state);
    centered(surface, h / 2.0 + 50.0, "Press P to Resume", WHITE, TextSize::Small, state);
}

fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let h = state.viewport.height / 2.0;
    surface.draw(DrawCmd::Overlay {
        color: BLACK,
        alpha: 180,
    });

    let score = format!("Final Score: {}", state.score);
    let level = format!("Reached Level: {}", state.level);
    let lines: [(f32, &str, Rgb, TextSize); 5] = [
        (h - 50.0, "GAME OVER", RED, TextSize::Large),
        (h, &score, WHITE, TextSize::Small),
        (h + 30.0, &level, WHITE, TextSize::Small),
        (h + 80.0, "Press SPACE to Restart", GREEN, TextSize::Small),
        (h + 110.0, "Press ESC for Menu", WHITE, TextSize::Small),
    ];
    for (y, text, color, size) in lines {
        centered(surface, y, text, color, size, state);
    }
}
