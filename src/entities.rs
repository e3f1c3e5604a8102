//! Game entity types and their per-frame behaviour.
//!
//! Every entity is plain data plus an `update` that only touches its own
//! fields.  Anything that needs randomness takes the RNG as a parameter so
//! callers (and tests) decide where the numbers come from.

use rand::Rng;

// ── Colour palette ────────────────────────────────────────────────────────────

/// An opaque 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Brighten each channel by `amount`, saturating at 255.
    pub fn lighten(self, amount: u8) -> Rgb {
        Rgb(
            self.0.saturating_add(amount),
            self.1.saturating_add(amount),
            self.2.saturating_add(amount),
        )
    }
}

pub const BLACK: Rgb = Rgb(10, 10, 26);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GREEN: Rgb = Rgb(0, 255, 136);
pub const RED: Rgb = Rgb(255, 68, 68);
pub const BLUE: Rgb = Rgb(0, 136, 255);
pub const YELLOW: Rgb = Rgb(255, 220, 0);
pub const CYAN: Rgb = Rgb(0, 255, 255);
pub const PURPLE: Rgb = Rgb(200, 0, 255);

// ── Tuning ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
pub const PLAYER_SPEED: f32 = 6.0;
pub const PLAYER_MAX_HEALTH: u32 = 3;

/// Frames between shots without / with rapid fire.
pub const SHOOT_COOLDOWN: u32 = 15;
pub const RAPID_SHOOT_COOLDOWN: u32 = 5;

/// Length of a shield or rapid-fire buff, in frames (5 s at 60 Hz).
pub const BUFF_DURATION: u32 = 300;

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 15.0;
pub const PLAYER_BULLET_SPEED: f32 = 8.0;
pub const ALIEN_BULLET_SPEED: f32 = 5.0;
/// How far past the top/bottom edge a bullet may travel before it is dropped.
pub const BULLET_MARGIN: f32 = 20.0;

pub const ALIEN_WIDTH: f32 = 35.0;
pub const ALIEN_HEIGHT: f32 = 35.0;
/// Per-frame chance that an alien whose cooldown has expired opens fire.
pub const ALIEN_FIRE_CHANCE: f64 = 0.02;

pub const POWERUP_SIZE: f32 = 30.0;
pub const POWERUP_SPEED: f32 = 2.0;

pub const PARTICLE_LIFE: u32 = 30;
pub const PARTICLE_MAX_SPEED: f32 = 4.0;

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub shield_active: bool,
    pub shield_timer: u32,
    pub rapid_fire: bool,
    pub rapid_fire_timer: u32,
    /// Frames left before the next shot is allowed.
    pub shoot_cooldown: u32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            shield_active: false,
            shield_timer: 0,
            rapid_fire: false,
            rapid_fire_timer: 0,
            shoot_cooldown: 0,
        }
    }

    /// Move by `dx` steps (−1 left, +1 right), staying inside `[0, viewport_width − width]`.
    pub fn move_by(&mut self, dx: f32, viewport_width: f32) {
        let max_x = (viewport_width - self.width).max(0.0);
        self.x = (self.x + dx * self.speed).clamp(0.0, max_x);
    }

    /// Decay buff timers and the shot cooldown by one frame.
    ///
    /// A buff flag reads `true` on every update that finds time left on its
    /// timer, so it switches off on the first update after the timer hits 0.
    pub fn update(&mut self) {
        self.shield_active = self.shield_timer > 0;
        self.shield_timer = self.shield_timer.saturating_sub(1);

        self.rapid_fire = self.rapid_fire_timer > 0;
        self.rapid_fire_timer = self.rapid_fire_timer.saturating_sub(1);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Try to fire.  Returns `false` while the cooldown is still running.
    pub fn shoot(&mut self) -> bool {
        if self.shoot_cooldown > 0 {
            return false;
        }
        self.shoot_cooldown = if self.rapid_fire {
            RAPID_SHOOT_COOLDOWN
        } else {
            SHOOT_COOLDOWN
        };
        true
    }

    pub fn heal(&mut self) {
        self.health = (self.health + 1).min(self.max_health);
    }

    /// Lose one point of health.  Never goes below zero.
    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    /// Timers are reset, not extended.
    pub fn grant_shield(&mut self) {
        self.shield_timer = BUFF_DURATION;
    }

    pub fn grant_rapid_fire(&mut self) {
        self.rapid_fire_timer = BUFF_DURATION;
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity; negative travels up, positive travels down.
    pub speed: f32,
    pub color: Rgb,
    pub active: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32, speed: f32, color: Rgb) -> Self {
        Bullet {
            x,
            y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed,
            color,
            active: true,
        }
    }

    /// Upward shot leaving the centre of the player's nose.
    pub fn from_player(player: &Player) -> Self {
        Bullet::new(
            player.x + player.width / 2.0 - BULLET_WIDTH / 2.0,
            player.y,
            -PLAYER_BULLET_SPEED,
            YELLOW,
        )
    }

    /// Downward shot leaving the alien's bottom-centre.
    pub fn from_alien(alien: &Alien) -> Self {
        Bullet::new(
            alien.x + (alien.width / 2.0).floor(),
            alien.y + alien.height,
            ALIEN_BULLET_SPEED,
            RED,
        )
    }

    pub fn update(&mut self, viewport_height: f32) {
        self.y += self.speed;
        if self.y < -BULLET_MARGIN || self.y > viewport_height + BULLET_MARGIN {
            self.active = false;
        }
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

/// Alien tier.  Tiers cycle by grid row and set colour and score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienKind {
    Scout,
    Warrior,
    Elite,
}

impl AlienKind {
    pub fn from_index(index: usize) -> Self {
        match index % 3 {
            0 => AlienKind::Scout,
            1 => AlienKind::Warrior,
            _ => AlienKind::Elite,
        }
    }

    pub fn index(self) -> usize {
        match self {
            AlienKind::Scout => 0,
            AlienKind::Warrior => 1,
            AlienKind::Elite => 2,
        }
    }

    pub fn points(self) -> u32 {
        (self.index() as u32 + 1) * 10
    }

    pub fn color(self) -> Rgb {
        match self {
            AlienKind::Scout => RED,
            AlienKind::Warrior => PURPLE,
            AlienKind::Elite => BLUE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: AlienKind,
    pub shoot_cooldown: u32,
}

impl Alien {
    pub fn new(x: f32, y: f32, kind: AlienKind, rng: &mut impl Rng) -> Self {
        Alien {
            x,
            y,
            width: ALIEN_WIDTH,
            height: ALIEN_HEIGHT,
            kind,
            shoot_cooldown: rng.gen_range(0..120),
        }
    }

    /// Horizontal motion comes from the flock, not from the alien itself.
    pub fn update(&mut self, direction: f32, speed: f32) {
        self.x += direction * speed;
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// One independent roll per call once the cooldown has run out.
    pub fn can_shoot(&self, rng: &mut impl Rng) -> bool {
        self.shoot_cooldown == 0 && rng.gen::<f64>() < ALIEN_FIRE_CHANCE
    }

    /// Reload and hand back the bullet for the caller to track.
    pub fn shoot(&mut self, rng: &mut impl Rng) -> Bullet {
        self.shoot_cooldown = rng.gen_range(60..180);
        Bullet::from_alien(self)
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Instantly restores one point of health (up to the maximum).
    Health,
    /// Blocks alien bullets for `BUFF_DURATION` frames.
    Shield,
    /// Shortens the shot cooldown for `BUFF_DURATION` frames.
    RapidFire,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Health,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
    ];

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::Health => GREEN,
            PowerUpKind::Shield => CYAN,
            PowerUpKind::RapidFire => YELLOW,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PowerUpKind::Health => "H",
            PowerUpKind::Shield => "S",
            PowerUpKind::RapidFire => "R",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PowerUpKind,
    pub speed: f32,
    pub active: bool,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        PowerUp {
            x,
            y,
            width: POWERUP_SIZE,
            height: POWERUP_SIZE,
            kind,
            speed: POWERUP_SPEED,
            active: true,
        }
    }

    pub fn update(&mut self, viewport_height: f32) {
        self.y += self.speed;
        if self.y > viewport_height {
            self.active = false;
        }
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// Cosmetic explosion debris.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Frames remaining.
    pub life: u32,
    pub color: Rgb,
    pub size: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, color: Rgb, rng: &mut impl Rng) -> Self {
        let vx = rng.gen_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED);
        let vy = rng.gen_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED);
        let size = rng.gen_range(2..=5) as f32;
        Particle {
            x,
            y,
            vx,
            vy,
            life: PARTICLE_LIFE,
            color,
            size,
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life = self.life.saturating_sub(1);
        self.size = (self.size - 0.1).max(1.0);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Colour for the current frame: washed toward white while young.
    pub fn faded_color(&self) -> Rgb {
        let alpha = 255 * self.life / PARTICLE_LIFE;
        self.color.lighten((alpha / 3).min(255) as u8)
    }
}

/// A burst of `count` particles centred on `(x, y)`.
pub fn explosion(x: f32, y: f32, color: Rgb, count: usize, rng: &mut impl Rng) -> Vec<Particle> {
    (0..count).map(|_| Particle::new(x, y, color, rng)).collect()
}
