use alien_invasion::compute::{init_state, GameState, GameStatus};
use alien_invasion::config::Viewport;
use alien_invasion::entities::*;
use alien_invasion::render::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state(status: GameStatus) -> GameState {
    let mut s = init_state(Viewport::new(800.0, 600.0), &mut StdRng::seed_from_u64(3));
    s.status = status;
    s
}

fn render(state: &GameState) -> DrawList {
    let mut list = DrawList::new();
    render_frame(&mut list, state);
    list
}

fn count(list: &DrawList, pred: impl Fn(&DrawCmd) -> bool) -> usize {
    list.commands.iter().filter(|c| pred(*c)).count()
}

#[test]
fn every_frame_starts_with_a_black_clear() {
    for status in [
        GameStatus::Menu,
        GameStatus::Playing,
        GameStatus::Paused,
        GameStatus::GameOver,
    ] {
        let list = render(&make_state(status));
        assert_eq!(list.commands[0], DrawCmd::Clear(BLACK));
    }
}

#[test]
fn menu_shows_title_and_controls_only() {
    let list = render(&make_state(GameStatus::Menu));
    let texts = list.texts();

    assert_eq!(texts[0], "ALIEN INVASION");
    assert!(texts.contains(&"Press SPACE to Start"));
    assert!(texts.contains(&"R - Rapid Fire"));
    assert!(!texts.iter().any(|t| t.starts_with("Score:")));
    assert!(!texts.iter().any(|t| t.starts_with("High Score")));

    // Only the starfield: no entities on the menu.
    let circles = count(&list, |c| matches!(c, DrawCmd::FillCircle { .. }));
    assert_eq!(circles, 100);
    assert_eq!(count(&list, |c| matches!(c, DrawCmd::FillPolygon { .. })), 0);
}

#[test]
fn menu_shows_high_score_once_set() {
    let mut s = make_state(GameStatus::Menu);
    s.high_score = 450;
    let list = render(&s);
    assert_eq!(list.texts()[1], "High Score: 450");
}

#[test]
fn playing_frame_has_hud_and_ship() {
    let list = render(&make_state(GameStatus::Playing));
    let texts = list.texts();

    assert_eq!(texts, vec!["Score: 0", "Level: 1"]);
    // ship body plus three health pips
    assert_eq!(count(&list, |c| matches!(c, DrawCmd::FillPolygon { .. })), 4);
    assert_eq!(count(&list, |c| matches!(c, DrawCmd::Overlay { .. })), 0);
    // two antennae per alien
    assert_eq!(count(&list, |c| matches!(c, DrawCmd::Line { .. })), 36);
}

#[test]
fn health_pips_follow_health() {
    let mut s = make_state(GameStatus::Playing);
    s.player.health = 1;
    let list = render(&s);
    assert_eq!(count(&list, |c| matches!(c, DrawCmd::FillPolygon { .. })), 2);
}

#[test]
fn shield_draws_ring_and_countdown() {
    let mut s = make_state(GameStatus::Playing);
    s.player.shield_active = true;
    s.player.shield_timer = 299;
    let list = render(&s);

    assert!(list.commands.iter().any(|c| matches!(
        c,
        DrawCmd::StrokeCircle { radius, color, .. } if *radius == 35.0 && *color == CYAN
    )));
    assert!(list.texts().contains(&"Shield: 4s"));
}

#[test]
fn rapid_fire_countdown_shown() {
    let mut s = make_state(GameStatus::Playing);
    s.player.rapid_fire = true;
    s.player.rapid_fire_timer = 120;
    assert!(render(&s).texts().contains(&"Rapid Fire: 2s"));
}

#[test]
fn powerup_draws_its_icon() {
    let mut s = make_state(GameStatus::Playing);
    s.powerups.push(PowerUp::new(100.0, 100.0, PowerUpKind::RapidFire));
    let list = render(&s);
    assert!(list.texts().contains(&"R"));
    assert!(list.commands.iter().any(|c| matches!(
        c,
        DrawCmd::StrokeRect { color, .. } if *color == WHITE
    )));
}

#[test]
fn paused_dims_the_game() {
    let list = render(&make_state(GameStatus::Paused));
    assert!(list.commands.contains(&DrawCmd::Overlay {
        color: BLACK,
        alpha: 128,
    }));
    let texts = list.texts();
    assert!(texts.contains(&"Score: 0"));
    assert!(texts.contains(&"PAUSED"));
    assert!(texts.contains(&"Press P to Resume"));
}

#[test]
fn game_over_reports_final_score_and_level() {
    let mut s = make_state(GameStatus::GameOver);
    s.score = 270;
    s.level = 3;
    let list = render(&s);

    assert!(list.commands.contains(&DrawCmd::Overlay {
        color: BLACK,
        alpha: 180,
    }));
    let texts = list.texts();
    let tail = &texts[texts.len() - 5..];
    assert_eq!(
        tail,
        [
            "GAME OVER",
            "Final Score: 270",
            "Reached Level: 3",
            "Press SPACE to Restart",
            "Press ESC for Menu",
        ]
    );
}

#[test]
fn rendering_is_deterministic() {
    let mut s = make_state(GameStatus::Playing);
    s.particles = explosion(200.0, 200.0, RED, 20, &mut StdRng::seed_from_u64(5));
    assert_eq!(render(&s), render(&s));
}
