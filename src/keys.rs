//! Keyboard → `InputFrame` translation.
//!
//! `KeyTracker` remembers the frame each key was last reported on.  A key
//! counts as held while that frame is at most `HOLD_WINDOW` old, or until a
//! release arrives on terminals that report one.  Discrete actions fire on
//! the leading edge only: a press for a key that is already live is an OS
//! auto-repeat and refreshes the hold without queueing anything.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use alien_invasion::input::{Action, HeldActions, InputFrame};

/// 8 frames @ 60 FPS ≈ 133 ms, comfortably above a 15 Hz key repeat.
pub const HOLD_WINDOW: u64 = 8;

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const SHOOT_KEYS: &[KeyCode] = &[KeyCode::Char(' ')];

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    pressed: Vec<Action>,
    quit: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn handle(&mut self, event: KeyEvent, frame: u64) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = event;
        match kind {
            KeyEventKind::Press => {
                let ctrl_c = code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    self.quit = true;
                    return;
                }

                // A press for a key that is still live is OS auto-repeat.
                let repeat = self.is_live(&code, frame);
                self.key_frame.insert(code, frame);
                if repeat {
                    return;
                }
                match code {
                    KeyCode::Char(' ') => self.pressed.push(Action::Start),
                    KeyCode::Char('p') | KeyCode::Char('P') => self.pressed.push(Action::Pause),
                    KeyCode::Esc => self.pressed.push(Action::Cancel),
                    _ => {}
                }
            }
            // Refresh timestamp so the key stays "held"
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    fn is_live(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| self.is_live(key, frame))
    }

    /// Input for `frame`; drains the queued discrete presses.
    pub fn frame_input(&mut self, frame: u64) -> InputFrame {
        InputFrame {
            held: HeldActions {
                left: self.any_held(LEFT_KEYS, frame),
                right: self.any_held(RIGHT_KEYS, frame),
                shoot: self.any_held(SHOOT_KEYS, frame),
            },
            pressed: std::mem::take(&mut self.pressed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn press_is_held_within_window() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Left, KeyEventKind::Press), 10);
        assert!(t.frame_input(10).held.left);
        assert!(t.frame_input(10 + HOLD_WINDOW).held.left);
        assert!(!t.frame_input(11 + HOLD_WINDOW).held.left);
    }

    #[test]
    fn repeat_refreshes_hold() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char('d'), KeyEventKind::Press), 0);
        t.handle(key(KeyCode::Char('d'), KeyEventKind::Repeat), 20);
        assert!(t.frame_input(25).held.right);
    }

    #[test]
    fn release_drops_key_immediately() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char(' '), KeyEventKind::Press), 3);
        t.handle(key(KeyCode::Char(' '), KeyEventKind::Release), 3);
        assert!(!t.frame_input(3).held.shoot);
    }

    #[test]
    fn space_press_both_starts_and_shoots() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char(' '), KeyEventKind::Press), 1);
        let input = t.frame_input(1);
        assert_eq!(input.pressed, vec![Action::Start]);
        assert!(input.held.shoot);
    }

    #[test]
    fn discrete_presses_drain_once_in_order() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char('p'), KeyEventKind::Press), 1);
        t.handle(key(KeyCode::Esc, KeyEventKind::Press), 1);
        assert_eq!(t.frame_input(1).pressed, vec![Action::Pause, Action::Cancel]);
        assert!(t.frame_input(2).pressed.is_empty());
    }

    #[test]
    fn auto_repeated_press_queues_action_once() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char(' '), KeyEventKind::Press), 10);
        assert_eq!(t.frame_input(10).pressed, vec![Action::Start]);

        t.handle(key(KeyCode::Char(' '), KeyEventKind::Press), 12);
        let input = t.frame_input(12);
        assert!(input.pressed.is_empty());
        assert!(input.held.shoot);
    }

    #[test]
    fn holding_space_through_game_over_keeps_the_final_screen() {
        use alien_invasion::compute::{init_state, step, GameStatus};
        use alien_invasion::config::Viewport;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(1);
        let mut state = init_state(Viewport::new(800.0, 600.0), &mut rng);
        state.status = GameStatus::GameOver;
        state.score = 500;

        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char(' '), KeyEventKind::Press), 8);
        t.frame_input(8);
        t.handle(key(KeyCode::Char(' '), KeyEventKind::Press), 12);
        let next = step(&state, &t.frame_input(12), &mut rng);

        assert_eq!(next.status, GameStatus::GameOver);
        assert_eq!(next.score, 500);
    }

    #[test]
    fn press_after_release_or_silence_queues_again() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char('p'), KeyEventKind::Press), 1);
        t.handle(key(KeyCode::Char('p'), KeyEventKind::Release), 2);
        t.handle(key(KeyCode::Char('p'), KeyEventKind::Press), 3);
        assert_eq!(t.frame_input(3).pressed, vec![Action::Pause, Action::Pause]);

        t.handle(key(KeyCode::Char('p'), KeyEventKind::Press), 4 + HOLD_WINDOW);
        assert_eq!(t.frame_input(4 + HOLD_WINDOW).pressed, vec![Action::Pause]);
    }

    #[test]
    fn repeat_does_not_queue_actions() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char('p'), KeyEventKind::Repeat), 1);
        assert!(t.frame_input(1).pressed.is_empty());
    }

    #[test]
    fn quit_keys() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char('q'), KeyEventKind::Press), 1);
        assert!(t.quit_requested());

        let mut t = KeyTracker::new();
        t.handle(
            KeyEvent::new_with_kind(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyEventKind::Press,
            ),
            1,
        );
        assert!(t.quit_requested());
    }

    #[test]
    fn ctrl_c_quits_even_right_after_typing_c() {
        let mut t = KeyTracker::new();
        t.handle(key(KeyCode::Char('c'), KeyEventKind::Press), 1);
        t.handle(
            KeyEvent::new_with_kind(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyEventKind::Press,
            ),
            2,
        );
        assert!(t.quit_requested());
    }
}
