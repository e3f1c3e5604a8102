//! Backend-agnostic player input.
//!
//! The game only ever sees these types; how they are produced (terminal
//! keys, a gamepad, a scripted test) is the caller's business.

/// One-shot commands that drive the screen state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Leave the menu, or restart after a game over.
    Start,
    /// Toggle between playing and paused.
    Pause,
    /// Back out to the menu.
    Cancel,
}

/// Continuous actions, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldActions {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

/// Everything the input source reports for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub held: HeldActions,
    /// Discrete presses in the order they arrived.
    pub pressed: Vec<Action>,
}

impl InputFrame {
    pub fn held(held: HeldActions) -> Self {
        InputFrame {
            held,
            pressed: Vec::new(),
        }
    }

    pub fn pressed(action: Action) -> Self {
        InputFrame {
            held: HeldActions::default(),
            pressed: vec![action],
        }
    }
}
