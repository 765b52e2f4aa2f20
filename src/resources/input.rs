//! Logical game actions.
//!
//! A [`GameAction`] is a named, press-accumulating action (move left, jump,
//! pause...). The host maps physical keys onto actions and calls
//! [`GameAction::press`] / [`GameAction::release`]; systems read them through
//! [`GameAction::amount`] and [`GameAction::is_pressed`]. Actions created with
//! [`ActionBehavior::InitialPressOnly`] report a press once and then stay
//! silent until released, which is what toggles like pause need.
use bevy_ecs::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionBehavior {
    /// Reports the press for as long as it is held.
    #[default]
    Normal,
    /// Reports the first read after a press only.
    InitialPressOnly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ActionState {
    #[default]
    Released,
    Pressed,
    WaitingForRelease,
}

#[derive(Clone, Debug)]
pub struct GameAction {
    name: &'static str,
    behavior: ActionBehavior,
    amount: i32,
    state: ActionState,
}

impl GameAction {
    pub fn new(name: &'static str, behavior: ActionBehavior) -> Self {
        Self {
            name,
            behavior,
            amount: 0,
            state: ActionState::Released,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Record a press of `amount` (key repeats accumulate).
    pub fn press(&mut self, amount: i32) {
        if self.state != ActionState::WaitingForRelease {
            self.amount += amount;
            self.state = ActionState::Pressed;
        }
    }

    pub fn release(&mut self) {
        self.state = ActionState::Released;
    }

    /// Press and release in one go.
    pub fn tap(&mut self) {
        self.press(1);
        self.release();
    }

    pub fn reset(&mut self) {
        self.state = ActionState::Released;
        self.amount = 0;
    }

    /// Read and consume the accumulated press amount.
    ///
    /// Released actions clear after the read; initial-press-only actions
    /// clear and wait for a release.
    pub fn amount(&mut self) -> i32 {
        let amount = self.amount;
        if amount != 0 {
            if self.state == ActionState::Released {
                self.amount = 0;
            } else if self.behavior == ActionBehavior::InitialPressOnly {
                self.state = ActionState::WaitingForRelease;
                self.amount = 0;
            }
        }
        amount
    }

    pub fn is_pressed(&mut self) -> bool {
        self.amount() != 0
    }
}

/// Every action the game reads each frame.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_left: GameAction,
    pub move_right: GameAction,
    pub jump: GameAction,
    pub attack: GameAction,
    pub pause: GameAction,
    pub exit: GameAction,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: GameAction::new("moveLeft", ActionBehavior::Normal),
            move_right: GameAction::new("moveRight", ActionBehavior::Normal),
            jump: GameAction::new("jump", ActionBehavior::Normal),
            attack: GameAction::new("attack", ActionBehavior::InitialPressOnly),
            pause: GameAction::new("pause", ActionBehavior::InitialPressOnly),
            exit: GameAction::new("exit", ActionBehavior::InitialPressOnly),
        }
    }
}

impl InputState {
    /// Clear every action (level change, unpause).
    pub fn reset_all(&mut self) {
        for action in [
            &mut self.move_left,
            &mut self.move_right,
            &mut self.jump,
            &mut self.attack,
            &mut self.pause,
            &mut self.exit,
        ] {
            action.reset();
        }
    }
}
