use crate::physical::{InputState, PhysicalInputId};
use winit::keyboard::KeyCode;
use flecs_ecs::prelude::*;
use lumen_core::App;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ActionId(pub u32);

#[derive(Clone, Debug)]
pub struct InputBinding {
    pub physical: PhysicalInputId,
    pub action: ActionId,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ButtonPhase: u8 {
        const NONE     = 0;
        const PRESSED  = 1 << 0;
        const HELD     = 1 << 1;
        const RELEASED = 1 << 2;
    }
}

#[derive(Clone, Debug)]
pub struct ActionState {
    pub phase: ButtonPhase,
}

#[derive(Component, Default, Clone, Debug)]
pub struct InputMap {
    pub bindings: Vec<InputBinding>,
}

impl InputMap {
    pub fn bind_keyboard_button(&mut self, key_code: KeyCode, action: ActionId) -> &mut Self {
        self.bindings.push(InputBinding {
            physical: PhysicalInputId::keyboard(key_code),
            action,
        });

        self
    }

    /// Turns the physical button snapshot into per-action phases for this frame.
    pub fn apply(&self, input_state: &mut InputState) {
        // Reset logical state
        for action in input_state.actions.values_mut() {
            let was_held = action.phase.contains(ButtonPhase::HELD);
            action.phase = if was_held {
                ButtonPhase::HELD
            } else {
                ButtonPhase::NONE
            };
        }

        // Apply bindings
        for binding in &self.bindings {
            let down = input_state.is_button_down(binding.physical);
            let tapped = input_state.latched_presses.contains(&binding.physical);

            let entry = input_state
                .actions
                .entry(binding.action)
                .or_insert(ActionState {
                    phase: ButtonPhase::NONE,
                });

            let was_held = entry.phase.contains(ButtonPhase::HELD);
            if tapped && !was_held {
                entry.phase |= ButtonPhase::PRESSED;
            }

            if down {
                entry.phase |= ButtonPhase::HELD;
            } else if was_held || tapped {
                entry.phase &= !ButtonPhase::HELD;
                entry.phase |= ButtonPhase::RELEASED;
            }
        }

        input_state.latched_presses.clear();
    }
}

impl InputState {
    pub fn phase(&self, action: ActionId) -> ButtonPhase {
        self.actions
            .get(&action)
            .map(|a| a.phase)
            .unwrap_or(ButtonPhase::NONE)
    }

    pub fn just_pressed(&self, action: ActionId) -> bool {
        self.phase(action).contains(ButtonPhase::PRESSED)
    }

    pub fn is_held(&self, action: ActionId) -> bool {
        self.phase(action).contains(ButtonPhase::HELD)
    }

    pub fn just_released(&self, action: ActionId) -> bool {
        self.phase(action).contains(ButtonPhase::RELEASED)
    }
}

pub fn register_sys_input_map(app: &App) {
    app.world
        .system_named::<(&InputMap, &mut InputState)>("sys_input_map")
        .kind(flecs::pipeline::PreUpdate)
        .each(|(input_map, input_state)| {
            input_map.apply(input_state);
        });
}
