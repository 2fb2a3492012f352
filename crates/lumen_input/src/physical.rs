use flecs_ecs::prelude::*;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

use crate::logical::{ActionId, ActionState};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DeviceKind {
    /// Layout-independent key position, as reported by the window layer.
    Keyboard(KeyCode),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PhysicalInputId {
    pub device: DeviceKind,
}

impl PhysicalInputId {
    pub fn keyboard(key_code: KeyCode) -> Self {
        Self {
            device: DeviceKind::Keyboard(key_code),
        }
    }
}

#[derive(Component, Default, Debug)]
pub struct InputState {
    pub physical_buttons: HashMap<PhysicalInputId, bool>,
    // Buttons that went down since the last mapping pass, so a tap shorter
    // than one frame still produces a PRESSED phase.
    pub(crate) latched_presses: HashSet<PhysicalInputId>,

    pub actions: HashMap<ActionId, ActionState>,
}

impl InputState {
    /// Records a button transition coming from the window event loop.
    pub fn set_button(&mut self, id: PhysicalInputId, pressed: bool) {
        if pressed {
            self.latched_presses.insert(id);
        }
        self.physical_buttons.insert(id, pressed);
    }

    pub fn is_button_down(&self, id: PhysicalInputId) -> bool {
        self.physical_buttons.get(&id).copied().unwrap_or(false)
    }
}
