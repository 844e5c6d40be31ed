//! Per-button interaction handlers
//!
//! Each handler owns its own copy of the button index, so every button
//! dispatches to the press it was registered for.

use crate::core::{ButtonIndex, BUTTON_COUNT};
use crate::game::host::ModuleHost;
use crate::game::module::{PressOutcome, PuzzleModule};

pub type ButtonHandler = Box<dyn Fn(&mut PuzzleModule, &mut dyn ModuleHost) -> PressOutcome>;

pub struct ButtonBindings {
    handlers: Vec<ButtonHandler>,
}

impl ButtonBindings {
    /// One handler per button, each pressing its own index
    pub fn new() -> Self {
        let handlers = (0..BUTTON_COUNT)
            .map(|index| {
                Box::new(move |module: &mut PuzzleModule, host: &mut dyn ModuleHost| {
                    module.press(index, host)
                }) as ButtonHandler
            })
            .collect();
        ButtonBindings { handlers }
    }

    /// Number of bound buttons
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no buttons are bound
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler bound to `index`
    pub fn interact(
        &self,
        index: ButtonIndex,
        module: &mut PuzzleModule,
        host: &mut dyn ModuleHost,
    ) -> PressOutcome {
        match self.handlers.get(index) {
            Some(handler) => handler(module, host),
            None => PressOutcome::Ignored,
        }
    }
}

impl Default for ButtonBindings {
    fn default() -> Self {
        Self::new()
    }
}
