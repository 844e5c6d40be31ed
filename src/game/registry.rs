//! Module registry
//!
//! Owns every module on a bomb along with its button bindings, and hands out
//! module ids in registration order starting at 1.

use crate::command::parse_command;
use crate::core::ButtonIndex;
use crate::game::bindings::ButtonBindings;
use crate::game::host::ModuleHost;
use crate::game::module::{ModuleId, PressOutcome, PuzzleModule};
use crate::game::ModuleConfig;
use crate::loader::PhraseBook;
use crate::{Result, TalkError};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Duration;

struct Slot {
    module: PuzzleModule,
    bindings: ButtonBindings,
}

pub struct ModuleRegistry {
    next_id: u32,
    slots: FxHashMap<ModuleId, Slot>,
}

impl ModuleRegistry {
    /// Create an empty registry; ids start at 1
    pub fn new() -> Self {
        ModuleRegistry {
            next_id: 1,
            slots: FxHashMap::default(),
        }
    }

    /// Create a module and return its id
    pub fn register(&mut self, book: Arc<PhraseBook>, config: ModuleConfig) -> ModuleId {
        let id = ModuleId(self.next_id);
        self.next_id += 1;
        let slot = Slot {
            module: PuzzleModule::new(id, book, config),
            bindings: ButtonBindings::new(),
        };
        self.slots.insert(id, slot);
        id
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no modules are registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<ModuleId> {
        let mut ids: Vec<ModuleId> = self.slots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Look up a module by id
    pub fn get(&self, id: ModuleId) -> Result<&PuzzleModule> {
        self.slots
            .get(&id)
            .map(|slot| &slot.module)
            .ok_or(TalkError::UnknownModule(id.0))
    }

    /// Look up a module by id for mutation
    pub fn get_mut(&mut self, id: ModuleId) -> Result<&mut PuzzleModule> {
        self.slots
            .get_mut(&id)
            .map(|slot| &mut slot.module)
            .ok_or(TalkError::UnknownModule(id.0))
    }

    /// Activate every idle module
    pub fn activate_all(&mut self, host: &mut dyn ModuleHost) {
        for id in self.ids() {
            if let Some(slot) = self.slots.get_mut(&id) {
                slot.module.activate(host);
            }
        }
    }

    /// Dispatch a button interaction through the module's bindings
    pub fn interact(
        &mut self,
        id: ModuleId,
        index: ButtonIndex,
        host: &mut dyn ModuleHost,
    ) -> Result<PressOutcome> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(TalkError::UnknownModule(id.0))?;
        Ok(slot.bindings.interact(index, &mut slot.module, host))
    }

    /// Parse a text command for a module and press the buttons it names
    ///
    /// Stops after the first press that strikes or solves the module. A module
    /// without a round (not yet activated) presses nothing.
    pub fn run_command(
        &mut self,
        id: ModuleId,
        input: &str,
        host: &mut dyn ModuleHost,
    ) -> Result<Vec<PressOutcome>> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(TalkError::UnknownModule(id.0))?;
        let Some(panel) = slot.module.panel() else {
            return Ok(Vec::new());
        };
        let presses = parse_command(input, panel)?;

        let mut outcomes = Vec::with_capacity(presses.len());
        for index in presses {
            let outcome = slot.bindings.interact(index, &mut slot.module, host);
            outcomes.push(outcome);
            if matches!(outcome, PressOutcome::Strike | PressOutcome::Solved) {
                break;
            }
        }
        Ok(outcomes)
    }

    /// Advance every module's strike timer
    ///
    /// Returns the ids of modules that reset during this tick.
    pub fn tick(&mut self, elapsed: Duration, host: &mut dyn ModuleHost) -> Vec<ModuleId> {
        let mut reset = Vec::new();
        for id in self.ids() {
            if let Some(slot) = self.slots.get_mut(&id) {
                if slot.module.tick(elapsed, host) {
                    reset.push(id);
                }
            }
        }
        reset
    }

    /// True once every registered module is solved
    pub fn all_solved(&self) -> bool {
        self.slots.values().all(|slot| slot.module.is_solved())
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
