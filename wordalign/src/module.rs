//! Module.

use std::fmt;

use crate::*;

/// Instantiated FSM: the FSM together with its state register.
///
/// Each [`Module::tick`] is one cycle of the module's clock domain and commits exactly one state update.
pub struct Module<F: Fsm> {
    /// Instance name.
    name: String,
    fsm: F,
    state: F::S,
}

impl<F: Fsm> Module<F> {
    /// Instantiates `fsm` in its initial state.
    pub fn new(name: &str, fsm: F) -> Self {
        let state = fsm.init();
        Self { name: name.to_string(), fsm, state }
    }

    /// Returns the instance name.
    pub fn name(&self) -> &str { &self.name }

    /// Returns the FSM.
    pub fn fsm(&self) -> &F { &self.fsm }

    /// Returns the current state.
    pub fn state(&self) -> &F::S { &self.state }

    /// Runs one cycle: returns the output and commits the next state.
    pub fn tick(&mut self, input: F::I) -> F::O {
        let (output, state_next) = self.fsm.step(input, self.state.clone());
        if state_next != self.state {
            tracing::trace!(module = %self.name, from = ?self.state, to = ?state_next, "state transition");
        }
        self.state = state_next;
        output
    }

    /// Returns the output of the current cycle without committing the next state.
    pub fn peek(&self, input: F::I) -> F::O { self.fsm.step(input, self.state.clone()).0 }

    /// Forces the initial state.
    pub fn reset(&mut self) { self.state = self.fsm.init(); }
}

impl<F: Fsm + fmt::Debug> fmt::Debug for Module<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module").field("name", &self.name).field("fsm", &self.fsm).field("state", &self.state).finish()
    }
}
