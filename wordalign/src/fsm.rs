//! Finite state machine (Mealy machine).

use std::fmt;
use std::marker::PhantomData;

/// Finite state machine (Mealy machine).
///
/// `step` describes the combinational logic around the state register: from the current-cycle input and state, it
/// computes (1) the current-cycle output and (2) the next-cycle state. It must not have side effects; committing the
/// next state is the job of [`Module`](crate::Module).
pub trait Fsm {
    /// Input of a cycle.
    type I;

    /// Output of a cycle.
    type O;

    /// State register.
    type S: Clone + fmt::Debug + PartialEq;

    /// Initial value of the state register, also forced by reset.
    fn init(&self) -> Self::S;

    /// Computes the current-cycle output and the next-cycle state.
    fn step(&self, input: Self::I, state: Self::S) -> (Self::O, Self::S);
}

/// FSM described by an initial state and a step function.
#[derive(Clone)]
pub struct FnFsm<I, O, S, F> {
    /// Initial value of the state register.
    init: S,
    /// FSM function.
    f: F,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O, S: fmt::Debug, F> fmt::Debug for FnFsm<I, O, S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_struct("FnFsm").field("init", &self.init).finish() }
}

impl<I, O, S, F> Fsm for FnFsm<I, O, S, F>
where
    S: Clone + fmt::Debug + PartialEq,
    F: Fn(I, S) -> (O, S),
{
    type I = I;
    type O = O;
    type S = S;

    fn init(&self) -> S { self.init.clone() }

    fn step(&self, input: I, state: S) -> (O, S) { (self.f)(input, state) }
}

/// Creates a new FSM from its initial state and step function.
pub fn fsm<I, O, S, F>(init: S, f: F) -> FnFsm<I, O, S, F>
where
    S: Clone + fmt::Debug + PartialEq,
    F: Fn(I, S) -> (O, S),
{
    FnFsm { init, f, _marker: PhantomData }
}
