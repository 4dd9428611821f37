//! Lock-loss monitor.

use wordalign::*;
use wordalign_std::*;

use crate::types::*;

/// Input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I<const N: usize> {
    /// An alignment campaign is running.
    pub active: bool,

    /// Clock lock of every channel.
    pub locked: Lanes<bool, N>,
}

/// Output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct O {
    /// Lock was lost during the running campaign.
    pub lost: bool,

    /// Every channel is locked.
    pub lock_good: bool,
}

/// Lock-loss monitor. The state is the latched lock loss.
pub type LockMonitor<const N: usize> = FnFsm<I<N>, O, bool, fn(I<N>, bool) -> (O, bool)>;

/// Creates the lock-loss monitor.
///
/// Lock loss is latched while a campaign is running and cleared once the sequencer is idle again.
pub fn m<const N: usize>() -> LockMonitor<N> { fsm(false, logic::<N> as fn(I<N>, bool) -> (O, bool)) }

fn logic<const N: usize>(input: I<N>, latched: bool) -> (O, bool) {
    let lock_good = input.locked.all();
    let (latched_next, _) = Sticky.step(StickyI { set: input.active && !lock_good, clear: !input.active }, latched);
    let lost = input.active && (latched || !lock_good);
    (O { lost, lock_good }, latched_next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(active: bool, locked: bool) -> I<2> { I { active, locked: Lanes::splat(locked) } }

    #[test]
    fn idle_never_reports_loss() {
        let mut m = Module::new("lock_monitor", m::<2>());
        let out = m.tick(input(false, false));
        assert!(!out.lost);
        assert!(!out.lock_good);
        assert!(!*m.state());
    }

    #[test]
    fn single_channel_loss() {
        let mut m = Module::new("lock_monitor", m::<2>());
        let mut locked = Lanes::splat(true);
        locked.data[1] = false;
        let out = m.tick(I { active: true, locked });
        assert!(out.lost);
        assert!(!out.lock_good);
    }

    #[test]
    fn loss_latched_until_idle() {
        let mut m = Module::new("lock_monitor", m::<2>());
        assert!(!m.tick(input(true, true)).lost);
        assert!(m.tick(input(true, false)).lost);
        // Lock regained, still reported while the campaign is active.
        let out = m.tick(input(true, true));
        assert!(out.lost);
        assert!(out.lock_good);
        m.tick(input(false, true));
        assert!(!m.tick(input(true, true)).lost);
    }
}
