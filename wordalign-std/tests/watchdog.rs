use wordalign::*;
use wordalign_std::*;

/// Watchdog: raises a sticky alarm when `kick` stays low for `timeout` cycles, and counts the alarms up to `max`.
#[derive(Debug)]
struct Watchdog {
    timeout: u32,
    timer: Countdown,
    alarm: Sticky,
    alarms: SaturatingCounter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WatchdogI {
    kick: bool,
    acknowledge: bool,
}

impl Fsm for Watchdog {
    type I = WatchdogI;
    type O = (bool, u32);
    type S = (u32, bool, u32);

    fn init(&self) -> Self::S { (self.timeout, false, 0) }

    fn step(&self, input: WatchdogI, (remaining, alarm, alarms): Self::S) -> (Self::O, Self::S) {
        let (expired, remaining) = self.timer.step(input.kick.then_some(self.timeout), remaining);
        let (alarm_next, _) = self.alarm.step(StickyI { set: expired, clear: input.acknowledge }, alarm);
        let (counter, _) = self.alarms.step(CounterI { clear: false, up: expired }, alarms);
        ((alarm_next, counter.next), (remaining, alarm_next, counter.next))
    }
}

fn watchdog() -> Module<Watchdog> {
    let fsm = Watchdog { timeout: 3, timer: Countdown, alarm: Sticky, alarms: SaturatingCounter::new(2) };
    Module::new("watchdog", fsm)
}

const IDLE: WatchdogI = WatchdogI { kick: false, acknowledge: false };
const KICK: WatchdogI = WatchdogI { kick: true, acknowledge: false };
const ACK: WatchdogI = WatchdogI { kick: false, acknowledge: true };

#[test]
fn kicks_keep_alarm_low() {
    let mut m = watchdog();
    for _ in 0..10 {
        m.tick(IDLE);
        m.tick(KICK);
    }
    assert_eq!(m.tick(IDLE), (false, 0));
    assert_eq!(m.fsm().alarms.max(), 2);
    assert_eq!(m.state().0, m.fsm().timeout - 1);
}

#[test]
fn alarm_after_timeout_until_acknowledged() {
    let mut m = watchdog();
    assert_eq!(m.tick(IDLE), (false, 0));
    assert_eq!(m.tick(IDLE), (false, 0));
    assert_eq!(m.tick(IDLE), (true, 1));

    // An expired timer keeps expiring until reloaded; the count saturates.
    assert_eq!(m.tick(IDLE), (true, 2));
    assert_eq!(m.tick(IDLE), (true, 2));
    assert_eq!(m.tick(ACK), (false, 2));
    assert_eq!(m.tick(KICK), (false, 2));
    assert_eq!(m.tick(IDLE), (false, 2));
}

#[test]
fn acknowledge_wins_over_alarm() {
    let mut m = watchdog();
    m.tick(IDLE);
    m.tick(IDLE);
    assert_eq!(m.tick(ACK), (false, 1));
}
