use wordalign::*;

/// Rising-edge detector: the state is the previous input.
fn edge_detect() -> impl Fsm<I = bool, O = bool, S = bool> {
    fsm(false, |input: bool, prev: bool| (input && !prev, input))
}

/// Collects the bits that arrive with a strobe, LSB first, and emits the word once `W` of them arrived.
fn collect<const W: usize>() -> impl Fsm<I = (bool, bool), O = Valid<Bits<W>>, S = (u32, usize)> {
    fsm((0, 0), |(strobe, bit): (bool, bool), (value, count): (u32, usize)| {
        if !strobe {
            return (Valid::invalid(), (value, count));
        }
        let value = value | (u32::from(bit) << count);
        if count + 1 == W {
            (Valid::valid(Bits::new(value)), (0, 0))
        } else {
            (Valid::invalid(), (value, count + 1))
        }
    })
}

#[test]
fn edges_are_one_cycle_pulses() {
    let mut m = Module::new("edge", edge_detect());
    let pulses = [false, true, true, true, false, true].map(|input| m.tick(input));
    assert_eq!(pulses, [false, true, false, false, false, true]);
}

#[test]
fn peek_does_not_commit() {
    let mut m = Module::new("edge", edge_detect());
    assert!(m.peek(true));
    assert!(m.peek(true));
    assert!(!*m.state());
    assert!(m.tick(true));
    assert!(!m.peek(true));
}

#[test]
fn composed_word_collector() {
    let mut strobe = Module::new("strobe", edge_detect());
    let mut words = Module::new("collect", collect::<4>());

    // Each bit is held for two cycles; the strobe marks its first cycle.
    let line = [true, false, true, true];
    let mut out = vec![];
    for bit in line {
        for level in [true, false] {
            let s = strobe.tick(level);
            out.extend(words.tick((s, bit)).into_option());
        }
    }
    assert_eq!(out, vec![Bits::<4>::new(0b1101)]);
    assert_eq!(out[0].transl(), vec![true, false, true, true]);
}

#[test]
fn reset_restores_initial_state() {
    let mut m = Module::new("collect", collect::<4>());
    m.tick((true, true));
    m.tick((true, true));
    assert_eq!(*m.state(), (0b11, 2));
    m.reset();
    assert_eq!(*m.state(), (0, 0));
    assert_eq!(m.name(), "collect");
}
