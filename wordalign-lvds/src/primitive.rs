//! Deserializer primitive.
//!
//! The primitive turns a serial line plus its companion clock into one parallel word per cycle and can move its word
//! boundary by one bit on request. Its technology is out of scope; the alignment core sees it only through
//! [`Primitive`].

use wordalign::*;

/// Deserializer channel as seen by the alignment core.
///
/// Per cycle, [`Primitive::sample`] is called exactly once, followed by the queries; [`Primitive::correct`] is called
/// at the end of a cycle in which the core asserts a bitslip.
pub trait Primitive<const W: usize> {
    /// Samples the parallel word of the current cycle.
    fn sample(&mut self) -> Bits<W>;

    /// Bitslip: moves the word boundary by one bit, so that later samples are rotated right by one.
    fn correct(&mut self);

    /// The bitslip counter returned to zero. Reported in the cycle after the wrapping bitslip.
    fn wrapped(&self) -> bool;

    /// The clock recovery of this channel is locked.
    fn locked(&self) -> bool { true }
}

/// Software deserializer channel.
///
/// The line repeats one transmitted word; the deserializer starts `skew` bits off, so it samples
/// `transmitted.rotate_left(skew)` until corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftPrimitive<const W: usize> {
    transmitted: Bits<W>,
    /// Current misalignment in bits, `0..W`.
    skew: usize,
    /// Bitslip counter, `0..W`.
    counter: usize,
    /// Samples read as zero after a bitslip.
    latency: u32,
    busy: u32,
    wrap: bool,
    wrap_next: bool,
    samples: u64,
    corrections: u64,
    lock_loss_after: Option<u64>,
}

impl<const W: usize> SoftPrimitive<W> {
    /// Creates a channel transmitting `transmitted`, misaligned by `skew` bits.
    pub fn new(transmitted: Bits<W>, skew: usize) -> Self {
        Self {
            transmitted,
            skew: skew % W,
            counter: 0,
            latency: 0,
            busy: 0,
            wrap: false,
            wrap_next: false,
            samples: 0,
            corrections: 0,
            lock_loss_after: None,
        }
    }

    /// Reads zero for `latency` samples after each bitslip.
    #[must_use]
    pub fn with_latency(self, latency: u32) -> Self { Self { latency, ..self } }

    /// Starts the bitslip counter at `counter` instead of zero.
    #[must_use]
    pub fn with_counter(self, counter: usize) -> Self { Self { counter: counter % W, ..self } }

    /// Loses clock lock once `samples` samples have been taken.
    #[must_use]
    pub fn with_lock_loss_after(self, samples: u64) -> Self { Self { lock_loss_after: Some(samples), ..self } }

    /// Current misalignment in bits.
    pub fn skew(&self) -> usize { self.skew }

    /// Word sampled once the output has settled.
    pub fn settled_word(&self) -> Bits<W> { self.transmitted.rotate_left(self.skew) }

    /// Number of bitslips received.
    pub fn corrections(&self) -> u64 { self.corrections }

    /// Number of samples taken.
    pub fn samples(&self) -> u64 { self.samples }
}

impl<const W: usize> Primitive<W> for SoftPrimitive<W> {
    fn sample(&mut self) -> Bits<W> {
        self.samples += 1;
        self.wrap = self.wrap_next;
        self.wrap_next = false;
        if self.busy > 0 {
            self.busy -= 1;
            return Bits::zero();
        }
        self.settled_word()
    }

    fn correct(&mut self) {
        self.corrections += 1;
        self.skew = (self.skew + W - 1) % W;
        self.counter = (self.counter + 1) % W;
        if self.counter == 0 {
            self.wrap_next = true;
        }
        self.busy = self.latency;
    }

    fn wrapped(&self) -> bool { self.wrap }

    fn locked(&self) -> bool { self.lock_loss_after.map_or(true, |after| self.samples < after) }
}
