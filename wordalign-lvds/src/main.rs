//! Runs an alignment campaign on software deserializer channels.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use wordalign::Bits;
use wordalign_lvds::constants::deser;
use wordalign_lvds::*;

const N: usize = deser::DATA_CHANNELS;
const W: usize = deser::WORD_WIDTH;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Bitslip one bit at a time until the pattern shows up.
    Bitslip,

    /// Compute the offset from one sample and bitslip that many times.
    OffsetSearch,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment strategy
    #[arg(long, value_enum, default_value_t = Strategy::Bitslip)]
    strategy: Strategy,

    /// Initial misalignment in bits, cycled over the channels (control channel last)
    #[arg(long, value_delimiter = ',', default_value = "0,3,7,1,9")]
    skews: Vec<usize>,

    /// Samples read as zero after each bitslip
    #[arg(long, default_value_t = 0)]
    latency: u32,

    /// Channel whose line never carries its training pattern
    #[arg(long)]
    broken: Option<usize>,

    /// Every channel loses clock lock after this many samples
    #[arg(long)]
    lose_lock_after: Option<u64>,

    /// JSON file with alignment parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Cycle limit for the bitslip strategy
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn lanes(args: &Args, params: &Params) -> Lanes<SoftPrimitive<W>, N> {
    let patterns = params.patterns::<N, W>();
    Lanes::from_fn(|i| {
        // An idle line never matches a training pattern.
        let transmitted = if args.broken == Some(i) { Bits::zero() } else { patterns[i] };
        let skew = if args.skews.is_empty() { 0 } else { args.skews[i % args.skews.len()] };
        let primitive = SoftPrimitive::new(transmitted, skew).with_latency(args.latency);
        match args.lose_lock_after {
            Some(samples) => primitive.with_lock_loss_after(samples),
            None => primitive,
        }
    })
}

fn main() -> Result<(), AlignError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let params = match &args.params {
        Some(path) => Params::from_json(&fs::read_to_string(path)?)?,
        None => Params::default(),
    };
    params.validate::<W>()?;

    let mut lanes = lanes(&args, &params);
    let alignment = match args.strategy {
        Strategy::Bitslip => {
            let mut aligner = Aligner::<N, W>::new(params)?;
            match args.max_ticks {
                Some(max_ticks) => aligner.run(&mut lanes, max_ticks),
                None => aligner.align(&mut lanes),
            }
        }
        Strategy::OffsetSearch => OffsetSearch::<N, W>::new(params)?.align(&mut lanes),
    }?;

    println!("aligned {} channels in {} cycles", Lanes::<u32, N>::COUNT, alignment.ticks);
    println!("bitslips: {}", alignment.bitslips);
    Ok(())
}
