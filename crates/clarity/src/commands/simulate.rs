use crate::cli::BatchArgs;
use crate::samples;

pub fn run(count: usize, seed: Option<u64>, args: &BatchArgs) -> anyhow::Result<()> {
    let batch = samples::notification_batch(count, &mut samples::rng(seed));
    if !args.json {
        println!("Simulating {} notifications", batch.len());
    }
    super::run_batch(batch, args)
}
