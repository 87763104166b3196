use crate::cli::BatchArgs;
use crate::samples;

pub fn run(count: usize, seed: Option<u64>, args: &BatchArgs) -> anyhow::Result<()> {
    let batch = samples::email_batch(count, &mut samples::rng(seed));
    if !args.json {
        println!("Processing {} demo emails", batch.len());
    }
    super::run_batch(batch, args)
}
