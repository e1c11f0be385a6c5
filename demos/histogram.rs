use std::collections::HashMap;

use walker_alias::{IndexSampler, WalkerAlias};

const TIERS: [&str; 5] = ["common", "uncommon", "rare", "legendary", "mythic"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let weights = [70.0, 20.0, 8.0, 1.9, 0.1];
    let sampler = WalkerAlias::new(&weights)?;
    println!("device: {:?}", sampler.device());
    println!("threshold: {:?}", sampler.table().threshold());
    println!("values:    {:?}", sampler.table().values());

    let mut rng = rand::rng();

    // One batch shaped like 1000 players x 500 rolls.
    let batch = sampler.sample(&mut rng, &[1000, 500])?;
    let mut hist: HashMap<i32, u64> = HashMap::default();
    for &i in batch.iter() {
        *hist.entry(i).or_default() += 1;
    }

    let total = batch.len() as f64;
    let sum: f32 = weights.iter().sum();
    println!("\n{:>10} {:>8} {:>8} {:>8}", "tier", "count", "freq", "expect");
    let mut rows: Vec<(i32, u64)> = hist.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    for (i, c) in rows {
        let i = i as usize;
        println!(
            "{:>10} {c:>8} {:>8.4} {:>8.4}",
            TIERS[i],
            c as f64 / total,
            weights[i] / sum
        );
    }

    // Single draws through the IndexSampler interface.
    print!("\nten single rolls:");
    for _ in 0..10 {
        print!(" {}", TIERS[sampler.sample_index(&mut rng)]);
    }
    println!();

    #[cfg(feature = "parallel")]
    {
        let par = sampler.to_device(walker_alias::ParallelDevice::new());
        let big = par.sample(&mut rng, &[4_000_000])?;
        let mythic = big.iter().filter(|&&i| i == 4).count();
        println!(
            "\n{}: {mythic} mythic in {} rolls",
            walker_alias::Device::name(par.device()),
            big.len()
        );
    }

    Ok(())
}
