//! Writes a deterministic tourist table for trying out the dashboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate_sample", about = "Write a deterministic sample tourist CSV")]
struct Args {
    /// Destination CSV file
    #[arg(default_value = "sample_tourists.csv")]
    output: PathBuf,

    /// Number of tourist rows to generate
    #[arg(default_value_t = 200)]
    rows: usize,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

const FIRST_NAMES: [&str; 8] = ["Ana", "Ben", "Chloe", "Dev", "Elif", "Femi", "Greta", "Hiro"];
const LAST_NAMES: [&str; 6] = ["Silva", "Novak", "Moreau", "Rao", "Kaya", "Berg"];
const COUNTRIES: [&str; 6] = ["Brazil", "France", "Germany", "India", "Japan", "Nigeria"];
const DESTINATIONS: [&str; 7] = ["Bali", "Cairo", "Lisbon", "Paris", "Reykjavik", "Rome", "Tokyo"];

fn main() -> Result<()> {
    let Args { output, rows } = Args::parse();

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(["Name", "Country", "Destination", "Duration", "Rating", "Age"])?;

    for _ in 0..rows {
        let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
        let country = rng.pick(&COUNTRIES);
        let destination = rng.pick(&DESTINATIONS);
        let duration = (1 + rng.below(21)).to_string();
        // Roughly one in twenty ratings left blank.
        let rating = if rng.below(20) == 0 {
            String::new()
        } else {
            (1 + rng.below(5)).to_string()
        };
        let age = (18 + rng.below(60)).to_string();
        writer.write_record([
            name.as_str(),
            country,
            destination,
            duration.as_str(),
            rating.as_str(),
            age.as_str(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} tourists to {}", output.display());
    Ok(())
}
