//! Synthetic quote generator.
//!
//! Simulates a random walk of mid prices for a set of currency pairs and
//! quotes them with a fixed relative spread and a per-pair swap.

use rand::Rng;
use ticks::Quote;

const PAIRS: &[&str] = &[
    "USD/JPY", "EUR/USD", "GBP/USD", "AUD/USD", "EUR/JPY", "USD/CHF", "GBP/JPY", "NZD/USD",
];

/// Relative half-spread around the mid price.
const HALF_SPREAD: f64 = 0.0001;

pub struct RandomFeed {
    names: Vec<String>,
    mids: Vec<f64>,
    swaps: Vec<(f64, f64)>,
}

impl RandomFeed {
    /// Creates a feed quoting `num_instruments` pairs. Well-known pair names
    /// are used first, then `PAIR<n>`.
    pub fn new<R: Rng>(num_instruments: usize, rng: &mut R) -> Self {
        let names: Vec<String> = (0..num_instruments)
            .map(|i| match PAIRS.get(i) {
                Some(pair) => pair.to_string(),
                None => format!("PAIR{}", i),
            })
            .collect();
        let mids = names
            .iter()
            .map(|name| if name.ends_with("JPY") { 110.0 } else { 1.2 })
            .collect();
        let swaps = names
            .iter()
            .map(|_| {
                let carry = rng.gen_range(-0.5..0.5);
                (carry, -carry - 0.1)
            })
            .collect();

        Self { names, mids, swaps }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Advances every mid price one step and quotes the result.
    pub fn next_quotes<R: Rng>(&mut self, rng: &mut R) -> Vec<(String, Quote)> {
        self.names
            .iter()
            .zip(self.mids.iter_mut())
            .zip(self.swaps.iter())
            .map(|((name, mid), &(buy_swap, sell_swap))| {
                // Random walk: +/- 0.05%
                *mid *= 1.0 + rng.gen_range(-0.0005..0.0005);
                if *mid < 0.0001 {
                    *mid = 0.0001;
                }
                let quote = Quote::new(
                    *mid * (1.0 - HALF_SPREAD),
                    *mid * (1.0 + HALF_SPREAD),
                    buy_swap,
                    sell_swap,
                );
                (name.clone(), quote)
            })
            .collect()
    }
}
