#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use sparse_life::{BlockLife, Life, WeightedLife};
use std::env;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct BenchConfig {
    size: i64,
    density: f64,
    iters: u64,
    check_interval: u64,
    /// Spread seed regions this far apart to exercise sparse storage.
    spacing: i64,
    regions: i64,
    seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: 512,
            density: 0.42,
            iters: 200,
            check_interval: 50,
            spacing: 1 << 40,
            regions: 2,
            seed: 0x5EED_1234_ABCD_EF01,
        }
    }
}

fn parse_args() -> BenchConfig {
    parse_args_from(env::args().skip(1))
}

fn parse_args_from(mut args: impl Iterator<Item = String>) -> BenchConfig {
    let mut cfg = BenchConfig::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => {
                if let Some(v) = args.next() {
                    cfg.size = v.parse().expect("--size expects i64");
                }
            }
            "--density" => {
                if let Some(v) = args.next() {
                    cfg.density = v.parse().expect("--density expects f64");
                }
            }
            "--iters" => {
                if let Some(v) = args.next() {
                    cfg.iters = v.parse().expect("--iters expects u64");
                }
            }
            "--check-interval" => {
                if let Some(v) = args.next() {
                    cfg.check_interval = v
                        .parse::<u64>()
                        .expect("--check-interval expects u64")
                        .max(1);
                }
            }
            "--spacing" => {
                if let Some(v) = args.next() {
                    cfg.spacing = v.parse().expect("--spacing expects i64");
                }
            }
            "--regions" => {
                if let Some(v) = args.next() {
                    cfg.regions = v.parse().expect("--regions expects i64");
                }
            }
            "--seed" => {
                if let Some(v) = args.next() {
                    cfg.seed = if let Some(hex) = v.strip_prefix("0x") {
                        u64::from_str_radix(hex, 16).expect("--seed hex parse failed")
                    } else {
                        v.parse().expect("--seed expects u64")
                    };
                }
            }
            other => panic!("unknown arg: {other}"),
        }
    }
    cfg
}

fn seed_board(engines: &mut [&mut dyn Life], cfg: &BenchConfig) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(cfg.seed);
    let threshold = (u64::MAX as f64 * cfg.density) as u64;
    for region in 0..cfg.regions {
        let base = region.wrapping_mul(cfg.spacing);
        for y in 0..cfg.size {
            for x in 0..cfg.size {
                if rng.next_u64() <= threshold {
                    for engine in engines.iter_mut() {
                        engine.add_live_point(base.wrapping_add(x), base.wrapping_sub(y));
                    }
                }
            }
        }
    }
}

fn timed_steps(engine: &mut dyn Life, n: u64) -> Duration {
    let start = Instant::now();
    engine.step_n(n);
    start.elapsed()
}

fn main() {
    let cfg = parse_args();
    let mut weighted = WeightedLife::new();
    let mut block = BlockLife::new();
    let mut seeded: [&mut dyn Life; 2] = [&mut weighted, &mut block];
    seed_board(&mut seeded, &cfg);

    let mut weighted_total = Duration::ZERO;
    let mut block_total = Duration::ZERO;
    let mut done = 0;
    while done < cfg.iters {
        let n = cfg.check_interval.min(cfg.iters - done);
        let weighted_phase = timed_steps(&mut weighted, n);
        let block_phase = timed_steps(&mut block, n);
        weighted_total += weighted_phase;
        block_total += block_phase;
        done += n;

        let weighted_population = weighted.population();
        let block_population = block.population();
        let match_status = if weighted_population == block_population {
            "MATCH"
        } else {
            "MISMATCH"
        };
        println!(
            "Generation {done}: weighted pop = {weighted_population}, block pop = {block_population} [{match_status}], tiles = {}",
            block.block_count()
        );
        println!(
            "  weighted: {:.3} ms | block: {:.3} ms",
            weighted_phase.as_secs_f64() * 1000.0,
            block_phase.as_secs_f64() * 1000.0
        );
    }

    let weighted_ms = weighted_total.as_secs_f64() * 1000.0;
    let block_ms = block_total.as_secs_f64() * 1000.0;
    let iters = cfg.iters.max(1) as f64;
    println!("\n--- Summary ({} generations) ---", cfg.iters);
    println!("weighted: {weighted_ms:.3} ms total, {:.6} ms/gen", weighted_ms / iters);
    println!("block:    {block_ms:.3} ms total, {:.6} ms/gen", block_ms / iters);
    println!("Speedup (weighted / block): {:.2}x", weighted_ms / block_ms);
}
