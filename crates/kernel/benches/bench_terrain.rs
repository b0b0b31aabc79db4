use std::hint::black_box;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tileworld_kernel::{TileGrid, generate};

fn bench_generate(width: u32, height: u32, iterations: usize) {
    let start = Instant::now();
    for i in 0..iterations {
        let mut rng = ChaCha8Rng::seed_from_u64(i as u64);
        black_box(generate(black_box(width), black_box(height), &mut rng));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  generate ({width}x{height}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_filled_heights(grid: &TileGrid, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        let total: u64 = (0..grid.width())
            .filter_map(|x| grid.filled_height(x))
            .map(u64::from)
            .sum();
        black_box(total);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  filled_height scan ({}x{}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        grid.width(),
        grid.height()
    );
}

fn main() {
    println!("=== tileworld-kernel benchmarks ===");
    bench_generate(256, 128, 200);
    bench_generate(2048, 512, 20);
    bench_generate(8192, 1024, 5);

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let grid = generate(2048, 512, &mut rng);
    bench_filled_heights(&grid, 200);
}
