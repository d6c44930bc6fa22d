use std::env;

use map_distribute::prelude::*;
use map_distribute_examples::{
    init_tracing, load_png_mask, print_summary, render_result_to_png, RenderConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Usage: mask-from-png <mask.png> [count]
///
/// Transparent pixels of the PNG are excluded from placement.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: mask-from-png <mask.png> [count]"))?;
    let count: usize = match args.next() {
        Some(s) => s.parse()?,
        None => 100,
    };

    let mask = load_png_mask(&path)?;
    println!(
        "{}x{} mask, {:.1}% usable",
        mask.width(),
        mask.height(),
        estimate_valid_area_ratio(&mask) * 100.0
    );

    let content = ContentType::new("poi", 25.0).with_min_spacing(150.0);
    let constraints = PlacementConstraints::new(mask.clone());
    let registry = StrategyRegistry::with_defaults();
    let strategy = registry.default_strategy()?;

    let mut rng = StdRng::seed_from_u64(42);
    let result = strategy.distribute(&content, count, &constraints, &mut rng);
    print_summary(strategy.id(), &result);

    let (w, h) = mask.dimensions();
    render_result_to_png(&result, &mask, &RenderConfig::new((w, h)), "mask-from-png.png")
}
