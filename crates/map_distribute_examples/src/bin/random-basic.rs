use map_distribute::prelude::*;
use map_distribute_examples::{
    init_tracing, island_mask, print_summary, render_result_to_png, RenderConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 10 km x 10 km island, villages at least 400 m apart
    let mask = island_mask(512);
    let content = ContentType::new("village", 60.0).with_min_spacing(400.0);
    content.validate()?;

    let constraints = PlacementConstraints::new(mask.clone());
    constraints.validate()?;

    let mut rng = StdRng::seed_from_u64(42);
    let result = RandomPlacement.distribute(&content, 120, &constraints, &mut rng);
    print_summary("random", &result);

    let rc = RenderConfig::new((800, 800)).with_marker([180, 40, 40], 4);
    render_result_to_png(&result, &mask, &rc, "random-basic.png")
}
