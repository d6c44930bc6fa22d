use map_distribute::prelude::*;
use map_distribute_examples::{
    init_tracing, island_mask, print_summary, render_result_to_png, RenderConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mask = island_mask(512);
    let content = ContentType::new("tree", 12.0)
        .with_min_spacing(5.0)
        .with_default_property("biome", "forest");

    // Four groves of 300 m radius, the rest derived from the request
    let constraints = PlacementConstraints::new(mask.clone())
        .with_cluster_count(4)
        .with_cluster_radius(300.0);

    let mut events = VecSink::only([
        PlacementEventKind::ClusterCenterAccepted,
        PlacementEventKind::DistributionFinished,
    ]);
    let mut rng = StdRng::seed_from_u64(42);
    let result =
        ClusteredPlacement.distribute_with_events(&content, 200, &constraints, &mut rng, &mut events);

    print_summary("clustered", &result);
    for event in events.as_slice() {
        if let PlacementEvent::ClusterCenterAccepted { index, position } = event {
            println!("  center {index}: ({:.3}, {:.3})", position.x, position.y);
        }
    }

    let rc = RenderConfig::new((800, 800)).with_marker([40, 120, 50], 2);
    render_result_to_png(&result, &mask, &rc, "clustered-basic.png")
}
