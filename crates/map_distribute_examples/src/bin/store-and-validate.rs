use map_distribute::prelude::*;
use map_distribute_examples::{init_tracing, island_mask, print_summary};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let content = ContentType::new("camp", 20.0).with_min_spacing(250.0);
    let mut store = InstanceStore::new();
    let mut rng = StdRng::seed_from_u64(42);

    // Place on a large island, then re-audit against a smaller one.
    let before = PlacementConstraints::new(island_mask(256));
    let result = RandomPlacement.distribute(&content, 60, &before, &mut rng);
    print_summary("initial", &result);
    let stored = store.replace_with_result(&content.id, &result);
    println!("stored {stored} camps");

    let after = PlacementConstraints::new(AlphaMask::from_fn(256, 256, |x, y| {
        // Sea level rose: only the island's inner half stays dry.
        let dx = x as i32 - 128;
        let dy = y as i32 - 128;
        if dx * dx + dy * dy < 64 * 64 {
            255
        } else {
            0
        }
    }));
    let validator = PositionValidator::new(&content, &after);
    let stats = validator.stats(store.instances(&content.id));
    println!(
        "{} of {} camps still valid; failures by check: {:?}",
        stats.valid, stats.total, stats.invalid_by_kind
    );

    let result = RandomPlacement.distribute(&content, 60, &after, &mut rng);
    print_summary("re-placed", &result);
    store.replace_with_result(&content.id, &result);
    println!(
        "store now holds {} camps, first: {:?}",
        store.len(),
        store.instances(&content.id).first().map(|i| i.id.to_string())
    );

    Ok(())
}
