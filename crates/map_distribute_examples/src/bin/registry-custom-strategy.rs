use glam::DVec2;
use map_distribute::prelude::*;
use map_distribute_examples::{
    init_tracing, island_mask, print_summary, render_result_to_png, RenderConfig,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Jittered lattice: one candidate per grid cell, visited in row order.
struct JitteredGrid;

impl PlacementStrategy for JitteredGrid {
    fn id(&self) -> &str {
        "jittered-grid"
    }

    fn distribute_with_events(
        &self,
        content: &ContentType,
        count: usize,
        constraints: &PlacementConstraints,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> PlacementResult {
        let snapshot = MaskSnapshot::capture(constraints.mask.as_ref());
        let spacing = constraints.effective_spacing(content);
        let max_attempts = constraints.max_attempts_for(count);
        let side = (max_attempts as f64).sqrt().ceil().max(1.0) as usize;
        let cell = 1.0 / side as f64;

        let mut instances = Vec::new();
        let mut attempts = 0;
        'grid: for row in 0..side {
            for col in 0..side {
                if instances.len() >= count || attempts >= max_attempts {
                    break 'grid;
                }
                attempts += 1;
                let jitter = DVec2::new(unit(rng), unit(rng)) * cell;
                let p = DVec2::new(col as f64, row as f64) * cell + jitter;
                if !snapshot.is_valid(p, constraints.alpha_threshold) {
                    continue;
                }
                let placed: Vec<Footprint> = instances.iter().map(Footprint::from).collect();
                if !is_center_spacing_satisfied(p, &placed, spacing, content.map_extent) {
                    continue;
                }
                let instance = PlacedInstance::new(
                    InstanceId::sequential(self.id(), instances.len()),
                    content.id.clone(),
                    p,
                    content.default_properties.clone(),
                );
                sink.send(PlacementEvent::InstancePlaced {
                    instance: instance.clone(),
                });
                instances.push(instance);
            }
        }

        let capacity = estimate_from_ratio(
            snapshot.valid_area_ratio(),
            spacing,
            content.size,
            content.map_extent,
        );
        PlacementResult::from_instances(instances, count, attempts, max_attempts, capacity)
    }
}

fn unit(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut registry = StrategyRegistry::with_defaults();
    registry.register("jittered-grid", JitteredGrid);
    println!("registered strategies: {:?}", registry.list());

    let mask = island_mask(512);
    let content = ContentType::new("outpost", 40.0).with_min_spacing(300.0);
    let constraints = PlacementConstraints::new(mask.clone());

    for id in registry.list() {
        let strategy = registry.get(&id)?;
        let mut rng = StdRng::seed_from_u64(42);
        let result = strategy.distribute(&content, 80, &constraints, &mut rng);
        print_summary(&id, &result);

        let rc = RenderConfig::new((600, 600));
        render_result_to_png(&result, &mask, &rc, format!("registry-{id}.png"))?;
    }

    match registry.get("spiral") {
        Ok(_) => println!("unexpected 'spiral' strategy"),
        Err(e) => println!("lookup failed as expected: {e}"),
    }
    Ok(())
}
