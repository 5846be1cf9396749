//! Criterion benchmarks for the evolutionary core.
//!
//! Uses a deterministic synthetic location set (points on a circle with
//! patterned directional speeds) to measure ranking and full generation
//! steps independent of any real-world data.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pareto_tour::ranking::update_population_fitness;
use pareto_tour::{Individual, TravelMatrix, World, WorldConfig};

/// Locations evenly spaced on a circle; speeds cycle 1..=4 by index sum.
fn circle_matrix(location_count: usize) -> TravelMatrix {
    let positions: Vec<(f64, f64)> = (0..location_count)
        .map(|i| {
            let angle = (i as f64 / location_count as f64) * std::f64::consts::TAU;
            (1000.0 * angle.cos(), 1000.0 * angle.sin())
        })
        .collect();
    let speeds: Vec<Vec<f64>> = (0..location_count)
        .map(|i| {
            (0..location_count)
                .map(|j| 1.0 + ((i + 3 * j) % 4) as f64)
                .collect()
        })
        .collect();
    TravelMatrix::from_positions(&positions, speeds).expect("valid synthetic tables")
}

fn spawned_world(location_count: usize, population_count: usize) -> World<TravelMatrix> {
    let config = WorldConfig::default()
        .with_population_count(population_count)
        .with_seed(42);
    let mut world = World::new(circle_matrix(location_count), config).expect("valid config");
    world.spawn().expect("spawn succeeds");
    world
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_population_fitness");

    for &population_count in &[50, 200, 500] {
        let world = spawned_world(30, population_count);
        let population: Vec<Individual> = world.population().to_vec();

        group.bench_with_input(
            BenchmarkId::from_parameter(population_count),
            &population,
            |b, population| {
                b.iter_batched(
                    || population.clone(),
                    |mut snapshot| update_population_fitness(&mut snapshot),
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("do_generation");

    for &(locations, population_count) in &[(20, 50), (30, 100), (50, 200)] {
        group.bench_with_input(
            BenchmarkId::new("locations_population", format!("{locations}x{population_count}")),
            &(locations, population_count),
            |b, &(locations, population_count)| {
                let mut world = spawned_world(locations, population_count);
                b.iter(|| world.do_generation());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_ranking, bench_generation);
criterion_main!(benches);
