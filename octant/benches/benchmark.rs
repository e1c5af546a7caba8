use criterion::{AxisScale, BenchmarkGroup, BenchmarkId, Criterion, PlotConfiguration};

use octant::prelude::*;
use rand::prelude::*;

type Scalar = f32;
type Point = [Scalar; 3];

pub fn random_points(rng: &mut StdRng, n: usize) -> Vec<Point> {
    (0..n)
        .map(|_| [0.0; 3].map(|_: Scalar| rng.gen_range(-5.0..5.0)))
        .collect()
}

#[inline]
fn bench_search<'p, N>(
    mut search: N,
    points: &'p [Point],
    queries: &[Point],
    radii: &[Scalar],
    group: &mut BenchmarkGroup<'_, criterion::measurement::WallTime>,
) where
    N: NeighborSearch<'p, Point>,
{
    let name = std::any::type_name::<N>()
        .trim_start_matches("octant::")
        .split('<')
        .next()
        .unwrap_or_default();

    group.bench_function(
        BenchmarkId::new(format!("{name}::build"), points.len()),
        |bencher| bencher.iter(|| search.build(points)),
    );

    search.build(points);
    let mut neighbors = Vec::new();
    for &radius in radii {
        group.bench_function(
            BenchmarkId::new(format!("{name}::{radius}"), points.len()),
            |bencher| {
                bencher.iter(|| {
                    for query in queries {
                        search.radius_neighbors_into(query, radius, &Euclidean, &mut neighbors);
                    }
                })
            },
        );
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Octant");
    group
        .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic))
        .warm_up_time(std::time::Duration::from_secs(1))
        .measurement_time(std::time::Duration::from_secs(1))
        .sample_size(15);

    let point_count_iterator = (6..17).step_by(2).map(|i| 2usize.pow(i));
    let radii = [0.5, 2.0];

    let g = &mut group;
    for n in point_count_iterator {
        let rng = &mut StdRng::seed_from_u64(1808);
        let points = random_points(rng, n);
        let queries = random_points(rng, 64);

        bench_search(Octree::new(), &points, &queries, &radii, g);
        bench_search(BruteForce::new(), &points, &queries, &radii, g);
    }

    group.finish();
}

criterion::criterion_group!(benches, criterion_benchmark);
criterion::criterion_main!(benches);
