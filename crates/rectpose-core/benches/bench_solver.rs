use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rand::{rngs::StdRng, Rng, SeedableRng};
use rectpose_core::{project_points, solve_pose, HalfExtents, Point2, Pose, PoseMethod};

const NUM_SCENES: usize = 64;

fn generate_scenes_with_seed(seed: u64) -> Vec<([Point2; 4], HalfExtents)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scenes = Vec::with_capacity(NUM_SCENES);
    while scenes.len() < NUM_SCENES {
        let extents = HalfExtents::new(rng.random_range(0.5..2.0), rng.random_range(0.5..2.0));
        let pose = Pose::from_euler(
            [
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-6.0..-2.0),
            ],
            rng.random_range(-180.0..180.0),
            rng.random_range(-40.0..40.0),
            rng.random_range(-20.0..20.0),
        );
        let p = project_points(&extents.corners(), &pose);
        if p.iter().all(|q| q.x.abs() < 5.0 && q.y.abs() < 5.0) {
            scenes.push(([p[0], p[1], p[2], p[3]], extents));
        }
    }
    scenes
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_solver");
    let scenes = generate_scenes_with_seed(42);
    for method in [PoseMethod::Rectangle, PoseMethod::NinePoint] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{method:?}")),
            &method,
            |b, &method| {
                b.iter(|| {
                    for (picks, extents) in &scenes {
                        let res = solve_pose(picks, extents, method);
                        std::hint::black_box(res.ok());
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_projector(c: &mut Criterion) {
    let extents = HalfExtents::new(2.0, 1.0);
    let pose = Pose::from_euler([0.0, 0.0, -1.0], 290.0, -30.0, 40.0);
    let corners = extents.corners();
    c.bench_function("project_corners", |b| {
        b.iter(|| std::hint::black_box(project_points(&corners, &pose)))
    });
}

criterion_group!(benches, bench_solvers, bench_projector);
criterion_main!(benches);
