use criterion::{black_box, criterion_group, criterion_main, Criterion};
use softrender::clipper::{Polygon, PolygonVertex};
use softrender::math::{Vec2, Vec3};
use softrender::Projection;

fn vertex(x: f32, y: f32, z: f32) -> PolygonVertex {
    PolygonVertex::new(Vec3::new(x, y, z), Vec2::ZERO)
}

fn benchmark_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("clip_polygon");
    let frustum = Projection::from_degrees(60.0, 4.0 / 3.0, 0.1, 100.0)
        .unwrap()
        .frustum();

    let inside = Polygon::from_triangle(vertex(-1.0, -1.0, 5.0), vertex(0.0, 1.0, 5.0), vertex(1.0, -1.0, 5.0));
    let crossing = Polygon::from_triangle(
        vertex(-50.0, -40.0, 0.05),
        vertex(0.0, 60.0, 20.0),
        vertex(70.0, -30.0, 150.0),
    );
    let outside = Polygon::from_triangle(vertex(-1.0, -1.0, -5.0), vertex(0.0, 1.0, -5.0), vertex(1.0, -1.0, -5.0));

    for (name, polygon) in [("inside", inside), ("crossing", crossing), ("outside", outside)] {
        group.bench_function(name, |b| {
            b.iter(|| frustum.clip_polygon(black_box(polygon.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_clip);
criterion_main!(benches);
