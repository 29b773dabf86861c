use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use detection_eval::disjoint::DisjointBoxGenerator;
use detection_eval::matching::match_frame;
use detection_eval::metrics::{calculate_f_score, calculate_iou, calculate_iou_matrix};
use detection_eval::{compute_metrics, FrameCollection, MatchStrategy, MetricsConfig, Rectangle};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn grid_rects(n: usize, offset: f64, confidence: Option<f64>) -> Vec<Rectangle> {
    (0..n)
        .map(|i| {
            let x = (i % 20) as f64 * 60.0 + offset;
            let y = (i / 20) as f64 * 60.0 + offset;
            match confidence {
                Some(c) => Rectangle::with_confidence(1, "A", (x, y), (x + 50.0, y + 50.0), c),
                None => Rectangle::new(1, "A", (x, y), (x + 50.0, y + 50.0)),
            }
        })
        .collect()
}

fn bench_iou_calculation(c: &mut Criterion) {
    let a = Rectangle::new(1, "A", (10.0, 10.0), (60.0, 60.0));
    let b = Rectangle::new(1, "A", (30.0, 30.0), (80.0, 80.0));

    c.bench_function("iou_single", |bench| {
        bench.iter(|| calculate_iou(black_box(&a), black_box(&b)));
    });
}

fn bench_iou_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("iou_matrix");

    for size in [10, 50, 100, 500].iter() {
        let rects = grid_rects(*size, 0.0, None);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| calculate_iou_matrix(black_box(&rects), black_box(&rects)));
        });
    }
    group.finish();
}

fn bench_match_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_frame");

    for size in [10, 100, 400].iter() {
        let labels = grid_rects(*size, 0.0, None);
        let predictions = grid_rects(*size, 5.0, Some(0.9));
        let refs: Vec<&Rectangle> = predictions.iter().collect();

        for strategy in [MatchStrategy::ManyToOne, MatchStrategy::Greedy] {
            let id = BenchmarkId::new(format!("{:?}", strategy), size);
            group.bench_with_input(id, size, |b, _| {
                b.iter(|| match_frame(black_box(&labels), black_box(&refs), 0.5, strategy));
            });
        }
    }
    group.finish();
}

fn bench_compute_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_metrics");

    for frames in [10, 100, 1000].iter() {
        let mut labels = FrameCollection::new();
        let mut predictions = FrameCollection::new();
        for frame in 0..*frames as i64 {
            for i in 0..10 {
                let x = i as f64 * 40.0;
                labels.insert((frame, "A", (x, 0.0), (x + 30.0, 30.0))).unwrap();
                predictions
                    .insert((frame, "A", (x + 2.0, 1.0), (x + 31.0, 31.0), 0.8))
                    .unwrap();
            }
        }
        let config = MetricsConfig::default();

        group.bench_with_input(BenchmarkId::from_parameter(frames), frames, |b, _| {
            b.iter(|| compute_metrics(black_box(&labels), black_box(&predictions), &config));
        });
    }
    group.finish();
}

fn bench_f_score(c: &mut Criterion) {
    c.bench_function("f_score_calculation", |b| {
        b.iter(|| calculate_f_score(black_box(0.8), black_box(0.7)));
    });
}

fn bench_disjoint_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("disjoint_generation");
    let existing = grid_rects(40, 0.0, None);

    for count in [1, 10, 50].iter() {
        let generator = DisjointBoxGenerator::new(*count, 5.0, 5.0, 100).with_bounds(1280.0, 720.0);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| generator.generate(black_box(&existing), &mut rng));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_iou_calculation,
    bench_iou_matrix,
    bench_match_frame,
    bench_compute_metrics,
    bench_f_score,
    bench_disjoint_generation,
);
criterion_main!(benches);
