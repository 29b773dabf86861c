//! Property-based tests using proptest
//!
//! These tests verify geometric and aggregation invariants that should
//! always hold regardless of the input values.

use detection_eval::disjoint::DisjointBoxGenerator;
use detection_eval::evaluator::evaluate_frame;
use detection_eval::metrics::calculate_precision_recall;
use detection_eval::{MatchCounts, MetricsConfig, Rectangle};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

prop_compose! {
    fn arb_rect(label: &'static str)(
        x in 0.0f64..100.0,
        y in 0.0f64..100.0,
        w in 0.0f64..50.0,
        h in 0.0f64..50.0,
    ) -> Rectangle {
        Rectangle::new(1, label, (x, y), (x + w, y + h))
    }
}

// Property: intersection and IoU are symmetric
proptest! {
    #[test]
    fn prop_intersection_symmetric(a in arb_rect("A"), b in arb_rect("A")) {
        prop_assert_eq!(a.intersection_area(&b), b.intersection_area(&a));
    }

    #[test]
    fn prop_iou_symmetric(a in arb_rect("A"), b in arb_rect("A")) {
        prop_assert!((a.iou(&b) - b.iou(&a)).abs() < 1e-12,
                     "IoU should be symmetric: {} vs {}", a.iou(&b), b.iou(&a));
    }
}

// Property: areas are well behaved
proptest! {
    #[test]
    fn prop_intersection_non_negative(a in arb_rect("A"), b in arb_rect("A")) {
        let inter = a.intersection_area(&b);
        prop_assert!(inter >= 0.0);
        if !a.overlaps(&b) {
            prop_assert_eq!(inter, 0.0);
        }
    }

    #[test]
    fn prop_union_identity(a in arb_rect("A"), b in arb_rect("A")) {
        prop_assert_eq!(a.union_area(&b), a.area() + b.area() - a.intersection_area(&b));
    }

    #[test]
    fn prop_iou_range(a in arb_rect("A"), b in arb_rect("A")) {
        let iou = a.iou(&b);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&iou), "IoU should be in [0,1], got {}", iou);
    }
}

// Property: cross-label candidates never match
proptest! {
    #[test]
    fn prop_cross_label_never_matches(a in arb_rect("A"), b in arb_rect("B"), t in 0.0f64..=1.0) {
        prop_assert_eq!(a.matches(&[b], t), vec![false]);
    }
}

// Property: per-frame counts are consistent with input sizes
proptest! {
    #[test]
    fn prop_frame_counts_consistent(
        labels in prop::collection::vec(arb_rect("A"), 0..8),
        predictions in prop::collection::vec(arb_rect("A"), 0..8),
    ) {
        let counts = evaluate_frame(&labels, &predictions, &MetricsConfig::default());
        prop_assert_eq!(counts.true_positives + counts.false_positives, predictions.len());
        prop_assert!(counts.false_negatives <= labels.len());

        let pr = calculate_precision_recall(counts);
        prop_assert!((0.0..=1.0).contains(&pr.precision));
        prop_assert!((0.0..=1.0).contains(&pr.recall));
    }

    #[test]
    fn prop_precision_recall_zero_without_tp(fp in 0usize..1000, fn_ in 0usize..1000) {
        let pr = calculate_precision_recall(MatchCounts {
            true_positives: 0,
            false_positives: fp,
            false_negatives: fn_,
        });
        prop_assert_eq!((pr.precision, pr.recall), (0.0, 0.0));
    }
}

// Property: generated boxes never overlap inputs or each other
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_disjoint_boxes_never_overlap(
        existing in prop::collection::vec(arb_rect("A"), 0..6),
        count in 0usize..6,
        seed in any::<u64>(),
    ) {
        let generator = DisjointBoxGenerator::new(count, 2.0, 2.0, 50).with_bounds(160.0, 160.0);
        let mut rng = StdRng::seed_from_u64(seed);
        let boxes = generator.generate(&existing, &mut rng);
        prop_assert!(boxes.len() <= count);

        let generated: Vec<Rectangle> = boxes.iter().map(|b| b.into_rectangle(1, "bg")).collect();
        for (i, g) in generated.iter().enumerate() {
            for e in &existing {
                prop_assert!(!g.overlaps(e), "{:?} overlaps existing {:?}", g, e);
            }
            for other in &generated[i + 1..] {
                prop_assert!(!g.overlaps(other), "{:?} overlaps generated {:?}", g, other);
            }
        }
    }
}
