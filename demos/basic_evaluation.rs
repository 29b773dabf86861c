//! Basic evaluation example demonstrating core functionality.

use detection_eval::metrics::calculate_iou;
use detection_eval::records::collection_from_str;
use detection_eval::{DetectionDataset, MatchStrategy, MetricsConfig, Rectangle};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Detection Evaluation Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation");
    let a = Rectangle::new(1, "person", (10.0, 10.0), (60.0, 60.0));
    let b = Rectangle::new(1, "person", (30.0, 30.0), (80.0, 80.0));
    println!("   IoU between overlapping boxes: {:.4}", calculate_iou(&a, &b));
    println!("   Intersection area: {}", a.intersection_area(&b));
    println!("   Union area: {}", a.union_area(&b));
    println!();

    // Example 2: Load delimited records
    println!("2. Loading Records");
    let labels = collection_from_str(
        "img1, person, 100, 100, 300, 250\n\
         img1, car, 350, 200, 450, 320\n\
         img2, person, 10, 10, 60, 120\n",
        ",",
    )?;
    let predictions = collection_from_str(
        "img1, person, 105, 98, 298, 255, 0.92\n\
         img1, car, 360, 210, 455, 318, 0.81\n\
         img1, car, 20, 20, 40, 40, 0.35\n\
         img2, person, 200, 200, 260, 320, 0.66\n",
        ",",
    )?;
    info!(
        "loaded {} labels and {} predictions over {} frames",
        labels.len(),
        predictions.len(),
        labels.frame_count()
    );
    println!();

    // Example 3: Aggregate metrics
    println!("3. Precision / Recall / F-score");
    let dataset = DetectionDataset::from_collections(labels, predictions);
    for strategy in [MatchStrategy::ManyToOne, MatchStrategy::Greedy] {
        let config = MetricsConfig::default().with_strategy(strategy);
        let metrics = dataset.metrics(&config)?;
        println!(
            "   {:?}: precision={:.4} recall={:.4} f_score={:.4}",
            strategy, metrics.precision, metrics.recall, metrics.f_score
        );
        for (frame_id, counts) in &metrics.per_frame {
            println!(
                "     {}: tp={} fp={} fn={}",
                frame_id, counts.true_positives, counts.false_positives, counts.false_negatives
            );
        }
    }
    println!();

    // Example 4: Stricter confidence threshold
    println!("4. Confidence Threshold Sweep");
    for threshold in [0.3, 0.5, 0.7, 0.9] {
        let (p, r, f) = dataset.metrics(&MetricsConfig::new(threshold, 0.5))?.as_tuple();
        println!("   conf>={:.1}: P={:.4} R={:.4} F={:.4}", threshold, p, r, f);
    }

    Ok(())
}
