//! Inject background boxes that overlap no existing annotation.

use detection_eval::annotations::{annotation_map_to_string, to_annotation_map};
use detection_eval::disjoint::DisjointBoxGenerator;
use detection_eval::{EvalConfig, FrameCollection};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EvalConfig::from_json_str(
        r#"{
            "disjoint": {
                "count": 4,
                "min_width": 16.0,
                "min_height": 16.0,
                "max_retries": 200,
                "bounds": [640.0, 480.0],
                "seed": 42
            }
        }"#,
    )?;

    let mut collection = FrameCollection::try_from_inputs(vec![
        ("frame_000", "car", (40.0, 60.0), (220.0, 180.0)),
        ("frame_000", "person", (300.0, 100.0), (360.0, 280.0)),
        ("frame_001", "car", (0.0, 0.0), (320.0, 240.0)),
        ("frame_001", "car", (320.0, 240.0), (640.0, 480.0)),
    ])?;

    let generator = DisjointBoxGenerator::from_config(&config.disjoint)?;
    let mut rng = config.disjoint.rng();
    let added = generator.inject_background(&mut collection, "background", &mut rng);
    info!("added {} background boxes", added);

    for (frame_id, rects) in collection.iter() {
        println!("{}:", frame_id);
        for rect in rects {
            println!(
                "  {:<10} ({:>6.1}, {:>6.1}) - ({:>6.1}, {:>6.1})",
                rect.label(),
                rect.left(),
                rect.top(),
                rect.right(),
                rect.bottom()
            );
        }
    }

    println!("\n{}", annotation_map_to_string(&to_annotation_map(&collection))?);
    Ok(())
}
