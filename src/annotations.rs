//! Conversion to and from the annotation-dictionary interchange format.
//!
//! The format maps a frame id to a map from label to `(x, y, width, height)`
//! boxes. It has no room for confidences, which are dropped on export.

use crate::error::Result;
use crate::frames::FrameCollection;
use crate::types::{FrameId, Rectangle};
use std::collections::BTreeMap;

/// A box in `(x, y, width, height)` form.
pub type XywhBox = (f64, f64, f64, f64);

/// Frame id → label → boxes.
pub type AnnotationMap = BTreeMap<FrameId, BTreeMap<String, Vec<XywhBox>>>;

/// Export a collection; corners become `(x, y, width, height)`.
pub fn to_annotation_map(collection: &FrameCollection) -> AnnotationMap {
    let mut map = AnnotationMap::new();
    for rect in collection.rectangles() {
        map.entry(rect.frame_id().clone())
            .or_default()
            .entry(rect.label().to_string())
            .or_default()
            .push((rect.left(), rect.top(), rect.width(), rect.height()));
    }
    map
}

/// Import an annotation map as ground-truth rectangles.
///
/// Within a frame, rectangles are grouped label by label in label order.
pub fn from_annotation_map(map: &AnnotationMap) -> FrameCollection {
    map.iter()
        .flat_map(|(frame_id, by_label)| {
            by_label.iter().flat_map(move |(label, boxes)| {
                boxes.iter().map(move |&(x, y, w, h)| {
                    Rectangle::new(frame_id.clone(), label.as_str(), (x, y), (x + w, y + h))
                })
            })
        })
        .collect()
}

/// Parse an annotation map from JSON. Frame keys are read as names.
///
/// # Example
///
/// ```
/// use detection_eval::annotations::{annotation_map_from_str, from_annotation_map};
///
/// let map = annotation_map_from_str(r#"{"img_01": {"car": [[10.0, 20.0, 30.0, 40.0]]}}"#).unwrap();
/// let collection = from_annotation_map(&map);
/// assert_eq!(collection.len(), 1);
/// ```
pub fn annotation_map_from_str(json_str: &str) -> Result<AnnotationMap> {
    Ok(serde_json::from_str(json_str)?)
}

/// Serialize an annotation map to JSON.
///
/// JSON object keys are strings, so a [`FrameId::Number`] key is written as
/// its decimal text and reads back through [`annotation_map_from_str`] as a
/// [`FrameId::Name`]. Key frames by name when the map must round-trip.
pub fn annotation_map_to_string(map: &AnnotationMap) -> Result<String> {
    Ok(serde_json::to_string(map)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_corners_to_xywh() {
        let collection = FrameCollection::try_from_inputs(vec![
            (1, "A", (2.0, 2.0), (12.0, 22.0), 0.8),
            (1, "A", (80.0, 80.0), (110.0, 120.0), 0.9),
            (1, "B", (0.0, 0.0), (5.0, 5.0), 0.7),
        ])
        .unwrap();

        let map = to_annotation_map(&collection);
        let frame = &map[&FrameId::from(1)];
        assert_eq!(frame["A"], vec![(2.0, 2.0, 10.0, 20.0), (80.0, 80.0, 30.0, 40.0)]);
        assert_eq!(frame["B"], vec![(0.0, 0.0, 5.0, 5.0)]);
    }

    #[test]
    fn test_import_xywh_to_corners() {
        let mut map = AnnotationMap::new();
        map.entry(FrameId::from("f"))
            .or_default()
            .insert("dog".to_string(), vec![(1.0, 2.0, 3.0, 4.0)]);

        let collection = from_annotation_map(&map);
        let rect = &collection.get(&FrameId::from("f"))[0];
        assert_eq!(rect, &Rectangle::new("f", "dog", (1.0, 2.0), (4.0, 6.0)));
    }

    #[test]
    fn test_confidence_is_dropped() {
        let collection = FrameCollection::try_from_inputs(vec![("f", "A", (0.0, 0.0), (1.0, 1.0), 0.5)]).unwrap();
        let back = from_annotation_map(&to_annotation_map(&collection));
        assert_eq!(back.get(&FrameId::from("f"))[0].confidence(), None);
    }

    #[test]
    fn test_json_numeric_keys_read_back_as_names() {
        let collection = FrameCollection::try_from_inputs(vec![(1, "A", (0.0, 0.0), (2.0, 2.0))]).unwrap();
        let text = annotation_map_to_string(&to_annotation_map(&collection)).unwrap();
        assert_eq!(text, r#"{"1":{"A":[[0.0,0.0,2.0,2.0]]}}"#);

        let map = annotation_map_from_str(&text).unwrap();
        assert!(map.contains_key(&FrameId::from("1")));
        assert!(!map.contains_key(&FrameId::from(1)));
    }

    #[test]
    fn test_json_string_keys() {
        let json = r#"{"frame_a": {"A": [[0.0, 0.0, 2.0, 2.0]], "B": []}}"#;
        let map = annotation_map_from_str(json).unwrap();
        assert_eq!(map[&FrameId::from("frame_a")]["A"].len(), 1);

        let text = annotation_map_to_string(&map).unwrap();
        assert_eq!(annotation_map_from_str(&text).unwrap(), map);
    }
}
