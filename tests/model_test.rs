use roadmapper::model::builder::{NodeBuilder, RoadmapBuilder};
use roadmapper::model::{RoadmapNode, RoadmapResult};
use serde_json::json;

fn tree() -> RoadmapResult {
    RoadmapBuilder::new(&["Rust"])
        .topic("1", "Ownership", 3.0)
            .sub("1.1", "Borrowing", 1.0)
            .build()
        .topic("2", "Traits", 2.0)
            .requires("1.1")
            .subtopic(NodeBuilder::new("2.1", "Generics", 1.0).requires("2").sub("2.1.1", "Bounds", 0.5).done())
            .build()
        .build()
}

#[test]
fn test_total_counts_every_node() {
    assert_eq!(tree().total_hours(), 7.5);
    assert_eq!(tree().node_count(), 5);
}

#[test]
fn test_find_and_ids() {
    let t = tree();
    assert_eq!(t.find("2.1.1").map(|n| n.topic.as_str()), Some("Bounds"));
    assert!(t.find("9").is_none());
    assert_eq!(t.ids(), vec!["1", "1.1", "2", "2.1", "2.1.1"]);
    assert_eq!(t.find("2.1.1").unwrap().id_depth(), 3);
}

#[test]
fn test_flatten_links_parents() {
    let flat = tree().flatten();
    assert_eq!(flat.len(), 5);
    assert_eq!(flat[0].parent_id, None);
    assert_eq!(flat[0].depth, 0);
    let bounds = flat.iter().find(|t| t.id == "2.1.1").unwrap();
    assert_eq!(bounds.parent_id.as_deref(), Some("2.1"));
    assert_eq!(bounds.depth, 2);
    assert_eq!(bounds.prerequisites, vec!["2.1".to_string()]);
}

#[test]
fn test_serializes_to_wire_shape() {
    let value = serde_json::to_value(tree()).unwrap();
    assert_eq!(value["main_topics"], json!(["Rust"]));
    assert_eq!(value["roadmap"][0]["subtopics"][0]["id"], "1.1");
    // Leaves omit the subtopics field.
    assert!(value["roadmap"][0]["subtopics"][0].get("subtopics").is_none());
    assert_eq!(value["roadmap"][1]["prerequisites"], json!(["1.1"]));

    let back: RoadmapResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, tree());
}

#[test]
fn test_negative_or_missing_hours_become_zero() {
    let node: RoadmapNode = serde_json::from_value(json!({"id": "1", "topic": "A", "estimated_time_hours": -3})).unwrap();
    assert_eq!(node.estimated_time_hours, 0.0);
    let node: RoadmapNode = serde_json::from_value(json!({"id": "1", "topic": "A"})).unwrap();
    assert_eq!(node.estimated_time_hours, 0.0);
    assert!(node.prerequisites.is_empty());
}

#[test]
fn test_numeric_prerequisites_are_stringified() {
    let node: RoadmapNode =
        serde_json::from_value(json!({"id": 2, "topic": "B", "prerequisites": [1, "1.2", ""]})).unwrap();
    assert_eq!(node.id, "2");
    assert_eq!(node.prerequisites, vec!["1".to_string(), "1.2".to_string()]);
}
