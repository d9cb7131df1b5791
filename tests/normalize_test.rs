use roadmapper::error::GenerationError;
use roadmapper::model::builder::{NodeBuilder, RoadmapBuilder};
use roadmapper::model::{RoadmapNode, RoadmapResult};
use roadmapper::normalize::{check_dependencies, dedup, normalize, prune_dangling, rescale};

fn sample() -> RoadmapResult {
    RoadmapBuilder::new(&["Data Structures"])
        .topic("1", "Arrays", 4.0)
            .sub("1.1", "Indexing", 1.0)
            .sub("1.2", "Slicing", 1.5)
            .build()
        .topic("2", "Linked Lists", 3.0)
            .requires("1")
            .subtopic(
                NodeBuilder::new("2.1", "ARRAYS", 2.0)
                    .requires("2")
                    .sub("2.1.1", "Dynamic Arrays", 1.0)
                    .done(),
            )
            .sub("2.2", "Doubly Linked Lists", 1.0)
            .build()
        .topic("3", "Hash Maps", 2.5)
            .requires("2.1")
            .build()
        .build()
}

#[test]
fn test_dedup_drops_later_duplicate_and_its_subtree() {
    let result = dedup(sample());

    assert!(result.find("1").is_some());
    assert!(result.find("2.1").is_none());
    assert!(result.find("2.1.1").is_none());

    let linked = result.find("2").unwrap();
    let ids: Vec<&str> = linked.subtopics.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["2.2"]);
    assert_eq!(result.ids(), vec!["1", "1.1", "1.2", "2", "2.2", "3"]);
}

#[test]
fn test_dedup_is_idempotent() {
    let once = dedup(sample());
    let twice = dedup(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_dedup_ignores_case_and_surrounding_spaces() {
    let result = RoadmapBuilder::new(&[])
        .topic("1", "Binary Search", 1.0).build()
        .topic("2", " binary SEARCH ", 1.0).build()
        .topic("3", "Sorting", 1.0).build()
        .build();
    let result = dedup(result);
    assert_eq!(result.ids(), vec!["1", "3"]);
}

#[test]
fn test_dedup_keeps_topics_differing_in_inner_spacing() {
    let result = RoadmapBuilder::new(&[])
        .topic("1", "Binary  Search", 1.0).build()
        .topic("2", "Binary Search", 1.0).build()
        .build();
    assert_eq!(dedup(result).ids(), vec!["1", "2"]);
}

#[test]
fn test_dedup_does_not_merge_prerequisites() {
    let result = RoadmapBuilder::new(&[])
        .topic("1", "A", 1.0).build()
        .topic("2", "B", 1.0).build()
        .topic("3", "a", 1.0).requires("2").build()
        .build();
    let result = dedup(result);
    assert!(result.find("1").unwrap().prerequisites.is_empty());
}

#[test]
fn test_rescale_hits_target() {
    let original = sample();
    let target = 10.0;
    let scaled = rescale(original.clone(), Some(target));
    let tolerance = 0.01 * scaled.node_count() as f64;
    assert!((scaled.total_hours() - target).abs() <= tolerance, "total {}", scaled.total_hours());

    // Each node is scaled by the same factor and rounded to two decimals.
    let scale = target / original.total_hours();
    for (before, after) in original.flatten().iter().zip(scaled.flatten().iter()) {
        assert_eq!(before.id, after.id);
        let expected = (before.estimated_time_hours * scale * 100.0).round() / 100.0;
        assert_eq!(after.estimated_time_hours, expected);
    }
}

#[test]
fn test_rescale_noops() {
    let original = sample();
    assert_eq!(rescale(original.clone(), None), original);
    assert_eq!(rescale(original.clone(), Some(0.0)), original);
    assert_eq!(rescale(original.clone(), Some(-5.0)), original);
    assert_eq!(rescale(original.clone(), Some(f64::NAN)), original);

    let zero = RoadmapBuilder::new(&[])
        .topic("1", "A", 0.0).sub("1.1", "B", 0.0).build()
        .build();
    assert_eq!(rescale(zero.clone(), Some(10.0)), zero);
}

#[test]
fn test_normalize_dedups_then_rescales() {
    let result = normalize(sample(), Some(20.0));
    assert!(result.find("2.1").is_none());
    assert!((result.total_hours() - 20.0).abs() <= 0.01 * result.node_count() as f64);
}

#[test]
fn test_prune_dangling_after_dedup() {
    let (pruned, removed) = prune_dangling(dedup(sample()));
    assert_eq!(removed, 1);
    assert!(pruned.find("3").unwrap().prerequisites.is_empty());
    assert_eq!(pruned.find("2").unwrap().prerequisites, vec!["1".to_string()]);

    let (again, removed_again) = prune_dangling(pruned.clone());
    assert_eq!(removed_again, 0);
    assert_eq!(again, pruned);
}

#[test]
fn test_check_dependencies_accepts_dag() {
    check_dependencies(&sample()).expect("sample is a DAG");
}

#[test]
fn test_check_dependencies_rejects_cycle() {
    let cyclic = RoadmapBuilder::new(&[])
        .topic("1", "A", 1.0).requires("3").build()
        .topic("2", "B", 1.0).requires("1").build()
        .topic("3", "C", 1.0).requires("2").build()
        .build();
    match check_dependencies(&cyclic) {
        Err(GenerationError::InvalidDependencyGraph(msg)) => assert!(msg.contains("cycle")),
        other => panic!("expected cycle, got {:?}", other),
    }

    let self_loop = RoadmapBuilder::new(&[]).topic("1", "A", 1.0).requires("1").build().build();
    assert!(matches!(check_dependencies(&self_loop), Err(GenerationError::InvalidDependencyGraph(_))));
}

#[test]
fn test_check_dependencies_rejects_duplicate_ids() {
    let dup = RoadmapBuilder::new(&[])
        .topic("1", "A", 1.0).build()
        .topic("1", "B", 1.0).build()
        .build();
    match check_dependencies(&dup) {
        Err(GenerationError::InvalidDependencyGraph(msg)) => assert!(msg.contains("duplicate")),
        other => panic!("expected duplicate id, got {:?}", other),
    }
}

#[test]
fn test_check_dependencies_handles_long_chains() {
    let mut builder = RoadmapBuilder::new(&["Chain"]);
    for i in 0..100_000 {
        let mut node = RoadmapNode::new(i.to_string(), format!("Step {}", i), 0.1);
        if i > 0 {
            node.prerequisites.push((i - 1).to_string());
        }
        builder = builder.push(node);
    }
    let chain = builder.build();
    check_dependencies(&chain).expect("a linear chain is a DAG");

    let mut looped = chain;
    looped.roadmap[0].prerequisites.push("99999".to_string());
    assert!(matches!(check_dependencies(&looped), Err(GenerationError::InvalidDependencyGraph(_))));
}
