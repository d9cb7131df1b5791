use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashSet;
use crate::error::GenerationError;
use crate::model::{RoadmapNode, RoadmapResult};

/// Dedup, then rescale to `total_hours` when one is given.
pub fn normalize(result: RoadmapResult, total_hours: Option<f64>) -> RoadmapResult {
    rescale(dedup(result), total_hours)
}

/// Drop every node whose topic (case-insensitive) already appeared earlier in a
/// depth-first walk of the whole tree, together with its subtree.
///
/// First occurrence wins and sibling order is kept. Prerequisites of dropped nodes are
/// not merged into the survivor.
pub fn dedup(result: RoadmapResult) -> RoadmapResult {
    let mut seen = HashSet::new();
    RoadmapResult {
        main_topics: result.main_topics,
        roadmap: dedup_nodes(result.roadmap, &mut seen),
    }
}

fn dedup_nodes(nodes: Vec<RoadmapNode>, seen: &mut HashSet<String>) -> Vec<RoadmapNode> {
    let mut kept = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        if !seen.insert(topic_key(&node.topic)) {
            continue;
        }
        node.subtopics = dedup_nodes(std::mem::take(&mut node.subtopics), seen);
        kept.push(node);
    }
    kept
}

/// Dedup key: trimmed and lowercased. Inner spacing is left as is.
pub fn topic_key(topic: &str) -> String {
    topic.trim().to_lowercase()
}

/// Scale every node so the tree's total (see `RoadmapResult::total_hours`) equals
/// `total_hours`, rounding each node to two decimals.
///
/// No-op when the target is absent, not positive, or the current total is zero.
pub fn rescale(result: RoadmapResult, total_hours: Option<f64>) -> RoadmapResult {
    let Some(target) = total_hours.filter(|t| t.is_finite() && *t > 0.0) else {
        return result;
    };
    let actual = result.total_hours();
    if !(actual.is_finite() && actual > 0.0) {
        return result;
    }
    let scale = target / actual;
    RoadmapResult {
        main_topics: result.main_topics,
        roadmap: result.roadmap.into_iter().map(|n| scale_node(n, scale)).collect(),
    }
}

fn scale_node(mut node: RoadmapNode, scale: f64) -> RoadmapNode {
    node.estimated_time_hours = round2(node.estimated_time_hours * scale);
    node.subtopics = node.subtopics.into_iter().map(|n| scale_node(n, scale)).collect();
    node
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Remove prerequisite references to ids that do not exist in the tree.
///
/// Dedup can leave these behind. Returns the cleaned roadmap and how many references went.
pub fn prune_dangling(result: RoadmapResult) -> (RoadmapResult, usize) {
    let ids: HashSet<String> = result.ids().into_iter().map(str::to_string).collect();
    let mut removed = 0;
    let roadmap = result
        .roadmap
        .into_iter()
        .map(|n| prune_node(n, &ids, &mut removed))
        .collect();
    (
        RoadmapResult {
            main_topics: result.main_topics,
            roadmap,
        },
        removed,
    )
}

fn prune_node(mut node: RoadmapNode, ids: &HashSet<String>, removed: &mut usize) -> RoadmapNode {
    let before = node.prerequisites.len();
    node.prerequisites.retain(|p| ids.contains(p));
    *removed += before - node.prerequisites.len();
    node.subtopics = node.subtopics.into_iter().map(|n| prune_node(n, ids, removed)).collect();
    node
}

/// Check ids are unique and the prerequisite edges form a DAG.
///
/// Edges run from prerequisite to dependent. References to unknown ids are ignored
/// here; `prune_dangling` handles those.
pub fn check_dependencies(result: &RoadmapResult) -> Result<(), GenerationError> {
    let flat = result.flatten();
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::with_capacity(flat.len(), flat.len());
    for topic in &flat {
        if graph.contains_node(topic.id.as_str()) {
            return Err(GenerationError::InvalidDependencyGraph(format!("duplicate id {:?}", topic.id)));
        }
        graph.add_node(topic.id.as_str());
    }
    for topic in &flat {
        for dep in &topic.prerequisites {
            if graph.contains_node(dep.as_str()) {
                graph.add_edge(dep.as_str(), topic.id.as_str(), ());
            }
        }
    }

    toposort(&graph, None).map(|_| ()).map_err(|cycle| {
        GenerationError::InvalidDependencyGraph(format!("prerequisite cycle through {:?}", cycle.node_id()))
    })
}
