pub mod builder;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single topic in a generated roadmap.
///
/// `subtopics` is structural nesting; `prerequisites` are dependency edges by id
/// and may point anywhere in the same roadmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapNode {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub topic: String,
    #[serde(default, deserialize_with = "de_hours")]
    pub estimated_time_hours: f64,
    #[serde(default, deserialize_with = "de_ids")]
    pub prerequisites: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "de_subtopics")]
    pub subtopics: Vec<RoadmapNode>,
}

/// Top-level output of one generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RoadmapResult {
    #[serde(default, deserialize_with = "de_ids")]
    pub main_topics: Vec<String>,
    pub roadmap: Vec<RoadmapNode>,
}

/// One node of a flattened roadmap, in depth-first pre-order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlatTopic {
    pub id: String,
    pub topic: String,
    pub estimated_time_hours: f64,
    pub prerequisites: Vec<String>,
    pub parent_id: Option<String>,
    pub depth: usize,
}

impl RoadmapNode {
    pub fn new(id: impl Into<String>, topic: impl Into<String>, hours: f64) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            estimated_time_hours: hours,
            prerequisites: Vec::new(),
            subtopics: Vec::new(),
        }
    }

    /// Hours of this node plus every descendant.
    pub fn subtree_hours(&self) -> f64 {
        self.estimated_time_hours + self.subtopics.iter().map(|n| n.subtree_hours()).sum::<f64>()
    }

    pub fn subtree_len(&self) -> usize {
        1 + self.subtopics.iter().map(|n| n.subtree_len()).sum::<usize>()
    }

    /// Nesting depth encoded in the id ("1" is 1, "1.2.1" is 3).
    pub fn id_depth(&self) -> usize {
        self.id.split('.').filter(|s| !s.is_empty()).count()
    }
}

impl RoadmapResult {
    pub fn new(main_topics: Vec<String>, roadmap: Vec<RoadmapNode>) -> Self {
        Self { main_topics, roadmap }
    }

    /// Sum of every node's hours, parents and subtopics alike.
    ///
    /// This counts a parent and its children separately; rescaling relies on the same rule.
    pub fn total_hours(&self) -> f64 {
        self.roadmap.iter().map(|n| n.subtree_hours()).sum()
    }

    pub fn node_count(&self) -> usize {
        self.roadmap.iter().map(|n| n.subtree_len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roadmap.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&RoadmapNode> {
        fn walk<'a>(nodes: &'a [RoadmapNode], id: &str) -> Option<&'a RoadmapNode> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = walk(&node.subtopics, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roadmap, id)
    }

    /// All ids in depth-first pre-order.
    pub fn ids(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack: Vec<&RoadmapNode> = self.roadmap.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node.id.as_str());
            stack.extend(node.subtopics.iter().rev());
        }
        out
    }

    /// Flatten into rows with parent links, the shape a store inserts before wiring prerequisites.
    pub fn flatten(&self) -> Vec<FlatTopic> {
        fn walk(nodes: &[RoadmapNode], parent: Option<&str>, depth: usize, out: &mut Vec<FlatTopic>) {
            for node in nodes {
                out.push(FlatTopic {
                    id: node.id.clone(),
                    topic: node.topic.clone(),
                    estimated_time_hours: node.estimated_time_hours,
                    prerequisites: node.prerequisites.clone(),
                    parent_id: parent.map(str::to_string),
                    depth,
                });
                walk(&node.subtopics, Some(node.id.as_str()), depth + 1, out);
            }
        }
        let mut out = Vec::with_capacity(self.node_count());
        walk(&self.roadmap, None, 0, &mut out);
        out
    }
}

// Completion output is loosely typed: ids come back as numbers, hours as strings.

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    scalar_to_string(&v).ok_or_else(|| serde::de::Error::custom(format!("invalid id: {}", v)))
}

fn de_hours<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = Value::deserialize(d)?;
    let hours = match &v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .split_whitespace()
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if hours.is_finite() && hours > 0.0 { hours } else { 0.0 })
}

fn de_ids<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).filter(|s| !s.is_empty()).collect(),
        other => scalar_to_string(&other).filter(|s| !s.is_empty()).into_iter().collect(),
    })
}

fn de_subtopics<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RoadmapNode>, D::Error> {
    Ok(Option::<Vec<RoadmapNode>>::deserialize(d)?.unwrap_or_default())
}
