pub mod templates;

use crate::model::{RoadmapNode, RoadmapResult};
use crate::profile::{Purpose, lookup};
use templates::{FOCUS, TOPIC, sections};

/// Label used when the request carries no usable topic.
pub const PLACEHOLDER_TOPIC: &str = "General Studies";

/// Build a structurally valid roadmap without calling out.
///
/// Pure and deterministic: the same topics and purpose always yield the same tree.
pub fn synthesize(topics: &[String], purpose: Purpose) -> RoadmapResult {
    let profile = lookup(purpose);
    let primary = primary_topic(topics);

    let mut roadmap = Vec::new();
    for (idx, section) in sections(profile.template).iter().enumerate() {
        let focus = focus_label(profile.focus, idx);
        let id = (idx + 1).to_string();

        let mut node = RoadmapNode::new(id.clone(), render(section.title, primary, &focus), profile.main_topic_hours);
        if idx > 0 {
            node.prerequisites.push(idx.to_string());
        }

        for (sub_idx, pattern) in section.subtopics.iter().enumerate() {
            let mut sub = RoadmapNode::new(
                format!("{}.{}", id, sub_idx + 1),
                render(pattern, primary, &focus),
                profile.subtopic_hours,
            );
            sub.prerequisites.push(id.clone());
            node.subtopics.push(sub);
        }
        roadmap.push(node);
    }

    RoadmapResult::new(topics.to_vec(), roadmap)
}

/// Same as `synthesize`, for callers holding a raw purpose string.
pub fn synthesize_str(topics: &[String], purpose: &str) -> RoadmapResult {
    synthesize(topics, Purpose::parse(purpose))
}

fn primary_topic(topics: &[String]) -> &str {
    topics
        .iter()
        .map(|t| t.trim())
        .find(|t| !t.is_empty())
        .unwrap_or(PLACEHOLDER_TOPIC)
}

fn focus_label(focus: &[&str], idx: usize) -> String {
    let Some(raw) = focus.get(idx % focus.len().max(1)) else {
        return "Practice".to_string();
    };
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Practice".to_string(),
    }
}

fn render(pattern: &str, topic: &str, focus: &str) -> String {
    pattern.replace(TOPIC, topic).replace(FOCUS, focus)
}
