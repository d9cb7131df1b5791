use crate::model::{RoadmapNode, RoadmapResult};

pub struct RoadmapBuilder {
    main_topics: Vec<String>,
    pub nodes: Vec<RoadmapNode>, // public so tests can tamper with the tree directly
}

impl RoadmapBuilder {
    pub fn new(main_topics: &[&str]) -> Self {
        Self {
            main_topics: main_topics.iter().map(|s| s.to_string()).collect(),
            nodes: Vec::new(),
        }
    }

    pub fn topic(self, id: &str, topic: &str, hours: f64) -> TopicBuilder {
        TopicBuilder {
            roadmap_builder: self,
            node: NodeBuilder::new(id, topic, hours),
        }
    }

    /// Append an already-built node (use `NodeBuilder` for deep nesting).
    pub fn push(mut self, node: RoadmapNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn build(self) -> RoadmapResult {
        RoadmapResult {
            main_topics: self.main_topics,
            roadmap: self.nodes,
        }
    }
}

pub struct TopicBuilder {
    roadmap_builder: RoadmapBuilder,
    node: NodeBuilder,
}

impl TopicBuilder {
    pub fn requires(mut self, id: &str) -> Self {
        self.node = self.node.requires(id);
        self
    }

    /// Leaf subtopic depending on this topic.
    pub fn sub(mut self, id: &str, topic: &str, hours: f64) -> Self {
        self.node = self.node.sub(id, topic, hours);
        self
    }

    pub fn subtopic(mut self, node: RoadmapNode) -> Self {
        self.node = self.node.child(node);
        self
    }

    pub fn build(mut self) -> RoadmapBuilder {
        self.roadmap_builder.nodes.push(self.node.done());
        self.roadmap_builder
    }
}

/// Standalone node builder for trees deeper than two levels.
pub struct NodeBuilder {
    node: RoadmapNode,
}

impl NodeBuilder {
    pub fn new(id: &str, topic: &str, hours: f64) -> Self {
        Self {
            node: RoadmapNode::new(id, topic, hours),
        }
    }

    pub fn requires(mut self, id: &str) -> Self {
        self.node.prerequisites.push(id.to_string());
        self
    }

    pub fn sub(mut self, id: &str, topic: &str, hours: f64) -> Self {
        let mut child = RoadmapNode::new(id, topic, hours);
        child.prerequisites.push(self.node.id.clone());
        self.node.subtopics.push(child);
        self
    }

    pub fn child(mut self, node: RoadmapNode) -> Self {
        self.node.subtopics.push(node);
        self
    }

    pub fn done(self) -> RoadmapNode {
        self.node
    }
}
