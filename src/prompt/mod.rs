use crate::profile::{ProfileConfig, Purpose, lookup};
use serde_json::Value;
use std::fmt::Write;

/// Build the instruction sent to the completion service.
///
/// Pure function of its inputs. The same template serves one or many topics.
pub fn build_prompt(topics: &[String], purpose: Purpose, total_hours: Option<f64>) -> String {
    let profile = lookup(purpose);
    let topics: Vec<&str> = topics.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
    let topic_list = if topics.is_empty() {
        "General Studies".to_string()
    } else {
        // JSON string literals, so quotes in a topic cannot break the sentence.
        topics.iter().map(|t| Value::from(*t).to_string()).collect::<Vec<_>>().join(", ")
    };

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "You are a study planning assistant. Generate a hierarchical learning roadmap covering exactly these topics: {}.",
        topic_list
    );
    out.push('\n');
    write_purpose(&mut out, profile);

    if topics.len() > 1 {
        out.push('\n');
        out.push_str(
            "These topics must form ONE connected roadmap, not separate lists. \
             Merge shared prerequisites into a single node that every dependent topic references, \
             order the topics so foundations come first, and never repeat a topic name anywhere in the roadmap.\n",
        );
    } else {
        out.push_str("Never repeat a topic name anywhere in the roadmap.\n");
    }

    if let Some(hours) = total_hours.filter(|h| h.is_finite() && *h > 0.0) {
        let _ = writeln!(
            out,
            "The learner has about {} hours in total; size estimated_time_hours so the whole roadmap fits that budget.",
            format_hours(hours)
        );
    }

    out.push('\n');
    write_shape(&mut out, &topics);
    out
}

fn write_purpose(out: &mut String, profile: &ProfileConfig) {
    let _ = writeln!(out, "Purpose of study: {}.", profile.label);
    let _ = writeln!(out, "- Depth: {}.", profile.depth);
    let _ = writeln!(out, "- Structure: {}.", profile.structure);
    let _ = writeln!(out, "- Content focus: {}.", profile.focus.join(", "));
    let _ = writeln!(
        out,
        "- Use {} to {} main topics, each with {} to {} subtopics.",
        profile.main_topics.start(),
        profile.main_topics.end(),
        profile.subtopics.start(),
        profile.subtopics.end()
    );
    let _ = writeln!(
        out,
        "- Typical durations: about {} hours per main topic and {} hours per subtopic.",
        format_hours(profile.main_topic_hours),
        format_hours(profile.subtopic_hours)
    );
}

fn write_shape(out: &mut String, topics: &[&str]) {
    let main_topics = serde_json::to_string(topics).unwrap_or_else(|_| "[]".to_string());
    let _ = write!(
        out,
        r#"Output strictly valid JSON in exactly this shape:
{{
  "main_topics": {main_topics},
  "roadmap": [
    {{
      "id": "1",
      "topic": "Main Concept A",
      "estimated_time_hours": 4,
      "prerequisites": [],
      "subtopics": [
        {{ "id": "1.1", "topic": "Sub A1", "estimated_time_hours": 2, "prerequisites": ["1"] }},
        {{ "id": "1.2", "topic": "Sub A2", "estimated_time_hours": 2, "prerequisites": ["1.1"] }}
      ]
    }},
    {{
      "id": "2",
      "topic": "Main Concept B",
      "estimated_time_hours": 3,
      "prerequisites": ["1.2"]
    }}
  ]
}}
Rules:
- "id" is a dotted string that encodes nesting ("1", "1.2", "1.2.1") and is unique.
- "prerequisites" lists ids that exist in this roadmap; "subtopics" is optional.
- Use double quotes only and no trailing commas.
Return only the JSON object. No markdown, no code fences, no explanation before or after it.
"#
    );
}

fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{:.1}", hours)
    }
}
