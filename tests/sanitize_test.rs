use roadmapper::error::GenerationError;
use roadmapper::sanitize::repair::repair_json;
use roadmapper::sanitize::{PREVIEW_LIMIT, extract_payload, sanitize_and_parse};
use serde_json::Value;

const CLEAN: &str = r#"{"main_topics":["Trees"],"roadmap":[{"id":"1","topic":"Tree Basics","estimated_time_hours":4,"prerequisites":[],"subtopics":[{"id":"1.1","topic":"DFS","estimated_time_hours":3,"prerequisites":["1"]}]}]}"#;

#[test]
fn test_scenario_fenced_with_commentary() {
    let raw = "Here you go:\n```json\n{\"roadmap\":[{\"id\":\"1\",\"topic\":\"A\",\"estimated_time_hours\":2,\"prerequisites\":[]}]}\n```\nHope this helps!";
    let result = sanitize_and_parse(raw).expect("should recover");
    assert_eq!(result.roadmap.len(), 1);
    let node = &result.roadmap[0];
    assert_eq!(node.id, "1");
    assert_eq!(node.topic, "A");
    assert_eq!(node.estimated_time_hours, 2.0);
    assert!(node.prerequisites.is_empty());
    assert!(node.subtopics.is_empty());
}

#[test]
fn test_wrapped_parses_like_unwrapped() {
    let plain = sanitize_and_parse(CLEAN).unwrap();
    let wrapped = format!("Sure! Here is the plan.\n```json\n{}\n```\nLet me know if you need changes.", CLEAN);
    assert_eq!(sanitize_and_parse(&wrapped).unwrap(), plain);

    let fenced_only = format!("```\n{}\n```", CLEAN);
    assert_eq!(sanitize_and_parse(&fenced_only).unwrap(), plain);
}

#[test]
fn test_repair_single_quoted_array() {
    let broken = r#"{"main_topics": ["Trees", 'Graphs'], "roadmap": [{"id": "1", "topic": "A", "estimated_time_hours": 1, "prerequisites": []}]}"#;
    let strict = r#"{"main_topics": ["Trees", "Graphs"], "roadmap": [{"id": "1", "topic": "A", "estimated_time_hours": 1, "prerequisites": []}]}"#;
    assert_eq!(sanitize_and_parse(broken).unwrap(), sanitize_and_parse(strict).unwrap());
}

#[test]
fn test_repair_trailing_commas() {
    let broken = r#"{"roadmap": [{"id": "1", "topic": "A", "estimated_time_hours": 1, "prerequisites": ["0",],},],}"#;
    let strict = r#"{"roadmap": [{"id": "1", "topic": "A", "estimated_time_hours": 1, "prerequisites": ["0"]}]}"#;
    assert_eq!(sanitize_and_parse(broken).unwrap(), sanitize_and_parse(strict).unwrap());
}

#[test]
fn test_repair_keeps_apostrophes_in_double_quoted_strings() {
    let broken = r#"{"roadmap": [{"id": "1", "topic": "Newton's Laws", "estimated_time_hours": 1, "prerequisites": [],}]}"#;
    let result = sanitize_and_parse(broken).unwrap();
    assert_eq!(result.roadmap[0].topic, "Newton's Laws");
}

#[test]
fn test_repair_unescapes_backslash_apostrophe_in_double_quoted_strings() {
    let broken = r#"{"roadmap": [{"id": "1", "topic": "Newton\'s Laws", "estimated_time_hours": 1, "prerequisites": [], "note": "a \"b\" c\\d"}]}"#;
    let result = sanitize_and_parse(broken).unwrap();
    assert_eq!(result.roadmap[0].topic, "Newton's Laws");

    let value: Value = serde_json::from_str(&repair_json(broken)).unwrap();
    assert_eq!(value["roadmap"][0]["note"], "a \"b\" c\\d");
}

#[test]
fn test_repair_single_quoted_string_with_apostrophe() {
    let repaired = repair_json("{'topic': 'Newton's Laws', 'ids': ['1']}");
    let value: Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(value["topic"], "Newton's Laws");
    assert_eq!(value["ids"][0], "1");
}

#[test]
fn test_repair_escapes_embedded_double_quote() {
    let repaired = repair_json(r#"{'quote': 'say "hi"'}"#);
    let value: Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(value["quote"], "say \"hi\"");
}

#[test]
fn test_repair_leaves_valid_json_untouched() {
    assert_eq!(repair_json(CLEAN), CLEAN);
}

#[test]
fn test_repair_python_literals_and_truncation() {
    let repaired = repair_json(r#"{"a": True, "b": None, "c": [1, 2,"#);
    let value: Value = serde_json::from_str(&repaired).unwrap();
    assert_eq!(value["a"], true);
    assert!(value["b"].is_null());
    assert_eq!(value["c"], serde_json::json!([1, 2]));
}

#[test]
fn test_truncated_output_keeps_complete_nodes() {
    let raw = r#"{"roadmap": [{"id": "1", "topic": "A", "estimated_time_hours": 1, "prerequisites": []}, {"id": "2", "topic": "B", "estim"#;
    let result = sanitize_and_parse(raw).unwrap();
    assert_eq!(result.roadmap.len(), 1);
    assert_eq!(result.roadmap[0].topic, "A");
}

#[test]
fn test_lenient_node_fields() {
    let raw = r#"{"main_topics": "Trees", "roadmap": [{"id": 1, "topic": "A", "estimated_time_hours": "2.5 hours", "prerequisites": null, "subtopics": null}]}"#;
    let result = sanitize_and_parse(raw).unwrap();
    assert_eq!(result.main_topics, vec!["Trees".to_string()]);
    let node = &result.roadmap[0];
    assert_eq!(node.id, "1");
    assert_eq!(node.estimated_time_hours, 2.5);
    assert!(node.prerequisites.is_empty());
    assert!(node.subtopics.is_empty());
}

#[test]
fn test_missing_or_empty_roadmap_is_malformed() {
    for raw in [r#"{"roadmap": []}"#, r#"{"plan": [1]}"#, r#"{"roadmap": "none"}"#] {
        match sanitize_and_parse(raw) {
            Err(GenerationError::MalformedOutput { reason, .. }) => {
                assert_eq!(reason, "missing or empty roadmap field")
            }
            other => panic!("expected malformed output, got {:?}", other),
        }
    }
}

#[test]
fn test_garbage_is_malformed_with_bounded_preview() {
    let raw = "x".repeat(PREVIEW_LIMIT * 3);
    match sanitize_and_parse(&raw) {
        Err(GenerationError::MalformedOutput { preview, .. }) => {
            assert!(preview.chars().count() <= PREVIEW_LIMIT + 3);
        }
        other => panic!("expected malformed output, got {:?}", other),
    }

    let unfixable = "{ this is : not [ json }";
    assert!(matches!(sanitize_and_parse(unfixable), Err(GenerationError::MalformedOutput { .. })));
}

#[test]
fn test_node_without_topic_is_malformed() {
    let raw = r#"{"roadmap": [{"id": "1", "estimated_time_hours": 1}]}"#;
    assert!(matches!(sanitize_and_parse(raw), Err(GenerationError::MalformedOutput { .. })));
}

#[test]
fn test_extract_payload_bounds() {
    assert_eq!(extract_payload("noise {\"a\": 1} trailing"), Some("{\"a\": 1}"));
    assert_eq!(extract_payload("no braces here"), None);
    assert_eq!(extract_payload("} backwards {"), None);
}
