use crate::profile::TemplateFamily;

/// Placeholder for the primary topic.
pub const TOPIC: &str = "{topic}";
/// Placeholder for one of the profile's focus descriptors.
pub const FOCUS: &str = "{focus}";

#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub subtopics: &'static [&'static str],
}

/// Sections of a template family, in study order.
///
/// Labels within one family never collide once the topic is substituted, so a
/// synthesized roadmap needs no dedup pass.
pub fn sections(family: TemplateFamily) -> &'static [Section] {
    match family {
        TemplateFamily::Academic => ACADEMIC,
        TemplateFamily::Exam => EXAM,
        TemplateFamily::Career => CAREER,
        TemplateFamily::Skill => SKILL,
        TemplateFamily::Personal => PERSONAL,
        TemplateFamily::General => GENERAL,
    }
}

static ACADEMIC: &[Section] = &[
    Section {
        title: "Foundations of {topic}",
        subtopics: &["Overview of {topic}", "Key Terminology in {topic}", "Historical Context of {topic}"],
    },
    Section {
        title: "Core Theory of {topic}",
        subtopics: &[
            "Fundamental Principles of {topic}",
            "Formal Definitions in {topic}",
            "Core Theorems and Results in {topic}",
        ],
    },
    Section {
        title: "Methods and Techniques in {topic}",
        subtopics: &["Standard Methods in {topic}", "Analytical Techniques for {topic}", "Worked Examples in {topic}"],
    },
    Section {
        title: "Applications of {topic}",
        subtopics: &["Real-World Applications of {topic}", "Case Studies in {topic}", "{topic} in Related Disciplines"],
    },
    Section {
        title: "Advanced Topics in {topic}",
        subtopics: &["Current Research in {topic}", "Open Problems in {topic}", "Focus Area: {focus} ({topic})"],
    },
    Section {
        title: "Review and Assessment of {topic}",
        subtopics: &["Problem Sets on {topic}", "Concept Review of {topic}", "Self-Assessment in {topic}"],
    },
];

static EXAM: &[Section] = &[
    Section {
        title: "{topic} Syllabus Overview",
        subtopics: &["Exam Pattern for {topic}", "High-Weightage Areas of {topic}", "Study Schedule for {topic}"],
    },
    Section {
        title: "Core Concepts of {topic}",
        subtopics: &[
            "Essential Formulas and Facts in {topic}",
            "Concept Drills for {topic}",
            "Common Question Types in {topic}",
        ],
    },
    Section {
        title: "Problem Solving in {topic}",
        subtopics: &["Standard Problems in {topic}", "Shortcut Techniques for {topic}", "Focus Area: {focus} ({topic})"],
    },
    Section {
        title: "Timed Practice for {topic}",
        subtopics: &[
            "Previous Year Questions on {topic}",
            "Sectional Tests on {topic}",
            "Full-Length Mock Tests on {topic}",
        ],
    },
    Section {
        title: "Revision of {topic}",
        subtopics: &["Quick Revision Notes for {topic}", "Error Log Review for {topic}", "Final Exam Strategy for {topic}"],
    },
];

static CAREER: &[Section] = &[
    Section {
        title: "{topic} Industry Landscape",
        subtopics: &["Roles and Career Paths in {topic}", "In-Demand {topic} Skills", "{topic} Tools and Ecosystem"],
    },
    Section {
        title: "Core {topic} Skills",
        subtopics: &["Fundamentals of {topic}", "Practical {topic} Techniques", "Best Practices in {topic}"],
    },
    Section {
        title: "Professional {topic} Tooling",
        subtopics: &["Industry-Standard {topic} Tools", "{topic} Workflows in Teams", "Focus Area: {focus} ({topic})"],
    },
    Section {
        title: "{topic} Portfolio Projects",
        subtopics: &["Guided {topic} Project", "Independent {topic} Project", "Documenting {topic} Work"],
    },
    Section {
        title: "{topic} Job Readiness",
        subtopics: &[
            "{topic} Interview Questions",
            "Resume and Portfolio for {topic} Roles",
            "Mock Interviews on {topic}",
        ],
    },
];

static SKILL: &[Section] = &[
    Section {
        title: "Getting Started with {topic}",
        subtopics: &["Setting Up a {topic} Environment", "{topic} Basics", "First Hands-On {topic} Exercise"],
    },
    Section {
        title: "Core {topic} Techniques",
        subtopics: &["Essential {topic} Techniques", "Common {topic} Patterns", "Focus Area: {focus} ({topic})"],
    },
    Section {
        title: "Building with {topic}",
        subtopics: &["Small {topic} Project", "Debugging and Troubleshooting {topic}", "Iterating on {topic} Solutions"],
    },
    Section {
        title: "Mastering {topic}",
        subtopics: &["Advanced {topic} Techniques", "Capstone {topic} Project", "{topic} Community and Resources"],
    },
];

static PERSONAL: &[Section] = &[
    Section {
        title: "Discovering {topic}",
        subtopics: &["What Makes {topic} Interesting", "A Gentle Introduction to {topic}"],
    },
    Section {
        title: "Essentials of {topic}",
        subtopics: &["Key Ideas in {topic}", "Focus Area: {focus} ({topic})"],
    },
    Section {
        title: "Exploring {topic}",
        subtopics: &["{topic} in Everyday Life", "Fun Experiments with {topic}"],
    },
    Section {
        title: "Your {topic} Journey",
        subtopics: &["A Personal {topic} Project", "Where to Go Next with {topic}"],
    },
];

static GENERAL: &[Section] = &[
    Section {
        title: "Introduction to {topic}",
        subtopics: &["Overview of {topic}", "Why {topic} Matters", "Key Terminology in {topic}"],
    },
    Section {
        title: "Fundamentals of {topic}",
        subtopics: &["Basic Concepts of {topic}", "Core Principles of {topic}", "Focus Area: {focus} ({topic})"],
    },
    Section {
        title: "Core Concepts of {topic}",
        subtopics: &["Intermediate {topic} Concepts", "Common {topic} Techniques", "Worked {topic} Examples"],
    },
    Section {
        title: "Practicing {topic}",
        subtopics: &["{topic} Exercises", "Applied {topic} Problems", "Small {topic} Project"],
    },
    Section {
        title: "Advanced {topic}",
        subtopics: &["Advanced {topic} Techniques", "{topic} in Practice", "Further Study in {topic}"],
    },
];
