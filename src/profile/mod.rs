use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Why the learner is studying. Drives depth, fan-out and tone of a roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Purpose {
    Academics,
    CompetitiveExam,
    SkillDevelopment,
    CareerChange,
    PersonalInterest,
    ProfessionalCertification,
    InterviewPreparation,
    TeachingPreparation,
    Research,
    #[default]
    Other,
}

/// Template family used by the fallback synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFamily {
    Academic,
    Exam,
    Career,
    Skill,
    Personal,
    General,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfig {
    pub purpose: Purpose,
    pub label: &'static str,
    /// Target number of top-level topics.
    pub main_topics: RangeInclusive<usize>,
    /// Target number of subtopics per top-level topic.
    pub subtopics: RangeInclusive<usize>,
    pub main_topic_hours: f64,
    pub subtopic_hours: f64,
    pub depth: &'static str,
    pub structure: &'static str,
    pub focus: &'static [&'static str],
    pub template: TemplateFamily,
}

impl Purpose {
    pub const ALL: [Purpose; 10] = [
        Purpose::Academics,
        Purpose::CompetitiveExam,
        Purpose::SkillDevelopment,
        Purpose::CareerChange,
        Purpose::PersonalInterest,
        Purpose::ProfessionalCertification,
        Purpose::InterviewPreparation,
        Purpose::TeachingPreparation,
        Purpose::Research,
        Purpose::Other,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Purpose::Academics => "academics",
            Purpose::CompetitiveExam => "competitive_exam",
            Purpose::SkillDevelopment => "skill_development",
            Purpose::CareerChange => "career_change",
            Purpose::PersonalInterest => "personal_interest",
            Purpose::ProfessionalCertification => "professional_certification",
            Purpose::InterviewPreparation => "interview_preparation",
            Purpose::TeachingPreparation => "teaching_preparation",
            Purpose::Research => "research",
            Purpose::Other => "other",
        }
    }

    /// Map a free-form purpose string. Unknown values resolve to `Purpose::Other`.
    ///
    /// Matching is exact after normalisation (case, spaces, hyphens), against the slugs,
    /// the display labels, and a short alias list.
    pub fn parse(raw: &str) -> Purpose {
        let key = normalize_key(raw);
        if key.is_empty() {
            return Purpose::Other;
        }
        if let Some(p) = Purpose::ALL
            .iter()
            .find(|p| p.slug() == key || normalize_key(lookup(**p).label) == key)
        {
            return *p;
        }
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, p)| *p)
            .unwrap_or(Purpose::Other)
    }

    pub fn profile(&self) -> &'static ProfileConfig {
        lookup(*self)
    }
}

const ALIASES: &[(&str, Purpose)] = &[
    ("academic", Purpose::Academics),
    ("school", Purpose::Academics),
    ("exam", Purpose::CompetitiveExam),
    ("exam_preparation", Purpose::CompetitiveExam),
    ("competitive_programming", Purpose::CompetitiveExam),
    ("skills", Purpose::SkillDevelopment),
    ("personal_skill_development", Purpose::SkillDevelopment),
    ("career", Purpose::CareerChange),
    ("hobby", Purpose::PersonalInterest),
    ("personal_learning", Purpose::PersonalInterest),
    ("certification", Purpose::ProfessionalCertification),
    ("interview", Purpose::InterviewPreparation),
    ("job_interview_preparation", Purpose::InterviewPreparation),
    ("teaching", Purpose::TeachingPreparation),
    ("academic_research", Purpose::Research),
    ("general", Purpose::Other),
];

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Purpose {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Purpose::parse(s))
    }
}

impl Serialize for Purpose {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Purpose {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(Purpose::parse(&raw))
    }
}

pub fn lookup(purpose: Purpose) -> &'static ProfileConfig {
    PROFILES
        .iter()
        .find(|p| p.purpose == purpose)
        .unwrap_or(&PROFILES[PROFILES.len() - 1])
}

/// Never fails; unrecognised strings get the general profile.
pub fn lookup_str(purpose: &str) -> &'static ProfileConfig {
    lookup(Purpose::parse(purpose))
}

// The last entry is the default.
static PROFILES: [ProfileConfig; 10] = [
    ProfileConfig {
        purpose: Purpose::Academics,
        label: "Academics",
        main_topics: 5..=7,
        subtopics: 3..=4,
        main_topic_hours: 6.0,
        subtopic_hours: 2.0,
        depth: "comprehensive and theory-first, with formal definitions before applications",
        structure: "foundations, core theory, methods, applications, then review",
        focus: &["core theory", "formal definitions", "worked examples", "problem sets"],
        template: TemplateFamily::Academic,
    },
    ProfileConfig {
        purpose: Purpose::CompetitiveExam,
        label: "Competitive Exam",
        main_topics: 4..=6,
        subtopics: 3..=5,
        main_topic_hours: 5.0,
        subtopic_hours: 2.0,
        depth: "syllabus-driven, prioritising high-weightage areas",
        structure: "syllabus coverage, concept drills, timed practice, then revision",
        focus: &["exam syllabus coverage", "timed practice", "previous year questions", "shortcut techniques"],
        template: TemplateFamily::Exam,
    },
    ProfileConfig {
        purpose: Purpose::SkillDevelopment,
        label: "Skill Development",
        main_topics: 4..=6,
        subtopics: 2..=4,
        main_topic_hours: 4.0,
        subtopic_hours: 1.5,
        depth: "practical, learn-by-doing with just enough theory",
        structure: "setup, fundamentals, guided practice, projects, then refinement",
        focus: &["hands-on projects", "practical exercises", "tooling and workflow"],
        template: TemplateFamily::Skill,
    },
    ProfileConfig {
        purpose: Purpose::CareerChange,
        label: "Career Change",
        main_topics: 5..=7,
        subtopics: 3..=4,
        main_topic_hours: 5.0,
        subtopic_hours: 2.0,
        depth: "industry-relevant breadth with depth where employers expect it",
        structure: "landscape, core skills, professional tooling, portfolio, then job readiness",
        focus: &["industry-relevant skills", "portfolio projects", "job market expectations"],
        template: TemplateFamily::Career,
    },
    ProfileConfig {
        purpose: Purpose::PersonalInterest,
        label: "Personal Interest",
        main_topics: 3..=5,
        subtopics: 2..=3,
        main_topic_hours: 3.0,
        subtopic_hours: 1.0,
        depth: "light and engaging, self-paced",
        structure: "curiosity hooks, essentials, exploration, then a personal project",
        focus: &["engaging exploration", "real-world curiosities", "self-paced learning"],
        template: TemplateFamily::Personal,
    },
    ProfileConfig {
        purpose: Purpose::ProfessionalCertification,
        label: "Professional Certification",
        main_topics: 4..=6,
        subtopics: 3..=4,
        main_topic_hours: 5.0,
        subtopic_hours: 2.0,
        depth: "objective-by-objective coverage of the certification blueprint",
        structure: "exam objectives, domain study, labs, mock exams, then final review",
        focus: &["certification objectives", "official study guides", "mock exams"],
        template: TemplateFamily::Exam,
    },
    ProfileConfig {
        purpose: Purpose::InterviewPreparation,
        label: "Interview Preparation",
        main_topics: 4..=6,
        subtopics: 3..=4,
        main_topic_hours: 4.0,
        subtopic_hours: 1.5,
        depth: "pattern-oriented, focused on what interviewers ask",
        structure: "fundamentals refresh, problem patterns, practice rounds, then mock interviews",
        focus: &["common interview questions", "problem-solving patterns", "mock interviews"],
        template: TemplateFamily::Career,
    },
    ProfileConfig {
        purpose: Purpose::TeachingPreparation,
        label: "Teaching Preparation",
        main_topics: 4..=6,
        subtopics: 3..=4,
        main_topic_hours: 5.0,
        subtopic_hours: 1.5,
        depth: "conceptually rigorous, with attention to how learners struggle",
        structure: "concept mastery, explanation strategies, exercises, then assessment design",
        focus: &["conceptual clarity", "explaining to learners", "common misconceptions"],
        template: TemplateFamily::Academic,
    },
    ProfileConfig {
        purpose: Purpose::Research,
        label: "Research",
        main_topics: 5..=7,
        subtopics: 3..=5,
        main_topic_hours: 7.0,
        subtopic_hours: 2.5,
        depth: "deep and literature-driven, reaching current open problems",
        structure: "background, literature, methods, open problems, then original work",
        focus: &["literature review", "research methods", "open problems"],
        template: TemplateFamily::Academic,
    },
    ProfileConfig {
        purpose: Purpose::Other,
        label: "Other",
        main_topics: 4..=6,
        subtopics: 2..=4,
        main_topic_hours: 4.0,
        subtopic_hours: 1.5,
        depth: "balanced between concepts and practice",
        structure: "fundamentals, core concepts, practice, then advanced topics",
        focus: &["balanced coverage", "fundamentals", "practice"],
        template: TemplateFamily::General,
    },
];
