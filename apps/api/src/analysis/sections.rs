//! Section heuristics — independent presence checks over the raw document.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // ASCII boundaries: an address glued to CJK or accented letters still matches
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)")
        .expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
        .expect("valid phone regex")
});

const EDUCATION_TERMS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "university",
    "college",
    "school",
    "graduated",
    "graduation",
    "gpa",
    "grade point average",
];

const EXPERIENCE_TERMS: &[&str] = &[
    "experience",
    "work",
    "employment",
    "job",
    "position",
    "role",
    "responsibilities",
    "duties",
    "achievements",
    "accomplishments",
];

const SKILL_TERMS: &[&str] = &[
    "skills",
    "technologies",
    "tools",
    "languages",
    "frameworks",
    "software",
    "programming",
    "technical",
    "competencies",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub has_email: bool,
    pub has_phone: bool,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationSignal {
    pub has_education: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSignal {
    pub has_experience: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsSignal {
    pub has_skills: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSignals {
    pub contact: ContactInfo,
    pub education: EducationSignal,
    pub experience: ExperienceSignal,
    pub skills: SkillsSignal,
}

pub fn analyze_sections(text: &str) -> SectionSignals {
    let lower = text.to_lowercase();
    SectionSignals {
        contact: extract_contact_info(text),
        education: EducationSignal {
            has_education: contains_any(&lower, EDUCATION_TERMS),
        },
        experience: ExperienceSignal {
            has_experience: contains_any(&lower, EXPERIENCE_TERMS),
        },
        skills: SkillsSignal {
            has_skills: contains_any(&lower, SKILL_TERMS),
        },
    }
}

pub fn extract_contact_info(text: &str) -> ContactInfo {
    let emails: Vec<String> = EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    let phones: Vec<String> = PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    ContactInfo {
        has_email: !emails.is_empty(),
        has_phone: !phones.is_empty(),
        emails,
        phones,
    }
}

/// Substring containment; `haystack_lower` must already be lowercased.
pub(crate) fn contains_any(haystack_lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| haystack_lower.contains(term))
}
