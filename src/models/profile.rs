use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the skills endpoint, minus its `entityUrn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub authority: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub tenure: String,
    pub description: Option<String>,
}

/// Flattened view of a member profile.
///
/// A certification without a name is kept as `None` so that list positions still
/// line up with the upstream payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<Option<CertificationEntry>>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
}

impl Profile {
    pub fn is_empty(&self) -> bool {
        self.education.is_empty()
            && self.certifications.is_empty()
            && self.experience.is_empty()
            && self.skills.is_empty()
    }
}

/// A calendar month; `month` is 1-based and may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub month: Option<u32>,
    pub year: i32,
}

impl YearMonth {
    pub fn new(month: Option<u32>, year: i32) -> Self {
        Self { month, year }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

/// Trims a raw string field; absent and blank values both become `None`.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
