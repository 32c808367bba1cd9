use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::linkedin::payload::{
    FullProfileResponse, RawCertification, RawEducation, RawPosition, RawProfile,
};
use crate::linkedin::RequestGateway;
use crate::models::{
    normalize, CertificationEntry, EducationEntry, ExperienceEntry, Profile, ProfileIdentifier,
    YearMonth,
};
use crate::scraper::skills::SkillsFetcher;
use crate::scraper::tenure;

const PROFILE_DECORATION: &str =
    "com.linkedin.voyager.dash.deco.identity.profile.FullProfileWithEntities-47";

/// Result of a profile lookup that reached the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Found(Profile),
    /// The API answered but flagged the request as failed in the body. `status` is
    /// `None` when the flag is not a number.
    Unavailable { status: Option<i64>, message: String },
}

impl ProfileLookup {
    pub fn into_profile(self) -> Profile {
        match self {
            ProfileLookup::Found(profile) => profile,
            ProfileLookup::Unavailable { .. } => Profile::default(),
        }
    }
}

pub struct ProfileAssembler {
    gateway: Arc<RequestGateway>,
    skills: SkillsFetcher,
    open_end: YearMonth,
}

impl ProfileAssembler {
    /// `open_end` stands in for the end date of positions that are still ongoing.
    pub fn new(gateway: Arc<RequestGateway>, open_end: YearMonth) -> Self {
        Self {
            skills: SkillsFetcher::new(gateway.clone()),
            gateway,
            open_end,
        }
    }

    pub fn with_skills_fetcher(mut self, skills: SkillsFetcher) -> Self {
        self.skills = skills;
        self
    }

    /// Flattened profile, or an empty one when the API reports a failure.
    pub async fn get_profile(&self, identifier: &ProfileIdentifier) -> Result<Profile> {
        Ok(self.lookup(identifier).await?.into_profile())
    }

    pub async fn lookup(&self, identifier: &ProfileIdentifier) -> Result<ProfileLookup> {
        let data = self
            .gateway
            .fetch(
                "/identity/dash/profiles",
                &[
                    ("q", "memberIdentity".to_string()),
                    ("memberIdentity", identifier.to_string()),
                    ("decorationId", PROFILE_DECORATION.to_string()),
                ],
            )
            .await?;

        // Anything other than the number 200 in `status` is a failed lookup.
        if let Some(status) = data.get("status") {
            if status.as_i64() != Some(200) {
                let status = status
                    .as_i64()
                    .or_else(|| status.as_str().and_then(|s| s.trim().parse().ok()));
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                tracing::warn!("request failed: {} ({:?})", message, status);
                return Ok(ProfileLookup::Unavailable { status, message });
            }
        }

        let response: FullProfileResponse = serde_json::from_value(data)
            .map_err(|e| Error::ParseError(format!("unexpected profile payload: {}", e)))?;
        let raw = response.elements.into_iter().next().ok_or_else(|| {
            Error::ParseError(format!("profile payload for {} has no elements", identifier))
        })?;

        let mut profile = self.flatten(raw);

        profile.skills = self
            .skills
            .get_profile_skills(identifier)
            .await?
            .into_iter()
            .filter_map(|skill| normalize(skill.name.as_deref()))
            .collect();

        tracing::info!(
            "Assembled profile {}: {} education, {} certifications, {} positions, {} skills",
            identifier,
            profile.education.len(),
            profile.certifications.len(),
            profile.experience.len(),
            profile.skills.len()
        );

        Ok(ProfileLookup::Found(profile))
    }

    fn flatten(&self, raw: RawProfile) -> Profile {
        let education = raw
            .profile_educations
            .elements
            .iter()
            .map(education_entry)
            .collect();

        let certifications = raw
            .profile_certifications
            .elements
            .iter()
            .map(certification_entry)
            .collect();

        let experience = raw
            .profile_position_groups
            .elements
            .iter()
            .flat_map(|group| group.profile_position_in_position_group.elements.iter())
            .map(|position| self.experience_entry(position))
            .collect();

        Profile {
            education,
            certifications,
            experience,
            skills: Vec::new(),
        }
    }

    fn experience_entry(&self, position: &RawPosition) -> ExperienceEntry {
        let tenure = position
            .date_range
            .as_ref()
            .and_then(|range| range.resolve(self.open_end))
            .map(|range| tenure::compute(range.start, range.end))
            .unwrap_or_default();

        ExperienceEntry {
            title: normalize(position.title.as_deref()),
            company: normalize(position.company_name.as_deref()),
            tenure,
            description: normalize(position.description.as_deref()),
        }
    }
}

fn education_entry(raw: &RawEducation) -> EducationEntry {
    EducationEntry {
        school: normalize(raw.school_name.as_deref()),
        degree: normalize(raw.degree_name.as_deref()),
        field_of_study: normalize(raw.field_of_study.as_deref()),
        description: normalize(raw.description.as_deref()),
    }
}

// Nameless certifications collapse to None instead of a partial record.
fn certification_entry(raw: &RawCertification) -> Option<CertificationEntry> {
    let name = normalize(raw.name.as_deref())?;
    Some(CertificationEntry {
        authority: normalize(raw.authority.as_deref()),
        name,
    })
}
