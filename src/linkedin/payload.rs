//! Serde mirror of the decorated full-profile response. Only the fields that get
//! flattened are modelled; everything else is ignored.

use serde::{Deserialize, Deserializer};

use crate::models::{DateRange, YearMonth};

#[derive(Debug, Deserialize)]
pub struct FullProfileResponse {
    #[serde(default)]
    pub elements: Vec<RawProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_educations: Collection<RawEducation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_certifications: Collection<RawCertification>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_position_groups: Collection<RawPositionGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub elements: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { elements: Vec::new() }
    }
}

// Sections come back as `null` as often as they are left out.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEducation {
    pub school_name: Option<String>,
    pub degree_name: Option<String>,
    pub field_of_study: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCertification {
    pub authority: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPositionGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_position_in_position_group: Collection<RawPosition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub date_range: Option<RawDateRange>,
}

#[derive(Debug, Deserialize)]
pub struct RawDateRange {
    pub start: Option<RawDate>,
    pub end: Option<RawDate>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawDate {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl RawDateRange {
    /// `None` when there is no usable start year. A missing end (or one without a
    /// year) means the position is ongoing and `open_end` is used instead.
    pub fn resolve(&self, open_end: YearMonth) -> Option<DateRange> {
        let start = self.start?;
        let start = YearMonth::new(start.month, start.year?);

        let end = match self.end {
            Some(RawDate { month, year: Some(year) }) => YearMonth::new(month, year),
            _ => open_end,
        };

        Some(DateRange { start, end })
    }
}
