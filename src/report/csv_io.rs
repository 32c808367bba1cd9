use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::Result;
use crate::models::Profile;

pub const REPORT_HEADER: [&str; 7] = [
    "student_name",
    "linkedin_url",
    "remarks",
    "education",
    "certifications",
    "experience",
    "skills",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub display_name: String,
    pub profile_url: String,
}

/// Reads `display_name,profile_url,...` rows. There is no header and rows may have
/// any width; missing cells read as empty.
pub fn read_input_rows<P: AsRef<Path>>(path: P) -> Result<Vec<InputRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(InputRow {
            display_name: record.get(0).unwrap_or_default().to_string(),
            profile_url: record.get(1).unwrap_or_default().to_string(),
        });
    }

    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub student_name: String,
    pub linkedin_url: String,
    pub remarks: String,
    pub education: String,
    pub certifications: String,
    pub experience: String,
    pub skills: String,
}

impl ReportRow {
    pub fn blank(input: &InputRow, remarks: &str) -> Self {
        Self {
            student_name: input.display_name.clone(),
            linkedin_url: input.profile_url.clone(),
            remarks: remarks.to_string(),
            education: String::new(),
            certifications: String::new(),
            experience: String::new(),
            skills: String::new(),
        }
    }

    /// List cells hold compact JSON arrays so the report can be parsed back.
    pub fn with_profile(input: &InputRow, remarks: &str, profile: &Profile) -> Result<Self> {
        Ok(Self {
            education: serde_json::to_string(&profile.education)?,
            certifications: serde_json::to_string(&profile.certifications)?,
            experience: serde_json::to_string(&profile.experience)?,
            skills: serde_json::to_string(&profile.skills)?,
            ..Self::blank(input, remarks)
        })
    }

    fn as_record(&self) -> [&str; 7] {
        [
            self.student_name.as_str(),
            self.linkedin_url.as_str(),
            self.remarks.as_str(),
            self.education.as_str(),
            self.certifications.as_str(),
            self.experience.as_str(),
            self.skills.as_str(),
        ]
    }
}

/// Appends rows to the report file. The file is reopened for every row, so rows
/// already written survive a crash mid-run.
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Truncates `path` and writes the header row.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut writer = WriterBuilder::new().from_writer(File::create(&path)?);
        writer.write_record(REPORT_HEADER)?;
        writer.flush()?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, row: &ReportRow) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(row.as_record())?;
        writer.flush()?;
        Ok(())
    }
}
