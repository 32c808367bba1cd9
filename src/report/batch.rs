use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::config::BatchConfig;
use crate::error::Result;
use crate::models::{ProfileIdentifier, ProfileUrl};
use crate::report::csv_io::{read_input_rows, InputRow, ReportRow, ReportWriter};
use crate::scraper::{ProfileAssembler, ProfileLookup};

/// Value of the `remarks` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remark {
    Successful,
    InvalidProfileUrl,
    MissingProfileUrl,
    RequestFailed,
}

impl Remark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Remark::Successful => "Successful",
            Remark::InvalidProfileUrl => "Invalid profile url",
            Remark::MissingProfileUrl => "Student has not updated profile url",
            Remark::RequestFailed => "Request failed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub successful: usize,
    pub invalid_url: usize,
    pub missing_url: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, remark: Remark) {
        self.processed += 1;
        match remark {
            Remark::Successful => self.successful += 1,
            Remark::InvalidProfileUrl => self.invalid_url += 1,
            Remark::MissingProfileUrl => self.missing_url += 1,
            Remark::RequestFailed => self.failed += 1,
        }
    }
}

/// Turns a CSV of `name,profile_url` rows into a report with one row per input row.
pub struct BatchReportRunner {
    assembler: ProfileAssembler,
    config: BatchConfig,
}

impl BatchReportRunner {
    pub fn new(assembler: ProfileAssembler, config: BatchConfig) -> Self {
        Self { assembler, config }
    }

    pub async fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<BatchSummary> {
        let rows = read_input_rows(input)?;
        let writer = ReportWriter::create(output)?;
        tracing::info!("Processing {} profile rows", rows.len());

        let pb = if self.config.show_progress {
            let pb = ProgressBar::new(rows.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} profiles")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut summary = BatchSummary::default();

        for (index, row) in rows.iter().enumerate() {
            if index > 0 && !self.config.row_delay.is_zero() {
                sleep(self.config.row_delay).await;
            }

            let (remark, report_row) = self.process_row(row).await?;
            writer.append(&report_row)?;
            summary.record(remark);

            tracing::info!("No of records processed: {}", summary.processed);
            pb.inc(1);
        }

        pb.finish_and_clear();
        tracing::info!(
            "Execution completed: {} rows written to {} ({} successful, {} invalid, {} missing url, {} failed)",
            summary.processed,
            writer.path().display(),
            summary.successful,
            summary.invalid_url,
            summary.missing_url,
            summary.failed
        );

        Ok(summary)
    }

    async fn process_row(&self, row: &InputRow) -> Result<(Remark, ReportRow)> {
        let identifier = match ProfileIdentifier::from_profile_url(&row.profile_url) {
            ProfileUrl::Found(identifier) => identifier,
            ProfileUrl::Missing => return Ok(blank(row, Remark::MissingProfileUrl)),
            ProfileUrl::Malformed => {
                tracing::warn!("Cannot read a profile handle from '{}'", row.profile_url);
                return Ok(blank(row, Remark::InvalidProfileUrl));
            }
        };

        match self.assembler.lookup(&identifier).await {
            Ok(ProfileLookup::Found(profile)) => {
                let remark = Remark::Successful;
                Ok((remark, ReportRow::with_profile(row, remark.as_str(), &profile)?))
            }
            Ok(ProfileLookup::Unavailable { .. }) => Ok(blank(row, Remark::InvalidProfileUrl)),
            Err(e) if e.is_row_local() => {
                tracing::warn!("Lookup for {} failed: {}", identifier, e);
                Ok(blank(row, Remark::RequestFailed))
            }
            Err(e) => Err(e),
        }
    }
}

fn blank(row: &InputRow, remark: Remark) -> (Remark, ReportRow) {
    (remark, ReportRow::blank(row, remark.as_str()))
}
