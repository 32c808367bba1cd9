pub mod batch;
pub mod csv_io;

pub use batch::{BatchReportRunner, BatchSummary, Remark};
pub use csv_io::{InputRow, ReportRow, ReportWriter, REPORT_HEADER};
