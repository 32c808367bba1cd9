pub mod config;
pub mod error;
pub mod linkedin;
pub mod models;
pub mod report;
pub mod scraper;

pub use config::{BatchConfig, Config, Credentials, OpenEnd};
pub use error::{Error, Result};
pub use linkedin::{Evasion, LinkedInSession, NoDelay, RandomDelay, RequestGateway, SessionConfig};
pub use report::{BatchReportRunner, BatchSummary};
pub use scraper::{ProfileAssembler, ProfileLookup, SkillsFetcher};
