use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use profile_scraper::models::{Profile, ProfileIdentifier};
use profile_scraper::{
    BatchConfig, BatchReportRunner, Config, Credentials, LinkedInSession, OpenEnd,
    ProfileAssembler, RandomDelay, RequestGateway, SkillsFetcher,
};

#[derive(Parser, Debug)]
#[command(name = "profile-scraper")]
#[command(version = "0.1.0")]
#[command(about = "Fetch member profiles from the Voyager API and flatten them into reports")]
struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Skip authentication (only useful against a proxy that injects cookies)
    #[arg(long, global = true)]
    no_auth: bool,

    /// End date for ongoing positions: "current" or YYYY-MM (overrides TENURE_OPEN_END)
    #[arg(long, global = true)]
    open_end: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the flattened profile for one member
    Profile {
        /// Public handle, as in /in/<handle>/
        id: String,

        /// Treat the id as a URN id instead of a public handle
        #[arg(long)]
        urn: bool,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the raw skills list for one member
    Skills {
        id: String,

        #[arg(long)]
        urn: bool,

        /// Maximum number of 100-skill pages to read
        #[arg(long, default_value = "1")]
        max_pages: u32,
    },
    /// Process a CSV of name,profile_url rows into a report
    Batch {
        #[arg(short, long, default_value = "input_file.csv")]
        input: PathBuf,

        #[arg(short, long, default_value = "student_profile_data.csv")]
        output: PathBuf,

        /// Disable the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let crate_level = if args.debug {
        "profile_scraper=debug"
    } else {
        "profile_scraper=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(crate_level.parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let mut config = Config::from_env()?;
    if let Some(ref open_end) = args.open_end {
        config.open_end = OpenEnd::parse(open_end)?;
    }

    let session = LinkedInSession::new(config.session_config())?;
    if !args.no_auth {
        match config.credentials {
            Some(Credentials::Cookies(ref cookies)) => session.set_session_cookies(cookies),
            Some(Credentials::Password {
                ref username,
                ref password,
            }) => session.authenticate(username, password).await?,
            None => anyhow::bail!(
                "no credentials: set LINKEDIN_COOKIES or LINKEDIN_USERNAME and LINKEDIN_PASSWORD"
            ),
        }
    }

    let gateway = Arc::new(RequestGateway::new(
        session,
        RandomDelay::new(config.evasion_min_secs, config.evasion_max_secs),
    ));
    let assembler = ProfileAssembler::new(gateway.clone(), config.open_end.resolve());

    match args.command {
        Command::Profile { id, urn, format } => {
            let identifier = identifier(id, urn);
            let profile = assembler.get_profile(&identifier).await?;
            let output = match format.as_str() {
                "json" => serde_json::to_string_pretty(&profile)?,
                _ => format_text(&identifier, &profile),
            };
            println!("{}", output);
        }
        Command::Skills { id, urn, max_pages } => {
            let skills = SkillsFetcher::new(gateway)
                .with_max_pages(max_pages)
                .get_profile_skills(&identifier(id, urn))
                .await?;
            println!("{}", serde_json::to_string_pretty(&skills)?);
        }
        Command::Batch {
            input,
            output,
            no_progress,
        } => {
            let mut batch_config = BatchConfig::from(&config);
            batch_config.show_progress = !no_progress;

            let runner = BatchReportRunner::new(assembler, batch_config);
            let summary = runner.run(&input, &output).await?;
            println!(
                "Execution completed successfully. {} records written to {}",
                summary.processed,
                output.display()
            );
        }
    }

    Ok(())
}

fn identifier(id: String, urn: bool) -> ProfileIdentifier {
    if urn {
        ProfileIdentifier::Urn(id)
    } else {
        ProfileIdentifier::PublicId(id)
    }
}

fn format_text(identifier: &ProfileIdentifier, profile: &Profile) -> String {
    if profile.is_empty() {
        return format!("No profile data for {}\n", identifier);
    }

    let mut output = String::new();
    output.push_str(&format!("\n=== Profile: {} ===\n", identifier));

    output.push_str("\nEducation:\n");
    for ed in &profile.education {
        output.push_str(&format!(
            "  - {}{}{}\n",
            ed.school.as_deref().unwrap_or("(unknown school)"),
            ed.degree.as_deref().map(|d| format!(", {}", d)).unwrap_or_default(),
            ed.field_of_study.as_deref().map(|f| format!(" ({})", f)).unwrap_or_default(),
        ));
    }

    output.push_str("\nCertifications:\n");
    for cert in profile.certifications.iter().flatten() {
        match cert.authority {
            Some(ref authority) => output.push_str(&format!("  - {} ({})\n", cert.name, authority)),
            None => output.push_str(&format!("  - {}\n", cert.name)),
        }
    }

    output.push_str("\nExperience:\n");
    for ex in &profile.experience {
        output.push_str(&format!(
            "  - {} at {} [{}]\n",
            ex.title.as_deref().unwrap_or("(untitled)"),
            ex.company.as_deref().unwrap_or("(unknown company)"),
            ex.tenure
        ));
    }

    if !profile.skills.is_empty() {
        output.push_str(&format!("\nSkills: {}\n", profile.skills.join(", ")));
    }

    output
}
