use clap::{Parser, Subcommand};
use roadmapper::config::Settings;
use roadmapper::orchestrator::{CallerContext, GenerationRequest, Generator};
use roadmapper::profile::Purpose;
use roadmapper::sanitize::sanitize_and_parse;
use anyhow::{Context as AnyhowContext, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, error};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a study roadmap and print it as JSON
    Generate {
        /// Topic to cover (repeat for several)
        #[arg(long, short, required = true)]
        topic: Vec<String>,

        /// Purpose of study, e.g. academics, skill_development
        #[arg(long, short, default_value = "personal_interest")]
        purpose: String,

        /// Total hours the roadmap should add up to
        #[arg(long)]
        hours: Option<f64>,

        /// YAML settings file
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Skip the completion service and use the built-in templates
        #[arg(long)]
        offline: bool,

        /// Upper bound on the whole generation, in seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
    },

    /// List study purposes and their generation parameters
    Profiles,

    /// Recover a roadmap from a captured raw completion
    Sanitize {
        /// File holding the raw completion text
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { topic, purpose, hours, config, offline, deadline_secs } => {
            let settings = Settings::load(config.as_deref())?;
            let generator = if offline {
                info!("Running offline, completion service disabled");
                Generator::offline(settings)
            } else {
                Generator::from_settings(settings)
            };

            let request = GenerationRequest::new(topic, &purpose, hours);
            let ctx = CallerContext::with_caller("cli");
            let generation = match deadline_secs {
                Some(secs) => generator.generate_with_deadline(&request, &ctx, Duration::from_secs(secs)).await,
                None => generator.generate(&request, &ctx).await,
            };

            info!(source = ?generation.source, attempts = generation.attempts, "Generation finished");
            println!("{}", serde_json::to_string_pretty(&generation.result)?);
        }

        Commands::Profiles => {
            for purpose in Purpose::ALL {
                let p = purpose.profile();
                println!(
                    "{:<28} main {:>1}-{:<2} sub {:>1}-{:<2} {:>4.1}h/{:<4.1}h  {}",
                    purpose.slug(),
                    p.main_topics.start(),
                    p.main_topics.end(),
                    p.subtopics.start(),
                    p.subtopics.end(),
                    p.main_topic_hours,
                    p.subtopic_hours,
                    p.focus.join(", ")
                );
            }
        }

        Commands::Sanitize { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            match sanitize_and_parse(&raw) {
                Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                Err(e) => {
                    error!("Recovery failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
