use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::warn;

use blogctl::config::{generate_cfg, open_config};
use blogctl::deploy::{deploy, DeployOutcome};
use blogctl::logger::configure_logger;
use blogctl::repository::PostRepository;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new post
    New {
        /// Title of the post
        title: String,
        /// Post body in markdown
        content: String,
        /// Comma separated list of tags
        tags: Option<String>,
        /// Rewrite [[text]] spans into margin note markup
        #[arg(short, long)]
        margin_notes: bool,
    },
    /// Post a quick thought
    Note {
        thought: String,
    },
    /// List the most recent posts
    List {
        /// How many posts to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Search posts by keyword
    Search {
        keyword: String,
    },
    /// Show blog statistics
    Stats,
    /// Stage, commit and push the blog to its remote
    Deploy {
        /// Commit message. Defaults to a timestamped one
        message: Option<String>,
    },
    /// Create a draft with an outline
    Draft {
        title: String,
        outline: String,
    },
    /// Create a post as part of a series
    Series {
        series_name: String,
        title: String,
        content: String,
        /// Part number within the series
        #[arg(short, long, default_value_t = 1)]
        part: u32,
    },
    /// Write a sample configuration file
    Init,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if matches!(&args.command, Command::Init) {
        let path = generate_cfg(config_path)?;
        println!("Sample config written to {}", path.to_str().unwrap());
        return Ok(());
    }

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run blogctl --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let repo = PostRepository::new(&config);

    match args.command {
        Command::New { title, content, tags, margin_notes } => {
            let tags = tags.map(|t| t.split(',').map(|s| s.to_string()).collect());
            let created = repo.create_post(&title, &content, tags, margin_notes)?;
            println!("Post created: {}", created.file_name);
        }
        Command::Note { thought } => {
            let created = repo.quick_thought(&thought)?;
            println!("Quick thought posted: {}", created.file_name);
        }
        Command::List { count } => {
            println!("Recent posts:");
            for name in repo.list_recent(count)? {
                println!("  - {}", name);
            }
        }
        Command::Search { keyword } => {
            let matches = repo.search(&keyword)?;
            if matches.is_empty() {
                println!("No posts found containing '{}'", keyword);
            } else {
                println!("Found {} posts containing '{}':", matches.len(), keyword);
                for name in matches {
                    println!("  - {}", name);
                }
            }
        }
        Command::Stats => {
            let stats = repo.stats()?;
            println!("Blog statistics:");
            println!("{}", stats);
        }
        Command::Deploy { message } => {
            match deploy(&config, message)? {
                DeployOutcome::Deployed { site_url } => {
                    println!("Blog deployed successfully!");
                    println!("Live at: {}", site_url);
                }
                DeployOutcome::NoChanges => {
                    println!("No changes to deploy");
                }
            }
        }
        Command::Draft { title, outline } => {
            let created = repo.create_draft(&title, &outline)?;
            println!("Draft created: {}", created.file_name);
        }
        Command::Series { series_name, title, content, part } => {
            let created = repo.create_series(&series_name, &title, &content, part)?;
            println!("Post created: {}", created.file_name);
        }
        // Handled before the config is opened
        Command::Init => {}
    }

    Ok(())
}
