//! Command-line interface for the publisher.

use std::path::{Path, PathBuf};

use autonifty_tags::{ComicDate, UnknownTagPolicy};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::bucket::ComicBucket;
use crate::config::Config;
use crate::error::Result;
use crate::publish::{publish_with_progress, render_file};

/// AutoNifty - publish a webcomic's dated archive through tag templates.
#[derive(Parser)]
#[command(name = "autonifty")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "autonifty.yaml")]
    pub config: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move due comics live and regenerate every page.
    Publish,

    /// Render one template to stdout.
    Render {
        /// Template file, absolute or relative to the templates directory
        template: PathBuf,

        /// Comic date as YYYYMMDD (default: newest comic)
        #[arg(short, long)]
        date: Option<String>,

        /// Replace unknown tags with an error instead of echoing them
        #[arg(long)]
        strict: bool,
    },

    /// List the live comic dates.
    Dates,
}

/// Run the CLI.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Publish => publish_command(&config),
        Commands::Render {
            template,
            date,
            strict,
        } => render_command(&config, &template, date.as_deref(), strict),
        Commands::Dates => dates_command(&config),
    }
}

/// Execute the publish command.
fn publish_command(config: &Config) -> Result<()> {
    let today = config.today();

    println!(
        "{} comic for {}",
        style("Publishing").bold(),
        style(today).green()
    );

    let pb = ProgressBar::new(0);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let result = publish_with_progress(config, today, |date, done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
        pb.set_message(date.to_string());
    });
    pb.finish_and_clear();
    let report = result?;

    println!("  Comics moved live: {}", report.files_moved);
    println!("  Daily pages: {}", report.pages_written);
    if let Some(latest) = report.latest {
        println!("  Latest comic: {}", style(latest).cyan());
    }
    if !report.index_written {
        println!("  {}", style("No front page written").yellow().bold());
    }

    Ok(())
}

/// Execute the render command.
fn render_command(
    config: &Config,
    template: &Path,
    date: Option<&str>,
    strict: bool,
) -> Result<()> {
    let date = date.map(ComicDate::parse_datestamp).transpose()?;
    let policy = if strict {
        UnknownTagPolicy::Report
    } else {
        UnknownTagPolicy::Echo
    };

    let page = render_file(config, template, date, config.today(), policy)?;
    print!("{page}");
    Ok(())
}

/// Execute the dates command.
fn dates_command(config: &Config) -> Result<()> {
    let comics_dir = config.directory_for("comicsdir")?;
    let bucket = ComicBucket::read(&comics_dir)?;
    let today = config.today();

    for date in bucket.dates() {
        let files = bucket.comics_for(date).map_or(0, <[String]>::len);
        let stamp = if date > today {
            style(date).dim()
        } else {
            style(date).green()
        };
        println!("{stamp}  {files} file(s)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_publish() {
        let cli = Cli::parse_from(["autonifty", "publish"]);

        assert!(matches!(cli.command, Commands::Publish));
        assert_eq!(cli.config, PathBuf::from("autonifty.yaml"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::parse_from([
            "autonifty",
            "render",
            "dailytemplate.html",
            "--date",
            "20240115",
            "--strict",
            "-c",
            "site.yaml",
        ]);

        let Commands::Render {
            template,
            date,
            strict,
        } = cli.command
        else {
            panic!("expected render command");
        };
        assert_eq!(template, PathBuf::from("dailytemplate.html"));
        assert_eq!(date, Some("20240115".to_string()));
        assert!(strict);
        assert_eq!(cli.config, PathBuf::from("site.yaml"));
    }
}
