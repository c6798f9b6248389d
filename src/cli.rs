//! Command-line interface implementation

use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::extract::{self, ExtractPlan, ExtractReport};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;

/// Extract individual emoji PNGs from Telegram Desktop sprite sheets
#[derive(Parser, Debug)]
#[command(name = "emoji-extract")]
#[command(about = "Extract individual emoji PNGs from Telegram Desktop sprite sheets")]
#[command(version)]
pub struct Cli {
    /// Telegram Desktop checkout (default: ~/github/tdesktop)
    #[arg(long)]
    pub tdesktop: Option<PathBuf>,

    /// Emoji listing (default: {tdesktop}/Telegram/lib_ui/emoji.txt)
    #[arg(long)]
    pub emoji_txt: Option<PathBuf>,

    /// Directory holding emoji_1.webp .. emoji_8.webp
    /// (default: {tdesktop}/Telegram/Resources/emoji)
    #[arg(long)]
    pub sprite_dir: Option<PathBuf>,

    /// Output directory; existing *.png files in it are deleted first
    #[arg(short, long, default_value = "assets/emoji")]
    pub output: PathBuf,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = clap::value_parser!(log::LevelFilter))]
    pub log_level: log::LevelFilter,
}

impl Cli {
    /// Telegram Desktop checkout, falling back to `$HOME/github/tdesktop`.
    fn tdesktop_root(&self) -> PathBuf {
        self.tdesktop.clone().unwrap_or_else(|| {
            env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("github")
                .join("tdesktop")
        })
    }

    /// Resolve every path into an extraction plan.
    pub fn plan(&self) -> ExtractPlan {
        let root = self.tdesktop_root();
        let emoji_txt = self
            .emoji_txt
            .clone()
            .unwrap_or_else(|| root.join("Telegram").join("lib_ui").join("emoji.txt"));
        let sprite_dir = self
            .sprite_dir
            .clone()
            .unwrap_or_else(|| root.join("Telegram").join("Resources").join("emoji"));
        ExtractPlan::tdesktop(emoji_txt, sprite_dir, &self.output)
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .init();

    let plan = cli.plan();
    match extract::run(&plan) {
        Ok(report) if cli.json => print_report_json(&report),
        Ok(report) => {
            print_report_text(&report, &plan.out_dir);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn print_report_text(report: &ExtractReport, out_dir: &Path) {
    println!("Parsed {} emojis", report.parsed);
    println!("Loaded {} sprite sheets, {} sprites available", report.sheets, report.total_sprites);
    println!("Extracted {} emojis from auto-mapping", report.direct);
    println!("Extracted {} emojis from manual mapping", report.manual);
    println!("Extracted {} emojis with offset correction", report.offset);
    println!();
    println!("Total: {} emojis written to {}", report.total, out_dir.display());
}

fn print_report_json(report: &ExtractReport) -> ExitCode {
    match serde_json::to_string_pretty(report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: failed to serialize report: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
