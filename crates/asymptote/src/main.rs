use anyhow::{Context, Result};
use asymptote::{assemble_with, AnalysisResult, AnalyzerConfig, AsymptoteError};
use clap::{Parser, ValueEnum};
use colored::*;
use globset::GlobSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};
use walkdir::WalkDir;

const MAX_WIDTH: usize = 80;
const LABEL_COLUMN: usize = 16;

/// Asymptote - Heuristic Big-O Estimation
#[derive(Parser)]
#[command(name = "asymptote")]
#[command(about = "Estimate time and space complexity from source text")]
#[command(version)]
struct Cli {
  /// Files or directories to analyze (reads stdin when omitted)
  #[arg(value_name = "PATH")]
  paths: Vec<PathBuf>,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
  format: OutputFormat,

  /// Configuration file path
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
  Pretty,
  Json,
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(e) = run(&cli) {
    eprintln!("{} {:#}", "Error:".red().bold(), e);
    process::exit(1);
  }
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("asymptote=debug")
    } else {
      EnvFilter::new("asymptote=warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn run(cli: &Cli) -> Result<()> {
  let config = match &cli.config {
    Some(path) => AnalyzerConfig::load_from_file(path)
      .with_context(|| format!("failed to load config from {}", path.display()))?,
    None => AnalyzerConfig::load().context("failed to load config")?,
  };

  let results = if cli.paths.is_empty() {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source).context("failed to read stdin")?;
    vec![assemble_with(&source, &config)]
  } else {
    let ignore = config.ignore_matcher()?;
    analyze_paths(&cli.paths, &config, &ignore)
  };

  match cli.format {
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    OutputFormat::Pretty => results.iter().for_each(print_result),
  }

  Ok(())
}

fn analyze_paths(paths: &[PathBuf], config: &AnalyzerConfig, ignore: &GlobSet) -> Vec<AnalysisResult> {
  let mut results = Vec::new();

  for path in paths {
    if path.is_file() {
      push_analysis(path, config, &mut results);
    } else if path.is_dir() {
      let files = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !ignore.is_match(entry.path()));
      for entry in files {
        push_analysis(entry.path(), config, &mut results);
      }
    } else {
      eprintln!("{} {} is not a file or directory", "Warning:".yellow(), path.display());
    }
  }

  results
}

fn push_analysis(path: &Path, config: &AnalyzerConfig, results: &mut Vec<AnalysisResult>) {
  match read_source(path) {
    Ok(source) => {
      let file_config = AnalyzerConfig { name: path.display().to_string(), ..config.clone() };
      results.push(assemble_with(&source, &file_config));
    }
    Err(e) => eprintln!("{} {}", "Skipping:".yellow(), e),
  }
}

fn read_source(path: &Path) -> asymptote::Result<String> {
  std::fs::read_to_string(path).map_err(|e| AsymptoteError::source_read(path, e))
}

fn print_result(result: &AnalysisResult) {
  let width = terminal_width();

  println!("{}", truncate_left(&result.name, width).purple().bold());
  println!("{}", "=".repeat(width));

  let rows = [
    ("Best case", &result.time_complexity.best),
    ("Average case", &result.time_complexity.average),
    ("Worst case", &result.time_complexity.worst),
    ("Space", &result.space_complexity),
  ];
  for (case, label) in rows {
    let dots = ".".repeat(LABEL_COLUMN.saturating_sub(case.len()));
    println!("{case}{} {}", dots.dimmed(), color_label(label.as_str()));
  }

  println!();
  for line in description_lines(&result.description) {
    println!("  {}", line.italic());
  }
  println!();
}

fn description_lines(description: &str) -> impl Iterator<Item = &str> {
  description.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn color_label(label: &str) -> ColoredString {
  match label {
    "O(1)" | "O(log n)" => label.green(),
    "O(n)" | "O(n log n)" => label.yellow(),
    _ => label.red(),
  }
}

fn terminal_width() -> usize {
  let (_, columns) = console::Term::stdout().size();
  usize::from(columns).clamp(LABEL_COLUMN + 8, MAX_WIDTH)
}

fn truncate_left(text: &str, max_width: usize) -> String {
  let count = text.chars().count();
  if count <= max_width {
    text.to_string()
  } else {
    let keep: String = text.chars().skip(count - (max_width - 3)).collect();
    format!("...{keep}")
  }
}
