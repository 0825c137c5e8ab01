use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Import from prefpin-core
use prefpin_core::{
    read_prefs_file, render_overrides, render_skipped_audit, render_stats, summarize,
    write_overrides, ExportConfig, ExportResult, Exporter, Label, PatternKind, PatternSet, Stats,
};

// Import CLI utilities
use prefpin_cli::profile_locator::default_output_path;
use prefpin_cli::{pick_default_profile_dir, ProfileLocator};

// Status lines go to stderr when stdout is reserved for JSON stats
macro_rules! status {
    ($to_stderr:expr, $($arg:tt)*) => {
        if $to_stderr {
            eprintln!($($arg)*);
        } else {
            println!($($arg)*);
        }
    };
}

#[derive(Parser)]
#[command(name = "prefpin")]
#[command(about = "Export LibreWolf policy prefs to librewolf.overrides.cfg (privacy-first)")]
struct Args {
    /// LibreWolf base directory (contains profiles.ini).
    /// If not specified, ~/.librewolf and the Flatpak location are probed
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Profile directory (contains prefs.js). Defaults to the default profile in profiles.ini
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    /// Output file path (default: <base-dir>/librewolf.overrides.cfg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extra exclusion prefix; may be given several times
    #[arg(long = "exclude-prefix", value_name = "PREFIX")]
    exclude_prefix: Vec<String>,

    /// Print every skipped pref with the pattern that excluded it
    #[arg(long)]
    print_skipped: bool,

    /// Also write the skipped-pref audit to this file
    #[arg(long)]
    skipped_file: Option<PathBuf>,

    /// Print classification stats
    #[arg(long)]
    stats: bool,

    /// Stats output format. With json, stdout carries only the JSON document
    #[arg(long, value_enum, default_value = "text")]
    stats_format: StatsFormat,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Show the active pattern table and exit
    #[arg(long)]
    show_patterns: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatsFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let quiet = args.json_stats();

    status!(quiet, "🦊 prefpin - LibreWolf policy exporter");

    let (config, loaded_from) = ExportConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = loaded_from {
        status!(quiet, "📋 Loaded config from: {}", config_path);
    }

    // Setup errors (empty prefixes, bad regexes) abort before anything is read
    let patterns = config
        .build_pattern_set(&args.exclude_prefix)
        .context("Invalid exclusion patterns")?;

    if args.show_patterns {
        show_patterns(&patterns);
        return Ok(());
    }

    let base_dir = match &args.base_dir {
        Some(dir) => dir.clone(),
        None => ProfileLocator::new()?.autodetect_base_dir(),
    };
    let profile_dir = match &args.profile_dir {
        Some(dir) => dir.clone(),
        None => pick_default_profile_dir(&base_dir)?,
    };
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&base_dir, &config.output_file_name));

    debug!(
        base_dir = %base_dir.display(),
        profile_dir = %profile_dir.display(),
        patterns = patterns.len(),
        "resolved profile"
    );

    let entries = read_prefs_file(&profile_dir.join("prefs.js"))?;
    let result = Exporter::new().run(&entries, &patterns)?;
    let stats = summarize(&result);

    // Render fully before any write so a failed write leaves nothing partial
    let rendered = render_overrides(&result.accepted, &header_lines(&config));

    status!(quiet, "Profile:  {}", profile_dir.display());
    status!(quiet, "Read:     {} prefs", stats.total_seen);
    status!(quiet, "Accepted: {} prefs", stats.accepted_count);
    status!(quiet, "Skipped:  {} prefs", stats.rejected_count);
    status!(quiet, "Output:   {}", output_path.display());

    // Audit and stats go out before the write so they survive a write failure
    report_skipped(&args, &result)?;
    if args.stats {
        print_stats(&stats, args.stats_format, &profile_dir)?;
    }

    write_overrides(&output_path, &rendered)?;
    status!(quiet, "💾 Overrides saved to: {}", output_path.display());

    Ok(())
}

impl Args {
    fn json_stats(&self) -> bool {
        self.stats && matches!(self.stats_format, StatsFormat::Json)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn header_lines(config: &ExportConfig) -> Vec<String> {
    if config.header.is_empty() {
        return Vec::new();
    }
    let mut lines = config.header.clone();
    lines.push(format!("Generated at {}", chrono::Utc::now().to_rfc3339()));
    lines
}

fn report_skipped(args: &Args, result: &ExportResult) -> Result<()> {
    if !args.print_skipped && args.skipped_file.is_none() {
        return Ok(());
    }

    let audit = render_skipped_audit(result);
    let quiet = args.json_stats();

    if args.print_skipped {
        status!(quiet, "\n# --- skipped prefs (audit) ---");
        for line in &audit {
            status!(quiet, "{line}");
        }
    }

    if let Some(path) = &args.skipped_file {
        let mut contents = audit.join("\n");
        contents.push('\n');
        write_overrides(path, &contents)
            .with_context(|| format!("Failed to write skipped audit to {}", path.display()))?;
        status!(quiet, "📝 Skipped audit saved to: {}", path.display());
    }

    Ok(())
}

fn print_stats(stats: &Stats, format: StatsFormat, profile_dir: &Path) -> Result<()> {
    match format {
        StatsFormat::Text => {
            println!("\n📊 Classification stats:");
            for line in render_stats(stats) {
                println!("   {line}");
            }
        }
        StatsFormat::Json => {
            let summary = serde_json::json!({
                "profile": profile_dir.display().to_string(),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn show_patterns(patterns: &PatternSet) {
    println!("\n📋 Active patterns ({} total):", patterns.len());

    for label in [Label::Excluded, Label::Policy] {
        println!("\n{label}:");
        for kind in PatternKind::ALL {
            let texts: Vec<_> = patterns
                .iter_kind(label, kind)
                .map(|p| p.text.as_str())
                .collect();
            if texts.is_empty() {
                continue;
            }
            println!("  {kind} ({}):", texts.len());
            for text in texts {
                println!("    {text}");
            }
        }
    }

    println!("\n📝 Precedence: exact > longest prefix > suffix > contains > regex; any exclusion beats policy");
}
