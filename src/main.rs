use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fanout::export::ExportFormat;
use fanout::{AnalysisOptions, AnalysisReport, DeclarationScope, RenderOptions};

#[derive(Parser)]
#[command(name = "fanout")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Show which files import each declaration of a TypeScript file", long_about = None)]
struct Cli {
    /// File whose declarations are searched for
    target: PathBuf,

    /// Directory scanned for consumers
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Ignore usages in files whose path ends with this suffix
    #[arg(short = 'x', long = "exclude", value_name = "SUFFIX")]
    exclusions: Vec<String>,

    /// Base name of the generated files (defaults to the target's file stem)
    #[arg(short, long, value_name = "NAME")]
    output: Option<PathBuf>,

    /// Extension of candidate files, repeatable
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Directory name skipped during the scan, repeatable
    #[arg(long = "skip-dir", value_name = "NAME")]
    skip_dirs: Vec<String>,

    /// Search for every top-level declaration, not only exported ones
    #[arg(long)]
    all_declarations: bool,

    /// Abort when a candidate file fails to parse
    #[arg(long)]
    strict: bool,

    /// Only write the .dot file
    #[arg(long)]
    no_image: bool,

    /// Graphviz executable used to render the image
    #[arg(long, value_name = "PATH", default_value = "dot")]
    dot_program: String,

    /// Also write a usage report (json, csv, markdown)
    #[arg(long, value_name = "FORMAT")]
    report: Option<ExportFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> AnalysisOptions {
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.target));
        let scope = if self.all_declarations {
            DeclarationScope::All
        } else {
            DeclarationScope::Exported
        };

        AnalysisOptions::new(&self.target, &self.root, output)
            .with_exclusions(self.exclusions.iter().cloned())
            .with_extensions(self.extensions.iter().cloned())
            .with_skip_dirs(self.skip_dirs.iter().cloned())
            .with_scope(scope)
            .with_strict(self.strict)
            .with_render(RenderOptions {
                program: self.dot_program.clone(),
                skip_image: self.no_image,
            })
            .with_report(self.report)
    }
}

/// Artifacts are named after the target in the current directory.
fn default_output(target: &Path) -> PathBuf {
    target
        .file_stem()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("usage"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(report: &AnalysisReport) {
    let scan = &report.scan;

    println!(
        "🔍 Scanned {} files for {} declarations",
        scan.files_scanned,
        scan.declarations.len()
    );
    for (declaration, modules) in scan.index.iter() {
        println!("  {} ← {}", declaration, modules.join(", "));
    }

    let unused: Vec<_> = scan.unused_declarations().map(|d| d.name.as_str()).collect();
    if !unused.is_empty() {
        println!("⚠️  Unused: {}", unused.join(", "));
    }
    if !scan.skipped.is_empty() {
        println!("⚠️  Skipped {} files that failed to parse", scan.skipped.len());
    }

    println!("📄 Wrote {}", report.artifacts.dot.display());
    if let Some(image) = &report.artifacts.image {
        println!("🖼️  Rendering {}", image.display());
    }
    if let Some(path) = &report.report {
        println!("📊 Wrote {}", path.display());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options();
    let report = fanout::run(&options).with_context(|| {
        format!(
            "Failed to analyze usages of {} under {}",
            options.target.display(),
            options.root.display()
        )
    })?;

    print_summary(&report);
    Ok(())
}
