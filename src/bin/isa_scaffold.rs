//! Scaffolds an ISA (Investigation/Study/Assay) project tree from a YAML template.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use researchdrive::logging::init_tracing;
use researchdrive::scaffold::{load_isa_template, scaffold_isa_project};
use researchdrive::structure::template::{
    DEFAULT_ASSAY_LABEL, DEFAULT_INVESTIGATION_LABEL, DEFAULT_STUDY_LABEL,
};
use researchdrive::structure::TemplateLabels;

/// Create an ISA model directory structure with a project README
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML template describing the structure
    #[arg(long)]
    template: PathBuf,

    /// Directory in which the structure is created (must exist)
    #[arg(short = 't', long, default_value = ".")]
    target_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_INVESTIGATION_LABEL)]
    investigation_label: String,

    #[arg(long, default_value = DEFAULT_STUDY_LABEL)]
    study_label: String,

    #[arg(long, default_value = DEFAULT_ASSAY_LABEL)]
    assay_label: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let labels = TemplateLabels {
        investigation: args.investigation_label,
        study: args.study_label,
        assay: args.assay_label,
    };
    let structure = load_isa_template(&args.template, &labels)
        .with_context(|| format!("Failed to load template {}", args.template.display()))?;
    let outcome = scaffold_isa_project(&args.target_dir, &structure, &labels)?;

    println!(
        "ISA model directory structure created in {}",
        args.target_dir.display()
    );
    println!(
        "Created {} directories, wrote {} files",
        outcome.report.created.len(),
        outcome.report.written.len() + 1
    );
    println!("Project README: {}", outcome.readme.display());
    Ok(())
}
