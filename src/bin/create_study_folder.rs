//! Provisions a study folder on the research drive.
//!
//! The study description comes from a study config file, a portal study
//! record, command-line flags, or any combination; flags win.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use researchdrive::access::load_users_file;
use researchdrive::config::{
    load_or_default, load_study_config, load_study_record, SensitivityLevel, StudyConfig,
};
use researchdrive::logging::init_tracing;
use researchdrive::notification::render_notification;
use researchdrive::structure::load_structure_file;
use researchdrive::{create_study_folder, inventory, PolicyStatus, ScaffoldOptions};

/// Create a labeled study folder with its FOLDER_POLICY.md
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory in which the study folder is created (must exist)
    #[arg(short = 't', long)]
    target_dir: PathBuf,

    /// Study config file (YAML, or JSON with a .json extension)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Study record JSON exported by the research portal
    #[arg(long)]
    study_json: Option<PathBuf>,

    /// Workpackage identifier, e.g. WP1
    #[arg(short = 'w', long)]
    workpackage: Option<String>,

    /// Investigation label (LABEL1)
    #[arg(short = 'i', long)]
    investigation_label: Option<String>,

    /// Study label (LABEL2)
    #[arg(short = 's', long)]
    study_label: Option<String>,

    #[arg(long)]
    study_title: Option<String>,

    #[arg(long)]
    study_slug: Option<String>,

    /// Use this folder name instead of the generated one
    #[arg(long)]
    folder_name: Option<String>,

    /// PUBLIC, INTERNAL, CONFIDENTIAL or RESTRICTED
    #[arg(long)]
    sensitivity: Option<SensitivityLevel>,

    #[arg(long)]
    pi_name: Option<String>,

    #[arg(long)]
    pi_email: Option<String>,

    /// JSON array of access records listed in the policy
    #[arg(long)]
    users_file: Option<PathBuf>,

    /// Folder structure definition (YAML or JSON)
    #[arg(long)]
    structure_file: Option<PathBuf>,

    /// Replace an existing FOLDER_POLICY.md after backing it up
    #[arg(long)]
    overwrite: bool,

    /// Nest the study folder inside i_<workpackage>_<investigation>
    #[arg(long, conflicts_with = "flat")]
    create_investigation_folder: bool,

    /// Create the study folder directly in the target directory
    #[arg(long)]
    flat: bool,

    /// Do not print the notification text for privileged users
    #[arg(long)]
    no_email_notification: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let settings = load_or_default()?;
    let config = build_study_config(&args)?;

    let mut options = ScaffoldOptions::from_settings(&settings);
    options.overwrite_policy = args.overwrite;
    if args.create_investigation_folder {
        options.create_investigation_folder = true;
    }
    if args.flat {
        options.create_investigation_folder = false;
    }

    let outcome = create_study_folder(&args.target_dir, &config, &settings, &options)?;

    println!("Created folder structure at: {}", outcome.root.display());
    for path in inventory(&outcome.root)? {
        println!("  {}", path.display());
    }
    match &outcome.policy.status {
        PolicyStatus::Created => println!("Policy file: {}", outcome.policy.path.display()),
        PolicyStatus::Skipped => println!(
            "Policy file kept (use --overwrite to replace): {}",
            outcome.policy.path.display()
        ),
        PolicyStatus::Replaced { backup } => {
            println!("Policy file updated: {}", outcome.policy.path.display());
            if let Some(backup) = backup {
                println!("Previous version saved as: {}", backup.display());
            }
        }
        PolicyStatus::Failed(reason) => println!(
            "Policy file could not be written ({reason}): {}",
            outcome.policy.path.display()
        ),
    }

    if !args.no_email_notification {
        let text = render_notification(
            &config,
            &outcome.root,
            &settings.policy,
            Local::now().date_naive(),
        );
        println!("\n--- Notification ---\n{text}");
    }

    Ok(())
}

fn build_study_config(args: &Args) -> Result<StudyConfig> {
    let mut config = match (&args.config, &args.study_json) {
        (Some(path), _) => load_study_config(path)
            .with_context(|| format!("Failed to load study config {}", path.display()))?,
        (None, Some(path)) => StudyConfig::from_study_record(
            &load_study_record(path)
                .with_context(|| format!("Failed to load study record {}", path.display()))?,
        ),
        (None, None) => StudyConfig::default(),
    };

    override_with(&mut config.workpackage, &args.workpackage);
    override_with(&mut config.investigation_label, &args.investigation_label);
    override_with(&mut config.study_label, &args.study_label);
    override_with(&mut config.study_title, &args.study_title);
    override_with(&mut config.study_slug, &args.study_slug);
    override_with(&mut config.folder_name, &args.folder_name);
    override_with(&mut config.pi_name, &args.pi_name);
    override_with(&mut config.pi_email, &args.pi_email);
    if args.sensitivity.is_some() {
        config.sensitivity_level = args.sensitivity;
    }

    if let Some(path) = &args.users_file {
        config.authorized_users = load_users_file(path)
            .with_context(|| format!("Failed to load users file {}", path.display()))?;
    }
    if let Some(path) = &args.structure_file {
        config.structure = Some(
            load_structure_file(path)
                .with_context(|| format!("Failed to load structure file {}", path.display()))?,
        );
    }
    Ok(config)
}

fn override_with(field: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *field = Some(value.clone());
    }
}
