use super::support::tree;
use super::IntegrationHarness;
use anyhow::Result;
use researchdrive::structure::load_structure_file;
use researchdrive::{create_study_folder, ScaffoldError, ScaffoldOptions};
use std::fs;

const STRUCTURE_YAML: &str = "\
data:
  _readme: Measurements
  raw: null
docs: [reports, protocols]
notes.md: Template notes
";

#[test]
fn rerun_leaves_tree_unchanged() -> Result<()> {
    let harness = IntegrationHarness::new();
    let settings = harness.settings();
    let options = ScaffoldOptions::from_settings(&settings);
    let mut study = harness.study();
    study.structure = Some(load_structure_file(
        &harness.write_input("structure.yaml", STRUCTURE_YAML),
    )?);

    let first = create_study_folder(harness.target(), &study, &settings, &options)?;
    let before = tree(harness.target());
    let second = create_study_folder(harness.target(), &study, &settings, &options)?;

    assert_eq!(first.root, second.root);
    assert_eq!(before, tree(harness.target()));
    assert!(second.report.created.is_empty());
    assert_eq!(
        before,
        vec![
            "i_WP1_CXR9",
            "i_WP1_CXR9/s_CXR9-STU2_test-study",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/CXR9-STU2_data",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/CXR9-STU2_data/README.md",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/CXR9-STU2_data/raw",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/CXR9-STU2_docs",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/CXR9-STU2_docs/protocols",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/CXR9-STU2_docs/reports",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/CXR9-STU2_notes.md",
            "i_WP1_CXR9/s_CXR9-STU2_test-study/FOLDER_POLICY.md",
        ]
    );
    Ok(())
}

#[test]
fn user_content_survives_and_declared_files_regenerate() -> Result<()> {
    let harness = IntegrationHarness::new();
    let settings = harness.settings();
    let options = ScaffoldOptions::from_settings(&settings);
    let mut study = harness.study();
    study.structure = Some(load_structure_file(
        &harness.write_input("structure.yaml", STRUCTURE_YAML),
    )?);

    let outcome = create_study_folder(harness.target(), &study, &settings, &options)?;
    let raw_file = outcome.root.join("CXR9-STU2_data").join("raw").join("plate1.csv");
    let notes = outcome.root.join("CXR9-STU2_notes.md");
    fs::write(&raw_file, "a,b\n1,2\n")?;
    fs::write(&notes, "edited by hand")?;

    create_study_folder(harness.target(), &study, &settings, &options)?;

    assert_eq!(fs::read_to_string(&raw_file)?, "a,b\n1,2\n");
    assert_eq!(fs::read_to_string(&notes)?, "Template notes");
    Ok(())
}

#[test]
fn partial_tree_is_completed() -> Result<()> {
    let harness = IntegrationHarness::new();
    let settings = harness.settings();
    let options = ScaffoldOptions::from_settings(&settings);
    let study = harness.study();
    let partial = harness
        .target()
        .join("i_WP1_CXR9")
        .join("s_CXR9-STU2_test-study")
        .join("CXR9-STU2_raw");
    fs::create_dir_all(&partial)?;

    let outcome = create_study_folder(harness.target(), &study, &settings, &options)?;

    assert!(outcome.report.existing.contains(&partial));
    assert!(outcome.root.join("CXR9-STU2_processed").is_dir());
    assert!(outcome.root.join("CXR9-STU2_metadata").is_dir());
    Ok(())
}

#[test]
fn missing_target_mutates_nothing() {
    let harness = IntegrationHarness::new();
    let missing = harness.target().join("not-mounted");
    let err = create_study_folder(
        &missing,
        &harness.study(),
        &harness.settings(),
        &ScaffoldOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ScaffoldError::TargetUnavailable { .. }));
    assert!(!missing.exists());
    assert!(tree(harness.target()).is_empty());
    assert!(harness.workspace_path().join("drive").is_dir());
}

#[test]
fn structure_escaping_the_root_is_rejected() {
    let harness = IntegrationHarness::new();
    let victim = harness.workspace_path().join("victim.txt");
    fs::write(&victim, "original").unwrap();
    let structure = harness.write_input(
        "structure.json",
        r#"{"docs": {"../../../../victim.txt": "clobbered"}}"#,
    );

    let err = load_structure_file(&structure).unwrap_err();

    assert!(matches!(err, ScaffoldError::InputParseFailure { .. }));
    assert_eq!(fs::read_to_string(&victim).unwrap(), "original");
    assert!(tree(harness.target()).is_empty());
}
