use super::IntegrationHarness;
use anyhow::Result;
use researchdrive::naming::{parse_canonical_name, study_slug, StudyLabels};
use researchdrive::{create_study_folder, ScaffoldError, ScaffoldOptions};

#[test]
fn generated_names_parse_back_to_labels() -> Result<()> {
    let labels = StudyLabels::new("WP3", "CXR12", "STU07");
    let slug = study_slug(Some("Leaf Imaging: Round 2!"), &labels.study_label);
    assert_eq!(slug, "leaf-imaging-round-2");

    let name = labels.canonical_name(&slug);
    assert_eq!(name, "i_WP3_CXR12/s_CXR12-STU07_leaf-imaging-round-2");
    assert_eq!(parse_canonical_name(&name)?, labels);
    Ok(())
}

#[test]
fn mismatched_investigation_is_malformed() {
    let err = parse_canonical_name("i_WP1_CXR9/s_CXR8-STU2_slug").unwrap_err();
    match err {
        ScaffoldError::MalformedName { reason, .. } => {
            assert!(reason.contains("Investigation label mismatch"))
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn custom_folder_name_is_nested_in_investigation() -> Result<()> {
    let harness = IntegrationHarness::new();
    let settings = harness.settings();
    let mut study = harness.study();
    study.folder_name = Some("pilot-run".into());

    let outcome = create_study_folder(
        harness.target(),
        &study,
        &settings,
        &ScaffoldOptions::from_settings(&settings),
    )?;
    assert_eq!(
        outcome.root,
        harness.target().join("i_WP1_CXR9").join("pilot-run")
    );
    Ok(())
}

#[test]
fn two_segment_folder_name_is_reduced_when_flat() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut study = harness.study();
    study.folder_name = Some("i_WP1_CXR9/s_CXR9-STU2_custom".into());
    let options = ScaffoldOptions {
        create_investigation_folder: false,
        ..ScaffoldOptions::default()
    };

    let outcome = create_study_folder(harness.target(), &study, &harness.settings(), &options)?;
    assert_eq!(outcome.root, harness.target().join("s_CXR9-STU2_custom"));
    assert!(!harness.target().join("i_WP1_CXR9").exists());
    Ok(())
}

#[test]
fn incomplete_labels_are_rejected_before_writing() {
    let harness = IntegrationHarness::new();
    let mut study = harness.study();
    study.study_label = None;

    let err = create_study_folder(
        harness.target(),
        &study,
        &harness.settings(),
        &ScaffoldOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ScaffoldError::InvalidConfiguration(_)));
    assert_eq!(std::fs::read_dir(harness.target()).unwrap().count(), 0);
}

#[test]
fn hyphenated_investigation_label_round_trips() -> Result<()> {
    let labels = StudyLabels::new("WP1", "CXR-9", "STU2");
    let name = labels.canonical_name("slug");
    assert_eq!(name, "i_WP1_CXR-9/s_CXR-9-STU2_slug");
    assert_eq!(parse_canonical_name(&name)?, labels);
    Ok(())
}
