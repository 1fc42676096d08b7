//! Integration tests for full pipeline runs over a temporary study tree
//!
//! File names carry their condition code (or sit under an override folder)
//! so the random temp-dir name never influences classification.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use physum::core::{master_columns, Pipeline, WideTable};
use physum::types::Channel;
use physum::{PipelineConfig, DIAGNOSTICS_FILE_NAME, LONG_FILE_NAME, MASTER_FILE_NAME};

const OUTPUT_FILES: [&str; 6] = [
    "bpm_summary.csv",
    "face_summary.csv",
    "eye_summary.csv",
    MASTER_FILE_NAME,
    LONG_FILE_NAME,
    DIAGNOSTICS_FILE_NAME,
];

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Three participants, one override folder, one file without an ID
fn study() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "s1/AB001_PL.csv",
        "Time,Heart Rate (BPM),Face Movement (avg),Eye Movement (avg)\n0,70,0.5,0.25\n1,72,0.7,0.35\n",
    );
    write(root, "s1/AB001_NT.csv", "Heart Rate (BPM)\n64\n66\n");
    write(root, "s2/PPG_CD02_PT.csv", "hr_bpm,face_avg\n80,1.0\n");
    write(root, "Grupo X/AB003_PT.csv", "BPM\n90\n");
    write(root, "notes/readme.csv", "Comment\nhello\n");
    write(
        root,
        "summaries/conditions_mapping.csv",
        "folder_key,valence,veracity\ngrupo x,negative,lie\n",
    );
    tmp
}

fn output(root: &Path, name: &str) -> PathBuf {
    root.join("summaries").join(name)
}

fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(output(root, name)).unwrap()
}

fn run(root: &Path) -> physum::core::RunOutput {
    Pipeline::new(PipelineConfig::new(root))
        .unwrap()
        .run_all()
        .unwrap()
}

// =============================================================================
// FULL RUN
// =============================================================================

#[test]
fn test_full_run_writes_every_output() {
    let tmp = study();
    let out = run(tmp.path());

    assert_eq!(out.report.files_scanned, 5);
    assert_eq!(out.report.outputs.len(), OUTPUT_FILES.len());
    for name in OUTPUT_FILES {
        assert!(output(tmp.path(), name).is_file(), "{name} missing");
    }
}

#[test]
fn test_bpm_summary_content() {
    let tmp = study();
    run(tmp.path());

    assert_eq!(
        read(tmp.path(), "bpm_summary.csv"),
        "Participant,Positive Lie,Negative Lie,Positive Truth,Negative Truth\n\
         AB001,71.0,,,65.0\n\
         AB003,,90.0,,\n\
         CD002,,,80.0,\n"
    );
}

#[test]
fn test_override_wins_end_to_end() {
    // AB003_PT.csv says Positive Truth, its folder is mapped to Negative Lie
    let tmp = study();
    run(tmp.path());

    let bpm = WideTable::read(&output(tmp.path(), "bpm_summary.csv")).unwrap();
    assert_eq!(bpm.get("AB003", "Negative Lie"), Some(90.0));
    assert_eq!(bpm.get("AB003", "Positive Truth"), None);

    let diagnostics = read(tmp.path(), DIAGNOSTICS_FILE_NAME);
    let row = diagnostics.lines().find(|l| l.starts_with("AB003_PT.csv")).unwrap();
    assert!(row.contains(",AB003,Negative,Lie,Grupo X,"));
}

#[test]
fn test_unidentified_file_is_diagnosed() {
    let tmp = study();
    let out = run(tmp.path());

    assert_eq!(out.report.reason_tally.get("ok"), Some(&4));
    assert_eq!(out.report.reason_tally.get("participant_id_not_found"), Some(&1));

    let diagnostics = read(tmp.path(), DIAGNOSTICS_FILE_NAME);
    assert!(diagnostics.starts_with("File,Dir,Participant,Valence,Veracity,Matched_Component,Reason\n"));
    assert_eq!(diagnostics.lines().count(), 6);
}

#[test]
fn test_channel_outcomes() {
    let tmp = study();
    let out = run(tmp.path());

    let bpm = &out.report.channels[&Channel::Bpm];
    assert_eq!(bpm.files_used, 4);
    assert_eq!(bpm.files_without_column, 1);
    assert_eq!(bpm.participants, 3);

    let eye = &out.report.channels[&Channel::Eye];
    assert_eq!(eye.files_used, 1);
    assert_eq!(eye.files_without_column, 4);
}

// =============================================================================
// MASTER AND LONG
// =============================================================================

#[test]
fn test_master_column_order() {
    let tmp = study();
    run(tmp.path());

    let master = read(tmp.path(), MASTER_FILE_NAME);
    let header: Vec<&str> = master.lines().next().unwrap().split(',').collect();
    let mut expected = vec!["Participant".to_string()];
    expected.extend(master_columns());
    assert_eq!(header, expected);
    assert_eq!(master.lines().count(), 4);
}

#[test]
fn test_master_keeps_columns_of_missing_channel() {
    let tmp = study();
    run(tmp.path());
    fs::remove_file(output(tmp.path(), "eye_summary.csv")).unwrap();

    let pipeline = Pipeline::new(PipelineConfig::new(tmp.path())).unwrap();
    let mut report = physum::types::RunReport::new();
    let master = pipeline.run_master(&mut report).unwrap().unwrap();

    assert_eq!(master.columns().len(), 12);
    assert_eq!(master.get("AB001", "Positive Lie_EYE"), None);
    assert_eq!(master.get("AB001", "Positive Lie_FACE"), Some(0.6));
}

#[test]
fn test_long_counts_match_wide_cells() {
    let tmp = study();
    let out = run(tmp.path());
    let long = out.long.unwrap();

    for channel in Channel::ALL {
        let wide = WideTable::read(&output(tmp.path(), channel.summary_file_name())).unwrap();
        assert_eq!(long.count_for(channel), wide.non_absent_count(), "{channel}");
    }
    assert_eq!(long.len(), 7);
    assert_eq!(read(tmp.path(), LONG_FILE_NAME).lines().count(), 8);
}

#[test]
fn test_long_only_reads_existing_summaries() {
    let tmp = study();
    run(tmp.path());
    fs::remove_file(output(tmp.path(), LONG_FILE_NAME)).unwrap();

    let pipeline = Pipeline::new(PipelineConfig::new(tmp.path())).unwrap();
    let out = pipeline.run_long_only().unwrap();

    assert_eq!(out.long.unwrap().len(), 7);
    assert!(out.report.notices.is_empty());
    assert!(output(tmp.path(), LONG_FILE_NAME).is_file());
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn test_rerun_is_byte_identical() {
    let tmp = study();
    let first = run(tmp.path());
    let before: Vec<Vec<u8>> = OUTPUT_FILES
        .iter()
        .map(|name| fs::read(output(tmp.path(), name)).unwrap())
        .collect();

    let second = run(tmp.path());
    let after: Vec<Vec<u8>> = OUTPUT_FILES
        .iter()
        .map(|name| fs::read(output(tmp.path(), name)).unwrap())
        .collect();

    assert_eq!(before, after);
    let digests = |o: &physum::core::RunOutput| -> Vec<String> {
        o.report.outputs.iter().map(|w| w.sha256.clone()).collect()
    };
    assert_eq!(digests(&first), digests(&second));
    assert_eq!(second.report.files_scanned, 5);
}

// =============================================================================
// UNKNOWN HANDLING
// =============================================================================

#[test]
fn test_keep_unknown_adds_empty_row() {
    let tmp = study();
    // Unrecognised labels map the folder to an Unknown condition
    write(
        tmp.path(),
        "summaries/conditions_mapping.csv",
        "folder_key,valence,veracity\ngrupo x,neutral,neutral\n",
    );

    let dropped = run(tmp.path());
    assert_eq!(dropped.report.channels[&Channel::Bpm].dropped_rows, 1);
    let bpm = WideTable::read(&output(tmp.path(), "bpm_summary.csv")).unwrap();
    assert!(!bpm.contains("AB003"));

    let config = PipelineConfig::new(tmp.path()).with_drop_unknown(false);
    let kept = Pipeline::new(config).unwrap().run_all().unwrap();
    assert_eq!(kept.report.channels[&Channel::Bpm].dropped_rows, 0);
    let bpm = WideTable::read(&output(tmp.path(), "bpm_summary.csv")).unwrap();
    assert!(bpm.contains("AB003"));
    assert_eq!(bpm.get("AB003", "Negative Lie"), None);
}

// =============================================================================
// OUTPUT LOCATION
// =============================================================================

#[test]
fn test_channel_without_data_removes_previous_summary() {
    let tmp = study();
    run(tmp.path());
    assert!(output(tmp.path(), "eye_summary.csv").is_file());

    // The only eye column goes away
    write(tmp.path(), "s1/AB001_PL.csv", "Heart Rate (BPM),Face Movement (avg)\n70,0.5\n72,0.7\n");
    let out = run(tmp.path());

    assert!(!output(tmp.path(), "eye_summary.csv").exists());
    assert!(out.report.notices.iter().any(|n| n == "Eye: nothing found"));
    let master = out.master.unwrap();
    assert_eq!(master.get("AB001", "Positive Lie_EYE"), None);
    assert_eq!(master.get("AB001", "Positive Lie_FACE"), Some(0.6));
    assert_eq!(out.long.unwrap().count_for(Channel::Eye), 0);
}

#[test]
fn test_custom_output_dir_name() {
    let tmp = study();
    write(
        tmp.path(),
        "out/conditions_mapping.csv",
        "folder_key,valence,veracity\ngrupo x,negative,lie\n",
    );
    let config = PipelineConfig::new(tmp.path()).with_output_dir_name("out");
    let first = Pipeline::new(config.clone()).unwrap().run_all().unwrap();
    let second = Pipeline::new(config).unwrap().run_all().unwrap();

    // Outputs from the first run are not picked up as inputs by the second
    assert_eq!(first.report.files_scanned, 6);
    assert_eq!(second.report.files_scanned, 6);
    for name in OUTPUT_FILES {
        assert!(tmp.path().join("out").join(name).is_file(), "{name} missing");
    }
    let bpm = WideTable::read(&tmp.path().join("out").join("bpm_summary.csv")).unwrap();
    assert_eq!(bpm.get("AB003", "Negative Lie"), Some(90.0));
}
