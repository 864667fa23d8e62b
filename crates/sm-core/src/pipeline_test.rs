use super::*;
use crate::error::CoreError;
use crate::rewriter::SubstitutionRule;
use std::fs;
use tempfile::tempdir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn small_config(names: &[&str]) -> Config {
    let mut config = Config::new("sql", "out");
    config.idempotent_files = names.iter().map(|s| s.to_string()).collect();
    config
}

#[test]
fn test_plan_does_not_touch_destination() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("sql/preinstall/001-a.sql"), "a");
    write(&dir.path().join("sql/idempotent/base.sql"), "b");
    write(&dir.path().join("out/keep.txt"), "keep");

    let pipeline = Pipeline::new(&small_config(&["base.sql"]), dir.path()).unwrap();
    let catalogs = pipeline.plan().unwrap();

    assert_eq!(catalogs.len(), 2);
    assert_eq!(catalogs[0].category(), Category::Migration);
    assert_eq!(catalogs[0].len(), 1);
    assert_eq!(catalogs[1].category(), Category::Idempotent);
    assert_eq!(catalogs[1].len(), 1);
    assert!(dir.path().join("out/keep.txt").exists());
    assert!(!dir.path().join("out/migration").exists());
}

#[test]
fn test_run_summary_counts() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("sql/preinstall/001-a.sql"), "aaaa");
    write(&dir.path().join("sql/preinstall/sub/005-b.sql"), "bb");
    write(
        &dir.path().join("sql/idempotent/base.sql"),
        "SELECT setval('_ps_trace.tag_key_id_seq', 1000);",
    );

    let pipeline = Pipeline::new(&small_config(&["base.sql"]), dir.path()).unwrap();
    let summary = pipeline.run().unwrap();

    assert_eq!(summary.destination_root, dir.path().join("out"));
    assert_eq!(
        summary.files,
        vec![(Category::Migration, 2), (Category::Idempotent, 1)]
    );
    assert_eq!(summary.total_files(), 3);
    assert_eq!(summary.rewritten, 1);
    assert_eq!(
        summary.bytes,
        6 + "SELECT setval('_ps_trace.tag_key_id_seq', 1000);".len() as u64
    );
}

#[test]
fn test_missing_source_root_leaves_destination_alone() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("out/keep.txt"), "keep");

    let pipeline = Pipeline::new(&small_config(&[]), dir.path()).unwrap();
    let err = pipeline.run().unwrap_err();

    assert!(matches!(err, CoreError::SourceUnreadable { .. }));
    assert!(dir.path().join("out/keep.txt").exists());
}

#[test]
fn test_missing_listed_file_fails_after_reset() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("sql/preinstall/001-a.sql"), "a");
    fs::create_dir_all(dir.path().join("sql/idempotent")).unwrap();
    write(&dir.path().join("out/stale.sql"), "stale");

    let pipeline = Pipeline::new(&small_config(&["gone.sql"]), dir.path()).unwrap();
    let err = pipeline.run().unwrap_err();

    assert!(matches!(err, CoreError::SourceUnreadable { .. }));
    assert!(!dir.path().join("out/stale.sql").exists());
    assert!(dir.path().join("out/migration/001-a.sql").exists());
}

#[test]
fn test_duplicate_prefix_aborts_before_reset() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("sql/preinstall/001-a.sql"), "a");
    write(&dir.path().join("sql/preinstall/nested/001-b.sql"), "b");
    fs::create_dir_all(dir.path().join("sql/idempotent")).unwrap();
    write(&dir.path().join("out/keep.txt"), "keep");

    let pipeline = Pipeline::new(&small_config(&[]), dir.path()).unwrap();
    let err = pipeline.run().unwrap_err();

    assert!(matches!(err, CoreError::DuplicateIndex { index: 1, .. }));
    assert!(dir.path().join("out/keep.txt").exists());
}

#[test]
fn test_new_rejects_destination_over_source() {
    let dir = tempdir().unwrap();
    let config = Config::new("sql", ".");

    let err = Pipeline::new(&config, dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_new_rejects_destination_inside_scanned_tree() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("sql/preinstall/001-a.sql"), "a");
    fs::create_dir_all(dir.path().join("sql/idempotent")).unwrap();
    let config = Config::new("sql", "sql/preinstall/out");

    let err = Pipeline::new(&config, dir.path()).unwrap_err();

    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    assert!(!dir.path().join("sql/preinstall/out").exists());
}

#[test]
fn test_from_parts_with_custom_collectors() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("idem/x.sql"), "SELECT 1;");
    let collectors: Vec<Box<dyn Collector>> = vec![Box::new(FixedList::new(
        Category::Idempotent,
        dir.path().join("idem"),
        vec!["x.sql".to_string()],
    ))];
    let rewriter = Rewriter::new(vec![SubstitutionRule::new("SELECT", "PERFORM")]);
    let pipeline = Pipeline::from_parts(collectors, dir.path().join("dest"), rewriter);

    let summary = pipeline.run().unwrap();

    assert_eq!(summary.files, vec![(Category::Idempotent, 1)]);
    assert_eq!(
        fs::read_to_string(dir.path().join("dest/idempotent/001-x.sql")).unwrap(),
        "PERFORM 1;"
    );
    assert!(dir.path().join("dest/migration").is_dir());
}
