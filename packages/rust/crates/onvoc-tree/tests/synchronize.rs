//! Integration tests for TreeSynchronizer - append-only reconciliation of
//! the ID-annotated copy against the plain-text source.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use onvoc_store::IdFormat;
use onvoc_tree::{TreeInitializer, TreeSynchronizer};

fn format() -> IdFormat {
    IdFormat::new("TEST").unwrap()
}

/// Snapshot every file under a root as path → content.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let content = fs::read_to_string(e.path()).unwrap();
            (e.into_path(), content)
        })
        .collect()
}

/// Exactly the terms missing from the copy are appended, with identifiers
/// past every numeric value already present anywhere in the copy.
#[test]
fn test_adds_exactly_missing_terms() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("terms");
    let copy = dir.path().join("vocab");
    fs::create_dir_all(original.join("Brain_Structures")).unwrap();
    fs::write(
        original.join("Brain_Structures/Cortex.txt"),
        "Hippocampus\nAmygdala\n",
    )
    .unwrap();

    fs::create_dir_all(copy.join("Brain_Structures")).unwrap();
    fs::write(
        copy.join("Categories.tsv"),
        "term\tvocabulary_id\tcomment\nBrain Structures\tTEST:0000001\t\n",
    )
    .unwrap();
    fs::write(
        copy.join("Brain_Structures/Subcategories.tsv"),
        "term\tvocabulary_id\tcomment\nCortex\tTEST:0000002\t\n",
    )
    .unwrap();
    fs::write(
        copy.join("Brain_Structures/Cortex.tsv"),
        "term\tvocabulary_id\tcomment\nHippocampus\tTEST:0000003\t\n",
    )
    .unwrap();

    let report = TreeSynchronizer::new(original, copy.clone(), format(), false)
        .run()
        .unwrap();

    assert_eq!(report.seed, 3);
    assert!(report.added_categories.is_empty());
    assert!(report.added_subcategories.is_empty());
    assert_eq!(report.added_terms, vec!["Amygdala"]);

    assert_eq!(
        fs::read_to_string(copy.join("Brain_Structures/Cortex.tsv")).unwrap(),
        "term\tvocabulary_id\tcomment\nHippocampus\tTEST:0000003\t\nAmygdala\tTEST:0000004\t\n"
    );
}

/// A second run over an unchanged source writes nothing: the whole tree is
/// byte-identical and the report is empty.
#[test]
fn test_idempotent_rerun() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("terms");
    let copy = dir.path().join("vocab");
    fs::create_dir_all(original.join("Brain_Structures")).unwrap();
    fs::create_dir_all(original.join("Imaging_Methods")).unwrap();
    fs::write(
        original.join("Brain_Structures/Cortex.txt"),
        "Hippocampus\nAmygdala\n",
    )
    .unwrap();
    fs::write(
        original.join("Imaging_Methods/Structural_MRI.txt"),
        "T1-Weighted\nT2-Weighted\n",
    )
    .unwrap();
    fs::create_dir_all(&copy).unwrap();

    let first = TreeSynchronizer::new(original.clone(), copy.clone(), format(), false)
        .run()
        .unwrap();
    assert!(first.has_changes());

    let before = snapshot(&copy);
    let second = TreeSynchronizer::new(original, copy.clone(), format(), false)
        .run()
        .unwrap();

    assert!(!second.has_changes());
    assert_eq!(snapshot(&copy), before);
}

/// Rows present before a run are never altered, reordered, or removed;
/// deletions in the source are not propagated.
#[test]
fn test_append_only_and_no_deletion_propagation() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("terms");
    let copy = dir.path().join("vocab");
    fs::create_dir_all(original.join("Brain_Structures")).unwrap();
    // Source no longer lists "Retired Term", but does add a new one.
    fs::write(
        original.join("Brain_Structures/Cortex.txt"),
        "Hippocampus\nNew Term\n",
    )
    .unwrap();

    fs::create_dir_all(copy.join("Brain_Structures")).unwrap();
    fs::write(
        copy.join("Categories.tsv"),
        "term\tvocabulary_id\tcomment\nBrain Structures\tTEST:0000001\t\n",
    )
    .unwrap();
    fs::write(
        copy.join("Brain_Structures/Subcategories.tsv"),
        "term\tvocabulary_id\tcomment\nCortex\tTEST:0000002\t\n",
    )
    .unwrap();
    let existing = "term\tvocabulary_id\tcomment\n\
                    Retired Term\tTEST:0000005\tkept manually\n\
                    Hippocampus\tTEST:0000003\t\n";
    fs::write(copy.join("Brain_Structures/Cortex.tsv"), existing).unwrap();

    TreeSynchronizer::new(original, copy.clone(), format(), false)
        .run()
        .unwrap();

    let after = fs::read_to_string(copy.join("Brain_Structures/Cortex.tsv")).unwrap();
    assert!(after.starts_with(existing));
    assert_eq!(after, format!("{existing}New Term\tTEST:0000006\t\n"));
}

/// The seed is the maximum numeric identifier anywhere in the copy, not
/// just in the files being extended.
#[test]
fn test_seed_is_global_maximum() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("terms");
    let copy = dir.path().join("vocab");
    fs::create_dir_all(original.join("New_Category")).unwrap();
    fs::write(original.join("New_Category/Topics.txt"), "Fresh Term\n").unwrap();

    fs::create_dir_all(copy.join("Old_Category")).unwrap();
    fs::write(
        copy.join("Categories.tsv"),
        "term\tvocabulary_id\tcomment\nOld Category\tTEST:0000001\t\n",
    )
    .unwrap();
    fs::write(
        copy.join("Old_Category/Subcategories.tsv"),
        "term\tvocabulary_id\tcomment\nArchive\tTEST:0000002\t\n",
    )
    .unwrap();
    fs::write(
        copy.join("Old_Category/Archive.tsv"),
        "term\tvocabulary_id\tcomment\nDeep Term\tTEST:0000031\t\n",
    )
    .unwrap();

    let report = TreeSynchronizer::new(original, copy.clone(), format(), false)
        .run()
        .unwrap();

    assert_eq!(report.seed, 31);
    assert_eq!(
        fs::read_to_string(copy.join("Categories.tsv")).unwrap(),
        "term\tvocabulary_id\tcomment\n\
         Old Category\tTEST:0000001\t\n\
         New Category\tTEST:0000032\t\n"
    );
    assert_eq!(
        fs::read_to_string(copy.join("New_Category/Subcategories.tsv")).unwrap(),
        "term\tvocabulary_id\tcomment\nTopics\tTEST:0000033\t\n"
    );
    assert_eq!(
        fs::read_to_string(copy.join("New_Category/Topics.tsv")).unwrap(),
        "term\tvocabulary_id\tcomment\nFresh Term\tTEST:0000034\t\n"
    );
}

/// A known subcategory whose leaf file disappeared gets it recreated with
/// just the header before terms are appended.
#[test]
fn test_recreates_missing_leaf_for_known_subcategory() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("terms");
    let copy = dir.path().join("vocab");
    fs::create_dir_all(original.join("Brain_Structures")).unwrap();
    fs::write(original.join("Brain_Structures/Cortex.txt"), "Hippocampus\n").unwrap();

    fs::create_dir_all(copy.join("Brain_Structures")).unwrap();
    fs::write(
        copy.join("Categories.tsv"),
        "term\tvocabulary_id\tcomment\nBrain Structures\tTEST:0000001\t\n",
    )
    .unwrap();
    fs::write(
        copy.join("Brain_Structures/Subcategories.tsv"),
        "term\tvocabulary_id\tcomment\nCortex\tTEST:0000002\t\n",
    )
    .unwrap();
    // No Cortex.tsv on disk.

    TreeSynchronizer::new(original, copy.clone(), format(), false)
        .run()
        .unwrap();

    assert_eq!(
        fs::read_to_string(copy.join("Brain_Structures/Cortex.tsv")).unwrap(),
        "term\tvocabulary_id\tcomment\nHippocampus\tTEST:0000003\t\n"
    );
}

/// Syncing into an empty copy behaves like initialization, one addition at
/// a time, in sorted walk order.
#[test]
fn test_sync_into_empty_copy() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("terms");
    let copy = dir.path().join("vocab");
    fs::create_dir_all(original.join("Brain_Structures")).unwrap();
    fs::write(
        original.join("Brain_Structures/Cortex.txt"),
        "Hippocampus\nAmygdala\n",
    )
    .unwrap();
    fs::create_dir_all(&copy).unwrap();

    let report = TreeSynchronizer::new(original, copy.clone(), format(), false)
        .run()
        .unwrap();

    assert_eq!(report.added_categories, vec!["Brain Structures"]);
    assert_eq!(report.added_subcategories, vec!["Brain Structures/Cortex"]);
    assert_eq!(report.added_terms, vec!["Hippocampus", "Amygdala"]);
    assert_eq!(report.change_count(), 4);

    assert_eq!(
        fs::read_to_string(copy.join("Brain_Structures/Cortex.tsv")).unwrap(),
        "term\tvocabulary_id\tcomment\nHippocampus\tTEST:0000003\t\nAmygdala\tTEST:0000004\t\n"
    );
}

/// Synchronizing after initialization with an unchanged source is a no-op.
#[test]
fn test_initialize_then_synchronize_is_quiet() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("terms");
    let copy = dir.path().join("vocab");
    fs::create_dir_all(original.join("Brain_Structures")).unwrap();
    fs::write(
        original.join("Brain_Structures/Cortex.txt"),
        "Hippocampus\nAmygdala\n",
    )
    .unwrap();

    TreeInitializer::new(original.clone(), copy.clone(), format())
        .run()
        .unwrap();
    let before = snapshot(&copy);

    let report = TreeSynchronizer::new(original, copy.clone(), format(), false)
        .run()
        .unwrap();

    assert!(!report.has_changes());
    assert_eq!(snapshot(&copy), before);
}
