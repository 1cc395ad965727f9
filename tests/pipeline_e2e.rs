//! End-to-end pipeline test: ingest -> featurize -> train over a small
//! spam-style dataset in a temporary directory, exercising the on-disk
//! interchange contract between the three stages.

use std::fs;
use std::path::{Path, PathBuf};

use textforge::dataset::{self, Partition};
use textforge::model::{load_model, MODEL_FILE_NAME};
use textforge::stages;

struct Layout {
    _dir: tempfile::TempDir,
    params: PathBuf,
    raw_csv: PathBuf,
    ingest_train: PathBuf,
    ingest_test: PathBuf,
    feat_train: PathBuf,
    feat_test: PathBuf,
    model: PathBuf,
}

fn setup() -> Layout {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let params = root.join("params.yaml");
    fs::write(
        &params,
        "1_Data_Ingestion:\n  test_size: 0.3\n\
         3_Feature_Engineering:\n  max_features: 5\n\
         4_Model_Training:\n  n_estimators: 10\n  random_state: 2\n",
    )
    .unwrap();

    let raw_csv = root.join("spam.csv");
    let mut csv = String::from("v1,v2,Unnamed: 2\n");
    let messages = [
        ("spam", "win a free prize now"),
        ("ham", "are we still on for lunch"),
        ("spam", "claim your free prize today"),
        ("ham", "meeting moved to tuesday"),
        ("spam", "free entry win cash now"),
        ("ham", "see you at the meeting"),
        ("spam", "urgent claim your cash prize"),
        ("ham", "thanks for lunch yesterday"),
        ("spam", "win win win free cash"),
        ("ham", "lunch tomorrow then"),
    ];
    for (label, text) in messages {
        csv.push_str(&format!("{label},{text},\n"));
    }
    fs::write(&raw_csv, csv).unwrap();

    Layout {
        params,
        raw_csv,
        ingest_train: root.join("data/train"),
        ingest_test: root.join("data/test"),
        feat_train: root.join("features/train"),
        feat_test: root.join("features/test"),
        model: root.join("model"),
        _dir: dir,
    }
}

fn run_ingest(l: &Layout) {
    stages::ingest::run(
        &l.params,
        &l.raw_csv.display().to_string(),
        &l.ingest_train,
        &l.ingest_test,
    )
    .unwrap();
}

fn run_featurize(l: &Layout) {
    stages::featurize::run(
        &l.params,
        &l.ingest_train,
        &l.ingest_test,
        &l.feat_train,
        &l.feat_test,
    )
    .unwrap();
}

fn partition_bytes(dir: &Path, which: Partition) -> Vec<u8> {
    fs::read(dir.join(which.file_name())).unwrap()
}

#[test]
fn full_pipeline_produces_a_working_model() {
    let l = setup();

    // Stage 1: ingestion yields a 7/3 split with canonical columns.
    run_ingest(&l);
    let train = dataset::load_partition(&l.ingest_train, Partition::Train).unwrap();
    let test = dataset::load_partition(&l.ingest_test, Partition::Test).unwrap();
    assert_eq!(train.headers(), &["target", "text"]);
    assert_eq!(test.headers(), &["target", "text"]);
    assert_eq!(train.n_rows(), 7);
    assert_eq!(test.n_rows(), 3);

    // Stage 2: featurization yields 5 features + label on both partitions.
    run_featurize(&l);
    let feat_train = dataset::load_partition(&l.feat_train, Partition::Train).unwrap();
    let feat_test = dataset::load_partition(&l.feat_test, Partition::Test).unwrap();
    assert_eq!(feat_train.n_cols(), 6);
    assert_eq!(feat_test.n_cols(), 6);
    assert_eq!(feat_train.headers().last().unwrap(), "label");
    assert_eq!(feat_train.n_rows(), 7);
    assert_eq!(feat_test.n_rows(), 3);

    // Stage 3: training persists a model that classifies the held-out rows.
    stages::train::run(&l.params, &l.feat_train, &l.model).unwrap();
    let model = load_model(&l.model.join(MODEL_FILE_NAME)).unwrap();

    let (held_out, labels) = stages::train::split_features_and_labels(&feat_test).unwrap();
    let predictions = model.predict(held_out.view()).unwrap();
    assert_eq!(predictions.len(), 3);
    for (prediction, label) in predictions.iter().zip(&labels) {
        assert!(["ham", "spam"].contains(&prediction.as_str()));
        assert!(["ham", "spam"].contains(&label.as_str()));
    }
}

#[test]
fn rerunning_ingestion_is_byte_identical() {
    let l = setup();

    run_ingest(&l);
    let train_first = partition_bytes(&l.ingest_train, Partition::Train);
    let test_first = partition_bytes(&l.ingest_test, Partition::Test);

    run_ingest(&l);
    assert_eq!(partition_bytes(&l.ingest_train, Partition::Train), train_first);
    assert_eq!(partition_bytes(&l.ingest_test, Partition::Test), test_first);
}

#[test]
fn featurization_handles_missing_text_without_dropping_rows() {
    let l = setup();
    run_ingest(&l);

    // Inject an empty text cell into the ingested training partition.
    let train = dataset::load_partition(&l.ingest_train, Partition::Train).unwrap();
    let mut rows: Vec<Vec<String>> = train.rows().to_vec();
    rows[0][1] = String::new();
    let patched = textforge::dataset::Table::new(train.headers().to_vec(), rows).unwrap();
    dataset::write_table(&patched, &l.ingest_train.join(Partition::Train.file_name())).unwrap();

    run_featurize(&l);
    let feat_train = dataset::load_partition(&l.feat_train, Partition::Train).unwrap();
    assert_eq!(feat_train.n_rows(), 7, "rows with missing text are kept");
}

#[test]
fn stage_fails_cleanly_when_upstream_output_is_missing() {
    let l = setup();
    // Featurize without running ingestion first.
    let err = stages::featurize::run(
        &l.params,
        &l.ingest_train,
        &l.ingest_test,
        &l.feat_train,
        &l.feat_test,
    )
    .unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");
}
