//! End-to-end scenarios through the public API: decode, extract, store, edit
//! and export.

use std::{collections::HashMap, path::Path};

use reqtract::{
    Category, CategoryLabel, Config, Directory, EditSubmission, MemoryStore, Pipeline,
    SegmenterMode, Session, SessionKey, SessionStore, Upload, interface::to_csv,
};
use tempfile::TempDir;

const DOCUMENT: &str = "The system must log errors. Response time should be fast. This is fine.";

fn linguistic() -> Pipeline {
    Pipeline::from_config(&Config::default(), Path::new("."))
}

#[test]
fn upload_extract_and_export() {
    let upload = Upload::from_bytes(DOCUMENT.as_bytes(), Some("spec.txt"));
    let mut session = Session::default();

    let count = session.extract(&linguistic(), &upload.text, &upload.label);

    assert_eq!(count, 2);
    let csv = to_csv(session.collection());
    let lines: Vec<&str> = csv.split("\r\n").collect();
    assert_eq!(lines[0], "ID,Requirement,Category,Source");
    assert_eq!(
        lines[1],
        "FR1,\"The system must log errors.\",Functional,\"spec.txt | sentence 1\""
    );
    assert_eq!(
        lines[2],
        "FR2,\"Response time should be fast.\",Non-Functional,\"spec.txt | sentence 2\""
    );
}

#[test]
fn both_segmenters_agree_on_plain_prose() {
    let mut config = Config::default();
    config.segmenter = SegmenterMode::Fallback;
    let fallback = Pipeline::from_config(&config, Path::new("."));

    assert_eq!(
        linguistic().run(DOCUMENT, "spec.txt"),
        fallback.run(DOCUMENT, "spec.txt")
    );
}

#[test]
fn abbreviations_do_not_split_requirements() {
    let text = "Dr. Smith must approve releases, e.g. hotfixes. The UI should be clear.";

    let requirements = linguistic().run(text, "plan.md");

    assert_eq!(requirements.len(), 2);
    assert_eq!(
        requirements[0].text,
        "Dr. Smith must approve releases, e.g. hotfixes."
    );
    assert_eq!(requirements[1].source, "plan.md | sentence 2");
}

#[test]
fn single_letters_and_mixed_case_words_keep_sentences_apart() {
    let text = "The system must support plan B. The UI should be clear. \
                Backups must go to drive C. Restores should take minutes. \
                Errors must be logged. iOS should be supported.";

    let categories: Vec<CategoryLabel> = linguistic()
        .run(text, "spec.txt")
        .into_iter()
        .map(|r| r.category)
        .collect();

    let functional = CategoryLabel::from(Category::Functional);
    let non_functional = CategoryLabel::from(Category::NonFunctional);
    assert_eq!(
        categories,
        [
            functional.clone(),
            non_functional.clone(),
            functional.clone(),
            non_functional.clone(),
            functional,
            non_functional,
        ]
    );
}

#[test]
fn unnamed_upload_with_no_requirements() {
    let upload = Upload::from_bytes(b"Nothing to see here. Move along.", None);
    let mut session = Session::default();
    session.extract(&linguistic(), "It must go.", "old.txt");

    let count = session.extract(&linguistic(), &upload.text, &upload.label);

    assert_eq!(count, 0);
    assert!(session.collection().is_empty());
    assert_eq!(session.document(), Some("(uploaded)"));
    assert_eq!(to_csv(session.collection()), "ID,Requirement,Category,Source\r\n");
}

#[test]
fn configured_numbering_and_keywords() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    let mut config = Config::default();
    config.set("id_prefix", "REQ").unwrap();
    config.set("digits", "3").unwrap();
    config.set("functional_keywords", "shall").unwrap();
    config.set("non_functional_keywords", "performance").unwrap();
    config.save(&config_path).unwrap();

    let loaded = Config::load(&config_path).unwrap();
    let pipeline = Pipeline::from_config(&loaded, tmp.path());
    let requirements = pipeline.run(
        "The pump shall stop. Performance matters. It must not matter.",
        "pump.txt",
    );

    let ids: Vec<&str> = requirements.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["REQ001", "REQ002"]);
    assert_eq!(requirements[1].category, Category::NonFunctional.into());
}

#[test]
fn missing_model_falls_back_to_punctuation() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.set("model", "models/missing.toml").unwrap();

    let pipeline = Pipeline::from_config(&config, tmp.path());

    assert_eq!(pipeline.segmenter().name(), "punctuation");
    assert_eq!(pipeline.run(DOCUMENT, "spec.txt").len(), 2);
}

#[test]
fn edit_form_replaces_collection() {
    let mut store = MemoryStore::new();
    let key = SessionKey::default();
    let mut session = store.open(&key).unwrap();
    session.extract(&linguistic(), DOCUMENT, "spec.txt");
    store.save(&key, &session).unwrap();

    let fields: HashMap<String, String> = [
        ("row-count", "1"),
        ("id-0", "SEC-1"),
        ("text-0", "Passwords must be hashed."),
        ("category-0", "Security"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut session = store.open(&key).unwrap();
    session.apply(EditSubmission::from_form(&fields).unwrap());
    store.save(&key, &session).unwrap();

    let stored = store.open(&key).unwrap();
    let records = stored.collection().read();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "SEC-1");
    assert_eq!(records[0].category, CategoryLabel::Opaque("Security".to_string()));
    assert_eq!(records[0].source, "");
    assert_eq!(
        to_csv(stored.collection()).split("\r\n").nth(1),
        Some("SEC-1,\"Passwords must be hashed.\",Security,")
    );
}

#[test]
fn sessions_persist_on_disk_and_are_isolated() {
    let tmp = TempDir::new().unwrap();
    let alice: SessionKey = "alice".parse().unwrap();
    let bob: SessionKey = "bob".parse().unwrap();

    {
        let mut store = Directory::new(tmp.path().join("sessions"));
        let mut session = store.open(&alice).unwrap();
        session.extract(&linguistic(), DOCUMENT, "spec.txt");
        store.save(&alice, &session).unwrap();
    }

    let mut store = Directory::new(tmp.path().join("sessions"));
    assert_eq!(store.open(&alice).unwrap().collection().len(), 2);
    assert!(store.open(&bob).unwrap().collection().is_empty());

    store.remove(&alice).unwrap();
    assert!(store.open(&alice).unwrap().collection().is_empty());
}

#[test]
fn re_extracting_the_same_document_is_idempotent() {
    let mut session = Session::default();
    session.extract(&linguistic(), DOCUMENT, "spec.txt");
    let first = session.collection().clone();

    session.extract(&linguistic(), DOCUMENT, "spec.txt");

    assert_eq!(session.collection(), &first);
}

#[test]
fn cleared_session_is_stored_empty() {
    let tmp = TempDir::new().unwrap();
    let key = SessionKey::default();
    let mut store = Directory::new(tmp.path().join("sessions"));
    let mut session = store.open(&key).unwrap();
    session.extract(&linguistic(), DOCUMENT, "spec.txt");
    store.save(&key, &session).unwrap();

    let mut session = store.open(&key).unwrap();
    session.clear();
    store.save(&key, &session).unwrap();

    let stored = store.load(&key).unwrap().unwrap();
    assert!(stored.collection().is_empty());
    assert_eq!(stored.document(), None);
    assert!(stored.updated().is_some());
}
