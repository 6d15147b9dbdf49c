use flatbit::chrono::{Local, NaiveDate};
use flatbit::*;
use std::fs;
use tempfile::TempDir;

fn registry(dir: &TempDir) -> Registry {
    Registry::new(Settings::in_dir(dir.path()))
}

#[test]
fn admitted_patient_survives_restart() {
    let dir = TempDir::new().unwrap();
    let today = Local::now().date_naive();

    let mut first = registry(&dir);
    let anna = first.patients().unwrap().admit("Anna", "Schmidt", 34, Some("J45".to_string())).unwrap();
    assert_eq!(anna.id(), 1);
    assert_eq!(anna.admission_date(), Some(today));
    assert_eq!(anna.discharge_date(), None);
    first.persist_all().unwrap();

    let mut second = registry(&dir);
    let patients = second.patients().unwrap();
    let reloaded = patients.find_by_name("id", 1).unwrap();
    assert_eq!(reloaded.last_name(), "Schmidt");
    assert_eq!(reloaded.age(), 34);
    assert_eq!(reloaded.icd(), Some("J45"));
    assert_eq!(reloaded.admission_date(), Some(today));
    assert_eq!(patients.next_id(), Some(2));
}

#[test]
fn persisted_file_matches_line_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patients.csv");
    let mut store = PatientStore::open(&path, StoreOptions::default()).unwrap();
    let admitted = NaiveDate::from_ymd_opt(2026, 3, 1);
    let discharged = NaiveDate::from_ymd_opt(2026, 3, 9);
    store.add(Patient::new(4, "Max", "Muster", 61, None, admitted, discharged));
    store.add(Patient::new(9, "Eva", "Klein", 8, Some("A09".to_string()), admitted, None));
    store.persist().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "4;Max;Muster;61;01.03.2026;09.03.2026;\n9;Eva;Klein;8;01.03.2026;;A09\n");

    let reopened = PatientStore::open(&path, StoreOptions::default()).unwrap();
    let all: Vec<_> = reopened.iter().cloned().collect();
    assert_eq!(all, store.iter().cloned().collect::<Vec<_>>());
    assert_eq!(reopened.max_id(), 9);
}

#[test]
fn malformed_line_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patients.csv");
    fs::write(&path, "1;Anna;Schmidt;34;01.03.2026;;J45\n2;Ben;Roth;forty;01.03.2026;;\n").unwrap();

    match PatientStore::open(&path, StoreOptions::default()) {
        Err(StoreError::MalformedRecord { line_no, source: DecodeError::Number { field, .. }, .. }) => {
            assert_eq!(line_no, 2);
            assert_eq!(field, "age");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn users_are_seeded_once() {
    let dir = TempDir::new().unwrap();

    let mut first = registry(&dir);
    assert_eq!(first.users().unwrap().len(), DEFAULT_USERS.len());
    first.users().unwrap().delete("bob");
    first.persist(StoreKind::Users).unwrap();

    let mut second = registry(&dir);
    let users = second.users().unwrap();
    assert_eq!(users.len(), DEFAULT_USERS.len() - 1);
    assert!(!users.exists("bob"));
    assert!(users.exists("max"));
}

#[test]
fn lookup_by_name_and_typed_field_agree() {
    let dir = TempDir::new().unwrap();
    let mut registry = registry(&dir);
    let patients = registry.patients().unwrap();
    patients.admit("Anna", "Schmidt", 34, None);
    patients.admit("Karl", "Schmidt", 70, None);
    patients.admit("Lena", "Vogel", 34, None);

    assert_eq!(patients.find_all_by_name("lastName", "Schmidt").len(), 2);
    assert_eq!(patients.find_all_by(PatientField::Age, 34u8).len(), 2);
    assert_eq!(patients.find_by(PatientField::FirstName, "Lena").map(Patient::id), Some(3));
    assert!(patients.find_by_name("nickname", "Lena").is_none());
}
