use chronicle_core::{
    create_character, gain_experience, standard_classes, CharacterRepository, CharacterService,
    CharacterServiceError, CharacterError, JsonFileCharacterRepository, RepoError, SaveDataError,
};
use serde_json::json;
use std::fs;

#[test]
fn save_then_load_roundtrip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    let mut character = create_character(standard_classes(), "Aria Vale", "Cleric").unwrap();
    gain_experience(&mut character, 250).unwrap();
    character.gold = 340;
    character.inventory.push(json!({"id": "sword", "qty": 1}));
    character.active_quests.push(json!("goblin_cave"));
    character.equipped_armor = Some(json!("leather_armor"));

    let path = repo.save(&character).unwrap();
    assert_eq!(path, dir.path().join("Aria Vale_save.json"));

    let loaded = repo.load("Aria Vale").unwrap();
    assert_eq!(loaded, character);
}

#[test]
fn save_creates_missing_directory_and_writes_indented_json() {
    let dir = tempfile::tempdir().unwrap();
    let save_dir = dir.path().join("data").join("save_games");
    let repo = JsonFileCharacterRepository::new(&save_dir);

    let character = create_character(standard_classes(), "Test", "Warrior").unwrap();
    repo.save(&character).unwrap();

    let raw = fs::read_to_string(save_dir.join("Test_save.json")).unwrap();
    assert!(raw.starts_with("{\n  \"name\": \"Test\""), "unexpected layout: {raw}");
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    let mut character = create_character(standard_classes(), "Hero", "Rogue").unwrap();
    repo.save(&character).unwrap();
    character.gold = 7;
    repo.save(&character).unwrap();

    assert_eq!(repo.load("Hero").unwrap().gold, 7);
    assert_eq!(repo.list().unwrap(), vec!["Hero".to_string()]);
}

#[test]
fn load_missing_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    let err = repo.load("Nobody").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref name) if name == "Nobody"));
}

#[test]
fn load_non_json_returns_corrupted() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());
    fs::write(dir.path().join("Broken_save.json"), "{\"name\": \"Broken\", ").unwrap();

    let err = repo.load("Broken").unwrap_err();
    assert!(matches!(err, RepoError::Corrupted { .. }), "unexpected error: {err}");
}

#[test]
fn load_structurally_invalid_returns_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());
    fs::write(
        dir.path().join("Partial_save.json"),
        json!({"name": "Partial", "class": "Mage", "level": 1}).to_string(),
    )
    .unwrap();

    let err = repo.load("Partial").unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidData(SaveDataError::MissingField("health"))
    ));
}

#[test]
fn save_record_requires_object_with_name() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    let err = repo.save_record(&json!({"class": "Mage"})).unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidData(SaveDataError::MissingField("name"))
    ));

    let err = repo.save_record(&json!("Aria")).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(SaveDataError::NotAnObject)));
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn save_record_with_name_is_written_as_given() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    repo.save_record(&json!({"name": "Sketch", "gold": -3})).unwrap();

    assert_eq!(repo.list().unwrap(), vec!["Sketch".to_string()]);
    assert!(matches!(
        repo.load("Sketch").unwrap_err(),
        RepoError::InvalidData(SaveDataError::MissingField("class"))
    ));
}

#[test]
fn list_returns_sanitized_names_and_ignores_other_files() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    for (name, class_name) in [("Zed!", "Mage"), ("Aria", "Cleric")] {
        let character = create_character(standard_classes(), name, class_name).unwrap();
        repo.save(&character).unwrap();
    }
    fs::write(dir.path().join("notes.txt"), "not a save").unwrap();

    assert_eq!(
        repo.list().unwrap(),
        vec!["Aria".to_string(), "Zed".to_string()]
    );
}

#[test]
fn list_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path().join("never_created"));

    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn names_colliding_after_sanitization_share_a_save() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    let first = create_character(standard_classes(), "Bob!", "Warrior").unwrap();
    let second = create_character(standard_classes(), "Bob?", "Mage").unwrap();
    repo.save(&first).unwrap();
    repo.save(&second).unwrap();

    let loaded = repo.load("Bob").unwrap();
    assert_eq!(loaded.name, "Bob?");
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn delete_removes_save_and_then_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileCharacterRepository::new(dir.path());

    let character = create_character(standard_classes(), "Temp", "Rogue").unwrap();
    repo.save(&character).unwrap();

    repo.delete("Temp").unwrap();
    assert!(repo.list().unwrap().is_empty());
    assert!(matches!(
        repo.delete("Temp").unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn io_failures_keep_their_kind() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "a file where the save directory should be").unwrap();
    let repo = JsonFileCharacterRepository::new(&blocker);

    let character = create_character(standard_classes(), "Hero", "Mage").unwrap();
    let err = repo.save(&character).unwrap_err();
    assert!(matches!(err, RepoError::Io(_)), "unexpected error: {err}");
    assert!(err.io_kind().is_some());
}

#[test]
fn service_create_and_save_persists_new_character() {
    let dir = tempfile::tempdir().unwrap();
    let service = CharacterService::new(
        standard_classes(),
        JsonFileCharacterRepository::new(dir.path()),
    );

    let created = service.create_and_save("Test", "Warrior").unwrap();
    assert_eq!(service.list().unwrap(), vec!["Test".to_string()]);
    assert_eq!(service.load("Test").unwrap(), created);

    service.delete("Test").unwrap();
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn service_rejects_invalid_class_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let service = CharacterService::new(
        standard_classes(),
        JsonFileCharacterRepository::new(dir.path()),
    );

    let err = service.create_and_save("Test", "Necromancer").unwrap_err();
    assert!(matches!(
        err,
        CharacterServiceError::Character(CharacterError::InvalidClass(ref class)) if class == "Necromancer"
    ));
    assert!(service.list().unwrap().is_empty());
}
