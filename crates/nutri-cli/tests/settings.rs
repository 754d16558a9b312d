use std::fs;
use std::path::PathBuf;

use nutri_cli::settings::{Settings, load_settings, load_settings_from, save_settings};
use nutri_model::SectionId;

#[test]
fn saved_settings_load_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Settings::default();
    settings.data.path = PathBuf::from("data/taco.csv");
    settings.data.columns.group_column = "category".to_string();
    settings.display.number.thousands_separator = ".".to_string();
    settings.display.bar_width = 12;
    settings.report.default_sections = vec![SectionId::BComplex, SectionId::MacroComparison];

    save_settings(&settings, &path).expect("save settings");
    assert_eq!(load_settings(Some(&path)), settings);
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loaded = load_settings_from(&dir.path().join("absent.toml"));
    assert_eq!(loaded, Settings::default());
}

#[test]
fn malformed_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[display\nbar_width = \"wide\"").expect("write settings");
    assert_eq!(load_settings_from(&path), Settings::default());

    fs::write(&path, "[report]\ndefault_sections = [\"desserts\"]\n").expect("write settings");
    assert_eq!(load_settings_from(&path), Settings::default());
}
