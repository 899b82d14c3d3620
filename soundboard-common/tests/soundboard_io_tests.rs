//! Integration tests for soundboard file reading, conversion and writing
//!
//! Covers:
//! - TOML and JSON legacy input
//! - Preservation of top-level and per-sound extra keys
//! - Pass-through of already migrated sounds
//! - Atomic write (no temp file left behind, target untouched on failure)

use soundboard_common::soundboard::{read_legacy_soundboard, write_soundboard};
use soundboard_common::{HeaderConfig, Soundboard, Source};
use std::fs;
use tempfile::TempDir;

const LEGACY_TOML: &str = r#"
name = "memes"
hotkey = "CTRL-ALT-M"
position = 2

[[sound]]
name = "greeting"
path = "<speak>Hello</speak>"
tts_language = "en-US"
tts_options = { speed = 1.2 }
hotkey = "CTRL-1"

[[sound]]
name = "rick"
path = "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
start = 1.5
end = 4.0

[[sound]]
name = "airhorn"
path = "https://www.myinstants.com/media/sounds/airhorn.mp3"
header = [
    { name = "referer", value = "https://www.myinstants.com" },
    { name = "user-agent", value = "soundboard" },
]

[[sound]]
name = "local"
path = "sounds/clip1.mp3"
"#;

fn write_fixture(dir: &TempDir, file_name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(file_name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_toml_to_toml_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(&temp_dir, "memes.toml", LEGACY_TOML);
    let output = temp_dir.path().join("memes_new.toml");

    let (soundboard, report) = read_legacy_soundboard(&input).unwrap().convert().unwrap();
    write_soundboard(&output, &soundboard).unwrap();

    assert_eq!(report.total(), 4);
    assert!(!temp_dir.path().join("memes_new.toml.tmp").exists());

    let parsed: Soundboard = toml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let sounds = parsed.sounds.unwrap();
    let sources: Vec<Source> = sounds.iter().map(|s| s.source.clone()).collect();

    assert_eq!(
        sources,
        vec![
            Source::TextToSpeech {
                ssml: "<speak>Hello</speak>".to_string(),
                lang: "en-US".to_string(),
            },
            Source::VideoReference {
                id: "dQw4w9WgXcQ".to_string(),
            },
            Source::HttpSource {
                url: "https://www.myinstants.com/media/sounds/airhorn.mp3".to_string(),
                headers: Some(vec![
                    HeaderConfig::new("referer", "https://www.myinstants.com"),
                    HeaderConfig::new("user-agent", "soundboard"),
                ]),
            },
            Source::LocalFile {
                path: "sounds/clip1.mp3".to_string(),
            },
        ]
    );
}

#[test]
fn test_extra_keys_survive_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(&temp_dir, "memes.toml", LEGACY_TOML);
    let output = temp_dir.path().join("memes.json");

    let (soundboard, _) = read_legacy_soundboard(&input).unwrap().convert().unwrap();
    write_soundboard(&output, &soundboard).unwrap();

    let parsed: Soundboard = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();

    let top_keys: Vec<&str> = parsed.extra.keys().map(|k| k.as_str()).collect();
    assert_eq!(top_keys, vec!["name", "hotkey", "position"]);

    let sounds = parsed.sounds.unwrap();
    assert_eq!(
        sounds[0].extra.get("hotkey").and_then(|v| v.as_str()),
        Some("CTRL-1")
    );
    let rick_keys: Vec<&str> = sounds[1].extra.keys().map(|k| k.as_str()).collect();
    assert_eq!(rick_keys, vec!["start", "end"]);
    assert!(sounds[0].extra.get("tts_options").is_none());
}

#[test]
fn test_json_input_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(
        &temp_dir,
        "board.json",
        r#"{
            "name": "json board",
            "sound": [
                { "name": "a", "path": "https://youtu.be/abc123" },
                { "name": "b", "path": "<speak>b</speak>", "ttsLanguage": "fr-FR" }
            ]
        }"#,
    );

    let (soundboard, report) = read_legacy_soundboard(&input).unwrap().convert().unwrap();

    assert_eq!(report.video, 1);
    assert_eq!(report.tts, 1);
    let sounds = soundboard.sounds.unwrap();
    assert_eq!(
        sounds[1].source,
        Source::TextToSpeech {
            ssml: "<speak>b</speak>".to_string(),
            lang: "fr-FR".to_string(),
        }
    );
}

#[test]
fn test_converted_output_converts_again_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(&temp_dir, "memes.toml", LEGACY_TOML);
    let first = temp_dir.path().join("first.toml");
    let second = temp_dir.path().join("second.toml");

    let (soundboard, _) = read_legacy_soundboard(&input).unwrap().convert().unwrap();
    write_soundboard(&first, &soundboard).unwrap();

    let (again, report) = read_legacy_soundboard(&first).unwrap().convert().unwrap();
    write_soundboard(&second, &again).unwrap();

    assert_eq!(report.passed_through, 4);
    assert_eq!(again, soundboard);
}

#[test]
fn test_unsupported_output_extension_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("board.yaml");

    let result = write_soundboard(&output, &Soundboard::default());

    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.toml");

    let err = read_legacy_soundboard(&missing).unwrap_err();
    assert!(matches!(err, soundboard_common::Error::Io(_)));
}

#[test]
fn test_overwrites_existing_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_fixture(&temp_dir, "memes.toml", LEGACY_TOML);
    let output = write_fixture(&temp_dir, "out.json", "stale");

    let (soundboard, _) = read_legacy_soundboard(&input).unwrap().convert().unwrap();
    write_soundboard(&output, &soundboard).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with('{'));
    assert!(content.contains("\"youtube\""));
}
