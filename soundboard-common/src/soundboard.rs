//! Soundboard documents and file I/O
//!
//! A soundboard file holds the sound list under the `sound` key plus
//! top-level settings (name, hotkey, position, ...). Top-level keys other
//! than `sound` are kept verbatim so a conversion only touches the sounds.
//! TOML to TOML conversion edits the document in place and keeps comments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use toml_edit::{Array, DocumentMut, InlineTable, Item, TableLike, Value};
use tracing::{debug, info};

use crate::classify::{convert_sounds, ConversionReport};
use crate::sound::{LegacySound, Sound, Source};
use crate::{Error, Result};

/// On-disk encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundboardFormat {
    Toml,
    Json,
}

impl SoundboardFormat {
    /// Resolve the format from `path`'s extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(SoundboardFormat::Toml),
            "json" => Ok(SoundboardFormat::Json),
            _ => Err(Error::UnsupportedFormat(format!(
                "{} (expected .toml or .json)",
                path.display()
            ))),
        }
    }
}

impl std::fmt::Display for SoundboardFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoundboardFormat::Toml => write!(f, "toml"),
            SoundboardFormat::Json => write!(f, "json"),
        }
    }
}

/// Soundboard in the legacy layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LegacySoundboard {
    #[serde(rename = "sound", default, skip_serializing_if = "Option::is_none")]
    pub sounds: Option<Vec<LegacySound>>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Soundboard in the current layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Soundboard {
    #[serde(rename = "sound", default, skip_serializing_if = "Option::is_none")]
    pub sounds: Option<Vec<Sound>>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

impl LegacySoundboard {
    /// Rewrite every sound into the current layout
    ///
    /// Fails on the first sound that cannot be converted; see
    /// [`convert_sounds`].
    pub fn convert(self) -> Result<(Soundboard, ConversionReport)> {
        let (sounds, report) = match self.sounds {
            Some(sounds) => {
                let (sounds, report) = convert_sounds(sounds)?;
                (Some(sounds), report)
            }
            None => (None, ConversionReport::default()),
        };

        Ok((
            Soundboard {
                sounds,
                extra: self.extra,
            },
            report,
        ))
    }
}

/// Parse a legacy soundboard from a string in the given format
pub fn parse_legacy_soundboard(content: &str, format: SoundboardFormat) -> Result<LegacySoundboard> {
    let soundboard = match format {
        SoundboardFormat::Toml => toml::from_str(content)?,
        SoundboardFormat::Json => serde_json::from_str(content)?,
    };
    Ok(soundboard)
}

/// Render a soundboard in the given format
///
/// JSON output is pretty-printed. JSON has no datetime type, so TOML
/// datetimes in extra keys are written as their TOML string form.
pub fn render_soundboard(soundboard: &Soundboard, format: SoundboardFormat) -> Result<String> {
    let rendered = match format {
        SoundboardFormat::Toml => toml::to_string_pretty(soundboard)?,
        SoundboardFormat::Json => {
            let mut soundboard = soundboard.clone();
            stringify_datetimes(&mut soundboard.extra);
            for sound in soundboard.sounds.iter_mut().flatten() {
                stringify_datetimes(&mut sound.extra);
            }
            serde_json::to_string_pretty(&soundboard)?
        }
    };
    Ok(rendered)
}

fn stringify_datetimes(table: &mut toml::Table) {
    for (_, value) in table.iter_mut() {
        stringify_datetime(value);
    }
}

fn stringify_datetime(value: &mut toml::Value) {
    match value {
        toml::Value::Datetime(datetime) => *value = toml::Value::String(datetime.to_string()),
        toml::Value::Array(items) => items.iter_mut().for_each(stringify_datetime),
        toml::Value::Table(table) => stringify_datetimes(table),
        _ => {}
    }
}

/// Keys of the legacy layout that never survive a conversion
const LEGACY_KEYS: [&str; 7] = [
    "path",
    "header",
    "headers",
    "tts_language",
    "ttsLanguage",
    "tts_options",
    "ttsOptions",
];

/// Convert a TOML soundboard by editing the document in place
///
/// Comments, key order and formatting of everything outside the legacy keys
/// are kept. Each converted sound gets an inline `source = { kind = { .. } }`
/// table; already migrated sounds are left as written.
pub fn convert_toml_document(content: &str) -> Result<(String, ConversionReport)> {
    let (soundboard, report) = parse_legacy_soundboard(content, SoundboardFormat::Toml)?.convert()?;
    let mut document: DocumentMut = content.parse()?;

    if let (Some(sounds), Some(item)) = (&soundboard.sounds, document.get_mut("sound")) {
        let tables = sound_tables(item);
        if tables.len() != sounds.len() {
            return Err(Error::Layout(format!(
                "expected {} sound tables, found {}",
                sounds.len(),
                tables.len()
            )));
        }

        for (table, sound) in tables.into_iter().zip(sounds) {
            let had_path = table.contains_key("path");
            for key in LEGACY_KEYS {
                table.remove(key);
            }
            if had_path {
                table.insert("source", Item::Value(source_value(&sound.source)));
            }
        }
    }

    Ok((document.to_string(), report))
}

/// Sound entries of a `sound` item, as `[[sound]]` tables or an inline array
fn sound_tables(item: &mut Item) -> Vec<&mut dyn TableLike> {
    match item {
        Item::ArrayOfTables(tables) => tables
            .iter_mut()
            .map(|table| table as &mut dyn TableLike)
            .collect(),
        Item::Value(Value::Array(array)) => array
            .iter_mut()
            .filter_map(Value::as_inline_table_mut)
            .map(|table| table as &mut dyn TableLike)
            .collect(),
        _ => Vec::new(),
    }
}

/// Inline-table form of a source, e.g. `{ local = { path = "a.mp3" } }`
fn source_value(source: &Source) -> Value {
    let mut fields = InlineTable::new();
    match source {
        Source::TextToSpeech { ssml, lang } => {
            fields.insert("ssml", Value::from(ssml.as_str()));
            fields.insert("lang", Value::from(lang.as_str()));
        }
        Source::VideoReference { id } | Source::Spotify { id } => {
            fields.insert("id", Value::from(id.as_str()));
        }
        Source::HttpSource { url, headers } => {
            fields.insert("url", Value::from(url.as_str()));
            if let Some(headers) = headers {
                let mut array = Array::new();
                for header in headers {
                    let mut entry = InlineTable::new();
                    entry.insert("name", Value::from(header.name.as_str()));
                    entry.insert("value", Value::from(header.value.as_str()));
                    array.push(entry);
                }
                fields.insert("headers", Value::from(array));
            }
        }
        Source::LocalFile { path } => {
            fields.insert("path", Value::from(path.as_str()));
        }
    }

    let mut source_table = InlineTable::new();
    source_table.insert(source.kind().to_string(), Value::from(fields));
    Value::from(source_table)
}

/// Convert soundboard text from one format to another
///
/// TOML to TOML goes through [`convert_toml_document`] so the file keeps its
/// comments; every other pairing is parsed, converted and rendered.
pub fn convert_content(
    content: &str,
    from: SoundboardFormat,
    to: SoundboardFormat,
) -> Result<(String, ConversionReport)> {
    if from == SoundboardFormat::Toml && to == SoundboardFormat::Toml {
        return convert_toml_document(content);
    }
    let (soundboard, report) = parse_legacy_soundboard(content, from)?.convert()?;
    Ok((render_soundboard(&soundboard, to)?, report))
}

/// Read and parse a legacy soundboard file
///
/// The format is resolved from the extension before the file is opened.
pub fn read_legacy_soundboard(path: &Path) -> Result<LegacySoundboard> {
    let format = SoundboardFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let soundboard = parse_legacy_soundboard(&content, format)?;

    debug!(
        "Loaded {} soundboard {} ({} sounds)",
        format,
        path.display(),
        soundboard.sounds.as_ref().map_or(0, |s| s.len())
    );
    Ok(soundboard)
}

/// Render and atomically write a soundboard in the format of `path`
pub fn write_soundboard(path: &Path, soundboard: &Soundboard) -> Result<()> {
    let format = SoundboardFormat::from_path(path)?;
    let rendered = render_soundboard(soundboard, format)?;
    write_atomic(path, &rendered)?;

    info!("Saved {} soundboard at {}", format, path.display());
    Ok(())
}

/// Write `content` to `path` atomically
///
/// Writes `<path>.tmp` and renames it over `path`. On failure the target is
/// left untouched and the temporary file is removed.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);
    if let Err(e) = write_and_sync(&temp_path, content.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
