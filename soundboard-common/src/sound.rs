//! Sound record types for the legacy and current soundboard layouts
//!
//! A legacy sound overloads a single `path` string for every kind of audio
//! source. The current layout replaces it with a typed [`Source`].

use serde::{Deserialize, Serialize};

/// HTTP header sent when fetching an [`Source::HttpSource`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct HeaderConfig {
    pub name: String,
    pub value: String,
}

impl HeaderConfig {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Sound entry as written by older releases
///
/// Keys not named here (hotkey, start, end, ...) land in `extra` and are
/// carried over to the converted [`Sound`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacySound {
    pub name: String,

    /// Markup, video link, HTTP(S) URL or local file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Only meaningful for HTTP(S) paths
    #[serde(default, alias = "headers", skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<HeaderConfig>>,

    /// Only meaningful for markup paths
    #[serde(default, alias = "ttsLanguage", skip_serializing_if = "Option::is_none")]
    pub tts_language: Option<String>,

    /// Opaque, dropped during conversion
    #[serde(default, alias = "ttsOptions", skip_serializing_if = "Option::is_none")]
    pub tts_options: Option<toml::Value>,

    /// Present when the entry was already migrated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,

    #[serde(flatten)]
    pub extra: toml::Table,
}

impl LegacySound {
    /// Create a legacy sound with only a name and a path
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: Some(path.to_string()),
            header: None,
            tts_language: None,
            tts_options: None,
            source: None,
            extra: toml::Table::new(),
        }
    }

    pub fn with_headers(mut self, headers: Vec<HeaderConfig>) -> Self {
        self.header = Some(headers);
        self
    }

    pub fn with_tts_language(mut self, lang: &str) -> Self {
        self.tts_language = Some(lang.to_string());
        self
    }
}

/// Sound entry in the current layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sound {
    pub name: String,
    pub source: Source,

    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Where a sound's audio comes from
///
/// Serialized externally tagged, e.g. `source = { local = { path = "a.mp3" } }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Source {
    /// Speech synthesized from SSML markup
    #[serde(rename = "tts")]
    TextToSpeech { ssml: String, lang: String },

    /// Clip hosted on YouTube
    #[serde(rename = "youtube")]
    VideoReference { id: String },

    /// Remote file fetched over HTTP(S)
    #[serde(rename = "http")]
    HttpSource {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<Vec<HeaderConfig>>,
    },

    /// File relative to the soundboard's sound directory, or absolute
    #[serde(rename = "local")]
    LocalFile { path: String },

    /// Spotify track; never produced from a legacy path, only passed through
    #[serde(rename = "spotify")]
    Spotify { id: String },
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::TextToSpeech { .. } => SourceKind::TextToSpeech,
            Source::VideoReference { .. } => SourceKind::VideoReference,
            Source::HttpSource { .. } => SourceKind::HttpSource,
            Source::LocalFile { .. } => SourceKind::LocalFile,
            Source::Spotify { .. } => SourceKind::Spotify,
        }
    }
}

/// Discriminant of [`Source`], used for logging and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    TextToSpeech,
    VideoReference,
    HttpSource,
    LocalFile,
    Spotify,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::TextToSpeech => write!(f, "tts"),
            SourceKind::VideoReference => write!(f, "youtube"),
            SourceKind::HttpSource => write!(f, "http"),
            SourceKind::LocalFile => write!(f, "local"),
            SourceKind::Spotify => write!(f, "spotify"),
        }
    }
}
