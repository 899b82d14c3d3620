//! Legacy path classification
//!
//! Rewrites the overloaded legacy `path` string of each sound into a typed
//! [`Source`]. Classification runs an ordered rule chain and the first rule
//! whose predicate matches builds the source:
//!
//! 1. path contains `<speak>` → [`Source::TextToSpeech`]
//! 2. path mentions a YouTube host → [`Source::VideoReference`]
//! 3. path starts with `http` → [`Source::HttpSource`]
//! 4. anything else → [`Source::LocalFile`]
//!
//! Order decides precedence: an HTTP URL carrying `<speak>` in its query is
//! still text-to-speech.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::sound::{LegacySound, Sound, Source, SourceKind};
use crate::{Error, Result};

/// Opening tag that marks SSML markup
const SSML_MARKER: &str = "<speak>";

/// Host names that mark a YouTube link
const VIDEO_HOST_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Captures the video id from youtu.be, youtube.com, watch?v=, embed/ and bare /id links
static VIDEO_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?youtu\.?be(?:\.com)?/?.*(?:watch|embed)?(?:.*v=|v/|/)([\w\-_]+)&?")
        .expect("video id pattern is valid")
});

struct Rule {
    kind: SourceKind,
    matches: fn(&str) -> bool,
    build: fn(&str, &LegacySound) -> Result<Source>,
}

/// Evaluated top to bottom, first match wins. The last rule always matches.
static RULES: [Rule; 4] = [
    Rule {
        kind: SourceKind::TextToSpeech,
        matches: is_ssml,
        build: build_tts,
    },
    Rule {
        kind: SourceKind::VideoReference,
        matches: is_video_link,
        build: build_video,
    },
    Rule {
        kind: SourceKind::HttpSource,
        matches: is_http,
        build: build_http,
    },
    Rule {
        kind: SourceKind::LocalFile,
        matches: is_anything,
        build: build_local,
    },
];

fn is_ssml(path: &str) -> bool {
    path.contains(SSML_MARKER)
}

fn is_video_link(path: &str) -> bool {
    VIDEO_HOST_MARKERS.iter().any(|host| path.contains(host))
}

fn is_http(path: &str) -> bool {
    path.starts_with("http")
}

fn is_anything(_path: &str) -> bool {
    true
}

fn build_tts(path: &str, sound: &LegacySound) -> Result<Source> {
    let lang = match &sound.tts_language {
        Some(lang) => lang.clone(),
        None => {
            warn!("Sound {:?} has SSML but no tts_language, using empty lang", sound.name);
            String::new()
        }
    };
    Ok(Source::TextToSpeech {
        ssml: path.to_string(),
        lang,
    })
}

fn build_video(path: &str, _sound: &LegacySound) -> Result<Source> {
    let id = extract_video_id(path)?;
    Ok(Source::VideoReference { id })
}

fn build_http(path: &str, sound: &LegacySound) -> Result<Source> {
    Ok(Source::HttpSource {
        url: path.to_string(),
        headers: sound.header.clone(),
    })
}

fn build_local(path: &str, _sound: &LegacySound) -> Result<Source> {
    Ok(Source::LocalFile {
        path: path.to_string(),
    })
}

/// Extract the video id from a YouTube link
///
/// The pattern is anchored at the start of `url`. A link that names a
/// YouTube host but yields no id is an error.
pub fn extract_video_id(url: &str) -> Result<String> {
    VIDEO_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| Error::VideoIdNotFound(url.to_string()))
}

/// Classify a legacy path into a [`Source`]
///
/// Pure: performs no I/O. `sound` supplies the side fields (headers, language)
/// that some variants carry.
pub fn classify_path(path: &str, sound: &LegacySound) -> Result<Source> {
    // The final rule matches everything, so the chain is total.
    let rule = RULES
        .iter()
        .find(|rule| (rule.matches)(path))
        .unwrap_or(&RULES[RULES.len() - 1]);
    let source = (rule.build)(path, sound)?;
    debug_assert_eq!(source.kind(), rule.kind);
    Ok(source)
}

/// Convert one legacy sound into the current layout
///
/// A sound without `path` but with `source` is already migrated and passes
/// through unchanged. Legacy-only fields are dropped.
pub fn convert_sound(sound: LegacySound) -> Result<Sound> {
    let source = match (&sound.path, &sound.source) {
        (Some(path), _) => classify_path(path, &sound)?,
        (None, Some(source)) => source.clone(),
        (None, None) => return Err(Error::MissingPath),
    };
    Ok(Sound {
        name: sound.name,
        source,
        extra: sound.extra,
    })
}

/// Per-variant tally of a batch conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub tts: usize,
    pub video: usize,
    pub http: usize,
    pub local: usize,
    /// Sounds that already carried a `source`, Spotify ones included
    pub passed_through: usize,
}

impl ConversionReport {
    /// Total number of sounds written
    pub fn total(&self) -> usize {
        self.tts + self.video + self.http + self.local + self.passed_through
    }

    fn record(&mut self, kind: SourceKind) {
        match kind {
            SourceKind::TextToSpeech => self.tts += 1,
            SourceKind::VideoReference => self.video += 1,
            SourceKind::HttpSource => self.http += 1,
            SourceKind::LocalFile => self.local += 1,
            // Only already-migrated sounds carry Spotify sources
            SourceKind::Spotify => self.passed_through += 1,
        }
    }
}

impl std::fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} sounds ({} tts, {} youtube, {} http, {} local, {} already migrated)",
            self.total(),
            self.tts,
            self.video,
            self.http,
            self.local,
            self.passed_through
        )
    }
}

/// Convert a batch of legacy sounds, preserving order and count
///
/// Fails fast: the first sound that cannot be converted aborts the batch and
/// the error names its index and name.
pub fn convert_sounds(sounds: Vec<LegacySound>) -> Result<(Vec<Sound>, ConversionReport)> {
    let mut report = ConversionReport::default();
    let mut converted = Vec::with_capacity(sounds.len());

    for (index, sound) in sounds.into_iter().enumerate() {
        let migrated = sound.path.is_none();
        let name = sound.name.clone();
        let sound = convert_sound(sound).map_err(|e| Error::Record {
            index,
            name: name.clone(),
            cause: Box::new(e),
        })?;

        if migrated {
            debug!("Sound #{} {:?} already migrated", index, name);
            report.passed_through += 1;
        } else {
            debug!("Sound #{} {:?} -> {}", index, name, sound.source.kind());
            report.record(sound.source.kind());
        }
        converted.push(sound);
    }

    Ok((converted, report))
}
