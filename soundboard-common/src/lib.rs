//! # Soundboard Common Library
//!
//! Shared code for the soundboard tools:
//! - Sound record types for the legacy and current layouts
//! - Source classification of legacy `path` strings
//! - Soundboard file reading and atomic writing (TOML or JSON)
//! - Comment-preserving TOML to TOML conversion

pub mod classify;
pub mod error;
pub mod sound;
pub mod soundboard;

pub use classify::{classify_path, convert_sound, convert_sounds, extract_video_id, ConversionReport};
pub use error::{Error, Result};
pub use sound::{HeaderConfig, LegacySound, Sound, Source, SourceKind};
pub use soundboard::{LegacySoundboard, Soundboard, SoundboardFormat};
