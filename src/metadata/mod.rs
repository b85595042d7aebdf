//! Album metadata: the title/subtitle pair printed on the poster.
//!
//! Titles come from one of two places: a manual shuffle over a fixed list
//! of curated inspirations, or an async request to the Gemini endpoint in
//! gemini.rs. Provider failures are folded into a deterministic fallback at
//! the call site - nothing in this module is ever fatal to the session.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod gemini;

/// Subtitle used whenever the provider fails
const FALLBACK_SUBTITLE: &str = "The Echoes of Time - A Twelve Month Collection";

/// Curated title/subtitle pairs for the manual shuffle
pub const ALBUM_INSPIRATIONS: [(&str, &str); 15] = [
    ("NEON ECHOES", "RESONATING THROUGH THE URBAN NIGHT"),
    ("AMBER MOMENTS", "STILL FRAMES OF A GOLDEN ERA"),
    ("CINEMATIC DRIFT", "A JOURNEY THROUGH UNWRITTEN SCENES"),
    ("SILENT RESONANCE", "THE SOUND OF UNSPOKEN WORDS"),
    ("PRIVATE GALAXY", "EXPLORING THE INNER COSMOS"),
    ("MIDNIGHT MONOLOGUE", "WHISPERS TO THE MOON"),
    ("FLOATING FRAMES", "SUSPENDED IN THE RIVER OF TIME"),
    ("A MOVEABLE FEAST", "MEMORIES THAT TRAVEL WITH US"),
    ("THE LAST CHAPTER", "WHERE EVERY ENDING IS A PRELUDE"),
    ("BLUE SOUL ARCHIVE", "DEEP DIVES INTO MELANCHOLY"),
    ("VELVET SOLITUDE", "THE SOFT TEXTURE OF LONELY DAYS"),
    ("URBAN ARTIFACTS", "COLLECTING PIECES OF THE STREET"),
    ("ETHEREAL GLOW", "FINDING LIGHT IN THE FADING DUSK"),
    ("VINTAGE REVERIE", "DREAMING IN ANALOG GRADIENTS"),
    ("ORGANIC RHYTHM", "PULSING WITH THE HEART OF NATURE"),
];

/// The poster's header and player-bar text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub title: String,
    pub subtitle: String,
}

impl AlbumInfo {
    /// Deterministic value used when the title request fails
    pub fn fallback(user_name: &str) -> Self {
        Self {
            title: format!("{}'s Year in Echoes", user_name),
            subtitle: String::from(FALLBACK_SUBTITLE),
        }
    }
}

impl Default for AlbumInfo {
    /// The album every session opens with
    fn default() -> Self {
        Self {
            title: String::from("VINTAGE REVERIE"),
            subtitle: String::from("A COLLECTION OF MOMENTS"),
        }
    }
}

/// Pick one curated inspiration uniformly at random
pub fn shuffle_inspiration() -> AlbumInfo {
    let (title, subtitle) =
        ALBUM_INSPIRATIONS[rand::thread_rng().gen_range(0..ALBUM_INSPIRATIONS.len())];
    AlbumInfo {
        title: String::from(title),
        subtitle: String::from(subtitle),
    }
}

/// One inline image payload for the title request
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime: &'static str,
    /// Base64 of the original file bytes, no data-URL prefix
    pub data: String,
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Gemini API error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub type MetadataResult<T> = Result<T, MetadataError>;
