//! Identifier extractor: participant ID from file name or directory path
//!
//! Four matchers run in order, first hit wins:
//! file-name regex, file-name tokens, flattened-path regex, path tokens.

use std::path::{Path, MAIN_SEPARATOR};

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{IdSource, ParticipantId, ParticipantMatch};

lazy_static! {
    /// Most specific first. Case-sensitive.
    static ref ID_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"PPG_([A-Z]{2}[0-9]{2,3})").unwrap(),
        Regex::new(r"PPG[-_\s]?([A-Z]{2}[0-9]{2,3})").unwrap(),
        Regex::new(r"\b([A-Z]{2}[0-9]{2,3})\b").unwrap(),
    ];

    static ref FILENAME_DELIMITERS: Regex = Regex::new(r"[-_\s.]+").unwrap();

    static ref PATH_DELIMITERS: Regex = Regex::new(r"[-_\s./\\]+").unwrap();

    /// Whole-token ID, tested against the uppercased token
    static ref ID_TOKEN: Regex = Regex::new(r"^[A-Z]{2}[0-9]{2,3}$").unwrap();
}

type Matcher = fn(&str, &str) -> Option<String>;

/// Fallback chain, narrowest context first
const MATCHERS: [(IdSource, Matcher); 4] = [
    (IdSource::FilenamePattern, pattern_in_filename),
    (IdSource::FilenameToken, token_in_filename),
    (IdSource::PathPattern, pattern_in_path),
    (IdSource::PathToken, token_in_path),
];

/// Participant ID extractor
#[derive(Debug, Default)]
pub struct IdentifierExtractor;

impl IdentifierExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Normalized ID, or `UNKNOWN`
    pub fn extract(&self, filename: &str, dir: &Path) -> ParticipantId {
        self.extract_with_source(filename, dir).id
    }

    /// Normalized ID plus the matcher that produced it
    pub fn extract_with_source(&self, filename: &str, dir: &Path) -> ParticipantMatch {
        let base = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.to_string());
        let dir = dir.to_string_lossy();

        for (source, matcher) in MATCHERS {
            if let Some(raw) = matcher(&base, &dir) {
                return ParticipantMatch {
                    id: ParticipantId::normalize(&raw),
                    source,
                };
            }
        }

        ParticipantMatch {
            id: ParticipantId::unknown(),
            source: IdSource::NotFound,
        }
    }
}

fn pattern_in_filename(filename: &str, _dir: &str) -> Option<String> {
    first_pattern_match(filename)
}

fn token_in_filename(filename: &str, _dir: &str) -> Option<String> {
    first_id_token(&FILENAME_DELIMITERS, filename)
}

fn pattern_in_path(_filename: &str, dir: &str) -> Option<String> {
    first_pattern_match(&dir.replace(MAIN_SEPARATOR, "_"))
}

fn token_in_path(_filename: &str, dir: &str) -> Option<String> {
    first_id_token(&PATH_DELIMITERS, dir)
}

fn first_pattern_match(text: &str) -> Option<String> {
    ID_PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_uppercase())
    })
}

fn first_id_token(delimiters: &Regex, text: &str) -> Option<String> {
    delimiters
        .split(text)
        .map(str::to_uppercase)
        .find(|token| ID_TOKEN.is_match(token))
}

// =============================================================================
// TESTS
// =============================================================================
