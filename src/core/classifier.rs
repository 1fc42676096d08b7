//! Condition classifier: (Valence, Veracity) from file name and path
//!
//! Resolution order:
//! 1. PL/PT/NL/NT short code in the file name (both axes at once)
//! 2. the same short code in the directory path
//! 3. keyword scan over file name, joined ancestors, then each ancestor
//!
//! Each axis freezes on its first keyword hit. A keyword in an unrelated
//! context (a folder named after someone called "Real") will still tag the
//! axis; the scan order is the only disambiguation.

use std::path::{Path, MAIN_SEPARATOR};

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{Classification, ClassificationSource, Valence, Veracity};
use crate::MAX_ANCESTOR_LEVELS;

lazy_static! {
    /// Two-letter code not glued to other letters
    static ref SHORT_CODE: Regex =
        Regex::new(r"(?i)(?:^|[^A-Za-z])(P[LT]|N[LT])(?:[^A-Za-z]|$)").unwrap();

    static ref VALENCE_RULES: Vec<(Valence, Vec<Regex>)> = vec![
        (Valence::Positive, compile(&[
            r"\bpos(itive)?s?\b",
            r"\bpositivo?s?\b",
            r"\bplus\b",
            r"\b\+ve\b",
        ])),
        (Valence::Negative, compile(&[
            r"\bneg(ative)?s?\b",
            r"\bnegativo?s?\b",
            r"\bminus\b",
            r"\b-ve\b",
        ])),
    ];

    static ref VERACITY_RULES: Vec<(Veracity, Vec<Regex>)> = vec![
        (Veracity::Truth, compile(&[
            r"\btruth(s)?\b",
            r"\bverdade(s)?\b",
            r"\bvdd\b",
            r"\btrue\b",
            r"(?:^|\W)t(?:\W|$)",
            r"\btruthful(ness)?\b",
            r"\bhonest(y)?\b",
            r"\breal\b",
        ])),
        (Veracity::Lie, compile(&[
            r"\blie(s)?\b",
            r"\bmentira(s)?\b",
            r"\bmt\b",
            r"\bfalse\b",
            r"(?:^|\W)f(?:\W|$)",
            r"\blying\b",
            r"\bdecept(ion|ive)\b",
            r"\bfake\b",
        ])),
    ];
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
        .collect()
}

/// Condition classifier. Pure: same inputs, same output.
#[derive(Debug, Default)]
pub struct ConditionClassifier;

impl ConditionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a file from its directory and (optional) file name.
    pub fn classify(&self, dir: &Path, filename: Option<&str>) -> Classification {
        let filename = filename.filter(|f| !f.is_empty());

        if let Some(name) = filename {
            if let Some((valence, veracity, code)) = short_code(name) {
                return Classification {
                    valence,
                    veracity,
                    matched: Some(format!("{name} [{code}]")),
                    source: ClassificationSource::FilenameShortCode,
                };
            }
        }

        let flat_path = dir.to_string_lossy().replace(MAIN_SEPARATOR, " ");
        if let Some((valence, veracity, code)) = short_code(&flat_path) {
            return Classification {
                valence,
                veracity,
                matched: Some(format!("path [{code}]")),
                source: ClassificationSource::PathShortCode,
            };
        }

        self.keyword_scan(dir, filename)
    }

    fn keyword_scan(&self, dir: &Path, filename: Option<&str>) -> Classification {
        let parts = ancestor_names(dir);

        let mut candidates: Vec<String> = Vec::with_capacity(parts.len() + 2);
        if let Some(name) = filename {
            candidates.push(name.to_string());
        }
        candidates.push(parts.join(" "));
        candidates.extend(parts);

        let mut valence = None;
        let mut veracity = None;
        let mut matched: Option<String> = None;

        for candidate in &candidates {
            let text = split_words(candidate).to_lowercase();

            if valence.is_none() {
                if let Some(v) = first_rule(&VALENCE_RULES, &text) {
                    valence = Some(v);
                    matched = Some(candidate.clone());
                }
            }

            if veracity.is_none() {
                if let Some(v) = first_rule(&VERACITY_RULES, &text) {
                    veracity = Some(v);
                    if matched.is_none() {
                        matched = Some(candidate.clone());
                    }
                }
            }

            if valence.is_some() && veracity.is_some() {
                break;
            }
        }

        let source = if valence.is_some() || veracity.is_some() {
            ClassificationSource::Keyword
        } else {
            ClassificationSource::Unresolved
        };

        Classification {
            valence: valence.unwrap_or(Valence::Unknown),
            veracity: veracity.unwrap_or(Veracity::Unknown),
            matched,
            source,
        }
    }
}

/// First short code in `text`, mapped to both axes
fn short_code(text: &str) -> Option<(Valence, Veracity, String)> {
    let code = SHORT_CODE.captures(text)?.get(1)?.as_str().to_uppercase();
    let (valence, veracity) = match code.as_str() {
        "PL" => (Valence::Positive, Veracity::Lie),
        "PT" => (Valence::Positive, Veracity::Truth),
        "NL" => (Valence::Negative, Veracity::Lie),
        "NT" => (Valence::Negative, Veracity::Truth),
        _ => return None,
    };
    Some((valence, veracity, code))
}

fn first_rule<T: Copy>(rules: &[(T, Vec<Regex>)], text: &str) -> Option<T> {
    rules
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(text)))
        .map(|(value, _)| *value)
}

/// Basenames of `dir` and its ancestors, nearest first
fn ancestor_names(dir: &Path) -> Vec<String> {
    dir.ancestors()
        .take(MAX_ANCESTOR_LEVELS)
        .filter_map(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

/// `PPG_WM13_PositiveLie` → `PPG WM13 Positive Lie`
///
/// A hump only splits when the new segment is a word (`Lie`), never a lone
/// capital or an acronym tail (`SessionF`, `exportMT` stay glued).
fn split_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            out.push(' ');
        } else {
            let starts_word = chars.peek().is_some_and(|next| next.is_lowercase());
            if c.is_uppercase() && starts_word && prev.is_some_and(char::is_lowercase) {
                out.push(' ');
            }
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn classify(dir: &str, filename: Option<&str>) -> Classification {
        ConditionClassifier::new().classify(&PathBuf::from(dir), filename)
    }

    #[test]
    fn test_camel_case_filename() {
        let c = classify("/data/raw", Some("PPG_WM13_PositiveLie.csv"));
        assert_eq!(c.valence, Valence::Positive);
        assert_eq!(c.veracity, Veracity::Lie);
        assert_eq!(c.source, ClassificationSource::Keyword);
        assert_eq!(c.matched.as_deref(), Some("PPG_WM13_PositiveLie.csv"));
    }

    #[test]
    fn test_short_code_in_filename() {
        let c = classify("/data/raw", Some("WM013_pl.csv"));
        assert_eq!((c.valence, c.veracity), (Valence::Positive, Veracity::Lie));
        assert_eq!(c.matched.as_deref(), Some("WM013_pl.csv [PL]"));
        assert_eq!(c.source, ClassificationSource::FilenameShortCode);
    }

    #[test]
    fn test_short_code_in_path_ignores_filename_keywords() {
        let c = classify("/study/NT_session1", Some("positive_lie_WM013.csv"));
        assert_eq!((c.valence, c.veracity), (Valence::Negative, Veracity::Truth));
        assert_eq!(c.matched.as_deref(), Some("path [NT]"));
        assert_eq!(c.source, ClassificationSource::PathShortCode);
    }

    #[test]
    fn test_short_code_must_not_touch_letters() {
        // "SPLIT" contains PL but glued to letters
        let c = classify("/data", Some("SPLIT_export.csv"));
        assert_eq!(c.source, ClassificationSource::Unresolved);
        assert_eq!(c.matched, None);
    }

    #[test]
    fn test_short_code_between_digits() {
        let c = classify("/data", Some("01PT02.csv"));
        assert_eq!((c.valence, c.veracity), (Valence::Positive, Veracity::Truth));
    }

    #[test]
    fn test_axes_resolve_at_different_candidates() {
        // Veracity from the file name, valence from the parent folder
        let c = classify("/study/Negativo", Some("WM013 mentira.csv"));
        assert_eq!(c.valence, Valence::Negative);
        assert_eq!(c.veracity, Veracity::Lie);
        // Valence overwrites the matched component
        assert_eq!(c.matched.as_deref(), Some("Negativo study"));
    }

    #[test]
    fn test_first_hit_freezes_axis() {
        // File name says truth; the folder's "lie" must not replace it
        let c = classify("/study/lie", Some("honest pos.csv"));
        assert_eq!(c.veracity, Veracity::Truth);
        assert_eq!(c.valence, Valence::Positive);
    }

    #[test]
    fn test_positive_checked_before_negative() {
        let c = classify("/x", Some("pos neg truth.csv"));
        assert_eq!(c.valence, Valence::Positive);
    }

    #[test]
    fn test_lone_letters() {
        let c = classify("/x", Some("neg T.csv"));
        assert_eq!(c.veracity, Veracity::Truth);
        let c = classify("/x", Some("neg F.csv"));
        assert_eq!(c.veracity, Veracity::Lie);
    }

    #[test]
    fn test_portuguese_and_abbreviations() {
        let c = classify("/x/positivos/vdd", None);
        assert_eq!((c.valence, c.veracity), (Valence::Positive, Veracity::Truth));
    }

    #[test]
    fn test_unresolved_defaults_to_unknown() {
        let c = classify("/study/session", Some("recording.csv"));
        assert_eq!(c.valence, Valence::Unknown);
        assert_eq!(c.veracity, Veracity::Unknown);
        assert_eq!(c.source, ClassificationSource::Unresolved);
    }

    #[test]
    fn test_partial_resolution_keeps_other_axis_unknown() {
        let c = classify("/study/session", Some("deceptive.csv"));
        assert_eq!(c.valence, Valence::Unknown);
        assert_eq!(c.veracity, Veracity::Lie);
        assert_eq!(c.source, ClassificationSource::Keyword);
    }

    #[test]
    fn test_ancestor_depth_is_limited() {
        // "positive" sits six levels above the file
        let c = classify("/positive/a/b/c/d/e", Some("truth.csv"));
        assert_eq!(c.valence, Valence::Unknown);
        let c = classify("/positive/b/c/d/e", Some("truth.csv"));
        assert_eq!(c.valence, Valence::Positive);
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("PPG_WM13_PositiveLie"), "PPG WM13 Positive Lie");
        assert_eq!(split_words("NEGATIVE"), "NEGATIVE");
        assert_eq!(split_words("AB001_SessionF"), "AB001 SessionF");
        assert_eq!(split_words("exportMT"), "exportMT");
    }

    #[test]
    fn test_ancestor_names() {
        let names = ancestor_names(&PathBuf::from("/a/b/c"));
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_trailing_capitals_are_not_keywords() {
        let c = classify("/data/raw", Some("AB001_SessionF.csv"));
        assert_eq!((c.valence, c.veracity), (Valence::Unknown, Veracity::Unknown));
        assert_eq!(c.source, ClassificationSource::Unresolved);

        let c = classify("/data/raw", Some("AB001_exportMT.csv"));
        assert_eq!(c.veracity, Veracity::Unknown);
    }
}
