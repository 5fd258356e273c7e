//! Intent detection
//!
//! Keyword classifier over free text producing a playful/neutral/solemn
//! signal. Any solemn match is a hard veto: the level is Solemn regardless of
//! how many playful keywords also matched.

use tracing::debug;

use super::catalog::{PLAYFUL_KEYWORDS, SOLEMN_KEYWORDS};
use super::types::{IntentLevel, IntentSignal};

/// Lowercase alphanumeric tokens of the input, everything else a separator.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Whole-word match: a multi-word keyword must appear as a contiguous token
/// window, never as a substring.
fn contains_phrase(tokens: &[String], keyword: &str) -> bool {
    let phrase = tokenize(keyword);
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(phrase.len())
        .any(|w| w.iter().zip(&phrase).all(|(a, b)| a == b))
}

/// Classify concatenated free-text fields into an intent signal.
///
/// Feeds style-family scoring only; template selection never sees it.
pub fn detect_intent(texts: &[String]) -> IntentSignal {
    let joined = texts.join(" ");
    let tokens = tokenize(&joined);

    let solemn_matches: Vec<String> = SOLEMN_KEYWORDS
        .iter()
        .filter(|k| contains_phrase(&tokens, k))
        .map(|k| k.to_string())
        .collect();
    let playful_matches: Vec<String> = PLAYFUL_KEYWORDS
        .iter()
        .filter(|k| contains_phrase(&tokens, k))
        .map(|k| k.to_string())
        .collect();

    let level = if !solemn_matches.is_empty() {
        IntentLevel::Solemn
    } else if !playful_matches.is_empty() {
        IntentLevel::High
    } else {
        IntentLevel::Low
    };

    debug!(
        ?level,
        solemn = solemn_matches.len(),
        playful = playful_matches.len(),
        "intent classified"
    );

    IntentSignal {
        is_playful: level == IntentLevel::High,
        level,
        playful_matches,
        solemn_matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text_is_low() {
        let signal = detect_intent(&["weekly gathering artwork".to_string()]);
        assert_eq!(signal.level, IntentLevel::Low);
        assert!(!signal.is_playful);
    }

    #[test]
    fn test_playful_keyword_raises_level() {
        let signal = detect_intent(&["Summer kickoff celebration!".to_string()]);
        assert_eq!(signal.level, IntentLevel::High);
        assert!(signal.is_playful);
        assert!(signal.playful_matches.contains(&"celebration".to_string()));
    }

    #[test]
    fn test_solemn_vetoes_playful() {
        let texts = vec!["Good Friday service".to_string(), "kids welcome party".to_string()];
        let signal = detect_intent(&texts);
        assert_eq!(signal.level, IntentLevel::Solemn);
        assert!(!signal.is_playful);
        assert!(signal.solemn_matches.contains(&"good friday".to_string()));
        // The playful matches are still reported, just outvoted.
        assert!(!signal.playful_matches.is_empty());
    }

    #[test]
    fn test_phrase_requires_adjacent_tokens() {
        let signal = detect_intent(&["a good man on friday".to_string()]);
        assert_eq!(signal.level, IntentLevel::Low);
    }

    #[test]
    fn test_match_is_whole_word() {
        // "funky" must not match "fun".
        let signal = detect_intent(&["funky bass workshop".to_string()]);
        assert_eq!(signal.level, IntentLevel::Low);
    }

    #[test]
    fn test_punctuation_and_case_normalized() {
        let signal = detect_intent(&["GOOD-FRIDAY: a night of lament.".to_string()]);
        assert_eq!(signal.level, IntentLevel::Solemn);
        assert_eq!(signal.solemn_matches.len(), 2);
    }
}
