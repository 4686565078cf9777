//! Flashcard syntax detection for a single block of text.
//!
//! # Syntax
//! ```text
//! {{Paris}} is the {{capital}}     cloze, one occlusion per {{...}}
//! front >> back                    basic, forward
//! front :: back                    concept, bidirectional
//! front ;; back                    descriptor, forward
//! front >>- back                   any marker + "-" disables the card
//! front >>>                        tripled markers let the back span lines or be empty
//! ```
//!
//! Markers are tried in a fixed order and the first acceptable match wins.
//! Overlapping markers are resolved by that order alone, never by length, so
//! `front >>>- back` is a disabled `>>-` card whose front is `front >`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{CardDirection, CardType, Flashcard, FlashcardParseResult, SidedCardType};
use CardDirection::{Bidirectional, Disabled, Forward, Reverse};
use SidedCardType::{Basic, Concept, Descriptor};

static CLOZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap());

/// How much of the input a marker's back capture may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Marker followed by `-`; back may be empty or span lines.
    Disabled,
    /// Back may be empty or span lines.
    MultiLine,
    /// Back must be non-empty and on the same line.
    Standard,
}

impl Shape {
    fn back_group(self) -> &'static str {
        match self {
            Self::Disabled | Self::MultiLine => r"((?s:.*))",
            Self::Standard => r"(.+)",
        }
    }
}

/// Marker precedence. Order is part of the syntax.
const PATTERN_TABLE: &[(&str, Shape, SidedCardType, CardDirection)] = &[
    // Disabled markers come first so the trailing `-` never leaks into the back.
    (";<>-", Shape::Disabled, Descriptor, Disabled),
    (";;-", Shape::Disabled, Descriptor, Disabled),
    (";<-", Shape::Disabled, Descriptor, Disabled),
    ("<>-", Shape::Disabled, Basic, Disabled),
    (">>-", Shape::Disabled, Basic, Disabled),
    ("<<-", Shape::Disabled, Basic, Disabled),
    ("==-", Shape::Disabled, Basic, Disabled),
    ("::-", Shape::Disabled, Concept, Disabled),
    (":>-", Shape::Disabled, Concept, Disabled),
    (":<-", Shape::Disabled, Concept, Disabled),
    // Multi-line markers.
    (">>>", Shape::MultiLine, Basic, Forward),
    ("<<<", Shape::MultiLine, Basic, Reverse),
    ("<><>", Shape::MultiLine, Basic, Bidirectional),
    ("===", Shape::MultiLine, Basic, Forward),
    (":::", Shape::MultiLine, Concept, Bidirectional),
    (":>>", Shape::MultiLine, Concept, Forward),
    (":<<", Shape::MultiLine, Concept, Reverse),
    (";;;", Shape::MultiLine, Descriptor, Forward),
    (";;<>", Shape::MultiLine, Descriptor, Bidirectional),
    (";<<", Shape::MultiLine, Descriptor, Reverse),
    // Bidirectional markers before the one-way pairs they contain.
    (";<>", Shape::Standard, Descriptor, Bidirectional),
    ("<>", Shape::Standard, Basic, Bidirectional),
    (">>", Shape::Standard, Basic, Forward),
    ("<<", Shape::Standard, Basic, Reverse),
    ("==", Shape::Standard, Basic, Forward),
    ("::", Shape::Standard, Concept, Bidirectional),
    (":>", Shape::Standard, Concept, Forward),
    (":<", Shape::Standard, Concept, Reverse),
    (";;", Shape::Standard, Descriptor, Forward),
    (";<", Shape::Standard, Descriptor, Reverse),
];

struct CardPattern {
    regex: Regex,
    card_type: SidedCardType,
    direction: CardDirection,
}

static PATTERNS: Lazy<Vec<CardPattern>> = Lazy::new(|| {
    PATTERN_TABLE
        .iter()
        .map(|&(marker, shape, card_type, direction)| CardPattern {
            regex: Regex::new(&format!(
                r"^(.*?)\s*{}\s*{}$",
                regex::escape(marker),
                shape.back_group()
            ))
            .unwrap(),
            card_type,
            direction,
        })
        .collect()
});

/// The marker table in precedence order, for rendering syntax help.
pub fn card_patterns() -> impl Iterator<Item = (&'static str, CardType, CardDirection)> {
    PATTERN_TABLE
        .iter()
        .map(|&(marker, _, card_type, direction)| (marker, card_type.into(), direction))
}

/// Parse one block's text into card metadata.
///
/// Never fails: anything that does not cleanly match the syntax is prose.
pub fn parse_flashcard(text: &str) -> FlashcardParseResult {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return FlashcardParseResult::NotCard;
    }

    // Cloze wins over every separator in the same text.
    let occlusions: Vec<String> = CLOZE_RE
        .captures_iter(trimmed)
        .map(|caps| caps[1].trim().to_string())
        .collect();
    if !occlusions.is_empty() {
        return FlashcardParseResult::Card(Flashcard::Cloze { occlusions });
    }

    for pattern in PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(trimmed) else {
            continue;
        };
        let front = caps.get(1).map_or("", |m| m.as_str()).trim();
        if front.is_empty() {
            continue;
        }
        let back = caps.get(2).map_or("", |m| m.as_str()).trim();

        return FlashcardParseResult::Card(Flashcard::Sided {
            card_type: pattern.card_type,
            direction: pattern.direction,
            front: front.to_string(),
            back: (!back.is_empty()).then(|| back.to_string()),
        });
    }

    FlashcardParseResult::NotCard
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sided(
        card_type: SidedCardType,
        direction: CardDirection,
        front: &str,
        back: Option<&str>,
    ) -> FlashcardParseResult {
        FlashcardParseResult::Card(Flashcard::Sided {
            card_type,
            direction,
            front: front.to_string(),
            back: back.map(str::to_string),
        })
    }

    #[test]
    fn parse_basic_forward() {
        assert_eq!(
            parse_flashcard("front >> back"),
            sided(Basic, Forward, "front", Some("back"))
        );
    }

    #[test]
    fn parse_empty_and_whitespace() {
        assert_eq!(parse_flashcard(""), FlashcardParseResult::NotCard);
        assert_eq!(parse_flashcard("   \n\t "), FlashcardParseResult::NotCard);
    }

    #[test]
    fn plain_prose_is_not_a_card() {
        assert_eq!(
            parse_flashcard("Just a sentence about x > y and a: b."),
            FlashcardParseResult::NotCard
        );
    }

    #[test]
    fn parse_each_standard_marker() {
        let cases = [
            ("a >> b", Basic, Forward),
            ("a << b", Basic, Reverse),
            ("a == b", Basic, Forward),
            ("a <> b", Basic, Bidirectional),
            ("a :: b", Concept, Bidirectional),
            ("a :> b", Concept, Forward),
            ("a :< b", Concept, Reverse),
            ("a ;; b", Descriptor, Forward),
            ("a ;< b", Descriptor, Reverse),
            ("a ;<> b", Descriptor, Bidirectional),
        ];
        for (input, card_type, direction) in cases {
            assert_eq!(
                parse_flashcard(input),
                sided(card_type, direction, "a", Some("b")),
                "input: {input}"
            );
        }
    }

    #[test]
    fn markers_without_surrounding_spaces() {
        assert_eq!(
            parse_flashcard("front>>back"),
            sided(Basic, Forward, "front", Some("back"))
        );
    }

    #[test]
    fn parse_cloze_in_order() {
        let result = parse_flashcard("{{Paris}} is the {{capital}}");
        assert_eq!(
            result,
            FlashcardParseResult::Card(Flashcard::Cloze {
                occlusions: vec!["Paris".to_string(), "capital".to_string()],
            })
        );
        assert_eq!(result.card_front(), None);
        assert_eq!(result.card_direction(), None);
    }

    #[test]
    fn adjacent_cloze_spans_are_separate() {
        let result = parse_flashcard("{{a}}{{b}}");
        assert_eq!(
            result.cloze_occlusions(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn cloze_trims_occlusions() {
        let result = parse_flashcard("The {{ mitochondria }} powers the cell");
        assert_eq!(result.cloze_occlusions(), Some(&["mitochondria".to_string()][..]));
    }

    #[test]
    fn cloze_beats_separators() {
        let result = parse_flashcard("{{x}} >> y");
        assert_eq!(result.card_type(), Some(CardType::Cloze));
    }

    #[test]
    fn empty_cloze_falls_through() {
        assert_eq!(parse_flashcard("{{}}"), FlashcardParseResult::NotCard);
        assert_eq!(
            parse_flashcard("{{}} >> back"),
            sided(Basic, Forward, "{{}}", Some("back"))
        );
    }

    #[test]
    fn disabled_marker_wins_over_forward() {
        assert_eq!(
            parse_flashcard("front >>- back"),
            sided(Basic, Disabled, "front", Some("back"))
        );
    }

    #[test]
    fn disabled_markers_per_type() {
        let cases = [
            ("a ;;- b", Descriptor),
            ("a ;<- b", Descriptor),
            ("a ;<>- b", Descriptor),
            ("a <<- b", Basic),
            ("a <>- b", Basic),
            ("a ==- b", Basic),
            ("a ::- b", Concept),
            ("a :>- b", Concept),
            ("a :<- b", Concept),
        ];
        for (input, card_type) in cases {
            assert_eq!(
                parse_flashcard(input),
                sided(card_type, Disabled, "a", Some("b")),
                "input: {input}"
            );
        }
    }

    #[test]
    fn disabled_allows_empty_back() {
        assert_eq!(
            parse_flashcard("front >>-"),
            sided(Basic, Disabled, "front", None)
        );
    }

    #[test]
    fn triple_marker_with_disable_suffix_absorbs_stray_char() {
        assert_eq!(
            parse_flashcard("front >>>- back"),
            sided(Basic, Disabled, "front >", Some("back"))
        );
    }

    #[test]
    fn triple_semicolon_disabled_absorbs_semicolon() {
        assert_eq!(
            parse_flashcard("front ;;<- back"),
            sided(Descriptor, Disabled, "front ;", Some("back"))
        );
        assert_eq!(
            parse_flashcard("front ;;<>- back"),
            sided(Descriptor, Disabled, "front ;", Some("back"))
        );
    }

    #[test]
    fn multi_line_allows_empty_back() {
        assert_eq!(
            parse_flashcard("front >>>"),
            sided(Basic, Forward, "front", None)
        );
        assert_eq!(parse_flashcard("front >>"), FlashcardParseResult::NotCard);
    }

    #[test]
    fn multi_line_back_spans_lines() {
        assert_eq!(
            parse_flashcard("Steps :>>\n1. mix\n2. bake"),
            sided(Concept, Forward, "Steps", Some("1. mix\n2. bake"))
        );
    }

    #[test]
    fn standard_back_stays_on_one_line() {
        assert_eq!(
            parse_flashcard("front >> line one\nline two"),
            FlashcardParseResult::NotCard
        );
    }

    #[test]
    fn parse_each_multi_line_marker() {
        let cases = [
            ("a >>> b", Basic, Forward),
            ("a <<< b", Basic, Reverse),
            ("a <><> b", Basic, Bidirectional),
            ("a === b", Basic, Forward),
            ("a ::: b", Concept, Bidirectional),
            ("a :>> b", Concept, Forward),
            ("a :<< b", Concept, Reverse),
            ("a ;;; b", Descriptor, Forward),
            ("a ;;<> b", Descriptor, Bidirectional),
            ("a ;<< b", Descriptor, Reverse),
        ];
        for (input, card_type, direction) in cases {
            assert_eq!(
                parse_flashcard(input),
                sided(card_type, direction, "a", Some("b")),
                "input: {input}"
            );
        }
    }

    #[test]
    fn double_separator_keeps_rest_in_back() {
        assert_eq!(
            parse_flashcard("a >> b >> c"),
            sided(Basic, Forward, "a", Some("b >> c"))
        );
    }

    #[test]
    fn empty_front_is_not_a_card() {
        assert_eq!(parse_flashcard(">> back"), FlashcardParseResult::NotCard);
        assert_eq!(parse_flashcard(":: back"), FlashcardParseResult::NotCard);
        assert_eq!(parse_flashcard(">>>"), FlashcardParseResult::NotCard);
    }

    #[test]
    fn parse_is_repeatable() {
        let input = "What is Rust? :: A systems language";
        assert_eq!(parse_flashcard(input), parse_flashcard(input));
    }

    #[test]
    fn pattern_table_starts_with_disabled_markers() {
        let markers: Vec<_> = card_patterns().map(|(marker, _, _)| marker).collect();
        assert_eq!(markers.len(), 30);
        assert!(markers[..10].iter().all(|m| m.ends_with('-')));
        let triple = markers.iter().position(|m| *m == ">>>").unwrap();
        let double = markers.iter().position(|m| *m == ">>").unwrap();
        assert!(triple < double);
    }

    #[test]
    fn pattern_table_has_no_cloze_marker() {
        assert!(card_patterns().all(|(_, card_type, _)| card_type != CardType::Cloze));
    }
}
