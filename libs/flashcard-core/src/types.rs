//! Core types for flashcard detection.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Kind of card a block encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Basic,
    Concept,
    Descriptor,
    Cloze,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Concept => "concept",
            Self::Descriptor => "descriptor",
            Self::Cloze => "cloze",
        }
    }
}

/// Card types that carry a front and a back; cloze cards have no sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SidedCardType {
    Basic,
    Concept,
    Descriptor,
}

impl From<SidedCardType> for CardType {
    fn from(card_type: SidedCardType) -> Self {
        match card_type {
            SidedCardType::Basic => Self::Basic,
            SidedCardType::Concept => Self::Concept,
            SidedCardType::Descriptor => Self::Descriptor,
        }
    }
}

impl TryFrom<CardType> for SidedCardType {
    type Error = ParseError;

    fn try_from(card_type: CardType) -> Result<Self, Self::Error> {
        match card_type {
            CardType::Basic => Ok(Self::Basic),
            CardType::Concept => Ok(Self::Concept),
            CardType::Descriptor => Ok(Self::Descriptor),
            CardType::Cloze => Err(ParseError::MixedFields),
        }
    }
}

/// Which way a front/back card is reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardDirection {
    Forward,
    Reverse,
    Bidirectional,
    /// Authored as a card but excluded from review.
    Disabled,
}

impl CardDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
            Self::Bidirectional => "bidirectional",
            Self::Disabled => "disabled",
        }
    }
}

/// A detected flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flashcard {
    /// `{{...}}` deletions, in document order.
    Cloze { occlusions: Vec<String> },
    /// Separator card with a non-empty front.
    Sided {
        card_type: SidedCardType,
        direction: CardDirection,
        front: String,
        back: Option<String>,
    },
}

/// Outcome of parsing one block of text.
///
/// Serializes to the flat record used by the block store:
/// `{"isCard": false}` or `{"isCard": true, "cardType": ..., ...}` with absent
/// fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "ParseRecord", try_from = "ParseRecord")]
pub enum FlashcardParseResult {
    #[default]
    NotCard,
    Card(Flashcard),
}

impl FlashcardParseResult {
    pub fn is_card(&self) -> bool {
        matches!(self, Self::Card(_))
    }

    pub fn card(&self) -> Option<&Flashcard> {
        match self {
            Self::Card(card) => Some(card),
            Self::NotCard => None,
        }
    }

    pub fn card_type(&self) -> Option<CardType> {
        match self.card()? {
            Flashcard::Cloze { .. } => Some(CardType::Cloze),
            Flashcard::Sided { card_type, .. } => Some((*card_type).into()),
        }
    }

    pub fn card_direction(&self) -> Option<CardDirection> {
        match self.card()? {
            Flashcard::Sided { direction, .. } => Some(*direction),
            Flashcard::Cloze { .. } => None,
        }
    }

    pub fn card_front(&self) -> Option<&str> {
        match self.card()? {
            Flashcard::Sided { front, .. } => Some(front),
            Flashcard::Cloze { .. } => None,
        }
    }

    pub fn card_back(&self) -> Option<&str> {
        match self.card()? {
            Flashcard::Sided { back, .. } => back.as_deref(),
            Flashcard::Cloze { .. } => None,
        }
    }

    pub fn cloze_occlusions(&self) -> Option<&[String]> {
        match self.card()? {
            Flashcard::Cloze { occlusions } => Some(occlusions),
            Flashcard::Sided { .. } => None,
        }
    }
}

/// Flat wire shape of [`FlashcardParseResult`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParseRecord {
    is_card: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_type: Option<CardType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_direction: Option<CardDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card_back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cloze_occlusions: Option<Vec<String>>,
}

impl From<FlashcardParseResult> for ParseRecord {
    fn from(result: FlashcardParseResult) -> Self {
        match result {
            FlashcardParseResult::NotCard => Self::default(),
            FlashcardParseResult::Card(Flashcard::Cloze { occlusions }) => Self {
                is_card: true,
                card_type: Some(CardType::Cloze),
                cloze_occlusions: Some(occlusions),
                ..Self::default()
            },
            FlashcardParseResult::Card(Flashcard::Sided {
                card_type,
                direction,
                front,
                back,
            }) => Self {
                is_card: true,
                card_type: Some(card_type.into()),
                card_direction: Some(direction),
                card_front: Some(front),
                card_back: back,
                cloze_occlusions: None,
            },
        }
    }
}

impl TryFrom<ParseRecord> for FlashcardParseResult {
    type Error = ParseError;

    fn try_from(record: ParseRecord) -> Result<Self, Self::Error> {
        if !record.is_card {
            let stray = [
                ("cardType", record.card_type.is_some()),
                ("cardDirection", record.card_direction.is_some()),
                ("cardFront", record.card_front.is_some()),
                ("cardBack", record.card_back.is_some()),
                ("clozeOcclusions", record.cloze_occlusions.is_some()),
            ];
            if let Some((field, _)) = stray.into_iter().find(|(_, present)| *present) {
                return Err(ParseError::UnexpectedField { field });
            }
            return Ok(Self::NotCard);
        }

        match record.card_type.ok_or(ParseError::MissingCardType)? {
            CardType::Cloze => {
                if record.card_direction.is_some()
                    || record.card_front.is_some()
                    || record.card_back.is_some()
                {
                    return Err(ParseError::MixedFields);
                }
                let occlusions = record.cloze_occlusions.ok_or(ParseError::MissingOcclusions)?;
                if occlusions.is_empty() {
                    return Err(ParseError::MissingOcclusions);
                }
                Ok(Self::Card(Flashcard::Cloze { occlusions }))
            }
            card_type => {
                if record.cloze_occlusions.is_some() {
                    return Err(ParseError::MixedFields);
                }
                let direction = record.card_direction.ok_or(ParseError::MissingDirection {
                    card_type: card_type.as_str().to_string(),
                })?;
                let front = record
                    .card_front
                    .filter(|front| !front.trim().is_empty())
                    .ok_or(ParseError::MissingFront)?;
                Ok(Self::Card(Flashcard::Sided {
                    card_type: SidedCardType::try_from(card_type)?,
                    direction,
                    front,
                    back: record.card_back.filter(|back| !back.is_empty()),
                }))
            }
        }
    }
}
