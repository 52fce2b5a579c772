use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::module::ModuleId;

/// Unique identifier for a section, wrapping a UUID v7.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub Uuid);

impl SectionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SectionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A typed content block within a module.
///
/// Sections are kept dense: `order_id` runs 0..n-1 within the owning module
/// and is renumbered by the section service after every insert, move, or
/// delete (the builder's drag-reorder contract).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub module_id: ModuleId,
    /// Zero-based position within the module, unique and dense.
    pub order_id: i64,
    /// Editor-facing label; may be empty (e.g., plain text blocks).
    pub title: String,
    pub payload: SectionPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fixed palette of section types the builder composes modules from.
///
/// Internally tagged on `"type"` so the wire format matches the stored JSON:
/// `{"type": "quiz", "question": ..., "options": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SectionPayload {
    /// Single multiple-choice question.
    Quiz {
        question: String,
        options: Vec<QuizOption>,
    },
    /// Freeform rich-text block (markdown).
    Text { body: String },
    /// Flip-card deck.
    Flashcards { cards: Vec<Flashcard> },
    /// Real-world events related to the goal.
    Events { events: Vec<EventEntry> },
    /// Section heading with optional subheading.
    Header {
        heading: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subheading: Option<String>,
    },
    /// Budget-allocation mini-game.
    #[serde(rename_all = "camelCase")]
    ResourceManagerGame {
        starting_budget: i64,
        rounds: u32,
        resources: Vec<GameResource>,
    },
}

impl SectionPayload {
    /// The discriminant of this payload.
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionPayload::Quiz { .. } => SectionKind::Quiz,
            SectionPayload::Text { .. } => SectionKind::Text,
            SectionPayload::Flashcards { .. } => SectionKind::Flashcards,
            SectionPayload::Events { .. } => SectionKind::Events,
            SectionPayload::Header { .. } => SectionKind::Header,
            SectionPayload::ResourceManagerGame { .. } => SectionKind::ResourceManagerGame,
        }
    }
}

/// One answer option in a quiz section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

/// One card in a flashcard deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// One entry in an events section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One purchasable item in the resource-manager mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResource {
    pub name: String,
    pub cost: i64,
    /// Points awarded per round once purchased.
    pub payoff: i64,
}

/// Section type discriminant, matching the payload's `"type"` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Quiz,
    Text,
    Flashcards,
    Events,
    Header,
    ResourceManagerGame,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SectionKind::Quiz => "quiz",
            SectionKind::Text => "text",
            SectionKind::Flashcards => "flashcards",
            SectionKind::Events => "events",
            SectionKind::Header => "header",
            SectionKind::ResourceManagerGame => "resourceManagerGame",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(SectionKind::Quiz),
            "text" => Ok(SectionKind::Text),
            "flashcards" => Ok(SectionKind::Flashcards),
            "events" => Ok(SectionKind::Events),
            "header" => Ok(SectionKind::Header),
            "resourceManagerGame" => Ok(SectionKind::ResourceManagerGame),
            other => Err(format!("invalid section kind: '{other}'")),
        }
    }
}

/// Request to add a section at the end of a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSectionRequest {
    pub title: Option<String>,
    pub payload: SectionPayload,
}

/// Request to update a section's title or payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSectionRequest {
    pub title: Option<String>,
    pub payload: Option<SectionPayload>,
}

/// Request to move a section from one position to another (drag-reorder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderSectionsRequest {
    pub from: usize,
    pub to: usize,
}
