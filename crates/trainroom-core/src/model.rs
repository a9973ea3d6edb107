//! Data model shared by the engines, the catalog and project documents.
//!
//! Enumerations serialize in `snake_case` and implement [`FromStr`] and
//! [`fmt::Display`] with the same spelling, so CLI flags, config values and
//! JSON documents all agree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Category of an agenda block.
///
/// The block type also selects the logistics overhead formula used by the
/// time estimation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Opening round with questions to the group
    OpeningQuestions,
    /// Trainer-led presentation
    Lecture,
    /// Small-group work
    Groups,
    /// Work in pairs
    Pairs,
    /// Individual workbook exercise
    Workbook,
    /// Video followed by a debrief
    VideoDebrief,
    /// Short activating game
    Energizer,
    /// Plenary discussion
    Discussion,
    /// Case study analysis
    CaseStudy,
    /// Coffee or lunch break
    Break,
    /// Closing summary
    Summary,
}

impl BlockType {
    pub const ALL: [BlockType; 11] = [
        BlockType::OpeningQuestions,
        BlockType::Lecture,
        BlockType::Groups,
        BlockType::Pairs,
        BlockType::Workbook,
        BlockType::VideoDebrief,
        BlockType::Energizer,
        BlockType::Discussion,
        BlockType::CaseStudy,
        BlockType::Break,
        BlockType::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::OpeningQuestions => "opening_questions",
            BlockType::Lecture => "lecture",
            BlockType::Groups => "groups",
            BlockType::Pairs => "pairs",
            BlockType::Workbook => "workbook",
            BlockType::VideoDebrief => "video_debrief",
            BlockType::Energizer => "energizer",
            BlockType::Discussion => "discussion",
            BlockType::CaseStudy => "case_study",
            BlockType::Break => "break",
            BlockType::Summary => "summary",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockType::OpeningQuestions => "Opening + questions",
            BlockType::Lecture => "Lecture",
            BlockType::Groups => "Group work",
            BlockType::Pairs => "Pair work",
            BlockType::Workbook => "Workbook",
            BlockType::VideoDebrief => "Video + debrief",
            BlockType::Energizer => "Energizer",
            BlockType::Discussion => "Discussion",
            BlockType::CaseStudy => "Case study",
            BlockType::Break => "Break",
            BlockType::Summary => "Summary",
        }
    }
}

/// Experience level of the participant group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Novice,
    #[default]
    Mixed,
    Advanced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Novice,
        ExperienceLevel::Mixed,
        ExperienceLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Novice => "novice",
            ExperienceLevel::Mixed => "mixed",
            ExperienceLevel::Advanced => "advanced",
        }
    }

    /// Fractional adjustment applied to base minutes.
    pub fn modifier(&self) -> f64 {
        match self {
            ExperienceLevel::Novice => 0.20,
            ExperienceLevel::Mixed => 0.0,
            ExperienceLevel::Advanced => -0.20,
        }
    }
}

/// Furniture layout of the training room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomTemplate {
    /// U-shape of tables facing the trainer
    #[default]
    HorseshoeTables,
    /// Table islands for group work
    Islands,
    /// Chairs in a circle, no tables
    Circle,
    /// One long table
    Boardroom,
    /// Theatre rows for 20+ seats
    #[serde(rename = "lecture_20plus")]
    Lecture20Plus,
}

impl RoomTemplate {
    pub const ALL: [RoomTemplate; 5] = [
        RoomTemplate::HorseshoeTables,
        RoomTemplate::Islands,
        RoomTemplate::Circle,
        RoomTemplate::Boardroom,
        RoomTemplate::Lecture20Plus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomTemplate::HorseshoeTables => "horseshoe_tables",
            RoomTemplate::Islands => "islands",
            RoomTemplate::Circle => "circle",
            RoomTemplate::Boardroom => "boardroom",
            RoomTemplate::Lecture20Plus => "lecture_20plus",
        }
    }

    /// Whether moving people around this layout costs an extra minute.
    pub fn is_large_lecture(&self) -> bool {
        matches!(self, RoomTemplate::Lecture20Plus)
    }
}

/// Energy an exercise puts into the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dynamics {
    Low,
    Medium,
    High,
}

impl Dynamics {
    pub const ALL: [Dynamics; 3] = [Dynamics::Low, Dynamics::Medium, Dynamics::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dynamics::Low => "low",
            Dynamics::Medium => "medium",
            Dynamics::High => "high",
        }
    }
}

macro_rules! str_enum_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase().replace('-', "_");
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| ValidationError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

str_enum_impls!(BlockType, "block type");
str_enum_impls!(ExperienceLevel, "experience level");
str_enum_impls!(RoomTemplate, "room template");
str_enum_impls!(Dynamics, "dynamics");

/// Physical assets an exercise or block needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequiredAssets {
    #[serde(default)]
    pub tables: bool,
    #[serde(default)]
    pub flipchart_count: u32,
    #[serde(default)]
    pub screen: bool,
}

impl RequiredAssets {
    /// Number of asset units demanded (tables and screen count as one each).
    pub fn asset_demand(&self) -> u32 {
        u32::from(self.tables) + self.flipchart_count + u32::from(self.screen)
    }
}

/// Assets available in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomAssets {
    #[serde(default)]
    pub has_tables: bool,
    #[serde(default)]
    pub flipchart_count: u32,
    #[serde(default)]
    pub has_screen: bool,
}

/// Room dimensions, layout and available assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    /// Width in meters
    #[serde(default = "default_room_width")]
    pub width: f64,
    /// Height (depth) in meters
    #[serde(default = "default_room_height")]
    pub height: f64,
    #[serde(default)]
    pub template: RoomTemplate,
    #[serde(default)]
    pub assets: RoomAssets,
}

fn default_room_width() -> f64 {
    10.0
}
fn default_room_height() -> f64 {
    8.0
}

impl RoomLayout {
    pub fn new(template: RoomTemplate, assets: RoomAssets) -> Self {
        Self {
            width: default_room_width(),
            height: default_room_height(),
            template,
            assets,
        }
    }
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self::new(
            RoomTemplate::default(),
            RoomAssets {
                has_tables: true,
                flipchart_count: 1,
                has_screen: true,
            },
        )
    }
}

/// Questions attached to an "opening + questions" block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionConfig {
    /// Manually entered questions
    #[serde(default)]
    pub questions: Vec<String>,
    /// One suggested question round per this many participants
    #[serde(default = "default_persons_per_question")]
    pub persons_per_question: u32,
    /// Questions asked per round
    #[serde(default = "default_questions_per_group")]
    pub questions_per_group: u32,
    /// Seconds to read out each question
    #[serde(default = "default_prompt_seconds")]
    pub prompt_seconds: f64,
    /// Answers expected per question
    #[serde(default = "default_answers_per_question")]
    pub answers_per_question: u32,
    /// Seconds per answer
    #[serde(default = "default_seconds_per_answer")]
    pub seconds_per_answer: f64,
}

fn default_persons_per_question() -> u32 {
    5
}
fn default_questions_per_group() -> u32 {
    2
}
fn default_prompt_seconds() -> f64 {
    15.0
}
fn default_answers_per_question() -> u32 {
    3
}
fn default_seconds_per_answer() -> f64 {
    30.0
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            persons_per_question: default_persons_per_question(),
            questions_per_group: default_questions_per_group(),
            prompt_seconds: default_prompt_seconds(),
            answers_per_question: default_answers_per_question(),
            seconds_per_answer: default_seconds_per_answer(),
        }
    }
}

/// A scheduled segment of the training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub title: String,
    /// Allotted window in minutes
    pub window_minutes: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_config: Option<QuestionConfig>,
    #[serde(default)]
    pub required_assets: RequiredAssets,
    #[serde(default)]
    pub order: u32,
    /// Computed by `Project::recompute`; never authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<f64>,
    /// Computed by `Project::recompute`; never authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fits_in_window: Option<bool>,
}

impl AgendaBlock {
    /// Create a block with a fresh id and no exercise.
    pub fn new(block_type: BlockType, title: impl Into<String>, window_minutes: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            block_type,
            title: title.into(),
            window_minutes,
            exercise_id: None,
            question_config: None,
            required_assets: RequiredAssets::default(),
            order: 0,
            estimated_minutes: None,
            fits_in_window: None,
        }
    }

    pub fn with_question_config(mut self, config: QuestionConfig) -> Self {
        self.question_config = Some(config);
        self
    }
}
