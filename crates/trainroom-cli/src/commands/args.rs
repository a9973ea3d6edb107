//! Flags shared by the planning commands.
//!
//! Anything not given on the command line falls back to the config defaults.

use clap::Args;
use trainroom_core::{
    AgendaBlock, BlockType, Config, ExperienceLevel, RoomAssets, RoomLayout, RoomTemplate,
};

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Block type (e.g. pairs, groups, lecture, opening_questions)
    #[arg(long = "type", value_name = "TYPE")]
    pub block_type: BlockType,
    /// Block window in minutes
    #[arg(long)]
    pub window: f64,
    /// Number of participants
    #[arg(long)]
    pub participants: Option<u32>,
    /// Experience level (novice, mixed, advanced)
    #[arg(long)]
    pub level: Option<ExperienceLevel>,
    /// Room template (horseshoe_tables, islands, circle, boardroom, lecture_20plus)
    #[arg(long)]
    pub room: Option<RoomTemplate>,
    /// Whether the room has tables
    #[arg(long)]
    pub tables: Option<bool>,
    /// Flipcharts available in the room
    #[arg(long)]
    pub flipcharts: Option<u32>,
    /// Whether the room has a screen
    #[arg(long)]
    pub screen: Option<bool>,
    /// Attach a question round using the configured timing
    #[arg(long)]
    pub with_questions: bool,
    /// Manually entered question (repeatable, implies --with-questions)
    #[arg(long = "question", value_name = "TEXT")]
    pub questions: Vec<String>,
}

/// Block, room and group resolved from flags and config.
pub struct Plan {
    pub block: AgendaBlock,
    pub room: RoomLayout,
    pub participants: u32,
    pub level: ExperienceLevel,
}

impl PlanArgs {
    pub fn resolve(&self, config: &Config) -> Plan {
        let defaults = &config.defaults;

        let mut block = AgendaBlock::new(self.block_type, self.block_type.display_name(), self.window);
        if self.with_questions || !self.questions.is_empty() {
            let mut questions = config.questions.clone();
            questions.questions.extend(self.questions.iter().cloned());
            block = block.with_question_config(questions);
        }

        let room = RoomLayout::new(
            self.room.unwrap_or(defaults.room_template),
            RoomAssets {
                has_tables: self.tables.unwrap_or(defaults.has_tables),
                flipchart_count: self.flipcharts.unwrap_or(defaults.flipchart_count),
                has_screen: self.screen.unwrap_or(defaults.has_screen),
            },
        );

        Plan {
            block,
            room,
            participants: self.participants.unwrap_or(defaults.participant_count),
            level: self.level.unwrap_or(defaults.experience_level),
        }
    }
}
