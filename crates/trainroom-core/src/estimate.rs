//! Time estimation engine.
//!
//! A block's realistic duration is the sum of four components:
//!
//! ```text
//! total = base + experience_modifier + overhead + interaction
//! ```
//!
//! - `experience_modifier`: ±20% of base minutes depending on group experience
//! - `overhead`: transition and logistics time, keyed by block type
//! - `interaction`: question-and-answer time from an attached [`QuestionConfig`]
//!
//! All functions are pure. Inputs are not validated and results are not
//! rounded; callers round for display.

use serde::{Deserialize, Serialize};

use crate::model::{BlockType, ExperienceLevel, QuestionConfig, RoomTemplate};

/// Extra minutes for shuffling people around a large lecture room.
pub const LARGE_ROOM_OVERHEAD: f64 = 1.0;

/// Breakdown of a block's estimated duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub base_minutes: f64,
    pub experience_modifier: f64,
    pub overhead: f64,
    pub interaction: f64,
    /// Always `base_minutes + experience_modifier + overhead + interaction`
    pub total: f64,
}

impl TimeEstimate {
    fn from_components(
        base_minutes: f64,
        experience_modifier: f64,
        overhead: f64,
        interaction: f64,
    ) -> Self {
        Self {
            base_minutes,
            experience_modifier,
            overhead,
            interaction,
            total: base_minutes + experience_modifier + overhead + interaction,
        }
    }

    /// Minutes beyond `window_minutes`, or zero when the estimate fits.
    pub fn overage(&self, window_minutes: f64) -> f64 {
        (self.total - window_minutes).max(0.0)
    }
}

/// Adjustment of base minutes for the group's experience.
pub fn calculate_experience_modifier(base_minutes: f64, level: ExperienceLevel) -> f64 {
    base_minutes * level.modifier()
}

/// Transition and logistics minutes for a block.
pub fn calculate_overhead(
    participant_count: u32,
    block_type: BlockType,
    room_template: RoomTemplate,
) -> f64 {
    let participants = f64::from(participant_count);
    let method_overhead = match block_type {
        BlockType::Groups => 3.0 + 0.3 * participants,
        BlockType::Pairs => 2.0 + 0.15 * participants,
        BlockType::Workbook => 1.0 + 0.1 * participants,
        BlockType::VideoDebrief => 2.0,
        BlockType::Lecture => 1.0,
        BlockType::Energizer => 1.0,
        _ => 0.5,
    };

    if room_template.is_large_lecture() {
        method_overhead + LARGE_ROOM_OVERHEAD
    } else {
        method_overhead
    }
}

/// Number of questions suggested for a group of this size.
///
/// `ceil(participants / persons_per_question) × questions_per_group`
pub fn get_suggested_question_count(
    participant_count: u32,
    persons_per_question: u32,
    questions_per_group: u32,
) -> f64 {
    (f64::from(participant_count) / f64::from(persons_per_question)).ceil()
        * f64::from(questions_per_group)
}

/// Minutes spent on questions and answers; zero without a question config.
pub fn calculate_interaction_minutes(
    question_config: Option<&QuestionConfig>,
    participant_count: u32,
) -> f64 {
    let Some(cfg) = question_config else {
        return 0.0;
    };

    let suggested = get_suggested_question_count(
        participant_count,
        cfg.persons_per_question,
        cfg.questions_per_group,
    );
    let questions_count = suggested.max(cfg.questions.len() as f64);
    let seconds_per_question =
        cfg.prompt_seconds + f64::from(cfg.answers_per_question) * cfg.seconds_per_answer;

    questions_count * seconds_per_question / 60.0
}

/// Estimate a block's realistic duration.
pub fn estimate_block_time(
    base_minutes: f64,
    level: ExperienceLevel,
    participant_count: u32,
    block_type: BlockType,
    room_template: RoomTemplate,
    question_config: Option<&QuestionConfig>,
) -> TimeEstimate {
    TimeEstimate::from_components(
        base_minutes,
        calculate_experience_modifier(base_minutes, level),
        calculate_overhead(participant_count, block_type, room_template),
        calculate_interaction_minutes(question_config, participant_count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three_questions() -> QuestionConfig {
        QuestionConfig {
            questions: vec!["Q1".into(), "Q2".into(), "Q3".into()],
            persons_per_question: 5,
            questions_per_group: 2,
            prompt_seconds: 15.0,
            answers_per_question: 3,
            seconds_per_answer: 30.0,
        }
    }

    #[test]
    fn experience_modifier_by_level() {
        assert_eq!(calculate_experience_modifier(100.0, ExperienceLevel::Novice), 20.0);
        assert_eq!(calculate_experience_modifier(100.0, ExperienceLevel::Advanced), -20.0);
        assert_eq!(calculate_experience_modifier(100.0, ExperienceLevel::Mixed), 0.0);
    }

    #[test]
    fn experience_modifier_scales_linearly() {
        let small = calculate_experience_modifier(10.0, ExperienceLevel::Novice);
        let large = calculate_experience_modifier(50.0, ExperienceLevel::Novice);
        assert!((large - 5.0 * small).abs() < 1e-12);
    }

    #[test]
    fn overhead_for_groups() {
        let overhead = calculate_overhead(12, BlockType::Groups, RoomTemplate::HorseshoeTables);
        assert!((overhead - 6.6).abs() < 1e-9);
    }

    #[test]
    fn overhead_large_lecture_room_bonus() {
        assert_eq!(
            calculate_overhead(12, BlockType::Lecture, RoomTemplate::Lecture20Plus),
            2.0
        );
    }

    #[test]
    fn overhead_fixed_and_fallback_methods() {
        let room = RoomTemplate::Circle;
        assert_eq!(calculate_overhead(30, BlockType::VideoDebrief, room), 2.0);
        assert_eq!(calculate_overhead(30, BlockType::Energizer, room), 1.0);
        assert_eq!(calculate_overhead(30, BlockType::Discussion, room), 0.5);
        assert_eq!(calculate_overhead(30, BlockType::Break, room), 0.5);
        assert_eq!(
            calculate_overhead(30, BlockType::OpeningQuestions, RoomTemplate::Lecture20Plus),
            1.5
        );
    }

    #[test]
    fn overhead_per_participant_methods() {
        let room = RoomTemplate::Islands;
        assert!((calculate_overhead(8, BlockType::Pairs, room) - 3.2).abs() < 1e-9);
        assert!((calculate_overhead(10, BlockType::Workbook, room) - 2.0).abs() < 1e-9);
        assert_eq!(calculate_overhead(0, BlockType::Groups, room), 3.0);
    }

    #[test]
    fn suggested_question_count_rounds_groups_up() {
        assert_eq!(get_suggested_question_count(12, 5, 2), 6.0);
        assert_eq!(get_suggested_question_count(10, 5, 2), 4.0);
        assert_eq!(get_suggested_question_count(0, 5, 2), 0.0);
    }

    #[test]
    fn interaction_minutes_without_config_is_zero() {
        assert_eq!(calculate_interaction_minutes(None, 12), 0.0);
    }

    #[test]
    fn interaction_minutes_uses_suggested_count() {
        let cfg = three_questions();
        assert_eq!(calculate_interaction_minutes(Some(&cfg), 12), 10.5);
    }

    #[test]
    fn interaction_minutes_uses_manual_count_when_larger() {
        let mut cfg = three_questions();
        cfg.questions = (1..=8).map(|i| format!("Q{i}")).collect();
        // max(6, 8) = 8 questions × 105 s
        assert_eq!(calculate_interaction_minutes(Some(&cfg), 12), 14.0);
    }

    #[test]
    fn estimate_advanced_pairs_scenario() {
        let est = estimate_block_time(
            25.0,
            ExperienceLevel::Advanced,
            8,
            BlockType::Pairs,
            RoomTemplate::HorseshoeTables,
            None,
        );
        assert_eq!(est.experience_modifier, -5.0);
        assert!((est.overhead - 3.2).abs() < 1e-9);
        assert_eq!(est.interaction, 0.0);
        assert!((est.total - 23.2).abs() < 1e-9);
    }

    #[test]
    fn estimate_with_questions() {
        let cfg = three_questions();
        let est = estimate_block_time(
            20.0,
            ExperienceLevel::Novice,
            12,
            BlockType::OpeningQuestions,
            RoomTemplate::HorseshoeTables,
            Some(&cfg),
        );
        assert_eq!(est.experience_modifier, 4.0);
        assert_eq!(est.overhead, 0.5);
        assert_eq!(est.interaction, 10.5);
        assert_eq!(est.total, 35.0);
    }

    #[test]
    fn estimate_zero_base_is_overhead_only() {
        let est = estimate_block_time(
            0.0,
            ExperienceLevel::Novice,
            0,
            BlockType::Lecture,
            RoomTemplate::Boardroom,
            None,
        );
        assert_eq!(est.total, 1.0);
    }

    #[test]
    fn overage_is_never_negative() {
        let est = estimate_block_time(
            30.0,
            ExperienceLevel::Mixed,
            10,
            BlockType::Lecture,
            RoomTemplate::Boardroom,
            None,
        );
        assert_eq!(est.overage(60.0), 0.0);
        assert_eq!(est.overage(29.0), 2.0);
    }

    fn any_level() -> impl Strategy<Value = ExperienceLevel> {
        prop::sample::select(ExperienceLevel::ALL.to_vec())
    }

    fn any_block_type() -> impl Strategy<Value = BlockType> {
        prop::sample::select(BlockType::ALL.to_vec())
    }

    fn any_room() -> impl Strategy<Value = RoomTemplate> {
        prop::sample::select(RoomTemplate::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn total_is_exact_sum_of_components(
            base in 0.0f64..240.0,
            level in any_level(),
            participants in 0u32..60,
            block_type in any_block_type(),
            room in any_room(),
            with_questions in any::<bool>(),
        ) {
            let cfg = three_questions();
            let est = estimate_block_time(
                base,
                level,
                participants,
                block_type,
                room,
                with_questions.then_some(&cfg),
            );
            prop_assert_eq!(
                est.total,
                est.base_minutes + est.experience_modifier + est.overhead + est.interaction
            );
        }

        #[test]
        fn estimate_is_deterministic(
            base in 0.0f64..240.0,
            level in any_level(),
            participants in 0u32..60,
            block_type in any_block_type(),
            room in any_room(),
        ) {
            let cfg = three_questions();
            let a = estimate_block_time(base, level, participants, block_type, room, Some(&cfg));
            let b = estimate_block_time(base, level, participants, block_type, room, Some(&cfg));
            prop_assert_eq!(a.total.to_bits(), b.total.to_bits());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn overhead_and_interaction_are_non_negative(
            participants in 0u32..200,
            block_type in any_block_type(),
            room in any_room(),
        ) {
            let cfg = QuestionConfig::default();
            prop_assert!(calculate_overhead(participants, block_type, room) >= 0.5);
            prop_assert!(calculate_interaction_minutes(Some(&cfg), participants) >= 0.0);
        }
    }
}
