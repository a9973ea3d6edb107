//! Integration tests for planning a full training day.

use trainroom_core::{
    builtin_exercises, find_exercise, format_minutes_to_time, get_recommendations, AgendaBlock,
    BlockType, ClockTime, ExperienceLevel, ImportError, Project, QuestionConfig,
};

fn training_day() -> Project {
    let mut project = Project::new("Giving feedback", 12);
    project.start_time = "09:00".parse().unwrap();

    let opening = AgendaBlock::new(BlockType::OpeningQuestions, "Welcome", 45.0)
        .with_question_config(QuestionConfig {
            questions: vec!["Q1".into(), "Q2".into(), "Q3".into()],
            ..QuestionConfig::default()
        });
    project.add_block(opening);
    project.add_block(AgendaBlock::new(BlockType::Lecture, "Feedback models", 30.0));
    project.add_block(AgendaBlock::new(BlockType::Pairs, "Practice", 40.0));
    project.add_block(AgendaBlock::new(BlockType::Break, "Coffee", 15.0));
    project
}

#[test]
fn test_plan_day_with_recommendations() {
    let mut project = training_day();
    let pairs_id = project.blocks[2].id.clone();

    let recs = {
        let block = project.block(&pairs_id).unwrap();
        get_recommendations(block, &project.room, project.participant_count, project.experience_level)
    };
    assert!(!recs.is_empty());

    let best = recs[0].exercise.clone();
    let fit = project.assign_exercise(&pairs_id, &best).unwrap();
    assert!(fit.fits);

    project.recompute(builtin_exercises());
    let block = project.block(&pairs_id).unwrap();
    assert_eq!(block.fits_in_window, Some(true));
    assert_eq!(block.estimated_minutes, fit.estimated_minutes);
}

#[test]
fn test_opening_questions_estimate() {
    let mut project = training_day();
    project.recompute(builtin_exercises());

    // 45 + 0 + 0.5 overhead + 10.5 question time
    let opening = &project.blocks[0];
    assert_eq!(opening.estimated_minutes, Some(56.0));
    assert_eq!(opening.fits_in_window, Some(false));
}

#[test]
fn test_timeline_walkthrough() {
    let mut project = training_day();
    let opening_id = project.blocks[0].id.clone();
    let expectations = find_exercise("opening-expectations").unwrap();
    project.assign_exercise(&opening_id, expectations).unwrap();
    project.recompute(builtin_exercises());

    let timeline = project.timeline();
    assert_eq!(timeline.entries.len(), 4);
    // 20 + 0.5 + 10.5 = 31 minutes of opening
    assert_eq!(timeline.entries[0].end, "09:31");
    assert_eq!(timeline.planned_end, "11:10");
    for pair in timeline.entries.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(
        timeline.estimated_end,
        format_minutes_to_time(timeline.estimated_minutes, Some(project.start_time))
    );
}

#[test]
fn test_level_change_requires_recompute() {
    let mut project = training_day();
    project.recompute(builtin_exercises());
    let mixed = project.blocks[1].estimated_minutes.unwrap();

    project.experience_level = ExperienceLevel::Novice;
    assert_eq!(project.blocks[1].estimated_minutes, Some(mixed));

    project.recompute(builtin_exercises());
    // Lecture 30: +6 minutes for novices
    assert_eq!(project.blocks[1].estimated_minutes, Some(mixed + 6.0));
}

#[test]
fn test_export_import_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training-day.json");

    let mut project = training_day();
    project.recompute(builtin_exercises());
    project.save(&path).unwrap();

    let loaded = Project::load(&path).unwrap();
    assert_eq!(loaded, project);
    assert_eq!(loaded.start_time, ClockTime::from_hm(9, 0).unwrap());
}

#[test]
fn test_import_error_messages() {
    let err = Project::from_json(r#"{"id": "x", "schema_version": 1}"#).unwrap_err();
    assert!(matches!(err, ImportError::MissingField("title")));
    assert_eq!(err.to_string(), "Missing required field 'title'");

    let err = Project::from_json(
        r#"{"id": 7, "schema_version": 1, "title": "t", "participant_count": 3, "blocks": [], "room": {}}"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Field 'id' must be a string");
}

#[test]
fn test_import_minimal_document() {
    let project = Project::from_json(
        r#"{"id": "p1", "schema_version": 1, "title": "Minimal", "participant_count": 6, "blocks": [], "room": {}}"#,
    )
    .unwrap();
    assert_eq!(project.title, "Minimal");
    assert_eq!(project.experience_level, ExperienceLevel::Mixed);
    assert_eq!(project.start_time.to_string(), "00:00");
    assert!(project.blocks.is_empty());
}
