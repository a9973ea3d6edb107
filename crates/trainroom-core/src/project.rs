//! Training day project: agenda editing, recomputation, walkthrough timeline
//! and JSON import/export.
//!
//! Computed block fields (`estimated_minutes`, `fits_in_window`) are never
//! authoritative. Call [`Project::recompute`] after any change to blocks,
//! participant count, experience level or room.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::catalog::Exercise;
use crate::clock::{format_minutes_to_time, ClockTime};
use crate::error::{ImportError, Result, ValidationError};
use crate::estimate::estimate_block_time;
use crate::fit::{check_exercise_fit, FitResult};
use crate::model::{AgendaBlock, ExperienceLevel, RoomLayout, RoomTemplate};

/// Current project document schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// A planned training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub schema_version: u32,
    pub title: String,
    pub participant_count: u32,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub start_time: ClockTime,
    pub room: RoomLayout,
    pub blocks: Vec<AgendaBlock>,
}

impl Project {
    pub fn new(title: impl Into<String>, participant_count: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            schema_version: SCHEMA_VERSION,
            title: title.into(),
            participant_count,
            experience_level: ExperienceLevel::default(),
            start_time: ClockTime::from_hm(9, 0).unwrap_or_default(),
            room: RoomLayout::default(),
            blocks: Vec::new(),
        }
    }

    fn renumber(&mut self) {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            block.order = i as u32;
        }
    }

    fn block_index(&self, block_id: &str) -> std::result::Result<usize, ValidationError> {
        self.blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "block",
                id: block_id.to_string(),
            })
    }

    pub fn block(&self, block_id: &str) -> Option<&AgendaBlock> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Append a block and return its id.
    pub fn add_block(&mut self, block: AgendaBlock) -> String {
        let id = block.id.clone();
        self.blocks.push(block);
        self.renumber();
        id
    }

    /// Remove a block by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no block has this id.
    pub fn remove_block(&mut self, block_id: &str) -> std::result::Result<AgendaBlock, ValidationError> {
        let idx = self.block_index(block_id)?;
        let removed = self.blocks.remove(idx);
        self.renumber();
        Ok(removed)
    }

    /// Move the block at position `from` to position `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if either position is out of bounds.
    pub fn move_block(&mut self, from: usize, to: usize) -> std::result::Result<(), ValidationError> {
        let len = self.blocks.len();
        for index in [from, to] {
            if index >= len {
                return Err(ValidationError::OutOfBounds {
                    collection: "blocks".to_string(),
                    index,
                    len,
                });
            }
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.renumber();
        Ok(())
    }

    /// Assign an exercise to a block and refresh that block's estimate.
    ///
    /// The assignment is stored even when the exercise does not fit; the
    /// returned [`FitResult`] tells the trainer why.
    ///
    /// # Errors
    ///
    /// Returns an error if no block has this id.
    pub fn assign_exercise(
        &mut self,
        block_id: &str,
        exercise: &Exercise,
    ) -> std::result::Result<FitResult, ValidationError> {
        let idx = self.block_index(block_id)?;
        let fit = check_exercise_fit(
            exercise,
            &self.blocks[idx],
            &self.room,
            self.participant_count,
            self.experience_level,
        );

        let (participants, level, template) =
            (self.participant_count, self.experience_level, self.room.template);
        let block = &mut self.blocks[idx];
        block.exercise_id = Some(exercise.id.clone());
        refresh_block(block, exercise.time_range_max, participants, level, template);
        Ok(fit)
    }

    /// Recompute estimates for every block.
    ///
    /// Blocks with an exercise are estimated from the exercise's upper
    /// duration; other blocks from their own window.
    pub fn recompute(&mut self, exercises: &[Exercise]) {
        let (participants, level, template) =
            (self.participant_count, self.experience_level, self.room.template);

        for block in &mut self.blocks {
            let base = match block.exercise_id.as_deref() {
                Some(id) => match exercises.iter().find(|e| e.id == id) {
                    Some(ex) => ex.time_range_max,
                    None => {
                        tracing::warn!(block = %block.id, exercise = id, "unknown exercise, using window");
                        block.window_minutes
                    }
                },
                None => block.window_minutes,
            };
            refresh_block(block, base, participants, level, template);
        }

        tracing::debug!(project = %self.id, blocks = self.blocks.len(), "project recomputed");
    }

    /// Walk through the agenda from the start time.
    ///
    /// Blocks without a computed estimate advance the clock by their window.
    pub fn timeline(&self) -> Timeline {
        let mut entries = Vec::with_capacity(self.blocks.len());
        let mut elapsed = 0.0;
        let mut planned = 0.0;

        for block in &self.blocks {
            let minutes = block.estimated_minutes.unwrap_or(block.window_minutes);
            entries.push(TimelineEntry {
                block_id: block.id.clone(),
                title: block.title.clone(),
                start: format_minutes_to_time(elapsed, Some(self.start_time)),
                end: format_minutes_to_time(elapsed + minutes, Some(self.start_time)),
                window_minutes: block.window_minutes,
                estimated_minutes: minutes,
                fits_in_window: block.fits_in_window.unwrap_or(minutes <= block.window_minutes),
            });
            elapsed += minutes;
            planned += block.window_minutes;
        }

        Timeline {
            start: self.start_time.to_string(),
            planned_end: format_minutes_to_time(planned, Some(self.start_time)),
            estimated_end: format_minutes_to_time(elapsed, Some(self.start_time)),
            planned_minutes: planned,
            estimated_minutes: elapsed,
            drift_minutes: elapsed - planned,
            entries,
        }
    }

    /// Parse and validate a project document.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] describing the first problem found.
    pub fn from_json(content: &str) -> std::result::Result<Self, ImportError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
        validate_document(&value)?;
        serde_json::from_value(value).map_err(|e| ImportError::Malformed(e.to_string()))
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate a project file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Write the project to disk as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

fn refresh_block(
    block: &mut AgendaBlock,
    base_minutes: f64,
    participant_count: u32,
    level: ExperienceLevel,
    template: RoomTemplate,
) {
    let estimate = estimate_block_time(
        base_minutes,
        level,
        participant_count,
        block.block_type,
        template,
        block.question_config.as_ref(),
    );
    block.estimated_minutes = Some(estimate.total);
    block.fits_in_window = Some(estimate.total <= block.window_minutes);
}

fn validate_document(value: &Value) -> std::result::Result<(), ImportError> {
    let obj = value.as_object().ok_or(ImportError::NotAnObject)?;

    let field = |name: &'static str| obj.get(name).ok_or(ImportError::MissingField(name));
    let wrong = |field: &'static str, expected: &'static str| ImportError::WrongType { field, expected };

    if !field("id")?.is_string() {
        return Err(wrong("id", "a string"));
    }

    let version = field("schema_version")?
        .as_u64()
        .ok_or_else(|| wrong("schema_version", "a non-negative integer"))?;
    if version > u64::from(SCHEMA_VERSION) {
        return Err(ImportError::UnsupportedSchema {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    if !field("title")?.is_string() {
        return Err(wrong("title", "a string"));
    }
    if field("participant_count")?.as_u64().is_none() {
        return Err(wrong("participant_count", "a non-negative integer"));
    }
    if !field("blocks")?.is_array() {
        return Err(wrong("blocks", "an array"));
    }
    if !field("room")?.is_object() {
        return Err(wrong("room", "an object"));
    }

    Ok(())
}

/// One block on the walkthrough timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub block_id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub window_minutes: f64,
    pub estimated_minutes: f64,
    pub fits_in_window: bool,
}

/// Walkthrough of the agenda against the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub start: String,
    /// End of day if every block took exactly its window
    pub planned_end: String,
    /// End of day using estimated durations
    pub estimated_end: String,
    pub planned_minutes: f64,
    pub estimated_minutes: f64,
    /// Positive when the day runs long
    pub drift_minutes: f64,
    pub entries: Vec<TimelineEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_exercises, find_exercise};
    use crate::error::CoreError;
    use crate::model::BlockType;

    fn sample_project() -> Project {
        let mut project = Project::new("Feedback skills", 8);
        project.experience_level = ExperienceLevel::Advanced;
        project.add_block(AgendaBlock::new(BlockType::Lecture, "Intro", 20.0));
        project.add_block(AgendaBlock::new(BlockType::Pairs, "Practice", 40.0));
        project.add_block(AgendaBlock::new(BlockType::Break, "Coffee", 15.0));
        project
    }

    #[test]
    fn add_block_assigns_order() {
        let project = sample_project();
        let orders: Vec<u32> = project.blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn move_block_renumbers() {
        let mut project = sample_project();
        project.move_block(2, 0).unwrap();
        assert_eq!(project.blocks[0].title, "Coffee");
        assert_eq!(project.blocks[0].order, 0);
        assert_eq!(project.blocks[2].title, "Practice");
        assert_eq!(project.blocks[2].order, 2);
    }

    #[test]
    fn move_block_out_of_bounds() {
        let mut project = sample_project();
        let err = project.move_block(0, 3).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBounds { index: 3, len: 3, .. }));
    }

    #[test]
    fn remove_block_by_id() {
        let mut project = sample_project();
        let id = project.blocks[1].id.clone();
        let removed = project.remove_block(&id).unwrap();
        assert_eq!(removed.title, "Practice");
        assert_eq!(project.blocks.len(), 2);
        assert_eq!(project.blocks[1].order, 1);
        assert!(project.remove_block(&id).is_err());
    }

    #[test]
    fn assign_exercise_refreshes_estimate() {
        let mut project = sample_project();
        let id = project.blocks[1].id.clone();
        let exercise = find_exercise("pairs-interview").unwrap();

        let fit = project.assign_exercise(&id, exercise).unwrap();
        assert!(fit.fits);

        let block = project.block(&id).unwrap();
        assert_eq!(block.exercise_id.as_deref(), Some("pairs-interview"));
        assert!((block.estimated_minutes.unwrap() - 23.2).abs() < 1e-9);
        assert_eq!(block.fits_in_window, Some(true));
    }

    #[test]
    fn assign_exercise_unknown_block() {
        let mut project = sample_project();
        let exercise = find_exercise("pairs-interview").unwrap();
        assert!(matches!(
            project.assign_exercise("nope", exercise),
            Err(ValidationError::NotFound { kind: "block", .. })
        ));
    }

    #[test]
    fn recompute_uses_window_without_exercise() {
        let mut project = sample_project();
        project.recompute(builtin_exercises());
        // Lecture: 20 − 4 + 1
        let intro = &project.blocks[0];
        assert!((intro.estimated_minutes.unwrap() - 17.0).abs() < 1e-9);
        assert_eq!(intro.fits_in_window, Some(true));
    }

    #[test]
    fn recompute_falls_back_for_unknown_exercise() {
        let mut project = sample_project();
        project.experience_level = ExperienceLevel::Mixed;
        project.blocks[0].exercise_id = Some("retired-exercise".to_string());
        project.recompute(builtin_exercises());
        // 20 + 0 + 1 overhead
        assert_eq!(project.blocks[0].estimated_minutes, Some(21.0));
        assert_eq!(project.blocks[0].fits_in_window, Some(false));
    }

    #[test]
    fn timeline_chains_blocks_from_start() {
        let mut project = sample_project();
        project.recompute(builtin_exercises());
        let timeline = project.timeline();

        assert_eq!(timeline.start, "09:00");
        assert_eq!(timeline.entries[0].start, "09:00");
        assert_eq!(timeline.entries[0].end, "09:17");
        assert_eq!(timeline.entries[1].start, timeline.entries[0].end);
        assert_eq!(timeline.planned_end, "10:15");
        assert!(timeline.drift_minutes < 0.0);
    }

    #[test]
    fn timeline_without_estimates_uses_windows() {
        let project = sample_project();
        let timeline = project.timeline();
        assert_eq!(timeline.estimated_end, timeline.planned_end);
        assert_eq!(timeline.drift_minutes, 0.0);
        assert!(timeline.entries.iter().all(|e| e.fits_in_window));
    }

    #[test]
    fn timeline_survives_huge_windows() {
        let mut project = Project::new("Marathon", 8);
        project.add_block(AgendaBlock::new(BlockType::Lecture, "Endless", 1e15));
        let timeline = project.timeline();
        // 09:00 plus 640 min past whole days
        assert_eq!(timeline.entries[0].end, "19:40");
        assert_eq!(timeline.planned_end, "19:40");
    }

    #[test]
    fn json_round_trip_keeps_computed_fields() {
        let mut project = sample_project();
        project.recompute(builtin_exercises());
        let json = project.to_json_pretty().unwrap();
        let parsed = Project::from_json(&json).unwrap();
        assert_eq!(parsed, project);
    }

    #[test]
    fn import_rejects_invalid_json() {
        assert!(matches!(Project::from_json("{not json"), Err(ImportError::InvalidJson(_))));
        assert!(matches!(Project::from_json("[]"), Err(ImportError::NotAnObject)));
    }

    #[test]
    fn import_reports_missing_fields() {
        let mut doc = serde_json::to_value(sample_project()).unwrap();
        for name in ["id", "schema_version", "title", "participant_count", "blocks", "room"] {
            let mut broken = doc.clone();
            broken.as_object_mut().unwrap().remove(name);
            let err = Project::from_json(&broken.to_string()).unwrap_err();
            assert!(
                matches!(err, ImportError::MissingField(field) if field == name),
                "{name}: {err}"
            );
        }
        doc["blocks"] = serde_json::json!({});
        let err = Project::from_json(&doc.to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Field 'blocks' must be an array");
    }

    #[test]
    fn import_reports_wrong_types() {
        let mut doc = serde_json::to_value(sample_project()).unwrap();
        doc["room"] = serde_json::json!([]);
        assert!(matches!(
            Project::from_json(&doc.to_string()),
            Err(ImportError::WrongType { field: "room", .. })
        ));

        let mut doc = serde_json::to_value(sample_project()).unwrap();
        doc["participant_count"] = serde_json::json!(-3);
        assert!(matches!(
            Project::from_json(&doc.to_string()),
            Err(ImportError::WrongType { field: "participant_count", .. })
        ));
    }

    #[test]
    fn import_rejects_future_schema() {
        let mut doc = serde_json::to_value(sample_project()).unwrap();
        doc["schema_version"] = serde_json::json!(SCHEMA_VERSION + 1);
        assert!(matches!(
            Project::from_json(&doc.to_string()),
            Err(ImportError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn import_reports_malformed_blocks() {
        let mut doc = serde_json::to_value(sample_project()).unwrap();
        doc["blocks"][0]["type"] = serde_json::json!("yoga");
        assert!(matches!(
            Project::from_json(&doc.to_string()),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.json");
        let project = sample_project();
        project.save(&path).unwrap();
        assert_eq!(Project::load(&path).unwrap(), project);

        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            Project::load(&path),
            Err(CoreError::Import(ImportError::MissingField("id")))
        ));
    }
}
