//! Exercise catalog.
//!
//! The built-in catalog is a fixed list of 30 training activities, built
//! once and shared read-only. Trainers who keep their own list can load a
//! TOML catalog instead:
//!
//! ```toml
//! [[exercise]]
//! id = "pairs-interview"
//! title = "Pair interviews"
//! type = "pairs"
//! time_range_min = 15
//! time_range_max = 25
//! participant_range_min = 2
//! participant_range_max = 30
//! dynamics = "medium"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::CatalogError;
use crate::model::{BlockType, Dynamics, RequiredAssets};

/// A reusable training activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub time_range_min: f64,
    pub time_range_max: f64,
    pub participant_range_min: u32,
    pub participant_range_max: u32,
    #[serde(default)]
    pub required_assets: RequiredAssets,
    pub dynamics: Dynamics,
    #[serde(default)]
    pub description: String,
}

impl Exercise {
    /// Whether `participant_count` lies inside the inclusive participant range.
    pub fn accepts_participants(&self, participant_count: u32) -> bool {
        (self.participant_range_min..=self.participant_range_max).contains(&participant_count)
    }
}

/// A validated list of exercises.
///
/// Only [`Catalog::new`] builds one; parsing goes through [`RawCatalog`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    #[serde(rename = "exercise")]
    exercises: Vec<Exercise>,
}

/// Unvalidated shape of a TOML catalog file.
#[derive(Deserialize)]
struct RawCatalog {
    #[serde(rename = "exercise")]
    exercises: Vec<Exercise>,
}

impl Catalog {
    /// Validate and wrap a list of exercises.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, ids repeat, or a range is inverted.
    pub fn new(exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        if exercises.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for ex in &exercises {
            if !seen.insert(ex.id.as_str()) {
                return Err(CatalogError::DuplicateId(ex.id.clone()));
            }
            if ex.time_range_min > ex.time_range_max {
                return Err(CatalogError::InvertedRange {
                    id: ex.id.clone(),
                    field: "time_range",
                });
            }
            if ex.participant_range_min > ex.participant_range_max {
                return Err(CatalogError::InvertedRange {
                    id: ex.id.clone(),
                    field: "participant_range",
                });
            }
        }

        Ok(Self { exercises })
    }

    /// The built-in catalog as an owned value.
    pub fn builtin() -> Self {
        Self {
            exercises: builtin_exercises().to_vec(),
        }
    }

    /// Parse a catalog from TOML `[[exercise]]` tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the catalog fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(content)?;
        Self::new(raw.exercises)
    }

    /// Load a TOML catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            count = catalog.exercises.len(),
            "loaded exercise catalog"
        );
        Ok(catalog)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn find(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

/// The fixed built-in exercise catalog.
pub fn builtin_exercises() -> &'static [Exercise] {
    static CATALOG: OnceLock<Vec<Exercise>> = OnceLock::new();
    CATALOG.get_or_init(build_builtin)
}

/// Find a built-in exercise by id.
pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    builtin_exercises().iter().find(|e| e.id == id)
}

/// Built-in exercises of one block type, in catalog order.
pub fn exercises_for(block_type: BlockType) -> impl Iterator<Item = &'static Exercise> {
    builtin_exercises()
        .iter()
        .filter(move |e| e.block_type == block_type)
}

// ============================================================================
// BUILT-IN EXERCISES
// ============================================================================

const NO_ASSETS: RequiredAssets = RequiredAssets {
    tables: false,
    flipchart_count: 0,
    screen: false,
};
const TABLES: RequiredAssets = RequiredAssets {
    tables: true,
    flipchart_count: 0,
    screen: false,
};
const SCREEN: RequiredAssets = RequiredAssets {
    tables: false,
    flipchart_count: 0,
    screen: true,
};

const fn flipcharts(count: u32) -> RequiredAssets {
    RequiredAssets {
        tables: false,
        flipchart_count: count,
        screen: false,
    }
}

const fn tables_and_flipcharts(count: u32) -> RequiredAssets {
    RequiredAssets {
        tables: true,
        flipchart_count: count,
        screen: false,
    }
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: &str,
    title: &str,
    block_type: BlockType,
    time_range: (f64, f64),
    participant_range: (u32, u32),
    required_assets: RequiredAssets,
    dynamics: Dynamics,
    description: &str,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        title: title.to_string(),
        block_type,
        time_range_min: time_range.0,
        time_range_max: time_range.1,
        participant_range_min: participant_range.0,
        participant_range_max: participant_range.1,
        required_assets,
        dynamics,
        description: description.to_string(),
    }
}

#[rustfmt::skip]
fn build_builtin() -> Vec<Exercise> {
    use BlockType::*;
    use Dynamics::*;

    vec![
        // Opening + questions
        exercise("opening-expectations", "Expectations round", OpeningQuestions, (10.0, 20.0), (4, 20), NO_ASSETS, Low,
            "Each participant names one expectation and one concern for the day."),
        exercise("opening-sticky-questions", "Sticky-note questions", OpeningQuestions, (15.0, 25.0), (6, 30), flipcharts(1), Medium,
            "Participants post questions on a flipchart; the trainer clusters and answers them."),
        exercise("opening-line-up", "Experience line-up", OpeningQuestions, (10.0, 15.0), (8, 40), NO_ASSETS, High,
            "The group lines up by years of experience and shares why they came."),
        // Lecture
        exercise("lecture-mini", "Mini lecture", Lecture, (10.0, 20.0), (1, 100), SCREEN, Low,
            "Short slide-supported input on a single concept."),
        exercise("lecture-chalk-talk", "Chalk talk", Lecture, (15.0, 30.0), (1, 40), flipcharts(1), Low,
            "Concept built up live on a flipchart with questions from the room."),
        // Group work
        exercise("groups-world-cafe", "World café", Groups, (30.0, 45.0), (12, 40), tables_and_flipcharts(3), Medium,
            "Table hosts stay, groups rotate through three questions."),
        exercise("groups-case-clinic", "Case clinic", Groups, (25.0, 40.0), (6, 24), TABLES, Medium,
            "Groups of four take turns presenting a real problem to peers."),
        exercise("groups-poster", "Poster session", Groups, (20.0, 30.0), (6, 30), flipcharts(2), High,
            "Groups summarise a topic on a poster and present in a gallery walk."),
        exercise("groups-fishbowl", "Fishbowl", Groups, (20.0, 35.0), (10, 30), NO_ASSETS, Medium,
            "Inner circle discusses while the outer circle observes, then swap."),
        // Pair work
        exercise("pairs-interview", "Pair interviews", Pairs, (15.0, 25.0), (2, 30), NO_ASSETS, Medium,
            "Partners interview each other with a prepared question set."),
        exercise("pairs-peer-coaching", "Peer coaching", Pairs, (20.0, 30.0), (4, 24), NO_ASSETS, Medium,
            "One partner coaches, the other works on a live challenge, then switch."),
        exercise("pairs-role-play", "Role play in pairs", Pairs, (20.0, 35.0), (4, 20), TABLES, High,
            "Scripted conversation practice with observer notes."),
        exercise("pairs-feedback-walk", "Feedback walk", Pairs, (10.0, 15.0), (2, 40), NO_ASSETS, High,
            "Partners walk and exchange feedback on the morning's work."),
        exercise("pairs-mind-map", "Pair mind maps", Pairs, (15.0, 20.0), (4, 16), flipcharts(2), Medium,
            "Pairs build a mind map of the topic on shared flipcharts."),
        // Workbook
        exercise("workbook-reflection", "Reflection sheet", Workbook, (10.0, 15.0), (1, 40), TABLES, Low,
            "Individual written reflection with guiding prompts."),
        exercise("workbook-action-plan", "Action plan", Workbook, (15.0, 25.0), (1, 30), TABLES, Low,
            "Participants draft three concrete actions for the next month."),
        // Video + debrief
        exercise("video-case-clip", "Case clip debrief", VideoDebrief, (15.0, 25.0), (4, 40), SCREEN, Low,
            "Short workplace clip followed by guided debrief questions."),
        exercise("video-ted-talk", "Talk and discuss", VideoDebrief, (25.0, 40.0), (4, 60), SCREEN, Low,
            "Recorded talk with a structured plenary debrief."),
        // Energizer
        exercise("energizer-count-up", "Count to twenty", Energizer, (3.0, 5.0), (6, 30), NO_ASSETS, High,
            "Group counts to twenty, one voice at a time, restarting on collisions."),
        exercise("energizer-stretch", "Stand and stretch", Energizer, (2.0, 4.0), (1, 100), NO_ASSETS, Medium,
            "Guided stretching break."),
        exercise("energizer-two-truths", "Two truths and a lie", Energizer, (8.0, 12.0), (4, 20), NO_ASSETS, High,
            "Each person shares three statements; the group guesses the lie."),
        exercise("energizer-zip-zap", "Zip zap boing", Energizer, (5.0, 8.0), (8, 25), NO_ASSETS, High,
            "Fast-paced circle game passing a clap around."),
        // Discussion
        exercise("discussion-plenary", "Plenary discussion", Discussion, (15.0, 30.0), (4, 30), NO_ASSETS, Medium,
            "Moderated whole-group discussion on a leading question."),
        exercise("discussion-buzz-groups", "Buzz groups", Discussion, (10.0, 15.0), (6, 60), NO_ASSETS, Medium,
            "Neighbours discuss for five minutes, then report one insight."),
        exercise("discussion-four-corners", "Four corners", Discussion, (10.0, 20.0), (8, 40), flipcharts(4), High,
            "Participants pick the corner matching their opinion and defend it."),
        // Case study
        exercise("case-study-classic", "Written case study", CaseStudy, (40.0, 60.0), (4, 30), tables_and_flipcharts(1), Medium,
            "Groups analyse a written case and present recommendations."),
        exercise("case-study-live", "Live case", CaseStudy, (30.0, 45.0), (6, 24), TABLES, Medium,
            "A participant's current challenge is analysed as a case by the group."),
        // Break
        exercise("break-coffee", "Coffee break", Break, (10.0, 20.0), (1, 100), NO_ASSETS, Low,
            "Unstructured break with refreshments."),
        // Summary
        exercise("summary-one-word", "One-word close", Summary, (5.0, 10.0), (1, 40), NO_ASSETS, Low,
            "Everyone closes the day with one word."),
        exercise("summary-gallery", "Takeaway gallery", Summary, (10.0, 20.0), (6, 30), flipcharts(2), Medium,
            "Participants write takeaways on flipcharts and walk the gallery."),
    ]
}
