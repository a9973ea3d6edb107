//! # Trainroom Core Library
//!
//! This library provides the calculation core of the Trainroom training day
//! planner. Every operation is available through the standalone CLI binary;
//! any GUI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Time Estimation Engine**: realistic block duration from base minutes,
//!   group experience, logistics overhead and question time
//! - **Exercise Fit Engine**: hard-constraint filtering of the exercise
//!   catalog, weighted scoring and ranked recommendations
//! - **Project**: agenda editing, recomputation, walkthrough timeline and
//!   JSON import/export
//! - **Storage**: TOML-based configuration of planning defaults
//!
//! Both engines are pure and infallible: constraint failures are data
//! ([`FitResult::reason`]), not errors.
//!
//! ## Key Components
//!
//! - [`estimate_block_time`]: duration breakdown for one block
//! - [`check_exercise_fit`] / [`get_recommendations`]: exercise selection
//! - [`Project`]: a planned training day
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod clock;
pub mod error;
pub mod estimate;
pub mod fit;
pub mod model;
pub mod project;
pub mod storage;

pub use catalog::{builtin_exercises, exercises_for, find_exercise, Catalog, Exercise};
pub use clock::{format_minutes_to_time, ClockTime};
pub use error::{CatalogError, ConfigError, CoreError, ImportError, ValidationError};
pub use estimate::{
    calculate_experience_modifier, calculate_interaction_minutes, calculate_overhead,
    estimate_block_time, get_suggested_question_count, TimeEstimate,
};
pub use fit::{
    check_exercise_fit, get_quick_alternatives, get_quick_alternatives_from, get_recommendations,
    get_recommendations_from, score_exercise, FitResult, PickKind, Recommendation, ScoreBreakdown,
    ScoreTerm,
};
pub use model::{
    AgendaBlock, BlockType, Dynamics, ExperienceLevel, QuestionConfig, RequiredAssets, RoomAssets,
    RoomLayout, RoomTemplate,
};
pub use project::{Project, Timeline, TimelineEntry, SCHEMA_VERSION};
pub use storage::{Config, DefaultsConfig};
