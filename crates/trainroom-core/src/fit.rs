//! Exercise fit and recommendation engine.
//!
//! ## Hard filters
//!
//! [`check_exercise_fit`] runs a short-circuiting pipeline: participant
//! range, tables, flipcharts, screen, then a projected estimate against
//! the block window. Each failure carries a reason meant for the trainer.
//!
//! ## Scoring
//!
//! Surviving candidates are scored with a fixed weighted sum:
//!
//! | Term | Weight | Score |
//! |------|--------|-------|
//! | time_fit | 0.4 | estimated / window |
//! | participant_match | 0.3 | closeness to the range midpoint |
//! | asset_match | 0.2 | `1 − 0.1 × asset demand` |
//! | dynamics | 0.1 | constant 1 |
//!
//! ## Ranking
//!
//! The top three are main picks. Up to two rescue picks follow, preferring
//! exercises that are short relative to the window.

use serde::{Deserialize, Serialize};

use crate::catalog::{builtin_exercises, Exercise};
use crate::estimate::estimate_block_time;
use crate::model::{AgendaBlock, ExperienceLevel, RoomLayout};

/// Number of main picks returned by [`get_recommendations`].
pub const MAIN_PICKS: usize = 3;
/// Number of rescue picks returned by [`get_recommendations`].
pub const RESCUE_PICKS: usize = 2;
/// An exercise is "short" when its upper duration is below this share of the window.
pub const RESCUE_WINDOW_RATIO: f64 = 0.7;

/// Outcome of checking one exercise against a block and room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub exercise_id: String,
    pub fits: bool,
    /// Why the exercise was rejected; `None` when it fits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Projected duration; present once the asset checks have passed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<f64>,
}

impl FitResult {
    fn rejected(exercise: &Exercise, reason: String, estimated_minutes: Option<f64>) -> Self {
        tracing::debug!(exercise = %exercise.id, %reason, "exercise rejected");
        Self {
            exercise_id: exercise.id.clone(),
            fits: false,
            reason: Some(reason),
            estimated_minutes,
        }
    }

    fn accepted(exercise: &Exercise, estimated_minutes: f64) -> Self {
        Self {
            exercise_id: exercise.id.clone(),
            fits: true,
            reason: None,
            estimated_minutes: Some(estimated_minutes),
        }
    }
}

/// Check an exercise against participant count, room assets and block window.
pub fn check_exercise_fit(
    exercise: &Exercise,
    block: &AgendaBlock,
    room: &RoomLayout,
    participant_count: u32,
    level: ExperienceLevel,
) -> FitResult {
    if !exercise.accepts_participants(participant_count) {
        return FitResult::rejected(
            exercise,
            format!(
                "Participant count {} is outside range {}-{}",
                participant_count, exercise.participant_range_min, exercise.participant_range_max
            ),
            None,
        );
    }

    let needs = &exercise.required_assets;
    let has = &room.assets;

    if needs.tables && !has.has_tables {
        return FitResult::rejected(
            exercise,
            "Requires tables, but the room has none".to_string(),
            None,
        );
    }

    if needs.flipchart_count > has.flipchart_count {
        return FitResult::rejected(
            exercise,
            format!(
                "Requires {} flipchart(s), but the room has {}",
                needs.flipchart_count, has.flipchart_count
            ),
            None,
        );
    }

    if needs.screen && !has.has_screen {
        return FitResult::rejected(
            exercise,
            "Requires a screen, but the room has none".to_string(),
            None,
        );
    }

    let estimate = estimate_block_time(
        exercise.time_range_max,
        level,
        participant_count,
        block.block_type,
        room.template,
        block.question_config.as_ref(),
    );

    if estimate.total > block.window_minutes {
        return FitResult::rejected(
            exercise,
            format!(
                "Estimated {:.1} min exceeds the {}-min window by {:.1} min",
                estimate.total,
                block.window_minutes,
                estimate.overage(block.window_minutes)
            ),
            Some(estimate.total),
        );
    }

    FitResult::accepted(exercise, estimate.total)
}

/// One weighted scoring term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTerm {
    pub name: String,
    pub weight: f64,
    /// Raw score in `[0, 1]`
    pub score: f64,
    pub contribution: f64,
}

impl ScoreTerm {
    fn new(name: &str, weight: f64, score: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
            score,
            contribution: weight * score,
        }
    }
}

/// Scoring breakdown for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub terms: Vec<ScoreTerm>,
    /// Weighted sum rounded to 2 decimal places
    pub total: f64,
}

impl ScoreBreakdown {
    fn from_terms(terms: Vec<ScoreTerm>) -> Self {
        let mut breakdown = Self { terms, total: 0.0 };
        breakdown.total = round2(breakdown.raw_total());
        breakdown
    }

    pub fn term(&self, name: &str) -> Option<&ScoreTerm> {
        self.terms.iter().find(|t| t.name == name)
    }

    /// Unrounded weighted sum, used for ranking.
    pub fn raw_total(&self) -> f64 {
        self.terms.iter().map(|t| t.contribution).sum()
    }
}

/// Weights of the scoring terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub time_fit: f64,
    pub participant_match: f64,
    pub asset_match: f64,
    pub dynamics: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            time_fit: 0.4,
            participant_match: 0.3,
            asset_match: 0.2,
            dynamics: 0.1,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of the window the estimate uses; zero when it overflows.
pub fn time_fit_score(estimated_minutes: f64, window_minutes: f64) -> f64 {
    let ratio = estimated_minutes / window_minutes;
    if ratio <= 1.0 {
        ratio
    } else {
        0.0
    }
}

/// Closeness of the participant count to the middle of the exercise's range.
pub fn participant_match_score(exercise: &Exercise, participant_count: u32) -> f64 {
    let min = f64::from(exercise.participant_range_min);
    let range = f64::from(exercise.participant_range_max) - min;
    if range == 0.0 {
        return 1.0;
    }
    let half = range / 2.0;
    let deviation = (f64::from(participant_count) - (min + half)).abs();
    (1.0 - deviation / half).clamp(0.0, 1.0)
}

/// Slight preference for exercises that demand fewer assets.
pub fn asset_match_score(exercise: &Exercise) -> f64 {
    let demand = f64::from(exercise.required_assets.asset_demand());
    (1.0 - 0.1 * demand).max(0.0)
}

/// Dynamics term. No cross-block variety is considered, so this is constant.
pub fn dynamics_score(_exercise: &Exercise) -> f64 {
    1.0
}

/// Score a candidate that already passed the hard filters.
pub fn score_exercise(
    exercise: &Exercise,
    estimated_minutes: f64,
    window_minutes: f64,
    participant_count: u32,
) -> ScoreBreakdown {
    let weights = ScoreWeights::default();
    ScoreBreakdown::from_terms(vec![
        ScoreTerm::new(
            "time_fit",
            weights.time_fit,
            time_fit_score(estimated_minutes, window_minutes),
        ),
        ScoreTerm::new(
            "participant_match",
            weights.participant_match,
            participant_match_score(exercise, participant_count),
        ),
        ScoreTerm::new("asset_match", weights.asset_match, asset_match_score(exercise)),
        ScoreTerm::new("dynamics", weights.dynamics, dynamics_score(exercise)),
    ])
}

/// Whether a recommendation is a main pick or a shorter rescue option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickKind {
    Main,
    Rescue,
}

/// A fitting exercise with its score and explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub exercise: Exercise,
    pub kind: PickKind,
    pub estimated_minutes: f64,
    /// Weighted score in `[0, 1]`, rounded to 2 decimal places
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub reason: String,
}

impl Recommendation {
    pub fn exercise_id(&self) -> &str {
        &self.exercise.id
    }
}

struct Candidate<'a> {
    exercise: &'a Exercise,
    estimated_minutes: f64,
    breakdown: ScoreBreakdown,
}

impl Candidate<'_> {
    fn is_short(&self, window_minutes: f64) -> bool {
        self.exercise.time_range_max < RESCUE_WINDOW_RATIO * window_minutes
    }

    fn into_recommendation(self, kind: PickKind, window_minutes: f64) -> Recommendation {
        let ex = self.exercise;
        let percentage = (self.estimated_minutes / window_minutes * 100.0).round();
        let reason = format!(
            "{} fills {}% of the {}-min window for {}-{} participants.",
            ex.title,
            percentage,
            window_minutes,
            ex.participant_range_min,
            ex.participant_range_max
        );
        Recommendation {
            exercise: ex.clone(),
            kind,
            estimated_minutes: self.estimated_minutes,
            score: self.breakdown.total,
            breakdown: self.breakdown,
            reason,
        }
    }
}

/// Fit and score every exercise matching the block type, best first.
///
/// Ranks on the unrounded score; exact ties keep catalog order.
fn ranked_candidates<'a, I>(
    exercises: I,
    block: &AgendaBlock,
    room: &RoomLayout,
    participant_count: u32,
    level: ExperienceLevel,
) -> Vec<Candidate<'a>>
where
    I: IntoIterator<Item = &'a Exercise>,
{
    let mut candidates: Vec<Candidate<'a>> = exercises
        .into_iter()
        .filter(|ex| ex.block_type == block.block_type)
        .filter_map(|ex| {
            let fit = check_exercise_fit(ex, block, room, participant_count, level);
            let estimated_minutes = fit.estimated_minutes.filter(|_| fit.fits)?;
            let breakdown =
                score_exercise(ex, estimated_minutes, block.window_minutes, participant_count);
            tracing::trace!(exercise = %ex.id, score = breakdown.total, "candidate scored");
            Some(Candidate {
                exercise: ex,
                estimated_minutes,
                breakdown,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.breakdown
            .raw_total()
            .partial_cmp(&a.breakdown.raw_total())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Recommend up to five exercises from the built-in catalog.
pub fn get_recommendations(
    block: &AgendaBlock,
    room: &RoomLayout,
    participant_count: u32,
    level: ExperienceLevel,
) -> Vec<Recommendation> {
    get_recommendations_from(builtin_exercises(), block, room, participant_count, level)
}

/// Recommend up to five exercises from `exercises`.
///
/// Returns three main picks by score followed by up to two rescue picks.
/// Rescue picks prefer short exercises and fall back to the best remaining
/// candidates when there are not enough short ones.
pub fn get_recommendations_from(
    exercises: &[Exercise],
    block: &AgendaBlock,
    room: &RoomLayout,
    participant_count: u32,
    level: ExperienceLevel,
) -> Vec<Recommendation> {
    let window = block.window_minutes;
    let mut remaining = ranked_candidates(exercises, block, room, participant_count, level);

    let split = remaining.len().min(MAIN_PICKS);
    let main: Vec<Candidate<'_>> = remaining.drain(..split).collect();

    let mut rescue = Vec::with_capacity(RESCUE_PICKS);
    let mut idx = 0;
    while rescue.len() < RESCUE_PICKS && idx < remaining.len() {
        if remaining[idx].is_short(window) {
            rescue.push(remaining.remove(idx));
        } else {
            idx += 1;
        }
    }
    while rescue.len() < RESCUE_PICKS && !remaining.is_empty() {
        rescue.push(remaining.remove(0));
    }

    tracing::debug!(
        block = %block.id,
        main = main.len(),
        rescue = rescue.len(),
        "recommendations ranked"
    );

    main.into_iter()
        .map(|c| c.into_recommendation(PickKind::Main, window))
        .chain(
            rescue
                .into_iter()
                .map(|c| c.into_recommendation(PickKind::Rescue, window)),
        )
        .collect()
}

/// Up to two shorter alternatives from the built-in catalog.
pub fn get_quick_alternatives(
    block: &AgendaBlock,
    room: &RoomLayout,
    participant_count: u32,
    level: ExperienceLevel,
) -> Vec<Recommendation> {
    get_quick_alternatives_from(builtin_exercises(), block, room, participant_count, level)
}

/// Up to two exercises from `exercises` whose upper duration is below 70% of the window.
pub fn get_quick_alternatives_from(
    exercises: &[Exercise],
    block: &AgendaBlock,
    room: &RoomLayout,
    participant_count: u32,
    level: ExperienceLevel,
) -> Vec<Recommendation> {
    let window = block.window_minutes;
    let short = exercises
        .iter()
        .filter(|ex| ex.time_range_max < RESCUE_WINDOW_RATIO * window);

    ranked_candidates(short, block, room, participant_count, level)
        .into_iter()
        .take(RESCUE_PICKS)
        .map(|c| c.into_recommendation(PickKind::Rescue, window))
        .collect()
}
