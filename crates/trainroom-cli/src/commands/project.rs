//! Project file commands for CLI.

use clap::Subcommand;
use std::path::{Path, PathBuf};
use trainroom_core::{
    AgendaBlock, BlockType, Catalog, ClockTime, Config, ExperienceLevel, Project, RoomTemplate,
};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project file
    New {
        /// Project file to write
        file: PathBuf,
        /// Training title
        #[arg(long)]
        title: String,
        /// Number of participants
        #[arg(long)]
        participants: Option<u32>,
        /// Experience level (novice, mixed, advanced)
        #[arg(long)]
        level: Option<ExperienceLevel>,
        /// Room template
        #[arg(long)]
        room: Option<RoomTemplate>,
        /// Start time as HH:MM
        #[arg(long)]
        start: Option<ClockTime>,
    },
    /// Check that a project file imports cleanly
    Validate {
        file: PathBuf,
    },
    /// Recompute block estimates and save
    Recompute {
        file: PathBuf,
    },
    /// Print the agenda walkthrough
    Timeline {
        file: PathBuf,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Append a block to the agenda
    AddBlock {
        file: PathBuf,
        /// Block type
        #[arg(long = "type", value_name = "TYPE")]
        block_type: BlockType,
        /// Block window in minutes
        #[arg(long)]
        window: f64,
        /// Block title (defaults to the block type name)
        #[arg(long)]
        title: Option<String>,
        /// Manually entered question (repeatable)
        #[arg(long = "question", value_name = "TEXT")]
        questions: Vec<String>,
    },
    /// Assign an exercise to a block
    Assign {
        file: PathBuf,
        /// Block ID
        block_id: String,
        /// Exercise ID
        exercise_id: String,
    },
    /// Remove a block
    RemoveBlock {
        file: PathBuf,
        /// Block ID
        block_id: String,
    },
    /// Move a block to a new position (0-based)
    MoveBlock {
        file: PathBuf,
        from: usize,
        to: usize,
    },
}

fn save_recomputed(
    mut project: Project,
    catalog: &Catalog,
    path: &Path,
) -> Result<Project, Box<dyn std::error::Error>> {
    project.recompute(catalog.exercises());
    project.save(path)?;
    tracing::debug!(path = %path.display(), blocks = project.blocks.len(), "project saved");
    Ok(project)
}

pub fn run(action: ProjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        ProjectAction::New {
            file,
            title,
            participants,
            level,
            room,
            start,
        } => {
            let defaults = &config.defaults;
            let mut project = Project::new(title, participants.unwrap_or(defaults.participant_count));
            project.experience_level = level.unwrap_or(defaults.experience_level);
            project.start_time = start.unwrap_or(defaults.start_time);
            project.room = defaults.room();
            if let Some(template) = room {
                project.room.template = template;
            }
            project.save(&file)?;
            println!("Project created: {}", project.id);
        }
        ProjectAction::Validate { file } => {
            let project = Project::load(&file)?;
            println!(
                "ok: {} ({} blocks, {} participants)",
                project.title,
                project.blocks.len(),
                project.participant_count
            );
        }
        ProjectAction::Recompute { file } => {
            let catalog = config.catalog()?;
            let project = save_recomputed(Project::load(&file)?, &catalog, &file)?;
            let over = project
                .blocks
                .iter()
                .filter(|b| b.fits_in_window == Some(false))
                .count();
            println!("{} blocks recomputed, {} over their window", project.blocks.len(), over);
        }
        ProjectAction::Timeline { file, json } => {
            let timeline = Project::load(&file)?.timeline();
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
                return Ok(());
            }
            for entry in &timeline.entries {
                let flag = if entry.fits_in_window { "" } else { "  (over)" };
                println!(
                    "{}-{}  {:<28} {:>5.1} / {} min{flag}",
                    entry.start, entry.end, entry.title, entry.estimated_minutes, entry.window_minutes
                );
            }
            println!(
                "Planned end {} | estimated end {} | drift {:+.1} min",
                timeline.planned_end, timeline.estimated_end, timeline.drift_minutes
            );
        }
        ProjectAction::AddBlock {
            file,
            block_type,
            window,
            title,
            questions,
        } => {
            let catalog = config.catalog()?;
            let mut project = Project::load(&file)?;
            let title = title.unwrap_or_else(|| block_type.display_name().to_string());
            let mut block = AgendaBlock::new(block_type, title, window);
            if !questions.is_empty() {
                let mut question_config = config.questions.clone();
                question_config.questions = questions;
                block = block.with_question_config(question_config);
            }
            let id = project.add_block(block);
            save_recomputed(project, &catalog, &file)?;
            println!("{id}");
        }
        ProjectAction::Assign {
            file,
            block_id,
            exercise_id,
        } => {
            let catalog = config.catalog()?;
            let exercise = catalog
                .find(&exercise_id)
                .ok_or_else(|| format!("exercise not found: {exercise_id}"))?;
            let mut project = Project::load(&file)?;
            let fit = project.assign_exercise(&block_id, exercise)?;
            save_recomputed(project, &catalog, &file)?;
            match fit.reason {
                None => println!("Assigned {}.", exercise.title),
                Some(reason) => println!("Assigned {}, but it does not fit: {reason}", exercise.title),
            }
        }
        ProjectAction::RemoveBlock { file, block_id } => {
            let catalog = config.catalog()?;
            let mut project = Project::load(&file)?;
            let removed = project.remove_block(&block_id)?;
            save_recomputed(project, &catalog, &file)?;
            println!("Removed {}.", removed.title);
        }
        ProjectAction::MoveBlock { file, from, to } => {
            let catalog = config.catalog()?;
            let mut project = Project::load(&file)?;
            project.move_block(from, to)?;
            save_recomputed(project, &catalog, &file)?;
            println!("ok");
        }
    }
    Ok(())
}
