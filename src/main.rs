//! Proctor scheduling CLI.
//!
//! Reads an exam book and an availability sheet, assigns proctors and
//! writes the assignment and schedule tables.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use proctor_schedule::availability::AvailabilityRegistry;
use proctor_schedule::io::{load_availability, write_assignments, write_schedule, ExamBook};
use proctor_schedule::scheduler::LoadKpi;
use proctor_schedule::validation::validate_input;
use proctor_schedule::{logging, ProctorScheduler, SchedulerConfig};

#[derive(Parser)]
#[command(name = "proctor-schedule")]
#[command(about = "Assign exam proctors with a greedy load-balanced heuristic")]
struct Cli {
    /// Exam book CSV (CourseCode, Day, Time, Room, Section, Type, Active)
    #[arg(long)]
    exam_book: PathBuf,

    /// Availability CSV (Name, Dept, Session, one column per day)
    #[arg(long)]
    availability: PathBuf,

    /// Scheduler config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file for the assignment table (stdout if omitted)
    #[arg(long)]
    assignments_out: Option<PathBuf>,

    /// Output file for the schedule table (stdout if omitted)
    #[arg(long)]
    schedule_out: Option<PathBuf>,

    /// Only run input validation
    #[arg(long)]
    validate_only: bool,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SchedulerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SchedulerConfig::default(),
    };

    let book = ExamBook::from_path(&cli.exam_book)
        .with_context(|| format!("reading exam book {}", cli.exam_book.display()))?;
    let registry: AvailabilityRegistry = load_availability(&cli.availability)
        .with_context(|| format!("reading availability {}", cli.availability.display()))?;

    let scheduler = ProctorScheduler::with_config(config);
    let holding_sections = &scheduler.config().holding_sections;
    let sessions = book.active_sessions(holding_sections);

    if let Err(errors) = validate_input(&sessions, &registry, holding_sections) {
        for e in &errors {
            warn!(kind = ?e.kind, "{}", e.message);
        }
        if cli.validate_only {
            bail!("{} validation issue(s)", errors.len());
        }
    } else if cli.validate_only {
        info!("input is valid");
        return Ok(());
    }

    let plan = scheduler
        .run(&sessions, &registry)
        .context("scheduling proctors")?;

    let kpi = LoadKpi::calculate(&plan.run);
    info!(
        assignments = plan.run.assignment_count(),
        staff = kpi.load_by_staff.len(),
        max_load = kpi.max_load,
        min_load = kpi.min_load,
        spread = kpi.spread,
        "schedule ready"
    );

    write_assignments(open_output(cli.assignments_out.as_deref())?, &plan.run)
        .context("writing assignments")?;
    write_schedule(open_output(cli.schedule_out.as_deref())?, &plan.schedule)
        .context("writing schedule")?;

    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        ),
        None => Box::new(io::stdout()),
    })
}
