/// `cachegate check` command implementation
///
/// Loads a task manifest, resolves cacheability for every task and prints one
/// line per task followed by a per-category summary.
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use cachegate::cacheability::{CachingSummary, DefaultTaskCacheabilityResolver};
use cachegate::config::CachegateConfig;
use cachegate::paths::RelativeFilePathResolver;
use cachegate::task::{parse_manifest, resolve_tasks, TaskDefinition, TaskOutcome};

use crate::cli::{CheckArgs, OutputFormat};

/// Effective settings after merging CLI flags over configuration
#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckSettings {
    manifest: PathBuf,
    tasks: Vec<String>,
    format: OutputFormat,
    jobs: usize,
    root: Option<PathBuf>,
    fail_on_disabled: bool,
}

impl CheckSettings {
    fn merge(args: &CheckArgs, config: &CachegateConfig) -> Self {
        let format = args.format.unwrap_or(config.check.format);

        let jobs = match args.jobs.unwrap_or(config.check.jobs) {
            0 => num_cpus::get(),
            n => n,
        };

        Self {
            manifest: PathBuf::from(
                args.manifest
                    .as_deref()
                    .unwrap_or(config.check.manifest.as_str()),
            ),
            tasks: args.tasks.clone(),
            format,
            jobs,
            root: args
                .root
                .as_deref()
                .or(config.workspace.root.as_deref())
                .map(PathBuf::from),
            fail_on_disabled: args.fail_on_disabled || config.check.fail_on_disabled,
        }
    }
}

#[derive(Serialize)]
struct CheckReport<'a> {
    tasks: &'a [TaskOutcome],
    summary: &'a CachingSummary,
}

pub fn run(args: &CheckArgs, config: &CachegateConfig) -> Result<()> {
    let settings = CheckSettings::merge(args, config);

    let tasks = parse_manifest(&settings.manifest)?;
    let tasks = select_tasks(tasks, &settings.tasks)?;

    let path_resolver = match &settings.root {
        Some(root) => RelativeFilePathResolver::new(
            std::path::absolute(root)
                .with_context(|| format!("Failed to resolve workspace root: {}", root.display()))?,
        ),
        None => RelativeFilePathResolver::from_current_dir(),
    };
    let resolver = DefaultTaskCacheabilityResolver::new(path_resolver);

    info!(
        manifest = %settings.manifest.display(),
        tasks = tasks.len(),
        jobs = settings.jobs,
        "resolving task cacheability"
    );

    let outcomes = resolve_tasks(&tasks, &resolver, settings.jobs);

    let mut summary = CachingSummary::new();
    for outcome in &outcomes {
        summary.record(outcome.reason.as_ref());
    }

    match settings.format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                println!("{}", format_outcome(outcome));
            }
            println!();
            print!("{}", summary);
        }
        OutputFormat::Json => {
            let report = CheckReport {
                tasks: &outcomes,
                summary: &summary,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize results")?
            );
        }
    }

    if settings.fail_on_disabled && summary.disabled() > 0 {
        warn!(
            disabled = summary.disabled(),
            "tasks not cacheable and --fail-on-disabled set"
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Keep only the requested tasks, in manifest order
fn select_tasks(tasks: Vec<TaskDefinition>, names: &[String]) -> Result<Vec<TaskDefinition>> {
    if names.is_empty() {
        return Ok(tasks);
    }

    if let Some(missing) = names
        .iter()
        .find(|name| !tasks.iter().any(|task| task.name() == name.as_str()))
    {
        bail!("Task not found in manifest: {}", missing);
    }

    Ok(tasks
        .into_iter()
        .filter(|task| names.iter().any(|name| name == task.name()))
        .collect())
}

fn format_outcome(outcome: &TaskOutcome) -> String {
    match &outcome.reason {
        None => format!("{}: cacheable", outcome.task),
        Some(reason) => format!(
            "{}: not cacheable [{}] {}",
            outcome.task,
            reason.category(),
            reason.message()
        ),
    }
}
