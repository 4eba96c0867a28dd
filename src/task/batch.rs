/// Resolve cacheability for many tasks on a worker pool
///
/// Results come back in task order regardless of which worker finished first.
use crossbeam_channel::{bounded, unbounded};
use serde::Serialize;
use std::thread;
use tracing::debug;

use super::TaskDefinition;
use crate::cacheability::{CachingDisabledReason, TaskCacheabilityResolver};

/// Cacheability decision for one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub task: String,
    pub cacheable: bool,
    pub reason: Option<CachingDisabledReason>,
}

fn resolve_one<R>(task: &TaskDefinition, resolver: &R) -> TaskOutcome
where
    R: TaskCacheabilityResolver<TaskDefinition>,
{
    let reason = resolver.should_disable_caching(&task.resolution_request());
    match &reason {
        Some(reason) => debug!(
            task = task.name(),
            category = %reason.category(),
            "task not cacheable"
        ),
        None => debug!(task = task.name(), "task cacheable"),
    }

    TaskOutcome {
        task: task.name().to_string(),
        cacheable: reason.is_none(),
        reason,
    }
}

/// Resolve every task using up to `jobs` worker threads
///
/// A panicking predicate propagates out of this call.
pub fn resolve_tasks<R>(tasks: &[TaskDefinition], resolver: &R, jobs: usize) -> Vec<TaskOutcome>
where
    R: TaskCacheabilityResolver<TaskDefinition> + Sync,
{
    let workers = jobs.clamp(1, tasks.len().max(1));
    if workers == 1 {
        return tasks.iter().map(|task| resolve_one(task, resolver)).collect();
    }

    let (job_sender, job_receiver) = bounded::<(usize, &TaskDefinition)>(workers * 2);
    let (result_sender, result_receiver) = unbounded::<(usize, TaskOutcome)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_receiver = job_receiver.clone();
            let result_sender = result_sender.clone();
            scope.spawn(move || {
                for (index, task) in job_receiver {
                    if result_sender.send((index, resolve_one(task, resolver))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_receiver);
        drop(result_sender);

        for job in tasks.iter().enumerate() {
            if job_sender.send(job).is_err() {
                break;
            }
        }
        drop(job_sender);
    });

    let mut ordered: Vec<Option<TaskOutcome>> = vec![None; tasks.len()];
    for (index, outcome) in result_receiver {
        ordered[index] = Some(outcome);
    }
    ordered.into_iter().flatten().collect()
}
