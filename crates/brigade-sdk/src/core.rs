//! Core API resources: projects, events, workers, and jobs.

use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

/// Lifecycle phase of an event's worker.
///
/// The wire representation is SCREAMING_SNAKE (e.g. `"SCHEDULING_FAILED"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerPhase {
    Aborted,
    Canceled,
    Failed,
    Pending,
    Running,
    SchedulingFailed,
    Starting,
    Succeeded,
    TimedOut,
    #[default]
    #[serde(other)]
    Unknown,
}

impl WorkerPhase {
    /// The full, ordered set of worker phases.
    pub fn all() -> &'static [WorkerPhase] {
        &[
            WorkerPhase::Aborted,
            WorkerPhase::Canceled,
            WorkerPhase::Failed,
            WorkerPhase::Pending,
            WorkerPhase::Running,
            WorkerPhase::SchedulingFailed,
            WorkerPhase::Starting,
            WorkerPhase::Succeeded,
            WorkerPhase::TimedOut,
            WorkerPhase::Unknown,
        ]
    }

    /// Wire representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerPhase::Aborted => "ABORTED",
            WorkerPhase::Canceled => "CANCELED",
            WorkerPhase::Failed => "FAILED",
            WorkerPhase::Pending => "PENDING",
            WorkerPhase::Running => "RUNNING",
            WorkerPhase::SchedulingFailed => "SCHEDULING_FAILED",
            WorkerPhase::Starting => "STARTING",
            WorkerPhase::Succeeded => "SUCCEEDED",
            WorkerPhase::TimedOut => "TIMED_OUT",
            WorkerPhase::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase of a single job within a worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobPhase {
    Aborted,
    Canceled,
    Failed,
    Pending,
    Running,
    SchedulingFailed,
    Starting,
    Succeeded,
    TimedOut,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A project: a repository of event-handling configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Observed status of a job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(default)]
    pub phase: JobPhase,
}

/// A single job executed by a worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: JobStatus,
}

/// Observed status of a worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatus {
    #[serde(default)]
    pub phase: WorkerPhase,
}

/// The worker that handles a single event, along with its jobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    #[serde(default)]
    pub status: WorkerStatus,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// An event: one unit of work dispatched to a project's worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub worker: Worker,
}

/// Filter criteria for listing projects. Currently no fields; the API
/// accepts only an unfiltered listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsSelector {}

/// Filter criteria for listing events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsSelector {
    /// Restrict results to events whose worker is in one of these phases.
    pub worker_phases: Vec<WorkerPhase>,
}
