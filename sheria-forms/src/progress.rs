use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const COMPLETE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TaskStatus {
    Open,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Completed,
}

/// The two task fields that keep each other in step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncedField {
    Status,
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskState {
    pub status: Option<TaskStatus>,
    pub progress: f64,
}

/// Settles the task after one of the two fields changed. When the rule writes
/// the complementary field, running it again for that write changes nothing,
/// so the write never needs to raise a change event of its own.
///
/// | changed  | condition                               | result                 |
/// |----------|-----------------------------------------|------------------------|
/// | progress | progress = 100, status ≠ Completed      | status = Completed     |
/// | progress | 0 < progress < 100, status = Open       | status = In Progress   |
/// | status   | status = Completed, progress ≠ 100      | progress = 100         |
/// | status   | status = Open, progress > 0             | progress = 0           |
pub fn transition(state: TaskState, changed: SyncedField) -> TaskState {
    let TaskState { status, progress } = state;

    match changed {
        SyncedField::Progress if progress == COMPLETE && status != Some(TaskStatus::Completed) => {
            TaskState {
                status: Some(TaskStatus::Completed),
                progress,
            }
        }
        SyncedField::Progress
            if progress > 0.0 && progress < COMPLETE && status == Some(TaskStatus::Open) =>
        {
            TaskState {
                status: Some(TaskStatus::InProgress),
                progress,
            }
        }
        SyncedField::Status if status == Some(TaskStatus::Completed) && progress != COMPLETE => {
            TaskState {
                status,
                progress: COMPLETE,
            }
        }
        SyncedField::Status if status == Some(TaskStatus::Open) && progress > 0.0 => TaskState {
            status,
            progress: 0.0,
        },
        _ => state,
    }
}
