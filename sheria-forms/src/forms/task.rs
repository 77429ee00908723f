use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    choice,
    progress::{transition, SyncedField, TaskState, TaskStatus, COMPLETE},
    Action, Alert, Button, Document, Effect, Effects, FieldError, FieldOf, FieldValue,
    FormContext, FormHandler,
};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub progress: f64,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TaskField {
    Name,
    Status,
    Progress,
    DueDate,
}

impl Document for Task {
    type Field = TaskField;

    fn get(&self, field: TaskField) -> FieldValue {
        match field {
            TaskField::Name => self.name.clone().into(),
            TaskField::Status => choice(self.status),
            TaskField::Progress => self.progress.into(),
            TaskField::DueDate => self.due_date.into(),
        }
    }

    fn set(&mut self, field: TaskField, value: FieldValue) -> Result<(), FieldError> {
        match field {
            TaskField::Name => self.name = value.into_text(field)?,
            TaskField::Status => self.status = value.into_choice(field)?,
            TaskField::Progress => self.progress = value.into_number(field)?.unwrap_or_default(),
            TaskField::DueDate => self.due_date = value.into_date(field)?,
        }
        Ok(())
    }
}

impl Task {
    fn state(&self) -> TaskState {
        TaskState {
            status: self.status,
            progress: self.progress,
        }
    }
}

pub struct TaskForm;

impl FormHandler for TaskForm {
    type Doc = Task;

    fn on_load(&self, doc: &Task, _ctx: &FormContext) -> Effects<Task> {
        let mut effects = vec![Effect::Progress {
            label: "Progress".to_string(),
            percent: doc.progress,
        }];

        match doc.status {
            Some(TaskStatus::Open | TaskStatus::InProgress) => {
                effects.push(Effect::AddButton(Button::new(Action::MarkComplete)))
            }
            Some(TaskStatus::Completed) => effects.push(Effect::AddButton(Button::new(Action::Reopen))),
            None => {}
        }

        effects
    }

    fn on_field_change(
        &self,
        doc: &Task,
        field: FieldOf<Task>,
        _value: &FieldValue,
        _ctx: &FormContext,
    ) -> Effects<Task> {
        let changed = match field {
            TaskField::Status => SyncedField::Status,
            TaskField::Progress => SyncedField::Progress,
            _ => return Vec::new(),
        };

        let before = doc.state();
        let after = transition(before, changed);

        let mut effects = Vec::new();
        if after.status != before.status {
            effects.push(Effect::set(TaskField::Status, choice(after.status)));
        }
        if after.progress != before.progress {
            effects.push(Effect::set(TaskField::Progress, after.progress));
        }
        effects
    }

    fn on_before_save(&self, doc: &Task, ctx: &FormContext) -> Effects<Task> {
        match doc.due_date {
            Some(due) if doc.is_new && due < ctx.today() => vec![Effect::Alert(Alert::info(
                "Due date is in the past. Consider updating the due date.",
            ))],
            _ => Vec::new(),
        }
    }

    fn on_action(&self, _doc: &Task, action: Action, _ctx: &FormContext) -> Effects<Task> {
        let (status, progress) = match action {
            Action::MarkComplete => (TaskStatus::Completed, COMPLETE),
            Action::Reopen => (TaskStatus::Open, 0.0),
            _ => return Vec::new(),
        };

        vec![
            Effect::set(TaskField::Status, status.to_string()),
            Effect::set(TaskField::Progress, progress),
            Effect::Save,
        ]
    }
}
