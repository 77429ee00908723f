use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
    choice,
    dates::{ensure_not_past, reminder_due},
    parse_field,
    Action, Button, Document, Effect, Effects, FieldError, FieldOf, FieldType, FieldValue,
    FormContext, FormHandler, Prompt, PromptField, PromptKind, PromptValues, Request, Response,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum HearingStatus {
    Scheduled,
    Completed,
    Adjourned,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum HearingOutcome {
    Adjourned,
    Dismissed,
    Settled,
    Verdict,
    Pending,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hearing {
    pub name: Option<String>,
    pub status: Option<HearingStatus>,
    pub hearing_date: Option<NaiveDate>,
    pub outcome: Option<HearingOutcome>,
    pub next_hearing_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum HearingField {
    Name,
    Status,
    HearingDate,
    Outcome,
    NextHearingDate,
    Notes,
}

impl Document for Hearing {
    type Field = HearingField;

    fn get(&self, field: HearingField) -> FieldValue {
        match field {
            HearingField::Name => self.name.clone().into(),
            HearingField::Status => choice(self.status),
            HearingField::HearingDate => self.hearing_date.into(),
            HearingField::Outcome => choice(self.outcome),
            HearingField::NextHearingDate => self.next_hearing_date.into(),
            HearingField::Notes => self.notes.clone().into(),
        }
    }

    fn set(&mut self, field: HearingField, value: FieldValue) -> Result<(), FieldError> {
        match field {
            HearingField::Name => self.name = value.into_text(field)?,
            HearingField::Status => self.status = value.into_choice(field)?,
            HearingField::HearingDate => self.hearing_date = value.into_date(field)?,
            HearingField::Outcome => self.outcome = value.into_choice(field)?,
            HearingField::NextHearingDate => self.next_hearing_date = value.into_date(field)?,
            HearingField::Notes => self.notes = value.into_text(field)?,
        }
        Ok(())
    }
}

pub struct HearingForm;

impl HearingForm {
    fn outcome_prompt() -> Prompt {
        let outcomes = HearingOutcome::iter().map(|o| o.to_string()).collect();

        Prompt {
            kind: PromptKind::HearingOutcome,
            title: "Hearing Outcome".to_string(),
            primary_label: "Update".to_string(),
            fields: vec![
                PromptField::new("Outcome", "outcome", FieldType::Select(outcomes)).required(),
                PromptField::new("Next Hearing Date", "next_hearing_date", FieldType::Date),
                PromptField::new("Notes", "notes", FieldType::Text),
            ],
        }
    }
}

impl FormHandler for HearingForm {
    type Doc = Hearing;

    fn on_load(&self, doc: &Hearing, ctx: &FormContext) -> Effects<Hearing> {
        let mut effects = Vec::new();

        let status = match doc.status {
            Some(status) => status,
            None => {
                effects.push(Effect::set(
                    HearingField::Status,
                    HearingStatus::Scheduled.to_string(),
                ));
                HearingStatus::Scheduled
            }
        };

        if status == HearingStatus::Scheduled {
            if doc
                .hearing_date
                .is_some_and(|date| reminder_due(date, ctx.now))
            {
                effects.push(Effect::AddButton(Button::new(Action::SendReminder)));
            }
            effects.push(Effect::AddButton(Button::new(Action::MarkCompleted)));
        }

        effects
    }

    fn on_field_change(
        &self,
        doc: &Hearing,
        field: FieldOf<Hearing>,
        _value: &FieldValue,
        ctx: &FormContext,
    ) -> Effects<Hearing> {
        match field {
            HearingField::HearingDate => match doc.hearing_date {
                Some(date) => match ensure_not_past("Hearing date", date, ctx.today()) {
                    Ok(()) => Vec::new(),
                    Err(err) => vec![
                        Effect::message(err.to_string()),
                        Effect::clear(HearingField::HearingDate),
                    ],
                },
                None => Vec::new(),
            },
            HearingField::Status
                if doc.status == Some(HearingStatus::Completed) && doc.outcome.is_none() =>
            {
                vec![Effect::Prompt(Self::outcome_prompt())]
            }
            _ => Vec::new(),
        }
    }

    fn on_action(&self, doc: &Hearing, action: Action, _ctx: &FormContext) -> Effects<Hearing> {
        match action {
            Action::SendReminder => match &doc.name {
                Some(name) => vec![Effect::Request(Request::SendHearingReminder {
                    hearing_id: name.clone(),
                })],
                None => Vec::new(),
            },
            Action::MarkCompleted => {
                // the outcome prompt saves once it is answered
                let next = if doc.outcome.is_none() {
                    Effect::Prompt(Self::outcome_prompt())
                } else {
                    Effect::Save
                };
                vec![
                    Effect::set(HearingField::Status, HearingStatus::Completed.to_string()),
                    next,
                ]
            }
            _ => Vec::new(),
        }
    }

    fn on_prompt(
        &self,
        _doc: &Hearing,
        kind: PromptKind,
        values: &PromptValues,
        _ctx: &FormContext,
    ) -> Effects<Hearing> {
        if kind != PromptKind::HearingOutcome {
            return Vec::new();
        }

        // dialog fields share their names with the document's
        let mut effects = Vec::new();
        for prompt_field in Self::outcome_prompt().fields {
            let Some(value) = values.get(&prompt_field.fieldname).filter(|v| !v.is_empty()) else {
                continue;
            };
            match parse_field::<Hearing>(&prompt_field.fieldname) {
                Ok(field) => effects.push(Effect::set(field, value.clone())),
                Err(err) => tracing::debug!("skipping dialog value: {}", err),
            }
        }
        effects.push(Effect::Save);
        effects
    }

    fn on_response(&self, _doc: &Hearing, response: Response, _ctx: &FormContext) -> Effects<Hearing> {
        match response {
            Response::ReminderSent => vec![Effect::message("Reminder sent successfully")],
            _ => Vec::new(),
        }
    }
}
