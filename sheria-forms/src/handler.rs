use chrono::{NaiveDate, NaiveDateTime};

use crate::{Action, Document, Effect, FieldValue, PromptKind, PromptValues, Response};

pub const DEFAULT_CURRENCY: &str = "KES";

pub type FieldOf<D> = <D as Document>::Field;
pub type Effects<D> = Vec<Effect<FieldOf<D>>>;

/// What a handler knows about the session it runs in. Rules never read the
/// clock themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct FormContext {
    pub now: NaiveDateTime,
    pub user: Option<String>,
    pub roles: Vec<String>,
    pub currency: String,
}

impl FormContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            user: None,
            roles: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Start of the current day.
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Behaviour bound to one document type.
///
/// Every hook is a pure function of the document and context; it describes
/// what should happen as a list of [`Effect`]s instead of doing it.
pub trait FormHandler {
    type Doc: Document;

    fn on_load(&self, doc: &Self::Doc, ctx: &FormContext) -> Effects<Self::Doc>;

    /// Called after `field` was written with `value`.
    fn on_field_change(
        &self,
        doc: &Self::Doc,
        field: FieldOf<Self::Doc>,
        value: &FieldValue,
        ctx: &FormContext,
    ) -> Effects<Self::Doc>;

    fn on_before_save(&self, _doc: &Self::Doc, _ctx: &FormContext) -> Effects<Self::Doc> {
        Vec::new()
    }

    fn on_action(&self, _doc: &Self::Doc, _action: Action, _ctx: &FormContext) -> Effects<Self::Doc> {
        Vec::new()
    }

    fn on_prompt(
        &self,
        _doc: &Self::Doc,
        _kind: PromptKind,
        _values: &PromptValues,
        _ctx: &FormContext,
    ) -> Effects<Self::Doc> {
        Vec::new()
    }

    fn on_response(
        &self,
        _doc: &Self::Doc,
        _response: Response,
        _ctx: &FormContext,
    ) -> Effects<Self::Doc> {
        Vec::new()
    }
}
