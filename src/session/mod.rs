//! Session controller: form-type selection, the submitted record list and
//! the edit target.
//!
//! All state lives in one [`SessionController`] owned by the caller. It is
//! only changed through `select_form_type`, `submit`, `edit`, `delete` and
//! `cancel_edit`, so the rendering layer never mutates records directly.

mod record;

use std::fmt;
use std::sync::Arc;

use crate::errors::{FormError, Result};
use crate::forms::{FieldValues, FormRenderer};
use crate::registry::{FormRegistry, FormSchema};

pub use record::Record;

pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully!";
pub const SAVED_MESSAGE: &str = "Changes saved successfully!";
pub const DELETED_MESSAGE: &str = "Entry deleted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
}

/// Transient message raised by a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Record currently being modified.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTarget {
    pub index: usize,
    pub form_type: String,
    pub values: FieldValues,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    TypeSelected(String),
    Editing { index: usize, form_type: String },
}

pub struct SessionController {
    registry: FormRegistry,
    selection: Option<String>,
    records: Vec<Record>,
    edit_target: Option<EditTarget>,
}

impl SessionController {
    pub fn new(registry: FormRegistry) -> Self {
        Self {
            registry,
            selection: None,
            records: Vec::new(),
            edit_target: None,
        }
    }

    pub fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn edit_target(&self) -> Option<&EditTarget> {
        self.edit_target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    /// The type selector is hidden while an edit is in flight.
    pub fn selector_enabled(&self) -> bool {
        !self.is_editing()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.edit_target, &self.selection) {
            (Some(target), _) => SessionPhase::Editing {
                index: target.index,
                form_type: target.form_type.clone(),
            },
            (None, Some(key)) => SessionPhase::TypeSelected(key.clone()),
            (None, None) => SessionPhase::Idle,
        }
    }

    /// Schema for the current selection. `None` both when nothing is selected
    /// and when the selected key has no registered schema.
    pub fn current_schema(&self) -> Option<Arc<FormSchema>> {
        self.selection
            .as_deref()
            .and_then(|key| self.registry.lookup(key))
    }

    /// Values the renderer is opened with: the edit target's copy, or empty.
    pub fn default_values(&self) -> FieldValues {
        self.edit_target
            .as_ref()
            .map(|target| target.values.clone())
            .unwrap_or_default()
    }

    /// Fresh renderer for the current selection, if it has a schema.
    pub fn open_renderer(&self) -> Option<FormRenderer> {
        self.current_schema()
            .map(|schema| FormRenderer::new(schema, self.default_values()))
    }

    pub fn select_form_type(&mut self, key: impl Into<String>) -> Result<()> {
        if self.is_editing() {
            return Err(FormError::EditInProgress);
        }
        let key = key.into();
        if !self.registry.contains(&key) {
            tracing::debug!(form = %key, "Selected form type has no schema");
        }
        tracing::info!(form = %key, "Form type selected");
        self.selection = Some(key);
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        if self.is_editing() {
            return Err(FormError::EditInProgress);
        }
        self.selection = None;
        Ok(())
    }

    /// Creates or updates a record from finalized renderer output. Either way
    /// the edit target and selection are cleared afterwards.
    pub fn submit(&mut self, values: FieldValues) -> Result<Notification> {
        let notification = match self.edit_target.as_ref() {
            Some(target) => {
                let schema = self
                    .registry
                    .lookup(&target.form_type)
                    .ok_or_else(|| FormError::MissingSchema(target.form_type.clone()))?;
                let record = self
                    .records
                    .get_mut(target.index)
                    .ok_or(FormError::RecordNotFound(target.index))?;
                record.replace_values(&schema, &values);
                tracing::info!(index = target.index, id = %record.id, "Record updated");
                Notification::success(SAVED_MESSAGE)
            }
            None => {
                let key = self.selection.as_deref().ok_or(FormError::NoFormSelected)?;
                let schema = self
                    .registry
                    .lookup(key)
                    .ok_or_else(|| FormError::MissingSchema(key.to_string()))?;
                let record = Record::from_submission(&schema, &values);
                tracing::info!(form = %record.form_type, id = %record.id, "Record created");
                self.records.push(record);
                Notification::success(SUBMITTED_MESSAGE)
            }
        };
        self.edit_target = None;
        self.selection = None;
        Ok(notification)
    }

    /// Removes the record at `index`. An edit of that record is abandoned; an
    /// edit of a later record follows it down one position.
    pub fn delete(&mut self, index: usize) -> Result<Notification> {
        if index >= self.records.len() {
            return Err(FormError::RecordNotFound(index));
        }
        let removed = self.records.remove(index);
        tracing::info!(index, id = %removed.id, "Record deleted");

        if let Some(target) = self.edit_target.as_mut() {
            if target.index == index {
                tracing::debug!(index, "Deleted record was being edited; edit abandoned");
                self.edit_target = None;
                self.selection = None;
            } else if target.index > index {
                target.index -= 1;
            }
        }
        Ok(Notification::info(DELETED_MESSAGE))
    }

    /// Starts editing the record at `index`, replacing any edit in progress.
    pub fn edit(&mut self, index: usize) -> Result<&Record> {
        let record = self
            .records
            .get(index)
            .ok_or(FormError::RecordNotFound(index))?;
        self.edit_target = Some(EditTarget {
            index,
            form_type: record.form_type.clone(),
            values: record.values.clone(),
        });
        self.selection = Some(record.form_type.clone());
        tracing::info!(index, form = %record.form_type, "Editing record");
        Ok(record)
    }

    /// Abandons the current edit without touching the record list.
    pub fn cancel_edit(&mut self) -> bool {
        let was_editing = self.edit_target.take().is_some();
        if was_editing {
            self.selection = None;
            tracing::info!("Edit cancelled");
        }
        was_editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldValue;
    use crate::registry::{ADDRESS_INFO, USER_INFO};

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), FieldValue::from(*value)))
            .collect()
    }

    fn controller_with_records() -> SessionController {
        let mut session = SessionController::new(FormRegistry::builtin());
        for name in ["Ada", "Grace", "Alan"] {
            session.select_form_type(USER_INFO).unwrap();
            session
                .submit(values(&[("firstName", name), ("lastName", "Test")]))
                .unwrap();
        }
        session
    }

    #[test]
    fn submit_appends_tagged_record_and_resets() {
        let mut session = SessionController::new(FormRegistry::builtin());
        session.select_form_type(USER_INFO).unwrap();
        assert_eq!(session.phase(), SessionPhase::TypeSelected(USER_INFO.into()));
        let note = session
            .submit(values(&[("firstName", "Ada"), ("lastName", "Lovelace")]))
            .unwrap();
        assert_eq!(note, Notification::success(SUBMITTED_MESSAGE));
        assert_eq!(session.records().len(), 1);
        let record = &session.records()[0];
        assert_eq!(record.form_type, USER_INFO);
        assert_eq!(record.get("age"), Some(&FieldValue::default()));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn submit_without_selection_fails() {
        let mut session = SessionController::new(FormRegistry::builtin());
        let err = session.submit(FieldValues::new()).unwrap_err();
        assert!(matches!(err, FormError::NoFormSelected));
    }

    #[test]
    fn unregistered_selection_has_no_schema() {
        let mut session = SessionController::new(FormRegistry::builtin());
        session.select_form_type("surveyInfo").unwrap();
        assert!(session.current_schema().is_none());
        assert!(session.open_renderer().is_none());
        let err = session.submit(FieldValues::new()).unwrap_err();
        assert!(matches!(err, FormError::MissingSchema(_)));
    }

    #[test]
    fn edit_then_submit_replaces_in_place() {
        let mut session = controller_with_records();
        session.edit(1).unwrap();
        assert!(!session.selector_enabled());
        assert_eq!(session.selection(), Some(USER_INFO));
        assert_eq!(
            session.default_values().get("firstName"),
            Some(&FieldValue::from("Grace"))
        );
        let original_id = session.records()[1].id;

        let note = session
            .submit(values(&[("firstName", "Grace"), ("lastName", "Hopper")]))
            .unwrap();
        assert_eq!(note.message, SAVED_MESSAGE);
        assert_eq!(session.records().len(), 3);
        let record = &session.records()[1];
        assert_eq!(record.id, original_id);
        assert_eq!(record.form_type, USER_INFO);
        assert_eq!(record.get("lastName"), Some(&FieldValue::from("Hopper")));
        assert!(session.edit_target().is_none());
        assert!(session.selection().is_none());
    }

    #[test]
    fn selection_is_locked_while_editing() {
        let mut session = controller_with_records();
        session.edit(0).unwrap();
        let err = session.select_form_type(ADDRESS_INFO).unwrap_err();
        assert!(matches!(err, FormError::EditInProgress));
        assert!(session.cancel_edit());
        assert!(session.select_form_type(ADDRESS_INFO).is_ok());
    }

    #[test]
    fn delete_shifts_following_records() {
        let mut session = controller_with_records();
        let third = session.records()[2].id;
        let note = session.delete(1).unwrap();
        assert_eq!(note.level, NotificationLevel::Info);
        assert_eq!(session.records().len(), 2);
        assert_eq!(session.records()[1].id, third);
    }

    #[test]
    fn delete_out_of_range_is_rejected() {
        let mut session = controller_with_records();
        assert!(matches!(
            session.delete(3).unwrap_err(),
            FormError::RecordNotFound(3)
        ));
        assert_eq!(session.records().len(), 3);
    }

    #[test]
    fn deleting_edited_record_abandons_edit() {
        let mut session = controller_with_records();
        session.edit(1).unwrap();
        session.delete(1).unwrap();
        assert!(session.edit_target().is_none());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn deleting_earlier_record_adjusts_edit_index() {
        let mut session = controller_with_records();
        let edited = session.records()[2].id;
        session.edit(2).unwrap();
        session.delete(0).unwrap();
        assert_eq!(session.edit_target().map(|target| target.index), Some(1));
        session
            .submit(values(&[("firstName", "Alan"), ("lastName", "Turing")]))
            .unwrap();
        assert_eq!(session.records()[1].id, edited);
        assert_eq!(
            session.records()[1].get("lastName"),
            Some(&FieldValue::from("Turing"))
        );
    }

    #[test]
    fn deleting_later_record_keeps_edit_index() {
        let mut session = controller_with_records();
        session.edit(0).unwrap();
        session.delete(2).unwrap();
        assert_eq!(session.edit_target().map(|target| target.index), Some(0));
    }
}
