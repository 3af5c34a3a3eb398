//! Row Editor
//!
//! Per-row edit state: viewing or editing, the buffered field values,
//! and the at-most-one request in flight for the row.

use thiserror::Error;

use crate::commands::ServiceError;
use crate::models::{Row, RowField, RowFields, RowId, RowRequest, DRAFT_ROW_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Inputs disabled, committed values shown
    Viewing,
    /// Inputs enabled, buffered values shown
    Editing,
}

/// Request currently running for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Commit,
    Delete,
}

/// Rejected keystroke
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("\"{0}\" is not a number")]
    NotANumber(String),
    #[error("row is not being edited")]
    NotEditing,
}

/// What a commit should send
#[derive(Debug, Clone, PartialEq)]
pub enum CommitRequest {
    Create(RowRequest),
    Update(RowId, RowRequest),
}

impl CommitRequest {
    /// Id of the cached row the saved row replaces
    pub fn target(&self) -> RowId {
        match self {
            CommitRequest::Create(_) => DRAFT_ROW_ID,
            CommitRequest::Update(id, _) => *id,
        }
    }
}

/// What a delete gesture resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequest {
    /// The draft was never saved: drop it locally
    Discard,
    Remote(RowId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowEditor {
    /// Last committed state of the row, without children
    base: Row,
    mode: EditMode,
    buffer: RowFields,
    /// Text of each input, indexed like `RowField::ALL`
    inputs: [String; 5],
    /// Inputs whose text was rejected
    invalid: [bool; 5],
    pending: Option<Pending>,
    focus_pending: bool,
    last_error: Option<String>,
}

impl RowEditor {
    /// A draft starts in edit mode with focus requested
    pub fn new(row: &Row) -> Self {
        let draft = row.is_draft();
        let buffer = row.fields();
        Self {
            base: row.detached(),
            mode: if draft { EditMode::Editing } else { EditMode::Viewing },
            inputs: input_texts(&buffer),
            invalid: [false; 5],
            buffer,
            pending: None,
            focus_pending: draft,
            last_error: None,
        }
    }

    pub fn row_id(&self) -> RowId {
        self.base.id
    }

    pub fn is_draft(&self) -> bool {
        self.base.is_draft()
    }

    #[cfg(test)]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &RowFields {
        &self.buffer
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn focus_pending(&self) -> bool {
        self.focus_pending
    }

    /// Consume the focus request; true at most once per entry into edit mode
    pub fn take_focus(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }

    /// Text for the input of `field`, as typed
    pub fn display(&self, field: RowField) -> &str {
        &self.inputs[field.index()]
    }

    pub fn is_invalid(&self, field: RowField) -> bool {
        self.invalid[field.index()]
    }

    fn has_invalid(&self) -> bool {
        self.invalid.contains(&true)
    }

    /// Buffer (and input texts) back to the committed values
    fn reset_buffer(&mut self) {
        self.buffer = self.base.fields();
        self.inputs = input_texts(&self.buffer);
        self.invalid = [false; 5];
    }

    /// Switch between viewing and editing.
    ///
    /// Entering re-buffers the committed values; leaving without a commit
    /// throws the buffered edits away. Drafts and busy rows ignore this.
    pub fn toggle_edit(&mut self) -> bool {
        if self.is_draft() || self.is_busy() {
            log::debug!("edit toggle ignored for row {}", self.row_id());
            return false;
        }
        self.reset_buffer();
        self.last_error = None;
        match self.mode {
            EditMode::Viewing => {
                self.mode = EditMode::Editing;
                self.focus_pending = true;
            }
            EditMode::Editing => {
                self.mode = EditMode::Viewing;
                self.focus_pending = false;
            }
        }
        true
    }

    /// Buffer one keystroke.
    ///
    /// A rejected amount keeps the last accepted value in the buffer and
    /// marks the input invalid until it is corrected.
    pub fn set_field(&mut self, field: RowField, raw: &str) -> Result<(), FieldError> {
        if !self.is_editing() {
            return Err(FieldError::NotEditing);
        }
        let i = field.index();
        self.inputs[i] = raw.to_string();
        let parsed = match self.buffer.amount_mut(field) {
            Some(amount) => parse_amount(raw).map(|value| *amount = value),
            None => {
                self.buffer.row_name = raw.to_string();
                Ok(())
            }
        };
        self.invalid[i] = parsed.is_err();
        parsed
    }

    /// Start a commit of the buffered values.
    ///
    /// `None` while viewing, while another request runs, while an input
    /// is invalid, or while the name is blank; the editor is left
    /// untouched in that case.
    pub fn begin_commit(&mut self) -> Option<CommitRequest> {
        if !self.is_editing() || self.is_busy() {
            return None;
        }
        if self.has_invalid() {
            log::debug!("commit blocked: invalid amount on row {}", self.row_id());
            return None;
        }
        if self.buffer.row_name.trim().is_empty() {
            log::debug!("commit blocked: empty name on row {}", self.row_id());
            return None;
        }
        self.pending = Some(Pending::Commit);
        self.last_error = None;
        let body = RowRequest::new(&self.base, &self.buffer);
        Some(if self.is_draft() {
            CommitRequest::Create(body)
        } else {
            CommitRequest::Update(self.row_id(), body)
        })
    }

    /// Success shows the saved row; failure keeps editing with the buffer intact
    pub fn finish_commit(&mut self, outcome: Result<&Row, &ServiceError>) {
        if self.pending != Some(Pending::Commit) {
            return;
        }
        self.pending = None;
        match outcome {
            Ok(saved) => {
                self.base = saved.detached();
                self.reset_buffer();
                self.mode = EditMode::Viewing;
                self.focus_pending = false;
            }
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    /// Start a delete. Drafts resolve locally and never become busy.
    pub fn begin_delete(&mut self) -> Option<DeleteRequest> {
        if self.is_busy() {
            return None;
        }
        if self.is_draft() {
            return Some(DeleteRequest::Discard);
        }
        self.pending = Some(Pending::Delete);
        self.last_error = None;
        Some(DeleteRequest::Remote(self.row_id()))
    }

    pub fn finish_delete(&mut self, outcome: Result<(), &ServiceError>) {
        if self.pending != Some(Pending::Delete) {
            return;
        }
        self.pending = None;
        if let Err(err) = outcome {
            self.last_error = Some(err.to_string());
        }
    }

    /// Whether this row may receive a new child right now
    pub fn can_add_child(&self, draft_exists: bool) -> bool {
        !draft_exists && !self.is_draft() && !self.is_editing() && !self.is_busy()
    }
}

fn input_texts(fields: &RowFields) -> [String; 5] {
    RowField::ALL.map(|field| fields.display(field))
}

/// Parse an amount typed into a numeric cell.
///
/// Blank means zero and a decimal comma is accepted; anything that is not
/// a finite number is rejected.
pub fn parse_amount(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let normalized = if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::NotANumber(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn saved_row() -> Row {
        Row {
            id: 1,
            row_name: "Walls".into(),
            salary: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), Ok(12.5));
        assert_eq!(parse_amount(" 12,5 "), Ok(12.5));
        assert_eq!(parse_amount(""), Ok(0.0));
        assert_eq!(parse_amount("-3"), Ok(-3.0));
        assert!(parse_amount("12a").is_err());
        assert!(parse_amount("1,000.5").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_new_saved_row_is_viewing() {
        let editor = RowEditor::new(&saved_row());
        assert_eq!(editor.mode(), EditMode::Viewing);
        assert!(!editor.focus_pending());
        assert!(!editor.is_draft());
    }

    #[test]
    fn test_new_draft_is_editing_with_focus() {
        let mut editor = RowEditor::new(&Row::draft(1));
        assert_eq!(editor.mode(), EditMode::Editing);
        assert!(editor.take_focus());
        assert!(!editor.take_focus());
    }

    #[test]
    fn test_toggle_edit_requests_focus_once() {
        let mut editor = RowEditor::new(&saved_row());
        assert!(editor.toggle_edit());
        assert!(editor.is_editing());
        assert!(editor.take_focus());
        assert!(!editor.take_focus());
    }

    #[test]
    fn test_leaving_edit_discards_buffer() {
        let mut editor = RowEditor::new(&saved_row());
        editor.toggle_edit();
        editor.set_field(RowField::RowName, "Roof").unwrap();

        editor.toggle_edit();

        assert_eq!(editor.mode(), EditMode::Viewing);
        assert_eq!(editor.buffer().row_name, "Walls");
    }

    #[test]
    fn test_draft_ignores_toggle() {
        let mut editor = RowEditor::new(&Row::draft(1));
        assert!(!editor.toggle_edit());
        assert!(editor.is_editing());
    }

    #[test]
    fn test_set_field_requires_edit_mode() {
        let mut editor = RowEditor::new(&saved_row());
        assert_eq!(editor.set_field(RowField::Salary, "5"), Err(FieldError::NotEditing));
    }

    #[test]
    fn test_rejected_amount_keeps_previous() {
        let mut editor = RowEditor::new(&saved_row());
        editor.toggle_edit();
        editor.set_field(RowField::Overheads, "7").unwrap();

        let err = editor.set_field(RowField::Overheads, "7x").unwrap_err();

        assert_eq!(err, FieldError::NotANumber("7x".into()));
        assert_eq!(editor.buffer().overheads, 7.0);
        assert_eq!(editor.display(RowField::Overheads), "7x");
        assert!(editor.is_invalid(RowField::Overheads));
        assert_eq!(editor.begin_commit(), None);

        editor.set_field(RowField::Overheads, "8").unwrap();
        assert!(!editor.is_invalid(RowField::Overheads));
        assert!(editor.begin_commit().is_some());
    }

    #[test]
    fn test_partial_amount_text_is_kept() {
        let mut editor = RowEditor::new(&saved_row());
        editor.toggle_edit();
        editor.set_field(RowField::Salary, "12.").unwrap();
        assert_eq!(editor.display(RowField::Salary), "12.");
        assert_eq!(editor.buffer().salary, 12.0);
    }

    #[test]
    fn test_blank_name_blocks_commit() {
        let mut editor = RowEditor::new(&saved_row());
        editor.toggle_edit();
        editor.set_field(RowField::RowName, "   ").unwrap();
        let before = editor.clone();

        assert_eq!(editor.begin_commit(), None);
        assert_eq!(editor, before);
    }

    #[test]
    fn test_commit_while_viewing_is_ignored() {
        let mut editor = RowEditor::new(&saved_row());
        assert_eq!(editor.begin_commit(), None);
    }

    #[test]
    fn test_commit_draft_creates() {
        let mut editor = RowEditor::new(&Row::draft(1));
        editor.set_field(RowField::RowName, "Excavation").unwrap();
        editor.set_field(RowField::Salary, "250").unwrap();

        let request = editor.begin_commit().unwrap();

        let CommitRequest::Create(body) = &request else {
            panic!("expected create, got {:?}", request);
        };
        assert_eq!(body.parent_id, Some(1));
        assert_eq!(body.row_name, "Excavation");
        assert_eq!(body.salary, 250.0);
        assert_eq!(request.target(), DRAFT_ROW_ID);
        assert_eq!(editor.pending(), Some(Pending::Commit));
    }

    #[test]
    fn test_commit_saved_row_updates() {
        let mut editor = RowEditor::new(&saved_row());
        editor.toggle_edit();
        editor.set_field(RowField::RowName, "Foundation").unwrap();

        let request = editor.begin_commit().unwrap();

        assert!(matches!(
            &request,
            CommitRequest::Update(1, body) if body.row_name == "Foundation"
        ));
        assert_eq!(request.target(), 1);
    }

    #[test]
    fn test_one_commit_in_flight() {
        let mut editor = RowEditor::new(&saved_row());
        editor.toggle_edit();
        assert!(editor.begin_commit().is_some());
        assert!(editor.begin_commit().is_none());
        assert!(editor.begin_delete().is_none());
        assert!(!editor.toggle_edit());
    }

    #[test]
    fn test_commit_success_returns_to_viewing() {
        let mut editor = RowEditor::new(&Row::draft(1));
        editor.set_field(RowField::RowName, "Excavation").unwrap();
        editor.begin_commit();
        let saved = Row {
            id: 42,
            parent_id: Some(1),
            row_name: "Excavation".into(),
            ..Default::default()
        };

        editor.finish_commit(Ok(&saved));

        assert_eq!(editor.mode(), EditMode::Viewing);
        assert_eq!(editor.row_id(), 42);
        assert!(!editor.is_busy());
    }

    #[test]
    fn test_commit_failure_keeps_buffer() {
        let mut editor = RowEditor::new(&saved_row());
        editor.toggle_edit();
        editor.set_field(RowField::RowName, "Foundation").unwrap();
        editor.begin_commit();

        editor.finish_commit(Err(&ServiceError::Status(500)));

        assert!(editor.is_editing());
        assert!(!editor.is_busy());
        assert_eq!(editor.buffer().row_name, "Foundation");
        assert_eq!(editor.last_error(), Some("server replied with status 500"));
        // Retry is allowed
        assert!(editor.begin_commit().is_some());
    }

    #[test]
    fn test_delete_draft_is_local() {
        let mut editor = RowEditor::new(&Row::draft(1));
        assert_eq!(editor.begin_delete(), Some(DeleteRequest::Discard));
        assert!(!editor.is_busy());
    }

    #[test]
    fn test_delete_failure_records_error() {
        let mut editor = RowEditor::new(&saved_row());
        assert_eq!(editor.begin_delete(), Some(DeleteRequest::Remote(1)));
        assert!(editor.is_busy());

        editor.finish_delete(Err(&ServiceError::Network("offline".into())));

        assert!(!editor.is_busy());
        assert_eq!(editor.last_error(), Some("network error: offline"));
    }

    #[test]
    fn test_can_add_child() {
        let mut editor = RowEditor::new(&saved_row());
        assert!(editor.can_add_child(false));
        assert!(!editor.can_add_child(true));

        editor.toggle_edit();
        assert!(!editor.can_add_child(false));

        assert!(!RowEditor::new(&Row::draft(1)).can_add_child(false));
    }
}
