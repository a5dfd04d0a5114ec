use crate::api::TransportError;
use crate::internal::models::{DraftField, DraftForm, StoryRecord};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Story submitted successfully!";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to submit story. Please try again.";

/// Submission lifecycle of the story form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    SubmitSucceeded(String),
    SubmitFailed(String),
}

impl FormState {
    /// Inline message shown under the form, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            FormState::SubmitSucceeded(msg) | FormState::SubmitFailed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Owns the draft and the submit state machine.
///
/// The controller never talks to the network itself: `begin_submit` hands out
/// the draft to send and `finish_submit` folds the outcome back in.
#[derive(Debug, Clone, Default)]
pub struct StoryForm {
    draft: DraftForm,
    state: FormState,
    focused: Option<DraftField>,
}

impl StoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn focused(&self) -> Option<DraftField> {
        self.focused
    }

    /// Replace one field. A pending success/failure message is dismissed.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.dismiss_message();
    }

    /// Try to move `Idle -> Submitting`.
    ///
    /// Returns the draft to send, or `None` when the request is a no-op: a
    /// submission is already in flight or a required field is empty.
    pub fn begin_submit(&mut self) -> Option<DraftForm> {
        if self.is_submitting() {
            tracing::debug!("submit ignored, already submitting");
            return None;
        }
        if !self.draft.is_submittable() {
            tracing::debug!("submit ignored, required field empty");
            return None;
        }

        self.state = FormState::Submitting;
        Some(self.draft.clone())
    }

    /// Apply the outcome of a create call. Returns `true` when the story list
    /// must be refreshed.
    pub fn finish_submit(&mut self, result: Result<StoryRecord, TransportError>) -> bool {
        if !self.is_submitting() {
            tracing::warn!("submit result arrived while not submitting, dropping");
            return false;
        }

        match result {
            Ok(story) => {
                tracing::info!(id = ?story.id, "story submitted");
                self.draft.clear();
                self.state = FormState::SubmitSucceeded(SUBMIT_SUCCESS_MESSAGE.to_string());
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "story submission failed");
                self.state = FormState::SubmitFailed(SUBMIT_FAILURE_MESSAGE.to_string());
                false
            }
        }
    }

    /// Back to a fresh, empty form. A create still in flight is left to finish
    /// on the server, but its result will be dropped here.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn dismiss_message(&mut self) {
        if matches!(
            self.state,
            FormState::SubmitSucceeded(_) | FormState::SubmitFailed(_)
        ) {
            self.state = FormState::Idle;
        }
    }

    pub fn focus(&mut self, field: DraftField) {
        self.focused = Some(field);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focus_next(&mut self) {
        self.focused = Some(self.focused.map_or(DraftField::Title, DraftField::next));
    }

    pub fn focus_prev(&mut self) {
        self.focused = Some(self.focused.map_or(DraftField::Location, DraftField::prev));
    }

    /// Append a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.focused {
            let mut value = self.draft.get(field).to_string();
            value.push(c);
            self.set_field(field, value);
        }
    }

    /// Remove the last character of the focused field.
    pub fn pop_char(&mut self) {
        if let Some(field) = self.focused {
            let mut value = self.draft.get(field).to_string();
            value.pop();
            self.set_field(field, value);
        }
    }
}
