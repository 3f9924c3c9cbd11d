//! Submission flow for one new measurement.
//!
//! A [`Submission`] carries one form from editing to storage:
//!
//! ```text
//! Editing ──submit──▶ (validated) ──▶ PendingConfirmation ──confirm──▶ Persisted
//!    ▲                    │                   │
//!    └──── rejected ◀─────┘                   └──decline──▶ Editing
//! ```
//!
//! A validated record is a [`Measurement`] value. When confirmation is
//! required it is held in the submission until the user answers; otherwise it
//! goes straight to the store. Input errors never leave the submission: they
//! become [`SubmitOutcome::Rejected`] and the form keeps its values. Storage
//! errors propagate.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::measurement::Measurement;
use crate::storage::Store;
use crate::validation::EntryForm;

/// Whether a validated record needs explicit approval before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationPolicy {
    /// Hold the record until [`Submission::confirm`] or [`Submission::decline`].
    #[default]
    Required,
    /// Store the record as soon as it validates.
    Skip,
}

impl From<bool> for ConfirmationPolicy {
    fn from(confirm_before_save: bool) -> Self {
        if confirm_before_save {
            Self::Required
        } else {
            Self::Skip
        }
    }
}

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// The form is being filled in or corrected.
    Editing,
    /// A validated record is waiting for the user's answer.
    PendingConfirmation,
    /// The record was stored under the given identifier.
    Persisted {
        /// Identifier assigned by the store.
        id: String,
    },
}

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The record was stored.
    Persisted {
        /// Identifier assigned by the store.
        id: String,
    },
    /// The record validated and awaits confirmation.
    PendingConfirmation(Measurement),
    /// The form was rejected; nothing was written.
    Rejected {
        /// Message to show the user.
        message: String,
    },
}

/// Per-submission context.
#[derive(Debug, Clone)]
pub struct Submission {
    form: EntryForm,
    policy: ConfirmationPolicy,
    state: SubmissionState,
    pending: Option<Measurement>,
    error: Option<String>,
}

impl Submission {
    /// Start a submission for the given form.
    #[must_use]
    pub fn new(form: EntryForm, policy: ConfirmationPolicy) -> Self {
        Self {
            form,
            policy,
            state: SubmissionState::Editing,
            pending: None,
            error: None,
        }
    }

    /// The form as currently entered.
    #[must_use]
    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// Edit the form.
    ///
    /// Any record awaiting confirmation is discarded, since it no longer
    /// reflects the form. Has no effect on a persisted submission.
    pub fn form_mut(&mut self) -> Option<&mut EntryForm> {
        if matches!(self.state, SubmissionState::Persisted { .. }) {
            return None;
        }
        self.pending = None;
        self.state = SubmissionState::Editing;
        Some(&mut self.form)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Record awaiting confirmation, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&Measurement> {
        self.pending.as_ref()
    }

    /// Message from the most recent rejection, if the form has not been
    /// accepted since.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fill both coordinates from a pasted `"lat, lon"` pair.
    ///
    /// Returns `None` when the pair was applied. A malformed pair is rejected
    /// like an invalid form and leaves the form unchanged. A persisted
    /// submission returns its outcome untouched.
    pub fn paste_coordinates(&mut self, text: &str) -> Option<SubmitOutcome> {
        if let SubmissionState::Persisted { id } = &self.state {
            return Some(SubmitOutcome::Persisted { id: id.clone() });
        }

        match self.form.set_coordinate_pair(text) {
            Ok(()) => {
                self.pending = None;
                self.state = SubmissionState::Editing;
                self.error = None;
                None
            }
            Err(e) => Some(self.reject(&e)),
        }
    }

    /// Validate the form and store or hold the resulting record.
    ///
    /// Submitting an already persisted submission returns the existing
    /// identifier without writing again.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store fails. Input problems are reported
    /// as [`SubmitOutcome::Rejected`].
    pub fn submit(&mut self, store: &Store) -> Result<SubmitOutcome> {
        if let SubmissionState::Persisted { id } = &self.state {
            return Ok(SubmitOutcome::Persisted { id: id.clone() });
        }

        let measurement = match self.form.validate() {
            Ok(m) => m,
            Err(e) if e.is_input_error() => return Ok(self.reject(&e)),
            Err(e) => return Err(e),
        };
        self.error = None;
        debug!("Submission validated: {}", measurement);

        match self.policy {
            ConfirmationPolicy::Required => {
                self.pending = Some(measurement.clone());
                self.state = SubmissionState::PendingConfirmation;
                Ok(SubmitOutcome::PendingConfirmation(measurement))
            }
            ConfirmationPolicy::Skip => {
                let id = self.persist(store, &measurement)?;
                Ok(SubmitOutcome::Persisted { id })
            }
        }
    }

    /// Store the record awaiting confirmation.
    ///
    /// Returns the new identifier, or `None` if nothing was pending. If the
    /// store fails the record stays pending so the confirmation can be retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn confirm(&mut self, store: &Store) -> Result<Option<String>> {
        let Some(measurement) = self.pending.take() else {
            return Ok(None);
        };

        match self.persist(store, &measurement) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                self.pending = Some(measurement);
                Err(e)
            }
        }
    }

    /// Discard the record awaiting confirmation and return to editing.
    ///
    /// Returns the discarded record, if any.
    pub fn decline(&mut self) -> Option<Measurement> {
        let discarded = self.pending.take();
        if discarded.is_some() {
            info!("Pending measurement discarded");
            self.state = SubmissionState::Editing;
        }
        discarded
    }

    fn reject(&mut self, err: &Error) -> SubmitOutcome {
        warn!("Submission rejected: {}", err);
        let message = err.to_string();
        self.error = Some(message.clone());
        self.pending = None;
        self.state = SubmissionState::Editing;
        SubmitOutcome::Rejected { message }
    }

    fn persist(&mut self, store: &Store, measurement: &Measurement) -> Result<String> {
        let id = store.insert(measurement)?;
        info!("Measurement {} saved", id);
        self.state = SubmissionState::Persisted { id: id.clone() };
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, Store) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = Store::open(dir.path().join("sensor_data.db")).expect("failed to open store");
        (dir, store)
    }

    fn form(lat: &str, lon: &str) -> EntryForm {
        EntryForm::new(
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
        .with_coordinates(lat, lon)
    }

    #[test]
    fn test_policy_from_bool() {
        assert_eq!(ConfirmationPolicy::from(true), ConfirmationPolicy::Required);
        assert_eq!(ConfirmationPolicy::from(false), ConfirmationPolicy::Skip);
        assert_eq!(ConfirmationPolicy::default(), ConfirmationPolicy::Required);
    }

    #[test]
    fn test_submit_without_confirmation_persists() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("35.0", "139.0"), ConfirmationPolicy::Skip);

        let outcome = submission.submit(&store).unwrap();
        let SubmitOutcome::Persisted { id } = outcome else {
            panic!("expected persisted outcome");
        };
        assert_eq!(submission.state(), &SubmissionState::Persisted { id: id.clone() });

        let rows = store.load_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.as_deref(), Some(id.as_str()));
        assert_eq!(rows[0].discomfort_index, Some(72.82));
    }

    #[test]
    fn test_submit_twice_writes_once() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("35.0", "139.0"), ConfirmationPolicy::Skip);

        let first = submission.submit(&store).unwrap();
        let second = submission.submit(&store).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.count().unwrap(), 1);
        assert!(submission.form_mut().is_none());
    }

    #[test]
    fn test_invalid_format_rejected_without_write() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("abc", "139.0"), ConfirmationPolicy::Skip);

        let outcome = submission.submit(&store).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        assert_eq!(submission.state(), &SubmissionState::Editing);
        assert!(submission.error().unwrap().contains("latitude"));
        assert_eq!(submission.form().latitude, "abc");
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_out_of_range_rejected_without_write() {
        let (_dir, store) = create_test_store();

        for (lat, lon) in [("90.0001", "0"), ("0", "-180.5")] {
            let mut submission = Submission::new(form(lat, lon), ConfirmationPolicy::Skip);
            let outcome = submission.submit(&store).unwrap();
            assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        }
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_rejection_then_correction() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("91", "0"), ConfirmationPolicy::Skip);

        submission.submit(&store).unwrap();
        assert!(submission.error().is_some());

        submission.form_mut().unwrap().latitude = "89".to_string();
        let outcome = submission.submit(&store).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Persisted { .. }));
        assert!(submission.error().is_none());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_confirmation_required_holds_record() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("10", "20"), ConfirmationPolicy::Required);

        let outcome = submission.submit(&store).unwrap();
        let SubmitOutcome::PendingConfirmation(pending) = outcome else {
            panic!("expected pending outcome");
        };
        assert_eq!(pending.latitude(), 10.0);
        assert_eq!(submission.state(), &SubmissionState::PendingConfirmation);
        assert_eq!(submission.pending(), Some(&pending));
        assert_eq!(store.count().unwrap(), 0);

        let id = submission.confirm(&store).unwrap().unwrap();
        assert_eq!(submission.state(), &SubmissionState::Persisted { id });
        assert!(submission.pending().is_none());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_decline_discards_record() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("10", "20"), ConfirmationPolicy::Required);

        submission.submit(&store).unwrap();
        let discarded = submission.decline();

        assert!(discarded.is_some());
        assert_eq!(submission.state(), &SubmissionState::Editing);
        assert!(submission.confirm(&store).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_editing_discards_pending() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("10", "20"), ConfirmationPolicy::Required);

        submission.submit(&store).unwrap();
        submission.form_mut().unwrap().humidity = 90.0;

        assert!(submission.pending().is_none());
        assert_eq!(submission.state(), &SubmissionState::Editing);
    }

    #[test]
    fn test_decline_without_pending() {
        let mut submission = Submission::new(form("10", "20"), ConfirmationPolicy::Required);
        assert!(submission.decline().is_none());
        assert_eq!(submission.state(), &SubmissionState::Editing);
    }

    #[test]
    fn test_paste_coordinates_applies_pair() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("", ""), ConfirmationPolicy::Skip);

        assert!(submission.paste_coordinates("(35.681236, 139.767125)").is_none());
        assert_eq!(submission.form().latitude, "35.681236");
        assert_eq!(submission.form().longitude, "139.767125");

        let outcome = submission.submit(&store).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Persisted { .. }));
    }

    #[test]
    fn test_paste_malformed_pair_rejected() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("1", "2"), ConfirmationPolicy::Required);
        submission.submit(&store).unwrap();

        let outcome = submission.paste_coordinates("35.681236").unwrap();

        let SubmitOutcome::Rejected { message } = outcome else {
            panic!("expected rejected outcome");
        };
        assert!(message.contains("coordinates"));
        assert_eq!(submission.error(), Some(message.as_str()));
        assert_eq!(submission.state(), &SubmissionState::Editing);
        assert!(submission.pending().is_none());
        assert_eq!(submission.form().latitude, "1");
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_paste_after_rejection_clears_error() {
        let mut submission = Submission::new(form("", ""), ConfirmationPolicy::Skip);
        submission.paste_coordinates("nope");
        assert!(submission.error().is_some());

        assert!(submission.paste_coordinates("1, 2").is_none());
        assert!(submission.error().is_none());
    }

    #[test]
    fn test_paste_after_persist_is_ignored() {
        let (_dir, store) = create_test_store();
        let mut submission = Submission::new(form("1", "2"), ConfirmationPolicy::Skip);
        let first = submission.submit(&store).unwrap();

        assert_eq!(submission.paste_coordinates("3, 4"), Some(first));
        assert_eq!(submission.form().latitude, "1");
    }
}
