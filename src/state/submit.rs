/// Submission state for one create, update, delete or sign-in action
///
/// `Submitting` disables the trigger, which is the only double-submit
/// protection; there is no queue and no automatic retry. A failed attempt
/// returns control to the user, and every retry is a fresh action.

/// Idle → Submitting → {Succeeded, Failed}; both terminal states accept a
/// new `begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitState {
    /// Enter `Submitting`. Returns `false` (and stays put) if an attempt
    /// is already in flight.
    pub fn begin(&mut self) -> bool {
        if *self == SubmitState::Submitting {
            return false;
        }
        *self = SubmitState::Submitting;
        true
    }

    /// Resolve the in-flight attempt.
    pub fn finish(&mut self, ok: bool) {
        *self = if ok {
            SubmitState::Succeeded
        } else {
            SubmitState::Failed
        };
    }

    /// Back to `Idle` (after a failure notice, or a form reset).
    pub fn reset(&mut self) {
        *self = SubmitState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        *self == SubmitState::Submitting
    }
}
