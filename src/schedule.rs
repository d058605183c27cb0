//! Bookkeeping for cancellable, self re-arming periodic tasks.
//!
//! Both the detection loop and the render loop are driven by the host's
//! frame callback: each run re-arms the next one before doing its work, so a
//! failing body never stalls the loop. [`TaskState`] tracks the one pending
//! host handle per task so teardown can cancel it and late callbacks that
//! were already queued become no-ops.

/// State of a single periodic task.
#[derive(Debug, Default)]
pub struct TaskState {
    active: bool,
    pending: Option<i32>,
    runs: u64,
}

impl TaskState {
    /// Inactive task with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the task active. Returns `false` if it already was, so a second
    /// start never creates a second instance.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    /// Record the host handle of the next scheduled run.
    pub fn arm(&mut self, handle: i32) {
        self.pending = Some(handle);
    }

    /// Called when a scheduled run fires. Returns whether the body should
    /// execute; callbacks arriving after [`cancel`](Self::cancel) return
    /// `false`.
    pub fn fire(&mut self) -> bool {
        self.pending = None;
        if self.active {
            self.runs += 1;
        }
        self.active
    }

    /// Deactivate. Returns the handle the host must cancel, if one is
    /// pending.
    pub fn cancel(&mut self) -> Option<i32> {
        self.active = false;
        self.pending.take()
    }

    /// Whether the task is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Host handle of the pending run, if any.
    #[must_use]
    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    /// Number of runs whose body executed.
    #[must_use]
    pub fn runs(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_active_instance() {
        let mut task = TaskState::new();
        assert!(task.start());
        assert!(!task.start());
        assert!(task.is_active());
    }

    #[test]
    fn fire_rearm_cycle() {
        let mut task = TaskState::new();
        let _ = task.start();
        for handle in 1..=3 {
            task.arm(handle);
            assert_eq!(task.pending(), Some(handle));
            assert!(task.fire());
        }
        assert_eq!(task.runs(), 3);
        assert_eq!(task.pending(), None);
    }

    #[test]
    fn cancel_returns_pending_handle_and_blocks_late_fire() {
        let mut task = TaskState::new();
        let _ = task.start();
        task.arm(7);
        assert_eq!(task.cancel(), Some(7));
        assert!(!task.fire());
        assert_eq!(task.runs(), 0);
        assert_eq!(task.cancel(), None);
    }

    #[test]
    fn restart_after_cancel() {
        let mut task = TaskState::new();
        let _ = task.start();
        let _ = task.cancel();
        assert!(task.start());
        assert!(task.fire());
    }

    #[test]
    fn unscheduled_start_can_be_retried() {
        let mut task = TaskState::new();
        assert!(task.start());
        // The host refused to schedule: nothing was armed.
        assert_eq!(task.cancel(), None);
        assert!(!task.is_active());
        assert!(task.start());
        task.arm(3);
        assert!(task.fire());
        assert_eq!(task.runs(), 1);
    }
}
