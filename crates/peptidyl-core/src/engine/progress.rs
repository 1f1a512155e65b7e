/// Events emitted by long-running operations such as peptide assembly or
/// batch signature computation.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// A reporter without a callback silently drops every event, so library code
/// can report unconditionally.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `work` as a named phase with `total_steps` increments.
    ///
    /// The phase and task are closed whether or not `work` succeeds.
    pub fn phase<T>(
        &self,
        name: &'static str,
        total_steps: u64,
        work: impl FnOnce(&Self) -> T,
    ) -> T {
        self.report(Progress::PhaseStart { name });
        self.report(Progress::TaskStart { total_steps });
        let result = work(self);
        self.report(Progress::TaskFinish);
        self.report(Progress::PhaseFinish);
        result
    }
}
