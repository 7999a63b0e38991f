//! Scripted self-test suite.
//!
//! Replays a fixed sequence of actions against a [`ClinicalStore`] and records
//! a pass/fail verdict plus a timestamped log per case. The store is reset to
//! seed data before each run.

mod checks;

pub use checks::{LOAD_PATIENT_COUNT, TEST_PATIENT_ID};

use std::time::Duration;

use crate::models::{TestCase, TestStatus};
use crate::store::ClinicalStore;

use checks::{Step, SUITE};

/// Delay between steps when a human is watching.
pub const DEFAULT_STEP_PACE: Duration = Duration::from_millis(800);

/// Outcome counts of a suite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs the scripted cases one after another.
#[derive(Debug, Clone)]
pub struct TestRunner {
    cases: Vec<TestCase>,
    pace: Duration,
    active: Option<String>,
}

impl TestRunner {
    /// Create a runner that sleeps `pace` between steps.
    pub fn new(pace: Duration) -> Self {
        Self {
            cases: initial_cases(),
            pace,
            active: None,
        }
    }

    /// Runner without delays.
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Id of the case currently executing.
    pub fn active_case(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Every case's log lines, in case order.
    pub fn all_logs(&self) -> Vec<&str> {
        self.cases
            .iter()
            .flat_map(|c| c.logs().iter().map(String::as_str))
            .collect()
    }

    /// Restore pending cases and reset the store to seed data.
    pub fn reset(&mut self, store: &mut ClinicalStore) {
        self.cases = initial_cases();
        self.active = None;
        store.reset_data();
    }

    /// Delay between steps of a paced run.
    pub fn pace(&self) -> Duration {
        self.pace
    }

    /// Counts of passed and failed cases so far.
    pub fn summary(&self) -> RunSummary {
        self.cases
            .iter()
            .fold(RunSummary::default(), |mut summary, case| {
                match case.status {
                    TestStatus::Passed => summary.passed += 1,
                    TestStatus::Failed => summary.failed += 1,
                    TestStatus::Pending | TestStatus::Running => {}
                }
                summary
            })
    }

    /// Reset cases and store before a run.
    pub fn start(&mut self, store: &mut ClinicalStore) {
        self.reset(store);
        tracing::info!(cases = self.cases.len(), "starting scripted suite");
    }

    /// Mark case `index` as running. Returns its id, or `None` past the end.
    pub fn begin_case(&mut self, index: usize) -> Option<&str> {
        let case = self.cases.get_mut(index)?;
        case.set_status(TestStatus::Running);
        self.active = Some(case.id.clone());
        Some(case.id.as_str())
    }

    /// Run the check of case `index`, sleeping `pace` between its steps.
    ///
    /// The store is only touched inside this call; callers sharing it can
    /// hold their lock for exactly this span.
    pub fn execute_case(
        &mut self,
        index: usize,
        store: &mut ClinicalStore,
        pace: Duration,
    ) -> Option<TestStatus> {
        let &(_, _, _, check) = SUITE.get(index)?;
        let case = self.cases.get_mut(index)?;
        case.set_status(TestStatus::Running);

        let mut step = Step { case, pace };
        let status = match check(store, &mut step) {
            Ok(message) => {
                step.log(&message);
                TestStatus::Passed
            }
            Err(message) => {
                step.log(&message);
                tracing::warn!(case = %step.case.id, %message, "scripted check failed");
                TestStatus::Failed
            }
        };
        step.case.set_status(status);
        Some(status)
    }

    /// Clear the active case and report the outcome.
    pub fn finish(&mut self) -> RunSummary {
        self.active = None;
        let summary = self.summary();
        tracing::info!(passed = summary.passed, failed = summary.failed, "scripted suite finished");
        summary
    }

    /// Reset, then execute every case in order.
    pub fn run_all(&mut self, store: &mut ClinicalStore) -> RunSummary {
        self.start(store);
        for index in 0..self.cases.len() {
            self.begin_case(index);
            self.execute_case(index, store, self.pace);
        }
        self.finish()
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_PACE)
    }
}

fn initial_cases() -> Vec<TestCase> {
    SUITE
        .iter()
        .map(|(id, name, description, _)| TestCase::new(id, name, description))
        .collect()
}
