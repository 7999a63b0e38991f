//! Scripted self-test cases.

use serde::{Deserialize, Serialize};

/// Execution state of a scripted test case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pending,
    Running,
    Passed,
    Failed,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pending => "pending",
            TestStatus::Running => "running",
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TestStatus::Passed | TestStatus::Failed)
    }
}

/// A scripted test case with its log trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: TestStatus,
    /// Append-only, each entry prefixed with `[HH:MM:SS]`
    logs: Vec<String>,
}

impl TestCase {
    /// Create a pending test case with no logs.
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: TestStatus::Pending,
            logs: Vec::new(),
        }
    }

    /// Append a timestamped log line.
    pub fn log(&mut self, message: &str) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push(format!("[{}] {}", stamp, message));
    }

    pub fn set_status(&mut self, status: TestStatus) {
        self.status = status;
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}
