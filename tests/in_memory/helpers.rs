//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use kortana::analysis::{adapters::ScriptedTextAnalyzer, services::AnalysisClient};
use kortana::task::domain::{BranchName, CommitSha, RepositorySlug};
use mockable::Clock;
use std::sync::{Arc, Mutex};

/// Clock that advances one minute per reading, so successive records have
/// strictly increasing timestamps.
#[derive(Debug)]
pub struct MinuteClock {
    now: Mutex<DateTime<Utc>>,
}

impl MinuteClock {
    /// Starts at 2026-03-01T09:00:00Z.
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid start instant");
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        *self.now.lock().expect("clock lock") += delta;
    }
}

impl Clock for MinuteClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().expect("clock lock");
        let reading = *now;
        *now += TimeDelta::minutes(1);
        reading
    }
}

/// Repository every test works against.
pub fn repository() -> RepositorySlug {
    RepositorySlug::new("KOR-TANA", "kortana").expect("valid repository")
}

/// Base branch every test branches from.
pub fn main_branch() -> BranchName {
    BranchName::new("main").expect("valid branch")
}

/// Commit at the tip of the base branch.
pub fn main_tip() -> CommitSha {
    CommitSha::new("9fceb02d0ae598e95dc970b74767f19372d61af8").expect("valid sha")
}

/// Analysis client whose analyzer always answers `reply`.
pub fn replying(reply: &str) -> (Arc<ScriptedTextAnalyzer>, AnalysisClient<ScriptedTextAnalyzer>) {
    let analyzer = Arc::new(ScriptedTextAnalyzer::replying(reply));
    let client = AnalysisClient::new(Arc::clone(&analyzer));
    (analyzer, client)
}
