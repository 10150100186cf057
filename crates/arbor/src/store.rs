//! Caller-owned storage for computed reports.

use crate::report::ChartReport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Opaque handle for a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(Uuid);

impl ReportId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct ReportStore {
    reports: HashMap<ReportId, ChartReport>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, report: ChartReport) -> ReportId {
        let id = ReportId::new();
        self.reports.insert(id, report);
        id
    }

    pub fn get(&self, id: ReportId) -> Option<&ChartReport> {
        self.reports.get(&id)
    }

    /// Remove and return a report.
    pub fn take(&mut self, id: ReportId) -> Option<ChartReport> {
        self.reports.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
