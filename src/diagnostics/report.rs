use std::fmt;

/// Result of a single diagnostic check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    /// Passed, but the operator should read the warning
    Warning,
    Failed,
    /// Not run because an earlier check halted the sequence
    Skipped,
}

impl CheckStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckStatus::Failed)
    }
}

/// Identifies each check in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckId {
    EnvFile,
    Resolution,
    Credentials,
    Mode,
    Strategy,
}

impl CheckId {
    pub const ALL: [CheckId; 5] = [
        CheckId::EnvFile,
        CheckId::Resolution,
        CheckId::Credentials,
        CheckId::Mode,
        CheckId::Strategy,
    ];

    /// A failure here makes the remaining checks meaningless
    pub fn halts_on_failure(&self) -> bool {
        matches!(self, CheckId::EnvFile | CheckId::Resolution)
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckId::EnvFile => "environment file",
            CheckId::Resolution => "configuration",
            CheckId::Credentials => "API credentials",
            CheckId::Mode => "trading mode",
            CheckId::Strategy => "strategy",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub id: CheckId,
    pub status: CheckStatus,
}

/// Aggregated outcome of a diagnostic run
#[derive(Debug, Clone, Default)]
pub struct Report {
    outcomes: Vec<CheckOutcome>,
}

impl Report {
    pub fn record(&mut self, id: CheckId, status: CheckStatus) {
        self.outcomes.push(CheckOutcome { id, status });
    }

    /// Mark every check not yet recorded as skipped
    pub fn skip_remaining(&mut self) {
        for id in CheckId::ALL {
            if self.status(id).is_none() {
                self.record(id, CheckStatus::Skipped);
            }
        }
    }

    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn status(&self, id: CheckId) -> Option<CheckStatus> {
        self.outcomes.iter().find(|o| o.id == id).map(|o| o.status)
    }

    pub fn failures(&self) -> impl Iterator<Item = CheckId> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_failure())
            .map(|o| o.id)
    }

    pub fn has_warnings(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.status == CheckStatus::Warning)
    }

    /// The check that stopped the run, if any
    pub fn halted_at(&self) -> Option<CheckId> {
        self.failures().find(|id| id.halts_on_failure())
    }

    pub fn passed(&self) -> bool {
        !self.outcomes.is_empty() && self.failures().next().is_none()
    }

    /// Process exit status: 0 on full success, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_does_not_pass() {
        let report = Report::default();
        assert!(!report.passed());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_warning_still_passes() {
        let mut report = Report::default();
        for id in CheckId::ALL {
            report.record(id, CheckStatus::Passed);
        }
        report.outcomes[3].status = CheckStatus::Warning;

        assert!(report.passed());
        assert!(report.has_warnings());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_halted_report() {
        let mut report = Report::default();
        report.record(CheckId::EnvFile, CheckStatus::Failed);
        report.skip_remaining();

        assert_eq!(report.halted_at(), Some(CheckId::EnvFile));
        assert_eq!(report.status(CheckId::Strategy), Some(CheckStatus::Skipped));
        assert_eq!(report.outcomes().len(), 5);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_credential_failure_does_not_halt() {
        let mut report = Report::default();
        report.record(CheckId::Credentials, CheckStatus::Failed);
        assert_eq!(report.halted_at(), None);
        assert!(!report.passed());
    }
}
