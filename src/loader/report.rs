use serde::Serialize;
use std::fmt;

/// Why a staged row was not committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    DuplicateKey,
    MissingForeignKey,
    InvariantViolation,
    MalformedRequiredField,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RejectReason::DuplicateKey => "DUPLICATE_KEY",
            RejectReason::MissingForeignKey => "MISSING_FOREIGN_KEY",
            RejectReason::InvariantViolation => "INVARIANT_VIOLATION",
            RejectReason::MalformedRequiredField => "MALFORMED_REQUIRED_FIELD",
        };
        f.write_str(code)
    }
}

/// One rejected staged row: where it was, which identity it claimed (when it
/// carried one), and the single reason it was turned away.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    /// 1-based position in the staged batch
    pub index: usize,
    /// Raw primary-key text, if present in the staging record
    pub key: Option<String>,
    pub reason: RejectReason,
    pub detail: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "row {} (key {}): {} - {}", self.index, key, self.reason, self.detail),
            None => write!(f, "row {}: {} - {}", self.index, self.reason, self.detail),
        }
    }
}

/// Per-batch outcome summary for one entity load
#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub entity: &'static str,
    accepted: u64,
    rejections: Vec<Rejection>,
}

impl LoadReport {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            accepted: 0,
            rejections: Vec::new(),
        }
    }

    pub fn accept(&mut self) {
        self.accepted += 1;
    }

    pub fn reject(
        &mut self,
        index: usize,
        key: Option<String>,
        reason: RejectReason,
        detail: impl Into<String>,
    ) {
        self.rejections.push(Rejection {
            index,
            key,
            reason,
            detail: detail.into(),
        });
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejections.len() as u64
    }

    /// Rejections in batch order
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = LoadReport::new("leagues");
        report.accept();
        report.accept();
        report.reject(3, Some("7".into()), RejectReason::DuplicateKey, "already committed");

        assert_eq!(report.accepted_count(), 2);
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(report.rejections()[0].reason, RejectReason::DuplicateKey);
    }

    #[test]
    fn test_reason_codes_render_as_screaming_snake() {
        assert_eq!(RejectReason::MissingForeignKey.to_string(), "MISSING_FOREIGN_KEY");
        assert_eq!(
            serde_json::to_string(&RejectReason::MalformedRequiredField).unwrap(),
            "\"MALFORMED_REQUIRED_FIELD\""
        );
    }
}
