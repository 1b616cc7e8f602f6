//! Workflow status labels for estimation requests.
//!
//! The catalog is advisory: clients render it as the list of choices, but the
//! `status` column accepts any text. Callers that want to flag an unusual
//! label can use [`StatusCatalog::contains`].

/// Request received, nobody has picked it up yet.
pub const STATUS_NOT_STARTED: &str = "未着手";
/// Waiting for the sales side to supply drawings or specs.
pub const STATUS_AWAITING_MATERIALS: &str = "資料待ち";
/// An estimator is working on it.
pub const STATUS_IN_PROGRESS: &str = "着手中";
/// Figures are done and under internal review.
pub const STATUS_UNDER_REVIEW: &str = "検討中";
/// Waiting for a supplier quote.
pub const STATUS_AWAITING_QUOTE: &str = "見積もり待";
/// Waiting for the project to be registered in ZAC.
pub const STATUS_AWAITING_ZAC_REGISTRATION: &str = "ZAC登録待";
pub const STATUS_COMPLETED: &str = "完了";
pub const STATUS_CANCELLED: &str = "中止";

/// Labels in workflow order. The first entry is the default for new requests.
pub const STATUS_LABELS: [&str; 8] = [
    STATUS_NOT_STARTED,
    STATUS_AWAITING_MATERIALS,
    STATUS_IN_PROGRESS,
    STATUS_UNDER_REVIEW,
    STATUS_AWAITING_QUOTE,
    STATUS_AWAITING_ZAC_REGISTRATION,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Read-only, ordered set of status labels.
///
/// Built once at startup and shared through application state.
#[derive(Debug, Clone)]
pub struct StatusCatalog {
    labels: Vec<String>,
}

impl StatusCatalog {
    /// All labels in workflow order.
    pub fn options(&self) -> &[String] {
        &self.labels
    }

    /// Label assigned to a request created without an explicit status.
    pub fn default_status(&self) -> &str {
        &self.labels[0]
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self {
            labels: STATUS_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
