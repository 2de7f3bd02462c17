//! Escalate Core - customer escalation tracking
//!
//! The session-scoped workflow behind the tracker:
//! - Classifies issue text into sentiment, urgency and an escalation flag
//! - Appends cases to an ordered, session-owned store
//! - Projects the store onto an Open / In Progress / Resolved board
//! - Imports cases from decoded spreadsheets and projects them for export
//!
//! # Example
//!
//! ```rust
//! use escalate_core::{ManualEntry, Session, Status, TrackerConfig};
//!
//! let mut session = Session::new(TrackerConfig::new()).unwrap();
//! let receipt = session
//!     .log_manual(ManualEntry::new("The delivery was delayed and this is urgent"))
//!     .unwrap();
//! assert!(receipt.escalated);
//!
//! let board = session.board();
//! board.open[0].change_status(session.store_mut(), Status::Resolved).unwrap();
//! assert_eq!(session.board().resolved.len(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod board;
pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod intake;
pub mod session;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use board::{project, Board, Card, CardTone, IntegrityAnomaly};
pub use classifier::Classifier;
pub use config::{FieldDefaults, IdFormat, ImportSettings, ProfileName, TrackerConfig, Vocabulary};
pub use error::{ConfigError, ImportError, StoreError, ValidationError};
pub use export::{ExportCell, ExportRow, DATE_FORMAT, EXPORT_COLUMNS};
pub use intake::{
    import_table, normalize_header, parse_date, preview_row, ImportProfile, ImportReport,
    ImportSelection, RowPreview, RowWarning, Table,
};
pub use session::{LogReceipt, ManualEntry, Session};
pub use store::CaseStore;
pub use types::{
    is_escalation, Assessment, Case, CaseDraft, CaseId, CaseStatus, Criticality, Sentiment,
    Status, Urgency,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Escalate Core
    pub use crate::{
        Board, Case, CaseId, CaseStore, Classifier, ImportProfile, ImportSelection, ManualEntry,
        Session, Status, Table, TrackerConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn manual_then_import_then_board() {
        let mut session = Session::new(TrackerConfig::new()).unwrap();
        session
            .log_manual(ManualEntry::new("Thanks, all good"))
            .unwrap();

        let table = Table::from_strs(
            &["Brief Issue", "Status"],
            &[&["Critical failure in billing", "In Progress"], &["Archive", "Closed"]],
        );
        let report = session
            .import(&table, &ImportProfile::Minimal, ImportSelection::All)
            .unwrap();
        assert_eq!(report.created, vec![CaseId(2), CaseId(3)]);
        assert_eq!(report.escalated, 1);

        let board = session.board();
        assert_eq!(board.open.len(), 1);
        assert_eq!(board.in_progress.len(), 1);
        assert_eq!(board.anomalies.len(), 1);
        assert_eq!(board.anomalies[0].case_id, CaseId(3));
    }
}
