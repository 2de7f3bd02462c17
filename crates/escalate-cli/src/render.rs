//! Terminal rendering
//!
//! Every function returns a `String` so the session loop can write to any
//! sink. Color is applied only when the renderer was built with it.

use escalate_core::{
    Assessment, Board, Card, CardTone, CaseStore, ImportReport, LogReceipt, RowPreview, Status,
};
use owo_colors::{OwoColorize, Style};
use std::fmt::Write as _;

/// Printed instead of the board when nothing has been logged
pub const EMPTY_BOARD: &str = "No escalations logged yet.";

const INDENT: &str = "    ";

/// Text renderer for tracker output
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
    width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            color: false,
            width: 78,
        }
    }
}

impl Renderer {
    /// Create renderer
    #[inline]
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// With wrap width for issue text
    #[inline]
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(INDENT.len() + 10);
        self
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn tone_style(tone: CardTone) -> Style {
        match tone {
            CardTone::Escalated => Style::new().bright_red().bold(),
            CardTone::Urgent => Style::new().yellow(),
            CardTone::Routine => Style::new().green(),
        }
    }

    fn wrap(&self, text: &str) -> String {
        let options = textwrap::Options::new(self.width)
            .initial_indent(INDENT)
            .subsequent_indent(INDENT);
        textwrap::fill(text, options)
    }

    /// Classification summary for `classify`
    #[must_use]
    pub fn assessment(&self, assessment: &Assessment) -> String {
        let escalated = if assessment.escalated {
            self.paint("yes", Self::tone_style(CardTone::Escalated))
        } else {
            "no".to_string()
        };
        let mut out = String::new();
        let _ = writeln!(out, "Sentiment: {}", assessment.sentiment);
        let _ = writeln!(out, "Urgency:   {}", assessment.urgency);
        let _ = writeln!(out, "Escalated: {escalated}");
        if !assessment.negative_terms.is_empty() {
            let _ = writeln!(out, "Negative terms: {}", assessment.negative_terms.join(", "));
        }
        if !assessment.urgency_terms.is_empty() {
            let _ = writeln!(out, "Urgency terms:  {}", assessment.urgency_terms.join(", "));
        }
        out
    }

    /// Banner for a manual log
    #[must_use]
    pub fn receipt(&self, receipt: &LogReceipt) -> String {
        let tone = if receipt.escalated {
            CardTone::Escalated
        } else {
            CardTone::Routine
        };
        format!("{}\n", self.paint(&receipt.banner(), Self::tone_style(tone)))
    }

    /// One card
    #[must_use]
    pub fn card(&self, card: &Card) -> String {
        let tag = match card.tone {
            CardTone::Escalated => "ESCALATED",
            CardTone::Urgent => "URGENT",
            CardTone::Routine => "ROUTINE",
        };
        let criticality = card.criticality.map_or("-", |c| c.as_str());
        let reported = card
            .reported
            .map_or_else(|| "-".to_string(), |d| d.format(escalate_core::DATE_FORMAT).to_string());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "[{}] {}  {}",
            card.label,
            self.paint(tag, Self::tone_style(card.tone)),
            card.customer
        );
        let _ = writeln!(out, "{}", self.wrap(&card.issue));
        let _ = writeln!(
            out,
            "{INDENT}{} / {} | Criticality: {criticality} | Reported: {reported}",
            card.sentiment, card.urgency
        );
        let _ = writeln!(out, "{INDENT}Owner: {} | Action: {}", card.owner, card.action_taken);
        out
    }

    /// Board in Open, In Progress, Resolved order, then any anomalies
    #[must_use]
    pub fn board(&self, board: &Board) -> String {
        if board.is_empty() && board.anomalies.is_empty() {
            return format!("{EMPTY_BOARD}\n");
        }

        let mut out = String::new();
        for (status, cards) in board.columns() {
            let heading = format!("{} ({})", status.as_str().to_uppercase(), cards.len());
            let _ = writeln!(out, "{}", self.paint(&heading, Style::new().bold()));
            let _ = writeln!(out, "{}", "-".repeat(heading.len()));
            if cards.is_empty() {
                let _ = writeln!(out, "{INDENT}(none)");
            }
            for card in cards {
                out.push_str(&self.card(card));
            }
            out.push('\n');
        }
        for anomaly in &board.anomalies {
            let _ = writeln!(out, "{} {anomaly}", self.paint("[WARNING]", Style::new().yellow()));
        }
        out
    }

    /// One line per case in creation order
    #[must_use]
    pub fn case_list(&self, store: &CaseStore) -> String {
        if store.is_empty() {
            return format!("{EMPTY_BOARD}\n");
        }
        let mut out = String::new();
        for case in store.list_all() {
            let flag = if case.escalated() { "!" } else { " " };
            let _ = writeln!(
                out,
                "{flag} {:<12} {:<12} {:<20} {}",
                store.render_id(case.id()),
                case.status().as_str(),
                case.customer(),
                case.issue()
            );
        }
        out
    }

    /// Import summary with skipped-row warnings
    #[must_use]
    pub fn import_report(&self, report: &ImportReport, store: &CaseStore) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Imported {} case(s), {} escalated",
            report.created.len(),
            report.escalated
        );
        if let (Some(first), Some(last)) = (report.created.first(), report.created.last()) {
            let _ = writeln!(out, "Ids: {} .. {}", store.render_id(*first), store.render_id(*last));
        }
        for warning in &report.warnings {
            let _ = writeln!(out, "{} {warning}", self.paint("[SKIPPED]", Style::new().yellow()));
        }
        out
    }

    /// Row fields followed by the would-be classification
    #[must_use]
    pub fn preview(&self, preview: &RowPreview) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Row {}", preview.row);
        let label_width = preview.fields.iter().map(|(h, _)| h.len()).max().unwrap_or(0);
        for (header, value) in &preview.fields {
            let _ = writeln!(out, "{INDENT}{header:<label_width$}  {value}");
        }
        match &preview.assessment {
            Some(assessment) => out.push_str(&self.assessment(assessment)),
            None => out.push_str("No issue text to classify\n"),
        }
        out
    }

    /// Confirmation after a status change
    #[must_use]
    pub fn status_changed(&self, label: &str, status: Status) -> String {
        format!("{label} moved to {status}\n")
    }
}
