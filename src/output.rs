//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Borrower, CreditClient, Debt};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output suitable for
/// terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Borrower {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.id.len().max(30));

        let mut lines = vec![
            format!("Borrower: {}", self.id),
            divider,
            format!("Persona:        {}", self.persona),
        ];

        if let Some(ref label) = self.label {
            lines.push(format!("Label:          {}", label));
        }

        if !self.tags.is_empty() {
            lines.push(format!("Tags:           {}", self.tags.join(", ")));
        }

        lines.push(format!(
            "Created:        {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        lines.join("\n")
    }
}

impl PrettyPrint for CreditClient {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.id.len().max(30));

        let mut lines = vec![
            format!("Client: {}", self.id),
            divider,
            format!("Legal Name:     {}", self.legal_name),
            format!("Status:         {}", self.status),
            format!("Tax Id:         {}", self.tax_id),
            format!("Partner:        {}", self.partner_id),
        ];

        if let Some(ref phone) = self.phone_number {
            lines.push(format!("Phone:          {}", phone));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Debt {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.id.len().max(30));

        vec![
            format!("Debt: {}", self.id),
            divider,
            format!("Status:         {} / {}", self.status, self.sub_status),
            format!(
                "Balance:        {} {}",
                self.balance.total.amount, self.balance.total.currency
            ),
            format!("Reference:      {}", self.reference_id),
            format!("Flow:           {}", self.flow_id),
        ]
        .join("\n")
    }
}
