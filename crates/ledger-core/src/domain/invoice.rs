// ============================================================================
// Ledger Core - Invoice Entity
// File: crates/ledger-core/src/domain/invoice.rs
// Description: Receivable invoice record, line items and write draft
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::dates;
use super::not_nil;

/// Accounts receivable, i.e. a customer invoice.
pub const INVOICE_TYPE_RECEIVABLE: &str = "ACCREC";
pub const INVOICE_STATUS_AUTHORISED: &str = "AUTHORISED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactRef {
    #[serde(rename = "ContactID")]
    pub contact_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One invoice line. Supplying `line_item_id` on update keeps the existing
/// line; lines without it are created afresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineItem {
    #[serde(rename = "LineItemID", default, skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_amount: Option<f64>,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_amount: f64) -> Self {
        Self {
            description: Some(description.into()),
            quantity: Some(quantity),
            unit_amount: Some(unit_amount),
            ..Self::default()
        }
    }

    pub fn with_item_code(mut self, code: impl Into<String>) -> Self {
        self.item_code = Some(code.into());
        self
    }

    pub fn with_account_code(mut self, code: impl Into<String>) -> Self {
        self.account_code = Some(code.into());
        self
    }

    /// Keep an existing line when the invoice is updated.
    pub fn preserving(mut self, line_item_id: Uuid) -> Self {
        self.line_item_id = Some(line_item_id);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    #[serde(rename = "InvoiceID", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Uuid>,

    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactRef>,

    #[serde(default, with = "dates::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "dates::option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,

    // Totals are computed upstream and only ever read back.
    #[serde(default, skip_serializing)]
    pub sub_total: Option<f64>,
    #[serde(default, skip_serializing)]
    pub total_tax: Option<f64>,
    #[serde(default, skip_serializing)]
    pub total: Option<f64>,
    #[serde(default, skip_serializing)]
    pub amount_due: Option<f64>,
    #[serde(default, skip_serializing)]
    pub amount_paid: Option<f64>,
}

#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_invoice_dates"))]
pub struct InvoiceDraft {
    /// Auto-generated upstream when empty.
    pub invoice_number: String,
    pub reference: String,

    #[validate(custom(function = "not_nil"))]
    pub contact_id: Uuid,

    pub date: NaiveDate,
    pub due_date: NaiveDate,

    pub line_items: Vec<LineItem>,
}

fn validate_invoice_dates(draft: &InvoiceDraft) -> Result<(), ValidationError> {
    if draft.date > draft.due_date {
        return Err(ValidationError::new("date_after_due_date")
            .with_message("date cannot be after due date".into()));
    }
    Ok(())
}

impl InvoiceDraft {
    pub fn new(contact_id: Uuid, date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            invoice_number: String::new(),
            reference: String::new(),
            contact_id,
            date,
            due_date,
            line_items: Vec::new(),
        }
    }

    pub fn with_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = invoice_number.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_line(mut self, line: LineItem) -> Self {
        self.line_items.push(line);
        self
    }

    pub fn into_invoice(self, invoice_id: Option<Uuid>) -> Invoice {
        Invoice {
            invoice_id,
            invoice_type: Some(INVOICE_TYPE_RECEIVABLE.to_string()),
            invoice_number: Some(self.invoice_number).filter(|n| !n.is_empty()),
            reference: Some(self.reference).filter(|r| !r.is_empty()),
            contact: Some(ContactRef {
                contact_id: self.contact_id,
                name: None,
            }),
            date: Some(self.date),
            due_date: Some(self.due_date),
            status: Some(INVOICE_STATUS_AUTHORISED.to_string()),
            line_items: self.line_items,
            ..Invoice::default()
        }
    }
}
