//! Payment entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::dates;
use super::{not_nil, positive_amount};

/// Payment against an accounts receivable invoice.
pub const PAYMENT_TYPE_RECEIVABLE: &str = "ACCRECPAYMENT";
pub const PAYMENT_STATUS_AUTHORISED: &str = "AUTHORISED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceRef {
    #[serde(rename = "InvoiceID")]
    pub invoice_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRef {
    #[serde(rename = "AccountID", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    #[serde(rename = "PaymentID", default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<Uuid>,

    #[serde(default, with = "dates::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountRef>,
}

#[derive(Debug, Clone, Validate)]
pub struct PaymentDraft {
    #[validate(custom(function = "not_nil"))]
    pub invoice_id: Uuid,

    /// Must not exceed the amount outstanding on the invoice; upstream
    /// enforces that.
    #[validate(custom(function = "positive_amount"))]
    pub amount: f64,

    pub date: NaiveDate,

    #[validate(length(min = 1, message = "reference cannot be blank"))]
    pub reference: String,

    #[validate(length(min = 1, message = "account code cannot be blank"))]
    pub account_code: String,
}

impl PaymentDraft {
    pub fn new(
        invoice_id: Uuid,
        date: NaiveDate,
        amount: f64,
        reference: impl Into<String>,
        account_code: impl Into<String>,
    ) -> Self {
        Self {
            invoice_id,
            amount,
            date,
            reference: reference.into(),
            account_code: account_code.into(),
        }
    }

    pub fn into_payment(self) -> Payment {
        Payment {
            payment_id: None,
            date: Some(self.date),
            amount: Some(self.amount),
            reference: Some(self.reference),
            status: Some(PAYMENT_STATUS_AUTHORISED.to_string()),
            payment_type: Some(PAYMENT_TYPE_RECEIVABLE.to_string()),
            invoice: Some(InvoiceRef {
                invoice_id: self.invoice_id,
                invoice_number: None,
            }),
            account: Some(AccountRef {
                account_id: None,
                code: Some(self.account_code),
            }),
        }
    }
}
