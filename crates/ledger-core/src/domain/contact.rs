// ============================================================================
// Ledger Core - Contact Entity
// File: crates/ledger-core/src/domain/contact.rs
// Description: Customer contact record and its write draft
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Contact status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContactStatus {
    Active,
    Archived,
    GdprRequest,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Active => "ACTIVE",
            ContactStatus::Archived => "ARCHIVED",
            ContactStatus::GdprRequest => "GDPRREQUEST",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Some(ContactStatus::Active),
            "ARCHIVED" => Some(ContactStatus::Archived),
            "GDPRREQUEST" => Some(ContactStatus::GdprRequest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AddressType {
    Pobox,
    Street,
    Delivery,
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub address_type: AddressType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention_to: Option<String>,
}

impl Address {
    pub fn street(line1: impl Into<String>) -> Self {
        Self {
            address_type: AddressType::Street,
            address_line1: Some(line1.into()),
            address_line2: None,
            address_line3: None,
            address_line4: None,
            city: None,
            region: None,
            postal_code: None,
            country: None,
            attention_to: None,
        }
    }
}

/// Contact record as stored upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(rename = "ContactID", default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<Uuid>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_status: Option<ContactStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_customer: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
}

/// Fields accepted when creating or updating a contact
#[derive(Debug, Clone, Validate)]
pub struct ContactDraft {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: String,

    #[validate(length(min = 1, message = "first name cannot be blank"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "last name cannot be blank"))]
    pub last_name: String,

    #[validate(length(min = 1, message = "email cannot be blank"))]
    pub email: String,

    pub status: Option<ContactStatus>,
    pub addresses: Vec<Address>,
    pub account_number: Option<String>,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            status: None,
            addresses: Vec::new(),
            account_number: None,
        }
    }

    /// Draft carrying the names, email and account number of an existing
    /// record, for updates that only change status.
    pub fn from_record(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            first_name: contact.first_name.clone().unwrap_or_default(),
            last_name: contact.last_name.clone().unwrap_or_default(),
            email: contact.email_address.clone().unwrap_or_default(),
            status: contact.contact_status,
            addresses: Vec::new(),
            account_number: contact.account_number.clone(),
        }
    }

    pub fn with_status(mut self, status: ContactStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    /// Street address at `site` plus an account number derived from it,
    /// tagged so contacts sharing a site stay distinct.
    pub fn with_site_account(self, site: &str) -> Self {
        let account_number = tagged_account_number(site);
        self.with_address(Address::street(site.trim()))
            .with_account_number(account_number)
    }

    /// Build the wire record. With a seed prefix the name is tagged so the
    /// record can later be found by the archive sweep; names that already
    /// carry the prefix are left alone.
    pub fn into_contact(self, contact_id: Option<Uuid>, seed_prefix: Option<&str>) -> Contact {
        let name = match seed_prefix {
            Some(prefix) if !prefix.is_empty() && !self.name.starts_with(prefix) => {
                format!("{}{}", prefix, self.name)
            }
            _ => self.name,
        };

        Contact {
            contact_id,
            name,
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            email_address: Some(self.email),
            contact_status: self.status,
            account_number: self.account_number,
            is_customer: Some(true),
            addresses: if self.addresses.is_empty() {
                None
            } else {
                Some(self.addresses)
            },
        }
    }
}

/// `"<base> <9 char suffix>"`, unique enough to keep account numbers distinct
/// when several contacts share one base (e.g. a site address).
pub fn tagged_account_number(base: &str) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("{} {}", base.trim(), suffix)
}
