//! Entity façades. Each one validates locally, then goes through the shared
//! `Gateway` for pacing and response shape checks.

pub mod gateway;
pub mod contact_service;
pub mod item_service;
pub mod invoice_service;
pub mod payment_service;
pub mod history_service;
pub mod user_service;

pub use contact_service::{ArchiveFailure, ArchiveOutcome, ContactService};
pub use gateway::Gateway;
pub use history_service::HistoryService;
pub use invoice_service::InvoiceService;
pub use item_service::ItemService;
pub use payment_service::PaymentService;
pub use user_service::UserService;
