// ============================================================================
// Ledger Core - Contact Service
// File: crates/ledger-core/src/services/contact_service.rs
// ============================================================================
//! Contact façade: create, update, get, list and the seeded-record archive

use ledger_shared::constants::MAX_ARCHIVE_BATCH;
use ledger_shared::utils::mask_email;
use ledger_shared::ArchivePolicy;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::gateway::Gateway;
use crate::domain::{Contact, ContactDraft, ContactStatus, Filter, ListQuery};
use crate::error::LedgerError;
use crate::session::Session;
use crate::transport::Transport;

pub struct ContactService<T: Transport> {
    gateway: Gateway<T>,
    seed_prefix: Option<String>,
}

impl<T: Transport> ContactService<T> {
    pub fn new(gateway: Gateway<T>, seed_prefix: Option<String>) -> Self {
        Self {
            gateway,
            seed_prefix: seed_prefix.filter(|p| !p.is_empty()),
        }
    }

    pub fn seed_prefix(&self) -> Option<&str> {
        self.seed_prefix.as_deref()
    }

    /// Create a customer contact. With a seed prefix configured the name is
    /// tagged so `archive_seeded` can find it later.
    pub async fn create(&self, session: &Session, draft: ContactDraft) -> Result<Contact, LedgerError> {
        draft.validate()?;
        info!(email = %mask_email(&draft.email), "Creating contact");

        let contact = draft.into_contact(None, self.seed_prefix.as_deref());
        self.gateway.create(session, contact, &ListQuery::new()).await
    }

    /// Overwrite names, email and (when given) status of an existing contact.
    pub async fn update(
        &self,
        session: &Session,
        contact_id: Uuid,
        draft: ContactDraft,
    ) -> Result<Contact, LedgerError> {
        if contact_id.is_nil() {
            return Err(LedgerError::InvalidId("contact"));
        }
        draft.validate()?;

        let contact = draft.into_contact(Some(contact_id), self.seed_prefix.as_deref());
        self.gateway.update(session, contact, &ListQuery::new()).await
    }

    pub async fn get(&self, session: &Session, contact_id: Uuid) -> Result<Contact, LedgerError> {
        self.gateway.find_one(session, contact_id, ListQuery::new()).await
    }

    /// One page (up to 100 records, pages start at 1). A page set on `query`
    /// wins over `page`.
    pub async fn list(
        &self,
        session: &Session,
        page: u32,
        mut query: ListQuery,
    ) -> Result<Vec<Contact>, LedgerError> {
        query.page.get_or_insert(page);
        self.gateway.find_many(session, &query).await
    }

    /// Archive contacts whose name starts with `prefix`.
    ///
    /// Lists the first page of matches, archives at most
    /// `MAX_ARCHIVE_BATCH` of them one by one, then lists again and returns
    /// that second listing. Updates already made are not rolled back when a
    /// later one fails.
    pub async fn archive_seeded(
        &self,
        session: &Session,
        prefix: &str,
        policy: ArchivePolicy,
    ) -> Result<ArchiveOutcome, LedgerError> {
        if prefix.is_empty() {
            return Err(LedgerError::invalid_field(
                "prefix",
                "blank",
                "seed prefix cannot be blank",
            ));
        }

        let query = ListQuery::new().filter(Filter::name_starts_with(prefix));
        let matches = self.list(session, 1, query.clone()).await?;
        info!(
            prefix,
            matches = matches.len(),
            batch = MAX_ARCHIVE_BATCH,
            policy = policy.as_str(),
            "Archiving seeded contacts"
        );

        let mut archived = 0;
        let mut failures = Vec::new();

        for contact in matches.iter().take(MAX_ARCHIVE_BATCH) {
            match self.archive_one(session, contact).await {
                Ok(_) => archived += 1,
                Err(error) => match policy {
                    ArchivePolicy::FailFast => return Err(error),
                    ArchivePolicy::BestEffort => {
                        warn!(contact_id = ?contact.contact_id, %error, "Failed to archive contact");
                        failures.push(ArchiveFailure {
                            contact_id: contact.contact_id,
                            name: contact.name.clone(),
                            error,
                        });
                    }
                },
            }
        }

        let remaining = self.list(session, 1, query).await?;
        info!(archived, failed = failures.len(), remaining = remaining.len(), "Archive finished");

        Ok(ArchiveOutcome {
            archived,
            failures,
            remaining,
        })
    }

    async fn archive_one(&self, session: &Session, contact: &Contact) -> Result<Contact, LedgerError> {
        let contact_id = contact.contact_id.ok_or(LedgerError::InvalidId("contact"))?;
        let draft = ContactDraft::from_record(contact).with_status(ContactStatus::Archived);
        self.update(session, contact_id, draft).await
    }
}

#[derive(Debug)]
pub struct ArchiveFailure {
    pub contact_id: Option<Uuid>,
    pub name: String,
    pub error: LedgerError,
}

/// Result of one archive sweep
#[derive(Debug)]
pub struct ArchiveOutcome {
    pub archived: usize,
    /// Only populated under `ArchivePolicy::BestEffort`.
    pub failures: Vec<ArchiveFailure>,
    /// First page of matches re-queried after the updates.
    pub remaining: Vec<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::testing::{envelope, fast_limiter, gateway, param, session};
    use crate::transport::{Endpoint, MockTransport};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn seeded_record(index: usize) -> Value {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let email: String = SafeEmail().fake();
        json!({
            "ContactID": Uuid::new_v4().to_string(),
            "Name": format!("HS {} {} {}", first, last, index),
            "FirstName": first,
            "LastName": last,
            "EmailAddress": email,
            "ContactStatus": "ACTIVE"
        })
    }

    fn echo_with_id(payload: Value) -> Value {
        let mut record = payload["Contacts"][0].clone();
        if record.get("ContactID").is_none() {
            record["ContactID"] = json!(Uuid::new_v4().to_string());
        }
        envelope("Contacts", vec![record])
    }

    #[tokio::test]
    async fn test_create_validation_happens_before_limiter_and_transport() {
        let limiter = fast_limiter();
        // No expectations: any transport call panics.
        let service = ContactService::new(gateway(MockTransport::new(), &limiter), None);

        let err = service
            .create(&session(), ContactDraft::new("Acme", "Jane", "Doe", ""))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(limiter.acquired(), 0);
    }

    #[tokio::test]
    async fn test_update_validation_happens_before_limiter_and_transport() {
        let limiter = fast_limiter();
        let service = ContactService::new(gateway(MockTransport::new(), &limiter), None);

        let err = service
            .update(&session(), Uuid::new_v4(), ContactDraft::new("Acme", "", "Doe", "j@d.io"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(limiter.acquired(), 0);
    }

    #[tokio::test]
    async fn test_create_with_site_account_sends_tagged_number_and_address() {
        let mut transport = MockTransport::new();
        transport
            .expect_create()
            .withf(|_, _, payload, _| {
                let contact = &payload["Contacts"][0];
                let account = contact["AccountNumber"].as_str().unwrap_or_default();
                account.starts_with("12 Main St ")
                    && account.len() == "12 Main St ".len() + 9
                    && contact["Addresses"][0]["AddressType"] == "STREET"
                    && contact["Addresses"][0]["AddressLine1"] == "12 Main St"
            })
            .times(1)
            .returning(|_, _, payload, _| Ok(echo_with_id(payload)));

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), None);
        let draft = ContactDraft::new("Acme", "Jane", "Doe", "jane@example.com").with_site_account("12 Main St ");

        let contact = service.create(&session(), draft).await.unwrap();
        assert!(contact.account_number.unwrap().starts_with("12 Main St "));
    }

    #[tokio::test]
    async fn test_update_with_nil_id_is_rejected() {
        let limiter = fast_limiter();
        let service = ContactService::new(gateway(MockTransport::new(), &limiter), None);

        let err = service
            .update(&session(), Uuid::nil(), ContactDraft::new("Acme", "Jane", "Doe", "j@d.io"))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::InvalidId("contact")));
        assert_eq!(limiter.acquired(), 0);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store: Arc<std::sync::Mutex<Option<Value>>> = Arc::default();
        let mut transport = MockTransport::new();

        let created = Arc::clone(&store);
        transport
            .expect_create()
            .withf(|_, endpoint, payload, _| {
                *endpoint == Endpoint::Contacts
                    && payload["Contacts"][0]["Name"] == "HS Acme"
                    && payload["Contacts"][0]["IsCustomer"] == true
            })
            .times(1)
            .returning(move |_, _, payload, _| {
                let response = echo_with_id(payload);
                *created.lock().unwrap() = Some(response["Contacts"][0].clone());
                Ok(response)
            });

        let stored = Arc::clone(&store);
        transport
            .expect_find()
            .times(1)
            .returning(move |_, endpoint, query| {
                assert_eq!(endpoint, Endpoint::Contacts);
                let record = stored.lock().unwrap().clone().unwrap();
                let id = record["ContactID"].as_str().unwrap().to_string();
                assert_eq!(param(&query, "IDs"), Some(id.as_str()));
                Ok(envelope("Contacts", vec![record]))
            });

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), Some("HS ".into()));
        let session = session();

        let contact = service
            .create(&session, ContactDraft::new("Acme", "Jane", "Doe", "jane@example.com"))
            .await
            .unwrap();
        let fetched = service.get(&session, contact.contact_id.unwrap()).await.unwrap();

        assert_eq!(fetched.contact_id, contact.contact_id);
        assert_eq!(fetched.name, "HS Acme");
        assert_eq!(limiter.acquired(), 2);
    }

    #[tokio::test]
    async fn test_get_nil_id_makes_no_call() {
        let limiter = fast_limiter();
        let service = ContactService::new(gateway(MockTransport::new(), &limiter), None);

        let err = service.get(&session(), Uuid::nil()).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidId("contact")));
        assert_eq!(limiter.acquired(), 0);
    }

    #[tokio::test]
    async fn test_get_shape_mismatch() {
        let mut transport = MockTransport::new();
        transport
            .expect_find()
            .times(1)
            .returning(|_, _, _| Ok(envelope("Contacts", vec![seeded_record(1), seeded_record(2)])));

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), None);

        let err = service.get(&session(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, LedgerError::ShapeMismatch { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_list_defaults_page_and_keeps_caller_filter() {
        let mut transport = MockTransport::new();
        transport.expect_find().times(1).returning(|_, _, query| {
            assert_eq!(param(&query, "page"), Some("3"));
            assert_eq!(param(&query, "where"), Some("IsCustomer==true"));
            Ok(envelope("Contacts", vec![]))
        });

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), None);
        let contacts = service
            .list(&session(), 3, ListQuery::new().filter(Filter::raw("IsCustomer==true")))
            .await
            .unwrap();

        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let mut transport = MockTransport::new();
        transport.expect_create().times(1).returning(|_, _, _, _| {
            Err(TransportError::Status {
                status: 400,
                body: "A validation exception occurred".into(),
            })
        });

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), None);
        let err = service
            .create(&session(), ContactDraft::new("Acme", "Jane", "Doe", "jane@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Transport(TransportError::Status { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_archive_is_bounded_and_returns_requery() {
        let finds = Arc::new(AtomicUsize::new(0));
        let mut transport = MockTransport::new();

        let find_calls = Arc::clone(&finds);
        transport.expect_find().times(2).returning(move |_, _, query| {
            assert_eq!(param(&query, "where"), Some(r#"Name!=null&&Name.StartsWith("HS ")"#));
            assert_eq!(param(&query, "page"), Some("1"));
            match find_calls.fetch_add(1, Ordering::SeqCst) {
                0 => Ok(envelope("Contacts", (0..40).map(seeded_record).collect())),
                _ => Ok(envelope("Contacts", (0..9).map(seeded_record).collect())),
            }
        });

        let update_finds = Arc::clone(&finds);
        transport
            .expect_update()
            .withf(|_, _, payload, _| payload["Contacts"][0]["ContactStatus"] == "ARCHIVED")
            .times(31)
            .returning(move |_, _, payload, _| {
                // Every update happens between the two listings.
                assert_eq!(update_finds.load(Ordering::SeqCst), 1);
                Ok(echo_with_id(payload))
            });

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), Some("HS ".into()));
        let outcome = service
            .archive_seeded(&session(), "HS ", ArchivePolicy::FailFast)
            .await
            .unwrap();

        assert_eq!(outcome.archived, 31);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.remaining.len(), 9);
        assert_eq!(finds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_archive_fail_fast_stops_at_first_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_find()
            .times(1)
            .returning(|_, _, _| Ok(envelope("Contacts", (0..5).map(seeded_record).collect())));
        transport.expect_update().times(1).returning(|_, _, _, _| {
            Err(TransportError::Status { status: 429, body: "rate limit".into() })
        });

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), None);
        let err = service
            .archive_seeded(&session(), "HS ", ArchivePolicy::FailFast)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Transport(TransportError::Status { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn test_archive_best_effort_collects_failures() {
        let mut transport = MockTransport::new();
        let finds = Arc::new(AtomicUsize::new(0));
        let find_calls = Arc::clone(&finds);
        transport.expect_find().times(2).returning(move |_, _, _| {
            match find_calls.fetch_add(1, Ordering::SeqCst) {
                0 => Ok(envelope("Contacts", (0..3).map(seeded_record).collect())),
                _ => Ok(envelope("Contacts", vec![])),
            }
        });

        let updates = Arc::new(AtomicUsize::new(0));
        let update_calls = Arc::clone(&updates);
        transport.expect_update().times(3).returning(move |_, _, payload, _| {
            if update_calls.fetch_add(1, Ordering::SeqCst) == 1 {
                Err(TransportError::Network("connection reset".into()))
            } else {
                Ok(echo_with_id(payload))
            }
        });

        let limiter = fast_limiter();
        let service = ContactService::new(gateway(transport, &limiter), None);
        let outcome = service
            .archive_seeded(&session(), "HS ", ArchivePolicy::BestEffort)
            .await
            .unwrap();

        assert_eq!(outcome.archived, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.remaining.is_empty());
    }

    #[tokio::test]
    async fn test_archive_requires_prefix() {
        let limiter = fast_limiter();
        let service = ContactService::new(gateway(MockTransport::new(), &limiter), None);
        let err = service
            .archive_seeded(&session(), "", ArchivePolicy::FailFast)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
