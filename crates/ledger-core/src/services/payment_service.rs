// ============================================================================
// Ledger Core - Payment Service
// File: crates/ledger-core/src/services/payment_service.rs
// ============================================================================

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::gateway::Gateway;
use crate::domain::{ListQuery, Payment, PaymentDraft};
use crate::error::LedgerError;
use crate::session::Session;
use crate::transport::Transport;

pub struct PaymentService<T: Transport> {
    gateway: Gateway<T>,
}

impl<T: Transport> PaymentService<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self { gateway }
    }

    /// Record an authorised receivable payment against an invoice. `query`
    /// is forwarded untouched.
    pub async fn create(
        &self,
        session: &Session,
        draft: PaymentDraft,
        query: ListQuery,
    ) -> Result<Payment, LedgerError> {
        draft.validate()?;
        info!(invoice_id = %draft.invoice_id, amount = draft.amount, "Recording payment");

        self.gateway.create(session, draft.into_payment(), &query).await
    }

    pub async fn get(&self, session: &Session, payment_id: Uuid) -> Result<Payment, LedgerError> {
        self.gateway.find_one(session, payment_id, ListQuery::new()).await
    }

    pub async fn list(&self, session: &Session, page: u32, query: ListQuery) -> Result<Vec<Payment>, LedgerError> {
        self.gateway.find_many(session, &query.page(page)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Filter;
    use crate::testing::{envelope, fast_limiter, gateway, param, session};
    use crate::transport::{Endpoint, MockTransport};
    use chrono::NaiveDate;
    use serde_json::json;

    fn draft(amount: f64) -> PaymentDraft {
        PaymentDraft::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            amount,
            "Payment for INV-0001",
            "090",
        )
    }

    #[tokio::test]
    async fn test_create_forwards_caller_query() {
        let mut transport = MockTransport::new();
        transport
            .expect_create()
            .withf(|_, endpoint, payload, query| {
                let payment = &payload["Payments"][0];
                *endpoint == Endpoint::Payments
                    && payment["PaymentType"] == "ACCRECPAYMENT"
                    && payment["Status"] == "AUTHORISED"
                    && payment["Account"]["Code"] == "090"
                    && param(query, "summaryOnly") == Some("true")
            })
            .times(1)
            .returning(|_, _, payload, _| {
                let mut record = payload["Payments"][0].clone();
                record["PaymentID"] = json!(Uuid::new_v4().to_string());
                Ok(envelope("Payments", vec![record]))
            });

        let limiter = fast_limiter();
        let service = PaymentService::new(gateway(transport, &limiter));
        let payment = service
            .create(&session(), draft(50.0), ListQuery::new().summary_only(true))
            .await
            .unwrap();

        assert!(payment.payment_id.is_some());
        assert_eq!(payment.amount, Some(50.0));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let limiter = fast_limiter();
        let service = PaymentService::new(gateway(MockTransport::new(), &limiter));

        for amount in [0.0, -10.0] {
            let err = service
                .create(&session(), draft(amount), ListQuery::new())
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(limiter.acquired(), 0);
    }

    #[tokio::test]
    async fn test_get_returns_shape_mismatch_on_empty() {
        let mut transport = MockTransport::new();
        transport
            .expect_find()
            .times(1)
            .returning(|_, _, _| Ok(envelope("Payments", vec![])));

        let limiter = fast_limiter();
        let service = PaymentService::new(gateway(transport, &limiter));
        let err = service.get(&session(), Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, LedgerError::ShapeMismatch { count: 0, .. }));
    }

    #[tokio::test]
    async fn test_list_sets_page() {
        let mut transport = MockTransport::new();
        transport.expect_find().times(1).returning(|_, _, query| {
            assert_eq!(param(&query, "page"), Some("1"));
            assert_eq!(param(&query, "where"), Some(r#"Reference=="Payment for INV-0001""#));
            Ok(envelope("Payments", vec![json!({ "Amount": 50.0 })]))
        });

        let limiter = fast_limiter();
        let service = PaymentService::new(gateway(transport, &limiter));
        let query = ListQuery::new().filter(Filter::field_equals("Reference", "Payment for INV-0001"));
        let payments = service.list(&session(), 1, query).await.unwrap();

        assert_eq!(payments.len(), 1);
    }
}
