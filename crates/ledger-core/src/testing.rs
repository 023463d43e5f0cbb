//! Test fixtures shared by the façade tests

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use crate::limiter::RequestLimiter;
use crate::services::gateway::Gateway;
use crate::session::Session;
use crate::transport::MockTransport;

pub fn session() -> Session {
    Session::new("test-token").with_tenant("tenant-1")
}

/// Fast enough that consecutive calls in one test do not slow the suite.
pub fn fast_limiter() -> Arc<RequestLimiter> {
    Arc::new(RequestLimiter::new(Duration::from_millis(1)))
}

pub fn gateway(transport: MockTransport, limiter: &Arc<RequestLimiter>) -> Gateway<MockTransport> {
    Gateway::new(Arc::new(transport), Arc::clone(limiter), None)
}

pub fn envelope(key: &str, records: Vec<Value>) -> Value {
    let mut body = json!({ "Id": "test", "Status": "OK" });
    body[key] = Value::Array(records);
    body
}

/// Param lookup on a rendered query.
pub fn param<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
