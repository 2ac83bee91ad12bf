//! Stub gate policies: named extension points, pass-through by default.
//!
//! None of these are mounted on the default route table. Bearer extraction
//! is the only implemented behaviour; token verification, role lookup, rate
//! accounting, and deadline enforcement are left to their collaborators.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServiceRequest;
use actix_web::http::header;
use actix_web::HttpResponse;

use super::gate::GatePolicy;
use crate::inbound::http::respond;

/// Validates a bearer token extracted from `Authorization`.
///
/// Verification is an unresolved external dependency; [`AcceptAll`] is the
/// only bundled implementation.
pub trait TokenVerifier: Send + Sync {
    /// Whether the presented token is acceptable.
    fn verify(&self, token: &str) -> bool;
}

/// Verifier accepting every presented token.
#[derive(Clone, Default)]
pub struct AcceptAll;

impl TokenVerifier for AcceptAll {
    fn verify(&self, _token: &str) -> bool {
        true
    }
}

/// Requires an `Authorization` header and hands the bearer token to the
/// verifier. A `Bearer ` prefix is stripped; the bare header value is used
/// otherwise.
#[derive(Clone)]
pub struct BearerAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl BearerAuth {
    /// Gate requests on the given verifier.
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl Default for BearerAuth {
    fn default() -> Self {
        Self::new(Arc::new(AcceptAll))
    }
}

impl GatePolicy for BearerAuth {
    fn evaluate(&self, req: &ServiceRequest) -> Result<(), HttpResponse> {
        let Some(raw) = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
        else {
            return Err(respond::unauthorized("authentication token required"));
        };
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
        if self.verifier.verify(token) {
            Ok(())
        } else {
            Err(respond::unauthorized("invalid token"))
        }
    }
}

/// Role requirement; pass-through until a role source exists.
#[derive(Clone)]
pub struct RoleCheck {
    #[expect(dead_code, reason = "consumed once a role source is attached")]
    roles: Vec<String>,
}

impl RoleCheck {
    /// Require any of the given roles.
    pub fn new(roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl GatePolicy for RoleCheck {
    fn evaluate(&self, _req: &ServiceRequest) -> Result<(), HttpResponse> {
        Ok(())
    }
}

/// Request-rate bound; pass-through until an accounting backend exists.
#[derive(Clone)]
pub struct RateLimit {
    #[expect(dead_code, reason = "consumed once rate accounting is attached")]
    limit: u32,
    #[expect(dead_code, reason = "consumed once rate accounting is attached")]
    window: Duration,
}

impl RateLimit {
    /// Allow `limit` requests per `window`.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }
}

impl GatePolicy for RateLimit {
    fn evaluate(&self, _req: &ServiceRequest) -> Result<(), HttpResponse> {
        Ok(())
    }
}

/// Per-request deadline; pass-through until deadline enforcement exists.
#[derive(Clone)]
pub struct Timeout {
    #[expect(dead_code, reason = "consumed once deadline enforcement is attached")]
    deadline: Duration,
}

impl Timeout {
    /// Bound requests to `deadline`.
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }
}

impl GatePolicy for Timeout {
    fn evaluate(&self, _req: &ServiceRequest) -> Result<(), HttpResponse> {
        Ok(())
    }
}
