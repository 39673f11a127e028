//! Client session
//!
//! Per-connection state: who the client is acting as and which request
//! context, if any, its page lookups carry.

use crate::auth::Principal;
use crate::page::RequestContext;

/// State of a connected client
#[derive(Debug, Clone, Default)]
pub struct Session {
    principal: Principal,
    host: Option<(String, bool)>,
}

impl Session {
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn set_principal(&mut self, principal: Principal) {
        self.principal = principal;
    }

    pub fn set_host(&mut self, host: String, secure: bool) {
        self.host = Some((host, secure));
    }

    pub fn clear_host(&mut self) {
        self.host = None;
    }

    /// Request context for a lookup of `page_path`, if a host is set
    pub fn request_context(&self, page_path: &str) -> Option<RequestContext> {
        self.host
            .as_ref()
            .map(|(host, secure)| RequestContext::new(host, *secure, &format!("/{page_path}")))
    }

    /// Forget the principal and request context.
    pub fn reset(&mut self) {
        self.principal = Principal::Anonymous;
        self.host = None;
    }
}
