//! Explicit per-request context
//!
//! Carries the acting user and the client IP from the HTTP edge into the
//! services. Built once per request by the API layer; background jobs use
//! [`RequestContext::background`].

use std::net::IpAddr;

use doi_common::AppError;
use doi_core::entities::{UserRole, UNKNOWN_IP};
use doi_core::DomainError;

use super::error::ServiceResult;

/// Who is acting and from where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    user_id: Option<i64>,
    role: Option<UserRole>,
    ip_address: String,
}

impl RequestContext {
    /// Anonymous context with an already-resolved client IP
    pub fn new(ip_address: impl Into<String>) -> Self {
        let ip_address = ip_address.into();
        Self {
            user_id: None,
            role: None,
            ip_address: if ip_address.trim().is_empty() {
                UNKNOWN_IP.to_string()
            } else {
                ip_address
            },
        }
    }

    /// Context for work that did not originate from an HTTP request
    pub fn background() -> Self {
        Self::new(UNKNOWN_IP)
    }

    /// Anonymous context with the client IP resolved from request sources
    pub fn from_sources(
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
        remote_addr: Option<IpAddr>,
    ) -> Self {
        Self::new(resolve_client_ip(forwarded_for, real_ip, remote_addr))
    }

    /// Attach the authenticated user
    pub fn with_user(mut self, user_id: i64, role: UserRole) -> Self {
        self.user_id = Some(user_id);
        self.role = Some(role);
        self
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin)
    }

    /// The acting user's id, or `MissingAuth`
    pub fn require_user(&self) -> ServiceResult<i64> {
        self.user_id.ok_or_else(|| AppError::MissingAuth.into())
    }

    /// The acting user's id if they are an administrator
    pub fn require_admin(&self) -> ServiceResult<i64> {
        let user_id = self.require_user()?;
        if !self.is_admin() {
            return Err(DomainError::AdminRequired.into());
        }
        Ok(user_id)
    }
}

/// Client IP by priority: first `X-Forwarded-For` entry, `X-Real-IP`, the
/// peer address, then `0.0.0.0`
pub fn resolve_client_ip(
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
    remote_addr: Option<IpAddr>,
) -> String {
    let forwarded = forwarded_for
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    if let Some(ip) = real_ip.map(str::trim).filter(|ip| !ip.is_empty()) {
        return ip.to_string();
    }

    remote_addr.map_or_else(|| UNKNOWN_IP.to_string(), |addr| addr.to_string())
}
