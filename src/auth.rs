use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Customer,
    Admin,
}

/// An authenticated caller, resolved from the `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub role: Role,
}

impl Caller {
    pub fn from_token(token: &str, config: &AppConfig) -> Option<Self> {
        let role = if !config.admin_token.is_empty() && token == config.admin_token {
            Role::Admin
        } else if !config.customer_token.is_empty() && token == config.customer_token {
            Role::Customer
        } else {
            return None;
        };
        Some(Self { role })
    }

    /// Admins pass every customer check.
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.role >= role {
            Ok(())
        } else {
            tracing::warn!(?role, caller = ?self.role, "insufficient role");
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        Caller::from_token(token, &state.config).ok_or(AppError::Unauthorized)
    }
}
