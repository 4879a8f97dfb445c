use std::{fmt, sync::Arc};

use gompa_model::SessionUser;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::ports::identity::{AllowList, IdentityProvider};
use crate::error::{CatalogError, Result};

/// A session user that is also on the allow-list.
///
/// Only [`AdminGate`] hands these out, so holding one is proof that both
/// checks passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminPrincipal {
    user: SessionUser,
}

impl AdminPrincipal {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    AuthenticatedNonAdmin(SessionUser),
    Authorized(AdminPrincipal),
}

impl GateState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GateState::Authorized(_))
    }

    pub fn into_principal(self) -> Option<AdminPrincipal> {
        match self {
            GateState::Authorized(principal) => Some(principal),
            _ => None,
        }
    }
}

/// Session check followed by the allow-list check.
#[derive(Clone)]
pub struct AdminGate {
    identity: Arc<dyn IdentityProvider>,
    allow_list: Arc<dyn AllowList>,
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

impl AdminGate {
    pub fn new(identity: Arc<dyn IdentityProvider>, allow_list: Arc<dyn AllowList>) -> Self {
        Self {
            identity,
            allow_list,
        }
    }

    /// Resolves the caller's gate state. Collaborator failures never
    /// authorize; they land in the closest non-authorized state.
    pub async fn evaluate(&self, token: Option<&str>) -> GateState {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            debug!("admin gate: no session token");
            return GateState::Unauthenticated;
        };

        let user = match self.identity.current_user(token).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("admin gate: session unknown or expired");
                return GateState::Unauthenticated;
            }
            Err(err) => {
                warn!(error = %err, "admin gate: identity lookup failed");
                return GateState::Unauthenticated;
            }
        };

        match self.allow_list.is_allow_listed(user.id).await {
            Ok(true) => GateState::Authorized(AdminPrincipal { user }),
            Ok(false) => {
                debug!(user_id = %user.id, "admin gate: user not on allow-list");
                GateState::AuthenticatedNonAdmin(user)
            }
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "admin gate: allow-list check failed");
                GateState::AuthenticatedNonAdmin(user)
            }
        }
    }

    pub async fn require(&self, token: Option<&str>) -> Result<AdminPrincipal> {
        self.evaluate(token)
            .await
            .into_principal()
            .ok_or(CatalogError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ports::identity::{MockAllowList, MockIdentityProvider};
    use crate::database::{InMemoryAllowList, InMemoryIdentityProvider};

    fn curator() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: Some("curator@example.org".into()),
        }
    }

    #[tokio::test]
    async fn missing_token_is_unauthenticated() {
        let gate = AdminGate::new(
            Arc::new(InMemoryIdentityProvider::default()),
            Arc::new(InMemoryAllowList::default()),
        );
        assert_eq!(gate.evaluate(None).await, GateState::Unauthenticated);
        assert_eq!(gate.evaluate(Some("")).await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn unknown_session_is_unauthenticated() {
        let gate = AdminGate::new(
            Arc::new(InMemoryIdentityProvider::default()),
            Arc::new(InMemoryAllowList::default()),
        );
        assert_eq!(gate.evaluate(Some("stale")).await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn session_without_allow_list_entry_is_not_admin() {
        let identity = InMemoryIdentityProvider::default();
        let user = curator();
        identity.insert_session("tok", user.clone());

        let gate = AdminGate::new(Arc::new(identity), Arc::new(InMemoryAllowList::default()));
        assert_eq!(
            gate.evaluate(Some("tok")).await,
            GateState::AuthenticatedNonAdmin(user)
        );
        assert!(matches!(
            gate.require(Some("tok")).await,
            Err(CatalogError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn allow_listed_session_is_authorized() {
        let identity = InMemoryIdentityProvider::default();
        let allow_list = InMemoryAllowList::default();
        let user = curator();
        identity.insert_session("tok", user.clone());
        allow_list.allow(user.id);

        let gate = AdminGate::new(Arc::new(identity), Arc::new(allow_list));
        let principal = gate.require(Some("tok")).await.expect("authorized");
        assert_eq!(principal.id(), user.id);
        assert_eq!(principal.email(), Some("curator@example.org"));
    }

    #[tokio::test]
    async fn identity_failure_never_authorizes() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_user()
            .returning(|_| Err(CatalogError::Fetch("timeout".into())));
        let mut allow_list = MockAllowList::new();
        allow_list.expect_is_allow_listed().never();

        let gate = AdminGate::new(Arc::new(identity), Arc::new(allow_list));
        assert_eq!(gate.evaluate(Some("tok")).await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn allow_list_failure_never_authorizes() {
        let user = curator();
        let returned = user.clone();
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_user()
            .returning(move |_| Ok(Some(returned.clone())));
        let mut allow_list = MockAllowList::new();
        allow_list
            .expect_is_allow_listed()
            .returning(|_| Err(CatalogError::Fetch("timeout".into())));

        let gate = AdminGate::new(Arc::new(identity), Arc::new(allow_list));
        assert_eq!(
            gate.evaluate(Some("tok")).await,
            GateState::AuthenticatedNonAdmin(user)
        );
    }
}
