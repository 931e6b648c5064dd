use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Context of the signed-in user, as far as the console cares.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Display name of the principal (used as "last modified by").
    pub principal: String,
    /// Elevated-permission flag; toggles form defaults such as the partner status.
    pub has_rank3_scope: bool,
}

impl UserContext {
    pub fn new(principal: impl Into<String>, has_rank3_scope: bool) -> Self {
        Self {
            principal: principal.into(),
            has_rank3_scope,
        }
    }

    /// Context used before any user is known.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Publishes the current [`UserContext`] to every controller that subscribes.
///
/// Subscribers always observe the latest value; intermediate values may be
/// skipped.
#[derive(Debug)]
pub struct UserContextService {
    tx: watch::Sender<UserContext>,
}

impl UserContextService {
    pub fn new(initial: UserContext) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<UserContext> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> UserContext {
        self.tx.borrow().clone()
    }

    /// Replace the current context. Subscribers are only woken on change.
    pub fn set(&self, context: UserContext) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == context {
                false
            } else {
                *current = context;
                true
            }
        });
        if changed {
            tracing::debug!("user context updated");
        }
    }
}

impl Default for UserContextService {
    fn default() -> Self {
        Self::new(UserContext::anonymous())
    }
}
