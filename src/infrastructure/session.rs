use crate::domain::models::{Role, RoleSnapshot};
use crate::domain::role::RoleContext;
use std::sync::RwLock;

/// In-memory session store. Authentication itself happens elsewhere; the
/// console only needs to know which role is currently signed in.
#[derive(Debug, Default)]
pub struct SessionStore {
    role: RwLock<RoleSnapshot>,
}

impl SessionStore {
    #[must_use]
    pub fn new(role: RoleSnapshot) -> Self {
        Self {
            role: RwLock::new(role),
        }
    }

    pub fn set_role(&self, role: Role) {
        if let Ok(mut guard) = self.role.write() {
            *guard = Some(role);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.role.write() {
            *guard = None;
        }
    }
}

impl RoleContext for SessionStore {
    fn current_role(&self) -> RoleSnapshot {
        self.role.read().map(|guard| *guard).unwrap_or(None)
    }
}
