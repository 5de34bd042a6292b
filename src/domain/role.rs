use crate::domain::models::RoleSnapshot;

/// Read access to the authenticated session's role.
pub trait RoleContext: Send + Sync {
    fn current_role(&self) -> RoleSnapshot;

    fn is_authenticated(&self) -> bool {
        self.current_role().is_some()
    }
}
