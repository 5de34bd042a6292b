use super::item::PaletteItem;
use crate::app::routes::{self, get_actions, get_routes, ActionDefinition, RouteDefinition};
use crate::domain::models::RoleSnapshot;
use crate::domain::role::RoleContext;
use std::sync::Arc;

/// Role-filtered destinations and actions, memoised on the role snapshot.
pub struct StaticIndexBuilder {
    roles: Arc<dyn RoleContext>,
    routes: Vec<RouteDefinition>,
    actions: Vec<ActionDefinition>,
    cache: Option<(RoleSnapshot, Arc<[PaletteItem]>)>,
}

impl StaticIndexBuilder {
    pub fn new(roles: Arc<dyn RoleContext>) -> Self {
        Self::with_registry(roles, get_routes(), get_actions())
    }

    pub fn with_registry(
        roles: Arc<dyn RoleContext>,
        routes: Vec<RouteDefinition>,
        actions: Vec<ActionDefinition>,
    ) -> Self {
        Self {
            roles,
            routes,
            actions,
            cache: None,
        }
    }

    /// Pure build: every concrete route the role may open, then every action
    /// it may run, both in registry order.
    #[must_use]
    pub fn build(
        routes: &[RouteDefinition],
        actions: &[ActionDefinition],
        role: RoleSnapshot,
    ) -> Vec<PaletteItem> {
        let destinations = routes
            .iter()
            .filter(|r| !routes::is_placeholder_path(r.path))
            .filter(|r| routes::permits(r.required_roles, role))
            .map(PaletteItem::from_route);

        let contextual = actions
            .iter()
            .filter(|a| routes::permits(a.required_roles, role))
            .map(PaletteItem::from_action);

        destinations.chain(contextual).collect()
    }

    /// Reads the current role and rebuilds only if it differs from the
    /// snapshot the cached index was built for.
    pub fn items(&mut self) -> Arc<[PaletteItem]> {
        let role = self.roles.current_role();
        if let Some((cached_role, items)) = &self.cache {
            if *cached_role == role {
                return items.clone();
            }
        }

        tracing::debug!(role = ?role, "rebuilding static palette index");
        let items: Arc<[PaletteItem]> = Self::build(&self.routes, &self.actions, role).into();
        self.cache = Some((role, items.clone()));
        items
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    #[must_use]
    pub fn role(&self) -> RoleSnapshot {
        self.roles.current_role()
    }
}
