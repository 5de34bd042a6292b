use super::fanout::RemoteResults;
use super::item::{PaletteGroup, PaletteItem};
use crate::domain::models::{Role, RoleSnapshot};
use crate::domain::role::RoleContext;
use std::collections::HashSet;
use std::sync::Arc;

/// Roles allowed to see customer and device records in search results.
pub const DEFAULT_ENTITY_ROLES: [Role; 7] = [
    Role::Manager,
    Role::Staff,
    Role::SupportTeam,
    Role::TechLead,
    Role::Technician,
    Role::Admin,
    Role::SuperAdmin,
];

#[derive(Debug, Clone, PartialEq)]
pub struct EntityVisibility {
    roles: Vec<Role>,
}

impl Default for EntityVisibility {
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_ROLES.to_vec())
    }
}

impl EntityVisibility {
    #[must_use]
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    #[must_use]
    pub fn allows(&self, role: RoleSnapshot) -> bool {
        role.is_some_and(|r| self.roles.contains(&r))
    }
}

pub struct ResultMerger {
    roles: Arc<dyn RoleContext>,
    visibility: EntityVisibility,
}

impl ResultMerger {
    pub fn new(roles: Arc<dyn RoleContext>, visibility: EntityVisibility) -> Self {
        Self { roles, visibility }
    }

    /// Static matches first in registry order, then customers, then devices,
    /// each in backend order. An empty query yields the static items as-is.
    /// Duplicate ids keep their first occurrence.
    #[must_use]
    pub fn merge(
        &self,
        static_items: &[PaletteItem],
        query: &str,
        remote: Option<&RemoteResults>,
    ) -> Vec<PaletteItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return static_items.to_vec();
        }

        let mut seen = HashSet::new();
        let mut merged: Vec<PaletteItem> = static_items
            .iter()
            .filter(|item| item.matches(&needle))
            .filter(|item| seen.insert(item.id.clone()))
            .cloned()
            .collect();

        let Some(remote) = remote else {
            return merged;
        };

        let role = self.roles.current_role();
        if !self.visibility.allows(role) {
            if !remote.is_empty() {
                tracing::debug!(role = ?role, "entity results hidden for role");
            }
            return merged;
        }

        let entities = remote
            .customers
            .iter()
            .map(PaletteItem::from_customer)
            .chain(remote.devices.iter().map(PaletteItem::from_device));
        for item in entities {
            if seen.insert(item.id.clone()) {
                merged.push(item);
            }
        }
        merged
    }
}

/// Reorders a flat list into display buckets (enum order), keeping the
/// relative order inside each bucket.
#[must_use]
pub fn regroup(mut items: Vec<PaletteItem>) -> Vec<PaletteItem> {
    items.sort_by_key(|item| item.group);
    items
}

#[derive(Debug, PartialEq)]
pub struct GroupBucket<'a> {
    pub group: PaletteGroup,
    /// `(flat index, item)` pairs.
    pub items: Vec<(usize, &'a PaletteItem)>,
}

/// Partitions a flat list into non-empty buckets in enum order.
#[must_use]
pub fn group_items(items: &[PaletteItem]) -> Vec<GroupBucket<'_>> {
    PaletteGroup::ALL
        .iter()
        .map(|&group| GroupBucket {
            group,
            items: items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.group == group)
                .collect(),
        })
        .filter(|bucket| !bucket.items.is_empty())
        .collect()
}
