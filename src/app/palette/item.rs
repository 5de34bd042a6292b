use crate::app::action::Action;
use crate::app::routes::{ActionDefinition, RouteDefinition};
use crate::domain::models::{CustomerSummary, DeviceSummary};

/// Result categories. Display buckets follow declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaletteGroup {
    Navigate,
    Actions,
    Customers,
    Devices,
    Contracts,
}

impl PaletteGroup {
    pub const ALL: [PaletteGroup; 5] = [
        PaletteGroup::Navigate,
        PaletteGroup::Actions,
        PaletteGroup::Customers,
        PaletteGroup::Devices,
        PaletteGroup::Contracts,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteGroup::Navigate => "Navigate",
            PaletteGroup::Actions => "Actions",
            PaletteGroup::Customers => "Customers",
            PaletteGroup::Devices => "Devices",
            PaletteGroup::Contracts => "Contracts",
        }
    }

    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            PaletteGroup::Navigate => "→",
            PaletteGroup::Actions => "⚡",
            PaletteGroup::Customers => "☺",
            PaletteGroup::Devices => "▣",
            PaletteGroup::Contracts => "§",
        }
    }

    /// Cross-entity groups fed by remote lookups.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        matches!(self, PaletteGroup::Customers | PaletteGroup::Devices)
    }
}

/// What confirming an item does.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteTarget {
    Navigate(String),
    Invoke(Action),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteItem {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub group: PaletteGroup,
    pub target: PaletteTarget,
}

impl PaletteItem {
    #[must_use]
    pub fn from_route(route: &RouteDefinition) -> Self {
        Self {
            id: format!("nav:{}", route.path),
            title: route.name.to_string(),
            subtitle: Some(route.path.to_string()),
            group: PaletteGroup::Navigate,
            target: PaletteTarget::Navigate(route.path.to_string()),
        }
    }

    #[must_use]
    pub fn from_action(action: &ActionDefinition) -> Self {
        let slug = action.name.to_lowercase().replace(' ', "-");
        Self {
            id: format!("action:{slug}"),
            title: action.name.to_string(),
            subtitle: Some(action.description.to_string()),
            group: PaletteGroup::Actions,
            target: action.target.clone(),
        }
    }

    #[must_use]
    pub fn from_customer(customer: &CustomerSummary) -> Self {
        Self {
            id: format!("customer:{}", customer.id),
            title: customer.name.clone(),
            subtitle: customer.email.clone().or_else(|| customer.phone.clone()),
            group: PaletteGroup::Customers,
            target: PaletteTarget::Navigate(format!("/customers/{}", customer.id)),
        }
    }

    #[must_use]
    pub fn from_device(device: &DeviceSummary) -> Self {
        let subtitle = match (&device.model, &device.customer_name) {
            (Some(model), Some(owner)) => Some(format!("{model} · {owner}")),
            (Some(one), None) | (None, Some(one)) => Some(one.clone()),
            (None, None) => None,
        };
        Self {
            id: format!("device:{}", device.id),
            title: device.serial_number.clone(),
            subtitle,
            group: PaletteGroup::Devices,
            target: PaletteTarget::Navigate(format!("/devices/{}", device.id)),
        }
    }

    /// Case-insensitive substring match on title and subtitle.
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .subtitle
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}
