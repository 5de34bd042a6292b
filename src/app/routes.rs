use super::action::Action;
use super::palette::item::PaletteTarget;
use crate::domain::models::{Role, RoleSnapshot};

const OFFICE: &[Role] = &[
    Role::SuperAdmin,
    Role::Admin,
    Role::Manager,
    Role::Staff,
    Role::SupportTeam,
];
const FIELD: &[Role] = &[
    Role::SuperAdmin,
    Role::Admin,
    Role::Manager,
    Role::Staff,
    Role::SupportTeam,
    Role::TechLead,
    Role::Technician,
];
const MANAGEMENT: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Manager];
const WORKSHOP: &[Role] = &[
    Role::SuperAdmin,
    Role::Admin,
    Role::Manager,
    Role::TechLead,
    Role::Technician,
];
const SUPPORT: &[Role] = &[
    Role::SuperAdmin,
    Role::Admin,
    Role::Manager,
    Role::SupportTeam,
    Role::TechLead,
];
const ADMINS: &[Role] = &[Role::SuperAdmin, Role::Admin];
const CUSTOMER_EDITORS: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Manager, Role::Staff];
const DEVICE_EDITORS: &[Role] = &[
    Role::SuperAdmin,
    Role::Admin,
    Role::Manager,
    Role::Staff,
    Role::TechLead,
];
const PART_EDITORS: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Manager, Role::TechLead];
const TICKET_AUTHORS: &[Role] = &[
    Role::SuperAdmin,
    Role::Admin,
    Role::Manager,
    Role::SupportTeam,
    Role::TechLead,
    Role::Customer,
];
const PORTAL: &[Role] = &[Role::Customer];

#[derive(Debug, Clone, PartialEq)]
pub struct RouteDefinition {
    pub name: &'static str,
    pub path: &'static str,
    pub required_roles: Option<&'static [Role]>,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub required_roles: Option<&'static [Role]>,
    pub target: PaletteTarget,
}

/// `None` means every session, signed in or not, may use the entry.
#[must_use]
pub fn permits(required_roles: Option<&[Role]>, role: RoleSnapshot) -> bool {
    match required_roles {
        None => true,
        Some(roles) => role.is_some_and(|r| roles.contains(&r)),
    }
}

#[must_use]
pub fn is_placeholder_segment(segment: &str) -> bool {
    segment.starts_with(':') || segment.contains('{') || segment.contains('*')
}

#[must_use]
pub fn is_placeholder_path(path: &str) -> bool {
    path.split('/').any(is_placeholder_segment)
}

#[must_use]
pub fn get_routes() -> Vec<RouteDefinition> {
    let route = |name, path, required_roles, icon| RouteDefinition {
        name,
        path,
        required_roles,
        icon,
    };

    vec![
        route("Dashboard", "/", None, "◆"),
        route("Customers", "/customers", Some(OFFICE), "☺"),
        route("New Customer", "/customers/new", Some(CUSTOMER_EDITORS), "☺"),
        route("Customer Detail", "/customers/:id", Some(OFFICE), "☺"),
        route("Devices", "/devices", Some(FIELD), "▣"),
        route("New Device", "/devices/new", Some(DEVICE_EDITORS), "▣"),
        route("Device Detail", "/devices/:id", Some(FIELD), "▣"),
        route("Contracts", "/contracts", Some(MANAGEMENT), "§"),
        route("New Contract", "/contracts/new", Some(MANAGEMENT), "§"),
        route("Contract Detail", "/contracts/:id", Some(MANAGEMENT), "§"),
        route("Suppliers", "/suppliers", Some(MANAGEMENT), "⚑"),
        route("Spare Parts", "/spare-parts", Some(WORKSHOP), "⚙"),
        route("New Spare Part", "/spare-parts/new", Some(PART_EDITORS), "⚙"),
        route("Support Tickets", "/support", Some(SUPPORT), "✉"),
        route("New Ticket", "/support/new", Some(TICKET_AUTHORS), "✉"),
        route("Ticket Detail", "/support/:id", Some(SUPPORT), "✉"),
        route("My Devices", "/my-devices", Some(PORTAL), "▣"),
        route("My Tickets", "/my-tickets", Some(PORTAL), "✉"),
        route("Users", "/users", Some(ADMINS), "♟"),
        route("Profile", "/profile", None, "♙"),
        route("Settings", "/settings", Some(&[Role::SuperAdmin]), "⚒"),
    ]
}

#[must_use]
pub fn get_actions() -> Vec<ActionDefinition> {
    let navigate = |path: &str| PaletteTarget::Navigate(path.to_string());

    vec![
        ActionDefinition {
            name: "Create Customer",
            description: "Register a new customer record",
            required_roles: Some(CUSTOMER_EDITORS),
            target: navigate("/customers/new"),
        },
        ActionDefinition {
            name: "Create Device",
            description: "Register a device for a customer",
            required_roles: Some(DEVICE_EDITORS),
            target: navigate("/devices/new"),
        },
        ActionDefinition {
            name: "Create Contract",
            description: "Draft a new service contract",
            required_roles: Some(MANAGEMENT),
            target: navigate("/contracts/new"),
        },
        ActionDefinition {
            name: "Open Support Ticket",
            description: "Log a new support interaction",
            required_roles: Some(TICKET_AUTHORS),
            target: navigate("/support/new"),
        },
        ActionDefinition {
            name: "Add Spare Part",
            description: "Add a part to the spare parts inventory",
            required_roles: Some(PART_EDITORS),
            target: navigate("/spare-parts/new"),
        },
        ActionDefinition {
            name: "Toggle Help",
            description: "Show or hide keyboard shortcuts",
            required_roles: None,
            target: PaletteTarget::Invoke(Action::ToggleHelp),
        },
        ActionDefinition {
            name: "Cycle Theme",
            description: "Switch to the next colour theme",
            required_roles: None,
            target: PaletteTarget::Invoke(Action::CycleTheme),
        },
        ActionDefinition {
            name: "Sign Out",
            description: "End the current session",
            required_roles: None,
            target: PaletteTarget::Invoke(Action::SignOut),
        },
        ActionDefinition {
            name: "Quit",
            description: "Quit fleetdesk",
            required_roles: None,
            target: PaletteTarget::Invoke(Action::Quit),
        },
    ]
}

/// Resolves a concrete path to its registry entry. Literal routes win over
/// parameterised ones.
#[must_use]
pub fn find_route(path: &str) -> Option<RouteDefinition> {
    let routes = get_routes();
    if let Some(exact) = routes.iter().find(|r| r.path == path) {
        return Some(exact.clone());
    }

    let wanted: Vec<&str> = path.split('/').collect();
    routes.into_iter().find(|route| {
        let pattern: Vec<&str> = route.path.split('/').collect();
        pattern.len() == wanted.len()
            && pattern
                .iter()
                .zip(&wanted)
                .all(|(p, w)| is_placeholder_segment(p) || p == w)
    })
}
