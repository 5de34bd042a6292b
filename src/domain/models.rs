use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the console. Wire names match the backend's role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Staff,
    SupportTeam,
    #[serde(alias = "LEAD_TECH")]
    TechLead,
    Technician,
    Customer,
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Staff => "STAFF",
            Role::SupportTeam => "SUPPORT_TEAM",
            Role::TechLead => "TECH_LEAD",
            Role::Technician => "TECHNICIAN",
            Role::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "ADMIN" => Ok(Role::Admin),
            "MANAGER" => Ok(Role::Manager),
            "STAFF" => Ok(Role::Staff),
            "SUPPORT_TEAM" => Ok(Role::SupportTeam),
            "TECH_LEAD" | "LEAD_TECH" => Ok(Role::TechLead),
            "TECHNICIAN" => Ok(Role::Technician),
            "CUSTOMER" => Ok(Role::Customer),
            other => Err(anyhow::anyhow!("unknown role: {other}")),
        }
    }
}

/// The role observed at one point in time. `None` means unauthenticated.
pub type RoleSnapshot = Option<Role>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub id: String,
    pub serial_number: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// One page of a paginated backend listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn of(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            content,
            total_elements: len as u64,
            total_pages: u32::from(len > 0),
            number: 0,
            size: len as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_accepts_lead_tech_alias() {
        assert_eq!("LEAD_TECH".parse::<Role>().unwrap(), Role::TechLead);
        assert_eq!("tech_lead".parse::<Role>().unwrap(), Role::TechLead);
        assert!("JANITOR".parse::<Role>().is_err());

        let role: Role = serde_json::from_str("\"LEAD_TECH\"").unwrap();
        assert_eq!(role, Role::TechLead);
        assert_eq!(serde_json::to_string(&Role::SupportTeam).unwrap(), "\"SUPPORT_TEAM\"");
    }

    #[test]
    fn test_page_decodes_with_missing_fields() {
        let page: Page<CustomerSummary> =
            serde_json::from_str(r#"{"content":[{"id":"7","name":"Alice"}],"totalElements":1}"#)
                .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].email, None);
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.number, 0);
    }
}
