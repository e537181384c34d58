use serde::{Deserialize, Serialize};

/// Palette grouping used for filtering. The scoring engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Compute,
    Database,
    Storage,
    Network,
    Messaging,
    Analytics,
    Security,
}

impl ComponentCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Compute,
            Self::Database,
            Self::Storage,
            Self::Network,
            Self::Messaging,
            Self::Analytics,
            Self::Security,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Network => "network",
            Self::Messaging => "messaging",
            Self::Analytics => "analytics",
            Self::Security => "security",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Database => "Database",
            Self::Storage => "Storage",
            Self::Network => "Network",
            Self::Messaging => "Messaging",
            Self::Analytics => "Analytics",
            Self::Security => "Security",
        }
    }
}

/// Immutable catalog entry for a selectable piece of infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Component {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ComponentCategory,
}

const fn component(
    id: &'static str,
    name: &'static str,
    category: ComponentCategory,
) -> Component {
    Component { id, name, category }
}

static COMPONENTS: [Component; 21] = [
    component("web-server", "Web Server", ComponentCategory::Compute),
    component("app-server", "App Server", ComponentCategory::Compute),
    component("lambda", "Serverless", ComponentCategory::Compute),
    component("database", "Database", ComponentCategory::Database),
    component("cache", "Cache", ComponentCategory::Database),
    component("search-engine", "Search Engine", ComponentCategory::Database),
    component("file-storage", "File Storage", ComponentCategory::Storage),
    component("cdn", "CDN", ComponentCategory::Storage),
    component("object-storage", "Object Storage", ComponentCategory::Storage),
    component("load-balancer", "Load Balancer", ComponentCategory::Network),
    component("api-gateway", "API Gateway", ComponentCategory::Network),
    component("dns", "DNS", ComponentCategory::Network),
    component("message-queue", "Message Queue", ComponentCategory::Messaging),
    component("websockets", "WebSockets", ComponentCategory::Messaging),
    component("event-streaming", "Event Streaming", ComponentCategory::Messaging),
    component("monitoring", "Monitoring", ComponentCategory::Analytics),
    component("logging", "Logging", ComponentCategory::Analytics),
    component("analytics", "Analytics", ComponentCategory::Analytics),
    component("auth-service", "Auth Service", ComponentCategory::Security),
    component("firewall", "Firewall", ComponentCategory::Security),
    component("encryption", "Encryption", ComponentCategory::Security),
];

pub fn components() -> &'static [Component] {
    &COMPONENTS
}

pub fn component_by_id(id: &str) -> Option<&'static Component> {
    COMPONENTS.iter().find(|component| component.id == id)
}

/// Filter entry for the palette. The `all` entry has no members and means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub components: Vec<&'static str>,
}

pub fn categories() -> Vec<Category> {
    let mut categories = vec![Category {
        id: "all",
        name: "All",
        components: Vec::new(),
    }];

    categories.extend(ComponentCategory::ordered().into_iter().map(|category| {
        Category {
            id: category.id(),
            name: category.label(),
            components: COMPONENTS
                .iter()
                .filter(|component| component.category == category)
                .map(|component| component.id)
                .collect(),
        }
    }));

    categories
}
