use serde::{Deserialize, Serialize};

use super::components::{component_by_id, components};

/// Technology-stack skin applied to component names for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    #[default]
    Generic,
    Aws,
    Gcp,
    #[serde(rename = "opensource")]
    OpenSource,
}

/// (component id, AWS, GCP, open source)
static FLAVOR_NAMES: &[(&str, &str, &str, &str)] = &[
    ("web-server", "EC2", "Compute Engine", "Docker"),
    ("app-server", "Elastic Beanstalk", "App Engine", "Kubernetes"),
    ("lambda", "Lambda", "Cloud Functions", "OpenFaaS"),
    ("database", "RDS", "CloudSQL", "PostgreSQL"),
    ("cache", "ElastiCache", "Memorystore", "Redis"),
    ("search-engine", "OpenSearch Service", "Vertex AI Search", "Elasticsearch"),
    ("file-storage", "S3", "Cloud Storage", "MinIO"),
    ("cdn", "CloudFront", "Cloud CDN", "Varnish"),
    ("object-storage", "S3 Glacier", "Archive Storage", "Ceph"),
    ("load-balancer", "ELB", "Cloud Load Balancing", "NGINX"),
    ("api-gateway", "API Gateway", "Apigee", "Kong"),
    ("dns", "Route 53", "Cloud DNS", "BIND"),
    ("message-queue", "SQS", "Pub/Sub", "RabbitMQ"),
    ("websockets", "API Gateway WebSockets", "Firebase Realtime", "Socket.IO"),
    ("event-streaming", "Kinesis", "Dataflow", "Kafka"),
    ("monitoring", "CloudWatch", "Cloud Monitoring", "Prometheus"),
    ("logging", "CloudWatch Logs", "Cloud Logging", "ELK Stack"),
    ("analytics", "Redshift", "BigQuery", "ClickHouse"),
    ("auth-service", "Cognito", "Identity Platform", "Keycloak"),
    ("firewall", "WAF", "Cloud Armor", "pfSense"),
    ("encryption", "KMS", "Cloud KMS", "Vault"),
];

impl Flavor {
    pub const fn ordered() -> [Self; 4] {
        [Self::Generic, Self::Aws, Self::Gcp, Self::OpenSource]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "generic" => Some(Self::Generic),
            "aws" => Some(Self::Aws),
            "gcp" => Some(Self::Gcp),
            "opensource" | "open-source" | "oss" => Some(Self::OpenSource),
            _ => None,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Aws => "aws",
            Self::Gcp => "gcp",
            Self::OpenSource => "opensource",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Generic => "Generic",
            Self::Aws => "Amazon Web Services",
            Self::Gcp => "Google Cloud Platform",
            Self::OpenSource => "Open Source",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Generic => "Generic",
            Self::Aws => "AWS",
            Self::Gcp => "GCP",
            Self::OpenSource => "Open Source",
        }
    }

    /// Display name for `component_id`, or `None` when the id is not registered.
    pub fn display_name(self, component_id: &str) -> Option<&'static str> {
        let component = component_by_id(component_id)?;
        if self == Self::Generic {
            return Some(component.name);
        }

        FLAVOR_NAMES
            .iter()
            .find(|(id, ..)| *id == component_id)
            .map(|(_, aws, gcp, oss)| match self {
                Self::Aws => *aws,
                Self::Gcp => *gcp,
                Self::OpenSource => *oss,
                Self::Generic => component.name,
            })
    }

    /// Translate a display name in this flavor, or a raw component id, back to the id.
    pub fn resolve(self, name: &str) -> Option<&'static str> {
        let name = name.trim();
        if let Some(component) = component_by_id(name) {
            return Some(component.id);
        }

        components()
            .iter()
            .find(|component| {
                self.display_name(component.id)
                    .is_some_and(|display| display.eq_ignore_ascii_case(name))
            })
            .map(|component| component.id)
    }
}

/// Tooltip text listing a component's name in every vendor flavor.
pub fn equivalents(component_id: &str) -> Option<String> {
    let names = Flavor::ordered()
        .into_iter()
        .filter(|flavor| *flavor != Flavor::Generic)
        .map(|flavor| {
            flavor
                .display_name(component_id)
                .map(|name| format!("{}: {}", flavor.short_label(), name))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(names.join(" | "))
}
