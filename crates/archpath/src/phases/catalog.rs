use std::collections::HashMap;

use super::domain::{Company, Difficulty, Phase, PhaseKey, PhaseRule, RuleConflict};
use crate::registry::equivalency::normalize_all;

/// Static rule table keyed by (company, phase), plus company metadata.
#[derive(Debug, Clone)]
pub struct PhaseCatalog {
    companies: Vec<Company>,
    rules: HashMap<PhaseKey, PhaseRule>,
}

impl PhaseCatalog {
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        catalog.companies = standard_companies();
        for (company, phase, rule) in standard_rules() {
            catalog.insert(company, phase, rule);
        }
        catalog
    }

    pub fn empty() -> Self {
        Self {
            companies: Vec::new(),
            rules: HashMap::new(),
        }
    }

    pub fn insert(&mut self, company: impl Into<String>, phase: Phase, rule: PhaseRule) {
        self.rules.insert(PhaseKey::new(company, phase), rule);
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|company| company.id == id)
    }

    /// True when at least one phase rule exists for the company.
    pub fn has_company(&self, id: &str) -> bool {
        Phase::ordered()
            .into_iter()
            .any(|phase| self.rule(id, phase).is_some())
    }

    pub fn rule(&self, company: &str, phase: Phase) -> Option<&PhaseRule> {
        self.rules.get(&PhaseKey::new(company, phase))
    }

    /// Rule lookup by raw phase id; unknown phases simply have no rule.
    pub fn rule_by_id(&self, company: &str, phase_id: &str) -> Option<&PhaseRule> {
        Phase::parse(phase_id).and_then(|phase| self.rule(company, phase))
    }

    /// Display hints derived from the rule: essentials, a few suggestions and things to avoid.
    pub fn hints(&self, company: &str, phase_id: &str) -> Vec<String> {
        let Some(rule) = self.rule_by_id(company, phase_id) else {
            return Vec::new();
        };

        let mut hints = Vec::new();
        if !rule.required.is_empty() {
            hints.push(format!("Essential: {}", spaced_list(&rule.required, usize::MAX)));
        }
        if !rule.beneficial.is_empty() {
            hints.push(format!("Consider: {}", spaced_list(&rule.beneficial, 3)));
        }
        if !rule.avoid.is_empty() {
            hints.push(format!(
                "Avoid over-engineering with: {}",
                spaced_list(&rule.avoid, 3)
            ));
        }
        hints
    }

    /// Challenge text for a phase, with a generic fallback.
    pub fn brief(&self, company: &str, phase_id: &str) -> String {
        match (self.company(company), Phase::parse(phase_id)) {
            (Some(company), Some(phase)) => company.brief(phase).to_string(),
            _ => format!("Choose the right components for {phase_id} phase."),
        }
    }

    /// Service groups appearing in more than one tier of a rule after normalization.
    pub fn conflicts(&self) -> Vec<RuleConflict> {
        let mut keys: Vec<&PhaseKey> = self.rules.keys().collect();
        keys.sort();

        let mut conflicts = Vec::new();
        for key in keys {
            let rule = &self.rules[key];
            let tiers = [
                ("required", normalize_all(rule.required.iter().map(String::as_str))),
                ("beneficial", normalize_all(rule.beneficial.iter().map(String::as_str))),
                ("avoid", normalize_all(rule.avoid.iter().map(String::as_str))),
            ];

            let mut seen: Vec<&str> = Vec::new();
            for (_, groups) in &tiers {
                for group in groups {
                    if seen.contains(group) {
                        continue;
                    }
                    seen.push(*group);

                    let listed_in: Vec<&'static str> = tiers
                        .iter()
                        .filter(|(_, groups)| groups.contains(group))
                        .map(|(tier, _)| *tier)
                        .collect();
                    if listed_in.len() > 1 {
                        conflicts.push(RuleConflict {
                            company: key.company.clone(),
                            phase: key.phase,
                            group: group.to_string(),
                            tiers: listed_in,
                        });
                    }
                }
            }
        }
        conflicts
    }
}

impl Default for PhaseCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn spaced_list(ids: &[String], limit: usize) -> String {
    ids.iter()
        .take(limit)
        .map(|id| id.replace('-', " "))
        .collect::<Vec<_>>()
        .join(", ")
}

fn standard_companies() -> Vec<Company> {
    vec![
        Company {
            id: "netflix",
            name: "Netflix",
            tagline: "Video streaming platform",
            difficulty: Difficulty::Easy,
            briefs: [
                "Netflix started as a DVD-by-mail service with basic web functionality. What components did they need to launch their simple catalog and user management system?",
                "10M users are now streaming video. What infrastructure is needed to deliver video content reliably at this scale?",
                "100M+ users globally, multiple content types. The original architecture is breaking. What's needed for the next level?",
                "230M+ subscribers across 190 countries with AI recommendations. What enterprise-grade components are required?",
            ],
        },
        Company {
            id: "slack",
            name: "Slack",
            tagline: "Real-time workplace communication",
            difficulty: Difficulty::Easy,
            briefs: [
                "Slack needs real-time messaging for small teams. What are the core components for a chat application?",
                "10K concurrent users, message history is getting slow. What components help scale real-time messaging?",
                "100K+ users, enterprise customers want advanced features. What's needed for the next growth phase?",
                "Millions of users, shared channels across organizations. What enterprise features are required?",
            ],
        },
        Company {
            id: "uber",
            name: "Uber",
            tagline: "Ride-sharing platform",
            difficulty: Difficulty::Hard,
            briefs: [
                "Simple ride matching for one city. What basic components are needed for location-based matching?",
                "Expanding to 50 cities, drivers and riders growing fast. What components help scale geographically?",
                "1000+ cities, real-time pricing, driver optimization. What's needed for complex operations?",
                "Global platform with multiple services (food, freight). What enterprise architecture is required?",
            ],
        },
        Company {
            id: "spotify",
            name: "Spotify",
            tagline: "Music streaming & recommendations",
            difficulty: Difficulty::Medium,
            briefs: [
                "Music streaming for desktop users. What components are needed to stream music files?",
                "Mobile app launch, millions of songs. What components help scale music delivery and discovery?",
                "Personalized playlists, social features. What's needed for recommendation and social systems?",
                "AI-powered recommendations, podcast platform. What enterprise features support content variety?",
            ],
        },
        Company {
            id: "instagram",
            name: "Instagram",
            tagline: "Photo & video social platform",
            difficulty: Difficulty::Medium,
            briefs: [
                "Photo sharing app for mobile. What basic components are needed for image upload and sharing?",
                "Millions of users, photo feeds getting slow. What components help scale image delivery?",
                "Stories, video, messaging features. What's needed to support multiple content types?",
                "Billions of users, AI content moderation. What enterprise-scale components are required?",
            ],
        },
    ]
}

fn standard_rules() -> Vec<(&'static str, Phase, PhaseRule)> {
    use Phase::{Enterprise, Mvp, Scale1, Scale2};

    vec![
        (
            "netflix",
            Mvp,
            PhaseRule::new(
                &["web-server", "database"],
                &["file-storage"],
                &["cdn", "cache", "load-balancer", "analytics", "monitoring"],
            ),
        ),
        (
            "netflix",
            Scale1,
            PhaseRule::new(
                &["web-server", "database", "file-storage", "cdn"],
                &["cache", "load-balancer", "monitoring"],
                &["message-queue", "api-gateway", "search-engine"],
            ),
        ),
        (
            "netflix",
            Scale2,
            PhaseRule::new(
                &["web-server", "database", "file-storage", "cdn", "cache", "load-balancer"],
                &["monitoring", "analytics", "api-gateway", "message-queue"],
                // event-streaming normalizes to message-queue, listed above; keep it out of avoid.
                &["lambda", "websockets"],
            ),
        ),
        (
            "netflix",
            Enterprise,
            PhaseRule::new(
                &[
                    "web-server",
                    "database",
                    "file-storage",
                    "cdn",
                    "cache",
                    "load-balancer",
                    "monitoring",
                    "analytics",
                ],
                &["api-gateway", "message-queue", "auth-service", "firewall", "search-engine"],
                &[],
            ),
        ),
        (
            "slack",
            Mvp,
            PhaseRule::new(
                &["web-server", "database", "websockets"],
                &["cache"],
                &["cdn", "load-balancer", "analytics"],
            ),
        ),
        (
            "slack",
            Scale1,
            PhaseRule::new(
                &["web-server", "database", "websockets", "cache", "load-balancer"],
                &["monitoring", "message-queue"],
                &["search-engine", "analytics", "api-gateway"],
            ),
        ),
        (
            "slack",
            Scale2,
            PhaseRule::new(
                &["web-server", "database", "websockets", "cache", "load-balancer", "monitoring"],
                &["message-queue", "api-gateway", "search-engine", "analytics"],
                // event-streaming normalizes to message-queue, listed above; keep it out of avoid.
                &["lambda"],
            ),
        ),
        (
            "slack",
            Enterprise,
            PhaseRule::new(
                &[
                    "web-server",
                    "database",
                    "websockets",
                    "cache",
                    "load-balancer",
                    "monitoring",
                    "message-queue",
                ],
                &["api-gateway", "search-engine", "analytics", "auth-service", "firewall"],
                &[],
            ),
        ),
        (
            "uber",
            Mvp,
            PhaseRule::new(
                &["web-server", "database"],
                &["cache"],
                &["load-balancer", "message-queue", "analytics"],
            ),
        ),
        (
            "uber",
            Scale1,
            PhaseRule::new(
                &["web-server", "database", "cache", "load-balancer"],
                &["monitoring", "api-gateway"],
                &["search-engine", "websockets", "lambda"],
            ),
        ),
        (
            "uber",
            Scale2,
            PhaseRule::new(
                &["web-server", "database", "cache", "load-balancer", "api-gateway", "message-queue"],
                &["monitoring", "analytics", "search-engine"],
                // event-streaming normalizes to message-queue, listed above; keep it out of avoid.
                &["websockets"],
            ),
        ),
        (
            "uber",
            Enterprise,
            PhaseRule::new(
                &[
                    "web-server",
                    "database",
                    "cache",
                    "load-balancer",
                    "api-gateway",
                    "message-queue",
                    "monitoring",
                ],
                &["analytics", "search-engine", "auth-service", "firewall", "lambda"],
                &[],
            ),
        ),
        (
            "spotify",
            Mvp,
            PhaseRule::new(
                &["web-server", "database"],
                &["file-storage", "cache"],
                &["search-engine", "analytics", "cdn"],
            ),
        ),
        (
            "spotify",
            Scale1,
            PhaseRule::new(
                &["web-server", "database", "file-storage", "cache"],
                &["search-engine", "cdn", "monitoring"],
                &["message-queue", "lambda", "websockets"],
            ),
        ),
        (
            "spotify",
            Scale2,
            PhaseRule::new(
                &["web-server", "database", "file-storage", "cache", "search-engine", "cdn"],
                &["monitoring", "analytics", "api-gateway", "load-balancer"],
                &["websockets", "event-streaming"],
            ),
        ),
        (
            "spotify",
            Enterprise,
            PhaseRule::new(
                &[
                    "web-server",
                    "database",
                    "file-storage",
                    "cache",
                    "search-engine",
                    "cdn",
                    "analytics",
                ],
                &["monitoring", "api-gateway", "load-balancer", "auth-service", "lambda"],
                &[],
            ),
        ),
        (
            "instagram",
            Mvp,
            PhaseRule::new(
                &["web-server", "database"],
                &["file-storage", "cache"],
                &["cdn", "search-engine", "analytics"],
            ),
        ),
        (
            "instagram",
            Scale1,
            PhaseRule::new(
                &["web-server", "database", "file-storage", "cache", "cdn"],
                &["load-balancer", "monitoring"],
                &["search-engine", "message-queue", "websockets"],
            ),
        ),
        (
            "instagram",
            Scale2,
            PhaseRule::new(
                &["web-server", "database", "file-storage", "cache", "cdn", "load-balancer"],
                &["monitoring", "analytics", "search-engine", "message-queue"],
                &["lambda", "websockets"],
            ),
        ),
        (
            "instagram",
            Enterprise,
            PhaseRule::new(
                &[
                    "web-server",
                    "database",
                    "file-storage",
                    "cache",
                    "cdn",
                    "load-balancer",
                    "monitoring",
                    "analytics",
                ],
                &["search-engine", "message-queue", "auth-service", "firewall", "api-gateway"],
                &[],
            ),
        ),
    ]
}
