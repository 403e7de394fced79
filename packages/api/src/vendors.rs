//! Third-party vendors.

use serde::{Deserialize, Serialize};
use store::SessionContext;

use crate::client::{Auth, GrcClient};
use crate::error::ApiError;
use crate::transport::HttpTransport;

pub const VENDOR_CATEGORIES: [&str; 4] = [
    "IT Services",
    "Cloud Provider",
    "Payment Processor",
    "Consulting",
];

/// Lifecycle states as `(value, label)`.
pub const VENDOR_STATUSES: [(&str, &str); 4] = [
    ("active", "Active"),
    ("under_review", "Under Review"),
    ("inactive", "Inactive"),
    ("terminated", "Terminated"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub risk_tier: String,
    pub status: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Vendor {
    pub fn risk(&self) -> RiskTier {
        RiskTier::parse(&self.risk_tier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [RiskTier::Low, RiskTier::Medium, RiskTier::High, RiskTier::Critical];

    /// Anything unrecognised is treated as low.
    pub fn parse(tier: &str) -> Self {
        match tier {
            "critical" => RiskTier::Critical,
            "high" => RiskTier::High,
            "medium" => RiskTier::Medium,
            _ => RiskTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Critical => "critical",
            RiskTier::High => "high",
            RiskTier::Medium => "medium",
            RiskTier::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Critical => "Critical",
            RiskTier::High => "High",
            RiskTier::Medium => "Medium",
            RiskTier::Low => "Low",
        }
    }

    pub fn is_severe(&self) -> bool {
        matches!(self, RiskTier::Critical | RiskTier::High)
    }
}

/// Form contents for a new vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVendor {
    pub name: String,
    pub description: String,
    pub category: String,
    pub risk_tier: String,
    pub status: String,
}

impl Default for NewVendor {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: VENDOR_CATEGORIES[0].to_string(),
            risk_tier: RiskTier::Medium.as_str().to_string(),
            status: "active".to_string(),
        }
    }
}

impl<T: HttpTransport> GrcClient<T> {
    pub async fn vendors(&self, session: &SessionContext) -> Result<Vec<Vendor>, ApiError> {
        self.get("/vendors", Auth::Session(session)).await
    }

    pub async fn vendor(&self, session: &SessionContext, id: &str) -> Result<Vendor, ApiError> {
        self.get(&format!("/vendors/{id}"), Auth::Session(session))
            .await
    }

    pub async fn create_vendor(
        &self,
        session: &SessionContext,
        vendor: &NewVendor,
    ) -> Result<(), ApiError> {
        if vendor.name.trim().is_empty() {
            return Err(ApiError::Validation("Vendor name is required".to_string()));
        }
        self.post_unit("/vendors", Auth::Session(session), vendor)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, RecordingTransport};
    use store::{ClientConfig, Credential, Principal, Role};

    fn session() -> SessionContext {
        SessionContext::new(
            Credential::new("tok"),
            Some(Principal {
                id: "u-1".to_string(),
                email: String::new(),
                name: String::new(),
                role: Role::Admin,
                onboarding_completed: true,
            }),
        )
    }

    #[tokio::test]
    async fn test_list_vendors() {
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Get,
            "/vendors",
            200,
            r#"[{"id":"v-1","name":"Acme Cloud","description":null,"category":"Cloud Provider","risk_tier":"critical","status":"active"}]"#,
        );
        let client = GrcClient::new(transport, &ClientConfig::default());

        let vendors = client.vendors(&session()).await.unwrap();
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].risk(), RiskTier::Critical);
        assert!(vendors[0].description.is_none());
    }

    #[tokio::test]
    async fn test_create_vendor_defaults() {
        let transport = RecordingTransport::new();
        transport.respond(Method::Post, "/vendors", 201, "{}");
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        let vendor = NewVendor {
            name: "Acme".to_string(),
            ..Default::default()
        };
        client.create_vendor(&session(), &vendor).await.unwrap();

        assert_eq!(
            transport.requests()[0].body,
            Some(serde_json::json!({
                "name": "Acme",
                "description": "",
                "category": "IT Services",
                "risk_tier": "medium",
                "status": "active"
            }))
        );
    }

    #[tokio::test]
    async fn test_create_vendor_requires_name() {
        let transport = RecordingTransport::new();
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        let result = client.create_vendor(&session(), &NewVendor::default()).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_unknown_tier_is_low() {
        assert_eq!(RiskTier::parse("negligible"), RiskTier::Low);
        assert!(RiskTier::High.is_severe());
        assert!(!RiskTier::Medium.is_severe());
    }
}
