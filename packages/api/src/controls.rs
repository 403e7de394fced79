//! Control library, activated controls and activation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use store::{Role, SessionContext};

use crate::client::{Auth, GrcClient};
use crate::error::ApiError;
use crate::gate::check_role;
use crate::transport::HttpTransport;

/// Review interval offered when activating a control.
pub const DEFAULT_REVIEW_INTERVAL_DAYS: u32 = 90;

/// A control available in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryControl {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub standard: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A control activated for this organisation, as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatedControl {
    pub id: String,
    pub control_id: String,
    pub control_name: String,
    #[serde(default)]
    pub standard: Option<String>,
    pub status: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub next_review_due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner_name: Option<String>,
}

impl ActivatedControl {
    pub fn is_compliant(&self) -> bool {
        self.status == "compliant"
    }
}

/// `POST /controls/activated` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivateControlRequest {
    pub control_library_id: String,
    pub owner_id: String,
    pub review_interval_days: u32,
}

/// Accept RFC 3339 timestamps or bare `YYYY-MM-DD` dates; anything else is `None`.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_timestamp(&s)))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl<T: HttpTransport> GrcClient<T> {
    pub async fn control_library(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<LibraryControl>, ApiError> {
        self.get("/controls/library", Auth::Session(session)).await
    }

    pub async fn activated_controls(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<ActivatedControl>, ApiError> {
        self.get("/controls/activated", Auth::Session(session)).await
    }

    /// Activate a library control, owned by the signed-in admin.
    pub async fn activate_control(
        &self,
        session: &SessionContext,
        control_library_id: &str,
        review_interval_days: u32,
    ) -> Result<(), ApiError> {
        let owner = check_role(session, Role::Admin)
            .map_err(|_| ApiError::Validation("Only admins can activate controls".to_string()))?;
        if review_interval_days == 0 {
            return Err(ApiError::Validation(
                "Review interval must be at least one day".to_string(),
            ));
        }

        let body = ActivateControlRequest {
            control_library_id: control_library_id.to_string(),
            owner_id: owner.id.clone(),
            review_interval_days,
        };
        self.post_unit("/controls/activated", Auth::Session(session), &body)
            .await?;
        tracing::info!("Activated control {}", control_library_id);
        Ok(())
    }
}
