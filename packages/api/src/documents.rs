//! # Documents and the two-step creation flow
//!
//! Creating a document takes two requests: the document itself, then its first
//! version. The second depends on the id returned by the first, so they run in
//! sequence. [`GrcClient::create_document`] never leaves the outcome ambiguous:
//!
//! 1. The draft is validated locally. A blank title or body fails with
//!    [`ApiError::Validation`] and nothing is sent.
//! 2. `POST /documents` creates the parent. Failure here leaves nothing behind.
//! 3. `POST /documents/{id}/versions` is tried up to [`VERSION_ATTEMPTS`] times.
//! 4. If every attempt fails the parent exists without content and the result
//!    is [`DocumentCreation::Incomplete`], which carries the document so the
//!    caller can offer [`GrcClient::create_initial_version`] again.

use serde::{Deserialize, Serialize};
use store::{Role, SessionContext};

use crate::client::{Auth, GrcClient};
use crate::error::ApiError;
use crate::gate::check_role;
use crate::transport::HttpTransport;

pub const VERSION_ATTEMPTS: usize = 2;

pub const DEFAULT_CHANGE_DESCRIPTION: &str = "Initial version";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentCategory {
    #[default]
    Policy,
    Procedure,
    Guideline,
    Plan,
    Standard,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 5] = [
        DocumentCategory::Policy,
        DocumentCategory::Procedure,
        DocumentCategory::Guideline,
        DocumentCategory::Plan,
        DocumentCategory::Standard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Policy => "Policy",
            DocumentCategory::Procedure => "Procedure",
            DocumentCategory::Guideline => "Guideline",
            DocumentCategory::Plan => "Plan",
            DocumentCategory::Standard => "Standard",
        }
    }

    /// Unknown names fall back to the default category.
    pub fn parse(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub published_version_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVersion {
    pub id: String,
    pub version_number: u32,
    pub body_content: String,
    #[serde(default)]
    pub change_description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A document with every version the backend knows about.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentDetail {
    pub document: Document,
    #[serde(default)]
    pub versions: Vec<DocumentVersion>,
}

impl DocumentDetail {
    /// Highest-numbered version, if any.
    pub fn latest_version(&self) -> Option<&DocumentVersion> {
        self.versions.iter().max_by_key(|v| v.version_number)
    }
}

/// Form contents for a new document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDraft {
    pub title: String,
    pub category: DocumentCategory,
    pub body_content: String,
    pub change_description: String,
}

impl Default for DocumentDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DocumentCategory::default(),
            body_content: String::new(),
            change_description: DEFAULT_CHANGE_DESCRIPTION.to_string(),
        }
    }
}

impl DocumentDraft {
    /// Required fields: `title`, `body_content`.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.body_content.trim().is_empty() {
            missing.push("body_content");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(format!(
                "Required fields missing: {}",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateDocumentRequest<'a> {
    title: &'a str,
    category: &'a str,
    owner_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateVersionRequest<'a> {
    body_content: &'a str,
    change_description: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentCreation {
    /// Document and first version both exist.
    Complete(Document),
    /// The document exists but has no version yet.
    Incomplete { document: Document, error: ApiError },
}

impl DocumentCreation {
    pub fn document(&self) -> &Document {
        match self {
            DocumentCreation::Complete(document) => document,
            DocumentCreation::Incomplete { document, .. } => document,
        }
    }
}

impl<T: HttpTransport> GrcClient<T> {
    pub async fn documents(&self, session: &SessionContext) -> Result<Vec<Document>, ApiError> {
        self.get("/documents", Auth::Session(session)).await
    }

    pub async fn document(
        &self,
        session: &SessionContext,
        id: &str,
    ) -> Result<DocumentDetail, ApiError> {
        self.get(&format!("/documents/{id}"), Auth::Session(session))
            .await
    }

    /// Create a document and its first version.
    ///
    /// `Err` means no document was created. `Ok(Incomplete)` means it was, but
    /// its first version was not.
    pub async fn create_document(
        &self,
        session: &SessionContext,
        draft: &DocumentDraft,
    ) -> Result<DocumentCreation, ApiError> {
        draft.validate()?;
        let owner = check_role(session, Role::Admin)
            .map_err(|_| ApiError::Validation("Only admins can create documents".to_string()))?;

        let body = CreateDocumentRequest {
            title: draft.title.trim(),
            category: draft.category.as_str(),
            owner_id: &owner.id,
        };
        let document: Document = self
            .post("/documents", Auth::Session(session), &body)
            .await?;
        tracing::info!("Created document {}", document.id);

        match self.create_initial_version(session, &document.id, draft).await {
            Ok(()) => Ok(DocumentCreation::Complete(document)),
            Err(error) => {
                tracing::error!(
                    "Document {} created without a version: {}",
                    document.id,
                    error
                );
                Ok(DocumentCreation::Incomplete { document, error })
            }
        }
    }

    /// Second step on its own, for retrying an incomplete document.
    pub async fn create_initial_version(
        &self,
        session: &SessionContext,
        document_id: &str,
        draft: &DocumentDraft,
    ) -> Result<(), ApiError> {
        draft.validate()?;
        let path = format!("/documents/{document_id}/versions");
        let body = CreateVersionRequest {
            body_content: &draft.body_content,
            change_description: draft.change_description.trim(),
        };

        let mut last_error = ApiError::Network("no attempt made".to_string());
        for attempt in 1..=VERSION_ATTEMPTS {
            match self.post_unit(&path, Auth::Session(session), &body).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_local() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Version for document {} failed (attempt {}/{}): {}",
                        document_id,
                        attempt,
                        VERSION_ATTEMPTS,
                        e
                    );
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Append a new version to an existing document. Single attempt.
    pub async fn add_version(
        &self,
        session: &SessionContext,
        document_id: &str,
        body_content: &str,
        change_description: &str,
    ) -> Result<(), ApiError> {
        if body_content.trim().is_empty() {
            return Err(ApiError::Validation("Content is required".to_string()));
        }
        let body = CreateVersionRequest {
            body_content,
            change_description: change_description.trim(),
        };
        self.post_unit(
            &format!("/documents/{document_id}/versions"),
            Auth::Session(session),
            &body,
        )
        .await
    }
}
