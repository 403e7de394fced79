//! Tickets: the internal list, detail and comment thread used by the admin
//! platform and the external, API-key-authenticated endpoints used by the
//! customer portal.
//!
//! Free-text path segments (customer references, ticket ids) are
//! percent-encoded, so `ACME#7` is sent as `/tickets/external/ACME%237`.

use serde::{Deserialize, Serialize};
use store::SessionContext;

use crate::client::{Auth, GrcClient};
use crate::error::ApiError;
use crate::transport::HttpTransport;

/// Categories offered when a customer files a ticket.
pub const TICKET_CATEGORIES: [&str; 4] = ["Technical Issue", "Feature Request", "Billing", "General"];

/// Rows per page in the admin ticket list.
pub const TICKET_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub sequential_id: i64,
    pub ticket_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub status: String,
    #[serde(default)]
    pub external_customer_ref: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Ticket {
    /// `#12`-style reference shown in lists.
    pub fn reference(&self) -> String {
        format!("#{}", self.sequential_id)
    }
}

/// Known ticket states. Anything else renders neutrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    New,
    InProgress,
    Resolved,
    Invalidated,
    Other,
}

impl TicketStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "new" => TicketStatus::New,
            "in_progress" => TicketStatus::InProgress,
            "resolved" => TicketStatus::Resolved,
            "invalidated" => TicketStatus::Invalidated,
            _ => TicketStatus::Other,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TicketStatus::New => "badge badge-blue",
            TicketStatus::InProgress => "badge badge-yellow",
            TicketStatus::Resolved => "badge badge-green",
            TicketStatus::Invalidated => "badge badge-red",
            TicketStatus::Other => "badge badge-gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketComment {
    pub id: String,
    pub body: String,
    /// Staff-only; the backend never returns these to the portal.
    #[serde(default)]
    pub is_internal_note: bool,
    pub created_at: String,
}

/// A ticket with its comment thread.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub comments: Vec<TicketComment>,
}

/// Comment added from the admin ticket view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewComment {
    pub body: String,
    pub is_internal_note: bool,
}

/// One page of a client-side paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number, clamped to the available pages.
    pub page: usize,
    pub pages: usize,
    /// Half-open row range `start..end` into the full list.
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn new(total: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let pages = total.div_ceil(page_size).max(1);
        let page = page.clamp(1, pages);
        let start = ((page - 1) * page_size).min(total);
        let end = (start + page_size).min(total);
        Self {
            page,
            pages,
            start,
            end,
            total,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// "Showing 21 to 40 of 45".
    pub fn summary(&self) -> String {
        if self.total == 0 {
            return "Showing 0 of 0".to_string();
        }
        format!("Showing {} to {} of {}", self.start + 1, self.end, self.total)
    }
}

/// Ticket submitted from the portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalTicketRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub external_customer_ref: String,
}

#[derive(Debug, Deserialize)]
struct ExternalTicketList {
    #[serde(default)]
    tickets: Option<Vec<Ticket>>,
}

/// `GET /tickets/{id}` body. The portal only needs the comments.
#[derive(Debug, Deserialize)]
struct TicketThread {
    #[serde(default)]
    ticket: Option<Ticket>,
    #[serde(default)]
    comments: Option<Vec<TicketComment>>,
}

fn ticket_path(ticket_id: &str) -> String {
    format!("/tickets/{}", urlencoding::encode(ticket_id.trim()))
}

impl<T: HttpTransport> GrcClient<T> {
    pub async fn tickets(&self, session: &SessionContext) -> Result<Vec<Ticket>, ApiError> {
        self.get("/tickets", Auth::Session(session)).await
    }

    /// A ticket and its comments, internal notes included.
    pub async fn ticket(
        &self,
        session: &SessionContext,
        ticket_id: &str,
    ) -> Result<TicketDetail, ApiError> {
        let path = ticket_path(ticket_id);
        let thread: TicketThread = self.get(&path, Auth::Session(session)).await?;
        let ticket = thread.ticket.ok_or_else(|| ApiError::Decode {
            endpoint: self.url(&path),
            message: "missing field `ticket`".to_string(),
        })?;
        Ok(TicketDetail {
            ticket,
            comments: thread.comments.unwrap_or_default(),
        })
    }

    /// Add a comment or internal note to a ticket.
    pub async fn add_ticket_comment(
        &self,
        session: &SessionContext,
        ticket_id: &str,
        comment: &NewComment,
    ) -> Result<(), ApiError> {
        if comment.body.trim().is_empty() {
            return Err(ApiError::Validation("Comment is required".to_string()));
        }
        let path = format!("{}/comments", ticket_path(ticket_id));
        self.post_unit(&path, Auth::Session(session), comment).await?;
        tracing::info!(
            "Added {} to ticket {}",
            if comment.is_internal_note { "internal note" } else { "comment" },
            ticket_id
        );
        Ok(())
    }

    /// Tickets filed under a customer reference. A missing list is empty.
    pub async fn customer_tickets(&self, customer_ref: &str) -> Result<Vec<Ticket>, ApiError> {
        let list: ExternalTicketList = self
            .get(
                &format!("/tickets/external/{}", urlencoding::encode(customer_ref.trim())),
                Auth::PortalKey,
            )
            .await?;
        Ok(list.tickets.unwrap_or_default())
    }

    pub async fn submit_customer_ticket(
        &self,
        ticket: &ExternalTicketRequest,
    ) -> Result<(), ApiError> {
        if ticket.title.trim().is_empty() {
            return Err(ApiError::Validation("Title is required".to_string()));
        }
        if ticket.external_customer_ref.trim().is_empty() {
            return Err(ApiError::Validation(
                "Customer reference is required".to_string(),
            ));
        }
        self.post_unit("/tickets/external", Auth::PortalKey, ticket)
            .await
    }

    pub async fn customer_ticket_comments(
        &self,
        ticket_id: &str,
    ) -> Result<Vec<TicketComment>, ApiError> {
        let thread: TicketThread = self.get(&ticket_path(ticket_id), Auth::PortalKey).await?;
        Ok(thread.comments.unwrap_or_default())
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
                email: "support@company.com".to_string(),
                name: "Support".to_string(),
                role: Role::Admin,
                onboarding_completed: true,
            }),
        )
    }

    const TICKET: &str = r#"{"id":"t-1","sequential_id":12,"ticket_type":"external","title":"Login broken","status":"in_progress","created_at":"2024-06-01T09:00:00Z","updated_at":"2024-06-02T09:00:00Z"}"#;

    #[tokio::test]
    async fn test_customer_tickets() {
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Get,
            "/tickets/external/CUST-1",
            200,
            &format!(r#"{{"tickets":[{TICKET}]}}"#),
        );
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        let tickets = client.customer_tickets("CUST-1").await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].reference(), "#12");
        assert_eq!(TicketStatus::parse(&tickets[0].status), TicketStatus::InProgress);
        assert_eq!(transport.requests()[0].header("X-API-Key"), Some("test-api-key"));
    }

    #[tokio::test]
    async fn test_missing_or_null_ticket_list_is_empty() {
        let transport = RecordingTransport::new();
        transport.respond(Method::Get, "/tickets/external/A", 200, "{}");
        transport.respond(Method::Get, "/tickets/external/B", 200, r#"{"tickets":null}"#);
        let client = GrcClient::new(transport, &ClientConfig::default());

        assert!(client.customer_tickets("A").await.unwrap().is_empty());
        assert!(client.customer_tickets("B").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_title() {
        let transport = RecordingTransport::new();
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        let result = client
            .submit_customer_ticket(&ExternalTicketRequest {
                external_customer_ref: "CUST-1".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_ticket_comments() {
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Get,
            "/tickets/t-1",
            200,
            &format!(
                r#"{{"ticket":{TICKET},"comments":[{{"id":"c-1","body":"Looking into it","created_at":"2024-06-02T10:00:00Z"}}]}}"#
            ),
        );
        let client = GrcClient::new(transport, &ClientConfig::default());

        let comments = client.customer_ticket_comments("t-1").await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "Looking into it");
    }

    #[tokio::test]
    async fn test_customer_ref_is_one_encoded_segment() {
        let transport = RecordingTransport::new();
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        for (customer_ref, sent) in [
            ("ACME#7", "/tickets/external/ACME%237"),
            ("ACME/7", "/tickets/external/ACME%2F7"),
            ("ACME?all=1", "/tickets/external/ACME%3Fall%3D1"),
            (" ACME 7 ", "/tickets/external/ACME%207"),
        ] {
            transport.respond(Method::Get, sent, 200, r#"{"tickets":[]}"#);
            client.customer_tickets(customer_ref).await.unwrap();
            let url = transport.requests().last().unwrap().url.clone();
            assert_eq!(url, format!("http://localhost:8080/api/v1{sent}"), "{customer_ref}");
        }
    }

    #[tokio::test]
    async fn test_ticket_detail_keeps_internal_notes() {
        let transport = RecordingTransport::new();
        transport.respond(
            Method::Get,
            "/tickets/t-1",
            200,
            &format!(
                r#"{{"ticket":{TICKET},"comments":[{{"id":"c-1","body":"Customer called","is_internal_note":true,"created_at":"2024-06-02T10:00:00Z"}},{{"id":"c-2","body":"Fixed","created_at":"2024-06-03T10:00:00Z"}}]}}"#
            ),
        );
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        let detail = client.ticket(&session(), "t-1").await.unwrap();
        assert_eq!(detail.ticket.title, "Login broken");
        assert_eq!(detail.comments.len(), 2);
        assert!(detail.comments[0].is_internal_note);
        assert!(!detail.comments[1].is_internal_note);
        assert_eq!(transport.requests()[0].header("Authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_ticket_detail_without_ticket_is_malformed() {
        let transport = RecordingTransport::new();
        transport.respond(Method::Get, "/tickets/t-1", 200, r#"{"comments":null}"#);
        let client = GrcClient::new(transport, &ClientConfig::default());

        let error = client.ticket(&session(), "t-1").await.unwrap_err();
        assert!(error.is_malformed());
    }

    #[tokio::test]
    async fn test_add_internal_note() {
        let transport = RecordingTransport::new();
        transport.respond(Method::Post, "/tickets/t-1/comments", 201, "");
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        client
            .add_ticket_comment(
                &session(),
                "t-1",
                &NewComment {
                    body: "Escalated to vendor".to_string(),
                    is_internal_note: true,
                },
            )
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body,
            Some(serde_json::json!({"body": "Escalated to vendor", "is_internal_note": true}))
        );
    }

    #[tokio::test]
    async fn test_blank_comment_sends_nothing() {
        let transport = RecordingTransport::new();
        let client = GrcClient::new(transport.clone(), &ClientConfig::default());

        let result = client
            .add_ticket_comment(&session(), "t-1", &NewComment::default())
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_page_window() {
        let first = PageWindow::new(45, 1, TICKET_PAGE_SIZE);
        assert_eq!((first.start, first.end, first.pages), (0, 20, 3));
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PageWindow::new(45, 3, TICKET_PAGE_SIZE);
        assert_eq!((last.start, last.end), (40, 45));
        assert_eq!(last.summary(), "Showing 41 to 45 of 45");
        assert!(!last.has_next());

        assert_eq!(PageWindow::new(45, 9, TICKET_PAGE_SIZE).page, 3);
        let empty = PageWindow::new(0, 1, TICKET_PAGE_SIZE);
        assert_eq!((empty.start, empty.end, empty.pages), (0, 0, 1));
        assert_eq!(empty.summary(), "Showing 0 of 0");
    }
}
