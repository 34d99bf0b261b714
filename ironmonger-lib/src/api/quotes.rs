//! Quote operations

use reqwest::Method;
use uuid::Uuid;

use crate::StoreClient;
use crate::auth::Role;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Record;

use super::query::ListQuery;
use super::query::Page;
use super::query::StatusParam;

/// Lifecycle status of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStatus {
    /// Issued and awaiting the client's decision.
    Issued,
    /// Accepted by the client.
    Accepted,
    /// Declined by the client.
    Declined,
    /// Lapsed without a decision.
    Expired,
}

impl QuoteStatus {
    /// Returns the status name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteStatus::Issued => "issued",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Declined => "declined",
            QuoteStatus::Expired => "expired",
        }
    }
}

impl StatusParam for QuoteStatus {
    fn wire_name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issued" => Ok(QuoteStatus::Issued),
            "accepted" => Ok(QuoteStatus::Accepted),
            "declined" => Ok(QuoteStatus::Declined),
            "expired" => Ok(QuoteStatus::Expired),
            other => Err(format!("unknown quote status '{other}'")),
        }
    }
}

impl StoreClient {
    /// Lists the current government client's quotes.
    pub async fn my_quotes(&self, query: &ListQuery) -> Result<Page<Record>, Error> {
        let url = format!(
            "{}{}",
            self.endpoint_url("/govt/quotes/my"),
            query.to_query_string()
        );
        self.get_json(&url, Some(Role::Government)).await
    }

    /// Issues a quote against an enquiry. Requires an admin session.
    pub async fn issue_quote(&self, enquiry_id: Uuid, quote: &Record) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/admin/enquiries/{}/quote", enquiry_id));
        let body = serde_json::to_string(quote).map_err(|e| ApiError::parse(e.to_string()))?;
        self.send_json(Method::POST, &url, Some(body), Some(Role::Admin))
            .await
    }

    /// Accepts a quote.
    pub async fn accept_quote(&self, id: Uuid) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/govt/quotes/{}/accept", id));
        self.send_json(Method::POST, &url, None, Some(Role::Government))
            .await
    }

    /// Declines a quote.
    pub async fn decline_quote(&self, id: Uuid) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/govt/quotes/{}/decline", id));
        self.send_json(Method::POST, &url, None, Some(Role::Government))
            .await
    }

    /// Builds the URL of a quote's PDF document.
    ///
    /// Document rendering is server-side; the client only addresses it.
    pub fn quote_document_url(&self, id: Uuid) -> String {
        self.endpoint_url(&format!("/govt/quotes/{}/document", id))
    }
}
