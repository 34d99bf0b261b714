//! Government enquiry operations

use reqwest::Method;
use uuid::Uuid;

use crate::StoreClient;
use crate::auth::Role;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Record;

use super::query::ListPages;
use super::query::ListQuery;
use super::query::Page;
use super::query::StatusParam;

/// Lifecycle status of a procurement enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnquiryStatus {
    /// Submitted and awaiting a response.
    Open,
    /// A quote has been issued against it.
    Quoted,
    /// Resolved, withdrawn, or expired.
    Closed,
}

impl EnquiryStatus {
    /// Returns the status name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            EnquiryStatus::Open => "open",
            EnquiryStatus::Quoted => "quoted",
            EnquiryStatus::Closed => "closed",
        }
    }
}

impl StatusParam for EnquiryStatus {
    fn wire_name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(EnquiryStatus::Open),
            "quoted" => Ok(EnquiryStatus::Quoted),
            "closed" => Ok(EnquiryStatus::Closed),
            other => Err(format!("unknown enquiry status '{other}'")),
        }
    }
}

impl StoreClient {
    /// Lists the current government client's enquiries.
    pub async fn my_enquiries(&self, query: &ListQuery) -> Result<Page<Record>, Error> {
        let url = format!(
            "{}{}",
            self.endpoint_url("/govt/enquiries/my"),
            query.to_query_string()
        );
        self.get_json(&url, Some(Role::Government)).await
    }

    /// Returns an async iterator over the client's enquiry pages.
    pub fn my_enquiry_pages(&self, query: &ListQuery) -> ListPages<'_, Record> {
        ListPages::new(self, "/govt/enquiries/my", query, Some(Role::Government))
    }

    /// Retrieves a single enquiry.
    pub async fn enquiry(&self, id: Uuid) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/govt/enquiries/{}", id));
        self.get_json(&url, Some(Role::Government)).await
    }

    /// Submits a new procurement enquiry.
    pub async fn submit_enquiry(&self, enquiry: &Record) -> Result<Record, Error> {
        let url = self.endpoint_url("/govt/enquiries");
        let body = serde_json::to_string(enquiry).map_err(|e| ApiError::parse(e.to_string()))?;
        self.send_json(Method::POST, &url, Some(body), Some(Role::Government))
            .await
    }

    /// Lists every enquiry in the store. Requires an admin session.
    pub async fn enquiries(&self, query: &ListQuery) -> Result<Page<Record>, Error> {
        let url = format!(
            "{}{}",
            self.endpoint_url("/admin/enquiries"),
            query.to_query_string()
        );
        self.get_json(&url, Some(Role::Admin)).await
    }

    /// Posts a written response to an enquiry. Requires an admin session.
    pub async fn respond_enquiry(&self, id: Uuid, message: &str) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/admin/enquiries/{}/response", id));
        let body = serde_json::json!({ "message": message }).to_string();
        self.send_json(Method::POST, &url, Some(body), Some(Role::Admin))
            .await
    }
}
