//! Order operations

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

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Placed but not yet confirmed.
    Pending,
    /// Confirmed and awaiting dispatch.
    Confirmed,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before dispatch.
    Cancelled,
}

impl OrderStatus {
    /// Returns the status name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl StatusParam for OrderStatus {
    fn wire_name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

impl StoreClient {
    /// Lists the current user's orders.
    pub async fn my_orders(&self, query: &ListQuery) -> Result<Page<Record>, Error> {
        let url = format!(
            "{}{}",
            self.endpoint_url("/orders/my"),
            query.to_query_string()
        );
        self.get_json(&url, Some(Role::Customer)).await
    }

    /// Retrieves one of the current user's orders.
    pub async fn order(&self, id: Uuid) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/orders/{}", id));
        self.get_json(&url, Some(Role::Customer)).await
    }

    /// Places an order.
    pub async fn place_order(&self, order: &Record) -> Result<Record, Error> {
        let url = self.endpoint_url("/orders");
        let body = serde_json::to_string(order).map_err(|e| ApiError::parse(e.to_string()))?;
        self.send_json(Method::POST, &url, Some(body), Some(Role::Customer))
            .await
    }

    /// Lists every order in the store. Requires an admin session.
    pub async fn orders(&self, query: &ListQuery) -> Result<Page<Record>, Error> {
        let url = format!(
            "{}{}",
            self.endpoint_url("/admin/orders"),
            query.to_query_string()
        );
        self.get_json(&url, Some(Role::Admin)).await
    }

    /// Returns an async iterator over every admin order page.
    pub fn order_pages(&self, query: &ListQuery) -> ListPages<'_, Record> {
        ListPages::new(self, "/admin/orders", query, Some(Role::Admin))
    }

    /// Moves an order to a new status. Requires an admin session.
    pub async fn set_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/admin/orders/{}/status", id));
        let body = serde_json::json!({ "status": status.as_str() }).to_string();
        self.send_json(Method::PATCH, &url, Some(body), Some(Role::Admin))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_names_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()), Ok(status));
        }
        assert!(OrderStatus::from_str("returned").is_err());
    }
}
