//! Order creation and the hosted-payment redirect protocol
//!
//! Checkout runs in two phases: create the order, then request a hosted
//! payment session URL for it and navigate the browser there. The return trip
//! arrives as a separate page load whose query string is parsed by
//! [`OrdersClient::confirm_return`].

mod types;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::cart::CartClient;
use crate::error::{Error, FieldError};
use crate::fetch::Fetch;
use crate::session::SessionStore;
use crate::store::SharedStore;

pub use types::{
    CheckoutDraft, CheckoutReturn, CheckoutSource, CustomerInfo, Order, OrderItem, OrderStatus,
};

/// Orders with a subtotal above this ship free; below it a flat fee applies
pub const FREE_SHIPPING_THRESHOLD: f64 = 50_000.0;
const FLAT_SHIPPING_FEE: f64 = 500.0;
const TAX_RATE: f64 = 0.18;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest<'a> {
    customer_info: &'a CustomerInfo,
    payment_method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [OrderItem]>,
}

#[derive(Deserialize)]
struct CreateOrderResponse {
    order: Order,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutSessionRequest<'a> {
    order_id: &'a str,
}

#[derive(Deserialize)]
struct CheckoutSessionResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct CheckoutSuccessResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    order: Option<Order>,
    #[serde(default)]
    message: Option<String>,
}

/// The user-orders endpoint returns either `{"orders": [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum OrdersList {
    Wrapped {
        #[serde(default)]
        orders: Vec<Order>,
    },
    Bare(Vec<Order>),
}

/// Client for the order and payment lifecycle
#[derive(Debug, Clone)]
pub struct OrdersClient {
    base_url: String,
    client: Client,
    session: Arc<SessionStore>,
    cart: CartClient,
}

impl OrdersClient {
    pub(crate) fn new(
        base_url: &str,
        client: Client,
        session: Arc<SessionStore>,
        store: Arc<SharedStore>,
    ) -> Self {
        let cart = CartClient::new(base_url, client.clone(), Arc::clone(&session), store);
        Self {
            base_url: base_url.to_string(),
            client,
            session,
            cart,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/orders{}", self.base_url, path)
    }

    /// Build a checkout draft from the staged buy-now payload when present,
    /// otherwise from the server-side cart. The staged payload is left in
    /// place until the order is actually created.
    pub async fn build_checkout(&self, customer: CustomerInfo) -> Result<CheckoutDraft, Error> {
        if !self.session.is_authenticated() {
            return Err(Error::unauthenticated("log in to check out"));
        }

        let (items, source) = match self.session.staged_checkout() {
            Some(staging) => {
                let items: Vec<OrderItem> = staging
                    .courses
                    .iter()
                    .map(|course| OrderItem {
                        course_id: course.course_id.clone(),
                        quantity: course.quantity.max(1),
                        price: course.price,
                    })
                    .collect();
                (items, CheckoutSource::BuyNow)
            }
            None => {
                let items: Vec<OrderItem> = self
                    .cart
                    .list()
                    .await?
                    .into_iter()
                    .map(|item| OrderItem {
                        course_id: item.course.id.clone(),
                        quantity: item.quantity.max(1),
                        price: item.course.price,
                    })
                    .collect();
                (items, CheckoutSource::Cart)
            }
        };

        let (subtotal, shipping, tax, total) = compute_totals(&items);
        Ok(CheckoutDraft {
            customer,
            items,
            source,
            subtotal,
            shipping,
            tax,
            total,
        })
    }

    /// Create the order on the backend. Line items travel with the request
    /// only for buy-now drafts; cart drafts are read server-side. On success
    /// the staged buy-now payload is cleared so a later cart checkout does
    /// not reuse it.
    pub async fn create_order(&self, draft: &CheckoutDraft) -> Result<Order, Error> {
        if draft.items.is_empty() {
            return Err(Error::validation(
                "cannot create an order with no items",
                Vec::new(),
            ));
        }

        let request = CreateOrderRequest {
            customer_info: &draft.customer,
            payment_method: "card",
            items: match draft.source {
                CheckoutSource::BuyNow => Some(&draft.items),
                CheckoutSource::Cart => None,
            },
        };

        let response: CreateOrderResponse = Fetch::post(&self.client, &self.url("/create"))
            .authed(&self.session)?
            .json(&request)?
            .execute()
            .await?;

        if draft.source == CheckoutSource::BuyNow {
            self.session.clear_staged_checkout();
        }
        tracing::debug!(order_id = %response.order.id, "order created");
        Ok(response.order)
    }

    /// Request a hosted-payment session for the order and return the URL the
    /// browser should navigate to.
    pub async fn create_checkout_session(&self, order_id: &str) -> Result<String, Error> {
        let response: CheckoutSessionResponse =
            Fetch::post(&self.client, &self.url("/create-checkout-session"))
                .authed(&self.session)?
                .json(&CheckoutSessionRequest { order_id })?
                .execute()
                .await?;

        match response.url {
            Some(url) if response.success => Ok(url),
            _ => Err(Error::other("checkout session response carried no URL")),
        }
    }

    /// Parse the query string of the payment-return page load and resolve the
    /// checkout outcome.
    ///
    /// Verification failures are never swallowed: the error spells out that
    /// support may need to be contacted, because money may have moved without
    /// local confirmation.
    pub async fn confirm_return(&self, query: &str) -> Result<CheckoutReturn, Error> {
        let params: HashMap<String, String> =
            url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect();

        if params.get("canceled").map(String::as_str) == Some("true") {
            return Ok(CheckoutReturn::Cancelled);
        }

        let session_id = params.get("session_id");
        let order_id = params.get("order_id");
        let (Some(session_id), Some(order_id)) = (session_id, order_id) else {
            let mut fields = Vec::new();
            if session_id.is_none() {
                fields.push(FieldError {
                    field: "session_id".to_string(),
                    message: "missing from return URL".to_string(),
                });
            }
            if order_id.is_none() {
                fields.push(FieldError {
                    field: "order_id".to_string(),
                    message: "missing from return URL".to_string(),
                });
            }
            return Err(Error::validation("invalid checkout return parameters", fields));
        };

        let mut query_params = HashMap::new();
        query_params.insert("session_id".to_string(), session_id.clone());
        query_params.insert("order_id".to_string(), order_id.clone());

        let result: Result<CheckoutSuccessResponse, Error> =
            Fetch::get(&self.client, &self.url("/checkout-success"))
                .authed(&self.session)?
                .query(query_params)
                .execute()
                .await;

        match result {
            Ok(response) => match (response.success, response.order) {
                (true, Some(order)) => Ok(CheckoutReturn::Verified(order)),
                _ => Err(verification_failure(
                    response
                        .message
                        .unwrap_or_else(|| "order could not be confirmed".to_string()),
                )),
            },
            Err(Error::Unauthenticated(message)) => Err(Error::Unauthenticated(message)),
            Err(err) => Err(verification_failure(err.to_string())),
        }
    }

    /// Fetch the user's order history
    pub async fn user_orders(&self) -> Result<Vec<Order>, Error> {
        let list: OrdersList = Fetch::get(&self.client, &self.url("/user-orders"))
            .authed(&self.session)?
            .execute()
            .await?;
        Ok(match list {
            OrdersList::Wrapped { orders } => orders,
            OrdersList::Bare(orders) => orders,
        })
    }
}

fn verification_failure(detail: String) -> Error {
    Error::other(format!(
        "payment verification failed: {}; contact support if money was deducted",
        detail
    ))
}

fn compute_totals(items: &[OrderItem]) -> (f64, f64, f64, f64) {
    let subtotal: f64 = items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();
    let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
        0.0
    } else {
        FLAT_SHIPPING_FEE
    };
    let tax = (subtotal * TAX_RATE).round();
    let total = subtotal + shipping + tax;
    (subtotal, shipping, tax, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            course_id: "c".to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn totals_apply_tax_and_flat_shipping() {
        let (subtotal, shipping, tax, total) = compute_totals(&[item(1000.0, 2)]);
        assert_eq!(subtotal, 2000.0);
        assert_eq!(shipping, FLAT_SHIPPING_FEE);
        assert_eq!(tax, 360.0);
        assert_eq!(total, 2860.0);
    }

    #[test]
    fn large_orders_ship_free() {
        let (_, shipping, _, _) = compute_totals(&[item(60_000.0, 1)]);
        assert_eq!(shipping, 0.0);
    }
}
