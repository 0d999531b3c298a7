//! Customer checkout: validate the form, take the (simulated) payment, take the
//! paid lines out of the cart and hand back a receipt.
//!
//! Checkout does not write to the staff order ledger.

use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::model::{CartId, CartItem};
use crate::pricing::{Bill, Pricing};
use crate::validation::{normalize_phone, FieldErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Fulfilment {
    Delivery { address: String },
    Pickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub fulfilment: Fulfilment,
    pub payment: PaymentMethod,
}

impl CheckoutForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.phone("phone", &self.phone);
        errors.email("email", &self.email);
        if let Fulfilment::Delivery { address } = &self.fulfilment {
            errors.require("address", address, "Delivery address is required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    /// `KCB-<n>`.
    pub reference: String,
    pub customer: Customer,
    pub fulfilment: Fulfilment,
    pub payment: PaymentMethod,
    pub lines: Vec<CartItem>,
    pub bill: Bill,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Invalid checkout form: {0}")]
    Invalid(FieldErrors),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Cart not found: {0}")]
    CartNotFound(String),

    #[error(transparent)]
    Cart(CartError),
}

impl From<CartError> for CheckoutError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::NotFound(id) => CheckoutError::CartNotFound(id),
            other => CheckoutError::Cart(other),
        }
    }
}

pub struct Checkout {
    carts: CartClient,
    pricing: Pricing,
    latency: Duration,
    next_reference: AtomicU32,
}

impl Checkout {
    pub fn new(carts: CartClient, pricing: Pricing, latency: Duration) -> Self {
        Self {
            carts,
            pricing,
            latency,
            next_reference: AtomicU32::new(1),
        }
    }

    /// Places the order for everything in `cart_id` when checkout starts. The cart
    /// is left untouched unless the whole checkout succeeds, and dishes added while
    /// payment is pending stay in it.
    #[instrument(skip(self, form), fields(payment = ?form.payment))]
    pub async fn place_order(
        &self,
        cart_id: CartId,
        form: CheckoutForm,
    ) -> Result<Receipt, CheckoutError> {
        form.validate().map_err(|errors| {
            warn!(fields = errors.len(), "Checkout form rejected");
            CheckoutError::Invalid(errors)
        })?;

        let cart = self.carts.cart(cart_id).await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let bill = cart.summary(&self.pricing).bill;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.carts.settle(cart_id, &cart.items).await?;

        let reference = format!(
            "KCB-{}",
            self.next_reference.fetch_add(1, Ordering::Relaxed)
        );
        info!(%reference, total = bill.total, "Order placed");
        Ok(Receipt {
            reference,
            customer: Customer {
                name: form.name.trim().to_string(),
                phone: normalize_phone(&form.phone),
                email: form.email.trim().to_string(),
            },
            fulfilment: form.fulfilment,
            payment: form.payment,
            lines: cart.items,
            bill,
            placed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{self, CartContext};
    use crate::catalog::Catalog;
    use crate::model::MenuItemId;
    use std::sync::Arc;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Meera Nair".to_string(),
            phone: "98765 43210".to_string(),
            email: "meera@example.com".to_string(),
            fulfilment: Fulfilment::Pickup,
            payment: PaymentMethod::Upi,
        }
    }

    fn checkout() -> Checkout {
        checkout_with_latency(Duration::ZERO)
    }

    fn checkout_with_latency(latency: Duration) -> Checkout {
        let (actor, client) = cart_actor::new(8);
        tokio::spawn(actor.run(CartContext::new(
            Arc::new(Catalog::standard()),
            Pricing::default(),
        )));
        Checkout::new(
            CartClient::new(client, Pricing::default()),
            Pricing::default(),
            latency,
        )
    }

    #[test]
    fn test_delivery_needs_address() {
        let mut delivery = form();
        delivery.fulfilment = Fulfilment::Delivery {
            address: "  ".to_string(),
        };
        let errors = delivery.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("address"));

        assert!(form().validate().is_ok());
    }

    #[tokio::test]
    async fn test_place_order_clears_cart_and_numbers_receipts() {
        let checkout = checkout();
        let cart = checkout.carts.open_cart(None).await.unwrap();
        checkout
            .carts
            .add_item(cart, MenuItemId(1), 2)
            .await
            .unwrap();

        let receipt = checkout.place_order(cart, form()).await.unwrap();
        assert_eq!(receipt.reference, "KCB-1");
        assert_eq!(receipt.customer.phone, "9876543210");
        assert_eq!(receipt.lines.len(), 1);
        assert!((receipt.bill.total - receipt.bill.subtotal * 1.05).abs() < 0.011);
        assert_eq!(checkout.carts.summary(cart).await.unwrap().item_count, 0);

        checkout.carts.add_item(cart, MenuItemId(1), 1).await.unwrap();
        let second = checkout.place_order(cart, form()).await.unwrap();
        assert_eq!(second.reference, "KCB-2");
    }

    #[tokio::test]
    async fn test_dish_added_during_payment_stays_in_cart() {
        let checkout = Arc::new(checkout_with_latency(Duration::from_millis(100)));
        let cart = checkout.carts.open_cart(None).await.unwrap();
        checkout.carts.add_item(cart, MenuItemId(1), 2).await.unwrap();

        let pending = tokio::spawn({
            let checkout = checkout.clone();
            async move { checkout.place_order(cart, form()).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        checkout.carts.add_item(cart, MenuItemId(2), 1).await.unwrap();
        checkout.carts.add_item(cart, MenuItemId(1), 1).await.unwrap();

        let receipt = pending.await.unwrap().unwrap();
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].menu_item_id, MenuItemId(1));
        assert_eq!(receipt.lines[0].quantity, 2);

        let left = checkout.carts.cart(cart).await.unwrap();
        assert_eq!(left.items.len(), 2);
        assert_eq!(left.line(MenuItemId(1)).unwrap().quantity, 1);
        assert_eq!(left.line(MenuItemId(2)).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_empty_cart_and_invalid_form_are_rejected() {
        let checkout = checkout();
        let cart = checkout.carts.open_cart(None).await.unwrap();
        assert_eq!(
            checkout.place_order(cart, form()).await,
            Err(CheckoutError::EmptyCart)
        );

        checkout.carts.add_item(cart, MenuItemId(2), 1).await.unwrap();
        let mut bad = form();
        bad.email = "meera@".to_string();
        match checkout.place_order(cart, bad).await {
            Err(CheckoutError::Invalid(errors)) => assert!(errors.contains("email")),
            other => panic!("expected invalid form, got {other:?}"),
        }
        assert_eq!(checkout.carts.summary(cart).await.unwrap().item_count, 1);

        assert_eq!(
            checkout.place_order(CartId(99), form()).await,
            Err(CheckoutError::CartNotFound("cart_99".to_string()))
        );
    }
}
