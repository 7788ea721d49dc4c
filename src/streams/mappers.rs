//! Record mappers, one per stream
//!
//! Mappers are pure: the same node always yields the same record.

use super::fields::{boolean, decimal, text, to_record};
use crate::decode::{FieldError, RawNode};
use crate::types::JsonObject;
use rust_decimal::Decimal;
use serde::Serialize;

const RELATIONSHIP_UNINSTALLED: &str = "RELATIONSHIP_UNINSTALLED";

/// App and shop columns shared by every stream
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppShop {
    app: Option<String>,
    app_id: Option<String>,
    shop_domain: Option<String>,
    shop_name: Option<String>,
    shop_id: Option<String>,
}

impl AppShop {
    fn read(node: &RawNode) -> Result<Self, FieldError> {
        Ok(Self {
            app: text(node, "node.app.name")?,
            app_id: text(node, "node.app.id")?,
            shop_domain: text(node, "node.shop.myshopifyDomain")?,
            shop_name: text(node, "node.shop.name")?,
            shop_id: text(node, "node.shop.id")?,
        })
    }
}

// ============================================================================
// Transactions
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Transaction {
    id: Option<String>,
    created_at: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    net_amount: Option<Decimal>,
    net_amount_currency_code: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    gross_amount: Option<Decimal>,
    gross_amount_currency_code: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    shopify_fee: Option<Decimal>,
    shopify_fee_currency_code: Option<String>,
    #[serde(flatten)]
    app_shop: AppShop,
    charge_id: Option<String>,
}

impl Transaction {
    fn read(node: &RawNode) -> Result<Self, FieldError> {
        Ok(Self {
            id: text(node, "node.id")?,
            created_at: text(node, "node.createdAt")?,
            net_amount: decimal(node, "node.netAmount.amount")?,
            net_amount_currency_code: text(node, "node.netAmount.currencyCode")?,
            gross_amount: decimal(node, "node.grossAmount.amount")?,
            gross_amount_currency_code: text(node, "node.grossAmount.currencyCode")?,
            shopify_fee: decimal(node, "node.shopifyFee.amount")?,
            shopify_fee_currency_code: text(node, "node.shopifyFee.currencyCode")?,
            app_shop: AppShop::read(node)?,
            charge_id: text(node, "node.chargeId")?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionSale {
    #[serde(flatten)]
    transaction: Transaction,
    billing_interval: Option<String>,
}

/// `shopify_partners_app_subscription_sale`
pub fn app_subscription_sale(node: &RawNode) -> Result<JsonObject, FieldError> {
    to_record(&SubscriptionSale {
        transaction: Transaction::read(node)?,
        billing_interval: text(node, "node.billingInterval")?,
    })
}

/// `shopify_partners_app_sale_adjustment`
pub fn app_sale_adjustment(node: &RawNode) -> Result<JsonObject, FieldError> {
    to_record(&Transaction::read(node)?)
}

// ============================================================================
// App events
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppCredit {
    #[serde(flatten)]
    app_shop: AppShop,
    occurred_at: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    app_credit: Option<Decimal>,
    app_credit_currency_code: Option<String>,
    app_credit_id: Option<String>,
    app_credit_name: Option<String>,
    app_credit_test: Option<bool>,
}

/// `shopify_partners_app_credit`
pub fn app_credit(node: &RawNode) -> Result<JsonObject, FieldError> {
    to_record(&AppCredit {
        app_shop: AppShop::read(node)?,
        occurred_at: text(node, "node.occurredAt")?,
        event_type: text(node, "node.type")?,
        app_credit: decimal(node, "node.appCredit.amount.amount")?,
        app_credit_currency_code: text(node, "node.appCredit.amount.currencyCode")?,
        app_credit_id: text(node, "node.appCredit.id")?,
        app_credit_name: text(node, "node.appCredit.name")?,
        app_credit_test: boolean(node, "node.appCredit.test")?,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppRelationship {
    #[serde(flatten)]
    app_shop: AppShop,
    occurred_at: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    description: Option<String>,
    reason: Option<String>,
}

/// `shopify_partners_app_relationship`
///
/// Only uninstall events carry `description` and `reason`; every other
/// event type gets nulls for both.
pub fn app_relationship(node: &RawNode) -> Result<JsonObject, FieldError> {
    let event_type = text(node, "node.type")?;
    let (description, reason) = if event_type.as_deref() == Some(RELATIONSHIP_UNINSTALLED) {
        (
            text(node, "node.description")?,
            text(node, "node.reason")?,
        )
    } else {
        (None, None)
    };

    to_record(&AppRelationship {
        app_shop: AppShop::read(node)?,
        occurred_at: text(node, "node.occurredAt")?,
        event_type,
        description,
        reason,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionCharge {
    #[serde(flatten)]
    app_shop: AppShop,
    #[serde(with = "rust_decimal::serde::float_option")]
    subscription_charge: Option<Decimal>,
    subscription_charge_currency_code: Option<String>,
    billing_on: Option<String>,
    id: Option<String>,
    name: Option<String>,
    test: Option<bool>,
    occurred_at: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
}

/// `shopify_partners_app_subscription_charge`
pub fn app_subscription_charge(node: &RawNode) -> Result<JsonObject, FieldError> {
    to_record(&SubscriptionCharge {
        app_shop: AppShop::read(node)?,
        subscription_charge: decimal(node, "node.charge.amount.amount")?,
        subscription_charge_currency_code: text(node, "node.charge.amount.currencyCode")?,
        billing_on: text(node, "node.charge.billingOn")?,
        id: text(node, "node.charge.id")?,
        name: text(node, "node.charge.name")?,
        test: boolean(node, "node.charge.test")?,
        occurred_at: text(node, "node.occurredAt")?,
        event_type: text(node, "node.type")?,
    })
}
