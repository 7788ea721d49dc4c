//! Tests for the stream registry and record mappers

use super::*;
use crate::decode::RawNode;
use crate::error::Error;
use crate::template;
use crate::types::JsonObject;
use pretty_assertions::assert_eq;
use serde_json::json;

fn node(edge: serde_json::Value) -> RawNode {
    RawNode::from_edge(edge.as_object().unwrap())
}

fn record(value: serde_json::Value) -> JsonObject {
    value.as_object().unwrap().clone()
}

fn shop() -> serde_json::Value {
    json!({"id": "gid://partners/Shop/1", "name": "Acme", "myshopifyDomain": "acme.myshopify.com"})
}

fn app() -> serde_json::Value {
    json!({"id": "gid://partners/App/9", "name": "Widget"})
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_builtin_registry_order() {
    let registry = StreamRegistry::builtin();
    assert_eq!(
        registry.ids(),
        vec![
            "shopify_partners_app_subscription_sale",
            "shopify_partners_app_sale_adjustment",
            "shopify_partners_app_credit",
            "shopify_partners_app_relationship",
            "shopify_partners_app_subscription_charge",
        ]
    );
}

#[test]
fn test_registry_unknown_stream() {
    let registry = StreamRegistry::builtin();
    let err = registry.get("shopify_partners_payouts").unwrap_err();
    assert!(matches!(err, Error::UnknownStream { ref stream } if stream == "shopify_partners_payouts"));
    assert!(!registry.contains("shopify_partners_payouts"));
}

#[test]
fn test_registry_select_keeps_order() {
    let registry = StreamRegistry::builtin();
    let selected = registry
        .select(&[
            "shopify_partners_app_credit",
            "shopify_partners_app_subscription_sale",
        ])
        .unwrap();
    let ids: Vec<&str> = selected.iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        vec![
            "shopify_partners_app_credit",
            "shopify_partners_app_subscription_sale"
        ]
    );

    assert!(registry.select(&["shopify_partners_app_credit", "nope"]).is_err());
}

#[test]
fn test_query_templates_use_window_bounds() {
    for stream in StreamRegistry::builtin().iter() {
        assert!(stream.uses_placeholder(template::FROM_DATE), "{}", stream.id);
        assert!(stream.uses_placeholder(template::TO_DATE), "{}", stream.id);
    }
}

#[test]
fn test_only_charge_stream_is_paginated() {
    let registry = StreamRegistry::builtin();
    let paginated: Vec<&str> = registry
        .iter()
        .filter(|s| s.uses_placeholder(template::CURSOR))
        .map(|s| s.id)
        .collect();
    assert_eq!(paginated, vec!["shopify_partners_app_subscription_charge"]);
    assert!(registry
        .get("shopify_partners_app_subscription_charge")
        .unwrap()
        .query_template
        .contains("pageInfo"));
}

#[test]
fn test_app_event_streams_need_app_id() {
    let registry = StreamRegistry::builtin();
    for stream in registry.iter() {
        let expected = stream.root_path == "data.app.events";
        assert_eq!(stream.uses_placeholder(template::APP_ID), expected, "{}", stream.id);
    }
}

// ============================================================================
// Field Helper Tests
// ============================================================================

#[test]
fn test_text_blank_is_none() {
    let n = node(json!({"a": "", "b": null, "c": "x", "d": 5}));
    assert_eq!(text(&n, "a").unwrap(), None);
    assert_eq!(text(&n, "b").unwrap(), None);
    assert_eq!(text(&n, "c").unwrap(), Some("x".to_string()));
    assert_eq!(text(&n, "d").unwrap(), Some("5".to_string()));
    assert!(matches!(text(&n, "e"), Err(crate::decode::FieldError::Missing { .. })));
}

#[test]
fn test_decimal_parsing() {
    let n = node(json!({"a": "4.99", "b": "", "c": "abc", "d": 12.5, "e": true}));
    assert_eq!(decimal(&n, "a").unwrap().unwrap().to_string(), "4.99");
    assert_eq!(decimal(&n, "b").unwrap(), None);
    assert!(matches!(
        decimal(&n, "c"),
        Err(crate::decode::FieldError::Conversion { .. })
    ));
    assert_eq!(decimal(&n, "d").unwrap().unwrap().to_string(), "12.5");
    assert!(decimal(&n, "e").is_err());
}

#[test]
fn test_boolean_parsing() {
    let n = node(json!({"a": true, "b": false, "c": "true", "d": "yes", "e": null}));
    assert_eq!(boolean(&n, "a").unwrap(), Some(true));
    assert_eq!(boolean(&n, "b").unwrap(), Some(false));
    assert_eq!(boolean(&n, "c").unwrap(), Some(true));
    assert!(boolean(&n, "d").is_err());
    assert_eq!(boolean(&n, "e").unwrap(), None);
}

// ============================================================================
// Mapper Tests
// ============================================================================

fn sale_edge() -> serde_json::Value {
    json!({"node": {
        "id": "gid://partners/AppSubscriptionSale/1",
        "createdAt": "2024-01-02T10:00:00.000000Z",
        "netAmount": {"amount": "8.0", "currencyCode": "USD"},
        "grossAmount": {"amount": "10.0", "currencyCode": "USD"},
        "shopifyFee": {"amount": "2.0", "currencyCode": "USD"},
        "app": app(),
        "shop": shop(),
        "billingInterval": "EVERY_30_DAYS",
        "chargeId": ""
    }})
}

#[test]
fn test_map_subscription_sale() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_subscription_sale").unwrap();
    let mapped = stream.map(&node(sale_edge())).unwrap();

    assert_eq!(
        mapped,
        record(json!({
            "id": "gid://partners/AppSubscriptionSale/1",
            "createdAt": "2024-01-02T10:00:00.000000Z",
            "netAmount": 8.0,
            "netAmountCurrencyCode": "USD",
            "grossAmount": 10.0,
            "grossAmountCurrencyCode": "USD",
            "shopifyFee": 2.0,
            "shopifyFeeCurrencyCode": "USD",
            "app": "Widget",
            "appId": "gid://partners/App/9",
            "shopDomain": "acme.myshopify.com",
            "shopName": "Acme",
            "shopId": "gid://partners/Shop/1",
            "billingInterval": "EVERY_30_DAYS",
            "chargeId": null
        }))
    );
}

#[test]
fn test_map_is_pure() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_subscription_sale").unwrap();
    let raw = node(sale_edge());
    assert_eq!(stream.map(&raw).unwrap(), stream.map(&raw).unwrap());
}

#[test]
fn test_map_sale_adjustment_has_no_billing_interval() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_sale_adjustment").unwrap();
    let mapped = stream.map(&node(sale_edge())).unwrap();
    assert!(!mapped.contains_key("billingInterval"));
    assert_eq!(mapped["netAmount"], json!(8.0));
}

#[test]
fn test_map_missing_key_is_mapping_error() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_subscription_sale").unwrap();
    let mut edge = sale_edge();
    edge["node"].as_object_mut().unwrap().remove("chargeId");

    let err = stream.map(&node(edge)).unwrap_err();
    match err {
        Error::Mapping { stream, key, node } => {
            assert_eq!(stream, "shopify_partners_app_subscription_sale");
            assert_eq!(key, "node.chargeId");
            assert!(node.contains("AppSubscriptionSale/1"));
        }
        other => panic!("expected mapping error, got {other}"),
    }
}

#[test]
fn test_map_bad_amount_is_conversion_error() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_sale_adjustment").unwrap();
    let mut edge = sale_edge();
    edge["node"]["netAmount"]["amount"] = json!("eight");

    let err = stream.map(&node(edge)).unwrap_err();
    assert!(matches!(
        err,
        Error::Conversion { ref field, .. } if field == "node.netAmount.amount"
    ));
}

#[test]
fn test_map_app_credit() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_credit").unwrap();
    let edge = json!({"node": {
        "type": "CREDIT_APPLIED",
        "occurredAt": "2024-01-02T00:00:01Z",
        "app": app(),
        "shop": shop(),
        "appCredit": {
            "id": "gid://partners/AppCredit/3",
            "name": "Refund",
            "test": false,
            "amount": {"amount": "5.50", "currencyCode": "EUR"}
        }
    }});

    let mapped = stream.map(&node(edge)).unwrap();
    assert_eq!(mapped["type"], json!("CREDIT_APPLIED"));
    assert_eq!(mapped["appCredit"], json!(5.5));
    assert_eq!(mapped["appCreditCurrencyCode"], json!("EUR"));
    assert_eq!(mapped["appCreditId"], json!("gid://partners/AppCredit/3"));
    assert_eq!(mapped["appCreditTest"], json!(false));
    assert_eq!(mapped["occurredAt"], json!("2024-01-02T00:00:01Z"));
}

#[test]
fn test_map_relationship_uninstalled() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_relationship").unwrap();
    let edge = json!({"node": {
        "type": "RELATIONSHIP_UNINSTALLED",
        "occurredAt": "2024-01-02T00:00:01Z",
        "app": app(),
        "shop": shop(),
        "description": "Too expensive",
        "reason": "PRICE"
    }});

    let mapped = stream.map(&node(edge)).unwrap();
    assert_eq!(mapped["description"], json!("Too expensive"));
    assert_eq!(mapped["reason"], json!("PRICE"));
}

#[test]
fn test_map_relationship_installed_has_null_reason() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_relationship").unwrap();
    let edge = json!({"node": {
        "type": "RELATIONSHIP_INSTALLED",
        "occurredAt": "2024-01-02T00:00:01Z",
        "app": app(),
        "shop": shop()
    }});

    let mapped = stream.map(&node(edge)).unwrap();
    assert_eq!(mapped["type"], json!("RELATIONSHIP_INSTALLED"));
    assert_eq!(mapped["description"], json!(null));
    assert_eq!(mapped["reason"], json!(null));
    assert_eq!(mapped["shopDomain"], json!("acme.myshopify.com"));
}

#[test]
fn test_map_subscription_charge() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_subscription_charge").unwrap();
    let edge = json!({"cursor": "c1", "node": {
        "type": "SUBSCRIPTION_CHARGE_ACTIVATED",
        "occurredAt": "2024-01-02T03:04:05Z",
        "app": app(),
        "shop": shop(),
        "charge": {
            "id": "gid://partners/AppSubscription/7",
            "name": "Pro",
            "test": true,
            "billingOn": "2024-02-01",
            "amount": {"amount": "19.99", "currencyCode": "USD"}
        }
    }});

    let mapped = stream.map(&node(edge)).unwrap();
    assert_eq!(mapped["subscriptionCharge"], json!(19.99));
    assert_eq!(mapped["subscriptionChargeCurrencyCode"], json!("USD"));
    assert_eq!(mapped["id"], json!("gid://partners/AppSubscription/7"));
    assert_eq!(mapped["test"], json!(true));
    assert_eq!(mapped["billingOn"], json!("2024-02-01"));
    assert!(!mapped.contains_key("cursor"));
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_schemas_cover_keys_and_bookmark() {
    for stream in StreamRegistry::builtin().iter() {
        let schema = stream.schema().unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert!(
            properties.contains_key(stream.replication_key),
            "{} schema lacks {}",
            stream.id,
            stream.replication_key
        );
        for key in stream.key_properties {
            assert!(properties.contains_key(*key), "{} schema lacks {key}", stream.id);
        }
    }
}

#[test]
fn test_sale_schema_matches_mapped_record() {
    let registry = StreamRegistry::builtin();
    let stream = registry.get("shopify_partners_app_subscription_sale").unwrap();
    let schema = stream.schema().unwrap();
    let mapped = stream.map(&node(sale_edge())).unwrap();

    let mut schema_keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
    let mut record_keys: Vec<&String> = mapped.keys().collect();
    schema_keys.sort();
    record_keys.sort();
    assert_eq!(schema_keys, record_keys);
}
