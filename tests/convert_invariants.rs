//! Conversion Invariant Tests
//!
//! Tests for the conversion engine invariants:
//! - Conversion is deterministic
//! - Required fields are enforced for absent and explicit-null input alike
//! - Optional fields default to null / empty sequence / empty mapping
//! - Unknown input keys are dropped, never fatal
//! - A bare value in a list position is singleton-wrapped
//! - Re-converting already-typed values is a no-op
//! - One decompose/instantiate round-trip is stable

use restruct::convert::{decompose, decompose_record, instantiate, ConvertError};
use restruct::schema::{FieldDef, KeyType, Schema, SchemaRegistry};
use restruct::value::{MapKey, Value};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn raw(json: serde_json::Value) -> Value {
    Value::from_json(json)
}

fn setup_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    registry
        .register(Schema::new("Customer", vec![FieldDef::plain("name")]))
        .unwrap();
    registry
        .register(Schema::new("LineItem", vec![FieldDef::plain("sku")]))
        .unwrap();
    registry
        .register(Schema::new("Tag", vec![FieldDef::plain("label")]))
        .unwrap();
    registry
        .register(Schema::new(
            "Order",
            vec![
                FieldDef::plain("id"),
                FieldDef::required_single("customer", "Customer"),
                FieldDef::optional_list("lines", "LineItem"),
                FieldDef::optional_mapping("tags", KeyType::String, "Tag"),
            ],
        ))
        .unwrap();
    // Strict variants for required-collection enforcement.
    registry
        .register(Schema::new(
            "Shipment",
            vec![FieldDef::required_list("lines", "LineItem")],
        ))
        .unwrap();
    registry
        .register(Schema::new(
            "TagIndex",
            vec![FieldDef::required_mapping("entries", KeyType::Int, "Tag")],
        ))
        .unwrap();
    // Optional single for defaulting tests.
    registry
        .register(Schema::new(
            "Account",
            vec![
                FieldDef::plain("id"),
                FieldDef::optional_single("owner", "Customer"),
            ],
        ))
        .unwrap();

    registry
}

fn valid_order() -> serde_json::Value {
    json!({
        "id": 1,
        "customer": {"name": "Ann"},
        "lines": [{"sku": "A"}, {"sku": "B"}],
        "tags": {"x": {"label": "hot"}}
    })
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Identical input converts identically every time.
#[test]
fn test_conversion_is_deterministic() {
    let registry = setup_registry();

    let first = instantiate(&registry, "Order", raw(valid_order())).unwrap();
    for _ in 0..100 {
        let again = instantiate(&registry, "Order", raw(valid_order())).unwrap();
        assert_eq!(again, first);
    }
}

/// Identical invalid input fails identically every time.
#[test]
fn test_failure_is_deterministic() {
    let registry = setup_registry();
    let input = json!({"id": 1});

    for _ in 0..100 {
        let result = instantiate(&registry, "Order", raw(input.clone()));
        assert_eq!(
            result,
            Err(ConvertError::MissingRequiredField {
                type_name: "Customer".into()
            })
        );
    }
}

// =============================================================================
// Required Field Tests
// =============================================================================

/// Omitting a required single field fails, naming the nested type.
#[test]
fn test_missing_required_single_field() {
    let registry = setup_registry();

    let result = instantiate(&registry, "Order", raw(json!({"id": 1})));
    let err = result.unwrap_err();
    assert_eq!(
        err,
        ConvertError::MissingRequiredField {
            type_name: "Customer".into()
        }
    );
    assert_eq!(err.to_string(), "Missing required field of type Customer");
}

/// An explicit null on a required single field fails the same way as omission.
#[test]
fn test_null_required_single_field() {
    let registry = setup_registry();

    let absent = instantiate(&registry, "Order", raw(json!({"id": 1})));
    let null = instantiate(&registry, "Order", raw(json!({"id": 1, "customer": null})));
    assert_eq!(absent, null);
    assert!(null.is_err());
}

/// Required list fields fail on both absence and explicit null.
#[test]
fn test_missing_required_list_field() {
    let registry = setup_registry();
    let expected = Err(ConvertError::MissingRequiredList {
        type_name: "LineItem".into(),
    });

    assert_eq!(instantiate(&registry, "Shipment", raw(json!({}))), expected);
    assert_eq!(
        instantiate(&registry, "Shipment", raw(json!({"lines": null}))),
        expected
    );
    assert_eq!(
        expected.unwrap_err().to_string(),
        "Missing required list field of type List[LineItem]"
    );
}

/// Required mapping fields fail on both absence and explicit null.
#[test]
fn test_missing_required_mapping_field() {
    let registry = setup_registry();
    let expected = Err(ConvertError::MissingRequiredMapping {
        key_type: KeyType::Int,
        type_name: "Tag".into(),
    });

    assert_eq!(instantiate(&registry, "TagIndex", raw(json!({}))), expected);
    assert_eq!(
        instantiate(&registry, "TagIndex", raw(json!({"entries": null}))),
        expected
    );
    assert_eq!(
        expected.unwrap_err().to_string(),
        "Missing required mapping field of type Mapping[int, Tag]"
    );
}

/// A valid value on a required field succeeds.
#[test]
fn test_present_required_field() {
    let registry = setup_registry();

    let order = instantiate(&registry, "Order", raw(valid_order())).unwrap();
    let customer = order.get("customer").unwrap().as_record().unwrap();
    assert_eq!(customer.get("name").and_then(Value::as_str), Some("Ann"));
}

// =============================================================================
// Optional Defaulting Tests
// =============================================================================

/// Omitted optional fields default to null, empty sequence, empty mapping.
#[test]
fn test_optional_fields_default() {
    let registry = setup_registry();

    let order = instantiate(
        &registry,
        "Order",
        raw(json!({"id": 1, "customer": {"name": "Ann"}})),
    )
    .unwrap();
    assert_eq!(order.get("lines"), Some(&Value::Sequence(vec![])));
    assert_eq!(
        order.get("tags"),
        Some(&Value::KeyedMapping(Default::default()))
    );

    let account = instantiate(&registry, "Account", raw(json!({"id": "a1"}))).unwrap();
    assert_eq!(account.get("owner"), Some(&Value::Null));
}

/// An explicit null on an optional field also takes the default.
#[test]
fn test_optional_null_takes_default() {
    let registry = setup_registry();

    let order = instantiate(
        &registry,
        "Order",
        raw(json!({"id": 1, "customer": {"name": "Ann"}, "lines": null, "tags": null})),
    )
    .unwrap();
    assert_eq!(order.get("lines"), Some(&Value::Sequence(vec![])));
    assert_eq!(
        order.get("tags"),
        Some(&Value::KeyedMapping(Default::default()))
    );
}

// =============================================================================
// Unknown Key Tests
// =============================================================================

/// Unknown input keys are dropped and do not affect the result.
#[test]
fn test_unknown_keys_dropped() {
    let registry = setup_registry();

    let mut with_extra = valid_order();
    with_extra
        .as_object_mut()
        .unwrap()
        .insert("bogus".into(), json!(1));

    let plain = instantiate(&registry, "Order", raw(valid_order())).unwrap();
    let extra = instantiate(&registry, "Order", raw(with_extra)).unwrap();

    assert_eq!(extra, plain);
    assert!(!extra.contains_field("bogus"));
}

// =============================================================================
// Singleton Wrapping Tests
// =============================================================================

/// A bare mapping in a list position becomes a one-element sequence.
#[test]
fn test_list_singleton_wrapping() {
    let registry = setup_registry();

    let order = instantiate(
        &registry,
        "Order",
        raw(json!({"id": 1, "customer": {"name": "Ann"}, "lines": {"sku": "A"}})),
    )
    .unwrap();

    let lines = order.get("lines").unwrap().as_sequence().unwrap();
    assert_eq!(lines.len(), 1);
    let item = lines[0].as_record().unwrap();
    assert_eq!(item.type_name(), "LineItem");
    assert_eq!(item.get("sku").and_then(Value::as_str), Some("A"));
}

/// A bare scalar in a list position is wrapped but not instantiated.
#[test]
fn test_list_singleton_wrapping_scalar() {
    let registry = setup_registry();

    let order = instantiate(
        &registry,
        "Order",
        raw(json!({"id": 1, "customer": {"name": "Ann"}, "lines": "A"})),
    )
    .unwrap();

    assert_eq!(
        order.get("lines"),
        Some(&Value::Sequence(vec![Value::String("A".into())]))
    );
}

// =============================================================================
// Idempotence Tests
// =============================================================================

/// Instantiating an already-typed record returns it unchanged.
#[test]
fn test_typed_record_passes_through() {
    let registry = setup_registry();

    let order = instantiate(&registry, "Order", raw(valid_order())).unwrap();
    let again = instantiate(&registry, "Order", Value::Record(order.clone())).unwrap();
    assert_eq!(again, order);
}

/// Already-typed nested values pass through their field converters unchanged.
#[test]
fn test_typed_nested_values_pass_through() {
    let registry = setup_registry();

    let first = instantiate(&registry, "Order", raw(valid_order())).unwrap();

    // Rebuild the raw order, but with every nested value already converted.
    let mut entries = std::collections::BTreeMap::new();
    entries.insert("id".to_string(), Value::Int(1));
    entries.insert("customer".to_string(), first.get("customer").unwrap().clone());
    entries.insert("lines".to_string(), first.get("lines").unwrap().clone());
    entries.insert("tags".to_string(), first.get("tags").unwrap().clone());

    let second = instantiate(&registry, "Order", Value::Mapping(entries)).unwrap();
    assert_eq!(second, first);
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

/// decompose(instantiate(raw)) re-instantiates to an equal record, and a
/// second decomposition reproduces the same generic value.
#[test]
fn test_round_trip_stability() {
    let registry = setup_registry();

    let order = instantiate(&registry, "Order", raw(valid_order())).unwrap();
    let generic = decompose_record(&order);

    let order_again = instantiate(&registry, "Order", generic.clone()).unwrap();
    assert_eq!(order_again, order);
    assert_eq!(decompose_record(&order_again), generic);
}

/// Decomposition flattens nested records, sequences and keyed mappings.
#[test]
fn test_decompose_shape() {
    let registry = setup_registry();

    let order = instantiate(&registry, "Order", raw(valid_order())).unwrap();
    let generic = decompose(&Value::Record(order));

    assert_eq!(
        generic,
        raw(json!({
            "id": 1,
            "customer": {"name": "Ann"},
            "lines": [{"sku": "A"}, {"sku": "B"}],
            "tags": {"x": {"label": "hot"}}
        }))
    );
}

// =============================================================================
// Key Coercion Tests
// =============================================================================

/// Raw string keys are coerced to the declared key type.
#[test]
fn test_int_key_coercion() {
    let registry = setup_registry();

    let index = instantiate(
        &registry,
        "TagIndex",
        raw(json!({"entries": {"1": {"label": "a"}, "2": {"label": "b"}}})),
    )
    .unwrap();

    let entries = index.get("entries").unwrap().as_keyed_mapping().unwrap();
    let keys: Vec<&MapKey> = entries.keys().collect();
    assert_eq!(keys, vec![&MapKey::Int(1), &MapKey::Int(2)]);
    assert_eq!(
        entries[&MapKey::Int(2)].as_record().unwrap().get("label"),
        Some(&Value::String("b".into()))
    );
}

/// A key that cannot be coerced aborts the whole call.
#[test]
fn test_key_coercion_failure_is_fatal() {
    let registry = setup_registry();

    let result = instantiate(
        &registry,
        "TagIndex",
        raw(json!({"entries": {"1": {"label": "a"}, "x": {"label": "b"}}})),
    );
    assert_eq!(
        result,
        Err(ConvertError::KeyCoercion {
            key: "x".into(),
            key_type: KeyType::Int,
        })
    );
}

// =============================================================================
// Concrete Scenario Tests
// =============================================================================

/// The full Order scenario: nested single, singleton-wrapped list, keyed
/// mapping, and a dropped unknown key.
#[test]
fn test_order_scenario() {
    let registry = setup_registry();

    let order = instantiate(
        &registry,
        "Order",
        raw(json!({
            "id": 1,
            "customer": {"name": "Ann"},
            "lines": {"sku": "A"},
            "tags": {"x": {"label": "hot"}},
            "extra": true
        })),
    )
    .unwrap();

    assert_eq!(order.get("id"), Some(&Value::Int(1)));

    let customer = order.get("customer").unwrap().as_record().unwrap();
    assert_eq!(customer.get("name").and_then(Value::as_str), Some("Ann"));

    let lines = order.get("lines").unwrap().as_sequence().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].as_record().unwrap().get("sku").and_then(Value::as_str),
        Some("A")
    );

    let tags = order.get("tags").unwrap().as_keyed_mapping().unwrap();
    let tag = tags[&MapKey::String("x".into())].as_record().unwrap();
    assert_eq!(tag.type_name(), "Tag");
    assert_eq!(tag.get("label").and_then(Value::as_str), Some("hot"));

    assert!(!order.contains_field("extra"));
}

/// The same schema without "customer" fails with the missing-field error.
#[test]
fn test_order_missing_customer_fails() {
    let registry = setup_registry();

    let result = instantiate(
        &registry,
        "Order",
        raw(json!({
            "id": 1,
            "lines": {"sku": "A"},
            "tags": {"x": {"label": "hot"}}
        })),
    );
    assert_eq!(
        result,
        Err(ConvertError::MissingRequiredField {
            type_name: "Customer".into()
        })
    );
}
