//! Serde serialization/deserialization tests
//!
//! Run with: cargo test --features serde --test serde_tests

#![cfg(feature = "serde")]

use gf2n::{binary_field, BasicElem, BasicPoly, PowPoly, TablePoly, TableRegistry};

binary_field! {
    struct Gf8(u8 = 0b1011);
}

#[test]
fn basic_poly_roundtrip() {
    let a = BasicPoly::<Gf8>::new(6);
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, "6");
    let b: BasicPoly<Gf8> = serde_json::from_str(&json).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fixed_deserialize_reduces() {
    let a: BasicPoly<Gf8> = serde_json::from_str("42").unwrap();
    assert_eq!(a.value(), 6);
    let p: PowPoly<Gf8> = serde_json::from_str("10").unwrap();
    assert_eq!(p.value(), 1);
    let t: TablePoly<Gf8> = serde_json::from_str("9").unwrap();
    assert_eq!(t.value(), 2);
}

#[test]
fn basic_elem_roundtrip() {
    let a = BasicElem::new(5u8, 0b1011).unwrap();
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, r#"{"value":5,"modulus":11}"#);
    let b: BasicElem<u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(a, b);
}

#[test]
fn basic_elem_deserialize_reduces_value() {
    let a: BasicElem<u8> = serde_json::from_str(r#"{"value":42,"modulus":11}"#).unwrap();
    assert_eq!(a.value(), 6);
}

#[test]
fn basic_elem_rejects_degenerate_modulus() {
    let err = serde_json::from_str::<BasicElem<u8>>(r#"{"value":1,"modulus":1}"#).unwrap_err();
    assert!(err.to_string().contains("degree 0"));
}

#[test]
fn basic_elem_rejects_wide_modulus() {
    let err = serde_json::from_str::<BasicElem<u8>>(r#"{"value":1,"modulus":285}"#).unwrap_err();
    assert!(err.to_string().contains("does not fit in 8 bits"));
    let ok: BasicElem<u16> = serde_json::from_str(r#"{"value":1,"modulus":285}"#).unwrap();
    assert_eq!(ok.value(), 1);
}

#[test]
fn table_backed_elements_serialize_as_basic() {
    let registry = TableRegistry::new();
    let p = registry.pow_elem(3u8, 0b1011).unwrap();
    let t = registry.table_elem(3u8, 0b1011).unwrap();
    let expected = r#"{"value":3,"modulus":11}"#;
    assert_eq!(serde_json::to_string(&p).unwrap(), expected);
    assert_eq!(serde_json::to_string(&t).unwrap(), expected);

    let back: BasicElem<u8> = serde_json::from_str(expected).unwrap();
    assert_eq!(back, p.to_basic());
}
