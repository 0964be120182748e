use std::collections::HashMap;

use http::Method;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shipsign::{string_to_sign, Params, Signature, API_SIGNATURE, API_TIMESTAMP};
use shipsign_core::hash::hex_hmac_sha256;
use shipsign_core::time::from_unix_timestamp;
use shipsign_core::Result;
use test_case::test_case;

use super::{init_client, API_SECRET, TIMESTAMP};

#[tokio::test]
async fn test_sign_matches_documented_string() -> Result<()> {
    let (client, _) = init_client();
    let mut req = client
        .request("post", "/orders")?
        .with_param("page", 1)
        .with_payload(Some(&json!({"order_number": "1234"})))?
        .with_time(from_unix_timestamp(TIMESTAMP)?);

    let signature = req.sign().await?.clone();

    let expected = hex_hmac_sha256(
        API_SECRET.as_bytes(),
        br#"POST&/api/orders&page=1&{"order_number":"1234"}&1660582212"#,
    );
    assert_eq!(signature.digest(), expected);
    assert_eq!(signature.timestamp(), TIMESTAMP);
    Ok(())
}

#[tokio::test]
async fn test_sign_matches_standalone_signature() -> Result<()> {
    let (client, _) = init_client();
    let mut req = client
        .request("post", "/orders")?
        .with_param("page", 1)
        .with_payload(Some(&json!({"order_number": "1234"})))?
        .with_time(from_unix_timestamp(TIMESTAMP)?);
    req.sign().await?;

    let params: Params = HashMap::from([("page".to_string(), json!(1))]);
    let standalone = Signature::compute_at(
        API_SECRET,
        &Method::POST,
        "/api/orders",
        &params,
        Some(r#"{"order_number":"1234"}"#),
        TIMESTAMP,
    )?;

    assert_eq!(req.signature()?, &standalone);
    Ok(())
}

#[tokio::test]
async fn test_signing_is_deterministic_at_frozen_time() -> Result<()> {
    let (client, _) = init_client();
    let build = || -> Result<_> {
        Ok(client
            .request("put", "/orders/42")?
            .with_param("store", "abc")
            .with_payload(Some(&json!({"status": "shipped"})))?
            .with_time(from_unix_timestamp(TIMESTAMP)?))
    };

    let mut a = build()?;
    let mut b = build()?;

    assert_eq!(a.sign().await?.clone(), b.sign().await?.clone());
    Ok(())
}

#[test]
fn test_param_order_does_not_matter() -> Result<()> {
    let pairs = [
        ("page", json!(2)),
        ("per_page", json!(50)),
        ("status", json!("shipped")),
        ("includes", json!("products")),
    ];
    let forward: Params = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    let backward: Params = pairs
        .iter()
        .rev()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

    let a = Signature::compute_at(API_SECRET, &Method::GET, "/api/orders", &forward, None, TIMESTAMP)?;
    let b = Signature::compute_at(API_SECRET, &Method::GET, "/api/orders", &backward, None, TIMESTAMP)?;

    assert_eq!(a, b);
    Ok(())
}

#[test_case("get"; "lower case")]
#[test_case("GET"; "upper case")]
#[test_case("Get"; "mixed case")]
fn test_method_is_case_insensitive(method: &str) -> Result<()> {
    let (client, _) = init_client();
    let req = client.request(method, "/orders")?;

    assert_eq!(req.method(), &Method::GET);
    Ok(())
}

#[tokio::test]
async fn test_get_without_payload_signs_empty_body() -> Result<()> {
    let (client, _) = init_client();
    let mut req = client
        .request("get", "/orders")?
        .with_param("page", 1)
        .with_time(from_unix_timestamp(TIMESTAMP)?);

    assert_eq!(req.body(), None);
    let signature = req.sign().await?;

    let expected = string_to_sign(
        &Method::GET,
        "/api/orders",
        &HashMap::from([("page".to_string(), json!(1))]),
        None,
        TIMESTAMP,
    )?;
    assert_eq!(expected, "GET&/api/orders&page=1&&1660582212");
    assert_eq!(
        signature.digest(),
        "47cf0523f762b11d0031dc1bba74aef6007b066dc9e07c1d6d7cd2da25cac3d8"
    );
    Ok(())
}

#[tokio::test]
async fn test_get_with_payload_drops_body() -> Result<()> {
    let (client, _) = init_client();
    let with_payload = client
        .request("get", "/orders")?
        .with_payload(Some(&json!({"order_number": "1234"})))?;
    let with_null = client.request("get", "/orders")?.with_payload(None::<&Value>)?;

    assert_eq!(with_payload.body(), None);
    assert_eq!(with_null.body(), None);
    Ok(())
}

#[tokio::test]
async fn test_sign_adds_exactly_two_params() -> Result<()> {
    let (client, _) = init_client();
    let mut req = client
        .request("get", "/stores/abc/orders")?
        .with_param("page", 1)
        .with_param("status", "shipped");
    let before = req.params().clone();

    req.sign().await?;

    let params = req.params();
    assert_eq!(params.len(), before.len() + 2);
    for (k, v) in &before {
        assert_eq!(params.get(k), Some(v));
    }
    assert!(params[API_SIGNATURE].as_str().is_some_and(|v| !v.is_empty()));
    assert!(params[API_TIMESTAMP].as_i64().is_some_and(|v| v > 0));
    Ok(())
}

#[tokio::test]
async fn test_unsupported_param_is_signing_error() -> Result<()> {
    let (client, transport) = init_client();
    let mut req = client
        .request("get", "/orders")?
        .with_param("ids", json!([1, 2, 3]));

    let err = req.send().await.unwrap_err();

    assert_eq!(err.kind(), shipsign_core::ErrorKind::RequestInvalid);
    assert!(transport.dispatched().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reserved_chars_sign_escaped() -> Result<()> {
    let (client, _) = init_client();
    let mut req = client
        .request("get", "/orders")?
        .with_param("order_number", "A&B 1234")
        .with_time(from_unix_timestamp(TIMESTAMP)?);

    let signature = req.sign().await?.clone();

    let expected = hex_hmac_sha256(
        API_SECRET.as_bytes(),
        b"GET&/api/orders&order_number=A%26B+1234&&1660582212",
    );
    assert_eq!(signature.digest(), expected);
    Ok(())
}

#[tokio::test]
async fn test_signed_request_verifies_against_its_content() -> Result<()> {
    let (client, _) = init_client();
    let mut req = client
        .request("post", "/orders")?
        .with_param("page", 1)
        .with_payload(Some(&json!({"order_number": "1234"})))?;
    let signature = req.sign().await?.clone();

    // Reserved params present after signing are left out of the check.
    assert!(signature.verify(
        API_SECRET,
        req.method(),
        &req.full_path(),
        req.params(),
        req.body()
    )?);

    let tampered: Params = HashMap::from([
        ("page".to_string(), json!(1)),
        ("status".to_string(), json!("shipped")),
    ]);
    assert!(!signature.verify(
        API_SECRET,
        req.method(),
        &req.full_path(),
        &tampered,
        req.body()
    )?);
    Ok(())
}
