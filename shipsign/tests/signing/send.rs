// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use shipsign::{Client, Config, StaticCredentialProvider, API_KEY, API_SIGNATURE, API_TIMESTAMP};
use shipsign_core::{Context, Error, ErrorKind, Result, Transport};

use super::{init_client, API_KEY as API_KEY_VALUE, API_SECRET};

#[tokio::test]
async fn test_send_returns_transport_result() -> Result<()> {
    let (client, _) = init_client();
    let mut req = client.request("get", "/orders")?.with_param("page", 1);

    let resp = req.send().await?;

    assert_eq!(resp.body().as_ref(), b"connected!");
    Ok(())
}

#[tokio::test]
async fn test_send_signs_once_and_dispatches_once() -> Result<()> {
    let (client, transport) = init_client();
    let mut req = client
        .request("post", "/orders")?
        .with_param("page", 1)
        .with_payload(Some(&json!({"order_number": "1234"})))?;

    req.send().await?;

    let dispatched = transport.dispatched();
    assert_eq!(dispatched.len(), 1);

    let sent = &dispatched[0];
    let signature = req.signature()?;
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.uri.path(), "/api/orders");
    assert_eq!(sent.uri.host(), Some("www.test.com"));
    assert_eq!(sent.query_values(API_SIGNATURE), vec![signature.digest().to_string()]);
    assert_eq!(
        sent.query_values(API_TIMESTAMP),
        vec![signature.timestamp().to_string()]
    );
    assert_eq!(sent.query_values(API_KEY), vec![API_KEY_VALUE.to_string()]);
    assert_eq!(sent.query_values("page"), vec!["1".to_string()]);
    assert_eq!(sent.body.as_ref(), br#"{"order_number":"1234"}"#);
    Ok(())
}

#[tokio::test]
async fn test_send_twice_resigns() -> Result<()> {
    let (client, transport) = init_client();
    let mut req = client.request("get", "/orders")?;

    req.send().await?;
    req.send().await?;

    let dispatched = transport.dispatched();
    assert_eq!(dispatched.len(), 2);
    for sent in &dispatched {
        assert_eq!(sent.query_values(API_SIGNATURE).len(), 1);
        assert_eq!(sent.query_values(API_TIMESTAMP).len(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn test_query_is_url_encoded() -> Result<()> {
    let (client, transport) = init_client();
    let mut req = client
        .request("get", "/orders")?
        .with_param("order_number", "A&B 1234");

    req.send().await?;

    let sent = &transport.dispatched()[0];
    assert!(sent.uri.query().unwrap_or_default().contains("order_number=A%26B+1234"));
    assert_eq!(sent.query_values("order_number"), vec!["A&B 1234".to_string()]);
    Ok(())
}

#[derive(Debug)]
struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn dispatch(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport("connection reset by peer"))
    }
}

#[tokio::test]
async fn test_transport_error_passes_through() -> Result<()> {
    let client = Client::new(
        Context::new().with_transport(FailingTransport),
        Config::new(),
    )
    .with_credential_provider(StaticCredentialProvider::new(API_KEY_VALUE, API_SECRET));
    let mut req = client.request("delete", "/orders/1")?;

    let err = req.send().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.message(), "connection reset by peer");
    // Signing happened before the transport failed.
    assert!(req.is_signed());
    Ok(())
}

#[tokio::test]
async fn test_send_without_transport() -> Result<()> {
    let client = Client::new(
        Context::new(),
        Config::new().with_api_key(API_KEY_VALUE).with_api_secret(API_SECRET),
    );
    let mut req = client.request("get", "/orders")?;

    let err = req.send().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    Ok(())
}

#[tokio::test]
async fn test_shared_transport_sees_all_requests() -> Result<()> {
    let (client, transport) = init_client();

    for page in 1..=3 {
        client
            .request("get", "/orders")?
            .with_param("page", page)
            .send()
            .await?;
    }

    let pages: Vec<String> = transport
        .dispatched()
        .iter()
        .flat_map(|sent| sent.query_values("page"))
        .collect();
    assert_eq!(pages, vec!["1", "2", "3"]);
    Ok(())
}
