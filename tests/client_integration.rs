use std::sync::Arc;

use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use time::macros::date;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sbanken_api_client::auth::{AccessToken, StaticToken};
use sbanken_api_client::bank::{SbankenApi, TransactionsRequest, TransferRequest};
use sbanken_api_client::client::{ApiRequest, AuthStrategy, QueryParams, SbankenClient};
use sbanken_api_client::config::Config;
use sbanken_api_client::error::SbankenError;
use sbanken_api_client::types::ItemsResponse;

const CUSTOMER_ID: &str = "12345678901";

fn static_token() -> Arc<StaticToken> {
    Arc::new(StaticToken::new(AccessToken::new(
        "test_token",
        "Bearer",
        OffsetDateTime::now_utc() + Duration::hours(1),
    )))
}

fn build_client(server: &MockServer) -> SbankenClient {
    SbankenClient::builder()
        .base_url(server.uri())
        .token_source(static_token())
        .customer_id(CUSTOMER_ID)
        .build()
}

fn account_json(id: &str, available: f64) -> serde_json::Value {
    serde_json::json!({
        "accountId": id,
        "accountNumber": "97100000000",
        "ownerCustomerId": CUSTOMER_ID,
        "name": "Brukskonto",
        "accountType": "Standard account",
        "available": available,
        "balance": available,
        "creditLimit": 0
    })
}

#[tokio::test]
async fn test_get_accounts_sends_auth_headers() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "availableItems": 2,
        "items": [account_json("A1", 100.5), account_json("A2", 20.0)],
        "isError": false,
        "errorMessage": null
    });

    Mock::given(method("GET"))
        .and(path("/exec.bank/api/v1/Accounts"))
        .and(header("authorization", "Bearer test_token"))
        .and(header("customerId", CUSTOMER_ID))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let accounts = client.get_accounts().await.unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account_id, "A1");
    assert_eq!(accounts[0].available, Decimal::new(1005, 1));
}

#[tokio::test]
async fn test_get_account_by_id() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "item": account_json("A1", 42.0),
        "isError": false
    });

    Mock::given(method("GET"))
        .and(path("/exec.bank/api/v1/Accounts/A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let account = client.get_account("A1").await.unwrap();
    assert_eq!(account.balance, Decimal::from(42));
}

#[tokio::test]
async fn test_flagged_envelope_becomes_error() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "item": null,
        "isError": true,
        "errorMessage": "Account not found",
        "errorCode": 404
    });

    Mock::given(method("GET"))
        .and(path("/exec.bank/api/v1/Accounts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_account("missing").await.unwrap_err();
    let api_error = err.api_error().expect("api error");
    assert_eq!(api_error.message, "Account not found");
    assert!(api_error.is_not_found());
}

#[tokio::test]
async fn test_get_customer() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "item": {
            "customerId": CUSTOMER_ID,
            "firstName": "Ola",
            "lastName": "Nordmann",
            "emailAddress": "ola@example.com",
            "dateOfBirth": "1980-05-17T00:00:00",
            "postalAddress": { "addressLine1": "Storgata 1", "zipCode": "0155", "city": "Oslo", "country": "NO" },
            "streetAddress": { "addressLine1": "", "zipCode": "0155", "city": "Oslo" },
            "phoneNumbers": [{ "countryCode": "47", "number": "99999999" }]
        },
        "isError": false
    });

    Mock::given(method("GET"))
        .and(path("/exec.customers/api/v1/Customers"))
        .and(header("customerId", CUSTOMER_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let customer = client.get_customer().await.unwrap();
    assert_eq!(customer.first_name, "Ola");
    assert_eq!(customer.phone_numbers[0].number, "99999999");
    assert_eq!(
        customer.date_of_birth.unwrap().date(),
        date!(1980 - 05 - 17)
    );
    let street = customer.street_address.unwrap();
    assert!(street.address_line1.is_none());
    assert_eq!(street.city.as_deref(), Some("Oslo"));
}

#[tokio::test]
async fn test_get_transactions_with_query() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "availableItems": 250,
        "items": [{
            "accountingDate": "2024-01-15T00:00:00+01:00",
            "interestDate": "2024-01-15T00:00:00+01:00",
            "otherAccountNumber": "",
            "amount": -89.9,
            "text": "REMA 1000",
            "transactionType": "VISA VARE",
            "transactionTypeCode": 714,
            "transactionTypeText": "VISA VARE",
            "isReservation": false,
            "source": "AccountStatement"
        }],
        "isError": false
    });

    Mock::given(method("GET"))
        .and(path("/exec.bank/api/v1/Transactions/A1"))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-01-31"))
        .and(query_param("index", "0"))
        .and(query_param("length", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TransactionsRequest::new()
        .between(date!(2024 - 01 - 01), date!(2024 - 01 - 31))
        .window(0, 1);
    let transactions = client.get_transactions("A1", &request).await.unwrap();

    assert_eq!(transactions.available_items, 250);
    assert_eq!(transactions.items.len(), 1);
    assert_eq!(transactions.items[0].amount, Decimal::new(-899, 1));
    assert!(transactions.items[0].other_account_number.is_none());
}

#[tokio::test]
async fn test_transfer_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec.bank/api/v1/Transfers"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "fromAccountId": "A1",
            "toAccountId": "A2",
            "amount": 250.0,
            "message": "savings"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isError": false,
            "errorMessage": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TransferRequest::new("A1", "A2", Decimal::from(250)).message("savings");
    client.transfer(&request).await.unwrap();
}

#[tokio::test]
async fn test_transfer_insufficient_funds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec.bank/api/v1/Transfers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isError": true,
            "errorMessage": "insufficient funds"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TransferRequest::new("A1", "A2", Decimal::from(1_000_000));
    let err = client.transfer(&request).await.unwrap_err();

    assert!(matches!(err, SbankenError::Api(_)));
    assert_eq!(err.to_string(), "insufficient funds");
}

#[tokio::test]
async fn test_transfer_empty_body_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec.bank/api/v1/Transfers"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TransferRequest::new("A1", "A2", Decimal::ONE);
    client.transfer(&request).await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_propagates_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exec.bank/api/v1/Accounts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_accounts().await.unwrap_err();
    assert!(matches!(err, SbankenError::Json(_)));
}

#[tokio::test]
async fn test_transport_error_propagates() {
    // Nothing listens on port 1.
    let client = SbankenClient::builder()
        .base_url("http://127.0.0.1:1")
        .token_source(static_token())
        .build();

    let err = client.get_accounts().await.unwrap_err();
    assert!(matches!(err, SbankenError::HttpMiddleware(_)));
}

#[tokio::test]
async fn test_builder_timeout_applies_to_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exec.bank/api/v1/Accounts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"items": [], "isError": false}))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = SbankenClient::builder()
        .base_url(server.uri())
        .token_source(static_token())
        .timeout(std::time::Duration::from_millis(200))
        .build();

    let err = client.get_accounts().await.unwrap_err();
    assert!(matches!(err, SbankenError::HttpMiddleware(_)));
}

#[tokio::test]
async fn test_generic_get_with_query_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("a", "1"))
        .and(query_param("b", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": ["x", "y"],
            "isError": false
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut query = QueryParams::new();
    query.insert("b".to_string(), "2".to_string());
    query.insert("a".to_string(), "1".to_string());

    let url = format!("{}/items", server.uri());
    let response: ItemsResponse<String> = client.get(&url, Some(&query)).await.unwrap();
    assert_eq!(response.into_result().unwrap(), vec!["x", "y"]);
}

#[tokio::test]
async fn test_get_bytes_and_download_return_raw_body() {
    let server = MockServer::start().await;
    let payload = b"%PDF-1.4 raw statement bytes".to_vec();

    Mock::given(method("GET"))
        .and(path("/statement"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let url = format!("{}/statement", server.uri());

    let bytes = client.get_bytes(&url, None).await.unwrap();
    assert_eq!(bytes, payload);

    let mut sink: Vec<u8> = Vec::new();
    let written = client
        .download(ApiRequest::get(&url), &mut sink)
        .await
        .unwrap();
    assert_eq!(written, payload.len() as u64);
    assert_eq!(sink, payload);
}

#[tokio::test]
async fn test_customer_id_strategy_sends_no_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exec.bank/api/v1/Accounts"))
        .and(header("customerId", CUSTOMER_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "availableItems": 0,
            "items": [],
            "isError": false
        })))
        .mount(&server)
        .await;

    let client = SbankenClient::builder()
        .base_url(server.uri())
        .auth(AuthStrategy::CustomerId(CUSTOMER_ID.to_string()))
        .build();
    let accounts = client.get_accounts().await.unwrap();
    assert!(accounts.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_expired_static_token_fails_before_sending() {
    let server = MockServer::start().await;
    let expired = Arc::new(StaticToken::new(AccessToken::new(
        "old",
        "Bearer",
        OffsetDateTime::now_utc() - Duration::minutes(1),
    )));

    let client = SbankenClient::builder()
        .base_url(server.uri())
        .token_source(expired)
        .build();
    let err = client.get_accounts().await.unwrap_err();

    assert!(matches!(err, SbankenError::Auth(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_from_config_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "config_token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bank/Accounts"))
        .and(header("authorization", "Bearer config_token"))
        .and(header("customerId", CUSTOMER_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "availableItems": 1,
            "items": [account_json("A1", 1.0)],
            "isError": false
        })))
        .mount(&server)
        .await;

    let config = Config::from_json(&serde_json::json!({
        "clientId": "client",
        "clientSecret": "secret",
        "customerId": CUSTOMER_ID,
        "identityServer": format!("{}/connect/token", server.uri()),
        "accountsEndpoint": format!("{}/bank/Accounts", server.uri())
    }).to_string())
    .unwrap();

    let client = SbankenClient::from_config(&config).await.unwrap();
    let accounts = SbankenApi::get_accounts(&client).await.unwrap();
    assert_eq!(accounts.len(), 1);
}
