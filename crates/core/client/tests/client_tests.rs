use billplz_client::{BillplzClient, RequestOptions};
use billplz_core::{
    BillplzConfig, BillplzError, CardProvider, ChargeCard, CreateBill, UpdatePaymentMethods, Version,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const API_KEY: &str = "73eb57f0-7d4e-42b9-a544-aeac6e4b0f81";

async fn setup_test_server() -> ServerGuard {
    Server::new_async().await
}

fn client_for(server: &ServerGuard) -> BillplzClient {
    BillplzClient::new(
        BillplzConfig::new(API_KEY, "S-s7b4J4IRZ7d3XvLBxVDKqw").with_api_host(server.url()),
    )
    .unwrap()
}

fn bill_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "collection_id": "inbmmepb",
        "paid": false,
        "state": "due",
        "amount": 200,
        "paid_amount": 0,
        "due_at": "2020-12-31",
        "email": "api@billplz.com",
        "mobile": null,
        "name": "MICHAEL YAP",
        "url": format!("https://www.billplz.com/bills/{}", id),
        "reference_1_label": "Reference 1",
        "reference_1": null,
        "reference_2_label": "Reference 2",
        "reference_2": null,
        "redirect_url": null,
        "callback_url": "http://example.com/webhook/",
        "description": null,
        "paid_at": null
    })
}

#[tokio::test]
async fn test_default_credential_sent_as_basic() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("GET", "/api/v3/bills/8X0Iyzaw")
        .match_header("authorization", format!("Basic {}", API_KEY).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(bill_json("8X0Iyzaw").to_string())
        .create_async()
        .await;

    let bill = client_for(&server)
        .get_bill(Some("8X0Iyzaw"), &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(bill.id, "8X0Iyzaw");
    assert_eq!(bill.amount, 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_override_credential_applies_to_one_call() {
    let mut server = setup_test_server().await;
    let override_mock = server
        .mock("GET", "/api/v3/collections")
        .match_header("authorization", "Basic per-call-key")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(json!({"collections": [], "page": 2}).to_string())
        .create_async()
        .await;
    let default_mock = server
        .mock("GET", "/api/v3/collections")
        .match_header("authorization", format!("Basic {}", API_KEY).as_str())
        .with_status(200)
        .with_body(json!({"collections": [], "page": 1}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let options = RequestOptions::new().with_api_key("per-call-key");

    let list = client.list_collections(Some(2), &options).await.unwrap();
    assert_eq!(list.page, Some(2));
    assert_eq!(options.api_key.as_deref(), Some("per-call-key"));
    assert!(options.query.is_empty());

    let list = client.list_collections(None, &RequestOptions::new()).await.unwrap();
    assert_eq!(list.page, Some(1));

    override_mock.assert_async().await;
    default_mock.assert_async().await;
}

#[tokio::test]
async fn test_api_error_keeps_status_and_body() {
    let mut server = setup_test_server().await;
    let body = json!({
        "error": {
            "type": "RecordInvalid",
            "message": ["Email is invalid"]
        }
    });
    let mock = server
        .mock("POST", "/api/v3/bills")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let bill = CreateBill {
        collection_id: Some("inbmmepb".to_string()),
        ..CreateBill::new("not-an-email", "Michael", 200, "https://example.com/webhook", "Order #42")
    };
    let err = client_for(&server)
        .create_bill(&bill, &RequestOptions::new())
        .await
        .unwrap_err();

    match &err {
        BillplzError::Api {
            action,
            status,
            status_text,
            body: error_body,
        } => {
            assert_eq!(action, "create_bill");
            assert_eq!(*status, 422);
            assert_eq!(status_text, "Unprocessable Entity");
            assert_eq!(error_body, &body);
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert_eq!(err.status_code(), Some(422));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let client = BillplzClient::new(
        BillplzConfig::new(API_KEY, "").with_api_host("http://127.0.0.1:1"),
    )
    .unwrap();

    let err = client
        .get_bill(Some("8X0Iyzaw"), &RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, BillplzError::Transport(_)));
}

#[tokio::test]
async fn test_create_bill_fills_default_collection() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("POST", "/api/v3/bills")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "collection_id": "inbmmepb",
            "email": "api@billplz.com",
            "amount": 200,
            "reference_1_label": "Bank Code",
            "reference_1": "BP-FKR01"
        })))
        .with_status(200)
        .with_body(bill_json("8X0Iyzaw").to_string())
        .create_async()
        .await;

    let client = client_for(&server).with_collection_id("inbmmepb").unwrap();
    let bill = CreateBill::new("api@billplz.com", "Michael", 200, "https://example.com/webhook", "Order #42")
        .with_fpx_bank("BP-FKR01");

    let created = client.create_bill(&bill, &RequestOptions::new()).await.unwrap();
    assert_eq!(created.collection_id, "inbmmepb");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_id_fails_before_request() {
    let mut server = setup_test_server().await;
    let mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let client = client_for(&server);
    let err = client.get_bill(None, &RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, BillplzError::MissingId { ref resource } if resource == "bill"));

    let bill = CreateBill::new("api@billplz.com", "Michael", 200, "https://example.com/webhook", "Order #42");
    let err = client.create_bill(&bill, &RequestOptions::new()).await.unwrap_err();
    assert!(err.is_configuration_error());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fpx_banks_display_names_and_filter() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("GET", "/api/v3/fpx_banks")
        .with_status(200)
        .with_body(
            json!({
                "banks": [
                    {"name": "MB2U0227", "active": true},
                    {"name": "BCBB0235", "active": false},
                    {"name": "UNKNOWN01", "active": true}
                ]
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server).use_version("v4").unwrap();

    let all = client.get_fpx_banks(false, &RequestOptions::new()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].display_bank_name, "Maybank2u");
    assert_eq!(all[1].display_bank_name, "CIMB Clicks");
    assert_eq!(all[2].display_bank_name, "");

    let active = client.get_fpx_banks(true, &RequestOptions::new()).await.unwrap();
    assert_eq!(
        active.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        vec!["MB2U0227", "UNKNOWN01"]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_payment_gateways_use_v4() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("GET", "/api/v4/payment_gateways")
        .with_status(200)
        .with_body(
            json!({
                "payment_gateways": [
                    {"code": "MB2U0227", "active": true, "category": "fpx"},
                    {"code": "BP-PPL01", "active": false, "category": "paypal", "display_name": "PayPal"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let gateways = client_for(&server)
        .get_payment_gateways(true, &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(gateways.len(), 1);
    assert_eq!(gateways[0].display_name, "Maybank2u");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_bank_accounts_query() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("GET", "/api/v3/bank_verification_services")
        .match_query(Matcher::Regex(
            "account_numbers%5B%5D=1234567890&account_numbers%5B%5D=1234567891".into(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "bank_verification_services": [{
                    "name": "sara",
                    "id_no": "91234567890",
                    "acc_no": "1234567890",
                    "code": "MBBEMYKL",
                    "organization": false,
                    "authorization_date": "2017-07-03",
                    "status": "pending",
                    "processed_at": null,
                    "rejected_desc": null
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let accounts = client_for(&server)
        .list_bank_accounts(&["1234567890", "1234567891"], &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].acc_no, "1234567890");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_version_pinned_operations() {
    let mut server = setup_test_server().await;
    let transactions = server
        .mock("GET", "/api/v3/bills/8X0Iyzaw/transactions")
        .with_status(200)
        .with_body(
            json!({
                "bill_id": "8X0Iyzaw",
                "transactions": [{
                    "id": "60793D4707CD",
                    "status": "completed",
                    "completed_at": "2017-02-23T12:49:23.612+08:00",
                    "payment_channel": "FPX"
                }],
                "page": 1
            })
            .to_string(),
        )
        .create_async()
        .await;
    let rank = server
        .mock("GET", "/api/v4/webhook_rank")
        .with_status(200)
        .with_body(json!({"rank": 0.0}).to_string())
        .create_async()
        .await;

    // Active version is v3; webhook rank only exists on v4
    let client = client_for(&server);
    assert_eq!(client.version(), Version::V3);

    let list = client
        .use_version("v4")
        .unwrap()
        .get_transactions(Some("8X0Iyzaw"), None, &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(list.transactions[0].payment_channel.as_deref(), Some("FPX"));

    let rank_value = client.get_webhook_rank(&RequestOptions::new()).await.unwrap();
    assert_eq!(rank_value.rank, 0.0);

    transactions.assert_async().await;
    rank.assert_async().await;
}

#[tokio::test]
async fn test_update_payment_methods_puts_codes() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("PUT", "/api/v3/collections/inbmmepb/payment_methods")
        .match_body(Matcher::Json(json!({
            "payment_methods": [{"code": "fpx"}, {"code": "paypal"}]
        })))
        .with_status(200)
        .with_body(
            json!({
                "payment_methods": [
                    {"code": "fpx", "name": "FPX", "active": true},
                    {"code": "paypal", "name": "PayPal", "active": true}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let methods = client_for(&server)
        .with_collection_id("inbmmepb")
        .unwrap()
        .update_payment_methods(None, &UpdatePaymentMethods::new(["fpx", "paypal"]), &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(methods.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_charge_card_uses_provider_paths_and_defaults() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("POST", "/api/v4/bills/awyzmy0m/ocbc_charge")
        .match_body(Matcher::Json(json!({
            "card_id": "8727fc3a-c04c-4c2b-9b67-947b5cfc2fb6",
            "token": "77d62ad5a3ae56aafc8e3b1d1b2e0e3d5e0a2e4c"
        })))
        .with_status(200)
        .with_body(json!({"amount": 10000, "status": "success", "reference_id": "123456"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server)
        .with_card(
            "8727fc3a-c04c-4c2b-9b67-947b5cfc2fb6",
            "77d62ad5a3ae56aafc8e3b1d1b2e0e3d5e0a2e4c",
        )
        .unwrap();

    let charge = client
        .charge_card(
            Some("awyzmy0m"),
            &ChargeCard::default(),
            Some(CardProvider::Ocbc),
            &RequestOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(charge.status, "success");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_success_body() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("DELETE", "/api/v3/bills/8X0Iyzaw")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let result = client_for(&server)
        .delete_bill(Some("8X0Iyzaw"), &RequestOptions::new())
        .await
        .unwrap();
    assert!(result.is_null());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_open_collection_defaults_to_configured_collection() {
    let mut server = setup_test_server().await;
    let mock = server
        .mock("GET", "/api/v3/open_collections/0pp87t_6")
        .with_status(200)
        .with_body(
            json!({
                "id": "0pp87t_6",
                "title": "MY FIRST API OPEN COLLECTION",
                "description": "Maecenas eu placerat ante.",
                "amount": 299,
                "fixed_amount": true,
                "url": "https://www.billplz.com/0pp87t_6",
                "status": "active"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .get_open_collection(None, &RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, BillplzError::MissingId { ref resource } if resource == "collection"));

    let collection = client
        .with_collection_id("0pp87t_6")
        .unwrap()
        .get_open_collection(None, &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(collection.amount, Some(299));
    mock.assert_async().await;
}
