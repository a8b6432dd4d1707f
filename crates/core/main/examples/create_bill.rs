//! Creates a sandbox bill and checks a signed callback for it.
//!
//! Run with: BILLPLZ_API_KEY=... BILLPLZ_X_SIGNATURE_KEY=... BILLPLZ_COLLECTION_ID=... \
//!     cargo run --example create_bill

use billplz::prelude::*;

#[tokio::main]
async fn main() -> Result<(), BillplzError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = BillplzConfig::default().with_sandbox(true).apply_env()?;
    let client = BillplzClient::new(config)?;

    // List the banks a payer can pick from
    let banks = client.get_fpx_banks(true, &RequestOptions::new()).await?;
    println!("{} FPX banks online", banks.len());

    // Create a bill in the configured collection
    let bill = CreateBill::new(
        "api@billplz.com",
        "Michael Yap",
        200,
        "https://example.com/webhook/",
        "Maecenas eu placerat ante.",
    );
    let bill = client.create_bill(&bill, &RequestOptions::new()).await?;
    println!("Created bill {} -> {}", bill.id, bill.url);

    // Simulate the callback the gateway would send once the bill is paid
    let signer = XSignature::new(client.config().x_signature_key.clone());
    let payload = signer.sign_payload(
        CallbackPayload::new()
            .with("id", bill.id.as_str())
            .with("collection_id", bill.collection_id.as_str())
            .with("paid", true)
            .with("state", "paid")
            .with("amount", bill.amount)
            .with("paid_amount", bill.amount)
            .with("url", bill.url.as_str()),
    );

    let callback = client.callback_receiver()?.verify(&payload)?;
    println!("Callback verified: bill {} paid={}", callback.id, callback.paid);

    Ok(())
}
