use billplz_core::{BillplzResult, CreatePayout, CreatePayoutCollection, Payout, PayoutCollection, Version};

use crate::client::{resolve_id, BillplzClient};
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Creates a payout (mass payment instruction) collection (v4).
    pub async fn create_payout_collection(
        &self,
        title: impl Into<String>,
        options: &RequestOptions,
    ) -> BillplzResult<PayoutCollection> {
        let body = CreatePayoutCollection { title: title.into() };
        self.dispatcher()
            .caller(
                HttpMethod::Post,
                self.url(Some(Version::V4), "mass_payment_instruction_collections"),
                "create_payout_collection",
            )
            .send_json(&body, options)
            .await
    }

    pub async fn get_payout_collection(
        &self,
        payout_collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<PayoutCollection> {
        let id = resolve_id(
            payout_collection_id,
            self.config().payout_collection_id.as_ref(),
            "payout collection",
        )?;
        let url = self.url(
            Some(Version::V4),
            &format!("mass_payment_instruction_collections/{}", id),
        );
        self.dispatcher()
            .caller(HttpMethod::Get, url, "get_payout_collection")
            .send(options)
            .await
    }

    pub async fn create_payout(&self, payout: &CreatePayout, options: &RequestOptions) -> BillplzResult<Payout> {
        self.dispatcher()
            .caller(
                HttpMethod::Post,
                self.url(Some(Version::V4), "mass_payment_instructions"),
                "create_payout",
            )
            .send_json(payout, options)
            .await
    }

    pub async fn get_payout(&self, payout_id: Option<&str>, options: &RequestOptions) -> BillplzResult<Payout> {
        let id = resolve_id(payout_id, self.config().payout_id.as_ref(), "payout")?;
        let url = self.url(Some(Version::V4), &format!("mass_payment_instructions/{}", id));
        self.dispatcher()
            .caller(HttpMethod::Get, url, "get_payout")
            .send(options)
            .await
    }
}
