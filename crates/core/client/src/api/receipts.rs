use billplz_core::{BillplzResult, ReceiptDeliveryConfig, Version};

use crate::client::{resolve_id, BillplzClient};
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Turns on customer receipts for a collection (v4).
    pub async fn activate_receipt_delivery(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<ReceiptDeliveryConfig> {
        self.set_receipt_delivery(collection_id, "activate", "activate_receipt_delivery", options)
            .await
    }

    /// Turns off customer receipts for a collection (v4).
    pub async fn deactivate_receipt_delivery(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<ReceiptDeliveryConfig> {
        self.set_receipt_delivery(collection_id, "deactivate", "deactivate_receipt_delivery", options)
            .await
    }

    /// Makes a collection follow the account-wide receipt setting (v4).
    pub async fn use_global_receipt_delivery(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<ReceiptDeliveryConfig> {
        self.set_receipt_delivery(collection_id, "global", "use_global_receipt_delivery", options)
            .await
    }

    pub async fn get_receipt_delivery(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<ReceiptDeliveryConfig> {
        let url = self.receipt_delivery_url(collection_id)?;
        self.dispatcher()
            .caller(HttpMethod::Get, url, "get_receipt_delivery")
            .send(options)
            .await
    }

    async fn set_receipt_delivery(
        &self,
        collection_id: Option<&str>,
        setting: &str,
        action: &'static str,
        options: &RequestOptions,
    ) -> BillplzResult<ReceiptDeliveryConfig> {
        let url = format!("{}/{}", self.receipt_delivery_url(collection_id)?, setting);
        self.dispatcher()
            .caller(HttpMethod::Post, url, action)
            .send(options)
            .await
    }

    fn receipt_delivery_url(&self, collection_id: Option<&str>) -> BillplzResult<String> {
        let id = resolve_id(collection_id, self.config().collection_id.as_ref(), "collection")?;
        Ok(self.url(Some(Version::V4), &format!("collections/{}/customer_receipt_delivery", id)))
    }
}
