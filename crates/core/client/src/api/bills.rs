use billplz_core::types::TransactionList;
use billplz_core::{Bill, BillplzResult, CreateBill, Version};
use serde_json::Value;

use crate::client::{paged, resolve_id, BillplzClient};
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Creates a bill.
    ///
    /// A bill without `collection_id` goes into the configured default
    /// collection.
    pub async fn create_bill(&self, bill: &CreateBill, options: &RequestOptions) -> BillplzResult<Bill> {
        let collection_id = resolve_id(
            bill.collection_id.as_deref(),
            self.config().collection_id.as_ref(),
            "collection",
        )?;
        let bill = CreateBill {
            collection_id: Some(collection_id),
            ..bill.clone()
        };

        self.dispatcher()
            .caller(HttpMethod::Post, self.url(None, "bills"), "create_bill")
            .send_json(&bill, options)
            .await
    }

    pub async fn get_bill(&self, bill_id: Option<&str>, options: &RequestOptions) -> BillplzResult<Bill> {
        let id = resolve_id(bill_id, self.config().bill_id.as_ref(), "bill")?;
        self.dispatcher()
            .caller(HttpMethod::Get, self.url(None, &format!("bills/{}", id)), "get_bill")
            .send(options)
            .await
    }

    /// Deletes an unpaid bill. Paid bills cannot be deleted.
    pub async fn delete_bill(&self, bill_id: Option<&str>, options: &RequestOptions) -> BillplzResult<Value> {
        let id = resolve_id(bill_id, self.config().bill_id.as_ref(), "bill")?;
        self.dispatcher()
            .caller(HttpMethod::Delete, self.url(None, &format!("bills/{}", id)), "delete_bill")
            .send(options)
            .await
    }

    /// Lists payment attempts on a bill (v3).
    pub async fn get_transactions(
        &self,
        bill_id: Option<&str>,
        page: Option<u32>,
        options: &RequestOptions,
    ) -> BillplzResult<TransactionList> {
        let id = resolve_id(bill_id, self.config().bill_id.as_ref(), "bill")?;
        let url = self.url(Some(Version::V3), &format!("bills/{}/transactions", id));
        self.dispatcher()
            .caller(HttpMethod::Get, url, "get_transactions")
            .send(&paged(options, page))
            .await
    }
}
