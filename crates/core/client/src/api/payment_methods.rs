use billplz_core::types::PaymentMethodList;
use billplz_core::{BillplzResult, PaymentMethod, UpdatePaymentMethods, Version};

use crate::client::{resolve_id, BillplzClient};
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Lists the payment methods of a collection (v3).
    pub async fn get_payment_methods(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<Vec<PaymentMethod>> {
        let url = self.payment_methods_url(collection_id)?;
        let list: PaymentMethodList = self
            .dispatcher()
            .caller(HttpMethod::Get, url, "get_payment_methods")
            .send(options)
            .await?;
        Ok(list.payment_methods)
    }

    /// Replaces the enabled payment methods of a collection (v3).
    pub async fn update_payment_methods(
        &self,
        collection_id: Option<&str>,
        methods: &UpdatePaymentMethods,
        options: &RequestOptions,
    ) -> BillplzResult<Vec<PaymentMethod>> {
        let url = self.payment_methods_url(collection_id)?;
        let list: PaymentMethodList = self
            .dispatcher()
            .caller(HttpMethod::Put, url, "update_payment_methods")
            .send_json(methods, options)
            .await?;
        Ok(list.payment_methods)
    }

    fn payment_methods_url(&self, collection_id: Option<&str>) -> BillplzResult<String> {
        let id = resolve_id(collection_id, self.config().collection_id.as_ref(), "collection")?;
        Ok(self.url(Some(Version::V3), &format!("collections/{}/payment_methods", id)))
    }
}
