use billplz_core::{BillplzResult, Version, WebhookRank};

use crate::client::BillplzClient;
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Fetches the account's webhook delivery rank (v4). Lower is better.
    pub async fn get_webhook_rank(&self, options: &RequestOptions) -> BillplzResult<WebhookRank> {
        self.dispatcher()
            .caller(HttpMethod::Get, self.url(Some(Version::V4), "webhook_rank"), "get_webhook_rank")
            .send(options)
            .await
    }
}
