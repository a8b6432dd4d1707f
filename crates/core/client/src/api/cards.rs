use billplz_core::{BillplzResult, Card, CardCharge, CardProvider, ChargeCard, CreateCard, Version};
use serde_json::Value;

use crate::client::{resolve_id, BillplzClient};
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Tokenizes a card (v4). `provider` defaults to the configured one.
    pub async fn create_card(
        &self,
        card: &CreateCard,
        provider: Option<CardProvider>,
        options: &RequestOptions,
    ) -> BillplzResult<Card> {
        let provider = provider.unwrap_or(self.config().card_provider);
        self.dispatcher()
            .caller(HttpMethod::Post, self.url(Some(Version::V4), provider.cards_path()), "create_card")
            .send_json(card, options)
            .await
    }

    pub async fn delete_card(
        &self,
        card_id: Option<&str>,
        provider: Option<CardProvider>,
        options: &RequestOptions,
    ) -> BillplzResult<Value> {
        let provider = provider.unwrap_or(self.config().card_provider);
        let id = resolve_id(card_id, self.config().card_id.as_ref(), "card")?;
        let url = self.url(Some(Version::V4), &format!("{}/{}", provider.cards_path(), id));
        self.dispatcher()
            .caller(HttpMethod::Delete, url, "delete_card")
            .send(options)
            .await
    }

    /// Charges a tokenized card against a bill (v4).
    ///
    /// `card_id` and `token` left unset in `charge` come from the configured
    /// default card.
    pub async fn charge_card(
        &self,
        bill_id: Option<&str>,
        charge: &ChargeCard,
        provider: Option<CardProvider>,
        options: &RequestOptions,
    ) -> BillplzResult<CardCharge> {
        let provider = provider.unwrap_or(self.config().card_provider);
        let bill_id = resolve_id(bill_id, self.config().bill_id.as_ref(), "bill")?;
        let charge = ChargeCard {
            card_id: charge.card_id.clone().or_else(|| self.config().card_id.clone()),
            token: charge.token.clone().or_else(|| self.config().card_token.clone()),
        };

        let url = self.url(
            Some(Version::V4),
            &format!("bills/{}/{}", bill_id, provider.charge_path()),
        );
        self.dispatcher()
            .caller(HttpMethod::Post, url, "charge_card")
            .send_json(&charge, options)
            .await
    }
}
