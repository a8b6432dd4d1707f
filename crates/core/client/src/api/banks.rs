use billplz_core::banks::payment_gateway_name;
use billplz_core::types::{FpxBankList, PaymentGatewayList};
use billplz_core::{BillplzResult, FpxBank, PaymentGateway, Version};

use crate::client::BillplzClient;
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Lists FPX banks (v3), with `display_bank_name` filled in.
    ///
    /// Banks missing from the abbreviation table get an empty display name.
    pub async fn get_fpx_banks(&self, active_only: bool, options: &RequestOptions) -> BillplzResult<Vec<FpxBank>> {
        let list: FpxBankList = self
            .dispatcher()
            .caller(HttpMethod::Get, self.url(Some(Version::V3), "fpx_banks"), "get_fpx_banks")
            .send(options)
            .await?;

        Ok(list
            .banks
            .into_iter()
            .map(|bank| FpxBank {
                display_bank_name: payment_gateway_name(&bank.name).unwrap_or_default().to_string(),
                ..bank
            })
            .filter(|bank| !active_only || bank.active)
            .collect())
    }

    /// Lists payment gateways (v4), with `display_name` filled in where the
    /// gateway left it empty.
    pub async fn get_payment_gateways(
        &self,
        active_only: bool,
        options: &RequestOptions,
    ) -> BillplzResult<Vec<PaymentGateway>> {
        let list: PaymentGatewayList = self
            .dispatcher()
            .caller(
                HttpMethod::Get,
                self.url(Some(Version::V4), "payment_gateways"),
                "get_payment_gateways",
            )
            .send(options)
            .await?;

        Ok(list
            .payment_gateways
            .into_iter()
            .map(|mut gateway| {
                if gateway.display_name.is_empty() {
                    gateway.display_name = payment_gateway_name(&gateway.code).unwrap_or_default().to_string();
                }
                gateway
            })
            .filter(|gateway| !active_only || gateway.active)
            .collect())
    }
}
