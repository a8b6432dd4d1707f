use billplz_core::types::BankAccountList;
use billplz_core::{BankAccount, BankAccountCheck, BillplzResult, CreateBankAccount, Version};

use crate::client::{resolve_id, BillplzClient};
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    /// Looks up the registered holder name of an account number.
    pub async fn check_bank_account_number(
        &self,
        account_number: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<BankAccountCheck> {
        let number = resolve_id(account_number, self.config().account_number.as_ref(), "account number")?;
        let url = self.url(None, &format!("check/bank_account_number/{}", number));
        self.dispatcher()
            .caller(HttpMethod::Get, url, "check_bank_account_number")
            .send(options)
            .await
    }

    /// Lists verification records for the given account numbers (v3).
    pub async fn list_bank_accounts(
        &self,
        account_numbers: &[&str],
        options: &RequestOptions,
    ) -> BillplzResult<Vec<BankAccount>> {
        let options = account_numbers
            .iter()
            .fold(options.clone(), |options, number| options.with_query("account_numbers[]", *number));

        let list: BankAccountList = self
            .dispatcher()
            .caller(
                HttpMethod::Get,
                self.url(Some(Version::V3), "bank_verification_services"),
                "list_bank_accounts",
            )
            .send(&options)
            .await?;
        Ok(list.bank_verification_services)
    }

    pub async fn get_bank_account(
        &self,
        account_number: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<BankAccount> {
        let number = resolve_id(account_number, self.config().account_number.as_ref(), "account number")?;
        let url = self.url(Some(Version::V3), &format!("bank_verification_services/{}", number));
        self.dispatcher()
            .caller(HttpMethod::Get, url, "get_bank_account")
            .send(options)
            .await
    }

    /// Submits an account for verification (v3).
    pub async fn create_bank_account(
        &self,
        account: &CreateBankAccount,
        options: &RequestOptions,
    ) -> BillplzResult<BankAccount> {
        self.dispatcher()
            .caller(
                HttpMethod::Post,
                self.url(Some(Version::V3), "bank_verification_services"),
                "create_bank_account",
            )
            .send_json(account, options)
            .await
    }
}
