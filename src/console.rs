//! The console service: backend commands plus the cached directory
//!
//! Views receive a [`Console`] as a prop, read [`Directory`] snapshots from it
//! and fire commands at it. A command awaits its backend call and then applies
//! the outcome to the directory in a single `send_modify`, so overlapping
//! commands resolve in the order their responses arrive.

use crate::api::BankApi;
use crate::directory::Directory;
use crate::error::ApiError;
use crate::models::{
    AmountRequest, BankAccount, Credentials, NewAccount, NewUser, Transaction, TransferRequest,
    UserUpdate,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;

/// Where the console connects and who it logs in as
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub credentials: Credentials,
}

#[derive(Clone)]
pub struct Console {
    api: Arc<dyn BankApi>,
    credentials: Credentials,
    directory: Arc<watch::Sender<Directory>>,
}

impl PartialEq for Console {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.directory, &other.directory)
    }
}

impl Console {
    pub fn new(api: Arc<dyn BankApi>, credentials: Credentials) -> Self {
        let (directory, _) = watch::channel(Directory::new());
        Self {
            api,
            credentials,
            directory: Arc::new(directory),
        }
    }

    /// Current state of the cache
    pub fn snapshot(&self) -> Directory {
        self.directory.borrow().clone()
    }

    /// Receiver notified after every change to the cache
    pub fn subscribe(&self) -> watch::Receiver<Directory> {
        self.directory.subscribe()
    }

    fn update(&self, apply: impl FnOnce(&mut Directory)) {
        self.directory.send_modify(apply);
    }

    /// Log in and load the user list.
    ///
    /// `loading` stays set until both calls have resolved.
    pub async fn initialize(&self) {
        log::info!("Logging in as {}", self.credentials.email);
        self.update(|directory| directory.loading = true);

        let result = match self.api.login(&self.credentials).await {
            Ok(()) => self.api.list_users().await,
            Err(e) => Err(e),
        };
        self.update(|directory| directory.on_users_loaded(result));
    }

    pub async fn register_user(&self, user: NewUser) {
        let result = self.api.register_user(&user).await;
        self.update(|directory| directory.on_user_registered(result));
    }

    pub async fn update_user(&self, user_id: i64, update: UserUpdate) {
        let result = self.api.update_user(user_id, &update).await;
        self.update(|directory| directory.on_user_updated(user_id, result));
    }

    pub async fn create_bank_account(&self, account: NewAccount) {
        let result = self.api.create_account(&account).await;
        self.update(|directory| {
            directory.on_account_created(&account.email, result);
        });
    }

    pub async fn deposit(&self, account_number: &str, amount: Decimal) {
        let result = self
            .api
            .deposit(account_number, &AmountRequest { amount })
            .await;
        self.update(|directory| directory.on_account_changed(result, "Deposit successful"));
    }

    pub async fn withdraw(&self, account_number: &str, amount: Decimal) {
        let result = self
            .api
            .withdraw(account_number, &AmountRequest { amount })
            .await;
        self.update(|directory| directory.on_account_changed(result, "Withdrawal successful"));
    }

    /// Transfer from `account_number`, then refresh the destination if it is
    /// cached so both balances are current.
    pub async fn transfer(&self, account_number: &str, request: TransferRequest) {
        let result = self.api.transfer(account_number, &request).await;
        let succeeded = result.is_ok();
        self.update(|directory| directory.on_account_changed(result, "Transfer successful"));

        if succeeded && self.is_cached(&request.to_account_number) {
            self.refresh_account(&request.to_account_number).await;
        }
    }

    fn is_cached(&self, account_number: &str) -> bool {
        self.directory.borrow().find_account(account_number).is_some()
    }

    /// Reload one account; a failure is only logged
    async fn refresh_account(&self, account_number: &str) {
        match self.api.get_account(account_number).await {
            Ok(snapshot) => self.update(|directory| {
                directory.patch_account(snapshot);
            }),
            Err(e) => log::warn!("Could not refresh account {}: {}", account_number, e),
        }
    }

    pub async fn delete_account(&self, account_number: &str) {
        let owner = self
            .directory
            .borrow()
            .owner_of(account_number)
            .map(|user| user.email.clone());
        if let Some(email) = owner {
            log::info!("Deleting account {} of {}", account_number, email);
        }
        let result = self.api.delete_account(account_number).await;
        self.update(|directory| directory.on_account_deleted(account_number, result));
    }

    /// Transactions of one account; they are not kept in the directory
    pub async fn account_transactions(
        &self,
        account_number: &str,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.api.account_transactions(account_number).await
    }

    /// Surface an error raised before any backend call, such as bad form input
    pub fn report_error(&self, error: impl std::fmt::Display) {
        self.update(|directory| directory.fail(error));
    }

    pub fn find_account(&self, account_number: &str) -> Option<BankAccount> {
        self.directory.borrow().find_account(account_number).cloned()
    }
}
