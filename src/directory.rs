//! Client-side cache of the backend's users and accounts
//!
//! The directory holds the read model shown by the views: users with their
//! accounts, a loading flag, the last error and the last status message.
//! Each `on_*` method applies the outcome of one backend call. A failed call
//! only records its error; the users are never touched.

use crate::error::ApiError;
use crate::models::{BankAccount, User};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    users: Vec<User>,
    /// account number -> position of the owning user in `users`
    account_index: HashMap<String, usize>,
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    /// An empty directory waiting for the initial load
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            account_index: HashMap::new(),
            loading: true,
            error: None,
            message: None,
        }
    }

    #[cfg(test)]
    pub fn with_users(users: Vec<User>) -> Self {
        let mut directory = Self::new();
        directory.loading = false;
        directory.set_users(users);
        directory
    }

    /// Cached users; empty while the initial load is pending
    pub fn users(&self) -> &[User] {
        if self.loading { &[] } else { &self.users[..] }
    }

    pub fn find_account(&self, account_number: &str) -> Option<&BankAccount> {
        let owner = *self.account_index.get(account_number)?;
        self.users[owner]
            .bank_accounts
            .iter()
            .find(|account| account.account_number == account_number)
    }

    pub fn owner_of(&self, account_number: &str) -> Option<&User> {
        self.account_index
            .get(account_number)
            .map(|&owner| &self.users[owner])
    }

    fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.account_index.clear();
        for (position, user) in self.users.iter().enumerate() {
            for account in &user.bank_accounts {
                if let Some(previous) = self
                    .account_index
                    .insert(account.account_number.clone(), position)
                {
                    if previous != position {
                        log::warn!(
                            "Account {} is listed under several users, keeping the last one",
                            account.account_number
                        );
                    }
                }
            }
        }
    }

    fn succeed(&mut self, message: impl Into<String>) {
        self.error = None;
        self.message = Some(message.into());
    }

    /// Record a failed call; the cached users stay as they are
    pub fn fail(&mut self, error: impl std::fmt::Display) {
        let description = error.to_string();
        log::error!("{}", description);
        self.error = Some(description);
    }

    /// Outcome of the initial login + user list fetch
    pub fn on_users_loaded(&mut self, result: Result<Vec<User>, ApiError>) {
        match result {
            Ok(users) => {
                log::info!("Loaded {} users", users.len());
                self.set_users(users);
                self.error = None;
            }
            Err(e) => self.fail(e),
        }
        self.loading = false;
    }

    pub fn on_user_registered(&mut self, result: Result<User, ApiError>) {
        match result {
            Ok(user) => {
                self.users.push(user);
                self.reindex();
                self.succeed("User registered successfully");
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn on_user_updated(&mut self, user_id: i64, result: Result<User, ApiError>) {
        match result {
            Ok(updated) => {
                // The update response lists no accounts; a profile edit never changes them
                match self.users.iter_mut().find(|user| user.user_id == user_id) {
                    Some(user) => {
                        let bank_accounts = std::mem::take(&mut user.bank_accounts);
                        *user = User {
                            bank_accounts,
                            ..updated
                        };
                    }
                    None => log::warn!("Updated user {} is not in the cache", user_id),
                }
                self.reindex();
                self.succeed("User updated successfully");
            }
            Err(e) => self.fail(e),
        }
    }

    /// Append a created account to the user owning `owner_email`.
    ///
    /// Returns false when no cached user has that email. The account exists on
    /// the server but is not shown until the next full load.
    pub fn on_account_created(
        &mut self,
        owner_email: &str,
        result: Result<BankAccount, ApiError>,
    ) -> bool {
        let account = match result {
            Ok(account) => account,
            Err(e) => {
                self.fail(e);
                return false;
            }
        };

        let Some(position) = self.users.iter().position(|user| user.email == owner_email) else {
            log::warn!(
                "Account {} was created but no listed user has email {}",
                account.account_number,
                owner_email
            );
            self.fail(format!(
                "Account {} was created, but no listed user has email {}; reload to see it",
                account.account_number, owner_email
            ));
            return false;
        };

        self.account_index
            .insert(account.account_number.clone(), position);
        self.users[position].bank_accounts.push(account);
        self.succeed("Bank account created successfully");
        true
    }

    /// Replace a cached account by the server's snapshot of it.
    ///
    /// Returns false when the account is not cached.
    pub fn patch_account(&mut self, snapshot: BankAccount) -> bool {
        let Some(&owner) = self.account_index.get(&snapshot.account_number) else {
            log::warn!(
                "Account {} is not in the cache, nothing to patch",
                snapshot.account_number
            );
            return false;
        };

        match self.users[owner]
            .bank_accounts
            .iter_mut()
            .find(|account| account.account_number == snapshot.account_number)
        {
            Some(account) => {
                *account = snapshot;
                true
            }
            None => false,
        }
    }

    /// Outcome of a deposit, withdrawal or transfer on one account
    pub fn on_account_changed(
        &mut self,
        result: Result<BankAccount, ApiError>,
        success_message: &str,
    ) {
        match result {
            Ok(snapshot) => {
                self.patch_account(snapshot);
                self.succeed(success_message);
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn on_account_deleted(&mut self, account_number: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                if let Some(owner) = self.account_index.remove(account_number) {
                    self.users[owner]
                        .bank_accounts
                        .retain(|account| account.account_number != account_number);
                }
                self.succeed("Account deleted successfully");
            }
            Err(e) => self.fail(e),
        }
    }
}
