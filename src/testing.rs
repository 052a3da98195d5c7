//! In-memory backend used by the unit tests

use crate::api::BankApi;
use crate::error::ApiError;
use crate::models::{
    AmountRequest, BankAccount, Credentials, NewAccount, NewUser, Transaction, TransferRequest,
    User, UserUpdate,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn account(number: &str, account_type: &str, balance: i64) -> BankAccount {
    BankAccount {
        account_number: number.to_string(),
        account_type: account_type.to_string(),
        balance: Decimal::from(balance),
        email: None,
    }
}

pub fn user(user_id: i64, email: &str, bank_accounts: Vec<BankAccount>) -> User {
    User {
        user_id,
        name: format!("user {}", user_id),
        email: email.to_string(),
        phone: "555-0100".to_string(),
        is_admin: false,
        bank_accounts,
    }
}

#[derive(Default)]
struct FakeState {
    users: Vec<User>,
    transactions: HashMap<String, Vec<Transaction>>,
    next_account: u32,
    /// call prefix -> error returned by the next matching call
    failures: Vec<(String, ApiError)>,
    calls: Vec<String>,
}

/// A backend that keeps balances in memory and records every call
#[derive(Default)]
pub struct FakeBankApi {
    state: Mutex<FakeState>,
    /// When set, login waits for a notification before answering
    login_gate: Option<Arc<Notify>>,
    /// Same for the user list
    users_gate: Option<Arc<Notify>>,
}

impl FakeBankApi {
    pub fn with_users(users: Vec<User>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().users = users;
        api
    }

    pub fn with_transactions(self, account_number: &str, transactions: Vec<Transaction>) -> Self {
        self.state
            .lock()
            .unwrap()
            .transactions
            .insert(account_number.to_string(), transactions);
        self
    }

    pub fn with_login_gate(mut self, gate: Arc<Notify>) -> Self {
        self.login_gate = Some(gate);
        self
    }

    pub fn with_users_gate(mut self, gate: Arc<Notify>) -> Self {
        self.users_gate = Some(gate);
        self
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: ApiError) {
        self.fail_call("", error);
    }

    /// Make the next call whose description starts with `prefix` fail
    pub fn fail_call(&self, prefix: &str, error: ApiError) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((prefix.to_string(), error));
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn begin(&self, call: String) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        let failure = state
            .failures
            .iter()
            .position(|(prefix, _)| call.starts_with(prefix.as_str()));
        state.calls.push(call);
        match failure {
            Some(position) => Err(state.failures.remove(position).1),
            None => Ok(state),
        }
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("{} not found", what),
    }
}

fn find_account<'a>(state: &'a mut FakeState, number: &str) -> Option<&'a mut BankAccount> {
    state
        .users
        .iter_mut()
        .flat_map(|user| user.bank_accounts.iter_mut())
        .find(|account| account.account_number == number)
}

#[async_trait::async_trait]
impl BankApi for FakeBankApi {
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        if let Some(gate) = &self.login_gate {
            gate.notified().await;
        }
        self.begin(format!("login {}", credentials.email))?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        if let Some(gate) = &self.users_gate {
            gate.notified().await;
        }
        let state = self.begin("list_users".to_string())?;
        Ok(state.users.clone())
    }

    async fn register_user(&self, new_user: &NewUser) -> Result<User, ApiError> {
        let mut state = self.begin(format!("register_user {}", new_user.email))?;
        let created = User {
            user_id: state.users.len() as i64 + 1,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            phone: new_user.phone.clone(),
            is_admin: new_user.is_admin,
            bank_accounts: Vec::new(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        let mut state = self.begin(format!("update_user {}", user_id))?;
        let user = state
            .users
            .iter_mut()
            .find(|user| user.user_id == user_id)
            .ok_or_else(|| not_found("User"))?;
        user.name = update.name.clone();
        user.email = update.email.clone();
        user.phone = update.phone.clone();
        user.is_admin = update.is_admin;
        // The backend answers with the profile only
        Ok(User {
            bank_accounts: Vec::new(),
            ..user.clone()
        })
    }

    async fn create_account(&self, new_account: &NewAccount) -> Result<BankAccount, ApiError> {
        let mut state = self.begin(format!("create_account {}", new_account.email))?;
        state.next_account += 1;
        let created = account(
            &format!("AC{}", state.next_account),
            &new_account.account_type,
            0,
        );
        if let Some(owner) = state
            .users
            .iter_mut()
            .find(|user| user.email == new_account.email)
        {
            owner.bank_accounts.push(created.clone());
        }
        Ok(created)
    }

    async fn get_account(&self, account_number: &str) -> Result<BankAccount, ApiError> {
        let mut state = self.begin(format!("get_account {}", account_number))?;
        find_account(&mut state, account_number)
            .map(|account| account.clone())
            .ok_or_else(|| not_found("Account"))
    }

    async fn deposit(
        &self,
        account_number: &str,
        request: &AmountRequest,
    ) -> Result<BankAccount, ApiError> {
        let mut state = self.begin(format!("deposit {}", account_number))?;
        let account = find_account(&mut state, account_number).ok_or_else(|| not_found("Account"))?;
        account.balance += request.amount;
        Ok(account.clone())
    }

    async fn withdraw(
        &self,
        account_number: &str,
        request: &AmountRequest,
    ) -> Result<BankAccount, ApiError> {
        let mut state = self.begin(format!("withdraw {}", account_number))?;
        let account = find_account(&mut state, account_number).ok_or_else(|| not_found("Account"))?;
        if account.balance < request.amount {
            return Err(ApiError::Status {
                status: 400,
                body: "Insufficient funds".to_string(),
            });
        }
        account.balance -= request.amount;
        Ok(account.clone())
    }

    async fn transfer(
        &self,
        account_number: &str,
        request: &TransferRequest,
    ) -> Result<BankAccount, ApiError> {
        let mut state = self.begin(format!("transfer {}", account_number))?;
        if find_account(&mut state, &request.to_account_number).is_none() {
            return Err(ApiError::Status {
                status: 400,
                body: "Destination account does not exist".to_string(),
            });
        }
        let source = find_account(&mut state, account_number).ok_or_else(|| not_found("Account"))?;
        if source.balance < request.amount {
            return Err(ApiError::Status {
                status: 400,
                body: "Insufficient funds".to_string(),
            });
        }
        source.balance -= request.amount;
        let snapshot = source.clone();
        if let Some(destination) = find_account(&mut state, &request.to_account_number) {
            destination.balance += request.amount;
        }
        Ok(snapshot)
    }

    async fn delete_account(&self, account_number: &str) -> Result<(), ApiError> {
        let mut state = self.begin(format!("delete_account {}", account_number))?;
        find_account(&mut state, account_number).ok_or_else(|| not_found("Account"))?;
        for user in state.users.iter_mut() {
            user.bank_accounts
                .retain(|account| account.account_number != account_number);
        }
        Ok(())
    }

    async fn account_transactions(
        &self,
        account_number: &str,
    ) -> Result<Vec<Transaction>, ApiError> {
        let state = self.begin(format!("account_transactions {}", account_number))?;
        Ok(state
            .transactions
            .get(account_number)
            .cloned()
            .unwrap_or_default())
    }
}
