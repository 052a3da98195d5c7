//! HTTP access to the banking backend
//!
//! [`BankApi`] is the seam the console depends on; [`HttpBankApi`] is the
//! `reqwest` implementation used by the binary. The backend authenticates with
//! an `Auth` cookie set by the login call, so the client keeps a cookie store.

use crate::error::ApiError;
use crate::models::{
    AmountRequest, BankAccount, Credentials, NewAccount, NewUser, Transaction, TransferRequest,
    User, UserUpdate,
};
use reqwest::Client as HttpClient;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "http://localhost:7000";

/// Every backend endpoint the console calls
#[async_trait::async_trait]
pub trait BankApi: Send + Sync {
    /// POST /user/login
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError>;
    /// GET /admin/users
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    /// POST /user/register
    async fn register_user(&self, user: &NewUser) -> Result<User, ApiError>;
    /// PUT /user/update/:userId
    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, ApiError>;
    /// POST /account/create
    async fn create_account(&self, account: &NewAccount) -> Result<BankAccount, ApiError>;
    /// GET /account/:accountNumber
    async fn get_account(&self, account_number: &str) -> Result<BankAccount, ApiError>;
    /// POST /account/deposit/:accountNumber
    async fn deposit(
        &self,
        account_number: &str,
        request: &AmountRequest,
    ) -> Result<BankAccount, ApiError>;
    /// POST /account/withdraw/:accountNumber
    async fn withdraw(
        &self,
        account_number: &str,
        request: &AmountRequest,
    ) -> Result<BankAccount, ApiError>;
    /// POST /account/transfer/:accountNumber
    async fn transfer(
        &self,
        account_number: &str,
        request: &TransferRequest,
    ) -> Result<BankAccount, ApiError>;
    /// DELETE /account/:accountNumber
    async fn delete_account(&self, account_number: &str) -> Result<(), ApiError>;
    /// GET /account/:accountNumber/transactions
    async fn account_transactions(&self, account_number: &str)
    -> Result<Vec<Transaction>, ApiError>;
}

/// Decode a response body.
///
/// Some backend handlers serialize their result to a string and then send that
/// string as JSON, so the body may be a JSON string wrapping the document.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    match value {
        serde_json::Value::String(inner) => Ok(serde_json::from_str(&inner)?),
        other => Ok(serde_json::from_value(other)?),
    }
}

pub struct HttpBankApi {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBankApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = HttpClient::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and hand back the body of a 2xx response
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::debug!("Backend answered {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        log::debug!("GET {}", path);
        let body = self.send(self.http_client.get(self.url(path))).await?;
        decode_body(&body)
    }

    async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", path);
        let body = self
            .send(self.http_client.post(self.url(path)).json(payload))
            .await?;
        decode_body(&body)
    }
}

#[async_trait::async_trait]
impl BankApi for HttpBankApi {
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        log::debug!("POST /user/login as {}", credentials.email);
        self.send(
            self.http_client
                .post(self.url("/user/login"))
                .json(credentials),
        )
        .await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/admin/users").await
    }

    async fn register_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post_json("/user/register", user).await
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        let path = format!("/user/update/{}", user_id);
        log::debug!("PUT {}", path);
        let body = self
            .send(self.http_client.put(self.url(&path)).json(update))
            .await?;
        decode_body(&body)
    }

    async fn create_account(&self, account: &NewAccount) -> Result<BankAccount, ApiError> {
        self.post_json("/account/create", account).await
    }

    async fn get_account(&self, account_number: &str) -> Result<BankAccount, ApiError> {
        self.get_json(&format!("/account/{}", account_number)).await
    }

    async fn deposit(
        &self,
        account_number: &str,
        request: &AmountRequest,
    ) -> Result<BankAccount, ApiError> {
        self.post_json(&format!("/account/deposit/{}", account_number), request)
            .await
    }

    async fn withdraw(
        &self,
        account_number: &str,
        request: &AmountRequest,
    ) -> Result<BankAccount, ApiError> {
        self.post_json(&format!("/account/withdraw/{}", account_number), request)
            .await
    }

    async fn transfer(
        &self,
        account_number: &str,
        request: &TransferRequest,
    ) -> Result<BankAccount, ApiError> {
        self.post_json(&format!("/account/transfer/{}", account_number), request)
            .await
    }

    async fn delete_account(&self, account_number: &str) -> Result<(), ApiError> {
        let path = format!("/account/{}", account_number);
        log::debug!("DELETE {}", path);
        self.send(self.http_client.delete(self.url(&path))).await?;
        Ok(())
    }

    async fn account_transactions(
        &self,
        account_number: &str,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.get_json(&format!("/account/{}/transactions", account_number))
            .await
    }
}
