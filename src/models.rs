//! Wire types exchanged with the banking backend
//!
//! Field names follow the backend's camelCase JSON. Collections and strings the
//! backend may send as `null` are read as empty.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "UserRecord")]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub bank_accounts: Vec<BankAccount>,
}

/// A user as the backend writes it. The admin flag may come as `admin`,
/// `isAdmin`, or both at once.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(default)]
    user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    phone: String,
    #[serde(default)]
    is_admin: Option<bool>,
    #[serde(default)]
    admin: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    bank_accounts: Vec<BankAccount>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            user_id: record.user_id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            is_admin: record.is_admin.or(record.admin).unwrap_or_default(),
            bank_accounts: record.bank_accounts,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub account_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_type: String,
    #[serde(default)]
    pub balance: Decimal,
    /// Owner email, echoed by some endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl BankAccount {
    /// Balance as shown on an account card
    pub fn display_balance(&self) -> String {
        format!("{:.2}", self.balance.round_dp(2))
    }
}

/// Kind of ledger entry, as labelled by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    Deposit,
    Withdraw,
    TransferIn,
    TransferOut,
    /// Any label the console does not know, kept verbatim
    Other(String),
}

impl From<String> for TransactionType {
    fn from(raw: String) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "deposit" => TransactionType::Deposit,
            "withdraw" | "withdrawal" => TransactionType::Withdraw,
            "transferin" => TransactionType::TransferIn,
            "transferout" => TransactionType::TransferOut,
            _ => TransactionType::Other(raw),
        }
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(String::deserialize(deserializer)?.into())
    }
}

impl TransactionType {
    pub fn label(&self) -> &str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdraw => "Withdraw",
            TransactionType::TransferIn => "Transfer In",
            TransactionType::TransferOut => "Transfer Out",
            TransactionType::Other(raw) => raw,
        }
    }

    /// Class used to style a transaction entry
    pub fn css_class(&self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Timestamps arrive as epoch milliseconds or as text, depending on the serializer
fn flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
        Raw::Text(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
                return Ok(parsed.with_timezone(&Utc));
            }
            NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(serde::de::Error::custom)
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub transaction_id: Option<i64>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    #[serde(deserialize_with = "flexible_timestamp")]
    pub transaction_date_time: DateTime<Utc>,
    #[serde(default)]
    pub from_account_number: Option<String>,
    #[serde(default)]
    pub to_account_number: Option<String>,
}

impl Transaction {
    /// Timestamp rendered in the operator's local time zone
    pub fn local_time(&self) -> String {
        self.transaction_date_time
            .with_timezone(&chrono::Local)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string()
    }
}

/// Login payload for `POST /user/login`
#[derive(Serialize, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub is_admin: bool,
}

/// Profile fields sent to `PUT /user/update/:userId`
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub account_type: String,
    /// Email of the owning user
    pub email: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AmountRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub to_account_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_backend_json() {
        let user: User = serde_json::from_value(json!({
            "userId": 7,
            "name": "Ada",
            "email": "ada@x.com",
            "phone": null,
            "admin": true,
            "bankAccounts": [
                {"accountNumber": "1000000001", "accountType": "checking", "balance": 12.5}
            ]
        }))
        .unwrap();

        assert_eq!(user.user_id, 7);
        assert_eq!(user.phone, "");
        assert!(user.is_admin);
        assert_eq!(user.bank_accounts.len(), 1);
        assert_eq!(user.bank_accounts[0].display_balance(), "12.50");
    }

    #[test]
    fn test_user_with_both_admin_keys() {
        let users: Vec<User> = serde_json::from_value(json!([{
            "userId": 1,
            "name": "Root",
            "email": "admin@localhost.com",
            "phone": "555",
            "admin": true,
            "isAdmin": true,
            "bankAccounts": []
        }]))
        .unwrap();

        assert_eq!(users.len(), 1);
        assert!(users[0].is_admin);
    }

    #[test]
    fn test_user_serializes_is_admin_once() {
        let value = serde_json::to_value(User {
            is_admin: true,
            ..User::default()
        })
        .unwrap();
        assert_eq!(value["isAdmin"], json!(true));
        assert!(value.get("admin").is_none());
    }

    #[test]
    fn test_null_bank_accounts_is_empty() {
        let user: User = serde_json::from_value(json!({
            "userId": 1,
            "name": "Bob",
            "email": "bob@x.com",
            "bankAccounts": null
        }))
        .unwrap();
        assert!(user.bank_accounts.is_empty());
        assert!(!user.is_admin);
    }

    #[test]
    fn test_transaction_types() {
        assert_eq!(
            TransactionType::from("Deposit".to_string()),
            TransactionType::Deposit
        );
        assert_eq!(
            TransactionType::from("WITHDRAWAL".to_string()),
            TransactionType::Withdraw
        );
        assert_eq!(
            TransactionType::from("transfer-in".to_string()),
            TransactionType::TransferIn
        );
        assert_eq!(
            TransactionType::from("Transfer Out".to_string()),
            TransactionType::TransferOut
        );
        let other = TransactionType::from("Fee".to_string());
        assert_eq!(other, TransactionType::Other("Fee".to_string()));
        assert_eq!(other.css_class(), "fee");
        assert_eq!(TransactionType::TransferOut.css_class(), "transfer-out");
    }

    #[test]
    fn test_transaction_timestamp_formats() {
        let from_millis: Transaction = serde_json::from_value(json!({
            "transactionId": 3,
            "transactionType": "Deposit",
            "amount": 20,
            "transactionDateTime": 1_700_000_000_000i64
        }))
        .unwrap();
        assert_eq!(from_millis.transaction_date_time.timestamp(), 1_700_000_000);

        let from_text: Transaction = serde_json::from_value(json!({
            "transactionType": "Withdraw",
            "amount": 5.25,
            "transactionDateTime": "2024-03-01 10:15:00.0"
        }))
        .unwrap();
        assert_eq!(from_text.transaction_id, None);
        assert_eq!(
            from_text.transaction_date_time.to_rfc3339(),
            "2024-03-01T10:15:00+00:00"
        );
    }

    #[test]
    fn test_payloads_serialize_camel_case() {
        let user = NewUser {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            phone: "555".to_string(),
            password: "secret".to_string(),
            is_admin: true,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["isAdmin"], json!(true));

        let transfer = TransferRequest {
            amount: Decimal::new(1050, 2),
            to_account_number: "AC2".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&transfer).unwrap(),
            json!({"amount": 10.5, "toAccountNumber": "AC2"})
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials {
            email: "admin@localhost.com".to_string(),
            password: "adminpassword".to_string(),
        };
        assert!(!format!("{:?}", credentials).contains("adminpassword"));
    }
}
