//! Form state behind the creation, edit and transaction dialogs

use crate::console::Console;
use crate::models::{NewAccount, NewUser, TransferRequest, User, UserUpdate};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("{0} is required")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub is_admin: bool,
}

impl From<UserDraft> for NewUser {
    fn from(draft: UserDraft) -> Self {
        NewUser {
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            password: draft.password,
            is_admin: draft.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountDraft {
    pub account_type: String,
    pub email: String,
}

impl From<AccountDraft> for NewAccount {
    fn from(draft: AccountDraft) -> Self {
        NewAccount {
            account_type: draft.account_type,
            email: draft.email,
        }
    }
}

/// Editable copy of a user's profile
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
}

impl From<&User> for ProfileDraft {
    fn from(user: &User) -> Self {
        ProfileDraft {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            is_admin: user.is_admin,
        }
    }
}

impl From<ProfileDraft> for UserUpdate {
    fn from(draft: ProfileDraft) -> Self {
        UserUpdate {
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            is_admin: draft.is_admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionKind {
    #[default]
    Deposit,
    Withdraw,
    Transfer,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Deposit,
        TransactionKind::Withdraw,
        TransactionKind::Transfer,
    ];

    /// Value of the `<option>` for this kind
    pub fn value(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::Transfer => "transfer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::Transfer => "Transfer",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.value() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub account_number: String,
    pub amount: String,
    pub to_account_number: String,
}

/// A validated transaction, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionCommand {
    Deposit {
        account_number: String,
        amount: Decimal,
    },
    Withdraw {
        account_number: String,
        amount: Decimal,
    },
    Transfer {
        account_number: String,
        request: TransferRequest,
    },
}

impl TransactionDraft {
    /// Only transfers ask for a destination account
    pub fn requires_destination(&self) -> bool {
        self.kind == TransactionKind::Transfer
    }

    pub fn to_command(&self) -> Result<TransactionCommand, FormError> {
        let account_number = self.account_number.trim().to_string();
        if account_number.is_empty() {
            return Err(FormError::Missing("Account number"));
        }
        let amount = self
            .amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| FormError::InvalidAmount(self.amount.clone()))?;

        Ok(match self.kind {
            TransactionKind::Deposit => TransactionCommand::Deposit {
                account_number,
                amount,
            },
            TransactionKind::Withdraw => TransactionCommand::Withdraw {
                account_number,
                amount,
            },
            TransactionKind::Transfer => {
                let to_account_number = self.to_account_number.trim().to_string();
                if to_account_number.is_empty() {
                    return Err(FormError::Missing("To account number"));
                }
                TransactionCommand::Transfer {
                    account_number,
                    request: TransferRequest {
                        amount,
                        to_account_number,
                    },
                }
            }
        })
    }
}

impl TransactionCommand {
    pub async fn execute(self, console: &Console) {
        match self {
            TransactionCommand::Deposit {
                account_number,
                amount,
            } => console.deposit(&account_number, amount).await,
            TransactionCommand::Withdraw {
                account_number,
                amount,
            } => console.withdraw(&account_number, amount).await,
            TransactionCommand::Transfer {
                account_number,
                request,
            } => console.transfer(&account_number, request).await,
        }
    }
}
