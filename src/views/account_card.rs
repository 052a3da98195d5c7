use super::dispatch;
use super::primitives::Button;
use crate::console::Console;
use crate::error::ApiError;
use crate::models::{BankAccount, Transaction};
use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
enum FetchState {
    #[default]
    NotLoaded,
    Pending,
    Loaded(Vec<Transaction>),
}

/// Visibility and fetch state of one account's transaction list.
///
/// Transactions are fetched the first time the panel is shown. Toggling again
/// while the fetch is pending, or after it completed, never fetches twice; a
/// failed fetch is retried the next time the panel is shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionPanel {
    visible: bool,
    fetch: FetchState,
}

impl TransactionPanel {
    /// Flip visibility; returns true when the caller should start a fetch
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        if self.visible && self.fetch == FetchState::NotLoaded {
            self.fetch = FetchState::Pending;
            return true;
        }
        false
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<Transaction>, ApiError>) {
        self.fetch = match result {
            Ok(transactions) => {
                log::debug!("Loaded {} transactions", transactions.len());
                FetchState::Loaded(transactions)
            }
            Err(e) => {
                log::error!("Error loading transactions: {}", e);
                FetchState::NotLoaded
            }
        };
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.fetch == FetchState::Pending
    }

    pub fn transactions(&self) -> Option<&[Transaction]> {
        match &self.fetch {
            FetchState::Loaded(transactions) => Some(transactions),
            _ => None,
        }
    }
}

#[component]
pub fn BankAccountList(console: Console, accounts: Vec<BankAccount>) -> Element {
    rsx! {
        div { class: "bank-accounts",
            h3 { "Bank Accounts:" }
            for account in accounts.iter() {
                BankAccountCard {
                    key: "{account.account_number}",
                    console: console.clone(),
                    account: account.clone(),
                }
            }
        }
    }
}

#[component]
fn BankAccountCard(console: Console, account: BankAccount) -> Element {
    let mut panel = use_signal(TransactionPanel::default);

    let delete_console = console.clone();
    let delete_number = account.account_number.clone();
    let fetch_number = account.account_number.clone();

    let toggle_transactions = move |_: MouseEvent| {
        let should_fetch = panel.write().toggle();
        if should_fetch {
            let console = console.clone();
            let account_number = fetch_number.clone();
            spawn(async move {
                let result = console.account_transactions(&account_number).await;
                panel.write().finish_fetch(result);
            });
        }
    };

    let state = panel();
    let toggle_label = if state.is_visible() {
        "Hide Transactions"
    } else {
        "View Transactions"
    };
    let rows: Vec<(String, Transaction)> = state
        .transactions()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, transaction)| {
            let key = transaction
                .transaction_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| format!("row-{}", index));
            (key, transaction.clone())
        })
        .collect();

    rsx! {
        div { class: "account-card",
            p {
                strong { "Account Number:" }
                " {account.account_number}"
            }
            p {
                strong { "Account Type:" }
                " {account.account_type}"
            }
            p {
                strong { "Balance:" }
                " {account.display_balance()}"
            }
            Button {
                class: "delete-account",
                on_click: move |_| {
                    let console = delete_console.clone();
                    let account_number = delete_number.clone();
                    dispatch(async move { console.delete_account(&account_number).await });
                },
                "Delete Account"
            }
            Button { class: "view-transactions", on_click: toggle_transactions, "{toggle_label}" }
            if state.is_visible() {
                if state.is_pending() {
                    p { class: "transactions-loading", "Loading transactions..." }
                } else if state.transactions().is_some() && rows.is_empty() {
                    p { "No transactions found." }
                } else if !rows.is_empty() {
                    div { class: "transactions",
                        h4 { "Transactions:" }
                        for (key , transaction) in rows {
                            TransactionEntry { key: "{key}", transaction }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TransactionEntry(transaction: Transaction) -> Element {
    let id = transaction
        .transaction_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let amount = format!("{:.2}", transaction.amount.round_dp(2));
    let style = transaction.transaction_type.css_class();
    let when = transaction.local_time();
    let from = transaction.from_account_number.clone().unwrap_or_default();
    let to = transaction.to_account_number.clone().unwrap_or_default();

    rsx! {
        div { class: "transaction-card {style}",
            p {
                strong { "Transaction ID:" }
                " {id}"
            }
            p {
                strong { "Type:" }
                " {transaction.transaction_type}"
            }
            p {
                strong { "Amount:" }
                " {amount}"
            }
            if !from.is_empty() {
                p {
                    strong { "From:" }
                    " {from}"
                }
            }
            if !to.is_empty() {
                p {
                    strong { "To:" }
                    " {to}"
                }
            }
            p {
                strong { "Date:" }
                " {when}"
            }
        }
    }
}
