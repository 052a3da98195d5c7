use super::forms::{BankAccountCreationForm, TransactionForm, UserCreationForm};
use super::primitives::{Button, Modal};
use super::user_card::UserCard;
use crate::console::Console;
use crate::directory::Directory;
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn Users(console: Console) -> Element {
    let mut directory = use_signal(|| console.snapshot());
    let mut show_user_form = use_signal(|| false);
    let mut show_account_form = use_signal(|| false);
    let mut show_transaction_form = use_signal(|| false);

    let init_console = console.clone();
    use_future(move || {
        let console = init_console.clone();
        async move { console.initialize().await }
    });

    let watched_console = console.clone();
    use_future(move || {
        let mut receiver = watched_console.subscribe();
        async move {
            loop {
                let snapshot = receiver.borrow_and_update().clone();
                directory.set(snapshot);
                if receiver.changed().await.is_err() {
                    log::debug!("Console dropped, no more directory updates");
                    break;
                }
            }
        }
    });

    let no_users = directory.read().users().is_empty();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div { class: "user-container",
            h2 { "Users" }
            div { class: "action-buttons",
                Button {
                    class: "create-user",
                    on_click: move |_| show_user_form.set(true),
                    "Create User"
                }
                Button {
                    class: "create-bank-account",
                    disabled: no_users,
                    on_click: move |_| show_account_form.set(true),
                    "Create Bank Account"
                }
                Button {
                    class: "create-transaction",
                    disabled: no_users,
                    on_click: move |_| show_transaction_form.set(true),
                    "Create Transaction"
                }
            }
            Modal {
                show: show_user_form(),
                on_close: move |_| show_user_form.set(false),
                UserCreationForm {
                    console: console.clone(),
                    on_close: move |_| show_user_form.set(false),
                }
            }
            Modal {
                show: show_account_form(),
                on_close: move |_| show_account_form.set(false),
                BankAccountCreationForm {
                    console: console.clone(),
                    on_close: move |_| show_account_form.set(false),
                }
            }
            Modal {
                show: show_transaction_form(),
                on_close: move |_| show_transaction_form.set(false),
                TransactionForm {
                    console: console.clone(),
                    on_close: move |_| show_transaction_form.set(false),
                }
            }
            UserList { console: console.clone(), directory: directory() }
        }
    }
}

#[component]
fn UserList(console: Console, directory: Directory) -> Element {
    if directory.loading {
        return rsx! {
            div { "Loading..." }
        };
    }

    rsx! {
        div { class: "user-list",
            if let Some(message) = &directory.message {
                div { class: "message", "{message}" }
            }
            if let Some(error) = &directory.error {
                div { class: "error", "Error: {error}" }
            }
            div { class: "card-grid",
                for user in directory.users().iter() {
                    UserCard {
                        key: "{user.user_id}",
                        console: console.clone(),
                        user: user.clone(),
                    }
                }
            }
        }
    }
}
