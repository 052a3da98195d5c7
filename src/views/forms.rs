use super::dispatch;
use crate::console::Console;
use crate::forms::{AccountDraft, TransactionDraft, TransactionKind, UserDraft};
use crate::models::{NewAccount, NewUser};
use dioxus::prelude::*;

#[component]
pub fn UserCreationForm(console: Console, on_close: EventHandler<()>) -> Element {
    let mut draft = use_signal(UserDraft::default);

    rsx! {
        form {
            onsubmit: move |event: FormEvent| {
                event.prevent_default();
                let console = console.clone();
                let user: NewUser = draft.read().clone().into();
                dispatch(async move { console.register_user(user).await });
                on_close.call(());
            },
            h3 { "Create User" }
            label {
                "Name:"
                input {
                    r#type: "text",
                    name: "name",
                    value: "{draft.read().name}",
                    oninput: move |event| draft.write().name = event.value(),
                }
            }
            label {
                "Email:"
                input {
                    r#type: "email",
                    name: "email",
                    value: "{draft.read().email}",
                    oninput: move |event| draft.write().email = event.value(),
                }
            }
            label {
                "Phone:"
                input {
                    r#type: "text",
                    name: "phone",
                    value: "{draft.read().phone}",
                    oninput: move |event| draft.write().phone = event.value(),
                }
            }
            label {
                "Password:"
                input {
                    r#type: "password",
                    name: "password",
                    value: "{draft.read().password}",
                    oninput: move |event| draft.write().password = event.value(),
                }
            }
            label {
                "Admin:"
                input {
                    r#type: "checkbox",
                    name: "isAdmin",
                    checked: draft.read().is_admin,
                    onchange: move |_| {
                        let mut user = draft.write();
                        user.is_admin = !user.is_admin;
                    },
                }
            }
            button { r#type: "submit", "Create User" }
            button { r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
        }
    }
}

#[component]
pub fn BankAccountCreationForm(console: Console, on_close: EventHandler<()>) -> Element {
    let mut draft = use_signal(AccountDraft::default);

    rsx! {
        form {
            onsubmit: move |event: FormEvent| {
                event.prevent_default();
                let console = console.clone();
                let account: NewAccount = draft.read().clone().into();
                dispatch(async move { console.create_bank_account(account).await });
                on_close.call(());
            },
            h3 { "Create Bank Account" }
            label {
                "Account Type:"
                input {
                    r#type: "text",
                    name: "accountType",
                    value: "{draft.read().account_type}",
                    oninput: move |event| draft.write().account_type = event.value(),
                }
            }
            label {
                "Email:"
                input {
                    r#type: "email",
                    name: "email",
                    value: "{draft.read().email}",
                    oninput: move |event| draft.write().email = event.value(),
                }
            }
            button { r#type: "submit", "Create Account" }
            button { r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
        }
    }
}

/// Deposit, withdrawal or transfer; the destination field only shows for transfers
#[component]
pub fn TransactionForm(console: Console, on_close: EventHandler<()>) -> Element {
    let mut draft = use_signal(TransactionDraft::default);
    let selected = draft.read().kind;

    rsx! {
        form {
            onsubmit: move |event: FormEvent| {
                event.prevent_default();
                match draft.read().to_command() {
                    Ok(command) => {
                        let console = console.clone();
                        dispatch(async move { command.execute(&console).await });
                    }
                    Err(e) => console.report_error(e),
                }
                on_close.call(());
            },
            h3 { "Create Transaction" }
            label {
                "Transaction Type:"
                select {
                    name: "transactionType",
                    value: selected.value(),
                    onchange: move |event| {
                        if let Some(kind) = TransactionKind::from_value(&event.value()) {
                            draft.write().kind = kind;
                        }
                    },
                    for kind in TransactionKind::ALL {
                        option {
                            value: kind.value(),
                            selected: kind == selected,
                            "{kind.label()}"
                        }
                    }
                }
            }
            label {
                "Account Number:"
                input {
                    r#type: "text",
                    name: "accountNumber",
                    value: "{draft.read().account_number}",
                    oninput: move |event| draft.write().account_number = event.value(),
                }
            }
            label {
                "Amount:"
                input {
                    r#type: "number",
                    name: "amount",
                    step: "0.01",
                    value: "{draft.read().amount}",
                    oninput: move |event| draft.write().amount = event.value(),
                }
            }
            if draft.read().requires_destination() {
                label {
                    "To Account Number:"
                    input {
                        r#type: "text",
                        name: "toAccountNumber",
                        value: "{draft.read().to_account_number}",
                        oninput: move |event| draft.write().to_account_number = event.value(),
                    }
                }
            }
            button { r#type: "submit", "Submit" }
            button { r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
        }
    }
}
