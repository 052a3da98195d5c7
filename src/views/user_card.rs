use super::account_card::BankAccountList;
use super::dispatch;
use super::primitives::Button;
use crate::console::Console;
use crate::forms::ProfileDraft;
use crate::models::{User, UserUpdate};
use dioxus::prelude::*;

#[component]
pub fn UserCard(console: Console, user: User) -> Element {
    let mut editing = use_signal(|| false);

    rsx! {
        div { class: "user-card",
            UserInfo { user: user.clone() }
            Button {
                class: "edit-user",
                on_click: move |_| editing.set(!editing()),
                if editing() {
                    "Close Editor"
                } else {
                    "Edit User"
                }
            }
            if editing() {
                EditUserForm {
                    console: console.clone(),
                    user: user.clone(),
                    on_close: move |_| editing.set(false),
                }
            }
            if user.bank_accounts.is_empty() {
                p { "No Bank Accounts" }
            } else {
                BankAccountList { console: console.clone(), accounts: user.bank_accounts.clone() }
            }
        }
    }
}

#[component]
fn UserInfo(user: User) -> Element {
    let admin = if user.is_admin { "Yes" } else { "No" };

    rsx! {
        div { class: "user-info",
            p {
                strong { "Name:" }
                " {user.name}"
            }
            p {
                strong { "Email:" }
                " {user.email}"
            }
            p {
                strong { "Phone:" }
                " {user.phone}"
            }
            p {
                strong { "Admin:" }
                " {admin}"
            }
        }
    }
}

/// Inline profile editor, prefilled from the cached user
#[component]
fn EditUserForm(console: Console, user: User, on_close: EventHandler<()>) -> Element {
    let mut draft = use_signal(|| ProfileDraft::from(&user));
    let user_id = user.user_id;

    rsx! {
        form {
            class: "edit-user-form",
            onsubmit: move |event: FormEvent| {
                event.prevent_default();
                let console = console.clone();
                let update: UserUpdate = draft.read().clone().into();
                dispatch(async move { console.update_user(user_id, update).await });
                on_close.call(());
            },
            h3 { "Edit User" }
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
                "Admin:"
                input {
                    r#type: "checkbox",
                    name: "isAdmin",
                    checked: draft.read().is_admin,
                    onchange: move |_| {
                        let mut profile = draft.write();
                        profile.is_admin = !profile.is_admin;
                    },
                }
            }
            button { r#type: "submit", "Save" }
            button { r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
        }
    }
}
