//! Dioxus components of the console
//!
//! Every component receives the [`Console`](crate::console::Console) it works
//! with as a prop; nothing is read from ambient context below the app root.

/// Modal overlay and button control
mod primitives;

/// Users page, banners and dialogs
mod users;
pub use users::Users;

/// User card with its profile and inline editor
mod user_card;

/// Account cards and their transaction panels
mod account_card;

/// Creation and transaction dialogs
mod forms;

/// Run a console command on the runtime rather than in the issuing component,
/// so closing a dialog does not cancel the command it just submitted.
fn dispatch<F>(command: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(command);
}
