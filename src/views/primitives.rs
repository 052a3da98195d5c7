use dioxus::prelude::*;

/// Overlay dialog; clicking outside the content closes it
#[component]
pub fn Modal(show: bool, on_close: EventHandler<()>, children: Element) -> Element {
    if !show {
        return rsx! {};
    }

    rsx! {
        div { class: "modal-overlay", onclick: move |_| on_close.call(()),
            div {
                class: "modal-content",
                onclick: move |event: MouseEvent| event.stop_propagation(),
                button { class: "close-button", onclick: move |_| on_close.call(()), "X" }
                {children}
            }
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] class: String,
    on_click: EventHandler<MouseEvent>,
    #[props(default)] disabled: bool,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "button {class}",
            disabled,
            onclick: move |event| on_click.call(event),
            {children}
        }
    }
}
