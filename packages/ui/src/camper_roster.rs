use api::{ApiClient, ClientError, User};
use dioxus::prelude::*;

use crate::roster::{Roster, RosterView};

const ROSTER_CSS: Asset = asset!("/assets/roster.css");

/// The message shown in the error state for a failed list request.
fn fetch_error_message(err: &ClientError) -> String {
    if err.is_status() {
        "Failed to fetch campers".to_string()
    } else {
        err.to_string()
    }
}

/// Blocking alert in the browser; elsewhere there is no modal to raise.
fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                tracing::warn!("Failed to show alert {:?}: {:?}", message, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("{}", message);
}

async fn load_campers(client: ApiClient, mut roster: Signal<Roster>) {
    roster.write().begin_fetch();
    match client.list_users().await {
        Ok(campers) => roster.write().fetch_succeeded(campers),
        Err(e) => {
            tracing::error!("Error fetching campers: {}", e);
            roster.write().fetch_failed(fetch_error_message(&e));
        }
    }
}

/// The camper list with inline username editing.
#[component]
pub fn CamperRoster(#[props(default)] client: ApiClient) -> Element {
    let client = use_signal(move || client);
    let mut roster = use_signal(Roster::new);

    // Load campers on mount
    let _loader = use_resource(move || async move {
        load_campers(client(), roster).await;
    });

    let retry = move |_: MouseEvent| {
        spawn(load_campers(client(), roster));
    };

    let save = move |_: ()| {
        let Some((id, username)) = roster.read().save_request() else {
            return;
        };
        spawn(async move {
            let outcome = client().update_username(id, &username).await;
            if let Err(e) = &outcome {
                tracing::error!("Error updating username: {}", e);
            }
            let failure = roster.write().save_finished(outcome);
            if let Some(message) = failure {
                alert(message);
            }
        });
    };

    let state = roster.read();
    let content = match state.view() {
        RosterView::Loading => rsx! {
            div {
                class: "roster-status",
                p { class: "roster-status__text", "Loading campers..." }
            }
        },
        RosterView::Error(message) => rsx! {
            div {
                class: "roster-error",
                p { class: "roster-error__text", "Error: {message}" }
                button {
                    class: "btn btn--danger",
                    onclick: retry,
                    "Retry"
                }
            }
        },
        RosterView::Empty => rsx! {
            RosterCard {
                count: 0,
                div { class: "roster-empty", "No campers enrolled yet." }
            }
        },
        RosterView::Populated(campers) => rsx! {
            RosterCard {
                count: campers.len(),
                for camper in campers {
                    CamperRow {
                        key: "{camper.id}",
                        camper: camper.clone(),
                        draft: state
                            .editing()
                            .filter(|draft| draft.id == camper.id)
                            .map(|draft| draft.username.clone()),
                        on_edit: move |id| roster.write().start_edit(id),
                        on_draft: move |value: String| roster.write().set_draft(value),
                        on_save: save,
                        on_cancel: move |_| roster.write().cancel_edit(),
                    }
                }
            }
        },
    };

    rsx! {
        document::Stylesheet { href: ROSTER_CSS }
        div {
            class: "roster",
            {content}
        }
    }
}

#[component]
fn RosterCard(count: usize, children: Element) -> Element {
    rsx! {
        div {
            class: "roster-card",
            div {
                class: "roster-card__header",
                h2 { class: "roster-card__title", "Enrolled Campers ({count})" }
            }
            div { class: "roster-card__rows", {children} }
        }
    }
}

/// One camper, either displayed or with its username draft open for editing.
#[component]
fn CamperRow(
    camper: User,
    /// The current draft when this camper is being edited.
    draft: Option<String>,
    on_edit: EventHandler<i32>,
    on_draft: EventHandler<String>,
    on_save: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let id = camper.id;
    let username = camper.display_username().to_string();

    let body = match draft {
        Some(draft) => rsx! {
            div {
                class: "camper-row__body",
                span { class: "camper-emoji", "{camper.emoji}" }
                div {
                    class: "camper-row__main",
                    p { class: "camper-name", "{camper.name}" }
                    div {
                        class: "camper-edit",
                        input {
                            class: "camper-edit__input",
                            r#type: "text",
                            placeholder: "Enter username",
                            autofocus: true,
                            value: "{draft}",
                            oninput: move |evt: FormEvent| on_draft.call(evt.value()),
                        }
                        button {
                            class: "btn btn--save",
                            onclick: move |_| on_save.call(()),
                            "Save"
                        }
                        button {
                            class: "btn btn--cancel",
                            onclick: move |_| on_cancel.call(()),
                            "Cancel"
                        }
                    }
                }
            }
        },
        None => rsx! {
            div {
                class: "camper-row__body camper-row__body--spread",
                div {
                    class: "camper-row__identity",
                    span { class: "camper-emoji", "{camper.emoji}" }
                    div {
                        p { class: "camper-name", "{camper.name}" }
                        p { class: "camper-username", "@{username}" }
                    }
                }
                button {
                    class: "btn btn--edit",
                    onclick: move |_| on_edit.call(id),
                    "Edit Username"
                }
            }
        },
    };

    rsx! {
        div { class: "camper-row", {body} }
    }
}
