/// Popup UI: open tabs, session/folder actions and page capture

use crate::api::ApiClient;
use crate::api::features::SummaryRequest;
use crate::chrome::messaging;
use crate::dispatcher::Request;
use crate::manager::{BookmarkSummary, TabAction};
use crate::operations::{filter_tabs, snapshot_tabs};
use crate::tab_data::{PageContent, SessionSnapshot, TabInfo};
use crate::ui::components::{ContentDisplay, TabRow};
use patternfly_yew::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Notice(String),
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let tabs = use_state(Vec::<TabInfo>::new);
    let search_query = use_state(String::new);
    let folder_name = use_state(String::new);
    let content = use_state(|| None::<PageContent>);
    let summary = use_state(|| None::<String>);

    // Load tabs on mount
    {
        let tabs = tabs.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(refresh_tabs(tabs, state));
            || ()
        });
    }

    let on_search_input = {
        let search_query = search_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search_query.set(input.value());
            }
        })
    };

    let on_folder_input = {
        let folder_name = folder_name.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                folder_name.set(input.value());
            }
        })
    };

    // Per-tab actions
    let on_tab_action = {
        let tabs = tabs.clone();
        let state = state.clone();

        Callback::from(move |(action, tab): (TabAction, TabInfo)| {
            let tabs = tabs.clone();
            let state = state.clone();

            spawn_local(async move {
                let request = Request::ManageTab {
                    action,
                    tab_id: tab.id,
                    window_id: Some(tab.window_id),
                };
                match messaging::request::<Value>(request).await {
                    Ok(_) => refresh_tabs(tabs, state).await,
                    Err(e) => state.set(AppState::Error(e)),
                }
            });
        })
    };

    let on_save_session = {
        let state = state.clone();

        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            state.set(AppState::Loading("Saving session...".to_string()));

            spawn_local(async move {
                match messaging::request::<SessionSnapshot>(Request::SaveSession).await {
                    Ok(session) => state.set(AppState::Notice(format!(
                        "Saved {} tabs ({})",
                        session.tabs.len(),
                        session.timestamp
                    ))),
                    Err(e) => state.set(AppState::Error(format!("Failed to save session: {}", e))),
                }
            });
        })
    };

    let on_restore_session = {
        let state = state.clone();

        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            state.set(AppState::Loading("Restoring session...".to_string()));

            spawn_local(async move {
                match messaging::request::<Value>(Request::RestoreSession { timestamp: None }).await {
                    Ok(data) if data["restored"] == Value::Bool(true) => state.set(AppState::Idle),
                    Ok(_) => state.set(AppState::Notice("No saved session yet".to_string())),
                    Err(e) => state.set(AppState::Error(format!("Restore failed: {}", e))),
                }
            });
        })
    };

    let on_bookmark_all = {
        let state = state.clone();

        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            state.set(AppState::Loading("Bookmarking tabs...".to_string()));

            spawn_local(async move {
                match messaging::request::<BookmarkSummary>(Request::BookmarkAll).await {
                    Ok(summary) if summary.failed.is_empty() => {
                        state.set(AppState::Notice(format!("Bookmarked {} tabs", summary.count)))
                    }
                    Ok(summary) => state.set(AppState::Notice(format!(
                        "Bookmarked {} tabs, {} could not be bookmarked",
                        summary.count,
                        summary.failed.len()
                    ))),
                    Err(e) => state.set(AppState::Error(format!("Bookmark failed: {}", e))),
                }
            });
        })
    };

    // Save the tabs currently shown (search applied) under the typed folder name
    let on_save_folder = {
        let state = state.clone();
        let tabs = tabs.clone();
        let search_query = search_query.clone();
        let folder_name = folder_name.clone();

        Callback::from(move |_: MouseEvent| {
            let name = folder_name.trim().to_string();
            if name.is_empty() {
                state.set(AppState::Error("Enter a folder name first".to_string()));
                return;
            }

            let selected = snapshot_tabs(&filter_tabs(&tabs, &search_query));
            let count = selected.len();
            let state = state.clone();

            spawn_local(async move {
                let request = Request::SaveTabsToFolder {
                    folder_name: name.clone(),
                    tabs: selected,
                };
                match messaging::request::<Value>(request).await {
                    Ok(_) => state.set(AppState::Notice(format!("Saved {} tabs to {:?}", count, name))),
                    Err(e) => state.set(AppState::Error(format!("Failed to save folder: {}", e))),
                }
            });
        })
    };

    let on_open_folder = {
        let state = state.clone();
        let folder_name = folder_name.clone();

        Callback::from(move |_: MouseEvent| {
            let name = folder_name.trim().to_string();
            let state = state.clone();

            spawn_local(async move {
                let request = Request::OpenTabsFromFolder { folder_name: name };
                if let Err(e) = messaging::request::<Value>(request).await {
                    state.set(AppState::Error(format!("Failed to open folder: {}", e)));
                }
            });
        })
    };

    let on_read_content = {
        let state = state.clone();
        let content = content.clone();
        let summary = summary.clone();

        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            let content = content.clone();
            let summary = summary.clone();
            state.set(AppState::Loading("Reading...".to_string()));

            spawn_local(async move {
                match messaging::request::<PageContent>(Request::GetTabContent).await {
                    Ok(page) => {
                        summary.set(None);
                        content.set(Some(page));
                        state.set(AppState::Idle);
                    }
                    Err(e) => state.set(AppState::Error(e)),
                }
            });
        })
    };

    let on_save_content = {
        let state = state.clone();
        let content = content.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(page) = (*content).clone() else {
                return;
            };
            let state = state.clone();

            spawn_local(async move {
                match ApiClient::default().save_page_content(&page).await {
                    Ok(response) if response.success => {
                        state.set(AppState::Notice("Saved to library".to_string()))
                    }
                    Ok(response) => state.set(AppState::Error(
                        response.error.unwrap_or_else(|| "Save failed".to_string()),
                    )),
                    Err(e) => state.set(AppState::Error(format!("Save failed: {}", e))),
                }
            });
        })
    };

    let on_summarize = {
        let state = state.clone();
        let content = content.clone();
        let summary = summary.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(page) = (*content).clone() else {
                return;
            };
            let state = state.clone();
            let summary = summary.clone();
            state.set(AppState::Loading("Summarizing...".to_string()));

            spawn_local(async move {
                match ApiClient::default().summarize(&SummaryRequest::new(page.text)).await {
                    Ok(response) => {
                        summary.set(Some(response.summary));
                        state.set(AppState::Idle);
                    }
                    Err(e) => state.set(AppState::Error(format!("Summary failed: {}", e))),
                }
            });
        })
    };

    let is_busy = matches!(*state, AppState::Loading(_));
    let visible_tabs = filter_tabs(&tabs, &search_query);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"SemantAI Tabs"}</h1>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Notice(msg) => html! {
                    <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                    </Alert>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="flex-column-gap">
                <Button onclick={on_save_session} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"Save Session"}
                </Button>
                <Button onclick={on_restore_session} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"Restore Session"}
                </Button>
                <Button onclick={on_bookmark_all} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"Bookmark All Tabs"}
                </Button>
            </div>

            <div class="folder-row">
                <input
                    type="text"
                    class="folder-input"
                    placeholder="Folder name"
                    value={(*folder_name).clone()}
                    oninput={on_folder_input}
                />
                <Button onclick={on_save_folder} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Save to Folder"}
                </Button>
                <Button onclick={on_open_folder} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Open Folder"}
                </Button>
            </div>

            <div class="tabs-section">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search tabs..."
                    value={(*search_query).clone()}
                    oninput={on_search_input}
                />
                {for visible_tabs.into_iter().map(|tab| {
                    let id = tab.id;
                    html! {
                        <TabRow key={id} tab={tab} on_action={on_tab_action.clone()} disabled={is_busy} />
                    }
                })}
                if tabs.is_empty() {
                    <p class="empty-text">{"No open tabs found."}</p>
                }
            </div>

            <div class="flex-column-gap">
                <Button onclick={on_read_content} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                    {"Read Tab Content"}
                </Button>
                if let Some(page) = (*content).clone() {
                    <Button onclick={on_save_content} disabled={is_busy} variant={ButtonVariant::Secondary}>
                        {"Save"}
                    </Button>
                    <Button onclick={on_summarize} disabled={is_busy} variant={ButtonVariant::Secondary}>
                        {"Summarize"}
                    </Button>
                    <ContentDisplay content={page} summary={(*summary).clone()} />
                }
            </div>

            <p class="footer-popup">
                {"SemantAI Tabs v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn refresh_tabs(tabs: UseStateHandle<Vec<TabInfo>>, state: UseStateHandle<AppState>) {
    match messaging::request::<Vec<TabInfo>>(Request::GetTabs).await {
        Ok(list) => {
            tabs.set(list);
            if matches!(*state, AppState::Loading(_)) {
                state.set(AppState::Idle);
            }
        }
        Err(e) => state.set(AppState::Error(format!("Failed to get tabs: {}", e))),
    }
}
