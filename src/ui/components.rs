/// Reusable UI components

use crate::manager::TabAction;
use crate::tab_data::{PageContent, TabInfo};
use yew::prelude::*;

const DEFAULT_FAVICON: &str = "icons/default-favicon.png";

#[derive(Properties, PartialEq)]
pub struct TabRowProps {
    pub tab: TabInfo,
    pub on_action: Callback<(TabAction, TabInfo)>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(TabRow)]
pub fn tab_row(props: &TabRowProps) -> Html {
    let action = |action: TabAction| {
        let on_action = props.on_action.clone();
        let tab = props.tab.clone();
        Callback::from(move |_: MouseEvent| on_action.emit((action, tab.clone())))
    };

    let icon = props.tab.fav_icon_url.clone().unwrap_or_else(|| DEFAULT_FAVICON.to_string());
    let pin_label = if props.tab.pinned { "Unpin" } else { "Pin" };

    html! {
        <div class={if props.tab.active { "tab-row tab-row-active" } else { "tab-row" }}>
            <img class="tab-favicon" src={icon} alt="" />
            <div class="tab-text">
                <p class="tab-title">{&props.tab.title}</p>
                <p class="tab-url">{&props.tab.url}</p>
            </div>
            <div class="tab-actions">
                <button disabled={props.disabled} onclick={action(TabAction::Focus)}>{"Go"}</button>
                <button disabled={props.disabled} onclick={action(TabAction::Pin)}>{pin_label}</button>
                <button disabled={props.disabled} onclick={action(TabAction::MoveToNewWindow)}>{"Detach"}</button>
                <button disabled={props.disabled} onclick={action(TabAction::Close)}>{"Close"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContentDisplayProps {
    pub content: PageContent,
    #[prop_or_default]
    pub summary: Option<String>,
}

#[function_component(ContentDisplay)]
pub fn content_display(props: &ContentDisplayProps) -> Html {
    html! {
        <div class="content-card">
            <h2 class="content-title">{&props.content.title}</h2>
            <p class="content-url">{&props.content.url}</p>
            if let Some(summary) = &props.summary {
                <div class="content-summary">
                    <p class="message-paragraph">{summary}</p>
                </div>
            }
            <div class="content-body">
                <p class="content-text">{&props.content.text}</p>
            </div>
        </div>
    }
}
