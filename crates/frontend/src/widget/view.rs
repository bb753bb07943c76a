//! Leptos components that draw one `PanelView` tree.
//!
//! The whole tree hangs off a single `RwSignal<PanelView>`: every state
//! change swaps in a freshly built description, so the drawn panel is
//! always a full redraw, never an in-place patch of stale structure. Only
//! the thumbnail aspect ratio is bound separately, because it is measured
//! after paint and applied without another render pass.

use catalog::pagination::PageButton;
use catalog::view::{CardView, CategoryButton, FilterBarView, PaginationView, PanelView, ReadyView};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Handlers the widget shell wires into the drawn panel. `UnsyncCallback`
/// because every handler captures the shell's `Rc` state.
#[derive(Clone)]
pub struct PanelActions {
    pub select_category: UnsyncCallback<Option<String>>,
    pub search_input: UnsyncCallback<String>,
    pub search_submit: UnsyncCallback<String>,
    pub clear_search: UnsyncCallback<()>,
    pub go_to_page: UnsyncCallback<usize>,
    pub prev_page: UnsyncCallback<()>,
    pub next_page: UnsyncCallback<()>,
    pub open_card: UnsyncCallback<String>,
}

#[component]
pub fn CatalogPanel(
    view: RwSignal<PanelView>,
    aspect: RwSignal<Option<f64>>,
    actions: PanelActions,
) -> impl IntoView {
    view! {
        <div class="catalog-wrapper">
            {move || {
                let actions = actions.clone();
                match view.get() {
                    PanelView::Loading { message } => view! {
                        <div class="catalog-loading">
                            <p>{message}</p>
                        </div>
                    }
                    .into_any(),
                    PanelView::LoadError { message } => view! {
                        <div class="catalog-error">
                            <p>{message}</p>
                        </div>
                    }
                    .into_any(),
                    PanelView::Ready(ready) => view! { <ReadyPanel ready aspect actions /> }.into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn ReadyPanel(ready: ReadyView, aspect: RwSignal<Option<f64>>, actions: PanelActions) -> impl IntoView {
    let ReadyView { filter_bar, cards, no_results, pagination, placeholder_image } = ready;
    let bar_actions = actions.clone();
    let page_actions = actions.clone();
    view! {
        {filter_bar.map(|bar| view! { <FilterBar bar actions=bar_actions /> })}
        <div class="catalog-grid-container">
            {match no_results {
                Some(message) => view! {
                    <div class="catalog-no-data">
                        <p>{message}</p>
                    </div>
                }
                .into_any(),
                None => view! { <CardGrid cards placeholder_image aspect actions /> }.into_any(),
            }}
        </div>
        {pagination.map(|controls| view! { <PaginationBar controls actions=page_actions /> })}
    }
}

#[component]
fn FilterBar(bar: FilterBarView, actions: PanelActions) -> impl IntoView {
    let FilterBarView { search_placeholder, search_text, clear_visible, buttons } = bar;
    let input_actions = actions.clone();
    let submit_actions = actions.clone();
    let clear_actions = actions.clone();
    view! {
        <div class="catalog-filter">
            <div class="catalog-search-box">
                <input
                    type="text"
                    class="catalog-search-input"
                    placeholder=search_placeholder
                    prop:value=search_text
                    autocomplete="off"
                    autocapitalize="off"
                    spellcheck="false"
                    on:input=move |ev| input_actions.search_input.run(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            submit_actions.search_submit.run(event_target_value(&ev));
                        }
                    }
                />
                {clear_visible.then(|| view! {
                    <button
                        class="catalog-search-clear"
                        on:click=move |_| clear_actions.clear_search.run(())
                    >
                        "✕"
                    </button>
                })}
            </div>
            <div class="catalog-category-buttons">
                {buttons
                    .into_iter()
                    .map(|button| {
                        let CategoryButton { id, label, active } = button;
                        let select = actions.select_category.clone();
                        let class =
                            if active { "catalog-category-btn active" } else { "catalog-category-btn" };
                        view! {
                            <button class=class on:click=move |_| select.run(id.clone())>
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn CardGrid(
    cards: Vec<CardView>,
    placeholder_image: String,
    aspect: RwSignal<Option<f64>>,
    actions: PanelActions,
) -> impl IntoView {
    view! {
        <div class="catalog-grid">
            {cards
                .into_iter()
                .map(|card| {
                    let placeholder = placeholder_image.clone();
                    let open = actions.open_card.clone();
                    view! { <CatalogCard card placeholder open aspect /> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn CatalogCard(
    card: CardView,
    placeholder: String,
    open: UnsyncCallback<String>,
    aspect: RwSignal<Option<f64>>,
) -> impl IntoView {
    let CardView { media_id, image, label, .. } = card;
    let click_media = media_id.clone();
    let touch_media = media_id;
    let click_open = open.clone();
    let touch_open = open;
    let touch_started = StoredValue::new(None::<f64>);
    let image_failed = StoredValue::new(false);
    let alt = label.clone();
    view! {
        <div
            class="catalog-card"
            on:click=move |_| click_open.run(click_media.clone())
            on:touchstart=move |_| touch_started.set_value(Some(js_sys::Date::now()))
            on:touchend=move |ev: web_sys::TouchEvent| {
                ev.prevent_default();
                if let Some(started) = touch_started.get_value() {
                    // A short touch counts as a tap; long presses do not
                    // activate the card.
                    if js_sys::Date::now() - started < 500.0 {
                        touch_open.run(touch_media.clone());
                    }
                }
                touch_started.set_value(None);
            }
        >
            <div
                class="catalog-card-thumb"
                style:padding-top=move || {
                    aspect
                        .get()
                        .map(|percent| format!("{percent:.1}%"))
                        .unwrap_or_else(|| "100%".to_string())
                }
            >
                <img
                    src=image
                    alt=alt
                    loading="lazy"
                    on:error=move |ev: web_sys::ErrorEvent| {
                        if image_failed.get_value() {
                            return;
                        }
                        image_failed.set_value(true);
                        let target =
                            ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok());
                        if let Some(img) = target {
                            img.set_src(&placeholder);
                        }
                    }
                />
            </div>
            <div class="catalog-card-name">
                <h4>{label}</h4>
            </div>
        </div>
    }
}

#[component]
fn PaginationBar(controls: PaginationView, actions: PanelActions) -> impl IntoView {
    let PaginationView { prev_enabled, next_enabled, buttons, .. } = controls;
    let prev = actions.prev_page.clone();
    let next = actions.next_page.clone();
    view! {
        <div class="catalog-pagination">
            <button
                class="catalog-pagination-btn catalog-btn-prev"
                disabled={!prev_enabled}
                on:click=move |_| prev.run(())
            >
                "←"
            </button>
            <div class="catalog-pagination-pages">
                {buttons
                    .into_iter()
                    .map(|button| match button {
                        PageButton::Page { number, active } => {
                            let go = actions.go_to_page.clone();
                            let class =
                                if active { "catalog-page-btn active" } else { "catalog-page-btn" };
                            view! {
                                <button class=class on:click=move |_| go.run(number)>
                                    {number.to_string()}
                                </button>
                            }
                            .into_any()
                        }
                        PageButton::Ellipsis => {
                            view! { <span class="catalog-page-dots">"..."</span> }.into_any()
                        }
                    })
                    .collect_view()}
            </div>
            <button
                class="catalog-pagination-btn catalog-btn-next"
                disabled={!next_enabled}
                on:click=move |_| next.run(())
            >
                "→"
            </button>
        </div>
    }
}
