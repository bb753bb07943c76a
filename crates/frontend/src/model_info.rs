//! The model-info widget.
//!
//! Resolves the media the player currently displays to a record from one
//! of the three datasets (assets, towers, workspaces) by its media-name
//! prefix, and shows a localized description plus an image gallery with
//! wrap-around navigation. Runs its own locale poll; a language switch
//! re-resolves against the live media and redraws.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use catalog::locale::{self, ui_text, UiText, DEFAULT_LOCALE};
use catalog::CatalogError;
use contracts::catalog::CatalogItem;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::{api, host};

#[derive(Debug, Clone)]
pub struct ModelInfoConfig {
    pub assets_url: String,
    pub towers_url: String,
    pub workspaces_url: String,
    pub panel_name: String,
    pub placeholder_image: String,
    pub locale_poll_ms: u32,
    pub host_poll_ms: u32,
    pub host_timeout_ms: u32,
}

impl Default for ModelInfoConfig {
    fn default() -> Self {
        Self {
            assets_url: "./jsons/assets.json".into(),
            towers_url: "./jsons/towers.json".into(),
            workspaces_url: "./jsons/workspaces.json".into(),
            panel_name: "-- THE MODEL INFO".into(),
            placeholder_image: "images/no-image.png".into(),
            locale_poll_ms: 500,
            host_poll_ms: 100,
            host_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum InfoView {
    Idle,
    Error { title: String, message: String },
    Missing { title: String, message: String },
    Detail(DetailView),
}

#[derive(Debug, Clone, PartialEq)]
struct DetailView {
    title: String,
    description: Option<String>,
    no_description: String,
    images_label: String,
    no_images: String,
    images: Vec<String>,
    link_3d: Option<String>,
    view_3d_label: String,
    confirm_3d: String,
}

#[derive(Default)]
struct Datasets {
    assets: Vec<CatalogItem>,
    towers: Vec<CatalogItem>,
    workspaces: Vec<CatalogItem>,
}

struct InfoState {
    config: ModelInfoConfig,
    datasets: RefCell<Datasets>,
    view: RwSignal<InfoView>,
    image_index: RwSignal<usize>,
    panel: RefCell<Option<HtmlElement>>,
    locale: RefCell<String>,
    load_error: RefCell<Option<String>>,
    locale_timer: RefCell<Option<Interval>>,
    key_listener: RefCell<Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>>,
    disposed: Cell<bool>,
}

pub struct ModelInfoWidget {
    state: Rc<InfoState>,
}

impl ModelInfoWidget {
    pub async fn init(config: ModelInfoConfig) -> Result<ModelInfoWidget, CatalogError> {
        host::wait_until_ready(config.host_poll_ms, config.host_timeout_ms).await?;
        let panel = host::panel_by_name(&config.panel_name)
            .ok_or_else(|| CatalogError::PanelNotFound { name: config.panel_name.clone() })?;

        let state = Rc::new(InfoState {
            config,
            datasets: RefCell::new(Datasets::default()),
            view: RwSignal::new(InfoView::Idle),
            image_index: RwSignal::new(0),
            panel: RefCell::new(None),
            locale: RefCell::new(host::current_locale().unwrap_or_else(|| DEFAULT_LOCALE.to_owned())),
            load_error: RefCell::new(None),
            locale_timer: RefCell::new(None),
            key_listener: RefCell::new(None),
            disposed: Cell::new(false),
        });

        mount(&state, panel);

        let loaded = async {
            let assets = api::fetch_list(&state.config.assets_url).await?;
            let towers = api::fetch_list(&state.config.towers_url).await?;
            let workspaces = api::fetch_list(&state.config.workspaces_url).await?;
            Ok::<_, String>(Datasets { assets, towers, workspaces })
        }
        .await;
        match loaded {
            Ok(datasets) => {
                log::debug!(
                    target: "model-info",
                    "loaded {} assets, {} towers, {} workspaces",
                    datasets.assets.len(),
                    datasets.towers.len(),
                    datasets.workspaces.len()
                );
                *state.datasets.borrow_mut() = datasets;
            }
            Err(detail) => {
                // Remembered and surfaced inside the panel on show().
                log::error!(target: "model-info", "failed to load datasets: {detail}");
                *state.load_error.borrow_mut() = Some(detail);
            }
        }

        let widget = ModelInfoWidget { state };
        widget.start_locale_watcher();
        widget.attach_key_listener();
        Ok(widget)
    }

    /// Resolves the currently displayed media and makes the panel visible.
    pub fn show(&self) {
        refresh(&self.state);
        if let Some(panel) = self.state.panel.borrow().as_ref() {
            _ = panel.style().set_property("display", "block");
        }
    }

    pub fn hide(&self) {
        if let Some(panel) = self.state.panel.borrow().as_ref() {
            _ = panel.style().set_property("display", "none");
        }
    }

    pub fn start_locale_watcher(&self) {
        if self.state.locale_timer.borrow().is_some() {
            return;
        }
        let state = self.state.clone();
        let interval = Interval::new(self.state.config.locale_poll_ms, move || {
            if state.disposed.get() {
                return;
            }
            let Some(observed) = host::current_locale() else { return };
            let changed = {
                let mut locale = state.locale.borrow_mut();
                if *locale == observed {
                    false
                } else {
                    *locale = observed;
                    true
                }
            };
            if changed {
                refresh(&state);
            }
        });
        *self.state.locale_timer.borrow_mut() = Some(interval);
    }

    pub fn stop_locale_watcher(&self) {
        if let Some(interval) = self.state.locale_timer.borrow_mut().take() {
            interval.cancel();
        }
    }

    fn attach_key_listener(&self) {
        let state = self.state.clone();
        let listener = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| {
                if state.disposed.get() || !panel_visible(&state) {
                    return;
                }
                let count = state.view.with_untracked(|view| match view {
                    InfoView::Detail(detail) => detail.images.len(),
                    _ => 0,
                });
                match event.key().as_str() {
                    "ArrowLeft" => {
                        event.prevent_default();
                        step_gallery(state.image_index, count, -1);
                    }
                    "ArrowRight" => {
                        event.prevent_default();
                        step_gallery(state.image_index, count, 1);
                    }
                    _ => {}
                }
            },
        );
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            _ = document.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
        }
        *self.state.key_listener.borrow_mut() = Some(listener);
    }

    pub fn dispose(&self) {
        self.state.disposed.set(true);
        self.stop_locale_watcher();
        if let Some(listener) = self.state.key_listener.borrow_mut().take() {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                _ = document
                    .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
        }
    }
}

fn panel_visible(state: &Rc<InfoState>) -> bool {
    state.panel.borrow().as_ref().is_some_and(|panel| {
        panel
            .style()
            .get_property_value("display")
            .map(|display| display == "block")
            .unwrap_or(false)
    })
}

/// Rebuilds the view against the live media name and locale.
fn refresh(state: &Rc<InfoState>) {
    let locale = state.locale.borrow().clone();
    if let Some(detail) = state.load_error.borrow().as_ref() {
        state.view.set(InfoView::Error {
            title: ui_text(&locale, UiText::ErrorTitle).to_owned(),
            message: format!("{} ({detail})", ui_text(&locale, UiText::LoadFailed)),
        });
        return;
    }
    let resolved = host::current_media_name()
        .and_then(|media| resolve(&state.datasets.borrow(), &media));
    match resolved {
        Some(item) => {
            state.image_index.set(0);
            state.view.set(InfoView::Detail(detail_view(&item, &locale)));
        }
        None => state.view.set(InfoView::Missing {
            title: ui_text(&locale, UiText::NoInformationTitle).to_owned(),
            message: ui_text(&locale, UiText::NoInformation).to_owned(),
        }),
    }
}

/// Media names are `prefix + id`; each prefix maps to one dataset.
fn resolve(datasets: &Datasets, media_name: &str) -> Option<CatalogItem> {
    let lookups: [(&str, &[CatalogItem]); 3] = [
        ("asset", &datasets.assets),
        ("tower", &datasets.towers),
        ("workspace", &datasets.workspaces),
    ];
    for (prefix, items) in lookups {
        if let Some(id) = media_name.strip_prefix(prefix) {
            if let Some(item) = items.iter().find(|item| item.id == id) {
                return Some(item.clone());
            }
        }
    }
    None
}

fn detail_view(item: &CatalogItem, locale: &str) -> DetailView {
    let title = locale::localized(locale, &item.name, item.name_alt.as_deref());
    let title = if title.trim().is_empty() {
        ui_text(locale, UiText::Untitled).to_owned()
    } else {
        title.to_owned()
    };
    let description = if locale::is_english(locale) {
        item.description_alt.clone().or_else(|| item.description.clone())
    } else {
        item.description.clone()
    }
    .filter(|text| !text.trim().is_empty());

    DetailView {
        title,
        description,
        no_description: ui_text(locale, UiText::NoDescription).to_owned(),
        images_label: ui_text(locale, UiText::ImagesLabel).to_owned(),
        no_images: ui_text(locale, UiText::NoImages).to_owned(),
        images: item.images.clone(),
        link_3d: item.link_3d.clone(),
        view_3d_label: ui_text(locale, UiText::View3d).to_owned(),
        confirm_3d: ui_text(locale, UiText::Confirm3d).to_owned(),
    }
}

fn step_gallery(image_index: RwSignal<usize>, count: usize, delta: i32) {
    if count <= 1 {
        return;
    }
    image_index.update(|index| {
        *index = (*index as i32 + delta).rem_euclid(count as i32) as usize;
    });
}

/// The one permitted blocking dialog: an explicit opt-in before leaving
/// for the external 3D viewer.
fn confirm_and_open(url: &str, prompt: &str) {
    let Some(window) = web_sys::window() else { return };
    if window.confirm_with_message(prompt).unwrap_or(false) {
        _ = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer");
    }
}

fn mount(state: &Rc<InfoState>, panel: HtmlElement) {
    panel.set_inner_html("");
    let view = state.view;
    let image_index = state.image_index;
    let placeholder = state.config.placeholder_image.clone();
    let handle = leptos::mount::mount_to(panel.clone(), move || {
        view! { <ModelInfoPanel view image_index placeholder /> }
    });
    handle.forget();
    *state.panel.borrow_mut() = Some(panel);
}

#[component]
fn ModelInfoPanel(
    view: RwSignal<InfoView>,
    image_index: RwSignal<usize>,
    placeholder: String,
) -> impl IntoView {
    view! {
        <div class="model-info-wrapper">
            {move || {
                let placeholder = placeholder.clone();
                match view.get() {
                    InfoView::Idle => view! { <></> }.into_any(),
                    InfoView::Error { title, message } | InfoView::Missing { title, message } => {
                        view! {
                            <div class="model-info">
                                <h3 class="model-info-title">{title}</h3>
                                <div class="model-info-content">
                                    <div class="model-info-no-description">
                                        <p>{message}</p>
                                    </div>
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                    InfoView::Detail(detail) => {
                        view! { <ModelDetailView detail image_index placeholder /> }.into_any()
                    }
                }
            }}
        </div>
    }
}

#[component]
fn ModelDetailView(
    detail: DetailView,
    image_index: RwSignal<usize>,
    placeholder: String,
) -> impl IntoView {
    let DetailView {
        title,
        description,
        no_description,
        images_label,
        no_images,
        images,
        link_3d,
        view_3d_label,
        confirm_3d,
    } = detail;
    let count = images.len();
    let gallery = images.clone();
    let fallback = placeholder.clone();
    let current_src = move || {
        gallery
            .get(image_index.get())
            .cloned()
            .unwrap_or_else(|| placeholder.clone())
    };
    let prev = move |_| step_gallery(image_index, count, -1);
    let next = move |_| step_gallery(image_index, count, 1);
    let open_3d = link_3d.map(|url| {
        let prompt = confirm_3d;
        move |_| confirm_and_open(&url, &prompt)
    });

    view! {
        <div class="model-info">
            <h3 class="model-info-title">{title}</h3>
            <div class="model-info-content">
                {match description {
                    Some(text) => {
                        view! { <div class="model-info-description">{text}</div> }.into_any()
                    }
                    None => {
                        view! { <div class="model-info-no-description">{no_description}</div> }
                            .into_any()
                    }
                }}
                {if images.is_empty() {
                    view! { <div class="model-info-no-images">{no_images}</div> }.into_any()
                } else {
                    view! {
                        <div class="model-info-gallery">
                            <span class="model-info-gallery-label">{images_label}</span>
                            <div class="model-info-gallery-container">
                                <img
                                    class="model-info-gallery-image"
                                    src=current_src
                                    on:error=move |ev: web_sys::ErrorEvent| {
                                        let target = ev
                                            .target()
                                            .and_then(|t| {
                                                t.dyn_into::<web_sys::HtmlImageElement>().ok()
                                            });
                                        if let Some(img) = target {
                                            if img.get_attribute("src").as_deref()
                                                != Some(fallback.as_str())
                                            {
                                                img.set_src(&fallback);
                                            }
                                        }
                                    }
                                />
                                {(count > 1)
                                    .then(|| view! {
                                        <button
                                            class="model-info-gallery-nav prev"
                                            on:click=prev
                                        >
                                            "❮"
                                        </button>
                                        <button
                                            class="model-info-gallery-nav next"
                                            on:click=next
                                        >
                                            "❯"
                                        </button>
                                        <div class="model-info-gallery-counter">
                                            {move || format!("{} / {count}", image_index.get() + 1)}
                                        </div>
                                    })}
                            </div>
                        </div>
                    }
                    .into_any()
                }}
                {open_3d.map(|handler| view! {
                    <button class="model-info-3d-link" on:click=handler>
                        {view_3d_label}
                    </button>
                })}
            </div>
        </div>
    }
}

/// JS-facing handle of the model-info widget.
#[wasm_bindgen]
pub struct ModelInfoHandle {
    widget: ModelInfoWidget,
}

#[wasm_bindgen]
impl ModelInfoHandle {
    pub fn show(&self) {
        self.widget.show();
    }

    pub fn hide(&self) {
        self.widget.hide();
    }

    pub fn dispose(&self) {
        self.widget.dispose();
    }
}

#[wasm_bindgen(js_name = initModelInfo)]
pub async fn init_model_info() -> Result<ModelInfoHandle, JsValue> {
    match ModelInfoWidget::init(ModelInfoConfig::default()).await {
        Ok(widget) => Ok(ModelInfoHandle { widget }),
        Err(error) => {
            log::error!(target: "model-info", "initialization failed: {error}");
            Err(JsValue::from_str(&error.to_string()))
        }
    }
}
