//! The catalog widget shell.
//!
//! One `CatalogWidget` owns one engine instance plus every browser
//! resource attached to it: the mounted drawing root, the locale polling
//! interval, the search and resize debounce timers and the resize
//! listener. Instances are independent; constructing the artifacts, tower
//! and reconstruction widgets side by side shares nothing.

mod probe;
mod view;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use catalog::engine::{CatalogEngine, WidgetSnapshot};
use catalog::view::PanelView;
use catalog::{CatalogConfig, CatalogError, Debounce};
use contracts::catalog::{CatalogItem, Category};
use gloo_timers::callback::{Interval, Timeout};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::{api, host};
use self::view::{CatalogPanel, PanelActions};

struct WidgetState {
    config: CatalogConfig,
    engine: RefCell<CatalogEngine>,
    view: RwSignal<PanelView>,
    aspect: RwSignal<Option<f64>>,
    panel: RefCell<Option<HtmlElement>>,
    /// Latest search text typed; debounced callbacks read this instead of
    /// a snapshot closed over at arm time.
    pending_search: RefCell<String>,
    search_debounce: RefCell<Debounce>,
    resize_debounce: RefCell<Debounce>,
    search_timer: RefCell<Option<Timeout>>,
    resize_timer: RefCell<Option<Timeout>>,
    locale_timer: RefCell<Option<Interval>>,
    resize_listener: RefCell<Option<Closure<dyn FnMut()>>>,
    disposed: Cell<bool>,
}

pub struct CatalogWidget {
    state: Rc<WidgetState>,
}

impl CatalogWidget {
    /// Waits for the tour runtime (bounded), resolves the panel, mounts
    /// the drawing root and loads the data. Once the panel exists, load
    /// failures render as an error state inside it instead of aborting.
    pub async fn init(config: CatalogConfig) -> Result<CatalogWidget, CatalogError> {
        host::wait_until_ready(config.host_poll_ms, config.host_timeout_ms).await?;
        let panel = host::panel_by_name(&config.panel_name)
            .ok_or_else(|| CatalogError::PanelNotFound { name: config.panel_name.clone() })?;
        log::debug!(target: "catalog", "{}: panel resolved", config.panel_name);

        let mut engine = CatalogEngine::new(config.clone());
        if let Some(locale) = host::current_locale() {
            engine.set_locale(&locale);
        }
        let initial = engine.build_view();

        let state = Rc::new(WidgetState {
            config,
            engine: RefCell::new(engine),
            view: RwSignal::new(initial),
            aspect: RwSignal::new(None),
            panel: RefCell::new(Some(panel.clone())),
            pending_search: RefCell::new(String::new()),
            search_debounce: RefCell::new(Debounce::default()),
            resize_debounce: RefCell::new(Debounce::default()),
            search_timer: RefCell::new(None),
            resize_timer: RefCell::new(None),
            locale_timer: RefCell::new(None),
            resize_listener: RefCell::new(None),
            disposed: Cell::new(false),
        });

        mount(&state, panel);
        let widget = CatalogWidget { state };
        widget.load().await;
        widget.start_locale_watcher();
        widget.attach_resize_listener();
        Ok(widget)
    }

    async fn load(&self) {
        let state = &self.state;
        state.engine.borrow_mut().begin_loading();
        render(state);

        let loaded = async {
            // Categories load first: the filter bar needs their names
            // before the first full paint.
            let categories = match &state.config.category_url {
                Some(url) => api::fetch_list::<Category>(url).await?,
                None => Vec::new(),
            };
            let items = api::fetch_list::<CatalogItem>(&state.config.data_url).await?;
            Ok::<_, String>((items, categories))
        }
        .await;

        match loaded {
            Ok((items, categories)) => state.engine.borrow_mut().finish_loading(items, categories),
            Err(detail) => state.engine.borrow_mut().fail_loading(detail),
        }
        render(state);
    }

    /// Refetches the data and starts over on page 1 with cleared filters.
    pub fn reload(&self) {
        let state = self.state.clone();
        spawn_local(async move {
            if state.disposed.get() {
                return;
            }
            CatalogWidget { state }.load().await;
        });
    }

    pub fn select_category(&self, category_id: Option<String>) {
        // Selecting a category abandons any pending debounced search.
        cancel_pending_search(&self.state);
        self.state.engine.borrow_mut().set_category(category_id);
        render(&self.state);
    }

    /// Debounced path for keystrokes; the recompute fires after the quiet
    /// period unless superseded or flushed.
    pub fn search_input(&self, text: String) {
        let state = &self.state;
        *state.pending_search.borrow_mut() = text;
        let token = state.search_debounce.borrow_mut().arm();
        if let Some(timer) = state.search_timer.borrow_mut().take() {
            timer.cancel();
        }
        let fired = state.clone();
        let timer = Timeout::new(state.config.search_debounce_ms, move || {
            if fired.disposed.get() {
                return;
            }
            if fired.search_debounce.borrow_mut().fire(token) {
                let text = fired.pending_search.borrow().clone();
                fired.engine.borrow_mut().set_search(&text);
                render(&fired);
            }
        });
        *state.search_timer.borrow_mut() = Some(timer);
    }

    /// Immediate path (Enter key, public `search()` API).
    pub fn search_now(&self, text: String) {
        cancel_pending_search(&self.state);
        self.state.engine.borrow_mut().set_search(&text);
        render(&self.state);
    }

    pub fn clear_search(&self) {
        self.search_now(String::new());
    }

    pub fn reset(&self) {
        cancel_pending_search(&self.state);
        self.state.engine.borrow_mut().reset_filters();
        render(&self.state);
    }

    pub fn go_to_page(&self, page: usize) {
        if self.state.engine.borrow_mut().go_to_page(page) {
            render(&self.state);
            scroll_top(&self.state);
        }
    }

    pub fn next_page(&self) {
        if self.state.engine.borrow_mut().next_page() {
            render(&self.state);
            scroll_top(&self.state);
        }
    }

    pub fn prev_page(&self) {
        if self.state.engine.borrow_mut().prev_page() {
            render(&self.state);
            scroll_top(&self.state);
        }
    }

    /// Reopens the panel with cleared filters, as the player's open action
    /// expects a fresh view.
    pub fn open(&self) {
        cancel_pending_search(&self.state);
        self.state.engine.borrow_mut().reset_filters();
        render(&self.state);
        if let Some(panel) = self.state.panel.borrow().as_ref() {
            let style = panel.style();
            _ = style.set_property("display", "block");
            _ = style.set_property("opacity", "1");
            _ = style.set_property("pointer-events", "auto");
            _ = style.set_property("touch-action", "auto");
        }
        scroll_top(&self.state);
    }

    pub fn close(&self) {
        if let Some(panel) = self.state.panel.borrow().as_ref() {
            _ = panel.style().set_property("display", "none");
        }
    }

    pub fn start_locale_watcher(&self) {
        // A second start must not stack a second interval.
        if self.state.locale_timer.borrow().is_some() {
            return;
        }
        let state = self.state.clone();
        let interval = Interval::new(self.state.config.locale_poll_ms, move || {
            if state.disposed.get() {
                return;
            }
            let Some(locale) = host::current_locale() else { return };
            if state.engine.borrow_mut().set_locale(&locale) {
                // Same data, same filter, same page; only labels change.
                render(&state);
            }
        });
        *self.state.locale_timer.borrow_mut() = Some(interval);
    }

    pub fn stop_locale_watcher(&self) {
        if let Some(interval) = self.state.locale_timer.borrow_mut().take() {
            interval.cancel();
        }
    }

    fn attach_resize_listener(&self) {
        let state = self.state.clone();
        let listener = Closure::<dyn FnMut()>::new(move || on_resize(&state));
        if let Some(window) = web_sys::window() {
            _ = window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        *self.state.resize_listener.borrow_mut() = Some(listener);
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        self.state.engine.borrow().snapshot()
    }

    pub fn dispose(&self) {
        self.state.disposed.set(true);
        if let Some(timer) = self.state.search_timer.borrow_mut().take() {
            timer.cancel();
        }
        if let Some(timer) = self.state.resize_timer.borrow_mut().take() {
            timer.cancel();
        }
        self.stop_locale_watcher();
        if let Some(listener) = self.state.resize_listener.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                _ = window
                    .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            }
        }
    }
}

fn cancel_pending_search(state: &Rc<WidgetState>) {
    if let Some(timer) = state.search_timer.borrow_mut().take() {
        timer.cancel();
    }
    state.search_debounce.borrow_mut().flush();
}

fn render(state: &Rc<WidgetState>) {
    if let Some(panel) = state.panel.borrow().as_ref() {
        // A detached panel means the player replaced it; mutating it would
        // fight the new owner.
        if !panel.is_connected() {
            return;
        }
    }
    let tree = state.engine.borrow().build_view();
    state.view.set(tree);
    schedule_probe(state.clone());
}

fn scroll_top(state: &Rc<WidgetState>) {
    if let Some(panel) = state.panel.borrow().as_ref() {
        probe::scroll_to_top(panel);
    }
}

fn on_resize(state: &Rc<WidgetState>) {
    let token = state.resize_debounce.borrow_mut().arm();
    if let Some(timer) = state.resize_timer.borrow_mut().take() {
        timer.cancel();
    }
    let fired = state.clone();
    let timer = Timeout::new(state.config.resize_debounce_ms, move || {
        if fired.disposed.get() {
            return;
        }
        if fired.resize_debounce.borrow_mut().fire(token) {
            fired.engine.borrow_mut().arm_probe();
            run_probe(&fired);
        }
    });
    *state.resize_timer.borrow_mut() = Some(timer);
}

/// Measures after a short settle delay so the grid has painted.
fn schedule_probe(state: Rc<WidgetState>) {
    let settle = state.config.settle_delay_ms;
    spawn_local(async move {
        TimeoutFuture::new(settle).await;
        if state.disposed.get() {
            return;
        }
        run_probe(&state);
    });
}

fn run_probe(state: &Rc<WidgetState>) {
    let panel = match state.panel.borrow().as_ref() {
        Some(panel) if panel.is_connected() => panel.clone(),
        _ => return,
    };
    let Some(measurement) = probe::measure(&panel) else {
        return;
    };
    let resized = state.engine.borrow_mut().apply_measured_page_size(&measurement);
    if resized {
        // The one extra render this trigger is allowed; the engine has
        // consumed its probe arming, so this pass cannot resize again.
        let tree = state.engine.borrow().build_view();
        state.view.set(tree);
    }
    let measurement = if resized {
        match probe::measure(&panel) {
            Some(fresh) => fresh,
            None => return,
        }
    } else {
        measurement
    };
    if let Some(percent) = state.engine.borrow().image_aspect_percent(&measurement) {
        state.aspect.set(Some(percent));
    }
}

fn mount(state: &Rc<WidgetState>, panel: HtmlElement) {
    // The panel may carry player-generated content; the widget owns it
    // exclusively from here on.
    panel.set_inner_html("");
    let actions = panel_actions(state);
    let view = state.view;
    let aspect = state.aspect;
    let handle = leptos::mount::mount_to(panel, move || view! { <CatalogPanel view aspect actions /> });
    handle.forget();
}

fn panel_actions(state: &Rc<WidgetState>) -> PanelActions {
    fn widget(state: &Rc<WidgetState>) -> CatalogWidget {
        CatalogWidget { state: state.clone() }
    }
    PanelActions {
        select_category: {
            let w = widget(state);
            UnsyncCallback::new(move |id| w.select_category(id))
        },
        search_input: {
            let w = widget(state);
            UnsyncCallback::new(move |text| w.search_input(text))
        },
        search_submit: {
            let w = widget(state);
            UnsyncCallback::new(move |text| w.search_now(text))
        },
        clear_search: {
            let w = widget(state);
            UnsyncCallback::new(move |_| w.clear_search())
        },
        go_to_page: {
            let w = widget(state);
            UnsyncCallback::new(move |page| w.go_to_page(page))
        },
        prev_page: {
            let w = widget(state);
            UnsyncCallback::new(move |_| w.prev_page())
        },
        next_page: {
            let w = widget(state);
            UnsyncCallback::new(move |_| w.next_page())
        },
        open_card: {
            let state = state.clone();
            UnsyncCallback::new(move |media_id| open_card(&state, media_id))
        },
    }
}

fn open_card(state: &Rc<WidgetState>, media_id: String) {
    match host::navigate_to_media(&media_id) {
        Ok(()) => {
            log::debug!(target: "catalog", "opened media {media_id}");
            if let Some(panel) = state.panel.borrow().as_ref() {
                _ = panel.style().set_property("display", "none");
            }
        }
        Err(detail) => log::error!(target: "catalog", "{detail}"),
    }
}

/// JS-facing handle of one catalog widget.
#[wasm_bindgen]
pub struct CatalogHandle {
    widget: CatalogWidget,
}

#[wasm_bindgen]
impl CatalogHandle {
    pub fn reload(&self) {
        self.widget.reload();
    }

    #[wasm_bindgen(js_name = filterByCategory)]
    pub fn filter_by_category(&self, category_id: Option<String>) {
        self.widget.select_category(category_id);
    }

    pub fn search(&self, text: String) {
        self.widget.search_now(text);
    }

    pub fn reset(&self) {
        self.widget.reset();
    }

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&self, page: usize) {
        self.widget.go_to_page(page);
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&self) {
        self.widget.next_page();
    }

    #[wasm_bindgen(js_name = prevPage)]
    pub fn prev_page(&self) {
        self.widget.prev_page();
    }

    pub fn open(&self) {
        self.widget.open();
    }

    pub fn close(&self) {
        self.widget.close();
    }

    pub fn dispose(&self) {
        self.widget.dispose();
    }

    /// Read-only diagnostics snapshot.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.widget.snapshot()).unwrap_or(JsValue::NULL)
    }
}

async fn init_catalog(config: CatalogConfig) -> Result<CatalogHandle, JsValue> {
    match CatalogWidget::init(config).await {
        Ok(widget) => Ok(CatalogHandle { widget }),
        Err(error) => {
            log::error!(target: "catalog", "initialization failed: {error}");
            Err(JsValue::from_str(&error.to_string()))
        }
    }
}

#[wasm_bindgen(js_name = initArtifacts)]
pub async fn init_artifacts() -> Result<CatalogHandle, JsValue> {
    init_catalog(CatalogConfig::artifacts()).await
}

#[wasm_bindgen(js_name = initTowers)]
pub async fn init_towers() -> Result<CatalogHandle, JsValue> {
    init_catalog(CatalogConfig::towers()).await
}

#[wasm_bindgen(js_name = initReconstructions)]
pub async fn init_reconstructions() -> Result<CatalogHandle, JsValue> {
    init_catalog(CatalogConfig::reconstructions()).await
}
