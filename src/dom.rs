//! DOM side of the tracker: reads page markers and scroll positions, writes
//! indicators and the progress bar.
//!
//! All decisions are made by [`Tracker`]; this module only moves values
//! between it and `web_sys`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::{Selectors, TrackerConfig, CONFIG_ELEMENT_ID};
use crate::indicator::{Indicator, ICON_CLASS, INDICATOR_TAG};
use crate::latch::{LatchState, ScrollMetrics};
use crate::page::{PageMarkers, PageMode};
use crate::status::LessonId;
use crate::store::LocalStorage;
use crate::summary::ProgressSummary;
use crate::tracker::Tracker;

pub type BrowserTracker = Tracker<LocalStorage>;

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Config from the inline JSON element, or defaults.
pub fn read_config(document: &Document) -> TrackerConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return TrackerConfig::default();
    };
    TrackerConfig::from_json(&json).unwrap_or_else(|e| {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
        TrackerConfig::default()
    })
}

/// Detect the page mode and start the matching behaviour.
pub fn run(tracker: Rc<BrowserTracker>) -> Result<(), JsValue> {
    let window = window()?;
    let document = document()?;
    let selectors = &tracker.config().selectors;

    let entries = document.query_selector_all(&selectors.lesson_entry)?;
    let has_lesson_container = document
        .query_selector(&selectors.lesson_container)?
        .is_some();
    let path = window.location().pathname()?;

    let mode = PageMode::detect(&PageMarkers {
        lesson_entries: entries.length() as usize,
        has_lesson_container,
        path: &path,
    });
    log::debug!("page mode for {path}: {mode:?}");

    let listing_entries = mode.listing_entries();
    if listing_entries > 0 {
        let mut elements = Vec::with_capacity(listing_entries);
        for i in 0..listing_entries as u32 {
            if let Some(node) = entries.item(i) {
                elements.push(node.dyn_into::<Element>()?);
            }
        }
        render_listing(&document, &elements, tracker.clone())?;
    }

    match mode {
        PageMode::Lesson { lesson, .. } => watch_lesson(&window, lesson, tracker),
        PageMode::Listing { .. } | PageMode::Neither => Ok(()),
    }
}

fn render_listing(
    document: &Document,
    entries: &[Element],
    tracker: Rc<BrowserTracker>,
) -> Result<(), JsValue> {
    let indicators = tracker.listing(entries.len());

    for (index, (entry, indicator)) in entries.iter().zip(&indicators).enumerate() {
        let el = document.create_element(INDICATOR_TAG)?;
        apply_indicator(document, &el, indicator)?;
        entry.append_child(&el)?;

        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new({
            let tracker = tracker.clone();
            move |_event: web_sys::Event| {
                tracker.select_entry(index);
            }
        });
        entry.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // Lives as long as the page.
        on_click.forget();
    }

    render_progress_bar(document, &tracker.config().selectors, &tracker.summary())
}

fn watch_lesson(
    window: &Window,
    lesson: LessonId,
    tracker: Rc<BrowserTracker>,
) -> Result<(), JsValue> {
    let session = Rc::new(RefCell::new(tracker.begin_lesson(lesson)));

    let on_scroll = Closure::<dyn FnMut(web_sys::Event)>::new({
        let session = session.clone();
        move |_event: web_sys::Event| {
            if session.borrow().latch_state() == LatchState::Triggered {
                return;
            }
            let metrics = match scroll_metrics() {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("could not read scroll position: {e:?}");
                    return;
                }
            };
            let mut session = session.borrow_mut();
            if let Some(summary) = tracker.observe_scroll(&mut session, &metrics) {
                if let Err(e) = show_completed(&tracker, session.lesson(), &summary) {
                    log::warn!("could not update completed lesson: {e:?}");
                }
            }
        }
    });
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}

fn scroll_metrics() -> Result<ScrollMetrics, JsValue> {
    let window = window()?;
    let document_height = document()?
        .document_element()
        .map(|root| root.scroll_height() as f64)
        .unwrap_or_default();
    Ok(ScrollMetrics {
        scroll_top: window.scroll_y()?,
        viewport_height: window.inner_height()?.as_f64().unwrap_or_default(),
        document_height,
    })
}

/// Restyle the lesson's indicator, if one is in the document, and refresh the bar.
pub fn show_completed(
    tracker: &BrowserTracker,
    lesson: &LessonId,
    summary: &ProgressSummary,
) -> Result<(), JsValue> {
    let document = document()?;
    if let Some(el) = document.query_selector(&Indicator::selector_for(lesson))? {
        apply_indicator(&document, &el, &Indicator::completed(lesson.clone()))?;
    }
    render_progress_bar(&document, &tracker.config().selectors, summary)
}

/// Copy the indicator's attributes onto `el` and put its glyph in the
/// `.progress-icon` child, creating the child on first render.
fn apply_indicator(document: &Document, el: &Element, indicator: &Indicator) -> Result<(), JsValue> {
    for (name, value) in indicator.attributes() {
        el.set_attribute(name, &value)?;
    }
    let icon = match el.query_selector(&format!(".{ICON_CLASS}"))? {
        Some(icon) => icon,
        None => {
            let icon = document.create_element("span")?;
            icon.set_class_name(ICON_CLASS);
            icon.set_attribute("aria-hidden", "true")?;
            el.append_child(&icon)?;
            icon
        }
    };
    icon.set_text_content(Some(indicator.glyph()));
    Ok(())
}

/// Update whichever of the container's fill and text elements exist.
/// No-op without the container.
pub fn render_progress_bar(
    document: &Document,
    selectors: &Selectors,
    summary: &ProgressSummary,
) -> Result<(), JsValue> {
    let Some(container) = document.query_selector(&selectors.progress_container)? else {
        return Ok(());
    };

    if let Some(fill) = container.query_selector(&selectors.progress_fill)? {
        if let Some(fill) = fill.dyn_ref::<HtmlElement>() {
            fill.style().set_property("width", &summary.fill_width())?;
        }
        fill.set_attribute("aria-valuenow", &summary.percent().to_string())?;
    }
    if let Some(text) = container.query_selector(&selectors.progress_text)? {
        text.set_text_content(Some(&summary.message()));
    }
    Ok(())
}
