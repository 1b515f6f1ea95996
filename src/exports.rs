//! wasm entry: bootstrap on module load plus the functions page scripts call.
//!
//! ```js
//! import init, { markCompleted, loadProgress } from "./lesson_progress.js";
//! await init();
//! markCompleted("lesson-03");
//! loadProgress(); // { "lesson-03": "completed", ... }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::LevelFilter;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::{self, BrowserTracker};
use crate::logging;
use crate::status::LessonId;
use crate::store::LocalStorage;

thread_local! {
    static TRACKER: RefCell<Option<Rc<BrowserTracker>>> = const { RefCell::new(None) };
}

fn tracker() -> Result<Rc<BrowserTracker>, JsValue> {
    TRACKER
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("lesson-progress is not initialized"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Warn);

    let document = dom::document()?;
    let config = dom::read_config(&document);
    logging::init(config.log_level());

    let tracker = Rc::new(BrowserTracker::new(LocalStorage, config));
    TRACKER.with(|slot| *slot.borrow_mut() = Some(tracker.clone()));

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            run_logged(tracker.clone());
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        run_logged(tracker);
    }
    Ok(())
}

fn run_logged(tracker: Rc<BrowserTracker>) {
    if let Err(e) = dom::run(tracker) {
        log::error!("tracker failed to start: {e:?}");
    }
}

fn parse_lesson(lesson_id: &str) -> Option<LessonId> {
    match lesson_id.parse() {
        Ok(lesson) => Some(lesson),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

#[wasm_bindgen(js_name = markStarted)]
pub fn mark_started(lesson_id: &str) -> Result<(), JsValue> {
    let Some(lesson) = parse_lesson(lesson_id) else {
        return Ok(());
    };
    tracker()?.mark_started(&lesson);
    Ok(())
}

/// Marks the lesson completed and refreshes its indicator and the progress bar.
#[wasm_bindgen(js_name = markCompleted)]
pub fn mark_completed(lesson_id: &str) -> Result<(), JsValue> {
    let Some(lesson) = parse_lesson(lesson_id) else {
        return Ok(());
    };
    let tracker = tracker()?;
    tracker.mark_completed(&lesson);
    dom::show_completed(&tracker, &lesson, &tracker.summary())
}

/// Plain object of lesson id to status string.
#[wasm_bindgen(js_name = loadProgress)]
pub fn load_progress() -> Result<JsValue, JsValue> {
    let object = js_sys::Object::new();
    for (lesson, status) in tracker()?.load_progress().iter() {
        js_sys::Reflect::set(
            &object,
            &JsValue::from_str(lesson.as_str()),
            &JsValue::from_str(status.as_str()),
        )?;
    }
    Ok(object.into())
}

#[wasm_bindgen(js_name = progressPercent)]
pub fn progress_percent() -> Result<u32, JsValue> {
    Ok(tracker()?.summary().percent())
}
