//! Lint: keep browser bindings out of the logic modules.
//!
//! Only `dom.rs` and `exports.rs` (wasm32-only) may talk to the browser
//! directly. `store.rs` and `logging.rs` may too, but only inside items gated
//! with `#[cfg(target_arch = "wasm32")]`. Everything else must stay plain
//! Rust so it builds and tests natively.
//!
//! A second lint covers `dom.rs` itself: the progress bar's fill and text are
//! looked up inside the bar container, never across the whole document, so
//! other `.progress-bar-fill` / `.progress-text` elements on the page are left
//! alone.

use std::fs;
use std::path::Path;

const BROWSER_CRATES: [&str; 3] = ["web_sys", "wasm_bindgen", "js_sys"];

const BROWSER_MODULES: [&str; 2] = ["dom.rs", "exports.rs"];

const GATED_MODULES: [&str; 2] = ["store.rs", "logging.rs"];

fn mentions_browser_crate(line: &str) -> bool {
    BROWSER_CRATES.iter().any(|c| line.contains(&format!("{c}::")))
}

/// Lines referencing a browser crate outside a wasm32-gated item.
///
/// A gate covers the item that follows it, up to the line where braces
/// balance again.
fn find_ungated_uses(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();
    let mut gate_pending = false;
    let mut depth: i32 = 0;
    let mut gated_until_depth: Option<i32> = None;

    for (line_num_0, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }

        if trimmed.starts_with("#[cfg(target_arch = \"wasm32\")]") {
            gate_pending = true;
            continue;
        }

        if gate_pending && !trimmed.starts_with("#[") {
            gated_until_depth = Some(depth);
            gate_pending = false;
        }

        if gated_until_depth.is_none() && mentions_browser_crate(line) {
            violations.push((line_num_0 + 1, trimmed.to_string()));
        }

        depth += line.matches('{').count() as i32;
        depth -= line.matches('}').count() as i32;

        if let Some(until) = gated_until_depth {
            if depth <= until && (line.contains('}') || line.ends_with(';')) {
                gated_until_depth = None;
            }
        }
    }

    violations
}

const NESTED_BAR_SELECTORS: [&str; 2] = ["selectors.progress_fill", "selectors.progress_text"];

/// Lines that query a progress bar child selector on anything but `container`.
fn find_unscoped_bar_queries(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && line.contains("query_selector")
                && NESTED_BAR_SELECTORS.iter().any(|s| line.contains(s))
                && !line.contains("container.query_selector(")
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

#[test]
fn progress_bar_children_are_scoped_to_container() {
    let dom = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/dom.rs");
    let source = fs::read_to_string(&dom).unwrap_or_else(|e| panic!("cannot read dom.rs: {e}"));

    let bar_queries = source
        .lines()
        .filter(|l| NESTED_BAR_SELECTORS.iter().any(|s| l.contains(s)))
        .count();
    assert_eq!(bar_queries, 2, "expected one fill and one text lookup in dom.rs");

    let violations = find_unscoped_bar_queries(&source);
    if !violations.is_empty() {
        let mut msg = String::from(
            "Progress bar fill/text must be queried on the bar container.\n\n",
        );
        for (line_num, line) in &violations {
            msg.push_str(&format!("  src/dom.rs:{}: {}\n", line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn logic_modules_do_not_touch_the_browser() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut all_violations = Vec::new();

    let Ok(entries) = fs::read_dir(&src) else {
        panic!("cannot read {}", src.display());
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".rs") || BROWSER_MODULES.contains(&name) {
            continue;
        }
        let Ok(source) = fs::read_to_string(&path) else {
            continue;
        };
        let violations = if GATED_MODULES.contains(&name) {
            find_ungated_uses(&source)
        } else {
            source
                .lines()
                .enumerate()
                .filter(|(_, l)| !l.trim().starts_with("//") && mentions_browser_crate(l))
                .map(|(i, l)| (i + 1, l.trim().to_string()))
                .collect()
        };
        for (line_num, line) in violations {
            all_violations.push((name.to_string(), line_num, line));
        }
    }

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Browser bindings used outside dom.rs/exports.rs or a wasm32 gate.\n\
             Move the call into the DOM layer or gate it with #[cfg(target_arch = \"wasm32\")].\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  src/{}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_function_is_allowed() {
        let source = r#"
#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&line.into());
}
"#;
        assert!(find_ungated_uses(source).is_empty());
    }

    #[test]
    fn gated_impl_with_attributes_is_allowed() {
        let source = r#"
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
impl Store {
    fn get(&self) {
        web_sys::window();
    }
}
"#;
        assert!(find_ungated_uses(source).is_empty());
    }

    #[test]
    fn gate_ends_with_item() {
        let source = r#"
#[cfg(target_arch = "wasm32")]
fn a() {
    web_sys::window();
}

fn b() {
    web_sys::window();
}
"#;
        let violations = find_ungated_uses(source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].0, 8);
    }

    #[test]
    fn ungated_use_is_flagged() {
        let violations = find_ungated_uses("fn f() { js_sys::Date::now(); }");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn document_wide_bar_query_is_flagged() {
        let source = r#"
    if let Some(fill) = document.query_selector(&selectors.progress_fill)? {
    if let Some(text) = container.query_selector(&selectors.progress_text)? {
"#;
        let violations = find_unscoped_bar_queries(source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].0, 2);
    }

    #[test]
    fn container_query_is_allowed() {
        let source = "let fill = container.query_selector(&selectors.progress_fill)?;";
        assert!(find_unscoped_bar_queries(source).is_empty());
    }

    #[test]
    fn comments_are_ignored() {
        assert!(find_ungated_uses("// web_sys::window()").is_empty());
    }
}
