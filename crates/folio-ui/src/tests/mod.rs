//! Browser tests for the page shell
//!
//! Run with: wasm-pack test --headless --firefox crates/folio-ui
//!
//! No animation engine is loaded in the test page, so every effect runs in
//! static mode and completes synchronously.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use wasm_bindgen_test::wasm_bindgen_test_configure;
use web_sys::Element;

use crate::dom;

wasm_bindgen_test_configure!(run_in_browser);

mod animator_test;
mod contact_test;
mod dom_test;
mod modal_test;

/// Markup appended to the body for one test and removed afterwards
pub struct Fixture {
    root: Element,
}

impl Fixture {
    pub fn new(html: &str) -> Self {
        let root = dom::document()
            .and_then(|doc| Ok(doc.create_element("div")?))
            .expect("fixture root");
        root.set_inner_html(html);
        dom::body()
            .expect("document body")
            .append_child(&root)
            .expect("fixture attached");
        Self { root }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

pub const MODAL_MARKUP: &str = r#"
<section id="projects" class="projects">
  <button id="opener" type="button">Open</button>
  <div class="grid"></div>
  <div id="project-modal" aria-hidden="true">
    <div class="overlay" data-close></div>
    <div class="dialog" role="dialog">
      <button class="close" type="button" aria-label="Close">x</button>
      <img class="modal-image" alt="">
      <div class="modal-body">
        <h3 class="modal-title"></h3>
        <p class="modal-desc"></p>
      </div>
    </div>
  </div>
  <p id="after-modal">after</p>
</section>
"#;
