//! WASM entry point
//!
//! Trunk compiles this binary; it starts the page once the document is
//! parsed.

fn main() {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    folio_ui::boot();
}
