mod components;
mod config;
mod dnd;
mod models;
mod panel;
mod state;
mod tree;
mod view;

use crate::components::ui::{Button, ButtonVariant};
use crate::panel::EditPanel;
use crate::state::{AppContext, AppState};
use crate::view::NavTreeView;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use wasm_bindgen::JsCast;

pub use crate::config::EnvConfig;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[component]
pub fn NavEditorPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state_sv = StoredValue::new(app_state.0.clone());

    let _key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();

        // Escape leaves edit mode, same as "Add new Item".
        if key == "Escape" {
            state_sv.with_value(|s| s.clear_selection());
            return;
        }

        // Avoid hijacking arrow keys while typing in inputs.
        let in_input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(|el| el.tag_name().eq_ignore_ascii_case("input"))
            .unwrap_or(false);
        if in_input {
            return;
        }

        match key.as_str() {
            "ArrowDown" => {
                ev.prevent_default();
                state_sv.with_value(|s| s.select_adjacent(true));
            }
            "ArrowUp" => {
                ev.prevent_default();
                state_sv.with_value(|s| s.select_adjacent(false));
            }
            _ => {}
        }
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-4 flex items-center justify-between">
                    <h1 class="text-xl font-semibold">"Navigation"</h1>
                    <Button
                        variant=ButtonVariant::Ghost
                        on:click=move |_| state_sv.with_value(|s| s.clear_selection())
                    >
                        "Add new Item"
                    </Button>
                </div>

                <div class="flex flex-col gap-8 md:flex-row">
                    <div class="flex-1">
                        <NavTreeView />
                    </div>
                    <div class="flex-1">
                        <EditPanel />
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - `use_location()`/router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=NavEditorPage />
            </Routes>
        </Router>
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
