use crate::dnd::{DropPlacement, DropTarget};
use crate::state::AppContext;
use icons::{ChevronDown, ChevronRight};
use leptos::logging::warn;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

type DragOver = RwSignal<Option<(u64, DropPlacement)>>;

fn dragged_id(ev: &web_sys::DragEvent) -> Option<u64> {
    ev.data_transfer()
        .and_then(|dt| dt.get_data("text/plain").ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Placement from the cursor position inside the row under it.
fn placement_for(ev: &web_sys::DragEvent) -> DropPlacement {
    ev.current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.get_bounding_client_rect())
        .map(|rect| DropPlacement::from_offset(ev.client_y() as f64 - rect.top(), rect.height()))
        .unwrap_or(DropPlacement::Inside)
}

#[component]
pub fn NavTreeView() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let tree = app_state.0.tree;
    let state_sv = StoredValue::new(app_state.0.clone());

    let drag_over: DragOver = RwSignal::new(None);
    let over_root: RwSignal<bool> = RwSignal::new(false);

    let export_json = move || {
        tree.with(|t| t.to_json_pretty())
            .unwrap_or_else(|e| format!("export failed: {e}"))
    };

    view! {
        <div class="flex flex-col gap-2">
            <h3 class="text-sm font-semibold">"Tree"</h3>

            // Rows stop propagation, so only drops outside any row land here.
            <div
                class=move || {
                    if over_root.get() {
                        "min-h-16 rounded-md pb-8 ring-1 ring-primary/30"
                    } else {
                        "min-h-16 rounded-md pb-8"
                    }
                }
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    over_root.set(true);
                    drag_over.set(None);
                }
                on:dragleave=move |_ev: web_sys::DragEvent| over_root.set(false)
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    over_root.set(false);
                    let Some(id) = dragged_id(&ev) else {
                        return;
                    };
                    state_sv.with_value(|s| s.apply_drop(id, DropTarget::RootEnd));
                }
            >
                {move || {
                    let root_ids = tree.with(|t| t.roots().iter().map(|n| n.id).collect::<Vec<u64>>());

                    if root_ids.is_empty() {
                        let empty_text = if tree.with(|t| t.is_empty()) {
                            "No items"
                        } else {
                            "No top-level items"
                        };
                        view! { <div class="text-xs text-muted-foreground">{empty_text}</div> }
                            .into_any()
                    } else {
                        let root_ids_sv = StoredValue::new(root_ids);
                        view! {
                            <ul class="space-y-2">
                                <For
                                    each=move || root_ids_sv.get_value()
                                    key=|id| *id
                                    children=move |id| {
                                        view! { <NavTreeRow item_id=id drag_over=drag_over /> }
                                    }
                                />
                            </ul>
                        }
                        .into_any()
                    }
                }}
            </div>

            <details class="text-xs text-muted-foreground">
                <summary class="cursor-pointer select-none">
                    {move || format!("Export ({} items)", tree.with(|t| t.len()))}
                </summary>
                <pre class="mt-2 max-h-64 overflow-auto rounded-md border p-2">{export_json}</pre>
            </details>
        </div>
    }
}

#[component]
pub fn NavTreeRow(item_id: u64, drag_over: DragOver) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let tree = app_state.0.tree;
    let open_ids = app_state.0.open_ids;
    let session = app_state.0.session;
    let indent_px = app_state.0.config.indent_px as usize;
    let state_sv = StoredValue::new(app_state.0.clone());

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        state_sv.with_value(|s| {
            s.toggle_open(item_id);
            s.select(item_id);
        });
    };

    let row_class = move || {
        let mut class = String::from(
            "flex cursor-pointer flex-col rounded border bg-card px-3 py-2 transition-colors hover:bg-accent/60",
        );
        if session.with(|s| s.selected == Some(item_id)) {
            class.push_str(" bg-primary/10 ring-1 ring-primary/30");
        }
        match drag_over.get() {
            Some((id, DropPlacement::Before)) if id == item_id => class.push_str(" border-t-2 border-t-primary"),
            Some((id, DropPlacement::After)) if id == item_id => class.push_str(" border-b-2 border-b-primary"),
            Some((id, DropPlacement::Inside)) if id == item_id => class.push_str(" ring-2 ring-primary/50"),
            _ => {}
        }
        class
    };

    view! {
        <li>
            {move || {
                let Some(n) = tree.with(|t| t.get(item_id).cloned()) else {
                    return ().into_view().into_any();
                };

                let depth = tree.with(|t| t.depth_of(item_id));
                let is_open = open_ids.with(|o| o.contains(&item_id));
                let kid_ids = tree.with(|t| {
                    t.children_of(item_id).iter().map(|c| c.id).collect::<Vec<u64>>()
                });

                let chevron = if !n.droppable {
                    ().into_view().into_any()
                } else if is_open {
                    view! { <ChevronDown class="size-4 text-muted-foreground" /> }.into_any()
                } else {
                    view! { <ChevronRight class="size-4 text-muted-foreground" /> }.into_any()
                };

                let children_view = if is_open && !kid_ids.is_empty() {
                    let kid_ids_sv = StoredValue::new(kid_ids);
                    view! {
                        <ul class="mt-2 space-y-2">
                            <For
                                each=move || kid_ids_sv.get_value()
                                key=|id| *id
                                children=move |id| {
                                    view! { <NavTreeRow item_id=id drag_over=drag_over /> }
                                }
                            />
                        </ul>
                    }
                    .into_any()
                } else {
                    ().into_view().into_any()
                };

                let path = n.display_path().to_string();
                let href = path.clone();

                view! {
                    <div>
                        <div
                            id=format!("nav-item-{}", item_id)
                            style=format!("margin-left: {}px", depth * indent_px)
                            class=row_class
                            data-drop=move || {
                                drag_over
                                    .get()
                                    .filter(|(id, _)| *id == item_id)
                                    .map(|(_, p)| p.as_ref().to_string())
                                    .unwrap_or_default()
                            }
                            draggable="true"
                            on:click=on_click
                            on:dragstart=move |ev: web_sys::DragEvent| {
                                ev.stop_propagation();
                                if let Some(dt) = ev.data_transfer() {
                                    if let Err(e) = dt.set_data("text/plain", &item_id.to_string()) {
                                        warn!("drag of item {item_id} could not set payload: {e:?}");
                                    }
                                    dt.set_effect_allowed("move");
                                }
                            }
                            on:dragover=move |ev: web_sys::DragEvent| {
                                ev.prevent_default();
                                ev.stop_propagation();
                                let placement = placement_for(&ev);
                                if drag_over.get_untracked() != Some((item_id, placement)) {
                                    drag_over.set(Some((item_id, placement)));
                                }
                                if let Some(dt) = ev.data_transfer() {
                                    dt.set_drop_effect("move");
                                }
                            }
                            on:dragleave=move |_ev: web_sys::DragEvent| {
                                if drag_over.get_untracked().map(|(id, _)| id) == Some(item_id) {
                                    drag_over.set(None);
                                }
                            }
                            on:dragend=move |_ev: web_sys::DragEvent| drag_over.set(None)
                            on:drop=move |ev: web_sys::DragEvent| {
                                ev.prevent_default();
                                ev.stop_propagation();
                                drag_over.set(None);

                                let Some(dragged) = dragged_id(&ev) else {
                                    return;
                                };
                                let target = DropTarget::Node {
                                    id: item_id,
                                    placement: placement_for(&ev),
                                };
                                state_sv.with_value(|s| s.apply_drop(dragged, target));
                            }
                        >
                            <div class="flex items-center gap-2">
                                {chevron}
                                <span class="text-sm">{n.text.clone()}</span>
                            </div>
                            <a
                                href=href
                                class="ml-6 mt-0.5 w-fit text-xs text-primary hover:underline"
                                on:click=move |ev: web_sys::MouseEvent| ev.prevent_default()
                            >
                                {path}
                            </a>
                        </div>

                        {children_view}
                    </div>
                }
                .into_any()
            }}
        </li>
    }
}
