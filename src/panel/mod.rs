use crate::components::hooks::use_random::use_random_id_for;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardSubtitle, CardTitle,
    Input, Label, Separator,
};
use crate::state::{AppContext, EditSession};
use leptos::prelude::*;

/// Label + input pair bound to one string field of the edit session.
#[component]
fn SessionField(
    label: &'static str,
    placeholder: &'static str,
    read: fn(&EditSession) -> String,
    write: fn(&mut EditSession, String),
) -> impl IntoView {
    let session = expect_context::<AppContext>().0.session;
    let id = use_random_id_for("field");

    view! {
        <div class="flex flex-col gap-2">
            <Label html_for=id.clone()>{label}</Label>
            <Input
                id=id
                placeholder=placeholder
                value=Signal::derive(move || session.with(read))
                on_value=Callback::new(move |v: String| session.update(|s| write(s, v)))
            />
        </div>
    }
}

#[component]
pub fn EditPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let tree = app_state.0.tree;
    let session = app_state.0.session;
    let state_sv = StoredValue::new(app_state.0.clone());

    let has_selection = move || tree.with(|t| session.with(|s| s.selected_node(t).is_some()));
    let heading = move || tree.with(|t| session.with(|s| s.heading(t)));
    let add_label = move || tree.with(|t| session.with(|s| s.add_label(t)));

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-base">{heading}</CardTitle>
            </CardHeader>

            <CardContent>
                <Show when=has_selection fallback=|| ().into_view()>
                    <SessionField
                        label="Name"
                        placeholder="Item name"
                        read=|s| s.edit_text.clone()
                        write=|s, v| s.edit_text = v
                    />
                    <SessionField
                        label="Path"
                        placeholder="#"
                        read=|s| s.edit_path.clone()
                        write=|s, v| s.edit_path = v
                    />
                    <Button
                        size=ButtonSize::Sm
                        on:click=move |_| state_sv.with_value(|s| s.save())
                    >
                        "Save Changes"
                    </Button>
                    <Separator />
                </Show>

                <CardSubtitle>{add_label}</CardSubtitle>
                <SessionField
                    label="Name"
                    placeholder="New item name"
                    read=|s| s.child_text.clone()
                    write=|s, v| s.child_text = v
                />
                <SessionField
                    label="Path"
                    placeholder="#"
                    read=|s| s.child_path.clone()
                    write=|s, v| s.child_path = v
                />
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    on:click=move |_| state_sv.with_value(|s| s.add())
                >
                    {add_label}
                </Button>
            </CardContent>
        </Card>
    }
}
