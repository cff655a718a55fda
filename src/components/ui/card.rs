use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border py-6 shadow-sm"}
    clx! {CardHeader, div, "flex flex-col items-start gap-1.5 px-6"}
    clx! {CardTitle, h3, "leading-none font-semibold"}
    clx! {CardSubtitle, h4, "text-sm font-medium"}
    clx! {CardContent, div, "flex flex-col gap-3 px-6"}
}

pub use components::*;
