use leptos::prelude::*;
use tw_merge::*;

/// Horizontal rule between panel sections.
#[component]
pub fn Separator(
    #[prop(into, optional)] spacing: Signal<SeparatorSpacing>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let merged_class = move || {
        let rule = SeparatorClass {
            spacing: spacing.get(),
        };
        rule.with_class(class.clone())
    };

    view! { <div class=merged_class role="separator" aria-orientation="horizontal" /> }
}

#[derive(TwClass, Default)]
#[tw(class = "h-px w-full shrink-0 bg-border")]
pub struct SeparatorClass {
    spacing: SeparatorSpacing,
}

#[derive(TwVariant)]
pub enum SeparatorSpacing {
    #[tw(default, class = "my-2")]
    Default,
    #[tw(class = "my-4")]
    Loose,
    #[tw(class = "my-0")]
    Flush,
}
