//! Plain-text editor for the active file.

use leptos::prelude::*;

use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/editor/editor.module.css");

/// Editor buffer bound to the `content` signal. `Ctrl+S` / `Cmd+S` saves.
#[component]
pub fn Editor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let content = ctx.state.content;
    let disabled = Signal::derive(move || ctx.state.active_file.with(Option::is_none));

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if (ev.ctrl_key() || ev.meta_key()) && ev.code() == "KeyS" {
            ev.prevent_default();
            let text = content.get_untracked();
            ctx.spawn(|c| async move { c.save(&text).await });
        }
    };

    view! {
        <textarea
            class=css::editor
            spellcheck="false"
            placeholder="Open a file from the panel"
            disabled=disabled
            prop:value=move || content.get()
            on:input=move |ev| content.set(event_target_value(&ev))
            on:keydown=on_keydown
        ></textarea>
    }
}
