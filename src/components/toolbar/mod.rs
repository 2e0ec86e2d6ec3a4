//! Top bar component.
//!
//! Displays the device label and the active file, and hosts the file and
//! device actions. File actions only appear once a file is open; run/stop
//! only for runnable files.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/toolbar/toolbar.module.css");

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let state = ctx.state;

    let device_label = Signal::derive(move || {
        state.device.with(|d| match d {
            Some(info) if !info.name.is_empty() => info.name.clone(),
            _ => APP_NAME.to_string(),
        })
    });
    let active_path = Signal::derive(move || state.active_file.get().unwrap_or_default());
    let has_file = Signal::derive(move || state.active_file.with(Option::is_some));
    let runnable = Signal::derive(move || ctx.is_runnable());

    let save = move |_: leptos::ev::MouseEvent| {
        let content = state.content.get_untracked();
        ctx.spawn(|c| async move { c.save(&content).await });
    };
    let save_run = move |_: leptos::ev::MouseEvent| {
        let content = state.content.get_untracked();
        ctx.spawn(|c| async move { c.save_and_run(&content).await });
    };
    let stop = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.stop().await });
    };
    let rename = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.rename_file().await });
    };
    let delete = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.delete_file().await });
    };
    let reset = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.reset_device().await });
    };
    let open_painter = move |_: leptos::ev::MouseEvent| state.painter_open.set(true);

    view! {
        <header class=css::bar>
            <div class=css::section>
                <span class=css::device title=move || {
                    state.device.with(|d| d.as_ref().map(|i| format!("{} ({})", i.hostname, i.ip)))
                }>
                    {device_label}
                </span>
                <span class=css::path>{active_path}</span>
            </div>

            <div class=css::actions>
                <Show when=move || has_file.get()>
                    <button class=css::button on:click=save title="Ctrl+S">"Save"</button>
                    <Show when=move || runnable.get()>
                        <button class=css::button on:click=save_run>"Save & Run"</button>
                        <button class=css::button on:click=stop>"Stop"</button>
                    </Show>
                    <button class=css::button on:click=rename>"Rename"</button>
                    <button class=css::buttonDanger on:click=delete>"Delete"</button>
                </Show>
                <button class=css::button on:click=open_painter>"Paint"</button>
                <button class=css::buttonDanger on:click=reset>"Reset"</button>
            </div>
        </header>
    }
}
