//! File panel component.
//!
//! Renders a [`ListingView`](crate::core::ListingView): visible files and a
//! "new file" action always; the refresh action, directories, parent entry,
//! directory creation and blacklisted files only when expanded.

use leptos::prelude::*;

use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/file_panel/file_panel.module.css");

#[component]
pub fn FilePanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let listing = ctx.state.listing;

    let visible = Signal::derive(move || listing.with(|l| l.visible_files.clone()));
    let hidden = Signal::derive(move || listing.with(|l| l.hidden_files.clone()));
    let dirs = Signal::derive(move || listing.with(|l| l.dirs.clone()));
    let show_all = Signal::derive(move || listing.with(|l| l.show_all));
    let show_parent = Signal::derive(move || listing.with(|l| l.show_parent));

    let new_file = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.create_file().await });
    };
    let new_dir = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.create_directory().await });
    };
    let refresh = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.refresh().await });
    };
    let parent = move |_: leptos::ev::MouseEvent| {
        ctx.spawn(|c| async move { c.parent_directory().await });
    };
    let toggle = move |_: leptos::ev::MouseEvent| {
        ctx.controller().toggle_show_all();
    };

    view! {
        <nav class=css::panel aria-label="Device files">
            <span class=css::title>"PROGRAMS"</span>
            <span class=css::action on:click=new_file>"NEW FILE..."</span>
            <FileEntries names=visible />

            <span class=css::toggle on:click=toggle>
                {move || if show_all.get() { "« LESS" } else { "MORE »" }}
            </span>

            <Show when=move || show_all.get()>
                <span class=css::action on:click=refresh>"↻ refresh"</span>

                <span class=css::title>"DIRS"</span>
                <Show when=move || show_parent.get()>
                    <span class=css::dir on:click=parent>".."</span>
                </Show>
                <For
                    each=move || dirs.get()
                    key=|name| name.clone()
                    children=move |name| {
                        let target = name.clone();
                        let enter = move |_: leptos::ev::MouseEvent| {
                            let target = target.clone();
                            ctx.spawn(|c| async move { c.enter_directory(&target).await });
                        };
                        view! { <span class=css::dir on:click=enter>{name}</span> }
                    }
                />
                <span class=css::action on:click=new_dir>"NEW DIRECTORY..."</span>

                <span class=css::title>"FILES"</span>
                <FileEntries names=hidden />
            </Show>
        </nav>
    }
}

/// Clickable file names that open the file in the editor.
#[component]
fn FileEntries(names: Signal<Vec<String>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let active = ctx.state.active_file;
    let directory = Signal::derive(move || ctx.state.listing.with(|l| l.directory.clone()));

    view! {
        <For
            each=move || names.get()
            key=|name| name.clone()
            children=move |name| {
                let target = name.clone();
                let path = name.clone();
                let is_active = Signal::derive(move || {
                    active.with(|a| {
                        a.as_deref() == Some(format!("{}{}", directory.get(), path).as_str())
                    })
                });
                let open = move |_: leptos::ev::MouseEvent| {
                    let target = target.clone();
                    ctx.spawn(|c| async move { c.open_file(&target).await });
                };
                view! {
                    <span
                        class=move || if is_active.get() { css::fileActive } else { css::file }
                        on:click=open
                    >
                        {name}
                    </span>
                }
            }
        />
    }
}
