//! Notification bar component.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::models::NotificationKind;

stylance::import_crate_style!(css, "src/components/notification/notification.module.css");

fn class_for(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Progress => css::progress,
        NotificationKind::Success => css::success,
        NotificationKind::Warning => css::warning,
        NotificationKind::Error => css::error,
    }
}

/// Shows the current notice. Hiding is scheduled by the frontend.
#[component]
pub fn NotificationBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let notification = ctx.state.notification;

    view! {
        {move || {
            notification
                .get()
                .map(|n| {
                    view! {
                        <div class=css::bar role="status">
                            <span class=class_for(n.kind)>{n.message}</span>
                        </div>
                    }
                })
        }}
    }
}
