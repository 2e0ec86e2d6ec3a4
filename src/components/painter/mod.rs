//! Pixel painter modal.
//!
//! Draws on a [`PixelCanvas`] with the mouse and uploads the RGB565 encoding
//! to the device.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::core::{ImageSize, PixelCanvas, Rgb};

stylance::import_crate_style!(css, "src/components/painter/painter.module.css");

#[component]
pub fn Painter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let open = ctx.state.painter_open;

    let canvas = RwSignal::new(PixelCanvas::default());
    let drawing = RwSignal::new(false);

    let cells = move || {
        let side = canvas.with(|c| c.side());
        (0..side * side).map(|i| (side, i)).collect::<Vec<_>>()
    };
    let grid_style = move || {
        let side = canvas.with(|c| c.side());
        format!("grid-template-columns: repeat({}, 1fr)", side)
    };

    let set_size = move |ev: leptos::ev::Event| {
        let size = match event_target_value(&ev).as_str() {
            "32" => ImageSize::Large,
            _ => ImageSize::Small,
        };
        canvas.update(|c| c.resize(size));
    };
    let clear = move |_: leptos::ev::MouseEvent| canvas.update(PixelCanvas::clear);
    let close = move |_: leptos::ev::MouseEvent| open.set(false);
    let save = move |_: leptos::ev::MouseEvent| {
        let snapshot = canvas.get_untracked();
        ctx.spawn(move |c| async move {
            if let Ok(Some(_)) = c.save_image(&snapshot).await {
                open.set(false);
            }
        });
    };

    view! {
        <div class=css::overlay>
            <div class=css::modal>
                <div class=css::controls>
                    <select on:change=set_size>
                        {ImageSize::ALL
                            .into_iter()
                            .map(|size| {
                                let side = size.side();
                                view! { <option value=side.to_string()>{format!("{0}x{0}", side)}</option> }
                            })
                            .collect_view()}
                    </select>
                    <input
                        type="color"
                        prop:value=move || canvas.with(|c| c.color().to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            canvas.update(|c| {
                                c.set_color(&value);
                            });
                        }
                    />
                    <button class=css::button on:click=clear>"Clear"</button>
                    <button class=css::button on:click=save>"Save"</button>
                    <button class=css::button on:click=close>"Close"</button>
                </div>

                <div
                    class=css::grid
                    style=grid_style
                    on:mouseup=move |_| drawing.set(false)
                    on:mouseleave=move |_| drawing.set(false)
                >
                    <For
                        each=cells
                        key=|cell| *cell
                        children=move |(side, index)| {
                            let (x, y) = (index % side, index / side);
                            let color = move || {
                                canvas.with(|c| c.pixel(x, y).unwrap_or(Rgb::BLACK).to_string())
                            };
                            view! {
                                <div
                                    class=css::cell
                                    style:background-color=color
                                    on:mousedown=move |_| {
                                        drawing.set(true);
                                        canvas.update(|c| {
                                            c.paint(x, y);
                                        });
                                    }
                                    on:mouseenter=move |_| {
                                        if drawing.get_untracked() {
                                            canvas.update(|c| {
                                                c.paint(x, y);
                                            });
                                        }
                                    }
                                ></div>
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}
