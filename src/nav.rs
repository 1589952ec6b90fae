use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions};
use yew::prelude::*;

use crate::config;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > config::NAV_SCROLLED_AFTER_PX
}

pub fn shows_back_to_top(scroll_y: f64) -> bool {
    scroll_y > config::BACK_TO_TOP_AFTER_PX
}

/// Id of the last section whose top has scrolled within `offset` of the viewport top.
pub fn active_section<'a>(sections: &[(&'a str, f64)], scroll_y: f64, offset: f64) -> Option<&'a str> {
    sections
        .iter()
        .filter(|(_, top)| scroll_y >= top - offset)
        .last()
        .map(|(id, _)| *id)
}

pub fn scroll_to(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn scroll_to_top() {
    let Some(window) = window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[derive(Clone, PartialEq)]
pub struct NavLink {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub brand: AttrValue,
    pub links: Vec<NavLink>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled_state = use_state_eq(|| false);
    let active = use_state_eq(|| None::<&'static str>);
    let back_to_top = use_state_eq(|| false);

    {
        let is_scrolled_state = is_scrolled_state.clone();
        let back_to_top = back_to_top.clone();
        let active = active.clone();
        let ids: Vec<&'static str> = props.links.iter().map(|link| link.id).collect();
        use_effect_with_deps(move |_| {
            let window = window();
            let scroll_callback = Closure::wrap(Box::new(move || {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let scroll_y = window.scroll_y().unwrap_or(0.0);
                is_scrolled_state.set(is_scrolled(scroll_y));
                back_to_top.set(shows_back_to_top(scroll_y));

                let Some(document) = window.document() else {
                    return;
                };
                let tops: Vec<(&'static str, f64)> = ids
                    .iter()
                    .filter_map(|id| {
                        let element = document.get_element_by_id(id)?;
                        let top = element.get_bounding_client_rect().top() + scroll_y;
                        Some((*id, top))
                    })
                    .collect();
                active.set(active_section(&tops, scroll_y, config::NAV_SPY_OFFSET_PX));
            }) as Box<dyn FnMut()>);

            if let Some(window) = &window {
                if let Err(e) = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref()) {
                    warn!("nav: could not listen for scroll: {:?}", e);
                }
            }

            move || {
                if let Some(window) = window {
                    if let Err(e) = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref()) {
                        warn!("nav: could not remove scroll listener: {:?}", e);
                    }
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let on_back_to_top = Callback::from(|_: MouseEvent| scroll_to_top());

    html! {
        <>
        <nav class={classes!("top-nav", (*is_scrolled_state).then(|| "scrolled"))}>
            <div class="nav-content">
                <a class="nav-logo" href="#">{props.brand.clone()}</a>
                <button
                    class={classes!("hamburger", (*menu_open).then(|| "active"))}
                    aria-expanded={menu_open.to_string()}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={classes!("nav-links", (*menu_open).then(|| "open"))}>
                    { for props.links.iter().map(|link| {
                        let id = link.id;
                        let onclick = {
                            let menu_open = menu_open.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                menu_open.set(false);
                                scroll_to(id);
                            })
                        };
                        html! {
                            <a
                                href={format!("#{}", id)}
                                class={classes!("nav-link", (*active == Some(id)).then(|| "active"))}
                                {onclick}
                            >
                                {link.label}
                            </a>
                        }
                    }) }
                </div>
            </div>
        </nav>
        if *back_to_top {
            <button class="back-to-top" aria-label="Back to top" onclick={on_back_to_top}>{"↑"}</button>
        }
        </>
    }
}
