use log::warn;
use web_sys::Element;
use yew::prelude::*;

use super::controller::{RevealOptions, RootMargin};
use super::dom::DomReveal;
use crate::config;

#[derive(Properties, PartialEq)]
pub struct RevealProviderProps {
    pub children: Children,
}

/// Owns the reveal driver for one page. Unmounting the page tears it down,
/// cancelling any stagger still in flight.
#[function_component(RevealProvider)]
pub fn reveal_provider(props: &RevealProviderProps) -> Html {
    let reveal = use_state(|| DomReveal::new(config::VISIBLE_CLASS));

    {
        let reveal = (*reveal).clone();
        use_effect_with_deps(move |_| {
            move || reveal.teardown()
        }, ());
    }

    html! {
        <ContextProvider<DomReveal> context={(*reveal).clone()}>
            { for props.children.iter() }
        </ContextProvider<DomReveal>>
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(config::DEFAULT_REVEAL_THRESHOLD)]
    pub threshold: f64,
    #[prop_or_default]
    pub root_margin: RootMargin,
    #[prop_or_default]
    pub stagger_ms: u32,
    #[prop_or_default]
    pub on_reveal: Option<Callback<()>>,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node_ref = use_node_ref();
    let driver = use_context::<DomReveal>();

    {
        let node_ref = node_ref.clone();
        let options = RevealOptions::default()
            .with_threshold(props.threshold)
            .with_root_margin(props.root_margin)
            .with_stagger(props.stagger_ms);
        let on_reveal = props.on_reveal.clone();
        use_effect_with_deps(move |_| {
            let registered = match (driver, node_ref.cast::<Element>()) {
                (Some(driver), Some(element)) => driver
                    .register(&element, options, on_reveal)
                    .map(|key| (driver, key)),
                (None, Some(element)) => {
                    warn!("reveal: no RevealProvider above this element, showing it as-is");
                    if let Err(e) = element.class_list().add_1(config::VISIBLE_CLASS) {
                        warn!("reveal: could not update class list: {:?}", e);
                    }
                    if let Some(on_reveal) = on_reveal {
                        on_reveal.emit(());
                    }
                    None
                }
                _ => None,
            };
            move || {
                if let Some((driver, key)) = registered {
                    driver.unregister(key);
                }
            }
        }, ());
    }

    html! {
        <div ref={node_ref} id={props.id.clone()} class={classes!("reveal", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}
