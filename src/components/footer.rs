use chrono::Datelike;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    pub owner: AttrValue,
    #[prop_or_default]
    pub note: Option<AttrValue>,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let year = chrono::Local::now().year();

    html! {
        <footer class="site-footer">
            <p>{format!("© {} {}", year, props.owner)}</p>
            if let Some(note) = &props.note {
                <p class="footer-note">{note.clone()}</p>
            }
        </footer>
    }
}
