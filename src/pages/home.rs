use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="site-index">
            <h1>{"Pick a site"}</h1>
            <div class="site-buttons">
                <Link<Route> to={Route::Eco} classes="site-button">
                    {"Awareness site: Say No to Paper Cups"}
                </Link<Route>>
                <Link<Route> to={Route::Portfolio} classes="site-button">
                    {"Portfolio site"}
                </Link<Route>>
            </div>
        </div>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <h1>{"Page not found"}</h1>
            <Link<Route> to={Route::Home}>{"Back to the start"}</Link<Route>>
        </div>
    }
}
