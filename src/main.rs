use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod contact;
mod count_up;
mod infographic;
mod materials;
mod nav;
mod poll;
mod quiz;
mod reveal {
    pub mod controller;
    pub mod dom;
    pub mod component;
}
mod components {
    pub mod footer;
}
mod pages {
    pub mod home;
    pub mod eco;
    pub mod portfolio;
}

use pages::{
    home::{Home, NotFound},
    eco::EcoPage,
    portfolio::PortfolioPage,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/eco")]
    Eco,
    #[at("/portfolio")]
    Portfolio,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering site index");
            html! { <Home /> }
        },
        Route::Eco => html! { <EcoPage /> },
        Route::Portfolio => html! { <PortfolioPage /> },
        Route::NotFound => {
            info!("Rendering 404 page");
            html! { <NotFound /> }
        },
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
