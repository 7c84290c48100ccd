pub mod components;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod styles;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::{use_segments, WheelContext};
use crate::pages::{Editor, Play};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Play,
    #[at("/edit")]
    Editor,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Play => html! { <Play /> },
        Route::Editor => html! { <Editor /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Play} /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let wheel = use_segments();

    html! {
        <ContextProvider<WheelContext> context={wheel}>
            <BrowserRouter>
                <div class="min-h-screen w-full">
                    <Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<WheelContext>>
    }
}
