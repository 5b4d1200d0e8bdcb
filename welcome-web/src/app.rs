use crate::components::toast::ToastProvider;
use crate::pages::not_found::NotFound;
use crate::pages::welcome::WelcomePage;
use crate::router::Route;
use welcome_core::GateConfig;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_else(crate::config::load_gate_config)]
    pub config: GateConfig,
}

#[function_component(NotFoundRoute)]
fn not_found_route() -> Html {
    let navigator = use_navigator();
    let on_go_home = Callback::from(move |()| {
        if let Some(nav) = &navigator {
            nav.push(&Route::Welcome);
        }
    });
    html! { <NotFound {on_go_home} /> }
}

fn switch(route: Route, config: &GateConfig) -> Html {
    match route {
        Route::Welcome => html! { <WelcomePage config={config.clone()} /> },
        Route::NotFound => html! { <NotFoundRoute /> },
    }
}

#[function_component(App)]
pub fn app(p: &Props) -> Html {
    let config = p.config.clone();
    let render = Callback::from(move |route: Route| switch(route, &config));
    html! {
        <BrowserRouter>
            <ToastProvider>
                <main id="main">
                    <Switch<Route> render={render} />
                </main>
            </ToastProvider>
        </BrowserRouter>
    }
}
