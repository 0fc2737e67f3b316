use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod config;
mod content;
mod components {
    pub mod footer;
    pub mod review_card;
    pub mod stars;
}
mod pages {
    pub mod reviews;
}
mod reveal {
    pub mod controller;
    pub mod observer;
    pub mod scheduler;
}

use components::footer::Footer;
use pages::reviews::Reviews;

/// Scroll offset after which the nav bar switches to its solid style.
const NAV_SCROLLED_OFFSET: f64 = 10.0;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/reviews")]
    Reviews,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            html! { <Redirect<Route> to={Route::Reviews} /> }
        },
        Route::Reviews => {
            info!("Rendering Reviews page");
            html! { <Reviews /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <div class="not-found-page">
                    <h1>{"Page not found"}</h1>
                    <Link<Route> to={Route::Reviews} classes="forward-link">
                        {"See what our users say"}
                    </Link<Route>>
                </div>
            }
        },
    }
}


#[function_component(Nav)]
pub fn nav() -> Html {
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let listener = web_sys::window().map(|window| {
                let scroll_window = window.clone();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    let scroll_top = scroll_window.scroll_y().unwrap_or(0.0);
                    is_scrolled.set(scroll_top > NAV_SCROLLED_OFFSET);
                }) as Box<dyn FnMut()>);

                if let Err(e) = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref()) {
                    warn!("Could not listen to scroll events: {:?}", e);
                }
                (window, scroll_callback)
            });

            move || {
                if let Some((window, scroll_callback)) = listener {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Reviews} classes="nav-logo">
                    {"Clockify"}
                </Link<Route>>
                <div class="nav-right">
                    <Link<Route> to={Route::Reviews} classes="nav-link">
                        {"Reviews"}
                    </Link<Route>>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
            <Footer />
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
