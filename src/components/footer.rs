use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <div class="footer-content">
                <Link<Route> to={Route::Reviews} classes="footer-logo">
                    {"Clockify"}
                </Link<Route>>
                <p class="footer-tagline">{"Schedules that work for teens."}</p>
                <p class="footer-copyright">{"© 2024 Clockify. All rights reserved."}</p>
            </div>
        </footer>
    }
}
