use chrono::{Datelike, Local};
use yew::prelude::*;

use crate::i18n::I18n;

#[function_component(Footer)]
pub fn footer() -> Html {
    let i18n = use_context::<I18n>().unwrap_or_default();
    let year = Local::now().year();

    html! {
        <footer class="site-footer">
            <div class="container">
                <div class="logo"><span>{"Sprich"}</span>{"weg"}</div>
                <p class="copyright">{ format!("© {} {}", year, i18n.t("footer.rights")) }</p>
            </div>
        </footer>
    }
}
