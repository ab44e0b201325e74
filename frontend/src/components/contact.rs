use yew::prelude::*;

use crate::config::TELEGRAM_URL;
use crate::i18n::I18n;
use crate::viewport::sections::SectionId;

#[function_component(Contact)]
pub fn contact() -> Html {
    let i18n = use_context::<I18n>().unwrap_or_default();

    html! {
        <section id={SectionId::Contact.anchor()} class="contact">
            <div class="container">
                <h2 class="section-title">{ i18n.t("contact.title") }</h2>
                <p class="section-subtitle">{ i18n.t("contact.subtitle") }</p>
                <a href={TELEGRAM_URL} target="_blank" rel="noopener noreferrer" class="telegram-button">
                    { i18n.t("contact.telegram") }
                </a>
            </div>
        </section>
    }
}
