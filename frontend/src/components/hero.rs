use web_sys::MouseEvent;
use yew::prelude::*;

use crate::dom::scroll::scroll_to_section;
use crate::i18n::I18n;
use crate::viewport::sections::SectionId;

#[function_component(Hero)]
pub fn hero() -> Html {
    let i18n = use_context::<I18n>().unwrap_or_default();
    let to_courses = Callback::from(|_: MouseEvent| scroll_to_section(SectionId::Courses));

    html! {
        <section id={SectionId::Home.anchor()} class="hero">
            <div class="container hero-content">
                <h1 class="hero-title">{ i18n.t("hero.title") }</h1>
                <p class="hero-subtitle">{ i18n.t("hero.subtitle") }</p>
                <button class="primary-button" onclick={to_courses.clone()}>
                    { i18n.t("hero.cta") }
                </button>
            </div>
            <div class="scroll-indicator" onclick={to_courses}></div>
        </section>
    }
}
