use yew::prelude::*;

use crate::components::reveal::Reveal;
use crate::i18n::I18n;
use crate::viewport::sections::SectionId;

const FEATURE_ICONS: [&str; 4] = ["🎓", "👥", "💻", "📝"];

#[function_component(About)]
pub fn about() -> Html {
    let i18n = use_context::<I18n>().unwrap_or_default();
    let features = i18n.t_list("about.features");

    html! {
        <section id={SectionId::About.anchor()} class="about">
            <div class="container about-content">
                <h2 class="section-title">{ i18n.t("about.title") }</h2>
                <p class="about-description">{ i18n.t("about.description") }</p>
                <ul class="feature-list">
                    { for features.into_iter().enumerate().map(|(index, feature)| html! {
                        <Reveal order={index as u32} tag="li" class={classes!("feature-item")}>
                            <span class="feature-icon">{ FEATURE_ICONS.get(index).copied().unwrap_or("✓") }</span>
                            { feature }
                        </Reveal>
                    }) }
                </ul>
            </div>
        </section>
    }
}
