use yew::prelude::*;

use crate::components::reveal::Reveal;
use crate::i18n::I18n;
use crate::viewport::sections::SectionId;

/// Level key, image and (weeks, group size) of each course card, in display order.
const COURSES: [(&str, &str, u32, &str); 3] = [
    ("beginner", "/images/german-beginner.jpg", 5, "8-12"),
    ("intermediate", "/images/german-intermediate.jpg", 8, "6-10"),
    ("advanced", "/images/german-advanced.jpg", 10, "4-8"),
];

#[function_component(Courses)]
pub fn courses() -> Html {
    let i18n = use_context::<I18n>().unwrap_or_default();

    let card = |(order, (level, image, weeks, group)): (usize, (&str, &str, u32, &str))| {
        html! {
            <Reveal order={order as u32} class={classes!("course-card")}>
                <div class="image-container">
                    <img class="course-image" src={image.to_string()} alt={i18n.t(&format!("courses.{}.title", level))} loading="lazy" />
                    <span class="course-badge">{ i18n.t(&format!("courses.badges.{}", level)) }</span>
                </div>
                <div class="course-content">
                    <h3>{ i18n.t(&format!("courses.{}.title", level)) }</h3>
                    <p>{ i18n.t(&format!("courses.{}.description", level)) }</p>
                    <div class="course-footer">
                        <div class="course-features">
                            <span class="course-feature">{ format!("🕒 {} ", weeks) }{ i18n.t_or("courses.weeks", "weeks") }</span>
                            <span class="course-feature">{ format!("👥 {} ", group) }{ i18n.t_or("courses.students", "students") }</span>
                        </div>
                        <a href="#contact" class="learn-more">{ i18n.t_or("courses.learnMore", "Learn more") }</a>
                    </div>
                </div>
            </Reveal>
        }
    };

    html! {
        <section id={SectionId::Courses.anchor()} class="courses">
            <div class="container">
                <h2 class="section-title">{ i18n.t("courses.title") }</h2>
                <p class="section-subtitle">{ i18n.t("courses.subtitle") }</p>
                <div class="course-grid">
                    { for COURSES.into_iter().enumerate().map(card) }
                </div>
            </div>
        </section>
    }
}
