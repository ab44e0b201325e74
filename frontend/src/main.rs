use log::info;
use yew::prelude::*;

mod config;
mod i18n;
mod language;
mod theme;
mod viewport;
mod dom {
    pub mod language;
    pub mod scroll;
    pub mod timer;
    pub mod visibility;
}
mod components {
    pub mod about;
    pub mod contact;
    pub mod courses;
    pub mod footer;
    pub mod header;
    pub mod hero;
    pub mod language_switcher;
    pub mod reveal;
}

use components::{
    about::About,
    contact::Contact,
    courses::Courses,
    footer::Footer,
    header::Header,
    hero::Hero,
    reveal::RevealContext,
};
use i18n::{I18n, Translations};
use language::{LanguageCycler, LANGUAGES};
use theme::Theme;

const PAGE_STYLES: &str = r#"
    .site-header {
        position: fixed;
        top: 0;
        left: 0;
        right: 0;
        z-index: 100;
        padding: 1.25rem 0;
        background-color: transparent;
        transition: all 0.3s ease-in-out;
    }
    .site-header.scrolled {
        padding: 0.75rem 0;
        background-color: rgba(255, 255, 255, 0.98);
        backdrop-filter: blur(8px);
        box-shadow: 0 1px 0 rgba(0, 0, 0, 0.06);
    }
    .menu-link.active {
        color: var(--secondary-color);
    }
    .menu-items.open {
        display: flex;
    }
    .animate-on-scroll {
        opacity: 0;
        transform: translateY(24px);
        transition: opacity 0.6s ease, transform 0.6s ease;
    }
    .animate-on-scroll.visible {
        opacity: 1;
        transform: none;
    }
"#;

#[function_component]
fn App() -> Html {
    let translations = use_memo(|_| Translations::builtin(), ());
    let reveal = use_memo(|_| RevealContext::new(), ());
    let cycler = use_mut_ref(|| {
        let preferred = dom::language::preferred_language();
        LanguageCycler::new(&LANGUAGES, preferred.as_deref()).expect("built-in language list is empty")
    });
    let language = {
        let cycler = cycler.clone();
        use_state(move || *cycler.borrow().current())
    };

    {
        let cycler = cycler.clone();
        let language = language.clone();
        use_effect_with_deps(
            move |_| {
                dom::scroll::scroll_to_top();
                dom::language::apply_document_language(cycler.borrow().current().code);

                let subscription = cycler.borrow().subscribe(move |entry| {
                    dom::language::remember_language(entry.code);
                    dom::language::apply_document_language(entry.code);
                    language.set(*entry);
                });
                move || drop(subscription)
            },
            (),
        );
    }

    let on_cycle_language = {
        let cycler = cycler.clone();
        Callback::from(move |_: ()| {
            cycler.borrow_mut().cycle();
        })
    };

    let i18n = I18n::new(translations, *language);

    html! {
        <ContextProvider<I18n> context={i18n}>
            <ContextProvider<RevealContext> context={(*reveal).clone()}>
                <style>{ Theme::SPRICHWEG.css_variables() }</style>
                <style>{ PAGE_STYLES }</style>
                <div class="app">
                    <Header on_cycle_language={on_cycle_language} />
                    <main>
                        <Hero />
                        <Courses />
                        <About />
                        <Contact />
                    </main>
                    <Footer />
                </div>
            </ContextProvider<RevealContext>>
        </ContextProvider<I18n>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting Sprichweg landing page");
    yew::Renderer::<App>::new().render();
}
