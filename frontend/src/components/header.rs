use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::language_switcher::LanguageSwitcher;
use crate::dom::scroll::{scroll_to_section, scroll_y, DocumentSections, ScrollListener};
use crate::i18n::I18n;
use crate::viewport::header::{HeaderState, ViewportController};
use crate::viewport::sections::{self, SectionId};

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub on_cycle_language: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let i18n = use_context::<I18n>().unwrap_or_default();
    let menu_open = use_state(|| false);
    let header_state = use_state(HeaderState::default);

    {
        let header_state = header_state.clone();
        use_effect_with_deps(
            move |_| {
                let mut guards = None;
                if let Some(window) = web_sys::window() {
                    let controller = Rc::new(RefCell::new(ViewportController::new()));
                    let subscription = controller
                        .borrow()
                        .subscribe(move |state| header_state.set(*state));

                    let sync = {
                        let window = window.clone();
                        let layout = window.document().map(DocumentSections::new);
                        move || {
                            let measured = layout
                                .as_ref()
                                .map(|layout| sections::measure(layout))
                                .unwrap_or_default();
                            controller.borrow_mut().on_scroll(scroll_y(&window), &measured);
                        }
                    };

                    // Resolve once so a reload mid-page highlights the right entry.
                    sync();
                    match ScrollListener::attach(&window, sync) {
                        Ok(listener) => guards = Some((listener, subscription)),
                        Err(e) => warn!("could not listen for scroll events: {:?}", e),
                    }
                }
                move || drop(guards)
            },
            (),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let nav_link = |id: SectionId| {
        let onclick = {
            let menu_open = menu_open.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                scroll_to_section(id);
                menu_open.set(false);
            })
        };
        let is_active = header_state.active_section == Some(id);

        html! {
            <li class="menu-item">
                <a
                    href={format!("#{}", id.anchor())}
                    class={classes!("menu-link", is_active.then(|| "active"))}
                    {onclick}
                >
                    { i18n.t(id.nav_key()) }
                </a>
            </li>
        }
    };

    let get_started = Callback::from(|e: MouseEvent| {
        e.prevent_default();
        scroll_to_section(SectionId::Contact);
    });

    html! {
        <header class={classes!("site-header", header_state.is_compact.then(|| "scrolled"))}>
            <div class="container">
                <nav class="nav">
                    <div class="logo">
                        <span>{"Sprich"}</span>{"weg"}
                    </div>

                    <button
                        class="menu-button"
                        onclick={toggle_menu}
                        aria-expanded={(*menu_open).to_string()}
                        aria-label={i18n.t("header.menu")}
                    >
                        { if *menu_open { "✕" } else { "☰" } }
                    </button>

                    <ul class={classes!("menu-items", (*menu_open).then(|| "open"))}>
                        { for SectionId::ALL.into_iter().map(nav_link) }
                    </ul>

                    <div class="right-section">
                        <LanguageSwitcher on_cycle={props.on_cycle_language.clone()} />
                        <a href="#contact" class="get-started" onclick={get_started}>
                            { i18n.t("header.getStarted") }
                        </a>
                    </div>
                </nav>
            </div>
        </header>
    }
}
