use web_sys::MouseEvent;
use yew::prelude::*;

use crate::i18n::I18n;

#[derive(Properties, PartialEq)]
pub struct LanguageSwitcherProps {
    pub on_cycle: Callback<()>,
}

#[function_component(LanguageSwitcher)]
pub fn language_switcher(props: &LanguageSwitcherProps) -> Html {
    let i18n = use_context::<I18n>().unwrap_or_default();
    let language = i18n.language;

    let onclick = {
        let on_cycle = props.on_cycle.clone();
        Callback::from(move |_: MouseEvent| on_cycle.emit(()))
    };

    html! {
        <button
            class="language-toggle"
            {onclick}
            aria-label={i18n.t("header.changeLanguage")}
            title={language.display_name}
        >
            <span class="flag-icon">{ language.flag }</span>
            { language.code.to_uppercase() }
        </button>
    }
}
