use std::rc::Rc;

use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::dom::timer::TimeoutScheduler;
use crate::dom::visibility::{DomRevealController, VisibilityObserver};
use crate::viewport::listeners::Subscription;
use crate::viewport::reveal::{ElementId, Registration, RevealController};

struct RevealContextInner {
    controller: DomRevealController,
    visibility: Option<VisibilityObserver>,
}

/// Page-wide reveal controller plus the observer feeding it.
#[derive(Clone)]
pub struct RevealContext {
    inner: Rc<RevealContextInner>,
}

impl PartialEq for RevealContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Releases an element's listener, observation and pending timer on drop.
pub struct RevealGuard {
    _subscription: Subscription,
    _registration: Registration,
}

impl RevealContext {
    pub fn new() -> Self {
        let controller = RevealController::new(TimeoutScheduler);
        let visibility = match VisibilityObserver::new(controller.clone()) {
            Ok(visibility) => Some(visibility),
            Err(e) => {
                warn!("IntersectionObserver unavailable ({:?}), content is shown right away", e);
                None
            }
        };
        Self {
            inner: Rc::new(RevealContextInner {
                controller,
                visibility,
            }),
        }
    }

    pub fn track(&self, element: &Element, order: u32, on_reveal: impl Fn() + 'static) -> RevealGuard {
        let RevealContextInner {
            controller,
            visibility,
        } = &*self.inner;

        let id = ElementId::next();
        let subscription = controller.subscribe(move |event| {
            if event.id == id {
                on_reveal();
            }
        });
        let observation = visibility.as_ref().map(|visibility| visibility.observe(element, id));
        let observed = observation.is_some();
        let registration = controller.register(id, order, observation);
        if !observed {
            controller.on_visibility_enter(id);
        }

        RevealGuard {
            _subscription: subscription,
            _registration: registration,
        }
    }
}

impl Default for RevealContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    /// Position within its group; sets the stagger delay.
    pub order: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_else(|| "div".to_string())]
    pub tag: String,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let context = use_context::<RevealContext>();
    let node_ref = use_node_ref();
    let revealed = use_state(|| false);

    {
        let node_ref = node_ref.clone();
        let revealed = revealed.clone();
        use_effect_with_deps(
            move |order| {
                let guard = match (context, node_ref.cast::<Element>()) {
                    (Some(context), Some(element)) => {
                        let revealed = revealed.clone();
                        Some(context.track(&element, *order, move || revealed.set(true)))
                    }
                    _ => {
                        revealed.set(true);
                        None
                    }
                };
                move || drop(guard)
            },
            props.order,
        );
    }

    html! {
        <@{props.tag.clone()}
            ref={node_ref}
            class={classes!("animate-on-scroll", props.class.clone(), (*revealed).then(|| "visible"))}
        >
            { props.children.clone() }
        </@>
    }
}
