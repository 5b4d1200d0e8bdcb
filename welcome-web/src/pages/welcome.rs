use std::rc::Rc;

use crate::api::HttpSessionApi;
use crate::components::choice_game::ChoiceGamePanel;
use crate::components::loading_overlay::LoadingOverlay;
use crate::components::session_panel::{SessionExpired, SessionPanel};
use crate::components::toast::ToastHandle;
use crate::i18n::t;
use crate::services::{LocationNavigator, LogNotifier, TimerSlots, build_gate};
use welcome_core::{GateConfig, GateView, MessageKey, Navigator, Notifier, SessionApi};
use yew::prelude::*;

pub struct SessionGateHandle {
    pub view: GateView,
    pub on_logout: Callback<()>,
}

/// Drive a [`welcome_core::SessionGate`] for the lifetime of the calling component.
///
/// The check starts on mount. Unmounting disposes the gate and drops its
/// pending timers.
#[hook]
pub fn use_session_gate(config: GateConfig, api: Rc<dyn SessionApi>) -> SessionGateHandle {
    use_session_gate_with(config, api, Rc::new(LocationNavigator))
}

/// [`use_session_gate`] with a caller-supplied navigator.
#[hook]
pub fn use_session_gate_with(
    config: GateConfig,
    api: Rc<dyn SessionApi>,
    navigator: Rc<dyn Navigator>,
) -> SessionGateHandle {
    let toasts = use_context::<ToastHandle>();
    let view = use_state(GateView::initial);
    let timers: TimerSlots = use_mut_ref(Vec::new);

    let gate = {
        let view = view.clone();
        let timers = timers.clone();
        use_memo((), move |()| {
            let notifier: Rc<dyn Notifier> = match toasts {
                Some(handle) => Rc::new(handle),
                None => Rc::new(LogNotifier),
            };
            let on_change = Callback::from(move |next: GateView| view.set(next));
            build_gate(config, api, notifier, navigator, timers, on_change)
        })
    };

    {
        let gate = (*gate).clone();
        let view = view.clone();
        use_effect_with((), move |()| {
            let checking = gate.clone();
            wasm_bindgen_futures::spawn_local(async move {
                checking.check().await;
                view.set(checking.view());
            });
            move || {
                gate.dispose();
                timers.borrow_mut().clear();
            }
        });
    }

    let on_logout = {
        let gate = (*gate).clone();
        let view = view.clone();
        Callback::from(move |()| {
            let gate = gate.clone();
            let view = view.clone();
            wasm_bindgen_futures::spawn_local(async move {
                gate.logout().await;
                view.set(gate.view());
            });
        })
    };

    SessionGateHandle {
        view: (*view).clone(),
        on_logout,
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct WelcomeViewProps {
    pub view: GateView,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub game_seed: Option<u64>,
}

/// Pure rendering of a gate snapshot.
#[function_component(WelcomeView)]
pub fn welcome_view(p: &WelcomeViewProps) -> Html {
    let body = if p.view.content_visible() {
        let summary = match &p.view.session {
            Some(session) => html! {
                <SessionPanel session={session.clone()} on_logout={p.on_logout.clone()} />
            },
            None => html! { <SessionExpired /> },
        };
        html! {
            <>
                { summary }
                <ChoiceGamePanel seed={p.game_seed} />
            </>
        }
    } else {
        html! { <LoadingOverlay label={AttrValue::from(t(MessageKey::Loading.key()))} /> }
    };

    html! {
        <div class="welcome flex flex-col items-center justify-center min-h-screen bg-gradient-to-br from-gray-900 to-black text-white p-4 relative">
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: GateConfig,
}

#[function_component(WelcomePage)]
pub fn welcome_page(p: &Props) -> Html {
    let api: Rc<dyn SessionApi> = Rc::new(HttpSessionApi);
    let gate = use_session_gate(p.config.clone(), api);
    html! { <WelcomeView view={gate.view} on_logout={gate.on_logout} /> }
}
