use crate::i18n::t;
use welcome_core::{MessageKey, SessionInfo};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub session: SessionInfo,
    pub on_logout: Callback<()>,
}

/// Signed-in user summary with the raw token and a logout button.
#[function_component(SessionPanel)]
pub fn session_panel(p: &Props) -> Html {
    let on_click = {
        let cb = p.on_logout.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <section id="session-panel" class="bg-gray-800 text-gray-300 p-4 rounded-md text-sm w-full max-w-md border border-gray-700 shadow-lg">
            <span class="font-semibold text-blue-400">{ t(MessageKey::UserLabel.key()) }</span>
            <pre id="session-username" class="mt-2 break-words whitespace-pre-wrap">{ p.session.username().to_string() }</pre>

            <span class="font-semibold text-blue-400 mt-4 block">{ t(MessageKey::TokenLabel.key()) }</span>
            <pre id="session-token" class="mt-2 break-words whitespace-pre-wrap text-xs bg-gray-700 p-2 rounded">
                { p.session.token.clone() }
            </pre>

            <button
                id="logout-btn"
                type="button"
                onclick={on_click}
                class="mt-4 bg-red-500 hover:bg-red-700 text-white font-bold py-2 px-4 rounded w-full"
            >
                { t(MessageKey::LogoutButton.key()) }
            </button>
        </section>
    }
}

#[function_component(SessionExpired)]
pub fn session_expired() -> Html {
    html! {
        <p id="session-expired" class="text-gray-400" role="alert">
            { t(MessageKey::SessionExpired.key()) }
        </p>
    }
}
