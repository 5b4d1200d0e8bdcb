use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use welcome_core::Notifier;
use yew::prelude::*;

/// How long a toast stays up before dismissing itself.
pub const TOAST_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
    Info,
}

impl ToastLevel {
    const fn alert_class(self) -> &'static str {
        match self {
            Self::Error => "alert-error",
            Self::Info => "alert-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastItem {
    pub id: u32,
    pub level: ToastLevel,
    pub text: AttrValue,
}

pub enum ToastAction {
    Push(ToastItem),
    Dismiss(u32),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastList {
    pub items: Vec<ToastItem>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(item) => items.push(item),
            ToastAction::Dismiss(id) => items.retain(|item| item.id != id),
        }
        Rc::new(Self { items })
    }
}

/// Context handle for raising toasts; doubles as the gate's [`Notifier`].
#[derive(Clone)]
pub struct ToastHandle {
    dispatcher: UseReducerDispatcher<ToastList>,
    next_id: Rc<Cell<u32>>,
    timers: Rc<RefCell<HashMap<u32, Timeout>>>,
}

impl PartialEq for ToastHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.next_id, &other.next_id)
    }
}

impl ToastHandle {
    pub fn push(&self, level: ToastLevel, text: &str) {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.dispatcher.dispatch(ToastAction::Push(ToastItem {
            id,
            level,
            text: AttrValue::from(text.to_string()),
        }));

        let dispatcher = self.dispatcher.clone();
        let timers = Rc::downgrade(&self.timers);
        let expiry = Timeout::new(TOAST_TTL_MS, move || {
            dispatcher.dispatch(ToastAction::Dismiss(id));
            if let Some(timers) = timers.upgrade() {
                timers.borrow_mut().remove(&id);
            }
        });
        self.timers.borrow_mut().insert(id, expiry);
    }

    pub fn dismiss(&self, id: u32) {
        self.timers.borrow_mut().remove(&id);
        self.dispatcher.dispatch(ToastAction::Dismiss(id));
    }
}

impl Notifier for ToastHandle {
    fn notify_error(&self, text: &str) {
        self.push(ToastLevel::Error, text);
    }

    fn notify_info(&self, text: &str) {
        self.push(ToastLevel::Info, text);
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ToastStackProps {
    pub toasts: Vec<ToastItem>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<u32>>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast toast-end toast-top" role="status" aria-live="polite">
            { for props.toasts.iter().map(|toast| {
                let dismiss_btn = props.on_dismiss.as_ref().map(|cb| {
                    let id = toast.id;
                    let cb = cb.clone();
                    let on_click = Callback::from(move |_: MouseEvent| cb.emit(id));
                    html! {
                        <button class="btn btn-ghost btn-xs" aria-label={crate::i18n::t("toast.dismiss")} onclick={on_click}>{"✕"}</button>
                    }
                }).unwrap_or_default();
                html! {
                    <div key={toast.id} class={classes!("alert", toast.level.alert_class(), "flex", "items-center", "gap-2")}>
                        <span>{ toast.text.clone() }</span>
                        { dismiss_btn }
                    </div>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Mounts the toast stack and exposes a [`ToastHandle`] to descendants.
#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_memo((), |()| Cell::new(0_u32));
    let timers = use_mut_ref(HashMap::<u32, Timeout>::new);
    let handle = ToastHandle {
        dispatcher: list.dispatcher(),
        next_id,
        timers,
    };
    let on_dismiss = {
        let handle = handle.clone();
        Callback::from(move |id: u32| handle.dismiss(id))
    };

    html! {
        <ContextProvider<ToastHandle> context={handle}>
            { props.children.clone() }
            <ToastStack toasts={list.items.clone()} {on_dismiss} />
        </ContextProvider<ToastHandle>>
    }
}
