//! Browser implementations of the gate's collaborators.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use welcome_core::{
    DeferredTask, GateConfig, GateServices, GateView, MessageKey, Messages, Navigator, Notifier,
    Scheduler, SessionApi, SessionGate,
};
use yew::Callback;

/// Messages resolved through the page's translation bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct I18nMessages;

impl Messages for I18nMessages {
    fn text(&self, key: MessageKey) -> String {
        crate::i18n::t(key.key())
    }
}

/// Full page navigation; the authentication page is served outside this app.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate_to(&self, path: &str) {
        if let Err(err) = crate::dom::assign_location(path) {
            log::error!(
                "navigation to {path} failed: {}",
                crate::dom::js_error_message(&err)
            );
        }
    }
}

/// Notifier used when no toast stack is mounted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, text: &str) {
        log::error!("{text}");
    }

    fn notify_info(&self, text: &str) {
        log::info!("{text}");
    }
}

/// Pending timers owned by a mounted page; dropping a [`Timeout`] cancels it.
pub type TimerSlots = Rc<RefCell<Vec<Timeout>>>;

/// Runs deferred gate tasks on browser timers and republishes the view.
pub struct TimerScheduler {
    gate: Weak<SessionGate>,
    timers: TimerSlots,
    on_change: Callback<GateView>,
}

impl TimerScheduler {
    #[must_use]
    pub fn new(gate: Weak<SessionGate>, timers: TimerSlots, on_change: Callback<GateView>) -> Self {
        Self {
            gate,
            timers,
            on_change,
        }
    }
}

impl Scheduler for TimerScheduler {
    fn schedule(&self, delay_ms: u32, task: DeferredTask) {
        log::debug!("scheduling {task:?} in {delay_ms} ms");
        let gate = self.gate.clone();
        let on_change = self.on_change.clone();
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(gate) = gate.upgrade() {
                gate.fire(task);
                on_change.emit(gate.view());
            }
        });
        self.timers.borrow_mut().push(timeout);
    }
}

/// Wire a gate to browser collaborators.
#[must_use]
pub fn build_gate(
    config: GateConfig,
    api: Rc<dyn SessionApi>,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    timers: TimerSlots,
    on_change: Callback<GateView>,
) -> Rc<SessionGate> {
    Rc::new_cyclic(|weak| {
        let scheduler = TimerScheduler::new(weak.clone(), timers, on_change);
        SessionGate::new(
            config,
            api,
            GateServices {
                messages: Rc::new(I18nMessages),
                notifier,
                navigator,
                scheduler: Rc::new(scheduler),
            },
        )
    })
}
