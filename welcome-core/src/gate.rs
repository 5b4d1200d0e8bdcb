//! Session gate: checks the session once, decides what the page shows and
//! when the user is sent to the authentication page.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::GateConfig;
use crate::failure::SessionFailure;
use crate::messages::MessageKey;
use crate::session::SessionInfo;
use crate::{Messages, Navigator, Notifier, Scheduler, SessionApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Initializing,
    ResolvedValid,
    ResolvedInvalid,
    /// The host went away; late results and timers are ignored.
    Disposed,
}

/// Work the gate asks its host to run later through a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// Navigate to the authentication page after a failed check.
    Redirect,
    /// Lift the splash overlay.
    LiftSplash,
}

/// Snapshot of everything the page needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateView {
    pub phase: GatePhase,
    pub loading: bool,
    pub splash: bool,
    pub session: Option<SessionInfo>,
    pub failure: Option<SessionFailure>,
}

impl GateView {
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            phase: GatePhase::Initializing,
            loading: true,
            splash: true,
            session: None,
            failure: None,
        }
    }

    /// Content (user panel or expired notice, plus the game) is shown once the
    /// splash overlay has been lifted.
    #[must_use]
    pub const fn content_visible(&self) -> bool {
        !self.splash
    }
}

impl Default for GateView {
    fn default() -> Self {
        Self::initial()
    }
}

/// Collaborators the gate talks to instead of reaching for globals.
#[derive(Clone)]
pub struct GateServices {
    pub messages: Rc<dyn Messages>,
    pub notifier: Rc<dyn Notifier>,
    pub navigator: Rc<dyn Navigator>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// Fetch the session and reject payloads that are not flagged valid.
///
/// # Errors
///
/// Returns the classified failure when the request fails or the session is
/// not valid.
pub async fn check_session(
    api: &dyn SessionApi,
    config: &GateConfig,
) -> Result<SessionInfo, SessionFailure> {
    let info = api
        .fetch_session(&config.session_endpoint, config.request_timeout_ms)
        .await
        .map_err(|err| SessionFailure::classify(&err))?;
    if info.valid {
        Ok(info)
    } else {
        Err(SessionFailure::InvalidSession)
    }
}

pub struct SessionGate {
    config: GateConfig,
    api: Rc<dyn SessionApi>,
    services: GateServices,
    view: RefCell<GateView>,
}

impl SessionGate {
    #[must_use]
    pub fn new(config: GateConfig, api: Rc<dyn SessionApi>, services: GateServices) -> Self {
        Self {
            config,
            api,
            services,
            view: RefCell::new(GateView::initial()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> GateView {
        self.view.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> GatePhase {
        self.view.borrow().phase
    }

    /// Run the session check and apply its outcome.
    ///
    /// Only the first call in the `Initializing` phase does anything. The
    /// outcome is dropped if the gate was disposed while the request was in
    /// flight.
    pub async fn check(&self) {
        if self.phase() != GatePhase::Initializing {
            return;
        }
        let outcome = check_session(self.api.as_ref(), &self.config).await;
        self.settle(outcome);
    }

    /// Apply the outcome of a session check.
    pub fn settle(&self, outcome: Result<SessionInfo, SessionFailure>) {
        {
            let mut view = self.view.borrow_mut();
            if view.phase != GatePhase::Initializing {
                return;
            }
            view.loading = false;
            match &outcome {
                Ok(info) => {
                    view.phase = GatePhase::ResolvedValid;
                    view.session = Some(info.clone());
                }
                Err(failure) => {
                    view.phase = GatePhase::ResolvedInvalid;
                    view.failure = Some(failure.clone());
                }
            }
        }

        if let Err(failure) = &outcome {
            log::error!("session check failed: {failure}");
            let text = self.services.messages.text(failure.message_key());
            self.services.notifier.notify_error(&text);
            self.services
                .scheduler
                .schedule(self.config.redirect_delay_ms, DeferredTask::Redirect);
        }
        self.services
            .scheduler
            .schedule(self.config.splash_delay_ms, DeferredTask::LiftSplash);
    }

    /// Run a task previously handed to the scheduler.
    pub fn fire(&self, task: DeferredTask) {
        if self.phase() == GatePhase::Disposed {
            log::debug!("ignoring {task:?} after dispose");
            return;
        }
        match task {
            DeferredTask::LiftSplash => self.view.borrow_mut().splash = false,
            DeferredTask::Redirect => self.navigate_to_auth(),
        }
    }

    /// Log out, then leave for the authentication page whatever the outcome.
    pub async fn logout(&self) {
        match self.api.logout(&self.config.logout_endpoint).await {
            Ok(()) => {
                let text = self.services.messages.text(MessageKey::LogoutSuccess);
                self.services.notifier.notify_info(&text);
            }
            Err(err) => log::warn!("logout request failed: {err}"),
        }
        self.view.borrow_mut().session = None;
        self.navigate_to_auth();
    }

    /// Mark the gate as torn down. Pending results and tasks become no-ops.
    pub fn dispose(&self) {
        self.view.borrow_mut().phase = GatePhase::Disposed;
    }

    fn navigate_to_auth(&self) {
        log::debug!("navigating to {}", self.config.auth_path);
        self.services.navigator.navigate_to(&self.config.auth_path);
    }
}
