use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::executor::block_on;
use welcome_core::{
    DeferredTask, GateConfig, GatePhase, GateServices, MessageKey, Messages, Navigator, Notifier,
    RequestFailure, Scheduler, SessionApi, SessionFailure, SessionGate, SessionInfo, SessionUser,
};

struct ScriptedApi {
    session: RefCell<VecDeque<Result<SessionInfo, RequestFailure>>>,
    logout: RefCell<Option<Result<(), RequestFailure>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedApi {
    fn new(session: Result<SessionInfo, RequestFailure>) -> Self {
        Self {
            session: RefCell::new(VecDeque::from([session])),
            logout: RefCell::new(Some(Ok(()))),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn with_logout(self, outcome: Result<(), RequestFailure>) -> Self {
        self.logout.replace(Some(outcome));
        self
    }
}

#[async_trait::async_trait(?Send)]
impl SessionApi for ScriptedApi {
    async fn fetch_session(
        &self,
        endpoint: &str,
        timeout_ms: u32,
    ) -> Result<SessionInfo, RequestFailure> {
        self.calls
            .borrow_mut()
            .push(format!("GET {endpoint} {timeout_ms}"));
        self.session
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RequestFailure::other("no scripted response")))
    }

    async fn logout(&self, endpoint: &str) -> Result<(), RequestFailure> {
        self.calls.borrow_mut().push(format!("POST {endpoint}"));
        self.logout.borrow_mut().take().unwrap_or(Ok(()))
    }
}

struct KeyEcho;

impl Messages for KeyEcho {
    fn text(&self, key: MessageKey) -> String {
        format!("<{}>", key.key())
    }
}

#[derive(Default)]
struct Recorder {
    errors: RefCell<Vec<String>>,
    infos: RefCell<Vec<String>>,
    navigations: RefCell<Vec<String>>,
    scheduled: RefCell<Vec<(u32, DeferredTask)>>,
}

impl Notifier for Recorder {
    fn notify_error(&self, text: &str) {
        self.errors.borrow_mut().push(text.to_string());
    }

    fn notify_info(&self, text: &str) {
        self.infos.borrow_mut().push(text.to_string());
    }
}

impl Navigator for Recorder {
    fn navigate_to(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_string());
    }
}

impl Scheduler for Recorder {
    fn schedule(&self, delay_ms: u32, task: DeferredTask) {
        self.scheduled.borrow_mut().push((delay_ms, task));
    }
}

fn gate_with(api: ScriptedApi) -> (SessionGate, Rc<Recorder>, Rc<ScriptedApi>) {
    let recorder = Rc::new(Recorder::default());
    let api = Rc::new(api);
    let services = GateServices {
        messages: Rc::new(KeyEcho),
        notifier: recorder.clone(),
        navigator: recorder.clone(),
        scheduler: recorder.clone(),
    };
    let gate = SessionGate::new(GateConfig::default_config(), api.clone(), services);
    (gate, recorder, api)
}

fn valid_session() -> SessionInfo {
    SessionInfo {
        valid: true,
        user: SessionUser {
            username: "ana.silva".into(),
        },
        token: "eyJhbGciOiJIUzI1NiJ9.payload.sig".into(),
    }
}

/// Fire every scheduled task in delay order, like timers elapsing.
fn run_timers(gate: &SessionGate, recorder: &Recorder) {
    let mut pending = recorder.scheduled.borrow().clone();
    pending.sort_by_key(|(delay, _)| *delay);
    for (_, task) in pending {
        gate.fire(task);
    }
}

fn failed_check(failure: RequestFailure) -> (SessionGate, Rc<Recorder>) {
    let (gate, recorder, _) = gate_with(ScriptedApi::new(Err(failure)));
    block_on(gate.check());
    (gate, recorder)
}

#[test]
fn not_found_notifies_and_redirects_after_configured_delay() {
    let (gate, recorder) = failed_check(RequestFailure::status(404));

    assert_eq!(
        *recorder.errors.borrow(),
        vec!["<error.session_not_found>".to_string()]
    );
    assert!(
        recorder
            .scheduled
            .borrow()
            .contains(&(2_000, DeferredTask::Redirect))
    );
    assert!(recorder.navigations.borrow().is_empty());

    run_timers(&gate, &recorder);
    assert_eq!(*recorder.navigations.borrow(), vec!["/auth".to_string()]);
    assert_eq!(gate.phase(), GatePhase::ResolvedInvalid);
}

#[test]
fn server_error_status_uses_server_error_message() {
    let (_, recorder) = failed_check(RequestFailure::status(500));
    assert_eq!(
        *recorder.errors.borrow(),
        vec!["<error.server_error>".to_string()]
    );
}

#[test]
fn timeout_uses_timeout_message() {
    let (gate, recorder) = failed_check(RequestFailure::timed_out(5_000));
    assert_eq!(
        *recorder.errors.borrow(),
        vec!["<error.server_timeout>".to_string()]
    );
    assert_eq!(gate.view().failure, Some(SessionFailure::Timeout));
}

#[test]
fn network_failure_uses_unavailable_message() {
    let (_, recorder) = failed_check(RequestFailure::network("connection refused"));
    assert_eq!(
        *recorder.errors.borrow(),
        vec!["<error.server_unavailable>".to_string()]
    );
}

#[test]
fn invalid_payload_is_a_failure_with_generic_message() {
    let mut info = valid_session();
    info.valid = false;
    let (gate, recorder, _) = gate_with(ScriptedApi::new(Ok(info)));
    block_on(gate.check());

    let view = gate.view();
    assert_eq!(view.phase, GatePhase::ResolvedInvalid);
    assert_eq!(view.session, None);
    assert_eq!(view.failure, Some(SessionFailure::InvalidSession));
    assert_eq!(
        *recorder.errors.borrow(),
        vec!["<error.server_error>".to_string()]
    );
}

#[test]
fn valid_session_is_stored_without_redirect() {
    let (gate, recorder, api) = gate_with(ScriptedApi::new(Ok(valid_session())));
    block_on(gate.check());
    run_timers(&gate, &recorder);

    let view = gate.view();
    assert_eq!(view.phase, GatePhase::ResolvedValid);
    assert_eq!(view.session.as_ref().map(SessionInfo::username), Some("ana.silva"));
    assert!(recorder.errors.borrow().is_empty());
    assert!(recorder.navigations.borrow().is_empty());
    assert_eq!(*api.calls.borrow(), vec!["GET /api/session 5000".to_string()]);
}

#[test]
fn loading_clears_immediately_and_splash_after_delay() {
    let (gate, recorder, _) = gate_with(ScriptedApi::new(Ok(valid_session())));
    assert!(gate.view().loading);
    assert!(gate.view().splash);

    block_on(gate.check());
    let settled = gate.view();
    assert!(!settled.loading);
    assert!(settled.splash);
    assert!(!settled.content_visible());
    assert_eq!(
        *recorder.scheduled.borrow(),
        vec![(1_000, DeferredTask::LiftSplash)]
    );

    gate.fire(DeferredTask::LiftSplash);
    assert!(gate.view().content_visible());
}

#[test]
fn check_runs_only_once() {
    let (gate, recorder, api) = gate_with(ScriptedApi::new(Ok(valid_session())));
    block_on(gate.check());
    block_on(gate.check());
    assert_eq!(api.calls.borrow().len(), 1);
    assert_eq!(recorder.scheduled.borrow().len(), 1);
}

#[test]
fn disposed_gate_ignores_pending_timers() {
    let (gate, recorder) = failed_check(RequestFailure::status(404));
    gate.dispose();
    run_timers(&gate, &recorder);

    assert!(recorder.navigations.borrow().is_empty());
    assert!(gate.view().splash);
    assert_eq!(gate.phase(), GatePhase::Disposed);
}

#[test]
fn result_arriving_after_dispose_is_dropped() {
    let (gate, recorder, _) = gate_with(ScriptedApi::new(Err(RequestFailure::status(500))));
    gate.dispose();
    gate.settle(Err(SessionFailure::ServerError));

    assert!(recorder.errors.borrow().is_empty());
    assert!(recorder.scheduled.borrow().is_empty());
}

#[test]
fn logout_notifies_and_navigates() {
    let (gate, recorder, api) = gate_with(ScriptedApi::new(Ok(valid_session())));
    block_on(gate.check());
    block_on(gate.logout());

    assert_eq!(
        *recorder.infos.borrow(),
        vec!["<auth.logout_success>".to_string()]
    );
    assert_eq!(*recorder.navigations.borrow(), vec!["/auth".to_string()]);
    assert_eq!(gate.view().session, None);
    assert_eq!(api.calls.borrow().last().map(String::as_str), Some("POST /api/logout"));
}

#[test]
fn failed_logout_still_navigates() {
    let api = ScriptedApi::new(Ok(valid_session())).with_logout(Err(RequestFailure::status(500)));
    let (gate, recorder, _) = gate_with(api);
    block_on(gate.check());
    block_on(gate.logout());

    assert!(recorder.infos.borrow().is_empty());
    assert_eq!(*recorder.navigations.borrow(), vec!["/auth".to_string()]);
}

#[test]
fn custom_config_drives_endpoints_and_delays() {
    let recorder = Rc::new(Recorder::default());
    let api = Rc::new(ScriptedApi::new(Err(RequestFailure::status(404))));
    let config = GateConfig::from_json(
        r#"{ "session_endpoint": "/v2/session", "auth_path": "/login", "redirect_delay_ms": 10, "request_timeout_ms": 750 }"#,
    )
    .unwrap();
    let gate = SessionGate::new(
        config,
        api.clone(),
        GateServices {
            messages: Rc::new(KeyEcho),
            notifier: recorder.clone(),
            navigator: recorder.clone(),
            scheduler: recorder.clone(),
        },
    );
    block_on(gate.check());
    run_timers(&gate, &recorder);

    assert_eq!(*api.calls.borrow(), vec!["GET /v2/session 750".to_string()]);
    assert!(
        recorder
            .scheduled
            .borrow()
            .contains(&(10, DeferredTask::Redirect))
    );
    assert_eq!(*recorder.navigations.borrow(), vec!["/login".to_string()]);
}
