use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use welcome_core::{
    DeferredTask, GateConfig, GatePhase, GateServices, MessageKey, Messages, Navigator, Notifier,
    Scheduler, SessionApi, SessionGate,
};

use crate::http::ReqwestSessionApi;

const EN_CATALOG: &str = include_str!("../../welcome-web/i18n/en.json");

/// English strings from the web bundle.
pub struct CatalogMessages {
    catalog: Value,
}

impl CatalogMessages {
    /// # Errors
    ///
    /// Returns an error if the bundled catalog is not valid JSON.
    pub fn english() -> Result<Self> {
        let catalog = serde_json::from_str(EN_CATALOG).context("parsing bundled en.json")?;
        Ok(Self { catalog })
    }
}

impl Messages for CatalogMessages {
    fn text(&self, key: MessageKey) -> String {
        key.key()
            .split('.')
            .try_fold(&self.catalog, |node, part| node.get(part))
            .and_then(Value::as_str)
            .map_or_else(|| key.key().to_string(), str::to_string)
    }
}

/// Everything the gate said or did during a probe.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProbeLog {
    pub errors: Vec<String>,
    pub infos: Vec<String>,
    pub navigations: Vec<String>,
    #[serde(skip)]
    pub scheduled: Vec<(u32, DeferredTask)>,
}

/// Records notifications, navigations and scheduled tasks for later replay.
#[derive(Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<ProbeLog>>,
    echo: bool,
}

impl Recorder {
    #[must_use]
    pub fn new(echo: bool) -> Self {
        Self {
            log: Rc::default(),
            echo,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ProbeLog {
        self.log.borrow().clone()
    }

    fn take_scheduled(&self) -> Vec<(u32, DeferredTask)> {
        let mut tasks = std::mem::take(&mut self.log.borrow_mut().scheduled);
        tasks.sort_by_key(|(delay, _)| *delay);
        tasks
    }
}

impl Notifier for Recorder {
    fn notify_error(&self, text: &str) {
        if self.echo {
            println!("  {} {}", "✖".red().bold(), text.red());
        }
        self.log.borrow_mut().errors.push(text.to_string());
    }

    fn notify_info(&self, text: &str) {
        if self.echo {
            println!("  {} {}", "ℹ".blue().bold(), text);
        }
        self.log.borrow_mut().infos.push(text.to_string());
    }
}

impl Navigator for Recorder {
    fn navigate_to(&self, path: &str) {
        if self.echo {
            println!("  {} {}", "→".yellow(), path);
        }
        self.log.borrow_mut().navigations.push(path.to_string());
    }
}

impl Scheduler for Recorder {
    fn schedule(&self, delay_ms: u32, task: DeferredTask) {
        self.log.borrow_mut().scheduled.push((delay_ms, task));
    }
}

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub config: GateConfig,
    /// Sleep out the scheduled delays instead of firing tasks immediately.
    pub wait: bool,
    pub logout: bool,
    pub echo: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub session_endpoint: String,
    pub valid: bool,
    pub username: Option<String>,
    pub token: Option<String>,
    pub failure: Option<String>,
    pub splash_lifted: bool,
    #[serde(flatten)]
    pub log: ProbeLog,
}

/// Drive one gate through check, deferred tasks and optional logout.
///
/// # Errors
///
/// Returns an error if the message catalog cannot be loaded.
pub async fn run_probe(api: Rc<dyn SessionApi>, options: &ProbeOptions) -> Result<ProbeReport> {
    let recorder = Recorder::new(options.echo);
    let services = GateServices {
        messages: Rc::new(CatalogMessages::english()?),
        notifier: Rc::new(recorder.clone()),
        navigator: Rc::new(recorder.clone()),
        scheduler: Rc::new(recorder.clone()),
    };
    let gate = SessionGate::new(options.config.clone(), api, services);

    gate.check().await;

    let mut elapsed = 0_u32;
    for (delay, task) in recorder.take_scheduled() {
        if options.wait && delay > elapsed {
            tokio::time::sleep(Duration::from_millis(u64::from(delay - elapsed))).await;
            elapsed = delay;
        }
        log::debug!("firing {task:?} at {delay}ms");
        gate.fire(task);
    }

    let view = gate.view();
    if options.logout && view.phase == GatePhase::ResolvedValid {
        gate.logout().await;
    }

    Ok(ProbeReport {
        session_endpoint: options.config.session_endpoint.clone(),
        valid: view.phase == GatePhase::ResolvedValid,
        username: view.session.as_ref().map(|s| s.username().to_string()),
        token: view.session.as_ref().map(|s| s.token.clone()),
        failure: view.failure.as_ref().map(ToString::to_string),
        splash_lifted: view.content_visible(),
        log: recorder.snapshot(),
    })
}

/// Probe a live backend over HTTP.
///
/// # Errors
///
/// Returns an error if the HTTP client or message catalog cannot be set up.
pub async fn probe_backend(cookie: Option<String>, options: &ProbeOptions) -> Result<ProbeReport> {
    let api: Rc<dyn SessionApi> = Rc::new(ReqwestSessionApi::new(cookie)?);
    run_probe(api, options).await
}

pub fn print_report(report: &ProbeReport) {
    println!("{} {}", "Endpoint:".bold(), report.session_endpoint);
    if report.valid {
        println!(
            "{} {}",
            "✅ Session valid for".green().bold(),
            report.username.as_deref().unwrap_or_default()
        );
        if let Some(token) = &report.token {
            println!("   token: {token}");
        }
    } else {
        println!(
            "{} {}",
            "❌ No session:".red().bold(),
            report.failure.as_deref().unwrap_or("unknown")
        );
    }
}
