use welcome_core::GateConfig;

const STATIC_GATE_CONFIG: &str = include_str!("../static/gate.json");

/// Gate configuration bundled with the page, or the defaults if it does not parse.
#[must_use]
pub fn load_gate_config() -> GateConfig {
    GateConfig::from_json(STATIC_GATE_CONFIG).unwrap_or_else(|err| {
        log::warn!("bundled gate config is invalid, using defaults: {err}");
        GateConfig::default_config()
    })
}
