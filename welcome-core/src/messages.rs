/// Localized strings consumed by the welcome page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    ServerError,
    SessionNotFound,
    ServerTimeout,
    ServerUnavailable,
    UserLabel,
    SessionExpired,
    LogoutSuccess,
    LogoutButton,
    Loading,
    TokenLabel,
}

impl MessageKey {
    pub const ALL: [Self; 10] = [
        Self::ServerError,
        Self::SessionNotFound,
        Self::ServerTimeout,
        Self::ServerUnavailable,
        Self::UserLabel,
        Self::SessionExpired,
        Self::LogoutSuccess,
        Self::LogoutButton,
        Self::Loading,
        Self::TokenLabel,
    ];

    /// Dotted key into the translation bundle.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ServerError => "error.server_error",
            Self::SessionNotFound => "error.session_not_found",
            Self::ServerTimeout => "error.server_timeout",
            Self::ServerUnavailable => "error.server_unavailable",
            Self::UserLabel => "welcome.user_label",
            Self::SessionExpired => "welcome.session_expired",
            Self::LogoutSuccess => "auth.logout_success",
            Self::LogoutButton => "auth.logout_button",
            Self::Loading => "welcome.loading",
            Self::TokenLabel => "welcome.token_label",
        }
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
