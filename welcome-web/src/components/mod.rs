pub mod choice_game;
pub mod loading_overlay;
pub mod session_panel;
pub mod toast;
