pub mod confidence_badge;
pub mod history_card;
pub mod history_panel;
pub mod sidebar;
pub mod toast;
