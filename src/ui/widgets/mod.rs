//! Reusable UI widgets for atelier.

pub mod contact_popup;
pub mod filter_panel;
pub mod help;
pub mod manufacturer_list;
pub mod product_list;
pub mod project_cards;
pub mod samples;
pub mod sidebar;
pub mod stage_tracker;
pub mod text_input;
pub mod upload_wizard;
