//! Stateful services for atelier.
//!
//! This module contains:
//! - ProjectStore: the current project and the recent list
//! - ManufacturerCatalog: incremental, filterable manufacturer loading
//! - ContactWorkflow: the contact transition and its follow-ups
//! - Inbox: sample conversations
//! - ProductCatalog: the marketplace's category and search view
//! - Scheduler: delayed events with bulk cancellation

pub mod catalog;
pub mod contact;
mod inbox;
mod marketplace;
mod scheduler;
mod store;

pub use catalog::{FixtureSource, LoadRequest, ManufacturerCatalog, ManufacturerSource};
pub use contact::{request_template, ContactReceipt, ContactStatus, ContactWorkflow, FollowUp};
pub use inbox::{Inbox, Message};
pub use marketplace::ProductCatalog;
pub use scheduler::Scheduler;
pub use store::ProjectStore;
