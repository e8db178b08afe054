//! Domain entities for atelier.
//!
//! This module contains the core business entities:
//! - Stage: the fixed project lifecycle and its checklist
//! - Project: a collection moving from concept to delivery
//! - Manufacturer: read-only catalog records and their filters
//! - Product: marketplace pieces with category and search matching
//! - UploadWizard: the three-file intake flow
//! - Route: navigation targets and collaborator traits

pub mod filter;
pub mod manufacturer;
pub mod product;
mod project;
mod route;
mod stage;
pub mod upload;

pub use filter::{FilterCategory, FilterSelection};
pub use manufacturer::{Manufacturer, ManufacturerId};
pub use product::Product;
pub use project::{describe, ArtifactKind, FileRef, Progress, Project, ProjectId};
pub use route::{Navigator, NoticeKind, Notifier, Route};
pub use stage::{
    stage_checklist, Stage, StageEntry, StageStatus, StatusTag, TrackerStage, TRACKER_STAGES,
};
pub use upload::{AfterUpload, NextStep, StepState, UploadRules, UploadWizard};

#[cfg(test)]
pub(crate) use route::testing;
