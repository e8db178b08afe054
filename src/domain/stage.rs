//! Project lifecycle stages and the progress checklist derived from them.

use super::Route;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a project, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Requirements and design files are being gathered
    Concept,
    /// Looking for a manufacturer
    FindManufacturers,
    /// A manufacturer was contacted, samples are on order
    OrderSamples,
    /// Mass production
    Production,
    /// Goods are on their way
    Shipping,
    /// Delivered
    Completed,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Concept,
        Stage::FindManufacturers,
        Stage::OrderSamples,
        Stage::Production,
        Stage::Shipping,
        Stage::Completed,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Concept => "Concept",
            Self::FindManufacturers => "Find Manufacturers",
            Self::OrderSamples => "Order Samples",
            Self::Production => "In Production",
            Self::Shipping => "Shipping",
            Self::Completed => "Completed",
        }
    }

    /// Badge for project lists
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Concept => "[CONCEPT]",
            Self::FindManufacturers => "[SOURCING]",
            Self::OrderSamples => "[SAMPLES]",
            Self::Production => "[PRODUCTION]",
            Self::Shipping => "[SHIPPING]",
            Self::Completed => "[DONE]",
        }
    }

    /// Longer status line shown on cards and in the detail modal
    pub fn status_line(&self) -> &'static str {
        match self {
            Self::Concept => "Gathering design files",
            Self::FindManufacturers => "Finding manufacturers...",
            Self::OrderSamples => "Active - awaiting sample response",
            Self::Production => "In production",
            Self::Shipping => "Shipping",
            Self::Completed => "Completed",
        }
    }

    /// Colour hint for this stage
    pub fn status_tag(&self) -> StatusTag {
        match self {
            Self::Concept => StatusTag::Design,
            Self::FindManufacturers => StatusTag::Neutral,
            Self::OrderSamples => StatusTag::Attention,
            Self::Production => StatusTag::Active,
            Self::Shipping | Self::Completed => StatusTag::Success,
        }
    }

    /// Progress a project has when it first reaches this stage
    pub fn default_progress(&self) -> u8 {
        match self {
            Self::Concept => 10,
            Self::FindManufacturers => 25,
            Self::OrderSamples => 50,
            Self::Production => 75,
            Self::Shipping => 90,
            Self::Completed => 100,
        }
    }

    /// Page associated with this stage
    pub fn destination(&self) -> Route {
        match self {
            Self::Concept => Route::Dashboard,
            Self::FindManufacturers => Route::Manufacturers,
            Self::OrderSamples => Route::Samples,
            Self::Production | Self::Shipping | Self::Completed => Route::Projects,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Display hint correlated with a stage. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTag {
    Neutral,
    Design,
    Attention,
    Active,
    Success,
}

/// One row of the stage tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerStage {
    pub stage: Stage,
    pub title: &'static str,
    pub description: &'static str,
}

/// The fixed checklist shown in the sidebar, dashboard and detail modal
pub const TRACKER_STAGES: [TrackerStage; 4] = [
    TrackerStage {
        stage: Stage::Concept,
        title: "Project Concept",
        description: "Define project requirements and goals",
    },
    TrackerStage {
        stage: Stage::FindManufacturers,
        title: "Find Manufacturers",
        description: "Search and connect with suitable manufacturers",
    },
    TrackerStage {
        stage: Stage::OrderSamples,
        title: "Order Samples",
        description: "Request and review product samples",
    },
    TrackerStage {
        stage: Stage::Production,
        title: "Production Setup",
        description: "Finalize production details and timeline",
    },
];

/// Render state of a checklist row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    Active,
    Pending,
}

/// A checklist row paired with its status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEntry {
    pub stage: TrackerStage,
    pub status: StageStatus,
}

/// Derive the tracker checklist for a project's current stage.
///
/// Rows before the current stage are completed, the matching row is
/// active and later rows are pending.
pub fn stage_checklist(current: Stage) -> Vec<StageEntry> {
    TRACKER_STAGES
        .iter()
        .map(|tracker| {
            let status = match tracker.stage.index().cmp(&current.index()) {
                std::cmp::Ordering::Less => StageStatus::Completed,
                std::cmp::Ordering::Equal => StageStatus::Active,
                std::cmp::Ordering::Greater => StageStatus::Pending,
            };
            StageEntry {
                stage: *tracker,
                status,
            }
        })
        .collect()
}
