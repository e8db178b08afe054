//! Project entity tracked from first sketch to delivery.

use super::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short form for compact UI
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion percentage, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Progress(u8);

impl Progress {
    /// Clamp to 100
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Fraction for gauge widgets
    pub fn ratio(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The three files a new project asks for, in wizard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    TechPack,
    Sizing,
    Materials,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::TechPack,
        ArtifactKind::Sizing,
        ArtifactKind::Materials,
    ];

    /// 1-based wizard step number
    pub fn step_number(&self) -> usize {
        *self as usize + 1
    }

    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(*self as usize + 1).copied()
    }

    pub fn previous(&self) -> Option<Self> {
        (*self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::TechPack => "Design Upload",
            Self::Sizing => "Sizing Documentation",
            Self::Materials => "Materials Information",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TechPack => "Upload your tech pack with design specifications",
            Self::Sizing => "Upload sizing charts and measurements",
            Self::Materials => "Upload material specifications and requirements",
        }
    }

    /// Key used in exported data
    pub fn key(&self) -> &'static str {
        match self {
            Self::TechPack => "techPack",
            Self::Sizing => "sizing",
            Self::Materials => "materials",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Metadata for a user-selected file. No content is ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Lowercased text after the last '.', empty when there is none
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => String::new(),
        }
    }
}

/// A fashion project moving through the production lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub current_stage: Stage,
    pub progress: Progress,
    /// Engaged manufacturer, set once a contact succeeds
    pub manufacturer: Option<String>,
    pub description: String,
    created_at: DateTime<Utc>,
    pub artifacts: BTreeMap<ArtifactKind, FileRef>,
}

impl Project {
    /// Create a project at `stage` with that stage's default progress
    pub fn new(name: impl Into<String>, stage: Stage) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            current_stage: stage,
            progress: Progress::new(stage.default_progress()),
            manufacturer: None,
            description: describe(stage, None),
            created_at: Utc::now(),
            artifacts: BTreeMap::new(),
        }
    }

    /// Same as `new` with an explicit creation time
    pub fn created(name: impl Into<String>, stage: Stage, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            ..Self::new(name, stage)
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Next state at `stage`, with the description regenerated
    pub fn with_stage(mut self, stage: Stage, progress: Progress) -> Self {
        self.current_stage = stage;
        self.progress = progress;
        self.description = describe(stage, self.manufacturer.as_deref());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self.description = describe(self.current_stage, self.manufacturer.as_deref());
        self
    }

    pub fn with_artifacts(mut self, artifacts: BTreeMap<ArtifactKind, FileRef>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Replace the free-text summary; it is overwritten on the next stage change
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Summary text for a project at `stage`
pub fn describe(stage: Stage, manufacturer: Option<&str>) -> String {
    match (stage, manufacturer) {
        (Stage::Concept, _) => "New project. Upload a tech pack, sizing and materials to start \
             matching with manufacturers."
            .to_string(),
        (Stage::FindManufacturers, _) => "Design files are in. Browse recommended \
             manufacturers and reach out to the best fit."
            .to_string(),
        (Stage::OrderSamples, Some(m)) => format!(
            "Successfully connected with {m} for production partnership. Project requirements \
             and design files have been shared. Moving to sample ordering to validate quality \
             and specifications."
        ),
        (Stage::OrderSamples, None) => {
            "Awaiting sample responses from contacted manufacturers.".to_string()
        }
        (Stage::Production, Some(m)) => {
            format!("In mass production with {m}; quality checkpoints are scheduled.")
        }
        (Stage::Production, None) => {
            "In mass production; quality checkpoints are scheduled.".to_string()
        }
        (Stage::Shipping, _) => "Production completed, currently in shipping.".to_string(),
        (Stage::Completed, _) => "Delivered.".to_string(),
    }
}
