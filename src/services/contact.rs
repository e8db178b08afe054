//! Contacting a manufacturer: the stage transition and what happens next.

use crate::domain::{Manufacturer, ManufacturerId, Navigator, Progress, Project, ProjectId, Route, Stage};
use crate::services::ProjectStore;

/// Progress a project is set to once a manufacturer has been contacted
pub const CONTACTED_PROGRESS: u8 = 50;

/// Outcome reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    Sent,
}

/// Confirmation of a completed contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    pub project_id: ProjectId,
    pub manufacturer_id: ManufacturerId,
    pub manufacturer: String,
    pub status: ContactStatus,
}

/// Follow-ups offered after a contact request is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Open the sample conversation with this manufacturer
    OpenSamples,
    /// Return to the catalog
    KeepBrowsing,
}

/// Drives the "contact a manufacturer" transition
#[derive(Debug, Clone, Default)]
pub struct ContactWorkflow {
    contacted: Vec<ManufacturerId>,
    last_receipt: Option<ContactReceipt>,
}

impl ContactWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `project` to sample ordering with `manufacturer` engaged.
    ///
    /// Stage and progress are overwritten, not accumulated: the result is
    /// always `OrderSamples` at 50% whatever the prior stage.
    pub fn contact(
        &mut self,
        store: &mut ProjectStore,
        project: &Project,
        manufacturer: &Manufacturer,
    ) -> ContactReceipt {
        let next = project
            .clone()
            .with_manufacturer(manufacturer.name.clone())
            .with_stage(Stage::OrderSamples, Progress::new(CONTACTED_PROGRESS));

        tracing::info!(
            project = %next.id,
            manufacturer = %manufacturer.name,
            "contact request sent"
        );
        store.update_project(next);

        let receipt = ContactReceipt {
            project_id: project.id,
            manufacturer_id: manufacturer.id,
            manufacturer: manufacturer.name.clone(),
            status: ContactStatus::Sent,
        };
        self.last_receipt = Some(receipt.clone());
        receipt
    }

    /// Most recent contact awaiting a follow-up choice
    pub fn last_receipt(&self) -> Option<&ContactReceipt> {
        self.last_receipt.as_ref()
    }

    /// Act on the user's follow-up choice
    pub fn follow_up(&mut self, choice: FollowUp, navigator: &mut dyn Navigator) {
        let Some(receipt) = self.last_receipt.take() else {
            return;
        };
        match choice {
            FollowUp::OpenSamples => {
                if !self.contacted.contains(&receipt.manufacturer_id) {
                    self.contacted.push(receipt.manufacturer_id);
                }
                navigator.go_to(Route::Samples);
            }
            FollowUp::KeepBrowsing => {}
        }
    }

    /// Manufacturers with an open sample conversation, in contact order
    pub fn contacted(&self) -> &[ManufacturerId] {
        &self.contacted
    }

    pub fn is_contacted(&self, id: ManufacturerId) -> bool {
        self.contacted.contains(&id)
    }
}

/// Pre-filled request text the user can edit before sending
pub fn request_template(project: &Project, manufacturer: &Manufacturer) -> String {
    let mut lines = vec![
        format!("Hello {},", manufacturer.name),
        String::new(),
        format!("Project Details ({}):", project.name),
        "• Product Type: Custom apparel design".to_string(),
        "• Quantity: 500-1000 units per order".to_string(),
        "• Materials: Premium cotton blend, sustainable fabrics preferred".to_string(),
        "• Size Range: XS-XXL (full size run)".to_string(),
        "• Color Options: 3-5 colorways per design".to_string(),
        "• Printing: Screen printing and embroidery".to_string(),
        "• Timeline: 4-6 weeks production after sample approval".to_string(),
        "• Budget: $15-25 per unit".to_string(),
        "• Special Requirements: Eco-friendly packaging, compliance with US/EU standards"
            .to_string(),
    ];

    if !project.artifacts.is_empty() {
        lines.push(String::new());
        lines.push("Attached files:".to_string());
        for (kind, file) in &project.artifacts {
            lines.push(format!("• {}: {}", kind.title(), file.name));
        }
    }

    lines.push(String::new());
    lines.push("Additional Notes:".to_string());
    lines.push(
        "Looking for a long-term manufacturing partner for ongoing seasonal collections. \
         Quality and ethical production practices are top priorities."
            .to_string(),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manufacturer::sample;
    use crate::domain::testing::RecordingNavigator;
    use crate::domain::{ArtifactKind, FileRef};
    use std::collections::BTreeMap;

    fn apex() -> Manufacturer {
        let mut m = sample("Apex Textiles", "Guangzhou, China", 4.8, &["Apparel"]);
        m.id = ManufacturerId(7);
        m
    }

    #[test]
    fn test_contact_sets_manufacturer_stage_and_progress() {
        let mut store = ProjectStore::new(4);
        let project = Project::new("Capsule", Stage::Concept);
        assert!(project.manufacturer.is_none());
        store.add_project(project.clone());

        let mut workflow = ContactWorkflow::new();
        let receipt = workflow.contact(&mut store, &project, &apex());

        assert_eq!(receipt.status, ContactStatus::Sent);
        let updated = store.current().unwrap();
        assert_eq!(updated.id, project.id);
        assert_eq!(updated.manufacturer.as_deref(), Some("Apex Textiles"));
        assert_eq!(updated.current_stage, Stage::OrderSamples);
        assert_eq!(updated.progress.percent(), 50);
        assert!(updated.description.contains("Apex Textiles"));
        assert_eq!(store.recent().len(), 1);
    }

    #[test]
    fn test_contact_overwrites_regardless_of_prior_stage() {
        for stage in Stage::ALL {
            let mut store = ProjectStore::new(4);
            let project = Project::new("P", stage);
            let mut workflow = ContactWorkflow::new();
            workflow.contact(&mut store, &project, &apex());

            let updated = store.current().unwrap();
            assert_eq!(updated.progress.percent(), 50, "{stage:?}");
            assert_eq!(updated.current_stage, Stage::OrderSamples);
        }
    }

    #[test]
    fn test_open_samples_follow_up() {
        let mut store = ProjectStore::new(4);
        let project = Project::new("P", Stage::FindManufacturers);
        let mut workflow = ContactWorkflow::new();
        let mut nav = RecordingNavigator::default();

        workflow.contact(&mut store, &project, &apex());
        workflow.follow_up(FollowUp::OpenSamples, &mut nav);

        assert_eq!(nav.visited, vec![Route::Samples]);
        assert!(workflow.is_contacted(ManufacturerId(7)));
        assert!(workflow.last_receipt().is_none());
    }

    #[test]
    fn test_keep_browsing_changes_nothing_else() {
        let mut store = ProjectStore::new(4);
        let project = Project::new("P", Stage::FindManufacturers);
        let mut workflow = ContactWorkflow::new();
        let mut nav = RecordingNavigator::default();

        workflow.contact(&mut store, &project, &apex());
        workflow.follow_up(FollowUp::KeepBrowsing, &mut nav);

        assert!(nav.visited.is_empty());
        assert!(workflow.contacted().is_empty());
        assert_eq!(
            store.current().map(|p| p.current_stage),
            Some(Stage::OrderSamples)
        );
    }

    #[test]
    fn test_contacting_twice_lists_manufacturer_once() {
        let mut store = ProjectStore::new(4);
        let project = Project::new("P", Stage::FindManufacturers);
        let mut workflow = ContactWorkflow::new();
        let mut nav = RecordingNavigator::default();

        for _ in 0..2 {
            workflow.contact(&mut store, &project, &apex());
            workflow.follow_up(FollowUp::OpenSamples, &mut nav);
        }
        assert_eq!(workflow.contacted(), &[ManufacturerId(7)]);
    }

    #[test]
    fn test_request_template_lists_attachments() {
        let mut artifacts = BTreeMap::new();
        artifacts.insert(ArtifactKind::TechPack, FileRef::new("pack.pdf", 10));
        let project = Project::new("Capsule", Stage::FindManufacturers).with_artifacts(artifacts);

        let text = request_template(&project, &apex());
        assert!(text.starts_with("Hello Apex Textiles,"));
        assert!(text.contains("Design Upload: pack.pdf"));
        assert!(text.contains("Additional Notes:"));
    }

    #[test]
    fn test_request_template_attachment_order() {
        let mut artifacts = BTreeMap::new();
        artifacts.insert(ArtifactKind::Materials, FileRef::new("fabric.ai", 10));
        artifacts.insert(ArtifactKind::TechPack, FileRef::new("pack.pdf", 10));
        let project = Project::new("Capsule", Stage::FindManufacturers).with_artifacts(artifacts);

        let text = request_template(&project, &apex());
        let attached: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "Attached files:")
            .take(3)
            .collect();
        insta::assert_snapshot!(attached.join("\n"), @r"
        Attached files:
        • Design Upload: pack.pdf
        • Materials Information: fabric.ai
        ");
    }
}
