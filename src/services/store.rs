//! In-memory project store: the current project plus a bounded recent list.

use crate::domain::{Project, ProjectId, Stage};
use chrono::{TimeZone, Utc};

/// Single owner of project state for the session
#[derive(Debug, Clone)]
pub struct ProjectStore {
    current: Option<Project>,
    recent: Vec<Project>,
    capacity: usize,
}

impl ProjectStore {
    /// Create an empty store keeping at most `capacity` recent projects
    pub fn new(capacity: usize) -> Self {
        Self {
            current: None,
            recent: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Store pre-populated with a few projects in flight
    pub fn seeded(capacity: usize) -> Self {
        let mut store = Self::new(capacity);
        store.recent = sample_projects();
        store.recent.truncate(store.capacity);
        store
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    /// Most recently touched first
    pub fn recent(&self) -> &[Project] {
        &self.recent
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.recent
            .iter()
            .find(|p| p.id == id)
            .or_else(|| self.current.as_ref().filter(|p| p.id == id))
    }

    /// Make `project` current and put it at the front of the recent list
    pub fn add_project(&mut self, project: Project) {
        tracing::debug!(id = %project.id, name = %project.name, "project added");
        self.recent.insert(0, project.clone());
        self.recent.truncate(self.capacity);
        self.current = Some(project);
    }

    /// Replace the project with the same id in place, or add it if unknown.
    /// The project always becomes current.
    pub fn update_project(&mut self, project: Project) {
        let Some(slot) = self.recent.iter_mut().find(|p| p.id == project.id) else {
            self.add_project(project);
            return;
        };

        if project.progress < slot.progress {
            tracing::warn!(
                id = %project.id,
                from = %slot.progress,
                to = %project.progress,
                "project progress moved backwards"
            );
        }
        tracing::debug!(id = %project.id, stage = %project.current_stage, "project updated");
        *slot = project.clone();
        self.current = Some(project);
    }

    /// Make a known project current without reordering the recent list
    pub fn select(&mut self, id: ProjectId) -> bool {
        match self.get(id).cloned() {
            Some(project) => {
                self.current = Some(project);
                true
            }
            None => false,
        }
    }

    /// Return the current project, creating one with `make` when there is none
    pub fn ensure_current(&mut self, make: impl FnOnce() -> Project) -> &Project {
        let project = match self.current.take() {
            Some(project) => project,
            None => {
                let project = make();
                tracing::info!(id = %project.id, "no current project, created one implicitly");
                self.recent.insert(0, project.clone());
                self.recent.truncate(self.capacity);
                project
            }
        };
        self.current.insert(project)
    }
}

fn seeded_project(
    name: &str,
    stage: Stage,
    progress: u8,
    manufacturer: &str,
    day: u32,
    summary: &str,
) -> Project {
    let created = Utc
        .with_ymd_and_hms(2024, 2, day, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    Project::created(name, stage, created)
        .with_manufacturer(manufacturer)
        .with_stage(stage, crate::domain::Progress::new(progress))
        .with_description(summary)
}

fn sample_projects() -> Vec<Project> {
    vec![
        seeded_project(
            "Summer 2024 Collection",
            Stage::Production,
            75,
            "Apex Textiles",
            15,
            "High-performance activewear collection featuring moisture-wicking fabrics and \
             ergonomic designs. Currently in mass production with quality checkpoints scheduled.",
        ),
        seeded_project(
            "Denim Jacket Series",
            Stage::OrderSamples,
            45,
            "Premium Denim Co.",
            20,
            "Premium denim jackets with vintage-inspired washes and contemporary fits. Samples \
             received, awaiting approval before moving to production.",
        ),
        seeded_project(
            "Sustainable Tees",
            Stage::Shipping,
            90,
            "EcoFab Solutions",
            10,
            "Eco-friendly t-shirt line made from organic cotton and recycled materials. \
             Production completed, currently in shipping.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Progress;

    #[test]
    fn test_add_project_keeps_four_newest_first() {
        let mut store = ProjectStore::new(4);
        let projects: Vec<Project> = (0..5)
            .map(|i| Project::new(format!("P{i}"), Stage::Concept))
            .collect();
        for p in &projects {
            store.add_project(p.clone());
        }

        assert_eq!(store.recent().len(), 4);
        assert_eq!(store.recent()[0].id, projects[4].id);
        assert_eq!(store.recent()[3].id, projects[1].id);
        assert!(store.get(projects[0].id).is_none());
        assert_eq!(store.current().map(|p| p.id), Some(projects[4].id));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = ProjectStore::new(4);
        let a = Project::new("A", Stage::Concept);
        let b = Project::new("B", Stage::Concept);
        store.add_project(a.clone());
        store.add_project(b.clone());

        let a2 = a.clone().with_stage(Stage::FindManufacturers, Progress::new(25));
        store.update_project(a2);

        assert_eq!(store.recent().len(), 2);
        assert_eq!(store.recent()[0].id, b.id);
        assert_eq!(store.recent()[1].current_stage, Stage::FindManufacturers);
        assert_eq!(store.current().map(|p| p.id), Some(a.id));
    }

    #[test]
    fn test_update_unknown_behaves_like_add() {
        let mut store = ProjectStore::new(2);
        store.add_project(Project::new("A", Stage::Concept));
        let fresh = Project::new("B", Stage::Concept);
        store.update_project(fresh.clone());
        assert_eq!(store.recent()[0].id, fresh.id);
        assert_eq!(store.current().map(|p| p.id), Some(fresh.id));
    }

    #[test]
    fn test_ensure_current_creates_once() {
        let mut store = ProjectStore::new(4);
        let id = store
            .ensure_current(|| Project::new("Untitled", Stage::FindManufacturers))
            .id;
        let again = store
            .ensure_current(|| Project::new("Other", Stage::Concept))
            .id;
        assert_eq!(id, again);
        assert_eq!(store.recent().len(), 1);
        assert_eq!(
            store.current().map(|p| p.current_stage),
            Some(Stage::FindManufacturers)
        );
    }

    #[test]
    fn test_select_keeps_order() {
        let mut store = ProjectStore::seeded(4);
        let second = store.recent()[1].id;
        assert!(store.select(second));
        assert_eq!(store.current().map(|p| p.id), Some(second));
        assert_eq!(store.recent()[1].id, second);
        assert!(!store.select(crate::domain::ProjectId::new()));
    }

    #[test]
    fn test_seeded_store_has_no_current_project() {
        let store = ProjectStore::seeded(4);
        assert_eq!(store.recent().len(), 3);
        assert!(store.current().is_none());
        assert_eq!(store.recent()[0].progress.percent(), 75);
        assert_eq!(
            store.recent()[1].manufacturer.as_deref(),
            Some("Premium Denim Co.")
        );
    }
}
