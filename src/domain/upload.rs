//! Three-step upload wizard collecting a project's design files.
//!
//! The tech pack is mandatory. Sizing and materials can each be satisfied by
//! an upload or, once the tech pack is in, by skipping them in bulk. A later
//! upload overrides a skip.

use super::{ArtifactKind, FileRef};
use crate::config::UploadConfig;
use crate::error::{UploadError, UploadResult, WizardError};
use std::collections::BTreeMap;

/// What a file must satisfy to be accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    /// Lowercase extensions without the dot
    pub allowed_extensions: Vec<String>,
    /// Inclusive upper bound
    pub max_size_bytes: u64,
}

impl Default for UploadRules {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadRules {
    fn from(config: &UploadConfig) -> Self {
        Self {
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_size_bytes: config.max_size_bytes,
        }
    }
}

impl UploadRules {
    /// "PDF, AI, or XLSX"
    pub fn describe_allowed(&self) -> String {
        let upper: Vec<String> = self
            .allowed_extensions
            .iter()
            .map(|e| e.to_ascii_uppercase())
            .collect();
        match upper.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

/// Check a file's extension and size. The extension is checked first.
pub fn validate_file(file: &FileRef, rules: &UploadRules) -> UploadResult<()> {
    let extension = file.extension();
    if !rules.allowed_extensions.iter().any(|e| *e == extension) {
        return Err(UploadError::InvalidFileType {
            extension,
            allowed: rules.describe_allowed(),
        });
    }
    if file.size_bytes > rules.max_size_bytes {
        return Err(UploadError::FileTooLarge {
            size_bytes: file.size_bytes,
            max_bytes: rules.max_size_bytes,
        });
    }
    Ok(())
}

/// State of one wizard step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StepState {
    #[default]
    Empty,
    Uploaded(FileRef),
    Skipped,
}

impl StepState {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded(_))
    }

    /// Counts toward completion
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Uploaded(_) | Self::Skipped)
    }

    pub fn file(&self) -> Option<&FileRef> {
        match self {
            Self::Uploaded(file) => Some(file),
            _ => None,
        }
    }
}

/// Transition to apply once the post-upload display delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterUpload {
    /// Every requirement is met
    Finish,
    /// Move on to the given step
    Advance(ArtifactKind),
    /// Last step uploaded but an earlier one is still missing
    Stay,
}

/// Result of a manual "next"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Advance(ArtifactKind),
    Finish,
}

/// The upload wizard state machine
#[derive(Debug, Clone)]
pub struct UploadWizard {
    rules: UploadRules,
    current: ArtifactKind,
    steps: [StepState; 3],
    finished: bool,
}

impl Default for UploadWizard {
    fn default() -> Self {
        Self::new(UploadRules::default())
    }
}

impl UploadWizard {
    /// Start at step 1 with every step empty
    pub fn new(rules: UploadRules) -> Self {
        Self {
            rules,
            current: ArtifactKind::TechPack,
            steps: Default::default(),
            finished: false,
        }
    }

    pub fn rules(&self) -> &UploadRules {
        &self.rules
    }

    /// Step currently displayed
    pub fn current(&self) -> ArtifactKind {
        self.current
    }

    pub fn step(&self, kind: ArtifactKind) -> &StepState {
        &self.steps[kind as usize]
    }

    /// True once the wizard has signalled completion
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Tech pack uploaded and the other two uploaded or skipped
    pub fn is_complete(&self) -> bool {
        self.step(ArtifactKind::TechPack).is_uploaded()
            && self.step(ArtifactKind::Sizing).is_satisfied()
            && self.step(ArtifactKind::Materials).is_satisfied()
    }

    /// Bulk skip is offered once the tech pack is in and not yet finished
    pub fn can_skip_remaining(&self) -> bool {
        !self.finished && self.step(ArtifactKind::TechPack).is_uploaded()
    }

    /// Validate and store a file for `kind`.
    ///
    /// On rejection the wizard is untouched. On success the returned
    /// transition is meant to be applied after the display delay.
    pub fn upload(&mut self, kind: ArtifactKind, file: FileRef) -> UploadResult<AfterUpload> {
        if let Err(err) = validate_file(&file, &self.rules) {
            tracing::info!(step = %kind, file = %file.name, "upload rejected: {}", err);
            return Err(err);
        }

        tracing::debug!(step = %kind, file = %file.name, bytes = file.size_bytes, "upload accepted");
        self.steps[kind as usize] = StepState::Uploaded(file);

        Ok(if self.is_complete() {
            AfterUpload::Finish
        } else {
            match kind.next() {
                Some(next) => AfterUpload::Advance(next),
                None => AfterUpload::Stay,
            }
        })
    }

    /// Apply a delayed post-upload transition
    pub fn apply(&mut self, after: AfterUpload) {
        match after {
            AfterUpload::Finish => self.finished = true,
            AfterUpload::Advance(step) => self.current = step,
            AfterUpload::Stay => {}
        }
    }

    /// Mark sizing and materials as skipped and finish.
    ///
    /// Steps already uploaded keep their file.
    pub fn skip_remaining(&mut self) -> Result<(), WizardError> {
        if !self.step(ArtifactKind::TechPack).is_uploaded() {
            return Err(WizardError::TechPackRequired);
        }
        for kind in [ArtifactKind::Sizing, ArtifactKind::Materials] {
            if !self.step(kind).is_uploaded() {
                self.steps[kind as usize] = StepState::Skipped;
            }
        }
        self.finished = true;
        Ok(())
    }

    /// Go back one step for review
    pub fn previous(&mut self) {
        if let Some(prev) = self.current.previous() {
            self.current = prev;
        }
    }

    /// Go forward, gated on the displayed step having a file
    pub fn next(&mut self) -> Result<NextStep, WizardError> {
        if !self.step(self.current).is_uploaded() {
            return Err(WizardError::StepIncomplete);
        }
        match self.current.next() {
            Some(next) => {
                self.current = next;
                Ok(NextStep::Advance(next))
            }
            None if self.is_complete() => {
                self.finished = true;
                Ok(NextStep::Finish)
            }
            None => Err(WizardError::Incomplete),
        }
    }

    /// Drop the file for `kind` so a different one can be chosen
    pub fn clear(&mut self, kind: ArtifactKind) {
        self.steps[kind as usize] = StepState::Empty;
    }

    /// Uploaded files by kind; skipped steps are absent
    pub fn artifacts(&self) -> BTreeMap<ArtifactKind, FileRef> {
        ArtifactKind::ALL
            .iter()
            .filter_map(|kind| self.step(*kind).file().map(|f| (*kind, f.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB_50: u64 = 50 * 1024 * 1024;

    fn pdf(size: u64) -> FileRef {
        FileRef::new("techpack.pdf", size)
    }

    #[test]
    fn test_validation_accepts_allowed_extensions() {
        let rules = UploadRules::default();
        for name in ["a.pdf", "b.AI", "c.xlsx"] {
            assert!(validate_file(&FileRef::new(name, 10), &rules).is_ok(), "{name}");
        }
        for name in ["a.png", "b.docx", "noext"] {
            assert!(matches!(
                validate_file(&FileRef::new(name, 10), &rules),
                Err(UploadError::InvalidFileType { .. })
            ));
        }
    }

    #[test]
    fn test_size_boundary_is_inclusive() {
        let rules = UploadRules::default();
        assert!(validate_file(&pdf(MB_50), &rules).is_ok());
        assert_eq!(
            validate_file(&pdf(MB_50 + 1), &rules),
            Err(UploadError::FileTooLarge {
                size_bytes: MB_50 + 1,
                max_bytes: MB_50
            })
        );
    }

    #[test]
    fn test_type_is_checked_before_size() {
        let rules = UploadRules::default();
        let err = validate_file(&FileRef::new("huge.zip", MB_50 * 2), &rules).unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType { .. }));
    }

    #[test]
    fn test_rejected_upload_leaves_state_unchanged() {
        let mut wizard = UploadWizard::default();
        let err = wizard
            .upload(ArtifactKind::TechPack, FileRef::new("sketch.png", 10))
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType { .. }));
        assert_eq!(wizard.step(ArtifactKind::TechPack), &StepState::Empty);
        assert_eq!(wizard.current(), ArtifactKind::TechPack);
    }

    #[test]
    fn test_upload_advances_after_delay() {
        let mut wizard = UploadWizard::default();
        let after = wizard.upload(ArtifactKind::TechPack, pdf(100)).unwrap();
        assert_eq!(after, AfterUpload::Advance(ArtifactKind::Sizing));
        // Nothing moves until the delayed transition is applied
        assert_eq!(wizard.current(), ArtifactKind::TechPack);

        wizard.apply(after);
        assert_eq!(wizard.current(), ArtifactKind::Sizing);
    }

    #[test]
    fn test_full_upload_path_finishes() {
        let mut wizard = UploadWizard::default();
        for kind in ArtifactKind::ALL {
            let after = wizard.upload(kind, FileRef::new("f.xlsx", 1)).unwrap();
            wizard.apply(after);
        }
        assert!(wizard.is_complete());
        assert!(wizard.is_finished());
        assert_eq!(wizard.artifacts().len(), 3);
    }

    #[test]
    fn test_last_step_without_earlier_ones_stays() {
        let mut wizard = UploadWizard::default();
        let after = wizard.upload(ArtifactKind::Materials, pdf(1)).unwrap();
        assert_eq!(after, AfterUpload::Stay);
        assert!(!wizard.is_complete());
    }

    #[test]
    fn test_skip_requires_tech_pack() {
        let mut wizard = UploadWizard::default();
        assert!(!wizard.can_skip_remaining());
        assert_eq!(wizard.skip_remaining(), Err(WizardError::TechPackRequired));
        assert_eq!(wizard.step(ArtifactKind::Sizing), &StepState::Empty);
        assert!(!wizard.is_finished());
    }

    #[test]
    fn test_skip_completes_without_uploads() {
        let mut wizard = UploadWizard::default();
        wizard.upload(ArtifactKind::TechPack, pdf(1)).unwrap();
        assert!(wizard.can_skip_remaining());

        wizard.skip_remaining().unwrap();
        assert!(wizard.is_complete());
        assert!(wizard.is_finished());
        assert_eq!(wizard.step(ArtifactKind::Sizing), &StepState::Skipped);
        assert_eq!(wizard.step(ArtifactKind::Materials), &StepState::Skipped);
        assert_eq!(wizard.artifacts().len(), 1);
    }

    #[test]
    fn test_skip_keeps_existing_uploads() {
        let mut wizard = UploadWizard::default();
        wizard.upload(ArtifactKind::TechPack, pdf(1)).unwrap();
        wizard.upload(ArtifactKind::Sizing, FileRef::new("sizes.xlsx", 1)).unwrap();
        wizard.skip_remaining().unwrap();
        assert!(wizard.step(ArtifactKind::Sizing).is_uploaded());
        assert_eq!(wizard.step(ArtifactKind::Materials), &StepState::Skipped);
    }

    #[test]
    fn test_upload_overrides_skip() {
        let mut wizard = UploadWizard::default();
        wizard.upload(ArtifactKind::TechPack, pdf(1)).unwrap();
        wizard.skip_remaining().unwrap();

        wizard.upload(ArtifactKind::Sizing, FileRef::new("sizes.xlsx", 1)).unwrap();
        assert!(wizard.step(ArtifactKind::Sizing).is_uploaded());
        assert!(wizard.is_complete());
    }

    #[test]
    fn test_next_is_gated_on_displayed_step() {
        let mut wizard = UploadWizard::default();
        assert_eq!(wizard.next(), Err(WizardError::StepIncomplete));

        wizard.upload(ArtifactKind::TechPack, pdf(1)).unwrap();
        assert_eq!(wizard.next(), Ok(NextStep::Advance(ArtifactKind::Sizing)));
        assert_eq!(wizard.next(), Err(WizardError::StepIncomplete));

        wizard.previous();
        assert_eq!(wizard.current(), ArtifactKind::TechPack);
        wizard.previous();
        assert_eq!(wizard.current(), ArtifactKind::TechPack);
    }

    #[test]
    fn test_next_on_last_step_requires_completion() {
        let mut wizard = UploadWizard::default();
        wizard.upload(ArtifactKind::TechPack, pdf(1)).unwrap();
        wizard.next().unwrap();
        wizard.upload(ArtifactKind::Sizing, pdf(1)).unwrap();
        wizard.next().unwrap();
        wizard.upload(ArtifactKind::Materials, pdf(1)).unwrap();
        assert_eq!(wizard.next(), Ok(NextStep::Finish));

        let mut partial = UploadWizard::default();
        partial.upload(ArtifactKind::TechPack, pdf(1)).unwrap();
        partial.next().unwrap();
        partial.upload(ArtifactKind::Sizing, pdf(1)).unwrap();
        partial.next().unwrap();
        partial.clear(ArtifactKind::Sizing);
        partial.upload(ArtifactKind::Materials, pdf(1)).unwrap();
        assert_eq!(partial.next(), Err(WizardError::Incomplete));
    }

    #[test]
    fn test_reupload_overwrites() {
        let mut wizard = UploadWizard::default();
        wizard.upload(ArtifactKind::TechPack, FileRef::new("v1.pdf", 1)).unwrap();
        wizard.upload(ArtifactKind::TechPack, FileRef::new("v2.pdf", 2)).unwrap();
        assert_eq!(
            wizard.step(ArtifactKind::TechPack).file().map(|f| f.name.as_str()),
            Some("v2.pdf")
        );
    }

    #[test]
    fn test_describe_allowed() {
        assert_eq!(UploadRules::default().describe_allowed(), "PDF, AI, or XLSX");
    }
}
