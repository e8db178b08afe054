//! Navigation destinations and the collaborator seams workflows call into.

use serde::{Deserialize, Serialize};

/// A page the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Overview with stats and recent projects
    Dashboard,
    /// All recent projects
    Projects,
    /// Manufacturer discovery catalog
    Manufacturers,
    /// Sample conversations with contacted manufacturers
    Samples,
    /// Finished products for inspiration
    Marketplace,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::Projects,
        Route::Manufacturers,
        Route::Samples,
        Route::Marketplace,
    ];

    /// Display name for the navigation sidebar
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Projects => "Projects",
            Self::Manufacturers => "Manufacturers",
            Self::Samples => "Inbox",
            Self::Marketplace => "Marketplace",
        }
    }

    /// Number key that jumps straight to this page
    pub fn shortcut(&self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Projects => '2',
            Self::Manufacturers => '3',
            Self::Samples => '4',
            Self::Marketplace => '5',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.shortcut() == c)
    }

    /// Following page in sidebar order, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Preceding page in sidebar order, wrapping around
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Something that can switch the visible page
pub trait Navigator {
    fn go_to(&mut self, route: Route);
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Something that can show a transient notice. Fire-and-forget.
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, message: String);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every request so tests can assert on them
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub visited: Vec<Route>,
    }

    impl Navigator for RecordingNavigator {
        fn go_to(&mut self, route: Route) {
            self.visited.push(route);
        }
    }
}
