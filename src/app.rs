//! Application state and main event loop.

use crate::config::AppConfig;
use crate::domain::{
    AfterUpload, ManufacturerId, Navigator, NextStep, NoticeKind, Notifier, Progress, Project,
    ProjectId, Route, Stage, UploadRules, UploadWizard, TRACKER_STAGES,
};
use crate::error::{AppError, Result};
use crate::services::{
    request_template, ContactWorkflow, FixtureSource, FollowUp, Inbox, LoadRequest,
    ManufacturerCatalog, ManufacturerSource, ProductCatalog, ProjectStore, Scheduler,
};
use crate::ui::input::{Action, InputHandler, InputMode};
use crate::ui::picker;
use crate::ui::widgets::contact_popup::{ContactEditor, EditorAction};
use crate::ui::widgets::help::HelpViewState;
use crate::ui::widgets::project_cards::stage_row;
use crate::ui::widgets::text_input::{TextInputAction, TextInputState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

/// Name given to a project created implicitly
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// How long a notice stays on screen
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Rows skipped by PageUp/PageDown in lists
const PAGE_STEP: usize = 5;

/// Application view state. `Browse` shows the routed page; the others are
/// modals drawn on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// The page selected by the current route
    #[default]
    Browse,
    /// Naming a new project
    NewProject,
    /// Uploading the three design files
    UploadWizard,
    /// Details of one project
    ProjectDetail(ProjectId),
    /// Editing a request to a manufacturer
    Contact(ManufacturerId),
    /// Request sent, waiting for a follow-up choice
    ContactSent,
    /// Help view showing keybindings
    Help,
}

/// Which pane of the manufacturers page receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFocus {
    #[default]
    List,
    Filters,
}

/// A transient message shown over the page
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    shown_at: Instant,
}

/// Main application state
pub struct App {
    pub config: AppConfig,
    pub store: ProjectStore,
    pub catalog: ManufacturerCatalog,
    pub contact: ContactWorkflow,
    pub inbox: Inbox,
    pub marketplace: ProductCatalog,
    pub wizard: UploadWizard,
    source: Box<dyn ManufacturerSource>,

    // UI State
    /// Page shown behind any modal
    pub route: Route,
    /// Current view
    pub view: AppView,
    /// Current input mode
    pub input_mode: InputMode,
    /// Notice to display, if any
    pub notice: Option<Notice>,
    /// Selected card on the dashboard and projects pages
    pub selected_project: usize,
    /// Index into the visible manufacturers
    pub selected_manufacturer: usize,
    /// Index into `filter_options()`
    pub selected_filter: usize,
    pub manufacturer_focus: CatalogFocus,
    /// Index into the contacted manufacturers
    pub selected_thread: usize,
    /// Tracker row under the cursor in the project detail modal
    pub selected_stage: usize,
    /// Index into the visible marketplace products
    pub selected_product: usize,

    // Dialog state
    pub project_name_input: TextInputState,
    pub name_error: Option<String>,
    pub picker_input: TextInputState,
    pub contact_editor: ContactEditor,
    pub message_input: TextInputState,
    pub product_search: TextInputState,
    pub help_view_state: HelpViewState,

    input_handler: InputHandler,
    wizard_timer: Scheduler<AfterUpload>,
    catalog_timer: Scheduler<LoadRequest>,
}

impl App {
    /// Create the app with the bundled manufacturer and product catalogs
    pub fn new(config: AppConfig) -> Result<Self> {
        let source = FixtureSource::embedded()?;
        let marketplace = ProductCatalog::embedded()?;
        tracing::debug!(
            records = source.len(),
            products = marketplace.len(),
            "fixtures loaded"
        );
        Ok(Self::with_source(config, Box::new(source), marketplace))
    }

    pub fn with_source(
        config: AppConfig,
        source: Box<dyn ManufacturerSource>,
        marketplace: ProductCatalog,
    ) -> Self {
        Self {
            store: ProjectStore::seeded(config.store.recent_capacity),
            catalog: ManufacturerCatalog::new(&config.catalog),
            contact: ContactWorkflow::new(),
            inbox: Inbox::default(),
            marketplace,
            wizard: UploadWizard::new(UploadRules::from(&config.upload)),
            source,
            route: Route::Dashboard,
            view: AppView::Browse,
            input_mode: InputMode::Normal,
            notice: None,
            selected_project: 0,
            selected_manufacturer: 0,
            selected_filter: 0,
            manufacturer_focus: CatalogFocus::List,
            selected_thread: 0,
            selected_stage: 0,
            selected_product: 0,
            project_name_input: TextInputState::new(),
            name_error: None,
            picker_input: TextInputState::new(),
            contact_editor: ContactEditor::new(),
            message_input: TextInputState::new(),
            product_search: TextInputState::new(),
            help_view_state: HelpViewState::new(),
            input_handler: InputHandler::new(config.ui.vim_navigation),
            wizard_timer: Scheduler::new(),
            catalog_timer: Scheduler::new(),
            config,
        }
    }

    /// Name of the current project, for titles
    pub fn current_project_name(&self) -> &str {
        self.store
            .current()
            .map(|p| p.name.as_str())
            .unwrap_or(UNTITLED_PROJECT)
    }

    /// Apply scheduled events whose delay has elapsed
    pub fn poll_scheduled(&mut self) {
        while let Some(after) = self.wizard_timer.try_recv() {
            self.wizard.apply(after);
        }
        if self.view == AppView::UploadWizard && self.wizard.is_finished() {
            self.finish_wizard();
        }

        let mut completed = false;
        while let Some(request) = self.catalog_timer.try_recv() {
            let batch = self.source.fetch(request.offset, request.limit);
            self.catalog.complete_load(request, batch);
            completed = true;
        }
        if completed {
            // Keep loading while the selection sits near the end
            self.request_catalog_load();
        }
    }

    /// Periodic housekeeping
    pub fn tick(&mut self) {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() >= NOTICE_TTL)
        {
            self.notice = None;
        }
    }

    // Manufacturers page lifecycle

    fn mount_catalog(&mut self) {
        let project = self
            .store
            .ensure_current(|| Project::new(UNTITLED_PROJECT, Stage::FindManufacturers));
        tracing::debug!(project = %project.id, "manufacturers page mounted");
        self.selected_manufacturer = 0;
        self.manufacturer_focus = CatalogFocus::List;
        self.request_catalog_load();
    }

    fn unmount_catalog(&mut self) {
        self.catalog_timer.cancel_all();
        self.catalog.abort_load();
        tracing::debug!("manufacturers page unmounted");
    }

    fn request_catalog_load(&mut self) {
        if self.route != Route::Manufacturers
            || !self.catalog.should_prefetch(self.selected_manufacturer)
        {
            return;
        }
        if let Some(request) = self.catalog.begin_load() {
            let delay = Duration::from_millis(self.config.catalog.load_delay_ms);
            self.catalog_timer.schedule(delay, request);
        }
    }

    // Help

    pub fn open_help(&mut self) {
        self.help_view_state = HelpViewState::new();
        self.view = AppView::Help;
    }

    pub fn close_help(&mut self) {
        self.view = AppView::Browse;
    }

    // Project creation and the upload wizard

    /// Open the new project dialog
    pub fn open_new_project_dialog(&mut self) {
        self.project_name_input = TextInputState::new();
        self.name_error = None;
        self.view = AppView::NewProject;
    }

    pub fn cancel_new_project(&mut self) {
        self.project_name_input.clear();
        self.name_error = None;
        self.view = AppView::Browse;
    }

    /// Create a project from the dialog and start collecting its files
    pub fn create_project(&mut self) {
        let name = self.project_name_input.value().trim().to_string();
        if name.is_empty() {
            self.name_error = Some("Name cannot be empty".to_string());
            return;
        }

        let project = Project::new(name, Stage::Concept);
        tracing::info!(id = %project.id, name = %project.name, "project created");
        self.store.add_project(project);
        self.selected_project = 0;
        self.project_name_input.clear();
        self.open_upload_wizard();
    }

    /// Start the wizard for the current project from a blank state
    pub fn open_upload_wizard(&mut self) {
        self.wizard_timer.cancel_all();
        self.wizard = UploadWizard::new(UploadRules::from(&self.config.upload));
        self.picker_input.clear();
        self.view = AppView::UploadWizard;
    }

    /// Close the wizard without saving; the project stays at its stage
    pub fn close_upload_wizard(&mut self) {
        self.wizard_timer.cancel_all();
        self.picker_input.clear();
        self.view = AppView::Browse;
        tracing::info!(project = %self.current_project_name(), "upload wizard closed early");
    }

    fn upload_selection(&mut self) {
        let kind = self.wizard.current();
        if self.picker_input.value().trim().is_empty() {
            return;
        }
        let Some(file) = picker::resolve(self.picker_input.value()) else {
            self.notify(
                NoticeKind::Error,
                format!("\"{}\" is not a file name", self.picker_input.value().trim()),
            );
            return;
        };
        match self.wizard.upload(kind, file) {
            Ok(after) => {
                self.picker_input.clear();
                self.notify(NoticeKind::Success, format!("{} uploaded", kind.title()));
                self.wizard_timer.cancel_all();
                let delay = Duration::from_millis(self.config.upload.advance_delay_ms);
                self.wizard_timer.schedule(delay, after);
            }
            Err(e) => self.notify(NoticeKind::Error, e.to_string()),
        }
    }

    fn wizard_next(&mut self) {
        self.wizard_timer.cancel_all();
        match self.wizard.next() {
            Ok(NextStep::Advance(_)) => {}
            Ok(NextStep::Finish) => self.finish_wizard(),
            Err(e) => self.notify(NoticeKind::Error, e.to_string()),
        }
    }

    fn wizard_skip_remaining(&mut self) {
        self.wizard_timer.cancel_all();
        match self.wizard.skip_remaining() {
            Ok(()) => self.finish_wizard(),
            Err(e) => self.notify(NoticeKind::Error, e.to_string()),
        }
    }

    /// Attach the wizard's files to the current project and move on to
    /// finding a manufacturer
    fn finish_wizard(&mut self) {
        self.wizard_timer.cancel_all();
        let stage = Stage::FindManufacturers;
        let project = self
            .store
            .ensure_current(|| Project::new(UNTITLED_PROJECT, Stage::Concept))
            .clone()
            .with_artifacts(self.wizard.artifacts())
            .with_stage(stage, Progress::new(stage.default_progress()));

        tracing::info!(
            id = %project.id,
            files = project.artifacts.len(),
            "upload wizard finished"
        );
        let name = project.name.clone();
        self.store.update_project(project);
        self.picker_input.clear();
        self.notify(NoticeKind::Success, format!("Files saved for {}", name));
        self.go_to(Route::Manufacturers);
    }

    // Contacting manufacturers

    /// Open the request editor for a manufacturer
    pub fn open_contact(&mut self, id: ManufacturerId) {
        let Some(manufacturer) = self.catalog.get(id) else {
            return;
        };
        let project = self
            .store
            .ensure_current(|| Project::new(UNTITLED_PROJECT, Stage::FindManufacturers));
        self.contact_editor
            .open(request_template(project, manufacturer));
        self.view = AppView::Contact(id);
    }

    fn send_contact_request(&mut self, id: ManufacturerId) {
        let request = self.contact_editor.content();
        if request.trim().is_empty() {
            self.notify(NoticeKind::Error, "Request cannot be empty".to_string());
            return;
        }
        let Some(manufacturer) = self.catalog.get(id).cloned() else {
            self.contact_editor.close();
            self.view = AppView::Browse;
            self.notify(
                NoticeKind::Error,
                "That manufacturer is no longer listed".to_string(),
            );
            return;
        };
        let project = self
            .store
            .ensure_current(|| Project::new(UNTITLED_PROJECT, Stage::FindManufacturers))
            .clone();

        let receipt = self.contact.contact(&mut self.store, &project, &manufacturer);
        self.inbox.open_thread(id, request);
        self.contact_editor.close();
        self.notify(
            NoticeKind::Success,
            format!("Request sent to {}", receipt.manufacturer),
        );
        self.view = AppView::ContactSent;
    }

    fn follow_up(&mut self, choice: FollowUp) {
        self.view = AppView::Browse;
        let target = self.contact.last_receipt().map(|r| r.manufacturer_id);

        let mut contact = std::mem::take(&mut self.contact);
        contact.follow_up(choice, self);
        self.contact = contact;

        if choice == FollowUp::OpenSamples {
            if let Some(index) = target
                .and_then(|id| self.contact.contacted().iter().position(|c| *c == id))
            {
                self.selected_thread = index;
            }
        }
    }

    fn send_message(&mut self) {
        let Some(id) = self.contact.contacted().get(self.selected_thread).copied() else {
            return;
        };
        if self.inbox.send(id, self.message_input.value()) {
            self.message_input.clear();
        }
    }

    // Key handling

    /// Handle keyboard input and return true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.view {
            AppView::Browse => return self.handle_browse_key(key),
            AppView::NewProject => self.handle_new_project_key(key),
            AppView::UploadWizard => self.handle_wizard_key(key),
            AppView::ProjectDetail(id) => self.handle_detail_key(key, id),
            AppView::Contact(id) => self.handle_contact_key(key, id),
            AppView::ContactSent => self.handle_contact_sent_key(key),
            AppView::Help => self.handle_help_key(key),
        }
        false
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        if self.input_mode == InputMode::Insert {
            self.handle_compose_key(key);
            return false;
        }

        let Some(action) = self.input_handler.handle_key(key, self.input_mode) else {
            return false;
        };
        match action {
            Action::Quit => return true,
            Action::Help => self.open_help(),
            Action::NewProject => self.open_new_project_dialog(),
            Action::Navigate(route) => self.go_to(route),
            Action::NextPage => self.go_to(self.route.next()),
            Action::PreviousPage => self.go_to(self.route.previous()),
            Action::Back
                if self.route == Route::Manufacturers
                    && self.manufacturer_focus == CatalogFocus::Filters =>
            {
                self.manufacturer_focus = CatalogFocus::List;
            }
            Action::Back => self.go_to(Route::Dashboard),
            _ => match self.route {
                Route::Dashboard | Route::Projects => self.handle_projects_action(action),
                Route::Manufacturers => self.handle_catalog_action(action),
                Route::Samples => self.handle_samples_action(action),
                Route::Marketplace => self.handle_marketplace_action(action),
            },
        }
        false
    }

    fn handle_projects_action(&mut self, action: Action) {
        let len = self.store.recent().len();
        match action {
            Action::Select => {
                if let Some(project) = self.store.recent().get(self.selected_project) {
                    self.selected_stage = stage_row(project.current_stage);
                    self.view = AppView::ProjectDetail(project.id);
                }
            }
            _ => self.selected_project = move_index(self.selected_project, len, action),
        }
    }

    fn handle_catalog_action(&mut self, action: Action) {
        match action {
            Action::FocusFilters => {
                self.manufacturer_focus = match self.manufacturer_focus {
                    CatalogFocus::List => CatalogFocus::Filters,
                    CatalogFocus::Filters => CatalogFocus::List,
                };
            }
            Action::MoveLeft => self.manufacturer_focus = CatalogFocus::Filters,
            Action::MoveRight => self.manufacturer_focus = CatalogFocus::List,
            Action::ClearFilters => {
                self.catalog.clear_filters();
                self.after_filter_change();
            }
            Action::ToggleFilter => self.toggle_selected_filter(),
            Action::Select if self.manufacturer_focus == CatalogFocus::Filters => {
                self.toggle_selected_filter()
            }
            Action::Select => {
                let selected = self
                    .catalog
                    .visible()
                    .get(self.selected_manufacturer)
                    .map(|m| m.id);
                if let Some(id) = selected {
                    self.open_contact(id);
                }
            }
            _ if self.manufacturer_focus == CatalogFocus::Filters => {
                let len = crate::domain::filter::filter_options().len();
                self.selected_filter = move_index(self.selected_filter, len, action);
            }
            _ => {
                let len = self.catalog.visible().len();
                self.selected_manufacturer = move_index(self.selected_manufacturer, len, action);
                self.request_catalog_load();
            }
        }
    }

    fn toggle_selected_filter(&mut self) {
        let options = crate::domain::filter::filter_options();
        if let Some((category, value)) = options.get(self.selected_filter).copied() {
            self.catalog.toggle_filter(category, value);
            self.after_filter_change();
        }
    }

    fn after_filter_change(&mut self) {
        let len = self.catalog.visible().len();
        self.selected_manufacturer = self.selected_manufacturer.min(len.saturating_sub(1));
        self.request_catalog_load();
    }

    fn handle_samples_action(&mut self, action: Action) {
        let len = self.contact.contacted().len();
        match action {
            Action::Compose | Action::Select if len > 0 => {
                self.input_mode = InputMode::Insert;
            }
            _ => self.selected_thread = move_index(self.selected_thread, len, action),
        }
    }

    fn handle_compose_key(&mut self, key: KeyEvent) {
        if let Some(Action::Back) = self.input_handler.handle_key(key, InputMode::Insert) {
            self.input_mode = InputMode::Normal;
            return;
        }
        if self.route == Route::Marketplace {
            self.handle_search_key(key);
            return;
        }
        if self.message_input.handle_key(key) == TextInputAction::Submit {
            self.send_message();
        }
    }

    fn handle_marketplace_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => {
                self.marketplace.previous_category();
                self.after_product_filter_change();
            }
            Action::MoveRight => {
                self.marketplace.next_category();
                self.after_product_filter_change();
            }
            Action::Compose => self.input_mode = InputMode::Insert,
            _ => {
                let len = self.marketplace.visible().len();
                self.selected_product = move_index(self.selected_product, len, action);
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.product_search.handle_key(key) {
            TextInputAction::Changed => {
                self.marketplace.set_search(self.product_search.value());
                self.after_product_filter_change();
            }
            TextInputAction::Submit | TextInputAction::Cancel => {
                self.input_mode = InputMode::Normal;
            }
            TextInputAction::None => {}
        }
    }

    fn after_product_filter_change(&mut self) {
        let len = self.marketplace.visible().len();
        self.selected_product = self.selected_product.min(len.saturating_sub(1));
    }

    /// Handle keys in help view
    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => self.close_help(),
            KeyCode::Up | KeyCode::Char('k') => self.help_view_state.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.help_view_state.scroll_down(1),
            KeyCode::PageUp | KeyCode::Char('b') => self.help_view_state.page_up(),
            KeyCode::PageDown | KeyCode::Char('f') => self.help_view_state.page_down(),
            _ => {}
        }
    }

    /// Handle keys in the new project dialog
    fn handle_new_project_key(&mut self, key: KeyEvent) {
        match self.project_name_input.handle_key(key) {
            TextInputAction::Submit => self.create_project(),
            TextInputAction::Cancel => self.cancel_new_project(),
            TextInputAction::Changed => self.name_error = None,
            TextInputAction::None => {}
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.wizard_next(),
                KeyCode::Char('p') => {
                    self.wizard_timer.cancel_all();
                    self.wizard.previous();
                }
                KeyCode::Char('k') => self.wizard_skip_remaining(),
                KeyCode::Char('d') => {
                    self.wizard_timer.cancel_all();
                    let kind = self.wizard.current();
                    self.wizard.clear(kind);
                }
                _ => {}
            }
            return;
        }

        match self.picker_input.handle_key(key) {
            TextInputAction::Submit => self.upload_selection(),
            TextInputAction::Cancel => self.close_upload_wizard(),
            TextInputAction::Changed | TextInputAction::None => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent, id: ProjectId) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.view = AppView::Browse,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_stage = self.selected_stage.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_stage = (self.selected_stage + 1).min(TRACKER_STAGES.len() - 1);
            }
            KeyCode::Enter => {
                let Some(current) = self.store.get(id).map(|p| p.current_stage) else {
                    self.view = AppView::Browse;
                    return;
                };
                let Some(entry) = TRACKER_STAGES.get(self.selected_stage) else {
                    return;
                };
                self.store.select(id);
                if entry.stage == Stage::Concept && current == Stage::Concept {
                    self.open_upload_wizard();
                } else {
                    self.go_to(entry.stage.destination());
                }
            }
            _ => {}
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent, id: ManufacturerId) {
        match self.contact_editor.handle_key(key) {
            EditorAction::Send => self.send_contact_request(id),
            EditorAction::Cancel => {
                self.contact_editor.close();
                self.view = AppView::Browse;
            }
            EditorAction::None => {}
        }
    }

    fn handle_contact_sent_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('s') => self.follow_up(FollowUp::OpenSamples),
            KeyCode::Esc | KeyCode::Char('b') => self.follow_up(FollowUp::KeepBrowsing),
            _ => {}
        }
    }

    /// Run the main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        let mut last_tick = Instant::now();

        loop {
            self.poll_scheduled();

            terminal.draw(|f| crate::ui::layout::draw(f, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).map_err(|e| AppError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| AppError::Terminal(e.to_string()))? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                self.tick();
            }

            // Let scheduled tasks and the Ctrl+C handler run
            tokio::task::yield_now().await;
        }

        self.wizard_timer.cancel_all();
        self.catalog_timer.cancel_all();
        Ok(())
    }
}

impl Navigator for App {
    fn go_to(&mut self, route: Route) {
        self.view = AppView::Browse;
        self.input_mode = InputMode::Normal;
        if route == self.route {
            return;
        }

        tracing::debug!(from = %self.route, to = %route, "navigate");
        if self.route == Route::Manufacturers {
            self.unmount_catalog();
        }
        self.route = route;
        if route == Route::Manufacturers {
            self.mount_catalog();
        }
    }
}

impl Notifier for App {
    fn notify(&mut self, kind: NoticeKind, message: String) {
        match kind {
            NoticeKind::Success => tracing::debug!(%message, "notice"),
            NoticeKind::Error => tracing::info!(%message, "error notice"),
        }
        self.notice = Some(Notice {
            kind,
            message,
            shown_at: Instant::now(),
        });
    }
}

/// Move a list index for a navigation action, clamped to `len`
fn move_index(index: usize, len: usize, action: Action) -> usize {
    let Some(last) = len.checked_sub(1) else {
        return 0;
    };
    match action {
        Action::MoveUp => index.saturating_sub(1),
        Action::MoveDown => (index + 1).min(last),
        Action::PageUp => index.saturating_sub(PAGE_STEP),
        Action::PageDown => (index + PAGE_STEP).min(last),
        Action::Home => 0,
        Action::End => last,
        _ => index.min(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtifactKind;

    fn app() -> App {
        App::new(AppConfig::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn wait(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[test]
    fn test_move_index_clamps() {
        assert_eq!(move_index(0, 0, Action::MoveDown), 0);
        assert_eq!(move_index(2, 3, Action::MoveDown), 2);
        assert_eq!(move_index(0, 3, Action::MoveUp), 0);
        assert_eq!(move_index(1, 20, Action::PageDown), 6);
        assert_eq!(move_index(5, 20, Action::End), 19);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_project_runs_through_wizard() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.view, AppView::NewProject);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.name_error.as_deref(), Some("Name cannot be empty"));

        type_text(&mut app, "Linen Set");
        assert!(app.name_error.is_none());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, AppView::UploadWizard);
        assert_eq!(app.current_project_name(), "Linen Set");
        assert_eq!(app.store.current().unwrap().current_stage, Stage::Concept);

        type_text(&mut app, "pack.pdf: 2 mb");
        press(&mut app, KeyCode::Enter);
        assert!(app.picker_input.is_empty());
        // The step only changes after the display delay
        assert_eq!(app.wizard.current(), ArtifactKind::TechPack);

        wait(1600).await;
        app.poll_scheduled();
        assert_eq!(app.wizard.current(), ArtifactKind::Sizing);

        ctrl(&mut app, 'k');
        assert_eq!(app.view, AppView::Browse);
        assert_eq!(app.route, Route::Manufacturers);

        let project = app.store.current().unwrap();
        assert_eq!(project.current_stage, Stage::FindManufacturers);
        assert_eq!(project.progress.percent(), 25);
        assert_eq!(project.artifacts.len(), 1);
        assert!(app.catalog.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_upload_keeps_step_and_shows_error() {
        let mut app = app();
        app.store
            .add_project(Project::new("Knits", Stage::Concept));
        app.open_upload_wizard();

        type_text(&mut app, "sketch.png");
        press(&mut app, KeyCode::Enter);

        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains(".png"));
        assert!(!app.wizard.step(ArtifactKind::TechPack).is_uploaded());
        assert_eq!(app.picker_input.value(), "sketch.png");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreadable_picker_input_reports_error() {
        let mut app = app();
        app.store.add_project(Project::new("Knits", Stage::Concept));
        app.open_upload_wizard();

        type_text(&mut app, "pack.pdf:99999999999999999999");
        press(&mut app, KeyCode::Enter);
        let notice = app.notice.take().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("File too large"));
        assert!(!app.wizard.step(ArtifactKind::TechPack).is_uploaded());

        app.picker_input.clear();
        type_text(&mut app, "..:5");
        press(&mut app, KeyCode::Enter);
        let notice = app.notice.take().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("not a file name"));

        // Blank input stays silent
        app.picker_input.clear();
        press(&mut app, KeyCode::Enter);
        assert!(app.notice.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_wizard_drops_pending_advance() {
        let mut app = app();
        app.store.add_project(Project::new("Knits", Stage::Concept));
        app.open_upload_wizard();

        type_text(&mut app, "pack.pdf:10");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, AppView::Browse);

        wait(2000).await;
        app.poll_scheduled();
        assert_eq!(app.wizard.current(), ArtifactKind::TechPack);
        assert_eq!(app.store.current().unwrap().current_stage, Stage::Concept);
    }

    #[tokio::test(start_paused = true)]
    async fn test_catalog_mount_creates_untitled_project() {
        let mut app = app();
        assert!(app.store.current().is_none());

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.route, Route::Manufacturers);
        let project = app.store.current().unwrap();
        assert_eq!(project.name, UNTITLED_PROJECT);
        assert_eq!(project.current_stage, Stage::FindManufacturers);

        wait(900).await;
        app.poll_scheduled();
        assert_eq!(app.catalog.items().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_catalog_cancels_load() {
        let mut app = app();
        app.go_to(Route::Manufacturers);
        assert!(app.catalog.is_loading());
        app.go_to(Route::Dashboard);
        assert!(!app.catalog.is_loading());

        wait(2000).await;
        app.poll_scheduled();
        assert!(app.catalog.items().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_contact_flow_opens_sample_thread() {
        let mut app = app();
        app.go_to(Route::Manufacturers);
        wait(900).await;
        app.poll_scheduled();
        let first = app.catalog.items()[0].clone();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, AppView::Contact(first.id));
        assert!(app.contact_editor.content().contains(&first.name));

        ctrl(&mut app, 's');
        assert_eq!(app.view, AppView::ContactSent);
        let project = app.store.current().unwrap();
        assert_eq!(project.current_stage, Stage::OrderSamples);
        assert_eq!(project.manufacturer.as_deref(), Some(first.name.as_str()));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Samples);
        assert_eq!(app.view, AppView::Browse);
        assert_eq!(app.contact.contacted(), &[first.id]);
        assert_eq!(app.inbox.thread(first.id).len(), 1);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.input_mode, InputMode::Insert);
        type_text(&mut app, "When can samples ship?");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.inbox.thread(first.id).len(), 2);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_request_is_not_sent() {
        let mut app = app();
        app.go_to(Route::Manufacturers);
        wait(900).await;
        app.poll_scheduled();
        let first = app.catalog.items()[0].id;

        press(&mut app, KeyCode::Enter);
        app.contact_editor.open("  \n ".to_string());
        ctrl(&mut app, 's');

        assert_eq!(app.view, AppView::Contact(first));
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
        assert!(app.inbox.thread(first).is_empty());
        assert!(app.contact.last_receipt().is_none());
        assert_eq!(
            app.store.current().unwrap().current_stage,
            Stage::FindManufacturers
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_browsing_stays_on_catalog() {
        let mut app = app();
        app.go_to(Route::Manufacturers);
        wait(900).await;
        app.poll_scheduled();

        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 's');
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.route, Route::Manufacturers);
        assert!(app.contact.contacted().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filters_toggle_from_panel() {
        let mut app = app();
        app.go_to(Route::Manufacturers);
        wait(900).await;
        app.poll_scheduled();

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.manufacturer_focus, CatalogFocus::Filters);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.catalog.filters().active_count(), 1);

        press(&mut app, KeyCode::Char('x'));
        assert!(app.catalog.filters().is_empty());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.manufacturer_focus, CatalogFocus::List);
        assert_eq!(app.route, Route::Manufacturers);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_opens_stage_destination() {
        let mut app = app();
        let target = app
            .store
            .recent()
            .iter()
            .position(|p| p.current_stage == Stage::OrderSamples)
            .unwrap();
        app.selected_project = target;
        let id = app.store.recent()[target].id;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, AppView::ProjectDetail(id));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Samples);
        assert_eq!(app.store.current().map(|p| p.id), Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_opens_chosen_stage_row() {
        let mut app = app();
        let target = app
            .store
            .recent()
            .iter()
            .position(|p| p.current_stage == Stage::OrderSamples)
            .unwrap();
        app.selected_project = target;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected_stage, 2);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Manufacturers);
        assert_eq!(app.view, AppView::Browse);

        // The concept row of a project past concept goes to the dashboard
        app.go_to(Route::Projects);
        press(&mut app, KeyCode::Enter);
        for _ in 0..5 {
            press(&mut app, KeyCode::Up);
        }
        assert_eq!(app.selected_stage, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Dashboard);
        assert_ne!(app.view, AppView::UploadWizard);
    }

    #[test]
    fn test_detail_concept_row_reopens_wizard_for_concept_project() {
        let mut app = app();
        app.store.add_project(Project::new("Resort Capsule", Stage::Concept));
        app.selected_project = 0;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected_stage, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, AppView::UploadWizard);
    }

    #[test]
    fn test_marketplace_category_and_search() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.route, Route::Marketplace);
        assert_eq!(app.marketplace.visible().len(), 6);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.marketplace.category(), "T-Shirts");
        assert_eq!(app.marketplace.visible().len(), 2);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_product, 1);

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Insert);
        // Typed text goes to the search box, not the page shortcuts
        type_text(&mut app, "ecowear");
        assert_eq!(app.route, Route::Marketplace);
        assert_eq!(app.marketplace.search(), "ecowear");
        assert_eq!(app.marketplace.visible().len(), 1);
        assert_eq!(app.selected_product, 0);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.marketplace.category(), "Denim");
        assert!(app.marketplace.visible().is_empty());
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.route, Route::Projects);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.route, Route::Dashboard);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.route, Route::Samples);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.view, AppView::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, AppView::Browse);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_notice_expires() {
        let mut app = app();
        app.notify(NoticeKind::Success, "Saved".to_string());
        app.tick();
        assert!(app.notice.is_some());

        if let Some(notice) = app.notice.as_mut() {
            notice.shown_at = Instant::now() - NOTICE_TTL;
        }
        app.tick();
        assert!(app.notice.is_none());
    }
}
