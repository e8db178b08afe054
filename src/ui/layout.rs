//! Main layout rendering for the TUI.

use crate::app::{App, AppView, CatalogFocus, Notice};
use crate::domain::{NoticeKind, Project, Route, Stage};
use crate::ui::input::InputMode;
use crate::ui::widgets::contact_popup::{ContactPopup, ContactSentDialog};
use crate::ui::widgets::filter_panel::FilterPanel;
use crate::ui::widgets::help::HelpWidget;
use crate::ui::widgets::manufacturer_list::ManufacturerList;
use crate::ui::widgets::product_list::ProductList;
use crate::ui::widgets::project_cards::{ProjectCards, ProjectDetail};
use crate::ui::widgets::samples::{Conversation, SamplesView};
use crate::ui::widgets::sidebar::Sidebar;
use crate::ui::widgets::stage_tracker::StageTracker;
use crate::ui::widgets::text_input::NewProjectDialog;
use crate::ui::widgets::upload_wizard::UploadWizardDialog;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SIDEBAR_WIDTH: u16 = 30;
const FILTER_PANEL_WIDTH: u16 = 28;

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Sidebar::new(app.route, app.store.recent(), app.store.current()),
        sidebar,
    );

    let [header, content, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(main);

    draw_header(frame, app, header);
    match app.route {
        Route::Dashboard => draw_dashboard(frame, app, content),
        Route::Projects => draw_projects(frame, app, content),
        Route::Manufacturers => draw_manufacturers(frame, app, content),
        Route::Samples => draw_samples(frame, app, content),
        Route::Marketplace => draw_marketplace(frame, app, content),
    }

    let footer_widget = Paragraph::new(footer_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer_widget, footer);

    draw_modal(frame, app, area);

    if let Some(ref notice) = app.notice {
        draw_notice(frame, notice, main);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        app.route.title(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(project) = app.store.current() {
        spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(project.name.as_str()));
        spans.push(Span::styled(
            format!("  {}", project.current_stage.badge()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Counts shown across the top of the dashboard
fn stats(projects: &[Project]) -> [(&'static str, usize); 4] {
    let count = |stage: Stage| projects.iter().filter(|p| p.current_stage == stage).count();
    [
        (
            "Active Projects",
            projects
                .iter()
                .filter(|p| p.current_stage != Stage::Completed)
                .count(),
        ),
        ("Awaiting Samples", count(Stage::OrderSamples)),
        ("In Production", count(Stage::Production)),
        ("Shipping", count(Stage::Shipping)),
    ]
}

fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let [stats_area, body] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);

    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(stats_area);
    for ((label, value), cell) in stats(app.store.recent()).into_iter().zip(cells.iter()) {
        let text = vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            *cell,
        );
    }

    let [cards, tracker] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    let projects = app.store.recent();
    let selected = (!projects.is_empty()).then_some(app.selected_project);
    frame.render_widget(
        ProjectCards::new(projects, selected).title(" Recent Projects "),
        cards,
    );

    match app.store.current() {
        Some(project) => frame.render_widget(
            StageTracker::new(project.current_stage)
                .progress(project.progress.percent())
                .title(" Current Project ")
                .detailed(true),
            tracker,
        ),
        None => frame.render_widget(
            Paragraph::new("No project selected.\n\nOpen one with Enter or press 'n'.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Current Project ")),
            tracker,
        ),
    }
}

fn draw_projects(frame: &mut Frame, app: &App, area: Rect) {
    let projects = app.store.recent();
    let selected = (!projects.is_empty()).then_some(app.selected_project);
    frame.render_widget(ProjectCards::new(projects, selected), area);
}

fn draw_manufacturers(frame: &mut Frame, app: &App, area: Rect) {
    let [filters, list] =
        Layout::horizontal([Constraint::Length(FILTER_PANEL_WIDTH), Constraint::Min(0)])
            .areas(area);

    let focus = app.manufacturer_focus;
    frame.render_widget(
        FilterPanel::new(
            app.catalog.filters(),
            app.selected_filter,
            focus == CatalogFocus::Filters,
        ),
        filters,
    );

    let visible = app.catalog.visible();
    frame.render_widget(
        ManufacturerList::new(&visible, app.selected_manufacturer)
            .loading(app.catalog.is_loading())
            .has_more(app.catalog.has_more())
            .focused(focus == CatalogFocus::List)
            .filtered(!app.catalog.filters().is_empty()),
        list,
    );
}

fn draw_samples(frame: &mut Frame, app: &App, area: Rect) {
    let conversations: Vec<Conversation> = app
        .contact
        .contacted()
        .iter()
        .map(|id| Conversation {
            manufacturer: app
                .catalog
                .get(*id)
                .map(|m| m.name.as_str())
                .unwrap_or("Unknown manufacturer"),
            messages: app.inbox.thread(*id),
        })
        .collect();

    frame.render_widget(
        SamplesView::new(
            &conversations,
            app.selected_thread,
            &app.message_input,
            app.input_mode == InputMode::Insert,
        ),
        area,
    );
}

fn draw_marketplace(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.marketplace.visible();
    frame.render_widget(
        ProductList::new(&visible, app.selected_product, &app.product_search)
            .category(app.marketplace.category())
            .searching(app.input_mode == InputMode::Insert),
        area,
    );
}

/// Draw whichever modal the current view asks for
fn draw_modal(frame: &mut Frame, app: &App, area: Rect) {
    match app.view {
        AppView::Browse => {}
        AppView::NewProject => {
            let dialog = NewProjectDialog::new(&app.project_name_input).error(app.name_error.as_deref());
            frame.render_widget(dialog, centered_rect(50, 30, area));
        }
        AppView::UploadWizard => {
            let dialog = UploadWizardDialog::new(
                &app.wizard,
                &app.picker_input,
                app.current_project_name(),
            );
            frame.render_widget(dialog, centered_rect(80, 70, area));
        }
        AppView::ProjectDetail(id) => {
            if let Some(project) = app.store.get(id) {
                frame.render_widget(
                    ProjectDetail::new(project).selected_stage(app.selected_stage),
                    centered_rect(75, 65, area),
                );
            }
        }
        AppView::Contact(id) => {
            if let Some(manufacturer) = app.catalog.get(id) {
                let popup =
                    ContactPopup::new(manufacturer, app.current_project_name(), &app.contact_editor);
                frame.render_widget(popup, centered_rect(80, 85, area));
            }
        }
        AppView::ContactSent => {
            let name = app
                .contact
                .last_receipt()
                .map(|r| r.manufacturer.as_str())
                .unwrap_or("the manufacturer");
            frame.render_widget(ContactSentDialog::new(name), centered_rect(55, 35, area));
        }
        AppView::Help => {
            frame.render_widget(HelpWidget::new(&app.help_view_state), centered_rect(70, 80, area));
        }
    }
}

/// Draw a notice at the bottom of the page
fn draw_notice(frame: &mut Frame, notice: &Notice, area: Rect) {
    let (color, title) = match notice.kind {
        NoticeKind::Success => (Color::Green, ""),
        NoticeKind::Error => (Color::Red, " Error "),
    };
    let width = u16::try_from(notice.message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width.saturating_sub(4));
    let msg_area = Rect {
        x: area.x + area.width.saturating_sub(width + 2),
        y: area.y + area.height.saturating_sub(6),
        width,
        height: 3,
    };

    frame.render_widget(Clear, msg_area);
    let widget = Paragraph::new(notice.message.as_str())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
    frame.render_widget(widget, msg_area);
}

/// Key hints for the footer
fn footer_text(app: &App) -> &'static str {
    match app.view {
        AppView::Browse => {}
        AppView::NewProject => return " Enter: Create | Esc: Cancel ",
        AppView::UploadWizard => {
            return " Enter: Upload | ^N/^P: Next/Back | ^K: Skip rest | ^D: Remove | Esc: Close "
        }
        AppView::ProjectDetail(_) => return " j/k: Choose stage | Enter: Open | Esc: Close ",
        AppView::Contact(_) => return " Ctrl+S: Send request | Esc: Cancel ",
        AppView::ContactSent => return " Enter/s: Open samples | Esc/b: Keep browsing ",
        AppView::Help => return " j/k: Scroll | PgUp/PgDn: Page | Esc: Close ",
    }

    match app.route {
        Route::Dashboard | Route::Projects => {
            " j/k: Navigate | Enter: Details | n: New project | 1-5/Tab: Pages | ?: Help | q: Quit "
        }
        Route::Manufacturers if app.manufacturer_focus == CatalogFocus::Filters => {
            " j/k: Move | Space: Toggle | x: Clear | f/Esc: Back to list "
        }
        Route::Manufacturers => {
            " j/k: Navigate | Enter: Contact | f: Filters | x: Clear filters | ?: Help "
        }
        Route::Samples if app.input_mode == InputMode::Insert => " Enter: Send | Esc: Done ",
        Route::Samples => " j/k: Conversations | i: Write a message | 1-5/Tab: Pages | q: Quit ",
        Route::Marketplace if app.input_mode == InputMode::Insert => {
            " Type to search | Enter/Esc: Done "
        }
        Route::Marketplace => {
            " h/l: Category | /: Search | j/k: Navigate | 1-5/Tab: Pages | q: Quit "
        }
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
