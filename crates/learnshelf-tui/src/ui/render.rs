use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use learnshelf_core::{Course, LoadState};

use crate::app::{App, Screen};
use crate::format::{format_age, truncate_string};

use super::styles;

/// Height of one course card in rows, borders included.
const CARD_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Length(3), // Banner
            Constraint::Min(6),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_banner(frame, app, chunks[1]);

    match app.screen {
        Screen::Library => render_library(frame, app, chunks[2]),
        Screen::Detail(_) => render_detail(frame, app, chunks[2]),
    }

    render_status_bar(frame, app, chunks[3]);
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  learnshelf";
    let help_hint = "[r] Refresh  [Enter] Open  [q] Quit";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 2) as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(slide) = app.current_banner() else {
        return;
    };

    let dots: String = (0..app.config.banners.len())
        .map(|i| if i == app.banner_index { '●' } else { '○' })
        .collect();

    let lines = vec![
        Line::from(Span::styled(slide.title.clone(), styles::banner_style())),
        Line::from(Span::styled(dots, styles::muted_style())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(styles::banner_style());
    frame.render_widget(paragraph, area);
}

fn render_library(frame: &mut Frame, app: &App, area: Rect) {
    match &app.load_state {
        LoadState::Idle | LoadState::Loading => {
            render_message(frame, area, vec![Line::from(Span::styled(
                "Loading courses...",
                styles::highlight_style(),
            ))]);
        }
        LoadState::Error(message) => {
            render_message(
                frame,
                area,
                vec![
                    Line::from(Span::styled(message.clone(), styles::error_style())),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Press ", styles::muted_style()),
                        Span::styled("[r]", styles::help_key_style()),
                        Span::styled(" to retry", styles::muted_style()),
                    ]),
                ],
            );
        }
        state if state.is_empty_result() => {
            render_message(frame, area, vec![Line::from(Span::styled(
                "No courses available yet",
                styles::muted_style(),
            ))]);
        }
        LoadState::Loaded(courses) => render_grid(frame, app, courses, area),
    }
}

fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let top_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let mut padded = vec![Line::from(""); top_pad as usize];
    padded.extend(lines);

    let paragraph = Paragraph::new(padded)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_grid(frame: &mut Frame, app: &App, courses: &[Course], area: Rect) {
    let columns = app.columns();
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let selected_row = app.selection / columns;
    // Scroll just far enough to keep the selected row on screen.
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + row_offset;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            if let Some(course) = courses.get(index) {
                render_card(frame, course, index == app.selection, *cell);
            }
        }
    }
}

fn render_card(frame: &mut Frame, course: &Course, selected: bool, area: Rect) {
    let inner_width = area.width.saturating_sub(4) as usize;

    let byline = match (&course.instructor, &course.level) {
        (Some(instructor), Some(level)) => format!("{} · {}", instructor, level),
        (Some(instructor), None) => instructor.clone(),
        (None, Some(level)) => level.clone(),
        (None, None) => String::new(),
    };

    let module_style = if course.has_modules() {
        styles::success_style()
    } else {
        styles::muted_style()
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_string(&byline, inner_width),
            styles::muted_style(),
        )),
        Line::from(vec![
            Span::styled(course.display_module_count(), module_style),
            Span::styled(" · ", styles::muted_style()),
            Span::styled(course.display_duration(), styles::list_item_style()),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", truncate_string(&course.title, inner_width)))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(selected));

    let style = if selected {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };

    frame.render_widget(Paragraph::new(lines).block(block).style(style), area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(course) = app.detail_course() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let description = course
        .description
        .clone()
        .unwrap_or_else(|| "No description".to_string());
    let header = Paragraph::new(vec![
        Line::from(Span::styled(description, styles::list_item_style())),
        Line::from(Span::styled(
            format!(
                "{} · {} lessons · {}",
                course.display_module_count(),
                course.total_lessons(),
                course.display_duration()
            ),
            styles::muted_style(),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(format!(" {} ", course.title))
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = course
        .modules
        .iter()
        .enumerate()
        .map(|(i, module)| {
            let mut spans = vec![
                Span::styled(format!("{:>2}. ", i + 1), styles::muted_style()),
                Span::raw(module.title.clone()),
                Span::styled(format!("  ({} lessons)", module.lesson_count), styles::muted_style()),
            ];
            if let Some(ref summary) = module.summary {
                spans.push(Span::styled(format!("  {}", summary), styles::muted_style()));
            }
            let style = if i == app.module_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Modules  [Esc] Back ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    let mut state = ListState::default();
    state.select(Some(app.module_selection));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref notice) = app.notice {
        Span::styled(format!(" {}", notice), styles::highlight_style())
    } else {
        let status = match &app.load_state {
            LoadState::Idle => "Idle".to_string(),
            LoadState::Loading => "Loading...".to_string(),
            LoadState::Error(_) => "Load failed".to_string(),
            LoadState::Loaded(courses) => {
                let age = app
                    .loaded_at
                    .map(|at| format_age(at, Utc::now()))
                    .unwrap_or_else(|| "never".to_string());
                format!("{} courses · updated {}", courses.len(), age)
            }
        };
        let source = if app.config.trust_cache {
            "cache first"
        } else {
            "network only"
        };
        Span::raw(format!(" {} · {}", status, source))
    };

    frame.render_widget(
        Paragraph::new(Line::from(text)).style(styles::status_bar_style()),
        area,
    );
}
