use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, Popup, View};
use kanban_shared::{Priority, Task, Theme};
use kanban_store::{KeyValueStore, TaskCard};

struct Palette {
    text: Color,
    muted: Color,
    accent: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::DarkGray,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight: Color::Gray,
            },
        }
    }
}

/// Returns (symbol, color) for a task's priority indicator
fn priority_indicator(priority: Priority) -> (&'static str, Color) {
    match priority {
        Priority::Urgent => ("!", Color::Red),
        Priority::High => ("▲", Color::Yellow),
        Priority::Medium => ("●", Color::Blue),
        Priority::Low => ("▽", Color::Gray),
    }
}

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    match app.view {
        View::Board => draw_board(f, app),
        View::TaskDetail => draw_task_detail(f, app),
    }

    match &app.popup {
        Popup::Input { purpose, text } => draw_input_popup(f, purpose.title(), text),
        Popup::Confirm(action) => draw_confirm_popup(f, &action.prompt()),
        Popup::Help => draw_help_popup(f),
        Popup::None => {}
    }

    if let Some(ref error) = app.error_message {
        draw_error_popup(f, error);
    }
}

fn draw_board<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Progress
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    draw_progress(f, chunks[1], app);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(chunks[2]);

    draw_ideas(f, main[0], app);
    draw_kanban(f, main[1], app);
    draw_status_bar(f, chunks[3], app);
}

fn draw_header<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let palette = Palette::for_theme(app.board.theme());

    let mut spans = vec![
        Span::styled(
            "KANBAN",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" |"),
    ];
    for category in app.board.categories() {
        let style = if category == app.board.current_category() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(category.to_string(), style));
    }

    let filter = app.board.filter();
    if filter.is_active() || filter.show_archived {
        let mut parts = Vec::new();
        if !filter.search.is_empty() {
            parts.push(format!("\"{}\"", filter.search));
        }
        if let Some(priority) = filter.priority {
            parts.push(priority.to_string());
        }
        if let Some(ref tag) = filter.tag {
            parts.push(format!("#{}", tag));
        }
        if filter.show_archived {
            parts.push("archived".to_string());
        }
        spans.push(Span::raw(" | filter: "));
        spans.push(Span::styled(parts.join(" "), Style::default().fg(Color::Magenta)));
    }

    let header = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(palette.text))
        .block(Block::default().borders(Borders::BOTTOM));

    f.render_widget(header, area);
}

fn draw_progress<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let stats = app.board.dashboard();
    let palette = Palette::for_theme(app.board.theme());

    let label = format!(
        "{}/{} done ({}%) | avg {} days to finish",
        stats.completed, stats.total, stats.completion_rate, stats.average_completion_days
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(palette.highlight))
        .percent(stats.completion_rate.min(100) as u16)
        .label(label);

    f.render_widget(gauge, area);
}

fn draw_ideas<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let palette = Palette::for_theme(app.board.theme());
    let focused = app.focus == Focus::Ideas;
    let ideas = app.board.ideas_for(app.board.current_category());

    let items: Vec<ListItem> = ideas
        .iter()
        .map(|idea| ListItem::new(Line::from(idea.content.as_str())))
        .collect();

    let border_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" Ideas ({}) ", ideas.len())),
        )
        .style(Style::default().fg(palette.text))
        .highlight_style(Style::default().bg(palette.highlight))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused && !ideas.is_empty() {
        state.select(Some(app.selected_idea));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_kanban<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let palette = Palette::for_theme(app.board.theme());
    let category = app.board.current_category();
    let columns = app.board.columns_for(category);

    if columns.is_empty() {
        let empty = Paragraph::new("No columns. Press + to add one.")
            .style(Style::default().fg(palette.muted))
            .block(Block::default().borders(Borders::ALL).title("Board"));
        f.render_widget(empty, area);
        return;
    }

    let constraints: Vec<Constraint> = columns
        .iter()
        .map(|_| Constraint::Ratio(1, columns.len() as u32))
        .collect();
    let column_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let counts = app.board.column_counts();
    let now = Utc::now();

    for (i, column) in columns.iter().enumerate() {
        let is_selected = app.focus == Focus::Columns && i == app.selected_column;
        let border_style = if is_selected {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.muted)
        };

        let visible_height = column_chunks[i].height.saturating_sub(2) as usize;
        let cards = app.board.cards(category, column, now);

        // Keep the selected card on screen.
        let per_card = 3;
        let fits = (visible_height / per_card).max(1);
        let skip = if is_selected && app.selected_task >= fits {
            app.selected_task + 1 - fits
        } else {
            0
        };

        let mut lines: Vec<Line> = Vec::new();
        for (j, card) in cards.iter().enumerate().skip(skip) {
            if lines.len() + 2 > visible_height {
                break;
            }
            let highlighted = is_selected && j == app.selected_task;
            lines.extend(card_lines(card, highlighted, &palette));
            lines.push(Line::from(""));
        }

        let count = counts
            .get(&(category.to_string(), column.clone()))
            .copied()
            .unwrap_or(0);
        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ({}) ", app.board.column_display_name(column), count)),
        );

        f.render_widget(widget, column_chunks[i]);
    }
}

fn card_lines<'a>(card: &'a TaskCard, highlighted: bool, palette: &Palette) -> Vec<Line<'a>> {
    let base = if highlighted {
        Style::default().bg(palette.highlight)
    } else {
        Style::default()
    };

    let (symbol, color) = priority_indicator(card.priority);
    let marker = if card.selected { "[x] " } else { "" };
    let content = if card.content.is_empty() {
        "(empty)"
    } else {
        card.content.as_str()
    };
    let mut title_style = base.fg(palette.text);
    if card.archived {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }

    let title = Line::from(vec![
        Span::styled(" ", base),
        Span::styled(marker, base.fg(Color::Yellow)),
        Span::styled(symbol, base.fg(color)),
        Span::styled(" ", base),
        Span::styled(content, title_style),
    ]);

    let mut meta = vec![Span::styled(
        format!("   {} {}d", card.id, card.days_in_column),
        base.fg(palette.muted),
    )];
    if card.subtasks_total > 0 {
        meta.push(Span::styled(
            format!(" [{}/{}]", card.subtasks_done, card.subtasks_total),
            base.fg(palette.muted),
        ));
    }
    if card.comment_count > 0 {
        meta.push(Span::styled(
            format!(" ✎{}", card.comment_count),
            base.fg(palette.muted),
        ));
    }
    if card.is_blocked() {
        meta.push(Span::styled(" blocked", base.fg(Color::Red)));
    }
    for tag in &card.tags {
        meta.push(Span::styled(format!(" #{}", tag), base.fg(Color::Magenta)));
    }

    vec![title, Line::from(meta)]
}

fn draw_status_bar<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let palette = Palette::for_theme(app.board.theme());

    let (mode, mode_color) = match (&app.popup, app.view) {
        (Popup::Input { .. }, _) => ("INPUT", Color::Green),
        (Popup::Confirm(_), _) => ("CONFIRM", Color::Red),
        (_, View::TaskDetail) => ("TASK", Color::Magenta),
        _ if !app.board.selection().is_empty() => ("SELECT", Color::Yellow),
        _ => ("NORMAL", Color::Blue),
    };

    let hints = match (&app.popup, app.view) {
        (Popup::Input { .. }, _) => "Enter: save | Esc: cancel".to_string(),
        (Popup::Confirm(_), _) => "y: confirm | n/Esc: cancel".to_string(),
        (_, View::TaskDetail) => {
            "s: subtask | x: toggle | m: comment | t/T: tag | b/B: dependency | Esc: back"
                .to_string()
        }
        _ if !app.board.selection().is_empty() => format!(
            "{} selected | M: move here | 1-4: priority | B: archive | X: delete | Esc: clear",
            app.board.selection().len()
        ),
        _ => "n: new | i: idea | Enter: details | H/L: move | ?: help | q: quit".to_string(),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default().bg(mode_color).fg(Color::White),
        ),
        Span::raw(" "),
        Span::styled(hints, Style::default().fg(palette.muted)),
    ];
    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(palette.accent)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_task_detail<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let Some(task) = app.detail_task.as_deref().and_then(|id| app.board.task(id)) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_task_info(f, content_chunks[0], app, task);
    draw_task_comments(f, content_chunks[1], app, task);
    draw_status_bar(f, chunks[2], app);
}

fn draw_task_info<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>, task: &Task) {
    let palette = Palette::for_theme(app.board.theme());
    let label = Style::default().fg(palette.muted);
    let (symbol, color) = priority_indicator(task.priority);

    let mut lines = vec![
        Line::from(Span::styled(
            task.content.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Priority: ", label),
            Span::styled(format!("{} {}", symbol, task.priority), Style::default().fg(color)),
        ]),
        Line::from(vec![
            Span::styled("Column:   ", label),
            Span::raw(app.board.column_display_name(&task.column)),
            Span::styled(
                format!(" ({} days)", kanban_store::time_in_column(task, Utc::now())),
                label,
            ),
        ]),
        Line::from(vec![
            Span::styled("Created:  ", label),
            Span::raw(task.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
    ];

    if task.archived {
        lines.push(Line::from(Span::styled("Archived", Style::default().fg(Color::Yellow))));
    }
    if !task.tags.is_empty() {
        let tags: Vec<String> = task.tags.iter().map(|t| format!("#{}", t)).collect();
        lines.push(Line::from(vec![
            Span::styled("Tags:     ", label),
            Span::styled(tags.join(" "), Style::default().fg(Color::Magenta)),
        ]));
    }

    let dependencies = app.board.dependency_status(&task.id);
    if !dependencies.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Depends on", label)));
        for dep in dependencies {
            let (mark, color) = if dep.satisfied {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", mark), Style::default().fg(color)),
                Span::raw(format!("{} {}", dep.id, dep.content)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Subtasks {}/{}", task.completed_subtasks(), task.subtasks.len()),
        label,
    )));
    for (i, subtask) in task.subtasks.iter().enumerate() {
        let check = if subtask.completed { "[x]" } else { "[ ]" };
        let style = if i == app.selected_subtask {
            Style::default().bg(palette.highlight)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {} {}", check, subtask.content),
            style,
        )));
    }

    let info = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(format!(" {} ", task.id)),
        );
    f.render_widget(info, area);
}

fn draw_task_comments<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>, task: &Task) {
    let palette = Palette::for_theme(app.board.theme());

    let mut lines = Vec::new();
    for comment in &task.comments {
        lines.push(Line::from(Span::styled(
            comment.created_at.format("%Y-%m-%d %H:%M").to_string(),
            Style::default().fg(palette.muted),
        )));
        lines.push(Line::from(comment.content.as_str()));
        lines.push(Line::from(""));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No comments yet. Press m to add one.",
            Style::default().fg(palette.muted),
        )));
    }

    let comments = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted))
            .title(format!(" Comments ({}) ", task.comments.len())),
    );
    f.render_widget(comments, area);
}

fn draw_input_popup(f: &mut Frame, title: &str, text: &str) {
    let area = centered_rect(60, 20, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let input = Paragraph::new(Line::from(vec![
        Span::raw(text),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .wrap(Wrap { trim: false })
    .block(block);

    f.render_widget(input, area);
}

fn draw_confirm_popup(f: &mut Frame, prompt: &str) {
    let area = centered_rect(50, 20, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Message
            Constraint::Length(2), // Hint
            Constraint::Min(0),    // Spacer
        ])
        .split(inner);

    let message = Paragraph::new(prompt)
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    let hint = Paragraph::new("y: yes | n: no, cancel")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[1]);
}

const HELP: &[(&str, &str)] = &[
    ("h/j/k/l", "navigate"),
    ("Tab", "switch between ideas and columns"),
    ("n / i", "new task / new idea"),
    ("p", "promote idea into the selected column"),
    ("Enter", "task details"),
    ("e", "edit task"),
    ("H / L", "move task to previous / next column"),
    ("K / J", "move task up / down"),
    ("1-4", "priority urgent, high, medium, low"),
    ("a / A", "archive task / show archived"),
    ("space", "select task for bulk actions"),
    ("M / B / X", "bulk move / archive / delete"),
    ("/ f g", "search, priority filter, tag filter"),
    ("c", "next category"),
    ("+ / -", "add / remove column"),
    ("t", "toggle theme"),
    ("d", "delete"),
    ("C", "clear all data"),
    ("q", "quit"),
];

fn draw_help_popup(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());

    f.render_widget(Clear, area);

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:>10}  ", keys), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(help, area);
}

fn draw_error_popup(f: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);

    f.render_widget(text, area);
}

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
