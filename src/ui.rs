use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Widget},
    Frame,
};

use crate::{
    app::{App, Focus, StatusType},
    features::history::{HistoryRecord, MAX_HISTORY},
    shared::theme::{ModernIcons, ModernTheme},
    translation::catalog,
    widgets::{
        format_display_text, icon_span, metric_span, wrap_to_width, ModernButton, ModernCard,
        ModernList, ModernListItem,
    },
};
use unicode_width::UnicodeWidthStr;

/// Draw the main UI
pub fn draw(f: &mut Frame, app: &App) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + status
            Constraint::Length(3), // Language selectors
            Constraint::Min(0),    // Panes + history
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    draw_header(f, chunks[0], app, theme);
    draw_selectors(f, chunks[1], app, theme);
    draw_main_content(f, chunks[2], app, theme);
    draw_footer(f, chunks[3], app, theme);

    if app.config.show_help {
        draw_help_overlay(f, f.size(), app, theme);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let mut spans = vec![
        icon_span(ModernIcons::TRANSLATE, Style::default().fg(theme.accent)),
        Span::styled(format!(" {}", app.i18n.t("panel.header")), theme.header_style()),
    ];

    if let Some(ref status) = app.status_message {
        let (icon, style) = match status.message_type {
            StatusType::Info => (ModernIcons::INFO, theme.info_style()),
            StatusType::Success => (ModernIcons::SUCCESS, theme.success_style()),
            StatusType::Warning => (ModernIcons::WARNING, theme.warning_style()),
            StatusType::Error => (ModernIcons::ERROR, theme.danger_style()),
        };
        spans.push(Span::styled(" │ ", theme.border_style()));
        if app.form.phase().is_busy() {
            spans.push(Span::styled(
                format!("{} ", app.spinner.current()),
                theme.info_style(),
            ));
        } else {
            spans.push(icon_span(icon, style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(status.text.as_str(), style));
    }

    ModernCard::new(Text::from(Line::from(spans)), theme).render(area, f.buffer_mut());
}

/// From/To selectors with the swap marker between them
fn draw_selectors(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(47),
            Constraint::Percentage(6),
            Constraint::Percentage(47),
        ])
        .split(area);

    let from_focused = app.focus == Focus::FromLang;
    let to_focused = app.focus == Focus::ToLang;

    ModernCard::new(
        selector_line(catalog::display_name_of(app.form.source_lang()), from_focused, theme),
        theme,
    )
    .title(app.i18n.t("panel.from"))
    .focused(from_focused)
    .render(chunks[0], f.buffer_mut());

    let swap_style = if app.form.target_lang() == catalog::AUTO_DETECT {
        theme.dimmed_style()
    } else {
        Style::default()
            .fg(theme.secondary)
            .add_modifier(Modifier::BOLD)
    };
    Paragraph::new(vec![Line::from(""), Line::from(icon_span(ModernIcons::SWAP, swap_style))])
        .alignment(Alignment::Center)
        .render(chunks[1], f.buffer_mut());

    ModernCard::new(
        selector_line(catalog::display_name_of(app.form.target_lang()), to_focused, theme),
        theme,
    )
    .title(app.i18n.t("panel.to"))
    .focused(to_focused)
    .render(chunks[2], f.buffer_mut());
}

fn selector_line<'a>(name: &'a str, focused: bool, theme: &ModernTheme) -> Text<'a> {
    if focused {
        Text::from(Line::from(vec![
            Span::styled("◀ ", theme.metric_style()),
            Span::styled(name, theme.header_style()),
            Span::styled(format!(" {}", ModernIcons::ARROW_RIGHT), theme.metric_style()),
        ]))
    } else {
        Text::from(Line::from(Span::styled(name, theme.text_style())))
    }
}

fn draw_main_content(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Source
            Constraint::Length(1),      // Translate button + counter
            Constraint::Min(0),         // Target
        ])
        .split(columns[0]);

    draw_source_pane(f, panes[0], app, theme);
    draw_action_row(f, panes[1], app, theme);
    draw_target_pane(f, panes[2], app, theme);
    draw_history(f, columns[1], app, theme);
}

fn draw_source_pane(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let focused = app.focus == Focus::Source;
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    // Wrapped here so the pane can scroll to the last row
    let mut rows = wrap_to_width(app.form.source_text(), inner_width);
    if focused && rows.last().is_some_and(|row| row.width() >= inner_width) {
        rows.push(String::new());
    }

    let mut lines: Vec<Line> = rows
        .into_iter()
        .map(|row| Line::from(Span::styled(row, theme.text_style())))
        .collect();

    if focused {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(icon_span(ModernIcons::CURSOR, theme.border_focused_style()));
        }
    }

    let scroll = lines.len().saturating_sub(inner_height);
    ModernCard::new(Text::from(lines), theme)
        .title(app.i18n.t("panel.source"))
        .focused(focused)
        .scroll(u16::try_from(scroll).unwrap_or(u16::MAX))
        .render(area, f.buffer_mut());
}

/// Translate button on the left, character counter on the right
fn draw_action_row(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(0)])
        .split(area);

    let label = format!("{} {}", ModernIcons::TRANSLATE, app.i18n.t("controls.translate"));
    ModernButton::new(&label, theme)
        .disabled(!app.form.can_translate())
        .render(chunks[0], f.buffer_mut());

    let counter = Span::styled(
        app.form.char_count_label(),
        theme.counter_style(app.form.char_count(), app.form.max_chars()),
    );
    Paragraph::new(Line::from(counter))
        .alignment(Alignment::Right)
        .render(chunks[1], f.buffer_mut());
}

fn draw_target_pane(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let content = if app.form.phase().is_busy() {
        Text::from(Line::from(vec![
            Span::styled(format!("{} ", app.spinner.current()), theme.info_style()),
            Span::styled(app.i18n.t("target.busy"), theme.dimmed_style()),
        ]))
    } else if app.form.target_text().is_empty() {
        Text::from(Span::styled(
            app.i18n.t("target.placeholder"),
            theme.dimmed_style(),
        ))
    } else {
        Text::from(
            app.form
                .target_text()
                .split('\n')
                .map(|line| Line::from(Span::styled(line, theme.text_style())))
                .collect::<Vec<_>>(),
        )
    };

    ModernCard::new(content, theme)
        .title(app.i18n.t("panel.target"))
        .render(area, f.buffer_mut());
}

/// "<from> → <to> · HH:MM:SS"
pub fn history_heading(record: &HistoryRecord) -> String {
    format!(
        "{} → {} · {}",
        catalog::display_name_of(&record.source_lang),
        catalog::display_name_of(&record.target_lang),
        record.local_time_label()
    )
}

fn draw_history(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let log = app.history.log();
    let focused = app.focus == Focus::History;
    let title = format!(
        "{} {} ({}/{})",
        ModernIcons::HISTORY,
        app.i18n.t("panel.history"),
        log.len(),
        MAX_HISTORY
    );

    if log.is_empty() {
        ModernCard::new(
            Text::from(Span::styled(
                app.i18n.t("history.empty"),
                theme.secondary_text_style(),
            )),
            theme,
        )
        .title(&title)
        .focused(focused)
        .render(area, f.buffer_mut());
        return;
    }

    // Borders plus the detail indent
    let text_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ModernListItem> = log
        .records()
        .iter()
        .map(|record| {
            ModernListItem::new(history_heading(record))
                .icon(ModernIcons::BULLET)
                .detail(Span::styled(
                    format_display_text(&record.source_text, text_width),
                    theme.text_style(),
                ))
                .detail(Span::styled(
                    format_display_text(&record.translated_text, text_width),
                    Style::default().fg(theme.success),
                ))
        })
        .collect();

    ModernList::new(items, theme)
        .title(&title)
        .focused(focused)
        .selected(focused.then_some(app.selected_history))
        .render(area, f.buffer_mut());
}

fn key_hint<'a>(key: &'a str, label: &'a str, theme: &'a ModernTheme) -> Vec<Span<'a>> {
    vec![
        metric_span(key.to_string(), theme),
        Span::styled(format!(" {label}"), theme.secondary_text_style()),
        Span::styled(format!(" {} ", ModernIcons::BULLET), theme.border_style()),
    ]
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let copy_label = format!("{} {}", ModernIcons::COPY, app.i18n.t("controls.copy"));
    let swap_label = format!("{} {}", ModernIcons::SWAP, app.i18n.t("controls.swap"));
    let theme_label = format!(
        "{} ({})",
        app.i18n.t("controls.theme"),
        app.config.theme_display()
    );

    let mut spans = Vec::new();
    spans.extend(key_hint("Enter", app.i18n.t("controls.translate"), theme));
    spans.extend(key_hint("Tab", app.i18n.t("controls.focus"), theme));
    spans.extend(key_hint("^S", &swap_label, theme));
    spans.extend(key_hint("^Y", &copy_label, theme));
    spans.extend(key_hint("^L", app.i18n.t("controls.clear_history"), theme));
    spans.extend(key_hint("^T", &theme_label, theme));
    spans.extend(key_hint("F1", app.i18n.t("controls.help"), theme));
    spans.push(Span::styled(
        "Esc",
        theme.danger_style().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!(" {}", app.i18n.t("controls.quit")),
        theme.secondary_text_style(),
    ));

    ModernCard::new(Text::from(Line::from(spans)), theme)
        .title(app.i18n.t("panel.controls"))
        .render(area, f.buffer_mut());
}

/// Draw help overlay with key bindings
fn draw_help_overlay(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    // Create centered popup area
    let popup_area = Rect {
        x: area.width / 6,
        y: area.height / 6,
        width: area.width * 2 / 3,
        height: area.height * 2 / 3,
    };

    // Clear the background
    f.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from(Span::styled(
        app.i18n.t("help.title"),
        theme.header_style(),
    ))];
    for key in [
        "help.line1",
        "help.line2",
        "help.line3",
        "help.line4",
        "help.line5",
        "help.line6",
        "help.line7",
    ] {
        lines.push(Line::from(Span::styled(
            app.i18n.t(key),
            theme.secondary_text_style(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.i18n.t("help.about.title"),
        theme.header_style(),
    )));
    for key in ["help.about.line1", "help.about.line2", "help.about.line3"] {
        lines.push(Line::from(Span::styled(
            app.i18n.t(key),
            theme.secondary_text_style(),
        )));
    }

    let title = format!("{} {}", ModernIcons::HELP, app.i18n.t("panel.help"));
    ModernCard::new(Text::from(lines), theme)
        .title(&title)
        .focused(true)
        .render(popup_area, f.buffer_mut());
}
