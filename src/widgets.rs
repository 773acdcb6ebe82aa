use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::shared::theme::ModernTheme;

/// Helper function to render text with proper Unicode support
/// Returns the number of columns (visual width) consumed
fn render_text_unicode_aware(
    text: &str,
    buf: &mut Buffer,
    x: u16,
    y: u16,
    max_x: u16,
    style: Style,
) -> u16 {
    let mut current_x = x;

    for grapheme in text.graphemes(true) {
        let width = grapheme.width();

        // Check if we have enough space for this grapheme
        if current_x + width as u16 > max_x {
            break;
        }

        let cell = buf.get_mut(current_x, y);
        cell.set_symbol(grapheme);
        cell.set_style(style);

        current_x += width as u16;

        // For zero-width graphemes, ensure we advance at least one position
        if width == 0 && current_x == x {
            current_x += 1;
        }
    }

    current_x - x
}

/// Bordered panel with wrapped text content
pub struct ModernCard<'a> {
    title: Option<&'a str>,
    content: Text<'a>,
    theme: &'a ModernTheme,
    focused: bool,
    scroll: u16,
}

impl<'a> ModernCard<'a> {
    pub fn new(content: Text<'a>, theme: &'a ModernTheme) -> Self {
        Self {
            title: None,
            content,
            theme,
            focused: false,
            scroll: 0,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Skip this many rows of content
    pub fn scroll(mut self, rows: u16) -> Self {
        self.scroll = rows;
        self
    }
}

impl<'a> Widget for ModernCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = modern_block(self.title, self.theme, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        // Keep leading whitespace: it is part of the user's text
        Paragraph::new(self.content)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}

/// Bordered list whose items may span several rows
pub struct ModernList<'a> {
    items: Vec<ModernListItem<'a>>,
    selected: Option<usize>,
    theme: &'a ModernTheme,
    title: Option<&'a str>,
    focused: bool,
}

pub struct ModernListItem<'a> {
    text: Line<'a>,
    details: Vec<Line<'a>>,
    icon: Option<&'a str>,
}

impl<'a> ModernListItem<'a> {
    pub fn new<T: Into<Line<'a>>>(text: T) -> Self {
        Self {
            text: text.into(),
            details: Vec::new(),
            icon: None,
        }
    }

    pub fn icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Extra indented row rendered under the item's first line
    pub fn detail<T: Into<Line<'a>>>(mut self, line: T) -> Self {
        self.details.push(line.into());
        self
    }

    fn height(&self) -> usize {
        1 + self.details.len()
    }
}

impl<'a> ModernList<'a> {
    pub fn new(items: Vec<ModernListItem<'a>>, theme: &'a ModernTheme) -> Self {
        Self {
            items,
            selected: None,
            theme,
            title: None,
            focused: false,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// First item to draw so that `selected` fits in `rows` rows
fn first_visible_item(heights: &[usize], selected: Option<usize>, rows: usize) -> usize {
    let Some(selected) = selected.filter(|&i| i < heights.len()) else {
        return 0;
    };

    let mut first = selected;
    let mut used = heights[selected];
    while first > 0 && used + heights[first - 1] <= rows {
        first -= 1;
        used += heights[first];
    }
    first
}

impl<'a> Widget for ModernList<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = modern_block(self.title, self.theme, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let heights: Vec<usize> = self.items.iter().map(ModernListItem::height).collect();
        let first = first_visible_item(&heights, self.selected, inner.height as usize);
        let max_x = inner.x + inner.width;
        let mut y = inner.y;

        for (i, item) in self.items.iter().enumerate().skip(first) {
            if y >= inner.y + inner.height {
                break;
            }

            let is_selected = Some(i) == self.selected;
            let item_style = if is_selected {
                self.theme.selected_style()
            } else {
                self.theme.secondary_text_style()
            };

            if is_selected {
                for bg_x in inner.x..max_x {
                    buf.get_mut(bg_x, y).set_style(item_style);
                }
            }

            let mut x = inner.x;
            if let Some(icon) = item.icon {
                x += render_text_unicode_aware(icon, buf, x, y, max_x, item_style);
                if x < max_x {
                    buf.get_mut(x, y).set_char(' ');
                    x += 1;
                }
            }

            for span in &item.text.spans {
                x += render_text_unicode_aware(
                    &span.content,
                    buf,
                    x,
                    y,
                    max_x,
                    span.style.patch(item_style),
                );
            }
            y += 1;

            for detail in &item.details {
                if y >= inner.y + inner.height {
                    break;
                }
                let mut x = inner.x + 2;
                for span in &detail.spans {
                    x += render_text_unicode_aware(&span.content, buf, x, y, max_x, span.style);
                }
                y += 1;
            }
        }
    }
}

/// Single-row button that can be shown disabled
pub struct ModernButton<'a> {
    text: &'a str,
    theme: &'a ModernTheme,
    disabled: bool,
}

impl<'a> ModernButton<'a> {
    pub fn new(text: &'a str, theme: &'a ModernTheme) -> Self {
        Self {
            text,
            theme,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl<'a> Widget for ModernButton<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let button_style = if self.disabled {
            self.theme.dimmed_style().add_modifier(Modifier::DIM)
        } else {
            Style::default()
                .fg(self.theme.text_primary)
                .bg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        };

        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let cell = buf.get_mut(x, y);
                cell.set_char(' ');
                cell.set_style(button_style);
            }
        }

        let text_width = self.text.width();
        if text_width <= area.width as usize {
            let x_offset = (area.width as usize - text_width) / 2;
            render_text_unicode_aware(
                self.text,
                buf,
                area.x + x_offset as u16,
                area.y + area.height / 2,
                area.x + area.width,
                button_style,
            );
        }
    }
}

/// Helper function to create a modern styled block
pub fn modern_block<'a>(
    title: Option<&'a str>,
    theme: &'a ModernTheme,
    focused: bool,
) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        });

    if let Some(title) = title {
        block = block.title(title);
    }

    block
}

/// Create a styled icon span
pub fn icon_span<'a>(icon: &'a str, style: Style) -> Span<'a> {
    Span::styled(icon, style)
}

/// Create a metric display span (counters, key names)
pub fn metric_span<'a>(text: String, theme: &'a ModernTheme) -> Span<'a> {
    Span::styled(text, theme.metric_style())
}

/// Hard-wrap text into rows of at most `width` columns.
/// Every line break starts a new row; empty lines are kept.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for grapheme in line.graphemes(true) {
            let grapheme_width = grapheme.width();
            if row_width + grapheme_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push_str(grapheme);
            row_width += grapheme_width;
        }
        rows.push(row);
    }

    rows
}

/// Truncate text to a display width, collapsing line breaks.
/// Handles wide characters and grapheme clusters.
pub fn format_display_text(text: &str, max_width: usize) -> String {
    let single_line: String = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if single_line.width() <= max_width {
        single_line
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        let ellipsis = "...";
        let target_width = max_width.saturating_sub(ellipsis.width());

        for grapheme in single_line.graphemes(true) {
            let grapheme_width = grapheme.width();
            if current_width + grapheme_width > target_width {
                break;
            }
            result.push_str(grapheme);
            current_width += grapheme_width;
        }

        result.push_str(ellipsis);
        result
    }
}
