//! Terminal rendering for Vitrine using ratatui.
//!
//! The screen is the page: the slide deck on top with its navigation
//! buttons, indicators and progress bar, the scrolling content column below
//! it, and a status line that doubles as the polite live region.

mod effects;
mod input;
mod theme;

pub use effects::{PX_PER_COLUMN, PX_PER_ROW, slide_rect, transformed_rect};
pub use input::{DONATE_LABEL, DOWNLOAD_LABEL, InputPump, apply_event, handle_events, map_key};
pub use theme::{GLYPHS, Glyphs, Palette, fade, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use vitrine_engine::{App, Focus, SlideElement, SlideNumber, VisualState};
use vitrine_engine::page::{Block as ContentBlock, SECTION_HEADER_HEIGHT};
use vitrine_engine::viewport::Layout as BoxLayout;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = Palette::standard();
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Percentage(45), // Slides
            Constraint::Length(1),      // Buttons + indicators
            Constraint::Length(1),      // Progress
            Constraint::Min(3),         // Content column
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    // Keep the engine's viewport the size of the content column.
    let content_px = f32::from(chunks[3].height.saturating_sub(2).max(1)) * PX_PER_ROW;
    if (app.viewport().height - content_px).abs() > f32::EPSILON {
        app.resize(content_px);
    }

    draw_slides(frame, app, chunks[0], &palette);
    draw_navigation(frame, app, chunks[1], &palette);
    draw_progress(frame, app, chunks[2], &palette);
    draw_content(frame, app, chunks[3], &palette);
    draw_status_bar(frame, app, chunks[4], &palette);
}

fn draw_slides(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(Span::styled(" Vitrine ", styles::title(palette)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(slides) = app.slides() else {
        let message = app
            .init_error()
            .map_or_else(|| "Slides unavailable".to_string(), ToString::to_string);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(palette.error),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    };

    let focus = app.focus();
    for (number, slide) in slides.deck().slides() {
        let (rect, opacity) = match slide.style {
            Some(style) => match slide_rect(style, inner) {
                Some(rect) => (rect, style.opacity),
                None => continue,
            },
            None if slide.active => (inner, 1.0),
            None => continue,
        };
        // A slide leaving to the left loses its leading columns.
        let skip = if rect.x == inner.x {
            inner.width.saturating_sub(rect.width)
        } else {
            0
        };
        let body = app
            .page()
            .slide_bodies
            .get(number.index())
            .map(|b| b.lines.as_slice())
            .unwrap_or_default();
        let lines = slide_lines(slide, number, body, focus, opacity, palette);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().bg(palette.bg_dark))
                .scroll((0, skip)),
            rect,
        );
    }
}

fn slide_lines<'a>(
    slide: &'a SlideElement,
    number: SlideNumber,
    body: &'a [String],
    focus: &Focus,
    opacity: f32,
    palette: &Palette,
) -> Vec<Line<'a>> {
    let faded = |color| fade(color, palette.bg_dark, opacity);
    let mut lines = Vec::with_capacity(body.len() + 4);

    let title_style = if *focus == Focus::SlideHeading(number) {
        styles::focused(palette)
    } else {
        Style::default()
            .fg(faded(palette.primary))
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(slide.title.as_str(), title_style)));
    lines.push(Line::from(""));
    for text in body {
        lines.push(Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(faded(palette.text_primary)),
        )));
    }
    if let Some(action) = &slide.primary_action {
        let style = if *focus == Focus::SlideAction(number) {
            styles::focused(palette)
        } else {
            Style::default().fg(faded(palette.accent))
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("[ {action} ]"), style)));
    }
    lines
}

fn draw_navigation(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let Some(slides) = app.slides() else {
        return;
    };
    let deck = slides.deck();
    let previous = format!("{} {}", GLYPHS.previous, deck.previous_button().label);
    let next = format!("{} {}", deck.next_button().label, GLYPHS.next);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(previous.width() as u16 + 1),
            Constraint::Min(1),
            Constraint::Length(next.width() as u16 + 1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            previous,
            styles::button(palette, deck.previous_button().disabled),
        )),
        chunks[0],
    );

    let mut dots = Vec::with_capacity(deck.indicators().len() * 2);
    for indicator in deck.indicators() {
        let (glyph, color) = if indicator.active {
            (GLYPHS.indicator_active, palette.primary)
        } else {
            (GLYPHS.indicator, palette.text_muted)
        };
        dots.push(Span::styled(glyph, Style::default().fg(color)));
        dots.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            next,
            styles::button(palette, deck.next_button().disabled),
        ))
        .alignment(Alignment::Right),
        chunks[2],
    );
}

fn draw_progress(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let Some(progress) = app.slides().and_then(|s| s.deck().progress()) else {
        return;
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.primary).bg(palette.bg_panel))
        .ratio(f64::from(progress.fill).clamp(0.0, 1.0))
        .label(progress.width_css());
    frame.render_widget(gauge, area);
}

fn draw_content(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let title = app
        .current_section()
        .map_or_else(String::new, |s| format!(" {} ", s.title));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(Span::styled(title, styles::key_hint(palette)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let scroll_top = app.viewport().scroll_top;
    let page = app.page();

    for (section, layout) in page.sections.iter().zip(&page.section_layouts) {
        let header = BoxLayout {
            height: SECTION_HEADER_HEIGHT.min(layout.height),
            ..*layout
        };
        if let Some(rect) = box_rect(&header, scroll_top, inner) {
            let heading = Paragraph::new(Span::styled(
                section.title.as_str(),
                styles::title(palette),
            ));
            frame.render_widget(heading, Rect { height: 1, ..rect });
        }
    }

    for block in &page.blocks {
        let Some(base) = box_rect(&block.layout, scroll_top, inner) else {
            continue;
        };
        let state = app.animator().style(block.id).unwrap_or(VisualState::RESTING);
        let Some(rect) = transformed_rect(state, base, inner) else {
            continue;
        };
        draw_block(frame, app, block, state, rect, palette);
    }
}

fn draw_block(
    frame: &mut Frame,
    app: &App,
    block: &ContentBlock,
    state: VisualState,
    rect: Rect,
    palette: &Palette,
) {
    let faded = |color, opacity| fade(color, palette.bg_dark, opacity);
    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(faded(palette.bg_border, state.opacity)));

    let mut lines = vec![Line::from(Span::styled(
        block.text.as_str(),
        Style::default().fg(faded(palette.text_primary, state.opacity)),
    ))];
    if !block.actions.is_empty() {
        let mut spans = Vec::with_capacity(block.actions.len() * 2);
        for action in &block.actions {
            let action_state = app
                .animator()
                .style(action.id)
                .unwrap_or(VisualState::RESTING);
            // Horizontal motion reads as padding in a single text line.
            let pad = (action_state.transform.translate_x / PX_PER_COLUMN)
                .round()
                .clamp(0.0, 4.0) as usize;
            spans.push(Span::raw(" ".repeat(pad + 1)));
            spans.push(Span::styled(
                format!("[ {} ]", action.label),
                Style::default()
                    .fg(faded(palette.accent, action_state.opacity))
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(frame_block)
            .style(Style::default().bg(palette.bg_dark))
            .wrap(Wrap { trim: true }),
        rect,
    );
}

/// Map a content box to terminal rows inside `inner`, clipped.
fn box_rect(layout: &BoxLayout, scroll_top: f32, inner: Rect) -> Option<Rect> {
    let top = ((layout.top - scroll_top) / PX_PER_ROW).round() as i32 + i32::from(inner.y);
    let rows = (layout.height / PX_PER_ROW).round().max(1.0) as i32;
    let y = top.max(i32::from(inner.y));
    let end = (top + rows).min(i32::from(inner.y) + i32::from(inner.height));
    (end > y).then(|| Rect {
        x: inner.x + 1,
        y: y as u16,
        width: inner.width.saturating_sub(2),
        height: (end - y) as u16,
    })
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let left = if app.focus().is_text_entry() {
        Span::styled(
            "Newsletter field (Esc to leave)",
            styles::key_highlight(palette),
        )
    } else {
        Span::styled(
            app.announcement().unwrap_or("").to_string(),
            Style::default().fg(palette.text_primary),
        )
    };

    let autoplay = if app.autoplay().is_running() {
        GLYPHS.playing
    } else {
        GLYPHS.paused
    };
    let motion = if app.reduced_motion().is_enabled() {
        "reduced"
    } else {
        "full"
    };
    let hints = Line::from(vec![
        Span::styled(format!("{autoplay} "), styles::key_highlight(palette)),
        Span::styled("a", styles::key_highlight(palette)),
        Span::styled(" autoplay │ motion: ", styles::key_hint(palette)),
        Span::styled(motion, styles::key_highlight(palette)),
        Span::styled(" (m) │ ", styles::key_hint(palette)),
        Span::styled("q", styles::key_highlight(palette)),
        Span::styled(" quit ", styles::key_hint(palette)),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(hints.width() as u16)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(" "), left])),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(hints), chunks[1]);
}
