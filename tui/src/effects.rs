//! Project engine visual state onto terminal cells.

use ratatui::layout::Rect;

use vitrine_engine::{SlideStyle, VisualState};

/// CSS pixels per terminal column.
pub const PX_PER_COLUMN: f32 = 8.0;
/// CSS pixels per terminal row.
pub const PX_PER_ROW: f32 = 16.0;

/// Where a slide lands inside `area` for a transition offset. Returns
/// `None` when the slide is entirely off-screen.
#[must_use]
pub fn slide_rect(style: SlideStyle, area: Rect) -> Option<Rect> {
    let shift = (style.offset_percent / 100.0 * f32::from(area.width)).round() as i32;
    shift_x(area, shift, area)
}

/// Apply an element's transform to its base rectangle, clipped to
/// `viewport`.
#[must_use]
pub fn transformed_rect(state: VisualState, base: Rect, viewport: Rect) -> Option<Rect> {
    let t = state.transform;
    let scaled = scale_rect(base, t.scale_x, t.scale_y);
    let dx = (t.translate_x / PX_PER_COLUMN).round() as i32;
    let dy = (t.translate_y / PX_PER_ROW).round() as i32;
    let moved = shift_x(scaled, dx, viewport)?;
    shift_y(moved, dy, viewport)
}

fn shift_x(base: Rect, dx: i32, clip: Rect) -> Option<Rect> {
    let left = i32::from(base.x) + dx;
    let right = left + i32::from(base.width);
    let clip_left = i32::from(clip.x);
    let clip_right = i32::from(clip.x) + i32::from(clip.width);
    let x = left.max(clip_left);
    let end = right.min(clip_right);
    (end > x).then(|| Rect {
        x: x as u16,
        width: (end - x) as u16,
        ..base
    })
}

fn shift_y(base: Rect, dy: i32, clip: Rect) -> Option<Rect> {
    let top = i32::from(base.y) + dy;
    let bottom = top + i32::from(base.height);
    let clip_top = i32::from(clip.y);
    let clip_bottom = i32::from(clip.y) + i32::from(clip.height);
    let y = top.max(clip_top);
    let end = bottom.min(clip_bottom);
    (end > y).then(|| Rect {
        y: y as u16,
        height: (end - y) as u16,
        ..base
    })
}

fn scale_rect(base: Rect, scale_x: f32, scale_y: f32) -> Rect {
    let width = (f32::from(base.width) * scale_x.max(0.0)).round() as u16;
    let height = (f32::from(base.height) * scale_y.max(0.0)).round() as u16;
    // Overshoot past 1.0 stays inside the base box.
    let width = width.max(1).min(base.width);
    let height = height.max(1).min(base.height);
    let x = base.x + (base.width.saturating_sub(width) / 2);
    let y = base.y + (base.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}
