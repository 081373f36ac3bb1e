//! Terminal rendering of the fixture page.

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use vitrine_engine::App;
use vitrine_tui::{GLYPHS, draw};

use crate::common::reduced_app;

fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 60)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn one_indicator_is_active_per_slide() {
    let mut app = reduced_app();
    for k in 1..=6 {
        let _ = app.go_to(k);
        let text = render(&mut app);
        assert_eq!(text.matches(GLYPHS.indicator_active).count(), 1, "slide {k}");
        assert_eq!(text.matches(GLYPHS.indicator).count(), 5, "slide {k}");
    }
}

#[test]
fn status_bar_announces_the_slide() {
    let mut app = reduced_app();
    let _ = app.go_to(3);
    let text = render(&mut app);
    assert!(text.contains("Slide 3 of 6: Offline"));
    assert!(text.contains("50%"));
}

#[test]
fn content_column_scrolls_with_the_app() {
    let mut app = reduced_app();
    let text = render(&mut app);
    assert!(text.contains("Features"));
    assert!(!text.contains("Footer"));

    app.scroll_to(f32::MAX);
    let text = render(&mut app);
    assert!(text.contains("Footer"));
    assert!(!text.contains("Private"));
}
