use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a `Rect` of the given size centered within `area`.  If `area` is
/// too small, the result is shrunk to fit.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [r] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [r] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(r);
    r
}
