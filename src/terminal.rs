//! Drawing rounds in the terminal.
//!
//! Each tile is drawn as [`COLUMNS_PER_TILE`][consts::COLUMNS_PER_TILE]
//! terminal columns by one row, so that tiles come out roughly square.  The
//! score bar takes up the row above the board.
use crate::consts;
use crate::game::{Axis, Corner, Direction, Round, SegmentShape};
use crate::scene::{compose, Area, Asset, Banner, Rgb, Surface};
use crate::util::center_rect;
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Alignment, Position, Rect, Size},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

/// A [`Surface`] drawing into a ratatui [`Buffer`]
#[derive(Debug)]
pub(crate) struct TermSurface<'a> {
    buf: &'a mut Buffer,

    /// Terminal column & row of the top-left corner of tile (0, 0)
    origin: (i32, i32),

    /// Nothing is drawn outside of this region
    clip: Rect,
}

impl<'a> TermSurface<'a> {
    pub(crate) fn new(buf: &'a mut Buffer, origin: Position, clip: Rect) -> TermSurface<'a> {
        let clip = clip.intersection(buf.area);
        TermSurface {
            buf,
            origin: (i32::from(origin.x), i32::from(origin.y)),
            clip,
        }
    }

    /// Terminal column at which a horizontal position in tiles falls
    fn column(&self, x: f32) -> i32 {
        self.origin.0 + to_cells(x, consts::COLUMNS_PER_TILE)
    }

    /// Terminal row at which a vertical position in tiles falls
    fn row(&self, y: f32) -> i32 {
        self.origin.1 + to_cells(y, 1)
    }

    /// The terminal cells covered by `area`, clipped
    fn rect(&self, area: Area) -> Rect {
        let left = self.column(area.x);
        let right = self.column(area.x + area.width);
        let top = self.row(area.y);
        let bottom = self.row(area.y + area.height);
        let clamp = |v: i32| u16::try_from(v.max(0)).unwrap_or(u16::MAX);
        let (x, y) = (clamp(left), clamp(top));
        Rect {
            x,
            y,
            width: clamp(right).saturating_sub(x),
            height: clamp(bottom).saturating_sub(y),
        }
        .intersection(self.clip)
    }

    fn cell_mut(&mut self, column: i32, row: i32) -> Option<&mut Cell> {
        let pos = Position::new(u16::try_from(column).ok()?, u16::try_from(row).ok()?);
        if self.clip.contains(pos) {
            self.buf.cell_mut(pos)
        } else {
            None
        }
    }

    /// Draw a two-column glyph with its left half at the given cell.  Blank
    /// halves are skipped so that whatever is underneath shows through.
    fn put_glyph(&mut self, column: i32, row: i32, glyph: [char; 2], style: Style) {
        for (col, ch) in (column..).zip(glyph) {
            if ch == ' ' {
                continue;
            }
            if let Some(cell) = self.cell_mut(col, row) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }

    fn draw_score(&mut self, score: u32, area: Area) {
        let bar = self.rect(area);
        if bar.is_empty() {
            return;
        }
        self.buf.set_style(bar, consts::SCORE_BAR_STYLE);
        // The score may run past the end of the board.
        let width = self.clip.right().saturating_sub(bar.x);
        let _ = self.buf.set_stringn(
            bar.x,
            bar.y,
            format!(" Score: {score}"),
            usize::from(width),
            Style::new(),
        );
    }

    fn draw_banner(&mut self, banner: Banner, area: Area) {
        let (title, lines) = banner_text(banner);
        let content_width = lines
            .iter()
            .map(Line::width)
            .chain(std::iter::once(title.width()))
            .max()
            .unwrap_or_default();
        let size = Size {
            width: u16::try_from(content_width)
                .unwrap_or(u16::MAX)
                .saturating_add(4),
            height: u16::try_from(lines.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2),
        };
        let box_area = center_rect(self.rect(area), size);
        let block = Block::bordered()
            .title(title)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(box_area);
        Clear.render(box_area, self.buf);
        block.render(box_area, self.buf);
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, self.buf);
        }
    }
}

impl Surface for TermSurface<'_> {
    fn fill(&mut self, area: Area, color: Rgb) {
        let rect = self.rect(area);
        let Rgb(r, g, b) = color;
        self.buf.set_style(rect, Style::new().bg(Color::Rgb(r, g, b)));
    }

    fn blit(&mut self, asset: Asset, area: Area) {
        match asset {
            Asset::Snake(shape) => {
                let (column, row) = (self.column(area.x), self.row(area.y));
                self.put_glyph(column, row, snake_glyph(shape), consts::SNAKE_STYLE);
            }
            Asset::Fruit => {
                // Fruits shrink about their centers, so it's the center that
                // says which tile to draw in.
                let cx = (area.x + area.width / 2.0).floor();
                let cy = (area.y + area.height / 2.0).floor();
                let glyph = if area.width >= consts::FRUIT_LARGE_RATIO {
                    consts::FRUIT_LARGE
                } else {
                    [consts::FRUIT_SMALL, ' ']
                };
                let (column, row) = (self.column(cx), self.row(cy));
                self.put_glyph(column, row, glyph, consts::FRUIT_STYLE);
            }
            Asset::Score(score) => self.draw_score(score, area),
            Asset::Banner(banner) => self.draw_banner(banner, area),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_cells(tiles: f32, scale: u16) -> i32 {
    (tiles * f32::from(scale)).round() as i32
}

fn snake_glyph(shape: SegmentShape) -> [char; 2] {
    match shape {
        SegmentShape::Head(Direction::North) => consts::SNAKE_HEAD_NORTH,
        SegmentShape::Head(Direction::South) => consts::SNAKE_HEAD_SOUTH,
        SegmentShape::Head(Direction::East) => consts::SNAKE_HEAD_EAST,
        SegmentShape::Head(Direction::West) => consts::SNAKE_HEAD_WEST,
        SegmentShape::Body(Axis::Horizontal) => consts::SNAKE_BODY_HORIZONTAL,
        SegmentShape::Body(Axis::Vertical) => consts::SNAKE_BODY_VERTICAL,
        SegmentShape::Corner(Corner::NorthEast) => consts::SNAKE_CORNER_NORTH_EAST,
        SegmentShape::Corner(Corner::NorthWest) => consts::SNAKE_CORNER_NORTH_WEST,
        SegmentShape::Corner(Corner::SouthEast) => consts::SNAKE_CORNER_SOUTH_EAST,
        SegmentShape::Corner(Corner::SouthWest) => consts::SNAKE_CORNER_SOUTH_WEST,
        SegmentShape::Tail(Direction::North) => consts::SNAKE_TAIL_NORTH,
        SegmentShape::Tail(Direction::South) => consts::SNAKE_TAIL_SOUTH,
        SegmentShape::Tail(Direction::East) => consts::SNAKE_TAIL_EAST,
        SegmentShape::Tail(Direction::West) => consts::SNAKE_TAIL_WEST,
    }
}

/// A line naming a key to press, e.g. "Restart (r)"
fn key_line(action: &'static str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(action),
        Span::raw(" ("),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

fn banner_text(banner: Banner) -> (&'static str, Vec<Line<'static>>) {
    /*
     * ┌─── PAUSED ────┐
     * │ Resume (Esc)  │
     * │ Restart (r)   │
     * │ Quit (q)      │
     * └───────────────┘
     */
    match banner {
        Banner::Paused => (
            " PAUSED ",
            vec![
                key_line("Resume", "Esc"),
                key_line("Restart", "r"),
                key_line("Quit", "q"),
            ],
        ),
        Banner::Lost(cause) => (
            " OUCH ",
            vec![
                Line::from(format!("The snake {cause}!")),
                Line::default(),
                key_line("Continue", "Esc"),
                key_line("Restart", "r"),
                key_line("Quit", "q"),
            ],
        ),
        Banner::Won {
            score,
            eaten,
            losses,
        } => (
            " YOU WIN ",
            vec![
                Line::from(format!("Final score: {score}")),
                Line::from(format!("Fruits eaten: {eaten}")),
                Line::from(format!("Deaths: {losses}")),
                Line::default(),
                key_line("Play again", "r"),
                key_line("Quit", "q"),
            ],
        ),
    }
}

impl<R> Widget for &Round<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tiles = self.grid().tile_count();
        let display = center_rect(
            area,
            Size {
                width: tiles.saturating_mul(consts::COLUMNS_PER_TILE),
                height: tiles.saturating_add(1),
            },
        );
        let origin = Position::new(display.x, display.y.saturating_add(1));
        let mut surface = TermSurface::new(buf, origin, area);
        compose(self, &mut surface);
    }
}
