// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Cell grid that partitions the terminal into independently-updatable
//! rectangles. The grid only stores content and computes geometry; writing
//! to the terminal is the screen's job.

use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Padding {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn horizontal(self) -> u16 {
        self.left + self.right
    }

    pub const fn vertical(self) -> u16 {
        self.top + self.bottom
    }
}

/// Per-cell layout request. A `None` height or width means "share the space
/// left over in that dimension evenly with the other unsized tracks".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSpec {
    pub height: Option<u16>,
    pub width: Option<u16>,
    pub padding: Padding,
    pub wrap: bool,
}

/// Absolute geometry of one cell after the last resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub row: usize,
    pub col: usize,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub padding: Padding,
}

impl CellGeometry {
    /// Content width inside the padding; clamps at zero when the padding is
    /// wider than the cell.
    pub const fn inner_width(&self) -> u16 {
        self.width.saturating_sub(self.padding.horizontal())
    }

    pub const fn inner_height(&self) -> u16 {
        self.height.saturating_sub(self.padding.vertical())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    EmptyLayout,
    RaggedLayout { row: usize },
    OutOfBounds { row: usize, col: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLayout => write!(f, "grid layout has no cells"),
            Self::RaggedLayout { row } => {
                write!(f, "grid row {row} has a different column count than row 0")
            }
            Self::OutOfBounds { row, col } => {
                write!(f, "grid cell ({row}, {col}) is outside the configured layout")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Debug, Clone)]
struct Cell {
    spec: CellSpec,
    geometry: CellGeometry,
    content: String,
}

#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid from a rectangular spec matrix. The row height is the
    /// first explicit height found in that row, the column width the first
    /// explicit width found in that column.
    pub fn new(specs: Vec<Vec<CellSpec>>) -> Result<Self, GridError> {
        let cols = specs.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(GridError::EmptyLayout);
        }
        for (row, row_specs) in specs.iter().enumerate() {
            if row_specs.len() != cols {
                return Err(GridError::RaggedLayout { row });
            }
        }

        let cells = specs
            .into_iter()
            .enumerate()
            .map(|(row, row_specs)| {
                row_specs
                    .into_iter()
                    .enumerate()
                    .map(|(col, spec)| Cell {
                        spec,
                        geometry: CellGeometry {
                            row,
                            col,
                            x: 0,
                            y: 0,
                            width: 0,
                            height: 0,
                            padding: spec.padding,
                        },
                        content: String::new(),
                    })
                    .collect()
            })
            .collect();
        Ok(Self { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Recomputes every cell's absolute geometry for the given terminal
    /// size. Idempotent; cell content is kept.
    pub fn resize(&mut self, width: u16, height: u16) {
        let row_heights: Vec<Option<u16>> = self
            .cells
            .iter()
            .map(|row| row.iter().find_map(|cell| cell.spec.height))
            .collect();
        let col_widths: Vec<Option<u16>> = (0..self.cols())
            .map(|col| self.cells.iter().find_map(|row| row[col].spec.width))
            .collect();
        let row_heights = track_sizes(height, &row_heights);
        let col_widths = track_sizes(width, &col_widths);

        let mut y = 0;
        for (row, row_cells) in self.cells.iter_mut().enumerate() {
            let mut x = 0;
            for (col, cell) in row_cells.iter_mut().enumerate() {
                cell.geometry = CellGeometry {
                    row,
                    col,
                    x,
                    y,
                    width: col_widths[col],
                    height: row_heights[row],
                    padding: cell.spec.padding,
                };
                x += col_widths[col];
            }
            y += row_heights[row];
        }
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<CellGeometry, GridError> {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(|cell| cell.geometry)
            .ok_or(GridError::OutOfBounds { row, col })
    }

    /// Stores new content for a cell. Returns whether the content actually
    /// changed, which is the caller's repaint signal; nothing is written to
    /// the terminal here.
    pub fn update(
        &mut self,
        row: usize,
        col: usize,
        content: impl Into<String>,
    ) -> Result<bool, GridError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(GridError::OutOfBounds { row, col })?;
        let content = content.into();
        if cell.content == content {
            return Ok(false);
        }
        cell.content = content;
        Ok(true)
    }

    /// Composes all cells into one full frame, one string line per terminal
    /// row, padding every cell line to its exact width so columns align.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for row_cells in &self.cells {
            let height = row_cells.first().map_or(0, |cell| cell.geometry.height) as usize;
            let rendered: Vec<Vec<String>> = row_cells.iter().map(Cell::visible_lines).collect();
            for line_index in 0..height {
                let mut line = String::new();
                for cell_lines in &rendered {
                    line.push_str(&cell_lines[line_index]);
                }
                lines.push(line);
            }
        }
        lines.join("\n")
    }
}

impl Cell {
    /// Exactly `height` lines, each exactly `width` columns wide.
    fn visible_lines(&self) -> Vec<String> {
        let geometry = self.geometry;
        let width = geometry.width as usize;
        let height = geometry.height as usize;
        let inner_width = geometry.inner_width() as usize;
        let inner_height = geometry.inner_height() as usize;

        let mut body: Vec<String> = Vec::new();
        if inner_width > 0 {
            for raw in self.content.lines() {
                if body.len() == inner_height {
                    break;
                }
                if self.spec.wrap {
                    if raw.is_empty() {
                        body.push(String::new());
                    } else {
                        for piece in textwrap::wrap(raw, inner_width) {
                            body.push(piece.into_owned());
                        }
                    }
                } else {
                    body.push(text::truncate_to_width(raw, inner_width));
                }
            }
            body.truncate(inner_height);
        }

        let blank = " ".repeat(width);
        let left = " ".repeat(geometry.padding.left as usize);
        let mut lines = Vec::with_capacity(height);
        for _ in 0..geometry.padding.top {
            if lines.len() == height {
                break;
            }
            lines.push(blank.clone());
        }
        for line in body {
            if lines.len() == height {
                break;
            }
            let padded = format!("{left}{}", text::pad_to_width(&line, inner_width));
            lines.push(text::pad_to_width(&padded, width));
        }
        while lines.len() < height {
            lines.push(blank.clone());
        }
        lines
    }
}

/// Splits `total` across the tracks: explicit sizes first (clamped so they
/// never exceed what is left), then the remainder divided evenly among the
/// unsized tracks, leftmost tracks absorbing any remainder.
fn track_sizes(total: u16, wanted: &[Option<u16>]) -> Vec<u16> {
    let mut sizes = vec![0_u16; wanted.len()];
    let mut remaining = total;
    let mut flexible = Vec::new();
    for (index, want) in wanted.iter().enumerate() {
        match want {
            Some(size) => {
                let take = (*size).min(remaining);
                sizes[index] = take;
                remaining -= take;
            }
            None => flexible.push(index),
        }
    }

    if !flexible.is_empty() {
        let share = remaining / flexible.len() as u16;
        let mut extra = remaining % flexible.len() as u16;
        for index in flexible {
            sizes[index] = share + u16::from(extra > 0);
            extra = extra.saturating_sub(1);
        }
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::{CellSpec, Grid, GridError, Padding, track_sizes};

    fn two_by_two() -> Grid {
        Grid::new(vec![
            vec![
                CellSpec {
                    height: Some(2),
                    padding: Padding::new(0, 1, 0, 0),
                    ..CellSpec::default()
                },
                CellSpec {
                    height: Some(2),
                    padding: Padding::new(0, 0, 0, 1),
                    ..CellSpec::default()
                },
            ],
            vec![
                CellSpec {
                    padding: Padding::new(0, 1, 0, 0),
                    ..CellSpec::default()
                },
                CellSpec {
                    padding: Padding::new(0, 0, 0, 1),
                    ..CellSpec::default()
                },
            ],
        ])
        .expect("layout is rectangular")
    }

    #[test]
    fn track_sizes_distributes_the_remainder_evenly() {
        assert_eq!(track_sizes(24, &[Some(2), None]), vec![2, 22]);
        assert_eq!(track_sizes(80, &[None, None]), vec![40, 40]);
        assert_eq!(track_sizes(81, &[None, None]), vec![41, 40]);
        assert_eq!(track_sizes(10, &[Some(4), None, None]), vec![4, 3, 3]);
    }

    #[test]
    fn track_sizes_clamps_oversized_fixed_tracks() {
        assert_eq!(track_sizes(3, &[Some(2), Some(5)]), vec![2, 1]);
        assert_eq!(track_sizes(1, &[Some(2), None]), vec![1, 0]);
    }

    #[test]
    fn eighty_by_twenty_four_produces_the_expected_bands() {
        let mut grid = two_by_two();
        grid.resize(80, 24);

        let top_left = grid.cell_at(0, 0).expect("cell exists");
        assert_eq!((top_left.x, top_left.y), (0, 0));
        assert_eq!((top_left.width, top_left.height), (40, 2));
        assert_eq!(top_left.inner_width(), 39);

        let bottom_right = grid.cell_at(1, 1).expect("cell exists");
        assert_eq!((bottom_right.x, bottom_right.y), (40, 2));
        assert_eq!((bottom_right.width, bottom_right.height), (40, 22));
        assert_eq!(bottom_right.inner_width(), 39);

        let frame = grid.render();
        let lines: Vec<&str> = frame.split('\n').collect();
        assert_eq!(lines.len(), 24);
        assert!(lines.iter().all(|line| line.chars().count() == 80));
    }

    #[test]
    fn resize_is_idempotent_and_keeps_content() {
        let mut grid = two_by_two();
        grid.resize(80, 24);
        grid.update(1, 0, "hello").expect("cell exists");

        let before = grid.render();
        grid.resize(80, 24);
        assert_eq!(grid.render(), before);
        assert!(grid.render().contains("hello"));
    }

    #[test]
    fn update_reports_whether_content_changed() {
        let mut grid = two_by_two();
        grid.resize(80, 24);

        assert!(grid.update(1, 0, "menu").expect("cell exists"));
        assert!(!grid.update(1, 0, "menu").expect("cell exists"));
        assert!(grid.update(1, 0, "menu!").expect("cell exists"));
    }

    #[test]
    fn out_of_bounds_addresses_are_typed_errors() {
        let mut grid = two_by_two();
        grid.resize(80, 24);

        assert_eq!(
            grid.cell_at(2, 0),
            Err(GridError::OutOfBounds { row: 2, col: 0 })
        );
        assert_eq!(
            grid.update(0, 5, "x"),
            Err(GridError::OutOfBounds { row: 0, col: 5 })
        );
    }

    #[test]
    fn ragged_and_empty_layouts_are_rejected() {
        assert_eq!(Grid::new(Vec::new()).err(), Some(GridError::EmptyLayout));
        let ragged = Grid::new(vec![
            vec![CellSpec::default(), CellSpec::default()],
            vec![CellSpec::default()],
        ]);
        assert_eq!(ragged.err(), Some(GridError::RaggedLayout { row: 1 }));
    }

    #[test]
    fn non_wrapped_content_truncates_to_the_inner_width() {
        let mut grid = two_by_two();
        grid.resize(20, 4);
        // 10 columns per cell, 9 inner after the 1-column gap padding.
        grid.update(1, 0, "abcdefghijKLMNO").expect("cell exists");

        let frame = grid.render();
        assert!(frame.contains("abcdefghi"));
        assert!(!frame.contains("abcdefghij"));
    }

    #[test]
    fn wrapped_content_flows_to_the_next_line() {
        let mut grid = Grid::new(vec![vec![CellSpec {
            wrap: true,
            ..CellSpec::default()
        }]])
        .expect("single cell layout");
        grid.resize(10, 4);
        grid.update(0, 0, "alpha beta gamma").expect("cell exists");

        let frame = grid.render();
        let lines: Vec<&str> = frame.split('\n').collect();
        assert_eq!(lines[0].trim_end(), "alpha beta");
        assert_eq!(lines[1].trim_end(), "gamma");
    }

    #[test]
    fn padding_wider_than_the_cell_clamps_to_zero_inner_width() {
        let mut grid = Grid::new(vec![vec![CellSpec {
            padding: Padding::new(0, 4, 0, 4),
            ..CellSpec::default()
        }]])
        .expect("single cell layout");
        grid.resize(5, 2);

        let cell = grid.cell_at(0, 0).expect("cell exists");
        assert_eq!(cell.inner_width(), 0);

        grid.update(0, 0, "invisible").expect("cell exists");
        let frame = grid.render();
        assert!(!frame.contains("invisible"));
        assert!(frame.split('\n').all(|line| line.chars().count() == 5));
    }

    #[test]
    fn degraded_terminals_still_render_a_frame() {
        let mut grid = two_by_two();
        grid.resize(4, 1);

        let frame = grid.render();
        assert_eq!(frame.split('\n').count(), 1);
        assert_eq!(frame.chars().count(), 4);
    }
}
