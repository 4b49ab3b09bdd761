//! Wrapping layout of variable-sized cards
//!
//! Cards are placed left to right and wrap onto a new line when the next one
//! would cross the right margin, the way words wrap in a paragraph. Only the
//! intrinsic size of each item is consulted; nothing is resized or reordered.
//!
//! All arithmetic saturates so that absurd sizes degrade into odd
//! coordinates instead of overflowing.

use sensor_deck_types::{Point, Rect, Size};

/// Anything the layout engines can place
pub trait LayoutItem {
    /// Preferred size; the size an item is laid out at
    fn size_hint(&self) -> Size;

    /// Smallest acceptable size, used for minimum-size queries
    fn minimum_size(&self) -> Size {
        self.size_hint()
    }

    /// Hidden items take no space and never cause a wrap
    fn is_visible(&self) -> bool {
        true
    }
}

impl LayoutItem for Size {
    fn size_hint(&self) -> Size {
        *self
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &T {
    fn size_hint(&self) -> Size {
        (**self).size_hint()
    }

    fn minimum_size(&self) -> Size {
        (**self).minimum_size()
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
}

/// Result of laying out a sequence of items
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutResult {
    /// One entry per input item, in input order; `None` for hidden items
    pub placements: Vec<Option<Rect>>,
    /// Height of the content, from the first line's top to the last line's bottom
    pub total_height: i32,
}

impl LayoutResult {
    /// Placements of the visible items only, with their input index
    pub fn placed(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(index, rect)| rect.map(|r| (index, r)))
    }
}

/// Flow layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLayout {
    /// Gap between neighbouring items and between lines
    pub spacing: i32,
    /// Inset applied on every side of the container
    pub margin: i32,
}

impl FlowLayout {
    pub fn new(spacing: i32, margin: i32) -> Self {
        Self { spacing, margin }
    }

    /// Position every visible item for a container `container_width` wide
    pub fn layout<T: LayoutItem>(&self, items: &[T], container_width: i32) -> LayoutResult {
        let mut placements = vec![None; items.len()];
        let total_height = self.run(items, container_width, |index, rect| {
            placements[index] = Some(rect);
        });
        LayoutResult {
            placements,
            total_height,
        }
    }

    /// Height the items need at `container_width`, without placing them
    pub fn measure_height<T: LayoutItem>(&self, items: &[T], container_width: i32) -> i32 {
        self.run(items, container_width, |_, _| {})
    }

    /// Same as [`measure_height`](Self::measure_height); the height-for-width query
    pub fn height_for_width<T: LayoutItem>(&self, items: &[T], width: i32) -> i32 {
        self.measure_height(items, width)
    }

    /// Largest minimum size among the items, plus the margin on every side
    pub fn minimum_size<T: LayoutItem>(&self, items: &[T]) -> Size {
        let largest = items
            .iter()
            .map(|item| item.minimum_size())
            .fold(Size::default(), Size::expanded_to);
        let inset = self.margin.saturating_mul(2);
        Size::new(
            largest.width.saturating_add(inset),
            largest.height.saturating_add(inset),
        )
    }

    fn run<T, F>(&self, items: &[T], container_width: i32, mut place: F) -> i32
    where
        T: LayoutItem,
        F: FnMut(usize, Rect),
    {
        let spacing = self.spacing;
        let margin = self.margin;
        let right = container_width.saturating_sub(margin);

        let mut x = margin;
        let mut y = margin;
        let mut line_height = 0;

        for (index, item) in items.iter().enumerate() {
            if !item.is_visible() {
                continue;
            }
            let size = item.size_hint();

            let mut next_x = x.saturating_add(size.width).saturating_add(spacing);
            // An item never wraps against an empty line, however wide it is
            if next_x.saturating_sub(spacing) > right && line_height > 0 {
                x = margin;
                y = y.saturating_add(line_height).saturating_add(spacing);
                next_x = x.saturating_add(size.width).saturating_add(spacing);
                line_height = 0;
            }

            place(index, Rect::new(Point::new(x, y), size));

            x = next_x;
            line_height = line_height.max(size.height);
        }

        y.saturating_add(line_height).saturating_sub(margin)
    }
}

/// Lay out `items` with the given spacing and margin
pub fn layout<T: LayoutItem>(
    items: &[T],
    container_width: i32,
    spacing: i32,
    margin: i32,
) -> LayoutResult {
    FlowLayout::new(spacing, margin).layout(items, container_width)
}

/// Height `items` need with the given spacing and margin
pub fn measure_height<T: LayoutItem>(
    items: &[T],
    container_width: i32,
    spacing: i32,
    margin: i32,
) -> i32 {
    FlowLayout::new(spacing, margin).measure_height(items, container_width)
}

/// Fixed-column grid: visible items fill cells row by row.
///
/// Every cell is as large as the largest visible item, so columns line up
/// regardless of the container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Cards per row; zero is treated as one
    pub columns: u32,
    pub spacing: i32,
    pub margin: i32,
}

impl GridLayout {
    pub fn new(columns: u32, spacing: i32, margin: i32) -> Self {
        Self {
            columns,
            spacing,
            margin,
        }
    }

    pub fn layout<T: LayoutItem>(&self, items: &[T]) -> LayoutResult {
        let columns = self.columns.max(1) as usize;
        let cell = items
            .iter()
            .filter(|item| item.is_visible())
            .map(|item| item.size_hint())
            .fold(Size::default(), Size::expanded_to);
        let step_x = cell.width.saturating_add(self.spacing);
        let step_y = cell.height.saturating_add(self.spacing);

        let mut placements = vec![None; items.len()];
        let mut slot = 0usize;
        for (index, item) in items.iter().enumerate() {
            if !item.is_visible() {
                continue;
            }
            let col = (slot % columns) as i32;
            let row = (slot / columns) as i32;
            let x = self.margin.saturating_add(col.saturating_mul(step_x));
            let y = self.margin.saturating_add(row.saturating_mul(step_y));
            placements[index] = Some(Rect::new(Point::new(x, y), item.size_hint()));
            slot += 1;
        }

        let rows = slot.div_ceil(columns) as i32;
        let total_height = if rows == 0 {
            0
        } else {
            rows.saturating_mul(step_y).saturating_sub(self.spacing)
        };
        LayoutResult {
            placements,
            total_height,
        }
    }
}
