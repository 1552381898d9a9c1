use super::*;

//
// Size
//

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const ZERO: Self = Self { w: 0, h: 0 };

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

//
// Geometry
//

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Exhibit around {content} with padding {padding} and border {border} overflows u32")]
pub struct OverflowError {
    pub content: Size,
    pub padding: u32,
    pub border: u32,
}

/// `None` when either axis no longer fits a `u32`.
#[must_use]
pub fn add_margin_all_sides(size: Size, margin: u32) -> Option<Size> {
    let margin = margin.checked_mul(2)?;
    Some(Size {
        w: size.w.checked_add(margin)?,
        h: size.h.checked_add(margin)?,
    })
}

/// Outer exhibit size for a block of text: padding goes around the text,
/// border goes around the padding.
pub fn plan(stacked: Size, settings: &RenderSettings) -> Result<Size, OverflowError> {
    add_margin_all_sides(stacked, settings.padding)
        .and_then(|padded| add_margin_all_sides(padded, settings.border))
        .ok_or(OverflowError {
            content: stacked,
            padding: settings.padding,
            border: settings.border,
        })
}

//
// Text metrics
//

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LineMetrics {
    /// Measured size of the longest line, its height is the line stride.
    pub line: Size,
    /// All lines stacked top to bottom.
    pub stacked: Size,
}

/// Index of the line with the most characters, first one wins on ties.
pub fn find_index_of_longest_line<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    let mut longest: Option<(usize, usize)> = None;
    for (index, line) in lines.iter().enumerate() {
        let count = line.as_ref().chars().count();
        match longest {
            Some((_, max)) if count <= max => {}
            _ => longest = Some((index, count)),
        }
    }
    longest.map(|(index, _)| index)
}

// Character count stands in for rendered width, and the longest line's
// height is used for every line. Line terminators are not part of a line
// and are not counted.
pub fn compute_line_metrics<S, F>(lines: &[S], font: &F) -> LineMetrics
where
    S: AsRef<str>,
    F: Typeface + ?Sized,
{
    let Some(index) = find_index_of_longest_line(lines) else {
        return LineMetrics {
            line: Size::ZERO,
            stacked: Size::ZERO,
        };
    };
    let line = font.measure(lines[index].as_ref());
    let stacked = Size {
        w: line.w,
        h: line
            .h
            .saturating_mul(u32::try_from(lines.len()).unwrap_or(u32::MAX)),
    };
    trace!("Longest line {index} measures {line}, stacked {stacked}");
    LineMetrics { line, stacked }
}

//
// Tests
//
