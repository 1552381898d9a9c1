use super::*;

use imageproc::drawing::draw_line_segment_mut;

pub const PAPER: imagelib::Rgb<u8> = imagelib::Rgb([255, 255, 255]);
pub const INK: imagelib::Rgb<u8> = imagelib::Rgb([0, 0, 0]);

/// Largest canvas we are willing to allocate, 3 bytes per pixel.
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

//
// Exhibit
//

#[derive(Clone)]
pub struct Exhibit {
    buffer: imagelib::RgbImage,
}

impl Exhibit {
    pub fn new(size: Size) -> Result<Self> {
        let bytes = (u64::from(size.w) * u64::from(size.h)).checked_mul(3);
        let fits = bytes.map_or(false, |bytes| {
            bytes <= MAX_CANVAS_BYTES && usize::try_from(bytes).is_ok()
        });
        ensure!(
            fits,
            "Exhibit of {size} exceeds the {MAX_CANVAS_BYTES} byte canvas limit"
        );
        Ok(Self {
            buffer: imagelib::RgbImage::from_pixel(size.w, size.h, PAPER),
        })
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size {
            w: self.buffer.width(),
            h: self.buffer.height(),
        }
    }

    #[inline]
    pub fn buffer(&self) -> &imagelib::RgbImage {
        &self.buffer
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        ensure!(
            !self.size().is_empty(),
            "Cannot save {} exhibit to {}, there is nothing to draw",
            self.size(),
            path.display()
        );
        self.buffer
            .save(path)
            .with_context(|| format!("Saving exhibit to {}", path.display()))?;
        Ok(())
    }

    pub fn draw_lines<S, F>(&mut self, font: &F, origin: (i32, i32), stride: u32, lines: &[S])
    where
        S: AsRef<str>,
        F: Typeface + ?Sized,
    {
        let (x, mut y) = origin;
        for line in lines {
            font.draw(&mut self.buffer, x, y, INK, line.as_ref());
            y = y.saturating_add(stride as i32);
        }
    }

    /// Strokes `thickness` nested one pixel rectangles, starting at the
    /// canvas edge and moving inwards.
    pub fn draw_border(&mut self, thickness: u32) {
        let Size { w, h } = self.size();
        for offset in 0..thickness {
            if offset.saturating_mul(2) >= w || offset.saturating_mul(2) >= h {
                break;
            }
            let left = offset as f32;
            let top = offset as f32;
            let right = (w - 1 - offset) as f32;
            let bottom = (h - 1 - offset) as f32;

            // Sides are separate strokes.
            draw_line_segment_mut(&mut self.buffer, (left, top), (right, top), INK);
            draw_line_segment_mut(&mut self.buffer, (left, bottom), (right, bottom), INK);
            draw_line_segment_mut(&mut self.buffer, (left, top), (left, bottom), INK);
            draw_line_segment_mut(&mut self.buffer, (right, top), (right, bottom), INK);
        }
    }
}

//
// Composer
//

pub fn render<S: AsRef<str>>(lines: &[S], settings: &RenderSettings) -> Result<Exhibit> {
    let font = font::load(settings.fontfile.as_deref(), settings.fontsize)?;
    compose(lines, settings, &font)
}

pub fn compose<S, F>(lines: &[S], settings: &RenderSettings, font: &F) -> Result<Exhibit>
where
    S: AsRef<str>,
    F: Typeface + ?Sized,
{
    let metrics = layout::compute_line_metrics(lines, font);
    let size = layout::plan(metrics.stacked, settings)?;
    debug!(
        "Composing {} line(s) into {size}, line {}",
        lines.len(),
        metrics.line
    );

    let mut exhibit = Exhibit::new(size)?;
    let inset = settings.padding.saturating_add(settings.border);
    let inset = i32::try_from(inset).unwrap_or(i32::MAX);
    exhibit.draw_lines(font, (inset, inset), metrics.line.h, lines);
    exhibit.draw_border(settings.border);
    Ok(exhibit)
}

//
// Tests
//
