use super::*;

use imageproc::pixelops::weighted_sum;
use noto_sans_mono_bitmap::{get_raster, get_raster_width, FontWeight, RasterHeight};

//
// Typeface
//

/// Anything that can measure and rasterize a single line of text.
pub trait Typeface {
    /// Pixel size of the line box for `text`.
    fn measure(&self, text: &str) -> Size;

    /// Draws `text` with the top-left of its line box at `(x, y)`.
    fn draw(
        &self,
        canvas: &mut imagelib::RgbImage,
        x: i32,
        y: i32,
        color: imagelib::Rgb<u8>,
        text: &str,
    );
}

//
// Errors
//

#[derive(thiserror::Error, Debug)]
pub enum FontLoadError {
    #[error("Failed to read font file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid TrueType/OpenType font", path.display())]
    Parse { path: PathBuf },
}

//
// Loading
//

pub enum Font {
    TrueType(TrueTypeFont),
    Bitmap(BitmapFont),
}

pub fn load(fontfile: Option<&Path>, fontsize: u32) -> Result<Font, FontLoadError> {
    let Some(path) = fontfile else {
        debug!("Using built-in font, ignoring size {fontsize}");
        return Ok(Font::Bitmap(BitmapFont::default()));
    };
    let data = std::fs::read(path).map_err(|source| FontLoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let font = TrueTypeFont::from_vec(data, fontsize).ok_or_else(|| FontLoadError::Parse {
        path: path.to_owned(),
    })?;
    debug!("Loaded {} at size {fontsize}", path.display());
    Ok(Font::TrueType(font))
}

impl Typeface for Font {
    fn measure(&self, text: &str) -> Size {
        match self {
            Self::TrueType(font) => font.measure(text),
            Self::Bitmap(font) => font.measure(text),
        }
    }

    fn draw(
        &self,
        canvas: &mut imagelib::RgbImage,
        x: i32,
        y: i32,
        color: imagelib::Rgb<u8>,
        text: &str,
    ) {
        match self {
            Self::TrueType(font) => font.draw(canvas, x, y, color, text),
            Self::Bitmap(font) => font.draw(canvas, x, y, color, text),
        }
    }
}

//
// TrueType
//

pub struct TrueTypeFont {
    font: rusttype::Font<'static>,
    scale: rusttype::Scale,
}

impl TrueTypeFont {
    pub fn from_vec(data: Vec<u8>, fontsize: u32) -> Option<Self> {
        let font = rusttype::Font::try_from_vec(data)?;
        let scale = rusttype::Scale::uniform(fontsize as f32);
        Some(Self { font, scale })
    }

    pub fn line_height(&self) -> u32 {
        let v_metrics = self.font.v_metrics(self.scale);
        (v_metrics.ascent - v_metrics.descent).ceil() as u32
    }
}

impl Typeface for TrueTypeFont {
    fn measure(&self, text: &str) -> Size {
        let width = self
            .font
            .layout(text, self.scale, rusttype::point(0.0, 0.0))
            .last()
            .map_or(0.0, |glyph| {
                glyph.position().x + glyph.unpositioned().h_metrics().advance_width
            });
        Size {
            w: width.ceil() as u32,
            h: self.line_height(),
        }
    }

    fn draw(
        &self,
        canvas: &mut imagelib::RgbImage,
        x: i32,
        y: i32,
        color: imagelib::Rgb<u8>,
        text: &str,
    ) {
        use imageproc::drawing::draw_text_mut;
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

//
// Bitmap
//

/// Built-in monospace font, has a single fixed size.
pub struct BitmapFont {
    weight: FontWeight,
    height: RasterHeight,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self {
            weight: FontWeight::Regular,
            height: RasterHeight::Size16,
        }
    }
}

impl BitmapFont {
    const REPLACEMENT: char = '?';

    pub fn cell_width(&self) -> u32 {
        get_raster_width(self.weight, self.height) as u32
    }

    pub fn cell_height(&self) -> u32 {
        self.height.val() as u32
    }
}

impl Typeface for BitmapFont {
    fn measure(&self, text: &str) -> Size {
        let count = text.chars().count() as u32;
        Size {
            w: count.saturating_mul(self.cell_width()),
            h: self.cell_height(),
        }
    }

    fn draw(
        &self,
        canvas: &mut imagelib::RgbImage,
        x: i32,
        y: i32,
        color: imagelib::Rgb<u8>,
        text: &str,
    ) {
        let (canvas_w, canvas_h) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let cell_width = i64::from(self.cell_width());
        for (index, c) in text.chars().enumerate() {
            let Some(glyph) = get_raster(c, self.weight, self.height)
                .or_else(|| get_raster(Self::REPLACEMENT, self.weight, self.height))
            else {
                continue;
            };
            let origin_x = i64::from(x) + index as i64 * cell_width;
            for (row, intensities) in glyph.raster().iter().enumerate() {
                let py = i64::from(y) + row as i64;
                if py < 0 || py >= canvas_h {
                    continue;
                }
                for (column, &intensity) in intensities.iter().enumerate() {
                    let px = origin_x + column as i64;
                    if intensity == 0 || px < 0 || px >= canvas_w {
                        continue;
                    }
                    let coverage = f32::from(intensity) / 255.0;
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    *pixel = weighted_sum(*pixel, color, 1.0 - coverage, coverage);
                }
            }
        }
    }
}

//
// Tests
//

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// DejaVu Sans Mono, see `assets/fonts/LICENSE-DejaVu.txt`.
    pub const DEJAVU_SANS_MONO: &[u8] = include_bytes!("assets/fonts/DejaVuSansMono.ttf");

    pub fn dejavu_sans_mono(fontsize: u32) -> TrueTypeFont {
        TrueTypeFont::from_vec(DEJAVU_SANS_MONO.to_vec(), fontsize).unwrap()
    }

    /// Fixed-metric font that fills every character cell solid.
    pub struct BlockFont {
        advance: u32,
        height: u32,
    }

    impl BlockFont {
        pub fn new(advance: u32, height: u32) -> Self {
            Self { advance, height }
        }
    }

    impl Typeface for BlockFont {
        fn measure(&self, text: &str) -> Size {
            Size {
                w: text.chars().count() as u32 * self.advance,
                h: self.height,
            }
        }

        fn draw(
            &self,
            canvas: &mut imagelib::RgbImage,
            x: i32,
            y: i32,
            color: imagelib::Rgb<u8>,
            text: &str,
        ) {
            let size = self.measure(text);
            for py in y.max(0)..y + size.h as i32 {
                for px in x.max(0)..x + size.w as i32 {
                    let (px, py) = (px as u32, py as u32);
                    if px < canvas.width() && py < canvas.height() {
                        canvas.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}
