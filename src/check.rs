use super::*;

/// Size the exhibit would have, without allocating any pixels.
pub fn planned_size<S: AsRef<str>>(lines: &[S], settings: &RenderSettings) -> Result<Size> {
    let font = font::load(settings.fontfile.as_deref(), settings.fontsize)?;
    Ok(planned_size_with(lines, settings, &font)?)
}

pub fn planned_size_with<S, F>(
    lines: &[S],
    settings: &RenderSettings,
    font: &F,
) -> Result<Size, layout::OverflowError>
where
    S: AsRef<str>,
    F: Typeface + ?Sized,
{
    let metrics = layout::compute_line_metrics(lines, font);
    layout::plan(metrics.stacked, settings)
}

/// Either axis going over its maximum is enough.
pub fn exceeds(size: Size, maximum: Size) -> bool {
    size.w > maximum.w || size.h > maximum.h
}

pub fn exceeds_maximum<S: AsRef<str>>(
    lines: &[S],
    settings: &RenderSettings,
    maximum: Size,
) -> Result<bool> {
    let size = match planned_size(lines, settings) {
        Ok(size) => size,
        // Larger than any representable maximum.
        Err(err) if err.is::<layout::OverflowError>() => {
            info!("{err}, exceeds maximum {maximum}");
            return Ok(true);
        }
        Err(err) => return Err(err),
    };
    let exceeded = exceeds(size, maximum);
    if exceeded {
        info!("Size {size} exceeds maximum {maximum}");
    } else {
        info!("Size {size} fits within maximum {maximum}");
    }
    Ok(exceeded)
}
