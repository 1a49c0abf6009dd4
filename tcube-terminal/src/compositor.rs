/// Half-block compositor: two image rows per terminal row
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;
use tcube_core::{Color, ColorModel, Image};

/// Foreground paints the top half of the cell, background the bottom half
const UPPER_HALF_BLOCK: char = '▀';

/// Writes frames as colored upper-half-block glyphs
#[derive(Debug, Clone, Copy)]
pub struct HalfBlockCompositor {
    color_model: ColorModel,
}

impl HalfBlockCompositor {
    pub fn new(color_model: ColorModel) -> Self {
        Self { color_model }
    }

    /// Clear the screen, home the cursor and draw `image`
    pub fn draw<W: Write>(&self, image: &Image, writer: &mut W) -> std::io::Result<()> {
        queue!(writer, Clear(ClearType::Purge), MoveTo(0, 0))?;
        self.draw_rows(image, writer)
    }

    /// Draw `image` at the cursor.
    ///
    /// For an odd height the last terminal row has no bottom pixel and its
    /// background is black.
    pub fn draw_rows<W: Write>(&self, image: &Image, writer: &mut W) -> std::io::Result<()> {
        for y in (0..image.height()).step_by(2) {
            for x in 0..image.width() {
                let top = image.pixel(x, y);
                let bottom = if y + 1 < image.height() {
                    image.pixel(x, y + 1)
                } else {
                    Color::zeros()
                };

                queue!(
                    writer,
                    SetForegroundColor(self.encode(&top)),
                    SetBackgroundColor(self.encode(&bottom)),
                    Print(UPPER_HALF_BLOCK)
                )?;
            }
            // stop the background bleeding into the rest of the line
            queue!(writer, ResetColor, Print("\r\n"))?;
        }
        Ok(())
    }

    pub fn encode(&self, color: &Color) -> TermColor {
        match self.color_model {
            ColorModel::TrueColor => {
                let [r, g, b] = truecolor(color);
                TermColor::Rgb { r, g, b }
            }
            ColorModel::Quantized => TermColor::AnsiValue(ansi_index(color)),
        }
    }
}

/// Channels scaled to 0-255, truncated; out-of-range values saturate
pub fn truecolor(color: &Color) -> [u8; 3] {
    [color.x, color.y, color.z].map(|c| (c * 255.0) as u8)
}

/// Index into the 6x6x6 color cube that follows the 16 system colors
pub fn ansi_index(color: &Color) -> u8 {
    let level = |c: f32| ((c.clamp(0.0, 1.0) * 6.0).floor() as u8).min(5);
    16 + 36 * level(color.x) + 6 * level(color.y) + level(color.z)
}
