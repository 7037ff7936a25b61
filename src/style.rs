//! Style configuration for rendered QR codes: pure data, no behavior beyond
//! a couple of conversions into the codec's and the raster's color types.

// Rgb
//------------------------------------------------------------------------------

/// A solid color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub(crate) fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.0, self.1, self.2])
    }
}

// EcLevel
//------------------------------------------------------------------------------

/// Error correction level of the rendered symbol.
///
/// Only the two levels the booth actually uses are exposed: `Q` for plain
/// payloads, `H` whenever part of the symbol is expected to be occluded or
/// must survive noise (embedded logo, image-as-payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcLevel {
    /// ~25% recoverable damage.
    Q,
    /// ~30% recoverable damage.
    H,
}

impl EcLevel {
    pub(crate) fn to_codec(self) -> qrcode::EcLevel {
        match self {
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

// ModuleShape
//------------------------------------------------------------------------------

/// How each dark module is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleShape {
    #[default]
    Square,
    /// Squares whose exposed corners are rounded off; isolated modules
    /// become discs. Runs of modules stay solid, so the finder and timing
    /// patterns remain detectable.
    Rounded,
}

// StyleConfig
//------------------------------------------------------------------------------

/// Everything the renderer needs to turn a payload into a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleConfig {
    pub ec_level: EcLevel,
    /// Edge length of one module, in pixels.
    pub module_size: u32,
    /// Quiet-zone width on each side, in modules.
    pub border: u32,
    pub shape: ModuleShape,
    /// Color of dark modules.
    pub fill: Rgb,
    /// Color of everything else, quiet zone included.
    pub background: Rgb,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::Q,
            module_size: 12,
            border: 4,
            shape: ModuleShape::Square,
            fill: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_plain_black_on_white() {
        let style = StyleConfig::default();
        assert_eq!(style.ec_level, EcLevel::Q);
        assert_eq!(style.module_size, 12);
        assert_eq!(style.border, 4);
        assert_eq!(style.shape, ModuleShape::Square);
        assert_eq!(style.fill, Rgb::BLACK);
        assert_eq!(style.background, Rgb::WHITE);
    }

    #[test]
    fn ec_level_maps_to_codec_levels() {
        assert_eq!(EcLevel::Q.to_codec(), qrcode::EcLevel::Q);
        assert_eq!(EcLevel::H.to_codec(), qrcode::EcLevel::H);
    }
}
