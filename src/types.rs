//! The data structures used in an Adobe SWF file.
//!
//! These structures are documented in the Adobe SWF File Format
//! Specification version 19:
//! <https://www.adobe.com/content/dam/acom/en/devnet/pdf/swf-file-format-spec.pdf>

use smallvec::SmallVec;

mod matrix;

pub use matrix::Matrix;

/// A character/sprite/font identifier, unique within the SWF that declares
/// it.
pub type CharacterId = u16;

/// A display-list depth, used by `PlaceObject*`/`RemoveObject*`.
pub type Depth = u16;

/// A complete, parsed SWF file: header plus the top-level tag stream.
#[derive(Debug, PartialEq)]
pub struct Swf {
    pub header: Header,
    pub tags: Vec<Tag>,
}

/// Returned by [`crate::read::decompress_swf`]: owns the decompressed tag
/// stream, which [`crate::read::parse_swf`] then parses into a [`Swf`]
/// without needing the caller to keep anything else alive.
pub struct SwfBuf {
    /// The parsed SWF header.
    pub header: Header,
    /// The decompressed tag stream, starting right after `frame_count`.
    pub data: Vec<u8>,
}

/// The header of an SWF file: everything before the tag stream.
#[derive(Debug, PartialEq, Clone)]
pub struct Header {
    pub compression: Compression,
    pub version: u8,
    /// The uncompressed size of the whole file, signature through the last
    /// tag, as declared on the wire.
    pub uncompressed_length: u32,
    pub stage_size: Rectangle,
    /// 8.8 fixed-point frames-per-second.
    pub frame_rate: f32,
    pub num_frames: u16,
}

/// The compression format used for the body of an SWF file, carried by the
/// 3-byte signature (`FWS`/`CWS`/`ZWS`).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Compression {
    /// `FWS` — body follows the header uncompressed.
    None,
    /// `CWS` — body is zlib-deflated.
    Zlib,
    /// `ZWS` — body is LZMA-compressed.
    Lzma,
}

/// A type-safe wrapper documenting where "twips" (1/20th of a pixel) are
/// used in the SWF format.
///
/// Use [`Twips::from_pixels`] and [`Twips::to_pixels`] to convert to and
/// from pixel values.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, PartialOrd, Ord, Hash)]
pub struct Twips(i32);

impl Twips {
    /// There are 20 twips in a pixel.
    pub const TWIPS_PER_PIXEL: f64 = 20.0;

    /// Creates a new `Twips` from a twips value (not a pixel value — use
    /// [`Twips::from_pixels`] for that).
    pub const fn new(twips: i32) -> Self {
        Self(twips)
    }

    /// A `Twips` value of `0`.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the number of twips.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Converts a pixel value into twips. Lossy: precision finer than a
    /// twip (1/20 pixel) is truncated.
    pub fn from_pixels(pixels: f64) -> Self {
        Self((pixels * Self::TWIPS_PER_PIXEL) as i32)
    }

    /// Converts this twips value into pixel units. Lossless.
    pub fn to_pixels(self) -> f64 {
        f64::from(self.0) / Self::TWIPS_PER_PIXEL
    }

    /// The minimal number of bits needed to represent `self` in a signed,
    /// two's-complement bit field — the quantity SWF calls `bits_per_field`
    /// when it appears inside a [`Rectangle`] or a [`Matrix`] component
    /// group. Always at least 1, but can exceed the format's 31-bit ceiling
    /// for extreme values (spec.md §3: `bits_per_field ∈ [1,31]`); callers
    /// that write this into the wire's 5-bit width field validate the
    /// result before using it rather than truncating silently.
    pub(crate) fn minimal_bits(self) -> u8 {
        minimal_bits_for_signed(self.0)
    }
}

/// The minimal number of bits needed to represent `value` in a signed,
/// two's-complement bit field. Always at least 1; not capped to the
/// format's 31-bit field-width limit, so callers encoding this into a 5-bit
/// wire field must validate it themselves (see `write::check_bit_width`).
pub(crate) fn minimal_bits_for_signed(value: i32) -> u8 {
    let magnitude_bits = if value >= 0 {
        32 - (value as u32).leading_zeros()
    } else {
        32 - (!(value as u32)).leading_zeros()
    };
    (magnitude_bits + 1).max(1) as u8
}

impl std::ops::Add for Twips {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::Sub for Twips {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::fmt::Display for Twips {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_pixels())
    }
}

/// A rectangular region defined by minimum/maximum x/y positions, measured
/// in [`Twips`].
///
/// Stores the `bits_per_field` width the value was parsed with (or the
/// minimal width needed, for one built in memory) so that
/// [`crate::write::write_rectangle`] can reproduce the exact original byte
/// layout, including any non-canonical padding — equality, however, only
/// compares the logical corners, since two rectangles with the same
/// corners are the same rectangle regardless of how compactly they happen
/// to be encoded.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub x_min: Twips,
    pub x_max: Twips,
    pub y_min: Twips,
    pub y_max: Twips,
    pub(crate) num_bits: u8,
}

impl Rectangle {
    /// Builds a rectangle, computing the minimal `bits_per_field` width
    /// needed to encode its corners.
    pub fn new(x_min: Twips, x_max: Twips, y_min: Twips, y_max: Twips) -> Self {
        let num_bits = [x_min, x_max, y_min, y_max]
            .iter()
            .map(|t| t.minimal_bits())
            .max()
            .unwrap_or(1);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            num_bits,
        }
    }

    /// The `bits_per_field` width this rectangle will serialize with.
    pub fn num_bits(&self) -> u8 {
        self.num_bits
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new(Twips::zero(), Twips::zero(), Twips::zero(), Twips::zero())
    }
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        self.x_min == other.x_min
            && self.x_max == other.x_max
            && self.y_min == other.y_min
            && self.y_max == other.y_max
    }
}

/// An RGB or RGBA color.
///
/// Whether alpha was present on the wire is tracked internally so that
/// [`crate::write::write_color`] emits the same 3- or 4-byte form it was
/// parsed from; construct with [`Color::from_rgb`]/[`Color::from_rgba`] to
/// pick the form explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub(crate) has_alpha: bool,
}

impl Color {
    /// An opaque RGB color (alpha defaults to fully-opaque, but is not
    /// written to the wire).
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: 0xFF,
            has_alpha: false,
        }
    }

    /// An RGBA color; alpha is written to the wire.
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            has_alpha: true,
        }
    }

    /// Whether this color carries an explicit alpha byte on the wire.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }
}

/// The flag word carried by the `FileAttributes` tag.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FileAttributes {
    pub use_direct_blit: bool,
    pub use_gpu: bool,
    pub has_metadata: bool,
    pub is_action_script_3: bool,
    pub use_network_sandbox: bool,
}

/// A single opaque SWF tag, preserved verbatim for byte-exact round trips.
///
/// This covers every tag this crate does not decode the fields of — the
/// vast majority of the ~70 recognized codes.
#[derive(Debug, PartialEq, Clone)]
pub struct OpaqueTag {
    pub code: u16,
    /// Whether the original encoding used the extended (32-bit) length
    /// form even though the payload could have fit in the short form —
    /// preserved so re-serializing reproduces the same framing.
    pub was_extended: bool,
    pub data: Vec<u8>,
}

/// A tag in the top-level or a nested sprite's tag stream.
///
/// Most variants are `Unknown`/opaque (see [`OpaqueTag`]); a handful carry
/// interpreted fields. Every variant — typed or opaque — carries its own
/// `was_extended` flag: whether the original encoding used the extended
/// (32-bit) length form even though the payload could have fit in the short
/// form, preserved so re-serializing reproduces the same framing
/// regardless of which variant the tag is.
#[derive(Debug, PartialEq)]
pub enum Tag {
    /// Tag code 0. Terminates a tag stream (outer file or nested sprite).
    End { was_extended: bool },
    /// Tag code 1. No payload.
    ShowFrame { was_extended: bool },
    /// Tag code 9. Sets the movie's background color.
    SetBackgroundColor { color: Color, was_extended: bool },
    /// Tag code 69. Player capability flags.
    FileAttributes {
        attributes: FileAttributes,
        was_extended: bool,
    },
    /// Tag code 39. A nested movie clip with its own tag stream.
    DefineSprite { sprite: Sprite, was_extended: bool },
    /// Tag codes 2/22/32/83. A vector shape definition.
    DefineShape { shape: Shape, was_extended: bool },
    /// Any other recognized or unrecognized tag code: preserved verbatim.
    Unknown(OpaqueTag),
}

impl Tag {
    /// The numeric tag code this tag will serialize with.
    pub fn code(&self) -> u16 {
        match self {
            Tag::End { .. } => 0,
            Tag::ShowFrame { .. } => 1,
            Tag::SetBackgroundColor { .. } => 9,
            Tag::FileAttributes { .. } => 69,
            Tag::DefineSprite { .. } => 39,
            Tag::DefineShape { shape, .. } => match shape.version {
                1 => 2,
                2 => 22,
                3 => 32,
                _ => 83,
            },
            Tag::Unknown(tag) => tag.code,
        }
    }

    /// Whether this tag was (or, for a freshly built tag, should be) framed
    /// with the extended 32-bit length form rather than the short 6-bit one.
    pub fn was_extended(&self) -> bool {
        match self {
            Tag::End { was_extended }
            | Tag::ShowFrame { was_extended }
            | Tag::SetBackgroundColor { was_extended, .. }
            | Tag::FileAttributes { was_extended, .. }
            | Tag::DefineSprite { was_extended, .. }
            | Tag::DefineShape { was_extended, .. } => *was_extended,
            Tag::Unknown(tag) => tag.was_extended,
        }
    }
}

/// A nested movie clip: its own character id, frame count, and an
/// independent tag stream terminated by an inner `End`.
#[derive(Debug, PartialEq)]
pub struct Sprite {
    pub id: CharacterId,
    pub num_frames: u16,
    pub tags: Vec<Tag>,
}

/// Per-shape-record bit widths, threaded explicitly through the shape
/// record decoder/encoder rather than kept as hidden mutable reader state
/// (fill/line bit widths can change mid-shape via a style-change record).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct ShapeContext {
    pub num_fill_bits: u8,
    pub num_line_bits: u8,
}

/// A `DefineShape`/`DefineShape2`/`DefineShape3`/`DefineShape4` body.
#[derive(Debug, PartialEq, Clone)]
pub struct Shape {
    /// 1, 2, 3, or 4 — which `DefineShape*` tag this came from.
    pub version: u8,
    pub id: CharacterId,
    pub shape_bounds: Rectangle,
    /// Only meaningful for version 4; equal to `shape_bounds` otherwise.
    pub edge_bounds: Rectangle,
    pub has_fill_winding_rule: bool,
    pub has_non_scaling_strokes: bool,
    pub has_scaling_strokes: bool,
    pub styles: ShapeStyles,
    pub shape: Vec<ShapeRecord>,
}

/// The fill- and line-style tables in force at the start of a shape (or
/// installed mid-shape by a [`StyleChangeData::new_styles`]).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ShapeStyles {
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
}

/// One record in a shape's edge bit-stream. The terminating all-zero
/// record is consumed by the decoder but never appears here.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeRecord {
    StyleChange(Box<StyleChangeData>),
    StraightEdge {
        delta_x: Twips,
        delta_y: Twips,
    },
    CurvedEdge {
        control_delta_x: Twips,
        control_delta_y: Twips,
        anchor_delta_x: Twips,
        anchor_delta_y: Twips,
    },
}

/// A style-change shape record: an optional move, optional fill/line style
/// selection, and an optional new style table.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StyleChangeData {
    pub move_to: Option<(Twips, Twips)>,
    pub fill_style_0: Option<u32>,
    pub fill_style_1: Option<u32>,
    pub line_style: Option<u32>,
    pub new_styles: Option<ShapeStyles>,
}

/// A fill style entry in a [`ShapeStyles`] table.
#[derive(Debug, PartialEq, Clone)]
pub enum FillStyle {
    Color(Color),
    LinearGradient(Gradient),
    RadialGradient(Gradient),
    FocalGradient {
        gradient: Gradient,
        focal_point: f32,
    },
    Bitmap {
        id: CharacterId,
        matrix: Matrix,
        is_smoothed: bool,
        is_repeating: bool,
    },
}

/// A gradient fill: a transform, a spread/interpolation mode, and its color
/// stops.
#[derive(Debug, PartialEq, Clone)]
pub struct Gradient {
    pub matrix: Matrix,
    pub spread: GradientSpread,
    pub interpolation: GradientInterpolation,
    pub records: SmallVec<[GradientRecord; 8]>,
}

/// How a gradient behaves outside its `[0, 1]` ratio range.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GradientSpread {
    Pad,
    Reflect,
    Repeat,
}

/// The color space gradient stops are interpolated in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GradientInterpolation {
    Rgb,
    LinearRgb,
}

/// One color stop in a [`Gradient`].
#[derive(Debug, PartialEq, Clone)]
pub struct GradientRecord {
    pub ratio: u8,
    pub color: Color,
}

/// A line (stroke) style entry in a [`ShapeStyles`] table.
#[derive(Debug, PartialEq, Clone)]
pub struct LineStyle {
    pub width: Twips,
    pub color: Color,
    pub start_cap: LineCapStyle,
    pub end_cap: LineCapStyle,
    pub join_style: LineJoinStyle,
    pub fill_style: Option<FillStyle>,
    pub allow_scale_x: bool,
    pub allow_scale_y: bool,
    pub is_pixel_hinted: bool,
    pub allow_close: bool,
}

impl LineStyle {
    /// A SWF 1-3 (`DefineShape`/`2`/`3`) line style: solid color, round
    /// joins/caps, no extended flags.
    pub const fn new_v1(width: Twips, color: Color) -> LineStyle {
        LineStyle {
            width,
            color,
            start_cap: LineCapStyle::Round,
            end_cap: LineCapStyle::Round,
            join_style: LineJoinStyle::Round,
            fill_style: None,
            allow_scale_x: false,
            allow_scale_y: false,
            is_pixel_hinted: false,
            allow_close: true,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LineCapStyle {
    Round,
    None,
    Square,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LineJoinStyle {
    Round,
    Bevel,
    Miter(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twips_pixel_round_trip() {
        assert_eq!(Twips::from_pixels(40.0).get(), 800);
        assert_eq!(Twips::new(800).to_pixels(), 40.0);
    }

    #[test]
    fn rectangle_picks_minimal_bit_width() {
        // 0 / 8000 / 0 / 10000 requires bits_per_field = 15.
        let rect = Rectangle::new(
            Twips::new(0),
            Twips::new(8000),
            Twips::new(0),
            Twips::new(10000),
        );
        assert_eq!(rect.num_bits(), 15);
    }

    #[test]
    fn rectangle_equality_ignores_encoding_width() {
        let a = Rectangle::new(Twips::new(0), Twips::new(1), Twips::new(0), Twips::new(1));
        let mut b = a.clone();
        b.num_bits = 31;
        assert_eq!(a, b);
    }

    #[test]
    fn color_from_rgb_defaults_to_opaque() {
        let color = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(color.a, 0xFF);
        assert!(!color.has_alpha());
    }
}
