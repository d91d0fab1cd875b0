//! Serializes [`crate::Swf`] values back into SWF byte streams.
//!
//! Mirrors [`crate::read`] field for field: the same primitives, in the
//! same order, written rather than read. Typed tags serialize with the
//! minimal framing for their length; opaque tags reproduce the exact
//! framing and bytes they were parsed with.

use crate::error::{Error, Result};
use crate::extensions::WriteSwfExt;
use crate::tag_code::TagCode;
use crate::{
    Color, FillStyle, Gradient, GradientInterpolation, GradientSpread, LineCapStyle,
    LineJoinStyle, LineStyle, Matrix, Rectangle, Shape, ShapeContext, ShapeRecord, ShapeStyles,
    Swf, Tag, Twips,
};
use bitstream_io::{BigEndian, BitWrite, BitWriter};
use std::io::Write;

/// Serializes a complete [`Swf`] to a freshly allocated byte buffer.
pub fn serialize(swf: &Swf) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_swf(swf, &mut output)?;
    Ok(output)
}

/// Shorthand for [`serialize`]: opaque tag payloads are always preserved
/// verbatim (see [`crate::OpaqueTag`]), so there is no separate
/// "preserve raw bytes" mode to opt into here.
pub fn round_trip_bytes(swf: &Swf) -> Result<Vec<u8>> {
    serialize(swf)
}

fn write_swf<W: Write>(swf: &Swf, output: &mut W) -> Result<()> {
    let mut body = Vec::new();
    write_rectangle(&mut body, &swf.header.stage_size)?;
    write_fixed8_bytes(&mut body, swf.header.frame_rate)?;
    body.write_u16(swf.header.num_frames)?;
    for tag in &swf.tags {
        write_tag(&mut body, tag)?;
    }

    let uncompressed_length = 8 + body.len() as u32;
    let signature: [u8; 3] = match swf.header.compression {
        crate::Compression::None => *b"FWS",
        crate::Compression::Zlib => *b"CWS",
        crate::Compression::Lzma => *b"ZWS",
    };
    output.write_all(&signature).map_err(Error::Io)?;
    output.write_u8(swf.header.version)?;
    output.write_u32(uncompressed_length)?;

    match swf.header.compression {
        crate::Compression::None => output.write_all(&body).map_err(Error::Io)?,
        crate::Compression::Zlib => {
            #[cfg(feature = "flate2")]
            {
                let mut encoder =
                    flate2::write::ZlibEncoder::new(output, flate2::Compression::default());
                encoder.write_all(&body).map_err(Error::Io)?;
                encoder.finish().map_err(Error::Io)?;
            }
            #[cfg(not(feature = "flate2"))]
            {
                return Err(Error::Unsupported(
                    "zlib-compressed (CWS) body: `flate2` feature disabled",
                ));
            }
        }
        crate::Compression::Lzma => {
            return Err(Error::Unsupported(
                "LZMA-compressed (ZWS) serialization is not implemented; `lzma-rs` only decodes",
            ));
        }
    }
    Ok(())
}

fn write_fixed8_bytes<W: Write>(output: &mut W, value: f32) -> Result<()> {
    output.write_u16((value * 256.0).round() as u16)
}

/// The `bits_per_field`/matrix-component-width fields are themselves 5 bits
/// wide on the wire (spec.md §3: `bits_per_field ∈ [1,31]`), so they can
/// only hold 0-31. Reject a width the minimal-bits computation found to
/// need more, rather than silently dropping the high bit when it's written.
fn check_bit_width(n: u8) -> Result<()> {
    if n > 31 {
        return Err(Error::InvariantViolation(
            "value requires more than 31 bits, exceeding the format's 5-bit field-width limit",
        ));
    }
    Ok(())
}

/// Writes a bit-packed [`Rectangle`] using its stored `bits_per_field`,
/// preserving non-canonical widths exactly as parsed.
pub(crate) fn write_rectangle<W: Write>(output: &mut W, rect: &Rectangle) -> Result<()> {
    check_bit_width(rect.num_bits())?;
    let mut bits = BitWriter::<&mut W, BigEndian>::new(output);
    let n = u32::from(rect.num_bits());
    bits.write(5, n).map_err(Error::Io)?;
    bits.write_signed(n, rect.x_min.get()).map_err(Error::Io)?;
    bits.write_signed(n, rect.x_max.get()).map_err(Error::Io)?;
    bits.write_signed(n, rect.y_min.get()).map_err(Error::Io)?;
    bits.write_signed(n, rect.y_max.get()).map_err(Error::Io)?;
    bits.byte_align().map_err(Error::Io)?;
    Ok(())
}

fn write_tag<W: Write>(output: &mut W, tag: &Tag) -> Result<()> {
    let code = tag.code();
    let mut payload = Vec::new();
    match tag {
        Tag::End { .. } | Tag::ShowFrame { .. } => {}
        Tag::SetBackgroundColor { color, .. } => {
            payload.push(color.r);
            payload.push(color.g);
            payload.push(color.b);
        }
        Tag::FileAttributes { attributes, .. } => {
            let mut flags = 0u32;
            if attributes.use_direct_blit {
                flags |= 0b0100_0000;
            }
            if attributes.use_gpu {
                flags |= 0b0010_0000;
            }
            if attributes.has_metadata {
                flags |= 0b0001_0000;
            }
            if attributes.is_action_script_3 {
                flags |= 0b0000_1000;
            }
            if attributes.use_network_sandbox {
                flags |= 0b0000_0001;
            }
            payload.write_u32(flags)?;
        }
        Tag::DefineSprite { sprite, .. } => {
            payload.write_u16(sprite.id)?;
            payload.write_u16(sprite.num_frames)?;
            for inner in &sprite.tags {
                write_tag(&mut payload, inner)?;
            }
        }
        Tag::DefineShape { shape, .. } => write_shape(&mut payload, shape)?,
        Tag::Unknown(opaque) => payload.extend_from_slice(&opaque.data),
    }

    write_tag_header(output, code, payload.len(), tag.was_extended())?;
    output.write_all(&payload).map_err(Error::Io)?;
    Ok(())
}

fn write_tag_header<W: Write>(
    output: &mut W,
    code: u16,
    length: usize,
    force_extended: bool,
) -> Result<()> {
    if length < 0x3F && !force_extended {
        output.write_u16((code << 6) | length as u16)?;
    } else {
        output.write_u16((code << 6) | 0x3F)?;
        output.write_u32(length as u32)?;
    }
    Ok(())
}

fn write_shape<W: Write>(output: &mut W, shape: &Shape) -> Result<()> {
    output.write_u16(shape.id)?;
    write_rectangle(output, &shape.shape_bounds)?;
    if shape.version >= 4 {
        write_rectangle(output, &shape.edge_bounds)?;
        let mut flags = 0u8;
        if shape.has_fill_winding_rule {
            flags |= 0b0000_0100;
        }
        if shape.has_non_scaling_strokes {
            flags |= 0b0000_0010;
        }
        if shape.has_scaling_strokes {
            flags |= 0b0000_0001;
        }
        output.write_u8(flags)?;
    }

    let mut bits = BitWriter::<&mut W, BigEndian>::new(output);
    let mut context = write_shape_styles(&mut bits, &shape.styles, shape.version)?;
    write_shape_records(&mut bits, &shape.shape, shape.version, &mut context)?;
    bits.byte_align().map_err(Error::Io)?;
    Ok(())
}

fn write_shape_styles<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    styles: &ShapeStyles,
    version: u8,
) -> Result<ShapeContext> {
    write_style_count(bits, styles.fill_styles.len(), version)?;
    for fill in &styles.fill_styles {
        write_fill_style(bits, fill, version)?;
    }
    write_style_count(bits, styles.line_styles.len(), version)?;
    for line in &styles.line_styles {
        write_line_style(bits, line, version)?;
    }

    let num_fill_bits = minimal_bits_for_count(styles.fill_styles.len());
    let num_line_bits = minimal_bits_for_count(styles.line_styles.len());
    bits.write(4, u32::from(num_fill_bits)).map_err(Error::Io)?;
    bits.write(4, u32::from(num_line_bits)).map_err(Error::Io)?;
    Ok(ShapeContext {
        num_fill_bits,
        num_line_bits,
    })
}

/// The minimal unsigned bit width that can index `0..=count` (index `0`
/// always means "no style selected").
fn minimal_bits_for_count(count: usize) -> u8 {
    let max_index = count as u32;
    let bits = if max_index == 0 {
        0
    } else {
        32 - max_index.leading_zeros()
    };
    bits.min(15) as u8
}

fn write_style_count<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    count: usize,
    version: u8,
) -> Result<()> {
    if count >= 0xFF && version >= 2 {
        bits.write(8, 0xFFu32).map_err(Error::Io)?;
        bits.write(16, count as u32).map_err(Error::Io)?;
    } else {
        bits.write(8, count as u32).map_err(Error::Io)?;
    }
    Ok(())
}

fn write_fill_style<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    fill: &FillStyle,
    version: u8,
) -> Result<()> {
    match fill {
        FillStyle::Color(color) => {
            bits.write(8, 0x00u32).map_err(Error::Io)?;
            write_color(bits, color, version)?;
        }
        FillStyle::LinearGradient(gradient) => {
            bits.write(8, 0x10u32).map_err(Error::Io)?;
            write_gradient(bits, gradient, version)?;
        }
        FillStyle::RadialGradient(gradient) => {
            bits.write(8, 0x12u32).map_err(Error::Io)?;
            write_gradient(bits, gradient, version)?;
        }
        FillStyle::FocalGradient {
            gradient,
            focal_point,
        } => {
            bits.write(8, 0x13u32).map_err(Error::Io)?;
            write_gradient(bits, gradient, version)?;
            write_fixed8_bits(bits, *focal_point)?;
        }
        FillStyle::Bitmap {
            id,
            matrix,
            is_smoothed,
            is_repeating,
        } => {
            let fill_type: u32 = match (is_smoothed, is_repeating) {
                (true, true) => 0x40,
                (true, false) => 0x41,
                (false, true) => 0x42,
                (false, false) => 0x43,
            };
            bits.write(8, fill_type).map_err(Error::Io)?;
            bits.write(16, u32::from(*id)).map_err(Error::Io)?;
            write_matrix(bits, matrix)?;
        }
    }
    Ok(())
}

fn write_gradient<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    gradient: &Gradient,
    version: u8,
) -> Result<()> {
    write_matrix(bits, &gradient.matrix)?;
    let spread_bits: u32 = match gradient.spread {
        GradientSpread::Pad => 0,
        GradientSpread::Reflect => 1,
        GradientSpread::Repeat => 2,
    };
    let interpolation_bits: u32 = match gradient.interpolation {
        GradientInterpolation::Rgb => 0,
        GradientInterpolation::LinearRgb => 1,
    };
    bits.write(2, spread_bits).map_err(Error::Io)?;
    bits.write(2, interpolation_bits).map_err(Error::Io)?;
    bits.write(4, gradient.records.len() as u32)
        .map_err(Error::Io)?;
    for record in &gradient.records {
        bits.write(8, u32::from(record.ratio)).map_err(Error::Io)?;
        write_color(bits, &record.color, version)?;
    }
    Ok(())
}

fn write_matrix<W: Write>(bits: &mut BitWriter<W, BigEndian>, matrix: &Matrix) -> Result<()> {
    let has_scale = matrix.a != 1.0 || matrix.d != 1.0;
    bits.write_bit(has_scale).map_err(Error::Io)?;
    if has_scale {
        let n = fixed16_bits(matrix.a).max(fixed16_bits(matrix.d));
        check_bit_width(n)?;
        bits.write(5, u32::from(n)).map_err(Error::Io)?;
        write_fixed16(bits, n, matrix.a)?;
        write_fixed16(bits, n, matrix.d)?;
    }

    let has_rotate = matrix.b != 0.0 || matrix.c != 0.0;
    bits.write_bit(has_rotate).map_err(Error::Io)?;
    if has_rotate {
        let n = fixed16_bits(matrix.b).max(fixed16_bits(matrix.c));
        check_bit_width(n)?;
        bits.write(5, u32::from(n)).map_err(Error::Io)?;
        write_fixed16(bits, n, matrix.b)?;
        write_fixed16(bits, n, matrix.c)?;
    }

    let translate_bits = matrix.tx.minimal_bits().max(matrix.ty.minimal_bits());
    check_bit_width(translate_bits)?;
    bits.write(5, u32::from(translate_bits)).map_err(Error::Io)?;
    bits.write_signed(u32::from(translate_bits), matrix.tx.get())
        .map_err(Error::Io)?;
    bits.write_signed(u32::from(translate_bits), matrix.ty.get())
        .map_err(Error::Io)?;
    Ok(())
}

fn fixed16_bits(value: f32) -> u8 {
    crate::types::minimal_bits_for_signed((value * 65536.0) as i32)
}

fn write_fixed16<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    n: u8,
    value: f32,
) -> Result<()> {
    bits.write_signed(u32::from(n), (value * 65536.0) as i32)
        .map_err(Error::Io)
}

fn write_fixed8_bits<W: Write>(bits: &mut BitWriter<W, BigEndian>, value: f32) -> Result<()> {
    bits.write_signed(16, (value * 256.0) as i32)
        .map_err(Error::Io)
}

fn write_color<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    color: &Color,
    shape_version: u8,
) -> Result<()> {
    bits.write(8, u32::from(color.r)).map_err(Error::Io)?;
    bits.write(8, u32::from(color.g)).map_err(Error::Io)?;
    bits.write(8, u32::from(color.b)).map_err(Error::Io)?;
    if shape_version >= 3 {
        bits.write(8, u32::from(color.a)).map_err(Error::Io)?;
    }
    Ok(())
}

fn write_line_style<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    line: &LineStyle,
    version: u8,
) -> Result<()> {
    bits.write(16, u32::from(line.width.get() as u16))
        .map_err(Error::Io)?;
    if version < 4 {
        write_color(bits, &line.color, version)?;
        return Ok(());
    }

    bits.write(2, u32::from(cap_style_bits(line.start_cap)))
        .map_err(Error::Io)?;
    let join_bits: u32 = match line.join_style {
        LineJoinStyle::Round => 0,
        LineJoinStyle::Bevel => 1,
        LineJoinStyle::Miter(_) => 2,
    };
    bits.write(2, join_bits).map_err(Error::Io)?;
    bits.write_bit(line.fill_style.is_some()).map_err(Error::Io)?;
    bits.write_bit(!line.allow_scale_x).map_err(Error::Io)?;
    bits.write_bit(!line.allow_scale_y).map_err(Error::Io)?;
    bits.write_bit(line.is_pixel_hinted).map_err(Error::Io)?;
    bits.write(5, 0u32).map_err(Error::Io)?;
    bits.write_bit(!line.allow_close).map_err(Error::Io)?;
    bits.write(2, u32::from(cap_style_bits(line.end_cap)))
        .map_err(Error::Io)?;
    if let LineJoinStyle::Miter(limit) = line.join_style {
        write_fixed8_bits(bits, limit)?;
    }
    match &line.fill_style {
        Some(fill) => write_fill_style(bits, fill, version)?,
        None => write_color(bits, &line.color, version)?,
    }
    Ok(())
}

fn cap_style_bits(cap: LineCapStyle) -> u8 {
    match cap {
        LineCapStyle::Round => 0,
        LineCapStyle::None => 1,
        LineCapStyle::Square => 2,
    }
}

fn write_shape_records<W: Write>(
    bits: &mut BitWriter<W, BigEndian>,
    records: &[ShapeRecord],
    version: u8,
    context: &mut ShapeContext,
) -> Result<()> {
    for record in records {
        match record {
            ShapeRecord::StyleChange(data) => {
                bits.write_bit(false).map_err(Error::Io)?;
                let mut flags = 0u8;
                if data.move_to.is_some() {
                    flags |= 0b0000_0001;
                }
                if data.fill_style_0.is_some() {
                    flags |= 0b0000_0010;
                }
                if data.fill_style_1.is_some() {
                    flags |= 0b0000_0100;
                }
                if data.line_style.is_some() {
                    flags |= 0b0000_1000;
                }
                if data.new_styles.is_some() {
                    flags |= 0b0001_0000;
                }
                bits.write(5, u32::from(flags)).map_err(Error::Io)?;

                if let Some((x, y)) = data.move_to {
                    let n = x.minimal_bits().max(y.minimal_bits());
                    check_bit_width(n)?;
                    bits.write(5, u32::from(n)).map_err(Error::Io)?;
                    bits.write_signed(u32::from(n), x.get()).map_err(Error::Io)?;
                    bits.write_signed(u32::from(n), y.get()).map_err(Error::Io)?;
                }
                if let Some(idx) = data.fill_style_0 {
                    bits.write(u32::from(context.num_fill_bits), idx)
                        .map_err(Error::Io)?;
                }
                if let Some(idx) = data.fill_style_1 {
                    bits.write(u32::from(context.num_fill_bits), idx)
                        .map_err(Error::Io)?;
                }
                if let Some(idx) = data.line_style {
                    bits.write(u32::from(context.num_line_bits), idx)
                        .map_err(Error::Io)?;
                }
                if let Some(new_styles) = &data.new_styles {
                    *context = write_shape_styles(bits, new_styles, version)?;
                }
            }
            ShapeRecord::StraightEdge { delta_x, delta_y } => {
                bits.write_bit(true).map_err(Error::Io)?; // is_edge
                bits.write_bit(true).map_err(Error::Io)?; // is_straight
                let vertical = delta_x.get() == 0 && delta_y.get() != 0;
                let horizontal = delta_y.get() == 0 && delta_x.get() != 0;
                let axis_aligned = vertical || horizontal;
                let n = if axis_aligned {
                    if vertical {
                        delta_y.minimal_bits()
                    } else {
                        delta_x.minimal_bits()
                    }
                } else {
                    delta_x.minimal_bits().max(delta_y.minimal_bits())
                };
                let stored_n = n.saturating_sub(2).min(15);
                bits.write(4, u32::from(stored_n)).map_err(Error::Io)?;
                bits.write_bit(axis_aligned).map_err(Error::Io)?;
                bits.write_bit(vertical).map_err(Error::Io)?;
                let actual_n = u32::from(stored_n) + 2;
                if axis_aligned {
                    if vertical {
                        bits.write_signed(actual_n, delta_y.get()).map_err(Error::Io)?;
                    } else {
                        bits.write_signed(actual_n, delta_x.get()).map_err(Error::Io)?;
                    }
                } else {
                    bits.write_signed(actual_n, delta_x.get()).map_err(Error::Io)?;
                    bits.write_signed(actual_n, delta_y.get()).map_err(Error::Io)?;
                }
            }
            ShapeRecord::CurvedEdge {
                control_delta_x,
                control_delta_y,
                anchor_delta_x,
                anchor_delta_y,
            } => {
                bits.write_bit(true).map_err(Error::Io)?; // is_edge
                bits.write_bit(false).map_err(Error::Io)?; // is_straight = false
                let n = control_delta_x
                    .minimal_bits()
                    .max(control_delta_y.minimal_bits())
                    .max(anchor_delta_x.minimal_bits())
                    .max(anchor_delta_y.minimal_bits());
                let stored_n = n.saturating_sub(2).min(15);
                bits.write(4, u32::from(stored_n)).map_err(Error::Io)?;
                let actual_n = u32::from(stored_n) + 2;
                bits.write_signed(actual_n, control_delta_x.get())
                    .map_err(Error::Io)?;
                bits.write_signed(actual_n, control_delta_y.get())
                    .map_err(Error::Io)?;
                bits.write_signed(actual_n, anchor_delta_x.get())
                    .map_err(Error::Io)?;
                bits.write_signed(actual_n, anchor_delta_y.get())
                    .map_err(Error::Io)?;
            }
        }
    }
    // Terminator: is_edge = 0, 5-bit all-zero flag field.
    bits.write_bit(false).map_err(Error::Io)?;
    bits.write(5, 0u32).map_err(Error::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read;
    use crate::{Header, OpaqueTag};
    use approx::assert_relative_eq;

    fn test_header() -> Header {
        Header {
            compression: crate::Compression::None,
            version: 6,
            uncompressed_length: 0,
            stage_size: Rectangle::new(Twips::zero(), Twips::new(8000), Twips::zero(), Twips::new(10000)),
            frame_rate: 24.0,
            num_frames: 1,
        }
    }

    #[test]
    fn round_trips_end_tag_only() {
        let swf = Swf {
            header: test_header(),
            tags: vec![Tag::End { was_extended: false }],
        };
        let bytes = serialize(&swf).unwrap();
        let parsed = read::parse(&bytes[..]).unwrap();
        assert_eq!(parsed.tags, vec![Tag::End { was_extended: false }]);
        assert_eq!(parsed.header.num_frames, 1);
    }

    #[test]
    fn round_trips_opaque_tag_with_extended_framing() {
        let swf = Swf {
            header: test_header(),
            tags: vec![
                Tag::Unknown(OpaqueTag {
                    code: 12,
                    was_extended: true,
                    data: vec![0x42; 80],
                }),
                Tag::End { was_extended: false },
            ],
        };
        let bytes = serialize(&swf).unwrap();
        let parsed = read::parse(&bytes[..]).unwrap();
        assert_eq!(parsed.tags, swf.tags);
    }

    #[test]
    fn round_trips_set_background_color() {
        let swf = Swf {
            header: test_header(),
            tags: vec![
                Tag::SetBackgroundColor {
                    color: Color::from_rgb(0x12, 0x34, 0x56),
                    was_extended: false,
                },
                Tag::End { was_extended: false },
            ],
        };
        let bytes = serialize(&swf).unwrap();
        let parsed = read::parse(&bytes[..]).unwrap();
        assert_eq!(parsed.tags, swf.tags);
    }

    #[test]
    fn round_trips_typed_tag_with_extended_framing() {
        // A 3-byte payload easily fits the short-length form, but the
        // original encoding chose the extended 32-bit form anyway; that
        // choice must survive the round trip (spec.md §8 S2, Property 2).
        let swf = Swf {
            header: test_header(),
            tags: vec![
                Tag::SetBackgroundColor {
                    color: Color::from_rgb(0x12, 0x34, 0x56),
                    was_extended: true,
                },
                Tag::End { was_extended: false },
            ],
        };
        let bytes = serialize(&swf).unwrap();

        // code 9, short-length-slot forced to 0x3F, then a 4-byte extended length of 3.
        let header: u16 = (9 << 6) | 0x3F;
        assert_eq!(&bytes[8..10], &header.to_le_bytes());
        assert_eq!(&bytes[10..14], &3u32.to_le_bytes());

        let parsed = read::parse(&bytes[..]).unwrap();
        assert_eq!(parsed.tags, swf.tags);
    }

    #[test]
    fn round_trips_nested_sprite() {
        let swf = Swf {
            header: test_header(),
            tags: vec![
                Tag::DefineSprite {
                    sprite: crate::Sprite {
                        id: 4,
                        num_frames: 3,
                        tags: vec![
                            Tag::ShowFrame { was_extended: false },
                            Tag::End { was_extended: false },
                        ],
                    },
                    was_extended: false,
                },
                Tag::End { was_extended: false },
            ],
        };
        let bytes = serialize(&swf).unwrap();
        let parsed = read::parse(&bytes[..]).unwrap();
        assert_eq!(parsed.tags, swf.tags);
    }

    #[cfg(feature = "flate2")]
    #[test]
    fn round_trips_cws_compressed_body() {
        let swf = Swf {
            header: Header {
                compression: crate::Compression::Zlib,
                ..test_header()
            },
            tags: vec![
                Tag::ShowFrame { was_extended: false },
                Tag::End { was_extended: false },
            ],
        };
        let bytes = serialize(&swf).unwrap();
        assert_eq!(&bytes[0..3], b"CWS");
        let parsed = read::parse(&bytes[..]).unwrap();
        assert_eq!(parsed.tags, swf.tags);
        assert_eq!(parsed.header.compression, crate::Compression::Zlib);
    }

    #[test]
    fn rectangle_bit_width_overflow_is_rejected() {
        let mut rect =
            Rectangle::new(Twips::zero(), Twips::new(100), Twips::zero(), Twips::new(100));
        rect.num_bits = 32;
        let mut buf = Vec::new();
        let err = write_rectangle(&mut buf, &rect).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn round_trips_shape_with_scaled_bitmap_fill() {
        let matrix = Matrix {
            a: 1.5,
            b: 0.0,
            c: 0.0,
            d: 2.25,
            tx: Twips::new(100),
            ty: Twips::new(-50),
        };
        let shape = Shape {
            version: 1,
            id: 7,
            shape_bounds: Rectangle::new(Twips::zero(), Twips::new(100), Twips::zero(), Twips::new(100)),
            edge_bounds: Rectangle::new(Twips::zero(), Twips::new(100), Twips::zero(), Twips::new(100)),
            has_fill_winding_rule: false,
            has_non_scaling_strokes: false,
            has_scaling_strokes: false,
            styles: ShapeStyles {
                fill_styles: vec![FillStyle::Bitmap {
                    id: 3,
                    matrix,
                    is_smoothed: true,
                    is_repeating: false,
                }],
                line_styles: vec![],
            },
            shape: vec![],
        };
        let swf = Swf {
            header: test_header(),
            tags: vec![
                Tag::DefineShape {
                    shape,
                    was_extended: false,
                },
                Tag::End { was_extended: false },
            ],
        };
        let bytes = serialize(&swf).unwrap();
        let parsed = read::parse(&bytes[..]).unwrap();
        match &parsed.tags[0] {
            Tag::DefineShape { shape, .. } => match &shape.styles.fill_styles[0] {
                FillStyle::Bitmap { matrix, .. } => {
                    assert_relative_eq!(matrix.a, 1.5, epsilon = 1.0 / 65536.0);
                    assert_relative_eq!(matrix.d, 2.25, epsilon = 1.0 / 65536.0);
                }
                other => panic!("expected bitmap fill, got {:?}", other),
            },
            other => panic!("expected DefineShape, got {:?}", other),
        }
    }
}
