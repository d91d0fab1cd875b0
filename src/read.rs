//! Parses SWF byte streams into [`crate::Swf`] values.
//!
//! The container is peeled apart top-down: [`decompress_swf`] handles the
//! signature, optional zlib/LZMA body inflation, and the header fields that
//! precede the tag stream; [`parse_swf`] then walks the decompressed tag
//! stream. [`parse`] is the one-call convenience wrapping both.

use crate::error::{Error, ErrorContext, Result};
use crate::extensions::ReadSwfExt;
use crate::tag_code::TagCode;
use crate::{
    CharacterId, Color, Compression, FileAttributes, FillStyle, Gradient, GradientInterpolation,
    GradientRecord, GradientSpread, Header, LineCapStyle, LineJoinStyle, LineStyle, Matrix,
    Rectangle, Shape, ShapeContext, ShapeRecord, ShapeStyles, Sprite, StyleChangeData, Swf,
    SwfBuf, Tag, Twips,
};
use bitstream_io::{BigEndian, BitRead, BitReader};
use smallvec::SmallVec;
use std::io::{self, Read};

/// Parses a complete SWF file out of `input`: signature through the final
/// tag. Shorthand for [`decompress_swf`] followed by [`parse_swf`].
pub fn parse<R: Read>(mut input: R) -> Result<Swf> {
    let swf_buf = decompress_swf(&mut input)?;
    parse_swf(&swf_buf)
}

/// Reads the signature, version, and declared length, inflates the body if
/// compressed, and reads the header fields up to (but not including) the
/// tag stream. The returned [`SwfBuf`] owns everything [`parse_swf`] needs.
pub fn decompress_swf<R: Read>(input: &mut R) -> Result<SwfBuf> {
    let signature = input.read_signature()?;
    let compression = match &signature {
        b"FWS" => Compression::None,
        b"CWS" => Compression::Zlib,
        b"ZWS" => Compression::Lzma,
        _ => return Err(Error::InvalidSignature(signature)),
    };
    let version = input.read_u8()?;
    let uncompressed_length = input.read_u32()?;
    log::debug!(
        "decompress_swf: signature={:?}, version={}, compression={:?}",
        signature,
        version,
        compression
    );

    let mut body = Vec::new();
    match compression {
        Compression::None => {
            input.read_to_end(&mut body).map_err(Error::Io)?;
        }
        Compression::Zlib => {
            #[cfg(feature = "flate2")]
            {
                let mut decoder = flate2::read::ZlibDecoder::new(&mut *input);
                decoder.read_to_end(&mut body).map_err(Error::Io)?;
            }
            #[cfg(not(feature = "flate2"))]
            {
                return Err(Error::Unsupported(
                    "zlib-compressed (CWS) body: `flate2` feature disabled",
                ));
            }
        }
        Compression::Lzma => {
            #[cfg(feature = "lzma")]
            {
                decompress_lzma_body(input, uncompressed_length, &mut body)?;
            }
            #[cfg(not(feature = "lzma"))]
            {
                return Err(Error::Unsupported(
                    "LZMA-compressed (ZWS) body: `lzma` feature disabled",
                ));
            }
        }
    }

    let expected_len = uncompressed_length.saturating_sub(8);
    if body.len() as u32 != expected_len {
        return Err(Error::BodyLengthMismatch {
            expected: expected_len,
            actual: body.len() as u32,
        });
    }

    let mut cursor = &body[..];
    let stage_size = read_rectangle(&mut cursor).context("Header.StageSize")?;
    let frame_rate = read_fixed8_bytes(&mut cursor)?;
    let num_frames = cursor.read_u16()?;
    let consumed = body.len() - cursor.len();

    let header = Header {
        compression,
        version,
        uncompressed_length,
        stage_size,
        frame_rate,
        num_frames,
    };
    let data = body[consumed..].to_vec();
    Ok(SwfBuf { header, data })
}

/// Parses the tag stream owned by a [`SwfBuf`] into a complete [`Swf`].
pub fn parse_swf(swf_buf: &SwfBuf) -> Result<Swf> {
    let mut reader = &swf_buf.data[..];
    let tags = read_tag_list(&mut reader, swf_buf.header.version)?;
    Ok(Swf {
        header: swf_buf.header.clone(),
        tags,
    })
}

/// SWF's LZMA body is a standalone `.lzma`-style stream minus its 8-byte
/// uncompressed-size field (that size is already known from the header).
/// `lzma-rs` only understands the full classic header, so a synthetic one
/// is spliced together from the 5 properties bytes actually on the wire
/// plus the length we already have.
#[cfg(feature = "lzma")]
fn decompress_lzma_body<R: Read>(
    input: &mut R,
    uncompressed_length: u32,
    body: &mut Vec<u8>,
) -> Result<()> {
    let _compressed_length = input.read_u32()?;
    let properties = input.read_slice(5)?;

    let mut header = Vec::with_capacity(13);
    header.extend_from_slice(&properties);
    header.extend_from_slice(&(uncompressed_length.saturating_sub(8) as u64).to_le_bytes());

    let mut source = io::BufReader::new(io::Cursor::new(header).chain(input));
    lzma_rs::lzma_decompress(&mut source, body)
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e.to_string())))
}

fn read_fixed8_bytes<R: Read>(reader: &mut R) -> Result<f32> {
    Ok(f32::from(reader.read_u16()?) / 256.0)
}

/// Reads a bit-packed [`Rectangle`]: 5 bits of `bits_per_field` followed by
/// four fields of that width, padded to a whole number of bytes. The bit
/// reader is scoped to this call and discarded once the padding is
/// consumed, so the caller's byte position lands exactly on the next field.
pub(crate) fn read_rectangle<R: Read>(reader: &mut R) -> Result<Rectangle> {
    let mut bits = BitReader::<&mut R, BigEndian>::new(reader);
    let num_bits: u8 = bits.read(5).map_err(Error::Io)?;
    if num_bits == 0 {
        return Err(Error::InvariantViolation(
            "Rectangle.bits_per_field must be at least 1",
        ));
    }
    let x_min = Twips::new(bits.read_signed(u32::from(num_bits)).map_err(Error::Io)?);
    let x_max = Twips::new(bits.read_signed(u32::from(num_bits)).map_err(Error::Io)?);
    let y_min = Twips::new(bits.read_signed(u32::from(num_bits)).map_err(Error::Io)?);
    let y_max = Twips::new(bits.read_signed(u32::from(num_bits)).map_err(Error::Io)?);
    Ok(Rectangle {
        x_min,
        x_max,
        y_min,
        y_max,
        num_bits,
    })
}

/// Reads tags until an `End` tag is consumed or the source is exhausted.
/// Used both at the top level and for a [`Sprite`]'s nested stream — the
/// latter relies on its own payload slice running out right after its
/// inner `End`, since the nested stream is parsed recursively rather than
/// flattened into the outer one.
fn read_tag_list<R: Read>(reader: &mut R, version: u8) -> Result<Vec<Tag>> {
    let mut tags = Vec::new();
    while let Some(tag) = read_tag(reader, version).context("Tag")? {
        let is_end = matches!(tag, Tag::End { .. });
        tags.push(tag);
        if is_end {
            break;
        }
    }
    Ok(tags)
}

/// Reads one tag's header and payload, or `None` if the source is
/// exhausted at a tag boundary (no partial tag left dangling).
fn read_tag<R: Read>(reader: &mut R, version: u8) -> Result<Option<Tag>> {
    let header = match try_read_u16(reader)? {
        Some(header) => header,
        None => return Ok(None),
    };
    let code = header >> 6;
    let short_len = u32::from(header & 0x3F);
    let (length, was_extended) = if short_len == 0x3F {
        (reader.read_u32()?, true)
    } else {
        (short_len, false)
    };
    let length = length as usize;
    let payload = reader.read_slice(length)?;

    let tag = match TagCode::from_u16(code) {
        Some(TagCode::End) => Tag::End { was_extended },
        Some(TagCode::ShowFrame) => Tag::ShowFrame { was_extended },
        Some(TagCode::SetBackgroundColor) => {
            if payload.len() != 3 {
                return Err(Error::InvalidTagFraming(code));
            }
            Tag::SetBackgroundColor {
                color: Color::from_rgb(payload[0], payload[1], payload[2]),
                was_extended,
            }
        }
        Some(TagCode::FileAttributes) => {
            if payload.len() != 4 {
                return Err(Error::InvalidTagFraming(code));
            }
            Tag::FileAttributes {
                attributes: read_file_attributes(&mut &payload[..])?,
                was_extended,
            }
        }
        Some(TagCode::DefineSprite) => Tag::DefineSprite {
            sprite: read_sprite(&mut &payload[..], version).context("DefineSprite")?,
            was_extended,
        },
        Some(TagCode::DefineShape) => Tag::DefineShape {
            shape: read_shape(&mut &payload[..], 1).context("DefineShape")?,
            was_extended,
        },
        Some(TagCode::DefineShape2) => Tag::DefineShape {
            shape: read_shape(&mut &payload[..], 2).context("DefineShape2")?,
            was_extended,
        },
        Some(TagCode::DefineShape3) => Tag::DefineShape {
            shape: read_shape(&mut &payload[..], 3).context("DefineShape3")?,
            was_extended,
        },
        Some(TagCode::DefineShape4) => Tag::DefineShape {
            shape: read_shape(&mut &payload[..], 4).context("DefineShape4")?,
            was_extended,
        },
        _ => {
            log::trace!("read_tag: tag code {} has no typed parser, storing opaque", code);
            Tag::Unknown(crate::OpaqueTag {
                code,
                was_extended,
                data: payload,
            })
        }
    };
    Ok(Some(tag))
}

/// Reads a little-endian `u16`, or `None` if the source is at EOF before
/// the first of its two bytes. Used only at tag boundaries, where running
/// out of input is a normal stream end rather than a [`Error::Truncated`].
fn try_read_u16<R: Read>(reader: &mut R) -> Result<Option<u16>> {
    let mut first = [0u8; 1];
    let read = reader.read(&mut first).map_err(Error::Io)?;
    if read == 0 {
        return Ok(None);
    }
    let second = reader.read_u8()?;
    Ok(Some(u16::from_le_bytes([first[0], second])))
}

fn read_file_attributes<R: Read>(reader: &mut R) -> Result<FileAttributes> {
    let flags = reader.read_u32()?;
    Ok(FileAttributes {
        use_direct_blit: flags & 0b0100_0000 != 0,
        use_gpu: flags & 0b0010_0000 != 0,
        has_metadata: flags & 0b0001_0000 != 0,
        is_action_script_3: flags & 0b0000_1000 != 0,
        use_network_sandbox: flags & 0b0000_0001 != 0,
    })
}

/// Reads a `DefineSprite` body: the 4-byte header (id, frame count) plus a
/// nested tag stream, parsed recursively rather than flattened into the
/// enclosing stream.
fn read_sprite<R: Read>(reader: &mut R, version: u8) -> Result<Sprite> {
    let id: CharacterId = reader.read_u16()?;
    let num_frames = reader.read_u16()?;
    let tags = read_tag_list(reader, version)?;
    Ok(Sprite {
        id,
        num_frames,
        tags,
    })
}

/// Reads a `DefineShape`/`2`/`3`/`4` body. `version` selects the tag
/// variant this came from (1, 2, 3, or 4), which in turn gates RGB-vs-RGBA
/// colors, the edge-bounds/flags fields, and the `LineStyle` layout.
fn read_shape<R: Read>(reader: &mut R, version: u8) -> Result<Shape> {
    let id: CharacterId = reader.read_u16()?;
    let shape_bounds = read_rectangle(reader).context("Shape.ShapeBounds")?;
    let mut edge_bounds = shape_bounds.clone();
    let mut has_fill_winding_rule = false;
    let mut has_non_scaling_strokes = false;
    let mut has_scaling_strokes = false;
    if version >= 4 {
        edge_bounds = read_rectangle(reader).context("Shape.EdgeBounds")?;
        let flags = reader.read_u8()?;
        has_fill_winding_rule = flags & 0b0000_0100 != 0;
        has_non_scaling_strokes = flags & 0b0000_0010 != 0;
        has_scaling_strokes = flags & 0b0000_0001 != 0;
    }

    let mut bits = BitReader::<&mut R, BigEndian>::new(reader);
    let (styles, mut context) =
        read_shape_styles(&mut bits, version).context("Shape.Styles")?;
    let shape = read_shape_records(&mut bits, version, &mut context).context("Shape.Records")?;

    Ok(Shape {
        version,
        id,
        shape_bounds,
        edge_bounds,
        has_fill_winding_rule,
        has_non_scaling_strokes,
        has_scaling_strokes,
        styles,
        shape,
    })
}

fn read_shape_styles<R: Read>(
    bits: &mut BitReader<R, BigEndian>,
    version: u8,
) -> Result<(ShapeStyles, ShapeContext)> {
    let fill_styles = read_fill_style_array(bits, version)?;
    let line_styles = read_line_style_array(bits, version)?;
    let num_fill_bits: u8 = bits.read(4).map_err(Error::Io)?;
    let num_line_bits: u8 = bits.read(4).map_err(Error::Io)?;
    Ok((
        ShapeStyles {
            fill_styles,
            line_styles,
        },
        ShapeContext {
            num_fill_bits,
            num_line_bits,
        },
    ))
}

fn read_style_count<R: Read>(bits: &mut BitReader<R, BigEndian>, version: u8) -> Result<u16> {
    let count: u8 = bits.read(8).map_err(Error::Io)?;
    if count == 0xFF && version >= 2 {
        Ok(bits.read(16).map_err(Error::Io)?)
    } else {
        Ok(u16::from(count))
    }
}

fn read_fill_style_array<R: Read>(
    bits: &mut BitReader<R, BigEndian>,
    version: u8,
) -> Result<Vec<FillStyle>> {
    let count = read_style_count(bits, version)?;
    let mut styles = Vec::with_capacity(count as usize);
    for _ in 0..count {
        styles.push(read_fill_style(bits, version).context("FillStyles")?);
    }
    Ok(styles)
}

fn read_line_style_array<R: Read>(
    bits: &mut BitReader<R, BigEndian>,
    version: u8,
) -> Result<Vec<LineStyle>> {
    let count = read_style_count(bits, version)?;
    let mut styles = Vec::with_capacity(count as usize);
    for _ in 0..count {
        styles.push(read_line_style(bits, version).context("LineStyles")?);
    }
    Ok(styles)
}

fn read_fill_style<R: Read>(bits: &mut BitReader<R, BigEndian>, version: u8) -> Result<FillStyle> {
    let fill_type: u8 = bits.read(8).map_err(Error::Io)?;
    match fill_type {
        0x00 => Ok(FillStyle::Color(read_color(bits, version)?)),
        0x10 => Ok(FillStyle::LinearGradient(read_gradient(bits, version)?)),
        0x12 => Ok(FillStyle::RadialGradient(read_gradient(bits, version)?)),
        0x13 => {
            let gradient = read_gradient(bits, version)?;
            let focal_point = read_fixed8_bits(bits)?;
            Ok(FillStyle::FocalGradient {
                gradient,
                focal_point,
            })
        }
        0x40 | 0x41 | 0x42 | 0x43 => {
            let id: CharacterId = bits.read(16).map_err(Error::Io)?;
            let matrix = read_matrix(bits)?;
            Ok(FillStyle::Bitmap {
                id,
                matrix,
                is_smoothed: fill_type == 0x40 || fill_type == 0x41,
                is_repeating: fill_type == 0x40 || fill_type == 0x42,
            })
        }
        other => Err(Error::InvalidFillStyleType(other)),
    }
}

fn read_gradient<R: Read>(bits: &mut BitReader<R, BigEndian>, version: u8) -> Result<Gradient> {
    let matrix = read_matrix(bits)?;
    let spread_bits: u8 = bits.read(2).map_err(Error::Io)?;
    let interpolation_bits: u8 = bits.read(2).map_err(Error::Io)?;
    let num_records: u8 = bits.read(4).map_err(Error::Io)?;
    let spread = match spread_bits {
        1 => GradientSpread::Reflect,
        2 | 3 => GradientSpread::Repeat,
        _ => GradientSpread::Pad,
    };
    let interpolation = match interpolation_bits {
        1 => GradientInterpolation::LinearRgb,
        _ => GradientInterpolation::Rgb,
    };
    let mut records = SmallVec::new();
    for _ in 0..num_records {
        let ratio: u8 = bits.read(8).map_err(Error::Io)?;
        let color = read_color(bits, version)?;
        records.push(GradientRecord { ratio, color });
    }
    Ok(Gradient {
        matrix,
        spread,
        interpolation,
        records,
    })
}

fn read_matrix<R: Read>(bits: &mut BitReader<R, BigEndian>) -> Result<Matrix> {
    let has_scale = bits.read_bit().map_err(Error::Io)?;
    let (a, d) = if has_scale {
        let n: u32 = bits.read(5).map_err(Error::Io)?;
        (read_fixed16(bits, n)?, read_fixed16(bits, n)?)
    } else {
        (1.0, 1.0)
    };
    let has_rotate = bits.read_bit().map_err(Error::Io)?;
    let (b, c) = if has_rotate {
        let n: u32 = bits.read(5).map_err(Error::Io)?;
        (read_fixed16(bits, n)?, read_fixed16(bits, n)?)
    } else {
        (0.0, 0.0)
    };
    let translate_bits: u32 = bits.read(5).map_err(Error::Io)?;
    let tx = Twips::new(bits.read_signed(translate_bits).map_err(Error::Io)?);
    let ty = Twips::new(bits.read_signed(translate_bits).map_err(Error::Io)?);
    Ok(Matrix { a, b, c, d, tx, ty })
}

/// Reads an `n`-bit signed field as a 16.16 fixed-point `Matrix` component.
fn read_fixed16<R: Read>(bits: &mut BitReader<R, BigEndian>, n: u32) -> Result<f32> {
    let raw: i32 = bits.read_signed(n).map_err(Error::Io)?;
    Ok(raw as f32 / 65536.0)
}

/// Reads a 16-bit signed field as an 8.8 fixed-point value (used for
/// `LineStyle`'s miter limit).
fn read_fixed8_bits<R: Read>(bits: &mut BitReader<R, BigEndian>) -> Result<f32> {
    let raw: i32 = bits.read_signed(16).map_err(Error::Io)?;
    Ok(raw as f32 / 256.0)
}

fn read_color<R: Read>(bits: &mut BitReader<R, BigEndian>, shape_version: u8) -> Result<Color> {
    let r: u8 = bits.read(8).map_err(Error::Io)?;
    let g: u8 = bits.read(8).map_err(Error::Io)?;
    let b: u8 = bits.read(8).map_err(Error::Io)?;
    if shape_version >= 3 {
        let a: u8 = bits.read(8).map_err(Error::Io)?;
        Ok(Color::from_rgba(r, g, b, a))
    } else {
        Ok(Color::from_rgb(r, g, b))
    }
}

fn read_line_style<R: Read>(bits: &mut BitReader<R, BigEndian>, version: u8) -> Result<LineStyle> {
    let width_raw: u16 = bits.read(16).map_err(Error::Io)?;
    let width = Twips::new(i32::from(width_raw));
    if version < 4 {
        let color = read_color(bits, version)?;
        return Ok(LineStyle::new_v1(width, color));
    }

    let start_cap = read_cap_style(bits.read(2).map_err(Error::Io)?);
    let join_bits: u8 = bits.read(2).map_err(Error::Io)?;
    let has_fill = bits.read_bit().map_err(Error::Io)?;
    let no_h_scale = bits.read_bit().map_err(Error::Io)?;
    let no_v_scale = bits.read_bit().map_err(Error::Io)?;
    let is_pixel_hinted = bits.read_bit().map_err(Error::Io)?;
    let _reserved: u8 = bits.read(5).map_err(Error::Io)?;
    let no_close = bits.read_bit().map_err(Error::Io)?;
    let end_cap = read_cap_style(bits.read(2).map_err(Error::Io)?);
    let join_style = match join_bits {
        0 => LineJoinStyle::Round,
        1 => LineJoinStyle::Bevel,
        _ => LineJoinStyle::Miter(read_fixed8_bits(bits)?),
    };
    let (fill_style, color) = if has_fill {
        (Some(read_fill_style(bits, version)?), Color::from_rgba(0, 0, 0, 0))
    } else {
        (None, read_color(bits, version)?)
    };

    Ok(LineStyle {
        width,
        color,
        start_cap,
        end_cap,
        join_style,
        fill_style,
        allow_scale_x: !no_h_scale,
        allow_scale_y: !no_v_scale,
        is_pixel_hinted,
        allow_close: !no_close,
    })
}

fn read_cap_style(value: u8) -> LineCapStyle {
    match value {
        1 => LineCapStyle::None,
        2 => LineCapStyle::Square,
        _ => LineCapStyle::Round,
    }
}

/// Consumes shape records until the 6-bit all-zero terminator, which is
/// swallowed here and never appears in the returned list.
fn read_shape_records<R: Read>(
    bits: &mut BitReader<R, BigEndian>,
    version: u8,
    context: &mut ShapeContext,
) -> Result<Vec<ShapeRecord>> {
    let mut records = Vec::new();
    loop {
        let is_edge = bits.read_bit().map_err(Error::Io)?;
        if !is_edge {
            let flags: u8 = bits.read(5).map_err(Error::Io)?;
            if flags == 0 {
                break;
            }
            records.push(ShapeRecord::StyleChange(Box::new(read_style_change(
                bits, version, flags, context,
            )?)));
        } else {
            let is_straight = bits.read_bit().map_err(Error::Io)?;
            let stored_bits: u32 = bits.read(4).map_err(Error::Io)?;
            let num_bits = stored_bits + 2;
            if is_straight {
                records.push(read_straight_edge(bits, num_bits)?);
            } else {
                records.push(read_curved_edge(bits, num_bits)?);
            }
        }
    }
    Ok(records)
}

fn read_style_change<R: Read>(
    bits: &mut BitReader<R, BigEndian>,
    version: u8,
    flags: u8,
    context: &mut ShapeContext,
) -> Result<StyleChangeData> {
    let move_to = if flags & 0b0000_0001 != 0 {
        let n: u32 = bits.read(5).map_err(Error::Io)?;
        let x = Twips::new(bits.read_signed(n).map_err(Error::Io)?);
        let y = Twips::new(bits.read_signed(n).map_err(Error::Io)?);
        Some((x, y))
    } else {
        None
    };
    let fill_style_0 = if flags & 0b0000_0010 != 0 {
        Some(bits.read(u32::from(context.num_fill_bits)).map_err(Error::Io)?)
    } else {
        None
    };
    let fill_style_1 = if flags & 0b0000_0100 != 0 {
        Some(bits.read(u32::from(context.num_fill_bits)).map_err(Error::Io)?)
    } else {
        None
    };
    let line_style = if flags & 0b0000_1000 != 0 {
        Some(bits.read(u32::from(context.num_line_bits)).map_err(Error::Io)?)
    } else {
        None
    };
    let new_styles = if flags & 0b0001_0000 != 0 {
        let (styles, new_context) = read_shape_styles(bits, version).context("ShapeStyles")?;
        *context = new_context;
        Some(styles)
    } else {
        None
    };
    Ok(StyleChangeData {
        move_to,
        fill_style_0,
        fill_style_1,
        line_style,
        new_styles,
    })
}

fn read_straight_edge<R: Read>(
    bits: &mut BitReader<R, BigEndian>,
    num_bits: u32,
) -> Result<ShapeRecord> {
    let axis_aligned = bits.read_bit().map_err(Error::Io)?;
    let vertical = bits.read_bit().map_err(Error::Io)?;
    let (delta_x, delta_y) = if !axis_aligned {
        (
            Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?),
            Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?),
        )
    } else if vertical {
        (Twips::zero(), Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?))
    } else {
        (Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?), Twips::zero())
    };
    Ok(ShapeRecord::StraightEdge { delta_x, delta_y })
}

fn read_curved_edge<R: Read>(
    bits: &mut BitReader<R, BigEndian>,
    num_bits: u32,
) -> Result<ShapeRecord> {
    let control_delta_x = Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?);
    let control_delta_y = Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?);
    let anchor_delta_x = Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?);
    let anchor_delta_y = Twips::new(bits.read_signed(num_bits).map_err(Error::Io)?);
    Ok(ShapeRecord::CurvedEdge {
        control_delta_x,
        control_delta_y,
        anchor_delta_x,
        anchor_delta_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_tag_only() {
        let mut data: &[u8] = &[0x00, 0x00];
        let tags = read_tag_list(&mut data, 6).unwrap();
        assert_eq!(tags, vec![Tag::End { was_extended: false }]);
    }

    #[test]
    fn short_and_extended_tag_framing() {
        let code: u16 = 5;
        let payload = vec![0xAB; 62];
        let mut short = Vec::new();
        short.extend_from_slice(&((code << 6) | 62u16).to_le_bytes());
        short.extend_from_slice(&payload);
        short.extend_from_slice(&[0x00, 0x00]);
        let mut reader: &[u8] = &short;
        let tag = read_tag(&mut reader, 6).unwrap().unwrap();
        match tag {
            Tag::Unknown(opaque) => {
                assert!(!opaque.was_extended);
                assert_eq!(opaque.data.len(), 62);
            }
            other => panic!("expected opaque tag, got {:?}", other),
        }

        let payload = vec![0xCD; 63];
        let mut extended = Vec::new();
        extended.extend_from_slice(&((code << 6) | 0x3Fu16).to_le_bytes());
        extended.extend_from_slice(&63u32.to_le_bytes());
        extended.extend_from_slice(&payload);
        let mut reader: &[u8] = &extended;
        let tag = read_tag(&mut reader, 6).unwrap().unwrap();
        match tag {
            Tag::Unknown(opaque) => {
                assert!(opaque.was_extended);
                assert_eq!(opaque.data.len(), 63);
            }
            other => panic!("expected opaque tag, got {:?}", other),
        }
    }

    #[test]
    fn rectangle_rejects_zero_bit_width() {
        let mut data: &[u8] = &[0x00];
        let err = read_rectangle(&mut data).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn rectangle_bits_per_field_15() {
        let bytes: [u8; 9] = [0x78, 0x00, 0x03, 0xE8, 0x00, 0x00, 0x13, 0x88, 0x00];
        let mut data: &[u8] = &bytes;
        let rect = read_rectangle(&mut data).unwrap();
        assert_eq!(rect.x_min, Twips::zero());
        assert_eq!(rect.x_max, Twips::new(8000));
        assert_eq!(rect.y_min, Twips::zero());
        assert_eq!(rect.y_max, Twips::new(10000));
        assert_eq!(rect.num_bits(), 15);
    }

    #[test]
    fn set_background_color_tag() {
        let mut data: &[u8] = &[(9u16 << 6 | 3).to_le_bytes()[0], (9u16 << 6 | 3).to_le_bytes()[1], 0x12, 0x34, 0x56];
        let tag = read_tag(&mut data, 6).unwrap().unwrap();
        assert_eq!(
            tag,
            Tag::SetBackgroundColor {
                color: Color::from_rgb(0x12, 0x34, 0x56),
                was_extended: false,
            }
        );
    }

    #[test]
    fn set_background_color_tag_preserves_extended_framing() {
        let code: u16 = 9;
        let mut data = Vec::new();
        data.extend_from_slice(&((code << 6) | 0x3Fu16).to_le_bytes());
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[0x12, 0x34, 0x56]);
        let tag = read_tag(&mut &data[..], 6).unwrap().unwrap();
        assert_eq!(
            tag,
            Tag::SetBackgroundColor {
                color: Color::from_rgb(0x12, 0x34, 0x56),
                was_extended: true,
            }
        );
        assert!(tag.was_extended());
    }

    #[test]
    fn shape_record_stream_terminates_without_emitting_terminator() {
        let mut bytes = Vec::new();
        // One fill style (solid black), no line styles, 1 fill bit, 0 line bits.
        bytes.push(0x01); // fill style count
        bytes.push(0x00); // solid color fill type
        bytes.push(0x00); // r
        bytes.push(0x00); // g
        bytes.push(0x00); // b
        bytes.push(0x00); // line style count
        bytes.push(0b0001_0000); // num_fill_bits=1, num_line_bits=0
        bytes.push(0x00); // terminator (is_edge=0, flags=0) plus padding

        let mut reader: &[u8] = &bytes;
        let mut bits = BitReader::<&mut &[u8], BigEndian>::new(&mut reader);
        let (styles, mut context) = read_shape_styles(&mut bits, 1).unwrap();
        assert_eq!(styles.fill_styles.len(), 1);
        assert_eq!(context.num_fill_bits, 1);
        let records = read_shape_records(&mut bits, 1, &mut context).unwrap();
        assert!(records.is_empty());
    }

    #[cfg(feature = "flate2")]
    #[test]
    fn cws_body_length_mismatch_is_reported() {
        use std::io::Write;

        let body = vec![0u8; 20];
        let mut compressed = Vec::new();
        {
            let mut encoder =
                flate2::write::ZlibEncoder::new(&mut compressed, flate2::Compression::default());
            encoder.write_all(&body).unwrap();
            encoder.finish().unwrap();
        }

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"CWS");
        bytes.push(6);
        // Declare a length inconsistent with the 20-byte body actually compressed above
        // (the correct value would be 8 + 20 = 28).
        bytes.extend_from_slice(&999u32.to_le_bytes());
        bytes.extend_from_slice(&compressed);

        let err = decompress_swf(&mut &bytes[..]).unwrap_err();
        match err {
            Error::BodyLengthMismatch { expected, actual } => {
                assert_eq!(expected, 999 - 8);
                assert_eq!(actual, 20);
            }
            other => panic!("expected BodyLengthMismatch, got {:?}", other),
        }
    }
}
