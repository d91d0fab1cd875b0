//! The closed tag-code registry.
//!
//! Mirrors the Go original's `tagcode.go` (a `TagCode uint16` constant
//! block plus a `stringer`-generated name table) as a type-safe Rust enum.
//! Unlike the Go version, unrecognized codes aren't a distinct variant here
//! — [`TagCode::from_u16`] simply returns `None`, and the caller treats the
//! tag as an opaque [`crate::Tag::Unknown`].

use num_derive::{FromPrimitive, ToPrimitive};

/// A recognized SWF tag code (SWF19 Appendix E).
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum TagCode {
    End = 0,
    ShowFrame = 1,
    DefineShape = 2,
    PlaceObject = 4,
    RemoveObject = 5,
    DefineBits = 6,
    DefineButton = 7,
    JpegTables = 8,
    SetBackgroundColor = 9,
    DefineFont = 10,
    DefineText = 11,
    DoAction = 12,
    DefineFontInfo = 13,
    DefineSound = 14,
    StartSound = 15,
    DefineButtonSound = 17,
    SoundStreamHead = 18,
    SoundStreamBlock = 19,
    DefineBitsLossless = 20,
    DefineBitsJpeg2 = 21,
    DefineShape2 = 22,
    DefineButtonCxform = 23,
    Protect = 24,
    PlaceObject2 = 26,
    RemoveObject2 = 28,
    DefineShape3 = 32,
    DefineText2 = 33,
    DefineButton2 = 34,
    DefineBitsJpeg3 = 35,
    DefineBitsLossless2 = 36,
    DefineEditText = 37,
    DefineSprite = 39,
    NameCharacter = 40,
    ProductInfo = 41,
    FrameLabel = 43,
    SoundStreamHead2 = 45,
    DefineMorphShape = 46,
    DefineFont2 = 48,
    ExportAssets = 56,
    ImportAssets = 57,
    EnableDebugger = 58,
    DoInitAction = 59,
    DefineVideoStream = 60,
    VideoFrame = 61,
    DefineFontInfo2 = 62,
    DebugId = 63,
    EnableDebugger2 = 64,
    ScriptLimits = 65,
    SetTabIndex = 66,
    FileAttributes = 69,
    PlaceObject3 = 70,
    ImportAssets2 = 71,
    DefineFontAlignZones = 73,
    CsmTextSettings = 74,
    DefineFont3 = 75,
    SymbolClass = 76,
    Metadata = 77,
    DefineScalingGrid = 78,
    DoAbc = 82,
    DefineShape4 = 83,
    DefineMorphShape2 = 84,
    DefineSceneAndFrameLabelData = 86,
    DefineBinaryData = 87,
    DefineFontName = 88,
    StartSound2 = 89,
    DefineBitsJpeg4 = 90,
    DefineFont4 = 91,
    EnableTelemetry = 93,
    PlaceObject4 = 94,
}

impl TagCode {
    /// Looks up a recognized tag code by its numeric value. Returns `None`
    /// for any code outside the closed registry — the caller is expected to
    /// fall back to an opaque representation in that case.
    pub fn from_u16(code: u16) -> Option<Self> {
        num_traits::FromPrimitive::from_u16(code)
    }

    /// The raw numeric tag code, as it appears on the wire.
    pub fn code(self) -> u16 {
        num_traits::ToPrimitive::to_u16(&self).expect("TagCode always fits in u16")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_codes() {
        assert_eq!(TagCode::from_u16(0), Some(TagCode::End));
        assert_eq!(TagCode::from_u16(39), Some(TagCode::DefineSprite));
        assert_eq!(TagCode::from_u16(83), Some(TagCode::DefineShape4));
        assert_eq!(TagCode::DefineSprite.code(), 39);
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(TagCode::from_u16(3), None);
        assert_eq!(TagCode::from_u16(9999), None);
    }
}
