//! Enumerations shared by PCB records.
//!
//! Values outside the known range map to an `Unknown` variant rather than
//! failing the record.

use log::trace;

/// Record tag byte of binary PCB records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordTag {
    Arc = 1,
    Pad = 2,
    Via = 3,
    Track = 4,
    Text = 5,
    Fill = 6,
    Region = 11,
    Model = 12,
}

impl RecordTag {
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Arc),
            2 => Some(Self::Pad),
            3 => Some(Self::Via),
            4 => Some(Self::Track),
            5 => Some(Self::Text),
            6 => Some(Self::Fill),
            11 => Some(Self::Region),
            12 => Some(Self::Model),
            _ => None,
        }
    }
}

impl From<RecordTag> for u8 {
    fn from(tag: RecordTag) -> Self {
        tag as u8
    }
}

/// Copper pad shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadShape {
    #[default]
    Unknown,
    Circle,
    Rect,
    Octagonal,
}

impl From<u8> for PadShape {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Circle,
            2 => Self::Rect,
            3 => Self::Octagonal,
            _ => Self::Unknown,
        }
    }
}

/// Per-layer pad shape of full-stack pads; adds rounded rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadShapeAlt {
    #[default]
    Unknown,
    Circle,
    Rect,
    Octagonal,
    RoundRect,
}

impl From<u8> for PadShapeAlt {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Circle,
            2 => Self::Rect,
            3 => Self::Octagonal,
            9 => Self::RoundRect,
            _ => Self::Unknown,
        }
    }
}

/// Drill shape of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadHoleShape {
    #[default]
    Unknown,
    Round,
    Square,
    Slot,
}

impl From<u8> for PadHoleShape {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Round,
            1 => Self::Square,
            2 => Self::Slot,
            _ => Self::Unknown,
        }
    }
}

/// How pad (or via) sizes are specified per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadMode {
    #[default]
    Simple,
    TopMiddleBottom,
    FullStack,
}

impl From<u8> for PadMode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::TopMiddleBottom,
            2 => Self::FullStack,
            _ => Self::Simple,
        }
    }
}

/// Source of a paste/solder mask expansion value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionMode {
    #[default]
    Unknown,
    None,
    Rule,
    Manual,
}

impl From<u8> for ExpansionMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Rule,
            2 => Self::Manual,
            _ => Self::Unknown,
        }
    }
}

impl ExpansionMode {
    /// Parse the string form used in property records.
    pub fn from_name(value: &str) -> Self {
        match value {
            "None" => Self::None,
            "Rule" => Self::Rule,
            "Manual" => Self::Manual,
            _ => {
                trace!("Unknown Mode string: '{}'.", value);
                Self::Unknown
            }
        }
    }
}

/// Anchor of a text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPosition {
    #[default]
    Manual,
    LeftTop,
    LeftCenter,
    LeftBottom,
    CenterTop,
    CenterCenter,
    CenterBottom,
    RightTop,
    RightCenter,
    RightBottom,
}

impl From<i32> for TextPosition {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::LeftTop,
            2 => Self::LeftCenter,
            3 => Self::LeftBottom,
            4 => Self::CenterTop,
            5 => Self::CenterCenter,
            6 => Self::CenterBottom,
            7 => Self::RightTop,
            8 => Self::RightCenter,
            9 => Self::RightBottom,
            _ => Self::Manual,
        }
    }
}

/// Font technology of a PCB text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextType {
    Unknown,
    #[default]
    Stroke,
    TrueType,
    Barcode,
}

impl From<u8> for TextType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Stroke,
            1 => Self::TrueType,
            2 => Self::Barcode,
            _ => Self::Unknown,
        }
    }
}

/// Built-in stroke font of a PCB text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeFontType {
    Unknown,
    #[default]
    Default,
    SansSerif,
    Serif,
}

impl From<u16> for StrokeFontType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::Default,
            2 => Self::SansSerif,
            3 => Self::Serif,
            _ => Self::Unknown,
        }
    }
}

/// Dimension style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionKind {
    #[default]
    Unknown,
    Linear,
    Angular,
    Radial,
    Leader,
    Datum,
    Baseline,
    Center,
    LinearDiameter,
    RadialDiameter,
}

impl From<i32> for DimensionKind {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Linear,
            2 => Self::Angular,
            3 => Self::Radial,
            4 => Self::Leader,
            5 => Self::Datum,
            6 => Self::Baseline,
            7 => Self::Center,
            8 => Self::LinearDiameter,
            9 => Self::RadialDiameter,
            _ => Self::Unknown,
        }
    }
}

/// Unit a dimension text is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionUnit {
    Unknown,
    Inches,
    #[default]
    Millimeters,
    Mils,
    Centimeters,
}

impl DimensionUnit {
    pub fn from_name(value: &str) -> Self {
        match value {
            "Inches" => Self::Inches,
            "Mils" => Self::Mils,
            "Millimeters" => Self::Millimeters,
            "Centimeters" => Self::Centimeters,
            _ => Self::Unknown,
        }
    }
}

/// Kind of a class (`Classes6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    #[default]
    Unknown,
    NetClass,
    SourceSchematicClass,
    FromTo,
    PadClass,
    LayerClass,
    UnknownClass,
    DiffPairClass,
    PolygonClass,
}

impl From<i32> for ClassKind {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::NetClass,
            1 => Self::SourceSchematicClass,
            2 => Self::FromTo,
            3 => Self::PadClass,
            4 => Self::LayerClass,
            5 => Self::UnknownClass,
            6 => Self::DiffPairClass,
            7 => Self::PolygonClass,
            _ => Self::Unknown,
        }
    }
}

/// Purpose of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionKind {
    #[default]
    Unknown,
    Copper,
    PolygonCutout,
    DashedOutline,
    Unknown3,
    CavityDefinition,
    BoardCutout,
}

impl RegionKind {
    /// Map the `KIND` property; kind 0 is a board cutout when
    /// `ISBOARDCUTOUT` is set.
    pub fn from_kind(kind: i32, is_board_cutout: bool) -> Self {
        match kind {
            0 if is_board_cutout => Self::BoardCutout,
            0 => Self::Copper,
            1 => Self::PolygonCutout,
            2 => Self::DashedOutline,
            3 => Self::Unknown3,
            4 => Self::CavityDefinition,
            _ => Self::Unknown,
        }
    }
}

/// Hatching of a polygon pour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonHatchStyle {
    #[default]
    Unknown,
    Solid,
    Degree45,
    Degree90,
    Horizontal,
    Vertical,
    None,
}

impl PolygonHatchStyle {
    pub fn from_name(value: &str) -> Self {
        match value {
            "Solid" => Self::Solid,
            "45Degree" => Self::Degree45,
            "90Degree" => Self::Degree90,
            "Horizontal" => Self::Horizontal,
            "Vertical" => Self::Vertical,
            "None" => Self::None,
            _ => Self::Unknown,
        }
    }
}

/// How pads connect to a polygon pour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectStyle {
    #[default]
    Unknown,
    Direct,
    Relief,
    None,
}

impl ConnectStyle {
    pub fn from_name(value: &str) -> Self {
        match value {
            "Direct" => Self::Direct,
            "Relief" => Self::Relief,
            "NoConnect" => Self::None,
            _ => Self::Unknown,
        }
    }
}
