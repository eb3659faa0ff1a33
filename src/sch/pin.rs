//! Symbol pins (`RECORD=2`).

use bitflags::bitflags;

use super::enums::{read_enum, Orientation, PinElectrical, PinSymbol, RecordId, SchEnum};
use super::{expect_record, read_owner_index, read_owner_part_id, read_point, read_unit_frac};
use crate::error::Result;
use crate::io::altium::PropertyMap;
use crate::types::{sch_unit_to_kicad, Vector2I};

bitflags! {
    /// `PINCONGLOMERATE`: orientation in the two low bits plus visibility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PinConglomerate: u8 {
        const ROTATED = 0x01;
        const FLIPPED = 0x02;
        const HIDE = 0x04;
        const DISPLAY_NAME = 0x08;
        const DISPLAY_DESIGNATOR = 0x10;
        /// Set by some editors, meaning unknown.
        const UNKNOWN = 0x20;
        const LOCKED = 0x40;
    }
}

impl PinConglomerate {
    pub fn from_byte(value: u8) -> Self {
        Self::from_bits_retain(value)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_i32(i32::from(self.bits() & 0x03)).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pin {
    pub owner_index: i32,
    pub owner_part_id: i32,
    pub owner_part_display_mode: i32,

    pub name: String,
    pub text: String,
    pub designator: String,

    pub symbol_outer: PinSymbol,
    pub symbol_inner: PinSymbol,
    pub symbol_outer_edge: PinSymbol,
    pub symbol_inner_edge: PinSymbol,

    pub electrical: PinElectrical,
    pub conglomerate: PinConglomerate,
    pub orientation: Orientation,
    pub show_pin_name: bool,
    pub show_designator: bool,
    pub hidden: bool,
    pub locked: bool,

    /// Electrical end of the pin, where wires attach.
    pub location: Vector2I,
    pub length: i32,
    /// Body end of the pin: `location` moved by `length` along the pin.
    pub kicad_location: Vector2I,
    /// Pin of a library converted from KiCad; its vertical offset is mirrored.
    pub is_kicad_lib_pin: bool,
}

impl Pin {
    pub fn from_properties(props: &PropertyMap) -> Result<Self> {
        expect_record(props, RecordId::Pin)?;

        // Only a few IEEE symbols are valid on the outer and inner edges
        let symbol_outer_edge = match read_enum(props, "SYMBOL_OUTEREDGE", PinSymbol::NoSymbol) {
            edge @ (PinSymbol::NoSymbol
            | PinSymbol::Negated
            | PinSymbol::LowInput
            | PinSymbol::LowOutput) => edge,
            _ => PinSymbol::NoSymbol,
        };
        let symbol_inner_edge = match read_enum(props, "SYMBOL_INNEREDGE", PinSymbol::NoSymbol) {
            edge @ PinSymbol::Clock => edge,
            _ => PinSymbol::NoSymbol,
        };

        let conglomerate = PinConglomerate::from_byte(props.read_int("PINCONGLOMERATE", 0) as u8);
        let orientation = conglomerate.orientation();
        let is_kicad_lib_pin = props.read_bool("ISKICADLIBPIN", false);

        Ok(Pin {
            owner_index: read_owner_index(props),
            owner_part_id: read_owner_part_id(props),
            owner_part_display_mode: props.read_int("OWNERPARTDISPLAYMODE", 0),
            name: props.read_string("NAME", ""),
            text: props.read_string("TEXT", ""),
            designator: props.read_string("DESIGNATOR", ""),
            symbol_outer: read_enum(props, "SYMBOL_OUTER", PinSymbol::NoSymbol),
            symbol_inner: read_enum(props, "SYMBOL_INNER", PinSymbol::NoSymbol),
            symbol_outer_edge,
            symbol_inner_edge,
            electrical: read_enum(props, "ELECTRICAL", PinElectrical::Input),
            conglomerate,
            orientation,
            show_pin_name: conglomerate.contains(PinConglomerate::DISPLAY_NAME),
            show_designator: conglomerate.contains(PinConglomerate::DISPLAY_DESIGNATOR),
            hidden: conglomerate.contains(PinConglomerate::HIDE),
            locked: conglomerate.contains(PinConglomerate::LOCKED),
            location: read_point(props, "LOCATION"),
            length: read_unit_frac(props, "PINLENGTH"),
            kicad_location: body_end(props, orientation, is_kicad_lib_pin),
            is_kicad_lib_pin,
        })
    }
}

/// Add the pin length to the location before converting, so the whole and
/// fractional parts are rounded once.
fn body_end(props: &PropertyMap, orientation: Orientation, is_kicad_lib_pin: bool) -> Vector2I {
    let mut x = props.read_int("LOCATION.X", 0);
    let mut x_frac = props.read_int("LOCATION.X_FRAC", 0);
    let mut y = props.read_int("LOCATION.Y", 0);
    let mut y_frac = props.read_int("LOCATION.Y_FRAC", 0);
    let length = props.read_int("PINLENGTH", 0);
    let length_frac = props.read_int("PINLENGTH_FRAC", 0);
    let vertical = if is_kicad_lib_pin { -1 } else { 1 };

    match orientation {
        Orientation::Rightwards => {
            x = x.saturating_add(length);
            x_frac = x_frac.saturating_add(length_frac);
        }
        Orientation::Leftwards => {
            x = x.saturating_sub(length);
            x_frac = x_frac.saturating_sub(length_frac);
        }
        Orientation::Upwards => {
            y = y.saturating_add(length.saturating_mul(vertical));
            y_frac = y_frac.saturating_add(length_frac.saturating_mul(vertical));
        }
        Orientation::Downwards => {
            y = y.saturating_sub(length.saturating_mul(vertical));
            y_frac = y_frac.saturating_sub(length_frac.saturating_mul(vertical));
        }
    }

    Vector2I::new(sch_unit_to_kicad(x, x_frac), -sch_unit_to_kicad(y, y_frac))
}
