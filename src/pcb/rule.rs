//! Design rules (`Rules6`).

use super::enums::ConnectStyle;
use super::{check_parsed, read_record_properties};
use crate::error::Result;
use crate::io::altium::{BinaryReader, PropertyMap};

const STREAM: &str = "Rules6";

/// Rule kind with the settings that kind carries. Lengths in nanometres.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    Clearance {
        gap: i32,
    },
    DiffPairsRouting,
    Height,
    HoleSize {
        min_limit: i32,
        max_limit: i32,
    },
    HoleToHoleClearance {
        gap: i32,
    },
    RoutingVias {
        width: i32,
        min_width: i32,
        max_width: i32,
        hole_width: i32,
        min_hole_width: i32,
        max_hole_width: i32,
    },
    Width {
        min_limit: i32,
        max_limit: i32,
        preferred_width: i32,
    },
    PasteMaskExpansion {
        expansion: i32,
    },
    SolderMaskExpansion {
        expansion: i32,
    },
    PlaneClearance {
        clearance: i32,
    },
    PolygonConnect {
        air_gap_width: i32,
        relief_conductor_width: i32,
        relief_entries: i32,
        style: ConnectStyle,
    },
    /// A `RULEKIND` this crate has no fields for.
    Other(String),
}

impl RuleKind {
    fn read(props: &PropertyMap) -> Self {
        let unit = |key: &str, default: &str| props.read_kicad_unit(key, default);

        match props.read_string("RULEKIND", "").as_str() {
            "Clearance" => Self::Clearance {
                gap: unit("GAP", "10mil"),
            },
            "DiffPairsRouting" => Self::DiffPairsRouting,
            "Height" => Self::Height,
            "HoleSize" => Self::HoleSize {
                min_limit: unit("MINLIMIT", "1mil"),
                max_limit: unit("MAXLIMIT", "150mil"),
            },
            "HoleToHoleClearance" => Self::HoleToHoleClearance {
                gap: unit("GAP", "10mil"),
            },
            "RoutingVias" => Self::RoutingVias {
                width: unit("WIDTH", "20mil"),
                min_width: unit("MINWIDTH", "20mil"),
                max_width: unit("MAXWIDTH", "50mil"),
                hole_width: unit("HOLEWIDTH", "10mil"),
                min_hole_width: unit("MINHOLEWIDTH", "10mil"),
                max_hole_width: unit("MAXHOLEWIDTH", "28mil"),
            },
            "Width" => Self::Width {
                min_limit: unit("MINLIMIT", "6mil"),
                max_limit: unit("MAXLIMIT", "40mil"),
                preferred_width: unit("PREFEREDWIDTH", "6mil"),
            },
            "PasteMaskExpansion" => Self::PasteMaskExpansion {
                expansion: unit("EXPANSION", "0mil"),
            },
            "SolderMaskExpansion" => Self::SolderMaskExpansion {
                expansion: unit("EXPANSION", "4mil"),
            },
            "PlaneClearance" => Self::PlaneClearance {
                clearance: unit("CLEARANCE", "10mil"),
            },
            "PolygonConnect" => Self::PolygonConnect {
                air_gap_width: unit("AIRGAPWIDTH", "10mil"),
                relief_conductor_width: unit("RELIEFCONDUCTORWIDTH", "10mil"),
                relief_entries: props.read_int("RELIEFENTRIES", 4),
                style: ConnectStyle::from_name(&props.read_string("CONNECTSTYLE", "")),
            },
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    /// 1 is the highest priority.
    pub priority: i32,
    pub scope1_expression: String,
    pub scope2_expression: String,
    pub kind: RuleKind,
}

impl Rule {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        reader.skip(2);
        let props = read_record_properties(reader, STREAM)?;
        check_parsed(reader, STREAM)?;

        Ok(Rule {
            name: props.read_string("NAME", ""),
            priority: props.read_int("PRIORITY", 1),
            scope1_expression: props.read_string("SCOPE1EXPRESSION", ""),
            scope2_expression: props.read_string("SCOPE2EXPRESSION", ""),
            kind: RuleKind::read(&props),
        })
    }
}
