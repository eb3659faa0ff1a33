//! PCB layer identifiers.
//!
//! Binary records store the layer as a single byte; property records store
//! its name (`TOP`, `MID3`, `MECHANICAL12`, ...).

use std::fmt;

use log::trace;

/// An Altium layer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AltiumLayer(pub u8);

impl AltiumLayer {
    pub const UNKNOWN: AltiumLayer = AltiumLayer(0);

    pub const TOP_LAYER: AltiumLayer = AltiumLayer(1);
    pub const MID_LAYER_1: AltiumLayer = AltiumLayer(2);
    pub const MID_LAYER_30: AltiumLayer = AltiumLayer(31);
    pub const BOTTOM_LAYER: AltiumLayer = AltiumLayer(32);

    pub const TOP_OVERLAY: AltiumLayer = AltiumLayer(33);
    pub const BOTTOM_OVERLAY: AltiumLayer = AltiumLayer(34);
    pub const TOP_PASTE: AltiumLayer = AltiumLayer(35);
    pub const BOTTOM_PASTE: AltiumLayer = AltiumLayer(36);
    pub const TOP_SOLDER: AltiumLayer = AltiumLayer(37);
    pub const BOTTOM_SOLDER: AltiumLayer = AltiumLayer(38);

    pub const INTERNAL_PLANE_1: AltiumLayer = AltiumLayer(39);
    pub const INTERNAL_PLANE_16: AltiumLayer = AltiumLayer(54);

    pub const DRILL_GUIDE: AltiumLayer = AltiumLayer(55);
    pub const KEEP_OUT_LAYER: AltiumLayer = AltiumLayer(56);

    pub const MECHANICAL_1: AltiumLayer = AltiumLayer(57);
    pub const MECHANICAL_16: AltiumLayer = AltiumLayer(72);

    pub const DRILL_DRAWING: AltiumLayer = AltiumLayer(73);
    pub const MULTI_LAYER: AltiumLayer = AltiumLayer(74);
    pub const CONNECTIONS: AltiumLayer = AltiumLayer(75);
    pub const BACKGROUND: AltiumLayer = AltiumLayer(76);
    pub const DRC_ERROR_MARKERS: AltiumLayer = AltiumLayer(77);
    pub const SELECTIONS: AltiumLayer = AltiumLayer(78);
    pub const VISIBLE_GRID_1: AltiumLayer = AltiumLayer(79);
    pub const VISIBLE_GRID_2: AltiumLayer = AltiumLayer(80);
    pub const PAD_HOLES: AltiumLayer = AltiumLayer(81);
    pub const VIA_HOLES: AltiumLayer = AltiumLayer(82);

    /// Inner signal layer `n` (1..=30).
    pub const fn mid(n: u8) -> Self {
        AltiumLayer(Self::MID_LAYER_1.0 + n - 1)
    }

    /// Internal plane `n` (1..=16).
    pub const fn plane(n: u8) -> Self {
        AltiumLayer(Self::INTERNAL_PLANE_1.0 + n - 1)
    }

    /// Mechanical layer `n` (1..=16).
    pub const fn mechanical(n: u8) -> Self {
        AltiumLayer(Self::MECHANICAL_1.0 + n - 1)
    }

    /// Signal layers: top, mid 1-30 and bottom.
    pub fn is_copper(&self) -> bool {
        (Self::TOP_LAYER.0..=Self::BOTTOM_LAYER.0).contains(&self.0)
    }

    pub fn is_internal_plane(&self) -> bool {
        (Self::INTERNAL_PLANE_1.0..=Self::INTERNAL_PLANE_16.0).contains(&self.0)
    }

    pub fn is_mechanical(&self) -> bool {
        (Self::MECHANICAL_1.0..=Self::MECHANICAL_16.0).contains(&self.0)
    }

    /// Resolve a layer name as used in property records. Unknown names map
    /// to [`AltiumLayer::UNKNOWN`].
    pub fn from_name(name: &str) -> Self {
        let fixed = match name {
            "TOP" => Some(Self::TOP_LAYER),
            "BOTTOM" => Some(Self::BOTTOM_LAYER),
            "TOPOVERLAY" => Some(Self::TOP_OVERLAY),
            "BOTTOMOVERLAY" => Some(Self::BOTTOM_OVERLAY),
            "TOPPASTE" => Some(Self::TOP_PASTE),
            "BOTTOMPASTE" => Some(Self::BOTTOM_PASTE),
            "TOPSOLDER" => Some(Self::TOP_SOLDER),
            "BOTTOMSOLDER" => Some(Self::BOTTOM_SOLDER),
            "DRILLGUIDE" => Some(Self::DRILL_GUIDE),
            "KEEPOUT" => Some(Self::KEEP_OUT_LAYER),
            "DRILLDRAWING" => Some(Self::DRILL_DRAWING),
            "MULTILAYER" => Some(Self::MULTI_LAYER),
            "CONNECTIONS" => Some(Self::CONNECTIONS),
            "BACKGROUND" => Some(Self::BACKGROUND),
            "DRCERRORMARKERS" => Some(Self::DRC_ERROR_MARKERS),
            "SELECTIONS" => Some(Self::SELECTIONS),
            "VISIBLEGRID1" => Some(Self::VISIBLE_GRID_1),
            "VISIBLEGRID2" => Some(Self::VISIBLE_GRID_2),
            "PADHOLES" => Some(Self::PAD_HOLES),
            "VIAHOLES" => Some(Self::VIA_HOLES),
            _ => None,
        };
        if let Some(layer) = fixed {
            return layer;
        }

        let numbered = |prefix: &str, max: u8| -> Option<u8> {
            name.strip_prefix(prefix)?
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=max).contains(n))
        };

        if let Some(n) = numbered("MID", 30) {
            Self::mid(n)
        } else if let Some(n) = numbered("PLANE", 16) {
            Self::plane(n)
        } else if let Some(n) = numbered("MECHANICAL", 16) {
            Self::mechanical(n)
        } else {
            trace!("Unknown mapping of the Altium layer '{}'.", name);
            Self::UNKNOWN
        }
    }

    /// Property-record name of the layer, if it has one.
    pub fn name(&self) -> Option<String> {
        let fixed = match *self {
            Self::TOP_LAYER => "TOP",
            Self::BOTTOM_LAYER => "BOTTOM",
            Self::TOP_OVERLAY => "TOPOVERLAY",
            Self::BOTTOM_OVERLAY => "BOTTOMOVERLAY",
            Self::TOP_PASTE => "TOPPASTE",
            Self::BOTTOM_PASTE => "BOTTOMPASTE",
            Self::TOP_SOLDER => "TOPSOLDER",
            Self::BOTTOM_SOLDER => "BOTTOMSOLDER",
            Self::DRILL_GUIDE => "DRILLGUIDE",
            Self::KEEP_OUT_LAYER => "KEEPOUT",
            Self::DRILL_DRAWING => "DRILLDRAWING",
            Self::MULTI_LAYER => "MULTILAYER",
            Self::CONNECTIONS => "CONNECTIONS",
            Self::BACKGROUND => "BACKGROUND",
            Self::DRC_ERROR_MARKERS => "DRCERRORMARKERS",
            Self::SELECTIONS => "SELECTIONS",
            Self::VISIBLE_GRID_1 => "VISIBLEGRID1",
            Self::VISIBLE_GRID_2 => "VISIBLEGRID2",
            Self::PAD_HOLES => "PADHOLES",
            Self::VIA_HOLES => "VIAHOLES",
            layer if (Self::MID_LAYER_1..=Self::MID_LAYER_30).contains(&layer) => {
                return Some(format!("MID{}", layer.0 - Self::MID_LAYER_1.0 + 1));
            }
            layer if layer.is_internal_plane() => {
                return Some(format!("PLANE{}", layer.0 - Self::INTERNAL_PLANE_1.0 + 1));
            }
            layer if layer.is_mechanical() => {
                return Some(format!("MECHANICAL{}", layer.0 - Self::MECHANICAL_1.0 + 1));
            }
            _ => return None,
        };
        Some(fixed.to_string())
    }
}

impl From<u8> for AltiumLayer {
    fn from(value: u8) -> Self {
        AltiumLayer(value)
    }
}

impl fmt::Display for AltiumLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(&name),
            None => write!(f, "LAYER{}", self.0),
        }
    }
}
