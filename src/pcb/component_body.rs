//! 3D body placement of a component (`ComponentBodies6`).

use super::{check_parsed, expect_tag, read_record_properties, RecordTag};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::{Vector3, Vector3I};

const STREAM: &str = "ComponentBodies6";

/// Links a component to a 3D model from the `Models` stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentBody {
    pub component: u16,
    pub model_name: String,
    /// Matches [`Model::id`](super::Model::id).
    pub model_id: String,
    pub model_is_embedded: bool,
    /// X/Y offset on the board plane and Z standoff, in nanometres.
    pub model_position: Vector3I,
    /// Rotation around each axis in degrees.
    pub model_rotation: Vector3,
    pub rotation: f64,
    pub body_opacity: f64,
}

impl ComponentBody {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        expect_tag(reader, RecordTag::Model, STREAM)?;

        reader.begin_subrecord();
        reader.skip(7);
        let component = reader.read_u16();
        reader.skip(9);

        let props = read_record_properties(reader, STREAM)?;
        let body = ComponentBody {
            component,
            model_name: props.read_string("MODEL.NAME", ""),
            model_id: props.read_string("MODELID", ""),
            model_is_embedded: props.read_bool("MODEL.EMBED", false),
            model_position: Vector3I::new(
                props.read_kicad_unit("MODEL.2D.X", "0mil"),
                -props.read_kicad_unit("MODEL.2D.Y", "0mil"),
                props.read_kicad_unit("MODEL.3D.DZ", "0mil"),
            ),
            model_rotation: Vector3::new(
                props.read_double("MODEL.3D.ROTX", 0.0),
                props.read_double("MODEL.3D.ROTY", 0.0),
                props.read_double("MODEL.3D.ROTZ", 0.0),
            ),
            rotation: props.read_double("MODEL.2D.ROTATION", 0.0),
            body_opacity: props.read_double("BODYOPACITY3D", 1.0),
        };

        reader.skip_subrecord();
        check_parsed(reader, STREAM)?;
        Ok(body)
    }
}
