//! Outline vertices of polygons, regions and the board shape.

use crate::io::altium::PropertyMap;
use crate::types::Vector2I;

/// One outline point. Round vertices describe an arc around `center`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub is_round: bool,
    pub radius: i32,
    pub start_angle: f64,
    pub end_angle: f64,
    pub position: Vector2I,
    pub center: Vector2I,
}

impl Vertex {
    /// A straight-segment vertex.
    pub fn new(position: Vector2I) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Read vertices `VX0`/`VY0`, `VX1`/`VY1`, ... until one is missing.
    pub fn read_list(props: &PropertyMap) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for i in 0.. {
            let vx = format!("VX{}", i);
            let vy = format!("VY{}", i);
            if !props.contains_key(&vx) || !props.contains_key(&vy) {
                break;
            }
            vertices.push(Vertex {
                is_round: props.read_int(&format!("KIND{}", i), 0) != 0,
                radius: props.read_kicad_unit(&format!("R{}", i), "0mil"),
                start_angle: props.read_double(&format!("SA{}", i), 0.0),
                end_angle: props.read_double(&format!("EA{}", i), 0.0),
                position: Vector2I::new(
                    props.read_kicad_unit(&vx, "0mil"),
                    -props.read_kicad_unit(&vy, "0mil"),
                ),
                center: Vector2I::new(
                    props.read_kicad_unit(&format!("CX{}", i), "0mil"),
                    -props.read_kicad_unit(&format!("CY{}", i), "0mil"),
                ),
            });
        }
        vertices
    }
}
