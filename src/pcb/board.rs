//! Board settings, layer stack and outline (`Board6`).

use std::collections::HashSet;

use super::vertex::Vertex;
use super::{check_parsed, read_record_properties};
use crate::error::Result;
use crate::io::altium::BinaryReader;
use crate::types::Vector2I;

const STREAM: &str = "Board6";

/// One entry of the layer stack. `next_id`/`prev_id` chain the stack in
/// physical order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardLayer {
    /// Unique within the board; duplicates get a ` 2`, ` 3`, ... suffix.
    pub name: String,
    pub next_id: i32,
    pub prev_id: i32,
    pub copper_thickness: i32,
    pub dielectric_constant: f64,
    pub dielectric_thickness: i32,
    pub dielectric_material: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    pub sheet_position: Vector2I,
    pub sheet_size: Vector2I,
    pub layer_count: i32,
    pub stackup: Vec<BoardLayer>,
    pub board_vertices: Vec<Vertex>,
}

impl Board {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let props = read_record_properties(reader, STREAM)?;

        let mut board = Board {
            sheet_position: Vector2I::new(
                props.read_kicad_unit("SHEETX", "0mil"),
                -props.read_kicad_unit("SHEETY", "0mil"),
            ),
            sheet_size: Vector2I::new(
                props.read_kicad_unit("SHEETWIDTH", "0mil"),
                props.read_kicad_unit("SHEETHEIGHT", "0mil"),
            ),
            layer_count: props.read_int("LAYERSETSCOUNT", 1) + 1,
            ..Default::default()
        };

        let mut names = HashSet::new();
        for i in 1.. {
            let layer = format!("LAYER{}", i);
            let name_key = format!("{}NAME", layer);
            if !props.contains_key(&name_key) {
                break;
            }

            let original = props.read_string(&name_key, "");
            let mut name = original.clone();
            let mut suffix = 2;
            while !names.insert(name.clone()) {
                name = format!("{} {}", original, suffix);
                suffix += 1;
            }

            board.stackup.push(BoardLayer {
                name,
                next_id: props.read_int(&format!("{}NEXT", layer), 0),
                prev_id: props.read_int(&format!("{}PREV", layer), 0),
                copper_thickness: props.read_kicad_unit(&format!("{}COPTHICK", layer), "1.4mil"),
                dielectric_constant: props.read_double(&format!("{}DIELCONST", layer), 0.0),
                dielectric_thickness: props.read_kicad_unit(&format!("{}DIELHEIGHT", layer), "60mil"),
                dielectric_material: props.read_string(&format!("{}DIELMATERIAL", layer), "FR-4"),
            });
        }

        board.board_vertices = Vertex::read_list(&props);

        check_parsed(reader, STREAM)?;
        Ok(board)
    }
}
