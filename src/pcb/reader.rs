//! Board reader: decodes every known stream of a `.PcbDoc` file.

use std::path::Path;

use log::debug;

use super::{
    read_stream, read_wide_strings, Arc, Board, Class, Component, ComponentBody, Dimension,
    ExtendedPrimitiveInformation, Fill, Model, Net, Pad, PcbStream, Polygon, Region, Rule, Text,
    Track, Via,
};
use crate::error::Result;
use crate::io::altium::{ReaderConfiguration, WideStringTable};
use crate::io::cfb::CompoundFile;
use crate::notification::NotificationCollection;

/// Decoded records of a board, one list per stream in file order.
/// Records refer to each other by index into these lists.
#[derive(Debug, Clone, Default)]
pub struct PcbDocument {
    pub board: Option<Board>,
    pub classes: Vec<Class>,
    pub components: Vec<Component>,
    pub component_bodies: Vec<ComponentBody>,
    pub dimensions: Vec<Dimension>,
    pub extended_primitive_information: Vec<ExtendedPrimitiveInformation>,
    pub models: Vec<Model>,
    pub nets: Vec<Net>,
    pub polygons: Vec<Polygon>,
    pub rules: Vec<Rule>,
    pub arcs: Vec<Arc>,
    pub pads: Vec<Pad>,
    pub vias: Vec<Via>,
    pub tracks: Vec<Track>,
    pub texts: Vec<Text>,
    pub fills: Vec<Fill>,
    pub regions: Vec<Region>,
    pub shape_based_regions: Vec<Region>,
    pub wide_strings: WideStringTable,
    /// Records skipped in failsafe mode and other anomalies.
    pub notifications: NotificationCollection,
}

/// Reads a `.PcbDoc` compound file.
#[derive(Debug)]
pub struct PcbReader {
    file: CompoundFile,
    config: ReaderConfiguration,
}

impl PcbReader {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(CompoundFile::from_file(path)?))
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self::new(CompoundFile::from_bytes(data)?))
    }

    pub fn new(file: CompoundFile) -> Self {
        Self {
            file,
            config: ReaderConfiguration::default(),
        }
    }

    pub fn with_config(mut self, config: ReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// The underlying container, e.g. for embedded model streams.
    pub fn file(&self) -> &CompoundFile {
        &self.file
    }

    pub fn read(&self) -> Result<PcbDocument> {
        let file = &self.file;
        let config = &self.config;
        let mut doc = PcbDocument {
            wide_strings: read_wide_strings(file)?,
            ..Default::default()
        };
        let notes = &mut doc.notifications;

        doc.board = read_stream(file, PcbStream::Board, config, notes, Board::read)?
            .into_iter()
            .next();
        doc.classes = read_stream(file, PcbStream::Classes, config, notes, Class::read)?;
        doc.components = read_stream(file, PcbStream::Components, config, notes, Component::read)?;
        doc.component_bodies = read_stream(
            file,
            PcbStream::ComponentBodies,
            config,
            notes,
            ComponentBody::read,
        )?;
        doc.dimensions = read_stream(file, PcbStream::Dimensions, config, notes, Dimension::read)?;
        doc.extended_primitive_information = read_stream(
            file,
            PcbStream::ExtendedPrimitiveInformation,
            config,
            notes,
            ExtendedPrimitiveInformation::read,
        )?;
        doc.models = read_stream(file, PcbStream::Models, config, notes, Model::read)?;
        doc.nets = read_stream(file, PcbStream::Nets, config, notes, Net::read)?;
        doc.polygons = read_stream(file, PcbStream::Polygons, config, notes, Polygon::read)?;
        doc.rules = read_stream(file, PcbStream::Rules, config, notes, Rule::read)?;

        doc.arcs = read_stream(file, PcbStream::Arcs, config, notes, Arc::read)?;
        doc.pads = read_stream(file, PcbStream::Pads, config, notes, Pad::read)?;
        doc.vias = read_stream(file, PcbStream::Vias, config, notes, Via::read)?;
        doc.tracks = read_stream(file, PcbStream::Tracks, config, notes, Track::read)?;
        let wide_strings = &doc.wide_strings;
        doc.texts = read_stream(file, PcbStream::Texts, config, notes, |r| {
            Text::read(r, wide_strings)
        })?;
        doc.fills = read_stream(file, PcbStream::Fills, config, notes, Fill::read)?;
        doc.regions = read_stream(file, PcbStream::Regions, config, notes, |r| {
            Region::read(r, false)
        })?;
        doc.shape_based_regions =
            read_stream(file, PcbStream::ShapeBasedRegions, config, notes, |r| {
                Region::read(r, true)
            })?;

        debug!(
            "board read: {} components, {} pads, {} tracks, {} notifications",
            doc.components.len(),
            doc.pads.len(),
            doc.tracks.len(),
            notes.len()
        );
        Ok(doc)
    }
}
