//! Reader for the per-frame annotation files.
//!
//! Each frame has one XML document listing its objects:
//!
//! ```xml
//! <annotation>
//!   <object>
//!     <name>person</name>
//!     <bndbox><xmin>12</xmin><ymin>40</ymin><xmax>96</xmax><ymax>230</ymax></bndbox>
//!   </object>
//!   <unsure_object>
//!     <bndbox><xmin>400</xmin><ymin>10</ymin><xmax>420</xmax><ymax>60</ymax></bndbox>
//!   </unsure_object>
//! </annotation>
//! ```

use std::path::Path;
use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use crate::common::{BvrBox, GroundTruthBox};
use crate::error::ValidationError;

pub const OBJECT_TAG: &[u8] = b"object";
pub const UNSURE_OBJECT_TAG: &[u8] = b"unsure_object";
const BNDBOX_TAG: &[u8] = b"bndbox";

#[derive(Debug, Clone, Copy)]
enum Coord {
    XMin,
    YMin,
    XMax,
    YMax,
}

impl Coord {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"xmin" => Some(Coord::XMin),
            b"ymin" => Some(Coord::YMin),
            b"xmax" => Some(Coord::XMax),
            b"ymax" => Some(Coord::YMax),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Coord::XMin => "xmin",
            Coord::YMin => "ymin",
            Coord::XMax => "xmax",
            Coord::YMax => "ymax",
        }
    }
}

#[derive(Debug, Default)]
struct PendingObject {
    unsure: bool,
    in_bndbox: bool,
    seen_bndbox: bool,
    coords: [Option<f32>; 4],
}

impl PendingObject {
    fn new(unsure: bool) -> Self {
        Self { unsure, ..Default::default() }
    }

    fn finish(self, index: usize) -> Result<GroundTruthBox> {
        let mut values = [0f32; 4];
        for (slot, coord) in [Coord::XMin, Coord::YMin, Coord::XMax, Coord::YMax].into_iter().enumerate() {
            values[slot] = match self.coords[slot] {
                Some(v) => v,
                None => bail!("object #{} has no <{}>", index, coord.name()),
            };
        }
        let [x1, y1, x2, y2] = values;
        Ok(GroundTruthBox::new(BvrBox::default().with_x1y1_x2y2(x1, y1, x2, y2), self.unsure))
    }
}

/// Parses one annotation document. Both `<object>` and `<unsure_object>` entries are returned;
/// the latter carry `unsure = true`.
pub fn parse_annotation_str(xml: &str) -> Result<Vec<GroundTruthBox>> {
    let mut reader = Reader::from_str(xml);

    let mut boxes = Vec::new();
    let mut current: Option<PendingObject> = None;
    let mut coord: Option<Coord> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match name.as_ref() {
                    OBJECT_TAG => current = Some(PendingObject::new(false)),
                    UNSURE_OBJECT_TAG => current = Some(PendingObject::new(true)),
                    BNDBOX_TAG => {
                        // Only the first box of an object counts, nested part boxes are skipped.
                        if let Some(obj) = current.as_mut() {
                            obj.in_bndbox = !obj.seen_bndbox;
                            obj.seen_bndbox = true;
                        }
                    }
                    tag => {
                        if current.as_ref().is_some_and(|obj| obj.in_bndbox) {
                            coord = Coord::from_tag(tag);
                        }
                    }
                }
            }
            Ok(Event::Text(ref t)) => {
                if let (Some(obj), Some(c)) = (current.as_mut(), coord) {
                    let text = t.unescape().context("Failed to decode coordinate text")?;
                    let value = text.trim().parse::<f32>()
                        .with_context(|| format!("Failed to parse {} coordinate: {}", c.name(), text.trim()))?;
                    obj.coords[c as usize] = Some(value);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match name.as_ref() {
                    OBJECT_TAG | UNSURE_OBJECT_TAG => {
                        if let Some(obj) = current.take() {
                            boxes.push(obj.finish(boxes.len())?);
                        }
                    }
                    BNDBOX_TAG => {
                        if let Some(obj) = current.as_mut() {
                            obj.in_bndbox = false;
                        }
                    }
                    _ => coord = None,
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!("Error parsing XML at position {}: {}", reader.buffer_position(), e),
            _ => {}
        }
    }

    if current.is_some() {
        bail!("unterminated object element");
    }

    Ok(boxes)
}

/// Reads and parses one annotation file.
///
/// Any read or parse failure is reported as [`ValidationError::MalformedAnnotation`].
pub fn parse_annotation(path: &Path) -> Result<Vec<GroundTruthBox>> {
    let xml = std::fs::read_to_string(path)
        .map_err(|e| ValidationError::MalformedAnnotation {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    parse_annotation_str(&xml).map_err(|e| {
        ValidationError::MalformedAnnotation {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        }
        .into()
    })
}
