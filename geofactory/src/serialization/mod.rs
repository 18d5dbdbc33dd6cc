//! WKT and WKB reading and writing.

use std::sync::Arc;

use crate::error::ParseError;
use crate::factory::Factory;
use crate::geometry::Geometry;

mod reader;
mod writer;

use reader::GeometryBuilder;

pub(crate) fn parse_wkt(factory: &Arc<Factory>, text: &str) -> Result<Geometry, ParseError> {
    let mut builder = GeometryBuilder::new(factory);
    let outcome = geozero::wkt::read_wkt(&mut text.as_bytes(), &mut builder);
    builder.finish(outcome)
}

/// Reads binary WKB. Input consisting only of hex digits is decoded as hex encoded WKB first.
pub(crate) fn parse_wkb(factory: &Arc<Factory>, bytes: &[u8]) -> Result<Geometry, ParseError> {
    let trimmed = bytes.trim_ascii();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let decoded;
    let mut raw = if trimmed.iter().all(u8::is_ascii_hexdigit) {
        decoded = hex::decode(trimmed)?;
        decoded.as_slice()
    } else {
        bytes
    };

    let mut builder = GeometryBuilder::new(factory);
    let outcome = geozero::wkb::process_wkb_geom(&mut raw, &mut builder);
    builder.finish(outcome)
}
