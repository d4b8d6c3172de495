//! Stroke serialization codec.
//!
//! # Responsibility
//! - Convert strokes to/from the persisted JSON record wrapping the binary
//!   input-batch payload.
//! - Resolve brush identity against the custom catalog, then the stock
//!   enum, then the marker default.
//!
//! # Invariants
//! - Stock-brush round trips reproduce size, packed color, epsilon and
//!   family exactly.
//! - Custom-brush round trips preserve the family id; the family object is
//!   re-resolved from the catalog at decode time.
//! - Unknown/future stock-brush names decode to the marker default instead
//!   of failing.

use crate::brushes::catalog::CustomBrush;
use crate::ink::brush::{Brush, BrushFamily, Color, StockBrush};
use crate::ink::storage::{self, InkDecodeError};
use crate::ink::strokes::Stroke;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Codec failure: malformed JSON record or malformed binary payload.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    Inputs(InkDecodeError),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed stroke record: {err}"),
            Self::Inputs(err) => write!(f, "malformed stroke input payload: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Inputs(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<InkDecodeError> for CodecError {
    fn from(value: InkDecodeError) -> Self {
        Self::Inputs(value)
    }
}

/// Persisted form of one stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedStroke {
    /// Binary-encoded stroke input batch.
    pub inputs: Vec<u8>,
    pub brush: SerializedBrush,
}

/// Persisted brush attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedBrush {
    pub size: f32,
    /// Packed 64-bit ARGB color.
    pub color: i64,
    pub epsilon: f32,
    #[serde(rename = "stockBrush")]
    pub stock_brush: SerializedStockBrush,
    #[serde(rename = "clientBrushFamilyId", default)]
    pub client_brush_family_id: Option<String>,
}

/// Stock-brush classification on the wire.
///
/// Future writers may add names this reader does not know; those decode as
/// `Unknown` and resolve to the marker default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerializedStockBrush {
    MarkerLatest,
    PressurePenLatest,
    HighlighterLatest,
    DashedLineLatest,
    #[serde(other)]
    Unknown,
}

fn stock_to_wire(brush: StockBrush) -> SerializedStockBrush {
    match brush {
        StockBrush::Marker => SerializedStockBrush::MarkerLatest,
        StockBrush::PressurePen => SerializedStockBrush::PressurePenLatest,
        StockBrush::Highlighter => SerializedStockBrush::HighlighterLatest,
        StockBrush::DashedLine => SerializedStockBrush::DashedLineLatest,
    }
}

fn wire_to_stock(wire: SerializedStockBrush) -> StockBrush {
    match wire {
        SerializedStockBrush::MarkerLatest => StockBrush::Marker,
        SerializedStockBrush::PressurePenLatest => StockBrush::PressurePen,
        SerializedStockBrush::HighlighterLatest => StockBrush::Highlighter,
        SerializedStockBrush::DashedLineLatest => StockBrush::DashedLine,
        SerializedStockBrush::Unknown => StockBrush::Marker,
    }
}

fn serialize_brush(brush: &Brush) -> SerializedBrush {
    let stock_brush = match &brush.family {
        BrushFamily::Stock(stock) => stock_to_wire(*stock),
        // Custom families carry their id; the stock slot records the marker
        // fallback used when the catalog entry is gone at decode time.
        BrushFamily::Custom(_) => SerializedStockBrush::MarkerLatest,
    };

    SerializedBrush {
        size: brush.size,
        color: brush.color.to_packed(),
        epsilon: brush.epsilon,
        stock_brush,
        client_brush_family_id: brush
            .family
            .client_brush_family_id()
            .map(str::to_string),
    }
}

fn deserialize_brush(serialized: &SerializedBrush, catalog: &[CustomBrush]) -> Brush {
    let custom = serialized.client_brush_family_id.as_deref().and_then(|id| {
        catalog
            .iter()
            .find(|brush| brush.family.client_brush_family_id == id)
    });

    let family = match custom {
        Some(entry) => BrushFamily::Custom(entry.family.clone()),
        None => BrushFamily::Stock(wire_to_stock(serialized.stock_brush)),
    };

    Brush::new(
        family,
        Color::from_packed(serialized.color),
        serialized.size,
        serialized.epsilon,
    )
}

/// Serializes one stroke to its JSON record.
pub fn serialize_stroke(stroke: &Stroke) -> Result<String, CodecError> {
    let record = SerializedStroke {
        inputs: storage::encode_inputs(&stroke.inputs),
        brush: serialize_brush(&stroke.brush),
    };
    Ok(serde_json::to_string(&record)?)
}

/// Deserializes one stroke record, resolving the brush against `catalog`.
pub fn deserialize_stroke(record: &str, catalog: &[CustomBrush]) -> Result<Stroke, CodecError> {
    let serialized: SerializedStroke = serde_json::from_str(record)?;
    let inputs = storage::decode_inputs(&serialized.inputs)?;
    let brush = deserialize_brush(&serialized.brush, catalog);
    Ok(Stroke::new(brush, inputs))
}

/// Serializes a stroke list to the persisted blob: a JSON array of
/// per-stroke JSON records.
pub fn serialize_strokes(strokes: &[Stroke]) -> Result<String, CodecError> {
    let records = strokes
        .iter()
        .map(serialize_stroke)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string(&records)?)
}

/// Deserializes a persisted strokes blob.
pub fn deserialize_strokes(blob: &str, catalog: &[CustomBrush]) -> Result<Vec<Stroke>, CodecError> {
    let records: Vec<String> = serde_json::from_str(blob)?;
    records
        .iter()
        .map(|record| deserialize_stroke(record, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        deserialize_stroke, serialize_stroke, CodecError, SerializedStockBrush, SerializedStroke,
    };
    use crate::ink::brush::{Brush, BrushFamily, Color, StockBrush};
    use crate::ink::strokes::{Stroke, StrokeInput, StrokeInputBatch};

    fn pen_stroke() -> Stroke {
        let brush = Brush::new(
            BrushFamily::Stock(StockBrush::PressurePen),
            Color::from_packed(Color::GRAY.to_packed()),
            5.0,
            0.1,
        );
        let inputs = StrokeInputBatch::new(vec![
            StrokeInput::new(1.0, 2.0, 0.5, 0),
            StrokeInput::new(3.0, 4.0, 0.8, 12),
        ]);
        Stroke::new(brush, inputs)
    }

    #[test]
    fn stock_brush_stroke_round_trips() {
        let stroke = pen_stroke();
        let decoded = deserialize_stroke(&serialize_stroke(&stroke).unwrap(), &[]).unwrap();
        assert_eq!(decoded, stroke);
    }

    #[test]
    fn unknown_stock_name_decodes_to_marker() {
        let json = serialize_stroke(&pen_stroke()).unwrap();
        let patched = json.replace("PressurePenLatest", "NeonGlowV9");
        let decoded = deserialize_stroke(&patched, &[]).unwrap();
        assert_eq!(decoded.brush.family, BrushFamily::Stock(StockBrush::Marker));
    }

    #[test]
    fn corrupt_input_payload_surfaces_as_error() {
        let json = serialize_stroke(&pen_stroke()).unwrap();
        let mut record: SerializedStroke = serde_json::from_str(&json).unwrap();
        record.inputs.truncate(6);
        let corrupt = serde_json::to_string(&record).unwrap();
        assert!(matches!(
            deserialize_stroke(&corrupt, &[]),
            Err(CodecError::Inputs(_))
        ));
    }

    #[test]
    fn wire_enum_accepts_future_names() {
        let wire: SerializedStockBrush = serde_json::from_str("\"SprayCanV2\"").unwrap();
        assert_eq!(wire, SerializedStockBrush::Unknown);
    }
}
