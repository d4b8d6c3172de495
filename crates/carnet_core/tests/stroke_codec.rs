use carnet_core::{
    deserialize_strokes, serialize_strokes, Brush, BrushFamily, Color, CustomBrushCatalog,
    StockBrush, Stroke, StrokeInput, StrokeInputBatch,
};

fn inputs() -> StrokeInputBatch {
    StrokeInputBatch::new(vec![
        StrokeInput::new(0.5, 1.5, 0.25, 0),
        StrokeInput::new(2.5, 3.5, 0.75, 8),
        StrokeInput::new(4.5, 5.5, 1.0, 17),
    ])
}

fn exact_color() -> Color {
    // Channels quantize to 16 bits on packing; round-tripping through the
    // packed form keeps the comparison exact.
    Color::from_packed(Color::new(0.2, 0.4, 0.6, 1.0).to_packed())
}

#[test]
fn stock_brush_strokes_round_trip_exactly() {
    let strokes: Vec<Stroke> = [
        StockBrush::Marker,
        StockBrush::PressurePen,
        StockBrush::Highlighter,
        StockBrush::DashedLine,
    ]
    .into_iter()
    .map(|stock| {
        Stroke::new(
            Brush::new(BrushFamily::Stock(stock), exact_color(), 7.5, 0.1),
            inputs(),
        )
    })
    .collect();

    let blob = serialize_strokes(&strokes).unwrap();
    let decoded = deserialize_strokes(&blob, &[]).unwrap();
    assert_eq!(decoded, strokes);
}

#[test]
fn custom_family_round_trips_when_the_catalog_has_it() {
    let catalog = CustomBrushCatalog::new();
    let family = catalog.find_family("wet-paint").unwrap().clone();
    let stroke = Stroke::new(
        Brush::new(
            BrushFamily::Custom(family.clone()),
            exact_color(),
            12.0,
            0.2,
        ),
        inputs(),
    );

    let blob = serialize_strokes(std::slice::from_ref(&stroke)).unwrap();
    let decoded = deserialize_strokes(&blob, catalog.get()).unwrap();
    assert_eq!(decoded[0].brush.family, BrushFamily::Custom(family));
    assert_eq!(decoded[0], stroke);
}

#[test]
fn custom_family_falls_back_to_marker_without_a_catalog_entry() {
    let catalog = CustomBrushCatalog::new();
    let family = catalog.find_family("wet-paint").unwrap().clone();
    let stroke = Stroke::new(
        Brush::new(BrushFamily::Custom(family), exact_color(), 12.0, 0.2),
        inputs(),
    );

    let blob = serialize_strokes(std::slice::from_ref(&stroke)).unwrap();
    let decoded = deserialize_strokes(&blob, &[]).unwrap();

    assert_eq!(
        decoded[0].brush.family,
        BrushFamily::Stock(StockBrush::Marker)
    );
    // Geometry and scalar brush attributes survive the fallback.
    assert_eq!(decoded[0].inputs, stroke.inputs);
    assert_eq!(decoded[0].brush.size, stroke.brush.size);
    assert_eq!(decoded[0].brush.epsilon, stroke.brush.epsilon);
    assert_eq!(decoded[0].brush.color, stroke.brush.color);
}

#[test]
fn empty_stroke_list_round_trips() {
    let blob = serialize_strokes(&[]).unwrap();
    assert!(deserialize_strokes(&blob, &[]).unwrap().is_empty());
}

#[test]
fn malformed_blobs_are_rejected() {
    assert!(deserialize_strokes("not json", &[]).is_err());
    // An array of records that are themselves malformed fails too.
    assert!(deserialize_strokes("[\"{}\"]", &[]).is_err());
}
