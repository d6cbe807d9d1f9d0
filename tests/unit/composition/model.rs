use super::*;
use serde_json::json;

#[test]
fn default_request_matches_product_defaults() {
    let req = RenderRequest::default();
    assert_eq!(req.canvas, Canvas::DEFAULT);
    assert!(req.subject.is_none());
    assert_eq!(
        req.background,
        Background::Color {
            color: Rgba8::ACCENT,
            opacity: 1.0
        }
    );
    req.validate().unwrap();
}

#[test]
fn parses_every_background_variant() {
    let color: Background =
        serde_json::from_value(json!({"type": "color", "color": "#ff0000", "opacity": 0.5}))
            .unwrap();
    assert_eq!(
        color,
        Background::Color {
            color: Rgba8::rgb(255, 0, 0),
            opacity: 0.5
        }
    );

    let gradient: Background = serde_json::from_value(json!({
        "type": "gradient",
        "kind": "radial",
        "stops": [
            {"color": "#000000", "position": 0},
            {"color": "#ffffff", "position": 100}
        ]
    }))
    .unwrap();
    let Background::Gradient(g) = gradient else {
        panic!("expected gradient");
    };
    assert_eq!(g.kind, GradientKind::Radial);
    assert_eq!(g.stops.len(), 2);

    let pattern: Background =
        serde_json::from_value(json!({"type": "pattern", "style": "dots", "color": "#123456"}))
            .unwrap();
    assert_eq!(pattern.kind_name(), "pattern");

    let image: Background =
        serde_json::from_value(json!({"type": "image", "source": "bg.png"})).unwrap();
    assert_eq!(
        image,
        Background::Image {
            source: ImageSource::Uri("bg.png".to_owned())
        }
    );
}

#[test]
fn request_json_defaults_canvas_and_subject() {
    let req = RenderRequest::from_json_str(
        r##"{ "background": { "type": "color", "color": "#6366f1" } }"##,
    )
    .unwrap();
    assert_eq!(req.canvas, Canvas::DEFAULT);
    assert!(req.subject.is_none());
    assert!(RenderRequest::from_json_str("{").is_err());
}

#[test]
fn gradient_validation_rejects_short_and_non_finite() {
    let one = GradientSpec::linear(0.0, vec![GradientStop::new(Rgba8::WHITE, 0.0)]);
    assert!(matches!(
        one.validate(),
        Err(ChromaError::InvalidGradient(_))
    ));

    let nan = GradientSpec::linear(
        0.0,
        vec![
            GradientStop::new(Rgba8::WHITE, 0.0),
            GradientStop::new(Rgba8::BLACK, f64::NAN),
        ],
    );
    assert!(matches!(
        nan.validate(),
        Err(ChromaError::InvalidGradient(_))
    ));

    let bad_angle = GradientSpec {
        angle: f64::INFINITY,
        ..GradientSpec::default()
    };
    assert!(bad_angle.validate().is_err());

    let radial_ignores_angle = GradientSpec {
        kind: GradientKind::Radial,
        angle: f64::INFINITY,
        ..GradientSpec::default()
    };
    radial_ignores_angle.validate().unwrap();
}

#[test]
fn unordered_and_out_of_range_positions_are_accepted() {
    let g = GradientSpec::linear(
        45.0,
        vec![
            GradientStop::new(Rgba8::WHITE, 150.0),
            GradientStop::new(Rgba8::BLACK, -20.0),
        ],
    );
    g.validate().unwrap();
    assert_eq!(g.stops[0].offset(), 1.5);
}

#[test]
fn request_validation_covers_canvas() {
    let req = RenderRequest::default().with_canvas(0, 400);
    assert!(matches!(req.validate(), Err(ChromaError::Validation(_))));
}
