use super::*;

const OPAQUE_WHITE: [u8; 4] = [255, 255, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn accent_px() -> [u8; 4] {
    Rgba8::ACCENT.to_array()
}

#[test]
fn geometry_for_product_canvas() {
    let g = placeholder_geometry(Canvas::DEFAULT);
    assert_eq!(g.diameter, 160.0);
    assert_eq!(g.center, Point::new(300.0, 200.0));
    assert_eq!(g.label_baselines(), (190.0, 230.0));
}

#[test]
fn geometry_uses_smaller_edge() {
    let g = placeholder_geometry(Canvas {
        width: 300,
        height: 900,
    });
    assert_eq!(g.diameter, 120.0);
    assert_eq!(g.center, Point::new(150.0, 450.0));
}

#[test]
fn placeholder_draws_disc_ring_and_labels() {
    let s = render_placeholder(Canvas::DEFAULT, Rgba8::ACCENT).unwrap();
    // Ring straddles radius 80.
    assert_eq!(s.pixel(300, 118), accent_px());
    assert_eq!(s.pixel(381, 200), accent_px());
    // Disc interior clear of labels is white.
    assert_eq!(s.pixel(370, 200), OPAQUE_WHITE);
    assert_eq!(s.pixel(230, 200), OPAQUE_WHITE);
    // Outside the ring nothing is drawn.
    assert_eq!(s.pixel(390, 200), CLEAR);
    assert_eq!(s.pixel(300, 110), CLEAR);
    assert_eq!(s.pixel(0, 0), CLEAR);

    let label_ink = (171..196)
        .flat_map(|y| (264..336).map(move |x| (x, y)))
        .filter(|&(x, y)| s.pixel(x, y) == accent_px())
        .count();
    assert!(label_ink > 50, "top label ink {label_ink}");
}

#[test]
fn placeholder_follows_accent() {
    let red = Rgba8::rgb(200, 10, 10);
    let s = render_placeholder(Canvas::DEFAULT, red).unwrap();
    assert_eq!(s.pixel(300, 118), red.to_array());
}

#[test]
fn placeholder_is_reproducible() {
    let a = render_placeholder(Canvas::new(640, 480).unwrap(), Rgba8::ACCENT).unwrap();
    let b = render_placeholder(Canvas::new(640, 480).unwrap(), Rgba8::ACCENT).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a, b);
}

#[test]
fn sample_subject_is_a_200px_badge() {
    let png = sample_subject_png().unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (200, 200));
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_eq!(img.get_pixel(160, 100).0, OPAQUE_WHITE);
    assert_eq!(img.get_pixel(100, 18).0, accent_px());
    assert_eq!(sample_subject_png().unwrap(), png);
}
