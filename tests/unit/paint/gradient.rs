use super::*;
use crate::composition::model::GradientStop;
use crate::foundation::core::Rgba8;

const RED: Rgba8 = Rgba8::rgb(255, 0, 0);
const GREEN: Rgba8 = Rgba8::rgb(0, 255, 0);
const BLUE: Rgba8 = Rgba8::rgb(0, 0, 255);

fn px(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

fn close(a: [u8; 4], b: [u8; 4], tol: i32) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| (i32::from(x) - i32::from(y)).abs() <= tol)
}

fn render(spec: &GradientSpec, w: u32, h: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (w * h * 4) as usize];
    render_gradient(&mut buf, w, h, spec).unwrap();
    buf
}

fn palette(n: usize) -> Vec<GradientStop> {
    let colors = [RED, GREEN, BLUE, Rgba8::WHITE, Rgba8::BLACK];
    (0..n)
        .map(|i| GradientStop::new(colors[i], 100.0 * i as f64 / (n - 1) as f64))
        .collect()
}

#[test]
fn every_pixel_is_filled_for_two_to_five_stops() {
    for n in 2..=5 {
        for spec in [
            GradientSpec::linear(90.0, palette(n)),
            GradientSpec::linear(33.0, palette(n)),
            GradientSpec::radial(palette(n)),
        ] {
            let buf = render(&spec, 60, 40);
            assert!(
                buf.chunks_exact(4).all(|p| p[3] == 255),
                "gap with {n} stops, {:?}",
                spec.kind
            );
        }
    }
}

#[test]
fn stop_colors_land_at_their_offsets() {
    for n in 2..=5 {
        let spec = GradientSpec::linear(0.0, palette(n));
        let w = 200;
        let buf = render(&spec, w, 4);
        for stop in &spec.stops {
            let target = stop.color.to_premul().to_array();
            let x = (stop.offset() * f64::from(w)).round() as i64;
            let hit = (x - 1..=x + 1)
                .filter(|&x| x >= 0 && x < i64::from(w))
                .any(|x| close(px(&buf, w, x as u32, 2), target, 4));
            assert!(hit, "stop at {} not found with {n} stops", stop.position);
        }
    }
}

#[test]
fn linear_zero_degrees_runs_left_to_right() {
    let spec = GradientSpec::linear(
        0.0,
        vec![GradientStop::new(RED, 0.0), GradientStop::new(BLUE, 100.0)],
    );
    let buf = render(&spec, 100, 10);
    assert!(close(px(&buf, 100, 0, 5), [255, 0, 0, 255], 3));
    assert!(close(px(&buf, 100, 99, 5), [0, 0, 255, 255], 3));
    // Constant along each column.
    assert_eq!(px(&buf, 100, 40, 0), px(&buf, 100, 40, 9));
}

#[test]
fn linear_ninety_degrees_runs_top_to_bottom() {
    let spec = GradientSpec::linear(
        90.0,
        vec![GradientStop::new(RED, 0.0), GradientStop::new(BLUE, 100.0)],
    );
    let buf = render(&spec, 10, 100);
    assert!(close(px(&buf, 10, 5, 0), [255, 0, 0, 255], 3));
    assert!(close(px(&buf, 10, 5, 99), [0, 0, 255, 255], 3));
    assert_eq!(px(&buf, 10, 0, 30), px(&buf, 10, 9, 30));
}

#[test]
fn linear_angle_is_scaled_by_canvas_not_rotated() {
    // At 45 degrees on a 200x50 canvas the vector is (~141, ~35), so the far corner reaches
    // t = 1 while a true 45 degree axis would not.
    let spec = GradientSpec::linear(
        45.0,
        vec![GradientStop::new(RED, 0.0), GradientStop::new(BLUE, 100.0)],
    );
    let geometry = Geometry::new(&spec, 200, 50);
    let Geometry::Linear { dx, dy, .. } = geometry else {
        panic!("expected linear geometry");
    };
    assert!((dx - 200.0 * std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    assert!((dy - 50.0 * std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    assert!(geometry.offset_at(200.0, 50.0) > 1.0);
}

#[test]
fn radial_is_centered_with_half_max_extent() {
    let spec = GradientSpec::radial(vec![
        GradientStop::new(RED, 0.0),
        GradientStop::new(BLUE, 100.0),
    ]);
    let buf = render(&spec, 100, 60);
    assert!(close(px(&buf, 100, 50, 30), [255, 0, 0, 255], 6));
    // Corners sit beyond radius 50 and pad to the last color.
    assert_eq!(px(&buf, 100, 0, 0), [0, 0, 255, 255]);
    assert_eq!(px(&buf, 100, 99, 59), [0, 0, 255, 255]);
    // Symmetric about the center.
    assert_eq!(px(&buf, 100, 20, 30), px(&buf, 100, 79, 30));
}

#[test]
fn too_few_stops_fail_before_drawing() {
    let spec = GradientSpec::linear(0.0, vec![GradientStop::new(RED, 0.0)]);
    let mut buf = vec![7u8; 4 * 4 * 4];
    let err = render_gradient(&mut buf, 4, 4, &spec).unwrap_err();
    assert!(matches!(err, ChromaError::InvalidGradient(_)));
    assert!(buf.iter().all(|&b| b == 7));
}

#[test]
fn unordered_stops_pass_through_without_panicking() {
    let spec = GradientSpec::linear(
        0.0,
        vec![
            GradientStop::new(RED, 80.0),
            GradientStop::new(GREEN, 20.0),
            GradientStop::new(BLUE, 150.0),
        ],
    );
    let buf = render(&spec, 50, 2);
    assert!(buf.chunks_exact(4).all(|p| p[3] == 255));
    // Before the first offset the first color is used.
    assert_eq!(px(&buf, 50, 0, 0), [255, 0, 0, 255]);
}

#[test]
fn ramp_interpolates_between_neighbors() {
    let ramp = GradientRamp::from_spec(&GradientSpec::linear(
        0.0,
        vec![GradientStop::new(RED, 0.0), GradientStop::new(BLUE, 100.0)],
    ))
    .unwrap();
    assert_eq!(ramp.sample(-1.0), RED.to_premul());
    assert_eq!(ramp.sample(2.0), BLUE.to_premul());
    assert_eq!(ramp.sample(0.5).to_array(), [128, 0, 128, 255]);
    assert_eq!(ramp.sample(f64::NAN), RED.to_premul());
}

#[test]
fn target_size_mismatch_is_rejected() {
    let mut buf = vec![0u8; 10];
    assert!(render_gradient(&mut buf, 4, 4, &GradientSpec::default()).is_err());
}
