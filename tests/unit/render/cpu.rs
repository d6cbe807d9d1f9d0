use super::*;
use crate::foundation::core::Canvas;

#[test]
fn premul_over_opaque_and_clear_sources() {
    assert_eq!(premul_over_px([1, 2, 3, 255], [0, 0, 0, 0]), [1, 2, 3, 255]);
    assert_eq!(premul_over_px([1, 2, 3, 255], [9, 8, 7, 255]), [9, 8, 7, 255]);
}

#[test]
fn premul_over_half_alpha_on_opaque_white() {
    // 50% red over white.
    let out = premul_over_px([255, 255, 255, 255], [128, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 255);
    assert_eq!(out[1], 127);
    assert_eq!(out[2], 127);
}

#[test]
fn premul_over_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(premul_over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn pixmap_from_bytes_checks_length() {
    assert!(pixmap_from_premul_bytes(&[0u8; 4], 2, 1).is_err());
    let pm = pixmap_from_premul_bytes(&[1, 2, 3, 255, 4, 5, 6, 255], 2, 1).unwrap();
    assert_eq!((pm.width(), pm.height()), (2, 1));
    assert_eq!(pm.data_as_u8_slice(), &[1, 2, 3, 255, 4, 5, 6, 255]);
}

#[test]
fn paint_over_fills_rect_and_keeps_outside() {
    let mut surface = RasterSurface::new(Canvas {
        width: 8,
        height: 8,
    });
    let mut painter = CpuPainter::new();
    painter
        .paint_over(&mut surface, |ctx| {
            ctx.set_paint(cpu_color(Rgba8::rgb(255, 0, 0)));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 8.0));
            Ok(())
        })
        .unwrap();
    assert_eq!(surface.pixel(1, 1), [255, 0, 0, 255]);
    assert_eq!(surface.pixel(6, 1), [0, 0, 0, 0]);
}

#[test]
fn draw_image_stretches_into_destination() {
    let mut surface = RasterSurface::new(Canvas {
        width: 10,
        height: 10,
    });
    let image = LoadedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 0, 255, 255]),
        origin_clean: true,
    };
    let mut painter = CpuPainter::new();
    painter
        .draw_image(&mut surface, &image, Rect::new(2.0, 2.0, 8.0, 8.0))
        .unwrap();
    assert_eq!(surface.pixel(5, 5), [0, 0, 255, 255]);
    assert_eq!(surface.pixel(0, 0), [0, 0, 0, 0]);
    assert!(surface.is_origin_clean());
}

#[test]
fn drawing_a_tainted_image_taints_the_surface() {
    let mut surface = RasterSurface::new(Canvas {
        width: 4,
        height: 4,
    });
    let image = LoadedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 255, 0, 255]),
        origin_clean: false,
    };
    CpuPainter::new()
        .draw_image(&mut surface, &image, Rect::new(0.0, 0.0, 4.0, 4.0))
        .unwrap();
    assert!(!surface.is_origin_clean());
}
