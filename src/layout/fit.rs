use crate::foundation::core::Rect;

/// Fraction of each canvas axis the subject may occupy.
pub const SUBJECT_MAX_FRACTION: f64 = 0.8;

/// Subject box in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Scale an image down (never up) into 80% of the canvas and center it.
///
/// The clamp runs width-first, then height using the already-scaled height. When both axes
/// overflow this can leave the width below its bound; that order is kept as-is.
pub fn fit(
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Placement {
    let max_width = canvas_width * SUBJECT_MAX_FRACTION;
    let max_height = canvas_height * SUBJECT_MAX_FRACTION;

    let mut width = image_width;
    let mut height = image_height;

    if width > max_width {
        let ratio = max_width / width;
        width = max_width;
        height *= ratio;
    }

    if height > max_height {
        let ratio = max_height / height;
        height = max_height;
        width *= ratio;
    }

    Placement {
        x: (canvas_width - width) / 2.0,
        y: (canvas_height - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
