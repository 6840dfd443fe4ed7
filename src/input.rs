use glam::Vec2;
use web_sys as web;

/// Pointer position relative to the canvas, in 0..1 with v pointing down.
#[inline]
pub fn pointer_canvas_uv(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    canvas_uv(x_css, y_css, rect.width() as f32, rect.height() as f32)
}

/// CSS pixel offset inside a `w` by `h` box to clamped UV. Degenerate boxes
/// map to the center.
#[inline]
pub fn canvas_uv(x_css: f32, y_css: f32, w: f32, h: f32) -> [f32; 2] {
    if w > 0.0 && h > 0.0 {
        let u = (x_css / w).clamp(0.0, 1.0);
        let v = (y_css / h).clamp(0.0, 1.0);
        [u, v]
    } else {
        [0.5, 0.5]
    }
}

/// Canvas UV to normalized device coordinates (x right, y up).
#[inline]
pub fn uv_to_ndc(uv: [f32; 2]) -> Vec2 {
    Vec2::new(uv[0] * 2.0 - 1.0, 1.0 - uv[1] * 2.0)
}

#[inline]
pub fn cursor_for_hover(hovering: bool) -> &'static str {
    if hovering {
        crate::constants::CURSOR_HOVER
    } else {
        crate::constants::CURSOR_DEFAULT
    }
}
