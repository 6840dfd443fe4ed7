use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn set_cursor(canvas: &web::HtmlCanvasElement, cursor: &str) {
    let style = canvas.style();
    if style.get_property_value("cursor").ok().as_deref() != Some(cursor) {
        let _ = style.set_property("cursor", cursor);
    }
}

/// Append a fixed-position `<img>` to the body unless one with `id` exists.
pub fn append_image(
    document: &web::Document,
    id: &str,
    src: &str,
    style: &str,
) -> anyhow::Result<web::HtmlImageElement> {
    if let Some(existing) = document.get_element_by_id(id) {
        return existing
            .dyn_into::<web::HtmlImageElement>()
            .map_err(|e| anyhow::anyhow!("#{id} is not an image: {:?}", e));
    }
    let img: web::HtmlImageElement = document
        .create_element("img")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_id(id);
    img.set_src(src);
    img.set_alt("Toggle day/night");
    let _ = img.set_attribute("style", style);
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&img)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(img)
}
