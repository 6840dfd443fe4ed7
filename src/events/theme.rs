use crate::constants::{BULB_ID, BULB_IMAGE_URL, BULB_STYLE};
use crate::core::SceneHost;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Add the day/night bulb to the page and route its clicks to the scene.
///
/// Safe to call more than once; the bulb and its listener are only created
/// the first time.
pub fn wire_theme_toggle(document: &web::Document, scene: Rc<RefCell<SceneHost>>) {
    if document.get_element_by_id(BULB_ID).is_some() {
        return;
    }
    if let Err(e) = dom::append_image(document, BULB_ID, BULB_IMAGE_URL, BULB_STYLE) {
        log::error!("[theme] could not add toggle: {:?}", e);
        return;
    }
    dom::add_click_listener(document, BULB_ID, move || {
        scene.borrow_mut().toggle_theme();
    });
}
