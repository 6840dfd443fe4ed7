use crate::constants::NOTIFICATION_ID;
use crate::core::NotificationChange;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(NOTIFICATION_ID) {
        el.set_text_content(Some(text));
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "display:block");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(NOTIFICATION_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Mirror a banner transition reported by the scene host onto the page.
pub fn apply(document: &web::Document, change: NotificationChange, text: &str) {
    match change {
        NotificationChange::Show => show(document, text),
        NotificationChange::Hide => hide(document),
    }
}
