#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, CAN_MODEL_URL, MACHINE_MODEL_URL};
use crate::core::{SceneConfig, SceneHost};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[derive(Clone, Copy)]
enum Asset {
    Machine,
    Can,
}

impl Asset {
    fn url(self) -> &'static str {
        match self {
            Asset::Machine => MACHINE_MODEL_URL,
            Asset::Can => CAN_MODEL_URL,
        }
    }
}

/// Fetch and parse one model, then hand it to the scene host. Failures are
/// logged and leave the dependent feature inert.
fn spawn_asset_load(asset: Asset, scene: Rc<RefCell<SceneHost>>, document: web::Document) {
    spawn_local(async move {
        let model = match assets::load_model(asset.url()).await {
            Ok(m) => m,
            Err(e) => {
                log::error!("[assets] failed to load {}: {:?}", asset.url(), e);
                return;
            }
        };
        match asset {
            Asset::Machine => {
                scene.borrow_mut().install_machine(model);
                // The bulb only appears once there is a scene to light
                events::wire_theme_toggle(&document, scene.clone());
            }
            Asset::Can => {
                scene.borrow_mut().install_can_template(model);
            }
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vending-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);
    overlay::hide(&document);

    let scene = Rc::new(RefCell::new(SceneHost::new(
        SceneConfig::default(),
        rand::random::<u64>(),
    )));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] rendering disabled; scene logic keeps running");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene: scene.clone(),
        canvas: canvas.clone(),
        document: document.clone(),
        gpu,
    }));
    frame::start_loop(frame_ctx);

    spawn_asset_load(Asset::Machine, scene.clone(), document.clone());
    spawn_asset_load(Asset::Can, scene, document);
    Ok(())
}
