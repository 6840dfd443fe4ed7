use crate::core::ModelData;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch a binary asset relative to the page.
pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    let buffer = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("{url}: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("{url}: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

pub async fn load_model(url: &str) -> anyhow::Result<ModelData> {
    let bytes = fetch_bytes(url).await?;
    log::info!("[assets] fetched {} ({} bytes)", url, bytes.len());
    let model = ModelData::from_glb(&bytes)?;
    Ok(model)
}
