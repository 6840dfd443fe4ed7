use super::helpers;
use wgpu;

/// Depth attachments used by the frame.
///
/// - `depth_*` matches the surface size and is recreated on resize.
/// - `shadow_*` is the square light-space depth map, sampled with a
///   comparison sampler in the main pass. Its size never changes.
pub(crate) struct RenderTargets {
    #[allow(dead_code)]
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) shadow_tex: wgpu::Texture,
    pub(crate) shadow_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32, shadow_size: u32) -> Self {
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, "depth", width, height);
        let (shadow_tex, shadow_view) =
            helpers::create_depth_texture(device, "shadow_map", shadow_size, shadow_size);
        Self {
            depth_tex,
            depth_view,
            shadow_tex,
            shadow_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.depth_tex, self.depth_view) =
            helpers::create_depth_texture(device, "depth", width, height);
    }

    pub(crate) fn shadow_size(&self) -> u32 {
        self.shadow_tex.width()
    }
}
