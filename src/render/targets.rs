use super::helpers;
use wgpu;

/// Offscreen attachments sized to the swapchain.
///
/// Only a depth buffer is needed: the baked pass and the outline hull share it
/// so the hull stays behind the surface it outlines.
pub(crate) struct RenderTargets {
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, "depth", width, height);
        Self {
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.depth_tex, self.depth_view) =
            helpers::create_depth_texture(device, "depth", width, height);
    }
}
