//! GPU textures decoded from image files.

use std::path::Path;

use crate::error::Error;
use crate::gpu::GpuContext;

/// Converts one sRGB-encoded channel to linear.
///
/// The surface and texture formats are sRGB, so colors that should *display*
/// at a given sRGB value (the clear color, the roof's vertex color) have to
/// be written in linear terms.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// A GPU texture with its view and sampling parameters.
///
/// Sampler parameters are applied per texture at creation, never through
/// shared state, so each texture's wrap modes are exactly what its creator
/// asked for.
#[derive(Debug)]
pub struct Texture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Creates a texture from raw RGBA pixels with the given wrap modes.
    ///
    /// Min and mag filtering are nearest, keeping texel edges crisp.
    pub fn from_rgba(
        gpu: &GpuContext,
        data: &[u8],
        width: u32,
        height: u32,
        wrap_u: wgpu::AddressMode,
        wrap_v: wgpu::AddressMode,
        label: &str,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{label} Sampler")),
            address_mode_u: wrap_u,
            address_mode_v: wrap_v,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Decodes an image file and uploads it.
    ///
    /// The decoded pixels (typically 3-channel RGB from a JPEG) are expanded
    /// to RGBA for upload and released immediately afterwards. Failure to
    /// read or decode is fatal at startup.
    pub fn from_file(
        gpu: &GpuContext,
        path: impl AsRef<Path>,
        wrap_u: wgpu::AddressMode,
        wrap_v: wgpu::AddressMode,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| Error::TextureDecode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        log::info!("loaded texture {} ({width}x{height})", path.display());
        Ok(Self::from_rgba(
            gpu,
            &img,
            width,
            height,
            wrap_u,
            wrap_v,
            &path.display().to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_conversion_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn srgb_conversion_of_sky_blue() {
        // 0.678 sRGB is the sky clear color; its linear value is what the
        // render pass must clear with for the display to read back ~173.
        let linear = srgb_to_linear(0.678);
        assert!((linear - 0.4173).abs() < 1e-3);
    }
}
