//! WGPU binding type utilities

/// Uniform buffer bound with a dynamic offset, one `min_binding_size` slot per draw
pub fn dynamic_uniform(min_binding_size: u64) -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: true,
        min_binding_size: wgpu::BufferSize::new(min_binding_size),
    }
}

/// Single-entry layout for a dynamic uniform visible to both shader stages
pub fn dynamic_uniform_layout(
    device: &wgpu::Device,
    label: &str,
    min_binding_size: u64,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: dynamic_uniform(min_binding_size),
            count: None,
        }],
    })
}
