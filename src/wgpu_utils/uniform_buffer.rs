use std::marker::PhantomData;

/// Uniform buffer holding one `Content` slot per draw call
///
/// Slots are spaced by the device's uniform offset alignment and selected
/// with a dynamic offset when binding.
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    stride: u64,
    capacity: usize,
    staging: Vec<u8>,
    content_type: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    fn name() -> &'static str {
        let type_name = std::any::type_name::<Content>();
        let pos = type_name.rfind(':').unwrap_or(0);
        if pos > 0 {
            &type_name[(pos + 1)..]
        } else {
            type_name
        }
    }

    /// Create a buffer with room for `capacity` slots
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let stride = slot_stride(std::mem::size_of::<Content>() as u64, alignment as u64);
        let capacity = capacity.max(1);

        DynamicUniformBuffer {
            buffer: Self::create_buffer(device, stride, capacity),
            stride,
            capacity,
            staging: Vec::new(),
            content_type: PhantomData,
        }
    }

    fn create_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("DynamicUniformBuffer: {}", Self::name())),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Grow the buffer to hold at least `count` slots.
    ///
    /// Returns true if the buffer was recreated, in which case bind groups
    /// referencing it have to be rebuilt.
    pub fn reserve(&mut self, device: &wgpu::Device, count: usize) -> bool {
        if count <= self.capacity {
            return false;
        }
        self.capacity = count.next_power_of_two();
        self.buffer = Self::create_buffer(device, self.stride, self.capacity);
        true
    }

    /// Upload `contents` into consecutive slots starting at slot 0
    pub fn write(&mut self, queue: &wgpu::Queue, contents: &[Content]) {
        if contents.is_empty() {
            return;
        }
        assert!(contents.len() <= self.capacity, "Data exceeds buffer capacity");

        self.staging.clear();
        self.staging.resize(self.stride as usize * contents.len(), 0);
        for (slot, content) in self.staging.chunks_mut(self.stride as usize).zip(contents) {
            let bytes = bytemuck::bytes_of(content);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);
    }

    /// Dynamic offset of `slot`
    pub fn offset(&self, slot: usize) -> u32 {
        (self.stride * slot as u64) as u32
    }

    /// Binding of a single slot; pair with [`offset`](Self::offset)
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Size of `size` rounded up to a multiple of `alignment`
fn slot_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment.max(1)) * alignment.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_stride() {
        assert_eq!(slot_stride(272, 256), 512);
        assert_eq!(slot_stride(64, 256), 256);
        assert_eq!(slot_stride(256, 256), 256);
        assert_eq!(slot_stride(64, 0), 64);
    }
}
