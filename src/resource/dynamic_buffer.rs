//! Per-object uniforms packed into one buffer and addressed by dynamic offsets.

use crate::context::Context;
use bytemuck::Pod;
use std::marker::PhantomData;

/// A uniform buffer holding one `T` per drawn object.
///
/// Entries are staged on the CPU with [`push`](Self::push) during a frame, then
/// written with a single [`flush`](Self::flush). Each entry starts on the
/// device's `min_uniform_buffer_offset_alignment`, so the offset returned by
/// `push` can be passed directly to `set_bind_group`.
///
/// ```ignore
/// uniforms.clear();
/// let offsets: Vec<u32> = objects.iter().map(|o| uniforms.push(&o.uniforms())).collect();
/// if uniforms.flush() {
///     // The buffer grew: rebuild the bind group that references it.
/// }
/// ```
pub struct DynamicUniformBuffer<T: Pod> {
    staging: Vec<u8>,
    buffer: wgpu::Buffer,
    capacity: u64,
    stride: u64,
    count: usize,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T: Pod> DynamicUniformBuffer<T> {
    /// Creates a buffer with room for `initial_entries` entries.
    pub fn new(label: &'static str, initial_entries: usize) -> Self {
        let ctxt = Context::get();
        let alignment = ctxt.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = (std::mem::size_of::<T>() as u64).div_ceil(alignment) * alignment;
        let capacity = stride * initial_entries.max(1) as u64;

        Self {
            staging: Vec::with_capacity(capacity as usize),
            buffer: Self::create(label, capacity),
            capacity,
            stride,
            count: 0,
            label,
            _marker: PhantomData,
        }
    }

    fn create(label: &'static str, size: u64) -> wgpu::Buffer {
        Context::get().create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Size of one entry as seen by the shader.
    pub fn binding_size() -> wgpu::BufferSize {
        wgpu::BufferSize::new(std::mem::size_of::<T>() as u64)
            .unwrap_or(wgpu::BufferSize::MIN)
    }

    /// Forgets every staged entry.
    pub fn clear(&mut self) {
        self.staging.clear();
        self.count = 0;
    }

    /// Stages `value` and returns its byte offset in the buffer.
    pub fn push(&mut self, value: &T) -> u32 {
        let offset = self.count as u64 * self.stride;
        let bytes = bytemuck::bytes_of(value);

        self.staging.extend_from_slice(bytes);
        self.staging
            .resize(self.staging.len() + (self.stride as usize - bytes.len()), 0);
        self.count += 1;

        offset as u32
    }

    /// Writes the staged entries to the GPU.
    ///
    /// Returns `true` if the buffer had to grow, in which case any bind group
    /// referencing [`buffer`](Self::buffer) is stale.
    pub fn flush(&mut self) -> bool {
        if self.staging.is_empty() {
            return false;
        }

        let required = self.staging.len() as u64;
        let grown = required > self.capacity;

        if grown {
            let mut capacity = self.capacity;
            while capacity < required {
                capacity *= 2;
            }

            log::debug!("Growing {} to {} bytes.", self.label, capacity);
            self.buffer = Self::create(self.label, capacity);
            self.capacity = capacity;
        }

        Context::get().write_buffer(&self.buffer, 0, &self.staging);
        grown
    }

    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
