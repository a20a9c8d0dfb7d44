use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct AxisVertex {
    pub(crate) position: [f32; 3],
    pub(crate) color: [f32; 3],
}

impl AxisVertex {
    pub(crate) const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<AxisVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Origin-anchored X (red), Y (green) and Z (blue) segments.
pub(crate) fn axes_vertices(length: f32) -> [AxisVertex; 6] {
    let seg = |dir: [f32; 3], color: [f32; 3]| {
        [
            AxisVertex {
                position: [0.0, 0.0, 0.0],
                color,
            },
            AxisVertex {
                position: [dir[0] * length, dir[1] * length, dir[2] * length],
                color,
            },
        ]
    };
    let [x0, x1] = seg([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    let [y0, y1] = seg([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]);
    let [z0, z1] = seg([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]);
    [x0, x1, y0, y1, z0, z1]
}

pub(crate) struct AxesResources {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
}

pub(crate) fn create_axes_resources(device: &wgpu::Device, length: f32) -> AxesResources {
    let verts = axes_vertices(length);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("axes_vb"),
        contents: bytemuck::cast_slice(&verts),
        usage: wgpu::BufferUsages::VERTEX,
    });
    AxesResources {
        vertex_buffer,
        vertex_count: verts.len() as u32,
    }
}
