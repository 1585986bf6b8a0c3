use super::Scene;

/// Flat, reused transfer buffers for JS drawing.
#[derive(Default)]
pub(crate) struct RenderBuffers {
    /// x0, y0, x1, y1, ... for every body, back to back
    pub(super) vertices: Vec<f32>,
    /// `body_count + 1` entries, in vertices
    pub(super) offsets: Vec<u32>,
    /// 0xAABBGGRR per body
    pub(super) colors: Vec<u32>,
}

impl RenderBuffers {
    fn clear(&mut self) {
        self.vertices.clear();
        self.offsets.clear();
        self.colors.clear();
    }
}

pub(super) fn extract_render_buffers<T>(scene: &mut Scene<T>) -> usize {
    let Scene { bodies, render, .. } = scene;
    render.clear();
    render.offsets.push(0);

    let mut vertex_count = 0u32;
    for body in bodies.iter() {
        for v in body.shape() {
            render.vertices.push(v.x as f32);
            render.vertices.push(v.y as f32);
        }
        vertex_count += body.shape().len() as u32;
        render.offsets.push(vertex_count);
        render.colors.push(body.color().to_rgba_u32());
    }

    bodies.len()
}
