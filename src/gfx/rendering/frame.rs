use cgmath::Matrix4;

use super::{MeshHandle, RenderBackend};
use crate::gfx::shading::PhongUniforms;

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Phong {
        mesh: MeshHandle,
        uniforms: PhongUniforms,
    },
    Lines {
        mesh: MeshHandle,
        transformation_projection: Matrix4<f32>,
    },
}

/// Draw calls of one frame, in the order they were issued
#[derive(Debug, Default, Clone)]
pub struct FrameCommands {
    commands: Vec<DrawCommand>,
}

impl FrameCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of Phong draws, which each need their own uniform slot
    pub fn phong_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Phong { .. }))
            .count()
    }
}

impl RenderBackend for FrameCommands {
    fn draw_phong(&mut self, mesh: MeshHandle, uniforms: &PhongUniforms) {
        self.commands.push(DrawCommand::Phong {
            mesh,
            uniforms: *uniforms,
        });
    }

    fn draw_lines(&mut self, mesh: MeshHandle, transformation_projection: Matrix4<f32>) {
        self.commands.push(DrawCommand::Lines {
            mesh,
            transformation_projection,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;
    use cgmath::SquareMatrix;

    #[test]
    fn test_commands_keep_call_order() {
        let mut frame = FrameCommands::new();
        frame.draw_lines(MeshHandle(1), Matrix4::identity());
        frame.draw_phong(MeshHandle(0), &PhongUniforms::zeroed());
        frame.draw_lines(MeshHandle(1), Matrix4::identity());

        assert_eq!(frame.len(), 3);
        assert_eq!(frame.phong_count(), 1);
        assert!(matches!(
            frame.commands()[1],
            DrawCommand::Phong { mesh, .. } if mesh == MeshHandle(0)
        ));

        frame.clear();
        assert!(frame.is_empty());
    }
}
