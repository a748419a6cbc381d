use crate::{EulerRot, Mat4, Quat, Vec3};

/// Rigid transform with uniform or non-uniform scale (Euler XYZ).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

/// Names one float inside a [`Transform`]; used as a tween target handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformChannel {
    TranslationX,
    TranslationY,
    TranslationZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }

    #[inline]
    pub fn channel(&self, channel: TransformChannel) -> f32 {
        let mut copy = *self;
        *copy.channel_mut(channel)
    }

    pub fn channel_mut(&mut self, channel: TransformChannel) -> &mut f32 {
        match channel {
            TransformChannel::TranslationX => &mut self.translation.x,
            TransformChannel::TranslationY => &mut self.translation.y,
            TransformChannel::TranslationZ => &mut self.translation.z,
            TransformChannel::RotationX => &mut self.rotation_euler.x,
            TransformChannel::RotationY => &mut self.rotation_euler.y,
            TransformChannel::RotationZ => &mut self.rotation_euler.z,
            TransformChannel::ScaleX => &mut self.scale.x,
            TransformChannel::ScaleY => &mut self.scale.y,
            TransformChannel::ScaleZ => &mut self.scale.z,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
