#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
}

impl Drawable3D {
    pub fn sphere(radius: f64, segments: u32) -> Self {
        Self {
            shape: Shape3D::Sphere {
                radius,
                width_segments: segments,
                height_segments: segments,
            },
        }
    }

    pub fn plane(width: f64, height: f64) -> Self {
        Self {
            shape: Shape3D::Plane { width, height },
        }
    }
}
