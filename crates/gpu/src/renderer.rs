use foundation::Rgb;
use foundation::math::Vec3;
use scene::EarthScene;
use scene::camera::SceneCamera;
use scene::components::{Shape3D, Transform};
use scene::materials::Material;
use scene::prefabs::LayerKind;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera3D {
    pub fn look_at(position: Vec3, target: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            fov_y_rad,
            near,
            far,
        }
    }

    pub fn from_scene(camera: &SceneCamera) -> Self {
        Self::look_at(
            camera.view.position,
            camera.target,
            camera.fov_y_rad(),
            camera.near,
            camera.far,
        )
    }

    /// Column-major view-projection matrix for a `width / height` aspect ratio.
    pub fn view_proj(&self, aspect: f64) -> [[f32; 4]; 4] {
        let view = mat4_look_at_rh(self.position, self.target, Vec3::new(0.0, 1.0, 0.0));
        let proj = mat4_perspective_rh_z0(self.fov_y_rad, aspect, self.near, self.far);
        mat4_mul(proj, view)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Ambient { intensity: f32 },
    Directional { position: Vec3, intensity: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Mesh {
        layer: LayerKind,
        shape: Shape3D,
        transform: Transform,
        material: Material,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub clear_color: Rgb,
    pub camera: Camera3D,
    pub lights: Vec<Light>,
    pub commands: Vec<RenderCommand>,
}

pub struct Renderer;

impl Renderer {
    /// Snapshot the scene into draw commands. Opaque layers come first so the
    /// host can draw translucent shells over them in order.
    pub fn collect(scene: &EarthScene) -> RenderFrame {
        let (opaque, translucent): (Vec<_>, Vec<_>) = scene
            .layers()
            .iter()
            .partition(|layer| !layer.material.is_transparent());

        let commands = opaque
            .into_iter()
            .chain(translucent)
            .map(|layer| RenderCommand::Mesh {
                layer: layer.kind,
                shape: layer.drawable.shape,
                transform: layer.transform,
                material: layer.material.clone(),
            })
            .collect();

        RenderFrame {
            clear_color: scene.config().clear_color,
            camera: Camera3D::from_scene(scene.camera()),
            lights: vec![
                Light::Ambient { intensity: 0.5 },
                Light::Directional {
                    position: Vec3::new(5.0, 5.0, 5.0),
                    intensity: 1.0,
                },
            ],
            commands,
        }
    }
}

fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> [[f32; 4]; 4] {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> [[f32; 4]; 4] {
    let f = (target - eye).normalize();
    let s = cross(f, up).normalize();
    let u = cross(s, f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}
