use foundation::math::{ProjectionError, project_with_policy};
use foundation::time::Time;

use crate::components::{Drawable3D, Transform};
use crate::config::SceneConfig;
use crate::materials::{
    AtmosphereMaterial, EarthMaterial, LightingUniforms, Material, SurfaceMaterial, TextureAsset,
    WireframeMaterial,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    Earth,
    Atmosphere,
    Clouds,
    Grid,
    /// Storm marker, indexed into `markers.storms`.
    Storm(usize),
}

/// Time-driven rotation applied in [`GlobeLayer::animate`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Spin {
    Fixed,
    /// Continuous spin about +Y.
    AboutY { rad_per_s: f64 },
    /// One full turn about the local Z axis every `period_s`, repeating.
    AboutZ { period_s: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobeLayer {
    pub kind: LayerKind,
    pub drawable: Drawable3D,
    pub transform: Transform,
    pub material: Material,
    pub spin: Spin,
}

impl GlobeLayer {
    pub fn animate(&mut self, time: Time) {
        let t = time.seconds();
        match self.spin {
            Spin::Fixed => {}
            Spin::AboutY { rad_per_s } => self.transform.rotation.y = t * rad_per_s,
            Spin::AboutZ { period_s } => {
                let turns = (t / period_s).rem_euclid(1.0);
                self.transform.rotation.z = turns * std::f64::consts::TAU;
            }
        }
    }
}

/// Build every layer of the globe: earth, atmosphere, optional clouds and
/// grid shells, then one marker per configured storm.
pub fn spawn_globe_layers(
    config: &SceneConfig,
    lighting: LightingUniforms,
) -> Result<Vec<GlobeLayer>, ProjectionError> {
    let globe = &config.globe;
    let shell = Drawable3D::sphere(globe.radius, globe.segments);
    let mut layers = vec![
        GlobeLayer {
            kind: LayerKind::Earth,
            drawable: shell,
            transform: Transform::identity(),
            material: Material::Earth(EarthMaterial::new(&config.textures, lighting)),
            spin: Spin::AboutY {
                rad_per_s: globe.spin_rad_s,
            },
        },
        GlobeLayer {
            kind: LayerKind::Atmosphere,
            drawable: shell,
            transform: Transform::identity().with_uniform_scale(globe.atmosphere_scale),
            material: Material::Atmosphere(AtmosphereMaterial::new(lighting)),
            spin: Spin::Fixed,
        },
    ];

    if config.clouds.enabled {
        let clouds = &config.clouds;
        layers.push(GlobeLayer {
            kind: LayerKind::Clouds,
            drawable: shell,
            transform: Transform::identity().with_uniform_scale(clouds.scale),
            material: Material::Surface(SurfaceMaterial {
                map: TextureAsset::srgb(&clouds.texture, config.textures.anisotropy).repeating(),
                opacity: clouds.opacity,
                depth_write: false,
            }),
            spin: Spin::AboutY {
                rad_per_s: clouds.spin_rad_s,
            },
        });
    }

    if config.grid.enabled {
        layers.push(GlobeLayer {
            kind: LayerKind::Grid,
            drawable: shell,
            transform: Transform::identity().with_uniform_scale(config.grid.scale),
            material: Material::Wireframe(WireframeMaterial {
                color: config.grid.color,
                opacity: config.grid.opacity,
            }),
            spin: Spin::Fixed,
        });
    }

    let markers = &config.markers;
    for (i, storm) in markers.storms.iter().enumerate() {
        let position = project_with_policy(markers.policy, markers.radius, *storm)?;
        layers.push(GlobeLayer {
            kind: LayerKind::Storm(i),
            drawable: Drawable3D::plane(markers.size, markers.size),
            transform: Transform::translate(position).with_uniform_scale(markers.scale),
            material: Material::Surface(SurfaceMaterial {
                map: TextureAsset::srgb(&markers.texture, config.textures.anisotropy),
                opacity: markers.opacity,
                depth_write: false,
            }),
            spin: Spin::AboutZ {
                period_s: markers.spin_period_s,
            },
        });
    }

    Ok(layers)
}
