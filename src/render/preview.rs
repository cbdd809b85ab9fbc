use super::{view_projection, SceneEngine, Substance};
use egui::ecolor::Hsva;
use egui::{Color32, Painter, Pos2, Rect, Stroke};
use glam::{Mat4, Vec3};

const FOV_Y_DEG: f32 = 45.0;
const SHADE_STEPS: usize = 18;
const BAND_SEGMENTS: usize = 48;
const BAND_LATITUDES_DEG: [f32; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];
const SKYBOX_SHADER: &str = "skybox";

/// Flat sketch of the scene: skybox tint as background, each other substance as
/// a shaded sphere with latitude bands that follow its rotation.
pub fn paint_preview(engine: &SceneEngine, painter: &Painter, rect: Rect) {
    paint_background(engine, painter, rect);

    let Some(camera) = engine.cameras().active() else {
        return;
    };
    let eye = camera.transform.position;
    let view_proj = view_projection(&camera.transform, engine.cameras().aspect(), FOV_Y_DEG);

    let mut visible: Vec<&Substance> = engine
        .substances()
        .iter()
        .filter(|substance| {
            engine
                .template(substance.template)
                .is_some_and(|template| template.shader != SKYBOX_SHADER)
        })
        .collect();
    // Far to near.
    visible.sort_by(|a, b| {
        let da = (a.transform.position - eye).length();
        let db = (b.transform.position - eye).length();
        db.total_cmp(&da)
    });

    for substance in visible {
        paint_substance(engine, painter, rect, substance, eye, view_proj);
    }
}

fn paint_background(engine: &SceneEngine, painter: &Painter, rect: Rect) {
    let cubemap = engine
        .templates()
        .iter()
        .find(|template| template.shader == SKYBOX_SHADER)
        .and_then(|template| template.options.text("cubemapTexture"));
    let sky = match cubemap {
        Some(name) => texture_tint(engine, name).unwrap_or_else(|| name_tint(name)),
        None => [0.1, 0.1, 0.2],
    };

    painter.rect_filled(rect, 0.0, to_color32(scale_rgb(sky, 0.6), 1.0));
    let horizon = Rect::from_min_max(Pos2::new(rect.min.x, rect.center().y), rect.max);
    painter.rect_filled(horizon, 0.0, to_color32(scale_rgb(sky, 0.35), 1.0));
}

fn paint_substance(
    engine: &SceneEngine,
    painter: &Painter,
    rect: Rect,
    substance: &Substance,
    eye: Vec3,
    view_proj: Mat4,
) {
    let Some(template) = engine.template(substance.template) else {
        return;
    };
    let center = substance.transform.position;
    let depth = (center - eye).length();
    if depth < 0.1 {
        return;
    }
    let Some(screen_center) = project(view_proj, rect, center) else {
        return;
    };

    let focal = rect.height() * 0.5 / (FOV_Y_DEG.to_radians() * 0.5).tan();
    let world_radius = 0.5 * substance.transform.scale.max_element();
    let radius = world_radius / depth * focal;
    if radius < 0.5 {
        return;
    }

    let color = template.options.vec4("color").unwrap_or([1.0, 1.0, 1.0, 1.0]);
    let albedo = template
        .options
        .text("mainTexture")
        .and_then(|name| texture_tint(engine, name))
        .unwrap_or([1.0, 1.0, 1.0]);
    let base = [color[0] * albedo[0], color[1] * albedo[1], color[2] * albedo[2]];
    let metallic = template.options.float("metallic").unwrap_or(0.0).clamp(0.0, 1.0);
    let bump = template
        .options
        .float("normalMagnification")
        .unwrap_or(1.0)
        .clamp(0.0, 3.0);

    let light_dir = egui::vec2(-0.35, -0.4);
    for step in 0..SHADE_STEPS {
        let t = step as f32 / (SHADE_STEPS - 1) as f32;
        let r = radius * (1.0 - t * 0.85);
        let offset = light_dir * radius * t * 0.6;
        let diffuse = 0.2 + 0.8 * t;
        let lit = scale_rgb(base, diffuse * (1.0 - 0.5 * metallic));
        painter.circle_filled(screen_center + offset, r, to_color32(lit, color[3]));
    }

    let highlight = mix_rgb([1.0, 1.0, 1.0], base, metallic);
    let spot_radius = radius * (0.18 - 0.1 * metallic);
    painter.circle_filled(
        screen_center + light_dir * radius * 0.6,
        spot_radius.max(1.0),
        to_color32(highlight, 0.85),
    );

    let band_alpha = (bump / 3.0).clamp(0.05, 1.0);
    let band_stroke = Stroke::new(1.2, to_color32(scale_rgb(base, 0.3), band_alpha));
    let model = substance.transform.matrix();
    for latitude in BAND_LATITUDES_DEG {
        let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
        let mut previous: Option<Pos2> = None;
        for segment in 0..=BAND_SEGMENTS {
            let angle = segment as f32 / BAND_SEGMENTS as f32 * std::f32::consts::TAU;
            let local = Vec3::new(cos_lat * angle.cos(), sin_lat, cos_lat * angle.sin()) * 0.5;
            let world = model.transform_point3(local);
            let facing = (world - center).dot(eye - center) > 0.0;
            let point = if facing {
                project(view_proj, rect, world)
            } else {
                None
            };
            if let (Some(a), Some(b)) = (previous, point) {
                painter.line_segment([a, b], band_stroke);
            }
            previous = point;
        }
    }
}

fn project(view_proj: Mat4, rect: Rect, world: Vec3) -> Option<Pos2> {
    let clip = view_proj * world.extend(1.0);
    if clip.w <= 1e-4 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Pos2::new(
        rect.center().x + ndc.x * rect.width() * 0.5,
        rect.center().y - ndc.y * rect.height() * 0.5,
    ))
}

fn texture_tint(engine: &SceneEngine, name: &str) -> Option<[f32; 3]> {
    engine.texture(name).and_then(|texture| texture.tint)
}

/// Stable color for textures the catalog gives no tint for.
fn name_tint(name: &str) -> [f32; 3] {
    let hash = name
        .bytes()
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as u32));
    let hue = (hash % 360) as f32 / 360.0;
    Hsva::new(hue, 0.35, 0.8, 1.0).to_rgb()
}

fn scale_rgb(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    [rgb[0] * factor, rgb[1] * factor, rgb[2] * factor]
}

fn mix_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn to_color32(rgb: [f32; 3], alpha: f32) -> Color32 {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), channel(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Transform;

    #[test]
    fn name_tint_is_stable_and_in_range() {
        let a = name_tint("Cubemap/Yokohama");
        assert_eq!(a, name_tint("Cubemap/Yokohama"));
        assert!(a.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn projection_maps_origin_to_rect_center() {
        let camera = Transform::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::ONE);
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(200.0, 100.0));
        let view_proj = view_projection(&camera, 2.0, FOV_Y_DEG);
        let center = project(view_proj, rect, Vec3::ZERO).unwrap();
        assert!((center.x - 100.0).abs() < 1e-3);
        assert!((center.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn points_behind_camera_are_not_projected() {
        let camera = Transform::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::ONE);
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let view_proj = view_projection(&camera, 1.0, FOV_Y_DEG);
        assert!(project(view_proj, rect, Vec3::new(0.0, 0.0, -10.0)).is_none());
    }

    #[test]
    fn color_conversion_clamps() {
        assert_eq!(to_color32([2.0, -1.0, 0.5], 1.0), Color32::from_rgb(255, 0, 128));
    }
}
