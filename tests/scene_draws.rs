use std::io::Cursor;
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3, Vec4};
use lorentz_view::core::geometry::{Manifold, Spherical3};
use lorentz_view::engine::core::EngineConfig;
use lorentz_view::engine::resources::{MeshData, ResourceManager, TextureData, TextureHandle};
use lorentz_view::input::{InputCommand, MoveDirection, TurnDirection};
use lorentz_view::scene::mode::{Antipode, GeometryMode};
use lorentz_view::scene::object::{Object, ObjectMatrices};
use lorentz_view::scene::Scene;

const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

const TWO_SHAPES_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
o first
f 1 2 3
o second
f 1 2 4
";

fn quad() -> MeshData {
    MeshData::from_obj_reader(&mut Cursor::new(QUAD_OBJ)).expect("quad parses")
}

fn resources_for(config: &EngineConfig) -> ResourceManager {
    let mut resources = ResourceManager::default();
    for model in &config.models {
        resources.register_model(model.name.clone(), quad(), TextureHandle::PLACEHOLDER);
    }
    resources
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lorentz-view-{}-{name}", std::process::id()))
}

#[test]
fn obj_quad_is_triangulated_with_uvs() {
    let mesh = quad();
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.index_count(), 6);
    let corner = mesh
        .vertices
        .iter()
        .find(|vertex| vertex.position == [1.0, 1.0, 0.0])
        .expect("corner vertex");
    assert_eq!(corner.tex_coords, [1.0, 1.0]);
}

#[test]
fn obj_shapes_merge_into_one_mesh() {
    let mesh = MeshData::from_obj_reader(&mut Cursor::new(TWO_SHAPES_OBJ)).expect("mesh parses");
    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.index_count(), 6);
    assert!(mesh.indices[3..].iter().all(|&index| index >= 3));
    assert!(mesh.vertices.iter().all(|vertex| vertex.tex_coords == [0.0, 0.0]));
}

#[test]
fn obj_without_faces_is_an_error() {
    assert!(MeshData::from_obj_reader(&mut Cursor::new("v 0 0 0\n")).is_err());
}

#[test]
fn missing_mesh_is_fatal() {
    let mut config = EngineConfig::default();
    config.asset_root = temp_path("no-such-dir");
    let err = ResourceManager::load(&config).unwrap_err();
    assert!(format!("{err:#}").contains("cannot load model `tree`"));
}

#[test]
fn missing_texture_falls_back_to_placeholder() {
    let mut resources = ResourceManager::default();
    let handle = resources.load_texture(Path::new("does/not/exist.png"));
    assert_eq!(handle, TextureHandle::PLACEHOLDER);
    assert_eq!(resources.load_texture(Path::new("does/not/exist.png")), handle);
    assert_eq!(resources.texture_count(), 1);
}

#[test]
fn shared_texture_is_decoded_once() {
    let path = temp_path("checker.png");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]))
        .save(&path)
        .expect("write test texture");

    let mut resources = ResourceManager::default();
    let first = resources.load_texture(&path);
    let second = resources.load_texture(&path);
    let _ = std::fs::remove_file(&path);

    assert_ne!(first, TextureHandle::PLACEHOLDER);
    assert_eq!(first, second);
    assert_eq!(resources.texture_count(), 2);
    let texture = &resources.textures()[first.index()];
    assert_eq!((texture.width, texture.height), (2, 2));
    assert_eq!(&texture.rgba[..4], &[10, 20, 30, 255]);
}

#[test]
fn far_tree_gets_curved_translation() {
    let scale = 0.003;
    let mut resources = ResourceManager::default();
    let tree = resources.register_model("tree", quad(), TextureHandle::PLACEHOLDER);
    let object = Object::new(
        "tree-1",
        tree,
        Vec3::new(-100.0, 0.0, 0.0),
        Mat4::IDENTITY,
        Mat4::from_scale(Vec3::splat(0.9)),
        scale,
    )
    .expect("object is regular");

    assert_eq!(object.translation(), Vec4::new(-100.0, 0.0, 0.0, 1.0));
    let tip = object.model_matrix().transform_point3(Vec3::X);
    assert!(tip.abs_diff_eq(Vec3::new(-99.1, 0.0, 0.0), 1e-4));

    let translation = object.curved_translation();
    assert!((translation.transpose() * translation).abs_diff_eq(Mat4::IDENTITY, 1e-5));
    let a = Vec4::new(0.3, -0.2, 0.5, 0.7);
    let b = Vec4::new(0.1, 0.9, -0.4, 0.2);
    assert!((Spherical3::form(translation * a, translation * b) - Spherical3::form(a, b)).abs() < 1e-5);

    let expected = Spherical3::embed(Vec3::new(-100.0, 0.0, 0.0) * scale);
    assert!((translation * Vec4::W).abs_diff_eq(expected, 1e-6));

    match object.matrices(GeometryMode::NonEuclidean, Antipode::Far) {
        ObjectMatrices::Curved {
            translation: bound,
            rotation,
            scale: bound_scale,
            anti,
        } => {
            assert_eq!(bound, translation);
            assert_eq!(rotation, Mat4::IDENTITY);
            assert_eq!(bound_scale, Mat4::from_scale(Vec3::splat(0.9)));
            assert_eq!(anti, -1.0);
        }
        other => panic!("expected curved matrices, got {other:?}"),
    }
    assert_eq!(
        object.matrices(GeometryMode::Euclidean, Antipode::Near),
        ObjectMatrices::Euclidean {
            model: object.model_matrix()
        }
    );
}

#[test]
fn antipodal_pass_doubles_draws() {
    let config = EngineConfig::default();
    let resources = resources_for(&config);
    let mut scene = Scene::from_config(&config, &resources).expect("scene builds");

    let flat = scene.draw_calls();
    assert_eq!(flat.len(), scene.objects().len());
    assert!(flat.iter().all(|call| call.antipode == Antipode::Near));
    assert!(flat.iter().enumerate().all(|(i, call)| call.object == i));

    scene.apply(InputCommand::ToggleMode).expect("toggle succeeds");
    let curved = scene.draw_calls();
    assert_eq!(curved.len(), 2 * scene.objects().len());
    for (i, pair) in curved.chunks(2).enumerate() {
        assert_eq!(pair[0].object, i);
        assert_eq!(pair[1].object, i);
        assert_eq!(pair[0].antipode, Antipode::Near);
        assert_eq!(pair[1].antipode, Antipode::Far);
        assert!(pair.iter().all(|call| call.mode == GeometryMode::NonEuclidean));
    }
}

#[test]
fn objects_share_models_by_handle() {
    let config = EngineConfig::default();
    let resources = resources_for(&config);
    let scene = Scene::from_config(&config, &resources).expect("scene builds");

    let objects = scene.objects();
    assert_eq!(objects[0].name(), "tree-1");
    assert_eq!(objects[0].model(), objects[1].model());
    assert_ne!(objects[0].model(), objects[2].model());
    assert_eq!(resources.model(objects[4].model()).name, "fox");
}

#[test]
fn keyboard_flight_moves_the_camera() {
    let config = EngineConfig::default();
    let resources = resources_for(&config);
    let mut scene = Scene::from_config(&config, &resources).expect("scene builds");

    scene.apply(InputCommand::Move(MoveDirection::Forward)).expect("move");
    assert!(scene.camera().position().abs_diff_eq(Vec3::new(0.0, 10.0, 8.0), 1e-5));

    scene.apply(InputCommand::Move(MoveDirection::Left)).expect("strafe");
    assert!(scene.camera().position().abs_diff_eq(Vec3::new(-2.0, 10.0, 8.0), 1e-5));
    assert!(scene.camera().center().abs_diff_eq(Vec3::new(-2.0, 10.0, -2.0), 1e-5));

    scene.apply(InputCommand::Turn(TurnDirection::Right)).expect("turn");
    assert!(scene.camera().position().abs_diff_eq(Vec3::new(-2.0, 10.0, 8.0), 1e-5));
    assert!(scene.camera().center().abs_diff_eq(Vec3::new(-1.0, 10.0, -2.0), 1e-5));

    scene.apply(InputCommand::ToggleMode).expect("toggle");
    scene.apply(InputCommand::Move(MoveDirection::Back)).expect("curved move");
    assert_eq!(scene.mode(), GeometryMode::NonEuclidean);
}

#[test]
fn shipped_config_matches_built_in_scene() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/scene.ron");
    let shipped = EngineConfig::load_or_default(&path).expect("shipped config is valid");
    let built_in = EngineConfig::default();

    assert_eq!(shipped.objects.len(), built_in.objects.len());
    for (a, b) in shipped.objects.iter().zip(&built_in.objects) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.translation, b.translation);
        assert_eq!(a.scale, b.scale);
        assert_eq!(a.rotation_matrix(), b.rotation_matrix());
    }
    assert_eq!(shipped.geometry.curvature_scale, built_in.geometry.curvature_scale);
}

#[test]
fn textures_carry_a_full_mip_chain() {
    let texture = TextureData {
        width: 8,
        height: 2,
        rgba: vec![128; 8 * 2 * 4],
    };
    let levels = texture.mip_chain();
    let sizes: Vec<(u32, u32)> = levels.iter().map(|level| (level.width, level.height)).collect();
    assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    assert!(levels
        .iter()
        .all(|level| level.rgba.len() == (4 * level.width * level.height) as usize));
    assert_eq!(levels[0].rgba, texture.rgba);

    assert_eq!(TextureData::placeholder().mip_chain().len(), 1);
}
