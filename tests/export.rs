//! Export then decode.

use std::{fs, io::Cursor, path::Path};

use approx::assert_relative_eq;

use wom_exporter::{
    data::{
        ColorLayer, GeometryMesh, Loop, Material, Mesh, ObjectData, Polygon, Scene, SceneObject,
        Texture, UvLayer,
    },
    scene_file, wom, ExportConfig, Exporter, Warning,
};

/// Unit quad made of two triangles, plus an unreferenced vertex.
fn quad_geometry() -> GeometryMesh {
    let corners = [0u32, 1, 2, 2, 3, 0];
    let positions = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.5],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.25],
        [5.0, 5.0, 5.0],
    ];
    GeometryMesh {
        uv_layers: vec![UvLayer {
            name: "UVMap".to_owned(),
            uvs: corners
                .iter()
                .map(|&v| [positions[v as usize][0], positions[v as usize][1] * 0.5])
                .collect(),
        }],
        positions,
        polygons: vec![Polygon::new(vec![0, 1, 2]), Polygon::new(vec![3, 4, 5])],
        loops: corners
            .iter()
            .map(|&v| Loop::new(v, [0.0, 0.0, 1.0]))
            .collect(),
        color_layers: Vec::new(),
    }
}

fn material(name: &str, filepath: Option<&str>) -> Material {
    Material {
        name: name.to_owned(),
        textures: filepath
            .map(|filepath| Texture {
                name: None,
                filepath: filepath.to_owned(),
            })
            .into_iter()
            .collect(),
    }
}

fn mesh_object(name: &str, selected: bool, materials: Vec<Material>) -> SceneObject {
    SceneObject {
        name: name.to_owned(),
        selected,
        data: ObjectData::Mesh(Mesh {
            name: format!("{}Data", name),
            geometry: quad_geometry(),
            materials,
        }),
    }
}

fn scene() -> Scene {
    Scene {
        name: Some("Test".to_owned()),
        base_dir: None,
        objects: vec![
            mesh_object(
                "Crate",
                false,
                vec![
                    material("Wood", Some("//wood.png")),
                    material("Metal", Some("//metal.png")),
                ],
            ),
            SceneObject {
                name: "Sun".to_owned(),
                selected: true,
                data: ObjectData::Lamp,
            },
            mesh_object("Barrel", true, vec![material("Plain", None)]),
        ],
    }
}

fn export(scene: &Scene, config: ExportConfig) -> (wom_exporter::ExportReport, wom::WomFile) {
    let (report, bytes) = Exporter::new(scene, config)
        .write_to(Vec::new(), Path::new("."))
        .unwrap();
    let decoded = wom::read(Cursor::new(bytes)).unwrap();
    (report, decoded)
}

#[test]
fn round_trip() {
    let scene = scene();
    let (report, file) = export(&scene, ExportConfig::default());

    assert_eq!(file.meshes.len(), 2);
    assert_eq!(report.meshes.len(), 2);
    // Sorted by object name.
    assert_eq!(file.meshes[0].name, "BarrelData");
    assert_eq!(file.meshes[1].name, "CrateData");

    let mesh = &file.meshes[1];
    assert!(!mesh.has_tangents && !mesh.has_binormal && !mesh.has_vertex_color);
    // The fifth vertex is never referenced.
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.triangles, vec![[0, 1, 2], [2, 3, 0]]);

    let source = quad_geometry();
    for (i, v) in mesh.vertices.iter().enumerate() {
        assert_eq!(v.position, source.positions[i]);
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        assert_eq!(v.color, None);
        assert_eq!(v.tangent, None);
    }
    // V is flipped.
    assert_relative_eq!(mesh.vertices[3].uv[0], 0.0);
    assert_relative_eq!(mesh.vertices[3].uv[1], 0.5);
    assert_relative_eq!(mesh.vertices[2].uv[1], 0.5);
    assert_relative_eq!(mesh.vertices[0].uv[1], 1.0);

    assert_eq!(file.joint_count, 0);
    assert_eq!(file.skinning, vec![false, false]);
}

#[test]
fn first_material_is_repeated_by_default() {
    let scene = scene();
    let (_, file) = export(&scene, ExportConfig::default());
    let names: Vec<_> = file.meshes[1]
        .materials
        .iter()
        .map(|m| (m.texture_name.as_str(), m.name.as_str()))
        .collect();
    assert_eq!(names, [("wood.png", "Wood"), ("wood.png", "Wood")]);
    for m in &file.meshes[1].materials {
        assert!(m.enabled);
        assert_eq!(m.emissive, None);
        assert_eq!(m.shininess, None);
        assert_eq!(m.specular, None);
        assert_eq!(m.transparency, None);
    }
}

#[test]
fn every_material_slot() {
    let scene = scene();
    let config = ExportConfig {
        duplicate_first_material: false,
        ..Default::default()
    };
    let (_, file) = export(&scene, config);
    let names: Vec<_> = file.meshes[1]
        .materials
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, ["Wood", "Metal"]);
}

#[test]
fn missing_texture_writes_placeholder() {
    let scene = scene();
    let (report, file) = export(&scene, ExportConfig::default());
    let barrel = &file.meshes[0].materials[0];
    assert_eq!(barrel.texture_name, wom::PLACEHOLDER_TEXTURE_NAME);
    assert_eq!(barrel.name, "Plain");
    assert!(report.warnings.contains(&Warning::NoTexture {
        material: "Plain".to_owned()
    }));
}

#[test]
fn selected_and_renamed() {
    let scene = scene();
    let config = ExportConfig {
        use_export_selected: true,
        fix_mesh_names: true,
        ..Default::default()
    };
    let (report, file) = export(&scene, config);
    assert_eq!(file.meshes.len(), 1);
    assert_eq!(file.meshes[0].name, "mesh_0");
    assert_eq!(report.meshes[0].name, "mesh_0");
    assert_eq!(file.skinning, vec![false]);
}

#[test]
fn y_up_swaps_axes_and_winding() {
    let scene = scene();
    let config = ExportConfig {
        use_y_is_up: true,
        ..Default::default()
    };
    let (_, file) = export(&scene, config);
    let mesh = &file.meshes[1];
    assert_eq!(mesh.triangles, vec![[0, 2, 1], [2, 0, 3]]);
    assert_eq!(mesh.vertices[1].position, [1.0, 0.5, 0.0]);
    assert_eq!(mesh.vertices[1].normal, [0.0, 1.0, 0.0]);
}

#[test]
fn tangents_and_colors() {
    let mut geometry = quad_geometry();
    geometry.color_layers.push(ColorLayer {
        name: "Col".to_owned(),
        colors: vec![[0.25, 0.5, 0.75, 1.0]; 6],
    });
    let scene = Scene {
        objects: vec![SceneObject {
            name: "Painted".to_owned(),
            selected: false,
            data: ObjectData::Mesh(Mesh {
                name: "Painted".to_owned(),
                geometry,
                materials: Vec::new(),
            }),
        }],
        ..Scene::new()
    };
    let config = ExportConfig {
        use_tangent_arrays: true,
        ..Default::default()
    };
    let (report, file) = export(&scene, config);
    assert!(report.warnings.is_empty());

    let mesh = &file.meshes[0];
    assert!(mesh.has_tangents && mesh.has_binormal && mesh.has_vertex_color);
    assert!(mesh.materials.is_empty());
    for v in &mesh.vertices {
        assert_eq!(v.color, Some([0.25, 0.5, 0.75]));
        let t = v.tangent.unwrap();
        let b = v.binormal.unwrap();
        assert_relative_eq!(t[0] * t[0] + t[1] * t[1] + t[2] * t[2], 1.0, epsilon = 1e-5);
        assert_relative_eq!(b[0] * b[0] + b[1] * b[1] + b[2] * b[2], 1.0, epsilon = 1e-5);
    }
}

#[test]
fn export_to_file_with_copied_images() {
    let assets = tempfile::tempdir().unwrap();
    fs::write(assets.path().join("wood.png"), b"wood").unwrap();
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("models").join("crate.wom");
    fs::create_dir_all(output.parent().unwrap()).unwrap();

    let scene = Scene {
        base_dir: Some(assets.path().to_owned()),
        ..scene()
    };
    let config = ExportConfig {
        use_copy_images: true,
        ..Default::default()
    };
    let report = Exporter::new(&scene, config).export(&output).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(bytes.len() as u64, report.bytes_written);
    assert_eq!(wom::read(Cursor::new(bytes)).unwrap().meshes.len(), 2);
    assert_eq!(
        fs::read(out.path().join("models").join("wood.png")).unwrap(),
        b"wood"
    );
    // Only the first slot is written, so metal.png is never looked up.
    assert!(!report
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::AssetMissing { .. })));
}

#[test]
fn missing_uv_aborts() {
    let mut geometry = quad_geometry();
    geometry.uv_layers.clear();
    let scene = Scene {
        objects: vec![SceneObject {
            name: "Bare".to_owned(),
            selected: false,
            data: ObjectData::Mesh(Mesh {
                name: "Bare".to_owned(),
                geometry,
                materials: Vec::new(),
            }),
        }],
        ..Scene::new()
    };
    let err = Exporter::new(&scene, ExportConfig::default())
        .write_to(Vec::new(), Path::new("."))
        .unwrap_err();
    assert!(matches!(err, wom_exporter::ExportError::MissingUv { .. }));
}

#[test]
fn scene_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    let scene = scene();
    fs::write(&path, serde_json::to_string(&scene).unwrap()).unwrap();

    let loaded = scene_file::load(&path).unwrap();
    assert_eq!(loaded.objects, scene.objects);
    let (_, file) = export(&loaded, ExportConfig::default());
    assert_eq!(file.meshes.len(), 2);
}

#[test]
fn unreferenced_vertex_keeps_source_indices() {
    let mut geometry = quad_geometry();
    // Only the second triangle (vertices 2, 3 and 0) is kept, leaving vertex 1 unused.
    geometry.polygons.remove(0);
    let scene = Scene {
        objects: vec![SceneObject {
            name: "Half".to_owned(),
            selected: false,
            data: ObjectData::Mesh(Mesh {
                name: "Half".to_owned(),
                geometry,
                materials: Vec::new(),
            }),
        }],
        ..Scene::new()
    };

    let (report, file) = export(&scene, ExportConfig::default());
    assert_eq!(report.meshes[0].vertex_count, 3);
    assert_eq!(file.meshes[0].vertices.len(), 3);
    assert_eq!(file.meshes[0].triangles, vec![[2, 3, 0]]);

    let config = ExportConfig {
        compact_indices: true,
        ..Default::default()
    };
    let (_, file) = export(&scene, config);
    assert_eq!(file.meshes[0].triangles, vec![[1, 2, 0]]);
    assert_eq!(file.meshes[0].vertices[1].position, [1.0, 1.0, 0.0]);
}
