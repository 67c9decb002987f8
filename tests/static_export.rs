use covid_story::data::DataLoader;
use covid_story::export::{ImageFormat, SceneExporter};
use covid_story::scene::{SceneController, SceneView};
use std::fs;

const CSV: &str = "date,state,cases,deaths
2021-03-24,New York,20184,88
2021-06-01,New York,800,12
2021-11-16,New York,6200,22
2022-01-07,New York,90132,150
";

fn views() -> Vec<SceneView> {
    let records = DataLoader::parse_csv(CSV).unwrap();
    SceneController::default().build_views(&records)
}

#[test]
fn png_export_writes_one_file_per_scene() {
    let dir = tempfile::tempdir().unwrap();
    let paths =
        SceneExporter::write_images(&views(), dir.path(), ImageFormat::Png, 1200, 600).unwrap();
    assert_eq!(paths.len(), 5);

    for n in 1..=5 {
        let path = dir.path().join(format!("scene{}.png", n));
        assert!(paths.contains(&path));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}

#[test]
fn svg_export_writes_one_file_per_scene() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");
    let views = views();
    let paths = SceneExporter::write_images(&views, &out, ImageFormat::Svg, 1200, 600).unwrap();
    assert_eq!(paths.len(), 5);

    for view in &views {
        let path = out.join(format!("scene{}.svg", view.id.get()));
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains(&view.title));
    }
}

#[test]
fn deck_export_renders_every_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.pptx");
    SceneExporter::write_deck(&views(), &path, 1200, 600).unwrap();

    let archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
    let slides = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count();
    assert_eq!(slides, 5);
}
