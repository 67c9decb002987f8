use covid_story::ppt::{PptGenerator, SlideImage};
use std::fs::File;
use std::io::Read;

fn slides() -> Vec<SlideImage> {
    (1..=5)
        .map(|n| SlideImage {
            title: format!("Scene {}", n),
            png: vec![0x89, b'P', b'N', b'G', n],
            width: 1200,
            height: 600,
        })
        .collect()
}

#[test]
fn deck_has_one_slide_per_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.pptx");
    PptGenerator::generate_deck(&slides(), &path, "COVID-19 in New York").unwrap();

    let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for n in 1..=5 {
        assert!(names.contains(&format!("ppt/slides/slide{}.xml", n)));
        assert!(names.contains(&format!("ppt/media/image{}.png", n)));
    }
    assert!(!names.contains(&"ppt/slides/slide6.xml".to_string()));
    assert!(names.contains(&"[Content_Types].xml".to_string()));

    let mut slide = String::new();
    archive
        .by_name("ppt/slides/slide3.xml")
        .unwrap()
        .read_to_string(&mut slide)
        .unwrap();
    assert!(slide.contains("Scene 3"));

    let mut image = Vec::new();
    archive
        .by_name("ppt/media/image4.png")
        .unwrap()
        .read_to_end(&mut image)
        .unwrap();
    assert_eq!(image, vec![0x89, b'P', b'N', b'G', 4]);
}

#[test]
fn empty_deck_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.pptx");
    assert!(PptGenerator::generate_deck(&[], &path, "empty").is_err());
}
