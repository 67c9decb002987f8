//! Scene Export Module
//! Renders the scenes in parallel and writes them as image files or a deck.

use crate::charts::{RenderError, StaticSceneRenderer};
use crate::ppt::{PptGenerator, SlideImage};
use crate::scene::SceneView;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DECK_TITLE: &str = "COVID-19 in New York";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

pub struct SceneExporter;

impl SceneExporter {
    /// `scene<N>.<ext>`
    pub fn file_name(view: &SceneView, format: ImageFormat) -> String {
        format!("scene{}.{}", view.id.get(), format.extension())
    }

    /// Render every view, keeping the input order.
    pub fn render_all(
        views: &[SceneView],
        format: ImageFormat,
        width: u32,
        height: u32,
    ) -> Result<Vec<Vec<u8>>, RenderError> {
        views
            .par_iter()
            .map(|view| match format {
                ImageFormat::Png => StaticSceneRenderer::render_png(view, width, height),
                ImageFormat::Svg => {
                    StaticSceneRenderer::render_svg(view, width, height).map(String::into_bytes)
                }
            })
            .collect()
    }

    /// Write one file per scene into `dir`, returning the written paths.
    pub fn write_images(
        views: &[SceneView],
        dir: &Path,
        format: ImageFormat,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let rendered = Self::render_all(views, format, width, height)?;

        let mut paths = Vec::with_capacity(views.len());
        for (view, bytes) in views.iter().zip(rendered) {
            let path = dir.join(Self::file_name(view, format));
            fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            paths.push(path);
        }

        info!(dir = %dir.display(), files = paths.len(), format = format.extension(), "scenes exported");
        Ok(paths)
    }

    /// Write all scenes as a PPTX deck, one slide per scene.
    pub fn write_deck(views: &[SceneView], path: &Path, width: u32, height: u32) -> Result<()> {
        anyhow::ensure!(!views.is_empty(), "no scenes to export");
        let rendered = Self::render_all(views, ImageFormat::Png, width, height)?;
        let slides: Vec<SlideImage> = views
            .iter()
            .zip(rendered)
            .map(|(view, png)| SlideImage {
                title: view.title.clone(),
                png,
                width,
                height,
            })
            .collect();
        PptGenerator::generate_deck(&slides, path, DECK_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneController;

    #[test]
    fn files_are_named_by_scene() {
        let views = SceneController::default().build_views(&[]);
        assert_eq!(SceneExporter::file_name(&views[0], ImageFormat::Png), "scene1.png");
        assert_eq!(SceneExporter::file_name(&views[4], ImageFormat::Svg), "scene5.svg");
    }

    #[test]
    fn empty_deck_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.pptx");
        assert!(SceneExporter::write_deck(&[], &path, 1200, 600).is_err());
        assert!(!path.exists());
    }
}
