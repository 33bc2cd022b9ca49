use std::fmt::Display;
use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::{DocumentParseError, EmbeddedImage};

/// Per-page outcome of pulling raster images out of a PDF.
pub(super) type PageImages = Result<Vec<EmbeddedImage>, DocumentParseError>;

/// Collects the raster image objects of every page as PNG bytes.
///
/// The outer error means the document could not be opened by pdfium at all;
/// a failure on one page is reported in that page's slot only.
pub(super) fn extract_page_images(
    path: &Path,
    library_path: Option<&Path>,
) -> Result<Vec<PageImages>, DocumentParseError> {
    let bindings = match library_path {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| DocumentParseError::ImageExtraction(format!("pdfium bind failed: {e}")))?;
    let pdfium = Pdfium::new(bindings);

    let doc = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| DocumentParseError::ImageExtraction(format!("pdfium open failed: {e}")))?;

    let page_count = doc.pages().len();
    let mut pages = Vec::with_capacity(page_count as usize);

    for index in 0..page_count {
        let page_images = doc
            .pages()
            .get(index)
            .map_err(|e| {
                DocumentParseError::ImageExtraction(format!("page {index} access failed: {e}"))
            })
            .and_then(|page| page_images(&page, index));
        pages.push(page_images);
    }

    Ok(pages)
}

fn page_images(page: &PdfPage<'_>, page_index: impl Display) -> PageImages {
    let objects = page.objects();
    let mut images = Vec::new();

    for object_index in 0..objects.len() {
        let object = objects.get(object_index).map_err(|e| {
            DocumentParseError::ImageExtraction(format!(
                "page {page_index} object {object_index} access failed: {e}"
            ))
        })?;

        let Some(image_object) = object.as_image_object() else {
            continue;
        };

        let dynamic_image = image_object.get_raw_image().map_err(|e| {
            DocumentParseError::ImageExtraction(format!(
                "page {page_index} image decode failed: {e}"
            ))
        })?;

        let mut png: Vec<u8> = Vec::new();
        dynamic_image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| {
                DocumentParseError::ImageExtraction(format!(
                    "PNG encode page {page_index} failed: {e}"
                ))
            })?;

        images.push(EmbeddedImage {
            index: images.len(),
            png,
        });
    }

    Ok(images)
}
