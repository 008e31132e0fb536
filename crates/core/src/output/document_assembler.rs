use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};

use crate::shared::constants::DOCUMENT_DPI;
use crate::shared::error::ExtractError;

/// Combines ordered screenshots into one multi-page PDF.
///
/// Each screenshot becomes one page, in the recorded order; pages are sized
/// to the image at a fixed raster resolution. The output path is chosen by
/// the caller and must lie outside the screenshot directory so the optional
/// cleanup pass cannot delete the document it just produced.
pub struct DocumentAssembler {
    dpi: f64,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self { dpi: DOCUMENT_DPI }
    }

    /// Builds the document. An empty screenshot list is fatal: there is
    /// nothing to assemble, and silently writing an empty file would hide a
    /// failed detection run.
    pub fn assemble(
        &self,
        screenshot_paths: &[impl AsRef<Path>],
        output_path: &Path,
    ) -> Result<(), ExtractError> {
        if screenshot_paths.is_empty() {
            return Err(ExtractError::AssemblyEmpty);
        }

        log::info!(
            "assembling {} pages into {}",
            screenshot_paths.len(),
            output_path.display()
        );

        let first = image::open(screenshot_paths[0].as_ref())?.to_rgb8();
        let (first_w, first_h) = first.dimensions();
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Extracted slides",
            self.page_dim(first_w),
            self.page_dim(first_h),
            "slide",
        );

        let layer = doc.get_page(first_page).get_layer(first_layer);
        self.place(first, layer);

        for path in &screenshot_paths[1..] {
            let page_image = image::open(path.as_ref())?.to_rgb8();
            let (width, height) = page_image.dimensions();
            let (page, layer) =
                doc.add_page(self.page_dim(width), self.page_dim(height), "slide");
            self.place(page_image, doc.get_page(page).get_layer(layer));
        }

        let file = File::create(output_path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ExtractError::Assembly(e.to_string()))?;
        Ok(())
    }

    fn page_dim(&self, pixels: u32) -> Mm {
        Mm::from(Px(pixels as usize).into_pt(self.dpi as f32))
    }

    /// Embeds raw RGB8 pixels as a full-page image. Raw placement avoids
    /// re-encoding and keeps the assembler independent of any particular
    /// decoder pairing.
    fn place(&self, rgb: image::RgbImage, layer: printpdf::PdfLayerReference) {
        let (width, height) = rgb.dimensions();
        let xobject = ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.into_raw(),
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        };
        Image::from(xobject).add_to_layer(
            layer,
            ImageTransform {
                dpi: Some(self.dpi as f32),
                ..Default::default()
            },
        );
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}
