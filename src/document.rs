//! # Label Documents
//!
//! Wraps one rendered label image into a single-page Word document (DOCX).
//!
//! A DOCX file is a zip package of XML parts. The package written here is the
//! smallest one Word and LibreOffice open without complaint:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/core.xml
//! word/document.xml              one paragraph, one inline picture
//! word/_rels/document.xml.rels   picture relationship
//! word/media/image1.<ext>        the label image, byte-for-byte
//! ```
//!
//! The picture is scaled to a fixed width and keeps the image's aspect ratio.

use image::ImageFormat;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::LabelError;

/// Extension of generated documents.
pub const DOCUMENT_EXTENSION: &str = "docx";

/// English Metric Units per inch (DrawingML's length unit).
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Characters that cannot appear in file names on common filesystems.
const ILLEGAL_FILE_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace every filesystem-illegal character with `_`.
pub fn sanitize_file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| if ILLEGAL_FILE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// `<sanitized label>.docx`
pub fn document_file_name(label: &str) -> String {
    format!("{}.{}", sanitize_file_stem(label), DOCUMENT_EXTENSION)
}

pub fn inches_to_emu(inches: f32) -> u64 {
    (inches as f64 * EMU_PER_INCH).round() as u64
}

/// A one-page document holding a single picture.
#[derive(Debug, Clone)]
pub struct LabelDocument {
    image: Vec<u8>,
    format: ImageFormat,
    pixel_size: (u32, u32),
    width_emu: u64,
    name: String,
    description: String,
}

impl LabelDocument {
    /// Read an image that has already been written to disk.
    pub fn from_image_file(path: &Path, width_inches: f32) -> Result<Self, LabelError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_image_bytes(bytes, name, width_inches)
    }

    pub fn from_image_bytes(image: Vec<u8>, name: String, width_inches: f32) -> Result<Self, LabelError> {
        let format = image::guess_format(&image)
            .map_err(|e| LabelError::Image(format!("Unrecognized image {}: {}", name, e)))?;
        if media_type(format).is_none() {
            return Err(LabelError::Document(format!(
                "{:?} images cannot be embedded in a document",
                format
            )));
        }
        let decoded = image::load_from_memory_with_format(&image, format)
            .map_err(|e| LabelError::Image(format!("Failed to decode {}: {}", name, e)))?;

        Ok(Self {
            image,
            format,
            pixel_size: (decoded.width(), decoded.height()),
            width_emu: inches_to_emu(width_inches),
            name,
            description: String::new(),
        })
    }

    /// Alt text attached to the picture.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Picture size on the page in EMU, aspect ratio preserved.
    pub fn extent_emu(&self) -> (u64, u64) {
        let (w, h) = self.pixel_size;
        if w == 0 {
            return (self.width_emu, 0);
        }
        let height = (self.width_emu as u128 * h as u128 / w as u128) as u64;
        (self.width_emu, height)
    }

    /// Build the DOCX package in memory.
    pub fn to_docx(&self) -> Result<Vec<u8>, LabelError> {
        let (ext, content_type) = media_type(self.format).ok_or_else(|| {
            LabelError::Document(format!("{:?} images cannot be embedded", self.format))
        })?;
        let media_part = format!("word/media/image1.{}", ext);

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, Vec<u8>); 5] = [
            ("[Content_Types].xml", content_types_xml(ext, content_type).into_bytes()),
            ("_rels/.rels", PACKAGE_RELS_XML.as_bytes().to_vec()),
            ("docProps/core.xml", core_props_xml(&self.description).into_bytes()),
            ("word/document.xml", self.document_xml().into_bytes()),
            ("word/_rels/document.xml.rels", document_rels_xml(ext).into_bytes()),
        ];
        for (name, data) in parts.iter() {
            writer.start_file(*name, options).map_err(document_error)?;
            writer.write_all(data)?;
        }

        // Already-compressed image data goes in stored.
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file(media_part, stored).map_err(document_error)?;
        writer.write_all(&self.image)?;

        let cursor = writer.finish().map_err(document_error)?;
        Ok(cursor.into_inner())
    }

    /// Build the package and write it to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), LabelError> {
        let bytes = self.to_docx()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn document_xml(&self) -> String {
        let (cx, cy) = self.extent_emu();
        let name = xml_escape(&self.name);
        let descr = xml_escape(&self.description);
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:wp=\"http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing\" \
xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:pic=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">\
<w:body><w:p><w:r><w:drawing>\
<wp:inline distT=\"0\" distB=\"0\" distL=\"0\" distR=\"0\">\
<wp:extent cx=\"{cx}\" cy=\"{cy}\"/>\
<wp:docPr id=\"1\" name=\"{name}\" descr=\"{descr}\"/>\
<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect=\"1\"/></wp:cNvGraphicFramePr>\
<a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">\
<pic:pic><pic:nvPicPr><pic:cNvPr id=\"0\" name=\"{name}\"/><pic:cNvPicPr/></pic:nvPicPr>\
<pic:blipFill><a:blip r:embed=\"rId1\"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>\
<pic:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></pic:spPr>\
</pic:pic></a:graphicData></a:graphic></wp:inline>\
</w:drawing></w:r></w:p>\
<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>\
<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\
</w:sectPr></w:body></w:document>"
        )
    }
}

fn document_error(e: zip::result::ZipError) -> LabelError {
    LabelError::Document(e.to_string())
}

/// Part extension and content type for embeddable image formats.
fn media_type(format: ImageFormat) -> Option<(&'static str, &'static str)> {
    match format {
        ImageFormat::Jpeg => Some(("jpeg", "image/jpeg")),
        ImageFormat::Png => Some(("png", "image/png")),
        ImageFormat::Gif => Some(("gif", "image/gif")),
        ImageFormat::Bmp => Some(("bmp", "image/bmp")),
        ImageFormat::Tiff => Some(("tiff", "image/tiff")),
        _ => None,
    }
}

const PACKAGE_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
</Relationships>";

fn content_types_xml(ext: &str, content_type: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Default Extension=\"{ext}\" ContentType=\"{content_type}\"/>\
<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
</Types>"
    )
}

fn document_rels_xml(ext: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/image1.{ext}\"/>\
</Relationships>"
    )
}

fn core_props_xml(title: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\
<dc:title>{}</dc:title><dc:creator>labelsmith</dc:creator>\
</cp:coreProperties>",
        xml_escape(title)
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            c => out.push(c),
        }
    }
    out
}
