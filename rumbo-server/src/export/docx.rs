//! DOCX package assembly.

use std::io::{Cursor, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use image::{GenericImageView, ImageFormat, ImageReader};
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::ooxml::{self, Align, EMU_PER_INCH, R_NS, W_NS, WP_NS, XML_DECL};
use super::{ExportError, GeneratedDocument, export_filename};
use crate::survey::{Segment, narrative_lines};

/// Logo width in the page header, in hundredths of an inch.
const LOGO_WIDTH_CENTI_INCHES: u64 = 180;

const TITLE: &str = "Redacción topográfica";

const DETAIL_COLUMNS: [&str; 7] = [
    "Estación inicial",
    "Estación final",
    "Rumbo",
    "Rumbo compacto",
    "Distancia (m)",
    "Distancia en letras",
    "Colindancia",
];

/// A PNG logo for the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    png: Vec<u8>,
    width_px: u32,
    height_px: u32,
}

impl Logo {
    /// Decode PNG bytes to check them and read the pixel size.
    ///
    /// The whole image is decoded, so truncated or corrupt files are rejected
    /// here instead of ending up as a broken picture in the document.
    pub fn from_png(png: Vec<u8>) -> Result<Self, ExportError> {
        let reader = ImageReader::new(Cursor::new(&png))
            .with_guessed_format()
            .map_err(ExportError::LogoIo)?;
        if reader.format() != Some(ImageFormat::Png) {
            return Err(ExportError::InvalidLogo("not a PNG image"));
        }
        let image = reader.decode().map_err(ExportError::LogoDecode)?;
        let (width_px, height_px) = image.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(ExportError::InvalidLogo("zero-sized image"));
        }
        Ok(Self {
            png,
            width_px,
            height_px,
        })
    }

    /// Load a logo from disk. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ExportError> {
        if !path.exists() {
            debug!(path = %path.display(), "no logo file");
            return Ok(None);
        }
        let png = std::fs::read(path).map_err(ExportError::LogoIo)?;
        Self::from_png(png).map(Some)
    }

    /// Display size in EMU at the fixed header width, keeping the aspect ratio.
    fn extent(&self) -> (u64, u64) {
        let cx = EMU_PER_INCH * LOGO_WIDTH_CENTI_INCHES / 100;
        let cy = cx * u64::from(self.height_px) / u64::from(self.width_px);
        (cx, cy)
    }
}

/// Renders segment reports to DOCX.
#[derive(Debug, Clone)]
pub struct DocxExporter {
    header_text: String,
    logo: Option<Logo>,
}

impl DocxExporter {
    pub fn new(header_text: impl Into<String>, logo: Option<Logo>) -> Self {
        Self {
            header_text: header_text.into(),
            logo,
        }
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Build the document for `segments`, stamped with `generated_at`.
    pub fn render(
        &self,
        segments: &[Segment],
        generated_at: NaiveDateTime,
    ) -> Result<GeneratedDocument, ExportError> {
        if segments.is_empty() {
            return Err(ExportError::Empty);
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut parts = vec![
            ("[Content_Types].xml", content_types().into_bytes()),
            (
                "_rels/.rels",
                format!(
                    r#"{XML_DECL}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{R_NS}/officeDocument" Target="word/document.xml"/></Relationships>"#,
                    ooxml::PKG_REL_NS
                )
                .into_bytes(),
            ),
            (
                "word/_rels/document.xml.rels",
                ooxml::relationships(&[
                    ("rId1", "styles", "styles.xml"),
                    ("rId2", "header", "header1.xml"),
                ])
                .into_bytes(),
            ),
            ("word/styles.xml", styles().into_bytes()),
            ("word/header1.xml", self.header().into_bytes()),
            (
                "word/document.xml",
                document(segments, generated_at).into_bytes(),
            ),
        ];
        if let Some(logo) = &self.logo {
            parts.push((
                "word/_rels/header1.xml.rels",
                ooxml::relationships(&[("rIdLogo", "image", "media/logo.png")]).into_bytes(),
            ));
            parts.push(("word/media/logo.png", logo.png.clone()));
        }

        for (name, bytes) in &parts {
            zip.start_file(*name, options)?;
            zip.write_all(bytes)?;
        }
        let bytes = zip.finish()?.into_inner();

        let filename = export_filename(segments);
        info!(
            segments = segments.len(),
            size = bytes.len(),
            filename = %filename,
            "rendered DOCX"
        );
        Ok(GeneratedDocument { filename, bytes })
    }

    fn header(&self) -> String {
        let logo_cell = match &self.logo {
            Some(logo) => {
                let (cx, cy) = logo.extent();
                ooxml::paragraph(
                    &ooxml::inline_picture("rIdLogo", "logo.png", cx, cy),
                    None,
                    Some(Align::Left),
                )
            }
            None => ooxml::paragraph("", None, None),
        };
        let text_cell = ooxml::paragraph(
            &ooxml::run(&self.header_text, true, Some(20)),
            None,
            Some(Align::Right),
        );
        let table = ooxml::table(
            None,
            2,
            &[ooxml::row(
                &[ooxml::cell(&logo_cell), ooxml::cell(&text_cell)],
                false,
            )],
        );
        format!(
            r#"{XML_DECL}<w:hdr xmlns:w="{W_NS}" xmlns:r="{R_NS}" xmlns:wp="{WP_NS}">{table}<w:p/></w:hdr>"#
        )
    }
}

fn document(segments: &[Segment], generated_at: NaiveDateTime) -> String {
    let mut body = String::new();
    body.push_str(&ooxml::paragraph(
        &ooxml::run(TITLE, false, None),
        Some("Heading1"),
        None,
    ));
    body.push_str(&ooxml::text_paragraph(
        &generated_at
            .format("Generado el %Y-%m-%d %H:%M:%S")
            .to_string(),
    ));

    body.push_str(&ooxml::bold_paragraph("Resumen:"));
    for line in narrative_lines(segments) {
        body.push_str(&ooxml::text_paragraph(&line));
    }

    body.push_str(&ooxml::bold_paragraph("Detalle de tramos:"));
    body.push_str(&detail_table(segments));

    format!(
        concat!(
            r#"{decl}<w:document xmlns:w="{w}" xmlns:r="{r}"><w:body>{body}<w:sectPr>"#,
            r#"<w:headerReference w:type="default" r:id="rId2"/>"#,
            r#"<w:pgSz w:w="12240" w:h="15840"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
            r#"</w:sectPr></w:body></w:document>"#,
        ),
        decl = XML_DECL,
        w = W_NS,
        r = R_NS,
        body = body,
    )
}

fn detail_table(segments: &[Segment]) -> String {
    let text_cell = |text: &str| ooxml::cell(&ooxml::text_paragraph(text));

    let mut rows = Vec::with_capacity(segments.len() + 1);
    rows.push(ooxml::row(
        &DETAIL_COLUMNS
            .iter()
            .map(|h| ooxml::cell(&ooxml::bold_paragraph(h)))
            .collect::<Vec<_>>(),
        true,
    ));
    for segment in segments {
        rows.push(ooxml::row(
            &[
                text_cell(&segment.start_label_text),
                text_cell(&segment.end_label_text),
                text_cell(&segment.bearing_prose),
                compact_cell(segment),
                text_cell(&segment.distance_display()),
                text_cell(segment.distance_words.as_deref().unwrap_or("")),
                text_cell(segment.adjacency.as_deref().unwrap_or("")),
            ],
            false,
        ));
    }
    ooxml::table(Some("TableGrid"), DETAIL_COLUMNS.len(), &rows)
}

/// Requested compact form, with the conventional form underneath.
fn compact_cell(segment: &Segment) -> String {
    let mut content = ooxml::text_paragraph(&segment.bearing_compact);
    if !segment.bearing_conventional.is_empty() {
        content.push_str(&ooxml::text_paragraph(&format!(
            "Convencional: {}",
            segment.bearing_conventional
        )));
    }
    ooxml::cell(&content)
}

fn content_types() -> String {
    const WML: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";
    format!(
        concat!(
            r#"{decl}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Default Extension="png" ContentType="image/png"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="{wml}.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="{wml}.styles+xml"/>"#,
            r#"<Override PartName="/word/header1.xml" ContentType="{wml}.header+xml"/>"#,
            r#"</Types>"#,
        ),
        decl = XML_DECL,
        wml = WML,
    )
}

/// Calibri 11pt body text, a bold heading and a bordered table style.
fn styles() -> String {
    let borders: String = ["top", "left", "bottom", "right", "insideH", "insideV"]
        .iter()
        .map(|side| format!(r#"<w:{side} w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#))
        .collect();
    format!(
        concat!(
            r#"{decl}<w:styles xmlns:w="{w}">"#,
            r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/>"#,
            r#"<w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="es-HN"/>"#,
            r#"</w:rPr></w:rPrDefault></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/>"#,
            r#"<w:pPr><w:spacing w:after="120"/></w:pPr></w:style>"#,
            r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/>"#,
            r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/>"#,
            r#"<w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr>"#,
            r#"<w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style>"#,
            r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/>"#,
            r#"<w:tblPr><w:tblBorders>{borders}</w:tblBorders></w:tblPr></w:style>"#,
            r#"</w:styles>"#,
        ),
        decl = XML_DECL,
        w = W_NS,
        borders = borders,
    )
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::domain::Bearing;

    const HEADER: &str = "Este programa fue creado por Honduras Constructores S de R L";

    fn generated_at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    fn segments() -> Vec<Segment> {
        let bearing = Bearing::parse("N, 25, 35, 20, O").unwrap();
        vec![
            Segment::new(
                "uno".into(),
                "dos".into(),
                &bearing,
                Some(10.15),
                Some("diez punto quince metros".into()),
                "calle <principal> & acera",
            ),
            Segment::new("dos".into(), "tres".into(), &bearing, None, None, ""),
        ]
    }

    /// A real 200x100 PNG.
    fn png_bytes() -> Vec<u8> {
        let image = image::DynamicImage::ImageRgba8(image::RgbaImage::new(200, 100));
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn read_part(bytes: &[u8], name: &str) -> Option<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        Some(out)
    }

    #[test]
    fn document_contains_summary_and_table() {
        let exporter = DocxExporter::new(HEADER, None);
        let doc = exporter.render(&segments(), generated_at()).unwrap();
        let xml = read_part(&doc.bytes, "word/document.xml").unwrap();

        assert!(xml.contains("Redacción topográfica"));
        assert!(xml.contains("Generado el 2024-03-15 09:05:07"));
        assert!(xml.contains("Tramo 1: De la estación uno a la estación dos"));
        assert!(xml.contains("Tramo 2: De la estación dos a la estación tres"));
        for header in DETAIL_COLUMNS {
            assert!(xml.contains(header), "missing column {header}");
        }
        assert!(xml.contains("10.15"));
        assert!(xml.contains("N ° 25 35´20´O"));
        assert!(xml.contains("Convencional: N 25° 35&apos; 20&apos;&apos; O"));
        assert!(xml.contains("Colinda con calle &lt;principal&gt; &amp; acera."));
        assert_eq!(doc.filename, "Redaccion_uno_tres.docx");
    }

    #[test]
    fn control_characters_do_not_reach_the_package() {
        let bearing = Bearing::parse("N 1 2 3 E").unwrap();
        let segments = vec![Segment::new(
            "uno\u{7}".into(),
            "dos".into(),
            &bearing,
            None,
            None,
            "calle\u{1}x",
        )];
        let doc = DocxExporter::new(HEADER, None)
            .render(&segments, generated_at())
            .unwrap();
        let xml = read_part(&doc.bytes, "word/document.xml").unwrap();

        assert!(!xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
        assert!(xml.contains("Colinda con callex."));
    }

    #[test]
    fn columns_are_in_fixed_order() {
        let exporter = DocxExporter::new(HEADER, None);
        let doc = exporter.render(&segments(), generated_at()).unwrap();
        let xml = read_part(&doc.bytes, "word/document.xml").unwrap();

        let positions: Vec<usize> = DETAIL_COLUMNS
            .iter()
            .map(|h| xml.find(&format!(">{h}<")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn header_without_logo() {
        let exporter = DocxExporter::new(HEADER, None);
        let doc = exporter.render(&segments(), generated_at()).unwrap();

        let header = read_part(&doc.bytes, "word/header1.xml").unwrap();
        assert!(header.contains(HEADER));
        assert!(!header.contains("w:drawing"));
        assert!(read_part(&doc.bytes, "word/media/logo.png").is_none());
        assert!(read_part(&doc.bytes, "[Content_Types].xml").is_some());
        assert!(read_part(&doc.bytes, "word/styles.xml").unwrap().contains("Calibri"));
    }

    #[test]
    fn header_with_logo() {
        let logo = Logo::from_png(png_bytes()).unwrap();
        let exporter = DocxExporter::new(HEADER, Some(logo));
        assert!(exporter.has_logo());

        let doc = exporter.render(&segments(), generated_at()).unwrap();
        let header = read_part(&doc.bytes, "word/header1.xml").unwrap();
        assert!(header.contains(r#"r:embed="rIdLogo""#));
        // 1.8in wide, half as tall
        assert!(header.contains(r#"cx="1645920" cy="822960""#));

        let rels = read_part(&doc.bytes, "word/_rels/header1.xml.rels").unwrap();
        assert!(rels.contains("media/logo.png"));
    }

    #[test]
    fn empty_report_is_rejected() {
        let exporter = DocxExporter::new(HEADER, None);
        assert!(matches!(
            exporter.render(&[], generated_at()),
            Err(ExportError::Empty)
        ));
    }

    #[test]
    fn invalid_logo_rejected() {
        assert!(matches!(
            Logo::from_png(b"GIF89a not a png at all....".to_vec()),
            Err(ExportError::InvalidLogo(_))
        ));
        assert!(Logo::from_png(vec![]).is_err());
    }

    #[test]
    fn truncated_logo_rejected() {
        let png = png_bytes();
        let logo = Logo::from_png(png.clone()).unwrap();
        assert_eq!((logo.width_px, logo.height_px), (200, 100));

        // Signature and IHDR survive, pixel data does not
        let truncated = png[..png.len() / 2].to_vec();
        assert!(Logo::from_png(truncated).is_err());

        // Signature plus IHDR chunk only
        assert!(Logo::from_png(png[..33].to_vec()).is_err());
    }

    #[test]
    fn load_logo_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        assert_eq!(Logo::load(&path).unwrap(), None);

        std::fs::write(&path, png_bytes()).unwrap();
        let logo = Logo::load(&path).unwrap().unwrap();
        assert_eq!((logo.width_px, logo.height_px), (200, 100));
    }
}
