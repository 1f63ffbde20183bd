//! WordprocessingML fragments.
//!
//! Just enough of the format for paragraphs, bold runs, simple tables and an
//! inline picture. All text goes through [`escape`].

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// English Metric Units per inch.
pub const EMU_PER_INCH: u64 = 914_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Escape text for element content and attribute values.
///
/// Characters XML 1.0 does not allow at all (most C0 controls, U+FFFE and
/// U+FFFF) are dropped.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// A text run. `size` is in half-points.
pub fn run(text: &str, bold: bool, size: Option<u32>) -> String {
    let mut props = String::new();
    if bold {
        props.push_str("<w:b/>");
    }
    if let Some(size) = size {
        props.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
    }
    let props = if props.is_empty() {
        props
    } else {
        format!("<w:rPr>{props}</w:rPr>")
    };
    format!(
        r#"<w:r>{props}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape(text)
    )
}

/// A paragraph wrapping already built runs.
pub fn paragraph(runs: &str, style: Option<&str>, align: Option<Align>) -> String {
    let mut props = String::new();
    if let Some(style) = style {
        props.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
    }
    match align {
        Some(Align::Left) => props.push_str(r#"<w:jc w:val="left"/>"#),
        Some(Align::Right) => props.push_str(r#"<w:jc w:val="right"/>"#),
        None => {}
    }
    let props = if props.is_empty() {
        props
    } else {
        format!("<w:pPr>{props}</w:pPr>")
    };
    format!("<w:p>{props}{runs}</w:p>")
}

/// A plain paragraph of text.
pub fn text_paragraph(text: &str) -> String {
    paragraph(&run(text, false, None), None, None)
}

/// A paragraph with a single bold run.
pub fn bold_paragraph(text: &str) -> String {
    paragraph(&run(text, true, None), None, None)
}

/// A table cell holding the given block content (at least one paragraph).
pub fn cell(content: &str) -> String {
    format!(r#"<w:tc><w:tcPr><w:tcW w:w="0" w:type="auto"/></w:tcPr>{content}</w:tc>"#)
}

/// A table row; `header` marks it to repeat on each page.
pub fn row(cells: &[String], header: bool) -> String {
    let props = if header {
        "<w:trPr><w:tblHeader/></w:trPr>"
    } else {
        ""
    };
    format!("<w:tr>{props}{}</w:tr>", cells.concat())
}

/// A table with `columns` auto-width columns.
pub fn table(style: Option<&str>, columns: usize, rows: &[String]) -> String {
    let style = style
        .map(|s| format!(r#"<w:tblStyle w:val="{s}"/>"#))
        .unwrap_or_default();
    let grid = r#"<w:gridCol w:w="0"/>"#.repeat(columns);
    format!(
        r#"<w:tbl><w:tblPr>{style}<w:tblW w:w="5000" w:type="pct"/></w:tblPr><w:tblGrid>{grid}</w:tblGrid>{}</w:tbl>"#,
        rows.concat()
    )
}

/// An inline picture referencing relationship `rel_id`, sized in EMU.
pub fn inline_picture(rel_id: &str, name: &str, cx: u64, cy: u64) -> String {
    let name = escape(name);
    format!(
        concat!(
            r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="1" name="{name}"/>"#,
            r#"<a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        ),
        cx = cx,
        cy = cy,
        name = name,
        rel_id = rel_id,
    )
}

/// A package relationships part.
pub fn relationships(rels: &[(&str, &str, &str)]) -> String {
    let body: String = rels
        .iter()
        .map(|(id, kind, target)| {
            format!(
                r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{kind}" Target="{target}"/>"#
            )
        })
        .collect();
    format!(r#"{XML_DECL}<Relationships xmlns="{PKG_REL_NS}">{body}</Relationships>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"a & b <c> "d" 'e'"#),
            "a &amp; b &lt;c&gt; &quot;d&quot; &apos;e&apos;"
        );
        assert_eq!(escape("Redacción ° ´"), "Redacción ° ´");
    }

    #[test]
    fn drops_characters_xml_forbids() {
        assert_eq!(escape("calle\u{1}x"), "callex");
        assert_eq!(escape("a\u{0}\u{8}\u{b}\u{c}\u{1f}b"), "ab");
        assert_eq!(escape("\u{fffe}\u{ffff}ok"), "ok");
        assert_eq!(escape("tab\there\r\nnext"), "tab\there\r\nnext");
        assert_eq!(escape("🗺"), "🗺");
    }

    #[test]
    fn run_properties() {
        assert_eq!(
            run("x", false, None),
            r#"<w:r><w:t xml:space="preserve">x</w:t></w:r>"#
        );
        assert_eq!(
            run("x", true, Some(20)),
            r#"<w:r><w:rPr><w:b/><w:sz w:val="20"/><w:szCs w:val="20"/></w:rPr><w:t xml:space="preserve">x</w:t></w:r>"#
        );
    }

    #[test]
    fn paragraph_properties() {
        assert_eq!(paragraph("", None, None), "<w:p></w:p>");
        assert_eq!(
            paragraph("", Some("Heading1"), Some(Align::Right)),
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:jc w:val="right"/></w:pPr></w:p>"#
        );
    }

    #[test]
    fn table_has_grid_per_column() {
        let t = table(Some("TableGrid"), 3, &[row(&[cell("<w:p/>")], true)]);
        assert_eq!(t.matches("<w:gridCol").count(), 3);
        assert!(t.contains("<w:tblHeader/>"));
        assert!(t.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
    }

    #[test]
    fn relationships_part() {
        let rels = relationships(&[("rId1", "styles", "styles.xml")]);
        assert!(rels.starts_with(XML_DECL));
        assert!(rels.contains(r#"Id="rId1""#));
        assert!(rels.contains("relationships/styles"));
    }
}
