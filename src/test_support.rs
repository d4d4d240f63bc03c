//! Builds small but well-formed EPUB 3 archives for tests.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Default)]
pub struct EpubFixture<'a> {
    pub title: Option<&'a str>,
    /// A second `dc:title`, refined with `title-type` main.
    pub main_title: Option<&'a str>,
    pub creators: &'a [&'a str],
    pub language: Option<&'a str>,
    pub description: Option<&'a str>,
    /// Body markup for each spine document. One placeholder chapter is
    /// written when empty.
    pub chapters: &'a [&'a str],
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

const NAV_XHTML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head><title>Contents</title></head>
<body>
  <nav epub:type="toc"><ol><li><a href="chapter1.xhtml">Start</a></li></ol></nav>
</body>
</html>
"#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn package_document(fixture: &EpubFixture, chapter_count: usize) -> String {
    let mut meta = String::from("    <dc:identifier id=\"uid\">urn:uuid:fixture</dc:identifier>\n");
    if let Some(title) = fixture.title {
        meta.push_str(&format!("    <dc:title>{}</dc:title>\n", escape(title)));
    }
    if let Some(main) = fixture.main_title {
        meta.push_str(&format!(
            "    <dc:title id=\"t2\">{}</dc:title>\n    <meta refines=\"#t2\" property=\"title-type\">main</meta>\n",
            escape(main)
        ));
    }
    for creator in fixture.creators {
        meta.push_str(&format!("    <dc:creator>{}</dc:creator>\n", escape(creator)));
    }
    if let Some(language) = fixture.language {
        meta.push_str(&format!("    <dc:language>{}</dc:language>\n", escape(language)));
    }
    if let Some(description) = fixture.description {
        meta.push_str(&format!(
            "    <dc:description>{}</dc:description>\n",
            escape(description)
        ));
    }
    meta.push_str("    <meta property=\"dcterms:modified\">2024-01-01T00:00:00Z</meta>\n");

    let mut manifest = String::from(
        "    <item id=\"nav\" href=\"nav.xhtml\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n",
    );
    let mut spine = String::new();
    for i in 1..=chapter_count {
        manifest.push_str(&format!(
            "    <item id=\"c{i}\" href=\"chapter{i}.xhtml\" media-type=\"application/xhtml+xml\"/>\n"
        ));
        spine.push_str(&format!("    <itemref idref=\"c{i}\"/>\n"));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
{meta}  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine>
{spine}  </spine>
</package>
"#
    )
}

fn chapter_document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Chapter</title></head>
<body>
{body}
</body>
</html>
"#
    )
}

pub fn write_epub(path: &Path, fixture: &EpubFixture) {
    let chapters: Vec<&str> = if fixture.chapters.is_empty() {
        vec!["<p>Placeholder.</p>"]
    } else {
        fixture.chapters.to_vec()
    };

    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/epub+zip").unwrap();

    zip.start_file("META-INF/container.xml", deflated).unwrap();
    zip.write_all(CONTAINER_XML.as_bytes()).unwrap();

    zip.start_file("OEBPS/content.opf", deflated).unwrap();
    zip.write_all(package_document(fixture, chapters.len()).as_bytes())
        .unwrap();

    zip.start_file("OEBPS/nav.xhtml", deflated).unwrap();
    zip.write_all(NAV_XHTML.as_bytes()).unwrap();

    for (i, body) in chapters.iter().enumerate() {
        zip.start_file(format!("OEBPS/chapter{}.xhtml", i + 1), deflated)
            .unwrap();
        zip.write_all(chapter_document(body).as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}
