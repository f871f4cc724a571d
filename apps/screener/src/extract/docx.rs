use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use zip::ZipArchive;

const BODY_PART: &str = "word/document.xml";

static PARAGRAPH_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</w:p>|<w:br[^>]*/>|<w:cr[^>]*/>").expect("valid pattern"));
static TAB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<w:tab[^>]*/>").expect("valid pattern"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid pattern"));

/// Extracts text from a Word document: headers, then body, then footers.
pub(super) fn extract(bytes: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;

    let mut headers = Vec::new();
    let mut footers = Vec::new();
    for name in archive.file_names() {
        if name.starts_with("word/header") && name.ends_with(".xml") {
            headers.push(name.to_string());
        } else if name.starts_with("word/footer") && name.ends_with(".xml") {
            footers.push(name.to_string());
        }
    }
    headers.sort();
    footers.sort();

    let body = read_part(&mut archive, BODY_PART)?
        .ok_or_else(|| format!("archive has no {BODY_PART}"))?;

    let mut text = String::new();
    for name in &headers {
        if let Some(xml) = read_part(&mut archive, name)? {
            text.push_str(&xml_to_text(&xml));
        }
    }
    text.push_str(&xml_to_text(&body));
    for name in &footers {
        if let Some(xml) = read_part(&mut archive, name)? {
            text.push_str(&xml_to_text(&xml));
        }
    }
    Ok(text)
}

fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<String>, String> {
    let mut file = match archive.by_name(name) {
        Ok(f) => f,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| format!("{name}: {e}"))?;
    Ok(Some(xml))
}

fn xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = TAG.replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
