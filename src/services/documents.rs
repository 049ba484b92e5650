// Document Analysis Service
// Metadata sniffing plus text extraction for uploaded documents, blended with the text detector

use regex::Regex;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::models::{Confidence, DocumentAnalysis, EnsembleResult, MetadataDetail};
use crate::services::detection::calibration::{to_percent, verdict, MAX_PROBABILITY, MIN_PROBABILITY};
use crate::services::detection::stats::clamp;
use crate::services::detection::analyze;
use crate::services::error::DocumentError;

/// Only the head of a binary document is scanned for metadata markers.
pub const METADATA_SCAN_BYTES: usize = 1024 * 1024;
/// Extracted text shorter than this is not worth a linguistic pass.
pub const MIN_EXTRACTED_CHARS: usize = 100;

const BASE_PROBABILITY: f64 = 0.40;
const AI_SIGNATURE_BOOST: f64 = 0.35;
const AUTHOR_PENALTY: f64 = 0.10;
const OFFICE_PENALTY: f64 = 0.05;
const METADATA_BLEND: f64 = 0.3;
const TEXT_BLEND: f64 = 0.7;

const AI_TOOL_SIGNATURES: [(&str, &str); 14] = [
    ("ChatGPT", r"chatgpt|gpt-4|gpt-3\.5|gpt-4o"),
    ("Claude", r"claude|anthropic"),
    ("Gemini", r"gemini|bard|google.?ai"),
    ("Copilot", r"copilot|bing.?ai"),
    ("Jasper", r"jasper\.ai|jasper"),
    ("WriteSonic", r"writesonic"),
    ("Grammarly AI", r"grammarly"),
    ("QuillBot", r"quillbot"),
    ("Copy.ai", r"copy\.ai"),
    ("Notion AI", r"notion.?ai"),
    ("Rytr", r"rytr"),
    ("Wordtune", r"wordtune"),
    ("Sudowrite", r"sudowrite"),
    ("Perplexity", r"perplexity"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
    /// Legacy formats we only sniff for metadata.
    MetadataOnly,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, DocumentError> {
        let ext = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Ok(Self::PlainText),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "doc" | "rtf" => Ok(Self::MetadataOnly),
            "" => Err(DocumentError::UnsupportedType(file_name.to_string())),
            other => Err(DocumentError::UnsupportedType(format!(".{}", other))),
        }
    }
}

fn signature_res() -> &'static [(&'static str, Regex)] {
    static RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RES.get_or_init(|| {
        AI_TOOL_SIGNATURES
            .iter()
            .map(|(name, pattern)| {
                let re = Regex::new(&format!("(?i){}", pattern)).expect("signature regex");
                (*name, re)
            })
            .collect()
    })
}

fn author_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)author|creator|producer").expect("author regex"))
}

fn office_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)microsoft|word|excel|powerpoint|libreoffice|google.?docs|pages|keynote")
            .expect("office regex")
    })
}

fn paren_string_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^)]{10,})\)").expect("paren string regex"))
}

fn letters_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z]{3,}").expect("letters regex"))
}

fn text_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"BT\s[\s\S]{10,}?\sET").expect("text block regex"))
}

fn show_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^)]+)\)\s*Tj").expect("show text regex"))
}

fn word_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<w:t[^>]*>([^<]+)</w:t>").expect("word text regex"))
}

/// Byte-for-char view of the document head, so binary data never fails to decode.
pub fn latin1_head(bytes: &[u8]) -> String {
    bytes.iter().take(METADATA_SCAN_BYTES).map(|&b| b as char).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataScan {
    /// First matching AI writing tool, in signature table order.
    pub ai_tool: Option<&'static str>,
    pub has_author: bool,
    pub has_office: bool,
}

impl MetadataScan {
    pub fn probability(&self) -> f64 {
        let mut p = BASE_PROBABILITY;
        if self.ai_tool.is_some() {
            p += AI_SIGNATURE_BOOST;
        }
        if self.has_author {
            p -= AUTHOR_PENALTY;
        }
        if self.has_office {
            p -= OFFICE_PENALTY;
        }
        p
    }

    fn details(&self) -> Vec<MetadataDetail> {
        let entry = |name: &str, found: bool, score: i32, description: String, icon: &str| MetadataDetail {
            name: name.to_string(),
            found,
            score,
            description,
            icon: icon.to_string(),
        };
        vec![
            entry(
                "AI Tool Signatures",
                self.ai_tool.is_some(),
                if self.ai_tool.is_some() { 90 } else { 18 },
                match self.ai_tool {
                    Some(tool) => format!("{} signature detected in metadata", tool),
                    None => "No AI tool signatures found".to_string(),
                },
                "cpu",
            ),
            entry(
                "Author Metadata",
                self.has_author,
                if self.has_author { 22 } else { 52 },
                if self.has_author {
                    "Author information found in document"
                } else {
                    "No author metadata"
                }
                .to_string(),
                "user",
            ),
            entry(
                "Application Info",
                self.has_office,
                if self.has_office { 22 } else { 50 },
                if self.has_office {
                    "Office application metadata detected"
                } else {
                    "No application metadata"
                }
                .to_string(),
                "file",
            ),
        ]
    }
}

pub fn scan_metadata(head: &str) -> MetadataScan {
    MetadataScan {
        ai_tool: signature_res()
            .iter()
            .find(|(_, re)| re.is_match(head))
            .map(|(name, _)| *name),
        has_author: author_re().is_match(head),
        has_office: office_re().is_match(head),
    }
}

/// Literal strings and `Tj` operands pulled straight out of raw PDF bytes.
/// Used when the PDF cannot be parsed properly.
pub fn scrape_pdf_strings(head: &str) -> String {
    let mut chunks: Vec<&str> = Vec::new();
    for cap in paren_string_re().captures_iter(head) {
        let inner = cap.get(1).map_or("", |m| m.as_str());
        if letters_re().is_match(inner) {
            chunks.push(inner);
        }
    }
    for block in text_block_re().find_iter(head) {
        for cap in show_text_re().captures_iter(block.as_str()) {
            let inner = cap.get(1).map_or("", |m| m.as_str());
            if inner.chars().count() > 5 {
                chunks.push(inner);
            }
        }
    }
    chunks.join(" ").trim().to_string()
}

fn extract_pdf_text(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let parsed = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));
    match parsed {
        Ok(Ok(text)) if text.trim().chars().count() >= MIN_EXTRACTED_CHARS => {
            return collapse_lines(&text);
        }
        Ok(Ok(_)) => debug!("pdf-extract returned too little text, scraping raw strings"),
        Ok(Err(e)) => debug!(error = %e, "pdf-extract failed, scraping raw strings"),
        Err(_) => warn!("pdf-extract panicked, scraping raw strings"),
    }
    scrape_pdf_strings(&latin1_head(bytes))
}

fn collapse_lines(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of every `<w:t>` run in `word/document.xml`, read straight from the archive.
pub fn extract_docx_runs_from_zip(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Extraction(format!("invalid docx archive: {}", e)))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Extraction(format!("missing document.xml: {}", e)))?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;

    let runs: Vec<&str> = word_text_re()
        .captures_iter(&xml)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect();
    Ok(runs.join(" ").trim().to_string())
}

fn extract_docx_runs(bytes: &[u8]) -> Result<String, DocumentError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| DocumentError::Extraction(format!("docx parse failed: {}", e)))?;
    let mut runs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for p_child in &paragraph.children {
                if let ParagraphChild::Run(run) = p_child {
                    for r_child in &run.children {
                        if let RunChild::Text(t) = r_child {
                            if !t.text.is_empty() {
                                runs.push(t.text.clone());
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(runs.join(" ").trim().to_string())
}

fn extract_docx_text(bytes: &[u8]) -> String {
    match extract_docx_runs(bytes) {
        Ok(text) if !text.is_empty() => return text,
        Ok(_) => debug!("docx-rs found no text runs, reading archive directly"),
        Err(e) => debug!(error = %e, "docx-rs failed, reading archive directly"),
    }
    match extract_docx_runs_from_zip(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "docx text extraction failed");
            String::new()
        }
    }
}

/// Runs the text detector on extracted text when there is enough of it.
/// A detector rejection is not a document failure; it just means no text score.
fn analyze_extracted(text: &str) -> Option<EnsembleResult> {
    if text.chars().count() < MIN_EXTRACTED_CHARS {
        return None;
    }
    match analyze(text) {
        Ok(result) => Some(result),
        Err(e) => {
            debug!(error = %e, "extracted text rejected by analyzer");
            None
        }
    }
}

fn analyze_plain_text(file_name: &str, bytes: &[u8]) -> Result<DocumentAnalysis, DocumentError> {
    let text = String::from_utf8_lossy(bytes);
    let result = analyze(&text)?;
    let mut text_result = result.clone();
    text_result.kind = "document".to_string();

    Ok(DocumentAnalysis {
        kind: "document".to_string(),
        file_name: file_name.to_string(),
        file_size: bytes.len(),
        ai_probability: result.ai_probability,
        human_probability: result.human_probability,
        verdict: result.verdict,
        verdict_color: result.verdict_color,
        confidence: result.confidence,
        details: vec![text_analysis_detail(&result)],
        note: "Plain-text document analyzed directly with linguistic analysis.".to_string(),
        text_analysis: Some(text_result),
    })
}

fn text_analysis_detail(result: &EnsembleResult) -> MetadataDetail {
    MetadataDetail {
        name: "Extracted Text Analysis".to_string(),
        found: true,
        score: result.ai_probability,
        description: format!(
            "Linguistic analysis of extracted text: {} ({}% AI probability)",
            result.verdict, result.ai_probability
        ),
        icon: "edit".to_string(),
    }
}

/// Analyzes an uploaded document by file name and raw bytes.
///
/// Plain text goes straight to the text detector. PDF and DOCX are scored on
/// metadata markers and, when enough text can be extracted, blended with the
/// text detector at 0.3 / 0.7. Legacy `.doc` and `.rtf` get metadata only.
pub fn analyze_document(file_name: &str, bytes: &[u8]) -> Result<DocumentAnalysis, DocumentError> {
    let kind = DocumentKind::from_file_name(file_name)?;
    info!(file = %file_name, size = bytes.len(), kind = ?kind, "document.analyze");

    if kind == DocumentKind::PlainText {
        return analyze_plain_text(file_name, bytes);
    }

    let head = latin1_head(bytes);
    let scan = scan_metadata(&head);
    debug!(ai_tool = ?scan.ai_tool, author = scan.has_author, office = scan.has_office, "document.metadata");

    let extracted = match kind {
        DocumentKind::Pdf => extract_pdf_text(bytes),
        DocumentKind::Docx => extract_docx_text(bytes),
        _ => String::new(),
    };
    let text_result = analyze_extracted(&extracted);

    let mut probability = scan.probability();
    if let Some(result) = &text_result {
        let text_probability = result.ai_probability as f64 / 100.0;
        probability = probability * METADATA_BLEND + text_probability * TEXT_BLEND;
    }
    let ai_probability = to_percent(clamp(probability, MIN_PROBABILITY, MAX_PROBABILITY));
    let v = verdict(ai_probability);

    let mut details = scan.details();
    if let Some(result) = &text_result {
        details.push(text_analysis_detail(result));
    }

    let confidence = if scan.ai_tool.is_some() {
        Confidence::High
    } else if text_result.is_some() {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    let note = if text_result.is_some() {
        "Document analyzed with both metadata inspection and linguistic analysis of extracted text."
    } else {
        "For more accurate analysis, paste the document text directly in the Text Analysis tab."
    };

    info!(
        file = %file_name,
        ai_probability,
        extracted_chars = extracted.chars().count(),
        text_analyzed = text_result.is_some(),
        "document.done"
    );

    Ok(DocumentAnalysis {
        kind: "document".to_string(),
        file_name: file_name.to_string(),
        file_size: bytes.len(),
        ai_probability,
        human_probability: 100 - ai_probability,
        verdict: v,
        verdict_color: v.color(),
        confidence,
        details,
        note: note.to_string(),
        text_analysis: text_result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ESSAY: &str = "Artificial intelligence has become an essential tool in modern education. Furthermore, it is important to note that these systems offer a comprehensive approach to personalized learning. Moreover, educators can leverage innovative platforms to foster meaningful engagement. Additionally, the seamless integration of technology plays a crucial role in enhancing student outcomes.";

    fn docx_with_runs(runs: &[&str]) -> Vec<u8> {
        let mut xml = String::from("<w:document><w:body>");
        for run in runs {
            xml.push_str(&format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", run));
        }
        xml.push_str("</w:body></w:document>");

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_document_kind_by_extension() {
        assert_eq!(DocumentKind::from_file_name("a.TXT").unwrap(), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_file_name("paper.pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name("r.docx").unwrap(), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_file_name("old.rtf").unwrap(), DocumentKind::MetadataOnly);
        assert!(matches!(
            DocumentKind::from_file_name("photo.png"),
            Err(DocumentError::UnsupportedType(ext)) if ext == ".png"
        ));
        assert!(DocumentKind::from_file_name("README").is_err());
    }

    #[test]
    fn test_first_signature_wins() {
        let scan = scan_metadata("Producer: Anthropic Claude via ChatGPT export");
        assert_eq!(scan.ai_tool, Some("ChatGPT"));
        assert!(scan.has_author);
        assert!(!scan.has_office);
        assert!((scan.probability() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_office_marker_is_substring_match() {
        // "keywords" contains "word"
        let scan = scan_metadata("<meta:keywords/>");
        assert!(scan.has_office);
        assert_eq!(scan.ai_tool, None);
    }

    #[test]
    fn test_scrape_pdf_strings() {
        let raw = "BT /F1 12 Tf (Hello world, this is) Tj ET (x) (short) (1234567890123)";
        // first pass keeps the 10+ char literal with letters, second pass the Tj operand
        assert_eq!(scrape_pdf_strings(raw), "Hello world, this is Hello world, this is");
    }

    #[test]
    fn test_docx_runs_from_archive() {
        let bytes = docx_with_runs(&["First run.", "Second run."]);
        assert_eq!(extract_docx_runs_from_zip(&bytes).unwrap(), "First run. Second run.");
        assert!(matches!(
            extract_docx_runs_from_zip(b"not a zip"),
            Err(DocumentError::Extraction(_))
        ));
    }

    #[test]
    fn test_docx_with_text_is_blended() {
        let bytes = docx_with_runs(&[ESSAY]);
        let analysis = analyze_document("essay.docx", &bytes).unwrap();
        let text = analysis.text_analysis.as_ref().expect("text analyzed");

        // the archive's central directory names "word/document.xml" in the clear
        let scan = scan_metadata(&latin1_head(&bytes));
        assert!(scan.has_office);
        let expected = to_percent(clamp(
            scan.probability() * METADATA_BLEND + text.ai_probability as f64 / 100.0 * TEXT_BLEND,
            MIN_PROBABILITY,
            MAX_PROBABILITY,
        ));
        assert_eq!(analysis.ai_probability, expected);
        assert_eq!(analysis.confidence, Confidence::Medium);
        assert_eq!(analysis.details.len(), 4);
        assert_eq!(analysis.details[3].name, "Extracted Text Analysis");
        assert!(analysis.note.starts_with("Document analyzed with both"));
    }

    #[test]
    fn test_legacy_doc_is_metadata_only() {
        let bytes = b"{\\rtf1 {\\info {\\author Jane}} Generated with ChatGPT}";
        let analysis = analyze_document("notes.rtf", bytes).unwrap();
        // 0.40 + 0.35 - 0.10
        assert_eq!(analysis.ai_probability, 65);
        assert_eq!(analysis.confidence, Confidence::High);
        assert_eq!(analysis.details.len(), 3);
        assert_eq!(analysis.details[0].description, "ChatGPT signature detected in metadata");
        assert!(analysis.text_analysis.is_none());
    }

    #[test]
    fn test_plain_text_document() {
        let analysis = analyze_document("essay.txt", ESSAY.as_bytes()).unwrap();
        let text = analysis.text_analysis.unwrap();
        assert_eq!(text.kind, "document");
        assert_eq!(analysis.ai_probability, text.ai_probability);
        assert_eq!(analysis.file_size, ESSAY.len());

        let err = analyze_document("tiny.txt", b"hello").unwrap_err();
        assert_eq!(err.to_string(), "Please provide at least 50 characters for meaningful analysis.");
    }
}
