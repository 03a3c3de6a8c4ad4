//! Core types shared across the pipeline

use uuid::Uuid;

/// Supported source file formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    /// Plain text file
    Txt,
    /// Markdown file
    Markdown,
    /// JSON document, pretty-printed on extraction
    Json,
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// OpenDocument Text
    Odt,
    /// Source code file with language
    Code(String),
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => Self::Txt,
            "md" => Self::Markdown,
            "json" => Self::Json,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "odt" => Self::Odt,
            "c" => Self::Code("c".to_string()),
            "cpp" => Self::Code("cpp".to_string()),
            "java" => Self::Code("java".to_string()),
            "py" => Self::Code("python".to_string()),
            "js" => Self::Code("javascript".to_string()),
            "ts" => Self::Code("typescript".to_string()),
            "html" => Self::Code("html".to_string()),
            "cs" => Self::Code("csharp".to_string()),
            "sh" => Self::Code("bash".to_string()),
            _ => Self::Unknown,
        }
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Txt => "Text File",
            Self::Markdown => "Markdown",
            Self::Json => "JSON",
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Odt => "OpenDocument Text",
            Self::Code(lang) => lang.as_str(),
            Self::Unknown => "Unknown",
        }
    }
}

/// A bounded-length segment of the extracted text, the unit of retrieval
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub content: String,
    /// Position within the document, in reading order
    pub index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: String, index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            index,
        }
    }
}

/// One question/answer exchange of an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("txt"), FileType::Txt);
        assert_eq!(FileType::from_extension("MD"), FileType::Markdown);
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(
            FileType::from_extension("py"),
            FileType::Code("python".to_string())
        );
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
        assert_eq!(FileType::from_extension(""), FileType::Unknown);
    }

    #[test]
    fn test_unknown_is_unsupported() {
        assert!(!FileType::Unknown.is_supported());
        assert!(FileType::Docx.is_supported());
        assert!(FileType::Code("c".to_string()).is_supported());
    }
}
