use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded file bound to a session. The extracted text itself is not
/// kept after ingestion; only its chunks live on, in the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub content_type: String,
    pub chunk_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(session_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            name: name.into(),
            content_type: "text/plain".to_string(),
            chunk_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_chunk_count(mut self, chunk_count: usize) -> Self {
        self.chunk_count = chunk_count;
        self
    }
}

/// A bounded window of a source document. Immutable once created;
/// `chunk_index` is the 0-based position within the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub session_id: Uuid,
    pub content: String,
    pub chunk_index: usize,
}

impl DocumentChunk {
    pub fn new(
        document_id: Uuid,
        session_id: Uuid,
        content: impl Into<String>,
        chunk_index: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            session_id,
            content: content.into(),
            chunk_index,
        }
    }
}

/// A retrieved chunk with its distance to the query vector.
/// Smaller distance means more similar; `0.0` is identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub distance: f32,
}

/// Splits text into overlapping fixed-size windows.
///
/// Windows are measured in characters so multi-byte UTF-8 never splits a
/// code point. The cursor advances by `size - overlap` per window; each
/// window is clipped to the text length, and windows that are whitespace
/// after trimming are dropped. The walk stops once a window's end reaches
/// the end of the text, so any `overlap < size` terminates.
///
/// `overlap >= size` would produce a non-advancing cursor and is treated
/// as a misconfiguration: the overlap is silently forced to `0`.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }

    let overlap = if overlap >= size { 0 } else { overlap };
    let step = size - overlap;

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + size).min(chars.len());
        let window: String = chars[start..end].iter().collect();

        if !window.trim().is_empty() {
            chunks.push(window);
        }

        if end >= chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_windows_cover_text() {
        let text: String = "abcdefghij".repeat(250);
        assert_eq!(text.len(), 2500);

        let chunks = chunk_text(&text, 1000, 200);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 700);
        assert_eq!(chunks[0], text[0..1000]);
        assert_eq!(chunks[1], text[800..1800]);
        assert_eq!(chunks[2], text[1600..2500]);
    }

    #[test]
    fn test_chunk_no_gaps_between_windows() {
        let text: String = "0123456789".repeat(37);
        let size = 100;
        let overlap = 30;

        let chunks = chunk_text(&text, size, overlap);

        let step = size - overlap;
        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * step;
            let end = (start + size).min(text.len());
            assert_eq!(chunk, &text[start..end]);
            if end < text.len() {
                assert_eq!(chunk.len(), size);
            }
        }
        let last_start = (chunks.len() - 1) * step;
        assert_eq!(last_start + chunks.last().unwrap().len(), text.len());
    }

    #[test]
    fn test_chunk_overlap_ge_size_behaves_like_zero_overlap() {
        let text: String = "xyz".repeat(100);
        assert_eq!(chunk_text(&text, 50, 50), chunk_text(&text, 50, 0));
        assert_eq!(chunk_text(&text, 50, 120), chunk_text(&text, 50, 0));
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_text("", 100, 20).is_empty());
    }

    #[test]
    fn test_chunk_text_shorter_than_size() {
        let chunks = chunk_text("short text", 100, 20);
        assert_eq!(chunks, vec!["short text".to_string()]);
    }

    #[test]
    fn test_chunk_drops_whitespace_only_windows() {
        let mut text = String::from("abcd");
        text.push_str(&" ".repeat(12));
        let chunks = chunk_text(&text, 4, 0);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "abcd");
    }

    #[test]
    fn test_chunk_multibyte_text() {
        let text = "héllo wörld ünïcode".repeat(20);
        let chunks = chunk_text(&text, 50, 10);

        assert!(!chunks.is_empty());
        let char_count: usize = text.chars().count();
        for (i, chunk) in chunks.iter().enumerate() {
            let is_last = i == chunks.len() - 1;
            if !is_last {
                assert_eq!(chunk.chars().count(), 50);
            } else {
                assert!(chunk.chars().count() <= 50);
            }
        }
        let step = 40;
        let last_end = (chunks.len() - 1) * step + chunks.last().unwrap().chars().count();
        assert_eq!(last_end, char_count);
    }

    #[test]
    fn test_chunk_zero_size_yields_nothing() {
        assert!(chunk_text("some text", 0, 0).is_empty());
    }
}
