//! System instructions for the two processing tasks, plus meta-operation
//! detection.

/// Keywords indicating the user wants their own text transformed rather
/// than merely cleaned up.
const META_KEYWORDS: &[&str] = &[
    "outline",
    "summarize",
    "reorder",
    "rearrange",
    "list",
    "bullets",
    "organize",
];

const CLEANUP_PROMPT: &str = "You are a speech cleanup assistant. Your job is to clean up transcribed speech by:\n\
1. Removing stutters and repeated phrases\n\
2. Consolidating similar ideas into coherent statements\n\
3. Fixing grammar and improving sentence structure\n\
4. Maintaining the original meaning and intent\n\n\
IMPORTANT: Do NOT answer questions or provide new information. Only clean up the language.\n\n\
OUTPUT FORMAT: Output ONLY the cleaned text. No preamble, no introduction, no quotation marks. \
Just the cleaned speech itself.";

const META_EXCEPTION: &str = "\n\nEXCEPTION: If the user's text contains a request to transform their own words \
(keywords: outline, summarize, reorder, rearrange, list, bullets, organize), \
perform that transformation instead. Still output only the result, no preamble.";

const DOCUMENT_PROMPT: &str = "You are a document structuring assistant.\n\
The user has spoken freely about a topic or ideas.\n\n\
Your job is to:\n\
1. Extract the main topic (becomes document title)\n\
2. Identify 3-5 key sections or themes\n\
3. List specific points under each section as bullet points\n\
4. Organize logically (chronologically, by importance, or by theme)\n\
5. Clean up grammar and remove speech artifacts (ums, ahs, stutters)\n\
6. Keep the user's original meaning and intent intact\n\n\
OUTPUT FORMAT:\n\
- Use markdown formatting\n\
- Start with # Title (one H1)\n\
- Use ## Section Headers for each topic (H2)\n\
- Use - bullet points for details\n\
- Use paragraphs when topic needs explanation\n\
- No metadata, no preamble, just the document\n\n\
IMPORTANT: Output ONLY the markdown document.\n\
Do not include explanations or instructions.\n\
The document should be ready to save immediately.";

/// True when the text asks for a transformation of the user's own words.
///
/// A plain substring test; a keyword appearing incidentally is an accepted
/// false positive.
pub fn detect_meta_operation(text: &str) -> bool {
    let text_lower = text.to_lowercase();
    META_KEYWORDS.iter().any(|kw| text_lower.contains(kw))
}

/// Cleanup system instruction, extended with the transformation exception
/// when the input requests a meta-operation.
pub fn cleanup_system(text: &str) -> String {
    if detect_meta_operation(text) {
        format!("{CLEANUP_PROMPT}{META_EXCEPTION}")
    } else {
        CLEANUP_PROMPT.to_string()
    }
}

/// User prompt for the cleanup task, with optional prior-round context.
pub fn cleanup_user(text: &str, context: Option<&str>) -> String {
    match context {
        Some(context) if !context.is_empty() => {
            format!("Previous Context:\n{context}\n\nUser's transcribed speech:\n{text}")
        }
        _ => format!("User's transcribed speech:\n{text}"),
    }
}

pub fn document_system() -> &'static str {
    DOCUMENT_PROMPT
}

pub fn document_user(transcript: &str) -> String {
    format!("Spoken content to structure:\n{transcript}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_meta_operation_positive() {
        assert!(detect_meta_operation("please summarize this into bullets"));
        assert!(detect_meta_operation("Can you OUTLINE my ideas"));
    }

    #[test]
    fn test_detect_meta_operation_negative() {
        assert!(!detect_meta_operation("what time is it"));
        assert!(!detect_meta_operation(""));
    }

    #[test]
    fn test_cleanup_system_adds_exception_clause() {
        assert!(cleanup_system("reorder these thoughts").contains("EXCEPTION"));
        assert!(!cleanup_system("just some rambling").contains("EXCEPTION"));
    }

    #[test]
    fn test_cleanup_user_includes_context() {
        let prompt = cleanup_user("new words", Some("old words"));
        assert!(prompt.contains("Previous Context:\nold words"));
        assert!(prompt.contains("User's transcribed speech:\nnew words"));
    }

    #[test]
    fn test_cleanup_user_without_context() {
        let prompt = cleanup_user("new words", None);
        assert!(!prompt.contains("Previous Context"));
        assert_eq!(cleanup_user("x", Some("")), cleanup_user("x", None));
    }
}
