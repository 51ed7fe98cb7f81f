use super::{cursor::Cursor, span::Span};

/// The bracket pair enclosing a metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    pub const HTML_COMMENT_OPEN: &'static str = "<!--";
    pub const HTML_COMMENT_CLOSE: &'static str = "-->";

    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(Self::HTML_COMMENT_OPEN, Self::HTML_COMMENT_CLOSE)
    }
}

/// A metadata block found in the raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataBlock {
    /// Full span including both delimiters.
    pub full: Span,
    /// Span of the text between the delimiters.
    pub inner: Span,
}

/// Locates every metadata block in document order.
///
/// An opener without a matching closer does not start a block; everything
/// from it to the end of the document stays ordinary content.
pub fn locate_blocks(src: &str, delims: &Delimiters) -> Vec<MetadataBlock> {
    let mut out = vec![];
    if delims.open.is_empty() || delims.close.is_empty() {
        return out;
    }

    let mut cur = Cursor::new(src);
    while let Some(start) = cur.seek(&delims.open) {
        cur.bump_n(delims.open.len());
        let inner_start = cur.pos();
        let Some(inner_end) = cur.seek(&delims.close) else {
            break;
        };
        cur.bump_n(delims.close.len());
        out.push(MetadataBlock {
            full: Span::new(start, cur.pos()),
            inner: Span::new(inner_start, inner_end),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_blocks_in_order() {
        let src = "a <!-- x: 1 --> b <!--y: 2--> c";
        let blocks = locate_blocks(src, &Delimiters::default());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].full.slice(src), "<!-- x: 1 -->");
        assert_eq!(blocks[0].inner.slice(src), " x: 1 ");
        assert_eq!(blocks[1].inner.slice(src), "y: 2");
    }

    #[test]
    fn unclosed_opener_is_not_a_block() {
        let src = "<!-- a: 1 --> text <!-- never closed";
        let blocks = locate_blocks(src, &Delimiters::default());
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn empty_block() {
        let src = "<!---->";
        let blocks = locate_blocks(src, &Delimiters::default());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].inner.is_empty());
    }

    #[test]
    fn custom_delimiters() {
        let src = "{{meta rule_type: policy}} body";
        let blocks = locate_blocks(src, &Delimiters::new("{{meta", "}}"));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].inner.slice(src), " rule_type: policy");
    }

    #[test]
    fn empty_delimiters_find_nothing() {
        assert!(locate_blocks("anything", &Delimiters::new("", "-->")).is_empty());
    }
}
