use crate::{models::Clause, parsing::segment::Association};

pub fn check(raw: &str, clauses: &[Clause], association: Association) {
    let n = raw.len();
    let mut last_end = 0;
    for c in clauses {
        assert!(
            c.span.start <= c.span.end && c.span.end <= n,
            "clause span out of bounds: {:?} (document len: {})",
            c.span,
            n
        );
        assert!(
            c.span.start >= last_end,
            "clause spans out of order: {:?} starts before {}",
            c.span,
            last_end
        );
        assert!(!c.content.is_empty(), "empty clause at {:?}", c.span);
        assert_eq!(
            c.content.trim(),
            c.content,
            "clause content not trimmed at {:?}",
            c.span
        );
        if association != Association::Sectioned {
            assert_eq!(
                c.span.slice(raw),
                c.content,
                "content does not match its source slice at {:?}",
                c.span
            );
        }
        last_end = c.span.end;
    }
}
