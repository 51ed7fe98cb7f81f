use std::sync::OnceLock;

use regex::Regex;

use super::GlossaryMap;

/// Adds every `[Term]: definition` line of `raw` to `map`, returning how many
/// entries were added. Footnote definitions (`[^1]: …`) are not terms.
pub fn scan(raw: &str, map: &mut GlossaryMap) -> usize {
    static REFERENCE_LINE: OnceLock<Regex> = OnceLock::new();
    let re = REFERENCE_LINE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*\[([^\[\]\n]+)\]:[ \t]*(.*?)[ \t\r]*$")
            .expect("Invalid reference line regex")
    });

    let mut added = 0;
    for caps in re.captures_iter(raw) {
        let term = &caps[1];
        if term.starts_with('^') {
            continue;
        }
        if map.insert(term, &caps[2]) {
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(raw: &str) -> GlossaryMap {
        let mut map = GlossaryMap::new();
        scan(raw, &mut map);
        map
    }

    #[test]
    fn reads_reference_lines_anywhere() {
        let map = scan_str("Intro\n[Quorum]: minimum attendance required\n\ntext\n  [Proxy]:  a stand-in voter  \n");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("quorum").unwrap().term, "Quorum");
        assert_eq!(map.get("proxy").unwrap().definition, "a stand-in voter");
    }

    #[test]
    fn skips_footnotes_and_empty_definitions() {
        let map = scan_str("[^1]: a footnote\n[Empty]:\n[ ]: blank term\n");
        assert!(map.is_empty());
    }

    #[test]
    fn inline_brackets_are_not_references() {
        let map = scan_str("See [Quorum]: it matters.\n");
        assert!(map.is_empty());
    }

    #[test]
    fn handles_crlf_line_endings() {
        let map = scan_str("[Quorum]: minimum attendance\r\n[Proxy]: stand-in\r\n");
        assert_eq!(map.get("quorum").unwrap().definition, "minimum attendance");
        assert_eq!(map.get("proxy").unwrap().definition, "stand-in");
    }
}
