use std::sync::OnceLock;

use regex::Regex;

use super::GlossaryMap;

/// Separators accepted between a bold term and its definition.
const SEPARATORS: [char; 4] = ['-', '\u{2013}', '\u{2014}', ':'];

/// Adds the entries of every `Definitions`/`Glossary` section of `raw` to
/// `map`, returning how many were added.
///
/// A section runs from its heading to the next heading of the same or a
/// higher level. Fenced code is skipped.
pub fn scan(raw: &str, map: &mut GlossaryMap) -> usize {
    let lines: Vec<&str> = raw.lines().collect();
    let mut section_level: Option<usize> = None;
    let mut in_fence = false;
    let mut added = 0;

    for (i, line) in lines.iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some((level, title)) = heading(line) {
            if section_level.is_some_and(|open| level <= open) {
                section_level = None;
            }
            if is_glossary_title(title) {
                section_level = Some(level);
            }
            continue;
        }
        if section_level.is_none() {
            continue;
        }

        if let Some((term, definition)) = bullet_entry(line) {
            if map.insert(term, definition) {
                added += 1;
            }
            continue;
        }

        if let Some(cells) = table_cells(line) {
            let is_header = lines
                .get(i + 1)
                .and_then(|next| table_cells(next))
                .is_some_and(|next| is_separator_row(&next));
            if is_header || is_separator_row(&cells) || cells.len() < 2 {
                continue;
            }
            if map.insert(strip_emphasis(cells[0]), cells[1]) {
                added += 1;
            }
        }
    }
    added
}

/// Parses an ATX heading into its level and title text.
fn heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim_end()))
}

fn is_glossary_title(title: &str) -> bool {
    static TITLE: OnceLock<Regex> = OnceLock::new();
    let re = TITLE.get_or_init(|| {
        Regex::new(r"(?i)^(?:\d+(?:\.\d+)*[.)]?[ \t]+)?(?:definitions|glossary)$")
            .expect("Invalid glossary title regex")
    });
    re.is_match(title)
}

fn is_fence(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("```") || t.starts_with("~~~")
}

/// Reads `- **Term** - definition` (or `- **Term:** definition`).
fn bullet_entry(line: &str) -> Option<(&str, &str)> {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    let re = BULLET.get_or_init(|| {
        Regex::new(r"^[ \t]*[-*+][ \t]+\*\*([^*]+?)\*\*[ \t]*(.*)$").expect("Invalid bullet regex")
    });

    let caps = re.captures(line)?;
    let term = caps.get(1)?.as_str().trim();
    let rest = caps.get(2)?.as_str();
    let (term, colon_inside) = match term.strip_suffix(':') {
        Some(t) => (t, true),
        None => (term, false),
    };
    let definition = match rest.strip_prefix(SEPARATORS) {
        Some(d) => d,
        None if colon_inside => rest,
        None => return None,
    };
    Some((term, definition))
}

/// Splits a `| a | b |` row into trimmed cells.
fn table_cells(line: &str) -> Option<Vec<&str>> {
    let t = line.trim();
    let inner = t.strip_prefix('|')?;
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    Some(inner.split('|').map(str::trim).collect())
}

fn is_separator_row(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|c| {
            c.contains('-') && c.chars().all(|ch| ch == '-' || ch == ':')
        })
}

fn strip_emphasis(cell: &str) -> &str {
    cell.trim_matches(|c: char| c == '*' || c == '_' || c == '`').trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scan_str(raw: &str) -> GlossaryMap {
        let mut map = GlossaryMap::new();
        scan(raw, &mut map);
        map
    }

    fn definition<'a>(map: &'a GlossaryMap, term: &str) -> Option<&'a str> {
        map.get(term).map(|e| e.definition.as_str())
    }

    #[rstest]
    #[case("- **Quorum** - minimum attendance")]
    #[case("- **Quorum** \u{2013} minimum attendance")]
    #[case("- **Quorum** \u{2014} minimum attendance")]
    #[case("- **Quorum**: minimum attendance")]
    #[case("* **Quorum:** minimum attendance")]
    fn bullet_separators(#[case] bullet: &str) {
        let map = scan_str(&format!("## Definitions\n\n{bullet}\n"));
        assert_eq!(definition(&map, "quorum"), Some("minimum attendance"));
    }

    #[rstest]
    #[case("# Glossary")]
    #[case("## 2. Definitions")]
    #[case("### 4.1 glossary")]
    #[case("## 3) DEFINITIONS ##")]
    fn glossary_headings(#[case] heading: &str) {
        let map = scan_str(&format!("{heading}\n- **Proxy** - a stand-in voter\n"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn entries_outside_section_are_ignored() {
        let raw = "- **Early** - before\n## Glossary\n- **Inside** - kept\n## Next\n- **After** - dropped\n";
        let map = scan_str(raw);
        assert_eq!(map.len(), 1);
        assert!(map.get("inside").is_some());
    }

    #[test]
    fn deeper_heading_stays_in_section() {
        let raw = "## Glossary\n### Voting\n- **Proxy** - a stand-in voter\n# Rules\n- **Late** - dropped\n";
        let map = scan_str(raw);
        assert_eq!(map.len(), 1);
        assert!(map.get("proxy").is_some());
    }

    #[test]
    fn table_rows_skip_header_separator_and_blanks() {
        let raw = "## Glossary\n\n| Term | Definition |\n| :--- | ---: |\n| **Quorum** | minimum attendance |\n|  | orphan definition |\n| Proxy |  |\n| --- | punctuation only |\n| Board Member | a seated member |\n";
        let map = scan_str(raw);
        assert_eq!(map.len(), 2);
        assert_eq!(definition(&map, "quorum"), Some("minimum attendance"));
        assert_eq!(definition(&map, "board member"), Some("a seated member"));
        assert!(map.get("term").is_none());
    }

    #[test]
    fn bullet_without_separator_is_ignored() {
        let map = scan_str("## Glossary\n- **Quorum** minimum attendance\n");
        assert!(map.is_empty());
    }

    #[test]
    fn fenced_code_is_skipped() {
        let raw = "## Glossary\n```\n- **Quorum** - in code\n# Not a heading\n```\n- **Proxy** - kept\n";
        let map = scan_str(raw);
        assert_eq!(map.len(), 1);
        assert!(map.get("proxy").is_some());
    }

    #[test]
    fn heading_requires_space_after_hashes() {
        assert_eq!(heading("#Glossary"), None);
        assert_eq!(heading("## Glossary ##"), Some((2, "Glossary")));
        assert_eq!(heading("    # indented code"), None);
    }
}
