/// One TLE entry as found in a text file.
#[derive(Debug, Clone, PartialEq)]
pub struct TleSet {
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

/// Parse multi-satellite TLE content. Both the bare 2-line form and the
/// 3-line form with a leading name are accepted; anything else is skipped.
pub fn parse_multi_tle(content: &str) -> Vec<TleSet> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push(TleSet {
                name: None,
                line1: lines[i].to_string(),
                line2: lines[i + 1].to_string(),
            });
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            result.push(TleSet {
                name: Some(lines[i].trim_start_matches("0 ").to_string()),
                line1: lines[i + 1].to_string(),
                line2: lines[i + 2].to_string(),
            });
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const L1: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    const L2: &str = "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

    #[test]
    fn two_and_three_line_entries() {
        let content = format!("{L1}\n{L2}\n\nISS (ZARYA)\n{L1}\n{L2}\n");
        let sets = parse_multi_tle(&content);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, None);
        assert_eq!(sets[1].name.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(sets[1].line2, L2);
    }

    #[test]
    fn skips_garbage_lines() {
        let content = format!("# comment\nnot a tle\n{L1}\n{L2}\ntrailing");
        let sets = parse_multi_tle(&content);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].line1, L1);
    }
}
