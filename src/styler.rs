//! Console box formatting for report headers.

/// Frame `text` in a rounded box, padding every line to the widest one.
///
/// Stateless: returns the framed text instead of printing it, so callers
/// decide where it goes.
pub fn boxify(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push('╭');
    out.push_str(&"─".repeat(width + 2));
    out.push_str("╮\n");
    for line in &lines {
        let pad = width - line.chars().count();
        out.push_str("│ ");
        out.push_str(line);
        out.push_str(&" ".repeat(pad));
        out.push_str(" │\n");
    }
    out.push('╰');
    out.push_str(&"─".repeat(width + 2));
    out.push('╯');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_a_single_line() {
        let boxed = boxify("Duplicate report");
        assert_eq!(
            boxed,
            "╭──────────────────╮\n│ Duplicate report │\n╰──────────────────╯"
        );
    }

    #[test]
    fn pads_shorter_lines_to_the_widest() {
        let boxed = boxify("ab\nlonger line");
        let lines: Vec<&str> = boxed.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("ab          │"));
        assert!(lines[2].ends_with("longer line │"));
        // Every line of the box is equally wide.
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn empty_input_still_draws_a_box() {
        let boxed = boxify("");
        assert_eq!(boxed, "╭──╮\n│  │\n╰──╯");
    }
}
