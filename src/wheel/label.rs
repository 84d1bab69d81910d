use super::geometry::Point;
use super::options::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Medium,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLine {
    pub text: String,
    pub weight: FontWeight,
    pub font_size: f64,
    pub color: Rgb,
    /// Position of the line, already offset from the label anchor.
    pub position: Point,
}

impl LabelLine {
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

fn contains_number(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Splits a reward label into display lines.
///
/// Numeric tokens always get a line of their own. Other tokens accumulate
/// until the line in progress outgrows the last emitted line.
pub fn wrap_label(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        if contains_number(word) {
            // flushed even when empty, so a leading number counts as having
            // emitted a line and is split from whatever follows it
            lines.push(std::mem::replace(&mut current, word.to_string()));
            continue;
        }

        if current.is_empty() {
            current = word.to_string();
            continue;
        }

        let longer_than_previous = lines
            .last()
            .is_some_and(|last| current.chars().count() > last.chars().count());

        if !lines.is_empty() && (longer_than_previous || contains_number(&current)) {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.first().is_some_and(String::is_empty) {
        lines.remove(0);
    }

    lines
}

/// Wraps and styles a label. Numeric lines are bold, white and twice the
/// base size.
pub fn layout_label(text: &str, anchor: Point, font_size: f64, color: Rgb) -> Vec<LabelLine> {
    let lines = wrap_label(text);

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let bold = contains_number(line);
            let previous_numeric = index
                .checked_sub(1)
                .is_some_and(|prev| contains_number(&lines[prev]));
            let margin_top = if previous_numeric || bold { font_size } else { 4.0 };

            LabelLine {
                text: line.clone(),
                weight: if bold { FontWeight::Bold } else { FontWeight::Medium },
                font_size: if bold { font_size * 2.0 } else { font_size },
                color: if bold { Rgb::WHITE } else { color },
                position: anchor.offset(0.0, index as f64 * (font_size + 5.0) + margin_top),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: Rgb = Rgb::new(255, 200, 0);

    #[test]
    fn wrap_numeric_only_label() {
        assert_eq!(wrap_label("100"), vec!["100"]);

        let lines = layout_label("100", Point::new(0.0, 0.0), 20.0, GOLD);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_bold());
        assert_eq!(lines[0].font_size, 40.0);
        assert_eq!(lines[0].color, Rgb::WHITE);
        assert_eq!(lines[0].position, Point::new(0.0, 20.0));
    }

    #[test]
    fn wrap_plain_words_stay_regular() {
        assert_eq!(wrap_label("Try Again"), vec!["Try Again"]);

        let lines = layout_label("Try Again", Point::new(5.0, 5.0), 20.0, GOLD);
        assert!(lines.iter().all(|line| !line.is_bold()));
        assert!(lines.iter().all(|line| line.font_size == 20.0));
        assert_eq!(lines[0].color, GOLD);
        assert_eq!(lines[0].position, Point::new(5.0, 9.0));
    }

    #[test]
    fn wrap_isolates_numeric_token() {
        assert_eq!(wrap_label("Win 50 Points"), vec!["Win", "50", "Points"]);

        let lines = layout_label("Win 50 Points", Point::new(0.0, 0.0), 20.0, GOLD);
        let bold: Vec<bool> = lines.iter().map(LabelLine::is_bold).collect();
        assert_eq!(bold, vec![false, true, false]);

        // offsets: 0*25 + 4, 1*25 + 20, 2*25 + 20
        let offsets: Vec<f64> = lines.iter().map(|line| line.position.y).collect();
        assert_eq!(offsets, vec![4.0, 45.0, 70.0]);
    }

    #[test]
    fn wrap_balances_against_previous_line() {
        // "Free" outgrows "5", so "Spins" starts a fresh line
        assert_eq!(
            wrap_label("Win 5 Free Spins"),
            vec!["Win", "5", "Free", "Spins"]
        );
        // with nothing emitted yet every plain word joins the first line
        assert_eq!(
            wrap_label("Free Spin Bonus Round"),
            vec!["Free Spin Bonus Round"]
        );
        assert_eq!(wrap_label("Bonus x2 Big Prize"), vec!["Bonus", "x2", "Big", "Prize"]);
    }

    #[test]
    fn wrap_splits_leading_number_from_words() {
        assert_eq!(wrap_label("100 Coins"), vec!["100", "Coins"]);
        assert_eq!(wrap_label("5 Free Spins"), vec!["5", "Free", "Spins"]);
        assert_eq!(wrap_label("100 Big Coins"), vec!["100", "Big Coins"]);

        let lines = layout_label("100 Coins", Point::new(0.0, 0.0), 20.0, GOLD);
        let bold: Vec<bool> = lines.iter().map(LabelLine::is_bold).collect();
        assert_eq!(bold, vec![true, false]);
        assert_eq!(lines[1].color, GOLD);
        assert_eq!(lines[1].font_size, 20.0);
    }
}
