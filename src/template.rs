use crate::error::{Result, UpdateError};

pub const TOTAL_PLACEHOLDER: &str = "total";

/// Renders a format template, substituting every `{total}` with `total`.
///
/// `{{` and `}}` are literal braces. The placeholder accepts the `!s`
/// conversion and a string format spec, `{total:[[fill]align][0][width][.precision][s]}`,
/// so `{total:>12}` right-aligns the total in 12 columns and `{total:.3}`
/// keeps its first three characters. Any other placeholder is an error.
pub fn render_line(template: &str, total: &str) -> Result<String> {
    let mut line = String::with_capacity(template.len() + total.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                line.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => {
                            return Err(template_error(format!(
                                "unclosed placeholder '{{{field}'"
                            )));
                        }
                    }
                }
                line.push_str(&render_field(&field, total)?);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                line.push('}');
            }
            '}' => return Err(template_error("single '}' encountered".to_string())),
            c => line.push(c),
        }
    }

    Ok(line)
}

fn render_field(field: &str, total: &str) -> Result<String> {
    let (head, spec) = match field.split_once(':') {
        Some((head, spec)) => (head, Some(spec)),
        None => (field, None),
    };
    let (name, conversion) = match head.split_once('!') {
        Some((name, conversion)) => (name, Some(conversion)),
        None => (head, None),
    };

    if name != TOTAL_PLACEHOLDER {
        return Err(template_error(format!(
            "unknown placeholder '{{{field}}}', only '{{{TOTAL_PLACEHOLDER}}}' is supported"
        )));
    }
    match conversion {
        None | Some("s") => {}
        Some(other) => {
            return Err(template_error(format!(
                "unsupported conversion '!{other}' in '{{{field}}}', only '!s' is supported"
            )));
        }
    }

    match spec {
        Some(spec) => Ok(FormatSpec::parse(spec)?.apply(total)),
        None => Ok(total.to_string()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, PartialEq, Eq)]
struct FormatSpec {
    fill: char,
    align: Align,
    width: usize,
    precision: Option<usize>,
}

impl FormatSpec {
    fn parse(spec: &str) -> Result<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut pos = 0;
        let mut fill = None;
        let mut align = None;

        let align_of = |c: char| match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        };

        if chars.len() >= 2 && (align_of(chars[1]).is_some() || chars[1] == '=') {
            fill = Some(chars[0]);
            pos = 1;
        }
        match chars.get(pos) {
            Some('=') => return Err(spec_error(spec, "'=' alignment is not allowed for text")),
            Some(&c) => {
                if let Some(a) = align_of(c) {
                    align = Some(a);
                    pos += 1;
                }
            }
            None => {}
        }

        if matches!(chars.get(pos), Some('+' | '-' | ' ' | '#')) {
            return Err(spec_error(spec, "sign and '#' are not allowed for text"));
        }

        // a leading zero before the width pads with zeros unless a fill is given
        if chars.get(pos) == Some(&'0') && fill.is_none() {
            fill = Some('0');
            pos += 1;
        }

        let width = take_number(&chars, &mut pos).unwrap_or(0);

        let precision = match chars.get(pos) {
            Some('.') => {
                pos += 1;
                match take_number(&chars, &mut pos) {
                    Some(precision) => Some(precision),
                    None => return Err(spec_error(spec, "missing precision after '.'")),
                }
            }
            _ => None,
        };

        if chars.get(pos) == Some(&'s') {
            pos += 1;
        }
        if pos != chars.len() {
            return Err(spec_error(
                spec,
                "only fill, alignment, width, precision and 's' are supported",
            ));
        }

        Ok(Self {
            fill: fill.unwrap_or(' '),
            align: align.unwrap_or(Align::Left),
            width,
            precision,
        })
    }

    fn apply(&self, value: &str) -> String {
        let value: String = match self.precision {
            Some(precision) => value.chars().take(precision).collect(),
            None => value.to_string(),
        };

        let padding = self.width.saturating_sub(value.chars().count());
        let (before, after) = match self.align {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => (padding / 2, padding - padding / 2),
        };

        let mut out = String::with_capacity(value.len() + padding * self.fill.len_utf8());
        out.extend(std::iter::repeat_n(self.fill, before));
        out.push_str(&value);
        out.extend(std::iter::repeat_n(self.fill, after));
        out
    }
}

fn take_number(chars: &[char], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    while chars.get(*pos).is_some_and(char::is_ascii_digit) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect::<String>().parse().ok()
}

fn spec_error(spec: &str, reason: &str) -> UpdateError {
    template_error(format!("invalid format spec ':{spec}': {reason}"))
}

fn template_error(message: String) -> UpdateError {
    UpdateError::Template { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template() {
        let line = render_line(crate::cli::DEFAULT_FORMAT, "10 hrs 30 mins").unwrap();
        assert_eq!(line, "Total time spent in editors (WakaTime): 10 hrs 30 mins");
    }

    #[test]
    fn repeated_placeholder_and_escapes() {
        let line = render_line("{{{total}}} / {total}", "5 mins").unwrap();
        assert_eq!(line, "{5 mins} / 5 mins");
    }

    #[test]
    fn template_without_placeholder() {
        assert_eq!(render_line("static", "5 mins").unwrap(), "static");
    }

    #[test]
    fn total_is_not_reinterpreted() {
        assert_eq!(render_line("{total}", "{weird}").unwrap(), "{weird}");
    }

    #[test]
    fn width_and_alignment() {
        assert_eq!(render_line("{total:>12}|", "5 mins").unwrap(), "      5 mins|");
        assert_eq!(render_line("{total:12}|", "5 mins").unwrap(), "5 mins      |");
        assert_eq!(render_line("{total:<12}|", "5 mins").unwrap(), "5 mins      |");
        assert_eq!(render_line("{total:^11}|", "5 mins").unwrap(), "  5 mins   |");
        assert_eq!(render_line("{total:*^12}|", "5 mins").unwrap(), "***5 mins***|");
        assert_eq!(render_line("{total:>3}|", "5 mins").unwrap(), "5 mins|");
    }

    #[test]
    fn zero_padding_precision_and_type() {
        assert_eq!(render_line("{total:08}", "5 mins").unwrap(), "5 mins00");
        assert_eq!(render_line("{total:>08}", "5 mins").unwrap(), "005 mins");
        assert_eq!(render_line("{total:->08}", "5 mins").unwrap(), "--5 mins");
        assert_eq!(render_line("{total:.3}", "5 mins").unwrap(), "5 m");
        assert_eq!(render_line("{total:>6.1s}", "5 mins").unwrap(), "     5");
        assert_eq!(render_line("{total:}", "5 mins").unwrap(), "5 mins");
    }

    #[test]
    fn string_conversion() {
        assert_eq!(render_line("{total!s}", "5 mins").unwrap(), "5 mins");
        assert_eq!(render_line("[{total!s:>7}]", "5 mins").unwrap(), "[ 5 mins]");
    }

    #[test]
    fn rejects_bad_templates() {
        for template in [
            "{days}",
            "{total",
            "total}",
            "{}",
            "{total!r}",
            "{total:=10}",
            "{total:+10}",
            "{total:10d}",
            "{total:.}",
            "{days:>10}",
        ] {
            let err = render_line(template, "x").unwrap_err();
            assert!(matches!(err, UpdateError::Template { .. }), "{template}");
        }
    }
}
