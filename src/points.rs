//! Coordinate text handling for the mirror engine.
//!
//! Point lists, translate offsets and single coordinates are rewritten in
//! place: only the numbers being mirrored change, separators and the untouched
//! half of each pair keep their original spelling.

/// Result of rewriting a coordinate-bearing attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub value: String,
    /// Tokens left alone because they did not parse as numbers
    pub skipped: usize,
}

/// Parse a single coordinate. Non-finite values count as parse failures.
pub fn parse_coord(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format with a fixed number of decimals, without a stray `-0`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}

/// Mirror every `x,y` pair of a `points` list inside a group of `width`:
/// `x` becomes `width - x` at integer precision, `y` is kept verbatim.
pub fn mirror_points(points: &str, width: f64) -> Rewrite {
    let mut scanner = Scanner::new(points);
    let mut out = String::with_capacity(points.len());
    let mut skipped = 0;

    while !scanner.is_eof() {
        out.push_str(scanner.take_while(|c| c.is_ascii_whitespace()));
        let token = scanner.take_while(|c| !c.is_ascii_whitespace());
        if token.is_empty() {
            continue;
        }
        match mirror_pair(token, width) {
            Some(pair) => out.push_str(&pair),
            None => {
                skipped += 1;
                out.push_str(token);
            }
        }
    }

    Rewrite {
        value: out,
        skipped,
    }
}

fn mirror_pair(token: &str, width: f64) -> Option<String> {
    let (x, y) = token.split_once(',')?;
    let x = parse_coord(x)?;
    if y.is_empty() {
        return None;
    }
    Some(format!("{},{}", format_fixed(width - x, 0), y))
}

/// A `translate(x, y)` transform with the vertical part kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Translate {
    pub x: f64,
    pub y: String,
}

impl Translate {
    /// Parse a transform that is exactly one `translate(x, y)`.
    pub fn parse(value: &str) -> Option<Self> {
        let inner = value
            .trim()
            .strip_prefix("translate")?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')?;

        let mut scanner = Scanner::new(inner);
        scanner.take_while(|c| c.is_ascii_whitespace());
        let x = scanner.take_while(|c| !c.is_ascii_whitespace() && c != ',');
        scanner.take_while(|c| c.is_ascii_whitespace());
        if scanner.peek() == Some(',') {
            scanner.next();
        }
        let y = scanner.rest().trim();

        if y.is_empty() || y.contains(|c: char| c.is_ascii_whitespace() || c == ',') {
            return None;
        }

        Some(Self {
            x: parse_coord(x)?,
            y: y.to_string(),
        })
    }

    /// Render as `translate(x, y)` with `x` at integer precision.
    pub fn to_attr(&self) -> String {
        format!("translate({}, {})", format_fixed(self.x, 0), self.y)
    }
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.next();
        }
        &self.input[start..self.pos]
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_points() {
        let r = mirror_points("10,20 30,40", 920.0);
        assert_eq!(r.value, "910,20 890,40");
        assert_eq!(r.skipped, 0);
    }

    #[test]
    fn test_mirror_points_keeps_layout() {
        let r = mirror_points("\n  10,20.5\n  30.4,40\n", 100.0);
        assert_eq!(r.value, "\n  90,20.5\n  70,40\n");
    }

    #[test]
    fn test_mirror_points_skips_bad_tokens() {
        let r = mirror_points("10,20 abc,5 7 30,", 100.0);
        assert_eq!(r.value, "90,20 abc,5 7 30,");
        assert_eq!(r.skipped, 3);
    }

    #[test]
    fn test_mirror_is_involution() {
        let once = mirror_points("12,1 400,2 919,3", 920.0);
        let twice = mirror_points(&once.value, 920.0);
        assert_eq!(twice.value, "12,1 400,2 919,3");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(1480.0, 0), "1480");
        assert_eq!(format_fixed(909.6, 0), "910");
        assert_eq!(format_fixed(890.26, 1), "890.3");
        assert_eq!(format_fixed(12.0, 1), "12.0");
        assert_eq!(format_fixed(-0.2, 0), "0");
        assert_eq!(format_fixed(-3.0, 0), "-3");
    }

    #[test]
    fn test_parse_translate() {
        let t = Translate::parse("translate(50, 100)").unwrap();
        assert_eq!(t.x, 50.0);
        assert_eq!(t.y, "100");

        let t = Translate::parse(" translate(970 12.5) ").unwrap();
        assert_eq!(t.x, 970.0);
        assert_eq!(t.y, "12.5");

        assert!(Translate::parse("translate(50)").is_none());
        assert!(Translate::parse("scale(-1, 1)").is_none());
        assert!(Translate::parse("translate(50, 100) rotate(5)").is_none());
        assert!(Translate::parse("translate(a, 100)").is_none());
    }

    #[test]
    fn test_translate_to_attr() {
        let t = Translate {
            x: 1480.0,
            y: "100".into(),
        };
        assert_eq!(t.to_attr(), "translate(1480, 100)");
    }
}
