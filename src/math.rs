//! Math notation embedded in the document body.
//!
//! Text is split on the `$...$` (inline) and `$$...$$` (display) delimiters, with `\$` standing
//! for a literal dollar sign when escape processing is enabled. The TeX inside each math span
//! is then typeset to plain Unicode so it can be drawn in a terminal cell grid: Greek letters,
//! operators, `\text{..}`, accents, fractions and sub/superscripts.

/// Delimiters and escape handling used when splitting text into math and prose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathOptions {
    /// Opening and closing delimiters of inline math.
    pub inline: (String, String),
    /// Opening and closing delimiters of display math.
    pub display: (String, String),
    /// Treat `\$` as a literal dollar sign rather than a delimiter.
    pub process_escapes: bool,
}

impl Default for MathOptions {
    fn default() -> Self {
        Self {
            inline: ("$".to_string(), "$".to_string()),
            display: ("$$".to_string(), "$$".to_string()),
            process_escapes: true,
        }
    }
}

/// A run of prose or a math span within a block of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Plain prose, with escapes already resolved.
    Text(String),
    /// Raw TeX between delimiters.
    Math {
        /// TeX source without the delimiters.
        tex: String,
        /// Whether the span used display delimiters.
        display: bool,
    },
}

/// Find `close` in `rest`, skipping escaped dollars.
fn find_close(rest: &str, close: &str, process_escapes: bool) -> Option<usize> {
    let mut i = 0;
    while i < rest.len() {
        let tail = &rest[i..];
        if process_escapes && tail.starts_with("\\$") {
            i += 2;
            continue;
        }
        if tail.starts_with(close) {
            return Some(i);
        }
        i += tail.chars().next().map_or(1, char::len_utf8);
    }
    None
}

#[must_use]
/// Split `text` into prose and math segments.
///
/// Unclosed or empty delimiters are kept as literal text. Display delimiters are tried before
/// inline ones since `$$` also starts with `$`.
pub fn split(text: &str, options: &MathOptions) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut prose = String::new();
    let mut i = 0;

    let delimiters = [(&options.display, true), (&options.inline, false)];

    'scan: while i < text.len() {
        let rest = &text[i..];

        if options.process_escapes && rest.starts_with("\\$") {
            prose.push('$');
            i += 2;
            continue;
        }

        for ((open, close), display) in delimiters {
            if open.is_empty() || !rest.starts_with(open.as_str()) {
                continue;
            }
            let body = &rest[open.len()..];
            if let Some(end) = find_close(body, close, options.process_escapes) {
                if end > 0 {
                    if !prose.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut prose)));
                    }
                    segments.push(Segment::Math {
                        tex: body[..end].to_string(),
                        display,
                    });
                    i += open.len() + end + close.len();
                    continue 'scan;
                }
            }
        }

        let c = rest.chars().next().unwrap_or('\u{fffd}');
        prose.push(c);
        i += c.len_utf8();
    }

    if !prose.is_empty() {
        segments.push(Segment::Text(prose));
    }
    segments
}

fn symbol(name: &str) -> Option<&'static str> {
    let s = match name {
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" | "varepsilon" => "ε",
        "zeta" => "ζ",
        "eta" => "η",
        "theta" | "vartheta" => "θ",
        "iota" => "ι",
        "kappa" => "κ",
        "lambda" => "λ",
        "mu" => "μ",
        "nu" => "ν",
        "xi" => "ξ",
        "pi" => "π",
        "rho" => "ρ",
        "sigma" => "σ",
        "tau" => "τ",
        "upsilon" => "υ",
        "phi" | "varphi" => "φ",
        "chi" => "χ",
        "psi" => "ψ",
        "omega" => "ω",
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Xi" => "Ξ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Phi" => "Φ",
        "Psi" => "Ψ",
        "Omega" => "Ω",
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "sim" => "∼",
        "equiv" => "≡",
        "propto" => "∝",
        "cdot" => "·",
        "times" => "×",
        "pm" => "±",
        "mp" => "∓",
        "sum" => "∑",
        "prod" => "∏",
        "int" => "∫",
        "partial" => "∂",
        "nabla" => "∇",
        "infty" => "∞",
        "in" => "∈",
        "forall" => "∀",
        "exists" => "∃",
        "to" | "rightarrow" => "→",
        "leftarrow" => "←",
        "Rightarrow" => "⇒",
        "mapsto" => "↦",
        "ldots" | "dots" => "…",
        "cdots" => "⋯",
        "mid" => "∣",
        "|" => "‖",
        "circ" => "∘",
        "wedge" => "∧",
        "vee" => "∨",
        "langle" => "⟨",
        "rangle" => "⟩",
        "ell" => "ℓ",
        "arg" => "arg ",
        "oplus" => "⊕",
        "otimes" => "⊗",
        "top" => "ᵀ",
        "quad" => "  ",
        "qquad" => "    ",
        "," | ";" | ":" | " " | "\\" => " ",
        "!" | "left" | "right" | "displaystyle" => "",
        "{" => "{",
        "}" => "}",
        "$" => "$",
        "%" => "%",
        "_" => "_",
        // Operator names such as `\log` and `\max` print as their own name
        _ => return None,
    };
    Some(s)
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' | '−' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'i' => 'ⁱ',
        'k' => 'ᵏ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'o' => 'ᵒ',
        'p' => 'ᵖ',
        't' => 'ᵗ',
        'x' => 'ˣ',
        'y' => 'ʸ',
        'T' | 'ᵀ' => 'ᵀ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' | '−' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        'r' => 'ᵣ',
        's' => 'ₛ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        _ => return None,
    })
}

struct Typesetter<'a> {
    chars: Vec<char>,
    pos: usize,
    out: &'a mut String,
}

impl Typesetter<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn command_name(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        if self.pos == start {
            // Single-character control symbol such as `\,` or `\{`
            if let Some(c) = self.peek() {
                self.pos += 1;
                return c.to_string();
            }
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Raw source of the next argument: a braced group, a command, or one character.
    fn argument(&mut self) -> String {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
        match self.peek() {
            Some('{') => {
                self.pos += 1;
                let start = self.pos;
                let mut depth = 1;
                while let Some(c) = self.peek() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    self.pos += 1;
                }
                let group: String = self.chars[start..self.pos].iter().collect();
                if self.peek() == Some('}') {
                    self.pos += 1;
                }
                group
            }
            Some('\\') => {
                self.pos += 1;
                format!("\\{}", self.command_name())
            }
            Some(c) => {
                self.pos += 1;
                c.to_string()
            }
            None => String::new(),
        }
    }

    fn script(&mut self, map: fn(char) -> Option<char>, fallback: char) {
        let body = typeset(&self.argument());
        let mapped: Option<String> = body.chars().map(map).collect();
        match mapped {
            Some(s) if !s.is_empty() => self.out.push_str(&s),
            _ if body.chars().count() == 1 => {
                self.out.push(fallback);
                self.out.push_str(&body);
            }
            _ => {
                self.out.push(fallback);
                self.out.push('(');
                self.out.push_str(&body);
                self.out.push(')');
            }
        }
    }

    fn accent(&mut self, mark: char) {
        let body = typeset(&self.argument());
        let mut chars = body.chars();
        if let Some(first) = chars.next() {
            self.out.push(first);
            self.out.push(mark);
            self.out.extend(chars);
        }
    }

    fn command(&mut self) {
        let name = self.command_name();
        match name.as_str() {
            "text" | "mathrm" | "textrm" | "operatorname" | "mathit" | "mathbf" | "mathcal"
            | "boldsymbol" => {
                let raw = self.argument();
                self.out.push_str(&raw);
            }
            "hat" | "widehat" => self.accent('\u{0302}'),
            "bar" | "overline" => self.accent('\u{0304}'),
            "tilde" | "widetilde" => self.accent('\u{0303}'),
            "dot" => self.accent('\u{0307}'),
            "vec" => self.accent('\u{20d7}'),
            "frac" => {
                let num = typeset(&self.argument());
                let den = typeset(&self.argument());
                let wrap = |s: &str| {
                    if s.chars().count() > 1 {
                        format!("({s})")
                    } else {
                        s.to_string()
                    }
                };
                self.out.push_str(&wrap(&num));
                self.out.push('/');
                self.out.push_str(&wrap(&den));
            }
            "sqrt" => {
                let body = typeset(&self.argument());
                self.out.push('√');
                if body.chars().count() > 1 {
                    self.out.push('(');
                    self.out.push_str(&body);
                    self.out.push(')');
                } else {
                    self.out.push_str(&body);
                }
            }
            other => match symbol(other) {
                Some(s) => self.out.push_str(s),
                None => self.out.push_str(other),
            },
        }
    }

    fn run(&mut self) {
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                '\\' => self.command(),
                '_' => self.script(subscript, '_'),
                '^' => self.script(superscript, '^'),
                '{' | '}' => {}
                '-' => self.out.push('−'),
                '\'' => self.out.push('′'),
                c if c.is_whitespace() => self.out.push(' '),
                c => self.out.push(c),
            }
        }
    }
}

#[must_use]
/// Typeset TeX math to a single line of Unicode text.
pub fn typeset(tex: &str) -> String {
    let mut raw = String::new();
    Typesetter {
        chars: tex.chars().collect(),
        pos: 0,
        out: &mut raw,
    }
    .run();

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/math.rs"]
mod tests;
