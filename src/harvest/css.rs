//! Naive CSS rule extraction for the fetch harvester.
//!
//! This is deliberately not a CSS engine: comments are stripped, at-rules
//! are skipped wholesale (block and all), selector text is kept verbatim
//! for the selector engine to interpret, and declarations are split on `;`
//! and the first `:`. Unparsable fragments are dropped with a debug log,
//! never an error; a page with broken CSS still gets an inventory.

/// A single `property: value` pair. Property names are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// One style rule: the raw selector text and its declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// Extract the top-level rules of a stylesheet, in source order.
pub fn parse_rules(css: &str) -> Vec<Rule> {
    let css = strip_comments(css);
    let bytes = css.as_bytes();
    let mut rules = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        if bytes[i] == b'@' {
            i = skip_at_rule(&css, i);
            continue;
        }

        let open = match css[i..].find('{') {
            Some(p) => i + p,
            None => break,
        };
        let close = match find_matching_brace(bytes, open) {
            Some(p) => p,
            None => break,
        };

        let selector = css[i..open].trim().to_string();
        let declarations = parse_declarations(&css[open + 1..close]);
        if selector.is_empty() || declarations.is_empty() {
            log::debug!("skipping empty rule near byte {}", i);
        } else {
            rules.push(Rule {
                selector,
                declarations,
            });
        }
        i = close + 1;
    }

    rules
}

/// Split a declaration block (or inline `style` attribute) into pairs.
pub fn parse_declarations(body: &str) -> Vec<Declaration> {
    body.split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim().to_lowercase();
            let value = value.trim().to_string();
            if property.is_empty() || value.is_empty() {
                None
            } else {
                Some(Declaration { property, value })
            }
        })
        .collect()
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out, // unterminated comment swallows the tail
        }
    }
    out.push_str(rest);
    out
}

// Skip a statement at-rule (through `;`) or a block at-rule (through its
// matching brace). `@media` contents are skipped too: without real media
// evaluation, applying them unconditionally would be worse than ignoring.
fn skip_at_rule(css: &str, start: usize) -> usize {
    let bytes = css.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b';' => return i + 1,
            b'{' => {
                return match find_matching_brace(bytes, i) {
                    Some(close) => close + 1,
                    None => bytes.len(),
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

fn find_matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match *b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
