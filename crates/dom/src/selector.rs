//! A small CSS selector engine for `query_selector` and friends.
//!
//! Supported: type and universal selectors, `#id`, `.class`, attribute
//! selectors (`[a]`, `[a=v]`, `~=`, `^=`, `$=`, `*=`, `|=`), the
//! pseudo-classes `:first-child`, `:last-child`, `:only-child`, `:empty`,
//! `:not(<compound>)`, the four combinators, and comma-separated lists.
//! Anything else is a syntax error rather than a silent non-match.

use crate::error::DomError;
use crate::node::{Namespace, NodeRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttrOp {
    Equals,
    Includes,
    Prefix,
    Suffix,
    Substring,
    DashMatch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Simple {
    Id(String),
    Class(String),
    Attr {
        name: String,
        test: Option<(AttrOp, String)>,
    },
    FirstChild,
    LastChild,
    OnlyChild,
    Empty,
    Not(Box<Compound>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    /// `None` is the universal selector (explicit or implied).
    tag: Option<String>,
    simple: Vec<Simple>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Complex>,
}

struct Cursor<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn error(&self, what: &str) -> DomError {
        DomError::Syntax(format!("{what} at {} in {:?}", self.pos, self.input))
    }

    fn ident(&mut self) -> Result<String, DomError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
        {
            self.pos += 1;
        }
        let ident: String = self.chars[start..self.pos].iter().collect();
        let starts_badly = ident.starts_with(|c: char| c.is_ascii_digit())
            || (ident.starts_with('-') && ident[1..].starts_with(|c: char| c.is_ascii_digit()));
        if ident.is_empty() || ident == "-" || starts_badly {
            return Err(self.error("expected identifier"));
        }
        Ok(ident)
    }

    fn string_or_ident(&mut self) -> Result<String, DomError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != q) {
                    self.pos += 1;
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                if !self.eat(q) {
                    return Err(self.error("unterminated string"));
                }
                Ok(value)
            }
            _ => self.ident(),
        }
    }
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let mut cur = Cursor::new(input);
        let mut selectors = Vec::new();
        loop {
            cur.skip_ws();
            selectors.push(parse_complex(&mut cur)?);
            if cur.eat(',') {
                continue;
            }
            if cur.peek().is_none() {
                break;
            }
            return Err(cur.error("unexpected character"));
        }
        Ok(Self { selectors })
    }

    pub fn matches(&self, element: &NodeRef) -> bool {
        self.selectors
            .iter()
            .any(|c| match_complex(c, c.compounds.len() - 1, element))
    }
}

fn parse_complex(cur: &mut Cursor<'_>) -> Result<Complex, DomError> {
    let mut compounds = vec![parse_compound(cur)?];
    let mut combinators = Vec::new();
    loop {
        let had_ws = cur.skip_ws();
        let comb = match cur.peek() {
            None | Some(',') => break,
            Some('>') => Combinator::Child,
            Some('+') => Combinator::NextSibling,
            Some('~') => Combinator::SubsequentSibling,
            Some(_) if had_ws => Combinator::Descendant,
            Some(_) => return Err(cur.error("unexpected character")),
        };
        if comb != Combinator::Descendant {
            cur.bump();
            cur.skip_ws();
        }
        combinators.push(comb);
        compounds.push(parse_compound(cur)?);
    }
    Ok(Complex {
        compounds,
        combinators,
    })
}

fn parse_compound(cur: &mut Cursor<'_>) -> Result<Compound, DomError> {
    let mut compound = Compound::default();
    let mut seen = false;
    if cur.eat('*') {
        seen = true;
    } else if cur
        .peek()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || !c.is_ascii())
    {
        compound.tag = Some(cur.ident()?);
        seen = true;
    }
    loop {
        match cur.peek() {
            Some('#') => {
                cur.bump();
                compound.simple.push(Simple::Id(cur.ident()?));
            }
            Some('.') => {
                cur.bump();
                compound.simple.push(Simple::Class(cur.ident()?));
            }
            Some('[') => {
                cur.bump();
                compound.simple.push(parse_attr(cur)?);
            }
            Some(':') => {
                cur.bump();
                compound.simple.push(parse_pseudo(cur)?);
            }
            _ => break,
        }
        seen = true;
    }
    if !seen {
        return Err(cur.error("expected selector"));
    }
    Ok(compound)
}

fn parse_attr(cur: &mut Cursor<'_>) -> Result<Simple, DomError> {
    cur.skip_ws();
    let name = cur.ident()?;
    cur.skip_ws();
    let op = match cur.peek() {
        Some(']') => {
            cur.bump();
            return Ok(Simple::Attr { name, test: None });
        }
        Some('=') => AttrOp::Equals,
        Some('~') => AttrOp::Includes,
        Some('^') => AttrOp::Prefix,
        Some('$') => AttrOp::Suffix,
        Some('*') => AttrOp::Substring,
        Some('|') => AttrOp::DashMatch,
        _ => return Err(cur.error("bad attribute selector")),
    };
    cur.bump();
    if op != AttrOp::Equals && !cur.eat('=') {
        return Err(cur.error("bad attribute operator"));
    }
    cur.skip_ws();
    let value = cur.string_or_ident()?;
    cur.skip_ws();
    if !cur.eat(']') {
        return Err(cur.error("unterminated attribute selector"));
    }
    Ok(Simple::Attr {
        name,
        test: Some((op, value)),
    })
}

fn parse_pseudo(cur: &mut Cursor<'_>) -> Result<Simple, DomError> {
    let name = cur.ident()?.to_ascii_lowercase();
    match name.as_str() {
        "first-child" => Ok(Simple::FirstChild),
        "last-child" => Ok(Simple::LastChild),
        "only-child" => Ok(Simple::OnlyChild),
        "empty" => Ok(Simple::Empty),
        "not" => {
            if !cur.eat('(') {
                return Err(cur.error("expected ( after :not"));
            }
            cur.skip_ws();
            let inner = parse_compound(cur)?;
            cur.skip_ws();
            if !cur.eat(')') {
                return Err(cur.error("unterminated :not("));
            }
            Ok(Simple::Not(Box::new(inner)))
        }
        _ => Err(cur.error("unsupported pseudo-class")),
    }
}

fn previous_element_sibling(node: &NodeRef) -> Option<NodeRef> {
    let mut current = node.previous_sibling();
    while let Some(n) = current {
        if n.is_element() {
            return Some(n);
        }
        current = n.previous_sibling();
    }
    None
}

fn next_element_sibling(node: &NodeRef) -> Option<NodeRef> {
    let mut current = node.next_sibling();
    while let Some(n) = current {
        if n.is_element() {
            return Some(n);
        }
        current = n.next_sibling();
    }
    None
}

fn parent_element(node: &NodeRef) -> Option<NodeRef> {
    node.parent().filter(NodeRef::is_element)
}

fn match_complex(complex: &Complex, index: usize, el: &NodeRef) -> bool {
    if !match_compound(&complex.compounds[index], el) {
        return false;
    }
    if index == 0 {
        return true;
    }
    match complex.combinators[index - 1] {
        Combinator::Child => {
            parent_element(el).is_some_and(|p| match_complex(complex, index - 1, &p))
        }
        Combinator::Descendant => {
            let mut current = parent_element(el);
            while let Some(p) = current {
                if match_complex(complex, index - 1, &p) {
                    return true;
                }
                current = parent_element(&p);
            }
            false
        }
        Combinator::NextSibling => previous_element_sibling(el)
            .is_some_and(|s| match_complex(complex, index - 1, &s)),
        Combinator::SubsequentSibling => {
            let mut current = previous_element_sibling(el);
            while let Some(s) = current {
                if match_complex(complex, index - 1, &s) {
                    return true;
                }
                current = previous_element_sibling(&s);
            }
            false
        }
    }
}

fn match_compound(compound: &Compound, el: &NodeRef) -> bool {
    if let Some(tag) = &compound.tag {
        let Some(local) = el.local_name() else {
            return false;
        };
        let same = match el.namespace() {
            Some(Namespace::Svg) => local == *tag,
            _ => local.eq_ignore_ascii_case(tag),
        };
        if !same {
            return false;
        }
    }
    compound.simple.iter().all(|s| match_simple(s, el))
}

fn match_simple(simple: &Simple, el: &NodeRef) -> bool {
    match simple {
        Simple::Id(id) => el.get_attribute("id").as_deref() == Some(id.as_str()),
        Simple::Class(class) => el.class_list().iter().any(|c| c == class),
        Simple::Attr { name, test } => {
            let Some(actual) = el.get_attribute(name) else {
                return false;
            };
            let Some((op, expected)) = test else {
                return true;
            };
            match op {
                AttrOp::Equals => actual == *expected,
                AttrOp::Includes => actual.split_ascii_whitespace().any(|w| w == expected),
                AttrOp::Prefix => !expected.is_empty() && actual.starts_with(expected.as_str()),
                AttrOp::Suffix => !expected.is_empty() && actual.ends_with(expected.as_str()),
                AttrOp::Substring => !expected.is_empty() && actual.contains(expected.as_str()),
                AttrOp::DashMatch => {
                    actual == *expected || actual.starts_with(&format!("{expected}-"))
                }
            }
        }
        Simple::FirstChild => el.parent().is_some() && previous_element_sibling(el).is_none(),
        Simple::LastChild => el.parent().is_some() && next_element_sibling(el).is_none(),
        Simple::OnlyChild => {
            el.parent().is_some()
                && previous_element_sibling(el).is_none()
                && next_element_sibling(el).is_none()
        }
        Simple::Empty => el.children().iter().all(|c| {
            !(c.is_element() || (c.is_text() && !c.text_content().is_empty()))
        }),
        Simple::Not(inner) => !match_compound(inner, el),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, create_element, create_text_node};
    use rstest::rstest;

    fn el(name: &str, attrs: &[(&str, &str)]) -> NodeRef {
        let node = create_element(name).unwrap();
        for (k, v) in attrs {
            node.set_attribute(k, v).unwrap();
        }
        node
    }

    /// body > div#app.shell > (ul.list > li.item*3 , p[data-kind=note])
    fn fixture() -> Document {
        let doc = Document::new();
        let app = el("div", &[("id", "app"), ("class", "shell dark")]);
        let list = el("ul", &[("class", "list")]);
        for i in 0..3 {
            let li = el("li", &[("class", "item"), ("data-index", &i.to_string())]);
            li.append_child(&create_text_node(&format!("item {i}"))).unwrap();
            list.append_child(&li).unwrap();
        }
        let note = el("p", &[("data-kind", "note"), ("lang", "en-US")]);
        app.append_child(&list).unwrap();
        app.append_child(&note).unwrap();
        doc.body().unwrap().append_child(&app).unwrap();
        doc
    }

    #[rstest]
    #[case("li", 3)]
    #[case("LI", 3)]
    #[case("*", 9)]
    #[case("#app", 1)]
    #[case(".item", 3)]
    #[case("div.shell.dark", 1)]
    #[case("ul > li", 3)]
    #[case("body li", 3)]
    #[case("div > li", 0)]
    #[case("li:first-child", 1)]
    #[case("li:last-child", 1)]
    #[case("li:not(:first-child)", 2)]
    #[case("li + li", 2)]
    #[case("ul ~ p", 1)]
    #[case("[data-kind]", 1)]
    #[case("[data-kind=note]", 1)]
    #[case("[data-kind='note']", 1)]
    #[case("[data-index^='1']", 1)]
    #[case("[class~=dark]", 1)]
    #[case("[lang|=en]", 1)]
    #[case("[class*=hel]", 1)]
    #[case("[class$=ark]", 1)]
    #[case("li, p", 4)]
    #[case("ul:empty", 0)]
    #[case("p:empty", 1)]
    #[case("head:empty", 1)]
    fn selector_counts(#[case] selector: &str, #[case] expected: usize) {
        let doc = fixture();
        let found = doc.query_selector_all(selector).unwrap();
        assert_eq!(found.len(), expected, "selector {selector:?}");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("#")]
    #[case("div >")]
    #[case("[data-x")]
    #[case("a:hover")]
    #[case(".1abc")]
    #[case("div,")]
    #[case("a!b")]
    fn invalid_selectors_are_syntax_errors(#[case] selector: &str) {
        let doc = fixture();
        assert!(
            matches!(doc.query_selector(selector), Err(DomError::Syntax(_))),
            "selector {selector:?} should be rejected"
        );
    }

    #[test]
    fn query_selector_returns_first_in_tree_order() {
        let doc = fixture();
        let first = doc.query_selector(".item").unwrap().unwrap();
        assert_eq!(first.text_content(), "item 0");
        assert!(doc.query_selector(".nope").unwrap().is_none());
    }

    #[test]
    fn matches_checks_single_element() {
        let doc = fixture();
        let app = doc.get_element_by_id("app").unwrap();
        assert!(app.matches("body > div.shell").unwrap());
        assert!(!app.matches("span").unwrap());
    }
}
