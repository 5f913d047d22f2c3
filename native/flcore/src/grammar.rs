//! Context-free grammars and ambiguity by parse-tree enumeration.
//!
//! Grammars use single-character symbols: uppercase ASCII letters are
//! nonterminals, anything else is a terminal, and `λ` or `ε` stands for the
//! empty alternative.
//!
//! ```text
//! S -> aSbS | bSaS | λ
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FlError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammarSymbol {
    Terminal(char),
    Nonterminal(char),
}

impl GrammarSymbol {
    fn from_char(c: char) -> Self {
        if c.is_ascii_uppercase() {
            GrammarSymbol::Nonterminal(c)
        } else {
            GrammarSymbol::Terminal(c)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub lhs: char,
    pub rhs: Vec<GrammarSymbol>,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> ", self.lhs)?;
        if self.rhs.is_empty() {
            return f.write_str("λ");
        }
        for symbol in &self.rhs {
            match symbol {
                GrammarSymbol::Terminal(c) | GrammarSymbol::Nonterminal(c) => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseTree {
    Leaf(char),
    Node { symbol: char, children: Vec<ParseTree> },
}

impl ParseTree {
    /// The terminals along the frontier, left to right.
    pub fn yield_string(&self) -> String {
        let mut out = String::new();
        self.collect_yield(&mut out);
        out
    }

    fn collect_yield(&self, out: &mut String) {
        match self {
            ParseTree::Leaf(c) => out.push(*c),
            ParseTree::Node { children, .. } => {
                for child in children {
                    child.collect_yield(out);
                }
            }
        }
    }

    /// Height of the tree. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            ParseTree::Leaf(_) => 1,
            ParseTree::Node { children, .. } => {
                1 + children.iter().map(ParseTree::depth).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTree::Leaf(c) => write!(f, "{c}"),
            ParseTree::Node { symbol, children } if children.is_empty() => write!(f, "{symbol}(λ)"),
            ParseTree::Node { symbol, children } => {
                write!(f, "{symbol}(")?;
                for (idx, child) in children.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    start: char,
    productions: Vec<Production>,
}

impl Grammar {
    /// Parse rules separated by newlines or `;`. The first rule's left-hand
    /// side is the start symbol.
    pub fn parse(text: &str) -> Result<Self> {
        let mut productions = Vec::new();

        for rule in text.split(['\n', ';']).map(str::trim).filter(|r| !r.is_empty()) {
            let (lhs, alternatives) = rule
                .split_once("->")
                .or_else(|| rule.split_once('→'))
                .ok_or_else(|| FlError::Grammar(format!("missing '->' in rule {rule:?}")))?;

            let mut lhs_chars = lhs.trim().chars();
            let lhs = match (lhs_chars.next(), lhs_chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => c,
                _ => {
                    return Err(FlError::Grammar(format!(
                        "left-hand side {:?} must be one uppercase letter",
                        lhs.trim()
                    )));
                }
            };

            for alternative in alternatives.split('|') {
                let rhs = alternative
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != 'λ' && *c != 'ε')
                    .map(GrammarSymbol::from_char)
                    .collect();
                productions.push(Production { lhs, rhs });
            }
        }

        let start = productions
            .first()
            .map(|p| p.lhs)
            .ok_or_else(|| FlError::Grammar("grammar has no rules".to_string()))?;

        let defined: HashSet<char> = productions.iter().map(|p| p.lhs).collect();
        for production in &productions {
            for symbol in &production.rhs {
                if let GrammarSymbol::Nonterminal(n) = symbol {
                    if !defined.contains(n) {
                        return Err(FlError::Grammar(format!("nonterminal {n} has no rules")));
                    }
                }
            }
        }

        Ok(Self { start, productions })
    }

    /// Start nonterminal.
    pub fn start(&self) -> char {
        self.start
    }

    /// Productions in the order they were written.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Terminal characters, sorted.
    pub fn terminals(&self) -> Vec<char> {
        self.productions
            .iter()
            .flat_map(|p| p.rhs.iter())
            .filter_map(|symbol| match symbol {
                GrammarSymbol::Terminal(c) => Some(*c),
                GrammarSymbol::Nonterminal(_) => None,
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Up to `limit` distinct parse trees of `input` from the start symbol.
    ///
    /// A nonterminal that would re-derive the span it is already deriving is
    /// cut off, so grammars with unit or nullable cycles still terminate.
    pub fn parse_trees(&self, input: &str, limit: usize) -> Vec<ParseTree> {
        if limit == 0 {
            return Vec::new();
        }
        let mut search = TreeSearch {
            grammar: self,
            input: input.chars().collect(),
            limit,
            memo: HashMap::new(),
            active: HashSet::new(),
            cuts: 0,
        };
        let end = search.input.len();
        let trees = search.trees(self.start, 0, end);
        debug!(input, found = trees.len(), limit, "parse tree search");
        trees
    }

    /// Whether `input` has at least one parse tree.
    pub fn derives(&self, input: &str) -> bool {
        !self.parse_trees(input, 1).is_empty()
    }

    /// Whether `input` has two or more parse trees.
    pub fn is_ambiguous_for(&self, input: &str) -> bool {
        self.parse_trees(input, 2).len() >= 2
    }

    /// The first string (shortest, then alphabetical) of at most `max_len`
    /// terminals with two parse trees.
    pub fn find_ambiguous_witness(&self, max_len: usize) -> Option<String> {
        let terminals = self.terminals();
        let mut layer = vec![String::new()];
        for _ in 0..=max_len {
            if let Some(found) = layer.iter().find(|s| self.is_ambiguous_for(s)) {
                return Some(found.clone());
            }
            layer = layer
                .iter()
                .flat_map(|prefix| {
                    terminals.iter().map(move |&c| {
                        let mut next = prefix.clone();
                        next.push(c);
                        next
                    })
                })
                .collect();
        }
        None
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, production) in self.productions.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{production}")?;
        }
        Ok(())
    }
}

struct TreeSearch<'g> {
    grammar: &'g Grammar,
    input: Vec<char>,
    limit: usize,
    /// (nonterminal, start, end) -> trees
    memo: HashMap<(char, usize, usize), Vec<ParseTree>>,
    active: HashSet<(char, usize, usize)>,
    cuts: usize,
}

impl TreeSearch<'_> {
    fn trees(&mut self, symbol: char, start: usize, end: usize) -> Vec<ParseTree> {
        let key = (symbol, start, end);
        if let Some(known) = self.memo.get(&key) {
            return known.clone();
        }
        if !self.active.insert(key) {
            self.cuts += 1;
            return Vec::new();
        }

        let cuts_before = self.cuts;
        let grammar = self.grammar;
        let mut found = Vec::new();
        for production in grammar.productions.iter().filter(|p| p.lhs == symbol) {
            for children in self.sequences(&production.rhs, start, end) {
                found.push(ParseTree::Node { symbol, children });
                if found.len() == self.limit {
                    break;
                }
            }
            if found.len() == self.limit {
                break;
            }
        }

        self.active.remove(&key);
        // Results that depended on a cut are only valid inside this search path.
        if self.cuts == cuts_before {
            self.memo.insert(key, found.clone());
        }
        found
    }

    /// Every way for `rhs` to derive `input[start..end]`, as child lists.
    fn sequences(&mut self, rhs: &[GrammarSymbol], start: usize, end: usize) -> Vec<Vec<ParseTree>> {
        let Some((first, rest)) = rhs.split_first() else {
            return if start == end { vec![Vec::new()] } else { Vec::new() };
        };
        let min_rest = rest
            .iter()
            .filter(|s| matches!(s, GrammarSymbol::Terminal(_)))
            .count();

        let mut out = Vec::new();
        match *first {
            GrammarSymbol::Terminal(c) => {
                if start < end && self.input[start] == c {
                    for mut tail in self.sequences(rest, start + 1, end) {
                        tail.insert(0, ParseTree::Leaf(c));
                        out.push(tail);
                    }
                }
            }
            GrammarSymbol::Nonterminal(n) => {
                for mid in start..=end.saturating_sub(min_rest) {
                    let heads = self.trees(n, start, mid);
                    if heads.is_empty() {
                        continue;
                    }
                    let tails = self.sequences(rest, mid, end);
                    for head in &heads {
                        for tail in &tails {
                            let mut children = Vec::with_capacity(tail.len() + 1);
                            children.push(head.clone());
                            children.extend(tail.iter().cloned());
                            out.push(children);
                            if out.len() == self.limit {
                                return out;
                            }
                        }
                    }
                }
            }
        }
        out.truncate(self.limit);
        out
    }
}
