//! Catalog analysis
//!
//! Compiles a validated definition into the per-mode dispatch tables the
//! scanner runs on: parallel arrays of anchored regexes and per-pattern
//! metadata, plus the set of named group buckets. The tables are immutable
//! after construction.

use compact_str::CompactString;
use hashbrown::HashMap;
use regex::Regex;
use smallvec::SmallVec;

use crate::catalog::validate::scan_inline_flags;
use crate::catalog::{LexerDefinition, TokenGroup, TokenPattern, TokenType};
use crate::kind::TokenKind;

/// Compile a pattern anchored at the scan position.
///
/// The underlying engine has no sticky-matching mode, so every pattern is
/// wrapped as `\A(?:…)`; `find` on a tail slice then either matches at
/// offset zero or not at all.
pub(crate) fn compile_anchored(source: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\A(?:{source})"))
}

/// Where a matched token goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Disposition {
    Default,
    Skipped,
    Group(CompactString),
}

/// One mode's compiled dispatch table: parallel arrays indexed by pattern
/// position, in declaration order.
#[derive(Debug)]
pub(crate) struct ModeTable<K: TokenKind> {
    pub(crate) patterns: Vec<Regex>,
    pub(crate) owner: Vec<K>,
    pub(crate) disposition: Vec<Disposition>,
    pub(crate) longer_alt: Vec<Option<usize>>,
    pub(crate) can_line_terminate: Vec<bool>,
    pub(crate) push_mode: Vec<Option<usize>>,
    pub(crate) pop_mode: Vec<bool>,
}

/// Everything the scanner needs, compiled once at construction.
#[derive(Debug)]
pub(crate) struct CompiledCatalog<K: TokenKind> {
    pub(crate) modes: Vec<ModeTable<K>>,
    pub(crate) mode_names: Vec<CompactString>,
    pub(crate) default_mode: usize,
    /// Every named group mentioned by any descriptor in any mode, in first
    /// mention order. The result map always carries a bucket for each.
    pub(crate) group_names: Vec<CompactString>,
}

impl<K: TokenKind> CompiledCatalog<K> {
    pub(crate) fn mode_index(&self, name: &str) -> Option<usize> {
        self.mode_names.iter().position(|n| n == name)
    }
}

/// Compile a definition that passed validation.
///
/// Descriptors whose pattern is absent, category-only, or uncompilable are
/// excluded from the tables. Validation has already reported them, and the
/// exclusion keeps the deferred-errors path well defined.
pub(crate) fn analyze_definition<K: TokenKind>(def: &LexerDefinition<K>) -> CompiledCatalog<K> {
    let mode_names: Vec<CompactString> = def.modes.iter().map(|(name, _)| name.clone()).collect();
    let default_mode = mode_names
        .iter()
        .position(|n| *n == def.default_mode)
        .unwrap_or(0);

    let mut group_names: Vec<CompactString> = Vec::new();
    for (_, tokens) in &def.modes {
        for tok in tokens {
            if let TokenGroup::Named(name) = &tok.group
                && !group_names.contains(name)
            {
                group_names.push(name.clone());
            }
        }
    }

    let modes = def
        .modes
        .iter()
        .map(|(_, tokens)| compile_mode(tokens, &mode_names))
        .collect();

    CompiledCatalog {
        modes,
        mode_names,
        default_mode,
        group_names,
    }
}

fn compile_mode<K: TokenKind>(
    tokens: &[TokenType<K>],
    mode_names: &[CompactString],
) -> ModeTable<K> {
    // First pass: keep the descriptors that compile, remember the pattern
    // index owned by each descriptor identity.
    let mut included: Vec<(&TokenType<K>, Regex, &str)> = Vec::new();
    let mut index_of: HashMap<K, usize, ahash::RandomState> =
        HashMap::with_hasher(ahash::RandomState::new());
    for tok in tokens {
        let Some(TokenPattern::Regex(source)) = &tok.pattern else {
            continue;
        };
        let Ok(compiled) = compile_anchored(source) else {
            continue;
        };
        index_of.entry(tok.kind).or_insert(included.len());
        included.push((tok, compiled, source.as_str()));
    }

    let mut table = ModeTable {
        patterns: Vec::with_capacity(included.len()),
        owner: Vec::with_capacity(included.len()),
        disposition: Vec::with_capacity(included.len()),
        longer_alt: Vec::with_capacity(included.len()),
        can_line_terminate: Vec::with_capacity(included.len()),
        push_mode: Vec::with_capacity(included.len()),
        pop_mode: Vec::with_capacity(included.len()),
    };

    // Second pass: fill the parallel arrays, resolving longer-alt
    // references through category-only descriptors.
    for (tok, compiled, source) in included {
        table.patterns.push(compiled);
        table.owner.push(tok.kind);
        table.disposition.push(match &tok.group {
            TokenGroup::Default => Disposition::Default,
            TokenGroup::Skipped => Disposition::Skipped,
            TokenGroup::Named(name) => Disposition::Group(name.clone()),
        });
        table.longer_alt.push(
            tok.longer_alt
                .and_then(|alt| resolve_longer_alt(alt, tokens, &index_of)),
        );
        table.can_line_terminate.push(
            tok.line_breaks
                .unwrap_or_else(|| pattern_may_match_line_terminator(source)),
        );
        table.push_mode.push(
            tok.push_mode
                .as_ref()
                .and_then(|name| mode_names.iter().position(|n| n == name)),
        );
        table.pop_mode.push(tok.pop_mode);
    }

    table
}

fn resolve_longer_alt<K: TokenKind>(
    start: K,
    tokens: &[TokenType<K>],
    index_of: &HashMap<K, usize, ahash::RandomState>,
) -> Option<usize> {
    let mut seen: SmallVec<[K; 4]> = SmallVec::new();
    let mut current = start;
    loop {
        if seen.contains(&current) {
            return None;
        }
        seen.push(current);
        if let Some(&idx) = index_of.get(&current) {
            return Some(idx);
        }
        // Not a compiled pattern; follow the referenced descriptor's own
        // alternative (category chains).
        current = tokens
            .iter()
            .find(|tok| tok.kind == current)?
            .longer_alt?;
    }
}

/// Conservatively decide whether a pattern could match a line terminator.
///
/// Over-approximating is harmless: the scanner counts the terminators
/// actually present in a match and a count of zero corrects the estimate.
/// Under-approximating would silently break line numbers, so any construct
/// that *could* cover `\n` or `\r` answers yes. An explicit `line_breaks`
/// declaration on the descriptor overrides this derivation.
fn pattern_may_match_line_terminator(source: &str) -> bool {
    let bytes = source.as_bytes();
    let mut in_class = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' | b'\r' => return true,
            b'\\' => {
                if matches!(
                    bytes.get(i + 1),
                    Some(b'n' | b'r' | b's' | b'v' | b'W' | b'D' | b'p')
                ) {
                    return true;
                }
                i += 2;
                continue;
            }
            b'[' if !in_class => {
                in_class = true;
                // a negated class covers almost everything
                if bytes.get(i + 1) == Some(&b'^') {
                    return true;
                }
            }
            b']' if in_class => in_class = false,
            // '.' skips \n but does match \r
            b'.' if !in_class => return true,
            b'(' if !in_class && bytes.get(i + 1) == Some(&b'?') => {
                if let Some(flags) = scan_inline_flags(&bytes[i + 2..])
                    && flags.contains('s')
                {
                    return true;
                }
            }
            _ => {}
        }
        i += 1;
    }

    false
}
