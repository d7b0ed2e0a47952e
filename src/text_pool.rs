//! String pool resolution
//!
//! Compiled screenplays store most strings once in a shared pool and reference them
//! as `$<index>` tokens. Tokens that cannot be resolved are passed through unchanged.

use crate::types::instruction::{Instruction, ResolvedInstruction};

/// Outcome of resolving a single string token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenResolution<'a> {
    /// Not a pool reference; used as-is
    Literal(&'a str),
    /// Pool reference that resolved to an entry
    Pooled { index: usize, text: &'a str },
    /// Looked like a pool reference but did not resolve; the token text is used as-is
    Unresolved(&'a str),
}

impl<'a> TokenResolution<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Self::Literal(text) | Self::Unresolved(text) => text,
            Self::Pooled { text, .. } => text,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

/// Resolve one token against the pool
pub fn resolve_token<'a>(token: &'a str, pool: &'a [String]) -> TokenResolution<'a> {
    let Some(inner) = token.strip_prefix('$') else {
        return TokenResolution::Literal(token);
    };
    if inner.is_empty() {
        return TokenResolution::Literal(token);
    }

    match leading_index(inner) {
        Some(index) if index < pool.len() => TokenResolution::Pooled {
            index,
            text: &pool[index],
        },
        _ => TokenResolution::Unresolved(token),
    }
}

// Leading integer of `inner`: optional whitespace and sign, then digits. Trailing text is
// ignored and only `-0` survives a minus sign.
fn leading_index(inner: &str) -> Option<usize> {
    let rest = inner.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'+') => (false, &rest[1..]),
        Some(b'-') => (true, &rest[1..]),
        _ => (false, rest),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let index = rest[..end].parse::<usize>().ok()?;
    if negative && index != 0 {
        return None;
    }
    Some(index)
}

/// Resolve every string parameter of an instruction.
///
/// Never fails and always returns one string per token.
pub fn resolve_strings(instruction: &Instruction, pool: &[String]) -> Vec<String> {
    instruction
        .string_params
        .iter()
        .map(|token| {
            let resolution = resolve_token(token, pool);
            if resolution.is_unresolved() {
                log::debug!(
                    target: "tsuzuri::text",
                    "unresolved pool token {token:?} (pool size {})",
                    pool.len()
                );
            }
            resolution.text().to_string()
        })
        .collect()
}

/// Resolve a whole instruction into its display form
pub fn resolve_instruction(instruction: &Instruction, pool: &[String]) -> ResolvedInstruction {
    ResolvedInstruction {
        type_tag: instruction.type_tag.clone(),
        params: instruction.params.clone(),
        string_params: resolve_strings(instruction, pool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<String> {
        vec!["守:「こんにちは」".into(), "M03".into(), "BG".into()]
    }

    fn instruction(tokens: &[&str]) -> Instruction {
        Instruction::new(
            "PlayDialog",
            vec![],
            tokens.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn pooled_token_substitutes_entry() {
        let resolved = resolve_strings(&instruction(&["$1"]), &pool());
        assert_eq!(resolved, vec!["M03"]);
    }

    #[test]
    fn out_of_range_token_passes_through() {
        let pool = pool();
        assert_eq!(resolve_token("$5", &pool), TokenResolution::Unresolved("$5"));
        assert_eq!(resolve_strings(&instruction(&["$5"]), &pool), vec!["$5"]);
    }

    #[test]
    fn non_numeric_and_short_tokens_pass_through() {
        let pool = pool();
        assert_eq!(resolve_token("$", &pool), TokenResolution::Literal("$"));
        assert_eq!(resolve_token("$abc", &pool), TokenResolution::Unresolved("$abc"));
        assert_eq!(resolve_token("$-1", &pool), TokenResolution::Unresolved("$-1"));
        assert_eq!(resolve_token("$a1", &pool), TokenResolution::Unresolved("$a1"));
        assert_eq!(resolve_token("plain", &pool), TokenResolution::Literal("plain"));
    }

    #[test]
    fn leading_digits_are_the_index() {
        let pool = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            resolve_strings(&instruction(&["$1a", "$+1", "$-0", " $1"]), &pool),
            vec!["b", "b", "a", " $1"]
        );
        assert_eq!(
            resolve_token("$ 1", &pool),
            TokenResolution::Pooled { index: 1, text: "b" }
        );
    }

    #[test]
    fn output_length_matches_input() {
        let tokens = ["$0", "", "$", "$99", "text", "$2"];
        let resolved = resolve_strings(&instruction(&tokens), &pool());
        assert_eq!(resolved.len(), tokens.len());
        assert_eq!(resolved[0], "守:「こんにちは」");
        assert_eq!(resolved[1], "");
        assert_eq!(resolved[5], "BG");
    }

    #[test]
    fn empty_pool_never_resolves() {
        assert_eq!(resolve_token("$0", &[]), TokenResolution::Unresolved("$0"));
    }

    #[test]
    fn resolve_instruction_keeps_params() {
        let mut raw = instruction(&["$1"]);
        raw.params = vec![4, 7];
        let resolved = resolve_instruction(&raw, &pool());
        assert_eq!(resolved.type_tag, "PlayDialog");
        assert_eq!(resolved.params, vec![4, 7]);
        assert_eq!(resolved.string_params, vec!["M03"]);
    }
}
