//! Keyword lookup map for instruction dispatch.
//!
//! Maps uppercase keywords to their instruction kind. The table is static and
//! the hash map over it is built on first use, so there is no registration
//! step and no mutable global state after startup.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ast::InstructionKind;

/// Every recognised keyword. Two-word forms are stored with a single space.
pub const KEYWORDS: &[(&str, InstructionKind)] = &[
    ("INBOX", InstructionKind::Inbox),
    ("OUTBOX", InstructionKind::Outbox),
    ("JUMP", InstructionKind::Jump),
    ("JUMPZ", InstructionKind::JumpZ),
    ("JUMPN", InstructionKind::JumpN),
    ("COPYFROM", InstructionKind::CopyFrom),
    ("COPYTO", InstructionKind::CopyTo),
    ("ADD", InstructionKind::Add),
    ("SUB", InstructionKind::Sub),
    ("BUMPUP", InstructionKind::BumpUp),
    ("BUMPDN", InstructionKind::BumpDn),
    ("COMMENT", InstructionKind::Comment),
    ("DEFINE COMMENT", InstructionKind::DefineComment),
    ("DEFINE LABEL", InstructionKind::DefineLabel),
];

/// Leading word of the two-word directives.
const DEFINE: &str = "DEFINE";

fn keyword_map() -> &'static HashMap<&'static str, InstructionKind> {
    static MAP: OnceLock<HashMap<&'static str, InstructionKind>> = OnceLock::new();
    MAP.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Result of resolving the leading tokens of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub kind: InstructionKind,
    /// How many tokens the keyword itself used (1, or 2 for `DEFINE x`).
    pub keyword_tokens: usize,
}

/// Resolve the keyword at the start of `tokens`, case-insensitively.
///
/// On failure returns the uppercased keyword text that was looked up.
pub fn resolve(tokens: &[&str]) -> Result<Resolved, String> {
    let first = tokens.first().map(|t| t.to_uppercase()).unwrap_or_default();

    let (keyword, keyword_tokens) = if first == DEFINE {
        match tokens.get(1) {
            Some(second) => (format!("{} {}", first, second.to_uppercase()), 2),
            None => (first, 1),
        }
    } else {
        (first, 1)
    };

    keyword_map()
        .get(keyword.as_str())
        .map(|&kind| Resolved { kind, keyword_tokens })
        .ok_or(keyword)
}

/// Check if a keyword names an instruction.
pub fn handles(keyword: &str) -> bool {
    keyword_map().contains_key(keyword.to_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(resolve(&["INBOX"]).unwrap().kind, InstructionKind::Inbox);
        assert_eq!(resolve(&["copyfrom", "3"]).unwrap().kind, InstructionKind::CopyFrom);
        assert_eq!(resolve(&["JumpZ", "a"]).unwrap().kind, InstructionKind::JumpZ);
    }

    #[test]
    fn test_two_word_forms() {
        let r = resolve(&["DEFINE", "comment", "0"]).unwrap();
        assert_eq!(r.kind, InstructionKind::DefineComment);
        assert_eq!(r.keyword_tokens, 2);

        let r = resolve(&["define", "LABEL", "4"]).unwrap();
        assert_eq!(r.kind, InstructionKind::DefineLabel);
    }

    #[test]
    fn test_unknown_keywords_are_uppercased() {
        assert_eq!(resolve(&["frogs"]), Err("FROGS".to_string()));
        assert_eq!(resolve(&["define"]), Err("DEFINE".to_string()));
        assert_eq!(resolve(&["define", "frogs"]), Err("DEFINE FROGS".to_string()));
    }

    #[test]
    fn test_all_kinds_covered() {
        for (keyword, kind) in KEYWORDS {
            assert!(handles(keyword));
            assert_eq!(kind.mnemonic(), *keyword);
        }
        assert!(!handles("DEFINE"));
    }
}
