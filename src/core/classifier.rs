use regex::Regex;

use crate::core::SymbolKind;

/// One classification rule: a search pattern plus the capture group that
/// holds the declared name.
pub struct ClassificationRule {
    kind: SymbolKind,
    pattern: Regex,
    name_group: usize,
}

impl ClassificationRule {
    fn new(kind: SymbolKind, pattern: &str, name_group: usize) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("invalid classification pattern"),
            name_group,
        }
    }

    fn apply(&self, line: &str) -> Option<(SymbolKind, String)> {
        let captures = self.pattern.captures(line)?;
        let name = captures.get(self.name_group)?;
        Some((self.kind, name.as_str().to_string()))
    }
}

/// Line classifier for Solidity declarations.
///
/// Rules run in a fixed priority order and the first match wins. The mapping
/// rule is checked before the variable rule: a mapping declaration also
/// satisfies the looser variable pattern, and must not be misfiled. Matching
/// is case-sensitive, single-line, and keyword-literal; a line that matches
/// nothing contributes nothing.
pub struct SymbolClassifier {
    rules: Vec<ClassificationRule>,
}

impl SymbolClassifier {
    pub fn new() -> Self {
        let rules = vec![
            ClassificationRule::new(SymbolKind::Function, r"function\s+(\w+)\s*\(", 1),
            ClassificationRule::new(SymbolKind::Mapping, r"mapping\s*\(([^)]+)\)\s+(\w+);", 2),
            ClassificationRule::new(
                SymbolKind::Variable,
                r"\b(?:uint|int|address|bool|string|bytes\d*|mapping|struct|enum)\b.*?\s+(\w+)\s*[;=]",
                1,
            ),
            ClassificationRule::new(SymbolKind::Modifier, r"modifier\s+(\w+)", 1),
            ClassificationRule::new(SymbolKind::Structure, r"struct\s+(\w+)\s*\{", 1),
        ];
        Self { rules }
    }

    /// Classifies one line after trimming surrounding whitespace. Returns at
    /// most one (kind, name) pair per line.
    pub fn classify_line(&self, line: &str) -> Option<(SymbolKind, String)> {
        let line = line.trim();
        self.rules.iter().find_map(|rule| rule.apply(line))
    }
}
