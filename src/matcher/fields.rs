// file: src/matcher/fields.rs
// description: answer and image column resolution through name aliases
// reference: configurable column alias matching

use super::text::normalize;
use crate::models::Row;

/// Picks a row's column by an ordered list of aliases.
///
/// Aliases and column names are compared normalized. An exact name match on
/// any alias beats a partial one, so `"Resposta"` wins over
/// `"Resposta antiga"` when both exist.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    aliases: Vec<String>,
}

impl FieldResolver {
    pub fn new(aliases: &[String]) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(|alias| normalize(alias))
                .filter(|alias| !alias.is_empty())
                .collect(),
        }
    }

    pub fn column<'a>(&self, row: &'a Row) -> Option<&'a str> {
        let columns: Vec<(String, &'a str)> = row
            .columns()
            .map(|column| (normalize(column), column))
            .collect();

        for alias in &self.aliases {
            if let Some((_, column)) = columns.iter().find(|(name, _)| name == alias) {
                return Some(*column);
            }
        }

        for alias in &self.aliases {
            if let Some((_, column)) = columns
                .iter()
                .find(|(name, _)| name.contains(alias.as_str()))
            {
                return Some(*column);
            }
        }

        None
    }

    /// Value of the resolved column, `None` when no alias matches.
    pub fn value<'a>(&self, row: &'a Row) -> Option<&'a str> {
        self.column(row).and_then(|column| row.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        Row::new(
            cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn aliases(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_resolves_case_and_accent_insensitively() {
        let resolver = FieldResolver::new(&aliases(&["descricao"]));
        let r = row(&[("Pergunta", "x"), ("DESCRIÇÃO", "y")]);
        assert_eq!(resolver.value(&r), Some("y"));
    }

    #[test]
    fn test_exact_alias_beats_partial_match() {
        let resolver = FieldResolver::new(&aliases(&["resposta"]));
        let r = row(&[("Resposta antiga", "old"), ("Resposta", "new")]);
        assert_eq!(resolver.value(&r), Some("new"));
    }

    #[test]
    fn test_alias_order_is_priority() {
        let resolver = FieldResolver::new(&aliases(&["imagem", "url"]));
        let r = row(&[("URL", "https://a"), ("Imagem", "https://b")]);
        assert_eq!(resolver.value(&r), Some("https://b"));
    }

    #[test]
    fn test_partial_match_fallback() {
        let resolver = FieldResolver::new(&aliases(&["foto"]));
        let r = row(&[("Link da foto", "https://c")]);
        assert_eq!(resolver.value(&r), Some("https://c"));
    }

    #[test]
    fn test_missing_column() {
        let resolver = FieldResolver::new(&aliases(&["imagem"]));
        assert_eq!(resolver.value(&row(&[("Pergunta", "x")])), None);
    }
}
