// file: src/render/answer.rs
// description: Answer post-processing and terminal/JSON rendering
// reference: uses colored for terminal output

use super::image::ImageRef;
use super::patterns::{BARE_URL, MARKDOWN_LINK, MULTI_SPACE, SPACE_BEFORE_PUNCT};
use crate::error::Result;
use crate::models::{FilteredCatalog, RowMatch};
use crate::utils::Validator;
use crate::utils::logging::{format_info, format_label, format_warning};
use colored::Colorize;
use serde::Serialize;

pub const NO_MATCH_MESSAGE: &str = "No matching entry found in the datasets.";

/// Removes embedded links from answer text.
///
/// Markdown links keep their label, bare URLs are dropped, and the spacing
/// left behind is tidied.
pub fn strip_links(text: &str) -> String {
    let without_markdown = MARKDOWN_LINK.replace_all(text, "$1");
    let without_urls = BARE_URL.replace_all(&without_markdown, |caps: &regex::Captures| {
        let url = &caps[0];
        let kept = url.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        url[kept.len()..].to_string()
    });
    let tidy = SPACE_BEFORE_PUNCT.replace_all(&without_urls, "$1");
    let tidy = MULTI_SPACE.replace_all(&tidy, " ");

    tidy.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[derive(Debug, Serialize)]
struct RenderedAnswer<'a> {
    query: &'a str,
    matched: bool,
    dataset: Option<&'a str>,
    row: Option<usize>,
    score: Option<f64>,
    answer: Option<String>,
    image: Option<ImageRef>,
}

pub struct AnswerRenderer {
    strip_links: bool,
}

impl AnswerRenderer {
    pub fn new(strip_links: bool) -> Self {
        Self { strip_links }
    }

    pub fn answer_text(&self, found: &RowMatch) -> String {
        if self.strip_links {
            strip_links(&found.answer)
        } else {
            found.answer.clone()
        }
    }

    pub fn render(&self, query: &str, found: Option<&RowMatch>) -> String {
        let Some(found) = found else {
            return format_warning(NO_MATCH_MESSAGE);
        };

        let mut output = format_label("Answer", &self.answer_text(found));
        if let Some(image) = ImageRef::parse(&found.image) {
            output.push('\n');
            output.push_str(&format_label("Image", &image.direct_url()));
        }
        output.push('\n');
        output.push_str(
            &format!(
                "matched \"{}\" in {} #{} (score {:.2})",
                Validator::truncate_text(query, 60),
                found.dataset,
                found.row_index + 1,
                found.score
            )
            .dimmed()
            .to_string(),
        );
        output
    }

    pub fn render_ranked(&self, query: &str, ranked: &[RowMatch]) -> String {
        if ranked.is_empty() {
            return format_warning(NO_MATCH_MESSAGE);
        }

        let mut output = format_info(&format!(
            "{} candidate(s) for \"{}\"",
            ranked.len(),
            query
        ));
        for (idx, found) in ranked.iter().enumerate() {
            output.push_str(&format!(
                "\n{}. {} #{} (score {:.4})\n   {}",
                idx + 1,
                found.dataset,
                found.row_index + 1,
                found.score,
                Validator::truncate_text(&self.answer_text(found), 120)
            ));
            if let Some(image) = ImageRef::parse(&found.image) {
                output.push_str(&format!("\n   image: {}", image));
            }
        }
        output
    }

    pub fn render_filtered(&self, filtered: &FilteredCatalog) -> String {
        if filtered.is_empty() {
            return format_warning(NO_MATCH_MESSAGE);
        }

        let mut output = format_info(&format!(
            "{} row(s) in {} dataset(s) for \"{}\"",
            filtered.total_rows(),
            filtered.catalog.len(),
            filtered.query
        ));
        for dataset in filtered.catalog.iter() {
            output.push_str(&format!("\n{}", dataset.name.cyan().bold()));
            for row in &dataset.rows {
                let cells: Vec<String> = row
                    .cells()
                    .filter(|(_, value)| !value.trim().is_empty())
                    .map(|(column, value)| format!("{}: {}", column, value))
                    .collect();
                output.push_str(&format!(
                    "\n  - {}",
                    Validator::truncate_text(&cells.join(" | "), 160)
                ));
            }
        }
        output
    }

    pub fn render_json(&self, query: &str, found: Option<&RowMatch>) -> Result<String> {
        let rendered = RenderedAnswer {
            query,
            matched: found.is_some(),
            dataset: found.map(|f| f.dataset.as_str()),
            row: found.map(|f| f.row_index),
            score: found.map(|f| f.score),
            answer: found.map(|f| self.answer_text(f)),
            image: found.and_then(|f| ImageRef::parse(&f.image)),
        };
        Ok(serde_json::to_string_pretty(&rendered)?)
    }
}

impl Default for AnswerRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn found(answer: &str, image: &str) -> RowMatch {
        RowMatch {
            dataset: "faq".to_string(),
            row_index: 0,
            score: 1.0,
            answer: answer.to_string(),
            image: image.to_string(),
        }
    }

    #[test]
    fn test_strip_markdown_links_keeps_label() {
        assert_eq!(
            strip_links("Veja [o manual](https://example.com/manual) antes."),
            "Veja o manual antes."
        );
    }

    #[test]
    fn test_strip_bare_urls() {
        assert_eq!(
            strip_links("Reinicie a fila, veja https://example.com/ajuda."),
            "Reinicie a fila, veja."
        );
        assert_eq!(
            strip_links("Acesse www.exemplo.com.br para mais detalhes"),
            "Acesse para mais detalhes"
        );
    }

    #[test]
    fn test_strip_links_leaves_plain_text() {
        assert_eq!(strip_links("Custa R$ 10,00."), "Custa R$ 10,00.");
    }

    #[test]
    fn test_render_no_match() {
        colored::control::set_override(false);
        let renderer = AnswerRenderer::default();
        assert!(renderer.render("clima", None).contains(NO_MATCH_MESSAGE));
    }

    #[test]
    fn test_render_skips_missing_image() {
        colored::control::set_override(false);
        let renderer = AnswerRenderer::default();
        let text = renderer.render("erro", Some(&found("reinicie a fila", "")));
        assert!(text.contains("reinicie a fila"));
        assert!(!text.contains("Image"));

        let with_image = renderer.render(
            "erro",
            Some(&found("ok", "https://drive.google.com/open?id=1AbCdEfGhIjKlMnOp")),
        );
        assert!(with_image.contains("uc?export=view&id=1AbCdEfGhIjKlMnOp"));
    }

    #[test]
    fn test_render_json() {
        let renderer = AnswerRenderer::new(false);
        let json = renderer
            .render_json("erro", Some(&found("[manual](https://x.io)", "")))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["matched"], true);
        assert_eq!(value["answer"], "[manual](https://x.io)");
        assert!(value["image"].is_null());
    }
}
