use crate::model::RecipeRecord;
use std::fmt::Write;

const MIN_UNDERLINE: usize = 16;

/// Render a recipe as plain text for the terminal.
///
/// Ingredients are bulleted and steps numbered; both are soft-wrapped to
/// `width` columns. Empty sections are left out.
pub fn render_recipe(recipe: &RecipeRecord, width: usize) -> String {
    let mut out = String::new();
    let title_len = recipe.name.chars().count();

    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out, "{}", "=".repeat(title_len.max(MIN_UNDERLINE)));
    if !recipe.url.is_empty() {
        let _ = writeln!(out, "{}\n", recipe.url);
    }

    if !recipe.ingredients.is_empty() {
        out.push_str("Ingredients\n-----------\n");
        for ingredient in &recipe.ingredients {
            push_wrapped(&mut out, &format!("- {ingredient}"), width);
        }
        out.push('\n');
    }

    if !recipe.steps.is_empty() {
        out.push_str("Instructions\n------------\n");
        for (n, step) in recipe.steps.iter().enumerate() {
            push_wrapped(&mut out, &format!("{}. {}", n + 1, step), width);
        }
        out.push('\n');
    }

    out
}

fn push_wrapped(out: &mut String, text: &str, width: usize) {
    for line in wrap_text(text, width) {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Greedy word wrap. Runs of whitespace collapse to one space and words
/// longer than `width` are split across lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if line_len > 0 && line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
            continue;
        }

        if line_len > 0 {
            lines.push(std::mem::take(&mut line));
        }

        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(width).peekable();
        while let Some(chunk) = chunks.next() {
            let piece: String = chunk.iter().collect();
            if chunks.peek().is_some() {
                lines.push(piece);
            } else {
                line_len = chunk.len();
                line = piece;
            }
        }
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("- one two   three four", 9),
            vec!["- one two", "three", "four"]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a abcdefgh b", 4), vec!["a", "abcd", "efgh", "b"]);
        assert!(wrap_text("   ", 10).is_empty());
        assert_eq!(wrap_text("short", 92), vec!["short"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        assert_eq!(wrap_text("crème brûlée", 12), vec!["crème brûlée"]);
    }

    #[test]
    fn test_render_recipe() {
        let recipe = RecipeRecord {
            name: "Tea".to_string(),
            url: "https://example.com/tea".to_string(),
            ingredients: vec!["Water".to_string(), "Tea leaves".to_string()],
            steps: vec!["Boil water".to_string(), "Steep leaves for three minutes".to_string()],
        };

        let expected = "Tea\n\
            ================\n\
            https://example.com/tea\n\
            \n\
            Ingredients\n\
            -----------\n\
            - Water\n\
            - Tea leaves\n\
            \n\
            Instructions\n\
            ------------\n\
            1. Boil water\n\
            2. Steep leaves for\n\
            three minutes\n\
            \n";
        assert_eq!(render_recipe(&recipe, 20), expected);
    }

    #[test]
    fn test_render_skips_empty_sections() {
        let recipe = RecipeRecord {
            name: "A very long recipe title here".to_string(),
            url: String::new(),
            ingredients: vec![],
            steps: vec!["Do it".to_string()],
        };

        let rendered = render_recipe(&recipe, 92);
        assert!(rendered.starts_with("A very long recipe title here\n=============================\n"));
        assert!(!rendered.contains("Ingredients"));
        assert!(rendered.contains("Instructions\n------------\n1. Do it\n"));
    }
}
