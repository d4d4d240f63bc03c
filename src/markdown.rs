pub fn html_to_markdown(html: &str) -> String {
    let md = html2md::parse_html(html, false);
    clean_markdown(&md)
}

/// Normalizes whitespace so extracted text indexes the same regardless of
/// the source format's layout habits.
pub fn clean_markdown(md: &str) -> String {
    let mut result = md.replace("\r\n", "\n");

    // Collapse 3+ consecutive blank lines to 2
    while result.contains("\n\n\n") {
        result = result.replace("\n\n\n", "\n\n");
    }

    result = result
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = result.trim().to_string();
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed + "\n"
    }
}
