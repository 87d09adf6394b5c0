/// Text progress bar such as `[##########----------] 50%`.
pub fn render_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = (usize::from(percent) * width + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled)),
        percent
    )
}
