// src/markdown.rs
//
// Markdown -> HTML via a fixed sequence of regex substitutions. The stage
// order is a contract: bold runs before italic so `**` is not eaten as two
// italics, images run before links so the leading `!` is not orphaned, and
// headers are matched 3,2,1,4,5,6. Fenced code blocks are pulled out before
// any stage runs and spliced back in at the end, so nothing rewrites their
// contents.
//
// Output is a raw HTML fragment. Nothing is sanitized here; callers own
// the trust boundary for the markdown they feed in.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Fenced code blocks: optional language tag, then everything up to the
    // closing fence.
    static ref FENCE_RE: Regex = Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap();

    // Headers, in application order.
    static ref H3_RE: Regex = Regex::new(r"(?m)^### (.*)$").unwrap();
    static ref H2_RE: Regex = Regex::new(r"(?m)^## (.*)$").unwrap();
    static ref H1_RE: Regex = Regex::new(r"(?m)^# (.*)$").unwrap();
    static ref H4_RE: Regex = Regex::new(r"(?m)^#### (.*)$").unwrap();
    static ref H5_RE: Regex = Regex::new(r"(?m)^##### (.*)$").unwrap();
    static ref H6_RE: Regex = Regex::new(r"(?m)^###### (.*)$").unwrap();

    // Inline emphasis.
    static ref BOLD_STARS_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref BOLD_UNDERSCORES_RE: Regex = Regex::new(r"__(.*?)__").unwrap();
    static ref ITALIC_STAR_RE: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref ITALIC_UNDERSCORE_RE: Regex = Regex::new(r"_(.*?)_").unwrap();
    static ref STRIKETHROUGH_RE: Regex = Regex::new(r"~~(.*?)~~").unwrap();

    static ref INLINE_CODE_RE: Regex = Regex::new(r"`([^`]+)`").unwrap();

    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();

    static ref ULIST_STAR_RE: Regex = Regex::new(r"(?m)^\* (.+)$").unwrap();
    static ref ULIST_DASH_RE: Regex = Regex::new(r"(?m)^- (.+)$").unwrap();
    // Greedy across the whole fragment: a single <ul> from the first list
    // item to the last, applied once.
    static ref ULIST_WRAP_RE: Regex = Regex::new(r"(?s)(<li>.*</li>)").unwrap();
    static ref OLIST_RE: Regex = Regex::new(r"(?m)^\d+\. (.+)$").unwrap();

    static ref BLOCKQUOTE_RE: Regex = Regex::new(r"(?m)^> (.+)$").unwrap();

    static ref HR_DASHES_RE: Regex = Regex::new(r"(?m)^---$").unwrap();
    static ref HR_STARS_RE: Regex = Regex::new(r"(?m)^\*\*\*$").unwrap();
}

// Placeholder delimiters for extracted fenced blocks. NUL cannot appear in
// the patterns above, so no stage can touch a placeholder.
const BLOCK_MARK: char = '\u{0}';

/// Render a markdown string to an HTML fragment.
///
/// Total over arbitrary input: malformed markdown degrades to partially
/// transformed or literal text, it never fails.
///
/// Known quirks, kept deliberately: ordered-list items become `<li>`s but
/// are never wrapped in `<ol>`; each `> ` line becomes its own
/// `<blockquote>`; a `***` rule is consumed by the emphasis stages before
/// the rule stage sees it; runs of 7+ `#` stay literal.
pub fn render(markdown: &str) -> String {
    // Fenced code blocks first, so their contents survive verbatim.
    let mut code_blocks: Vec<String> = Vec::new();
    let mut html = FENCE_RE
        .replace_all(markdown, |caps: &Captures| {
            let body = caps.get(2).map_or("", |m| m.as_str());
            // Language tag (capture 1) is dropped; it only ever styled the block.
            code_blocks.push(format!("<pre><code>{}</code></pre>", body.trim()));
            format!("{BLOCK_MARK}{}{BLOCK_MARK}", code_blocks.len() - 1)
        })
        .into_owned();

    // Headers (h1-h6).
    html = H3_RE.replace_all(&html, "<h3>$1</h3>").into_owned();
    html = H2_RE.replace_all(&html, "<h2>$1</h2>").into_owned();
    html = H1_RE.replace_all(&html, "<h1>$1</h1>").into_owned();
    html = H4_RE.replace_all(&html, "<h4>$1</h4>").into_owned();
    html = H5_RE.replace_all(&html, "<h5>$1</h5>").into_owned();
    html = H6_RE.replace_all(&html, "<h6>$1</h6>").into_owned();

    // Bold before italic.
    html = BOLD_STARS_RE
        .replace_all(&html, "<strong>$1</strong>")
        .into_owned();
    html = BOLD_UNDERSCORES_RE
        .replace_all(&html, "<strong>$1</strong>")
        .into_owned();
    html = ITALIC_STAR_RE.replace_all(&html, "<em>$1</em>").into_owned();
    html = ITALIC_UNDERSCORE_RE
        .replace_all(&html, "<em>$1</em>")
        .into_owned();

    html = STRIKETHROUGH_RE
        .replace_all(&html, "<del>$1</del>")
        .into_owned();

    html = INLINE_CODE_RE
        .replace_all(&html, "<code>$1</code>")
        .into_owned();

    // Images before links, or the link pattern strands the leading `!`.
    html = IMAGE_RE
        .replace_all(&html, "<img src=\"$2\" alt=\"$1\" />")
        .into_owned();
    html = LINK_RE
        .replace_all(&html, "<a href=\"$2\">$1</a>")
        .into_owned();

    // Unordered lists.
    html = ULIST_STAR_RE.replace_all(&html, "<li>$1</li>").into_owned();
    html = ULIST_DASH_RE.replace_all(&html, "<li>$1</li>").into_owned();
    html = ULIST_WRAP_RE.replace(&html, "<ul>$1</ul>").into_owned();

    // Ordered list items get no wrapper.
    html = OLIST_RE.replace_all(&html, "<li>$1</li>").into_owned();

    // One blockquote per quoted line.
    html = BLOCKQUOTE_RE
        .replace_all(&html, "<blockquote>$1</blockquote>")
        .into_owned();

    // Horizontal rules.
    html = HR_DASHES_RE.replace_all(&html, "<hr />").into_owned();
    html = HR_STARS_RE.replace_all(&html, "<hr />").into_owned();

    // Paragraphs: double newlines split, then wrap the whole fragment.
    html = html.replace("\n\n", "</p><p>");
    html = format!("<p>{html}</p>");
    html = html.replace("<p></p>", "");

    // Splice the fenced blocks back in.
    for (i, block) in code_blocks.iter().enumerate() {
        html = html.replace(&format!("{BLOCK_MARK}{i}{BLOCK_MARK}"), block);
    }

    html
}
