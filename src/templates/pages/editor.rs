use crate::markdown;
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

const SAMPLE_MARKDOWN: &str = "# Markdown Preview\n\n\
This editor renders **markdown** as you type!\n\n\
## Supported\n\n\
* **Bold** and *italic* text\n\
* ~~Strikethrough~~\n\
* `inline code` and code blocks\n\
* Links and images\n\
* Lists and quotes\n\n\
```rust\n\
fn hello() {\n\
    println!(\"Hello!\");\n\
}\n\
```\n\n\
> Quotes work line by line.\n\n\
---\n\n\
[Back to the dashboard](/dashboard)";

/// Markdown editor with an htmx-driven live preview: every keystroke
/// posts the source to /preview and swaps the rendered fragment in.
pub fn editor_page() -> Markup {
    desktop_layout(
        "Markdown Editor",
        html! {
            main class="container" {
                h1 { "Markdown Editor" }
                p class="text-gray-600" {
                    "Used for listing descriptions. The preview updates as you type."
                }

                div class="editor-grid" style="display: flex; gap: 1rem; align-items: stretch;" {
                    form style="flex: 1;" {
                        textarea
                            name="markdown"
                            rows="24"
                            style="width: 100%; font-family: monospace;"
                            hx-post="/preview"
                            hx-target="#preview-area"
                            hx-swap="innerHTML"
                            hx-trigger="input changed delay:300ms, load"
                        {
                            (SAMPLE_MARKDOWN)
                        }
                    }
                    div id="preview-area" class="card prose" style="flex: 1;" {
                        (PreEscaped(markdown::render(SAMPLE_MARKDOWN)))
                    }
                }
            }
        },
    )
}
