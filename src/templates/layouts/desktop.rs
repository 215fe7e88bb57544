use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx.js" defer {};
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="icon icon-tabler icon-tabler-car"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        circle cx="7" cy="17" r="2" {}
                        circle cx="17" cy="17" r="2" {}
                        path d="M5 17h-2v-6l2 -5h9l4 5h1a2 2 0 0 1 2 2v4h-2m-4 0h-6m-6 -6h15m-6 0v-5" {}
                    }
                    h3 { "Car Listings" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/dashboard" { "Dashboard" } }
                            li { a href="/editor" { "Markdown Editor" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
