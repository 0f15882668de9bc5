use maud::{DOCTYPE, Markup, html};

use crate::HTMX_PATH;

/// Page shell shared by every HTML route.
#[must_use]
pub fn page(title: &str, body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" type="text/css" href="/static/styles.css";
                title { (title) }
                script src=(HTMX_PATH) defer {}
            }
            body {
                header class="site-header" {
                    a class="brand" href="/" { "Matchday" }
                    nav {
                        a href="/" { "Scores" }
                        a href="/?filter=live" { "Live" }
                    }
                }
                main class="container" {
                    (body)
                }
            }
        }
    }
}

pub fn team_badge(name: &str, logo: Option<&str>) -> Markup {
    html! {
        span class="badge" {
            img src=(logo.unwrap_or("/placeholder.svg")) alt=(name) width="24" height="24";
        }
    }
}
