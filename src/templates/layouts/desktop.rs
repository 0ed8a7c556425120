use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #111; }
header { display: flex; align-items: center; gap: 1.5rem; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.15); }
header h3 { margin: 0; }
nav a { margin-right: 1rem; text-decoration: none; color: #555; }
nav a.active { color: #de0909; font-weight: 600; }
.page { display: flex; }
aside { width: 15rem; padding: 1rem 1.5rem; border-right: 1px solid #eee; }
main { flex: 1; padding: 1rem 1.5rem; }
.columns { display: grid; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); gap: 1rem; }
.card { border: 1px solid #eee; border-radius: 6px; padding: 0.75rem 1rem; }
.bar-row { display: flex; align-items: center; gap: 0.5rem; margin: 0.25rem 0; font-size: 0.85rem; }
.bar-label { width: 45%; text-align: right; }
.bar-track { flex: 1; }
.bar { height: 1rem; }
.stack { display: flex; height: 1.5rem; margin: 0.25rem 0; }
.stack span { color: #fff; font-size: 0.75rem; text-align: center; overflow: hidden; }
.donut { width: 10rem; height: 10rem; border-radius: 50%; margin: 0.5rem auto; }
.legend span { display: inline-block; margin-right: 0.75rem; font-size: 0.8rem; }
.swatch { display: inline-block; width: 0.75rem; height: 0.75rem; margin-right: 0.25rem; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border-bottom: 1px solid #eee; padding: 0.4rem; text-align: left; vertical-align: top; }
.empty { color: #888; }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Highlighted,
}

pub fn desktop_layout(title: &str, active: Tab, sidebar: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Customer Reviews Dashboard" }
                    nav {
                        a href="/" class=[(active == Tab::Overview).then_some("active")] { "Overview" }
                        a href="/reviews" class=[(active == Tab::Highlighted).then_some("active")] { "Highlighted Reviews" }
                    }
                    form action="/reload" method="post" {
                        button type="submit" { "Reload data" }
                    }
                }
                div class="page" {
                    aside { (sidebar) }
                    main { (content) }
                }
            }
        }
    }
}
