//! Static HTML rendering of a snippet, stored alongside it on every save.
//!
//! The document carries the snippet's language and style as CSS hooks; the
//! code itself is escaped verbatim without lexical colouring.

use std::fmt::Write;

use snippets_types::models::SnippetFields;

pub fn render(fields: &SnippetFields) -> String {
    let title = escape(&fields.title);
    let language = escape(&fields.language);
    let style = escape(&fields.style);

    let mut code = escape(&fields.code);
    if !code.ends_with('\n') {
        code.push('\n');
    }

    let block = format!(
        "<div class=\"highlight\" data-language=\"{language}\"><pre><span></span>{code}</pre></div>"
    );
    let body = if fields.linenos {
        let line_count = code.lines().count().max(1);
        let numbers = (1..=line_count).fold(String::new(), |mut acc, n| {
            let _ = writeln!(acc, "{n}");
            acc
        });
        format!(
            "<table class=\"highlighttable\"><tr>\
             <td class=\"linenos\"><div class=\"linenodiv\"><pre>{numbers}</pre></div></td>\
             <td class=\"code\">{block}</td>\
             </tr></table>"
        )
    } else {
        block
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \x20 <title>{title}</title>\n\
         \x20 <meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\">\n\
         </head>\n\
         <body class=\"style-{style}\">\n\
         <h2>{title}</h2>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(code: &str, linenos: bool) -> SnippetFields {
        SnippetFields {
            title: "Hello <world>".into(),
            code: code.into(),
            linenos,
            ..SnippetFields::default()
        }
    }

    #[test]
    fn escapes_title_and_code() {
        let html = render(&snippet("if a < b && c > d:\n    print(\"x\")", false));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Hello &lt;world&gt;</title>"));
        assert!(html.contains("<h2>Hello &lt;world&gt;</h2>"));
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d:\n    print(&quot;x&quot;)\n</pre>"));
        assert!(!html.contains("highlighttable"));
    }

    #[test]
    fn records_language_and_style() {
        let html = render(&snippet("x", false));
        assert!(html.contains("data-language=\"python\""));
        assert!(html.contains("<body class=\"style-friendly\">"));
    }

    #[test]
    fn line_numbers_follow_code_lines() {
        let html = render(&snippet("a\nb\nc", true));
        assert!(html.contains("highlighttable"));
        assert!(html.contains("<pre>1\n2\n3\n</pre>"));

        let empty = render(&snippet("", true));
        assert!(empty.contains("<pre>1\n</pre>"));
    }
}
