//! Crawler-facing HTML shells for blog posts.
//!
//! Each published post gets a standalone document carrying the title,
//! description, canonical link, Open Graph / Twitter tags and an `Article`
//! JSON-LD block, plus an empty hydration root. Real browsers that land on a
//! shell are sent on to the client-side route.

use serde_json::json;

use crate::config::{defaults, SiteSection};
use crate::content::timestamp::nanos_to_iso;
use crate::content::PostMetadata;

pub const TITLE_SEPARATOR: &str = " | ";

/// Global the client bundle sets once it has hydrated a prerendered page.
pub const PRERENDERED_FLAG: &str = "__PRERENDERED__";

/// Query parameter marking a redirect out of a shell, so the guard never loops.
const SPA_PARAM: &str = "spa=1";

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// The hydration-root element with `inner` as its content. With empty
/// `inner` this is the exact marker the client build emits.
pub fn hydration_root(root_id: &str, inner: &str) -> String {
    format!(r#"<div id="{root_id}">{inner}</div>"#)
}

/// Serialize a value for embedding inside a `<script>` element.
fn script_json(value: &serde_json::Value, pretty: bool) -> String {
    let body = if pretty {
        format!("{value:#}")
    } else {
        value.to_string()
    };
    body.replace("</", "<\\/")
}

/// The `Article` JSON-LD `<script>` tag for a post.
pub fn generate_json_ld(post: &PostMetadata, site: &SiteSection) -> String {
    let url = site.blog_url(&post.slug);
    let default_image = site.default_image();

    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": post.title,
        "description": post.excerpt,
        "image": post.share_image(&default_image),
        "author": {
            "@type": "Person",
            "name": post.author_name,
        },
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "logo": {
                "@type": "ImageObject",
                "url": site.logo(),
            },
        },
        "url": url,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": url,
        },
    });
    if let Some(published_at) = post.published_at {
        data["datePublished"] = json!(nanos_to_iso(published_at));
    }
    data["dateModified"] = json!(nanos_to_iso(post.updated_at));

    format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        script_json(&data, true)
    )
}

/// The complete crawler shell for one post.
pub fn generate_html_shell(post: &PostMetadata, site: &SiteSection) -> String {
    let title = escape_html(&post.title);
    let description = escape_html(&post.excerpt);
    let site_name = escape_html(&site.name);
    let canonical = escape_html(&site.blog_url(&post.slug));
    let default_image = site.default_image();
    let image = escape_html(post.share_image(&default_image));

    let mut article_tags = String::new();
    if let Some(published_at) = post.published_at {
        article_tags.push_str(&format!(
            "\n    <meta property=\"article:published_time\" content=\"{}\" />",
            nanos_to_iso(published_at)
        ));
    }
    article_tags.push_str(&format!(
        "\n    <meta property=\"article:modified_time\" content=\"{}\" />",
        nanos_to_iso(post.updated_at)
    ));
    for tag in &post.tags {
        article_tags.push_str(&format!(
            "\n    <meta property=\"article:tag\" content=\"{}\" />",
            escape_html(tag)
        ));
    }

    let redirect_target = script_json(
        &json!(format!("/blog/{}?{SPA_PARAM}", post.slug)),
        false,
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}{sep}{site_name}</title>
    <meta name="description" content="{description}" />
    <link rel="canonical" href="{canonical}" />
    <meta property="og:title" content="{title}" />
    <meta property="og:description" content="{description}" />
    <meta property="og:image" content="{image}" />
    <meta property="og:url" content="{canonical}" />
    <meta property="og:type" content="article" />
    <meta property="og:site_name" content="{site_name}" />
    <meta name="twitter:card" content="summary_large_image" />
    <meta name="twitter:title" content="{title}" />
    <meta name="twitter:description" content="{description}" />
    <meta name="twitter:image" content="{image}" />{article_tags}
    {json_ld}
  </head>
  <body>
    {root}
    <script>if(!window.{flag}&&location.search.indexOf('{spa}')===-1){{location.replace({redirect_target})}}</script>
  </body>
</html>
"#,
        lang = escape_html(&site.language),
        sep = TITLE_SEPARATOR,
        json_ld = generate_json_ld(post, site),
        root = hydration_root(&defaults::root_id(), ""),
        flag = PRERENDERED_FLAG,
        spa = SPA_PARAM,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::post;

    fn site() -> SiteSection {
        SiteSection {
            hostname: "https://coop.example".into(),
            ..SiteSection::default()
        }
    }

    fn json_ld_value(script: &str) -> serde_json::Value {
        let start = script.find('{').unwrap();
        let end = script.rfind('}').unwrap();
        serde_json::from_str(&script[start..=end]).unwrap()
    }

    #[test]
    fn test_escape_html_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_empty() {
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_hydration_root() {
        assert_eq!(hydration_root("root", ""), r#"<div id="root"></div>"#);
        assert_eq!(hydration_root("app", "<p>x</p>"), r#"<div id="app"><p>x</p></div>"#);
    }

    #[test]
    fn test_escape_html_plain_text_untouched() {
        assert_eq!(escape_html("Hello, world. Ünïcödé!"), "Hello, world. Ünïcödé!");
    }

    #[test]
    fn test_escape_html_escapes_existing_entities_again() {
        // Escaping is one-directional: entities are not recognized
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_title_and_description_escaped_exactly() {
        let mut p = post("escaped", Some(1));
        p.title = r#"Test <b>bold</b> & "quotes""#.into();
        p.excerpt = "It's a <em>world</em>".into();
        let html = generate_html_shell(&p, &site());
        assert!(html.contains(
            "<title>Test &lt;b&gt;bold&lt;/b&gt; &amp; &quot;quotes&quot; | Hello World Co-Op</title>"
        ));
        assert!(html.contains(
            r#"<meta name="description" content="It&#39;s a &lt;em&gt;world&lt;/em&gt;" />"#
        ));
    }

    #[test]
    fn test_headline_is_raw_json_not_html_escaped() {
        let mut p = post("raw", Some(1));
        p.title = r#"Test <b>bold</b> & "quotes""#.into();
        let value = json_ld_value(&generate_json_ld(&p, &site()));
        assert_eq!(value["headline"], r#"Test <b>bold</b> & "quotes""#);
    }

    #[test]
    fn test_json_ld_cannot_close_script_early() {
        let mut p = post("breakout", Some(1));
        p.title = "</script><script>alert(1)</script>".into();
        let script = generate_json_ld(&p, &site());
        assert_eq!(script.matches("</script>").count(), 1);
        assert_eq!(json_ld_value(&script)["headline"], p.title);
    }

    #[test]
    fn test_canonical_and_open_graph() {
        let html = generate_html_shell(&post("hello-world", Some(1)), &site());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://coop.example/blog/hello-world" />"#));
        assert!(html.contains(r#"<meta property="og:url" content="https://coop.example/blog/hello-world" />"#));
        assert!(html.contains(r#"<meta property="og:type" content="article" />"#));
        assert!(html.contains(r#"<meta property="og:site_name" content="Hello World Co-Op" />"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
        assert!(html.contains(r#"<meta property="article:tag" content="coop" />"#));
    }

    #[test]
    fn test_empty_root_and_redirect_guard() {
        let html = generate_html_shell(&post("hello-world", Some(1)), &site());
        assert_eq!(html.matches(r#"<div id="root"></div>"#).count(), 1);
        assert!(html.contains("if(!window.__PRERENDERED__"));
        assert!(html.contains(r#"location.replace("/blog/hello-world?spa=1")"#));
    }

    #[test]
    fn test_image_fallback_default() {
        let p = post("plain", Some(1));
        let html = generate_html_shell(&p, &site());
        assert!(html.contains(r#"<meta property="og:image" content="https://coop.example/og-image.png" />"#));
        assert!(html.contains(r#"<meta name="twitter:image" content="https://coop.example/og-image.png" />"#));
        let value = json_ld_value(&generate_json_ld(&p, &site()));
        assert_eq!(value["image"], "https://coop.example/og-image.png");
    }

    #[test]
    fn test_image_fallback_featured_beats_default() {
        let mut p = post("featured", Some(1));
        p.featured_image = Some("https://cdn.example/featured.png".into());
        let html = generate_html_shell(&p, &site());
        assert!(html.contains(r#"<meta property="og:image" content="https://cdn.example/featured.png" />"#));
        assert!(html.contains(r#"<meta name="twitter:image" content="https://cdn.example/featured.png" />"#));
        assert!(!html.contains("og-image.png"));
        let value = json_ld_value(&generate_json_ld(&p, &site()));
        assert_eq!(value["image"], "https://cdn.example/featured.png");
    }

    #[test]
    fn test_image_fallback_og_beats_featured() {
        let mut p = post("og", Some(1));
        p.featured_image = Some("https://cdn.example/featured.png".into());
        p.og_image = Some("https://cdn.example/og.png".into());
        let html = generate_html_shell(&p, &site());
        assert!(html.contains(r#"<meta property="og:image" content="https://cdn.example/og.png" />"#));
        assert!(!html.contains("featured.png"));
        let value = json_ld_value(&generate_json_ld(&p, &site()));
        assert_eq!(value["image"], "https://cdn.example/og.png");
    }

    #[test]
    fn test_json_ld_fields() {
        let p = post("fields", Some(1_700_000_000_000_000_000));
        let script = generate_json_ld(&p, &site());
        assert!(script.starts_with(r#"<script type="application/ld+json">"#));
        let value = json_ld_value(&script);
        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(value["@type"], "Article");
        assert_eq!(value["author"]["@type"], "Person");
        assert_eq!(value["author"]["name"], "Ada Lovelace");
        assert_eq!(value["publisher"]["@type"], "Organization");
        assert_eq!(value["publisher"]["name"], "Hello World Co-Op");
        assert_eq!(value["publisher"]["logo"]["url"], "https://coop.example/logo.png");
        assert_eq!(value["url"], "https://coop.example/blog/fields");
        assert_eq!(value["mainEntityOfPage"]["@id"], "https://coop.example/blog/fields");
        assert_eq!(value["datePublished"], "2023-11-14T22:13:20.000Z");
        assert_eq!(value["dateModified"], "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_json_ld_omits_missing_published_date() {
        let value = json_ld_value(&generate_json_ld(&post("draft", None), &site()));
        assert!(value.get("datePublished").is_none());
        assert!(value.get("dateModified").is_some());
    }
}
