use std::io::Cursor;

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::{ChangeFreq, SitemapRoute};
use crate::content::timestamp::nanos_to_date;
use crate::content::PostMetadata;
use crate::error::{Result, SiteError};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Every blog post gets the same change frequency and priority.
pub const BLOG_CHANGEFREQ: ChangeFreq = ChangeFreq::Monthly;
pub const BLOG_PRIORITY: f32 = 0.6;

/// Generate `sitemap.xml`: the static routes in declared order (stamped with
/// `today`), then one `/blog/{slug}` entry per published post in input order.
pub fn generate_sitemap(
    static_routes: &[SitemapRoute],
    hostname: &str,
    posts: &[PostMetadata],
    today: NaiveDate,
) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let base = hostname.trim_end_matches('/');

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    write(&mut writer, Event::Start(urlset))?;

    let build_date = nanos_to_date(None, today);
    for route in static_routes {
        write_url(
            &mut writer,
            &format!("{base}{}", route.path),
            &build_date,
            route.changefreq,
            route.priority,
        )?;
    }

    for post in posts.iter().filter(|p| p.is_published()) {
        write_url(
            &mut writer,
            &format!("{base}/blog/{}", post.slug),
            &nanos_to_date(Some(post.updated_at), today),
            BLOG_CHANGEFREQ,
            BLOG_PRIORITY,
        )?;
    }

    write(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| SiteError::Build(format!("Sitemap encoding error: {e}")))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| SiteError::Build(format!("Sitemap write error: {e}")))
}

fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(tag)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(tag)))
}

fn write_url(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    loc: &str,
    lastmod: &str,
    changefreq: ChangeFreq,
    priority: f32,
) -> Result<()> {
    write(writer, Event::Start(BytesStart::new("url")))?;
    write_text_element(writer, "loc", loc)?;
    write_text_element(writer, "lastmod", lastmod)?;
    write_text_element(writer, "changefreq", changefreq.as_str())?;
    write_text_element(writer, "priority", &format!("{priority:.1}"))?;
    write(writer, Event::End(BytesEnd::new("url")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::post;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn static_routes() -> Vec<SitemapRoute> {
        vec![
            SitemapRoute::new("/", ChangeFreq::Weekly, 1.0),
            SitemapRoute::new("/blog", ChangeFreq::Daily, 0.8),
        ]
    }

    fn url_blocks(xml: &str) -> Vec<&str> {
        xml.split("<url>").skip(1).collect()
    }

    #[test]
    fn test_empty_posts_still_lists_static_routes() {
        let xml = generate_sitemap(&static_routes(), "https://coop.example", &[], today()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://coop.example/</loc>"));
        assert!(xml.contains("<lastmod>2026-03-01</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_drafts_excluded() {
        let posts = vec![post("live", Some(1)), post("secret-draft", None)];
        let xml = generate_sitemap(&static_routes(), "https://coop.example", &posts, today()).unwrap();
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<loc>https://coop.example/blog/live</loc>"));
        assert!(!xml.contains("secret-draft"));
    }

    #[test]
    fn test_blog_lastmod_uses_updated_not_published() {
        let mut p = post("dated", Some(1_600_000_000_000_000_000));
        p.updated_at = 1_700_000_000_000_000_000;
        let xml = generate_sitemap(&[], "https://coop.example", &[p], today()).unwrap();
        assert!(xml.contains("<lastmod>2023-11-14</lastmod>"));
        assert!(!xml.contains("2020-09-13"));
    }

    #[test]
    fn test_blog_policy_constants() {
        let posts = vec![post("a", Some(1)), post("b", Some(2))];
        let xml = generate_sitemap(&static_routes(), "https://coop.example", &posts, today()).unwrap();
        for block in url_blocks(&xml).iter().filter(|b| b.contains("/blog/")) {
            assert!(block.contains("<priority>0.6</priority>"));
            assert!(block.contains("<changefreq>monthly</changefreq>"));
        }
    }

    #[test]
    fn test_ordering_static_then_posts_in_input_order() {
        let posts = vec![post("zeta", Some(1)), post("alpha", Some(2))];
        let xml = generate_sitemap(&static_routes(), "https://coop.example/", &posts, today()).unwrap();
        let locs: Vec<&str> = url_blocks(&xml)
            .iter()
            .map(|b| {
                let start = b.find("<loc>").unwrap() + 5;
                let end = b.find("</loc>").unwrap();
                &b[start..end]
            })
            .collect();
        assert_eq!(
            locs,
            [
                "https://coop.example/",
                "https://coop.example/blog",
                "https://coop.example/blog/zeta",
                "https://coop.example/blog/alpha",
            ]
        );
    }

    #[test]
    fn test_loc_is_xml_escaped() {
        let routes = vec![SitemapRoute::new("/search?a=1&b=2", ChangeFreq::Never, 0.1)];
        let xml = generate_sitemap(&routes, "https://coop.example", &[], today()).unwrap();
        assert!(xml.contains("/search?a=1&amp;b=2"));
    }
}
