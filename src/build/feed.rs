use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::SiteSection;
use crate::content::timestamp::nanos_to_rfc2822;
use crate::content::PostMetadata;
use crate::error::{Result, SiteError};

/// RSS `<author>` must be an email address; plain names go in `dc:creator`.
const DUBLIN_CORE_NS: &str = "http://purl.org/dc/elements/1.1/";

pub fn generate_rss(site: &SiteSection, posts: &[PostMetadata]) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:dc", DUBLIN_CORE_NS));
    write(&mut writer, Event::Start(rss))?;
    write(&mut writer, Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &site.name)?;
    write_text_element(&mut writer, "link", &site.absolute_url("/blog"))?;
    write_text_element(&mut writer, "description", &site.description)?;
    write_text_element(&mut writer, "language", &site.language)?;

    for post in posts {
        // Drafts never reach the feed
        let Some(published_at) = post.published_at else {
            continue;
        };
        write(&mut writer, Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &post.title)?;
        let link = site.blog_url(&post.slug);
        write_text_element(&mut writer, "link", &link)?;
        write_text_element(&mut writer, "guid", &link)?;
        write_text_element(&mut writer, "pubDate", &nanos_to_rfc2822(published_at))?;
        write_text_element(&mut writer, "description", &post.excerpt)?;
        if !post.author_name.is_empty() {
            write_text_element(&mut writer, "dc:creator", &post.author_name)?;
        }
        for category in &post.categories {
            write_text_element(&mut writer, "category", category)?;
        }
        write(&mut writer, Event::End(BytesEnd::new("item")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write(&mut writer, Event::End(BytesEnd::new("rss")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| SiteError::Build(format!("RSS encoding error: {e}")))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| SiteError::Build(format!("RSS write error: {e}")))
}

fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(tag)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(tag)))
}
