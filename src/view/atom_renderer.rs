use std::io::Cursor;

use chrono::{NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::Author;
use crate::post::Post;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Alejandro Celaya | Blog</title>
  <subtitle>Software development, agile methodologies and open source software</subtitle>
  <id>https://alejandrocelaya.blog</id>
  <link href="https://alejandrocelaya.blog"/>
  <link rel="self" href="https://alejandrocelaya.blog/atom.xml"/>
  <updated>2024-03-05T00:00:00Z</updated>
  <author><name>Alejandro Celaya</name></author>
  <entry>
    <title>Hello world</title>
    <id>https://alejandrocelaya.blog/2024/03/05/hello-world/</id>
    <link href="https://alejandrocelaya.blog/2024/03/05/hello-world/"/>
    <updated>2024-03-05T00:00:00Z</updated>
    <summary>Some text…</summary>
    <content type="html"><![CDATA[<p>Some text</p>]]></content>
    <category term="Development"/>
  </entry>
</feed>
*/

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// A post as it goes into the feed, with its rendered body.
pub struct FeedEntry<'a> {
    pub post: &'a Post,
    pub content: &'a str,
}

pub struct AtomFeed<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    /// Site url, without trailing slash
    pub base_url: &'a str,
    pub file_name: &'a str,
    pub author: Option<&'a Author>,
}

impl<'a> AtomFeed<'a> {
    /// Entries are expected newest first. The feed is as old as its newest
    /// entry, so the same posts always give the same document.
    pub fn render(&self, entries: &[FeedEntry]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut feed = BytesStart::new("feed");
        feed.push_attribute(("xmlns", ATOM_NS));
        writer.write_event(Event::Start(feed))?;

        push_text(&mut writer, "title", self.title)?;
        if !self.subtitle.is_empty() {
            push_text(&mut writer, "subtitle", self.subtitle)?;
        }
        push_text(&mut writer, "id", self.base_url)?;
        push_link(&mut writer, None, self.base_url)?;
        let self_link = format!("{}/{}", self.base_url, self.file_name);
        push_link(&mut writer, Some("self"), &self_link)?;

        let updated = entries.first().map(|e| e.post.date).unwrap_or_default();
        push_text(&mut writer, "updated", &atom_date(&updated))?;

        if let Some(author) = self.author {
            push_author(&mut writer, author)?;
        }

        for entry in entries {
            let post = entry.post;
            writer.write_event(Event::Start(BytesStart::new("entry")))?;

            push_text(&mut writer, "title", post.title())?;
            let link = format!("{}{}", self.base_url, post.url);
            push_text(&mut writer, "id", &link)?;
            push_link(&mut writer, None, &link)?;
            push_text(&mut writer, "updated", &atom_date(&post.date))?;
            push_text(&mut writer, "summary", &post.excerpt)?;
            push_cdata(&mut writer, "content", entry.content)?;

            for category in &post.data.categories {
                let mut elem = BytesStart::new("category");
                elem.push_attribute(("term", category.as_str()));
                writer.write_event(Event::Empty(elem))?;
            }

            writer.write_event(Event::End(BytesEnd::new("entry")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("feed")))?;

        Ok(writer.into_inner().into_inner())
    }
}

/// Midnight UTC of the publication day, as RFC 3339.
fn atom_date(date: &NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_link(writer: &mut Writer<Cursor<Vec<u8>>>, rel: Option<&str>, href: &str) -> quick_xml::Result<()> {
    let mut link = BytesStart::new("link");
    if let Some(rel) = rel {
        link.push_attribute(("rel", rel));
    }
    link.push_attribute(("href", href));
    writer.write_event(Event::Empty(link))?;
    Ok(())
}

fn push_author(writer: &mut Writer<Cursor<Vec<u8>>>, author: &Author) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("author")))?;
    push_text(writer, "name", &author.name)?;
    if let Some(email) = &author.email {
        push_text(writer, "email", email)?;
    }
    if let Some(link) = &author.link {
        push_text(writer, "uri", link)?;
    }
    writer.write_event(Event::End(BytesEnd::new("author")))?;
    Ok(())
}

/// `type="html"` content, kept unescaped inside CDATA. Every `]]>` of the
/// text is split over two adjacent sections, so readers get it back intact.
fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    let mut elem = BytesStart::new(tag);
    elem.push_attribute(("type", "html"));
    writer.write_event(Event::Start(elem))?;

    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        // `]]` ends this section, `>` starts the next one
        writer.write_event(Event::CData(BytesCData::new(&rest[..pos + 2])))?;
        rest = &rest[pos + 2..];
    }
    writer.write_event(Event::CData(BytesCData::new(rest)))?;

    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
