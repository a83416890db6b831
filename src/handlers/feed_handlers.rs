use actix_web::{HttpResponse, web};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::announcement::{self, AnnouncementItem};

#[derive(Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), AppError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| AppError::Xml(e.to_string()))?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| AppError::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| AppError::Xml(e.to_string()))?;
    Ok(())
}

fn to_xml(items: &[AnnouncementItem]) -> Result<String, AppError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| AppError::Xml(e.to_string()))?;
    writer
        .write_event(Event::Start(BytesStart::new("announcements")))
        .map_err(|e| AppError::Xml(e.to_string()))?;

    for item in items {
        let mut start = BytesStart::new("announcement");
        start.push_attribute(("thesis_id", item.thesis_id.to_string().as_str()));
        writer
            .write_event(Event::Start(start))
            .map_err(|e| AppError::Xml(e.to_string()))?;

        write_element(&mut writer, "title", &item.title)?;
        write_element(&mut writer, "student", &item.student_name)?;
        write_element(&mut writer, "supervisor", &item.supervisor_name)?;
        write_element(&mut writer, "scheduled_at", &item.scheduled_at)?;
        write_element(&mut writer, "mode", &item.mode)?;
        write_element(&mut writer, "venue", &item.venue)?;
        write_element(&mut writer, "announced_at", &item.announced_at)?;

        writer
            .write_event(Event::End(BytesEnd::new("announcement")))
            .map_err(|e| AppError::Xml(e.to_string()))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("announcements")))
        .map_err(|e| AppError::Xml(e.to_string()))?;

    String::from_utf8(writer.into_inner()).map_err(|e| AppError::Xml(e.to_string()))
}

/// GET /api/announcements — unauthenticated feed of scheduled
/// examination presentations, as JSON (default) or XML.
pub async fn list(
    pool: web::Data<SqlitePool>,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse, AppError> {
    let items = announcement::find_announcements(
        &pool,
        query.from.as_deref(),
        query.to.as_deref(),
    )
    .await?;

    match query.format.as_deref() {
        Some("xml") => {
            let body = to_xml(&items)?;
            Ok(HttpResponse::Ok()
                .content_type("application/xml; charset=utf-8")
                .body(body))
        }
        _ => Ok(HttpResponse::Ok().json(items)),
    }
}
