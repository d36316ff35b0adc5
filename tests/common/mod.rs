#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use trellis::catalog::Definitions;
use trellis::element::Element;
use trellis::reader::Reader;
use trellis::settings::ReaderConfig;
use trellis::state::FixedClock;

/// Noon, June 1st 2020, universal time.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
}

pub fn definitions() -> Definitions {
    Definitions::new()
        .with("StartPage", "Start page")
        .with("TextPage", "Text page")
        .with("NewsItem", "News item")
}

pub fn reader(config: ReaderConfig) -> Reader {
    let _ = tracing_subscriber::fmt::try_init();
    Reader::with_definitions(definitions())
        .with_config(config)
        .with_clock(Arc::new(FixedClock(now())))
}

/// An item carrying exactly the required attributes.
pub fn item(id: i32) -> Element {
    Element::new("item")
        .attr("id", id.to_string())
        .attr("discriminator", "TextPage")
        .attr("created", "01/15/2020 08:30:00")
        .attr("updated", "02/20/2020 17:45:10")
        .attr("sortOrder", "0")
        .attr("visible", "True")
}

pub fn child_of(id: i32, parent: i32) -> Element {
    item(id).attr("parent", parent.to_string())
}

pub fn version_key(key: &str) -> Element {
    Element::new("details").child(
        Element::new("detail")
            .attr("name", "VersionKey")
            .attr("typeName", "System.String")
            .text(key),
    )
}
